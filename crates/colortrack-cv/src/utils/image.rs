//! Image file access and mask conversions between OpenCV and `image`

use crate::Result;
use anyhow::{bail, Context};
use colortrack_core::{DetectError, Mask};
use opencv::{
    core::{Mat, Size, Vector, CV_8UC1},
    imgcodecs::{self, IMREAD_COLOR},
    imgproc,
    prelude::*,
};
use std::path::Path;

/// Image utility functions bridging OpenCV and the `image` crate
pub struct ImageUtils;

impl ImageUtils {
    /// Load image directly from path as a BGR Mat, optionally resized
    pub fn load_color<P: AsRef<Path>>(path: P, resize: Option<(u32, u32)>) -> Result<Mat> {
        let path_str = path.as_ref().to_string_lossy();

        let image = imgcodecs::imread(&path_str, IMREAD_COLOR)
            .with_context(|| format!("Failed to load color image: {}", path_str))?;
        if image.empty() {
            bail!("Could not decode image: {}", path_str);
        }

        match resize {
            Some((width, height)) => {
                let mut resized = Mat::default();
                imgproc::resize(
                    &image,
                    &mut resized,
                    Size::new(width as i32, height as i32),
                    0.0,
                    0.0,
                    imgproc::INTER_LINEAR,
                )
                .context("Failed to resize image")?;
                Ok(resized)
            }
            None => Ok(image),
        }
    }

    /// Save Mat as image
    pub fn save_image<P: AsRef<Path>>(mat: &Mat, path: P) -> Result<()> {
        let path_str = path.as_ref().to_string_lossy();

        let written = imgcodecs::imwrite(&path_str, mat, &Vector::new())
            .with_context(|| format!("Failed to save image: {}", path_str))?;
        if !written {
            bail!("No encoder accepted image: {}", path_str);
        }

        Ok(())
    }

    /// Copy a single-channel 8-bit Mat into a mask
    pub fn mat_to_mask(mat: &Mat) -> Result<Mask> {
        if mat.typ() != CV_8UC1 {
            bail!("Expected an 8-bit single-channel mask, got Mat type {}", mat.typ());
        }

        let (width, height) = (mat.cols() as u32, mat.rows() as u32);
        let bytes = if mat.is_continuous() {
            mat.data_bytes()?.to_vec()
        } else {
            mat.try_clone()?.data_bytes()?.to_vec()
        };
        let len = bytes.len();

        Mask::from_raw(width, height, bytes)
            .ok_or_else(|| DetectError::BufferSize { width, height, len }.into())
    }

    /// Binary mask as a single-channel Mat
    pub fn mask_to_mat(mask: &Mask) -> Result<Mat> {
        if mask.height() == 0 || mask.width() == 0 {
            return Ok(Mat::default());
        }

        let flat = Mat::from_slice(mask.as_raw()).context("Failed to wrap mask buffer")?;
        let shaped = flat
            .reshape(1, mask.height() as i32)
            .context("Failed to reshape mask buffer")?;

        shaped.try_clone().context("Failed to copy mask buffer")
    }
}
