//! BGR frames: HSV thresholding and detection drawing with OpenCV

use crate::utils::ImageUtils;
use crate::Result;
use anyhow::{bail, Context};
use colortrack_core::traits::{Canvas, HsvFrame, Rgb};
use colortrack_core::{HsvBounds, Mask, Point};
use opencv::{
    core::{self, Mat, Scalar, CV_8UC3},
    imgproc::{self, FONT_HERSHEY_SIMPLEX, LINE_8},
    prelude::*,
};

/// Get OpenCV color scalar (BGR format)
pub fn bgr_scalar(color: Rgb) -> Scalar {
    Scalar::new(
        color.2 as f64, // B
        color.1 as f64, // G
        color.0 as f64, // R
        255.0,
    )
}

/// Per-channel bound in H, S, V order
fn hsv_scalar(channels: [u8; 3]) -> Scalar {
    Scalar::new(
        channels[0] as f64,
        channels[1] as f64,
        channels[2] as f64,
        0.0,
    )
}

fn cv_point(p: Point) -> core::Point {
    core::Point::new(p.x, p.y)
}

/// 8-bit BGR frame as delivered by `VideoCapture` and `imread`
pub struct BgrFrame(Mat);

impl BgrFrame {
    pub fn mat(&self) -> &Mat {
        &self.0
    }
}

impl From<Mat> for BgrFrame {
    fn from(mat: Mat) -> Self {
        Self(mat)
    }
}

impl HsvFrame for BgrFrame {
    type Hsv = Mat;

    fn to_hsv(&self) -> Result<Mat> {
        if self.0.typ() != CV_8UC3 {
            bail!("Expected an 8-bit 3-channel frame, got Mat type {}", self.0.typ());
        }

        let mut hsv = Mat::default();
        imgproc::cvt_color(&self.0, &mut hsv, imgproc::COLOR_BGR2HSV, 0)
            .context("Failed to convert BGR to HSV")?;
        Ok(hsv)
    }

    fn in_range(hsv: &Mat, bounds: &HsvBounds) -> Result<Mask> {
        let mut mask = Mat::default();
        core::in_range(
            hsv,
            &hsv_scalar(bounds.lower),
            &hsv_scalar(bounds.upper),
            &mut mask,
        )
        .context("inRange failed")?;

        ImageUtils::mat_to_mask(&mask)
    }
}

impl Canvas for BgrFrame {
    fn draw_rectangle(
        &mut self,
        top_left: Point,
        bottom_right: Point,
        color: Rgb,
        thickness: i32,
    ) -> Result<()> {
        imgproc::rectangle_points(
            &mut self.0,
            cv_point(top_left),
            cv_point(bottom_right),
            bgr_scalar(color),
            thickness,
            LINE_8,
            0,
        )?;
        Ok(())
    }

    fn put_text(
        &mut self,
        text: &str,
        origin: Point,
        color: Rgb,
        font_scale: f64,
        thickness: i32,
    ) -> Result<()> {
        imgproc::put_text(
            &mut self.0,
            text,
            cv_point(origin),
            FONT_HERSHEY_SIMPLEX,
            font_scale,
            bgr_scalar(color),
            thickness,
            LINE_8,
            false,
        )?;
        Ok(())
    }
}
