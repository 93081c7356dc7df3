//! Contour extraction with OpenCV's `findContours`

use crate::utils::ImageUtils;
use crate::Result;
use anyhow::Context;
use colortrack_core::traits::ContourFinder;
use colortrack_core::{Contour, Mask, Point};
use opencv::{
    core::{self, Vector},
    imgproc::{self, CHAIN_APPROX_NONE, RETR_TREE},
    prelude::*,
};

/// `findContours` adapter. The hierarchy output is discarded.
#[derive(Debug, Clone, Copy)]
pub struct OpenCvContours {
    mode: i32,
    method: i32,
}

impl OpenCvContours {
    /// Full hierarchy, every boundary point kept
    pub fn new() -> Self {
        Self {
            mode: RETR_TREE,
            method: CHAIN_APPROX_NONE,
        }
    }
}

impl Default for OpenCvContours {
    fn default() -> Self {
        Self::new()
    }
}

impl ContourFinder for OpenCvContours {
    fn find_contours(&self, mask: &Mask) -> Result<Vec<Contour>> {
        let mat = ImageUtils::mask_to_mat(mask)?;
        if mat.empty() {
            return Ok(Vec::new());
        }

        let mut found = Vector::<Vector<core::Point>>::new();
        imgproc::find_contours(
            &mat,
            &mut found,
            self.mode,
            self.method,
            core::Point::new(0, 0),
        )
        .context("findContours failed")?;

        Ok(found
            .iter()
            .map(|c| Contour::new(c.iter().map(|p| Point::new(p.x, p.y)).collect()))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use colortrack_core::contour::select_largest;
    use colortrack_core::BBox;
    use image::Luma;

    #[test]
    fn test_square_matches_bounding_rect() -> Result<()> {
        let mut mask = Mask::new(200, 200);
        for y in 100..150 {
            for x in 100..150 {
                mask.put_pixel(x, y, Luma([255]));
            }
        }

        let found = OpenCvContours::new().find_contours(&mask)?;
        let (_, largest) = select_largest(&found).unwrap();

        assert_eq!(largest.bounding_box(), Some(BBox::new(100, 100, 50, 50)));
        assert_eq!(largest.area(), 49.0 * 49.0);
        Ok(())
    }

    #[test]
    fn test_empty_mask() -> Result<()> {
        assert!(OpenCvContours::new().find_contours(&Mask::new(16, 16))?.is_empty());
        Ok(())
    }
}
