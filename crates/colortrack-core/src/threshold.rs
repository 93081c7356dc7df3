//! Range thresholding of HSV images into binary masks

use crate::bounds::HsvBounds;
use crate::color::HsvImage;
use crate::traits::HsvFrame;
use crate::Result;
use image::{GrayImage, Luma, RgbImage};

/// Single-channel binary image: 255 foreground, 0 background
pub type Mask = GrayImage;

pub const FOREGROUND: u8 = u8::MAX;
pub const BACKGROUND: u8 = 0;

/// Keep every pixel whose three channels all lie inside `bounds`
pub fn in_range(hsv: &HsvImage, bounds: &HsvBounds) -> Mask {
    let (width, height) = hsv.dimensions();
    let mut mask = Mask::new(width, height);

    for (dst, px) in mask.pixels_mut().zip(hsv.pixels()) {
        *dst = Luma([if bounds.contains(px) {
            FOREGROUND
        } else {
            BACKGROUND
        }]);
    }

    mask
}

/// RGB frames thresholded without a vision library
impl HsvFrame for RgbImage {
    type Hsv = HsvImage;

    fn to_hsv(&self) -> Result<HsvImage> {
        Ok(HsvImage::from_rgb(self))
    }

    fn in_range(hsv: &HsvImage, bounds: &HsvBounds) -> Result<Mask> {
        Ok(in_range(hsv, bounds))
    }
}

/// Number of foreground pixels in a mask
pub fn foreground_count(mask: &Mask) -> usize {
    mask.pixels().filter(|p| p[0] != BACKGROUND).count()
}
