//! RGB to HSV conversion for `image` buffers
//!
//! Produces the same 8-bit values as OpenCV's `COLOR_BGR2HSV`: hue is
//! halved into `[0, 180)`, saturation and value span `[0, 255]`. The
//! fixed-point arithmetic follows OpenCV's lookup-table path so thresholds
//! chosen on OpenCV output carry over exactly to `RgbImage` frames.

use crate::error::DetectError;
use crate::Result;
use image::RgbImage;

const HSV_SHIFT: u32 = 12;
const HALF: i32 = 1 << (HSV_SHIFT - 1);
const HUE_RANGE: i32 = 180;

/// Convert one RGB pixel to `[h, s, v]`
pub fn rgb_to_hsv(r: u8, g: u8, b: u8) -> [u8; 3] {
    let (r, g, b) = (r as i32, g as i32, b as i32);
    let v = r.max(g).max(b);
    let diff = v - r.min(g).min(b);

    let s = if v == 0 {
        0
    } else {
        (diff * saturation_divisor(v) + HALF) >> HSV_SHIFT
    };

    let h = if diff == 0 {
        0
    } else {
        let sector = if v == r {
            g - b
        } else if v == g {
            b - r + 2 * diff
        } else {
            r - g + 4 * diff
        };
        let h = (sector * hue_divisor(diff) + HALF) >> HSV_SHIFT;
        if h < 0 { h + HUE_RANGE } else { h }
    };

    [h as u8, s as u8, v as u8]
}

#[inline]
fn saturation_divisor(v: i32) -> i32 {
    ((255 << HSV_SHIFT) as f64 / v as f64).round() as i32
}

#[inline]
fn hue_divisor(diff: i32) -> i32 {
    ((HUE_RANGE << HSV_SHIFT) as f64 / (6.0 * diff as f64)).round() as i32
}

/// Three-channel image holding `[h, s, v]` per pixel
#[derive(Debug, Clone, PartialEq)]
pub struct HsvImage {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl HsvImage {
    /// Convert an RGB frame
    pub fn from_rgb(rgb: &RgbImage) -> Self {
        let data = rgb
            .pixels()
            .flat_map(|p| rgb_to_hsv(p[0], p[1], p[2]))
            .collect();

        Self {
            width: rgb.width(),
            height: rgb.height(),
            data,
        }
    }

    /// Wrap an existing interleaved HSV buffer
    pub fn from_raw(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        if data.len() != width as usize * height as usize * 3 {
            return Err(DetectError::BufferSize {
                width,
                height,
                len: data.len(),
            }
            .into());
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Iterate pixels in row-major order
    pub fn pixels(&self) -> impl Iterator<Item = [u8; 3]> + '_ {
        self.data.chunks_exact(3).map(|c| [c[0], c[1], c[2]])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn test_primary_colors() {
        assert_eq!(rgb_to_hsv(255, 0, 0), [0, 255, 255]);
        assert_eq!(rgb_to_hsv(0, 255, 0), [60, 255, 255]);
        assert_eq!(rgb_to_hsv(0, 0, 255), [120, 255, 255]);
    }

    #[test]
    fn test_secondary_colors() {
        assert_eq!(rgb_to_hsv(255, 255, 0), [30, 255, 255]);
        assert_eq!(rgb_to_hsv(0, 255, 255), [90, 255, 255]);
        assert_eq!(rgb_to_hsv(255, 0, 255), [150, 255, 255]);
    }

    #[test]
    fn test_grays_have_no_hue_or_saturation() {
        assert_eq!(rgb_to_hsv(0, 0, 0), [0, 0, 0]);
        assert_eq!(rgb_to_hsv(128, 128, 128), [0, 0, 128]);
        assert_eq!(rgb_to_hsv(255, 255, 255), [0, 0, 255]);
    }

    #[test]
    fn test_hue_wraps_below_zero() {
        // red with a blue tint lands just under 180
        let [h, _, v] = rgb_to_hsv(255, 0, 10);
        assert!(h > 170 && h < 180, "hue was {h}");
        assert_eq!(v, 255);
    }

    #[test]
    fn test_image_conversion() {
        let mut rgb = RgbImage::new(2, 1);
        rgb.put_pixel(1, 0, Rgb([0, 0, 255]));

        let hsv = HsvImage::from_rgb(&rgb);
        assert_eq!(hsv.dimensions(), (2, 1));
        assert_eq!(
            hsv.pixels().collect::<Vec<_>>(),
            vec![[0, 0, 0], [120, 255, 255]]
        );
    }

    #[test]
    fn test_from_raw_checks_length() {
        assert!(HsvImage::from_raw(2, 2, vec![0; 12]).is_ok());
        assert!(HsvImage::from_raw(2, 2, vec![0; 11]).is_err());
    }
}
