//! HSV threshold bounds
//!
//! Six values chosen with the calibrator and fed to the detector. The
//! channel labels (`blue`, `green`, `red`) are the ones operators see on the
//! sliders and in the printed report; the values apply to the H, S and V
//! channels of the converted image, in that order.

use crate::error::DetectError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Slider names, lower bounds first
pub const TRACKBAR_NAMES: [&str; 6] = [
    "min_blue",
    "min_green",
    "min_red",
    "max_blue",
    "max_green",
    "max_red",
];

/// Inclusive per-channel range. `lower > upper` on a channel is allowed and
/// simply matches nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HsvBounds {
    pub lower: [u8; 3],
    pub upper: [u8; 3],
}

impl HsvBounds {
    pub const fn new(lower: [u8; 3], upper: [u8; 3]) -> Self {
        Self { lower, upper }
    }

    /// Bounds matching one exact HSV value
    pub const fn exact(hsv: [u8; 3]) -> Self {
        Self::new(hsv, hsv)
    }

    /// Build from slider positions in `TRACKBAR_NAMES` order, clamping to
    /// `[0, 255]`
    pub fn from_positions(positions: [i32; 6]) -> Self {
        let clamp = |v: i32| v.clamp(0, u8::MAX as i32) as u8;
        Self::new(
            [clamp(positions[0]), clamp(positions[1]), clamp(positions[2])],
            [clamp(positions[3]), clamp(positions[4]), clamp(positions[5])],
        )
    }

    /// Slider positions in `TRACKBAR_NAMES` order
    pub fn positions(&self) -> [i32; 6] {
        let [l0, l1, l2] = self.lower;
        let [u0, u1, u2] = self.upper;
        [l0, l1, l2, u0, u1, u2].map(i32::from)
    }

    /// Check whether an HSV triple lies inside every channel range
    #[inline]
    pub fn contains(&self, hsv: [u8; 3]) -> bool {
        (0..3).all(|c| self.lower[c] <= hsv[c] && hsv[c] <= self.upper[c])
    }

    /// True when some channel has `lower > upper`
    pub fn is_inverted(&self) -> bool {
        (0..3).any(|c| self.lower[c] > self.upper[c])
    }
}

/// The two report lines printed when the calibrator exits
impl fmt::Display for HsvBounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [min_blue, min_green, min_red] = self.lower;
        let [max_blue, max_green, max_red] = self.upper;
        writeln!(
            f,
            "min_blue, min_green, min_red = {}, {}, {}",
            min_blue, min_green, min_red
        )?;
        write!(
            f,
            "max_blue, max_green, max_red = {}, {}, {}",
            max_blue, max_green, max_red
        )
    }
}

/// Parse one `a,b,c` triple as given on the command line
pub fn parse_triple(s: &str) -> Result<[u8; 3], DetectError> {
    let parts: Vec<&str> = s.split(',').map(|p| p.trim()).collect();
    if parts.len() != 3 {
        return Err(DetectError::InvalidBounds(format!(
            "expected three comma-separated values, got '{}'",
            s
        )));
    }

    let mut triple = [0u8; 3];
    for (slot, part) in triple.iter_mut().zip(&parts) {
        *slot = u8::from_str(part).map_err(|_| {
            DetectError::InvalidBounds(format!("'{}' is not an integer in 0..=255", part))
        })?;
    }
    Ok(triple)
}
