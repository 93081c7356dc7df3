//! Detection configuration

use crate::bounds::HsvBounds;
use crate::error::DetectError;
use crate::traits::Rgb;
use crate::Result;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Detector configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionConfig {
    pub bounds: HsvBounds,
    pub camera_index: i32,
    /// Stop after this many failed captures in a row; 0 never stops
    pub max_consecutive_failures: u32,
    pub overlay: OverlayConfig,
    pub windows: DetectorWindows,
    pub polling: LoopConfig,
}

/// How a detection is drawn on the frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayConfig {
    pub draw_bbox: bool,
    pub draw_label: bool,
    /// Padding added around the bounding box on every side
    pub margin: i32,
    pub color: Rgb,
    pub thickness: i32,
    pub label: String,
    /// Label origin relative to the bounding box's top-left corner
    pub label_offset: (i32, i32),
    pub font_scale: f64,
    pub text_thickness: i32,
}

/// Window names used by the detector
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorWindows {
    pub mask: String,
    pub output: String,
}

/// Quit key and bounded key wait shared by both loops
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoopConfig {
    pub quit_key: char,
    pub wait_ms: u32,
}

/// Calibrator configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalibrationConfig {
    pub initial_bounds: HsvBounds,
    /// Size the input image is scaled to before display, if any
    pub resize: Option<(u32, u32)>,
    pub windows: CalibrationWindows,
    pub polling: LoopConfig,
}

/// Window names used by the calibrator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalibrationWindows {
    pub trackbars: String,
    pub original: String,
    pub hsv: String,
    pub mask: String,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            bounds: HsvBounds::new([21, 222, 70], [176, 255, 255]),
            camera_index: 0,
            max_consecutive_failures: 100,
            overlay: OverlayConfig::default(),
            windows: DetectorWindows::default(),
            polling: LoopConfig::default(),
        }
    }
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            draw_bbox: true,
            draw_label: true,
            margin: 15,
            color: (0, 255, 0),
            thickness: 3,
            label: "Detected Object".to_string(),
            label_offset: (-5, -25),
            font_scale: 1.0,
            text_thickness: 2,
        }
    }
}

impl Default for DetectorWindows {
    fn default() -> Self {
        Self {
            mask: "Binary frame with Mask".to_string(),
            output: "Detected Object".to_string(),
        }
    }
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            quit_key: 'q',
            wait_ms: 1,
        }
    }
}

impl Default for CalibrationConfig {
    fn default() -> Self {
        Self {
            initial_bounds: HsvBounds::default(),
            resize: Some((600, 426)),
            windows: CalibrationWindows::default(),
            polling: LoopConfig::default(),
        }
    }
}

impl Default for CalibrationWindows {
    fn default() -> Self {
        Self {
            trackbars: "Track Bars".to_string(),
            original: "Original Image".to_string(),
            hsv: "HSV Image".to_string(),
            mask: "Binary Image with Mask".to_string(),
        }
    }
}

impl DetectionConfig {
    /// Same configuration with different bounds
    pub fn with_bounds(mut self, bounds: HsvBounds) -> Self {
        self.bounds = bounds;
        self
    }
}

/// Read any config struct from a JSON file; missing fields take their
/// defaults when the struct is `#[serde(default)]`
pub fn load_json<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<T> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config: {:?}", path))?;

    serde_json::from_str(&text).map_err(|source| {
        DetectError::Config {
            path: path.to_path_buf(),
            source,
        }
        .into()
    })
}

/// Write any config struct as pretty JSON
pub fn save_json<T: Serialize>(value: &T, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize config")?;

    fs::write(path, json).with_context(|| format!("Failed to write config to: {:?}", path))?;

    Ok(())
}
