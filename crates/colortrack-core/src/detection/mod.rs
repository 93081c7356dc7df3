//! High-level detection module

pub mod config;
pub mod detector;

pub use config::{
    CalibrationConfig, CalibrationWindows, DetectionConfig, DetectorWindows, LoopConfig,
    OverlayConfig,
};
pub use detector::{Annotation, ColorDetector, Detection, DetectionReport};
