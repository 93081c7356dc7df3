//! Colortrack OpenCV backend
//!
//! Implements the capability traits of `colortrack-core` with OpenCV:
//! camera capture, HighGUI windows and trackbars, HSV thresholding,
//! frame drawing and `findContours`.

pub mod camera;
pub mod contours;
pub mod frame;
pub mod gui;
pub mod utils;

// Re-export commonly used types
pub use camera::Camera;
pub use contours::OpenCvContours;
pub use frame::BgrFrame;
pub use gui::{HighGui, TrackbarPanel};
pub use utils::ImageUtils;

// Error handling
pub type Result<T> = anyhow::Result<T>;
