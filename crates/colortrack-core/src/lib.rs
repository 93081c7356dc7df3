//! Colortrack core library
//!
//! Color-threshold object detection: contour selection and annotation
//! geometry, plus the two polling loops that drive the calibrator and the
//! detector through capability traits. A pure `image`-buffer backend for
//! HSV thresholding and contour tracing covers hosts without OpenCV.

pub mod bbox;
pub mod bounds;
pub mod color;
pub mod contour;
pub mod detection;
pub mod error;
pub mod runner;
pub mod threshold;

// Re-export commonly used types
pub use bbox::{BBox, Point};
pub use bounds::HsvBounds;
pub use color::HsvImage;
pub use contour::{Contour, TracedContours};
pub use detection::{
    Annotation, CalibrationConfig, ColorDetector, Detection, DetectionConfig, DetectionReport,
    LoopConfig, OverlayConfig,
};
pub use error::DetectError;
pub use runner::{run_calibrator, run_detector, RunSummary};
pub use threshold::{in_range, Mask};

// Error handling
pub type Result<T> = anyhow::Result<T>;

/// Capability traits implemented by the vision backend
pub mod traits {
    use super::*;

    /// Color in RGB order
    pub type Rgb = (u8, u8, u8);

    /// A frame that can be drawn on in place
    pub trait Canvas {
        fn draw_rectangle(
            &mut self,
            top_left: Point,
            bottom_right: Point,
            color: Rgb,
            thickness: i32,
        ) -> Result<()>;

        fn put_text(
            &mut self,
            text: &str,
            origin: Point,
            color: Rgb,
            font_scale: f64,
            thickness: i32,
        ) -> Result<()>;
    }

    /// HSV conversion and range thresholding over a frame's own pixel layout
    pub trait HsvFrame {
        /// The frame in 8-bit HSV, hue halved into `[0, 180)`
        type Hsv;

        fn to_hsv(&self) -> Result<Self::Hsv>;

        /// Binary mask of the pixels inside `bounds` on all three channels
        fn in_range(hsv: &Self::Hsv, bounds: &HsvBounds) -> Result<Mask>;
    }

    /// Contour extraction over a binary mask.
    ///
    /// Implementations return the contours in their native order; the
    /// largest-area selection relies on that order for tie-breaking.
    pub trait ContourFinder {
        fn find_contours(&self, mask: &Mask) -> Result<Vec<Contour>>;
    }

    /// Blocking frame capture.
    ///
    /// `Ok(None)` means the device produced no usable frame this time.
    pub trait FrameSource {
        type Frame: Canvas + HsvFrame;

        fn grab(&mut self) -> Result<Option<Self::Frame>>;
    }

    /// Named output windows plus the bounded-wait key check
    pub trait Viewer<F: HsvFrame> {
        fn show(&mut self, window: &str, frame: &F) -> Result<()>;

        fn show_hsv(&mut self, window: &str, hsv: &F::Hsv) -> Result<()>;

        fn show_mask(&mut self, window: &str, mask: &Mask) -> Result<()>;

        /// Waits up to `wait_ms` for a key press
        fn poll_key(&mut self, wait_ms: u32) -> Result<Option<char>>;
    }

    /// The six slider controls of the calibrator
    pub trait Trackbars {
        fn read_bounds(&mut self) -> Result<HsvBounds>;
    }
}
