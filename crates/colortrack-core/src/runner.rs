//! Polling loops for the calibrator and the detector
//!
//! Both loops are single-threaded: one blocking capture or slider read, the
//! per-pixel work, one display update, then a bounded key wait that doubles
//! as the frame-rate throttle. They return when the quit key is seen.

use crate::bounds::HsvBounds;
use crate::detection::{CalibrationConfig, ColorDetector};
use crate::error::DetectError;
use crate::threshold;
use crate::traits::{ContourFinder, FrameSource, HsvFrame, Trackbars, Viewer};
use crate::Result;

/// Counters gathered over one detector run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub frames_processed: u64,
    pub frames_skipped: u64,
    pub frames_with_detection: u64,
}

/// Run the live detector until the quit key is pressed.
///
/// A failed capture skips the iteration but still polls the quit key. With
/// a non-zero `max_consecutive_failures` the loop gives up with
/// [`DetectError::CaptureLost`] once that many captures fail in a row.
pub fn run_detector<S, V, F>(
    detector: &ColorDetector<F>,
    source: &mut S,
    viewer: &mut V,
) -> Result<RunSummary>
where
    S: FrameSource,
    V: Viewer<S::Frame>,
    F: ContourFinder,
{
    let config = detector.config();
    let mut summary = RunSummary::default();
    let mut failures = 0u32;

    loop {
        match source.grab() {
            Ok(Some(mut frame)) => {
                failures = 0;
                let detection = detector.process(&mut frame)?;

                viewer.show_mask(&config.windows.mask, &detection.mask)?;
                viewer.show(&config.windows.output, &frame)?;

                summary.frames_processed += 1;
                if detection.is_found() {
                    summary.frames_with_detection += 1;
                }
            }
            grabbed => {
                failures += 1;
                summary.frames_skipped += 1;
                match grabbed {
                    Err(e) => log::warn!("Frame capture failed: {:#}", e),
                    _ => log::warn!("Frame capture returned no frame"),
                }

                let limit = config.max_consecutive_failures;
                if limit > 0 && failures >= limit {
                    return Err(DetectError::CaptureLost { failures }.into());
                }
            }
        }

        if viewer.poll_key(config.polling.wait_ms)? == Some(config.polling.quit_key) {
            log::info!("Quit key pressed");
            return Ok(summary);
        }
    }
}

/// Run the calibrator on a still image until the quit key is pressed and
/// return the bounds read on the final iteration
pub fn run_calibrator<I, T, V>(
    image: &I,
    trackbars: &mut T,
    viewer: &mut V,
    config: &CalibrationConfig,
) -> Result<HsvBounds>
where
    I: HsvFrame,
    T: Trackbars,
    V: Viewer<I>,
{
    let hsv = image.to_hsv()?;
    let windows = &config.windows;

    viewer.show(&windows.original, image)?;
    viewer.show_hsv(&windows.hsv, &hsv)?;

    loop {
        let bounds = trackbars.read_bounds()?;
        let mask = I::in_range(&hsv, &bounds)?;
        viewer.show_mask(&windows.mask, &mask)?;

        if viewer.poll_key(config.polling.wait_ms)? == Some(config.polling.quit_key) {
            log::debug!(
                "Calibration finished with {} foreground pixels",
                threshold::foreground_count(&mask)
            );
            return Ok(bounds);
        }
    }
}
