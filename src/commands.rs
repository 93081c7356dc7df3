//! Subcommand drivers wiring the detection pipeline to OpenCV

use crate::config::AppConfig;
use anyhow::{Context, Result};
use colortrack_core::{run_calibrator, run_detector, ColorDetector, DetectionConfig};
use colortrack_cv::{BgrFrame, Camera, HighGui, ImageUtils, OpenCvContours, TrackbarPanel};
use std::path::{Path, PathBuf};

/// Choose bounds interactively, print them, optionally save them
pub fn calibrate(image_path: &Path, config: &AppConfig, save: Option<&Path>) -> Result<()> {
    let calibration = &config.calibration;
    let image: BgrFrame = ImageUtils::load_color(image_path, calibration.resize)
        .with_context(|| format!("Failed to load calibration image: {:?}", image_path))?
        .into();

    let bounds = {
        let mut gui = HighGui::new();
        let mut trackbars = TrackbarPanel::create(
            &mut gui,
            &calibration.windows.trackbars,
            &calibration.initial_bounds,
        )?;
        run_calibrator(&image, &mut trackbars, &mut gui, calibration)?
    };

    println!("{}", bounds);

    if let Some(path) = save {
        let updated = AppConfig {
            detection: config.detection.clone().with_bounds(bounds),
            ..config.clone()
        };
        updated.save(path)?;
        log::info!("Bounds saved to {:?}", path);
    }

    Ok(())
}

/// Live detection from the configured camera
pub fn detect(config: DetectionConfig) -> Result<()> {
    log::info!(
        "Detecting {:?}..={:?} on camera {}",
        config.bounds.lower,
        config.bounds.upper,
        config.camera_index
    );
    if config.bounds.is_inverted() {
        log::warn!("Lower bound exceeds upper bound on some channel; nothing will be detected");
    }

    let mut camera = Camera::open(config.camera_index)?;
    let mut gui = HighGui::new();
    let detector = ColorDetector::new(config, OpenCvContours::new());

    let summary = run_detector(&detector, &mut camera, &mut gui)?;

    log::info!(
        "Processed {} frames ({} with a detection), skipped {}",
        summary.frames_processed,
        summary.frames_with_detection,
        summary.frames_skipped
    );
    Ok(())
}

/// One-shot detection on an image file
pub fn inspect(
    image_path: &Path,
    output: Option<PathBuf>,
    report: Option<&Path>,
    config: DetectionConfig,
) -> Result<()> {
    let mut frame = BgrFrame::from(ImageUtils::load_color(image_path, None)?);
    let detector = ColorDetector::new(config, OpenCvContours::new());

    let detection = detector.process(&mut frame)?;

    let output = output.unwrap_or_else(|| default_output_path(image_path));
    ImageUtils::save_image(frame.mat(), &output)?;

    if let Some(report_path) = report {
        detector.export_json(&detection, report_path)?;
        log::info!("Report written to {:?}", report_path);
    }

    println!("Contours found: {}", detection.contour_count);
    match detection.bbox {
        Some(bbox) => println!(
            "Largest region: x={} y={} width={} height={} (area {:.1})",
            bbox.x, bbox.y, bbox.width, bbox.height, detection.area
        ),
        None => println!("No region matched"),
    }
    println!("Annotated image saved: {:?}", output);

    Ok(())
}

/// `<dir>/<stem>_detected.png` next to the input
fn default_output_path(image_path: &Path) -> PathBuf {
    let stem = image_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string());

    image_path.with_file_name(format!("{}_detected.png", stem))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_output_path() {
        assert_eq!(
            default_output_path(Path::new("shots/ball.jpg")),
            PathBuf::from("shots/ball_detected.png")
        );
        assert_eq!(
            default_output_path(Path::new("frame.png")),
            PathBuf::from("frame_detected.png")
        );
    }
}
