//! Per-frame color detector
//!
//! Converts a frame to HSV, masks it with the configured bounds, keeps the
//! largest contour and draws an inflated box plus a label around it.

use super::config::{DetectionConfig, OverlayConfig};
use crate::bbox::{BBox, Point};
use crate::contour::select_largest;
use crate::threshold::Mask;
use crate::traits::{Canvas, ContourFinder, HsvFrame, Rgb};
use crate::Result;
use anyhow::Context;
use serde::Serialize;
use std::path::Path;

/// Result of running the pipeline on one frame
#[derive(Debug, Clone)]
pub struct Detection {
    pub mask: Mask,
    pub contour_count: usize,
    /// Bounding box of the largest contour
    pub bbox: Option<BBox>,
    pub area: f64,
}

impl Detection {
    pub fn is_found(&self) -> bool {
        self.bbox.is_some()
    }
}

/// Serializable summary of a detection
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetectionReport {
    pub image_size: (u32, u32),
    pub contour_count: usize,
    pub bbox: Option<BBox>,
    pub area: f64,
    pub annotation: Option<Annotation>,
}

/// Everything needed to draw one detection
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Annotation {
    pub top_left: Point,
    pub bottom_right: Point,
    pub label: String,
    pub label_origin: Point,
    pub color: Rgb,
    pub thickness: i32,
    pub font_scale: f64,
    pub text_thickness: i32,
}

impl Annotation {
    /// Inflate `bbox` by the overlay margin and anchor the label above it
    pub fn for_bbox(bbox: &BBox, overlay: &OverlayConfig) -> Self {
        let outer = bbox.inflate(overlay.margin);
        let (dx, dy) = overlay.label_offset;

        Self {
            top_left: outer.top_left(),
            bottom_right: outer.bottom_right(),
            label: overlay.label.clone(),
            label_origin: bbox.top_left().offset(dx, dy),
            color: overlay.color,
            thickness: overlay.thickness,
            font_scale: overlay.font_scale,
            text_thickness: overlay.text_thickness,
        }
    }

    /// Draw onto the original frame, honoring the overlay switches
    pub fn draw<C: Canvas>(&self, canvas: &mut C, overlay: &OverlayConfig) -> Result<()> {
        if overlay.draw_bbox {
            canvas.draw_rectangle(self.top_left, self.bottom_right, self.color, self.thickness)?;
        }

        if overlay.draw_label {
            canvas.put_text(
                &self.label,
                self.label_origin,
                self.color,
                self.font_scale,
                self.text_thickness,
            )?;
        }

        Ok(())
    }
}

/// Color-threshold detector over a pluggable contour finder
pub struct ColorDetector<F> {
    config: DetectionConfig,
    finder: F,
}

impl<F: ContourFinder> ColorDetector<F> {
    /// Create new detector
    pub fn new(config: DetectionConfig, finder: F) -> Self {
        Self { config, finder }
    }

    pub fn config(&self) -> &DetectionConfig {
        &self.config
    }

    /// Threshold a frame with the configured bounds and detect on the mask
    pub fn detect<I: HsvFrame>(&self, frame: &I) -> Result<Detection> {
        let hsv = frame.to_hsv()?;
        let mask = I::in_range(&hsv, &self.config.bounds)?;
        self.detect_from_mask(mask)
    }

    /// Largest foreground region of a binary mask
    pub fn detect_from_mask(&self, mask: Mask) -> Result<Detection> {
        let contours = self
            .finder
            .find_contours(&mask)
            .context("Contour extraction failed")?;

        let (bbox, area) = match select_largest(&contours) {
            Some((index, contour)) => {
                log::trace!(
                    "largest contour #{} of {}: {} points",
                    index,
                    contours.len(),
                    contour.len()
                );
                (contour.bounding_box(), contour.area())
            }
            None => (None, 0.0),
        };

        Ok(Detection {
            mask,
            contour_count: contours.len(),
            bbox,
            area,
        })
    }

    /// Annotation for a detection, if anything was found
    pub fn annotation(&self, detection: &Detection) -> Option<Annotation> {
        detection
            .bbox
            .as_ref()
            .map(|bbox| Annotation::for_bbox(bbox, &self.config.overlay))
    }

    /// Detect on a frame and draw the result onto it in place
    pub fn process<C: Canvas + HsvFrame>(&self, frame: &mut C) -> Result<Detection> {
        let detection = self.detect(&*frame)?;

        if let Some(annotation) = self.annotation(&detection) {
            annotation.draw(frame, &self.config.overlay)?;
        }

        Ok(detection)
    }

    /// Summarize a detection for export
    pub fn report(&self, detection: &Detection) -> DetectionReport {
        DetectionReport {
            image_size: detection.mask.dimensions(),
            contour_count: detection.contour_count,
            bbox: detection.bbox,
            area: detection.area,
            annotation: self.annotation(detection),
        }
    }

    /// Export detection results in JSON format
    pub fn export_json(&self, detection: &Detection, output_path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.report(detection))
            .context("Failed to serialize detection results")?;

        std::fs::write(output_path, json)
            .with_context(|| format!("Failed to write JSON to: {:?}", output_path))?;

        Ok(())
    }
}
