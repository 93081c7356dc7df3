//! HighGUI windows, key polling and trackbars

use crate::frame::BgrFrame;
use crate::utils::ImageUtils;
use crate::Result;
use anyhow::Context;
use colortrack_core::bounds::TRACKBAR_NAMES;
use colortrack_core::traits::{Trackbars, Viewer};
use colortrack_core::{HsvBounds, Mask};
use opencv::{core::Mat, highgui};
use std::collections::HashSet;

/// Resizable windows, all destroyed on drop
#[derive(Default)]
pub struct HighGui {
    windows: HashSet<String>,
}

impl HighGui {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create the window the first time it is used
    pub fn ensure_window(&mut self, name: &str) -> Result<()> {
        if !self.windows.contains(name) {
            highgui::named_window(name, highgui::WINDOW_NORMAL)
                .with_context(|| format!("Failed to create window '{}'", name))?;
            self.windows.insert(name.to_string());
        }
        Ok(())
    }

    fn imshow(&mut self, window: &str, mat: &Mat) -> Result<()> {
        self.ensure_window(window)?;
        highgui::imshow(window, mat).with_context(|| format!("Failed to show '{}'", window))?;
        Ok(())
    }
}

impl Viewer<BgrFrame> for HighGui {
    fn show(&mut self, window: &str, frame: &BgrFrame) -> Result<()> {
        self.imshow(window, frame.mat())
    }

    /// Raw HSV bytes, displayed as if they were BGR
    fn show_hsv(&mut self, window: &str, hsv: &Mat) -> Result<()> {
        self.imshow(window, hsv)
    }

    fn show_mask(&mut self, window: &str, mask: &Mask) -> Result<()> {
        let mat = ImageUtils::mask_to_mat(mask)?;
        self.imshow(window, &mat)
    }

    fn poll_key(&mut self, wait_ms: u32) -> Result<Option<char>> {
        let key = highgui::wait_key(wait_ms.max(1) as i32)?;
        if key < 0 {
            return Ok(None);
        }
        Ok(char::from_u32((key & 0xFF) as u32))
    }
}

impl Drop for HighGui {
    fn drop(&mut self) {
        if self.windows.is_empty() {
            return;
        }
        match highgui::destroy_all_windows() {
            Ok(()) => log::debug!("Destroyed {} windows", self.windows.len()),
            Err(e) => log::warn!("Failed to destroy windows: {}", e),
        }
    }
}

/// The six `min_*` / `max_*` sliders, each ranging over `[0, 255]`
pub struct TrackbarPanel {
    window: String,
}

impl TrackbarPanel {
    /// Create the sliders in `window`, starting at `initial`
    pub fn create(gui: &mut HighGui, window: &str, initial: &HsvBounds) -> Result<Self> {
        gui.ensure_window(window)?;

        for (name, position) in TRACKBAR_NAMES.iter().zip(initial.positions()) {
            highgui::create_trackbar(name, window, None, u8::MAX as i32, None)
                .with_context(|| format!("Failed to create trackbar '{}'", name))?;
            highgui::set_trackbar_pos(name, window, position)?;
        }

        Ok(Self {
            window: window.to_string(),
        })
    }
}

impl Trackbars for TrackbarPanel {
    fn read_bounds(&mut self) -> Result<HsvBounds> {
        let mut positions = [0i32; 6];
        for (slot, name) in positions.iter_mut().zip(TRACKBAR_NAMES) {
            *slot = highgui::get_trackbar_pos(name, &self.window)
                .with_context(|| format!("Failed to read trackbar '{}'", name))?;
        }
        Ok(HsvBounds::from_positions(positions))
    }
}
