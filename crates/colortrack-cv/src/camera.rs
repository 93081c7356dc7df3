//! Camera capture

use crate::frame::BgrFrame;
use crate::Result;
use anyhow::{bail, Context};
use colortrack_core::traits::FrameSource;
use opencv::{
    core::Mat,
    prelude::*,
    videoio::{self, VideoCapture},
};

/// Open capture device, released on drop
pub struct Camera {
    capture: VideoCapture,
    index: i32,
}

impl Camera {
    /// Open the camera with the given device index
    pub fn open(index: i32) -> Result<Self> {
        let capture = VideoCapture::new(index, videoio::CAP_ANY)
            .with_context(|| format!("Failed to open camera {}", index))?;

        if !capture.is_opened()? {
            bail!("Camera {} could not be opened", index);
        }

        log::info!(
            "Camera {} opened at {}x{}",
            index,
            capture.get(videoio::CAP_PROP_FRAME_WIDTH).unwrap_or(0.0),
            capture.get(videoio::CAP_PROP_FRAME_HEIGHT).unwrap_or(0.0)
        );

        Ok(Self { capture, index })
    }
}

impl FrameSource for Camera {
    type Frame = BgrFrame;

    fn grab(&mut self) -> Result<Option<BgrFrame>> {
        let mut frame = Mat::default();
        let ok = self
            .capture
            .read(&mut frame)
            .with_context(|| format!("Camera {} read failed", self.index))?;

        if !ok || frame.empty() {
            return Ok(None);
        }
        Ok(Some(frame.into()))
    }
}

impl Drop for Camera {
    fn drop(&mut self) {
        match self.capture.release() {
            Ok(()) => log::debug!("Camera {} released", self.index),
            Err(e) => log::warn!("Failed to release camera {}: {}", self.index, e),
        }
    }
}
