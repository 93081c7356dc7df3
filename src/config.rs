//! Configuration file shared by all subcommands

use anyhow::Result;
use colortrack_core::detection::config::{load_json, save_json};
use colortrack_core::{CalibrationConfig, DetectionConfig};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub detection: DetectionConfig,
    pub calibration: CalibrationConfig,
}

impl AppConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let config = load_json(path)?;
        log::debug!("Loaded config from {:?}", path);
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        save_json(self, path)
    }
}
