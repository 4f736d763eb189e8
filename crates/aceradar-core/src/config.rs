//! Tracker configuration, loadable from JSON.
//!
//! Every field has a default from `constants`, so a config file only needs
//! to name the values it changes.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::enums::RadarColor;
use crate::error::{RadarError, RadarResult};
use crate::types::BlipColor;

/// Resolved tuning values for one registry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RadarConfig {
    /// Frames between scene scans for new entities.
    pub scan_interval_frames: u32,
    /// Discrete radii the zoom controller selects from, smallest first.
    pub zoom_presets: Vec<f64>,
    /// Convergence rate for a transition leaving preset `i` (one fewer entry than presets).
    pub zoom_rates: Vec<f64>,
    /// Minimum unscaled seconds between discrete zoom steps.
    pub zoom_cooldown_secs: f64,
    /// Preset a fresh zoom controller starts on.
    pub initial_preset: usize,
    /// Remaining-piece threshold below which fractured scenery is hidden.
    pub fracture_min_children: usize,
    /// Color given to air and ground blips unless overridden.
    pub default_blip_color: BlipColor,
}

impl Default for RadarConfig {
    fn default() -> Self {
        Self {
            scan_interval_frames: SCAN_INTERVAL_FRAMES,
            zoom_presets: ZOOM_PRESETS.to_vec(),
            zoom_rates: ZOOM_RATES.to_vec(),
            zoom_cooldown_secs: ZOOM_COOLDOWN_SECS,
            initial_preset: ZOOM_INITIAL_PRESET,
            fracture_min_children: FRACTURE_MIN_CHILDREN,
            default_blip_color: RadarColor::White.color(),
        }
    }
}

impl RadarConfig {
    /// Parse and validate a JSON document.
    pub fn from_json_str(json: &str) -> RadarResult<Self> {
        let config: RadarConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> RadarResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn to_json_pretty(&self) -> RadarResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check the invariants the zoom controller and scanner rely on.
    pub fn validate(&self) -> RadarResult<()> {
        if self.scan_interval_frames == 0 {
            return Err(invalid("scan_interval_frames must be at least 1"));
        }
        if self.zoom_presets.is_empty() {
            return Err(invalid("zoom_presets must not be empty"));
        }
        if self.zoom_presets.iter().any(|r| !(*r > 0.0)) {
            return Err(invalid("zoom_presets must be positive"));
        }
        if self.zoom_presets.windows(2).any(|w| w[0] >= w[1]) {
            return Err(invalid("zoom_presets must be strictly increasing"));
        }
        if self.zoom_rates.len() + 1 != self.zoom_presets.len() {
            return Err(RadarError::Config(format!(
                "zoom_rates needs {} entries for {} presets, got {}",
                self.zoom_presets.len() - 1,
                self.zoom_presets.len(),
                self.zoom_rates.len()
            )));
        }
        if self.zoom_rates.iter().any(|r| !(*r > 0.0)) {
            return Err(invalid("zoom_rates must be positive"));
        }
        if !(self.zoom_cooldown_secs >= 0.0) {
            return Err(invalid("zoom_cooldown_secs must not be negative"));
        }
        if self.initial_preset >= self.zoom_presets.len() {
            return Err(RadarError::Config(format!(
                "initial_preset {} is out of range for {} presets",
                self.initial_preset,
                self.zoom_presets.len()
            )));
        }
        Ok(())
    }
}

fn invalid(message: &str) -> RadarError {
    RadarError::Config(message.to_string())
}
