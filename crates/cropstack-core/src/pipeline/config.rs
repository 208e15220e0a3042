use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::{
    DEFAULT_AGGREGATION_WINDOW_SECONDS, DEFAULT_CROP_FRACTION, MAX_AGGREGATION_WINDOW_SECONDS,
};
use crate::error::{CropStackError, Result};

/// Operator-controlled stacking settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StackSettings {
    /// Fraction of the frame width/height kept by the centered crop (0.0..1.0).
    /// Zero disables cropping and stacking.
    #[serde(default = "default_crop_fraction")]
    pub crop_fraction: f64,
    /// Frames are summed until this many seconds have elapsed since the
    /// first frame of the window (0..120).
    #[serde(default = "default_aggregation_window")]
    pub aggregation_window_seconds: f64,
}

fn default_crop_fraction() -> f64 {
    DEFAULT_CROP_FRACTION
}
fn default_aggregation_window() -> f64 {
    DEFAULT_AGGREGATION_WINDOW_SECONDS
}

impl Default for StackSettings {
    fn default() -> Self {
        Self {
            crop_fraction: DEFAULT_CROP_FRACTION,
            aggregation_window_seconds: DEFAULT_AGGREGATION_WINDOW_SECONDS,
        }
    }
}

impl StackSettings {
    /// Clamp both values into their allowed ranges. NaN falls back to the default.
    pub fn normalized(&self) -> Self {
        let crop_fraction = if self.crop_fraction.is_nan() {
            DEFAULT_CROP_FRACTION
        } else {
            self.crop_fraction.clamp(0.0, 1.0)
        };
        let aggregation_window_seconds = if self.aggregation_window_seconds.is_nan() {
            DEFAULT_AGGREGATION_WINDOW_SECONDS
        } else {
            self.aggregation_window_seconds
                .clamp(0.0, MAX_AGGREGATION_WINDOW_SECONDS)
        };
        Self {
            crop_fraction,
            aggregation_window_seconds,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.crop_fraction > 0.0
    }

    pub fn from_toml_str(contents: &str) -> Result<Self> {
        toml::from_str(contents).map_err(|e| CropStackError::InvalidConfig(e.to_string()))
    }

    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| CropStackError::InvalidConfig(e.to_string()))
    }
}
