pub mod config;
pub mod info;
pub mod replay;

use std::path::Path;

use anyhow::{Context, Result};
use cropstack_core::pipeline::config::StackSettings;

/// Load settings from a TOML file if given, then apply command-line overrides.
pub fn resolve_settings(
    path: Option<&Path>,
    crop: Option<f64>,
    window: Option<f64>,
) -> Result<StackSettings> {
    let mut settings = match path {
        Some(path) => StackSettings::load(path)
            .with_context(|| format!("Failed to read settings {}", path.display()))?,
        None => StackSettings::default(),
    };
    if let Some(crop) = crop {
        settings.crop_fraction = crop;
    }
    if let Some(window) = window {
        settings.aggregation_window_seconds = window;
    }
    Ok(settings.normalized())
}
