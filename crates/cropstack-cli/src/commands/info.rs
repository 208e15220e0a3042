use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use cropstack_core::crop::CropRegion;
use cropstack_core::io::sidecar::load_stacked;

use super::resolve_settings;

#[derive(Args)]
pub struct InfoArgs {
    /// Input image file
    pub file: PathBuf,

    /// Settings file (TOML)
    #[arg(long)]
    pub settings: Option<PathBuf>,

    /// Crop fraction (0-1), overrides the settings file
    #[arg(long)]
    pub crop: Option<f64>,
}

pub fn run(args: &InfoArgs) -> Result<()> {
    let frame = load_stacked(&args.file)
        .with_context(|| format!("Failed to load {}", args.file.display()))?;
    let settings = resolve_settings(args.settings.as_deref(), args.crop, None)?;

    println!("File:        {}", args.file.display());
    println!("Dimensions:  {}x{}", frame.width(), frame.height());
    println!("Bit depth:   {}", frame.bit_depth);
    if frame.is_bayered {
        println!("Bayer:       yes");
    }
    for (key, value) in &frame.metadata.headers {
        println!("{:<12} {value}", format!("{key}:"));
    }

    if !settings.is_enabled() {
        println!("Crop:        disabled");
        return Ok(());
    }

    match CropRegion::centered(frame.width(), frame.height(), settings.crop_fraction) {
        Ok(region) => println!(
            "Crop:        {}x{} at ({}, {}) [{:.0}%]",
            region.width,
            region.height,
            region.left,
            region.top,
            settings.crop_fraction * 100.0
        ),
        Err(e) => println!("Crop:        invalid ({e})"),
    }

    Ok(())
}
