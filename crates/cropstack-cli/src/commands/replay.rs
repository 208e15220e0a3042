use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;
use cropstack_core::io::manifest::SessionManifest;
use cropstack_core::io::sink::{FrameSink, MemorySink, TiffSink};
use cropstack_core::pipeline::CropStacker;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::warn;

use super::resolve_settings;
use crate::summary::{print_replay_summary, ReplayTally};

#[derive(Args)]
pub struct ReplayArgs {
    /// Session manifest (TOML)
    pub manifest: PathBuf,

    /// Settings file (TOML)
    #[arg(long)]
    pub settings: Option<PathBuf>,

    /// Crop fraction (0-1), overrides the settings file
    #[arg(long)]
    pub crop: Option<f64>,

    /// Aggregation window in seconds (0-120), overrides the settings file
    #[arg(long)]
    pub window: Option<f64>,

    /// Run the stacker without writing any files
    #[arg(long)]
    pub dry_run: bool,
}

pub fn run(args: &ReplayArgs) -> Result<()> {
    let manifest = SessionManifest::load(&args.manifest)
        .with_context(|| format!("Failed to read manifest {}", args.manifest.display()))?;
    let settings = resolve_settings(args.settings.as_deref(), args.crop, args.window)?;
    let base_dir = manifest_dir(&args.manifest);

    let sink: Arc<dyn FrameSink> = if args.dry_run {
        Arc::new(MemorySink::new())
    } else {
        Arc::new(TiffSink::new(&base_dir))
    };
    let stacker = CropStacker::new(settings.clone(), sink);

    let pb = ProgressBar::new(manifest.frames.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("Replaying [{bar:40}] {pos}/{len}")?
            .progress_chars("=> "),
    );

    let mut tally = ReplayTally::default();
    for entry in &manifest.frames {
        let frame = entry
            .load(&base_dir)
            .with_context(|| format!("Failed to load {}", entry.path.display()))?;

        match stacker.on_frame(&frame) {
            Ok(outcome) => tally.record(&outcome),
            Err(e) => {
                warn!(frame = %entry.path.display(), error = %e, "Frame failed");
                tally.record_error();
            }
        }
        pb.inc(1);
    }
    pb.finish();

    tally.pending = stacker.pending_frames();
    print_replay_summary(&settings, &tally, args.dry_run);
    Ok(())
}

fn manifest_dir(manifest: &Path) -> PathBuf {
    match manifest.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    }
}
