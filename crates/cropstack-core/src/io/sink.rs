use std::io::Write;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use tempfile::NamedTempFile;
use tracing::debug;

use crate::consts::CROP_SUBDIRECTORY;
use crate::error::{CropStackError, Result};
use crate::frame::Frame;
use crate::ingest::parse_timestamp;

use super::image_io::write_tiff;
use super::sidecar::{sidecar_path, FrameSidecar};

/// Receives stacked frames when an accumulation window is flushed.
///
/// Implementations must either write the whole frame or fail; a failed
/// persist leaves the window intact for another attempt.
pub trait FrameSink: Send + Sync {
    /// Persist the frame, returning where it was written if it went to disk.
    fn persist(&self, frame: &Frame) -> Result<Option<PathBuf>>;
}

/// `<session-dir>/crop/<file-name>` for an original frame path.
pub fn crop_destination(source: &Path) -> Option<PathBuf> {
    let file_name = source.file_name()?;
    let parent = source.parent().unwrap_or_else(|| Path::new(""));
    Some(parent.join(CROP_SUBDIRECTORY).join(file_name))
}

/// Writes stacked frames as 16-bit TIFF next to the original frames, with
/// bit depth, Bayer flag and metadata in a `<name>.toml` sidecar.
///
/// Each file is written to a temporary file in the destination directory
/// and renamed into place. Failures are reported as
/// [`CropStackError::Persist`] carrying the destination and the cause.
#[derive(Clone, Debug)]
pub struct TiffSink {
    /// Used for frames that carry no source path.
    fallback_dir: PathBuf,
}

impl TiffSink {
    pub fn new(fallback_dir: impl Into<PathBuf>) -> Self {
        Self {
            fallback_dir: fallback_dir.into(),
        }
    }

    /// Output path for a stacked frame.
    pub fn destination_for(&self, frame: &Frame) -> PathBuf {
        let dest = frame
            .metadata
            .source_path
            .as_deref()
            .and_then(crop_destination)
            .unwrap_or_else(|| self.fallback_destination(frame));

        match dest.extension().and_then(|e| e.to_str()) {
            Some("tiff" | "tif") => dest,
            _ => dest.with_extension("tiff"),
        }
    }

    fn fallback_destination(&self, frame: &Frame) -> PathBuf {
        let stamp = frame
            .metadata
            .exposure_start
            .as_deref()
            .and_then(parse_timestamp)
            .map(|ts| ts.format("%Y%m%d_%H%M%S").to_string())
            .unwrap_or_else(|| "unknown".into());
        self.fallback_dir
            .join(CROP_SUBDIRECTORY)
            .join(format!("stack_{stamp}.tiff"))
    }
}

impl FrameSink for TiffSink {
    fn persist(&self, frame: &Frame) -> Result<Option<PathBuf>> {
        let dest = self.destination_for(frame);
        write_atomically(frame, &dest).map_err(|source| CropStackError::Persist {
            path: dest.clone(),
            source: Box::new(source),
        })?;

        debug!(path = %dest.display(), "Wrote stacked frame");
        Ok(Some(dest))
    }
}

/// Stage the TIFF and its sidecar as temporary files in the destination
/// directory, then rename both into place. Nothing is renamed unless both
/// were written in full.
fn write_atomically(frame: &Frame, dest: &Path) -> Result<()> {
    let dir = match dest.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };
    std::fs::create_dir_all(&dir)?;

    let mut image = NamedTempFile::new_in(&dir)?;
    write_tiff(frame, image.as_file_mut())?;
    image.as_file().sync_all()?;

    let mut sidecar = NamedTempFile::new_in(&dir)?;
    let contents = FrameSidecar::from_frame(frame).to_toml_string()?;
    sidecar.write_all(contents.as_bytes())?;
    sidecar.as_file().sync_all()?;

    sidecar.persist(sidecar_path(dest)).map_err(|e| e.error)?;
    image.persist(dest).map_err(|e| e.error)?;
    Ok(())
}

/// Keeps stacked frames in memory instead of writing them.
#[derive(Debug, Default)]
pub struct MemorySink {
    frames: Mutex<Vec<Frame>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frames(&self) -> Vec<Frame> {
        self.frames.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.frames.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.lock().is_empty()
    }
}

impl FrameSink for MemorySink {
    fn persist(&self, frame: &Frame) -> Result<Option<PathBuf>> {
        self.frames.lock().push(frame.clone());
        Ok(None)
    }
}
