use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{CropStackError, Result};
use crate::frame::{Frame, FrameMetadata};

use super::image_io::load_frame;

/// A recorded capture session: image files plus the metadata the capture
/// software attached to each one.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SessionManifest {
    #[serde(default)]
    pub frames: Vec<ManifestFrame>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ManifestFrame {
    /// Image file, relative to the manifest's directory.
    pub path: PathBuf,
    pub exposure_seconds: Option<f64>,
    pub ra_degrees: Option<f64>,
    pub dec_degrees: Option<f64>,
    pub exposure_start: Option<String>,
    #[serde(default = "default_image_type")]
    pub image_type: String,
    #[serde(default)]
    pub bayer: bool,
    pub bit_depth: Option<u8>,
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
}

fn default_image_type() -> String {
    "LIGHT".into()
}

impl SessionManifest {
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        toml::from_str(contents).map_err(|e| CropStackError::Manifest(e.to_string()))
    }

    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }
}

impl ManifestFrame {
    /// Image path resolved against the manifest's directory.
    pub fn resolve(&self, base_dir: &Path) -> PathBuf {
        if self.path.is_absolute() {
            self.path.clone()
        } else {
            base_dir.join(&self.path)
        }
    }

    pub fn metadata(&self, source_path: PathBuf) -> FrameMetadata {
        FrameMetadata {
            exposure_start: self.exposure_start.clone(),
            exposure_seconds: self.exposure_seconds,
            ra_degrees: self.ra_degrees,
            dec_degrees: self.dec_degrees,
            image_type: self.image_type.clone(),
            source_path: Some(source_path),
            headers: self.headers.clone(),
        }
    }

    /// Load the image and attach this entry's metadata.
    pub fn load(&self, base_dir: &Path) -> Result<Frame> {
        let path = self.resolve(base_dir);
        let mut frame = load_frame(&path)?.bayered(self.bayer);
        if let Some(depth) = self.bit_depth {
            frame.bit_depth = depth;
        }
        Ok(frame.with_metadata(self.metadata(path)))
    }
}
