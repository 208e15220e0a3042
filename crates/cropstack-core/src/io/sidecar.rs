use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{CropStackError, Result};
use crate::frame::Frame;

use super::image_io::load_frame;

/// Frame properties a 16-bit TIFF cannot carry, written next to it as
/// `<name>.toml`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FrameSidecar {
    pub bit_depth: u8,
    #[serde(default)]
    pub bayer: bool,
    pub image_type: String,
    pub exposure_start: Option<String>,
    pub exposure_seconds: Option<f64>,
    pub ra_degrees: Option<f64>,
    pub dec_degrees: Option<f64>,
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
}

impl FrameSidecar {
    pub fn from_frame(frame: &Frame) -> Self {
        let meta = &frame.metadata;
        Self {
            bit_depth: frame.bit_depth,
            bayer: frame.is_bayered,
            image_type: meta.image_type.clone(),
            exposure_start: meta.exposure_start.clone(),
            exposure_seconds: meta.exposure_seconds,
            ra_degrees: meta.ra_degrees,
            dec_degrees: meta.dec_degrees,
            headers: meta.headers.clone(),
        }
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| CropStackError::Sidecar(e.to_string()))
    }

    pub fn from_toml_str(contents: &str) -> Result<Self> {
        toml::from_str(contents).map_err(|e| CropStackError::Sidecar(e.to_string()))
    }

    /// Copy the stored properties onto a frame loaded from pixels alone.
    pub fn apply(self, frame: Frame) -> Frame {
        let mut frame = frame.bayered(self.bayer);
        frame.bit_depth = self.bit_depth;
        let meta = &mut frame.metadata;
        meta.image_type = self.image_type;
        meta.exposure_start = self.exposure_start;
        meta.exposure_seconds = self.exposure_seconds;
        meta.ra_degrees = self.ra_degrees;
        meta.dec_degrees = self.dec_degrees;
        meta.headers = self.headers;
        frame
    }
}

/// `<dir>/<stem>.toml` for an image path.
pub fn sidecar_path(image: &Path) -> PathBuf {
    image.with_extension("toml")
}

/// Load a stacked frame and, when present, the sidecar written with it.
pub fn load_stacked(path: &Path) -> Result<Frame> {
    let mut frame = load_frame(path)?;
    frame.metadata.source_path = Some(path.to_path_buf());
    let sidecar = sidecar_path(path);
    if !sidecar.exists() {
        return Ok(frame);
    }
    let contents = std::fs::read_to_string(&sidecar)?;
    Ok(FrameSidecar::from_toml_str(&contents)?.apply(frame))
}
