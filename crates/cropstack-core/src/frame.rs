use std::collections::BTreeMap;
use std::path::PathBuf;

use ndarray::Array2;

use crate::consts::SAMPLE_BIT_DEPTH;

/// A single raw frame as delivered by the capture pipeline.
/// Samples are u16, row-major, shape = (height, width).
#[derive(Clone, Debug)]
pub struct Frame {
    /// Pixel data, row-major, shape = (height, width)
    pub data: Array2<u16>,
    /// Bit depth reported by the camera (at most 16)
    pub bit_depth: u8,
    /// Whether the samples are an undebayered mosaic
    pub is_bayered: bool,
    pub metadata: FrameMetadata,
}

impl Frame {
    pub fn new(data: Array2<u16>, bit_depth: u8) -> Self {
        Self {
            data,
            bit_depth,
            is_bayered: false,
            metadata: FrameMetadata::default(),
        }
    }

    /// Mono 16-bit frame with default metadata.
    pub fn mono16(data: Array2<u16>) -> Self {
        Self::new(data, SAMPLE_BIT_DEPTH)
    }

    pub fn with_metadata(mut self, metadata: FrameMetadata) -> Self {
        self.metadata = metadata;
        self
    }

    pub fn bayered(mut self, is_bayered: bool) -> Self {
        self.is_bayered = is_bayered;
        self
    }

    pub fn width(&self) -> usize {
        self.data.ncols()
    }

    pub fn height(&self) -> usize {
        self.data.nrows()
    }

    /// Replace the pixel data, keeping bit depth, Bayer flag and metadata.
    pub fn derive(&self, data: Array2<u16>) -> Self {
        Self {
            data,
            bit_depth: self.bit_depth,
            is_bayered: self.is_bayered,
            metadata: self.metadata.clone(),
        }
    }
}

/// Per-frame metadata written by the capture software.
///
/// Fields the driver may leave out are optional; the ingestor decides
/// whether a frame is usable.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FrameMetadata {
    /// Exposure start, as the raw text the driver produced (RFC 3339 with offset).
    pub exposure_start: Option<String>,
    pub exposure_seconds: Option<f64>,
    pub ra_degrees: Option<f64>,
    pub dec_degrees: Option<f64>,
    /// LIGHT, DARK, FLAT, ...
    pub image_type: String,
    /// The file the host was about to write this frame to.
    pub source_path: Option<PathBuf>,
    pub headers: BTreeMap<String, String>,
}
