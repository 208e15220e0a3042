use std::path::PathBuf;

use thiserror::Error;

use crate::crop::CropRegion;

#[derive(Error, Debug)]
pub enum CropStackError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Crop region {region} does not fit inside source {width}x{height}")]
    InvalidCropRegion {
        region: CropRegion,
        width: usize,
        height: usize,
    },

    #[error("Dimension mismatch: accumulated {expected_width}x{expected_height}, incoming {actual_width}x{actual_height}")]
    DimensionMismatch {
        expected_width: usize,
        expected_height: usize,
        actual_width: usize,
        actual_height: usize,
    },

    #[error("Failed to persist stacked frame to {path:?}: {source}")]
    Persist {
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Invalid image dimensions: {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },

    #[error("Image format error: {0}")]
    ImageError(#[from] image::ImageError),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid session manifest: {0}")]
    Manifest(String),

    #[error("Invalid frame sidecar: {0}")]
    Sidecar(String),
}

impl CropStackError {
    /// Errors after which the current accumulation window cannot continue.
    pub fn is_fatal_for_window(&self) -> bool {
        matches!(
            self,
            Self::InvalidCropRegion { .. } | Self::DimensionMismatch { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, CropStackError>;
