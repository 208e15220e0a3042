use ndarray::s;

use crate::error::{CropStackError, Result};
use crate::frame::Frame;

/// A rectangle in image coordinates for cropping.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CropRegion {
    pub left: usize,
    pub top: usize,
    pub width: usize,
    pub height: usize,
}

impl std::fmt::Display for CropRegion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "({},{} {}x{})",
            self.left, self.top, self.width, self.height
        )
    }
}

impl CropRegion {
    /// Centered region keeping `fraction` of each source dimension.
    ///
    /// Offsets are `floor((W - W*f) / 2)` and sizes `floor(W*f)`, computed in
    /// f64. Fails when the region is empty or leaves the source.
    pub fn centered(src_w: usize, src_h: usize, fraction: f64) -> Result<CropRegion> {
        let w = src_w as f64;
        let h = src_h as f64;

        // `as usize` saturates: NaN -> 0, negative -> 0
        let region = CropRegion {
            left: ((w - w * fraction) / 2.0).floor() as usize,
            top: ((h - h * fraction) / 2.0).floor() as usize,
            width: (w * fraction).floor() as usize,
            height: (h * fraction).floor() as usize,
        };

        region.validated(src_w, src_h)
    }

    /// Check the region is non-empty and fits within the source dimensions.
    pub fn validated(self, src_w: usize, src_h: usize) -> Result<CropRegion> {
        let fits = self.width > 0
            && self.height > 0
            && self.left + self.width <= src_w
            && self.top + self.height <= src_h;

        if !fits {
            return Err(CropStackError::InvalidCropRegion {
                region: self,
                width: src_w,
                height: src_h,
            });
        }
        Ok(self)
    }
}

/// Crop the centered `fraction` of a frame.
///
/// The result keeps the source bit depth, Bayer flag and metadata; only the
/// pixel data and therefore width/height change.
pub fn crop_frame(frame: &Frame, fraction: f64) -> Result<Frame> {
    let region = CropRegion::centered(frame.width(), frame.height(), fraction)?;
    Ok(extract(frame, &region))
}

/// Copy the rows of an already validated `region` into a new buffer.
fn extract(frame: &Frame, region: &CropRegion) -> Frame {
    let rows = region.top..region.top + region.height;
    let cols = region.left..region.left + region.width;
    let data = frame.data.slice(s![rows, cols]).to_owned();
    frame.derive(data)
}
