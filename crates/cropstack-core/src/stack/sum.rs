use ndarray::{Array2, Zip};

use crate::consts::{MAX_SAMPLE_VALUE, PARALLEL_PIXEL_THRESHOLD};
use crate::error::{CropStackError, Result};
use crate::frame::Frame;

/// Sum two equally sized frames into a new one.
///
/// Samples are widened to u64 before adding, then the minimum of the summed
/// buffer (the pedestal) is subtracted from every sample and the result is
/// clamped back into the u16 range. The pedestal is removed on every call,
/// so the zero point of a long stack depends on how many merges produced it.
///
/// The output takes bit depth, Bayer flag and metadata from `base`.
pub fn sum_frames(base: &Frame, incoming: &Frame) -> Result<Frame> {
    if base.data.dim() != incoming.data.dim() {
        return Err(CropStackError::DimensionMismatch {
            expected_width: base.width(),
            expected_height: base.height(),
            actual_width: incoming.width(),
            actual_height: incoming.height(),
        });
    }

    let wide = widened_sum(&base.data, &incoming.data);
    let pedestal = wide.iter().copied().min().unwrap_or(0);
    let data = wide.mapv(|v| (v - pedestal).min(MAX_SAMPLE_VALUE) as u16);

    Ok(base.derive(data))
}

fn widened_sum(a: &Array2<u16>, b: &Array2<u16>) -> Array2<u64> {
    let zip = Zip::from(a).and(b);
    let add = |&x: &u16, &y: &u16| u64::from(x) + u64::from(y);
    if a.len() >= PARALLEL_PIXEL_THRESHOLD {
        zip.par_map_collect(add)
    } else {
        zip.map_collect(add)
    }
}
