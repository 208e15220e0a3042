use std::io::{Seek, Write};
use std::path::Path;

use image::{ImageBuffer, ImageFormat, Luma};
use ndarray::Array2;

use crate::consts::SAMPLE_BIT_DEPTH;
use crate::error::{CropStackError, Result};
use crate::frame::Frame;

type Gray16Image = ImageBuffer<Luma<u16>, Vec<u16>>;

/// Frame dimensions as image dimensions; anything past `u32::MAX` is rejected.
pub(crate) fn image_dimensions(width: usize, height: usize) -> Result<(u32, u32)> {
    match (u32::try_from(width), u32::try_from(height)) {
        (Ok(w), Ok(h)) => Ok((w, h)),
        _ => Err(CropStackError::InvalidDimensions { width, height }),
    }
}

fn to_gray16(frame: &Frame) -> Result<Gray16Image> {
    let (w, h) = image_dimensions(frame.width(), frame.height())?;
    let pixels: Vec<u16> = frame.data.iter().copied().collect();
    ImageBuffer::from_raw(w, h, pixels).ok_or(CropStackError::InvalidDimensions {
        width: frame.width(),
        height: frame.height(),
    })
}

/// Encode a frame as 16-bit grayscale TIFF into any seekable writer.
pub fn write_tiff<W: Write + Seek>(frame: &Frame, writer: &mut W) -> Result<()> {
    to_gray16(frame)?.write_to(writer, ImageFormat::Tiff)?;
    Ok(())
}

/// Save a frame as 16-bit grayscale TIFF.
pub fn save_tiff(frame: &Frame, path: &Path) -> Result<()> {
    to_gray16(frame)?.save_with_format(path, ImageFormat::Tiff)?;
    Ok(())
}

/// Load an image file into a Frame. Color images are converted to luma;
/// 8-bit images are widened to 16-bit samples.
pub fn load_frame(path: &Path) -> Result<Frame> {
    let gray = image::open(path)?.into_luma16();
    let (w, h) = gray.dimensions();
    let data = Array2::from_shape_vec((h as usize, w as usize), gray.into_raw())
        .map_err(|_| CropStackError::InvalidDimensions {
            width: w as usize,
            height: h as usize,
        })?;
    Ok(Frame::new(data, SAMPLE_BIT_DEPTH))
}
