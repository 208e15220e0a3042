use std::path::PathBuf;

use tracing::info;

use crate::consts::{
    HEADER_CROP_FRACTION, HEADER_STACK_COUNT, HEADER_STACK_SPAN, HEADER_TOTAL_EXPOSURE,
};
use crate::error::Result;
use crate::frame::Frame;
use crate::io::sink::FrameSink;

use super::window::OpenWindow;

/// What was emitted when a window was flushed.
#[derive(Clone, Debug, PartialEq)]
pub struct FlushReport {
    /// Where the sink wrote the stack, if it writes to disk.
    pub destination: Option<PathBuf>,
    pub width: usize,
    pub height: usize,
    pub frame_count: usize,
    pub total_exposure_seconds: f64,
    pub elapsed_seconds: f64,
}

/// Build the output frame for a window: the running sum with the anchor
/// frame's metadata plus headers describing the stack.
pub fn package(window: &OpenWindow, elapsed_seconds: f64) -> Frame {
    let mut frame = window.accumulated.clone();
    let headers = &mut frame.metadata.headers;
    headers.insert(HEADER_STACK_COUNT.into(), window.frame_count.to_string());
    headers.insert(
        HEADER_TOTAL_EXPOSURE.into(),
        window.total_exposure_seconds.to_string(),
    );
    headers.insert(
        HEADER_CROP_FRACTION.into(),
        window.anchor.crop_fraction.to_string(),
    );
    headers.insert(HEADER_STACK_SPAN.into(), elapsed_seconds.to_string());
    frame
}

/// Hand the packaged window to the sink. The caller clears the window only
/// when this succeeds.
pub fn flush(window: &OpenWindow, elapsed_seconds: f64, sink: &dyn FrameSink) -> Result<FlushReport> {
    let frame = package(window, elapsed_seconds);
    let destination = sink.persist(&frame)?;

    info!(
        frames = window.frame_count,
        width = frame.width(),
        height = frame.height(),
        elapsed_seconds,
        destination = ?destination,
        "Flushed stacked frame"
    );

    Ok(FlushReport {
        destination,
        width: frame.width(),
        height: frame.height(),
        frame_count: window.frame_count,
        total_exposure_seconds: window.total_exposure_seconds,
        elapsed_seconds,
    })
}
