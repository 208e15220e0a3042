use chrono::{DateTime, Duration, FixedOffset};
use ndarray::Array2;

use cropstack_core::frame::{Frame, FrameMetadata};
use cropstack_core::pipeline::config::StackSettings;

pub const RA: f64 = 83.822;
pub const DEC: f64 = -5.391;

/// Session start used by all synthetic frames.
pub const SESSION_START: &str = "2024-03-01T22:00:00+01:00";

/// RFC 3339 timestamp `offset_seconds` after the session start.
pub fn timestamp(offset_seconds: i64) -> String {
    let start: DateTime<FixedOffset> = DateTime::parse_from_rfc3339(SESSION_START).unwrap();
    (start + Duration::seconds(offset_seconds)).to_rfc3339()
}

/// Frame whose sample at (row, col) is `row * width + col` scaled by `gain`.
pub fn gradient(height: usize, width: usize, gain: u16) -> Array2<u16> {
    Array2::from_shape_fn((height, width), |(r, c)| (r * width + c) as u16 * gain)
}

pub fn uniform(height: usize, width: usize, value: u16) -> Array2<u16> {
    Array2::from_elem((height, width), value)
}

/// A light frame with complete metadata.
pub fn light_frame(data: Array2<u16>, ra: f64, dec: f64, offset_seconds: i64, exposure: f64) -> Frame {
    Frame::mono16(data).with_metadata(FrameMetadata {
        exposure_start: Some(timestamp(offset_seconds)),
        exposure_seconds: Some(exposure),
        ra_degrees: Some(ra),
        dec_degrees: Some(dec),
        image_type: "LIGHT".into(),
        ..Default::default()
    })
}

/// 10x10 gradient light frame at the default pointing.
pub fn session_frame(offset_seconds: i64, exposure: f64) -> Frame {
    light_frame(gradient(10, 10, 1), RA, DEC, offset_seconds, exposure)
}

pub fn settings(crop_fraction: f64, window_seconds: f64) -> StackSettings {
    StackSettings {
        crop_fraction,
        aggregation_window_seconds: window_seconds,
    }
}
