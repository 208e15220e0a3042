use chrono::{DateTime, Local};

use crate::frame::Frame;

/// Why a frame was not admitted to the accumulator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SkipReason {
    NoExposure,
    NoCoordinates,
    NoTimestamp,
}

impl SkipReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NoExposure => "no-exposure",
            Self::NoCoordinates => "no-coordinates",
            Self::NoTimestamp => "no-timestamp",
        }
    }
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The validated fields of a frame the accumulator works with.
#[derive(Clone, Debug, PartialEq)]
pub struct Exposure {
    pub exposure_seconds: f64,
    pub ra_degrees: f64,
    pub dec_degrees: f64,
    /// Exposure start converted to the local time zone.
    pub observed_at: DateTime<Local>,
}

/// Check that a frame carries everything the accumulator needs.
///
/// Rules are applied in order and the first failing one decides the skip
/// reason. RA or Dec of exactly `0.0`, NaN or infinite counts as unset.
pub fn validate(frame: &Frame) -> std::result::Result<Exposure, SkipReason> {
    let meta = &frame.metadata;

    let exposure_seconds = match meta.exposure_seconds {
        Some(e) if e >= 0.0 => e,
        _ => return Err(SkipReason::NoExposure),
    };

    let (ra_degrees, dec_degrees) = match (meta.ra_degrees, meta.dec_degrees) {
        (Some(ra), Some(dec)) if is_set(ra) && is_set(dec) => (ra, dec),
        _ => return Err(SkipReason::NoCoordinates),
    };

    let observed_at = meta
        .exposure_start
        .as_deref()
        .and_then(parse_timestamp)
        .ok_or(SkipReason::NoTimestamp)?;

    Ok(Exposure {
        exposure_seconds,
        ra_degrees,
        dec_degrees,
        observed_at,
    })
}

/// Coordinates of exactly zero, or not finite, mean the driver had no pointing.
fn is_set(coordinate: f64) -> bool {
    coordinate.is_finite() && coordinate != 0.0
}

/// Parse an RFC 3339 timestamp and convert it to local time.
/// Timestamps without an offset are rejected.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Local>> {
    DateTime::parse_from_rfc3339(raw.trim())
        .ok()
        .map(|ts| ts.with_timezone(&Local))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::FrameMetadata;
    use ndarray::Array2;

    fn frame_with(meta: FrameMetadata) -> Frame {
        Frame::mono16(Array2::zeros((2, 2))).with_metadata(meta)
    }

    fn complete() -> FrameMetadata {
        FrameMetadata {
            exposure_start: Some("2024-03-01T22:15:04.120+01:00".into()),
            exposure_seconds: Some(30.0),
            ra_degrees: Some(83.82),
            dec_degrees: Some(-5.39),
            ..Default::default()
        }
    }

    #[test]
    fn test_exposure_checked_before_coordinates() {
        let meta = FrameMetadata {
            exposure_seconds: None,
            ra_degrees: None,
            ..complete()
        };
        assert_eq!(validate(&frame_with(meta)), Err(SkipReason::NoExposure));
    }

    #[test]
    fn test_nan_exposure_is_missing() {
        let meta = FrameMetadata {
            exposure_seconds: Some(f64::NAN),
            ..complete()
        };
        assert_eq!(validate(&frame_with(meta)), Err(SkipReason::NoExposure));
    }

    #[test]
    fn test_naive_timestamp_rejected() {
        assert!(parse_timestamp("2024-03-01T22:15:04").is_none());
        assert!(parse_timestamp("2024-03-01T22:15:04Z").is_some());
    }
}
