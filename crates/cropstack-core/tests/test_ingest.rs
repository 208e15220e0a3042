#[allow(dead_code)]
mod common;

use chrono::{DateTime, Local};

use cropstack_core::frame::FrameMetadata;
use cropstack_core::ingest::{validate, SkipReason};

use common::{light_frame, uniform, DEC, RA};

fn frame_with(meta: impl FnOnce(&mut FrameMetadata)) -> cropstack_core::frame::Frame {
    let mut frame = light_frame(uniform(4, 4, 100), RA, DEC, 0, 30.0);
    meta(&mut frame.metadata);
    frame
}

#[test]
fn test_complete_frame_is_admitted() {
    let exposure = validate(&frame_with(|_| {})).unwrap();
    assert_eq!(exposure.exposure_seconds, 30.0);
    assert_eq!(exposure.ra_degrees, RA);
    assert_eq!(exposure.dec_degrees, DEC);

    let expected: DateTime<Local> = DateTime::parse_from_rfc3339(common::SESSION_START)
        .unwrap()
        .with_timezone(&Local);
    assert_eq!(exposure.observed_at, expected);
}

#[test]
fn test_zero_exposure_is_valid() {
    let exposure = validate(&frame_with(|m| m.exposure_seconds = Some(0.0))).unwrap();
    assert_eq!(exposure.exposure_seconds, 0.0);
}

#[test]
fn test_missing_exposure() {
    let result = validate(&frame_with(|m| m.exposure_seconds = None));
    assert_eq!(result, Err(SkipReason::NoExposure));
}

#[test]
fn test_negative_exposure() {
    let result = validate(&frame_with(|m| m.exposure_seconds = Some(-1.0)));
    assert_eq!(result, Err(SkipReason::NoExposure));
}

#[test]
fn test_missing_ra() {
    let result = validate(&frame_with(|m| m.ra_degrees = None));
    assert_eq!(result, Err(SkipReason::NoCoordinates));
}

#[test]
fn test_missing_dec() {
    let result = validate(&frame_with(|m| m.dec_degrees = None));
    assert_eq!(result, Err(SkipReason::NoCoordinates));
}

#[test]
fn test_zero_coordinates_count_as_unset() {
    let result = validate(&frame_with(|m| m.ra_degrees = Some(0.0)));
    assert_eq!(result, Err(SkipReason::NoCoordinates));

    let result = validate(&frame_with(|m| m.dec_degrees = Some(0.0)));
    assert_eq!(result, Err(SkipReason::NoCoordinates));
}

#[test]
fn test_nan_coordinates_are_missing() {
    let result = validate(&frame_with(|m| m.ra_degrees = Some(f64::NAN)));
    assert_eq!(result, Err(SkipReason::NoCoordinates));

    let result = validate(&frame_with(|m| m.dec_degrees = Some(f64::NAN)));
    assert_eq!(result, Err(SkipReason::NoCoordinates));

    let result = validate(&frame_with(|m| m.ra_degrees = Some(f64::INFINITY)));
    assert_eq!(result, Err(SkipReason::NoCoordinates));
}

#[test]
fn test_unparseable_timestamp() {
    let result = validate(&frame_with(|m| m.exposure_start = Some("yesterday".into())));
    assert_eq!(result, Err(SkipReason::NoTimestamp));

    let result = validate(&frame_with(|m| m.exposure_start = None));
    assert_eq!(result, Err(SkipReason::NoTimestamp));
}

#[test]
fn test_coordinates_checked_before_timestamp() {
    let result = validate(&frame_with(|m| {
        m.ra_degrees = None;
        m.exposure_start = None;
    }));
    assert_eq!(result, Err(SkipReason::NoCoordinates));
}

#[test]
fn test_skip_reason_names() {
    assert_eq!(SkipReason::NoExposure.to_string(), "no-exposure");
    assert_eq!(SkipReason::NoCoordinates.to_string(), "no-coordinates");
    assert_eq!(SkipReason::NoTimestamp.to_string(), "no-timestamp");
}
