#[allow(dead_code)]
mod common;

use ndarray::{array, Array2};

use cropstack_core::error::CropStackError;
use cropstack_core::frame::Frame;
use cropstack_core::stack::sum::sum_frames;

use common::{gradient, light_frame, uniform, DEC, RA};

#[test]
fn test_sum_is_commutative() {
    let a = Frame::mono16(gradient(8, 8, 3));
    let b = Frame::mono16(Array2::from_shape_fn((8, 8), |(r, c)| ((r * 31 + c * 17) % 251) as u16));
    let ab = sum_frames(&a, &b).unwrap();
    let ba = sum_frames(&b, &a).unwrap();
    assert_eq!(ab.data, ba.data);
}

#[test]
fn test_uniform_sum_cancels_to_zero() {
    let a = Frame::mono16(uniform(4, 4, 1200));
    let b = Frame::mono16(uniform(4, 4, 800));
    let result = sum_frames(&a, &b).unwrap();
    assert!(result.data.iter().all(|&v| v == 0));
}

#[test]
fn test_saturated_inputs_do_not_overflow() {
    let a = Frame::mono16(uniform(4, 4, u16::MAX));
    let b = Frame::mono16(uniform(4, 4, u16::MAX));
    let result = sum_frames(&a, &b).unwrap();
    assert!(result.data.iter().all(|&v| v == 0));
}

#[test]
fn test_sum_above_range_is_clamped() {
    let a = Frame::mono16(array![[u16::MAX, 0], [40_000, 10]]);
    let b = Frame::mono16(array![[u16::MAX, 0], [40_000, 20]]);
    let result = sum_frames(&a, &b).unwrap();
    let expected: Array2<u16> = array![[u16::MAX, 0], [u16::MAX, 30]];
    assert_eq!(result.data, expected);
}

#[test]
fn test_pedestal_is_subtracted() {
    let a = Frame::mono16(array![[10, 20], [30, 40]]);
    let b = Frame::mono16(uniform(2, 2, 5));
    let result = sum_frames(&a, &b).unwrap();
    let expected: Array2<u16> = array![[0, 10], [20, 30]];
    assert_eq!(result.data, expected);
}

#[test]
fn test_pedestal_applies_on_every_merge() {
    // Each pairwise merge re-zeroes the floor of the running sum.
    let frames: Vec<Frame> = (0..3)
        .map(|_| Frame::mono16(array![[100, 200], [300, 400]]))
        .collect();
    let first = sum_frames(&frames[0], &frames[1]).unwrap();
    let expected: Array2<u16> = array![[0, 200], [400, 600]];
    assert_eq!(first.data, expected);

    let second = sum_frames(&first, &frames[2]).unwrap();
    let expected: Array2<u16> = array![[0, 300], [600, 900]];
    assert_eq!(second.data, expected);
}

#[test]
fn test_dimension_mismatch() {
    let a = Frame::mono16(uniform(4, 4, 1));
    let b = Frame::mono16(uniform(4, 5, 1));
    let err = sum_frames(&a, &b).unwrap_err();
    assert!(matches!(
        err,
        CropStackError::DimensionMismatch {
            expected_width: 4,
            expected_height: 4,
            actual_width: 5,
            actual_height: 4,
        }
    ));
    assert!(err.is_fatal_for_window());
}

#[test]
fn test_transposed_shape_is_a_mismatch() {
    let a = Frame::mono16(uniform(2, 3, 1));
    let b = Frame::mono16(uniform(3, 2, 1));
    assert!(sum_frames(&a, &b).is_err());
}

#[test]
fn test_output_keeps_base_metadata() {
    let mut base = light_frame(gradient(4, 4, 1), RA, DEC, 0, 30.0).bayered(true);
    base.bit_depth = 14;
    let incoming = light_frame(gradient(4, 4, 2), RA + 1.0, DEC, 40, 10.0);

    let result = sum_frames(&base, &incoming).unwrap();
    assert_eq!(result.bit_depth, 14);
    assert!(result.is_bayered);
    assert_eq!(result.metadata, base.metadata);
}

#[test]
fn test_large_frames_sum_consistently() {
    let a = Frame::mono16(Array2::from_shape_fn((512, 512), |(r, c)| ((r + c) % 1000) as u16 + 7));
    let b = Frame::mono16(Array2::from_shape_fn((512, 512), |(r, c)| ((r * c) % 500) as u16 + 3));
    let result = sum_frames(&a, &b).unwrap();
    // Pixel (0,0): a=7, b=3 is the minimum of the sum (10).
    assert_eq!(result.data[[0, 0]], 0);
    let expected = (a.data[[100, 200]] as u32 + b.data[[100, 200]] as u32 - 10) as u16;
    assert_eq!(result.data[[100, 200]], expected);
}
