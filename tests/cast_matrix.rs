//! Integration tests for cast semantics across the full dtype matrix

use ndcopy::dispatch_dtype;
use ndcopy::dtype::{Bool, Complex64, bf16, f16};
use ndcopy::prelude::*;

fn cast_array(src: &Array, dst_dtype: DType) -> Array {
    let mut dst = Array::empty(src.shape(), dst_dtype);
    copy(src, &mut dst, CopyType::Vector);
    dst
}

// Every ordered pair of the 13 dtypes must map 0 to 0 and 1 to 1.
#[test]
fn test_zero_and_one_survive_every_cast() {
    for src_dt in DType::ALL {
        for dst_dt in DType::ALL {
            let src = dispatch_dtype!(src_dt, S => {
                Array::from_slice(&[S::from_f64(0.0), S::from_f64(1.0)], &[2]).unwrap()
            });
            let dst = cast_array(&src, dst_dt);
            let got: Vec<f64> = dispatch_dtype!(dst_dt, D => {
                dst.to_vec::<D>().iter().map(|v| v.to_f64()).collect()
            });
            assert_eq!(got, vec![0.0, 1.0], "{src_dt} -> {dst_dt}");
        }
    }
}

#[test]
fn test_int_narrowing_wraps() {
    let src = Array::from_slice(&[300i32, 256, -1, 1000], &[4]).unwrap();
    assert_eq!(
        cast_array(&src, DType::U8).to_vec::<u8>(),
        vec![44, 0, 255, 232]
    );

    let big = Array::from_slice(&[(1i64 << 40) + 5, -3], &[2]).unwrap();
    assert_eq!(cast_array(&big, DType::I32).to_vec::<i32>(), vec![5, -3]);
}

#[test]
fn test_float_to_int_truncates_and_saturates() {
    // An equal-width cast donates and consumes its source, so each cast
    // gets a fresh array
    let vals = [1.9f32, -1.9, 1e10, -1e10, f32::NAN];
    let src = Array::from_slice(&vals, &[5]).unwrap();
    assert_eq!(
        cast_array(&src, DType::I32).to_vec::<i32>(),
        vec![1, -1, i32::MAX, i32::MIN, 0]
    );
    let src = Array::from_slice(&vals, &[5]).unwrap();
    assert_eq!(
        cast_array(&src, DType::U8).to_vec::<u8>(),
        vec![1, 0, 255, 0, 0]
    );
}

#[test]
fn test_equal_width_cast_consumes_its_source() {
    let src = Array::from_slice(&[2.5f32], &[1]).unwrap();
    let dst = cast_array(&src, DType::I32);
    assert_eq!(dst.to_vec::<i32>(), vec![2]);
    // The buffer was donated and rewritten in place; the old f32 view is
    // stale and must not be read again
    assert_eq!(dst.data_ptr(), src.data_ptr());
    assert_ne!(src.to_vec::<f32>(), vec![2.5]);
}

#[test]
fn test_float_to_int_differs_from_int_narrowing() {
    // 300 as an integer wraps into u8; 300.0 as a float saturates
    let ints = Array::from_slice(&[300i32], &[1]).unwrap();
    assert_eq!(cast_array(&ints, DType::U8).to_vec::<u8>(), vec![44]);

    let floats = Array::from_slice(&[300.0f32], &[1]).unwrap();
    assert_eq!(cast_array(&floats, DType::U8).to_vec::<u8>(), vec![255]);
}

#[test]
fn test_int_to_float_rounds_to_nearest() {
    // 2^24 + 1 is the first positive integer not representable in f32
    let src = Array::from_slice(&[16_777_217i64], &[1]).unwrap();
    assert_eq!(
        cast_array(&src, DType::F32).to_vec::<f32>(),
        vec![16_777_216.0]
    );
}

#[test]
fn test_half_precision_saturates_to_infinity() {
    let src = Array::from_slice(&[65504.0f32, 1e9, -1e9], &[3]).unwrap();
    let out = cast_array(&src, DType::F16).to_vec::<f16>();
    assert_eq!(out[0], f16::MAX);
    assert_eq!(out[1], f16::INFINITY);
    assert_eq!(out[2], f16::NEG_INFINITY);
}

#[test]
fn test_bf16_preserves_small_integers() {
    let src = Array::from_slice(&[1i32, 2, 100, -100], &[4]).unwrap();
    let out = cast_array(&src, DType::BF16).to_vec::<bf16>();
    let back: Vec<f32> = out.iter().map(|v| v.to_f32()).collect();
    assert_eq!(back, vec![1.0, 2.0, 100.0, -100.0]);
}

#[test]
fn test_half_to_int_goes_through_f32() {
    let src = Array::from_slice(&[f16::from_f32(300.0), f16::from_f32(-2.7)], &[2]).unwrap();
    // Float saturation for u8, truncation toward zero for i32
    assert_eq!(cast_array(&src, DType::U8).to_vec::<u8>(), vec![255, 0]);
    assert_eq!(cast_array(&src, DType::I32).to_vec::<i32>(), vec![300, -2]);
}

#[test]
fn test_bool_from_numeric_is_nonzero() {
    let src = Array::from_slice(&[0.0f32, 0.5, -3.0, f32::NAN], &[4]).unwrap();
    let out = cast_array(&src, DType::Bool).to_vec::<Bool>();
    assert_eq!(out, vec![Bool::FALSE, Bool::TRUE, Bool::TRUE, Bool::TRUE]);

    let ints = Array::from_slice(&[0i8, -1, 5], &[3]).unwrap();
    let out = cast_array(&ints, DType::Bool).to_vec::<Bool>();
    assert_eq!(out, vec![Bool::FALSE, Bool::TRUE, Bool::TRUE]);
}

#[test]
fn test_bool_to_numeric_is_zero_or_one() {
    let src = Array::from_slice(&[Bool::TRUE, Bool::FALSE], &[2]).unwrap();
    assert_eq!(cast_array(&src, DType::F32).to_vec::<f32>(), vec![1.0, 0.0]);
    assert_eq!(cast_array(&src, DType::I64).to_vec::<i64>(), vec![1, 0]);
}

#[test]
fn test_complex_to_real_takes_real_part() {
    let src = Array::from_slice(&[Complex64::new(3.0, 4.0)], &[1]).unwrap();
    assert_eq!(cast_array(&src, DType::F32).to_vec::<f32>(), vec![3.0]);
    assert_eq!(cast_array(&src, DType::I32).to_vec::<i32>(), vec![3]);
}

#[test]
fn test_complex_truthiness_uses_both_components() {
    let src = Array::from_slice(
        &[
            Complex64::ZERO,
            Complex64::new(0.0, 2.0),
            Complex64::new(1.0, 0.0),
        ],
        &[3],
    )
    .unwrap();
    let out = cast_array(&src, DType::Bool).to_vec::<Bool>();
    assert_eq!(out, vec![Bool::FALSE, Bool::TRUE, Bool::TRUE]);
}

#[test]
fn test_real_to_complex_has_zero_imaginary() {
    let src = Array::from_slice(&[2.5f32, -1.0], &[2]).unwrap();
    let out = cast_array(&src, DType::Complex64).to_vec::<Complex64>();
    assert_eq!(out, vec![Complex64::new(2.5, 0.0), Complex64::new(-1.0, 0.0)]);
}

#[test]
fn test_same_dtype_is_identity() {
    for dt in DType::ALL {
        let src = dispatch_dtype!(dt, T => {
            Array::from_slice(&[T::from_f64(0.0), T::from_f64(1.0), T::from_f64(2.0)], &[3])
                .unwrap()
        });
        let dst = cast_array(&src, dt);
        let same = dispatch_dtype!(dt, T => { dst.to_vec::<T>() == src.to_vec::<T>() });
        assert!(same, "{dt}");
    }
}
