//! Elementwise conversion matrix across the closed dtype set
//!
//! `CastFrom<S>` is implemented for every ordered pair of the 13 element
//! types, so a `(source, destination)` dtype pair always resolves to a
//! concrete conversion at monomorphization time. There is no runtime
//! fallback arm: an unhandled pair is a compile error, not a branch.
//!
//! # Semantics
//!
//! Conversions follow the destination type's native Rust rules:
//!
//! - Narrowing integer casts truncate/wrap per two's complement
//!   (`300i32 -> 44u8`).
//! - Float to integer truncates toward zero; out-of-range magnitudes use
//!   Rust's native `as` behavior (saturate to the integer bounds, NaN
//!   maps to 0).
//! - Integer to float rounds to the nearest representable value.
//! - `Bool` behaves as the integers {0, 1}: any nonzero source (including
//!   NaN) is true; a true source converts as 1.
//! - Complex destinations receive the source's real value with zero
//!   imaginary part. Complex sources contribute their real part to real
//!   destinations, and are true iff either component is nonzero.
//! - `f16`/`bf16` convert through `f32`.

use super::complex::Complex64;
use super::element::Bool;
use half::{bf16, f16};

/// Elementwise numeric conversion from a source element type
///
/// The mirror image of `From`/`Into`, but lossy: it models the native
/// cast semantics described in the module docs rather than
/// value-preserving conversion.
pub trait CastFrom<S>: Sized {
    /// Convert one source element to this type
    fn cast_from(v: S) -> Self;
}

/// Primitive pairs that Rust's `as` already gives the required semantics
macro_rules! cast_with_as {
    ($src:ty => $($dst:ty),+ $(,)?) => {
        $(
            impl CastFrom<$src> for $dst {
                #[inline(always)]
                fn cast_from(v: $src) -> Self {
                    v as $dst
                }
            }
        )+
    };
}

macro_rules! cast_prim_pairs {
    ($($src:ty),+ $(,)?) => {
        $(
            cast_with_as!($src => u8, u16, u32, u64, i8, i16, i32, i64, f32);
        )+
    };
}

cast_prim_pairs!(u8, u16, u32, u64, i8, i16, i32, i64, f32);

/// Half-precision pairs, routed through f32
macro_rules! cast_half_prim {
    ($h:ty => $($p:ty),+ $(,)?) => {
        $(
            impl CastFrom<$h> for $p {
                #[inline(always)]
                fn cast_from(v: $h) -> Self {
                    v.to_f32() as $p
                }
            }

            impl CastFrom<$p> for $h {
                #[inline(always)]
                fn cast_from(v: $p) -> Self {
                    <$h>::from_f32(v as f32)
                }
            }
        )+
    };
}

cast_half_prim!(f16 => u8, u16, u32, u64, i8, i16, i32, i64, f32);
cast_half_prim!(bf16 => u8, u16, u32, u64, i8, i16, i32, i64, f32);

impl CastFrom<f16> for f16 {
    #[inline(always)]
    fn cast_from(v: f16) -> Self {
        v
    }
}

impl CastFrom<bf16> for bf16 {
    #[inline(always)]
    fn cast_from(v: bf16) -> Self {
        v
    }
}

impl CastFrom<f16> for bf16 {
    #[inline(always)]
    fn cast_from(v: f16) -> Self {
        bf16::from_f32(v.to_f32())
    }
}

impl CastFrom<bf16> for f16 {
    #[inline(always)]
    fn cast_from(v: bf16) -> Self {
        f16::from_f32(v.to_f32())
    }
}

/// Boolean with integer sources/destinations
macro_rules! cast_bool_int {
    ($($p:ty),+ $(,)?) => {
        $(
            impl CastFrom<Bool> for $p {
                #[inline(always)]
                fn cast_from(v: Bool) -> Self {
                    v.0 as $p
                }
            }

            impl CastFrom<$p> for Bool {
                #[inline(always)]
                fn cast_from(v: $p) -> Self {
                    Bool((v != 0) as u8)
                }
            }
        )+
    };
}

cast_bool_int!(u8, u16, u32, u64, i8, i16, i32, i64);

impl CastFrom<Bool> for Bool {
    #[inline(always)]
    fn cast_from(v: Bool) -> Self {
        v
    }
}

impl CastFrom<Bool> for f32 {
    #[inline(always)]
    fn cast_from(v: Bool) -> Self {
        v.0 as f32
    }
}

impl CastFrom<f32> for Bool {
    #[inline(always)]
    fn cast_from(v: f32) -> Self {
        // NaN != 0.0, so NaN is true
        Bool((v != 0.0) as u8)
    }
}

impl CastFrom<Bool> for f16 {
    #[inline(always)]
    fn cast_from(v: Bool) -> Self {
        f16::from_f32(v.0 as f32)
    }
}

impl CastFrom<Bool> for bf16 {
    #[inline(always)]
    fn cast_from(v: Bool) -> Self {
        bf16::from_f32(v.0 as f32)
    }
}

impl CastFrom<f16> for Bool {
    #[inline(always)]
    fn cast_from(v: f16) -> Self {
        Bool((v.to_f32() != 0.0) as u8)
    }
}

impl CastFrom<bf16> for Bool {
    #[inline(always)]
    fn cast_from(v: bf16) -> Self {
        Bool((v.to_f32() != 0.0) as u8)
    }
}

/// Complex with primitive sources/destinations: real part only
macro_rules! cast_complex_prim {
    ($($p:ty),+ $(,)?) => {
        $(
            impl CastFrom<$p> for Complex64 {
                #[inline(always)]
                fn cast_from(v: $p) -> Self {
                    Complex64::new(v as f32, 0.0)
                }
            }

            impl CastFrom<Complex64> for $p {
                #[inline(always)]
                fn cast_from(v: Complex64) -> Self {
                    v.re as $p
                }
            }
        )+
    };
}

cast_complex_prim!(u8, u16, u32, u64, i8, i16, i32, i64, f32);

impl CastFrom<Complex64> for Complex64 {
    #[inline(always)]
    fn cast_from(v: Complex64) -> Self {
        v
    }
}

impl CastFrom<f16> for Complex64 {
    #[inline(always)]
    fn cast_from(v: f16) -> Self {
        Complex64::new(v.to_f32(), 0.0)
    }
}

impl CastFrom<bf16> for Complex64 {
    #[inline(always)]
    fn cast_from(v: bf16) -> Self {
        Complex64::new(v.to_f32(), 0.0)
    }
}

impl CastFrom<Complex64> for f16 {
    #[inline(always)]
    fn cast_from(v: Complex64) -> Self {
        f16::from_f32(v.re)
    }
}

impl CastFrom<Complex64> for bf16 {
    #[inline(always)]
    fn cast_from(v: Complex64) -> Self {
        bf16::from_f32(v.re)
    }
}

impl CastFrom<Bool> for Complex64 {
    #[inline(always)]
    fn cast_from(v: Bool) -> Self {
        Complex64::new(v.0 as f32, 0.0)
    }
}

impl CastFrom<Complex64> for Bool {
    #[inline(always)]
    fn cast_from(v: Complex64) -> Self {
        Bool((v.re != 0.0 || v.im != 0.0) as u8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_narrowing_int_wraps() {
        assert_eq!(u8::cast_from(300i32), 44);
        assert_eq!(u8::cast_from(-1i32), 255);
        assert_eq!(i8::cast_from(200u8), -56);
        assert_eq!(i16::cast_from(0x1_2345i64), 0x2345);
    }

    #[test]
    fn test_float_to_int_truncates_toward_zero() {
        assert_eq!(i32::cast_from(7.9f32), 7);
        assert_eq!(i32::cast_from(-7.9f32), -7);
        assert_eq!(u8::cast_from(3.999f32), 3);
    }

    #[test]
    fn test_float_to_int_out_of_range_is_native() {
        // Rust `as` saturates; NaN maps to zero
        assert_eq!(u8::cast_from(1e9f32), 255);
        assert_eq!(u8::cast_from(-1.0f32), 0);
        assert_eq!(i32::cast_from(f32::NAN), 0);
        assert_eq!(i8::cast_from(f32::NEG_INFINITY), i8::MIN);
    }

    #[test]
    fn test_int_to_float_rounds_nearest() {
        // 2^24 + 1 is not representable in f32; nearest is 2^24
        assert_eq!(f32::cast_from(16_777_217i64), 16_777_216.0);
        assert_eq!(f32::cast_from(u64::MAX), 1.8446744e19);
    }

    #[test]
    fn test_half_roundtrips_through_f32() {
        assert_eq!(f16::cast_from(1000i32), f16::from_f32(1000.0));
        assert_eq!(i32::cast_from(f16::from_f32(-2.75)), -2);
        assert_eq!(bf16::cast_from(f16::from_f32(0.5)), bf16::from_f32(0.5));
        // Max finite f16; larger magnitudes overflow to infinity
        assert_eq!(f16::cast_from(65504.0f32), f16::MAX);
        assert_eq!(f16::cast_from(1e9f32), f16::INFINITY);
    }

    #[test]
    fn test_bool_is_zero_or_one() {
        assert_eq!(Bool::cast_from(300i32), Bool::TRUE);
        assert_eq!(Bool::cast_from(0u64), Bool::FALSE);
        assert_eq!(Bool::cast_from(f32::NAN), Bool::TRUE);
        assert_eq!(Bool::cast_from(-0.0f32), Bool::FALSE);
        assert_eq!(u64::cast_from(Bool::TRUE), 1);
        assert_eq!(f32::cast_from(Bool::FALSE), 0.0);
    }

    #[test]
    fn test_complex_real_part() {
        assert_eq!(Complex64::cast_from(2.5f32), Complex64::new(2.5, 0.0));
        assert_eq!(Complex64::cast_from(-3i8), Complex64::new(-3.0, 0.0));
        assert_eq!(f32::cast_from(Complex64::new(3.0, 4.0)), 3.0);
        assert_eq!(i32::cast_from(Complex64::new(-1.9, 7.0)), -1);
        // Purely imaginary is still truthy
        assert_eq!(Bool::cast_from(Complex64::new(0.0, 1.0)), Bool::TRUE);
        assert_eq!(Bool::cast_from(Complex64::ZERO), Bool::FALSE);
    }

    #[test]
    fn test_identity_casts() {
        assert_eq!(i32::cast_from(-5i32), -5);
        assert_eq!(f16::cast_from(f16::from_f32(1.5)), f16::from_f32(1.5));
        let z = Complex64::new(1.0, -1.0);
        assert_eq!(Complex64::cast_from(z), z);
    }
}
