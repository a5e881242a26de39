//! Element trait for mapping Rust types to DType

use super::complex::Complex64;
use super::DType;
use bytemuck::{Pod, Zeroable};
use std::fmt::Debug;

/// Trait for types that can be elements of an array view
///
/// This trait connects Rust's type system to ndcopy's runtime dtype system.
/// It is implemented for exactly the 13 types of the closed [`DType`] set.
///
/// # Bounds
/// - `Copy + Send + Sync + 'static` - basic requirements for raw kernels
/// - `Pod + Zeroable` - safe memory reinterpretation (bytemuck)
/// - `PartialEq + Debug` - comparison and diagnostics
///
/// The `from_f64`/`to_f64` conversions exist for construction helpers
/// (`Array::full`) and diagnostics only. The copy engine itself never
/// routes casts through `f64`; elementwise conversion uses the pairwise
/// [`CastFrom`](super::cast::CastFrom) matrix so that narrowing integer
/// casts wrap instead of saturating through a float intermediate.
pub trait Element:
    Copy + Send + Sync + Pod + Zeroable + PartialEq + Debug + 'static
{
    /// The corresponding DType for this Rust type
    const DTYPE: DType;

    /// Convert from f64 to this type (lossy; construction helpers only)
    fn from_f64(v: f64) -> Self;

    /// Convert to f64 (lossy; diagnostics only)
    ///
    /// For [`Complex64`] this returns the real part.
    fn to_f64(self) -> f64;
}

/// Boolean element, stored as one byte holding 0 or 1
///
/// `bool` itself is not `Pod` (not every bit pattern is valid), so boolean
/// buffers use this transparent `u8` newtype. The cast matrix guarantees a
/// stored value is always exactly 0 or 1.
#[repr(transparent)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Pod, Zeroable)]
pub struct Bool(pub u8);

impl Bool {
    /// False
    pub const FALSE: Self = Self(0);

    /// True
    pub const TRUE: Self = Self(1);

    /// Whether this value is true
    #[inline]
    pub const fn as_bool(self) -> bool {
        self.0 != 0
    }
}

impl From<bool> for Bool {
    #[inline]
    fn from(v: bool) -> Self {
        Self(v as u8)
    }
}

macro_rules! impl_element_prim {
    ($($t:ty => $dtype:expr),+ $(,)?) => {
        $(
            impl Element for $t {
                const DTYPE: DType = $dtype;

                #[inline]
                fn from_f64(v: f64) -> Self {
                    v as $t
                }

                #[inline]
                fn to_f64(self) -> f64 {
                    self as f64
                }
            }
        )+
    };
}

impl_element_prim!(
    u8 => DType::U8,
    u16 => DType::U16,
    u32 => DType::U32,
    u64 => DType::U64,
    i8 => DType::I8,
    i16 => DType::I16,
    i32 => DType::I32,
    i64 => DType::I64,
    f32 => DType::F32,
);

impl Element for Bool {
    const DTYPE: DType = DType::Bool;

    #[inline]
    fn from_f64(v: f64) -> Self {
        Self((v != 0.0) as u8)
    }

    #[inline]
    fn to_f64(self) -> f64 {
        self.0 as f64
    }
}

impl Element for half::f16 {
    const DTYPE: DType = DType::F16;

    #[inline]
    fn from_f64(v: f64) -> Self {
        half::f16::from_f64(v)
    }

    #[inline]
    fn to_f64(self) -> f64 {
        self.to_f64()
    }
}

impl Element for half::bf16 {
    const DTYPE: DType = DType::BF16;

    #[inline]
    fn from_f64(v: f64) -> Self {
        half::bf16::from_f64(v)
    }

    #[inline]
    fn to_f64(self) -> f64 {
        self.to_f64()
    }
}

impl Element for Complex64 {
    const DTYPE: DType = DType::Complex64;

    /// Creates a real complex number (im = 0)
    #[inline]
    fn from_f64(v: f64) -> Self {
        Self::new(v as f32, 0.0)
    }

    /// Returns the real part
    #[inline]
    fn to_f64(self) -> f64 {
        self.re as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_dtype() {
        assert_eq!(f32::DTYPE, DType::F32);
        assert_eq!(i64::DTYPE, DType::I64);
        assert_eq!(u8::DTYPE, DType::U8);
        assert_eq!(Bool::DTYPE, DType::Bool);
        assert_eq!(half::f16::DTYPE, DType::F16);
        assert_eq!(half::bf16::DTYPE, DType::BF16);
        assert_eq!(Complex64::DTYPE, DType::Complex64);
    }

    #[test]
    fn test_element_conversions() {
        assert_eq!(f32::from_f64(2.5).to_f64(), 2.5);
        assert_eq!(i32::from_f64(42.9), 42);
        assert_eq!(Bool::from_f64(7.0), Bool::TRUE);
        assert_eq!(Bool::from_f64(0.0), Bool::FALSE);
        assert_eq!(Complex64::from_f64(3.0), Complex64::new(3.0, 0.0));
        assert_eq!(Complex64::new(3.0, 4.0).to_f64(), 3.0);
    }

    #[test]
    fn test_bool_newtype() {
        assert!(Bool::TRUE.as_bool());
        assert!(!Bool::FALSE.as_bool());
        assert_eq!(Bool::from(true), Bool(1));
        assert_eq!(std::mem::size_of::<Bool>(), 1);
    }
}
