//! Data type system for ndcopy arrays
//!
//! This module provides the `DType` enum representing the closed set of
//! element types the copy engine supports, the `Element` trait connecting
//! them to Rust types, and the `CastFrom` conversion matrix.

pub mod cast;
pub mod complex;
mod dispatch;
mod element;

pub use cast::CastFrom;
pub use complex::Complex64;
pub use element::{Bool, Element};
pub use half::{bf16, f16};

use std::fmt;

/// Data types supported by ndcopy arrays
///
/// This is a *closed* enumeration: the copy engine's cast matrix is
/// exhaustively instantiated over every ordered pair, so there is no
/// runtime "unsupported dtype" branch anywhere in the kernels.
///
/// Using an enum (rather than generics) at the API surface allows runtime
/// type selection while the `dispatch_dtype!` macro recovers the concrete
/// type for monomorphized kernels.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum DType {
    /// Boolean, stored as one byte holding 0 or 1
    Bool,
    /// 8-bit unsigned integer
    U8,
    /// 16-bit unsigned integer
    U16,
    /// 32-bit unsigned integer
    U32,
    /// 64-bit unsigned integer
    U64,
    /// 8-bit signed integer
    I8,
    /// 16-bit signed integer
    I16,
    /// 32-bit signed integer
    I32,
    /// 64-bit signed integer
    I64,
    /// 16-bit floating point (IEEE 754)
    F16,
    /// 32-bit floating point
    F32,
    /// 16-bit brain floating point
    BF16,
    /// 64-bit complex (two f32: re, im)
    Complex64,
}

impl DType {
    /// Every supported dtype, in declaration order
    pub const ALL: [DType; 13] = [
        Self::Bool,
        Self::U8,
        Self::U16,
        Self::U32,
        Self::U64,
        Self::I8,
        Self::I16,
        Self::I32,
        Self::I64,
        Self::F16,
        Self::F32,
        Self::BF16,
        Self::Complex64,
    ];

    /// Size of one element in bytes
    #[inline]
    pub const fn size_in_bytes(self) -> usize {
        match self {
            Self::Bool | Self::U8 | Self::I8 => 1,
            Self::U16 | Self::I16 | Self::F16 | Self::BF16 => 2,
            Self::U32 | Self::I32 | Self::F32 => 4,
            Self::U64 | Self::I64 | Self::Complex64 => 8,
        }
    }

    /// Returns true if this is a floating point type
    #[inline]
    pub const fn is_float(self) -> bool {
        matches!(self, Self::F16 | Self::F32 | Self::BF16)
    }

    /// Returns true if this is a signed integer type
    #[inline]
    pub const fn is_signed_int(self) -> bool {
        matches!(self, Self::I8 | Self::I16 | Self::I32 | Self::I64)
    }

    /// Returns true if this is an unsigned integer type
    #[inline]
    pub const fn is_unsigned_int(self) -> bool {
        matches!(self, Self::U8 | Self::U16 | Self::U32 | Self::U64)
    }

    /// Returns true if this is any integer type (signed or unsigned)
    #[inline]
    pub const fn is_int(self) -> bool {
        self.is_signed_int() || self.is_unsigned_int()
    }

    /// Returns true if this is the boolean type
    #[inline]
    pub const fn is_bool(self) -> bool {
        matches!(self, Self::Bool)
    }

    /// Returns true if this is a complex number type
    #[inline]
    pub const fn is_complex(self) -> bool {
        matches!(self, Self::Complex64)
    }

    /// Short name for display (e.g., "f32", "u8")
    pub const fn short_name(self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::U8 => "u8",
            Self::U16 => "u16",
            Self::U32 => "u32",
            Self::U64 => "u64",
            Self::I8 => "i8",
            Self::I16 => "i16",
            Self::I32 => "i32",
            Self::I64 => "i64",
            Self::F16 => "f16",
            Self::F32 => "f32",
            Self::BF16 => "bf16",
            Self::Complex64 => "c64",
        }
    }
}

impl fmt::Display for DType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.short_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dtype_size() {
        assert_eq!(DType::Bool.size_in_bytes(), 1);
        assert_eq!(DType::F16.size_in_bytes(), 2);
        assert_eq!(DType::BF16.size_in_bytes(), 2);
        assert_eq!(DType::F32.size_in_bytes(), 4);
        assert_eq!(DType::I64.size_in_bytes(), 8);
        assert_eq!(DType::Complex64.size_in_bytes(), 8);
    }

    #[test]
    fn test_dtype_categories() {
        assert!(DType::F32.is_float());
        assert!(!DType::I32.is_float());
        assert!(DType::I32.is_signed_int());
        assert!(DType::U32.is_unsigned_int());
        assert!(DType::U32.is_int());
        assert!(DType::Bool.is_bool());
        assert!(DType::Complex64.is_complex());
        assert!(!DType::Complex64.is_float());
    }

    #[test]
    fn test_dtype_all_covers_every_kind() {
        assert_eq!(DType::ALL.len(), 13);
        for (i, a) in DType::ALL.iter().enumerate() {
            for b in &DType::ALL[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_short_names() {
        assert_eq!(DType::BF16.short_name(), "bf16");
        assert_eq!(DType::Complex64.short_name(), "c64");
        assert_eq!(format!("{}", DType::U16), "u16");
    }
}
