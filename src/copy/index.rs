//! Index arithmetic width for the strided kernels
//!
//! The specialized kernels accumulate element offsets in a caller-chosen
//! integer type. For small arrays 32-bit arithmetic keeps the counters in
//! narrow registers; arrays whose reachable offsets exceed `i32` range use
//! 64-bit. [`copy`](crate::copy::copy) picks the width automatically from
//! the layouts involved.

use std::fmt::Debug;
use std::ops::{Add, AddAssign, Mul, Sub};

/// Signed integer used for offset accumulation inside the strided kernels
pub trait CopyIndex:
    Copy
    + Debug
    + Add<Output = Self>
    + AddAssign
    + Sub<Output = Self>
    + Mul<Output = Self>
    + PartialEq
    + 'static
{
    /// Additive identity
    const ZERO: Self;

    /// Convert a stride; must be in range for the chosen width
    fn from_isize(v: isize) -> Self;

    /// Convert a dimension size; must be in range for the chosen width
    fn from_usize(v: usize) -> Self;

    /// Widen back to `isize` for pointer arithmetic
    fn to_isize(self) -> isize;
}

impl CopyIndex for i32 {
    const ZERO: Self = 0;

    #[inline(always)]
    fn from_isize(v: isize) -> Self {
        v as i32
    }

    #[inline(always)]
    fn from_usize(v: usize) -> Self {
        v as i32
    }

    #[inline(always)]
    fn to_isize(self) -> isize {
        self as isize
    }
}

impl CopyIndex for i64 {
    const ZERO: Self = 0;

    #[inline(always)]
    fn from_isize(v: isize) -> Self {
        v as i64
    }

    #[inline(always)]
    fn from_usize(v: usize) -> Self {
        v as i64
    }

    #[inline(always)]
    fn to_isize(self) -> isize {
        self as isize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn accumulate<I: CopyIndex>(strides: &[isize]) -> isize {
        let mut acc = I::ZERO;
        for &s in strides {
            acc += I::from_isize(s) * I::from_usize(2);
        }
        acc.to_isize()
    }

    #[test]
    fn test_both_widths_agree() {
        let strides = [12isize, -4, 1];
        assert_eq!(accumulate::<i32>(&strides), accumulate::<i64>(&strides));
        assert_eq!(accumulate::<i64>(&strides), 18);
    }
}
