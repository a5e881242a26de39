//! Shape and stride utilities for strided views
//!
//! Strides are in ELEMENTS, not bytes, and signed to support reversed
//! (negative-stride) views. The address of element `[i0, i1, ..., in]` is
//! `offset + i0*strides[0] + i1*strides[1] + ... + in*strides[n]`.

use smallvec::SmallVec;

/// Stack allocation threshold for dimensions
/// Most arrays have 4 or fewer dimensions, so we stack-allocate up to 4
pub const STACK_DIMS: usize = 4;

/// Shape type: dimensions of an array view
pub type Shape = SmallVec<[usize; STACK_DIMS]>;

/// Strides type: element offsets between consecutive elements along each
/// dimension
pub type Strides = SmallVec<[isize; STACK_DIMS]>;

/// Compute contiguous strides for a shape (row-major order)
pub fn contiguous_strides(shape: &[usize]) -> Strides {
    let mut strides: Strides = SmallVec::with_capacity(shape.len());
    let mut stride = 1isize;

    for &dim in shape.iter().rev() {
        strides.push(stride);
        stride *= dim as isize;
    }

    strides.reverse();
    strides
}

/// Whether the layout is row-major contiguous starting at its offset
pub fn is_row_contiguous(shape: &[usize], strides: &[isize]) -> bool {
    let mut stride = 1isize;
    for (&dim, &s) in shape.iter().zip(strides.iter()).rev() {
        // Size-1 dims are visited once; their stride never matters
        if dim != 1 && s != stride {
            return false;
        }
        stride *= dim as isize;
    }
    true
}

/// Convert a linear element index into a strided memory offset
///
/// This is the slow-path index utility: the specialized kernels avoid it
/// entirely, and the fallback paths pay it once per element (single-stride,
/// rank > 7) or once per chunk (dual-stride, rank > 5).
#[inline]
pub fn elem_to_loc(mut elem: usize, shape: &[usize], strides: &[isize]) -> isize {
    let mut loc = 0isize;
    for i in (0..shape.len()).rev() {
        loc += (elem % shape[i]) as isize * strides[i];
        elem /= shape[i];
    }
    loc
}

/// Lowest and highest element offsets reachable through a layout,
/// relative to the view's own offset
///
/// Returns `(lo, hi)` inclusive; both are 0 for an empty view. Used to
/// validate views against their buffer and to size `data_size`.
pub fn reachable_span(shape: &[usize], strides: &[isize]) -> (isize, isize) {
    let mut lo = 0isize;
    let mut hi = 0isize;
    for (&dim, &s) in shape.iter().zip(strides.iter()) {
        if dim == 0 {
            return (0, 0);
        }
        let span = (dim - 1) as isize * s;
        if s >= 0 {
            hi += span;
        } else {
            lo += span;
        }
    }
    (lo, hi)
}
