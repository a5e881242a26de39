//! The copy engine: strategy selection, allocation, donation, dispatch
//!
//! [`copy`] is the main entry point. It allocates (or donates) the
//! destination buffer according to the chosen [`CopyType`], then hands off
//! to [`copy_inplace`], which dispatches on the (source, destination)
//! dtype pair and runs the kernel matching the strategy.
//!
//! [`copy_inplace_strided`] is the low-level variant for callers that
//! supply an explicit iteration shape and stride vectors, e.g. writing a
//! source into a strided window of a larger destination (concatenation).

pub mod collapse;
pub mod index;

mod general;
mod general_general;
mod simple;

pub use collapse::collapse_contiguous_dims;
pub use index::CopyIndex;

use crate::array::layout::reachable_span;
use crate::array::{Array, Buffer};
use crate::dispatch_dtype;
use crate::dtype::{CastFrom, Element};

/// Copy strategy, chosen by the caller from the layouts involved
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CopyType {
    /// Broadcast a single source element to every destination element
    Scalar,
    /// Flat element-wise copy of a row-contiguous source
    Vector,
    /// Strided source into a contiguous destination
    General,
    /// Both source and destination strided
    GeneralGeneral,
}

/// Copy `src` into `dst`, allocating or donating the destination buffer
///
/// `dst` arrives as metadata only (shape and dtype); its buffer is
/// installed here. For `Vector` copies, a donatable source with the same
/// element size hands its buffer to `dst` outright: same dtype means the
/// copy is free, a different dtype of equal width is cast in place. When
/// both sides would be strided but the destination buffer is freshly
/// allocated, the fresh buffer is dense row-major, so the request
/// downgrades to `General`.
pub fn copy(src: &Array, dst: &mut Array, ctype: CopyType) {
    let mut ctype = ctype;
    if ctype == CopyType::Vector {
        debug_assert!(src.is_row_contiguous());
        if src.is_donatable() && src.itemsize() == dst.itemsize() {
            dst.copy_shared_buffer(src);
            if dst.dtype() == src.dtype() {
                // The buffer already holds the destination's values
                return;
            }
            cast_in_place(src.dtype(), dst);
            return;
        }
        let buffer = Buffer::new(src.data_size() * dst.itemsize());
        dst.set_data_with(
            buffer,
            src.data_size(),
            src.strides().iter().copied().collect(),
            src.flags(),
        );
    } else {
        dst.set_data(Buffer::new(dst.nbytes()));
        if ctype == CopyType::GeneralGeneral {
            ctype = CopyType::General;
        }
    }
    copy_inplace(src, dst, ctype);
}

/// Copy `src` into `dst`'s existing buffer
///
/// The destination must already have storage; layouts are taken from the
/// arrays themselves.
pub fn copy_inplace(src: &Array, dst: &mut Array, ctype: CopyType) {
    if dst.size() == 0 {
        return;
    }
    debug_assert!(ctype != CopyType::Scalar || src.size() == 1);

    let shape = src.shape().to_owned();
    let i_strides = src.strides().to_owned();
    let o_strides = dst.strides().to_owned();
    dispatch_dtype!(src.dtype(), S => {
        dispatch_dtype!(dst.dtype(), D => {
            let s_ptr = src.data::<S>();
            let (d_ptr, d_size) = (dst.data_mut::<D>(), dst.size());
            match ctype {
                CopyType::Scalar => unsafe { simple::copy_single(s_ptr, d_ptr, d_size) },
                CopyType::Vector => unsafe {
                    simple::copy_vector(s_ptr, d_ptr, src.data_size())
                },
                CopyType::General => {
                    dispatch_general::<S, D>(s_ptr, d_ptr, &shape, &i_strides)
                }
                CopyType::GeneralGeneral => {
                    dispatch_general_general::<S, D>(s_ptr, d_ptr, &shape, &i_strides, &o_strides)
                }
            }
        })
    });
}

/// Copy with an explicit iteration shape, stride vectors, and offsets
///
/// The layout arguments override the arrays' own metadata: the copy
/// visits `shape` elements, reading at `i_offset + elem·i_strides` from
/// the source buffer and writing at `o_offset + elem·o_strides` into the
/// destination buffer (offsets are relative to each array's own base).
/// `Scalar` and `Vector` strategies use only the offsets.
///
/// # Safety
///
/// Every element offset reachable through the given layouts must lie
/// inside the corresponding array's buffer; nothing is validated here.
#[allow(clippy::too_many_arguments)]
pub unsafe fn copy_inplace_strided(
    src: &Array,
    dst: &mut Array,
    shape: &[usize],
    i_strides: &[isize],
    o_strides: &[isize],
    i_offset: isize,
    o_offset: isize,
    ctype: CopyType,
) {
    let size: usize = shape.iter().product();
    if size == 0 {
        return;
    }

    dispatch_dtype!(src.dtype(), S => {
        dispatch_dtype!(dst.dtype(), D => {
            let s_ptr = src.data::<S>().wrapping_offset(i_offset);
            let d_ptr = dst.data_mut::<D>().wrapping_offset(o_offset);
            match ctype {
                CopyType::Scalar => unsafe { simple::copy_single(s_ptr, d_ptr, size) },
                CopyType::Vector => unsafe { simple::copy_vector(s_ptr, d_ptr, size) },
                CopyType::General => {
                    dispatch_general::<S, D>(s_ptr, d_ptr, shape, i_strides)
                }
                CopyType::GeneralGeneral => {
                    dispatch_general_general::<S, D>(s_ptr, d_ptr, shape, i_strides, o_strides)
                }
            }
        })
    });
}

// 32-bit offset accumulation is safe when every reachable offset and every
// dimension fits in i32
fn fits_i32(shape: &[usize], strides: &[isize]) -> bool {
    let (lo, hi) = reachable_span(shape, strides);
    lo >= i32::MIN as isize
        && hi <= i32::MAX as isize
        && shape.iter().all(|&d| d <= i32::MAX as usize)
}

fn dispatch_general<S, D>(src: *const S, dst: *mut D, shape: &[usize], i_strides: &[isize])
where
    S: Copy,
    D: CastFrom<S> + Element,
{
    if fits_i32(shape, i_strides) {
        unsafe { general::copy_general::<S, D, i32>(src, dst, shape, i_strides) }
    } else {
        unsafe { general::copy_general::<S, D, i64>(src, dst, shape, i_strides) }
    }
}

fn dispatch_general_general<S, D>(
    src: *const S,
    dst: *mut D,
    shape: &[usize],
    i_strides: &[isize],
    o_strides: &[isize],
) where
    S: Copy,
    D: CastFrom<S> + Element,
{
    if fits_i32(shape, i_strides) && fits_i32(shape, o_strides) {
        unsafe {
            general_general::copy_general_general::<S, D, i32>(
                src, dst, shape, i_strides, o_strides,
            )
        }
    } else {
        unsafe {
            general_general::copy_general_general::<S, D, i64>(
                src, dst, shape, i_strides, o_strides,
            )
        }
    }
}

// Donated buffer, equal element width, different dtype: cast every slot of
// the data region onto itself. Position-wise read-then-write keeps the
// exact-aliasing case sound.
fn cast_in_place(src_dtype: crate::dtype::DType, dst: &mut Array) {
    let size = dst.data_size();
    dispatch_dtype!(src_dtype, S => {
        dispatch_dtype!(dst.dtype(), D => {
            debug_assert_eq!(std::mem::size_of::<S>(), std::mem::size_of::<D>());
            let ptr = dst.data_mut::<D>();
            unsafe { simple::copy_vector::<S, D>(ptr as *const S, ptr, size) };
        })
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dtype::DType;

    #[test]
    fn test_vector_copy_with_cast() {
        let src = Array::from_slice(&[10i32, 20, 30, 40], &[4]).unwrap();
        let mut dst = Array::empty(&[4], DType::F16);
        copy(&src, &mut dst, CopyType::Vector);
        let out = dst.to_vec::<crate::dtype::f16>();
        assert_eq!(out[2], crate::dtype::f16::from_f32(30.0));
    }

    #[test]
    fn test_vector_donation_same_dtype_shares_buffer() {
        let src = Array::from_slice(&[1.0f32, 2.0, 3.0], &[3]).unwrap();
        let src_ptr = src.data_ptr();
        let mut dst = Array::empty(&[3], DType::F32);
        copy(&src, &mut dst, CopyType::Vector);
        assert_eq!(dst.data_ptr(), src_ptr);
        assert_eq!(dst.to_vec::<f32>(), vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_vector_donation_casts_in_place() {
        let src = Array::from_slice(&[1i32, 2, 300], &[3]).unwrap();
        let src_ptr = src.data_ptr();
        let mut dst = Array::empty(&[3], DType::F32);
        copy(&src, &mut dst, CopyType::Vector);
        // Same 4-byte width: donated, then reinterpreted slot by slot
        assert_eq!(dst.data_ptr(), src_ptr);
        assert_eq!(dst.to_vec::<f32>(), vec![1.0, 2.0, 300.0]);
    }

    #[test]
    fn test_shared_source_is_not_donated() {
        let src = Array::from_slice(&[5i32, 6], &[2]).unwrap();
        let view = src.as_strided(&[2], &[1], 0).unwrap();
        let mut dst = Array::empty(&[2], DType::I32);
        copy(&src, &mut dst, CopyType::Vector);
        assert_ne!(dst.data_ptr(), src.data_ptr());
        assert_eq!(dst.to_vec::<i32>(), vec![5, 6]);
        drop(view);
    }

    #[test]
    fn test_scalar_broadcast() {
        let src = Array::scalar(7i32);
        let mut dst = Array::empty(&[2, 3], DType::F32);
        copy(&src, &mut dst, CopyType::Scalar);
        assert_eq!(dst.to_vec::<f32>(), vec![7.0; 6]);
    }

    #[test]
    fn test_general_from_transposed_view() {
        let a = Array::from_slice(&[1i32, 2, 3, 4, 5, 6], &[2, 3]).unwrap();
        let t = a.as_strided(&[3, 2], &[1, 3], 0).unwrap();
        let mut dst = Array::empty(&[3, 2], DType::I32);
        copy(&t, &mut dst, CopyType::General);
        assert_eq!(dst.to_vec::<i32>(), vec![1, 4, 2, 5, 3, 6]);
    }

    #[test]
    fn test_general_general_downgrades_to_general() {
        // Fresh destination storage is dense, so the result must match the
        // plain General path
        let a = Array::from_slice(&[1u8, 2, 3, 4], &[2, 2]).unwrap();
        let t = a.as_strided(&[2, 2], &[1, 2], 0).unwrap();
        let mut dst = Array::empty(&[2, 2], DType::U8);
        copy(&t, &mut dst, CopyType::GeneralGeneral);
        assert!(dst.is_row_contiguous());
        assert_eq!(dst.to_vec::<u8>(), vec![1, 3, 2, 4]);
    }

    #[test]
    fn test_empty_copy_is_a_no_op() {
        let src = Array::from_slice::<f32>(&[], &[0]).unwrap();
        let mut dst = Array::empty(&[0], DType::F32);
        copy(&src, &mut dst, CopyType::Vector);
        assert_eq!(dst.size(), 0);
    }

    #[test]
    fn test_strided_window_write() {
        // Concatenation-style: write [3] into the odd slots of a [6]
        let src = Array::from_slice(&[10i32, 20, 30], &[3]).unwrap();
        let mut dst = Array::zeros(&[6], DType::I32);
        unsafe {
            copy_inplace_strided(
                &src,
                &mut dst,
                &[3],
                &[1],
                &[2],
                0,
                1,
                CopyType::GeneralGeneral,
            );
        }
        assert_eq!(dst.to_vec::<i32>(), vec![0, 10, 0, 20, 0, 30]);
    }
}
