//! Dual-stride kernels: strided source into a strided destination
//!
//! Both sides carry an offset accumulator. Ranks 1 through 5 run a direct
//! loop nest; deeper shapes are processed in chunks of the innermost five
//! dimensions, paying [`elem_to_loc`] once per chunk on each side instead
//! of once per element.

use super::index::CopyIndex;
use crate::array::layout::elem_to_loc;
use crate::copy::collapse::collapse_contiguous_dims;
use crate::dtype::CastFrom;
use smallvec::SmallVec;

#[allow(clippy::too_many_arguments)]
unsafe fn gg_dim1<S, D, I>(
    src: *const S,
    dst: *mut D,
    dim: usize,
    i_st: I,
    o_st: I,
    mut i_off: I,
    mut o_off: I,
) where
    S: Copy,
    D: CastFrom<S>,
    I: CopyIndex,
{
    for _ in 0..dim {
        let v = unsafe { src.offset(i_off.to_isize()).read() };
        unsafe { dst.offset(o_off.to_isize()).write(D::cast_from(v)) };
        i_off += i_st;
        o_off += o_st;
    }
}

#[allow(clippy::too_many_arguments)]
unsafe fn gg_dim2<S, D, I>(
    src: *const S,
    dst: *mut D,
    shape: &[usize],
    i_st: &[I],
    o_st: &[I],
    mut i_off: I,
    mut o_off: I,
) where
    S: Copy,
    D: CastFrom<S>,
    I: CopyIndex,
{
    for _ in 0..shape[0] {
        unsafe { gg_dim1(src, dst, shape[1], i_st[1], o_st[1], i_off, o_off) };
        i_off += i_st[0];
        o_off += o_st[0];
    }
}

#[allow(clippy::too_many_arguments)]
unsafe fn gg_dim3<S, D, I>(
    src: *const S,
    dst: *mut D,
    shape: &[usize],
    i_st: &[I],
    o_st: &[I],
    mut i_off: I,
    mut o_off: I,
) where
    S: Copy,
    D: CastFrom<S>,
    I: CopyIndex,
{
    for _ in 0..shape[0] {
        unsafe { gg_dim2(src, dst, &shape[1..], &i_st[1..], &o_st[1..], i_off, o_off) };
        i_off += i_st[0];
        o_off += o_st[0];
    }
}

#[allow(clippy::too_many_arguments)]
unsafe fn gg_dim4<S, D, I>(
    src: *const S,
    dst: *mut D,
    shape: &[usize],
    i_st: &[I],
    o_st: &[I],
    mut i_off: I,
    mut o_off: I,
) where
    S: Copy,
    D: CastFrom<S>,
    I: CopyIndex,
{
    for _ in 0..shape[0] {
        unsafe { gg_dim3(src, dst, &shape[1..], &i_st[1..], &o_st[1..], i_off, o_off) };
        i_off += i_st[0];
        o_off += o_st[0];
    }
}

#[allow(clippy::too_many_arguments)]
unsafe fn gg_dim5<S, D, I>(
    src: *const S,
    dst: *mut D,
    shape: &[usize],
    i_st: &[I],
    o_st: &[I],
    mut i_off: I,
    mut o_off: I,
) where
    S: Copy,
    D: CastFrom<S>,
    I: CopyIndex,
{
    for _ in 0..shape[0] {
        unsafe { gg_dim4(src, dst, &shape[1..], &i_st[1..], &o_st[1..], i_off, o_off) };
        i_off += i_st[0];
        o_off += o_st[0];
    }
}

/// Copy a strided source into a strided destination
///
/// `src` and `dst` point at their views' first logical elements. Collapses
/// dimensions jointly across BOTH layouts first; a dimension pair merges
/// only if source and destination agree it is contiguous.
///
/// # Safety
///
/// Every offset reachable through `shape` with `i_strides` must be
/// readable from `src`, and every offset reachable with `o_strides`
/// writable through `dst`.
pub(crate) unsafe fn copy_general_general<S, D, I>(
    src: *const S,
    dst: *mut D,
    shape: &[usize],
    i_strides: &[isize],
    o_strides: &[isize],
) where
    S: Copy,
    D: CastFrom<S>,
    I: CopyIndex,
{
    let (shape, strides) = collapse_contiguous_dims(shape, &[i_strides, o_strides]);
    let i_st: SmallVec<[I; 8]> = strides[0].iter().map(|&s| I::from_isize(s)).collect();
    let o_st: SmallVec<[I; 8]> = strides[1].iter().map(|&s| I::from_isize(s)).collect();

    match shape.len() {
        0 => {
            let v = unsafe { src.read() };
            unsafe { dst.write(D::cast_from(v)) };
        }
        1 => unsafe { gg_dim1(src, dst, shape[0], i_st[0], o_st[0], I::ZERO, I::ZERO) },
        2 => unsafe { gg_dim2(src, dst, &shape, &i_st, &o_st, I::ZERO, I::ZERO) },
        3 => unsafe { gg_dim3(src, dst, &shape, &i_st, &o_st, I::ZERO, I::ZERO) },
        4 => unsafe { gg_dim4(src, dst, &shape, &i_st, &o_st, I::ZERO, I::ZERO) },
        5 => unsafe { gg_dim5(src, dst, &shape, &i_st, &o_st, I::ZERO, I::ZERO) },
        rank => {
            // Inner five dims per chunk; the outer dims advance through
            // elem_to_loc on chunk boundaries only
            let chunk: usize = shape[rank - 5..].iter().product();
            let size: usize = shape.iter().product();
            for i in (0..size).step_by(chunk) {
                let i_off = I::from_isize(elem_to_loc(i, &shape, &strides[0]));
                let o_off = I::from_isize(elem_to_loc(i, &shape, &strides[1]));
                unsafe {
                    gg_dim5(
                        src,
                        dst,
                        &shape[rank - 5..],
                        &i_st[rank - 5..],
                        &o_st[rank - 5..],
                        i_off,
                        o_off,
                    )
                };
            }
        }
    }
}
