//! Single-stride kernels: strided source into a contiguous destination
//!
//! The destination is written sequentially; only the source offset is
//! tracked. Ranks 1 through 4 keep the per-dimension carry adjustment
//! inline in the loop nest; ranks 5 through 7 hoist the adjustments into
//! locals before entering the nest. Anything deeper falls back to
//! [`elem_to_loc`] once per element.

use super::index::CopyIndex;
use crate::array::layout::elem_to_loc;
use crate::copy::collapse::collapse_contiguous_dims;
use crate::dtype::CastFrom;
use smallvec::SmallVec;

unsafe fn general_dim1<S, D, I>(src: *const S, dst: *mut D, shape: &[usize], st: &[I])
where
    S: Copy,
    D: CastFrom<S>,
    I: CopyIndex,
{
    let s0 = st[0];
    let mut src_idx = I::ZERO;
    let mut dst_off = 0usize;
    for _ in 0..shape[0] {
        let v = unsafe { src.offset(src_idx.to_isize()).read() };
        unsafe { dst.add(dst_off).write(D::cast_from(v)) };
        dst_off += 1;
        src_idx += s0;
    }
}

unsafe fn general_dim2<S, D, I>(src: *const S, dst: *mut D, shape: &[usize], st: &[I])
where
    S: Copy,
    D: CastFrom<S>,
    I: CopyIndex,
{
    let (s0, s1) = (st[0], st[1]);
    let mut src_idx = I::ZERO;
    let mut dst_off = 0usize;
    for _ in 0..shape[0] {
        for _ in 0..shape[1] {
            let v = unsafe { src.offset(src_idx.to_isize()).read() };
            unsafe { dst.add(dst_off).write(D::cast_from(v)) };
            dst_off += 1;
            src_idx += s1;
        }
        src_idx += s0 - s1 * I::from_usize(shape[1]);
    }
}

unsafe fn general_dim3<S, D, I>(src: *const S, dst: *mut D, shape: &[usize], st: &[I])
where
    S: Copy,
    D: CastFrom<S>,
    I: CopyIndex,
{
    let (s0, s1, s2) = (st[0], st[1], st[2]);
    let mut src_idx = I::ZERO;
    let mut dst_off = 0usize;
    for _ in 0..shape[0] {
        for _ in 0..shape[1] {
            for _ in 0..shape[2] {
                let v = unsafe { src.offset(src_idx.to_isize()).read() };
                unsafe { dst.add(dst_off).write(D::cast_from(v)) };
                dst_off += 1;
                src_idx += s2;
            }
            src_idx += s1 - s2 * I::from_usize(shape[2]);
        }
        src_idx += s0 - s1 * I::from_usize(shape[1]);
    }
}

unsafe fn general_dim4<S, D, I>(src: *const S, dst: *mut D, shape: &[usize], st: &[I])
where
    S: Copy,
    D: CastFrom<S>,
    I: CopyIndex,
{
    let (s0, s1, s2, s3) = (st[0], st[1], st[2], st[3]);
    let mut src_idx = I::ZERO;
    let mut dst_off = 0usize;
    for _ in 0..shape[0] {
        for _ in 0..shape[1] {
            for _ in 0..shape[2] {
                for _ in 0..shape[3] {
                    let v = unsafe { src.offset(src_idx.to_isize()).read() };
                    unsafe { dst.add(dst_off).write(D::cast_from(v)) };
                    dst_off += 1;
                    src_idx += s3;
                }
                src_idx += s2 - s3 * I::from_usize(shape[3]);
            }
            src_idx += s1 - s2 * I::from_usize(shape[2]);
        }
        src_idx += s0 - s1 * I::from_usize(shape[1]);
    }
}

unsafe fn general_dim5<S, D, I>(src: *const S, dst: *mut D, shape: &[usize], st: &[I])
where
    S: Copy,
    D: CastFrom<S>,
    I: CopyIndex,
{
    let adj0 = st[0] - st[1] * I::from_usize(shape[1]);
    let adj1 = st[1] - st[2] * I::from_usize(shape[2]);
    let adj2 = st[2] - st[3] * I::from_usize(shape[3]);
    let adj3 = st[3] - st[4] * I::from_usize(shape[4]);
    let s4 = st[4];

    let mut src_idx = I::ZERO;
    let mut dst_off = 0usize;
    for _ in 0..shape[0] {
        for _ in 0..shape[1] {
            for _ in 0..shape[2] {
                for _ in 0..shape[3] {
                    for _ in 0..shape[4] {
                        let v = unsafe { src.offset(src_idx.to_isize()).read() };
                        unsafe { dst.add(dst_off).write(D::cast_from(v)) };
                        dst_off += 1;
                        src_idx += s4;
                    }
                    src_idx += adj3;
                }
                src_idx += adj2;
            }
            src_idx += adj1;
        }
        src_idx += adj0;
    }
}

unsafe fn general_dim6<S, D, I>(src: *const S, dst: *mut D, shape: &[usize], st: &[I])
where
    S: Copy,
    D: CastFrom<S>,
    I: CopyIndex,
{
    let adj0 = st[0] - st[1] * I::from_usize(shape[1]);
    let adj1 = st[1] - st[2] * I::from_usize(shape[2]);
    let adj2 = st[2] - st[3] * I::from_usize(shape[3]);
    let adj3 = st[3] - st[4] * I::from_usize(shape[4]);
    let adj4 = st[4] - st[5] * I::from_usize(shape[5]);
    let s5 = st[5];

    let mut src_idx = I::ZERO;
    let mut dst_off = 0usize;
    for _ in 0..shape[0] {
        for _ in 0..shape[1] {
            for _ in 0..shape[2] {
                for _ in 0..shape[3] {
                    for _ in 0..shape[4] {
                        for _ in 0..shape[5] {
                            let v = unsafe { src.offset(src_idx.to_isize()).read() };
                            unsafe { dst.add(dst_off).write(D::cast_from(v)) };
                            dst_off += 1;
                            src_idx += s5;
                        }
                        src_idx += adj4;
                    }
                    src_idx += adj3;
                }
                src_idx += adj2;
            }
            src_idx += adj1;
        }
        src_idx += adj0;
    }
}

unsafe fn general_dim7<S, D, I>(src: *const S, dst: *mut D, shape: &[usize], st: &[I])
where
    S: Copy,
    D: CastFrom<S>,
    I: CopyIndex,
{
    let adj0 = st[0] - st[1] * I::from_usize(shape[1]);
    let adj1 = st[1] - st[2] * I::from_usize(shape[2]);
    let adj2 = st[2] - st[3] * I::from_usize(shape[3]);
    let adj3 = st[3] - st[4] * I::from_usize(shape[4]);
    let adj4 = st[4] - st[5] * I::from_usize(shape[5]);
    let adj5 = st[5] - st[6] * I::from_usize(shape[6]);
    let s6 = st[6];

    let mut src_idx = I::ZERO;
    let mut dst_off = 0usize;
    for _ in 0..shape[0] {
        for _ in 0..shape[1] {
            for _ in 0..shape[2] {
                for _ in 0..shape[3] {
                    for _ in 0..shape[4] {
                        for _ in 0..shape[5] {
                            for _ in 0..shape[6] {
                                let v = unsafe { src.offset(src_idx.to_isize()).read() };
                                unsafe { dst.add(dst_off).write(D::cast_from(v)) };
                                dst_off += 1;
                                src_idx += s6;
                            }
                            src_idx += adj5;
                        }
                        src_idx += adj4;
                    }
                    src_idx += adj3;
                }
                src_idx += adj2;
            }
            src_idx += adj1;
        }
        src_idx += adj0;
    }
}

/// Copy a strided source into a contiguous destination
///
/// `src` points at the source view's first logical element; `dst` at the
/// start of the contiguous output. Collapses jointly contiguous source
/// dimensions first, then runs the kernel specialized for the collapsed
/// rank.
///
/// # Safety
///
/// Every source offset reachable through `shape`/`i_strides` must be
/// readable from `src`, and `dst` must be writable for the shape's element
/// count.
pub(crate) unsafe fn copy_general<S, D, I>(
    src: *const S,
    dst: *mut D,
    shape: &[usize],
    i_strides: &[isize],
) where
    S: Copy,
    D: CastFrom<S>,
    I: CopyIndex,
{
    let (shape, strides) = collapse_contiguous_dims(shape, &[i_strides]);
    let st: SmallVec<[I; 8]> = strides[0].iter().map(|&s| I::from_isize(s)).collect();

    match shape.len() {
        // Every dim had size 1: a single element remains
        0 => {
            let v = unsafe { src.read() };
            unsafe { dst.write(D::cast_from(v)) };
        }
        1 => unsafe { general_dim1(src, dst, &shape, &st) },
        2 => unsafe { general_dim2(src, dst, &shape, &st) },
        3 => unsafe { general_dim3(src, dst, &shape, &st) },
        4 => unsafe { general_dim4(src, dst, &shape, &st) },
        5 => unsafe { general_dim5(src, dst, &shape, &st) },
        6 => unsafe { general_dim6(src, dst, &shape, &st) },
        7 => unsafe { general_dim7(src, dst, &shape, &st) },
        _ => {
            let size: usize = shape.iter().product();
            for i in 0..size {
                let loc = elem_to_loc(i, &shape, &strides[0]);
                let v = unsafe { src.offset(loc).read() };
                unsafe { dst.add(i).write(D::cast_from(v)) };
            }
        }
    }
}
