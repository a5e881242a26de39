//! Contiguous copy kernels: scalar broadcast and flat element-wise
//!
//! These are the fast paths. Neither consults shapes or strides; both walk
//! flat element counts and cast each value through [`CastFrom`].

use crate::dtype::CastFrom;

/// Broadcast the single element at `src` to `size` destination elements
///
/// # Safety
///
/// `src` must be readable for one element when `size > 0`, and `dst` must
/// be writable for `size` elements.
pub(crate) unsafe fn copy_single<S, D>(src: *const S, dst: *mut D, size: usize)
where
    S: Copy,
    D: CastFrom<S> + Copy,
{
    if size == 0 {
        return;
    }
    let value = D::cast_from(unsafe { src.read() });
    for i in 0..size {
        unsafe { dst.add(i).write(value) };
    }
}

/// Copy `size` elements from `src` to `dst`, casting each
///
/// Reads before writing at each position, so `src` and `dst` may alias
/// exactly (the in-place same-itemsize cast path relies on this).
///
/// # Safety
///
/// `src` must be readable and `dst` writable for `size` elements.
pub(crate) unsafe fn copy_vector<S, D>(src: *const S, dst: *mut D, size: usize)
where
    S: Copy,
    D: CastFrom<S>,
{
    for i in 0..size {
        let value = unsafe { src.add(i).read() };
        unsafe { dst.add(i).write(D::cast_from(value)) };
    }
}
