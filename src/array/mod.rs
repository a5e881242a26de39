//! Array views: dtype + shape + strides + offset over a shared buffer
//!
//! An [`Array`] is the unit the copy engine consumes and produces. It is a
//! deliberately small container: a shared byte buffer plus the layout
//! metadata needed to address it. Slicing, transposition, and broadcasting
//! are all expressed by constructing a new view over the same buffer with
//! different shape/strides/offset ([`Array::as_strided`]).
//!
//! Construction validates that a view stays inside its buffer; after that,
//! the copy engine trusts the metadata unconditionally.

mod buffer;
pub mod layout;

pub use buffer::Buffer;
pub use layout::{Shape, Strides, contiguous_strides, elem_to_loc, is_row_contiguous};

use crate::dispatch_dtype;
use crate::dtype::{DType, Element};
use crate::error::{Error, Result};
use layout::reachable_span;
use std::fmt;

/// Contiguity flags for an array view
///
/// `row_contiguous` means the view visits its buffer in dense row-major
/// order starting at its offset. `contiguous` means the reachable elements
/// form one dense region (in some order); a transposed dense matrix is
/// `contiguous` but not `row_contiguous`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Flags {
    /// Dense row-major order
    pub row_contiguous: bool,
    /// Reachable elements form one dense region
    pub contiguous: bool,
}

/// An N-dimensional strided view over a shared buffer
pub struct Array {
    buffer: Buffer,
    dtype: DType,
    shape: Shape,
    strides: Strides,
    offset: usize,
    data_size: usize,
    flags: Flags,
    donatable: bool,
}

impl Array {
    /// Create a dense row-major array from a slice of elements
    ///
    /// Returns an error if `data.len()` does not match the shape's element
    /// count.
    pub fn from_slice<T: Element>(data: &[T], shape: &[usize]) -> Result<Self> {
        let size: usize = shape.iter().product();
        if data.len() != size {
            return Err(Error::ElementCountMismatch {
                shape: shape.to_vec(),
                expected: size,
                got: data.len(),
            });
        }

        let bytes: &[u8] = bytemuck::cast_slice(data);
        let buffer = Buffer::new(bytes.len());
        if !bytes.is_empty() {
            unsafe {
                std::ptr::copy_nonoverlapping(bytes.as_ptr(), buffer.ptr(), bytes.len());
            }
        }

        Ok(Self {
            buffer,
            dtype: T::DTYPE,
            shape: shape.iter().copied().collect(),
            strides: contiguous_strides(shape),
            offset: 0,
            data_size: size,
            flags: Flags {
                row_contiguous: true,
                contiguous: true,
            },
            donatable: true,
        })
    }

    /// Create a rank-0 (scalar) array holding one element
    pub fn scalar<T: Element>(value: T) -> Self {
        let buffer = Buffer::new(std::mem::size_of::<T>());
        unsafe { (buffer.ptr() as *mut T).write(value) };
        Self {
            buffer,
            dtype: T::DTYPE,
            shape: Shape::new(),
            strides: Strides::new(),
            offset: 0,
            data_size: 1,
            flags: Flags {
                row_contiguous: true,
                contiguous: true,
            },
            donatable: true,
        }
    }

    /// Create a dense array of the given dtype filled with `value`
    ///
    /// The fill value is converted through `f64`, which is exact for every
    /// value test suites typically use; the copy engine itself never takes
    /// this path.
    pub fn full(shape: &[usize], value: f64, dtype: DType) -> Self {
        let size: usize = shape.iter().product();
        let buffer = Buffer::new(size * dtype.size_in_bytes());
        dispatch_dtype!(dtype, T => {
            let ptr = buffer.ptr() as *mut T;
            let fill = T::from_f64(value);
            for i in 0..size {
                unsafe { ptr.add(i).write(fill) };
            }
        });

        Self {
            buffer,
            dtype,
            shape: shape.iter().copied().collect(),
            strides: contiguous_strides(shape),
            offset: 0,
            data_size: size,
            flags: Flags {
                row_contiguous: true,
                contiguous: true,
            },
            donatable: true,
        }
    }

    /// Create a dense array of zeros
    pub fn zeros(shape: &[usize], dtype: DType) -> Self {
        Self::full(shape, 0.0, dtype)
    }

    /// Create a metadata-only array awaiting its data
    ///
    /// The buffer is an empty placeholder; [`copy`](crate::copy::copy)
    /// allocates or donates the real one. Layout is dense row-major.
    pub fn empty(shape: &[usize], dtype: DType) -> Self {
        let size: usize = shape.iter().product();
        Self {
            buffer: Buffer::empty(),
            dtype,
            shape: shape.iter().copied().collect(),
            strides: contiguous_strides(shape),
            offset: 0,
            data_size: size,
            flags: Flags {
                row_contiguous: true,
                contiguous: true,
            },
            donatable: false,
        }
    }

    /// Create a new view of this array's buffer with explicit layout
    ///
    /// This is how transposes, slices, broadcasts, and reversed views are
    /// expressed. The view is validated against the buffer once, here;
    /// views are never donatable (the buffer is shared with `self`).
    pub fn as_strided(&self, shape: &[usize], strides: &[isize], offset: usize) -> Result<Self> {
        if shape.len() != strides.len() {
            return Err(Error::RankMismatch {
                shape_rank: shape.len(),
                strides_rank: strides.len(),
            });
        }

        // A view with a 0 dim addresses nothing, so no bounds apply
        let size: usize = shape.iter().product();
        let (lo, hi) = reachable_span(shape, strides);
        if size > 0 {
            if (offset as isize) + lo < 0 {
                return Err(Error::ViewBelowBuffer {
                    below: (-(offset as isize + lo)) as usize,
                });
            }
            let available = self.buffer.size_bytes() / self.dtype.size_in_bytes();
            let needed = (offset as isize + hi + 1) as usize;
            if needed > available {
                return Err(Error::ViewOutOfBounds { needed, available });
            }
        }

        let row_contiguous = offset == 0 && is_row_contiguous(shape, strides);
        Ok(Self {
            buffer: self.buffer.share(),
            dtype: self.dtype,
            shape: shape.iter().copied().collect(),
            strides: strides.iter().copied().collect(),
            offset,
            data_size: if size == 0 { 0 } else { (hi - lo + 1) as usize },
            flags: Flags {
                row_contiguous,
                contiguous: row_contiguous,
            },
            donatable: false,
        })
    }

    /// Element type
    #[inline]
    pub fn dtype(&self) -> DType {
        self.dtype
    }

    /// Shape: size along each dimension
    #[inline]
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// Per-dimension element strides
    #[inline]
    pub fn strides(&self) -> &[isize] {
        &self.strides
    }

    /// Element offset of the view's first logical element in its buffer
    #[inline]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Number of dimensions (rank)
    #[inline]
    pub fn ndim(&self) -> usize {
        self.shape.len()
    }

    /// Logical number of elements (product of the shape)
    #[inline]
    pub fn size(&self) -> usize {
        self.shape.iter().product()
    }

    /// Number of distinct elements reachable through the strides
    ///
    /// May differ from [`size`](Self::size): smaller for broadcast views
    /// (repeated access), equal for dense ones.
    #[inline]
    pub fn data_size(&self) -> usize {
        self.data_size
    }

    /// Size of one element in bytes
    #[inline]
    pub fn itemsize(&self) -> usize {
        self.dtype.size_in_bytes()
    }

    /// Logical size of the view in bytes
    #[inline]
    pub fn nbytes(&self) -> usize {
        self.size() * self.itemsize()
    }

    /// Contiguity flags
    #[inline]
    pub fn flags(&self) -> Flags {
        self.flags
    }

    /// Whether the view is dense row-major
    #[inline]
    pub fn is_row_contiguous(&self) -> bool {
        self.flags.row_contiguous
    }

    /// Whether this array's buffer may be donated to a copy destination
    ///
    /// Requires both the donatable bit (set for arrays that own freshly
    /// created data, cleared for views) and a uniquely referenced buffer.
    #[inline]
    pub fn is_donatable(&self) -> bool {
        self.donatable && self.buffer.is_unique()
    }

    /// Raw base pointer of the backing buffer
    ///
    /// Exposed so callers can observe donation (pointer identity); all
    /// element access goes through the copy engine.
    #[inline]
    pub fn data_ptr(&self) -> *const u8 {
        self.buffer.ptr()
    }

    /// Install a freshly allocated buffer with dense row-major layout
    pub(crate) fn set_data(&mut self, buffer: Buffer) {
        self.strides = contiguous_strides(&self.shape);
        self.offset = 0;
        self.data_size = self.size();
        self.flags = Flags {
            row_contiguous: true,
            contiguous: true,
        };
        self.donatable = true;
        self.buffer = buffer;
    }

    /// Install a buffer with an explicit access pattern
    ///
    /// Used by the `Vector` strategy, where the destination inherits the
    /// source's strides and flags over a buffer of `data_size` elements.
    pub(crate) fn set_data_with(
        &mut self,
        buffer: Buffer,
        data_size: usize,
        strides: Strides,
        flags: Flags,
    ) {
        self.strides = strides;
        self.offset = 0;
        self.data_size = data_size;
        self.flags = flags;
        self.donatable = true;
        self.buffer = buffer;
    }

    /// Take over another array's buffer and access pattern (donation)
    ///
    /// Element strides carry over directly because donation requires equal
    /// element sizes. The source must be treated as consumed.
    pub(crate) fn copy_shared_buffer(&mut self, src: &Array) {
        self.buffer = src.buffer.share();
        self.strides = src.strides.clone();
        self.offset = src.offset;
        self.data_size = src.data_size;
        self.flags = src.flags;
        self.donatable = true;
    }

    /// Typed pointer to the view's first logical element
    #[inline]
    pub(crate) fn data<T: Element>(&self) -> *const T {
        debug_assert_eq!(T::DTYPE, self.dtype);
        // wrapping_add keeps the empty-placeholder (null, offset 0) case
        // well defined; kernels never dereference zero-sized views
        (self.buffer.ptr() as *const T).wrapping_add(self.offset)
    }

    /// Typed mutable pointer to the view's first logical element
    #[inline]
    pub(crate) fn data_mut<T: Element>(&mut self) -> *mut T {
        debug_assert_eq!(T::DTYPE, self.dtype);
        (self.buffer.ptr() as *mut T).wrapping_add(self.offset)
    }

    /// Copy the view's elements out in buffer order
    ///
    /// Requires a dense row-major view, so buffer order equals logical
    /// order.
    pub fn to_vec<T: Element>(&self) -> Vec<T> {
        debug_assert_eq!(T::DTYPE, self.dtype);
        debug_assert!(self.flags.row_contiguous);
        let size = self.size();
        let mut out = vec![T::zeroed(); size];
        if size > 0 {
            unsafe {
                std::ptr::copy_nonoverlapping(self.data::<T>(), out.as_mut_ptr(), size);
            }
        }
        out
    }
}

impl fmt::Debug for Array {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Array")
            .field("dtype", &self.dtype)
            .field("shape", &self.shape.as_slice())
            .field("strides", &self.strides.as_slice())
            .field("offset", &self.offset)
            .field("data_size", &self.data_size)
            .field("flags", &self.flags)
            .finish()
    }
}
