//! Reference-counted byte buffers backing array views
//!
//! A `Buffer` wraps one aligned allocation from the blocking allocator
//! with `Arc`-based sharing. Cloning shares the allocation (zero-copy);
//! the memory is returned to the allocator when the last reference drops.
//! Uniqueness of the reference is what makes a source buffer eligible for
//! donation to a copy destination.

use crate::allocator;
use std::fmt;
use std::ptr;
use std::sync::Arc;

struct BufferInner {
    raw: *mut u8,
    size_bytes: usize,
}

// The allocation is plain bytes; all typed access goes through the copy
// engine, which owns the aliasing contracts.
unsafe impl Send for BufferInner {}
unsafe impl Sync for BufferInner {}

impl Drop for BufferInner {
    fn drop(&mut self) {
        allocator::free(self.raw, self.size_bytes);
    }
}

/// Shared, aligned byte buffer
pub struct Buffer {
    inner: Arc<BufferInner>,
}

impl Buffer {
    /// Allocate a zeroed buffer of `size_bytes`, blocking until the
    /// allocator's memory budget admits the request
    pub fn new(size_bytes: usize) -> Self {
        let raw = allocator::malloc_or_wait(size_bytes);
        Self {
            inner: Arc::new(BufferInner { raw, size_bytes }),
        }
    }

    /// Placeholder buffer with no storage
    ///
    /// Used by metadata-only arrays whose data the copy engine will
    /// allocate or donate later.
    pub fn empty() -> Self {
        Self {
            inner: Arc::new(BufferInner {
                raw: ptr::null_mut(),
                size_bytes: 0,
            }),
        }
    }

    /// Raw base pointer (null for empty buffers)
    #[inline]
    pub(crate) fn ptr(&self) -> *mut u8 {
        self.inner.raw
    }

    /// Size of the allocation in bytes
    #[inline]
    pub fn size_bytes(&self) -> usize {
        self.inner.size_bytes
    }

    /// Whether this is the only reference to the allocation
    #[inline]
    pub fn is_unique(&self) -> bool {
        Arc::strong_count(&self.inner) == 1
    }

    /// Share the allocation (increments the reference count; zero-copy)
    #[inline]
    pub fn share(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl fmt::Debug for Buffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Buffer")
            .field("ptr", &format!("{:p}", self.inner.raw))
            .field("size_bytes", &self.inner.size_bytes)
            .field("refs", &Arc::strong_count(&self.inner))
            .finish()
    }
}
