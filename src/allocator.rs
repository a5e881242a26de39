//! Blocking buffer allocator with a configurable memory budget
//!
//! Destination buffers for the copy engine come from this allocator. It
//! tracks outstanding bytes against a budget; when a request would exceed
//! the budget, the allocating thread *blocks* until enough memory is
//! released. There is no retry, no timeout, and no error path for
//! scarcity - backpressure is the policy.
//!
//! The default budget is unlimited. [`set_memory_limit`] installs a cap,
//! which is mainly useful for tests and memory-constrained embedders.
//!
//! Allocations are 64-byte aligned for SIMD compatibility and zeroed.

use parking_lot::{Condvar, Mutex};
use std::alloc::{Layout, alloc_zeroed, dealloc, handle_alloc_error};
use std::ptr;

/// Alignment of every buffer, in bytes (AVX-512 friendly)
pub const BUFFER_ALIGN: usize = 64;

struct BudgetState {
    in_use: usize,
    limit: usize,
}

/// Byte budget shared by all buffers, with blocking reservation
///
/// A reservation that does not fit waits on a condvar until releases make
/// room. A request larger than the entire budget is admitted once nothing
/// else is outstanding, so a single oversized allocation cannot deadlock.
pub(crate) struct MemoryBudget {
    state: Mutex<BudgetState>,
    freed: Condvar,
}

impl MemoryBudget {
    pub(crate) const fn new() -> Self {
        Self {
            state: Mutex::new(BudgetState {
                in_use: 0,
                limit: usize::MAX,
            }),
            freed: Condvar::new(),
        }
    }

    /// Block until `bytes` fit under the limit, then reserve them
    pub(crate) fn reserve(&self, bytes: usize) {
        let mut state = self.state.lock();
        while state.in_use.saturating_add(bytes) > state.limit && state.in_use > 0 {
            self.freed.wait(&mut state);
        }
        state.in_use += bytes;
    }

    /// Return `bytes` to the budget and wake waiting allocations
    pub(crate) fn release(&self, bytes: usize) {
        let mut state = self.state.lock();
        state.in_use -= bytes;
        drop(state);
        self.freed.notify_all();
    }

    pub(crate) fn set_limit(&self, limit: usize) -> usize {
        let mut state = self.state.lock();
        let old = state.limit;
        state.limit = limit;
        old
    }

    pub(crate) fn in_use(&self) -> usize {
        self.state.lock().in_use
    }
}

static GLOBAL_BUDGET: MemoryBudget = MemoryBudget::new();

/// Set the global memory budget in bytes, returning the previous limit
///
/// Allocations already outstanding are unaffected; new allocations block
/// until they fit under the new limit.
pub fn set_memory_limit(limit: usize) -> usize {
    GLOBAL_BUDGET.set_limit(limit)
}

/// Total bytes currently held by live buffers
pub fn allocated_bytes() -> usize {
    GLOBAL_BUDGET.in_use()
}

/// Allocate `size_bytes` of zeroed, aligned memory, blocking until the
/// budget admits the request
///
/// Returns a null pointer for zero-sized requests. Panics (via
/// `handle_alloc_error`) only if the system allocator itself fails.
pub(crate) fn malloc_or_wait(size_bytes: usize) -> *mut u8 {
    if size_bytes == 0 {
        return ptr::null_mut();
    }

    GLOBAL_BUDGET.reserve(size_bytes);

    let layout =
        Layout::from_size_align(size_bytes, BUFFER_ALIGN).expect("invalid allocation layout");
    let raw = unsafe { alloc_zeroed(layout) };
    if raw.is_null() {
        handle_alloc_error(layout);
    }
    raw
}

/// Free memory obtained from [`malloc_or_wait`] and return its bytes to
/// the budget
pub(crate) fn free(raw: *mut u8, size_bytes: usize) {
    if raw.is_null() || size_bytes == 0 {
        return;
    }

    let layout =
        Layout::from_size_align(size_bytes, BUFFER_ALIGN).expect("invalid allocation layout");
    unsafe {
        dealloc(raw, layout);
    }

    GLOBAL_BUDGET.release(size_bytes);
}
