use std::sync::Mutex;

use hvl_types::SequenceId;

/// Monotonic allocator for record sequence ids.
///
/// The counter starts at 0 and only ever moves forward; the first id
/// handed out is 1. Allocation is a two-step protocol tied to the insert
/// it pays for:
///
/// 1. [`reserve`](Self::reserve) returns `current + 1` without advancing
///    the counter;
/// 2. [`commit`](Self::commit) advances the counter to the reserved id
///    once the paired insert has succeeded.
///
/// An operation that fails between the two steps simply never commits, so
/// no id is burned and the next creation reserves the same id again. The
/// environment serializes operations, so a reservation can never be
/// observed by a concurrent caller.
pub struct SequenceAllocator {
    current: Mutex<u64>,
}

impl SequenceAllocator {
    /// A fresh allocator; the first reserved id will be 1.
    pub fn new() -> Self {
        Self::with_current(0)
    }

    /// Resume from a persisted counter value (e.g. a loaded snapshot).
    pub fn with_current(current: u64) -> Self {
        Self {
            current: Mutex::new(current),
        }
    }

    /// The next id to hand out, without advancing the counter.
    pub fn reserve(&self) -> SequenceId {
        let current = self.current.lock().expect("lock poisoned");
        SequenceId::new(*current + 1)
    }

    /// Advance the counter to a reserved id after its insert succeeded.
    pub fn commit(&self, id: SequenceId) {
        let mut current = self.current.lock().expect("lock poisoned");
        debug_assert_eq!(id.value(), *current + 1, "commit out of reserve order");
        *current = id.value();
    }

    /// The last committed id value (0 if nothing was ever committed).
    pub fn current(&self) -> u64 {
        *self.current.lock().expect("lock poisoned")
    }
}

impl Default for SequenceAllocator {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for SequenceAllocator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SequenceAllocator")
            .field("current", &self.current())
            .finish()
    }
}
