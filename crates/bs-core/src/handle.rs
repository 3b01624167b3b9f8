//! `SnapshotHandle<T>` — a shared slot holding an immutable snapshot that is
//! published and replaced atomically.
//!
//! Readers obtain an `Arc<T>` and keep using it for as long as they like;
//! writers never mutate a published value, they swap in a new `Arc`.  A
//! reader therefore always sees one complete snapshot, never a mix of two.
//!
//! | operation | effect |
//! |-----------|--------|
//! | [`get_or_init`][SnapshotHandle::get_or_init] | compute once under the lock, then publish |
//! | [`clear`][SnapshotHandle::clear] | drop the snapshot; next `get_or_init` recomputes |

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// A clonable, thread-safe slot holding an optional `Arc<T>` snapshot.
///
/// Clones share the same slot, so publishing through one clone is visible
/// through all of them.
pub struct SnapshotHandle<T> {
    inner: Arc<Mutex<Option<Arc<T>>>>,
}

impl<T> Clone for SnapshotHandle<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> SnapshotHandle<T> {
    /// Create an empty handle.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(None)),
        }
    }

    // The slot only ever holds a fully-built `Arc`, so a panic elsewhere
    // while the lock was held cannot leave it half-written.
    fn slot(&self) -> MutexGuard<'_, Option<Arc<T>>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Return the current snapshot, computing and publishing it with `init`
    /// if the slot is empty.
    ///
    /// The lock is held while `init` runs, so concurrent first accesses
    /// compute exactly once and all observe the same snapshot.
    pub fn get_or_init<F>(&self, init: F) -> Arc<T>
    where
        F: FnOnce() -> T,
    {
        let mut guard = self.slot();
        if let Some(current) = guard.as_ref() {
            return Arc::clone(current);
        }
        let fresh = Arc::new(init());
        *guard = Some(Arc::clone(&fresh));
        fresh
    }

    /// Drop the current snapshot.  Outstanding `Arc`s stay valid.
    pub fn clear(&self) {
        *self.slot() = None;
    }
}

impl<T> Default for SnapshotHandle<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for SnapshotHandle<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.slot().as_ref() {
            Some(v) => write!(f, "SnapshotHandle({:?})", v),
            None => write!(f, "SnapshotHandle(empty)"),
        }
    }
}
