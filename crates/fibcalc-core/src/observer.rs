//! Observer pattern for progress tracking.
//!
//! Implements the Observer pattern with a lock-free `Freeze()` mechanism
//! for high-frequency updates in hot loops.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;

use crate::progress::ProgressUpdate;

/// Observer trait for receiving progress updates.
pub trait ProgressObserver: Send + Sync {
    /// Receive a progress update.
    fn on_progress(&self, update: &ProgressUpdate);

    /// Create a frozen snapshot for lock-free access in hot loops.
    fn freeze(&self) -> FrozenObserver;
}

/// A frozen observer that can be used in hot loops without locks.
///
/// Stores progress as atomic values for lock-free reads.
pub struct FrozenObserver {
    progress: Arc<AtomicU64>,
    threshold: f64,
}

impl FrozenObserver {
    /// Create a new frozen observer with the given reporting threshold.
    #[must_use]
    pub fn new(threshold: f64) -> Self {
        Self {
            progress: Arc::new(AtomicU64::new(0)),
            threshold,
        }
    }

    /// Check if progress has changed enough to warrant reporting.
    #[inline]
    #[must_use]
    pub fn should_report(&self, new_progress: f64) -> bool {
        let current = f64::from_bits(self.progress.load(Ordering::Relaxed));
        (new_progress - current) >= self.threshold
    }

    /// Update the stored progress value.
    pub fn update(&self, new_progress: f64) {
        self.progress
            .store(new_progress.to_bits(), Ordering::Relaxed);
    }

    /// Get the current progress value.
    #[must_use]
    pub fn current(&self) -> f64 {
        f64::from_bits(self.progress.load(Ordering::Relaxed))
    }
}

/// An immutable snapshot of a `ProgressSubject`'s observer list at the
/// moment `freeze` was called.
///
/// Observers registered after the snapshot was taken are never seen by
/// `notify`, even if the originating subject is mutated concurrently --
/// the snapshot holds its own `Arc` to the list, not a reference back to
/// the subject.
pub struct ObserverSnapshot {
    observers: Arc<Vec<Arc<dyn ProgressObserver>>>,
}

impl ObserverSnapshot {
    /// Notify every observer captured in this snapshot.
    pub fn notify(&self, update: &ProgressUpdate) {
        for observer in self.observers.iter() {
            observer.on_progress(update);
        }
    }

    /// Number of observers captured in this snapshot.
    #[must_use]
    pub fn count(&self) -> usize {
        self.observers.len()
    }
}

/// Subject that manages a collection of observers.
///
/// Registration is copy-on-write: `register` replaces the whole backing
/// `Vec` behind a fresh `Arc` rather than mutating it in place, so a
/// snapshot taken via `freeze_snapshot` is unaffected by later
/// registrations.
pub struct ProgressSubject {
    observers: RwLock<Arc<Vec<Arc<dyn ProgressObserver>>>>,
}

impl ProgressSubject {
    /// Create a new subject with no observers.
    #[must_use]
    pub fn new() -> Self {
        Self {
            observers: RwLock::new(Arc::new(Vec::new())),
        }
    }

    /// Register an observer.
    pub fn register(&self, observer: Arc<dyn ProgressObserver>) {
        let mut guard = self.observers.write();
        let mut next = (**guard).clone();
        next.push(observer);
        *guard = Arc::new(next);
    }

    /// Unregister all observers.
    pub fn clear(&self) {
        *self.observers.write() = Arc::new(Vec::new());
    }

    /// Notify all observers of a progress update.
    pub fn notify(&self, update: &ProgressUpdate) {
        let observers = Arc::clone(&self.observers.read());
        for observer in observers.iter() {
            observer.on_progress(update);
        }
    }

    /// Capture an immutable snapshot of the currently registered observers.
    ///
    /// `calc_index` is accepted for symmetry with the per-calculator
    /// freeze call sites; the snapshot itself is not indexed by it.
    #[must_use]
    pub fn freeze_snapshot(&self, _calc_index: usize) -> ObserverSnapshot {
        ObserverSnapshot {
            observers: Arc::clone(&self.observers.read()),
        }
    }

    /// Get the number of registered observers.
    #[must_use]
    pub fn count(&self) -> usize {
        self.observers.read().len()
    }
}

impl Default for ProgressSubject {
    fn default() -> Self {
        Self::new()
    }
}
