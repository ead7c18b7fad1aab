//! Generic object pool with thread-safe and thread-local variants.
//!
//! Provides `ObjectPool<T>` (mutex-based, shareable across threads) and
//! free functions `tl_acquire` / `tl_release` for thread-local pooling.
//! These replace the duplicated `CalculationStatePool` and `MatrixStatePool`
//! patterns found in `fastdoubling` and `matrix`.

use std::cell::RefCell;

use parking_lot::Mutex;

/// A thread-safe object pool backed by a `Mutex<Vec<T>>`.
///
/// Objects are acquired with a factory + reset closure, and released back
/// into the pool up to `max_size`. When the pool is empty, `acquire`
/// creates a new object via the factory; when the pool is full, `release`
/// drops the object.
pub struct ObjectPool<T> {
    pool: Mutex<Vec<T>>,
    max_size: usize,
}

impl<T: Send> ObjectPool<T> {
    /// Create a new pool with the given maximum capacity.
    #[must_use]
    pub fn new(max_size: usize) -> Self {
        Self {
            pool: Mutex::new(Vec::with_capacity(max_size)),
            max_size,
        }
    }

    /// Acquire an object from the pool, or create a new one via `factory`.
    /// If an object is reused from the pool, `reset` is called on it first.
    pub fn acquire(&self, factory: impl FnOnce() -> T, reset: impl FnOnce(&mut T)) -> T {
        let mut pool = self.pool.lock();
        match pool.pop() {
            Some(mut item) => {
                reset(&mut item);
                item
            }
            None => factory(),
        }
    }

    /// Return an object to the pool for reuse. If the pool is at capacity,
    /// the object is dropped.
    pub fn release(&self, item: T) {
        let mut pool = self.pool.lock();
        if pool.len() < self.max_size {
            pool.push(item);
        }
    }

    /// Get the number of objects currently available in the pool.
    #[must_use]
    pub fn available(&self) -> usize {
        self.pool.lock().len()
    }
}

/// Acquire an object from a thread-local pool.
///
/// If the pool has an object, it is popped and `reset` is called on it.
/// Otherwise a new object is created via `factory`.
pub fn tl_acquire<T>(
    pool: &RefCell<Vec<T>>,
    max: usize,
    factory: fn() -> T,
    reset: fn(&mut T),
) -> T {
    let _ = max; // max is only used by tl_release; accepted here for API symmetry
    let mut pool = pool.borrow_mut();
    match pool.pop() {
        Some(mut item) => {
            reset(&mut item);
            item
        }
        None => factory(),
    }
}

/// Return an object to a thread-local pool. If the pool has reached `max`
/// capacity, the object is dropped.
pub fn tl_release<T>(pool: &RefCell<Vec<T>>, max: usize, item: T) {
    let mut pool = pool.borrow_mut();
    if pool.len() < max {
        pool.push(item);
    }
}
