//! Generic thread-local object pool.
//!
//! Provides `tl_acquire` and `tl_release` free functions for thread-local pooling.
//! These replace duplicated pool patterns in `fastdoubling` and `matrix`.

use std::cell::RefCell;

/// Acquire an object from a thread-local pool.
///
/// If the pool has an object, it is popped and `reset` is called on it.
/// Otherwise a new object is created via `factory`.
#[inline]
pub fn tl_acquire<T>(
    pool: &RefCell<Vec<T>>,
    factory: fn() -> T,
    reset: fn(&mut T),
) -> T {
    let mut pool = pool.borrow_mut();
    match pool.pop() {
        Some(mut item) => {
            reset(&mut item);
            item
        }
        None => factory(),
    }
}

/// Return an object to a thread-local pool.
///
/// If the pool has reached `max` capacity, the object is dropped.
#[inline]
pub fn tl_release<T>(pool: &RefCell<Vec<T>>, max: usize, item: T) {
    let mut pool = pool.borrow_mut();
    if pool.len() < max {
        pool.push(item);
    }
}
