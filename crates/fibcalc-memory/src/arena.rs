//! Bump arena allocator for temporary allocations.
//!
//! Uses bumpalo for O(1) allocation of temporaries during Fibonacci computation.
//! Supports both typed allocations (via `bump()`) and slice allocations for FFT.

use bumpalo::Bump;

/// Unified bump arena for calculation and FFT temporaries.
pub struct BumpArena {
    bump: Bump,
}

impl BumpArena {
    /// Create a new arena with default capacity.
    #[must_use]
    pub fn new() -> Self {
        Self { bump: Bump::new() }
    }

    /// Create a new arena with the given initial capacity in bytes.
    #[must_use]
    pub fn with_capacity(bytes: usize) -> Self {
        Self {
            bump: Bump::with_capacity(bytes),
        }
    }

    /// Allocate a zero-filled slice of u64 values (for FFT scratch buffers).
    pub fn alloc_slice(&self, len: usize) -> &mut [u64] {
        self.bump.alloc_slice_fill_default(len)
    }

    /// Get a reference to the underlying bumpalo allocator (for typed allocations).
    #[must_use]
    pub fn bump(&self) -> &Bump {
        &self.bump
    }

    /// Reset the arena, deallocating all objects at once.
    pub fn reset(&mut self) {
        self.bump.reset();
    }

    /// Get the number of bytes currently allocated.
    #[must_use]
    pub fn allocated_bytes(&self) -> usize {
        self.bump.allocated_bytes()
    }
}

impl Default for BumpArena {
    fn default() -> Self {
        Self::new()
    }
}
