//! The allocation seam of [`GrowableBuffer`](crate::GrowableBuffer).
//!
//! Every change of capacity goes through an [`Allocator`]. The default,
//! [`Global`], asks the global allocator through `Vec::try_reserve_exact`.
//! [`Counting`] and [`Limited`] wrap another allocator to observe growth or to
//! refuse it past a fixed size.

use alloc::vec::Vec;

use crate::BufferError;

/// Grows the backing storage of a buffer.
pub trait Allocator {
    /// Make room for at least `new_capacity` bytes in `storage`.
    ///
    /// Callers only ask for `new_capacity > storage.len()`. On `Ok`,
    /// `storage.capacity() >= new_capacity` and the contents of `storage` are
    /// unchanged.
    ///
    /// # Errors
    ///
    /// [`BufferError::AllocationFailure`] when the request cannot be met.
    /// `storage` must then be left exactly as it was.
    fn grow(&mut self, storage: &mut Vec<u8>, new_capacity: usize) -> Result<(), BufferError>;
}

impl<A: Allocator + ?Sized> Allocator for &mut A {
    fn grow(&mut self, storage: &mut Vec<u8>, new_capacity: usize) -> Result<(), BufferError> {
        (**self).grow(storage, new_capacity)
    }
}

/// The global heap.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Global;

impl Allocator for Global {
    fn grow(&mut self, storage: &mut Vec<u8>, new_capacity: usize) -> Result<(), BufferError> {
        let additional = new_capacity.saturating_sub(storage.len());
        // `try_reserve_exact` leaves `storage` alone when it fails.
        storage
            .try_reserve_exact(additional)
            .map_err(|_| BufferError::AllocationFailure {
                requested: new_capacity,
            })
    }
}

/// Counts the growth requests that reach the wrapped allocator.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Counting<A = Global> {
    inner: A,
    reallocations: usize,
    failures: usize,
}

impl<A> Counting<A> {
    /// Wrap `inner` with both counters at zero.
    #[must_use]
    pub fn new(inner: A) -> Self {
        Self {
            inner,
            reallocations: 0,
            failures: 0,
        }
    }

    /// Successful growths so far.
    #[must_use]
    pub fn reallocations(&self) -> usize {
        self.reallocations
    }

    /// Failed growths so far.
    #[must_use]
    pub fn failures(&self) -> usize {
        self.failures
    }

    /// Set both counters back to zero.
    pub fn reset(&mut self) {
        self.reallocations = 0;
        self.failures = 0;
    }

    /// The wrapped allocator.
    #[must_use]
    pub fn inner(&self) -> &A {
        &self.inner
    }

    /// The wrapped allocator, mutably.
    pub fn inner_mut(&mut self) -> &mut A {
        &mut self.inner
    }
}

impl<A: Allocator> Allocator for Counting<A> {
    fn grow(&mut self, storage: &mut Vec<u8>, new_capacity: usize) -> Result<(), BufferError> {
        let result = self.inner.grow(storage, new_capacity);
        if result.is_ok() {
            self.reallocations += 1;
        } else {
            self.failures += 1;
        }
        result
    }
}

/// Refuses to grow past `limit` bytes of capacity.
///
/// Requests within the limit are passed to the wrapped allocator. Anything
/// larger fails with [`BufferError::AllocationFailure`] before the wrapped
/// allocator is consulted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Limited<A = Global> {
    inner: A,
    limit: usize,
}

impl Limited<Global> {
    /// Cap the global heap at `limit` bytes per buffer.
    #[must_use]
    pub fn new(limit: usize) -> Self {
        Self::wrap(Global, limit)
    }
}

impl<A> Limited<A> {
    /// Cap `inner` at `limit` bytes.
    #[must_use]
    pub fn wrap(inner: A, limit: usize) -> Self {
        Self { inner, limit }
    }

    /// Largest capacity this allocator will grant.
    #[must_use]
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Change the limit. Capacity already granted is kept.
    pub fn set_limit(&mut self, limit: usize) {
        self.limit = limit;
    }

    /// The wrapped allocator.
    #[must_use]
    pub fn inner(&self) -> &A {
        &self.inner
    }

    /// The wrapped allocator, mutably.
    pub fn inner_mut(&mut self) -> &mut A {
        &mut self.inner
    }
}

impl<A: Allocator> Allocator for Limited<A> {
    fn grow(&mut self, storage: &mut Vec<u8>, new_capacity: usize) -> Result<(), BufferError> {
        if new_capacity > self.limit {
            return Err(BufferError::AllocationFailure {
                requested: new_capacity,
            });
        }
        self.inner.grow(storage, new_capacity)
    }
}
