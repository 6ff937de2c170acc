//! Capacity planning for [`GrowableBuffer`](crate::GrowableBuffer).
//!
//! Growth doubles the current capacity (starting from 1) until it covers the
//! request. When one more doubling would overflow `usize`, the new capacity
//! is clamped to exactly the requested size, so a plan never wraps around
//! and never comes out smaller than the request.

/// Capacity to grow to so that at least `need` bytes fit.
///
/// Returns `current` unchanged when it already covers `need`.
///
/// ```rust
/// use growbuf::growth::next_capacity;
///
/// assert_eq!(next_capacity(0, 5), 8);
/// assert_eq!(next_capacity(16, 10), 16);
/// assert_eq!(next_capacity(usize::MAX / 2 + 1, usize::MAX), usize::MAX);
/// ```
#[must_use]
pub fn next_capacity(current: usize, need: usize) -> usize {
    if current >= need {
        return current;
    }

    let mut capacity = current.max(1);
    while capacity < need {
        match capacity.checked_mul(2) {
            Some(doubled) => capacity = doubled,
            // Clamp instead of wrapping.
            None => return need,
        }
    }
    capacity
}

/// Number of reallocations performed by `n` single-byte pushes onto an empty
/// buffer: one per capacity step `0 → 1 → 2 → 4 → …`.
#[must_use]
pub fn reallocations_for(n: usize) -> usize {
    if n == 0 {
        return 0;
    }
    // ceil(log2(n)) doublings past the first allocation of one byte.
    (usize::BITS - (n - 1).leading_zeros()) as usize + 1
}
