use alloc::vec::Vec;
use core::{fmt, ops::Deref};

use bstr::BStr;

use crate::{Allocator, BufferError, Global, HexDump, growth};

/// A growable, contiguous byte buffer that owns its storage.
///
/// The buffer tracks two sizes: [`len`](Self::len), the bytes written so far,
/// and [`capacity`](Self::capacity), the bytes allocated. Growth follows
/// [`growth::next_capacity`], so `n` pushes onto an empty buffer reallocate
/// only `O(log n)` times.
///
/// Every fallible operation is all-or-nothing: when the allocator refuses a
/// request, the buffer keeps its previous length, capacity, allocation and
/// contents, and the caller gets a [`BufferError`].
///
/// Storage is released on drop, or early with [`release`](Self::release).
pub struct GrowableBuffer<A = Global> {
    /// `storage.len()` is the logical length. `storage.capacity()` is at
    /// least `capacity` and is zero exactly when `capacity` is.
    storage: Vec<u8>,
    capacity: usize,
    allocator: A,
}

impl GrowableBuffer<Global> {
    /// An empty buffer on the global heap. Does not allocate.
    #[must_use]
    pub const fn new() -> Self {
        Self::with_allocator(Global)
    }
}

impl<A: Allocator + Default> Default for GrowableBuffer<A> {
    fn default() -> Self {
        Self::with_allocator(A::default())
    }
}

impl<A> GrowableBuffer<A> {
    /// An empty buffer that grows through `allocator`. Does not allocate.
    #[must_use]
    pub const fn with_allocator(allocator: A) -> Self {
        Self {
            storage: Vec::new(),
            capacity: 0,
            allocator,
        }
    }

    /// Bytes currently in use.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.storage.len()
    }

    /// Whether no bytes are in use. The buffer may still hold an allocation.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }

    /// Bytes currently allocated.
    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Whether the buffer currently owns an allocation.
    #[must_use]
    pub fn is_allocated(&self) -> bool {
        self.storage.capacity() > 0
    }

    /// The bytes written so far.
    ///
    /// The view borrows the buffer, so it cannot outlive the next mutation.
    #[inline]
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.storage
    }

    /// The allocator this buffer grows through.
    #[must_use]
    pub fn allocator(&self) -> &A {
        &self.allocator
    }

    /// The allocator this buffer grows through, mutably.
    pub fn allocator_mut(&mut self) -> &mut A {
        &mut self.allocator
    }

    /// Forget the contents but keep the allocation for reuse.
    pub fn clear(&mut self) {
        self.storage.clear();
    }

    /// Give the allocation back and return to the empty state.
    ///
    /// Calling this on an empty buffer does nothing. The buffer can be used
    /// again afterwards.
    pub fn release(&mut self) {
        self.storage = Vec::new();
        self.capacity = 0;
    }

    /// Formats the current contents as a hex dump.
    #[must_use]
    pub fn hex_dump(&self) -> HexDump<'_> {
        HexDump::new(self.as_bytes())
    }

    /// Number of runs of non-whitespace bytes in the buffer.
    ///
    /// Whitespace is the C locale's `isspace` set: space, `\t`, `\n`,
    /// vertical tab, form feed and `\r`.
    #[must_use]
    pub fn count_words(&self) -> usize {
        self.as_bytes()
            .split(is_space)
            .filter(|word| !word.is_empty())
            .count()
    }

    /// Checks every structural invariant of the buffer.
    ///
    /// # Panics
    ///
    /// If the length exceeds the capacity, or the allocation does not match
    /// the tracked capacity.
    #[cfg(any(test, feature = "fuzzing"))]
    pub fn debug_check_invariants(&self) {
        assert!(self.len() <= self.capacity, "length exceeds capacity");
        if self.capacity == 0 {
            assert_eq!(self.storage.capacity(), 0, "allocation without capacity");
        } else {
            assert!(
                self.storage.capacity() >= self.capacity,
                "allocation smaller than capacity"
            );
        }
    }
}

impl<A: Allocator> GrowableBuffer<A> {
    /// Make sure at least `need` bytes fit without another allocation.
    ///
    /// Does nothing when the capacity already covers `need`. Otherwise grows
    /// once, to the capacity planned by [`growth::next_capacity`]. The
    /// length and contents are never touched.
    ///
    /// # Errors
    ///
    /// [`BufferError::AllocationFailure`] if the allocator refuses. The buffer
    /// is left unchanged.
    pub fn reserve(&mut self, need: usize) -> Result<(), BufferError> {
        if self.capacity >= need {
            return Ok(());
        }

        let new_capacity = growth::next_capacity(self.capacity, need);
        if let Err(err) = self.allocator.grow(&mut self.storage, new_capacity) {
            #[cfg(feature = "tracing")]
            tracing::debug!(
                target: "growbuf",
                capacity = self.capacity,
                requested = new_capacity,
                "buffer growth refused"
            );
            return Err(err);
        }
        debug_assert!(self.storage.capacity() >= new_capacity);

        #[cfg(feature = "tracing")]
        tracing::trace!(
            target: "growbuf",
            from = self.capacity,
            to = new_capacity,
            len = self.len(),
            "buffer reallocated"
        );
        self.capacity = new_capacity;
        Ok(())
    }

    /// Append one byte.
    ///
    /// # Errors
    ///
    /// [`BufferError::AllocationFailure`] if growing fails; the byte is not
    /// written and the buffer is unchanged.
    pub fn push_byte(&mut self, value: u8) -> Result<(), BufferError> {
        let need = self.need(1)?;
        self.reserve(need)?;
        // Cannot reallocate: `reserve` made room.
        self.storage.push(value);
        Ok(())
    }

    /// Append a whole slice, growing at most once.
    ///
    /// # Errors
    ///
    /// [`BufferError::AllocationFailure`] if growing fails or the resulting
    /// length would not fit in `usize`; nothing is appended.
    pub fn extend_from_slice(&mut self, bytes: &[u8]) -> Result<(), BufferError> {
        let need = self.need(bytes.len())?;
        self.reserve(need)?;
        self.storage.extend_from_slice(bytes);
        Ok(())
    }

    fn need(&self, additional: usize) -> Result<usize, BufferError> {
        self.len()
            .checked_add(additional)
            .ok_or(BufferError::AllocationFailure {
                requested: usize::MAX,
            })
    }
}

/// `u8::is_ascii_whitespace` plus vertical tab.
fn is_space(byte: &u8) -> bool {
    byte.is_ascii_whitespace() || *byte == 0x0B
}

impl<A> Deref for GrowableBuffer<A> {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl<A> AsRef<[u8]> for GrowableBuffer<A> {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl<A> fmt::Debug for GrowableBuffer<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GrowableBuffer")
            .field("len", &self.len())
            .field("capacity", &self.capacity)
            .field("data", &BStr::new(self.as_bytes()))
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use alloc::format;

    use super::GrowableBuffer;
    use crate::{BufferError, Counting, Global, Limited};

    #[test]
    fn new_buffer_is_empty_and_unallocated() {
        let buf = GrowableBuffer::new();
        assert_eq!(buf.len(), 0);
        assert_eq!(buf.capacity(), 0);
        assert!(buf.is_empty());
        assert!(!buf.is_allocated());
        assert_eq!(buf.as_bytes(), b"");
        buf.debug_check_invariants();
    }

    #[test]
    fn default_matches_new() {
        let buf: GrowableBuffer<Counting> = GrowableBuffer::default();
        assert_eq!(buf.capacity(), 0);
        assert_eq!(buf.allocator().reallocations(), 0);
    }

    #[test]
    fn reserve_zero_on_empty_does_not_allocate() {
        let mut buf = GrowableBuffer::new();
        buf.reserve(0).unwrap();
        assert!(!buf.is_allocated());
        buf.debug_check_invariants();
    }

    #[test]
    fn reserve_uses_doubling_plan() {
        let mut buf = GrowableBuffer::new();
        buf.reserve(5).unwrap();
        assert_eq!(buf.capacity(), 8);
        buf.reserve(9).unwrap();
        assert_eq!(buf.capacity(), 16);
        buf.debug_check_invariants();
    }

    #[test]
    fn impossible_reserve_leaves_buffer_alone() {
        let mut buf = GrowableBuffer::new();
        buf.extend_from_slice(b"keep").unwrap();
        let ptr = buf.as_bytes().as_ptr();
        let capacity = buf.capacity();

        let err = buf.reserve(usize::MAX).unwrap_err();
        assert_eq!(err, BufferError::AllocationFailure { requested: usize::MAX });
        assert_eq!(buf.as_bytes(), b"keep");
        assert_eq!(buf.as_bytes().as_ptr(), ptr);
        assert_eq!(buf.capacity(), capacity);
        buf.debug_check_invariants();
    }

    #[test]
    fn extend_grows_once() {
        let mut buf = GrowableBuffer::with_allocator(Counting::new(Global));
        buf.extend_from_slice(b"hello world").unwrap();
        assert_eq!(buf.as_bytes(), b"hello world");
        assert_eq!(buf.capacity(), 16);
        assert_eq!(buf.allocator().reallocations(), 1);
    }

    #[test]
    fn extend_with_empty_slice_is_a_no_op() {
        let mut buf = GrowableBuffer::with_allocator(Counting::new(Global));
        buf.extend_from_slice(b"").unwrap();
        assert!(!buf.is_allocated());
        assert_eq!(buf.allocator().reallocations(), 0);
    }

    #[test]
    fn failed_extend_appends_nothing() {
        let mut buf = GrowableBuffer::with_allocator(Limited::new(4));
        buf.extend_from_slice(b"abc").unwrap();
        let err = buf.extend_from_slice(b"defgh").unwrap_err();
        assert_eq!(err, BufferError::AllocationFailure { requested: 8 });
        assert_eq!(buf.as_bytes(), b"abc");
        assert_eq!(buf.capacity(), 4);
    }

    #[test]
    fn release_is_idempotent_and_buffer_is_reusable() {
        let mut buf = GrowableBuffer::new();
        buf.extend_from_slice(b"xyz").unwrap();
        buf.release();
        buf.debug_check_invariants();
        assert!(!buf.is_allocated());
        buf.release();
        assert_eq!((buf.len(), buf.capacity()), (0, 0));

        buf.push_byte(b'q').unwrap();
        assert_eq!(buf.as_bytes(), b"q");
        assert_eq!(buf.capacity(), 1);
    }

    #[test]
    fn deref_and_as_ref_expose_the_view() {
        let mut buf = GrowableBuffer::new();
        buf.extend_from_slice(b"view").unwrap();
        assert_eq!(&*buf, b"view");
        assert_eq!(buf.as_ref(), b"view");
        assert!(buf.starts_with(b"vi"));
    }

    #[test]
    fn counts_words() {
        let mut buf = GrowableBuffer::new();
        assert_eq!(buf.count_words(), 0);
        buf.extend_from_slice(b"  one two\tthree\n\nfour  ").unwrap();
        assert_eq!(buf.count_words(), 4);
        buf.clear();
        buf.extend_from_slice(b" \t\n").unwrap();
        assert_eq!(buf.count_words(), 0);
    }

    #[test]
    fn vertical_tab_and_form_feed_separate_words() {
        let mut buf = GrowableBuffer::new();
        buf.extend_from_slice(b"a\x0Bb\x0Cc\rd").unwrap();
        assert_eq!(buf.count_words(), 4);
    }

    #[test]
    fn debug_shows_contents_as_byte_string() {
        let mut buf = GrowableBuffer::new();
        buf.extend_from_slice(b"hi\xFF").unwrap();
        // Escape casing is bstr's choice, not ours.
        assert_eq!(
            format!("{buf:?}").to_ascii_lowercase(),
            r#"growablebuffer { len: 3, capacity: 4, data: "hi\xff", .. }"#
        );
    }
}
