//! A growable, contiguous byte buffer with a doubling growth policy and
//! fallible allocation.
//!
//! [`GrowableBuffer`] owns its storage, appends single bytes in amortized
//! O(1), and reports allocation failure as a [`BufferError`] instead of
//! aborting. A failed operation leaves the buffer exactly as it was.
//!
//! ```rust
//! use growbuf::GrowableBuffer;
//!
//! let mut buf = GrowableBuffer::new();
//! for byte in *b"ABC" {
//!     buf.push_byte(byte)?;
//! }
//! assert_eq!(buf.as_bytes(), b"ABC");
//! assert!(buf.capacity() >= 3);
//! # Ok::<(), growbuf::BufferError>(())
//! ```

#![no_std]
extern crate alloc;

#[cfg(any(test, feature = "std"))]
extern crate std;

pub mod allocator;
mod buffer;
mod error;
pub mod growth;
pub mod hexdump;
#[cfg(feature = "std")]
mod io;
#[cfg(feature = "serde")]
mod serde_impl;


pub use crate::{
    allocator::{Allocator, Counting, Global, Limited},
    buffer::GrowableBuffer,
    error::BufferError,
    hexdump::HexDump,
};
