//! `std::io` adapters.

use std::io::{self, Read, Write};

use crate::{Allocator, GrowableBuffer};

/// Bytes pulled from a reader per call to [`Read::read`].
const READ_CHUNK: usize = 4096;

impl<A: Allocator> GrowableBuffer<A> {
    /// Append everything `reader` yields until end of stream.
    ///
    /// Reads in chunks of 4096 bytes and appends each chunk whole. Returns the
    /// number of bytes appended. Interrupted reads are retried.
    ///
    /// # Errors
    ///
    /// Any error from `reader` other than [`io::ErrorKind::Interrupted`], or an
    /// [`io::ErrorKind::OutOfMemory`] error if the buffer cannot grow. Chunks
    /// appended before the error stay in the buffer; the failing chunk is not
    /// appended at all.
    pub fn read_from<R: Read>(&mut self, mut reader: R) -> io::Result<usize> {
        let mut chunk = [0u8; READ_CHUNK];
        let mut total = 0usize;
        loop {
            let n = match reader.read(&mut chunk) {
                Ok(0) => return Ok(total),
                Ok(n) => n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            };
            self.extend_from_slice(&chunk[..n])?;
            total += n;
        }
    }
}

impl<A: Allocator> Write for GrowableBuffer<A> {
    /// Appends all of `buf` or nothing.
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.extend_from_slice(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
