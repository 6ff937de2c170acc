//! Hex-dump formatting for byte views.
//!
//! Each row covers up to [`ROW_WIDTH`] bytes and looks like
//!
//! ```text
//! Offset 00000010: 41 42 43
//! ```
//!
//! with a space after every byte. A short final row prints only the bytes it
//! has; an empty view prints nothing.

use core::fmt;

/// Bytes per row.
pub const ROW_WIDTH: usize = 16;

/// Borrowed bytes that display as a hex dump.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HexDump<'a> {
    bytes: &'a [u8],
}

impl<'a> HexDump<'a> {
    /// Dump `bytes`.
    #[must_use]
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes }
    }

    /// Number of rows the dump prints.
    #[must_use]
    pub fn rows(&self) -> usize {
        self.bytes.len().div_ceil(ROW_WIDTH)
    }
}

impl fmt::Display for HexDump<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (row, chunk) in self.bytes.chunks(ROW_WIDTH).enumerate() {
            write!(f, "Offset {:08X}: ", row * ROW_WIDTH)?;
            for byte in chunk {
                write!(f, "{byte:02X} ")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
