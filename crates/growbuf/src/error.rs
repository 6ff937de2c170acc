use thiserror::Error;

/// The one way a buffer operation can fail.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferError {
    /// The allocator could not provide `requested` bytes of capacity.
    ///
    /// The buffer that reported it is unchanged.
    #[error("allocation of {requested} bytes failed")]
    AllocationFailure {
        /// Capacity in bytes that was asked of the allocator.
        requested: usize,
    },
}

impl BufferError {
    /// Capacity in bytes that could not be allocated.
    #[must_use]
    pub fn requested(&self) -> usize {
        match *self {
            BufferError::AllocationFailure { requested } => requested,
        }
    }
}

#[cfg(feature = "std")]
impl From<BufferError> for std::io::Error {
    fn from(err: BufferError) -> Self {
        std::io::Error::new(std::io::ErrorKind::OutOfMemory, err)
    }
}
