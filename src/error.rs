use core::fmt;

use crate::request::RequestKind;

/// Errors raised by the backing store and by request processing.
///
/// `OutOfMemory` is fatal to device construction. Every other variant is
/// scoped to the single request that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockError {
    OutOfMemory { requested: usize },
    BeyondEnd { start_sector: u64, sector_count: u64 },
    BufferLength { expected: usize, actual: usize },
    UnsupportedRequestKind(RequestKind),
}

impl BlockError {
    /// Per-request failures that the host reports as a plain I/O error.
    pub fn is_io_error(&self) -> bool {
        !matches!(self, BlockError::OutOfMemory { .. })
    }
}

impl fmt::Display for BlockError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlockError::OutOfMemory { requested } => {
                write!(f, "out of memory allocating {} bytes", requested)
            }
            BlockError::BeyondEnd { start_sector, sector_count } => write!(
                f,
                "sector range {}+{} is beyond the end of the device",
                start_sector, sector_count
            ),
            BlockError::BufferLength { expected, actual } => write!(
                f,
                "buffer holds {} bytes, transfer needs {}",
                actual, expected
            ),
            BlockError::UnsupportedRequestKind(kind) => {
                write!(f, "unsupported request kind {:?}", kind)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_allocation_failure_is_not_io() {
        assert!(!BlockError::OutOfMemory { requested: 1 }.is_io_error());
        assert!(BlockError::BeyondEnd { start_sector: 0, sector_count: 1 }.is_io_error());
        assert!(BlockError::UnsupportedRequestKind(RequestKind::Flush).is_io_error());
    }

    #[test]
    fn display_names_the_range() {
        let err = BlockError::BeyondEnd { start_sector: 2046, sector_count: 4 };
        assert_eq!(
            err.to_string(),
            "sector range 2046+4 is beyond the end of the device"
        );
    }
}
