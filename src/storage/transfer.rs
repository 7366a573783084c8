//! Sector range copies between the store and a caller buffer.

use core::ops::Range;

use crate::error::BlockError;
use crate::request::Direction;

/// Caller side of a transfer. The variant is the direction.
#[derive(Debug)]
pub enum TransferBuf<'b> {
    /// Filled from the store.
    Read(&'b mut [u8]),
    /// Copied into the store.
    Write(&'b [u8]),
}

impl TransferBuf<'_> {
    pub fn direction(&self) -> Direction {
        match self {
            TransferBuf::Read(_) => Direction::Read,
            TransferBuf::Write(_) => Direction::Write,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            TransferBuf::Read(buf) => buf.len(),
            TransferBuf::Write(buf) => buf.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Byte range of `disk` covered by the sector range, if it lies entirely
/// inside a store of `capacity` bytes. Every step is checked so a huge
/// `start_sector` or `sector_count` cannot wrap into a valid-looking range.
pub fn sector_range(
    capacity: usize,
    sector_size: usize,
    start_sector: u64,
    sector_count: u64,
) -> Option<Range<usize>> {
    let sector_size = sector_size as u64;
    let offset = start_sector.checked_mul(sector_size)?;
    let length = sector_count.checked_mul(sector_size)?;
    let end = offset.checked_add(length)?;
    if end > capacity as u64 {
        return None;
    }
    Some(offset as usize..end as usize)
}

/// Copies `sector_count` sectors starting at `start_sector` between `disk`
/// and `buf`.
///
/// Nothing is touched unless the whole range is inside `disk` and `buf` is
/// exactly as long as the range. The caller holds the store guard.
pub fn transfer(
    disk: &mut [u8],
    sector_size: usize,
    start_sector: u64,
    sector_count: u64,
    buf: TransferBuf<'_>,
) -> Result<(), BlockError> {
    let range = match sector_range(disk.len(), sector_size, start_sector, sector_count) {
        Some(range) => range,
        None => {
            log::warn!(
                "beyond-end {} ({} {})",
                match buf.direction() {
                    Direction::Read => "read",
                    Direction::Write => "write",
                },
                start_sector,
                sector_count
            );
            return Err(BlockError::BeyondEnd { start_sector, sector_count });
        }
    };

    if buf.len() != range.len() {
        return Err(BlockError::BufferLength { expected: range.len(), actual: buf.len() });
    }

    match buf {
        TransferBuf::Read(out) => out.copy_from_slice(&disk[range]),
        TransferBuf::Write(data) => disk[range].copy_from_slice(data),
    }
    Ok(())
}
