use crate::error::BlockError;

/// Direct, queue-less sector access. Buffers must be a whole number of
/// sectors; the sector count is taken from their length.
pub trait BlockDevice {
    fn read_sectors(&self, start_sector: u64, buf: &mut [u8]) -> Result<(), BlockError>;
    fn write_sectors(&self, start_sector: u64, buf: &[u8]) -> Result<(), BlockError>;
    fn sector_size(&self) -> usize;
    /// Capacity in bytes.
    fn capacity(&self) -> usize;

    fn sector_count(&self) -> u64 {
        (self.capacity() / self.sector_size()) as u64
    }
}
