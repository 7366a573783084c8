use super::backing::BackingStore;
use super::block_devices::BlockDevice;
use super::transfer::{transfer, TransferBuf};
use crate::config::DiskConfig;
use crate::dispatcher::Dispatcher;
use crate::error::BlockError;
use crate::geometry::{self, Geometry, GeometryReporter};

/// A ram-backed block device. Created once by the host before any request
/// and torn down once after the last one.
#[derive(Debug)]
pub struct RamDisk {
    config: DiskConfig,
    store: BackingStore,
}

impl RamDisk {
    pub fn new(config: DiskConfig) -> Result<Self, BlockError> {
        let store = BackingStore::allocate(config.capacity_bytes())?;
        log::info!(
            "{}: {} sectors of {} bytes ({} bytes)",
            config.name(),
            config.sector_count(),
            config.sector_size(),
            store.capacity()
        );
        Ok(RamDisk { config, store })
    }

    pub fn config(&self) -> &DiskConfig {
        &self.config
    }

    pub fn name(&self) -> &str {
        self.config.name()
    }

    pub fn store(&self) -> &BackingStore {
        &self.store
    }

    /// A dispatcher serving requests against this disk.
    pub fn dispatcher(&self) -> Dispatcher<'_> {
        Dispatcher::new(&self.store, self.config.sector_size())
    }

    /// Capacity in 512-byte units, as announced to the host block layer.
    pub fn kernel_sectors(&self) -> u64 {
        self.config.kernel_sectors()
    }

    pub fn teardown(self) {
        log::info!("{}: releasing {} bytes", self.config.name(), self.store.capacity());
        self.store.teardown();
    }

    fn sectors_in(&self, len: usize) -> Result<u64, BlockError> {
        let sector_size = self.config.sector_size();
        if len % sector_size != 0 {
            return Err(BlockError::BufferLength {
                expected: (len / sector_size + 1) * sector_size,
                actual: len,
            });
        }
        Ok((len / sector_size) as u64)
    }
}

impl BlockDevice for RamDisk {
    fn read_sectors(&self, start_sector: u64, buf: &mut [u8]) -> Result<(), BlockError> {
        let count = self.sectors_in(buf.len())?;
        let sector_size = self.config.sector_size();
        self.store
            .with_bytes(|disk| transfer(disk, sector_size, start_sector, count, TransferBuf::Read(buf)))
    }

    fn write_sectors(&self, start_sector: u64, buf: &[u8]) -> Result<(), BlockError> {
        let count = self.sectors_in(buf.len())?;
        let sector_size = self.config.sector_size();
        self.store
            .with_bytes(|disk| transfer(disk, sector_size, start_sector, count, TransferBuf::Write(buf)))
    }

    fn sector_size(&self) -> usize {
        self.config.sector_size()
    }

    fn capacity(&self) -> usize {
        self.store.capacity()
    }
}

impl GeometryReporter for RamDisk {
    fn geometry(&self) -> Geometry {
        geometry::geometry(
            self.store.capacity() as u64,
            self.config.heads(),
            self.config.sectors_per_track(),
        )
    }
}
