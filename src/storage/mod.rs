pub mod backing;
pub mod block_devices;
pub mod ramdisk;
pub mod transfer;

pub use backing::BackingStore;
pub use block_devices::BlockDevice;
pub use ramdisk::RamDisk;
pub use transfer::{transfer, TransferBuf};
