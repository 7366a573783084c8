// In-memory sector block device: backing store, transfer engine,
// request dispatcher and legacy geometry.
#![cfg_attr(not(test), no_std)]

extern crate alloc;

pub mod config;
pub mod dispatcher;
pub mod error;
pub mod geometry;
pub mod queue;
pub mod request;
pub mod storage;

pub use config::{ConfigError, DiskConfig, KERNEL_SECTOR_SIZE};
pub use dispatcher::{DispatchStats, Dispatcher, DrainSummary};
pub use error::BlockError;
pub use geometry::{geometry, Geometry, GeometryReporter};
pub use queue::{FifoQueue, RequestQueue};
pub use request::{Direction, Outcome, Request, RequestKind};
pub use storage::{BackingStore, BlockDevice, RamDisk};
