use alloc::boxed::Box;
use alloc::vec::Vec;
use spin::Mutex;

use crate::error::BlockError;

/// Fixed-size, zero-initialised byte array standing in for the medium.
///
/// The bytes are only reachable through [`BackingStore::with_bytes`], which
/// holds the guard for exactly the duration of the closure.
pub struct BackingStore {
    capacity: usize,
    bytes: Mutex<Box<[u8]>>,
}

impl BackingStore {
    /// Allocates `capacity` zeroed bytes, all or nothing.
    pub fn allocate(capacity: usize) -> Result<Self, BlockError> {
        let mut bytes: Vec<u8> = Vec::new();
        if bytes.try_reserve_exact(capacity).is_err() {
            log::error!("backing store: cannot allocate {} bytes", capacity);
            return Err(BlockError::OutOfMemory { requested: capacity });
        }
        bytes.resize(capacity, 0);
        Ok(BackingStore { capacity, bytes: Mutex::new(bytes.into_boxed_slice()) })
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Runs `f` with exclusive access to the whole store.
    pub fn with_bytes<R>(&self, f: impl FnOnce(&mut [u8]) -> R) -> R {
        let mut guard = self.bytes.lock();
        f(&mut guard[..])
    }

    /// Releases the buffer. Consuming `self` rules out any later access.
    pub fn teardown(self) {
        drop(self.bytes.into_inner());
    }
}

impl core::fmt::Debug for BackingStore {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("BackingStore").field("capacity", &self.capacity).finish()
    }
}
