//! Synthetic cylinder/head/sector geometry.
//!
//! A ram disk has no physical layout, but partitioning tools still ask for
//! one. The reported shape is fabricated: fixed heads and sectors per track,
//! and a cylinder count derived from the capacity.

use crate::config::KERNEL_SECTOR_SIZE;

pub const DEFAULT_HEADS: u8 = 4;
pub const DEFAULT_SECTORS_PER_TRACK: u8 = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Geometry {
    pub cylinders: u64,
    pub heads: u8,
    pub sectors_per_track: u8,
    /// First sector of the device; always 0 for a whole-disk query.
    pub start: u64,
}

impl Geometry {
    pub const fn empty() -> Self {
        Geometry { cylinders: 0, heads: 0, sectors_per_track: 0, start: 0 }
    }

    /// Number of sectors the CHS triple describes, saturating at `u64::MAX`.
    pub fn chs_sectors(&self) -> u64 {
        self.cylinders
            .saturating_mul(self.heads as u64)
            .saturating_mul(self.sectors_per_track as u64)
    }
}

/// Computes the geometry for a device of `capacity_bytes`.
///
/// The sector count (512-byte units) is masked down to a multiple of 64 and
/// divided by 64. The low six bits are discarded on purpose; tools check the
/// reported cylinders against capacity with the same rounding.
pub fn geometry(capacity_bytes: u64, heads: u8, sectors_per_track: u8) -> Geometry {
    if capacity_bytes == 0 {
        return Geometry::empty();
    }
    let sectors = capacity_bytes / KERNEL_SECTOR_SIZE as u64;
    Geometry {
        cylinders: (sectors & !0x3f) >> 6,
        heads,
        sectors_per_track,
        start: 0,
    }
}

/// Answers legacy geometry queries for a device.
pub trait GeometryReporter {
    fn geometry(&self) -> Geometry;
}
