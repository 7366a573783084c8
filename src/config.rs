use alloc::string::{String, ToString};
use core::fmt;

use crate::geometry::{DEFAULT_HEADS, DEFAULT_SECTORS_PER_TRACK};

/// Unit the host block layer counts capacity in, whatever the logical
/// sector size of the device is.
pub const KERNEL_SECTOR_SIZE: usize = 512;

pub const DEFAULT_NAME: &str = "moon0";
pub const DEFAULT_SECTOR_SIZE: usize = 512;
pub const DEFAULT_SECTOR_COUNT: u64 = 1024;

const MAX_SECTOR_SIZE: usize = 4096;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    EmptyName,
    InvalidSectorSize(usize),
    CapacityOverflow { sector_size: usize, sector_count: u64 },
    ZeroGeometry,
    UnknownParameter(String),
    InvalidValue { key: String, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::EmptyName => write!(f, "device name must not be empty"),
            ConfigError::InvalidSectorSize(size) => write!(
                f,
                "sector size {} is not a power of two between {} and {}",
                size, KERNEL_SECTOR_SIZE, MAX_SECTOR_SIZE
            ),
            ConfigError::CapacityOverflow { sector_size, sector_count } => write!(
                f,
                "{} sectors of {} bytes do not fit in memory",
                sector_count, sector_size
            ),
            ConfigError::ZeroGeometry => {
                write!(f, "heads and sectors per track must be non-zero")
            }
            ConfigError::UnknownParameter(key) => write!(f, "unknown parameter `{}`", key),
            ConfigError::InvalidValue { key, value } => {
                write!(f, "invalid value `{}` for parameter `{}`", value, key)
            }
        }
    }
}

/// Construction-time description of a ram disk. Fixed once the device is
/// allocated; there is no runtime reconfiguration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiskConfig {
    name: String,
    sector_size: usize,
    sector_count: u64,
    heads: u8,
    sectors_per_track: u8,
}

impl Default for DiskConfig {
    fn default() -> Self {
        DiskConfig {
            name: DEFAULT_NAME.to_string(),
            sector_size: DEFAULT_SECTOR_SIZE,
            sector_count: DEFAULT_SECTOR_COUNT,
            heads: DEFAULT_HEADS,
            sectors_per_track: DEFAULT_SECTORS_PER_TRACK,
        }
    }
}

impl DiskConfig {
    pub fn new(name: &str, sector_size: usize, sector_count: u64) -> Result<Self, ConfigError> {
        let config = DiskConfig {
            name: name.to_string(),
            sector_size,
            sector_count,
            ..DiskConfig::default()
        };
        config.validate()?;
        Ok(config)
    }

    pub fn with_geometry(mut self, heads: u8, sectors_per_track: u8) -> Result<Self, ConfigError> {
        self.heads = heads;
        self.sectors_per_track = sectors_per_track;
        self.validate()?;
        Ok(self)
    }

    /// Parses module-parameter style settings, e.g.
    /// `nsectors=2048 logical_block_size=4096`. Keys left out keep their
    /// default value.
    pub fn from_params(params: &str) -> Result<Self, ConfigError> {
        let mut config = DiskConfig::default();
        for pair in params.split_whitespace() {
            let (key, value) = match pair.split_once('=') {
                Some(kv) => kv,
                None => {
                    return Err(ConfigError::InvalidValue {
                        key: pair.to_string(),
                        value: String::new(),
                    })
                }
            };
            match key {
                "name" => config.name = value.to_string(),
                "nsectors" => config.sector_count = parse_value(key, value)?,
                "logical_block_size" => config.sector_size = parse_value(key, value)?,
                "heads" => config.heads = parse_value(key, value)?,
                "sectors" => config.sectors_per_track = parse_value(key, value)?,
                _ => return Err(ConfigError::UnknownParameter(key.to_string())),
            }
        }
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.name.is_empty() {
            return Err(ConfigError::EmptyName);
        }
        if !self.sector_size.is_power_of_two()
            || !(KERNEL_SECTOR_SIZE..=MAX_SECTOR_SIZE).contains(&self.sector_size)
        {
            return Err(ConfigError::InvalidSectorSize(self.sector_size));
        }
        if self.heads == 0 || self.sectors_per_track == 0 {
            return Err(ConfigError::ZeroGeometry);
        }
        capacity_of(self.sector_size, self.sector_count).ok_or(ConfigError::CapacityOverflow {
            sector_size: self.sector_size,
            sector_count: self.sector_count,
        })?;
        Ok(())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn sector_size(&self) -> usize {
        self.sector_size
    }

    pub fn sector_count(&self) -> u64 {
        self.sector_count
    }

    pub fn heads(&self) -> u8 {
        self.heads
    }

    pub fn sectors_per_track(&self) -> u8 {
        self.sectors_per_track
    }

    pub fn capacity_bytes(&self) -> usize {
        // validated at construction
        self.sector_size * self.sector_count as usize
    }

    /// Capacity in 512-byte units.
    pub fn kernel_sectors(&self) -> u64 {
        self.capacity_bytes() as u64 / KERNEL_SECTOR_SIZE as u64
    }
}

fn capacity_of(sector_size: usize, sector_count: u64) -> Option<usize> {
    let count = usize::try_from(sector_count).ok()?;
    sector_size.checked_mul(count)
}

fn parse_value<T: core::str::FromStr>(key: &str, value: &str) -> Result<T, ConfigError> {
    value.parse().map_err(|_| ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_driver_parameters() {
        let config = DiskConfig::default();
        assert_eq!(config.name(), "moon0");
        assert_eq!(config.sector_size(), 512);
        assert_eq!(config.sector_count(), 1024);
        assert_eq!(config.capacity_bytes(), 512 * 1024);
        assert_eq!(config.kernel_sectors(), 1024);
    }

    #[test]
    fn params_override_defaults() {
        let config = DiskConfig::from_params("nsectors=2048 logical_block_size=4096 name=moon1").unwrap();
        assert_eq!(config.name(), "moon1");
        assert_eq!(config.sector_count(), 2048);
        assert_eq!(config.sector_size(), 4096);
        assert_eq!(config.kernel_sectors(), 2048 * 8);
        assert_eq!(config.heads(), DEFAULT_HEADS);
    }

    #[test]
    fn empty_params_give_defaults() {
        assert_eq!(DiskConfig::from_params("  ").unwrap(), DiskConfig::default());
    }

    #[test]
    fn bad_params_are_rejected() {
        assert_eq!(
            DiskConfig::from_params("cylinders=3"),
            Err(ConfigError::UnknownParameter("cylinders".to_string()))
        );
        assert_eq!(
            DiskConfig::from_params("nsectors=lots"),
            Err(ConfigError::InvalidValue {
                key: "nsectors".to_string(),
                value: "lots".to_string()
            })
        );
        assert!(matches!(
            DiskConfig::from_params("nsectors"),
            Err(ConfigError::InvalidValue { .. })
        ));
    }

    #[test]
    fn sector_size_must_be_a_supported_power_of_two() {
        assert_eq!(DiskConfig::new("d", 1000, 8), Err(ConfigError::InvalidSectorSize(1000)));
        assert_eq!(DiskConfig::new("d", 256, 8), Err(ConfigError::InvalidSectorSize(256)));
        assert_eq!(DiskConfig::new("d", 8192, 8), Err(ConfigError::InvalidSectorSize(8192)));
        assert!(DiskConfig::new("d", 2048, 8).is_ok());
    }

    #[test]
    fn capacity_overflow_is_rejected() {
        assert_eq!(
            DiskConfig::new("d", 4096, u64::MAX),
            Err(ConfigError::CapacityOverflow { sector_size: 4096, sector_count: u64::MAX })
        );
    }

    #[test]
    fn geometry_constants_must_be_non_zero() {
        let config = DiskConfig::default();
        assert_eq!(config.clone().with_geometry(0, 16), Err(ConfigError::ZeroGeometry));
        let config = config.with_geometry(16, 63).unwrap();
        assert_eq!((config.heads(), config.sectors_per_track()), (16, 63));
    }

    #[test]
    fn zero_sectors_is_a_valid_config() {
        let config = DiskConfig::new("empty", 512, 0).unwrap();
        assert_eq!(config.capacity_bytes(), 0);
    }
}
