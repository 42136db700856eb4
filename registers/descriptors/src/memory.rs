// Licensed under the Apache-2.0 license

use serde::Deserialize;

use crate::error::{RegisterError, RegisterResult};

/// Program flash always starts at this address.
pub const FLASH_START: u32 = 0x8000;
pub const RAM_START: u32 = 0x0000;

/// Memory sizes of a device in bytes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
pub struct MemorySize {
    pub flash_bytes: u32,
    pub ram_bytes: u32,
    pub eeprom_bytes: u32,
}

impl MemorySize {
    pub const fn new(flash_bytes: u32, ram_bytes: u32, eeprom_bytes: u32) -> Self {
        Self {
            flash_bytes,
            ram_bytes,
            eeprom_bytes,
        }
    }

    /// Rejects sizes that cannot be mapped: empty flash or RAM, or RAM
    /// overlapping the peripheral space at `0x4000`.
    pub fn validate(&self) -> RegisterResult<()> {
        if self.flash_bytes == 0 {
            return Err(RegisterError::InvalidMemoryOverride(
                "flash size must not be zero".into(),
            ));
        }
        if self.ram_bytes == 0 || self.ram_bytes > 0x4000 {
            return Err(RegisterError::InvalidMemoryOverride(format!(
                "RAM size {} outside 1..=16384",
                self.ram_bytes
            )));
        }
        if u64::from(FLASH_START) + u64::from(self.flash_bytes) > 0x0100_0000 {
            return Err(RegisterError::InvalidMemoryOverride(format!(
                "flash size {} exceeds the 24-bit address space",
                self.flash_bytes
            )));
        }
        Ok(())
    }
}

/// Width of a data pointer able to reach all of flash.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AddressWidth {
    Bits16,
    Bits32,
}

impl AddressWidth {
    pub fn bits(self) -> u8 {
        match self {
            AddressWidth::Bits16 => 16,
            AddressWidth::Bits32 => 32,
        }
    }

    pub fn pointer_type(self) -> &'static str {
        match self {
            AddressWidth::Bits16 => "uint16_t",
            AddressWidth::Bits32 => "uint32_t",
        }
    }
}

/// An inclusive address range. Empty regions, and regions running past the
/// 32-bit address space, have no end address.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Region {
    pub start: u32,
    pub size: u32,
}

impl Region {
    pub fn end(&self) -> Option<u32> {
        self.size
            .checked_sub(1)
            .and_then(|last| self.start.checked_add(last))
    }

    pub fn contains(&self, address: u32) -> bool {
        self.end()
            .is_some_and(|end| address >= self.start && address <= end)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MemoryMap {
    pub flash: Region,
    pub ram: Region,
    pub eeprom: Region,
}

impl MemoryMap {
    pub fn new(size: &MemorySize, eeprom_start: u32) -> Self {
        Self {
            flash: Region {
                start: FLASH_START,
                size: size.flash_bytes,
            },
            ram: Region {
                start: RAM_START,
                size: size.ram_bytes,
            },
            eeprom: Region {
                start: eeprom_start,
                size: size.eeprom_bytes,
            },
        }
    }

    /// 16 bits while the last flash byte is below `0x10000`, 32 bits otherwise.
    pub fn address_width(&self) -> AddressWidth {
        match self.flash.end() {
            Some(end) if end > 0xFFFF => AddressWidth::Bits32,
            _ => AddressWidth::Bits16,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_address_width() {
        let map = MemoryMap::new(&MemorySize::new(32 * 1024, 2048, 1024), 0x4000);
        assert_eq!(map.flash.end(), Some(0xFFFF));
        assert_eq!(map.address_width(), AddressWidth::Bits16);

        let map = MemoryMap::new(&MemorySize::new(64 * 1024, 6 * 1024, 1536), 0x4000);
        assert_eq!(map.flash.end(), Some(0x17FFF));
        assert_eq!(map.address_width(), AddressWidth::Bits32);
        assert_eq!(map.address_width().pointer_type(), "uint32_t");
    }

    #[test]
    fn test_empty_region() {
        let map = MemoryMap::new(&MemorySize::new(8 * 1024, 1536, 0), 0x9800);
        assert_eq!(map.eeprom.end(), None);
        assert!(!map.eeprom.contains(0x9800));
        assert!(map.ram.contains(0x05FF));
        assert!(!map.ram.contains(0x0600));
    }

    #[test]
    fn test_region_end_does_not_wrap() {
        let region = Region {
            start: 0x4000,
            size: u32::MAX,
        };
        assert_eq!(region.end(), None);
        assert!(!region.contains(0x4000));
        let region = Region {
            start: 0,
            size: u32::MAX,
        };
        assert_eq!(region.end(), Some(0xFFFF_FFFE));
    }

    #[test]
    fn test_validate() {
        assert!(MemorySize::new(8 * 1024, 1024, 128).validate().is_ok());
        assert!(MemorySize::new(0, 1024, 128).validate().is_err());
        assert!(MemorySize::new(8 * 1024, 0x5000, 128).validate().is_err());
    }
}
