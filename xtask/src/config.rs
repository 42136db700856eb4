// Licensed under the Apache-2.0 license

//! Device selection from the command line or a TOML file.
//!
//! ```toml
//! part = "STM8S105C4"
//!
//! [memory]
//! flash_bytes = 32768
//! ram_bytes = 2048
//! eeprom_bytes = 1024
//! ```
//!
//! A device missing from the part table is described by its product line
//! instead. It then needs either a `[memory]` table or an explicit
//! `unspecified_minimum = true`.

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use stm8_registers_descriptors::{AnyLine, DeviceDescriptor, MemorySize};

use crate::DeviceArgs;

#[derive(Debug, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub(crate) struct DeviceConfig {
    pub part: Option<String>,
    pub line: Option<String>,
    #[serde(default)]
    pub unspecified_minimum: bool,
    pub memory: Option<MemorySize>,
}

impl DeviceConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("invalid device file {}", path.display()))
    }

    pub fn parse(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    pub fn device(&self) -> Result<DeviceDescriptor> {
        match (&self.part, &self.line) {
            (Some(part), None) => {
                let device = DeviceDescriptor::lookup(part)?;
                match self.memory {
                    Some(memory) => Ok(device.with_memory(memory)?),
                    None => Ok(device),
                }
            }
            (None, Some(line)) => {
                let line: AnyLine = line.parse()?;
                match self.memory {
                    Some(memory) => Ok(DeviceDescriptor::from_line(line, memory)?),
                    None if self.unspecified_minimum => {
                        Ok(DeviceDescriptor::unspecified_minimum(line))
                    }
                    None => bail!(
                        "memory sizes of {line} are unknown; add a [memory] table \
                         or set unspecified_minimum = true"
                    ),
                }
            }
            (Some(_), Some(_)) => bail!("give either `part` or `line`, not both"),
            (None, None) => bail!("one of `part` or `line` is required"),
        }
    }
}

/// Resolves the device selected on the command line.
pub(crate) fn device(args: &DeviceArgs) -> Result<DeviceDescriptor> {
    match (&args.part, &args.config) {
        (Some(part), _) => Ok(DeviceDescriptor::lookup(part)?),
        (None, Some(path)) => DeviceConfig::load(path)?.device(),
        (None, None) => bail!("no device given"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_part() {
        let config = DeviceConfig::parse("part = \"stm8s105c4\"").unwrap();
        let device = config.device().unwrap();
        assert_eq!(device.part, "STM8S105C4");
        assert_eq!(device.memory, MemorySize::new(16 * 1024, 2048, 1024));
    }

    #[test]
    fn test_memory_override() {
        let config = DeviceConfig::parse(
            r#"
            part = "STM8S105C4"

            [memory]
            flash_bytes = 32768
            ram_bytes = 2048
            eeprom_bytes = 1024
            "#,
        )
        .unwrap();
        let device = config.device().unwrap();
        assert_eq!(device.memory.flash_bytes, 32768);
        assert_eq!(device.memory_map().flash.end(), Some(0xFFFF));
    }

    #[test]
    fn test_line_requires_memory_or_opt_in() {
        let config = DeviceConfig::parse("line = \"STM8S105\"").unwrap();
        assert!(config.device().is_err());

        let config =
            DeviceConfig::parse("line = \"STM8S105\"\nunspecified_minimum = true").unwrap();
        let device = config.device().unwrap();
        assert_eq!(device.line_name(), "STM8S105");
        assert!(device.has_peripheral("UART2"));
    }

    #[test]
    fn test_line_with_memory() {
        let config = DeviceConfig::parse(
            r#"
            line = "STM8TL5x"

            [memory]
            flash_bytes = 16384
            ram_bytes = 4096
            eeprom_bytes = 1024
            "#,
        )
        .unwrap();
        let device = config.device().unwrap();
        assert_eq!(device.part, "STM8TL5x");
        assert_eq!(device.memory, MemorySize::new(16384, 4096, 1024));
        assert_eq!(device.memory_map().eeprom.start, 0xBC00);
        assert!(device.has_peripheral("PXS"));

        let config = DeviceConfig::parse(
            "line = \"STM8S105\"\n[memory]\nflash_bytes = 16384\nram_bytes = 2048\neeprom_bytes = 4096",
        )
        .unwrap();
        assert!(config.device().is_err());
    }

    #[test]
    fn test_invalid() {
        assert!(DeviceConfig::parse("part = \"STM8S105C4\"\nline = \"STM8S105\"")
            .unwrap()
            .device()
            .is_err());
        assert!(DeviceConfig::parse("").unwrap().device().is_err());
        assert!(DeviceConfig::parse("part = \"STM8X999\"").unwrap().device().is_err());
        assert!(DeviceConfig::parse("colour = \"blue\"").is_err());
        let config = DeviceConfig::parse(
            "part = \"STM8S103F3\"\n[memory]\nflash_bytes = 0\nram_bytes = 1024\neeprom_bytes = 0",
        )
        .unwrap();
        assert!(config.device().is_err());
    }

    #[test]
    fn test_load_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "part = \"STM8L101F3\"").unwrap();
        let args = DeviceArgs {
            part: None,
            config: Some(file.path().to_path_buf()),
        };
        let device = device(&args).unwrap();
        assert_eq!(device.family_name(), "STM8L10x");
        assert!(device.has_peripheral("USART"));
    }
}
