// Licensed under the Apache-2.0 license

//! Device descriptor table.
//!
//! Maps a part number to its product line, memory sizes and the base
//! addresses of the peripherals it carries. Peripheral presence is the only
//! thing that decides which symbols are emitted for a device.

use std::fmt;
use std::str::FromStr;

use log::warn;

use crate::error::{RegisterError, RegisterResult};
use crate::family::{
    AfsKind, AfsLine, Family, L10xKind, L10xLine, PeripheralKind, ProductLine, Stm8AfS, Stm8L10x,
    Stm8Tl5x, Tl5xKind, Tl5xLine,
};
use crate::memory::{AddressWidth, MemoryMap, MemorySize};

/// A peripheral block placed at a fixed address.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PeripheralInstance<K> {
    pub kind: K,
    pub base_address: u32,
}

impl<K: PeripheralKind> PeripheralInstance<K> {
    pub fn name(&self) -> &'static str {
        self.kind.name()
    }
}

const fn at<K>(kind: K, base_address: u32) -> PeripheralInstance<K> {
    PeripheralInstance { kind, base_address }
}

/// Family specific part of a device descriptor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Variant<F: Family> {
    pub line: F::Line,
    pub peripherals: Vec<PeripheralInstance<F::Kind>>,
}

impl<F: Family> Variant<F> {
    pub fn new(line: F::Line) -> Self {
        Self {
            line,
            peripherals: F::peripherals(line),
        }
    }

    pub fn peripheral(&self, name: &str) -> Option<&PeripheralInstance<F::Kind>> {
        self.peripherals
            .iter()
            .find(|p| p.name().eq_ignore_ascii_case(name))
    }

    pub fn family_name(&self) -> &'static str {
        F::NAME
    }

    pub fn line_name(&self) -> &'static str {
        self.line.name()
    }

    fn peripheral_refs(&self) -> Vec<PeripheralRef> {
        self.peripherals.iter().map(PeripheralRef::from).collect()
    }

    fn check_memory(&self, memory: &MemorySize) -> RegisterResult<()> {
        memory.validate()?;
        if memory.eeprom_bytes > F::MAX_EEPROM_BYTES {
            return Err(RegisterError::InvalidMemoryOverride(format!(
                "EEPROM size {} exceeds the {} maximum of {}",
                memory.eeprom_bytes,
                F::NAME,
                F::MAX_EEPROM_BYTES
            )));
        }
        Ok(())
    }

    fn memory_map(&self, memory: &MemorySize) -> MemoryMap {
        MemoryMap::new(memory, F::eeprom_start(memory.eeprom_bytes))
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DeviceVariant {
    Stm8AfS(Variant<Stm8AfS>),
    Stm8L10x(Variant<Stm8L10x>),
    Stm8Tl5x(Variant<Stm8Tl5x>),
}

/// Runs `$body` with `$v` bound to the family specific [`Variant`].
macro_rules! each_variant {
    ($variant:expr, $v:ident => $body:expr) => {
        match $variant {
            DeviceVariant::Stm8AfS($v) => $body,
            DeviceVariant::Stm8L10x($v) => $body,
            DeviceVariant::Stm8Tl5x($v) => $body,
        }
    };
}

/// Product line of either family, as given on the command line or in a
/// configuration file.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnyLine {
    Stm8AfS(AfsLine),
    Stm8L10x(L10xLine),
    Stm8Tl5x(Tl5xLine),
}

impl FromStr for AnyLine {
    type Err = RegisterError;

    fn from_str(s: &str) -> RegisterResult<Self> {
        if let Ok(line) = s.parse::<AfsLine>() {
            return Ok(AnyLine::Stm8AfS(line));
        }
        if let Ok(line) = s.parse::<L10xLine>() {
            return Ok(AnyLine::Stm8L10x(line));
        }
        if let Ok(line) = s.parse::<Tl5xLine>() {
            return Ok(AnyLine::Stm8Tl5x(line));
        }
        Err(RegisterError::UnknownLine(s.to_string()))
    }
}

impl fmt::Display for AnyLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnyLine::Stm8AfS(line) => write!(f, "{line}"),
            AnyLine::Stm8L10x(line) => write!(f, "{line}"),
            AnyLine::Stm8Tl5x(line) => write!(f, "{line}"),
        }
    }
}

/// Family independent view of a peripheral instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PeripheralRef {
    pub name: &'static str,
    pub layout_name: &'static str,
    pub base_address: u32,
}

impl<K: PeripheralKind> From<&PeripheralInstance<K>> for PeripheralRef {
    fn from(p: &PeripheralInstance<K>) -> Self {
        Self {
            name: p.kind.name(),
            layout_name: p.kind.layout_name(),
            base_address: p.base_address,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeviceDescriptor {
    pub part: String,
    pub memory: MemorySize,
    pub variant: DeviceVariant,
}

struct PartEntry {
    part: &'static str,
    line: AnyLine,
    memory: MemorySize,
}

const fn afs(part: &'static str, line: AfsLine, flash_k: u32, ram: u32, eeprom: u32) -> PartEntry {
    PartEntry {
        part,
        line: AnyLine::Stm8AfS(line),
        memory: MemorySize::new(flash_k * 1024, ram, eeprom),
    }
}

static PARTS: &[PartEntry] = &[
    afs("STM8S001J3", AfsLine::S001, 8, 1024, 128),
    afs("STM8S003F3", AfsLine::S003, 8, 1024, 128),
    afs("STM8S005K6", AfsLine::S005, 32, 2048, 128),
    afs("STM8S007C8", AfsLine::S007, 64, 6 * 1024, 128),
    afs("STM8S103F3", AfsLine::S103, 8, 1024, 640),
    afs("STM8S105C4", AfsLine::S105, 16, 2048, 1024),
    afs("STM8S105K6", AfsLine::S105, 32, 2048, 1024),
    afs("STM8S105S4", AfsLine::S105, 16, 2048, 1024),
    afs("STM8S207C8", AfsLine::S207, 64, 6 * 1024, 1536),
    afs("STM8S207R8", AfsLine::S207, 64, 6 * 1024, 1536),
    afs("STM8S208S6", AfsLine::S208, 32, 6 * 1024, 1536),
    afs("STM8S903K3", AfsLine::S903, 8, 1024, 640),
    afs("STM8AF6223", AfsLine::Af622x, 8, 1024, 640),
    afs("STM8AF6269", AfsLine::Af626x, 32, 6 * 1024, 1024),
    afs("STM8AF6366", AfsLine::Af636x, 32, 2048, 1024),
    afs("STM8AF52A8", AfsLine::Af52ax, 64, 6 * 1024, 2048),
    afs("STM8AF62A8", AfsLine::Af62ax, 64, 6 * 1024, 2048),
    PartEntry {
        part: "STM8L101F3",
        line: AnyLine::Stm8L10x(L10xLine::L10x),
        memory: MemorySize::new(8 * 1024, 1536, 0),
    },
    PartEntry {
        part: "STM8TL53G4",
        line: AnyLine::Stm8Tl5x(Tl5xLine::Tl5x),
        memory: MemorySize::new(16 * 1024, 4096, 2048),
    },
];

/// Part numbers known to the descriptor table.
pub fn supported_parts() -> impl Iterator<Item = &'static str> {
    PARTS.iter().map(|p| p.part)
}

impl DeviceDescriptor {
    /// Looks up a part number, ignoring case.
    pub fn lookup(part: &str) -> RegisterResult<Self> {
        let entry = PARTS
            .iter()
            .find(|p| p.part.eq_ignore_ascii_case(part))
            .ok_or_else(|| RegisterError::UnknownDevice(part.to_string()))?;
        Ok(Self::build(entry.part.to_string(), entry.line, entry.memory))
    }

    /// Describes an unlisted device of `line` using the smallest memory
    /// configuration of its family.
    pub fn unspecified_minimum(line: AnyLine) -> Self {
        let memory = match line {
            AnyLine::Stm8AfS(_) => Stm8AfS::MINIMUM_MEMORY,
            AnyLine::Stm8L10x(_) => Stm8L10x::MINIMUM_MEMORY,
            AnyLine::Stm8Tl5x(_) => Stm8Tl5x::MINIMUM_MEMORY,
        };
        warn!(
            "memory sizes for {line} not specified, assuming family minimum \
             (flash {} B, RAM {} B, EEPROM {} B)",
            memory.flash_bytes, memory.ram_bytes, memory.eeprom_bytes
        );
        Self::build(line.to_string(), line, memory)
    }

    /// Describes an unlisted device of `line` with known memory sizes.
    pub fn from_line(line: AnyLine, memory: MemorySize) -> RegisterResult<Self> {
        let device = Self::build(line.to_string(), line, memory);
        each_variant!(&device.variant, v => v.check_memory(&memory))?;
        Ok(device)
    }

    /// Replaces the memory sizes, e.g. for a variant missing from the table.
    pub fn with_memory(mut self, memory: MemorySize) -> RegisterResult<Self> {
        each_variant!(&self.variant, v => v.check_memory(&memory))?;
        self.memory = memory;
        Ok(self)
    }

    fn build(part: String, line: AnyLine, memory: MemorySize) -> Self {
        let variant = match line {
            AnyLine::Stm8AfS(line) => DeviceVariant::Stm8AfS(Variant::new(line)),
            AnyLine::Stm8L10x(line) => DeviceVariant::Stm8L10x(Variant::new(line)),
            AnyLine::Stm8Tl5x(line) => DeviceVariant::Stm8Tl5x(Variant::new(line)),
        };
        Self {
            part,
            memory,
            variant,
        }
    }

    pub fn family_name(&self) -> &'static str {
        each_variant!(&self.variant, v => v.family_name())
    }

    pub fn line(&self) -> AnyLine {
        match &self.variant {
            DeviceVariant::Stm8AfS(v) => AnyLine::Stm8AfS(v.line),
            DeviceVariant::Stm8L10x(v) => AnyLine::Stm8L10x(v.line),
            DeviceVariant::Stm8Tl5x(v) => AnyLine::Stm8Tl5x(v.line),
        }
    }

    pub fn line_name(&self) -> &'static str {
        each_variant!(&self.variant, v => v.line_name())
    }

    /// Returns `None` when the device does not carry the peripheral.
    pub fn peripheral(&self, name: &str) -> Option<PeripheralRef> {
        each_variant!(&self.variant, v => v.peripheral(name).map(PeripheralRef::from))
    }

    pub fn has_peripheral(&self, name: &str) -> bool {
        self.peripheral(name).is_some()
    }

    /// All peripherals ordered by base address.
    pub fn peripherals(&self) -> Vec<PeripheralRef> {
        let mut all = each_variant!(&self.variant, v => v.peripheral_refs());
        all.sort_by_key(|p| (p.base_address, p.name));
        all
    }

    pub fn memory_map(&self) -> MemoryMap {
        each_variant!(&self.variant, v => v.memory_map(&self.memory))
    }

    pub fn address_width(&self) -> AddressWidth {
        self.memory_map().address_width()
    }
}

const UID_LOW_DENSITY: u32 = 0x4865;
const UID_MEDIUM_DENSITY: u32 = 0x48CD;

/// Peripherals of an STM8S/STM8AF product line.
pub(crate) fn afs_peripherals(line: AfsLine) -> Vec<PeripheralInstance<AfsKind>> {
    use AfsKind::*;
    use AfsLine::*;

    let mut list = vec![
        at(Opt, 0x4800),
        at(Flash, 0x505A),
        at(Exti, 0x50A0),
        at(Rst, 0x50B3),
        at(Clk, 0x50C0),
        at(Wwdg, 0x50D1),
        at(Iwdg, 0x50E0),
        at(Awu, 0x50F0),
        at(Beep, 0x50F3),
        at(Spi, 0x5200),
        at(I2c, 0x5210),
        at(Tim1, 0x5250),
        at(Cfg, 0x7F60),
        at(Itc, 0x7F70),
    ];

    let ports: &[AfsKind] = match line {
        S001 | S003 | S103 | S903 | Af622x => &[PortA, PortB, PortC, PortD, PortE, PortF],
        S005 | S105 | Af626x => &[PortA, PortB, PortC, PortD, PortE, PortF, PortG],
        Af636x => &[PortA, PortB, PortC, PortD, PortE, PortF],
        S007 | S207 | S208 | Af52ax | Af62ax => &[
            PortA, PortB, PortC, PortD, PortE, PortF, PortG, PortH, PortI,
        ],
    };
    for (index, port) in ports.iter().enumerate() {
        list.push(at(*port, 0x5000 + 5 * index as u32));
    }

    let specific = match line {
        S001 | S003 | S103 => vec![
            at(Uart1, 0x5230),
            at(Tim2, 0x5300),
            at(Tim4, 0x5340),
            at(Adc1, 0x53E0),
        ],
        S903 => vec![
            at(Uart1, 0x5230),
            at(Tim5, 0x5300),
            at(Tim6, 0x5340),
            at(Adc1, 0x53E0),
        ],
        Af622x => vec![
            at(Uart4, 0x5230),
            at(Tim5, 0x5300),
            at(Tim6, 0x5340),
            at(Adc1, 0x53E0),
        ],
        S005 | S105 | Af626x | Af636x => vec![
            at(Uart2, 0x5240),
            at(Tim2, 0x5300),
            at(Tim3, 0x5320),
            at(Tim4, 0x5340),
            at(Adc1, 0x53E0),
        ],
        S007 | S207 | Af62ax => vec![
            at(Uart1, 0x5230),
            at(Uart3, 0x5240),
            at(Tim2, 0x5300),
            at(Tim3, 0x5320),
            at(Tim4, 0x5340),
            at(Adc2, 0x5400),
        ],
        S208 | Af52ax => vec![
            at(Uart1, 0x5230),
            at(Uart3, 0x5240),
            at(Tim2, 0x5300),
            at(Tim3, 0x5320),
            at(Tim4, 0x5340),
            at(Adc2, 0x5400),
            at(Can, 0x5420),
        ],
    };
    list.extend(specific);

    match line {
        S001 | S103 | S903 => list.push(at(Uid, UID_LOW_DENSITY)),
        S105 | S207 | S208 => list.push(at(Uid, UID_MEDIUM_DENSITY)),
        _ => {}
    }
    if matches!(line, S105 | S207) {
        list.push(at(Dm, 0x7F90));
    }

    list.sort_by_key(|p| p.base_address);
    list
}

/// Peripherals of the STM8L10x line.
pub(crate) fn l10x_peripherals() -> Vec<PeripheralInstance<L10xKind>> {
    use L10xKind::*;
    vec![
        at(Opt, 0x4800),
        at(Uid, 0x4925),
        at(PortA, 0x5000),
        at(PortB, 0x5005),
        at(PortC, 0x500A),
        at(PortD, 0x500F),
        at(Flash, 0x5050),
        at(Exti, 0x50A0),
        at(Wfe, 0x50A6),
        at(Rst, 0x50B0),
        at(Clk, 0x50C0),
        at(Iwdg, 0x50E0),
        at(Awu, 0x50F0),
        at(Beep, 0x50F3),
        at(Spi, 0x5200),
        at(I2c, 0x5210),
        at(Usart, 0x5230),
        at(Tim2, 0x5250),
        at(Tim3, 0x5280),
        at(Tim4, 0x52E0),
        at(Irtim, 0x52FF),
        at(Comp, 0x5300),
        at(Cfg, 0x7F60),
        at(Itc, 0x7F70),
        at(Dm, 0x7F90),
    ]
}

/// Peripherals of the STM8TL5x line.
pub(crate) fn tl5x_peripherals() -> Vec<PeripheralInstance<Tl5xKind>> {
    use Tl5xKind::*;
    vec![
        at(Opt, 0x4800),
        at(Uid, 0x4925),
        at(PortA, 0x5000),
        at(PortB, 0x5005),
        at(PortD, 0x500F),
        at(Flash, 0x5050),
        at(Syscfg, 0x509E),
        at(Exti, 0x50A0),
        at(Wfe, 0x50A6),
        at(Rst, 0x50B0),
        at(Clk, 0x50C0),
        at(Wwdg, 0x50D3),
        at(Iwdg, 0x50E0),
        at(Awu, 0x50F0),
        at(Beep, 0x50F3),
        at(Spi, 0x5200),
        at(I2c, 0x5210),
        at(Usart, 0x5230),
        at(Tim2, 0x5250),
        at(Tim3, 0x5280),
        at(Tim4, 0x52E0),
        at(Pxs, 0x5300),
        at(Cfg, 0x7F60),
        at(Itc, 0x7F70),
        at(Dm, 0x7F90),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_case_insensitive() {
        let device = DeviceDescriptor::lookup("stm8s105c4").unwrap();
        assert_eq!(device.part, "STM8S105C4");
        assert_eq!(device.memory, MemorySize::new(16 * 1024, 2048, 1024));
        assert_eq!(device.line_name(), "STM8S105");
        assert_eq!(device.family_name(), "STM8AF_STM8S");
    }

    #[test]
    fn test_unknown_device() {
        assert_eq!(
            DeviceDescriptor::lookup("STM8S999"),
            Err(RegisterError::UnknownDevice("STM8S999".into()))
        );
    }

    #[test]
    fn test_peripheral_presence() {
        let af6269 = DeviceDescriptor::lookup("STM8AF6269").unwrap();
        assert!(af6269.peripheral("UART1").is_none());
        assert_eq!(
            af6269.peripheral("uart2").map(|p| p.base_address),
            Some(0x5240)
        );

        let s208 = DeviceDescriptor::lookup("STM8S208S6").unwrap();
        assert!(s208.has_peripheral("CAN"));
        assert_eq!(s208.peripheral("PORTI").map(|p| p.base_address), Some(0x5028));

        let l101 = DeviceDescriptor::lookup("STM8L101F3").unwrap();
        assert!(l101.has_peripheral("COMP"));
        assert!(!l101.has_peripheral("WWDG"));
        assert_eq!(l101.peripheral("PORTD").map(|p| p.layout_name), Some("GPIO"));

        let tl53 = DeviceDescriptor::lookup("STM8TL53G4").unwrap();
        assert_eq!(tl53.family_name(), "STM8TL5x");
        assert_eq!(tl53.peripheral("PXS").map(|p| p.base_address), Some(0x5300));
        assert_eq!(tl53.peripheral("WWDG").map(|p| p.base_address), Some(0x50D3));
        assert!(!tl53.has_peripheral("PORTC"));
        assert!(!tl53.has_peripheral("COMP"));
    }

    #[test]
    fn test_uid_placement() {
        let uid = |part: &str| {
            DeviceDescriptor::lookup(part)
                .unwrap()
                .peripheral("UID")
                .map(|p| p.base_address)
        };
        assert_eq!(uid("STM8S103F3"), Some(0x4865));
        assert_eq!(uid("STM8S207R8"), Some(0x48CD));
        assert_eq!(uid("STM8S003F3"), None);
        assert_eq!(uid("STM8AF6366"), None);
    }

    #[test]
    fn test_memory_map() {
        let device = DeviceDescriptor::lookup("STM8S207R8").unwrap();
        let map = device.memory_map();
        assert_eq!(map.flash.end(), Some(0x17FFF));
        assert_eq!(map.eeprom.start, 0x4000);
        assert_eq!(device.address_width(), AddressWidth::Bits32);

        let l101 = DeviceDescriptor::lookup("STM8L101F3").unwrap();
        assert_eq!(l101.memory_map().eeprom.start, 0x9800);
        assert_eq!(l101.address_width(), AddressWidth::Bits16);

        let tl53 = DeviceDescriptor::lookup("STM8TL53G4").unwrap();
        let map = tl53.memory_map();
        assert_eq!(map.eeprom.start, 0xB800);
        assert_eq!(map.eeprom.end(), Some(0xBFFF));
        assert!(map.flash.contains(0xB800));
    }

    #[test]
    fn test_unspecified_minimum() {
        let line: AnyLine = "STM8S105".parse().unwrap();
        let device = DeviceDescriptor::unspecified_minimum(line);
        assert_eq!(device.memory, MemorySize::new(2048, 1024, 128));
        assert!(device.has_peripheral("UART2"));

        let l10x = DeviceDescriptor::unspecified_minimum(AnyLine::Stm8L10x(L10xLine::L10x));
        assert_eq!(l10x.memory.ram_bytes, 1536);
        assert_eq!(l10x.memory.eeprom_bytes, 0);
        assert!("STM8X000".parse::<AnyLine>().is_err());
        assert_eq!(
            "STM8TL5x".parse::<AnyLine>(),
            Ok(AnyLine::Stm8Tl5x(Tl5xLine::Tl5x))
        );
    }

    #[test]
    fn test_from_line() {
        let line: AnyLine = "STM8S105".parse().unwrap();
        let device =
            DeviceDescriptor::from_line(line, MemorySize::new(32 * 1024, 2048, 1024)).unwrap();
        assert_eq!(device.part, "STM8S105");
        assert_eq!(device.memory, MemorySize::new(32 * 1024, 2048, 1024));
        assert!(device.has_peripheral("UART2"));
        assert!(DeviceDescriptor::from_line(line, MemorySize::new(32 * 1024, 0, 1024)).is_err());
    }

    #[test]
    fn test_with_memory() {
        let device = DeviceDescriptor::lookup("STM8S105C4")
            .unwrap()
            .with_memory(MemorySize::new(32 * 1024, 2048, 1024))
            .unwrap();
        assert_eq!(device.memory.flash_bytes, 32 * 1024);
        assert!(DeviceDescriptor::lookup("STM8S105C4")
            .unwrap()
            .with_memory(MemorySize::new(0, 2048, 1024))
            .is_err());
    }

    #[test]
    fn test_eeprom_bounded_by_family() {
        let s105 = DeviceDescriptor::lookup("STM8S105C4").unwrap();
        let device = s105
            .clone()
            .with_memory(MemorySize::new(16 * 1024, 2048, 2048))
            .unwrap();
        assert_eq!(device.memory_map().eeprom.end(), Some(0x47FF));
        assert!(matches!(
            s105.clone()
                .with_memory(MemorySize::new(16 * 1024, 2048, 4096)),
            Err(RegisterError::InvalidMemoryOverride(_))
        ));
        assert!(s105
            .with_memory(MemorySize::new(16 * 1024, 2048, u32::MAX))
            .is_err());
        assert!(DeviceDescriptor::from_line(
            AnyLine::Stm8L10x(L10xLine::L10x),
            MemorySize::new(8 * 1024, 1536, 4096)
        )
        .is_err());
    }

    #[test]
    fn test_supported_parts() {
        let parts: Vec<_> = supported_parts().collect();
        assert_eq!(parts.len(), 19);
        for part in parts {
            assert!(DeviceDescriptor::lookup(part).is_ok());
        }
    }
}
