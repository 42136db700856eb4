// Licensed under the Apache-2.0 license

//! Device families, product lines and peripheral kinds.
//!
//! Each family has its own peripheral kind enum, so asking for a peripheral
//! that a family never has (COMP on an STM8S, CAN on an STM8L10x) does not
//! type-check. Product lines select layout variants inside a family.

use std::fmt::{Debug, Display};
use std::hash::Hash;
use std::str::FromStr;

use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};

use crate::device::{self, PeripheralInstance};
use crate::layout::{self, RegisterLayout};
use crate::memory::MemorySize;
use crate::vectors::{self, VectorSlot};

pub trait PeripheralKind:
    Copy
    + Eq
    + Ord
    + Hash
    + Debug
    + Display
    + FromStr
    + IntoEnumIterator
    + Into<&'static str>
    + Send
    + Sync
    + 'static
{
    fn name(self) -> &'static str {
        self.into()
    }

    /// Name of the layout shared by several instances, e.g. all ports use `GPIO`.
    fn layout_name(self) -> &'static str {
        self.name()
    }
}

pub trait ProductLine:
    Copy
    + Eq
    + Hash
    + Debug
    + Display
    + FromStr
    + IntoEnumIterator
    + Into<&'static str>
    + Send
    + Sync
    + 'static
{
    fn name(self) -> &'static str {
        self.into()
    }
}

/// A family of devices sharing peripheral kinds, vector table and memory map rules.
pub trait Family: Copy + Debug + Send + Sync + 'static {
    const NAME: &'static str;
    /// Largest data EEPROM the address map leaves room for.
    const MAX_EEPROM_BYTES: u32;
    /// Smallest memory configuration found in the family.
    const MINIMUM_MEMORY: MemorySize;

    type Kind: PeripheralKind;
    type Line: ProductLine;

    /// Start of a data EEPROM of `eeprom_bytes`.
    fn eeprom_start(eeprom_bytes: u32) -> u32;

    fn layout_for(kind: Self::Kind, line: Self::Line) -> RegisterLayout;

    fn vector_slots() -> &'static [VectorSlot];

    /// Peripheral instances of every device in `line`.
    fn peripherals(line: Self::Line) -> Vec<PeripheralInstance<Self::Kind>>;
}

/// STM8S and STM8AF devices.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stm8AfS {}

/// STM8L101 low-power devices.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stm8L10x {}

/// STM8TL5x touch-sensing devices.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stm8Tl5x {}

#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Display,
    EnumIter,
    EnumString,
    IntoStaticStr,
)]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum AfsKind {
    Opt,
    PortA,
    PortB,
    PortC,
    PortD,
    PortE,
    PortF,
    PortG,
    PortH,
    PortI,
    Flash,
    Exti,
    Rst,
    Clk,
    Wwdg,
    Iwdg,
    Awu,
    Beep,
    Spi,
    I2c,
    Uart1,
    Uart2,
    Uart3,
    Uart4,
    Tim1,
    Tim2,
    Tim3,
    Tim4,
    Tim5,
    Tim6,
    Adc1,
    Adc2,
    Can,
    Cfg,
    Itc,
    Dm,
    Uid,
}

impl PeripheralKind for AfsKind {
    fn layout_name(self) -> &'static str {
        use AfsKind::*;
        match self {
            PortA | PortB | PortC | PortD | PortE | PortF | PortG | PortH | PortI => "GPIO",
            _ => self.name(),
        }
    }
}

#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Display,
    EnumIter,
    EnumString,
    IntoStaticStr,
)]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum L10xKind {
    Opt,
    PortA,
    PortB,
    PortC,
    PortD,
    Flash,
    Exti,
    Wfe,
    Rst,
    Clk,
    Iwdg,
    Awu,
    Beep,
    Spi,
    I2c,
    Usart,
    Tim2,
    Tim3,
    Tim4,
    Irtim,
    Comp,
    Cfg,
    Itc,
    Dm,
    Uid,
}

impl PeripheralKind for L10xKind {
    fn layout_name(self) -> &'static str {
        use L10xKind::*;
        match self {
            PortA | PortB | PortC | PortD => "GPIO",
            _ => self.name(),
        }
    }
}

#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Display,
    EnumIter,
    EnumString,
    IntoStaticStr,
)]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum Tl5xKind {
    Opt,
    PortA,
    PortB,
    PortD,
    Flash,
    Syscfg,
    Exti,
    Wfe,
    Rst,
    Clk,
    Wwdg,
    Iwdg,
    Awu,
    Beep,
    Spi,
    I2c,
    Usart,
    Tim2,
    Tim3,
    Tim4,
    Pxs,
    Cfg,
    Itc,
    Dm,
    Uid,
}

impl PeripheralKind for Tl5xKind {
    fn layout_name(self) -> &'static str {
        use Tl5xKind::*;
        match self {
            PortA | PortB | PortD => "GPIO",
            _ => self.name(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumIter, EnumString, IntoStaticStr)]
#[strum(ascii_case_insensitive)]
pub enum AfsLine {
    #[strum(serialize = "STM8S001")]
    S001,
    #[strum(serialize = "STM8S003")]
    S003,
    #[strum(serialize = "STM8S005")]
    S005,
    #[strum(serialize = "STM8S007")]
    S007,
    #[strum(serialize = "STM8S103")]
    S103,
    #[strum(serialize = "STM8S105")]
    S105,
    #[strum(serialize = "STM8S207")]
    S207,
    #[strum(serialize = "STM8S208")]
    S208,
    #[strum(serialize = "STM8S903")]
    S903,
    #[strum(serialize = "STM8AF622x")]
    Af622x,
    #[strum(serialize = "STM8AF626x")]
    Af626x,
    #[strum(serialize = "STM8AF52Ax")]
    Af52ax,
    #[strum(serialize = "STM8AF62Ax")]
    Af62ax,
    #[strum(serialize = "STM8AF636x")]
    Af636x,
}

impl AfsLine {
    /// Low-density lines have two reserved bytes after `CR1` in TIM2 and TIM4.
    pub fn has_low_density_timers(self) -> bool {
        matches!(self, AfsLine::S001 | AfsLine::S003 | AfsLine::S103)
    }
}

impl ProductLine for AfsLine {}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumIter, EnumString, IntoStaticStr)]
#[strum(ascii_case_insensitive)]
pub enum L10xLine {
    #[strum(serialize = "STM8L10x")]
    L10x,
}

impl ProductLine for L10xLine {}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumIter, EnumString, IntoStaticStr)]
#[strum(ascii_case_insensitive)]
pub enum Tl5xLine {
    #[strum(serialize = "STM8TL5x")]
    Tl5x,
}

impl ProductLine for Tl5xLine {}

impl Family for Stm8AfS {
    const NAME: &'static str = "STM8AF_STM8S";
    /// Option bytes follow at `0x4800`.
    const MAX_EEPROM_BYTES: u32 = 2 * 1024;
    const MINIMUM_MEMORY: MemorySize = MemorySize {
        flash_bytes: 2 * 1024,
        ram_bytes: 1024,
        eeprom_bytes: 128,
    };

    type Kind = AfsKind;
    type Line = AfsLine;

    fn eeprom_start(_eeprom_bytes: u32) -> u32 {
        0x4000
    }

    fn layout_for(kind: AfsKind, line: AfsLine) -> RegisterLayout {
        layout::stm8s::layout(kind, line)
    }

    fn vector_slots() -> &'static [VectorSlot] {
        vectors::STM8S_VECTORS
    }

    fn peripherals(line: AfsLine) -> Vec<PeripheralInstance<AfsKind>> {
        device::afs_peripherals(line)
    }
}

impl Family for Stm8L10x {
    const NAME: &'static str = "STM8L10x";
    const MAX_EEPROM_BYTES: u32 = 2 * 1024;
    const MINIMUM_MEMORY: MemorySize = MemorySize {
        flash_bytes: 2 * 1024,
        ram_bytes: 1536,
        eeprom_bytes: 0,
    };

    type Kind = L10xKind;
    type Line = L10xLine;

    fn eeprom_start(_eeprom_bytes: u32) -> u32 {
        0x9800
    }

    fn layout_for(kind: L10xKind, _line: L10xLine) -> RegisterLayout {
        layout::stm8l::layout(kind)
    }

    fn vector_slots() -> &'static [VectorSlot] {
        vectors::STM8L10X_VECTORS
    }

    fn peripherals(_line: L10xLine) -> Vec<PeripheralInstance<L10xKind>> {
        device::l10x_peripherals()
    }
}

impl Family for Stm8Tl5x {
    const NAME: &'static str = "STM8TL5x";
    const MAX_EEPROM_BYTES: u32 = 2 * 1024;
    const MINIMUM_MEMORY: MemorySize = MemorySize {
        flash_bytes: 2 * 1024,
        ram_bytes: 1536,
        eeprom_bytes: 0,
    };

    type Kind = Tl5xKind;
    type Line = Tl5xLine;

    /// Data EEPROM is carved from the top of the first 16 KiB of flash.
    fn eeprom_start(eeprom_bytes: u32) -> u32 {
        0xC000u32.saturating_sub(eeprom_bytes)
    }

    fn layout_for(kind: Tl5xKind, _line: Tl5xLine) -> RegisterLayout {
        layout::stm8tl::layout(kind)
    }

    fn vector_slots() -> &'static [VectorSlot] {
        vectors::STM8TL5X_VECTORS
    }

    fn peripherals(_line: Tl5xLine) -> Vec<PeripheralInstance<Tl5xKind>> {
        device::tl5x_peripherals()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_names() {
        assert_eq!(AfsKind::PortA.name(), "PORTA");
        assert_eq!(AfsKind::I2c.name(), "I2C");
        assert_eq!(AfsKind::Uart1.to_string(), "UART1");
        assert_eq!(AfsKind::PortG.layout_name(), "GPIO");
        assert_eq!(L10xKind::Usart.layout_name(), "USART");
        assert_eq!("tim4".parse::<AfsKind>(), Ok(AfsKind::Tim4));
        assert!("COMP".parse::<AfsKind>().is_err());
        assert_eq!("comp".parse::<L10xKind>(), Ok(L10xKind::Comp));
        assert_eq!(Tl5xKind::PortD.layout_name(), "GPIO");
        assert_eq!("pxs".parse::<Tl5xKind>(), Ok(Tl5xKind::Pxs));
        assert!("PXS".parse::<L10xKind>().is_err());
    }

    #[test]
    fn test_line_names() {
        assert_eq!(AfsLine::Af626x.to_string(), "STM8AF626x");
        assert_eq!("stm8s103".parse::<AfsLine>(), Ok(AfsLine::S103));
        assert_eq!("STM8L10X".parse::<L10xLine>(), Ok(L10xLine::L10x));
        assert_eq!("stm8tl5x".parse::<Tl5xLine>(), Ok(Tl5xLine::Tl5x));
        assert!(AfsLine::S103.has_low_density_timers());
        assert!(!AfsLine::S105.has_low_density_timers());
    }

    #[test]
    fn test_eeprom_start() {
        assert_eq!(Stm8AfS::eeprom_start(1024), 0x4000);
        assert_eq!(Stm8L10x::eeprom_start(0), 0x9800);
        assert_eq!(Stm8Tl5x::eeprom_start(2048), 0xB800);
        assert_eq!(Stm8Tl5x::eeprom_start(u32::MAX), 0);
    }
}
