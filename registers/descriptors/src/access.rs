// Licensed under the Apache-2.0 license

//! Symbolic register access over an 8-bit bus.
//!
//! [`Registers`] checks every access against the resolved symbol table:
//! read-only registers reject writes, write-only registers reject reads and
//! read-modify-write, and field writes are range checked. Capture/compare
//! fields are only reachable while the register is in the matching mode.

use std::collections::BTreeMap;

use crate::ccmr::{self, CcmrMode};
use crate::error::{RegisterError, RegisterResult};
use crate::layout::{BitLayout, CcmrTag};
use crate::resolver::{ResolvedField, ResolvedRegister, ResolvedSymbolTable};

/// Byte-wide access to the device address space.
pub trait RegisterBus {
    fn read_u8(&mut self, address: u32) -> u8;
    fn write_u8(&mut self, address: u32, value: u8);
}

/// Sparse in-memory address space for host side testing.
///
/// Unmapped addresses read as zero. Every write is also appended to a log
/// so tests can check access ordering.
#[derive(Clone, Debug, Default)]
pub struct MemoryBus {
    memory: BTreeMap<u32, u8>,
    writes: Vec<(u32, u8)>,
}

impl MemoryBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bus with every register of `table` holding its reset value.
    pub fn with_reset_values(table: &ResolvedSymbolTable) -> Self {
        Self {
            memory: table
                .registers()
                .map(|r| (r.address, r.reset_value))
                .collect(),
            writes: Vec::new(),
        }
    }

    pub fn peek(&self, address: u32) -> u8 {
        self.memory.get(&address).copied().unwrap_or(0)
    }

    pub fn writes(&self) -> &[(u32, u8)] {
        &self.writes
    }
}

impl RegisterBus for MemoryBus {
    fn read_u8(&mut self, address: u32) -> u8 {
        self.peek(address)
    }

    fn write_u8(&mut self, address: u32, value: u8) {
        self.memory.insert(address, value);
        self.writes.push((address, value));
    }
}

/// Register access for one device through a bus.
pub struct Registers<'t, B> {
    table: &'t ResolvedSymbolTable,
    bus: B,
}

impl<'t, B: RegisterBus> Registers<'t, B> {
    pub fn new(table: &'t ResolvedSymbolTable, bus: B) -> Self {
        Self { table, bus }
    }

    pub fn table(&self) -> &'t ResolvedSymbolTable {
        self.table
    }

    pub fn bus(&self) -> &B {
        &self.bus
    }

    pub fn into_bus(self) -> B {
        self.bus
    }

    pub fn read_register(&mut self, peripheral: &str, register: &str) -> RegisterResult<u8> {
        let reg = self.table.register(peripheral, register)?;
        check(reg, reg.access.can_read(), "read")?;
        Ok(self.bus.read_u8(reg.address))
    }

    pub fn write_register(
        &mut self,
        peripheral: &str,
        register: &str,
        value: u8,
    ) -> RegisterResult<()> {
        let reg = self.table.register(peripheral, register)?;
        check(reg, reg.access.can_write(), "write")?;
        self.bus.write_u8(reg.address, value);
        Ok(())
    }

    pub fn read_field(
        &mut self,
        peripheral: &str,
        register: &str,
        field: &str,
    ) -> RegisterResult<u8> {
        let reg = self.table.register(peripheral, register)?;
        let field = lookup_field(reg, field)?;
        check(reg, reg.access.can_read(), "read")?;
        let current = self.bus.read_u8(reg.address);
        check_mode(reg, field, current)?;
        Ok(field.bitfield().extract(current))
    }

    /// Read-modify-write of a single field.
    pub fn write_field(
        &mut self,
        peripheral: &str,
        register: &str,
        field: &str,
        value: u8,
    ) -> RegisterResult<()> {
        let reg = self.table.register(peripheral, register)?;
        let field = lookup_field(reg, field)?;
        check(
            reg,
            reg.access.can_read() && reg.access.can_write(),
            "read-modify-write",
        )?;
        let bits = field.bitfield();
        if value > bits.max_value() {
            return Err(RegisterError::FieldValueOutOfRange {
                field: field.symbol.clone(),
                value: u32::from(value),
                bits: bits.width,
            });
        }
        let current = self.bus.read_u8(reg.address);
        check_mode(reg, field, current)?;
        self.bus.write_u8(reg.address, bits.insert(current, value));
        Ok(())
    }

    /// Reads a 16-bit pair, high byte first.
    pub fn read_word(&mut self, peripheral: &str, word: &str) -> RegisterResult<u16> {
        let (high, low) = self.word_registers(peripheral, word)?;
        check(high, high.access.can_read(), "read")?;
        check(low, low.access.can_read(), "read")?;
        let high = self.bus.read_u8(high.address);
        let low = self.bus.read_u8(low.address);
        Ok(u16::from_be_bytes([high, low]))
    }

    /// Writes a 16-bit pair, high byte first.
    pub fn write_word(&mut self, peripheral: &str, word: &str, value: u16) -> RegisterResult<()> {
        let (high, low) = self.word_registers(peripheral, word)?;
        check(high, high.access.can_write(), "write")?;
        check(low, low.access.can_write(), "write")?;
        let [hi, lo] = value.to_be_bytes();
        self.bus.write_u8(high.address, hi);
        self.bus.write_u8(low.address, lo);
        Ok(())
    }

    fn word_registers(
        &self,
        peripheral: &str,
        word: &str,
    ) -> RegisterResult<(&'t ResolvedRegister, &'t ResolvedRegister)> {
        let table = self.table;
        table
            .peripheral(peripheral)
            .and_then(|p| p.words.iter().find(|w| w.name.eq_ignore_ascii_case(word)))
            .and_then(|w| {
                Some((
                    table.lookup_address(w.high_address)?,
                    table.lookup_address(w.low_address)?,
                ))
            })
            .ok_or_else(|| RegisterError::UnknownRegister {
                peripheral: peripheral.to_string(),
                register: word.to_string(),
            })
    }

    /// Switches a capture/compare mode register, clearing its other bits.
    pub fn select_ccmr_mode(
        &mut self,
        peripheral: &str,
        register: &str,
        mode: CcmrMode,
    ) -> RegisterResult<()> {
        let reg = self.table.register(peripheral, register)?;
        check(reg, reg.access.can_write(), "write")?;
        let mut value = 0;
        ccmr::select_mode(&reg.layout, &mut value, mode)?;
        self.bus.write_u8(reg.address, value);
        Ok(())
    }
}

fn lookup_field<'r>(reg: &'r ResolvedRegister, name: &str) -> RegisterResult<&'r ResolvedField> {
    reg.field(name).ok_or_else(|| RegisterError::UnknownField {
        register: reg.symbol.clone(),
        field: name.to_string(),
    })
}

fn check(reg: &ResolvedRegister, allowed: bool, operation: &'static str) -> RegisterResult<()> {
    if allowed {
        Ok(())
    } else {
        Err(RegisterError::AccessViolation {
            symbol: reg.symbol.clone(),
            operation,
        })
    }
}

fn check_mode(reg: &ResolvedRegister, field: &ResolvedField, current: u8) -> RegisterResult<()> {
    let BitLayout::Capture(layout) = reg.layout.bits else {
        return Ok(());
    };
    let actual = ccmr::mode(&layout, current);
    let matches = match field.tag {
        CcmrTag::Common => true,
        CcmrTag::Output => actual == CcmrMode::Output,
        CcmrTag::Input => actual != CcmrMode::Output,
    };
    if matches {
        Ok(())
    } else {
        Err(RegisterError::CcmrModeMismatch {
            register: reg.symbol.clone(),
            actual: actual.as_str(),
            requested: field.tag.as_str(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::DeviceDescriptor;
    use crate::resolver::resolve;
    use crate::validate::LayoutRegistry;

    fn table(part: &str) -> ResolvedSymbolTable {
        let registry = LayoutRegistry::load().unwrap();
        resolve(&registry, &DeviceDescriptor::lookup(part).unwrap()).unwrap()
    }

    #[test]
    fn test_reset_values_loaded() {
        let table = table("STM8S105C4");
        let mut regs = Registers::new(&table, MemoryBus::with_reset_values(&table));
        assert_eq!(regs.read_register("CLK", "CKDIVR").unwrap(), 0x18);
        assert_eq!(regs.read_field("CLK", "CKDIVR", "HSIDIV").unwrap(), 3);
        assert_eq!(regs.read_field("CLK", "CKDIVR", "CPUDIV").unwrap(), 0);
    }

    #[test]
    fn test_field_read_modify_write() {
        let table = table("STM8S105C4");
        let mut regs = Registers::new(&table, MemoryBus::with_reset_values(&table));
        regs.write_field("CLK", "CKDIVR", "HSIDIV", 0).unwrap();
        regs.write_field("CLK", "CKDIVR", "CPUDIV", 5).unwrap();
        assert_eq!(regs.read_register("CLK", "CKDIVR").unwrap(), 0x05);
        assert!(matches!(
            regs.write_field("CLK", "CKDIVR", "CPUDIV", 8),
            Err(RegisterError::FieldValueOutOfRange { bits: 3, .. })
        ));
    }

    #[test]
    fn test_access_violations() {
        let table = table("STM8S103F3");
        let mut regs = Registers::new(&table, MemoryBus::new());
        assert_eq!(
            regs.write_register("PORTA", "IDR", 0xFF),
            Err(RegisterError::AccessViolation {
                symbol: "PORTA_IDR".into(),
                operation: "write",
            })
        );
        assert!(regs.read_register("IWDG", "KR").is_err());
        regs.write_register("IWDG", "KR", 0xCC).unwrap();
        assert!(matches!(
            regs.write_field("I2C", "SR1", "SB", 1),
            Err(RegisterError::AccessViolation { .. })
        ));
        assert!(matches!(
            regs.read_register("UART2", "SR"),
            Err(RegisterError::UnknownRegister { .. })
        ));
    }

    #[test]
    fn test_word_high_byte_first() {
        let table = table("STM8S105C4");
        let mut regs = Registers::new(&table, MemoryBus::new());
        regs.write_word("TIM1", "ARR", 0x1234).unwrap();
        assert_eq!(regs.read_word("TIM1", "ARR").unwrap(), 0x1234);
        let arrh = table.register("TIM1", "ARRH").unwrap().address;
        let arrl = table.register("TIM1", "ARRL").unwrap().address;
        assert_eq!(regs.bus().writes(), &[(arrh, 0x12), (arrl, 0x34)]);
    }

    #[test]
    fn test_word_access_checked() {
        let table = table("STM8S105C4");
        let mut regs = Registers::new(&table, MemoryBus::new());
        assert_eq!(
            regs.write_word("ADC1", "DR", 0x1234),
            Err(RegisterError::AccessViolation {
                symbol: "ADC1_DRH".into(),
                operation: "write",
            })
        );
        assert!(regs.bus().writes().is_empty());
        assert_eq!(regs.read_word("ADC1", "DR").unwrap(), 0);
        assert!(matches!(
            regs.read_word("ADC1", "XR"),
            Err(RegisterError::UnknownRegister { .. })
        ));
    }

    #[test]
    fn test_ccmr_fields_follow_mode() {
        let table = table("STM8S105C4");
        let mut regs = Registers::new(&table, MemoryBus::with_reset_values(&table));
        regs.write_field("TIM1", "CCMR1", "OC1M", 0b111).unwrap();
        assert!(matches!(
            regs.write_field("TIM1", "CCMR1", "IC1F", 1),
            Err(RegisterError::CcmrModeMismatch { .. })
        ));
        regs.select_ccmr_mode("TIM1", "CCMR1", CcmrMode::Input(1))
            .unwrap();
        regs.write_field("TIM1", "CCMR1", "IC1F", 0x3).unwrap();
        assert_eq!(regs.read_register("TIM1", "CCMR1").unwrap(), 0x31);
        assert!(regs.read_field("TIM1", "CCMR1", "OC1M").is_err());
        assert_eq!(regs.read_field("TIM1", "CCMR1", "CC1S").unwrap(), 1);
    }
}
