// Licensed under the Apache-2.0 license

//! Resolution of a device against the layout registry.
//!
//! The result is a flat, dialect independent table of every register,
//! field, word pair and named value the device carries, with absolute
//! addresses and masks already computed. Symbols are formed from the
//! peripheral instance name, e.g. `CLK_CKDIVR` and `CLK_CPUDIV`. A field
//! name used by more than one register of the same peripheral is qualified
//! with its register name instead, e.g. `PORTA_ODR_PIN0`.

use std::collections::{BTreeMap, HashMap, HashSet};

use log::debug;

use crate::device::{DeviceDescriptor, DeviceVariant, Variant};
use crate::error::{RegisterError, RegisterResult};
use crate::family::{Family, PeripheralKind};
use crate::layout::{AccessKind, BitField, CcmrTag, RegisterField, RegisterLayout};
use crate::memory::{AddressWidth, MemoryMap};
use crate::validate::{FamilyRegistry, LayoutRegistry};
use crate::vectors::{self, Vector};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedField {
    pub symbol: String,
    pub name: &'static str,
    pub offset: u8,
    pub width: u8,
    pub mask: u8,
    pub tag: CcmrTag,
    /// One symbol per bit of a multi-bit field, e.g. `CLK_CPUDIV0`, with
    /// the bit index inside the field.
    pub bit_symbols: Vec<(String, u8)>,
}

impl ResolvedField {
    pub fn bitfield(&self) -> BitField {
        BitField {
            name: self.name,
            offset: self.offset,
            width: self.width,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedRegister {
    pub symbol: String,
    pub peripheral: &'static str,
    pub name: &'static str,
    pub address: u32,
    pub offset: u16,
    pub width_bytes: u8,
    pub access: AccessKind,
    pub reset_value: u8,
    pub description: &'static str,
    pub fields: Vec<ResolvedField>,
    pub reserved: Vec<(u8, u8)>,
    pub layout: RegisterField,
}

impl ResolvedRegister {
    pub fn field(&self, name: &str) -> Option<&ResolvedField> {
        self.fields
            .iter()
            .find(|f| f.name.eq_ignore_ascii_case(name))
    }

    pub fn is_capture_mode(&self) -> bool {
        matches!(self.layout.bits, crate::layout::BitLayout::Capture(_))
    }
}

/// A 16-bit value spread over two registers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedWord {
    pub symbol: String,
    pub name: &'static str,
    pub high_address: u32,
    pub low_address: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedValue {
    pub symbol: String,
    pub register: &'static str,
    pub name: &'static str,
    pub value: u8,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedPeripheral {
    pub name: &'static str,
    pub layout_name: &'static str,
    pub base_address: u32,
    pub registers: Vec<ResolvedRegister>,
    pub words: Vec<ResolvedWord>,
    pub values: Vec<ResolvedValue>,
}

impl ResolvedPeripheral {
    /// Symbol carrying the base address, e.g. `CLK_AddressBase`.
    pub fn base_symbol(&self) -> String {
        format!("{}_AddressBase", self.name)
    }

    pub fn register(&self, name: &str) -> Option<&ResolvedRegister> {
        self.registers
            .iter()
            .find(|r| r.name.eq_ignore_ascii_case(name))
    }
}

/// Everything a device exposes, in address order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedSymbolTable {
    pub part: String,
    pub family: &'static str,
    pub line: &'static str,
    pub memory: MemoryMap,
    pub address_width: AddressWidth,
    pub peripherals: Vec<ResolvedPeripheral>,
    pub vectors: Vec<Vector>,
    by_address: BTreeMap<u32, (usize, usize)>,
}

impl ResolvedSymbolTable {
    pub fn peripheral(&self, name: &str) -> Option<&ResolvedPeripheral> {
        self.peripherals
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(name))
    }

    pub fn register(&self, peripheral: &str, register: &str) -> RegisterResult<&ResolvedRegister> {
        self.peripheral(peripheral)
            .and_then(|p| p.register(register))
            .ok_or_else(|| RegisterError::UnknownRegister {
                peripheral: peripheral.to_string(),
                register: register.to_string(),
            })
    }

    pub fn field(
        &self,
        peripheral: &str,
        register: &str,
        field: &str,
    ) -> RegisterResult<&ResolvedField> {
        let reg = self.register(peripheral, register)?;
        reg.field(field).ok_or_else(|| RegisterError::UnknownField {
            register: reg.symbol.clone(),
            field: field.to_string(),
        })
    }

    /// Register located at `address`, if any.
    pub fn lookup_address(&self, address: u32) -> Option<&ResolvedRegister> {
        self.by_address
            .get(&address)
            .map(|&(p, r)| &self.peripherals[p].registers[r])
    }

    /// Register by its full symbol, e.g. `CLK_CKDIVR`.
    pub fn lookup_symbol(&self, symbol: &str) -> Option<&ResolvedRegister> {
        self.registers().find(|r| r.symbol.eq_ignore_ascii_case(symbol))
    }

    /// All registers ordered by address.
    pub fn registers(&self) -> impl Iterator<Item = &ResolvedRegister> {
        self.by_address
            .values()
            .map(|&(p, r)| &self.peripherals[p].registers[r])
    }
}

/// Resolves every present peripheral of `device`.
pub fn resolve(
    registry: &LayoutRegistry,
    device: &DeviceDescriptor,
) -> RegisterResult<ResolvedSymbolTable> {
    let peripherals = match &device.variant {
        DeviceVariant::Stm8AfS(v) => resolve_variant(&registry.stm8afs, v)?,
        DeviceVariant::Stm8L10x(v) => resolve_variant(&registry.stm8l10x, v)?,
        DeviceVariant::Stm8Tl5x(v) => resolve_variant(&registry.stm8tl5x, v)?,
    };

    let mut by_address = BTreeMap::new();
    for (p, peripheral) in peripherals.iter().enumerate() {
        for (r, register) in peripheral.registers.iter().enumerate() {
            if let Some((other, _)) = by_address.insert(register.address, (p, r)) {
                return Err(RegisterError::LayoutInconsistency {
                    peripheral: peripheral.name.to_string(),
                    register: register.name.to_string(),
                    detail: format!(
                        "address {:#06x} already used by {}",
                        register.address, peripherals[other].name
                    ),
                });
            }
        }
    }

    Ok(ResolvedSymbolTable {
        part: device.part.clone(),
        family: device.family_name(),
        line: device.line_name(),
        memory: device.memory_map(),
        address_width: device.address_width(),
        peripherals,
        vectors: vectors::vector_table(device),
        by_address,
    })
}

fn resolve_variant<F: Family>(
    registry: &FamilyRegistry<F>,
    variant: &Variant<F>,
) -> RegisterResult<Vec<ResolvedPeripheral>> {
    let mut instances = variant.peripherals.clone();
    instances.sort_by_key(|p| p.base_address);
    instances
        .iter()
        .map(|p| {
            let layout = registry.layout(p.kind, variant.line)?;
            let resolved = resolve_peripheral(p.name(), p.kind.layout_name(), p.base_address, layout)?;
            debug!(
                "{} at {:#06x}: {} registers",
                resolved.name,
                resolved.base_address,
                resolved.registers.len()
            );
            Ok(resolved)
        })
        .collect()
}

fn resolve_peripheral(
    name: &'static str,
    layout_name: &'static str,
    base_address: u32,
    layout: &RegisterLayout,
) -> RegisterResult<ResolvedPeripheral> {
    // Field names used by more than one register need qualification.
    let mut users: HashMap<&str, usize> = HashMap::new();
    for reg in layout.registers.iter() {
        let distinct: HashSet<&str> = reg.fields().iter().map(|(_, f)| f.name).collect();
        for field in distinct {
            *users.entry(field).or_default() += 1;
        }
    }
    let register_names: HashSet<&str> = layout.registers.iter().map(|r| r.name).collect();
    let qualify = |field: &str| {
        users.get(field).copied().unwrap_or(0) > 1 || register_names.contains(field)
    };

    let mut taken: HashSet<String> = HashSet::new();
    let mut claim = |symbol: &str, register: &str| -> RegisterResult<()> {
        if taken.insert(symbol.to_string()) {
            Ok(())
        } else {
            Err(RegisterError::LayoutInconsistency {
                peripheral: name.to_string(),
                register: register.to_string(),
                detail: format!("symbol {symbol} defined twice"),
            })
        }
    };

    let mut registers = Vec::with_capacity(layout.registers.len());
    for reg in layout.registers.iter() {
        let symbol = format!("{name}_{}", reg.name);
        claim(&symbol, reg.name)?;
        let mut fields = Vec::new();
        for (tag, field) in reg.fields() {
            let symbol = if qualify(field.name) {
                format!("{name}_{}_{}", reg.name, field.name)
            } else {
                format!("{name}_{}", field.name)
            };
            claim(&symbol, reg.name)?;
            fields.push(ResolvedField {
                symbol,
                name: field.name,
                offset: field.offset,
                width: field.width,
                mask: field.mask(),
                tag,
                bit_symbols: Vec::new(),
            });
        }
        registers.push(ResolvedRegister {
            symbol,
            peripheral: name,
            name: reg.name,
            address: base_address + u32::from(reg.offset),
            offset: reg.offset,
            width_bytes: reg.width_bits.div_ceil(8),
            access: reg.access,
            reset_value: reg.reset_value,
            description: reg.description,
            fields,
            reserved: reg.reserved(),
            layout: *reg,
        });
    }

    // Per-bit symbols are only emitted where they do not shadow a field or
    // register symbol. Names ending in a digit would read ambiguously.
    for reg in registers.iter_mut() {
        for field in reg
            .fields
            .iter_mut()
            .filter(|f| f.width > 1 && !f.name.ends_with(|c: char| c.is_ascii_digit()))
        {
            for bit in 0..field.width {
                let symbol = format!("{}{bit}", field.symbol);
                if taken.insert(symbol.clone()) {
                    field.bit_symbols.push((symbol, bit));
                } else {
                    debug!("{symbol}: per-bit symbol shadows an existing one, skipped");
                }
            }
        }
    }

    let mut words = Vec::with_capacity(layout.pairs.len());
    for pair in layout.pairs {
        let address_of = |reg: &str| {
            layout
                .register(reg)
                .map(|r| base_address + u32::from(r.offset))
                .ok_or_else(|| RegisterError::UnknownRegister {
                    peripheral: name.to_string(),
                    register: reg.to_string(),
                })
        };
        words.push(ResolvedWord {
            symbol: format!("{name}_{}", pair.name),
            name: pair.name,
            high_address: address_of(pair.high)?,
            low_address: address_of(pair.low)?,
        });
    }

    let values = layout
        .constants
        .iter()
        .map(|v| ResolvedValue {
            symbol: format!("{name}_{}", v.name),
            register: v.register,
            name: v.name,
            value: v.value,
        })
        .collect();

    Ok(ResolvedPeripheral {
        name,
        layout_name,
        base_address,
        registers,
        words,
        values,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(part: &str) -> ResolvedSymbolTable {
        let registry = LayoutRegistry::load().unwrap();
        resolve(&registry, &DeviceDescriptor::lookup(part).unwrap()).unwrap()
    }

    #[test]
    fn test_clk_ckdivr_cpudiv() {
        let table = table("STM8S105C4");
        let ckdivr = table.register("CLK", "CKDIVR").unwrap();
        assert_eq!(ckdivr.address, 0x50C6);
        assert_eq!(ckdivr.symbol, "CLK_CKDIVR");
        let cpudiv = table.field("CLK", "CKDIVR", "CPUDIV").unwrap();
        assert_eq!((cpudiv.offset, cpudiv.width, cpudiv.mask), (0, 3, 0x07));
        assert_eq!(cpudiv.symbol, "CLK_CPUDIV");
        assert_eq!(cpudiv.bit_symbols[2], ("CLK_CPUDIV2".to_string(), 2));
    }

    #[test]
    fn test_absent_peripheral_has_no_symbols() {
        let table = table("STM8AF6269");
        assert!(table.peripheral("UART1").is_none());
        assert!(table.registers().all(|r| r.peripheral != "UART1"));
        assert!(matches!(
            table.register("UART1", "SR"),
            Err(RegisterError::UnknownRegister { .. })
        ));
    }

    #[test]
    fn test_low_density_tim4_shift() {
        let s103 = table("STM8S103F3");
        let s105 = table("STM8S105C4");
        let ier_103 = s103.register("TIM4", "IER").unwrap().address;
        let ier_105 = s105.register("TIM4", "IER").unwrap().address;
        assert_eq!(ier_103, ier_105 + 2);
    }

    #[test]
    fn test_address_round_trip() {
        for part in crate::device::supported_parts() {
            let table = table(part);
            for reg in table.registers() {
                let found = table.lookup_address(reg.address).unwrap();
                assert_eq!(found.symbol, reg.symbol);
                assert_eq!(table.lookup_symbol(&reg.symbol).unwrap().address, reg.address);
            }
        }
    }

    #[test]
    fn test_shared_field_names_qualified() {
        let table = table("STM8S103F3");
        let odr = table.register("PORTA", "ODR").unwrap();
        assert_eq!(odr.address, 0x5000);
        assert_eq!(odr.field("PIN3").unwrap().symbol, "PORTA_ODR_PIN3");
        let idr = table.register("PORTB", "IDR").unwrap();
        assert_eq!(idr.address, 0x5006);
        assert_eq!(idr.access, AccessKind::ReadOnly);
    }

    #[test]
    fn test_unknown_field() {
        let table = table("STM8S105C4");
        assert!(matches!(
            table.field("CLK", "CKDIVR", "NOPE"),
            Err(RegisterError::UnknownField { .. })
        ));
    }

    #[test]
    fn test_words_and_values() {
        let table = table("STM8S105C4");
        let tim1 = table.peripheral("TIM1").unwrap();
        let cntr = tim1.words.iter().find(|w| w.name == "CNTR").unwrap();
        assert_eq!(cntr.low_address, cntr.high_address + 1);
        let clk = table.peripheral("CLK").unwrap();
        assert!(clk
            .values
            .iter()
            .any(|v| v.symbol == "CLK_SWI_HSI" && v.value == 0xE1));
        assert_eq!(clk.base_symbol(), "CLK_AddressBase");
    }

    #[test]
    fn test_ccmr_fields_tagged() {
        let table = table("STM8S105C4");
        let ccmr1 = table.register("TIM1", "CCMR1").unwrap();
        assert!(ccmr1.is_capture_mode());
        assert!(ccmr1
            .fields
            .iter()
            .any(|f| f.tag == CcmrTag::Output && f.name == "OC1M"));
        assert!(ccmr1
            .fields
            .iter()
            .any(|f| f.tag == CcmrTag::Input && f.name == "IC1F"));
    }

    #[test]
    fn test_l10x_table() {
        let table = table("STM8L101F3");
        assert_eq!(table.family, "STM8L10x");
        assert_eq!(table.register("CLK", "CKDIVR").unwrap().reset_value, 0x03);
        assert!(table.peripheral("COMP").is_some());
        assert!(table.vectors.iter().any(|v| v.name == "I2C" && v.irq == 29));
    }

    #[test]
    fn test_tl5x_table() {
        let table = table("STM8TL53G4");
        assert_eq!(table.family, "STM8TL5x");
        assert_eq!(table.register("CLK", "CCOR").unwrap().reset_value, 0x10);
        assert_eq!(table.register("WWDG", "CR").unwrap().address, 0x50D3);
        let pxs = table.peripheral("PXS").unwrap();
        let rx3 = pxs.words.iter().find(|w| w.name == "RX3CNTR").unwrap();
        assert_eq!((rx3.high_address, rx3.low_address), (0x5326, 0x5327));
        assert_eq!(
            table.lookup_address(0x5359).map(|r| r.symbol.as_str()),
            Some("PXS_RX9EPCCSELR")
        );
        assert!(table.vectors.iter().any(|v| v.name == "PXS" && v.irq == 2));
    }

    #[test]
    fn test_table_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ResolvedSymbolTable>();
    }
}
