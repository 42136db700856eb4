// Licensed under the Apache-2.0 license

//! Structural checks over the static layout tables.
//!
//! Tables are checked once when the registry is loaded. A failure names the
//! peripheral and register at fault and is fatal for every consumer.

use std::collections::{HashMap, HashSet};

use log::debug;
use strum::IntoEnumIterator;

use crate::device::{self, DeviceDescriptor, DeviceVariant, PeripheralInstance};
use crate::error::{RegisterError, RegisterResult};
use crate::family::{Family, PeripheralKind, Stm8AfS, Stm8L10x, Stm8Tl5x};
use crate::layout::{BitLayout, BitSlot, RegisterField, RegisterLayout};
use crate::vectors;

/// Validated layouts of one family, keyed by product line and peripheral kind.
#[derive(Clone, Debug)]
pub struct FamilyRegistry<F: Family> {
    layouts: HashMap<(F::Line, F::Kind), RegisterLayout>,
}

impl<F: Family> FamilyRegistry<F> {
    pub fn load() -> RegisterResult<Self> {
        let mut layouts = HashMap::new();
        for line in F::Line::iter() {
            for kind in F::Kind::iter() {
                let layout = F::layout_for(kind, line);
                validate_layout(&layout)?;
                layouts.insert((line, kind), layout);
            }
        }
        vectors::validate_slots(F::NAME, F::vector_slots())?;
        debug!("{}: {} layouts validated", F::NAME, layouts.len());
        Ok(Self { layouts })
    }

    pub fn layout(&self, kind: F::Kind, line: F::Line) -> RegisterResult<&RegisterLayout> {
        self.layouts
            .get(&(line, kind))
            .ok_or_else(|| RegisterError::LayoutInconsistency {
                peripheral: kind.name().to_string(),
                register: String::new(),
                detail: format!("no layout loaded for line {line}"),
            })
    }

    /// Checks that the register blocks of a device neither share a base
    /// address nor overlap.
    pub fn validate_peripherals(
        &self,
        line: F::Line,
        peripherals: &[PeripheralInstance<F::Kind>],
    ) -> RegisterResult<()> {
        let mut blocks = Vec::with_capacity(peripherals.len());
        for p in peripherals {
            let span = u32::from(self.layout(p.kind, line)?.span());
            blocks.push((p.base_address, span.max(1), p.name()));
        }
        blocks.sort();
        for pair in blocks.windows(2) {
            let (base, span, name) = pair[0];
            let (next_base, _, next_name) = pair[1];
            if base.saturating_add(span) > next_base {
                return Err(RegisterError::LayoutInconsistency {
                    peripheral: next_name.to_string(),
                    register: String::new(),
                    detail: format!(
                        "block at {next_base:#06x} overlaps {name} at {base:#06x}"
                    ),
                });
            }
        }
        Ok(())
    }
}

/// Validated layouts of every family.
#[derive(Clone, Debug)]
pub struct LayoutRegistry {
    pub stm8afs: FamilyRegistry<Stm8AfS>,
    pub stm8l10x: FamilyRegistry<Stm8L10x>,
    pub stm8tl5x: FamilyRegistry<Stm8Tl5x>,
}

impl LayoutRegistry {
    /// Loads and checks all layout tables, vector tables and the device table.
    pub fn load() -> RegisterResult<Self> {
        let registry = Self {
            stm8afs: FamilyRegistry::load()?,
            stm8l10x: FamilyRegistry::load()?,
            stm8tl5x: FamilyRegistry::load()?,
        };
        for part in device::supported_parts() {
            registry.validate_device(&DeviceDescriptor::lookup(part)?)?;
        }
        Ok(registry)
    }

    pub fn validate_device(&self, device: &DeviceDescriptor) -> RegisterResult<()> {
        match &device.variant {
            DeviceVariant::Stm8AfS(v) => self.stm8afs.validate_peripherals(v.line, &v.peripherals),
            DeviceVariant::Stm8L10x(v) => {
                self.stm8l10x.validate_peripherals(v.line, &v.peripherals)
            }
            DeviceVariant::Stm8Tl5x(v) => {
                self.stm8tl5x.validate_peripherals(v.line, &v.peripherals)
            }
        }
    }
}

fn inconsistency(layout: &RegisterLayout, register: &str, detail: String) -> RegisterError {
    RegisterError::LayoutInconsistency {
        peripheral: layout.peripheral.to_string(),
        register: register.to_string(),
        detail,
    }
}

/// Checks a single peripheral layout.
pub fn validate_layout(layout: &RegisterLayout) -> RegisterResult<()> {
    let mut names = HashSet::new();
    let mut last_offset = None;
    for reg in layout.registers.iter() {
        if !names.insert(reg.name) {
            return Err(inconsistency(layout, reg.name, "duplicate register name".into()));
        }
        if let Some(last) = last_offset {
            if reg.offset <= last {
                return Err(inconsistency(
                    layout,
                    reg.name,
                    format!("offset {:#04x} not above previous {:#04x}", reg.offset, last),
                ));
            }
        }
        last_offset = Some(reg.offset);
        validate_register(layout, reg)?;
    }

    for pair in layout.pairs {
        for half in [pair.high, pair.low] {
            if layout.register(half).is_none() {
                return Err(inconsistency(
                    layout,
                    half,
                    format!("word {} references a missing register", pair.name),
                ));
            }
        }
    }
    for constant in layout.constants {
        if layout.register(constant.register).is_none() {
            return Err(inconsistency(
                layout,
                constant.register,
                format!("value {} references a missing register", constant.name),
            ));
        }
    }
    Ok(())
}

fn validate_register(layout: &RegisterLayout, reg: &RegisterField) -> RegisterResult<()> {
    if reg.width_bits != 8 {
        return Err(inconsistency(
            layout,
            reg.name,
            format!("width {} is not a byte", reg.width_bits),
        ));
    }
    match reg.bits {
        BitLayout::Bytewise => {}
        BitLayout::Fields(slots) => {
            if reg.access == crate::layout::AccessKind::NoBitAccess {
                return Err(inconsistency(
                    layout,
                    reg.name,
                    "byte-wide register declares fields".into(),
                ));
            }
            check_cover(slots, 0).map_err(|d| inconsistency(layout, reg.name, d))?;
        }
        BitLayout::Capture(ccmr) => {
            let selector = ccmr.selector;
            if selector.offset != 0 || selector.width != 2 {
                return Err(inconsistency(
                    layout,
                    reg.name,
                    "selector must occupy bits 0..2".into(),
                ));
            }
            check_cover(ccmr.output, selector.mask())
                .map_err(|d| inconsistency(layout, reg.name, format!("output view: {d}")))?;
            check_cover(ccmr.input, selector.mask())
                .map_err(|d| inconsistency(layout, reg.name, format!("input view: {d}")))?;
        }
    }

    let mut fields = HashSet::new();
    for (tag, field) in reg.fields() {
        if !fields.insert((tag, field.name)) {
            return Err(inconsistency(
                layout,
                reg.name,
                format!("field {} declared twice", field.name),
            ));
        }
    }
    Ok(())
}

/// Slots plus the bits already claimed in `taken` must cover the byte
/// exactly once.
fn check_cover(slots: &[BitSlot], mut taken: u8) -> Result<(), String> {
    for slot in slots {
        let (offset, width) = (slot.offset(), slot.width());
        if width == 0 || u16::from(offset) + u16::from(width) > 8 {
            return Err(format!("slot at bit {offset} width {width} out of range"));
        }
        let mask = (((1u16 << width) - 1) << offset) as u8;
        if taken & mask != 0 {
            return Err(format!("slot at bit {offset} overlaps another"));
        }
        taken |= mask;
    }
    if taken != 0xFF {
        return Err(format!("bits {:#04x} not covered", !taken));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::family::{AfsKind, AfsLine};
    use crate::layout::{NamedValue, WordPair};

    #[test]
    fn test_registry_loads() {
        let registry = LayoutRegistry::load().unwrap();
        let tim4 = registry
            .stm8afs
            .layout(AfsKind::Tim4, AfsLine::S103)
            .unwrap();
        assert_eq!(tim4.register("ARR").map(|r| r.offset), Some(0x08));
    }

    #[test]
    fn test_peripheral_blocks_must_not_collide() {
        let registry = LayoutRegistry::load().unwrap();
        let block = |kind, base_address| PeripheralInstance { kind, base_address };

        let aliased = [block(AfsKind::Clk, 0x50C0), block(AfsKind::Wwdg, 0x50C0)];
        assert!(matches!(
            registry.stm8afs.validate_peripherals(AfsLine::S105, &aliased),
            Err(RegisterError::LayoutInconsistency { .. })
        ));

        let overlapping = [block(AfsKind::Uart2, 0x5240), block(AfsKind::Tim1, 0x5245)];
        let err = registry
            .stm8afs
            .validate_peripherals(AfsLine::S105, &overlapping)
            .unwrap_err();
        assert_eq!(
            err,
            RegisterError::LayoutInconsistency {
                peripheral: "TIM1".into(),
                register: String::new(),
                detail: "block at 0x5245 overlaps UART2 at 0x5240".into(),
            }
        );

        let adjacent = [block(AfsKind::Uart2, 0x5240), block(AfsKind::Tim1, 0x5250)];
        assert!(registry
            .stm8afs
            .validate_peripherals(AfsLine::S105, &adjacent)
            .is_ok());
    }

    #[test]
    fn test_gap_in_bits_rejected() {
        static REGS: &[RegisterField] = &[reg!(
            "CR",
            0x00,
            ReadWrite,
            0x00,
            "control",
            &[bit!("EN", 0), res!(2, 6)]
        )];
        let layout = RegisterLayout::new("TEST", REGS, &[], &[]);
        let err = validate_layout(&layout).unwrap_err();
        assert_eq!(
            err,
            RegisterError::LayoutInconsistency {
                peripheral: "TEST".into(),
                register: "CR".into(),
                detail: "bits 0x02 not covered".into(),
            }
        );
    }

    #[test]
    fn test_overlap_rejected() {
        static REGS: &[RegisterField] = &[reg!(
            "CR",
            0x00,
            ReadWrite,
            0x00,
            "control",
            &[bits!("MODE", 0, 3), bit!("EN", 2), res!(3, 5)]
        )];
        let layout = RegisterLayout::new("TEST", REGS, &[], &[]);
        assert!(validate_layout(&layout).is_err());
    }

    #[test]
    fn test_bytewise_with_fields_rejected() {
        static REGS: &[RegisterField] = &[reg!(
            "DR",
            0x00,
            NoBitAccess,
            0x00,
            "data",
            &[bits!("DATA", 0, 8)]
        )];
        let layout = RegisterLayout::new("TEST", REGS, &[], &[]);
        assert!(validate_layout(&layout).is_err());
    }

    #[test]
    fn test_dangling_references_rejected() {
        static REGS: &[RegisterField] = &[reg!("CNTRH", 0x00, ReadWrite, 0x00, "counter high")];
        static PAIRS: &[WordPair] = &[pair!("CNTR", "CNTRH", "CNTRL")];
        static VALUES: &[NamedValue] = &[value!("KR", "KEY", 0xAA)];
        assert!(validate_layout(&RegisterLayout::new("TEST", REGS, PAIRS, &[])).is_err());
        assert!(validate_layout(&RegisterLayout::new("TEST", REGS, &[], VALUES)).is_err());
    }

    #[test]
    fn test_unordered_offsets_rejected() {
        static REGS: &[RegisterField] = &[
            reg!("SR", 0x01, ReadOnly, 0x00, "status"),
            reg!("CR", 0x01, ReadWrite, 0x00, "control"),
        ];
        assert!(validate_layout(&RegisterLayout::new("TEST", REGS, &[], &[])).is_err());
    }
}
