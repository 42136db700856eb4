// Licensed under the Apache-2.0 license

//! Peripheral register layouts.
//!
//! A [`RegisterLayout`] describes one peripheral kind as an ordered list of
//! byte-wide registers. Each register either has no bit decomposition
//! ([`BitLayout::Bytewise`]), a list of named fields and reserved gaps that
//! together cover all 8 bits ([`BitLayout::Fields`]), or the dual
//! output/input interpretation used by the timer capture/compare mode
//! registers ([`BitLayout::Capture`]).
//!
//! The tables themselves live in the per-family submodules and are plain
//! `'static` data. Structural rules are checked by
//! [`crate::validate::LayoutRegistry::load`].

use std::borrow::Cow;

/// How software may access a register.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AccessKind {
    ReadOnly,
    WriteOnly,
    ReadWrite,
    /// Byte-wide data register; readable and writable, but has no bit fields.
    NoBitAccess,
}

impl AccessKind {
    pub fn can_read(self) -> bool {
        !matches!(self, AccessKind::WriteOnly)
    }

    pub fn can_write(self) -> bool {
        !matches!(self, AccessKind::ReadOnly)
    }
}

/// A named group of adjacent bits inside a register.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BitField {
    pub name: &'static str,
    pub offset: u8,
    pub width: u8,
}

impl BitField {
    /// Mask of the field within its register, e.g. `0x07 << 0` for a 3-bit field at bit 0.
    pub const fn mask(&self) -> u8 {
        (((1u32 << self.width) - 1) << self.offset) as u8
    }

    /// Largest value the field can hold.
    pub const fn max_value(&self) -> u8 {
        ((1u32 << self.width) - 1) as u8
    }

    pub fn extract(&self, byte: u8) -> u8 {
        (byte & self.mask()) >> self.offset
    }

    /// Replaces the field in `byte` with `value`; bits of `value` above the
    /// field width are discarded.
    pub fn insert(&self, byte: u8, value: u8) -> u8 {
        let shifted = ((value as u32) << self.offset) as u8;
        (byte & !self.mask()) | (shifted & self.mask())
    }
}

/// One slot in the bit decomposition of a register.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BitSlot {
    Field(BitField),
    Reserved { offset: u8, width: u8 },
}

impl BitSlot {
    pub fn offset(&self) -> u8 {
        match self {
            BitSlot::Field(f) => f.offset,
            BitSlot::Reserved { offset, .. } => *offset,
        }
    }

    pub fn width(&self) -> u8 {
        match self {
            BitSlot::Field(f) => f.width,
            BitSlot::Reserved { width, .. } => *width,
        }
    }

    pub fn field(&self) -> Option<&BitField> {
        match self {
            BitSlot::Field(f) => Some(f),
            BitSlot::Reserved { .. } => None,
        }
    }
}

/// Capture/compare mode register layout.
///
/// The two low bits (`CCxS`) select the channel direction and are shared by
/// both interpretations. `output` and `input` describe bits 2..8.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CcmrLayout {
    pub selector: BitField,
    pub output: &'static [BitSlot],
    pub input: &'static [BitSlot],
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BitLayout {
    Bytewise,
    Fields(&'static [BitSlot]),
    Capture(CcmrLayout),
}

/// Which interpretation of a capture/compare mode register a field belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CcmrTag {
    /// Not part of a capture/compare mode register, or the shared selector.
    Common,
    Output,
    Input,
}

impl CcmrTag {
    pub fn as_str(self) -> &'static str {
        match self {
            CcmrTag::Common => "common",
            CcmrTag::Output => "output",
            CcmrTag::Input => "input",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RegisterField {
    pub name: &'static str,
    /// Byte offset from the peripheral base address.
    pub offset: u16,
    pub width_bits: u8,
    pub access: AccessKind,
    pub reset_value: u8,
    pub bits: BitLayout,
    pub description: &'static str,
}

impl RegisterField {
    /// Named fields of the register with the view they belong to. Reserved
    /// gaps are skipped; a capture/compare selector is reported once.
    pub fn fields(&self) -> Vec<(CcmrTag, BitField)> {
        match self.bits {
            BitLayout::Bytewise => Vec::new(),
            BitLayout::Fields(slots) => slots
                .iter()
                .filter_map(|s| s.field().map(|f| (CcmrTag::Common, *f)))
                .collect(),
            BitLayout::Capture(ccmr) => {
                let mut fields = vec![(CcmrTag::Common, ccmr.selector)];
                fields.extend(
                    ccmr.output
                        .iter()
                        .filter_map(|s| s.field().map(|f| (CcmrTag::Output, *f))),
                );
                fields.extend(
                    ccmr.input
                        .iter()
                        .filter_map(|s| s.field().map(|f| (CcmrTag::Input, *f))),
                );
                fields
            }
        }
    }

    pub fn field(&self, name: &str) -> Option<(CcmrTag, BitField)> {
        self.fields()
            .into_iter()
            .find(|(_, f)| f.name.eq_ignore_ascii_case(name))
    }

    /// Reserved gaps of the register, all views included.
    pub fn reserved(&self) -> Vec<(u8, u8)> {
        let gaps = |slots: &[BitSlot]| -> Vec<(u8, u8)> {
            slots
                .iter()
                .filter_map(|s| match s {
                    BitSlot::Reserved { offset, width } => Some((*offset, *width)),
                    BitSlot::Field(_) => None,
                })
                .collect()
        };
        match self.bits {
            BitLayout::Bytewise => Vec::new(),
            BitLayout::Fields(slots) => gaps(slots),
            BitLayout::Capture(ccmr) => {
                let mut all = gaps(ccmr.output);
                all.extend(gaps(ccmr.input));
                all
            }
        }
    }
}

/// A 16-bit quantity split across two byte registers, accessed high byte first.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WordPair {
    pub name: &'static str,
    pub high: &'static str,
    pub low: &'static str,
}

/// A documented value for a register, e.g. an unlock key.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NamedValue {
    pub register: &'static str,
    pub name: &'static str,
    pub value: u8,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RegisterLayout {
    pub peripheral: &'static str,
    pub registers: Cow<'static, [RegisterField]>,
    pub pairs: &'static [WordPair],
    pub constants: &'static [NamedValue],
}

impl RegisterLayout {
    pub const fn new(
        peripheral: &'static str,
        registers: &'static [RegisterField],
        pairs: &'static [WordPair],
        constants: &'static [NamedValue],
    ) -> Self {
        Self {
            peripheral,
            registers: Cow::Borrowed(registers),
            pairs,
            constants,
        }
    }

    /// Layout for peripherals that only have a base address.
    pub const fn address_only(peripheral: &'static str) -> Self {
        Self::new(peripheral, &[], &[], &[])
    }

    /// Shifts every register located after `after` by `gap` bytes.
    ///
    /// Used for the low-density STM8S parts, which have two reserved bytes
    /// after `CR1` in TIM2 and TIM4.
    pub fn with_gap_after(mut self, after: &str, gap: u16) -> Self {
        let Some(anchor) = self
            .registers
            .iter()
            .find(|r| r.name == after)
            .map(|r| r.offset)
        else {
            return self;
        };
        for reg in self.registers.to_mut().iter_mut() {
            if reg.offset > anchor {
                reg.offset += gap;
            }
        }
        self
    }

    pub fn register(&self, name: &str) -> Option<&RegisterField> {
        self.registers
            .iter()
            .find(|r| r.name.eq_ignore_ascii_case(name))
    }

    pub fn is_address_only(&self) -> bool {
        self.registers.is_empty()
    }

    /// Number of bytes spanned by the register block.
    pub fn span(&self) -> u16 {
        self.registers
            .iter()
            .map(|r| r.offset + (r.width_bits as u16).div_ceil(8))
            .max()
            .unwrap_or(0)
    }
}

macro_rules! bit {
    ($name:literal, $off:expr) => {
        $crate::layout::BitSlot::Field($crate::layout::BitField {
            name: $name,
            offset: $off,
            width: 1,
        })
    };
}

macro_rules! bits {
    ($name:literal, $off:expr, $w:expr) => {
        $crate::layout::BitSlot::Field($crate::layout::BitField {
            name: $name,
            offset: $off,
            width: $w,
        })
    };
}

macro_rules! res {
    ($off:expr, $w:expr) => {
        $crate::layout::BitSlot::Reserved {
            offset: $off,
            width: $w,
        }
    };
}

macro_rules! reg {
    ($name:literal, $off:expr, $access:ident, $reset:expr, $desc:expr) => {
        $crate::layout::RegisterField {
            name: $name,
            offset: $off,
            width_bits: 8,
            access: $crate::layout::AccessKind::$access,
            reset_value: $reset,
            bits: $crate::layout::BitLayout::Bytewise,
            description: $desc,
        }
    };
    ($name:literal, $off:expr, $access:ident, $reset:expr, $desc:expr, $slots:expr) => {
        $crate::layout::RegisterField {
            name: $name,
            offset: $off,
            width_bits: 8,
            access: $crate::layout::AccessKind::$access,
            reset_value: $reset,
            bits: $crate::layout::BitLayout::Fields($slots),
            description: $desc,
        }
    };
}

macro_rules! ccmr {
    ($name:literal, $off:expr, $desc:expr, $sel:literal, $out:expr, $inp:expr) => {
        $crate::layout::RegisterField {
            name: $name,
            offset: $off,
            width_bits: 8,
            access: $crate::layout::AccessKind::ReadWrite,
            reset_value: 0x00,
            bits: $crate::layout::BitLayout::Capture($crate::layout::CcmrLayout {
                selector: $crate::layout::BitField {
                    name: $sel,
                    offset: 0,
                    width: 2,
                },
                output: $out,
                input: $inp,
            }),
            description: $desc,
        }
    };
}

macro_rules! pair {
    ($name:literal, $high:literal, $low:literal) => {
        $crate::layout::WordPair {
            name: $name,
            high: $high,
            low: $low,
        }
    };
}

macro_rules! value {
    ($reg:literal, $name:literal, $value:expr) => {
        $crate::layout::NamedValue {
            register: $reg,
            name: $name,
            value: $value,
        }
    };
}

#[macro_use]
pub(crate) mod common;
pub(crate) mod stm8l;
pub(crate) mod stm8s;
pub(crate) mod stm8tl;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bitfield_mask() {
        let cpudiv = BitField {
            name: "CPUDIV",
            offset: 0,
            width: 3,
        };
        assert_eq!(cpudiv.mask(), 0x07);
        let hsidiv = BitField {
            name: "HSIDIV",
            offset: 3,
            width: 2,
        };
        assert_eq!(hsidiv.mask(), 0x18);
        let full = BitField {
            name: "T",
            offset: 0,
            width: 8,
        };
        assert_eq!(full.mask(), 0xFF);
        assert_eq!(full.max_value(), 0xFF);
    }

    #[test]
    fn test_bitfield_insert_extract() {
        let hsidiv = BitField {
            name: "HSIDIV",
            offset: 3,
            width: 2,
        };
        assert_eq!(hsidiv.extract(0x18), 3);
        assert_eq!(hsidiv.insert(0x18, 0), 0x00);
        assert_eq!(hsidiv.insert(0x07, 2), 0x17);
        // excess bits never leak into neighbouring fields
        assert_eq!(hsidiv.insert(0x00, 0xFF), 0x18);
    }

    #[test]
    fn test_access_kind() {
        assert!(AccessKind::ReadOnly.can_read());
        assert!(!AccessKind::ReadOnly.can_write());
        assert!(!AccessKind::WriteOnly.can_read());
        assert!(AccessKind::NoBitAccess.can_read());
        assert!(AccessKind::NoBitAccess.can_write());
    }

    #[test]
    fn test_with_gap_after() {
        static REGS: &[RegisterField] = &[
            reg!("CR1", 0x00, ReadWrite, 0x00, "control"),
            reg!("IER", 0x01, ReadWrite, 0x00, "interrupt enable"),
            reg!("SR", 0x02, ReadWrite, 0x00, "status"),
        ];
        let layout = RegisterLayout::new("TIMX", REGS, &[], &[]).with_gap_after("CR1", 2);
        assert_eq!(layout.register("cr1").map(|r| r.offset), Some(0x00));
        assert_eq!(layout.register("IER").map(|r| r.offset), Some(0x03));
        assert_eq!(layout.register("SR").map(|r| r.offset), Some(0x04));
        assert_eq!(layout.span(), 5);
    }
}
