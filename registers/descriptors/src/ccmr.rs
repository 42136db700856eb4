// Licensed under the Apache-2.0 license

//! Tagged access to the timer capture/compare mode registers.
//!
//! A CCMR byte is either an output-compare or an input-capture
//! configuration, selected by the `CCxS` bits. [`CcmrView`] borrows the
//! byte mutably and hands out exactly one interpretation, so the two views
//! can never be written at the same time.

use crate::error::{RegisterError, RegisterResult};
use crate::layout::{BitLayout, BitSlot, CcmrLayout, RegisterField};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CcmrMode {
    Output,
    /// Input capture; the selector value picks the mapped input (1..=3).
    Input(u8),
}

impl CcmrMode {
    pub fn as_str(self) -> &'static str {
        match self {
            CcmrMode::Output => "output",
            CcmrMode::Input(_) => "input",
        }
    }

    fn selector_value(self) -> u8 {
        match self {
            CcmrMode::Output => 0,
            CcmrMode::Input(n) => n,
        }
    }
}

/// One interpretation of a CCMR byte.
#[derive(Debug)]
pub struct FieldView<'a> {
    register: &'static str,
    slots: &'static [BitSlot],
    value: &'a mut u8,
}

impl FieldView<'_> {
    fn slot(&self, name: &str) -> RegisterResult<crate::layout::BitField> {
        self.slots
            .iter()
            .filter_map(BitSlot::field)
            .find(|f| f.name.eq_ignore_ascii_case(name))
            .copied()
            .ok_or_else(|| RegisterError::UnknownField {
                register: self.register.to_string(),
                field: name.to_string(),
            })
    }

    pub fn get(&self, field: &str) -> RegisterResult<u8> {
        Ok(self.slot(field)?.extract(*self.value))
    }

    /// Updates one field; the selector bits are never touched.
    pub fn set(&mut self, field: &str, value: u8) -> RegisterResult<()> {
        let slot = self.slot(field)?;
        if value > slot.max_value() {
            return Err(RegisterError::FieldValueOutOfRange {
                field: slot.name.to_string(),
                value: u32::from(value),
                bits: slot.width,
            });
        }
        *self.value = slot.insert(*self.value, value);
        Ok(())
    }

    pub fn raw(&self) -> u8 {
        *self.value
    }
}

#[derive(Debug)]
pub enum CcmrView<'a> {
    Output(FieldView<'a>),
    Input(FieldView<'a>),
}

impl<'a> CcmrView<'a> {
    /// Interprets `value` according to its current `CCxS` bits.
    pub fn new(register: &RegisterField, value: &'a mut u8) -> RegisterResult<Self> {
        let ccmr = capture_layout(register)?;
        let output = mode(&ccmr, *value) == CcmrMode::Output;
        let view = FieldView {
            register: register.name,
            slots: if output { ccmr.output } else { ccmr.input },
            value,
        };
        Ok(if output {
            CcmrView::Output(view)
        } else {
            CcmrView::Input(view)
        })
    }

    pub fn mode(&self) -> &'static str {
        match self {
            CcmrView::Output(_) => "output",
            CcmrView::Input(_) => "input",
        }
    }

    pub fn output(self) -> RegisterResult<FieldView<'a>> {
        match self {
            CcmrView::Output(view) => Ok(view),
            CcmrView::Input(view) => Err(mismatch(view.register, "input", "output")),
        }
    }

    pub fn input(self) -> RegisterResult<FieldView<'a>> {
        match self {
            CcmrView::Input(view) => Ok(view),
            CcmrView::Output(view) => Err(mismatch(view.register, "output", "input")),
        }
    }
}

fn mismatch(register: &str, actual: &'static str, requested: &'static str) -> RegisterError {
    RegisterError::CcmrModeMismatch {
        register: register.to_string(),
        actual,
        requested,
    }
}

fn capture_layout(register: &RegisterField) -> RegisterResult<CcmrLayout> {
    match register.bits {
        BitLayout::Capture(ccmr) => Ok(ccmr),
        _ => Err(mismatch(register.name, "plain", "capture/compare")),
    }
}

/// Mode selected by the `CCxS` bits of `value`.
pub fn mode(ccmr: &CcmrLayout, value: u8) -> CcmrMode {
    match ccmr.selector.extract(value) {
        0 => CcmrMode::Output,
        n => CcmrMode::Input(n),
    }
}

/// Switches the register to `mode`. All other bits are cleared, since their
/// meaning changes with the mode.
pub fn select_mode(register: &RegisterField, value: &mut u8, mode: CcmrMode) -> RegisterResult<()> {
    let ccmr = capture_layout(register)?;
    let selector = mode.selector_value();
    if selector > ccmr.selector.max_value() {
        return Err(RegisterError::FieldValueOutOfRange {
            field: ccmr.selector.name.to_string(),
            value: u32::from(selector),
            bits: ccmr.selector.width,
        });
    }
    *value = ccmr.selector.insert(0, selector);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::family::{AfsKind, AfsLine, Family, Stm8AfS};

    fn ccmr1() -> RegisterField {
        let layout = Stm8AfS::layout_for(AfsKind::Tim1, AfsLine::S105);
        *layout.register("CCMR1").unwrap()
    }

    #[test]
    fn test_output_view() {
        let reg = ccmr1();
        let mut value = 0u8;
        let mut view = CcmrView::new(&reg, &mut value).unwrap().output().unwrap();
        view.set("OC1M", 0b110).unwrap();
        view.set("OC1PE", 1).unwrap();
        assert_eq!(view.get("OC1M").unwrap(), 0b110);
        assert_eq!(view.raw(), 0x68);
        assert!(view.get("IC1F").is_err());
        assert_eq!(value, 0x68);
    }

    #[test]
    fn test_input_view() {
        let reg = ccmr1();
        let mut value = 0u8;
        select_mode(&reg, &mut value, CcmrMode::Input(1)).unwrap();
        let view = CcmrView::new(&reg, &mut value).unwrap();
        assert_eq!(view.mode(), "input");
        let mut input = view.input().unwrap();
        input.set("IC1F", 0x0F).unwrap();
        assert_eq!(input.raw(), 0xF1);
        assert!(matches!(
            input.set("IC1PSC", 4),
            Err(RegisterError::FieldValueOutOfRange { .. })
        ));
    }

    #[test]
    fn test_mode_mismatch() {
        let reg = ccmr1();
        let mut value = 0x01u8;
        assert_eq!(
            CcmrView::new(&reg, &mut value).unwrap().output().unwrap_err(),
            RegisterError::CcmrModeMismatch {
                register: "CCMR1".into(),
                actual: "input",
                requested: "output",
            }
        );
    }

    #[test]
    fn test_mode_decoding() {
        let reg = ccmr1();
        let BitLayout::Capture(ccmr) = reg.bits else {
            panic!("CCMR1 is not a capture/compare register");
        };
        assert_eq!(mode(&ccmr, 0xF8), CcmrMode::Output);
        assert_eq!(mode(&ccmr, 0x03), CcmrMode::Input(3));
    }

    #[test]
    fn test_plain_register_rejected() {
        let layout = Stm8AfS::layout_for(AfsKind::Tim1, AfsLine::S105);
        let cr1 = *layout.register("CR1").unwrap();
        let mut value = 0u8;
        assert!(CcmrView::new(&cr1, &mut value).is_err());
    }
}
