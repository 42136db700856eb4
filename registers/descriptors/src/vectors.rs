// Licensed under the Apache-2.0 license

//! Interrupt vector tables.
//!
//! A slot lists the sources that may occupy an IRQ number; the first
//! candidate whose peripheral is present on the device wins. Slots whose
//! candidates are all absent are left empty.

use std::collections::BTreeSet;

use crate::device::DeviceDescriptor;
use crate::error::{RegisterError, RegisterResult};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VectorCandidate {
    pub name: &'static str,
    /// Peripheral that must be present for this candidate to be used.
    pub requires: Option<&'static str>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VectorSlot {
    pub irq: u8,
    pub candidates: &'static [VectorCandidate],
}

/// A resolved interrupt vector.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct Vector {
    pub irq: u8,
    pub name: &'static str,
}

impl Vector {
    /// Preprocessor name of the vector, e.g. `__TLI_VECTOR__`.
    pub fn symbol(&self) -> String {
        format!("__{}_VECTOR__", self.name)
    }
}

macro_rules! slot {
    (@req) => { None };
    (@req $req:literal) => { Some($req) };
    ($irq:expr, $($name:literal $(if $req:literal)?),+ $(,)?) => {
        VectorSlot {
            irq: $irq,
            candidates: &[$(VectorCandidate {
                name: $name,
                requires: slot!(@req $($req)?),
            }),+],
        }
    };
}

pub static STM8S_VECTORS: &[VectorSlot] = &[
    slot!(0, "TLI"),
    slot!(1, "AWU"),
    slot!(2, "CLK"),
    slot!(3, "PORTA"),
    slot!(4, "PORTB"),
    slot!(5, "PORTC"),
    slot!(6, "PORTD"),
    slot!(7, "PORTE"),
    slot!(8, "CAN_RX" if "CAN", "PORTF" if "PORTF"),
    slot!(9, "CAN_TX" if "CAN"),
    slot!(10, "SPI"),
    slot!(11, "TIM1_UPD_OVF"),
    slot!(12, "TIM1_CAPCOM"),
    slot!(13, "TIM2_UPD_OVF" if "TIM2", "TIM5_UPD_OVF" if "TIM5"),
    slot!(14, "TIM2_CAPCOM" if "TIM2", "TIM5_CAPCOM" if "TIM5"),
    slot!(15, "TIM3_UPD_OVF" if "TIM3"),
    slot!(16, "TIM3_CAPCOM" if "TIM3"),
    slot!(17, "UART1_TXE" if "UART1"),
    slot!(18, "UART1_RXF" if "UART1"),
    slot!(19, "I2C"),
    slot!(
        20,
        "UART2_TXE" if "UART2",
        "UART3_TXE" if "UART3",
        "UART4_TXE" if "UART4",
    ),
    slot!(
        21,
        "UART2_RXF" if "UART2",
        "UART3_RXF" if "UART3",
        "UART4_RXF" if "UART4",
    ),
    slot!(22, "ADC1" if "ADC1", "ADC2" if "ADC2"),
    slot!(23, "TIM4_UPD_OVF" if "TIM4", "TIM6_UPD_OVF" if "TIM6"),
    slot!(24, "FLASH"),
];

pub static STM8L10X_VECTORS: &[VectorSlot] = &[
    slot!(1, "FLASH"),
    slot!(4, "AWU"),
    slot!(6, "PORTB"),
    slot!(7, "PORTD"),
    slot!(8, "EXTI0"),
    slot!(9, "EXTI1"),
    slot!(10, "EXTI2"),
    slot!(11, "EXTI3"),
    slot!(12, "EXTI4"),
    slot!(13, "EXTI5"),
    slot!(14, "EXTI6"),
    slot!(15, "EXTI7"),
    slot!(18, "COMP"),
    slot!(19, "TIM2_UPD_OVF"),
    slot!(20, "TIM2_CAPCOM"),
    slot!(21, "TIM3_UPD_OVF"),
    slot!(22, "TIM3_CAPCOM"),
    slot!(25, "TIM4_UPD"),
    slot!(26, "SPI"),
    slot!(27, "USART_TXE"),
    slot!(28, "USART_RXF"),
    slot!(29, "I2C"),
];

pub static STM8TL5X_VECTORS: &[VectorSlot] = &[
    slot!(1, "FLASH"),
    slot!(2, "PXS"),
    slot!(4, "AWU"),
    slot!(6, "PORTB"),
    slot!(7, "PORTD"),
    slot!(8, "EXTI0"),
    slot!(9, "EXTI1"),
    slot!(10, "EXTI2"),
    slot!(11, "EXTI3"),
    slot!(12, "EXTI4"),
    slot!(13, "EXTI5"),
    slot!(14, "EXTI6"),
    slot!(15, "EXTI7"),
    slot!(19, "TIM2_UPD_OVF"),
    slot!(20, "TIM2_CAPCOM"),
    slot!(21, "TIM3_UPD_OVF"),
    slot!(22, "TIM3_CAPCOM"),
    slot!(25, "TIM4_UPD"),
    slot!(26, "SPI"),
    slot!(27, "USART_TXE"),
    slot!(28, "USART_RXF"),
    slot!(29, "I2C"),
];

/// Checks that IRQ numbers and candidate names are unique within a table.
pub fn validate_slots(family: &str, slots: &[VectorSlot]) -> RegisterResult<()> {
    let mut irqs = BTreeSet::new();
    let mut names = BTreeSet::new();
    for slot in slots {
        if !irqs.insert(slot.irq) {
            return Err(inconsistency(family, format!("duplicate IRQ {}", slot.irq)));
        }
        if slot.candidates.is_empty() {
            return Err(inconsistency(family, format!("IRQ {} has no source", slot.irq)));
        }
        for candidate in slot.candidates {
            if !names.insert(candidate.name) {
                return Err(inconsistency(
                    family,
                    format!("vector {} listed twice", candidate.name),
                ));
            }
        }
    }
    Ok(())
}

fn inconsistency(family: &str, detail: String) -> RegisterError {
    RegisterError::LayoutInconsistency {
        peripheral: family.to_string(),
        register: "vectors".to_string(),
        detail,
    }
}

fn slots_of(device: &DeviceDescriptor) -> &'static [VectorSlot] {
    use crate::device::DeviceVariant;
    use crate::family::{Family, Stm8AfS, Stm8L10x, Stm8Tl5x};
    match device.variant {
        DeviceVariant::Stm8AfS(_) => Stm8AfS::vector_slots(),
        DeviceVariant::Stm8L10x(_) => Stm8L10x::vector_slots(),
        DeviceVariant::Stm8Tl5x(_) => Stm8Tl5x::vector_slots(),
    }
}

/// Vectors of `device`, ordered by IRQ number.
pub fn vector_table(device: &DeviceDescriptor) -> Vec<Vector> {
    slots_of(device)
        .iter()
        .filter_map(|slot| {
            slot.candidates
                .iter()
                .find(|c| c.requires.map_or(true, |p| device.has_peripheral(p)))
                .map(|c| Vector {
                    irq: slot.irq,
                    name: c.name,
                })
        })
        .collect()
}

/// Finds a vector of `device` by name, ignoring case and an optional
/// `__..._VECTOR__` decoration.
pub fn lookup(device: &DeviceDescriptor, name: &str) -> Option<Vector> {
    let bare = name
        .strip_prefix("__")
        .and_then(|n| n.strip_suffix("_VECTOR__"))
        .unwrap_or(name);
    vector_table(device)
        .into_iter()
        .find(|v| v.name.eq_ignore_ascii_case(bare))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn irq_of(part: &str, name: &str) -> Option<u8> {
        let device = DeviceDescriptor::lookup(part).unwrap();
        lookup(&device, name).map(|v| v.irq)
    }

    #[test]
    fn test_tables_are_consistent() {
        validate_slots("STM8AF_STM8S", STM8S_VECTORS).unwrap();
        validate_slots("STM8L10x", STM8L10X_VECTORS).unwrap();
        validate_slots("STM8TL5x", STM8TL5X_VECTORS).unwrap();
    }

    #[test]
    fn test_duplicate_irq_rejected() {
        static BROKEN: &[VectorSlot] = &[slot!(3, "PORTA"), slot!(3, "PORTB")];
        assert!(matches!(
            validate_slots("X", BROKEN),
            Err(RegisterError::LayoutInconsistency { .. })
        ));
    }

    #[test]
    fn test_can_takes_irq8() {
        assert_eq!(irq_of("STM8S208S6", "CAN_RX"), Some(8));
        assert_eq!(irq_of("STM8S208S6", "CAN_TX"), Some(9));
        assert_eq!(irq_of("STM8S208S6", "PORTF"), None);
        assert_eq!(irq_of("STM8S105C4", "PORTF"), Some(8));
        assert_eq!(irq_of("STM8S105C4", "CAN_TX"), None);
    }

    #[test]
    fn test_shared_slots() {
        assert_eq!(irq_of("STM8S903K3", "TIM5_UPD_OVF"), Some(13));
        assert_eq!(irq_of("STM8S903K3", "TIM2_UPD_OVF"), None);
        assert_eq!(irq_of("STM8S903K3", "TIM6_UPD_OVF"), Some(23));
        assert_eq!(irq_of("STM8S207R8", "UART3_RXF"), Some(21));
        assert_eq!(irq_of("STM8S207R8", "ADC2"), Some(22));
        assert_eq!(irq_of("STM8AF6223", "UART4_TXE"), Some(20));
        assert_eq!(irq_of("STM8S103F3", "uart1_rxf"), Some(18));
        assert_eq!(irq_of("STM8S103F3", "TIM3_CAPCOM"), None);
    }

    #[test]
    fn test_l10x_vectors() {
        assert_eq!(irq_of("STM8L101F3", "__I2C_VECTOR__"), Some(29));
        assert_eq!(irq_of("STM8L101F3", "EXTI7"), Some(15));
        assert_eq!(irq_of("STM8L101F3", "TLI"), None);
        let device = DeviceDescriptor::lookup("STM8L101F3").unwrap();
        assert_eq!(vector_table(&device).len(), STM8L10X_VECTORS.len());
    }

    #[test]
    fn test_tl5x_vectors() {
        assert_eq!(irq_of("STM8TL53G4", "PXS"), Some(2));
        assert_eq!(irq_of("STM8TL53G4", "I2C"), Some(29));
        assert_eq!(irq_of("STM8TL53G4", "COMP"), None);
        assert_eq!(irq_of("STM8L101F3", "PXS"), None);
    }

    #[test]
    fn test_vector_symbol() {
        let v = Vector { irq: 0, name: "TLI" };
        assert_eq!(v.symbol(), "__TLI_VECTOR__");
    }
}
