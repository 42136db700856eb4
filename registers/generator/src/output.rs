// Licensed under the Apache-2.0 license

//! Output types and code generation for tock-registers.
//!
//! A [`GeneratedPeripheral`] is built from one resolved peripheral and turned
//! into Rust code using the tock-registers macros:
//!
//! ```text
//! ResolvedPeripheral → GeneratedPeripheral → Rust code string
//!                      ├── GeneratedRegisterType[]  → register_bitfields! { u8, ... }
//!                      └── GeneratedRegister[]      → register_structs! macro
//! ```
//!
//! For the clock controller of an STM8S105 the result looks like:
//!
//! ```text
//! pub const CLK_ADDR: u32 = 0x50c0;
//!
//! pub mod bits {
//!     use tock_registers::register_bitfields;
//!     register_bitfields! { u8,
//!         pub Ckdivr [
//!             Cpudiv OFFSET(0) NUMBITS(3) [],
//!             Hsidiv OFFSET(3) NUMBITS(2) [],
//!         ],
//!     }
//! }
//!
//! pub mod regs {
//!     use tock_registers::register_structs;
//!     register_structs! {
//!         pub Clk {
//!             (0x0 => pub ickr: ReadWrite<u8, super::bits::Ickr::Register>),
//!             ...
//!             (0xf => @END),
//!         }
//!     }
//! }
//! ```

use crate::config::FilterConfig;
use crate::util::{bit_range, camel_case, hex_const, snake_case};
use std::fmt::Write;
use stm8_registers_descriptors::layout::CcmrTag;
use stm8_registers_descriptors::resolver::ResolvedPeripheral;

//=============================================================================
// Generated Types
//=============================================================================

/// A generated bit field within a register.
#[derive(Clone, Debug)]
pub struct GeneratedField {
    pub name: String,
    /// Bit offset within the register.
    pub offset: usize,
    /// Width in bits.
    pub width: usize,
    /// Optional description for doc comments.
    pub description: Option<String>,
}

/// A generated register type with its fields.
///
/// Register types define the bitfield layout and are referenced by
/// register instances.
#[derive(Clone, Debug)]
pub struct GeneratedRegisterType {
    /// Type name (used in CamelCase for the bitfield definition).
    pub name: String,
    pub fields: Vec<GeneratedField>,
}

impl GeneratedRegisterType {
    /// A single field spanning all 8 bits adds nothing over a plain `u8`.
    fn is_trivial(&self) -> bool {
        self.fields.is_empty()
            || (self.fields.len() == 1 && self.fields[0].offset == 0 && self.fields[0].width == 8)
    }
}

/// A generated register instance.
#[derive(Clone, Debug)]
pub struct GeneratedRegister {
    pub name: String,
    /// Byte offset from the peripheral base.
    pub offset: usize,
    /// Name of the register type (for bitfield reference).
    pub type_name: Option<String>,
    pub can_read: bool,
    pub can_write: bool,
}

/// The complete output for a single peripheral instance.
#[derive(Clone, Debug, Default)]
pub struct GeneratedPeripheral {
    /// Instance name (used for struct and module names).
    pub name: String,
    pub base_address: usize,
    pub register_types: Vec<GeneratedRegisterType>,
    pub registers: Vec<GeneratedRegister>,
}

impl GeneratedPeripheral {
    /// Collects the registers of `peripheral` that pass `filter`.
    pub fn from_resolved(peripheral: &ResolvedPeripheral, filter: &FilterConfig) -> Self {
        let mut out = GeneratedPeripheral {
            name: peripheral.name.to_string(),
            base_address: peripheral.base_address as usize,
            ..Default::default()
        };
        for reg in peripheral
            .registers
            .iter()
            .filter(|r| filter.should_include(r.address, peripheral.name))
        {
            let fields: Vec<GeneratedField> = reg
                .fields
                .iter()
                .map(|f| {
                    let view = match f.tag {
                        CcmrTag::Common => String::new(),
                        tag => format!(", {} mode", tag.as_str()),
                    };
                    GeneratedField {
                        name: f.name.to_string(),
                        offset: f.offset as usize,
                        width: f.width as usize,
                        description: Some(format!(
                            "{} {}{view}",
                            f.name,
                            bit_range(f.width, f.offset)
                        )),
                    }
                })
                .collect();
            let type_name = (!fields.is_empty()).then(|| reg.name.to_string());
            if !fields.is_empty() {
                out.register_types.push(GeneratedRegisterType {
                    name: reg.name.to_string(),
                    fields,
                });
            }
            out.registers.push(GeneratedRegister {
                name: reg.name.to_string(),
                offset: reg.offset as usize,
                type_name,
                can_read: reg.access.can_read(),
                can_write: reg.access.can_write(),
            });
        }
        out
    }
}

//=============================================================================
// Code Generation
//=============================================================================

impl GeneratedPeripheral {
    /// Generate the complete Rust code for this peripheral.
    ///
    /// `crate_prefix` is the path from the `regs` module to the `bits`
    /// module's parent, e.g. `super::`.
    pub fn generate_code(&self, crate_prefix: &str) -> String {
        let mut output = String::new();

        let name_upper = snake_case(&self.name).to_uppercase();
        let addr = hex_const(self.base_address as u64);
        writeln!(output, "pub const {name_upper}_ADDR: u32 = {addr};").unwrap();

        let bitfields = self.generate_bitfields();
        if !bitfields.is_empty() {
            writeln!(output, "pub mod bits {{").unwrap();
            writeln!(
                output,
                "    //! Types that represent individual registers (bitfields)."
            )
            .unwrap();
            writeln!(output, "    use tock_registers::register_bitfields;").unwrap();
            write!(output, "{bitfields}").unwrap();
            writeln!(output, "}}").unwrap();
        }

        let reg_structs = self.generate_register_structs(crate_prefix);
        if !reg_structs.is_empty() {
            writeln!(output, "pub mod regs {{").unwrap();
            writeln!(output, "    //! Types that represent registers.").unwrap();
            writeln!(output, "    use tock_registers::register_structs;").unwrap();
            write!(output, "{reg_structs}").unwrap();
            writeln!(output, "}}").unwrap();
        }

        output
    }

    /// Generate one `register_bitfields!` block; every STM8 register is a byte.
    fn generate_bitfields(&self) -> String {
        let mut sorted_types: Vec<_> = self
            .register_types
            .iter()
            .filter(|rt| !rt.is_trivial())
            .collect();
        if sorted_types.is_empty() {
            return String::new();
        }
        sorted_types.sort_by(|a, b| a.name.cmp(&b.name));

        let mut output = String::new();
        writeln!(output, "    register_bitfields! {{").unwrap();
        writeln!(output, "        u8,").unwrap();
        for rt in sorted_types {
            let name = camel_case(&rt.name);
            writeln!(output, "        pub {name} [").unwrap();
            for field in &rt.fields {
                if let Some(desc) = &field.description {
                    for line in desc.lines() {
                        writeln!(output, "            /// {line}").unwrap();
                    }
                }
                let field_name = camel_case(&field.name);
                let offset = field.offset;
                let width = field.width;
                writeln!(
                    output,
                    "            {field_name} OFFSET({offset}) NUMBITS({width}) [],"
                )
                .unwrap();
            }
            writeln!(output, "        ],").unwrap();
        }
        writeln!(output, "    }}").unwrap();
        output
    }

    /// Generate the `register_structs!` invocation, padding gaps with
    /// reserved members.
    fn generate_register_structs(&self, crate_prefix: &str) -> String {
        if self.registers.is_empty() {
            return String::new();
        }

        let struct_name = camel_case(&self.name);
        let mut output = String::new();
        writeln!(output, "    register_structs! {{").unwrap();
        writeln!(output, "        pub {struct_name} {{").unwrap();

        let mut next_offset: usize = 0;
        let mut reserved_count = 0;

        let mut sorted_regs: Vec<_> = self.registers.iter().collect();
        sorted_regs.sort_by_key(|r| r.offset);

        for reg in sorted_regs {
            let reg_offset = reg.offset;
            if reg_offset > next_offset {
                writeln!(
                    output,
                    "            (0x{next_offset:x} => _reserved{reserved_count}),"
                )
                .unwrap();
                reserved_count += 1;
            }

            let name = snake_case(&reg.name);
            let reg_type = if reg.can_read && reg.can_write {
                "ReadWrite"
            } else if reg.can_read {
                "ReadOnly"
            } else {
                "WriteOnly"
            };

            let bitfield = reg.type_name.as_ref().filter(|type_name| {
                self.register_types
                    .iter()
                    .any(|rt| &rt.name == *type_name && !rt.is_trivial())
            });
            let type_str = match bitfield {
                Some(type_name) => format!(
                    "tock_registers::registers::{reg_type}<u8, {crate_prefix}bits::{}::Register>",
                    camel_case(type_name)
                ),
                None => format!("tock_registers::registers::{reg_type}<u8>"),
            };

            writeln!(
                output,
                "            (0x{reg_offset:x} => pub {name}: {type_str}),"
            )
            .unwrap();
            next_offset = reg_offset + 1;
        }

        writeln!(output, "            (0x{next_offset:x} => @END),").unwrap();
        writeln!(output, "        }}").unwrap();
        writeln!(output, "    }}").unwrap();

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stm8_registers_descriptors::{resolve, DeviceDescriptor, LayoutRegistry};

    fn peripheral(part: &str, name: &str, filter: &FilterConfig) -> GeneratedPeripheral {
        let registry = LayoutRegistry::load().unwrap();
        let table = resolve(&registry, &DeviceDescriptor::lookup(part).unwrap()).unwrap();
        GeneratedPeripheral::from_resolved(table.peripheral(name).unwrap(), filter)
    }

    #[test]
    fn test_clock_controller() {
        let code = peripheral("STM8S105C4", "CLK", &FilterConfig::new()).generate_code("super::");
        assert!(code.contains("pub const CLK_ADDR: u32 = 0x50c0;"));
        assert!(code.contains("register_bitfields! {\n        u8,"));
        assert!(code.contains("pub Ckdivr ["));
        assert!(code.contains("Cpudiv OFFSET(0) NUMBITS(3) [],"));
        assert!(code.contains("Hsidiv OFFSET(3) NUMBITS(2) [],"));
        assert!(code.contains(
            "(0x6 => pub ckdivr: tock_registers::registers::ReadWrite<u8, super::bits::Ckdivr::Register>),"
        ));
        assert!(code.contains("pub Clk {"));
        assert!(code.contains("=> @END),"));
    }

    #[test]
    fn test_bytewise_registers_have_no_bitfield() {
        let code = peripheral("STM8S103F3", "UART1", &FilterConfig::new()).generate_code("super::");
        assert!(code.contains("pub brr1: tock_registers::registers::ReadWrite<u8>),"));
        assert!(code.contains("pub Brr2 ["));
        assert!(code.contains("Div0_3 OFFSET(0) NUMBITS(4) [],"));
        assert!(code.contains("Div12_15 OFFSET(4) NUMBITS(4) [],"));
    }

    #[test]
    fn test_read_only_and_padding() {
        let code = peripheral("STM8S103F3", "TIM4", &FilterConfig::new()).generate_code("super::");
        // CR1 is followed by two reserved bytes on low-density parts
        assert!(code.contains("(0x1 => _reserved0),"));
        let porta = peripheral("STM8S103F3", "PORTA", &FilterConfig::new()).generate_code("super::");
        assert!(porta.contains("pub idr: tock_registers::registers::ReadOnly<u8"));
    }

    #[test]
    fn test_capture_mode_fields() {
        let code = peripheral("STM8S105C4", "TIM1", &FilterConfig::new()).generate_code("super::");
        assert!(code.contains("pub Ccmr1 ["));
        assert!(code.contains("Cc1s OFFSET(0) NUMBITS(2) [],"));
        assert!(code.contains("Oc1m OFFSET(4) NUMBITS(3) [],"));
        assert!(code.contains("Ic1f OFFSET(4) NUMBITS(4) [],"));
        assert!(code.contains("/// IC1F [7:4], input mode"));
    }

    #[test]
    fn test_filter_drops_registers() {
        // keep CLK_CKDIVR only
        let filter = FilterConfig::new().include_address_range(0x50C6, 0x50C6);
        let generated = peripheral("STM8S105C4", "CLK", &filter);
        assert_eq!(generated.registers.len(), 1);
        let code = generated.generate_code("super::");
        assert!(code.contains("(0x0 => _reserved0),"));
        assert!(code.contains("(0x7 => @END),"));
    }
}
