// Licensed under the Apache-2.0 license

//! C header generation.
//!
//! One header is generated per (device, dialect). It pins the compiler,
//! defines the memory map, the dialect specific handler and intrinsic
//! macros, and then one block per present peripheral:
//!
//! ```text
//! #define CLK_AddressBase          0x50C0
//! #define _CLK_CKDIVR              _SFR(uint8_t, CLK_AddressBase+0x06)   ///< Clock divider register
//! #define _CLK_CKDIVR_RESET_VALUE  ((uint8_t) 0x18)
//! #define _CLK_CPUDIV              ((uint8_t) (0x07 << 0))               ///< ... [2:0]
//! ```

use std::fmt::Write;

use anyhow::Result;
use log::info;
use stm8_registers_descriptors::dialect::{self, Dialect, ResetWatchdog, SDCC_TRAP_MIN_VERSION};
use stm8_registers_descriptors::layout::{BitLayout, BitSlot, CcmrTag};
use stm8_registers_descriptors::resolver::{ResolvedPeripheral, ResolvedRegister, ResolvedSymbolTable};

use crate::config::{FilterConfig, HeaderConfig};
use crate::util::{bit_range, c_hex, c_mask};

const RULE: &str =
    "/*-----------------------------------------------------------------------------";
const RULE_END: &str =
    "-----------------------------------------------------------------------------*/";

/// File name of the header for `part`, e.g. `STM8S105C4.h`.
pub fn header_file_name(part: &str) -> String {
    format!("{}.h", part.to_uppercase())
}

fn guard(part: &str) -> String {
    format!("{}_H", part.to_uppercase())
}

fn section(out: &mut String, title: &str) -> std::fmt::Result {
    writeln!(out)?;
    writeln!(out)?;
    writeln!(out, "{RULE}")?;
    writeln!(out, "    {title}")?;
    writeln!(out, "{RULE_END}")?;
    writeln!(out)
}

fn define(out: &mut String, name: &str, value: &str, doc: Option<&str>) -> std::fmt::Result {
    match doc {
        Some(doc) => writeln!(out, "#define {name:<32} {value:<40} ///< {doc}"),
        None => writeln!(out, "#define {name:<32} {value}"),
    }
}

/// Generates the complete header for `table` and `dialect`.
pub fn generate_header(
    table: &ResolvedSymbolTable,
    dialect: Dialect,
    filter: &FilterConfig,
    config: &HeaderConfig,
) -> Result<String> {
    info!("generating {} header for {}", dialect, table.part);
    let mut out = String::new();
    write_preamble(&mut out, table, dialect)?;
    write_memory(&mut out, table)?;
    write_dialect(&mut out, dialect, ResetWatchdog::for_table(table))?;
    write_globals(&mut out, dialect)?;
    if config.vectors {
        write_vectors(&mut out, table, dialect)?;
    }
    section(&mut out, "PERIPHERAL REGISTERS")?;
    for peripheral in &table.peripherals {
        if filter.should_include_peripheral(peripheral.name) {
            write_peripheral(&mut out, peripheral, filter, config)?;
        }
    }
    writeln!(out)?;
    writeln!(out, "#endif // {}", guard(&table.part))?;
    Ok(out)
}

fn write_preamble(out: &mut String, table: &ResolvedSymbolTable, dialect: Dialect) -> Result<()> {
    let file = header_file_name(&table.part);
    writeln!(out, "/** \\file {file}")?;
    writeln!(out)?;
    writeln!(
        out,
        "  \\brief Register definitions for {} ({} family, {} line), {} dialect",
        table.part, table.family, table.line, dialect
    )?;
    writeln!(out)?;
    writeln!(out, "  Generated file, do not edit.")?;
    writeln!(out, "*/")?;
    writeln!(out)?;
    writeln!(out, "#ifndef {}", guard(&table.part))?;
    writeln!(out, "#define {}", guard(&table.part))?;

    section(out, "COMPILER DETECTION")?;
    writeln!(out, "#if defined({})", dialect.compiler_macro())?;
    writeln!(out, "  #define {}", dialect.marker_macro())?;
    if dialect == Dialect::Sdcc {
        writeln!(out, "  #define SDCC_VERSION (__SDCC_VERSION_MAJOR * 10000 \\")?;
        writeln!(out, "                      + __SDCC_VERSION_MINOR * 100 \\")?;
        writeln!(out, "                      + __SDCC_VERSION_PATCH)")?;
    }
    writeln!(out, "#else")?;
    writeln!(
        out,
        "  #error in '{file}': header was generated for the {dialect} compiler"
    )?;
    writeln!(out, "#endif")?;
    Ok(())
}

fn write_memory(out: &mut String, table: &ResolvedSymbolTable) -> Result<()> {
    let memory = &table.memory;
    section(out, "MEMORY SIZES AND ADDRESSES")?;
    define(out, "STM8_PFLASH_SIZE", &memory.flash.size.to_string(), Some("size of program flash [B]"))?;
    define(out, "STM8_RAM_SIZE", &memory.ram.size.to_string(), Some("size of RAM [B]"))?;
    define(out, "STM8_EEPROM_SIZE", &memory.eeprom.size.to_string(), Some("size of data EEPROM [B]"))?;
    writeln!(out)?;
    define(out, "STM8_PFLASH_START", &c_hex(memory.flash.start, 4), None)?;
    define(out, "STM8_PFLASH_END", "(STM8_PFLASH_START + STM8_PFLASH_SIZE - 1)", None)?;
    define(out, "STM8_RAM_START", &c_hex(memory.ram.start, 4), None)?;
    define(out, "STM8_RAM_END", "(STM8_RAM_START + STM8_RAM_SIZE - 1)", None)?;
    if memory.eeprom.size > 0 {
        define(out, "STM8_EEPROM_START", &c_hex(memory.eeprom.start, 4), None)?;
        define(out, "STM8_EEPROM_END", "(STM8_EEPROM_START + STM8_EEPROM_SIZE - 1)", None)?;
    }
    writeln!(out)?;
    let width = table.address_width;
    define(out, "STM8_ADDR_WIDTH", &width.bits().to_string(), Some("width of address space"))?;
    define(out, "STM8_MEM_POINTER_T", width.pointer_type(), Some("type of memory pointers"))?;
    Ok(())
}

fn write_dialect(out: &mut String, dialect: Dialect, reset: ResetWatchdog) -> Result<()> {
    section(out, "COMPILER SPECIFIC SETTINGS")?;
    if let Some(include) = dialect.intrinsics_include() {
        writeln!(out, "// include intrinsic functions")?;
        writeln!(out, "#include {include}")?;
        writeln!(out)?;
    }

    writeln!(out, "// macros to unify ISR declaration and implementation")?;
    let (isr, trap) = dialect::handler_macros(dialect);
    match dialect {
        Dialect::Iar => {
            define(out, "_STRINGIFY(x)", "#x", None)?;
            define(out, "_IAR_VECTOR(n)", "_Pragma(_STRINGIFY(vector = n))", None)?;
            define(out, "ISR_HANDLER(func,irq)", &isr, None)?;
            define(out, "ISR_HANDLER_TRAP(func)", &trap, None)?;
        }
        Dialect::Sdcc => {
            define(out, "ISR_HANDLER(func,irq)", &isr, None)?;
            writeln!(out, "#if SDCC_VERSION >= {SDCC_TRAP_MIN_VERSION}")?;
            writeln!(out, "  #define ISR_HANDLER_TRAP(func) {trap}")?;
            writeln!(out, "#else")?;
            writeln!(out, "  #error traps require SDCC >=3.4.3. Please update!")?;
            writeln!(out, "#endif")?;
        }
        Dialect::Cosmic | Dialect::Raisonance => {
            define(out, "ISR_HANDLER(func,irq)", &isr, None)?;
            define(out, "ISR_HANDLER_TRAP(func)", &trap, None)?;
        }
    }
    writeln!(out)?;

    writeln!(out, "// common assembler instructions")?;
    for m in dialect::instruction_macros(dialect, reset) {
        define(out, m.signature, &m.body, Some(m.doc))?;
    }
    writeln!(out)?;
    writeln!(out, "// data type in bit fields")?;
    define(out, "_BITS", dialect.bitfield_storage_type(), None)?;
    Ok(())
}

fn write_globals(out: &mut String, dialect: Dialect) -> Result<()> {
    section(out, "DEFINITION OF GLOBAL MACROS/#DEFINES")?;
    define(out, "_SFR(type, addr)", "(*((volatile type*) (addr)))", Some("peripheral register"))?;

    section(out, "STANDARD DATA TYPES")?;
    if dialect.has_stdint() {
        writeln!(out, "#include <stdint.h>")?;
        return Ok(());
    }
    writeln!(out, "// skip if already defined")?;
    writeln!(out, "#ifndef INT8_MAX")?;
    for (ty, name) in [
        ("signed long", "int32_t"),
        ("signed short", "int16_t"),
        ("signed char", "int8_t"),
        ("unsigned long", "uint32_t"),
        ("unsigned short", "uint16_t"),
        ("unsigned char", "uint8_t"),
    ] {
        writeln!(out, "  typedef {ty:<15} {name};")?;
    }
    writeln!(out)?;
    for (name, value) in [
        ("INT8_MAX", "0x7f"),
        ("INT8_MIN", "(-INT8_MAX - 1)"),
        ("UINT8_MAX", "0xFF"),
        ("UINT8_MIN", "0"),
        ("INT16_MAX", "0x7fff"),
        ("INT16_MIN", "(-INT16_MAX - 1)"),
        ("UINT16_MAX", "0xFFFF"),
        ("UINT16_MIN", "0"),
        ("INT32_MAX", "0x7fffffffL"),
        ("INT32_MIN", "(-INT32_MAX - 1L)"),
        ("UINT32_MAX", "0xFFFFFFFF"),
        ("UINT32_MIN", "0"),
    ] {
        writeln!(out, "  #define {name:<12} {value}")?;
    }
    writeln!(out, "#endif // INT8_MAX")?;
    Ok(())
}

fn write_vectors(out: &mut String, table: &ResolvedSymbolTable, dialect: Dialect) -> Result<()> {
    section(out, "ISR VECTOR TABLE")?;
    if dialect == Dialect::Iar {
        writeln!(
            out,
            "// hardware IRQ numbers; ISR_HANDLER adds the IAR vector offset"
        )?;
    }
    for vector in &table.vectors {
        define(
            out,
            &vector.symbol(),
            &vector.irq.to_string(),
            Some(&format!("irq{}", vector.irq)),
        )?;
    }
    Ok(())
}

fn write_peripheral(
    out: &mut String,
    peripheral: &ResolvedPeripheral,
    filter: &FilterConfig,
    config: &HeaderConfig,
) -> Result<()> {
    writeln!(out)?;
    writeln!(out, "//------------------------")?;
    writeln!(out, "// {}", peripheral.name)?;
    writeln!(out, "//------------------------")?;
    define(
        out,
        &peripheral.base_symbol(),
        &c_hex(peripheral.base_address, 4),
        Some(&format!("base address of {}", peripheral.name)),
    )?;

    let registers: Vec<&ResolvedRegister> = peripheral
        .registers
        .iter()
        .filter(|r| filter.should_include(r.address, peripheral.name))
        .collect();

    if config.bitfield_structs {
        for reg in &registers {
            write_bitfield_struct(out, reg)?;
        }
    }

    for reg in &registers {
        writeln!(out)?;
        writeln!(out, "// {} ({})", reg.description, reg.symbol)?;
        define(
            out,
            &format!("_{}", reg.symbol),
            &format!(
                "_SFR(uint8_t, {}+{})",
                peripheral.base_symbol(),
                c_hex(u32::from(reg.offset), 2)
            ),
            Some(reg.description),
        )?;
        define(
            out,
            &format!("_{}_RESET_VALUE", reg.symbol),
            &format!("((uint8_t) {})", c_hex(u32::from(reg.reset_value), 2)),
            None,
        )?;
        for field in &reg.fields {
            let view = match field.tag {
                CcmrTag::Common => String::new(),
                tag => format!(" ({} mode)", tag.as_str()),
            };
            define(
                out,
                &format!("_{}", field.symbol),
                &c_mask(field.width, field.offset),
                Some(&format!(
                    "{} {}{} {}",
                    reg.symbol,
                    field.name,
                    view,
                    bit_range(field.width, field.offset)
                )),
            )?;
            if config.per_bit_masks {
                for (symbol, bit) in &field.bit_symbols {
                    define(
                        out,
                        &format!("_{symbol}"),
                        &c_mask(1, field.offset + bit),
                        Some(&format!("{} {} bit {bit}", reg.symbol, field.name)),
                    )?;
                }
            }
        }
        for value in peripheral.values.iter().filter(|v| v.register == reg.name) {
            define(
                out,
                &format!("_{}", value.symbol),
                &format!("((uint8_t) {})", c_hex(u32::from(value.value), 2)),
                Some(&format!("{} value", reg.symbol)),
            )?;
        }
    }
    Ok(())
}

fn write_struct_members(out: &mut String, slots: &[BitSlot], indent: &str) -> std::fmt::Result {
    for slot in slots {
        match slot {
            BitSlot::Field(f) => writeln!(out, "{indent}_BITS {:<10} : {};", f.name, f.width)?,
            BitSlot::Reserved { width, .. } => writeln!(out, "{indent}_BITS {:<10} : {width};", "")?,
        }
    }
    Ok(())
}

fn write_bitfield_struct(out: &mut String, reg: &ResolvedRegister) -> Result<()> {
    let name = format!("{}_t", reg.symbol);
    match reg.layout.bits {
        BitLayout::Bytewise => return Ok(()),
        BitLayout::Fields(slots) => {
            writeln!(out)?;
            writeln!(out, "/** {} ({}) */", reg.description, reg.symbol)?;
            writeln!(out, "typedef union {{")?;
            writeln!(out, "  uint8_t byte;")?;
            writeln!(out, "  struct {{")?;
            write_struct_members(out, slots, "    ")?;
            writeln!(out, "  }} bits;")?;
            writeln!(out, "}} {name};")?;
        }
        BitLayout::Capture(ccmr) => {
            writeln!(out)?;
            writeln!(out, "/** {} ({}) */", reg.description, reg.symbol)?;
            writeln!(out, "typedef union {{")?;
            writeln!(out, "  uint8_t byte;")?;
            for (view, slots) in [("out", ccmr.output), ("in", ccmr.input)] {
                writeln!(out, "  struct {{")?;
                writeln!(out, "    _BITS {:<10} : {};", ccmr.selector.name, ccmr.selector.width)?;
                write_struct_members(out, slots, "    ")?;
                writeln!(out, "  }} {view};")?;
            }
            writeln!(out, "}} {name};")?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use stm8_registers_descriptors::{resolve, DeviceDescriptor, LayoutRegistry};

    fn header(part: &str, dialect: Dialect) -> String {
        let registry = LayoutRegistry::load().unwrap();
        let table = resolve(&registry, &DeviceDescriptor::lookup(part).unwrap()).unwrap();
        generate_header(&table, dialect, &FilterConfig::new(), &HeaderConfig::default()).unwrap()
    }

    #[test]
    fn test_register_definitions() {
        let code = header("STM8S105C4", Dialect::Sdcc);
        assert!(code.contains("#ifndef STM8S105C4_H"));
        assert!(code.contains("#define CLK_AddressBase"));
        assert!(code.contains("_SFR(uint8_t, CLK_AddressBase+0x06)"));
        assert!(code.contains("((uint8_t) (0x07 << 0))"));
        assert!(code.contains("#define _CLK_CKDIVR_RESET_VALUE"));
        assert!(code.contains("#define _CLK_CPUDIV0"));
        assert!(code.contains("#define _CLK_SWI_HSI"));
        assert!(code.contains("_BITS CPUDIV"));
        assert!(!code.contains("UART1_AddressBase"));
    }

    #[test]
    fn test_sdcc_dialect() {
        let code = header("STM8S105C4", Dialect::Sdcc);
        assert!(code.contains("#if defined(__SDCC)"));
        assert!(code.contains("void func(void) __interrupt(irq)"));
        assert!(code.contains("#if SDCC_VERSION >= 30403"));
        assert!(code.contains("#include <stdint.h>"));
        assert!(code.contains("unsigned int"));
        assert!(code.contains("#define TRIGGER_TRAP "));
    }

    #[test]
    fn test_iar_dialect() {
        let code = header("STM8S105C4", Dialect::Iar);
        assert!(code.contains("#include <intrinsics.h>"));
        assert!(code.contains("_IAR_VECTOR(irq + 2) __interrupt void func(void)"));
        assert!(code.contains("unsigned char"));
        assert!(code.contains("typedef unsigned char   uint8_t;"));
    }

    #[test]
    fn test_cosmic_and_raisonance() {
        let cosmic = header("STM8S103F3", Dialect::Cosmic);
        assert!(cosmic.contains("@far @interrupt void func(void)"));
        assert!(cosmic.contains("_asm(\"nop\")"));
        let raisonance = header("STM8S103F3", Dialect::Raisonance);
        assert!(raisonance.contains("#include <intrins.h>"));
        assert!(raisonance.contains("void func(void) interrupt irq"));
    }

    #[test]
    fn test_vectors_follow_peripherals() {
        let s208 = header("STM8S208S6", Dialect::Sdcc);
        assert!(s208.contains("__CAN_RX_VECTOR__"));
        assert!(!s208.contains("__PORTF_VECTOR__"));
        let l101 = header("STM8L101F3", Dialect::Sdcc);
        assert!(l101.contains("__I2C_VECTOR__"));
        assert!(l101.contains("#define STM8_PFLASH_START"));
        assert!(!l101.contains("STM8_EEPROM_START"));
    }

    #[test]
    fn test_software_reset_uses_present_watchdog() {
        let sw_reset = |code: &str| {
            code.lines()
                .find(|l| l.starts_with("#define SW_RESET()"))
                .map(|l| l.to_string())
                .unwrap()
        };
        let l101 = header("STM8L101F3", Dialect::Sdcc);
        assert!(sw_reset(&l101).contains("(_IWDG_KR=_IWDG_KEY_ENABLE)"));
        assert!(l101.contains("#define _IWDG_KR "));
        assert!(l101.contains("#define _IWDG_KEY_ENABLE "));
        assert!(!l101.contains("_WWDG_CR"));

        let s105 = header("STM8S105C4", Dialect::Iar);
        assert!(sw_reset(&s105).contains("(_WWDG_CR=0xBF)"));
        assert!(s105.contains("#define _WWDG_CR "));
    }

    #[test]
    fn test_touch_sensing_header() {
        let code = header("STM8TL53G4", Dialect::Sdcc);
        assert!(code.contains("(STM8TL5x family, STM8TL5x line)"));
        assert!(code.contains("_SFR(uint8_t, PXS_AddressBase+0x04)"));
        assert!(code.contains("#define _PXS_EOCF "));
        assert!(code.contains("#define _RST_PIN_KEY "));
        assert!(code.contains("__PXS_VECTOR__"));
        assert!(code.contains(&format!("#define {:<32} 0xB800", "STM8_EEPROM_START")));
        assert!(code
            .lines()
            .any(|l| l.starts_with("#define SW_RESET()") && l.contains("(_WWDG_CR=0xBF)")));
    }

    #[test]
    fn test_ccmr_union() {
        let code = header("STM8S105C4", Dialect::Sdcc);
        assert!(code.contains("} TIM1_CCMR1_t;"));
        assert!(code.contains("_BITS IC1F"));
        assert!(code.contains("(output mode)"));
    }

    #[test]
    fn test_filter() {
        let registry = LayoutRegistry::load().unwrap();
        let table = resolve(&registry, &DeviceDescriptor::lookup("STM8S105C4").unwrap()).unwrap();
        let filter = FilterConfig::new().include_peripheral("CLK");
        let code = generate_header(&table, Dialect::Sdcc, &filter, &HeaderConfig::minimal()).unwrap();
        assert!(code.contains("_CLK_CKDIVR"));
        assert!(!code.contains("TIM1_AddressBase"));
        assert!(!code.contains("__TLI_VECTOR__"));
        assert!(!code.contains("typedef union"));
    }
}
