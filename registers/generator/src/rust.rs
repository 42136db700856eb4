// Licensed under the Apache-2.0 license

//! Rust module generation.
//!
//! Constants (memory map, vector numbers, register addresses, field masks
//! and reset values) are built with `quote!`, the tock-registers types of
//! each peripheral come from [`GeneratedPeripheral`]. The combined file is
//! parsed with `syn` and pretty printed.

use std::collections::HashSet;

use anyhow::{anyhow, Context, Result};
use log::info;
use proc_macro2::{Literal, Span, TokenStream};
use quote::quote;
use stm8_registers_descriptors::resolver::{ResolvedPeripheral, ResolvedSymbolTable};
use syn::{Ident, LitInt};

use crate::config::FilterConfig;
use crate::output::GeneratedPeripheral;
use crate::util::{hex_const, snake_case};

/// File name of the Rust module for `part`, e.g. `stm8s105c4.rs`.
pub fn rust_file_name(part: &str) -> String {
    format!("{}.rs", part.to_lowercase())
}

fn ident(name: &str) -> Result<Ident> {
    syn::parse_str(name).with_context(|| format!("{name:?} is not a valid identifier"))
}

fn const_ident(name: &str) -> Result<Ident> {
    ident(&snake_case(name).to_uppercase())
}

fn hex(value: u32) -> LitInt {
    LitInt::new(&hex_const(value.into()), Span::call_site())
}

/// Generates a Rust module with every symbol of `table` that passes `filter`.
pub fn generate_rust(table: &ResolvedSymbolTable, filter: &FilterConfig) -> Result<String> {
    info!("generating Rust module for {}", table.part);

    let doc = format!(
        " Register definitions for {} ({} family, {} line).\n\n Generated file, do not edit.",
        table.part, table.family, table.line
    );
    let part = &table.part;
    let memory = &table.memory;
    let (flash_start, flash_size) = (hex(memory.flash.start), hex(memory.flash.size));
    let (ram_start, ram_size) = (hex(memory.ram.start), hex(memory.ram.size));
    let (eeprom_start, eeprom_size) = (hex(memory.eeprom.start), hex(memory.eeprom.size));
    let address_width = Literal::u8_unsuffixed(table.address_width.bits());

    let vectors = table
        .vectors
        .iter()
        .map(|v| {
            let name = ident(v.name)?;
            let irq = Literal::u8_unsuffixed(v.irq);
            Ok(quote! { pub const #name: u8 = #irq; })
        })
        .collect::<Result<Vec<_>>>()?;

    let peripherals = table
        .peripherals
        .iter()
        .filter(|p| filter.should_include_peripheral(p.name))
        .map(|p| peripheral_tokens(p, filter))
        .collect::<Result<Vec<_>>>()?;

    let tokens = quote! {
        #![doc = #doc]

        pub const PART: &str = #part;

        pub const FLASH_START: u32 = #flash_start;
        pub const FLASH_SIZE: u32 = #flash_size;
        pub const RAM_START: u32 = #ram_start;
        pub const RAM_SIZE: u32 = #ram_size;
        pub const EEPROM_START: u32 = #eeprom_start;
        pub const EEPROM_SIZE: u32 = #eeprom_size;
        /// Width of a data pointer reaching all of flash.
        pub const ADDRESS_WIDTH: u8 = #address_width;

        pub mod vectors {
            //! Hardware interrupt numbers.
            #(#vectors)*
        }

        #(#peripherals)*
    };

    let file: syn::File = syn::parse2(tokens).context("generated code does not parse")?;
    Ok(prettyplease::unparse(&file))
}

fn peripheral_tokens(peripheral: &ResolvedPeripheral, filter: &FilterConfig) -> Result<TokenStream> {
    let module = ident(&snake_case(peripheral.name))?;
    let doc = format!(" {} at {:#06x}.", peripheral.name, peripheral.base_address);
    let base = hex(peripheral.base_address);

    let mut registers = Vec::new();
    for reg in peripheral
        .registers
        .iter()
        .filter(|r| filter.should_include(r.address, peripheral.name))
    {
        let name = const_ident(reg.name)?;
        let module = ident(&snake_case(reg.name))?;
        let address = hex(reg.address);
        let reset = hex(reg.reset_value.into());
        let description = format!(" {}", reg.description);

        let mut seen = HashSet::new();
        let mut fields = Vec::new();
        for field in &reg.fields {
            if !seen.insert(field.name) {
                continue;
            }
            let field_name = const_ident(field.name)?;
            let mask = hex(field.mask.into());
            let offset = Literal::u8_unsuffixed(field.offset);
            let offset_name = const_ident(&format!("{}_OFFSET", field.name))?;
            fields.push(quote! {
                pub const #field_name: u8 = #mask;
                pub const #offset_name: u8 = #offset;
            });
        }
        let values = peripheral
            .values
            .iter()
            .filter(|v| v.register == reg.name)
            .map(|v| {
                let name = const_ident(v.name)?;
                let value = hex(v.value.into());
                Ok(quote! { pub const #name: u8 = #value; })
            })
            .collect::<Result<Vec<_>>>()?;

        registers.push(quote! {
            #[doc = #description]
            pub const #name: u32 = #address;

            pub mod #module {
                pub const RESET_VALUE: u8 = #reset;
                #(#fields)*
                #(#values)*
            }
        });
    }

    let words = peripheral
        .words
        .iter()
        .map(|w| {
            let name = const_ident(&format!("{}_WORD", w.name))?;
            let (high, low) = (hex(w.high_address), hex(w.low_address));
            Ok(quote! {
                /// High and low byte addresses; access high byte first.
                pub const #name: (u32, u32) = (#high, #low);
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let tock: TokenStream = GeneratedPeripheral::from_resolved(peripheral, filter)
        .generate_code("super::")
        .parse()
        .map_err(|e| anyhow!("tock-registers code for {}: {e}", peripheral.name))?;

    Ok(quote! {
        #[doc = #doc]
        pub mod #module {
            pub const BASE: u32 = #base;
            #(#registers)*
            #(#words)*
            #tock
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use stm8_registers_descriptors::{resolve, DeviceDescriptor, LayoutRegistry};

    fn table(part: &str) -> ResolvedSymbolTable {
        let registry = LayoutRegistry::load().unwrap();
        resolve(&registry, &DeviceDescriptor::lookup(part).unwrap()).unwrap()
    }

    #[test]
    fn test_generate_rust() {
        let code = generate_rust(&table("STM8S105C4"), &FilterConfig::new()).unwrap();
        assert!(code.contains("pub const PART: &str = \"STM8S105C4\";"));
        assert!(code.contains("pub const FLASH_START: u32 = 0x8000;"));
        assert!(code.contains("pub const ADDRESS_WIDTH: u8 = 16;"));
        assert!(code.contains("pub mod clk {"));
        assert!(code.contains("pub const CKDIVR: u32 = 0x50c6;"));
        assert!(code.contains("pub const RESET_VALUE: u8 = 0x18;"));
        assert!(code.contains("pub const CPUDIV: u8 = 7;"));
        assert!(code.contains("pub const HSIDIV: u8 = 0x18;"));
        assert!(code.contains("pub const SWI_HSI: u8 = 0xe1;"));
        assert!(code.contains("pub const TLI: u8 = 0;"));
        assert!(code.contains("pub const CPUDIV_OFFSET: u8 = 0;"));
        assert!(code.contains("register_bitfields!"));
        assert!(code.contains("register_structs!"));
        assert!(!code.contains("pub mod uart1 {"));
    }

    #[test]
    fn test_words_and_filter() {
        let filter = FilterConfig::new().include_peripheral("TIM1");
        let code = generate_rust(&table("STM8S208S6"), &filter).unwrap();
        assert!(code.contains("pub mod tim1 {"));
        assert!(code.contains("pub const CNTR_WORD: (u32, u32) = (0x525e, 0x525f);"));
        assert!(!code.contains("pub mod clk {"));
        assert!(code.contains("pub const CAN_RX: u8 = 8;"));
    }

    #[test]
    fn test_file_name() {
        assert_eq!(rust_file_name("STM8S105C4"), "stm8s105c4.rs");
    }
}
