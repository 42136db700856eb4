// Licensed under the Apache-2.0 license

use anyhow::Result;
use stm8_registers_descriptors::device::supported_parts;
use stm8_registers_descriptors::{resolve, AccessKind, DeviceDescriptor, LayoutRegistry};

use crate::DeviceArgs;

pub(crate) fn devices() -> Result<()> {
    println!(
        "{:<12} {:<14} {:<12} {:>7} {:>6} {:>7}",
        "part", "family", "line", "flash", "ram", "eeprom"
    );
    for part in supported_parts() {
        let device = DeviceDescriptor::lookup(part)?;
        println!(
            "{:<12} {:<14} {:<12} {:>7} {:>6} {:>7}",
            device.part,
            device.family_name(),
            device.line_name(),
            device.memory.flash_bytes,
            device.memory.ram_bytes,
            device.memory.eeprom_bytes
        );
    }
    Ok(())
}

fn access(kind: AccessKind) -> &'static str {
    match kind {
        AccessKind::ReadOnly => "r",
        AccessKind::WriteOnly => "w",
        AccessKind::ReadWrite => "rw",
        AccessKind::NoBitAccess => "rw byte",
    }
}

pub(crate) fn symbols(args: &DeviceArgs) -> Result<()> {
    let device = crate::config::device(args)?;
    let registry = LayoutRegistry::load()?;
    let table = resolve(&registry, &device)?;

    println!(
        "{} ({} family, {} line), {}-bit addresses",
        table.part,
        table.family,
        table.line,
        table.address_width.bits()
    );
    for peripheral in &table.peripherals {
        println!();
        println!("{:<24} 0x{:04X}", peripheral.base_symbol(), peripheral.base_address);
        for reg in &peripheral.registers {
            println!(
                "  {:<22} 0x{:04X}  {:<7}  reset 0x{:02X}  {}",
                reg.symbol,
                reg.address,
                access(reg.access),
                reg.reset_value,
                reg.description
            );
            for field in &reg.fields {
                println!(
                    "    {:<20} mask 0x{:02X}  {}",
                    field.symbol,
                    field.mask,
                    field.tag.as_str()
                );
            }
        }
        for word in &peripheral.words {
            println!(
                "  {:<22} 0x{:04X}:0x{:04X}",
                word.symbol, word.high_address, word.low_address
            );
        }
        for value in &peripheral.values {
            println!("  {:<22} 0x{:02X}", value.symbol, value.value);
        }
    }
    Ok(())
}

pub(crate) fn vectors(args: &DeviceArgs) -> Result<()> {
    let device = crate::config::device(args)?;
    for vector in stm8_registers_descriptors::vectors::vector_table(&device) {
        println!("{:>3}  {}", vector.irq, vector.symbol());
    }
    Ok(())
}
