// Licensed under the Apache-2.0 license

//! Generate C headers and Rust modules for one device.

use anyhow::Result;
use std::path::Path;
use stm8_registers_descriptors::{resolve, Dialect, LayoutRegistry, ResolvedSymbolTable};
use stm8_registers_generator::{generate_header, generate_rust, FilterConfig, HeaderConfig};

use crate::DeviceArgs;

fn resolve_device(args: &DeviceArgs) -> Result<ResolvedSymbolTable> {
    let device = crate::config::device(args)?;
    let registry = LayoutRegistry::load()?;
    Ok(resolve(&registry, &device)?)
}

fn write_output(code: &str, output: Option<&Path>) -> Result<()> {
    if let Some(output_path) = output {
        std::fs::write(output_path, code)?;
        println!("Output written to: {}", output_path.display());
    } else {
        print!("{code}");
    }
    Ok(())
}

pub(crate) fn header(
    device: &DeviceArgs,
    dialect: Dialect,
    filter: &FilterConfig,
    minimal: bool,
    output: Option<&Path>,
) -> Result<()> {
    let table = resolve_device(device)?;
    let config = if minimal {
        HeaderConfig::minimal()
    } else {
        HeaderConfig::default()
    };
    let code = generate_header(&table, dialect, filter, &config)?;
    write_output(&code, output)
}

pub(crate) fn rust(device: &DeviceArgs, filter: &FilterConfig, output: Option<&Path>) -> Result<()> {
    let table = resolve_device(device)?;
    let code = generate_rust(&table, filter)?;
    write_output(&format!("// Generated by xtask rust\n\n{code}"), output)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn part(name: &str) -> DeviceArgs {
        DeviceArgs {
            part: Some(name.into()),
            config: None,
        }
    }

    #[test]
    fn test_header_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("STM8S103F3.h");
        header(
            &part("STM8S103F3"),
            Dialect::Cosmic,
            &FilterConfig::new(),
            false,
            Some(&path),
        )
        .unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("#if defined(__CSMC__)"));
        assert!(text.contains("#define _UART1_BRR1"));
    }

    #[test]
    fn test_rust_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stm8l101f3.rs");
        rust(
            &part("STM8L101F3"),
            &FilterConfig::new().include_peripheral("USART"),
            Some(&path),
        )
        .unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("// Generated by xtask rust"));
        assert!(text.contains("pub mod usart {"));
        assert!(!text.contains("pub mod clk {"));
    }

    #[test]
    fn test_unknown_part() {
        let err = header(
            &part("STM8S999"),
            Dialect::Sdcc,
            &FilterConfig::new(),
            false,
            None,
        )
        .unwrap_err();
        assert!(err.to_string().contains("STM8S999"));
    }
}
