// Licensed under the Apache-2.0 license

//! Consistency checks.
//!
//! Loading the [`LayoutRegistry`] validates every layout table. On top of
//! that each supported part is resolved and its address table round-tripped.
//! With a directory, every `<PART>.h` below it is regenerated in the dialect
//! it was generated for and compared.

use anyhow::{bail, Context, Result};
use log::{debug, info};
use std::fs;
use std::path::{Path, PathBuf};
use stm8_registers_descriptors::device::supported_parts;
use stm8_registers_descriptors::{resolve, DeviceDescriptor, Dialect, LayoutRegistry};
use stm8_registers_generator::{generate_header, FilterConfig, HeaderConfig};
use walkdir::WalkDir;

pub(crate) fn check(dir: Option<&Path>) -> Result<()> {
    let registry = LayoutRegistry::load()?;
    for part in supported_parts() {
        let device = DeviceDescriptor::lookup(part)?;
        let table = resolve(&registry, &device)?;
        for reg in table.registers() {
            let found = table.lookup_address(reg.address).map(|r| r.symbol.as_str());
            if found != Some(reg.symbol.as_str()) {
                bail!(
                    "{part}: address 0x{:04X} maps to {found:?}, expected {}",
                    reg.address,
                    reg.symbol
                );
            }
        }
        debug!("{part}: {} registers", table.registers().count());
    }
    info!("{} devices consistent", supported_parts().count());

    if let Some(dir) = dir {
        let stale = stale_headers(&registry, dir)?;
        if !stale.is_empty() {
            let list: Vec<String> = stale.iter().map(|p| p.display().to_string()).collect();
            bail!(
                "{} generated header(s) out of date, regenerate with `cargo xtask header`:\n  {}",
                stale.len(),
                list.join("\n  ")
            );
        }
    }
    Ok(())
}

/// Dialect a header was generated for, from its compiler detection block.
fn detect_dialect(text: &str) -> Option<Dialect> {
    text.lines()
        .filter_map(|line| line.trim().strip_prefix("#if defined("))
        .filter_map(|rest| rest.strip_suffix(')'))
        .find_map(|name| Dialect::from_compiler_macro(name).ok())
}

fn stale_headers(registry: &LayoutRegistry, dir: &Path) -> Result<Vec<PathBuf>> {
    let mut stale = Vec::new();
    let mut checked = 0;
    for entry in WalkDir::new(dir) {
        let entry = entry?;
        let path = entry.path();
        if !entry.file_type().is_file() || path.extension().and_then(|e| e.to_str()) != Some("h") {
            continue;
        }
        let Some(part) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };
        let Ok(device) = DeviceDescriptor::lookup(part) else {
            debug!("skipping {}: not a generated header", path.display());
            continue;
        };
        let text =
            fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
        let Some(dialect) = detect_dialect(&text) else {
            debug!("skipping {}: no compiler detection block", path.display());
            continue;
        };
        let table = resolve(registry, &device)?;
        let expected =
            generate_header(&table, dialect, &FilterConfig::new(), &HeaderConfig::default())?;
        if text != expected {
            stale.push(path.to_path_buf());
        }
        checked += 1;
    }
    info!("{checked} generated header(s) checked");
    Ok(stale)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_header(dir: &Path, part: &str, dialect: Dialect) -> PathBuf {
        let registry = LayoutRegistry::load().unwrap();
        let table = resolve(&registry, &DeviceDescriptor::lookup(part).unwrap()).unwrap();
        let code =
            generate_header(&table, dialect, &FilterConfig::new(), &HeaderConfig::default())
                .unwrap();
        let path = dir.join(stm8_registers_generator::header_file_name(part));
        fs::write(&path, code).unwrap();
        path
    }

    #[test]
    fn test_check_all_devices() {
        check(None).unwrap();
    }

    #[test]
    fn test_detect_dialect() {
        assert_eq!(detect_dialect("#if defined(__ICCSTM8__)\n"), Some(Dialect::Iar));
        assert_eq!(detect_dialect("#if defined(__GNUC__)\n"), None);
        assert_eq!(detect_dialect("int x;\n"), None);
    }

    #[test]
    fn test_up_to_date_headers() {
        let dir = tempfile::tempdir().unwrap();
        write_header(dir.path(), "STM8S105C4", Dialect::Iar);
        let nested = dir.path().join("l10x");
        fs::create_dir(&nested).unwrap();
        write_header(&nested, "STM8L101F3", Dialect::Sdcc);
        fs::write(dir.path().join("board.h"), "#define LED 5\n").unwrap();
        check(Some(dir.path())).unwrap();
    }

    #[test]
    fn test_stale_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_header(dir.path(), "STM8S208S6", Dialect::Raisonance);
        let edited = fs::read_to_string(&path).unwrap().replace("0x50C0", "0x50C1");
        fs::write(&path, edited).unwrap();
        let registry = LayoutRegistry::load().unwrap();
        assert_eq!(stale_headers(&registry, dir.path()).unwrap(), vec![path]);
        assert!(check(Some(dir.path())).is_err());
    }
}
