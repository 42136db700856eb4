// Licensed under the Apache-2.0 license

//! C header and Rust module generator for STM8 register descriptors.
//!
//! Both outputs are rendered from a
//! [`ResolvedSymbolTable`](stm8_registers_descriptors::ResolvedSymbolTable), so a header and
//! a Rust module generated for the same device always agree on addresses,
//! masks and reset values.
//!
//! ## Usage
//!
//! ```
//! use stm8_registers_descriptors::{resolve, DeviceDescriptor, Dialect, LayoutRegistry};
//! use stm8_registers_generator::{generate_header, FilterConfig, HeaderConfig};
//!
//! let registry = LayoutRegistry::load().unwrap();
//! let device = DeviceDescriptor::lookup("STM8S103F3").unwrap();
//! let table = resolve(&registry, &device).unwrap();
//! let header = generate_header(
//!     &table,
//!     Dialect::Sdcc,
//!     &FilterConfig::new(),
//!     &HeaderConfig::default(),
//! )
//! .unwrap();
//! assert!(header.contains("#define _CLK_CKDIVR"));
//! ```
//!
//! ## Module Organization
//!
//! - [`util`]: Name conversion and literal formatting
//! - [`config`]: Output filtering ([`FilterConfig`]) and header options ([`HeaderConfig`])
//! - [`header`]: C header generation
//! - [`output`]: tock-registers code for one peripheral
//! - [`rust`]: Complete Rust module for a device

pub mod config;
pub mod header;
pub mod output;
pub mod rust;
pub mod util;

pub use config::{FilterConfig, HeaderConfig};
pub use header::{generate_header, header_file_name};
pub use output::{GeneratedField, GeneratedPeripheral, GeneratedRegister, GeneratedRegisterType};
pub use rust::{generate_rust, rust_file_name};
