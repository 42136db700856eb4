// Licensed under the Apache-2.0 license

//! Register descriptors for the STM8AF/STM8S, STM8L10x and STM8TL5x
//! microcontrollers.
//!
//! The crate models peripheral register layouts, the per-part device table
//! and interrupt vectors as static data, and resolves them into a symbol
//! table of absolute addresses and bit masks for one device:
//!
//! ```
//! use stm8_registers_descriptors::{resolve, DeviceDescriptor, LayoutRegistry};
//!
//! let registry = LayoutRegistry::load().unwrap();
//! let device = DeviceDescriptor::lookup("STM8S105C4").unwrap();
//! let table = resolve(&registry, &device).unwrap();
//! assert_eq!(table.register("CLK", "CKDIVR").unwrap().address, 0x50C6);
//! ```

#[macro_use]
pub mod layout;

pub mod access;
pub mod ccmr;
pub mod device;
pub mod dialect;
pub mod error;
pub mod family;
pub mod memory;
pub mod resolver;
pub mod uart;
pub mod validate;
pub mod vectors;

pub use access::{MemoryBus, RegisterBus, Registers};
pub use ccmr::{CcmrMode, CcmrView};
pub use device::{AnyLine, DeviceDescriptor, PeripheralRef};
pub use dialect::{Dialect, Primitive, ResetWatchdog};
pub use error::{RegisterError, RegisterResult};
pub use family::{
    AfsKind, AfsLine, Family, L10xKind, L10xLine, Stm8AfS, Stm8L10x, Stm8Tl5x, Tl5xKind, Tl5xLine,
};
pub use layout::{AccessKind, CcmrTag};
pub use memory::{AddressWidth, MemorySize};
pub use resolver::{resolve, ResolvedRegister, ResolvedSymbolTable};
pub use uart::UartDivisor;
pub use validate::LayoutRegistry;
pub use vectors::Vector;
