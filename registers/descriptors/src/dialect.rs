// Licensed under the Apache-2.0 license

//! Compiler dialects.
//!
//! The four supported STM8 toolchains disagree on interrupt handler syntax,
//! intrinsic names and the integer type usable in bit fields. Everything
//! else in a generated header is dialect independent.

use std::str::FromStr;

use strum_macros::{Display, EnumIter, IntoStaticStr};

use crate::error::{RegisterError, RegisterResult};
use crate::resolver::ResolvedSymbolTable;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumIter, IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
pub enum Dialect {
    Cosmic,
    Raisonance,
    Iar,
    Sdcc,
}

/// Minimum SDCC version (major * 10000 + minor * 100 + patch) with trap support.
pub const SDCC_TRAP_MIN_VERSION: u32 = 30403;

/// IAR numbers interrupt vectors from the reset vector, two entries before IRQ0.
pub const IAR_VECTOR_OFFSET: u8 = 2;

impl FromStr for Dialect {
    type Err = RegisterError;

    fn from_str(s: &str) -> RegisterResult<Self> {
        match s.to_ascii_lowercase().as_str() {
            "cosmic" | "csmc" => Ok(Dialect::Cosmic),
            "raisonance" | "rcst7" => Ok(Dialect::Raisonance),
            "iar" | "iccstm8" => Ok(Dialect::Iar),
            "sdcc" => Ok(Dialect::Sdcc),
            _ => Err(RegisterError::UnsupportedDialect(s.to_string())),
        }
    }
}

impl Dialect {
    pub fn name(self) -> &'static str {
        self.into()
    }

    /// Macro predefined by the compiler itself.
    pub fn compiler_macro(self) -> &'static str {
        match self {
            Dialect::Cosmic => "__CSMC__",
            Dialect::Raisonance => "__RCST7__",
            Dialect::Iar => "__ICCSTM8__",
            Dialect::Sdcc => "__SDCC",
        }
    }

    /// Macro defined by the generated header once the compiler is detected.
    pub fn marker_macro(self) -> &'static str {
        match self {
            Dialect::Cosmic => "_COSMIC_",
            Dialect::Raisonance => "_RAISONANCE_",
            Dialect::Iar => "_IAR_",
            Dialect::Sdcc => "_SDCC_",
        }
    }

    pub fn from_compiler_macro(name: &str) -> RegisterResult<Self> {
        [Dialect::Cosmic, Dialect::Raisonance, Dialect::Iar, Dialect::Sdcc]
            .into_iter()
            .find(|d| d.compiler_macro() == name)
            .ok_or_else(|| RegisterError::UnsupportedDialect(name.to_string()))
    }

    /// Integer type used for bit-field members.
    pub fn bitfield_storage_type(self) -> &'static str {
        match self {
            Dialect::Iar => "unsigned char",
            _ => "unsigned int",
        }
    }

    pub fn intrinsics_include(self) -> Option<&'static str> {
        match self {
            Dialect::Raisonance => Some("<intrins.h>"),
            Dialect::Iar => Some("<intrinsics.h>"),
            Dialect::Cosmic | Dialect::Sdcc => None,
        }
    }

    /// Whether the toolchain ships `<stdint.h>`; the others get typedefs.
    pub fn has_stdint(self) -> bool {
        self == Dialect::Sdcc
    }

    /// Vector number as the compiler expects it for hardware IRQ `irq`.
    pub fn vector_number(self, irq: u8) -> u8 {
        match self {
            Dialect::Iar => irq + IAR_VECTOR_OFFSET,
            _ => irq,
        }
    }
}

/// Compiler specific operations a header abstracts over.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Primitive<'a> {
    InterruptHandler { name: &'a str, irq: u8 },
    TrapHandler { name: &'a str },
    NoOperation,
    DisableInterrupts,
    EnableInterrupts,
    TriggerTrap,
    WaitForInterrupt,
    EnterHalt,
    SoftwareReset(ResetWatchdog),
}

/// Watchdog a software reset is forced through.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResetWatchdog {
    /// Clearing `T6` in `WWDG_CR` resets at once.
    Window,
    /// Starting the IWDG resets once its reload value runs out.
    Independent,
}

impl ResetWatchdog {
    /// The window watchdog where the device has one, the IWDG otherwise.
    pub fn for_table(table: &ResolvedSymbolTable) -> Self {
        if table.peripheral("WWDG").is_some() {
            ResetWatchdog::Window
        } else {
            ResetWatchdog::Independent
        }
    }
}

fn instruction(dialect: Dialect, mnemonic: &str) -> String {
    match dialect {
        Dialect::Cosmic => format!("_asm(\"{mnemonic}\")"),
        Dialect::Raisonance => format!("_{mnemonic}_()"),
        Dialect::Iar => match mnemonic {
            "nop" => "__no_operation()".into(),
            "sim" => "__disable_interrupt()".into(),
            "rim" => "__enable_interrupt()".into(),
            "wfi" => "__wait_for_interrupt()".into(),
            other => format!("__{other}()"),
        },
        Dialect::Sdcc => format!("__asm__(\"{mnemonic}\")"),
    }
}

/// Concrete code for `primitive` in `dialect`.
pub fn emit(primitive: Primitive<'_>, dialect: Dialect) -> String {
    match primitive {
        Primitive::InterruptHandler { name, irq } => match dialect {
            Dialect::Cosmic => format!("@far @interrupt void {name}(void)"),
            Dialect::Raisonance => format!("void {name}(void) interrupt {irq}"),
            Dialect::Iar => format!(
                "#pragma vector = {}\n__interrupt void {name}(void)",
                dialect.vector_number(irq)
            ),
            Dialect::Sdcc => format!("void {name}(void) __interrupt({irq})"),
        },
        Primitive::TrapHandler { name } => match dialect {
            Dialect::Cosmic => format!("void @far @interrupt {name}(void)"),
            Dialect::Raisonance => format!("void {name}(void) trap"),
            Dialect::Iar => format!("#pragma vector = 1\n__interrupt void {name}(void)"),
            Dialect::Sdcc => format!("void {name}() __trap"),
        },
        Primitive::NoOperation => instruction(dialect, "nop"),
        Primitive::DisableInterrupts => instruction(dialect, "sim"),
        Primitive::EnableInterrupts => instruction(dialect, "rim"),
        Primitive::TriggerTrap => instruction(dialect, "trap"),
        Primitive::WaitForInterrupt => instruction(dialect, "wfi"),
        Primitive::EnterHalt => instruction(dialect, "halt"),
        Primitive::SoftwareReset(ResetWatchdog::Window) => "(_WWDG_CR=0xBF)".into(),
        Primitive::SoftwareReset(ResetWatchdog::Independent) => {
            "(_IWDG_KR=_IWDG_KEY_ENABLE)".into()
        }
    }
}

/// A preprocessor macro wrapping one primitive.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MacroDefinition {
    /// Name including the parameter list, e.g. `NOP()`.
    pub signature: &'static str,
    pub body: String,
    pub doc: &'static str,
}

/// Instruction macros, in the order they appear in a header. The handler
/// macros are emitted separately since their form depends on the dialect.
pub fn instruction_macros(dialect: Dialect, reset: ResetWatchdog) -> Vec<MacroDefinition> {
    let def = |signature, primitive, doc| MacroDefinition {
        signature,
        body: emit(primitive, dialect),
        doc,
    };
    vec![
        def(
            "NOP()",
            Primitive::NoOperation,
            "perform a nop() operation (=minimum delay)",
        ),
        def(
            "DISABLE_INTERRUPTS()",
            Primitive::DisableInterrupts,
            "disable interrupt handling",
        ),
        def(
            "ENABLE_INTERRUPTS()",
            Primitive::EnableInterrupts,
            "enable interrupt handling",
        ),
        def(
            "TRIGGER_TRAP",
            Primitive::TriggerTrap,
            "trigger a trap (=soft interrupt) e.g. for EMC robustness",
        ),
        def(
            "WAIT_FOR_INTERRUPT()",
            Primitive::WaitForInterrupt,
            "stop code execution and wait for interrupt",
        ),
        def("ENTER_HALT()", Primitive::EnterHalt, "put controller to HALT mode"),
        def(
            "SW_RESET()",
            Primitive::SoftwareReset(reset),
            match reset {
                ResetWatchdog::Window => "reset controller via WWDG module",
                ResetWatchdog::Independent => "reset controller via IWDG module",
            },
        ),
    ]
}

/// Bodies of `ISR_HANDLER(func,irq)` and `ISR_HANDLER_TRAP(func)`.
pub fn handler_macros(dialect: Dialect) -> (String, String) {
    match dialect {
        Dialect::Cosmic => (
            "@far @interrupt void func(void)".into(),
            "void @far @interrupt func(void)".into(),
        ),
        Dialect::Raisonance => (
            "void func(void) interrupt irq".into(),
            "void func(void) trap".into(),
        ),
        Dialect::Iar => (
            format!("_IAR_VECTOR(irq + {IAR_VECTOR_OFFSET}) __interrupt void func(void)"),
            "_IAR_VECTOR(1) __interrupt void func(void)".into(),
        ),
        Dialect::Sdcc => (
            "void func(void) __interrupt(irq)".into(),
            "void func() __trap".into(),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_parse() {
        assert_eq!("SDCC".parse::<Dialect>(), Ok(Dialect::Sdcc));
        assert_eq!("iar".parse::<Dialect>(), Ok(Dialect::Iar));
        assert_eq!(
            "gcc".parse::<Dialect>(),
            Err(RegisterError::UnsupportedDialect("gcc".into()))
        );
        assert_eq!(Dialect::from_compiler_macro("__CSMC__"), Ok(Dialect::Cosmic));
        assert!(Dialect::from_compiler_macro("__GNUC__").is_err());
        for dialect in Dialect::iter() {
            assert_eq!(dialect.name().parse::<Dialect>(), Ok(dialect));
        }
    }

    #[test]
    fn test_bitfield_storage_type() {
        assert_eq!(Dialect::Iar.bitfield_storage_type(), "unsigned char");
        assert_eq!(Dialect::Sdcc.bitfield_storage_type(), "unsigned int");
        assert_eq!(Dialect::Cosmic.bitfield_storage_type(), "unsigned int");
    }

    #[test]
    fn test_interrupt_handler() {
        let isr = Primitive::InterruptHandler {
            name: "tim4_isr",
            irq: 23,
        };
        assert_eq!(emit(isr, Dialect::Sdcc), "void tim4_isr(void) __interrupt(23)");
        assert_eq!(emit(isr, Dialect::Raisonance), "void tim4_isr(void) interrupt 23");
        assert_eq!(emit(isr, Dialect::Cosmic), "@far @interrupt void tim4_isr(void)");
        assert_eq!(
            emit(isr, Dialect::Iar),
            "#pragma vector = 25\n__interrupt void tim4_isr(void)"
        );
    }

    #[test]
    fn test_instructions() {
        assert_eq!(emit(Primitive::NoOperation, Dialect::Cosmic), "_asm(\"nop\")");
        assert_eq!(emit(Primitive::NoOperation, Dialect::Raisonance), "_nop_()");
        assert_eq!(emit(Primitive::NoOperation, Dialect::Iar), "__no_operation()");
        assert_eq!(emit(Primitive::EnterHalt, Dialect::Iar), "__halt()");
        assert_eq!(emit(Primitive::TriggerTrap, Dialect::Sdcc), "__asm__(\"trap\")");
        for dialect in Dialect::iter() {
            assert_eq!(
                emit(Primitive::SoftwareReset(ResetWatchdog::Window), dialect),
                "(_WWDG_CR=0xBF)"
            );
            assert_eq!(
                emit(Primitive::SoftwareReset(ResetWatchdog::Independent), dialect),
                "(_IWDG_KR=_IWDG_KEY_ENABLE)"
            );
        }
    }

    #[test]
    fn test_reset_watchdog_follows_device() {
        use crate::device::DeviceDescriptor;
        use crate::resolver::resolve;
        use crate::validate::LayoutRegistry;

        let registry = LayoutRegistry::load().unwrap();
        let watchdog = |part: &str| {
            let table = resolve(&registry, &DeviceDescriptor::lookup(part).unwrap()).unwrap();
            ResetWatchdog::for_table(&table)
        };
        assert_eq!(watchdog("STM8S105C4"), ResetWatchdog::Window);
        assert_eq!(watchdog("STM8L101F3"), ResetWatchdog::Independent);
        assert_eq!(watchdog("STM8TL53G4"), ResetWatchdog::Window);
    }

    #[test]
    fn test_trigger_trap_has_no_parameter_list() {
        let macros = instruction_macros(Dialect::Sdcc, ResetWatchdog::Window);
        assert!(macros.iter().any(|m| m.signature == "TRIGGER_TRAP"));
        assert_eq!(macros.len(), 7);
    }
}
