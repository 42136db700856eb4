// Licensed under the Apache-2.0 license

use thiserror::Error;

/// Errors raised while looking up, resolving or accessing register descriptors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegisterError {
    #[error("unknown device part number '{0}'")]
    UnknownDevice(String),

    #[error("unsupported compiler dialect '{0}'")]
    UnsupportedDialect(String),

    #[error("unknown product line '{0}'")]
    UnknownLine(String),

    /// A layout table violates one of the structural rules checked at load time.
    #[error("inconsistent layout for {peripheral}.{register}: {detail}")]
    LayoutInconsistency {
        peripheral: String,
        register: String,
        detail: String,
    },

    #[error("register {peripheral}.{register} does not exist on this device")]
    UnknownRegister { peripheral: String, register: String },

    #[error("field {register}.{field} does not exist")]
    UnknownField { register: String, field: String },

    #[error("value {value:#x} does not fit into {bits}-bit field {field}")]
    FieldValueOutOfRange { field: String, value: u32, bits: u8 },

    #[error("{operation} not permitted on {symbol}")]
    AccessViolation {
        symbol: String,
        operation: &'static str,
    },

    #[error("capture/compare register {register} is configured as {actual}, not {requested}")]
    CcmrModeMismatch {
        register: String,
        actual: &'static str,
        requested: &'static str,
    },

    #[error("baud rate divisor {0} outside the 16..=0xFFFF range")]
    InvalidDivisor(u32),

    #[error("invalid memory override: {0}")]
    InvalidMemoryOverride(String),
}

/// Result type for register descriptor operations
pub type RegisterResult<T> = std::result::Result<T, RegisterError>;
