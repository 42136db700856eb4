// Licensed under the Apache-2.0 license

//! UART/USART baud rate divisor codec.
//!
//! The 16-bit divisor is split across two registers: `BRR1` holds bits
//! [11:4], the upper nibble of `BRR2` bits [15:12] and its lower nibble bits
//! [3:0]. `BRR2` has to be written before `BRR1`, since the write to `BRR1`
//! latches the new divisor.

use crate::access::{RegisterBus, Registers};
use crate::error::{RegisterError, RegisterResult};

/// Smallest divisor accepted by the baud rate generator.
pub const MIN_DIVISOR: u32 = 16;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UartDivisor(u16);

impl UartDivisor {
    pub fn new(divisor: u32) -> RegisterResult<Self> {
        if !(MIN_DIVISOR..=0xFFFF).contains(&divisor) {
            return Err(RegisterError::InvalidDivisor(divisor));
        }
        Ok(Self(divisor as u16))
    }

    /// Divisor for `baud` at peripheral clock `clock_hz`, rounded to nearest.
    pub fn from_baud(clock_hz: u32, baud: u32) -> RegisterResult<Self> {
        if baud == 0 {
            return Err(RegisterError::InvalidDivisor(0));
        }
        let divisor = (u64::from(clock_hz) + u64::from(baud) / 2) / u64::from(baud);
        Self::new(u32::try_from(divisor).unwrap_or(u32::MAX))
    }

    /// Decodes `BRR1`/`BRR2`. Both read 0 out of reset, which is rejected
    /// like any other divisor below [`MIN_DIVISOR`].
    pub fn from_registers(brr1: u8, brr2: u8) -> RegisterResult<Self> {
        let brr1 = u32::from(brr1);
        let brr2 = u32::from(brr2);
        Self::new(((brr2 & 0xF0) << 8) | (brr1 << 4) | (brr2 & 0x0F))
    }

    /// Returns `(BRR1, BRR2)`.
    pub fn to_registers(self) -> (u8, u8) {
        let brr1 = ((self.0 >> 4) & 0xFF) as u8;
        let brr2 = (((self.0 >> 8) & 0xF0) | (self.0 & 0x0F)) as u8;
        (brr1, brr2)
    }

    pub fn value(self) -> u16 {
        self.0
    }

    pub fn baud(self, clock_hz: u32) -> u32 {
        clock_hz / u32::from(self.0)
    }
}

impl<B: RegisterBus> Registers<'_, B> {
    /// Programs the divisor of `uart`, `BRR2` first.
    pub fn write_uart_divisor(&mut self, uart: &str, divisor: UartDivisor) -> RegisterResult<()> {
        let (brr1, brr2) = divisor.to_registers();
        self.write_register(uart, "BRR2", brr2)?;
        self.write_register(uart, "BRR1", brr1)
    }

    pub fn read_uart_divisor(&mut self, uart: &str) -> RegisterResult<UartDivisor> {
        let brr2 = self.read_register(uart, "BRR2")?;
        let brr1 = self.read_register(uart, "BRR1")?;
        UartDivisor::from_registers(brr1, brr2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::access::MemoryBus;
    use crate::device::DeviceDescriptor;
    use crate::resolver::resolve;
    use crate::validate::LayoutRegistry;

    #[test]
    fn test_from_registers() {
        assert_eq!(UartDivisor::from_registers(0x03, 0x41).unwrap().value(), 0x4031);
        assert_eq!(
            UartDivisor::from_registers(0x00, 0x0F),
            Err(RegisterError::InvalidDivisor(15))
        );
    }

    #[test]
    fn test_from_baud() {
        let divisor = UartDivisor::from_baud(16_000_000, 9600).unwrap();
        assert_eq!(divisor.value(), 1667);
        assert_eq!(divisor.to_registers(), (0x68, 0x03));
        assert_eq!(divisor.baud(16_000_000), 9598);
    }

    #[test]
    fn test_out_of_range() {
        assert_eq!(UartDivisor::new(8), Err(RegisterError::InvalidDivisor(8)));
        assert!(UartDivisor::new(0x1_0000).is_err());
        assert!(UartDivisor::from_baud(16_000_000, 0).is_err());
        assert!(UartDivisor::from_baud(16_000_000, 2_000_000).is_err());
    }

    #[test]
    fn test_register_split_is_lossless() {
        for value in [16u32, 0x0683, 0x4031, 0xFFFF, 0xA5C3] {
            let divisor = UartDivisor::new(value).unwrap();
            let (brr1, brr2) = divisor.to_registers();
            assert_eq!(UartDivisor::from_registers(brr1, brr2), Ok(divisor));
        }
    }

    #[test]
    fn test_brr2_written_first() {
        let registry = LayoutRegistry::load().unwrap();
        let table = resolve(&registry, &DeviceDescriptor::lookup("STM8S103F3").unwrap()).unwrap();
        let mut regs = Registers::new(&table, MemoryBus::new());
        let divisor = UartDivisor::from_baud(16_000_000, 9600).unwrap();
        regs.write_uart_divisor("UART1", divisor).unwrap();
        assert_eq!(regs.bus().writes(), &[(0x5233, 0x03), (0x5232, 0x68)]);
        assert_eq!(regs.read_uart_divisor("UART1").unwrap(), divisor);
    }

    #[test]
    fn test_divisor_after_reset() {
        let registry = LayoutRegistry::load().unwrap();
        let table = resolve(&registry, &DeviceDescriptor::lookup("STM8S103F3").unwrap()).unwrap();
        let mut regs = Registers::new(&table, MemoryBus::with_reset_values(&table));
        assert_eq!(
            regs.read_uart_divisor("UART1"),
            Err(RegisterError::InvalidDivisor(0))
        );
    }
}
