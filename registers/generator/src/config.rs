// Licensed under the Apache-2.0 license

//! Configuration for filtering and shaping generated output.
//!
//! [`FilterConfig`] controls which peripherals and registers are emitted.
//! [`HeaderConfig`] selects the optional parts of a C header.

/// Configuration for filtering which peripherals and registers are generated.
///
/// # Example
///
/// ```
/// use stm8_registers_generator::config::FilterConfig;
///
/// // Only the clock controller and the GPIO ports
/// let config = FilterConfig::new()
///     .include_address_range(0x5000, 0x502F)
///     .include_peripheral("CLK");
///
/// // Everything except the debug module
/// let config = FilterConfig::new().exclude_peripheral("DM");
/// ```
#[derive(Clone, Debug, Default)]
pub struct FilterConfig {
    /// Only include registers whose addresses fall within these ranges (inclusive).
    /// If empty, all addresses are included (subject to the other rules).
    pub include_address_ranges: Vec<(u32, u32)>,

    /// Exclude registers whose addresses fall within these ranges (inclusive).
    pub exclude_address_ranges: Vec<(u32, u32)>,

    /// Peripherals always included regardless of address ranges (upper case).
    pub include_peripherals: Vec<String>,

    /// Peripherals never included (upper case).
    pub exclude_peripherals: Vec<String>,
}

impl FilterConfig {
    /// Create a new FilterConfig with no filtering (everything included).
    pub fn new() -> Self {
        Self::default()
    }

    pub fn include_address_range(mut self, start: u32, end: u32) -> Self {
        self.include_address_ranges.push((start, end));
        self
    }

    pub fn exclude_address_range(mut self, start: u32, end: u32) -> Self {
        self.exclude_address_ranges.push((start, end));
        self
    }

    /// Include a peripheral by instance name (case-insensitive). Once any
    /// peripheral or address range is included, everything else is dropped.
    pub fn include_peripheral(mut self, name: &str) -> Self {
        self.include_peripherals.push(name.to_uppercase());
        self
    }

    /// Exclude a peripheral by instance name (case-insensitive).
    pub fn exclude_peripheral(mut self, name: &str) -> Self {
        self.exclude_peripherals.push(name.to_uppercase());
        self
    }

    /// Returns true if this filter has no constraints (everything passes).
    pub fn is_empty(&self) -> bool {
        self.include_address_ranges.is_empty()
            && self.exclude_address_ranges.is_empty()
            && self.include_peripherals.is_empty()
            && self.exclude_peripherals.is_empty()
    }

    /// Whether any symbol of `peripheral` may be emitted at all.
    pub fn should_include_peripheral(&self, peripheral: &str) -> bool {
        let name = peripheral.to_uppercase();
        if self.exclude_peripherals.contains(&name) {
            return false;
        }
        if self.include_peripherals.is_empty() && self.include_address_ranges.is_empty() {
            return true;
        }
        // Included by address range is decided per register.
        self.include_peripherals.contains(&name) || !self.include_address_ranges.is_empty()
    }

    /// Check whether a register of `peripheral` at `address` should be emitted.
    pub fn should_include(&self, address: u32, peripheral: &str) -> bool {
        if !self.should_include_peripheral(peripheral) {
            return false;
        }
        let in_range = |ranges: &[(u32, u32)]| {
            ranges
                .iter()
                .any(|(start, end)| address >= *start && address <= *end)
        };
        if in_range(&self.exclude_address_ranges) {
            return false;
        }
        if self.include_peripherals.is_empty() && self.include_address_ranges.is_empty() {
            return true;
        }
        self.include_peripherals.contains(&peripheral.to_uppercase())
            || in_range(&self.include_address_ranges)
    }
}

/// Optional sections of a generated C header.
#[derive(Clone, Debug)]
pub struct HeaderConfig {
    /// Emit a `union` with a bit-field `struct` per register.
    pub bitfield_structs: bool,
    /// Emit one mask per bit of multi-bit fields, e.g. `_CLK_CPUDIV0`.
    pub per_bit_masks: bool,
    /// Emit the interrupt vector numbers.
    pub vectors: bool,
}

impl Default for HeaderConfig {
    fn default() -> Self {
        Self {
            bitfield_structs: true,
            per_bit_masks: true,
            vectors: true,
        }
    }
}

impl HeaderConfig {
    /// Register addresses, masks and reset values only.
    pub fn minimal() -> Self {
        Self {
            bitfield_structs: false,
            per_bit_masks: false,
            vectors: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_config_empty() {
        let config = FilterConfig::new();
        assert!(config.is_empty());
        assert!(config.should_include(0x50C6, "CLK"));
        assert!(config.should_include(0x7F70, "ITC"));
    }

    #[test]
    fn test_filter_config_include_address_range() {
        let config = FilterConfig::new().include_address_range(0x5000, 0x502F);
        assert!(config.should_include(0x5000, "PORTA"));
        assert!(config.should_include(0x502F, "PORTI"));
        assert!(!config.should_include(0x50C6, "CLK"));
    }

    #[test]
    fn test_filter_config_exclude_address_range() {
        let config = FilterConfig::new().exclude_address_range(0x7F00, 0x7FFF);
        assert!(config.should_include(0x50C6, "CLK"));
        assert!(!config.should_include(0x7F70, "ITC"));
    }

    #[test]
    fn test_filter_config_peripherals() {
        let config = FilterConfig::new()
            .include_peripheral("clk")
            .include_peripheral("TIM4");
        assert!(config.should_include(0x50C6, "CLK"));
        assert!(config.should_include_peripheral("tim4"));
        assert!(!config.should_include(0x5230, "UART1"));
        assert!(!config.should_include_peripheral("UART1"));

        let config = FilterConfig::new().exclude_peripheral("Dm");
        assert!(!config.should_include_peripheral("DM"));
        assert!(config.should_include(0x50C6, "CLK"));
    }

    #[test]
    fn test_filter_config_combined() {
        let config = FilterConfig::new()
            .include_address_range(0x5000, 0x50FF)
            .exclude_peripheral("WWDG");
        // In range, not excluded
        assert!(config.should_include(0x50C6, "CLK"));
        // In range, but excluded by name
        assert!(!config.should_include(0x50D1, "WWDG"));
        // Out of range
        assert!(!config.should_include(0x5230, "UART1"));
    }
}
