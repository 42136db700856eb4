// Licensed under the Apache-2.0 license

//! Utility functions for name conversion and formatting.
//!
//! This module provides functions for converting register names between
//! naming conventions (snake_case, CamelCase) and formatting values for
//! Rust and C code generation.

/// Converts a name to snake_case.
///
/// # Examples
/// ```
/// use stm8_registers_generator::util::snake_case;
/// assert_eq!(snake_case("CKDIVR"), "ckdivr");
/// assert_eq!(snake_case("DIV_0_3"), "div_0_3");
/// ```
pub fn snake_case(name: &str) -> String {
    let mut result = String::new();
    if let Some(c) = name.chars().next() {
        if c.is_ascii_digit() {
            result.push('_');
        }
    }
    let mut prev = None;
    for c in name.chars() {
        if c.is_ascii_whitespace() || c.is_ascii_punctuation() {
            if prev != Some('_') {
                result.push('_');
            }
            prev = Some('_');
            continue;
        }
        if let Some(prev) = prev {
            if prev.is_ascii_lowercase() && c.is_ascii_uppercase() {
                result.push('_');
            }
        }
        prev = Some(c);
        result.push(c.to_ascii_lowercase());
    }
    tweak_keywords(result.trim_end_matches('_')).to_string()
}

/// Converts a name to CamelCase.
///
/// # Examples
/// ```
/// use stm8_registers_generator::util::camel_case;
/// assert_eq!(camel_case("CKDIVR"), "Ckdivr");
/// assert_eq!(camel_case("DIV_12_15"), "Div12_15");
/// ```
pub fn camel_case(name: &str) -> String {
    let mut result = String::new();
    if let Some(c) = name.chars().next() {
        if c.is_ascii_digit() {
            result.push('_');
        }
    }
    let mut upper_next = true;
    let mut prev_digit = false;
    for c in name.chars() {
        if c.is_ascii_punctuation() || c.is_ascii_whitespace() {
            upper_next = true;
            continue;
        }
        // Keep digit groups apart, `DIV_12_15` must not become `Div1215`.
        if upper_next && prev_digit && c.is_ascii_digit() {
            result.push('_');
        }
        result.push(if upper_next {
            c.to_ascii_uppercase()
        } else {
            c.to_ascii_lowercase()
        });
        prev_digit = c.is_ascii_digit();
        upper_next = false;
    }
    String::from(tweak_keywords(&result))
}

/// Appends underscore suffix to Rust keywords to avoid conflicts.
fn tweak_keywords(s: &str) -> &str {
    match s {
        "as" => "as_",
        "break" => "break_",
        "const" => "const_",
        "crate" => "crate_",
        "else" => "else_",
        "fn" => "fn_",
        "for" => "for_",
        "if" => "if_",
        "impl" => "impl_",
        "in" => "in_",
        "loop" => "loop_",
        "match" => "match_",
        "mod" => "mod_",
        "ref" => "ref_",
        "self" => "self_",
        "Self" => "Self_",
        "static" => "static_",
        "struct" => "struct_",
        "super" => "super_",
        "type" => "type_",
        "use" => "use_",
        "where" => "where_",
        "while" => "while_",
        s => s,
    }
}

/// Formats an integer as a Rust hex constant with underscores for readability.
///
/// Values <= 9 are formatted as decimal; larger values use hex with
/// underscore separators every 4 digits.
///
/// # Examples
/// ```
/// use stm8_registers_generator::util::hex_const;
/// assert_eq!(hex_const(5), "5");
/// assert_eq!(hex_const(0x50c6), "0x50c6");
/// assert_eq!(hex_const(0x17fff), "0x1_7fff");
/// ```
pub fn hex_const(val: u64) -> String {
    if val > 9 {
        let mut x = String::new();
        for (i, c) in format!("{val:x}").chars().rev().enumerate() {
            if i % 4 == 0 && i != 0 {
                x.push('_');
            }
            x.push(c);
        }
        "0x".to_string() + &x.chars().rev().collect::<String>()
    } else {
        format!("{val}")
    }
}

/// Formats a value as an upper-case C hex literal padded to `digits`.
pub fn c_hex(val: u32, digits: usize) -> String {
    format!("0x{val:0digits$X}")
}

/// C expression for a field mask, e.g. `((uint8_t) (0x07 << 3))`.
pub fn c_mask(width: u8, offset: u8) -> String {
    let ones = (1u32 << width) - 1;
    format!("((uint8_t) ({} << {offset}))", c_hex(ones, 2))
}

/// Bit range as written in data sheets: `[4:3]`, or `[3]` for single bits.
pub fn bit_range(width: u8, offset: u8) -> String {
    if width == 1 {
        format!("[{offset}]")
    } else {
        format!("[{}:{offset}]", offset + width - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snake_case() {
        assert_eq!(snake_case("CCMR1"), "ccmr1");
        assert_eq!(snake_case("PCKENR2"), "pckenr2");
        assert_eq!(snake_case("type"), "type_");
        assert_eq!(snake_case("MyRegister"), "my_register");
    }

    #[test]
    fn test_camel_case() {
        assert_eq!(camel_case("CCMR1"), "Ccmr1");
        assert_eq!(camel_case("OC1M"), "Oc1m");
        assert_eq!(camel_case("DIV_0_3"), "Div0_3");
        assert_eq!(camel_case("PORTA_ODR"), "PortaOdr");
    }

    #[test]
    fn test_hex_const() {
        assert_eq!(hex_const(0), "0");
        assert_eq!(hex_const(9), "9");
        assert_eq!(hex_const(10), "0xa");
        assert_eq!(hex_const(0x50c6), "0x50c6");
        assert_eq!(hex_const(0x12345678), "0x1234_5678");
    }

    #[test]
    fn test_c_helpers() {
        assert_eq!(c_hex(0x50c0, 4), "0x50C0");
        assert_eq!(c_mask(3, 0), "((uint8_t) (0x07 << 0))");
        assert_eq!(c_mask(1, 7), "((uint8_t) (0x01 << 7))");
        assert_eq!(bit_range(3, 0), "[2:0]");
        assert_eq!(bit_range(1, 5), "[5]");
    }
}
