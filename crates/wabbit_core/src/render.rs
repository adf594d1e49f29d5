//! Canonical text of printed values.
//!
//! These functions define, byte for byte, what each runtime print function writes. The runtime library formats
//! through them and so does the interpreter.
//!
//! ## Notes
//! - Floats follow C's `%f`: six fractional digits, and `nan`, `inf`, `-inf` for non-finite values.
//! - `bool` is passed across the ABI as an `i32`; any value `> 0` is `true`.
//! - A codepoint that is not a Unicode scalar value renders as U+FFFD.

/// Text for `print_int`, without the trailing newline.
pub fn int(v: i32) -> String {
    v.to_string()
}

/// Text for `print_float`, without the trailing newline.
///
/// ## Examples
/// ```rust
/// assert_eq!(wabbit_core::render::float(3.5), "3.500000");
/// assert_eq!(wabbit_core::render::float(f64::NEG_INFINITY), "-inf");
/// ```
pub fn float(v: f64) -> String {
    if v.is_nan() {
        // glibc prints the sign of a NaN too
        if v.is_sign_negative() { "-nan".to_string() } else { "nan".to_string() }
    } else if v.is_infinite() {
        if v > 0.0 { "inf".to_string() } else { "-inf".to_string() }
    } else {
        format!("{v:.6}")
    }
}

/// Text for `print_bool`, without the trailing newline.
pub fn bool_abi(v: i32) -> &'static str {
    if v > 0 { "true" } else { "false" }
}

/// Text for `print_bool` given a Wabbit `bool`.
pub fn bool(v: bool) -> &'static str {
    bool_abi(i32::from(v))
}

/// The character `print_char` writes for codepoint `c`.
pub fn char_abi(c: i32) -> char {
    u32::try_from(c)
        .ok()
        .and_then(char::from_u32)
        .unwrap_or(char::REPLACEMENT_CHARACTER)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_float_has_six_fraction_digits() {
        assert_eq!(float(0.0), "0.000000");
        assert_eq!(float(2.5), "2.500000");
        assert_eq!(float(-0.125), "-0.125000");
        assert_eq!(float(1.0 / 3.0), "0.333333");
    }

    #[test]
    fn test_float_non_finite() {
        assert_eq!(float(f64::INFINITY), "inf");
        assert_eq!(float(f64::NAN), "nan");
    }

    #[test]
    fn test_bool_abi_threshold() {
        assert_eq!(bool_abi(1), "true");
        assert_eq!(bool_abi(0), "false");
        assert_eq!(bool_abi(-1), "false");
        assert_eq!(bool(true), "true");
    }

    #[test]
    fn test_char_abi() {
        assert_eq!(char_abi(65), 'A');
        assert_eq!(char_abi(10), '\n');
        assert_eq!(char_abi(-5), char::REPLACEMENT_CHARACTER);
        assert_eq!(char_abi(0xD800), char::REPLACEMENT_CHARACTER);
    }
}
