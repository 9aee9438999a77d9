// Licensed under the Apache-2.0 license

//! Name sanitizing and per-field formatting helpers.

/// Turns a spreadsheet name into a SystemRDL identifier.
///
/// Surrounding whitespace is trimmed; inner whitespace and hyphens become
/// underscores. No other characters are checked.
///
/// # Examples
/// ```
/// use mcu_registers_sheet::util::sanitize_name;
/// assert_eq!(sanitize_name(" Ctrl Reg-0 "), "Ctrl_Reg_0");
/// ```
pub fn sanitize_name(name: &str) -> String {
    name.trim()
        .chars()
        .map(|c| if c.is_whitespace() || c == '-' { '_' } else { c })
        .collect()
}

/// Escapes a string for use inside a SystemRDL string literal.
pub fn escape_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            c => out.push(c),
        }
    }
    out
}

/// Parses a non-negative integer written as decimal, `0x` hex, or `0b` binary.
/// Underscores are allowed as digit separators.
pub fn parse_uint(s: &str) -> Option<u64> {
    let s = s.trim().replace('_', "");
    let lower = s.to_ascii_lowercase();
    if let Some(hex) = lower.strip_prefix("0x") {
        u64::from_str_radix(hex, 16).ok()
    } else if let Some(bin) = lower.strip_prefix("0b") {
        u64::from_str_radix(bin, 2).ok()
    } else {
        lower.parse().ok()
    }
}

/// Most significant bit of a field: `lsb + width - 1`.
///
/// `width` must be at least 1; rows with a zero width are rejected on load.
pub fn msb(lsb: u32, width: u32) -> u32 {
    lsb + width - 1
}

/// Renders a reset value as binary digits zero-padded to `width`.
///
/// Values that need more than `width` bits are not truncated.
///
/// # Examples
/// ```
/// use mcu_registers_sheet::util::reset_binary;
/// assert_eq!(reset_binary(5, 3), "101");
/// assert_eq!(reset_binary(1, 4), "0001");
/// assert_eq!(reset_binary(9, 2), "1001");
/// ```
pub fn reset_binary(value: u64, width: u32) -> String {
    format!("{value:0width$b}", width = width as usize)
}

/// The SystemRDL reset literal, e.g. `3'b101`.
pub fn reset_literal(value: u64, width: u32) -> String {
    format!("{width}'b{}", reset_binary(value, width))
}
