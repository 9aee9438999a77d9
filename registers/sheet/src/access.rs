// Licensed under the Apache-2.0 license

//! Mapping from spreadsheet access codes to SystemRDL field properties.

use std::fmt;

/// Software access mode (`sw` property).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SwAccess {
    ReadWrite,
    ReadOnly,
    WriteOnly,
}

impl SwAccess {
    pub fn as_rdl(self) -> &'static str {
        match self {
            SwAccess::ReadWrite => "rw",
            SwAccess::ReadOnly => "r",
            SwAccess::WriteOnly => "w",
        }
    }
}

impl fmt::Display for SwAccess {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_rdl())
    }
}

/// Side effect of a software write (`onwrite` property).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OnWrite {
    /// Writing a 1 clears the bit.
    ClearOnWrite,
}

impl OnWrite {
    pub fn as_rdl(self) -> &'static str {
        match self {
            OnWrite::ClearOnWrite => "woclr",
        }
    }
}

impl fmt::Display for OnWrite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_rdl())
    }
}

/// Maps an access code (`rw`, `ro`, `wo`, `w1c`, any case) to its software
/// mode and write side effect.
///
/// Unrecognized codes fall back to read-only with no side effect.
///
/// # Examples
/// ```
/// use mcu_registers_sheet::access::{map_access, OnWrite, SwAccess};
/// assert_eq!(map_access("W1C"), (SwAccess::WriteOnly, Some(OnWrite::ClearOnWrite)));
/// assert_eq!(map_access("bogus"), (SwAccess::ReadOnly, None));
/// ```
pub fn map_access(code: &str) -> (SwAccess, Option<OnWrite>) {
    match code.trim().to_ascii_lowercase().as_str() {
        "rw" => (SwAccess::ReadWrite, None),
        "ro" => (SwAccess::ReadOnly, None),
        "wo" => (SwAccess::WriteOnly, None),
        "w1c" => (SwAccess::WriteOnly, Some(OnWrite::ClearOnWrite)),
        _ => (SwAccess::ReadOnly, None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_codes_any_case() {
        let table = [
            ("rw", SwAccess::ReadWrite, None),
            ("ro", SwAccess::ReadOnly, None),
            ("wo", SwAccess::WriteOnly, None),
            ("w1c", SwAccess::WriteOnly, Some(OnWrite::ClearOnWrite)),
        ];
        for (code, sw, onwrite) in table {
            assert_eq!(map_access(code), (sw, onwrite));
            assert_eq!(map_access(&code.to_uppercase()), (sw, onwrite));
        }
        assert_eq!(map_access("Rw"), (SwAccess::ReadWrite, None));
        assert_eq!(map_access(" wO "), (SwAccess::WriteOnly, None));
    }

    #[test]
    fn test_unknown_codes_fall_back_to_read_only() {
        for code in ["", "r", "w", "rw1c", "read-write", "w1s", "nan"] {
            assert_eq!(map_access(code), (SwAccess::ReadOnly, None), "{code}");
        }
    }

    #[test]
    fn test_rdl_names() {
        assert_eq!(SwAccess::ReadWrite.to_string(), "rw");
        assert_eq!(SwAccess::ReadOnly.to_string(), "r");
        assert_eq!(SwAccess::WriteOnly.to_string(), "w");
        assert_eq!(OnWrite::ClearOnWrite.to_string(), "woclr");
    }
}
