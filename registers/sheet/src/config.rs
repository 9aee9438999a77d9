// Licensed under the Apache-2.0 license

//! Configuration for reading a register workbook.
//!
//! [`SheetConfig`] names the three sheets that hold blocks, registers, and
//! fields, and supplies the register width used when a row leaves it out.
//!
//! # Example
//!
//! ```
//! use mcu_registers_sheet::config::SheetConfig;
//!
//! let config = SheetConfig::with_defaults()
//!     .fields_sheet("Bitfields")
//!     .default_regwidth(64);
//! assert_eq!(config.blocks_sheet, "Blocks");
//! assert_eq!(config.fields_sheet, "Bitfields");
//! assert_eq!(config.default_regwidth, 64);
//! ```

/// Default output file written by the command-line tool.
pub const DEFAULT_OUTPUT: &str = "generated_registers.rdl";

/// Register width used when a register row has no usable `Width (bits)`.
pub const DEFAULT_REGWIDTH: u32 = 32;

/// Sheet names and defaults used when loading a workbook.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SheetConfig {
    pub blocks_sheet: String,
    pub registers_sheet: String,
    pub fields_sheet: String,
    pub default_regwidth: u32,
}

impl Default for SheetConfig {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl SheetConfig {
    /// `Blocks`, `Registers`, and `Fields` sheets with 32-bit registers.
    pub fn with_defaults() -> Self {
        Self {
            blocks_sheet: "Blocks".to_string(),
            registers_sheet: "Registers".to_string(),
            fields_sheet: "Fields".to_string(),
            default_regwidth: DEFAULT_REGWIDTH,
        }
    }

    pub fn blocks_sheet(mut self, name: &str) -> Self {
        self.blocks_sheet = name.to_string();
        self
    }

    pub fn registers_sheet(mut self, name: &str) -> Self {
        self.registers_sheet = name.to_string();
        self
    }

    pub fn fields_sheet(mut self, name: &str) -> Self {
        self.fields_sheet = name.to_string();
        self
    }

    pub fn default_regwidth(mut self, width: u32) -> Self {
        self.default_regwidth = width;
        self
    }

    /// One-line description of the expected workbook layout, for error hints.
    pub fn layout_hint(&self) -> String {
        format!(
            "the workbook needs sheets '{}' ({}), '{}' ({}) and '{}' ({})",
            self.blocks_sheet,
            crate::schema::BLOCK_COLUMNS.join(", "),
            self.registers_sheet,
            crate::schema::REGISTER_COLUMNS.join(", "),
            self.fields_sheet,
            crate::schema::FIELD_COLUMNS.join(", "),
        )
    }
}
