// Licensed under the Apache-2.0 license

//! Typed records for the Blocks, Registers, and Fields sheets.
//!
//! Rows are coerced once, here, so that the emitter works on plain Rust
//! values. A cell that cannot be coerced is reported as
//! [`SheetError::MalformedCell`] with its sheet, row, and column.

use crate::config::SheetConfig;
use crate::error::{SheetError, SheetResult};
use crate::table::{Cell, Row, Table, Workbook};
use crate::util::parse_uint;

pub const BLOCK_NAME: &str = "Block Name";
pub const BASE_ADDRESS: &str = "Base Address";
pub const SIZE: &str = "Size";
pub const DESCRIPTION: &str = "Description";
pub const REGISTER_NAME: &str = "Register Name";
pub const OFFSET: &str = "Offset";
pub const REG_WIDTH: &str = "Width (bits)";
pub const FIELD_NAME: &str = "Field Name";
pub const LSB: &str = "LSB";
pub const WIDTH: &str = "Width";
pub const ACCESS: &str = "Access";
pub const RESET_VALUE: &str = "Reset Value";

/// Widest field accepted from a sheet.
pub const MAX_FIELD_WIDTH: u32 = 1024;

/// Columns of the Blocks sheet, in their customary order.
pub const BLOCK_COLUMNS: &[&str] = &[BLOCK_NAME, BASE_ADDRESS, SIZE, DESCRIPTION];
pub const REGISTER_COLUMNS: &[&str] = &[BLOCK_NAME, REGISTER_NAME, OFFSET, DESCRIPTION, REG_WIDTH];
pub const FIELD_COLUMNS: &[&str] = &[
    REGISTER_NAME,
    FIELD_NAME,
    LSB,
    WIDTH,
    ACCESS,
    RESET_VALUE,
    DESCRIPTION,
];

/// One row of the Blocks sheet.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Block {
    pub name: String,
    /// Kept as written; the unit is up to the author.
    pub base_address: String,
    pub description: Option<String>,
}

/// One row of the Registers sheet.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Register {
    /// Name of the owning block.
    pub block: String,
    pub name: String,
    pub offset: String,
    pub description: Option<String>,
    pub width: u32,
}

/// One row of the Fields sheet.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Field {
    /// Name of the owning register.
    pub register: String,
    pub name: String,
    pub lsb: u32,
    pub width: u32,
    /// Access code as written (`rw`, `ro`, `wo`, `w1c`, ...).
    pub access: String,
    pub reset: u64,
    pub description: Option<String>,
}

/// The three tables of a register workbook, in sheet order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RegisterSpec {
    pub blocks: Vec<Block>,
    pub registers: Vec<Register>,
    pub fields: Vec<Field>,
}

impl RegisterSpec {
    /// Reads the block, register, and field sheets named by `config`.
    pub fn from_workbook(workbook: &Workbook, config: &SheetConfig) -> SheetResult<Self> {
        let blocks = workbook.require_table(&config.blocks_sheet)?;
        let registers = workbook.require_table(&config.registers_sheet)?;
        let fields = workbook.require_table(&config.fields_sheet)?;
        Ok(Self {
            blocks: read_blocks(blocks)?,
            registers: read_registers(registers, config.default_regwidth)?,
            fields: read_fields(fields)?,
        })
    }
}

fn read_blocks(table: &Table) -> SheetResult<Vec<Block>> {
    let name = table.require_column(BLOCK_NAME)?;
    let base = table.require_column(BASE_ADDRESS)?;
    let desc = table.column(DESCRIPTION);
    table
        .rows()
        .map(|row| {
            Ok(Block {
                name: required_text(&row, name)?,
                base_address: required_text(&row, base)?,
                description: row.get_opt(desc).text(),
            })
        })
        .collect()
}

fn read_registers(table: &Table, default_width: u32) -> SheetResult<Vec<Register>> {
    let block = table.require_column(BLOCK_NAME)?;
    let name = table.require_column(REGISTER_NAME)?;
    let offset = table.require_column(OFFSET)?;
    let desc = table.column(DESCRIPTION);
    let width = table.column(REG_WIDTH);
    table
        .rows()
        .map(|row| {
            Ok(Register {
                block: required_text(&row, block)?,
                name: required_text(&row, name)?,
                offset: required_text(&row, offset)?,
                description: row.get_opt(desc).text(),
                width: cell_uint(row.get_opt(width))
                    .and_then(|w| u32::try_from(w).ok())
                    .unwrap_or(default_width),
            })
        })
        .collect()
}

fn read_fields(table: &Table) -> SheetResult<Vec<Field>> {
    let register = table.require_column(REGISTER_NAME)?;
    let name = table.require_column(FIELD_NAME)?;
    let lsb = table.require_column(LSB)?;
    let width = table.require_column(WIDTH)?;
    let access = table.require_column(ACCESS)?;
    let reset = table.column(RESET_VALUE);
    let desc = table.column(DESCRIPTION);
    table
        .rows()
        .map(|row| {
            let field_width = required_u32(&row, width)?;
            if field_width == 0 {
                return Err(malformed(&row, width, "a width of at least 1"));
            }
            if field_width > MAX_FIELD_WIDTH {
                return Err(malformed(&row, width, "a width of at most 1024 bits"));
            }
            let field_lsb = required_u32(&row, lsb)?;
            if field_lsb.checked_add(field_width - 1).is_none() {
                return Err(malformed(&row, lsb, "a bit range that fits in 32 bits"));
            }
            let reset = match reset {
                Some(col) if !row.get(col).is_blank() => required_uint(&row, col)?,
                _ => 0,
            };
            Ok(Field {
                register: required_text(&row, register)?,
                name: required_text(&row, name)?,
                lsb: field_lsb,
                width: field_width,
                access: row.get(access).text().unwrap_or_default(),
                reset,
                description: row.get_opt(desc).text(),
            })
        })
        .collect()
}

/// Interprets a cell as a non-negative integer.
fn cell_uint(cell: &Cell) -> Option<u64> {
    match cell {
        Cell::Int(v) => u64::try_from(*v).ok(),
        Cell::Float(v) if v.fract() == 0.0 && *v >= 0.0 && *v <= u64::MAX as f64 => {
            Some(*v as u64)
        }
        Cell::Text(s) => parse_uint(s),
        _ => None,
    }
}

fn malformed(row: &Row<'_>, column: usize, expected: &'static str) -> SheetError {
    let table = row.table();
    SheetError::MalformedCell {
        sheet: table.name().to_string(),
        row: row.number(),
        column: table.columns()[column].clone(),
        value: row.get(column).to_string(),
        expected,
    }
}

fn required_text(row: &Row<'_>, column: usize) -> SheetResult<String> {
    row.get(column)
        .text()
        .ok_or_else(|| malformed(row, column, "a value"))
}

fn required_uint(row: &Row<'_>, column: usize) -> SheetResult<u64> {
    cell_uint(row.get(column)).ok_or_else(|| malformed(row, column, "a non-negative integer"))
}

fn required_u32(row: &Row<'_>, column: usize) -> SheetResult<u32> {
    required_uint(row, column)
        .and_then(|v| u32::try_from(v).map_err(|_| malformed(row, column, "a 32-bit integer")))
}
