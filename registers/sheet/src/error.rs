// Licensed under the Apache-2.0 license

//! Errors produced while loading a register workbook or emitting SystemRDL.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when converting a register workbook.
#[derive(Error, Debug)]
pub enum SheetError {
    /// The workbook path does not resolve to a file.
    #[error("could not find workbook {}", .0.display())]
    FileNotFound(PathBuf),

    /// A required sheet is not present in the workbook.
    #[error("missing sheet '{sheet}'")]
    MissingSheet { sheet: String },

    /// A required column is not present in a sheet's header row.
    #[error("missing column '{column}' in sheet '{sheet}'")]
    MissingColumn { sheet: String, column: String },

    /// A cell could not be coerced to the type its column requires.
    #[error("sheet '{sheet}' row {row} column '{column}': expected {expected}, found '{value}'")]
    MalformedCell {
        sheet: String,
        row: usize,
        column: String,
        value: String,
        expected: &'static str,
    },

    /// The spreadsheet reader rejected the workbook.
    #[error("failed to read workbook: {0}")]
    Workbook(#[from] calamine::Error),

    /// Writing the generated output failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Coarse classification used when reporting a failure to the user.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    /// A sheet or column is absent, or a cell in it is malformed.
    MissingStructure,
    Other,
}

impl SheetError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            SheetError::FileNotFound(_) => ErrorKind::NotFound,
            SheetError::MissingSheet { .. }
            | SheetError::MissingColumn { .. }
            | SheetError::MalformedCell { .. } => ErrorKind::MissingStructure,
            SheetError::Workbook(_) | SheetError::Io(_) => ErrorKind::Other,
        }
    }

    /// The sheet or column name a structural error refers to.
    pub fn missing_key(&self) -> Option<&str> {
        match self {
            SheetError::MissingSheet { sheet } => Some(sheet.as_str()),
            SheetError::MissingColumn { column, .. } | SheetError::MalformedCell { column, .. } => {
                Some(column.as_str())
            }
            _ => None,
        }
    }
}

/// Result type for workbook conversion.
pub type SheetResult<T> = std::result::Result<T, SheetError>;
