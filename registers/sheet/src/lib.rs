// Licensed under the Apache-2.0 license

//! Spreadsheet to SystemRDL register map converter.
//!
//! Hardware and firmware teams describe register maps in a workbook with
//! three sheets: `Blocks`, `Registers`, and `Fields`. This crate reads that
//! workbook and writes one SystemRDL `addrmap` per block.
//!
//! ## Usage
//!
//! ```no_run
//! use std::path::Path;
//! use mcu_registers_sheet::{generate_rdl_file, LogObserver, RegisterSpec, SheetConfig, Workbook};
//!
//! let workbook = Workbook::open(Path::new("register_spec.xlsx")).unwrap();
//! let spec = RegisterSpec::from_workbook(&workbook, &SheetConfig::with_defaults()).unwrap();
//! generate_rdl_file(&spec, Path::new("generated_registers.rdl"), &mut LogObserver).unwrap();
//! ```
//!
//! ## Module Organization
//!
//! - [`table`]: Dynamically typed cells and tables, and workbook loading
//! - [`schema`]: Typed block, register, and field records
//! - [`config`]: Sheet names and defaults ([`SheetConfig`])
//! - [`index`]: Owner-name to child-row grouping
//! - [`access`]: Access code mapping
//! - [`util`]: Name sanitizing and bit-range/reset formatting
//! - [`emit`]: SystemRDL writer and progress observers

pub mod access;
pub mod config;
pub mod emit;
pub mod error;
pub mod index;
pub mod schema;
pub mod table;
pub mod util;

pub use config::SheetConfig;
pub use emit::{
    emit_rdl, generate_rdl, generate_rdl_file, EmitObserver, EmitStats, FieldLayout, LogObserver,
    NullObserver,
};
pub use error::{ErrorKind, SheetError, SheetResult};
pub use schema::{Block, Field, Register, RegisterSpec};
pub use table::{Cell, Table, Workbook};
