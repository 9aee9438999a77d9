// Licensed under the Apache-2.0 license

//! Dynamically typed tables read from a spreadsheet workbook.
//!
//! A [`Workbook`] is an ordered collection of named [`Table`]s. Each table
//! has a header row of trimmed column labels followed by rows of [`Cell`]s.
//! Nothing here knows about blocks, registers, or fields; typed records are
//! built on top of these tables in [`crate::schema`].

use crate::error::{SheetError, SheetResult};
use calamine::{open_workbook_auto, Data, Reader};
use std::fmt;
use std::path::Path;

/// A single spreadsheet cell.
#[derive(Clone, Debug, PartialEq)]
pub enum Cell {
    Empty,
    Int(i64),
    Float(f64),
    Bool(bool),
    Text(String),
}

impl Cell {
    /// Returns true for empty cells and cells holding only whitespace.
    pub fn is_blank(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    /// The trimmed text form of the cell, or `None` if it is blank.
    pub fn text(&self) -> Option<String> {
        if self.is_blank() {
            None
        } else {
            Some(self.to_string().trim().to_string())
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Empty => Ok(()),
            Cell::Int(v) => write!(f, "{v}"),
            // Spreadsheets store most numbers as floats; show whole values as integers.
            Cell::Float(v) if v.fract() == 0.0 && v.abs() < 1e15 => write!(f, "{}", *v as i64),
            Cell::Float(v) => write!(f, "{v}"),
            Cell::Bool(v) => write!(f, "{}", if *v { "TRUE" } else { "FALSE" }),
            Cell::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self {
        Cell::Text(s.to_string())
    }
}

impl From<String> for Cell {
    fn from(s: String) -> Self {
        Cell::Text(s)
    }
}

impl From<i64> for Cell {
    fn from(v: i64) -> Self {
        Cell::Int(v)
    }
}

impl From<f64> for Cell {
    fn from(v: f64) -> Self {
        Cell::Float(v)
    }
}

impl From<&Data> for Cell {
    fn from(data: &Data) -> Self {
        match data {
            Data::Empty => Cell::Empty,
            Data::Int(v) => Cell::Int(*v),
            Data::Float(v) => Cell::Float(*v),
            Data::Bool(v) => Cell::Bool(*v),
            Data::String(s) => Cell::Text(s.clone()),
            other => Cell::Text(other.to_string()),
        }
    }
}

/// A named sheet: a header row plus data rows.
#[derive(Clone, Debug, Default)]
pub struct Table {
    name: String,
    columns: Vec<String>,
    rows: Vec<Vec<Cell>>,
}

impl Table {
    /// Creates a table. Column labels are trimmed and blank rows are dropped.
    pub fn new<S: AsRef<str>>(name: &str, columns: &[S], rows: Vec<Vec<Cell>>) -> Self {
        Self {
            name: name.to_string(),
            columns: columns.iter().map(|c| c.as_ref().trim().to_string()).collect(),
            rows: rows
                .into_iter()
                .filter(|row| !row.iter().all(Cell::is_blank))
                .collect(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Index of the column with the given label.
    pub fn column(&self, label: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == label)
    }

    /// Index of a column that must be present.
    pub fn require_column(&self, label: &str) -> SheetResult<usize> {
        self.column(label).ok_or_else(|| SheetError::MissingColumn {
            sheet: self.name.clone(),
            column: label.to_string(),
        })
    }

    /// Iterates over rows in sheet order.
    pub fn rows(&self) -> impl Iterator<Item = Row<'_>> {
        self.rows.iter().enumerate().map(move |(i, cells)| Row {
            table: self,
            // Spreadsheet numbering: the header occupies row 1.
            number: i + 2,
            cells,
        })
    }
}

/// A borrowed view of one table row.
#[derive(Clone, Copy, Debug)]
pub struct Row<'a> {
    table: &'a Table,
    number: usize,
    cells: &'a [Cell],
}

static EMPTY: Cell = Cell::Empty;

impl<'a> Row<'a> {
    /// 1-based spreadsheet row number.
    pub fn number(&self) -> usize {
        self.number
    }

    pub fn table(&self) -> &'a Table {
        self.table
    }

    /// The cell in the given column; short rows read as empty.
    pub fn get(&self, column: usize) -> &'a Cell {
        self.cells.get(column).unwrap_or(&EMPTY)
    }

    /// The cell in an optional column; absent columns read as empty.
    pub fn get_opt(&self, column: Option<usize>) -> &'a Cell {
        column.map_or(&EMPTY, |c| self.get(c))
    }
}

/// An ordered set of named tables.
#[derive(Clone, Debug, Default)]
pub struct Workbook {
    tables: Vec<Table>,
}

impl Workbook {
    pub fn from_tables(tables: Vec<Table>) -> Self {
        Self { tables }
    }

    /// Reads every sheet of a spreadsheet file. The first row of each sheet
    /// is taken as its header.
    pub fn open(path: &Path) -> SheetResult<Self> {
        if !path.is_file() {
            return Err(SheetError::FileNotFound(path.to_path_buf()));
        }
        let mut sheets = open_workbook_auto(path)?;
        let mut tables = vec![];
        for name in sheets.sheet_names() {
            let range = sheets.worksheet_range(&name)?;
            let mut rows = range.rows();
            let header: Vec<String> = rows
                .next()
                .map(|row| row.iter().map(|d| Cell::from(d).to_string()).collect())
                .unwrap_or_default();
            let body = rows
                .map(|row| row.iter().map(Cell::from).collect())
                .collect();
            tables.push(Table::new(&name, &header, body));
        }
        Ok(Self { tables })
    }

    pub fn table(&self, name: &str) -> Option<&Table> {
        self.tables.iter().find(|t| t.name == name)
    }

    pub fn require_table(&self, name: &str) -> SheetResult<&Table> {
        self.table(name).ok_or_else(|| SheetError::MissingSheet {
            sheet: name.to_string(),
        })
    }

    pub fn tables(&self) -> &[Table] {
        &self.tables
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_text() {
        assert_eq!(Cell::Float(4.0).text().as_deref(), Some("4"));
        assert_eq!(Cell::Float(2.5).text().as_deref(), Some("2.5"));
        assert_eq!(Cell::from("  0x10 ").text().as_deref(), Some("0x10"));
        assert_eq!(Cell::from("   ").text(), None);
        assert_eq!(Cell::Empty.text(), None);
        assert_eq!(Cell::Bool(true).text().as_deref(), Some("TRUE"));
    }

    #[test]
    fn test_table_trims_labels_and_skips_blank_rows() {
        let table = Table::new(
            "Blocks",
            &[" Block Name ", "Base Address"],
            vec![
                vec!["UART".into(), "0x1000".into()],
                vec![Cell::Empty, "  ".into()],
                vec!["SPI".into()],
            ],
        );
        assert_eq!(table.columns(), &["Block Name", "Base Address"]);
        assert_eq!(table.len(), 2);
        let rows: Vec<_> = table.rows().collect();
        assert_eq!(rows[0].number(), 2);
        assert_eq!(rows[1].get(0), &Cell::from("SPI"));
        assert_eq!(rows[1].get(1), &Cell::Empty);
        assert_eq!(rows[1].get_opt(None), &Cell::Empty);
    }

    #[test]
    fn test_missing_lookups() {
        let wb = Workbook::from_tables(vec![Table::new::<&str>("Blocks", &[], vec![])]);
        assert!(wb.require_table("Blocks").is_ok());
        let err = wb.require_table("Fields").unwrap_err();
        assert_eq!(err.missing_key(), Some("Fields"));
        let err = wb.tables()[0].require_column("Block Name").unwrap_err();
        assert_eq!(err.to_string(), "missing column 'Block Name' in sheet 'Blocks'");
    }

    #[test]
    fn test_open_missing_file() {
        let err = Workbook::open(Path::new("does/not/exist.xlsx")).unwrap_err();
        assert!(matches!(err, SheetError::FileNotFound(_)));
    }
}
