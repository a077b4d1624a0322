//! # tablepeek
//!
//! Extracts tabular data from Excel spreadsheets (`.xls`, `.xlsx`) into an
//! ordered sequence of key-value records, optionally guided by a side-car
//! YAML file describing the table layout.
//!
//! ## Features
//!
//! - **Static tables**: a conventional grid with a header row and contiguous
//!   data rows. Column and row extents are discovered automatically by
//!   scanning for runs of blank cells, so no explicit range is needed.
//! - **Floating tables**: individually labelled cells scattered across a
//!   sheet, each with an optional description cell reached by a fixed offset.
//! - **Uniform cell access**: both backends materialize into the same sheet
//!   representation; blank and out-of-range cells read as empty values, never
//!   as errors.
//! - **Full column range**: Excel-style references with multi-letter columns
//!   (`AA`, `AB`, ...) parse and format with a round-trip guarantee.
//!
//! ## Example
//!
//! ```no_run
//! use tablepeek::TableBook;
//!
//! # fn main() -> Result<(), tablepeek::TablePeekError> {
//! let book = TableBook::load("report.xlsx")?;
//! for record in book.records() {
//!     println!("{}", serde_json::to_string(&record).unwrap());
//! }
//! # Ok(())
//! # }
//! ```
mod book;
mod config;
mod error;
mod layout;
mod spreadsheet;

pub use book::{Record, TableBook};
pub use config::{
    BlankHeaderPolicy, BookConfig, ConfigError, FloatingConfig, HeaderConfig, PickEntry,
    StaticConfig, TableMode,
};
pub use error::TablePeekError;
pub use layout::{scan_columns, scan_rows, TableColumn, TableLayout, BLANK_RUN_LIMIT};
pub use spreadsheet::cell::CellValue;
pub use spreadsheet::reference::{
    col_to_index, index_to_col, index_to_reference, reference_to_index, CellRef, ReferenceError,
    Shift,
};
pub use spreadsheet::sheet::Sheet;
pub use spreadsheet::{Spreadsheet, SpreadsheetError};
