//! Spreadsheet access layer.
//!
//! Wraps the two supported calamine backends behind one capability surface:
//! open a workbook by path, list sheets, and materialize one sheet at a time
//! into a [`Sheet`] for uniform cell access. The backend is chosen once at
//! open time from the file extension and never re-dispatched afterwards.
pub mod cell;
pub mod reference;
pub mod sheet;

use crate::spreadsheet::sheet::Sheet;
use calamine::{open_workbook, Reader, Xls, XlsError, Xlsx, XlsxError};
use std::ffi::OsStr;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use thiserror::Error;

/// Errors raised while opening workbooks and selecting sheets.
#[derive(Error, Debug)]
pub enum SpreadsheetError {
    /// Error in Excel 2007+ format (.xlsx)
    #[error("Invalid xlsx file format: {0}")]
    InvalidXlsxFileFormat(#[from] XlsxError),

    /// Error in legacy Excel format (.xls)
    #[error("Invalid xls file format: {0}")]
    InvalidXlsFileFormat(#[from] XlsError),

    /// File extension matches neither supported backend
    #[error("Unsupported file format for '{name}'")]
    UnsupportedFormat { name: String },

    /// No source file path was supplied
    #[error("Missing source file name")]
    MissingSource,

    /// Requested sheet index does not exist
    #[error("Sheet index {index} out of range")]
    SheetNotFound { index: usize },
}

/// Type alias for buffered file reader
pub type FileReader = BufReader<File>;

/// Wrapper enum over the supported spreadsheet backends.
pub enum Spreadsheet {
    /// Legacy binary Excel format reader (.xls)
    Xls(Xls<FileReader>),
    /// Excel 2007+ format reader (.xlsx)
    Xlsx(Xlsx<FileReader>),
}

impl std::fmt::Debug for Spreadsheet {
    // The calamine readers do not implement Debug, so only the variant
    // name can be shown.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Spreadsheet::Xls(_) => f.write_str("Xls"),
            Spreadsheet::Xlsx(_) => f.write_str("Xlsx"),
        }
    }
}

impl Spreadsheet {
    /// Opens a spreadsheet file, picking the backend from the file extension.
    ///
    /// # Errors
    ///
    /// * [`SpreadsheetError::MissingSource`] when the path is empty.
    /// * [`SpreadsheetError::UnsupportedFormat`] for any extension other than
    ///   `.xls` / `.xlsx`, raised before the file is touched.
    /// * A backend error when the file cannot be opened or parsed.
    pub fn open<P>(path: P) -> Result<Spreadsheet, SpreadsheetError>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        if path.as_os_str().is_empty() {
            return Err(SpreadsheetError::MissingSource);
        }
        match path.extension().and_then(OsStr::to_str) {
            Some(extension) if extension.eq_ignore_ascii_case("xls") => {
                Ok(Self::Xls(open_workbook(path)?))
            }
            Some(extension) if extension.eq_ignore_ascii_case("xlsx") => {
                Ok(Self::Xlsx(open_workbook(path)?))
            }
            _ => Err(SpreadsheetError::UnsupportedFormat {
                name: path.to_string_lossy().to_string(),
            }),
        }
    }

    /// Returns the names of all sheets in the workbook.
    pub fn sheet_names(&self) -> Vec<String> {
        match self {
            Self::Xls(xls) => xls.sheet_names(),
            Self::Xlsx(xlsx) => xlsx.sheet_names(),
        }
    }

    /// Returns the name of the sheet at the given 0-based index.
    pub fn sheet_name_at(&self, index: usize) -> Option<String> {
        self.sheet_names().get(index).map(|name| name.to_owned())
    }

    /// Materializes the sheet at the given 0-based index. Index 0 is the
    /// default selection.
    pub fn open_sheet_at(&mut self, index: usize) -> Result<Sheet, SpreadsheetError> {
        let name = self
            .sheet_name_at(index)
            .ok_or(SpreadsheetError::SheetNotFound { index })?;
        let range = match self {
            Self::Xls(xls) => xls
                .worksheet_range_at(index)
                .ok_or(SpreadsheetError::SheetNotFound { index })??,
            Self::Xlsx(xlsx) => xlsx
                .worksheet_range_at(index)
                .ok_or(SpreadsheetError::SheetNotFound { index })??,
        };
        Ok(Sheet::from_range(name.as_str(), &range))
    }
}
