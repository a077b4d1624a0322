use thiserror::Error;

/// Main error type for the tablepeek crate.
/// Aggregates errors from the spreadsheet, configuration, and reference
/// modules.
#[derive(Error, Debug)]
pub enum TablePeekError {
    #[error("{0}")]
    IoError(#[from] std::io::Error),

    #[error("{0}")]
    SpreadsheetError(#[from] crate::spreadsheet::SpreadsheetError),

    #[error("{0}")]
    ConfigError(#[from] crate::config::ConfigError),

    #[error("{0}")]
    ReferenceError(#[from] crate::spreadsheet::reference::ReferenceError),
}
