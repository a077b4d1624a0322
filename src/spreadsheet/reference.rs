//! Excel-style cell reference arithmetic.
//!
//! Column letters use bijective base-26: `A` = 0, `Z` = 25, `AA` = 26, and so
//! on without an upper bound. `col_to_index` and `index_to_col` round-trip for
//! every column, single-letter or not.
use regex::Regex;
use std::fmt::Display;
use thiserror::Error;

/// Errors related to Excel-style reference parsing and shifting.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ReferenceError {
    #[error("Invalid cell reference '{0}'")]
    FormatError(String),

    #[error("Shift vector must have exactly 4 entries, got {0}")]
    ShiftArityError(usize),

    #[error("Shift vector has more than one non-zero direction")]
    ShiftConflictError,
}

/// Converts column letters to a 0-based column index.
/// Returns `None` for empty or non-alphabetic input.
pub fn col_to_index(letters: &str) -> Option<usize> {
    if letters.is_empty() || !letters.chars().all(|c| c.is_ascii_alphabetic()) {
        return None;
    }
    letters
        .to_ascii_uppercase()
        .chars()
        .map(|letter| letter as usize - 'A' as usize + 1)
        .reduce(|index, digit| index * 26 + digit)
        .map(|column| column - 1)
}

/// Converts a 0-based column index to column letters.
pub fn index_to_col(index: usize) -> String {
    let mut column = index + 1;
    let mut letters = String::new();
    while column > 0 {
        column -= 1;
        let digit = char::from_u32('A' as u32 + (column % 26) as u32).expect("Hardcode letters");
        column /= 26;
        letters.insert(0, digit);
    }
    letters
}

/// Converts a 1-based row number string to a 0-based row index.
/// Returns `None` for empty input, non-digits, or row 0.
pub fn row_to_index(number: &str) -> Option<usize> {
    number
        .parse()
        .ok()
        .filter(|row| *row > 0)
        .map(|row: usize| row - 1)
}

/// Converts 0-based row & column indexes to an Excel-style reference.
pub fn index_to_reference(row: usize, col: usize) -> String {
    format!("{}{}", index_to_col(col), row + 1)
}

/// Parses an Excel-style reference (e.g. "B7", "AA12") into 0-based
/// (row, column) indexes. Multi-letter columns are fully supported.
pub fn reference_to_index(reference: &str) -> Result<(usize, usize), ReferenceError> {
    let pattern = Regex::new(r"^([A-Z]+)(\d+)$").expect("Hardcode regex pattern");
    let normalized = reference.trim().to_ascii_uppercase();
    let captures = pattern
        .captures(normalized.as_str())
        .ok_or_else(|| ReferenceError::FormatError(reference.to_owned()))?;
    let col = captures
        .get(1)
        .map(|matcher| matcher.as_str())
        .and_then(col_to_index);
    let row = captures
        .get(2)
        .map(|matcher| matcher.as_str())
        .and_then(row_to_index);
    row.zip(col)
        .ok_or_else(|| ReferenceError::FormatError(reference.to_owned()))
}

/// A single cell position with 0-based row & column indexes.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct CellRef {
    pub row: usize,
    pub col: usize,
}

impl CellRef {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Parses an Excel-style reference into a cell position.
    pub fn parse(reference: &str) -> Result<Self, ReferenceError> {
        let (row, col) = reference_to_index(reference)?;
        Ok(Self { row, col })
    }

    /// Applies a directional shift. Returns `None` when the shift would move
    /// the position past the top or left edge of the sheet.
    pub fn shifted(&self, shift: Shift) -> Option<CellRef> {
        match shift {
            Shift::Up(magnitude) => self.row.checked_sub(magnitude).map(|row| CellRef::new(row, self.col)),
            Shift::Down(magnitude) => Some(CellRef::new(self.row + magnitude, self.col)),
            Shift::Left(magnitude) => self.col.checked_sub(magnitude).map(|col| CellRef::new(self.row, col)),
            Shift::Right(magnitude) => Some(CellRef::new(self.row, self.col + magnitude)),
        }
    }
}

impl Display for CellRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", index_to_reference(self.row, self.col))
    }
}

/// A directional offset used to locate a related cell, e.g. the description
/// cell next to a floating value. At most one direction is ever active.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Shift {
    Up(usize),
    Down(usize),
    Left(usize),
    Right(usize),
}

impl Shift {
    /// Builds a shift from a `[up, down, left, right]` vector.
    ///
    /// The all-zero vector means "no shift" and yields `None`. A vector with
    /// more than one non-zero entry is rejected instead of being resolved by
    /// priority order.
    pub fn from_vector(values: &[u32]) -> Result<Option<Shift>, ReferenceError> {
        if values.len() != 4 {
            return Err(ReferenceError::ShiftArityError(values.len()));
        }
        let shifts: Vec<Shift> = [Shift::Up, Shift::Down, Shift::Left, Shift::Right]
            .iter()
            .zip(values)
            .filter(|(_, magnitude)| **magnitude > 0)
            .map(|(direction, magnitude)| direction(*magnitude as usize))
            .collect();
        match shifts.as_slice() {
            [] => Ok(None),
            [shift] => Ok(Some(*shift)),
            _ => Err(ReferenceError::ShiftConflictError),
        }
    }
}
