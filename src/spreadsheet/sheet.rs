use crate::spreadsheet::cell::CellValue;
use crate::spreadsheet::reference::CellRef;
use calamine::{Data, Range};
use std::collections::HashMap;

/// One fully materialized worksheet.
///
/// Cells are stored sparsely; any position without a stored cell reads as
/// `CellValue::Empty`, so out-of-range access never fails.
#[derive(Debug, Default)]
pub struct Sheet {
    /// Sheet name as reported by the workbook
    name: String,
    /// Sparse cell storage keyed by (row, col)
    cells: HashMap<(usize, usize), CellValue>,
    /// Ending row index (0-based, inclusive), None when the sheet is empty
    row_upper_bound: Option<usize>,
    /// Ending column index (0-based, inclusive), None when the sheet is empty
    col_upper_bound: Option<usize>,
}

static EMPTY: CellValue = CellValue::Empty;

impl Sheet {
    /// Materializes a sheet from a backend cell range.
    pub(super) fn from_range(name: &str, range: &Range<Data>) -> Self {
        let mut sheet = Self {
            name: name.to_owned(),
            ..Self::default()
        };
        if let Some((row_offset, col_offset)) = range.start() {
            for (row, col, data) in range.used_cells() {
                let row = row_offset as usize + row;
                let col = col_offset as usize + col;
                sheet.insert(row, col, CellValue::from(data));
            }
        }
        sheet
    }

    /// Builds a sheet from rows of values, anchored at A1. Rows may have
    /// different lengths; missing cells read as empty.
    pub fn from_rows<I, R>(name: &str, rows: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: IntoIterator<Item = CellValue>,
    {
        let mut sheet = Self {
            name: name.to_owned(),
            ..Self::default()
        };
        for (row, values) in rows.into_iter().enumerate() {
            for (col, value) in values.into_iter().enumerate() {
                sheet.insert(row, col, value);
            }
        }
        sheet
    }

    fn insert(&mut self, row: usize, col: usize, value: CellValue) {
        if value.is_blank() {
            return;
        }
        self.row_upper_bound = Some(self.row_upper_bound.map_or(row, |bound| bound.max(row)));
        self.col_upper_bound = Some(self.col_upper_bound.map_or(col, |bound| bound.max(col)));
        self.cells.insert((row, col), value);
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Ending row index (0-based, inclusive), None for an empty sheet.
    pub fn row_upper_bound(&self) -> Option<usize> {
        self.row_upper_bound
    }

    /// Ending column index (0-based, inclusive), None for an empty sheet.
    pub fn col_upper_bound(&self) -> Option<usize> {
        self.col_upper_bound
    }

    /// Reads the value at a position. Missing and out-of-range cells read as
    /// `CellValue::Empty`.
    pub fn value(&self, at: CellRef) -> &CellValue {
        self.cells.get(&(at.row, at.col)).unwrap_or(&EMPTY)
    }

    pub fn is_blank(&self, at: CellRef) -> bool {
        self.value(at).is_blank()
    }
}
