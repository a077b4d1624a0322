//! Static table layout discovery.
//!
//! A static table is found by two blank-run scans: walk columns rightwards on
//! the header row and rows downwards in the first column, stopping once a run
//! of [`BLANK_RUN_LIMIT`] consecutive blank cells is seen. Short gaps inside
//! the table (merged cells, stray empty rows) do not terminate the scan.
use crate::config::BlankHeaderPolicy;
use crate::spreadsheet::reference::{index_to_col, CellRef};
use crate::spreadsheet::sheet::Sheet;
use log::debug;

/// Number of consecutive blank cells that ends a scan.
pub const BLANK_RUN_LIMIT: usize = 3;

/// One column of a static table together with its header cell, if any.
/// Keeping the pairing explicit means a blank header can never shift the
/// headers of the columns after it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TableColumn {
    /// Column index (0-based)
    pub col: usize,
    /// Header cell text, None when the header cell is blank
    pub header: Option<String>,
}

impl TableColumn {
    /// Resolves the record key for this column, or None when the column is
    /// dropped under [`BlankHeaderPolicy::Skip`].
    pub fn key(&self, policy: BlankHeaderPolicy) -> Option<String> {
        match (&self.header, policy) {
            (Some(header), _) => Some(header.to_owned()),
            (None, BlankHeaderPolicy::Letter) => Some(index_to_col(self.col)),
            (None, BlankHeaderPolicy::Skip) => None,
        }
    }
}

/// The discovered shape of a static table.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TableLayout {
    /// Populated columns with their headers, in left-to-right order
    pub columns: Vec<TableColumn>,
    /// Inclusive 0-based data row range, None when no data rows were found
    pub rows: Option<(usize, usize)>,
}

impl TableLayout {
    /// Discovers the layout of the table anchored at column A.
    ///
    /// * `skip_level` - row offset before the column scan row (0 scans row 1).
    /// * `total_high` - number of header rows before the data region; the
    ///   header text is read from the last of them. Clamped to at least 1.
    pub fn scan(sheet: &Sheet, skip_level: usize, total_high: usize) -> Self {
        let total_high = total_high.max(1);
        let columns = scan_columns(sheet, skip_level);
        let rows = scan_rows(sheet, total_high, 0);
        let columns = read_headers(sheet, &columns, total_high - 1);
        Self { columns, rows }
    }
}

/// Walks columns left to right on `header_row`, collecting the indexes of
/// populated columns. The scan stops after [`BLANK_RUN_LIMIT`] consecutive
/// blank cells and is not capped at column Z.
pub fn scan_columns(sheet: &Sheet, header_row: usize) -> Vec<usize> {
    let mut columns = Vec::new();
    let mut blank_run = 0;
    let mut col = 0;
    while blank_run < BLANK_RUN_LIMIT {
        if sheet.is_blank(CellRef::new(header_row, col)) {
            blank_run += 1;
        } else {
            blank_run = 0;
            columns.push(col);
        }
        col += 1;
    }
    debug!(
        "column scan on row {}: {} populated columns, last {:?}",
        header_row + 1,
        columns.len(),
        columns.last().map(|col| index_to_col(*col)),
    );
    columns
}

/// Walks rows downwards from `data_start` checking `first_col`, and returns
/// the inclusive data row range. The scan stops after [`BLANK_RUN_LIMIT`]
/// consecutive blank cells; the range always ends at the last populated row,
/// so trailing blanks are never included. Returns None when there is no data.
pub fn scan_rows(sheet: &Sheet, data_start: usize, first_col: usize) -> Option<(usize, usize)> {
    let mut last_populated = None;
    let mut blank_run = 0;
    let mut row = data_start;
    while blank_run < BLANK_RUN_LIMIT {
        if sheet.is_blank(CellRef::new(row, first_col)) {
            blank_run += 1;
        } else {
            blank_run = 0;
            last_populated = Some(row);
        }
        row += 1;
    }
    debug!(
        "row scan in column {} from row {}: last populated {:?}",
        index_to_col(first_col),
        data_start + 1,
        last_populated.map(|row| row + 1),
    );
    last_populated.map(|end| (data_start, end))
}

/// Reads the header cell of each column on `header_row`. Blank header cells
/// yield an explicit None instead of being silently dropped.
pub fn read_headers(sheet: &Sheet, columns: &[usize], header_row: usize) -> Vec<TableColumn> {
    columns
        .iter()
        .map(|col| TableColumn {
            col: *col,
            header: sheet.value(CellRef::new(header_row, *col)).to_text(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spreadsheet::cell::CellValue;

    fn text(value: &str) -> CellValue {
        CellValue::Text(value.to_owned())
    }

    fn blank() -> CellValue {
        CellValue::Empty
    }

    #[test]
    fn columns_stop_at_blank_run() {
        // A, B, C populated; D, E, F blank; values beyond must not matter.
        let sheet = Sheet::from_rows(
            "Sheet1",
            vec![vec![
                text("Name"),
                text("Age"),
                text("City"),
                blank(),
                blank(),
                blank(),
                text("ignored"),
            ]],
        );
        assert_eq!(scan_columns(&sheet, 0), vec![0, 1, 2]);
    }

    #[test]
    fn columns_tolerate_short_gaps() {
        let sheet = Sheet::from_rows(
            "Sheet1",
            vec![vec![text("a"), blank(), blank(), text("d")]],
        );
        assert_eq!(scan_columns(&sheet, 0), vec![0, 3]);
    }

    #[test]
    fn columns_past_z_are_scanned() {
        let mut row = vec![text("h"); 30];
        row[29] = text("last");
        let sheet = Sheet::from_rows("Sheet1", vec![row]);
        assert_eq!(scan_columns(&sheet, 0).len(), 30);
    }

    #[test]
    fn columns_respect_skip_level() {
        let sheet = Sheet::from_rows(
            "Sheet1",
            vec![
                vec![text("title spanning banner")],
                vec![text("Name"), text("Age")],
            ],
        );
        assert_eq!(scan_columns(&sheet, 1), vec![0, 1]);
    }

    #[test]
    fn rows_cover_exactly_the_populated_run() {
        // Header row plus 5 data rows, then 3+ blank rows.
        let mut rows = vec![vec![text("Name")]];
        for i in 0..5 {
            rows.push(vec![text(&format!("r{i}"))]);
        }
        rows.extend(vec![vec![blank()]; 4]);
        let sheet = Sheet::from_rows("Sheet1", rows);
        assert_eq!(scan_rows(&sheet, 1, 0), Some((1, 5)));
    }

    #[test]
    fn rows_tolerate_short_gaps() {
        let sheet = Sheet::from_rows(
            "Sheet1",
            vec![
                vec![text("Name")],
                vec![text("a")],
                vec![blank()],
                vec![blank()],
                vec![text("d")],
            ],
        );
        assert_eq!(scan_rows(&sheet, 1, 0), Some((1, 4)));
    }

    #[test]
    fn rows_absent_when_no_data() {
        let sheet = Sheet::from_rows("Sheet1", vec![vec![text("Name")]]);
        assert_eq!(scan_rows(&sheet, 1, 0), None);
    }

    #[test]
    fn headers_keep_blank_cells_explicit() {
        let sheet = Sheet::from_rows(
            "Sheet1",
            vec![vec![text("Name"), blank(), text("City")]],
        );
        let columns = read_headers(&sheet, &[0, 1, 2], 0);
        assert_eq!(
            columns,
            vec![
                TableColumn { col: 0, header: Some("Name".to_owned()) },
                TableColumn { col: 1, header: None },
                TableColumn { col: 2, header: Some("City".to_owned()) },
            ]
        );
    }

    #[test]
    fn blank_header_does_not_shift_later_columns() {
        // Columns A, B, C populated with data but B's header cell is blank:
        // C must still be keyed "City", never "Age"'s neighbour by position.
        let sheet = Sheet::from_rows(
            "Sheet1",
            vec![
                vec![text("Name"), blank(), text("City")],
                vec![text("Ann"), text("x"), text("Paris")],
            ],
        );
        let layout = TableLayout::scan(&sheet, 0, 1);
        let keys: Vec<Option<String>> = layout
            .columns
            .iter()
            .map(|column| column.key(BlankHeaderPolicy::Skip))
            .collect();
        assert_eq!(
            keys,
            vec![Some("Name".to_owned()), None, Some("City".to_owned())]
        );
    }

    #[test]
    fn blank_header_letter_fallback() {
        let column = TableColumn { col: 1, header: None };
        assert_eq!(column.key(BlankHeaderPolicy::Letter), Some("B".to_owned()));
    }

    #[test]
    fn scan_with_two_header_rows() {
        // skip_level 1: banner on row 1, headers on row 2, data from row 3.
        let sheet = Sheet::from_rows(
            "Sheet1",
            vec![
                vec![text("Report 2024")],
                vec![text("Name"), text("Age")],
                vec![text("Ann"), CellValue::Int(30)],
            ],
        );
        let layout = TableLayout::scan(&sheet, 1, 2);
        assert_eq!(layout.rows, Some((2, 2)));
        assert_eq!(
            layout.columns,
            vec![
                TableColumn { col: 0, header: Some("Name".to_owned()) },
                TableColumn { col: 1, header: Some("Age".to_owned()) },
            ]
        );
    }
}
