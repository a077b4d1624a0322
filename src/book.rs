//! Table extraction.
//!
//! [`TableBook`] ties everything together: it opens the workbook, resolves the
//! side-car configuration, fixes the extraction mode, and turns the selected
//! sheet into records. The mode is decided once at load time: a `static` key
//! in the configuration (or no configuration at all) selects static-grid
//! extraction, a `floating` key selects floating-cell extraction.
use crate::config::{BlankHeaderPolicy, BookConfig, ConfigError, PickEntry, TableMode};
use crate::error::TablePeekError;
use crate::layout::TableLayout;
use crate::spreadsheet::cell::CellValue;
use crate::spreadsheet::reference::{CellRef, Shift};
use crate::spreadsheet::sheet::Sheet;
use crate::spreadsheet::Spreadsheet;
use indexmap::IndexMap;
use log::debug;
use std::path::Path;

/// One output row: ordered mapping from header/key to cell value.
pub type Record = IndexMap<String, CellValue>;

/// The resolved extraction plan for one sheet.
#[derive(Debug, Default)]
pub(crate) struct TablePlan {
    mode: TableMode,
    /// Static mode: discovered table shape
    layout: Option<TableLayout>,
    blank_headers: BlankHeaderPolicy,
    /// Floating mode: validated pick entries in declaration order
    picks: Vec<PickEntry>,
    desc_shift: Option<Shift>,
}

impl TablePlan {
    /// Builds the plan for a sheet: scans the layout in static mode, resolves
    /// and validates the pick entries in floating mode.
    pub(crate) fn build(sheet: &Sheet, config: &BookConfig) -> Result<Self, ConfigError> {
        if config.mode() == TableMode::Floating {
            if let Some(floating) = config.floating.as_ref() {
                let picks = floating.entries()?;
                debug!("floating plan with {} entries", picks.len());
                return Ok(Self {
                    mode: TableMode::Floating,
                    picks,
                    desc_shift: floating.desc_shift,
                    ..Self::default()
                });
            }
        }
        let headers = config.header_config();
        let layout = TableLayout::scan(sheet, headers.skip_level, headers.total_high);
        debug!(
            "static plan with {} columns, rows {:?}",
            layout.columns.len(),
            layout.rows,
        );
        Ok(Self {
            mode: TableMode::Static,
            layout: Some(layout),
            blank_headers: headers.blank_headers,
            ..Self::default()
        })
    }

    pub(crate) fn mode(&self) -> TableMode {
        self.mode
    }

    pub(crate) fn layout(&self) -> Option<&TableLayout> {
        self.layout.as_ref()
    }

    /// Produces the record sequence for a sheet. A sheet with no data yields
    /// an empty sequence rather than an error.
    pub(crate) fn records(&self, sheet: &Sheet) -> Vec<Record> {
        match self.mode {
            TableMode::Static => self.static_records(sheet),
            TableMode::Floating => self.floating_records(sheet),
        }
    }

    fn static_records(&self, sheet: &Sheet) -> Vec<Record> {
        let Some(layout) = self.layout.as_ref() else {
            return Vec::new();
        };
        let Some((row_start, row_end)) = layout.rows else {
            return Vec::new();
        };
        let fields: Vec<(usize, String)> = layout
            .columns
            .iter()
            .filter_map(|column| column.key(self.blank_headers).map(|key| (column.col, key)))
            .collect();
        (row_start..=row_end)
            .map(|row| {
                fields
                    .iter()
                    .map(|(col, key)| {
                        (key.to_owned(), sheet.value(CellRef::new(row, *col)).to_owned())
                    })
                    .collect()
            })
            .collect()
    }

    fn floating_records(&self, sheet: &Sheet) -> Vec<Record> {
        self.picks
            .iter()
            .map(|entry| {
                let mut record = Record::new();
                record.insert("key".to_owned(), CellValue::Text(entry.key.to_owned()));
                record.insert("value".to_owned(), sheet.value(entry.cell).to_owned());
                if let Some(shift) = self.desc_shift {
                    // A shift off the sheet edge reads as an empty description.
                    let desc = entry
                        .cell
                        .shifted(shift)
                        .map(|cell| sheet.value(cell).to_owned())
                        .unwrap_or_default();
                    record.insert("desc".to_owned(), desc);
                }
                record
            })
            .collect()
    }
}

/// A loaded workbook with its extraction plan.
pub struct TableBook {
    spreadsheet: Spreadsheet,
    config: BookConfig,
    sheet: Sheet,
    plan: TablePlan,
}

impl TableBook {
    /// Opens a workbook and discovers its side-car configuration (same base
    /// name, `.yml`/`.yaml` extension). The first sheet is selected.
    pub fn load<P>(source: P) -> Result<Self, TablePeekError>
    where
        P: AsRef<Path>,
    {
        let spreadsheet = Spreadsheet::open(source.as_ref())?;
        let config = BookConfig::discover(source.as_ref())?.unwrap_or_default();
        Self::assemble(spreadsheet, config)
    }

    /// Opens a workbook with an explicit configuration, bypassing discovery.
    pub fn load_with<P>(source: P, config: BookConfig) -> Result<Self, TablePeekError>
    where
        P: AsRef<Path>,
    {
        let spreadsheet = Spreadsheet::open(source.as_ref())?;
        Self::assemble(spreadsheet, config)
    }

    fn assemble(mut spreadsheet: Spreadsheet, config: BookConfig) -> Result<Self, TablePeekError> {
        let sheet = spreadsheet.open_sheet_at(0)?;
        let plan = TablePlan::build(&sheet, &config)?;
        Ok(Self {
            spreadsheet,
            config,
            sheet,
            plan,
        })
    }

    /// Names of all sheets in the workbook.
    pub fn sheet_names(&self) -> Vec<String> {
        self.spreadsheet.sheet_names()
    }

    /// Name of the currently selected sheet.
    pub fn sheet_name(&self) -> &str {
        self.sheet.name()
    }

    /// Switches to another sheet by 0-based index and re-runs layout
    /// discovery on it.
    pub fn select_sheet(&mut self, index: usize) -> Result<(), TablePeekError> {
        self.sheet = self.spreadsheet.open_sheet_at(index)?;
        self.plan = TablePlan::build(&self.sheet, &self.config)?;
        Ok(())
    }

    pub fn mode(&self) -> TableMode {
        self.plan.mode()
    }

    /// The discovered static table layout, None in floating mode.
    pub fn layout(&self) -> Option<&TableLayout> {
        self.plan.layout()
    }

    /// Extracts the record sequence from the selected sheet.
    pub fn records(&self) -> Vec<Record> {
        self.plan.records(&self.sheet)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(value: &str) -> CellValue {
        CellValue::Text(value.to_owned())
    }

    fn plan(sheet: &Sheet, yaml: &str) -> TablePlan {
        let config = if yaml.is_empty() {
            BookConfig::default()
        } else {
            BookConfig::parse(yaml).unwrap()
        };
        TablePlan::build(sheet, &config).unwrap()
    }

    #[test]
    fn static_extraction_pairs_headers_with_columns() {
        let sheet = Sheet::from_rows(
            "Sheet1",
            vec![
                vec![text("Name"), text("Age")],
                vec![text("Ann"), CellValue::Int(30)],
            ],
        );
        let plan = plan(&sheet, "");
        assert_eq!(plan.mode(), TableMode::Static);

        let records = plan.records(&sheet);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].get("Name"), Some(&text("Ann")));
        assert_eq!(records[0].get("Age"), Some(&CellValue::Int(30)));
    }

    #[test]
    fn static_extraction_keeps_declaration_order_and_gaps() {
        let sheet = Sheet::from_rows(
            "Sheet1",
            vec![
                vec![text("Name"), text("Age"), text("City")],
                vec![text("Ann"), CellValue::Int(30), text("Paris")],
                vec![text("Bob"), CellValue::Empty, text("Oslo")],
            ],
        );
        let records = plan(&sheet, "").records(&sheet);
        assert_eq!(records.len(), 2);
        let keys: Vec<&String> = records[0].keys().collect();
        assert_eq!(keys, ["Name", "Age", "City"]);
        // A blank data cell reads as empty, never shortens the record.
        assert_eq!(records[1].get("Age"), Some(&CellValue::Empty));
    }

    #[test]
    fn blank_header_skip_policy_drops_the_column() {
        let sheet = Sheet::from_rows(
            "Sheet1",
            vec![
                vec![text("Name"), CellValue::Empty, text("City")],
                vec![text("Ann"), text("ghost"), text("Paris")],
            ],
        );
        let records = plan(&sheet, "").records(&sheet);
        assert_eq!(records.len(), 1);
        let keys: Vec<&String> = records[0].keys().collect();
        assert_eq!(keys, ["Name", "City"]);
        // Regression guard: City keeps its own column's data.
        assert_eq!(records[0].get("City"), Some(&text("Paris")));
    }

    #[test]
    fn blank_header_letter_policy_keeps_the_column() {
        let sheet = Sheet::from_rows(
            "Sheet1",
            vec![
                vec![text("Name"), CellValue::Empty, text("City")],
                vec![text("Ann"), text("ghost"), text("Paris")],
            ],
        );
        let records = plan(
            &sheet,
            "static:\n  headers:\n    blank_headers: letter\n",
        )
        .records(&sheet);
        assert_eq!(records[0].get("B"), Some(&text("ghost")));
        assert_eq!(records[0].get("City"), Some(&text("Paris")));
    }

    #[test]
    fn static_extraction_with_skipped_banner_rows() {
        let sheet = Sheet::from_rows(
            "Sheet1",
            vec![
                vec![text("Quarterly Report")],
                vec![text("Name"), text("Age")],
                vec![text("Ann"), CellValue::Int(30)],
                vec![text("Bob"), CellValue::Int(41)],
            ],
        );
        let records = plan(
            &sheet,
            "static:\n  headers:\n    skip_level: 1\n    total_high: 2\n",
        )
        .records(&sheet);
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].get("Name"), Some(&text("Bob")));
    }

    #[test]
    fn empty_sheet_yields_no_records() {
        let sheet = Sheet::from_rows("Sheet1", Vec::<Vec<CellValue>>::new());
        assert!(plan(&sheet, "").records(&sheet).is_empty());
    }

    #[test]
    fn floating_extraction_with_description() {
        let mut rows = vec![Vec::new(); 6];
        rows[4] = vec![CellValue::Empty, CellValue::Int(42)]; // B5
        rows[5] = vec![CellValue::Empty, text("max score")]; // B6
        let sheet = Sheet::from_rows("Sheet1", rows);
        let records = plan(
            &sheet,
            "floating:\n  values:\n    B5: score\n  desc_shift: [0, 1, 0, 0]\n",
        )
        .records(&sheet);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].get("key"), Some(&text("score")));
        assert_eq!(records[0].get("value"), Some(&CellValue::Int(42)));
        assert_eq!(records[0].get("desc"), Some(&text("max score")));
    }

    #[test]
    fn floating_extraction_without_shift_has_no_desc_field() {
        let mut rows = vec![Vec::new(); 5];
        rows[4] = vec![CellValue::Empty, CellValue::Int(42)];
        let sheet = Sheet::from_rows("Sheet1", rows);
        let records = plan(&sheet, "floating:\n  values:\n    B5: score\n").records(&sheet);
        assert_eq!(records.len(), 1);
        assert!(!records[0].contains_key("desc"));
    }

    #[test]
    fn floating_shift_off_the_edge_reads_empty_desc() {
        let sheet = Sheet::from_rows("Sheet1", vec![vec![CellValue::Int(7)]]);
        let records = plan(
            &sheet,
            "floating:\n  values:\n    A1: total\n  desc_shift: [1, 0, 0, 0]\n",
        )
        .records(&sheet);
        assert_eq!(records[0].get("desc"), Some(&CellValue::Empty));
    }

    #[test]
    fn floating_entries_keep_declaration_order() {
        let sheet = Sheet::from_rows(
            "Sheet1",
            vec![
                vec![text("title")],
                vec![CellValue::Empty, CellValue::Int(1)],
            ],
        );
        let records = plan(
            &sheet,
            "floating:\n  values:\n    B2: second\n    A1: first\n",
        )
        .records(&sheet);
        let keys: Vec<&CellValue> = records
            .iter()
            .map(|record| record.get("key").unwrap())
            .collect();
        assert_eq!(keys, [&text("second"), &text("first")]);
    }
}
