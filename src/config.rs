//! Side-car layout configuration.
//!
//! A spreadsheet may be accompanied by a YAML file (same base name, `.yml` or
//! `.yaml` extension) describing the table shape:
//!
//! ```yaml
//! static:
//!   headers:
//!     skip_level: 0      # row offset before the column scan
//!     total_high: 1      # header rows before the data region
//!     blank_headers: skip  # or: letter
//! ```
//!
//! ```yaml
//! floating:
//!   values:
//!     B5: score
//!     D9: max_players
//!   desc_shift: [0, 1, 0, 0]   # up, down, left, right; at most one non-zero
//! ```
//!
//! Absence of the file is not an error; static-mode defaults apply.
use crate::spreadsheet::reference::{CellRef, ReferenceError, Shift};
use indexmap::IndexMap;
use log::info;
use serde::{Deserialize, Deserializer};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Errors raised while locating, parsing, or validating a configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Cannot read config file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid config file: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("{0}")]
    ReferenceError(#[from] ReferenceError),
}

/// Extraction mode, fixed once at load time.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum TableMode {
    /// Contiguous grid with a header row (the default)
    #[default]
    Static,
    /// Individually labelled cells scattered across the sheet
    Floating,
}

/// How a column whose header cell is blank contributes to records.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlankHeaderPolicy {
    /// Drop the column from the output
    #[default]
    Skip,
    /// Key the column by its letter ("B", "AA", ...)
    Letter,
}

/// Top-level side-car configuration.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct BookConfig {
    /// Static table layout; its presence forces static mode
    #[serde(rename = "static", default)]
    pub static_table: Option<StaticConfig>,

    /// Floating table layout; its presence forces floating mode
    #[serde(default)]
    pub floating: Option<FloatingConfig>,
}

/// Layout of a static table.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct StaticConfig {
    #[serde(default)]
    pub headers: HeaderConfig,
}

/// Header shape of a static table.
#[derive(Clone, Debug, Deserialize)]
pub struct HeaderConfig {
    /// Row offset before column scanning begins
    #[serde(default)]
    pub skip_level: usize,

    /// Number of header rows before the data region starts
    #[serde(default = "default_total_high")]
    pub total_high: usize,

    /// Handling of blank header cells
    #[serde(default)]
    pub blank_headers: BlankHeaderPolicy,
}

fn default_total_high() -> usize {
    1
}

impl Default for HeaderConfig {
    fn default() -> Self {
        Self {
            skip_level: 0,
            total_high: default_total_high(),
            blank_headers: BlankHeaderPolicy::default(),
        }
    }
}

/// Layout of a floating table.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct FloatingConfig {
    /// Cell label to semantic key, in declaration order
    pub values: IndexMap<String, String>,

    /// Offset from each value cell to its description cell, shared by all
    /// entries
    #[serde(default, deserialize_with = "deserialize_shift")]
    pub desc_shift: Option<Shift>,
}

/// One floating-table declaration with its label already resolved.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PickEntry {
    pub cell: CellRef,
    pub key: String,
}

impl FloatingConfig {
    /// Resolves the `values` mapping into pick entries, validating every cell
    /// label. Fails on the first malformed label.
    pub fn entries(&self) -> Result<Vec<PickEntry>, ReferenceError> {
        self.values
            .iter()
            .map(|(label, key)| {
                CellRef::parse(label).map(|cell| PickEntry {
                    cell,
                    key: key.to_owned(),
                })
            })
            .collect()
    }
}

fn deserialize_shift<'de, D>(deserializer: D) -> Result<Option<Shift>, D::Error>
where
    D: Deserializer<'de>,
{
    let values = Vec::<u32>::deserialize(deserializer)?;
    Shift::from_vector(&values).map_err(serde::de::Error::custom)
}

impl BookConfig {
    /// Parses a configuration from YAML text.
    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(text)?)
    }

    /// Loads a configuration file.
    pub fn load<P>(path: P) -> Result<Self, ConfigError>
    where
        P: AsRef<Path>,
    {
        Self::parse(fs::read_to_string(path)?.as_str())
    }

    /// Looks for a side-car file next to the source spreadsheet: same base
    /// name with a `.yml` (then `.yaml`) extension. Returns None when neither
    /// exists.
    pub fn discover(source: &Path) -> Result<Option<Self>, ConfigError> {
        for extension in ["yml", "yaml"] {
            let candidate = source.with_extension(extension);
            if candidate.exists() {
                info!("found layout config {}", candidate.display());
                return Self::load(candidate).map(Some);
            }
        }
        Ok(None)
    }

    /// The extraction mode this configuration selects. A `static` key wins
    /// over a `floating` key; an empty configuration means static defaults.
    pub fn mode(&self) -> TableMode {
        if self.static_table.is_some() {
            TableMode::Static
        } else if self.floating.is_some() {
            TableMode::Floating
        } else {
            TableMode::Static
        }
    }

    /// Static header settings, defaulted when absent.
    pub fn header_config(&self) -> HeaderConfig {
        self.static_table
            .as_ref()
            .map(|config| config.headers.clone())
            .unwrap_or_default()
    }
}
