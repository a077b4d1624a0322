use calamine::Data;
use serde::{Serialize, Serializer};

/// A single cell value, normalized from the backend's datatype.
///
/// Date and time cells are rendered to text at materialization time; error
/// cells are absorbed into `Empty` so data-level anomalies never surface as
/// failures.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum CellValue {
    #[default]
    Empty,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl CellValue {
    /// A cell is blank when it is empty or holds an empty string.
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Empty => true,
            Self::Text(text) => text.is_empty(),
            _ => false,
        }
    }

    /// Renders the value as text. Returns `None` for blank cells.
    pub fn to_text(&self) -> Option<String> {
        match self {
            Self::Empty => None,
            Self::Bool(value) => Some(value.to_string()),
            Self::Int(value) => Some(value.to_string()),
            Self::Float(value) => Some(value.to_string()),
            Self::Text(value) if value.is_empty() => None,
            Self::Text(value) => Some(value.to_owned()),
        }
    }
}

impl From<&Data> for CellValue {
    fn from(data: &Data) -> Self {
        match data {
            Data::Empty => Self::Empty,
            Data::Bool(value) => Self::Bool(*value),
            Data::Int(value) => Self::Int(*value),
            Data::Float(value) => Self::Float(*value),
            Data::String(value) => Self::Text(value.to_owned()),
            Data::DateTime(value) => {
                // Serial values within the first day are times, whole serial
                // values are dates, the rest keep both parts.
                match value.as_datetime() {
                    Some(datetime) if value.as_f64() <= 1.0 => {
                        Self::Text(datetime.time().to_string())
                    }
                    Some(datetime) if value.as_f64().fract() == 0.0 => {
                        Self::Text(datetime.date().to_string())
                    }
                    Some(datetime) => Self::Text(datetime.to_string()),
                    None => Self::Float(value.as_f64()),
                }
            }
            Data::DateTimeIso(value) => Self::Text(value.to_owned()),
            Data::DurationIso(value) => Self::Text(value.to_owned()),
            Data::Error(_) => Self::Empty,
        }
    }
}

impl Serialize for CellValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Empty => serializer.serialize_str(""),
            Self::Bool(value) => serializer.serialize_bool(*value),
            Self::Int(value) => serializer.serialize_i64(*value),
            Self::Float(value) => serializer.serialize_f64(*value),
            Self::Text(value) => serializer.serialize_str(value),
        }
    }
}
