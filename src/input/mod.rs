use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

pub mod fingerprint;
pub mod source;
pub mod table;

pub use source::DataSource;
pub use table::read_table;

#[derive(Debug, Error)]
pub enum InputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("missing input: {0}")]
    Missing(String),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("missing column: {0}")]
    MissingColumn(String),
    #[error("table has no header row")]
    Empty,
}

/// One untyped cell as supplied by a tabular source.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawCell {
    Empty,
    Bool(bool),
    Number(f64),
    Text(String),
}

impl RawCell {
    pub fn from_field(field: &str) -> Self {
        if field.trim().is_empty() {
            RawCell::Empty
        } else {
            RawCell::Text(field.to_string())
        }
    }

    /// Display form used for text columns and pass-through attributes.
    pub fn as_text(&self) -> Option<String> {
        match self {
            RawCell::Empty => None,
            RawCell::Bool(b) => Some(b.to_string()),
            RawCell::Number(n) => Some(n.to_string()),
            RawCell::Text(t) => {
                let t = t.trim();
                if t.is_empty() {
                    None
                } else {
                    Some(t.to_string())
                }
            }
        }
    }
}

/// Header plus rows; every row has exactly `columns.len()` cells.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<RawCell>>,
}

impl RawTable {
    pub fn new(columns: Vec<String>, rows: Vec<Vec<RawCell>>) -> Self {
        let width = columns.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, RawCell::Empty);
                row
            })
            .collect();
        Self { columns, rows }
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.trim() == name)
    }

    pub fn require_column(&self, name: &str) -> Result<usize, InputError> {
        self.column_index(name)
            .ok_or_else(|| InputError::MissingColumn(name.to_string()))
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

pub fn ensure_exists(path: &Path) -> Result<(), InputError> {
    if !path.is_file() {
        return Err(InputError::Missing(path.display().to_string()));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/src_inline/input/tests.rs"]
mod tests;
