use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use flate2::read::MultiGzDecoder;
use tracing::debug;

use crate::input::{InputError, RawCell, RawTable, ensure_exists};

const BOM: char = '\u{feff}';

/// Compression and delimiter of a table file, derived from its extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableFormat {
    pub gzip: bool,
    pub delimiter: u8,
}

impl TableFormat {
    /// Tab for `.tsv`/`.txt`, comma otherwise; a trailing `.gz` means gzip.
    pub fn for_path(path: &Path) -> Self {
        let gzip = is_gz(path);
        let inner = if gzip {
            Path::new(path.file_stem().unwrap_or_default())
        } else {
            path
        };
        let delimiter = match inner.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("tsv") || ext.eq_ignore_ascii_case("txt") => {
                b'\t'
            }
            _ => b',',
        };
        Self { gzip, delimiter }
    }
}

fn is_gz(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "gz")
}

pub fn open_table(path: &Path, gzip: bool) -> Result<Box<dyn BufRead>, InputError> {
    ensure_exists(path)?;
    let file = File::open(path)?;
    if gzip {
        Ok(Box::new(BufReader::new(MultiGzDecoder::new(file))))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}

/// Reads a whole delimited table. Any unreadable row fails the entire read.
pub fn read_table(path: &Path) -> Result<RawTable, InputError> {
    read_table_as(path, TableFormat::for_path(path))
}

/// Reads `path` as if it had `format`, regardless of its own extension.
pub fn read_table_as(path: &Path, format: TableFormat) -> Result<RawTable, InputError> {
    let reader = open_table(path, format.gzip)?;
    let table = parse_table(reader, format.delimiter)?;
    debug!(
        path = %path.display(),
        rows = table.rows.len(),
        columns = table.columns.len(),
        "table read"
    );
    Ok(table)
}

pub fn parse_table<R: std::io::Read>(reader: R, delimiter: u8) -> Result<RawTable, InputError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let columns: Vec<String> = csv_reader
        .headers()?
        .iter()
        .enumerate()
        .map(|(i, h)| {
            let h = if i == 0 { h.trim_start_matches(BOM) } else { h };
            h.trim().to_string()
        })
        .collect();
    if columns.is_empty() || columns.iter().all(|c| c.is_empty()) {
        return Err(InputError::Empty);
    }

    let mut rows = Vec::new();
    for record in csv_reader.records() {
        let record = record?;
        let row = record.iter().map(RawCell::from_field).collect::<Vec<_>>();
        rows.push(row);
    }
    Ok(RawTable::new(columns, rows))
}
