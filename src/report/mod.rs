pub mod csv;
pub mod json;
pub mod text;
pub mod tsv;

pub const CSV_BOM: &[u8] = b"\xEF\xBB\xBF";

pub fn format_score(v: f64) -> String {
    format!("{:.2}", v)
}

/// Shortest plain form of a value (8.5, 10), used where the source's own
/// precision should pass through.
pub fn format_value(v: f64) -> String {
    format!("{}", v)
}
