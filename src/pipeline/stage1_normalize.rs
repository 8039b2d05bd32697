use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, warn};

use crate::input::{InputError, RawCell, RawTable};
use crate::model::record::{Attributes, Dataset, Record};
use crate::model::schema::{AbilitySchema, SCORE_MAX, SCORE_MIN};

static EMPTY: RawCell = RawCell::Empty;

/// Outcome of coercing one ability cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Coerced {
    Value(f64),
    /// Numeric but outside [0, 10]; carries the clamped value.
    Clamped(f64),
    /// Empty, non-numeric, non-finite or wrong type; repaired to 0.
    Malformed,
}

impl Coerced {
    pub fn value(self) -> f64 {
        match self {
            Coerced::Value(v) | Coerced::Clamped(v) => v,
            Coerced::Malformed => 0.0,
        }
    }
}

pub fn coerce_score(cell: &RawCell) -> Coerced {
    match parse_number(cell) {
        Some(v) if v < SCORE_MIN => Coerced::Clamped(SCORE_MIN),
        Some(v) if v > SCORE_MAX => Coerced::Clamped(SCORE_MAX),
        Some(v) => Coerced::Value(v),
        None => Coerced::Malformed,
    }
}

fn parse_number(cell: &RawCell) -> Option<f64> {
    let v = match cell {
        RawCell::Number(n) => *n,
        RawCell::Text(t) => t.trim().parse::<f64>().ok()?,
        RawCell::Empty | RawCell::Bool(_) => return None,
    };
    v.is_finite().then_some(v)
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NormalizeStats {
    pub rows: usize,
    /// Per dimension, cells repaired to 0.
    pub malformed_cells: Vec<usize>,
    /// Per dimension, numeric cells pulled back into [0, 10].
    pub clamped_cells: Vec<usize>,
}

impl NormalizeStats {
    pub fn malformed_total(&self) -> usize {
        self.malformed_cells.iter().sum()
    }

    pub fn clamped_total(&self) -> usize {
        self.clamped_cells.iter().sum()
    }
}

#[derive(Debug, Clone)]
pub struct NormalizeOutput {
    pub dataset: Dataset,
    pub stats: NormalizeStats,
}

struct ColumnMap {
    name: usize,
    department: usize,
    dimensions: Vec<usize>,
    political_affiliation: Option<usize>,
    role: Option<usize>,
    age: Option<usize>,
    remarks: Option<usize>,
    extra: Vec<(usize, String)>,
}

fn resolve_columns(table: &RawTable, schema: &AbilitySchema) -> Result<ColumnMap, InputError> {
    let name = table.require_column(&schema.name_column)?;
    let department = table.require_column(&schema.department_column)?;
    let dimensions = schema
        .dimensions
        .iter()
        .map(|d| table.require_column(d))
        .collect::<Result<Vec<_>, _>>()?;
    let optional = |col: &Option<String>| col.as_deref().and_then(|c| table.column_index(c));

    let known = schema.known_columns();
    let extra = table
        .columns
        .iter()
        .enumerate()
        .filter(|(_, c)| !c.is_empty() && !known.contains(&c.as_str()))
        .map(|(i, c)| (i, c.clone()))
        .collect();

    Ok(ColumnMap {
        name,
        department,
        dimensions,
        political_affiliation: optional(&schema.political_affiliation_column),
        role: optional(&schema.role_column),
        age: optional(&schema.age_column),
        remarks: optional(&schema.remarks_column),
        extra,
    })
}

/// Builds a typed dataset from raw rows. Every input row yields exactly one
/// record; malformed ability cells become 0. Only a missing required column
/// fails, and it fails the whole load.
pub fn normalize(
    table: &RawTable,
    schema: &Arc<AbilitySchema>,
) -> Result<NormalizeOutput, InputError> {
    let cols = resolve_columns(table, schema)?;
    let n_dims = cols.dimensions.len();
    let mut stats = NormalizeStats {
        rows: table.rows.len(),
        malformed_cells: vec![0; n_dims],
        clamped_cells: vec![0; n_dims],
    };

    let mut records = Vec::with_capacity(table.rows.len());
    for row in &table.rows {
        let cell = |idx: usize| row.get(idx).unwrap_or(&EMPTY);
        let text = |idx: Option<usize>| idx.and_then(|i| cell(i).as_text());

        let mut scores = Vec::with_capacity(n_dims);
        for (dim, &col) in cols.dimensions.iter().enumerate() {
            let coerced = coerce_score(cell(col));
            match coerced {
                Coerced::Malformed => stats.malformed_cells[dim] += 1,
                Coerced::Clamped(_) => stats.clamped_cells[dim] += 1,
                Coerced::Value(_) => {}
            }
            scores.push(coerced.value());
        }

        let attributes = Attributes {
            political_affiliation: text(cols.political_affiliation),
            role: text(cols.role),
            age: cols.age.and_then(|i| parse_number(cell(i))),
            remarks: text(cols.remarks),
            extra: cols
                .extra
                .iter()
                .map(|(i, name)| (name.clone(), cell(*i).as_text().unwrap_or_default()))
                .collect(),
        };

        records.push(Record::new(
            cell(cols.name).as_text().unwrap_or_default(),
            cell(cols.department).as_text().unwrap_or_default(),
            scores,
            attributes,
        ));
    }

    for (dim, &count) in stats.malformed_cells.iter().enumerate() {
        if count > 0 {
            warn!(
                dimension = %schema.dimensions[dim],
                cells = count,
                "non-numeric ability cells repaired to 0"
            );
        }
    }
    if stats.clamped_total() > 0 {
        warn!(
            cells = stats.clamped_total(),
            "ability values outside [0, 10] clamped"
        );
    }
    debug!(rows = records.len(), "normalized dataset");

    Ok(NormalizeOutput {
        dataset: Dataset::new(Arc::clone(schema), records)
            .with_extra_columns(cols.extra.into_iter().map(|(_, name)| name).collect()),
        stats,
    })
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage1_normalize.rs"]
mod tests;
