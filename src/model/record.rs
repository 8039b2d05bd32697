use std::sync::Arc;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

use crate::model::criteria::fold;
use crate::model::level::{Level, classify};
use crate::model::schema::AbilitySchema;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Attributes {
    pub political_affiliation: Option<String>,
    pub role: Option<String>,
    pub age: Option<f64>,
    pub remarks: Option<String>,
    /// Source columns outside the schema, as (column, value) in header order.
    pub extra: Vec<(String, String)>,
}

/// One person's evaluation row. `scores` is aligned with the dataset schema's
/// dimension list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
    pub name: String,
    pub department: String,
    pub scores: Vec<f64>,
    pub composite: f64,
    pub attributes: Attributes,
}

impl Record {
    pub fn new(name: String, department: String, scores: Vec<f64>, attributes: Attributes) -> Self {
        let composite = composite_score(&scores);
        Self {
            name,
            department,
            scores,
            composite,
            attributes,
        }
    }

    pub fn score(&self, dim: usize) -> f64 {
        self.scores.get(dim).copied().unwrap_or(0.0)
    }

    pub fn level(&self) -> Level {
        classify(self.composite)
    }
}

/// Records plus the schema they were normalized against. Order is the source
/// row order and is preserved by every stage.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub schema: Arc<AbilitySchema>,
    pub records: Vec<Record>,
    /// Pass-through source columns, in header order.
    pub extra_columns: Vec<String>,
}

impl Dataset {
    pub fn new(schema: Arc<AbilitySchema>, records: Vec<Record>) -> Self {
        Self {
            schema,
            records,
            extra_columns: Vec::new(),
        }
    }

    pub fn with_extra_columns(mut self, columns: Vec<String>) -> Self {
        self.extra_columns = columns;
        self
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn dimensions(&self) -> &[String] {
        &self.schema.dimensions
    }

    pub fn with_records(&self, records: Vec<Record>) -> Self {
        Self {
            schema: Arc::clone(&self.schema),
            records,
            extra_columns: self.extra_columns.clone(),
        }
    }

    /// Distinct departments in first-seen order, compared the way the
    /// department filter compares them. Each keeps its first spelling.
    pub fn departments(&self) -> Vec<&str> {
        let mut seen = Vec::new();
        let mut out: Vec<&str> = Vec::new();
        for record in &self.records {
            let key = fold(&record.department);
            if !seen.contains(&key) {
                seen.push(key);
                out.push(record.department.as_str());
            }
        }
        out
    }

    pub fn column(&self, dim: usize) -> Vec<f64> {
        self.records.iter().map(|r| r.score(dim)).collect()
    }
}

/// Arithmetic mean of the ability values rounded to 2 decimals, half away
/// from zero (7.125 -> 7.13). An empty score list yields 0.
pub fn composite_score(scores: &[f64]) -> f64 {
    mean2(scores.iter().copied()).unwrap_or(0.0)
}

/// Mean rounded to 2 decimals, half away from zero. Values are summed as
/// decimals in their shortest printed form, so a decimal tie such as 1.005
/// rounds up however it was reached. `None` for no values.
pub fn mean2(values: impl IntoIterator<Item = f64>) -> Option<f64> {
    let values = values.into_iter().collect::<Vec<_>>();
    if values.is_empty() {
        return None;
    }
    decimal_mean2(&values).or_else(|| {
        let sum: f64 = values.iter().sum();
        Some(((sum / values.len() as f64) * 100.0).round() / 100.0)
    })
}

fn decimal_mean2(values: &[f64]) -> Option<f64> {
    let mut sum = Decimal::ZERO;
    for v in values {
        let d = v.to_string().parse::<Decimal>().ok()?;
        sum = sum.checked_add(d)?;
    }
    sum.checked_div(Decimal::from(values.len() as u64))?
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
}

#[cfg(test)]
#[path = "../../tests/src_inline/model/record.rs"]
mod tests;
