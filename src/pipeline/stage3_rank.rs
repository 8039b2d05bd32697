use std::cmp::Ordering;

use serde::Serialize;

use crate::model::criteria::{Direction, SortKey};
use crate::model::level::{Level, classify};
use crate::model::record::{Dataset, Record};

/// Records ordered by `key`. The sort is stable, so equal keys keep dataset
/// order in either direction. `limit` larger than the dataset returns all of
/// it.
pub fn rank<'a>(
    dataset: &'a Dataset,
    key: SortKey,
    direction: Direction,
    limit: Option<usize>,
) -> Vec<&'a Record> {
    let mut ordered = dataset.records.iter().collect::<Vec<_>>();
    ordered.sort_by(|a, b| {
        let ord = key
            .value(a)
            .partial_cmp(&key.value(b))
            .unwrap_or(Ordering::Equal);
        match direction {
            Direction::Ascending => ord,
            Direction::Descending => ord.reverse(),
        }
    });
    if let Some(limit) = limit {
        ordered.truncate(limit);
    }
    ordered
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedRow {
    pub rank: usize,
    pub name: String,
    pub department: String,
    pub value: f64,
    pub composite: f64,
    pub level: Level,
}

pub fn ranked_rows(records: &[&Record], key: SortKey) -> Vec<RankedRow> {
    records
        .iter()
        .enumerate()
        .map(|(i, r)| RankedRow {
            rank: i + 1,
            name: r.name.clone(),
            department: r.department.clone(),
            value: key.value(r),
            composite: r.composite,
            level: classify(r.composite),
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage3_rank.rs"]
mod tests;
