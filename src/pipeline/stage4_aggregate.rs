use std::collections::{BTreeMap, HashMap};

use serde::Serialize;

use crate::model::criteria::{GroupKey, fold};
use crate::model::record::{Dataset, mean2};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupSummary {
    pub count: usize,
    /// Per-dimension means, aligned with the dataset's dimensions.
    pub means: Vec<f64>,
    pub composite_mean: f64,
}

/// Per-group means over every ability dimension, keyed in sorted group order.
/// Group values that differ only in case or surrounding space form one group,
/// labelled with the first spelling seen. Groups with no records do not appear.
pub fn aggregate_by_group(dataset: &Dataset, key: GroupKey) -> BTreeMap<String, GroupSummary> {
    let n_dims = dataset.dimensions().len();
    let mut labels: HashMap<String, String> = HashMap::new();
    let mut sums: BTreeMap<String, (usize, Vec<f64>, Vec<f64>)> = BTreeMap::new();
    for record in &dataset.records {
        let Some(group) = key.value(record) else {
            continue;
        };
        let label = labels
            .entry(fold(group))
            .or_insert_with(|| group.to_string())
            .clone();
        let entry = sums
            .entry(label)
            .or_insert_with(|| (0, vec![0.0; n_dims], Vec::new()));
        entry.0 += 1;
        for (dim, slot) in entry.1.iter_mut().enumerate() {
            *slot += record.score(dim);
        }
        entry.2.push(record.composite);
    }

    sums.into_iter()
        .map(|(group, (count, dims, composites))| {
            let n = count as f64;
            let summary = GroupSummary {
                count,
                means: dims.into_iter().map(|s| s / n).collect(),
                composite_mean: mean2(composites).unwrap_or(0.0),
            };
            (group, summary)
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage4_aggregate.rs"]
mod tests;
