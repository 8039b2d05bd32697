use tracing::debug;

use crate::model::criteria::FilterCriteria;
use crate::model::record::Dataset;

/// Records satisfying every set predicate, in dataset order. A zero-record
/// result is a valid outcome.
pub fn filter(dataset: &Dataset, criteria: &FilterCriteria) -> Dataset {
    let records = dataset
        .records
        .iter()
        .filter(|r| criteria.matches(r))
        .cloned()
        .collect::<Vec<_>>();
    debug!(
        input = dataset.len(),
        matched = records.len(),
        "filter applied"
    );
    dataset.with_records(records)
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage2_filter.rs"]
mod tests;
