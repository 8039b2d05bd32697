use std::collections::BTreeMap;

use serde::Serialize;
use tracing::warn;

use crate::model::criteria::{Direction, GroupKey, SortKey};
use crate::model::error::PipelineError;
use crate::model::level::{Level, classify};
use crate::model::record::{Dataset, Record, mean2};
use crate::model::schema::SCORE_MAX;
use crate::pipeline::stage3_rank::{RankedRow, rank, ranked_rows};
use crate::pipeline::stage4_aggregate::{GroupSummary, aggregate_by_group};
use crate::pipeline::stage5_correlation::{CorrelationMatrix, correlation_matrix};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Kpis {
    pub total_records: usize,
    pub filtered_records: usize,
    pub mean_composite: Option<f64>,
    pub department_count: usize,
    pub spotlight_dimension: Option<String>,
    pub spotlight_min: f64,
    pub spotlight_count: usize,
}

/// Headline tiles. Totals and department coverage describe the full dataset;
/// the mean and spotlight count describe the filtered one.
pub fn kpis(full: &Dataset, filtered: &Dataset) -> Kpis {
    let mean_composite = mean2(filtered.records.iter().map(|r| r.composite));
    let schema = &filtered.schema;
    let spotlight_count = match schema.spotlight_index() {
        Some(dim) => filtered
            .records
            .iter()
            .filter(|r| r.score(dim) >= schema.spotlight_min)
            .count(),
        None => 0,
    };
    Kpis {
        total_records: full.len(),
        filtered_records: filtered.len(),
        mean_composite,
        department_count: full.departments().len(),
        spotlight_dimension: schema.spotlight_dimension.clone(),
        spotlight_min: schema.spotlight_min,
        spotlight_count,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DimensionScore {
    pub dimension: String,
    pub value: f64,
    pub level: Level,
    /// Share of the full scale, for bar widths.
    pub fraction: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PersonProfile {
    pub name: String,
    pub department: String,
    pub political_affiliation: Option<String>,
    pub role: Option<String>,
    pub age: Option<f64>,
    pub remarks: Option<String>,
    pub composite: f64,
    pub level: Level,
    pub dimensions: Vec<DimensionScore>,
}

impl PersonProfile {
    pub fn from_record(record: &Record, dimensions: &[String]) -> Self {
        let dims = dimensions
            .iter()
            .enumerate()
            .map(|(i, name)| {
                let value = record.score(i);
                DimensionScore {
                    dimension: name.clone(),
                    value,
                    level: classify(value),
                    fraction: value / SCORE_MAX,
                }
            })
            .collect();
        Self {
            name: record.name.clone(),
            department: record.department.clone(),
            political_affiliation: record.attributes.political_affiliation.clone(),
            role: record.attributes.role.clone(),
            age: record.attributes.age,
            remarks: record.attributes.remarks.clone(),
            composite: record.composite,
            level: record.level(),
            dimensions: dims,
        }
    }
}

/// Profile of the first record named exactly `name`; names are not unique.
pub fn person_profile(dataset: &Dataset, name: &str) -> Option<PersonProfile> {
    dataset
        .records
        .iter()
        .find(|r| r.name == name)
        .map(|r| PersonProfile::from_record(r, dataset.dimensions()))
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Heatmap {
    pub names: Vec<String>,
    pub dimensions: Vec<String>,
    pub values: Vec<Vec<f64>>,
}

pub fn heatmap(dataset: &Dataset) -> Heatmap {
    Heatmap {
        names: dataset.records.iter().map(|r| r.name.clone()).collect(),
        dimensions: dataset.dimensions().to_vec(),
        values: dataset.records.iter().map(|r| r.scores.clone()).collect(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ViewOptions {
    pub sort: SortKey,
    pub direction: Direction,
    pub limit: Option<usize>,
    pub group_key: GroupKey,
}

impl Default for ViewOptions {
    fn default() -> Self {
        Self {
            sort: SortKey::Composite,
            direction: Direction::Descending,
            limit: Some(5),
            group_key: GroupKey::Department,
        }
    }
}

/// Every derived view of one filtered dataset. A failing view is kept as its
/// error and does not affect the others.
#[derive(Debug)]
pub struct DashboardView {
    pub options: ViewOptions,
    pub kpis: Kpis,
    pub ranking: Vec<RankedRow>,
    pub group_means: BTreeMap<String, GroupSummary>,
    pub heatmap: Heatmap,
    pub correlation: Result<CorrelationMatrix, PipelineError>,
}

pub fn build_dashboard(full: &Dataset, filtered: &Dataset, options: ViewOptions) -> DashboardView {
    let ranked = rank(filtered, options.sort, options.direction, options.limit);
    let correlation = correlation_matrix(filtered);
    if let Err(err) = &correlation {
        warn!(error = %err, "correlation view unavailable");
    }
    DashboardView {
        options,
        kpis: kpis(full, filtered),
        ranking: ranked_rows(&ranked, options.sort),
        group_means: aggregate_by_group(filtered, options.group_key),
        heatmap: heatmap(filtered),
        correlation,
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage6_views.rs"]
mod tests;
