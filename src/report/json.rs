use std::collections::BTreeMap;

use serde::Serialize;

use crate::model::criteria::FilterCriteria;
use crate::pipeline::stage1_normalize::NormalizeStats;
use crate::pipeline::stage3_rank::RankedRow;
use crate::pipeline::stage4_aggregate::GroupSummary;
use crate::pipeline::stage5_correlation::CorrelationMatrix;
use crate::pipeline::stage6_views::{DashboardView, Kpis, ViewOptions};

#[derive(Debug, Serialize)]
pub struct ToolMeta<'a> {
    pub name: &'a str,
    pub version: &'a str,
}

#[derive(Debug, Serialize)]
pub struct CorrelationSection<'a> {
    pub matrix: Option<&'a CorrelationMatrix>,
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SummaryDocument<'a> {
    pub tool: ToolMeta<'a>,
    pub dimensions: &'a [String],
    pub criteria: &'a FilterCriteria,
    pub options: &'a ViewOptions,
    pub normalization: Option<&'a NormalizeStats>,
    pub kpis: &'a Kpis,
    pub ranking: &'a [RankedRow],
    pub group_means: &'a BTreeMap<String, GroupSummary>,
    pub correlation: CorrelationSection<'a>,
}

impl<'a> SummaryDocument<'a> {
    pub fn new(
        view: &'a DashboardView,
        dimensions: &'a [String],
        criteria: &'a FilterCriteria,
        normalization: Option<&'a NormalizeStats>,
    ) -> Self {
        let correlation = match &view.correlation {
            Ok(matrix) => CorrelationSection {
                matrix: Some(matrix),
                error: None,
            },
            Err(err) => CorrelationSection {
                matrix: None,
                error: Some(err.to_string()),
            },
        };
        Self {
            tool: ToolMeta {
                name: env!("CARGO_PKG_NAME"),
                version: env!("CARGO_PKG_VERSION"),
            },
            dimensions,
            criteria,
            options: &view.options,
            normalization,
            kpis: &view.kpis,
            ranking: &view.ranking,
            group_means: &view.group_means,
            correlation,
        }
    }
}

pub fn render_summary_json(doc: &SummaryDocument<'_>) -> serde_json::Result<String> {
    serde_json::to_string_pretty(doc)
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/json.rs"]
mod tests;
