use std::collections::BTreeMap;

use crate::pipeline::stage3_rank::RankedRow;
use crate::pipeline::stage4_aggregate::GroupSummary;
use crate::pipeline::stage5_correlation::CorrelationMatrix;
use crate::report::{format_score, format_value};

pub fn render_ranking_tsv(rows: &[RankedRow], value_label: &str) -> String {
    let mut out = format!("rank\tname\tdepartment\t{value_label}\tcomposite\tlevel\n");
    for row in rows {
        out.push_str(&format!(
            "{}\t{}\t{}\t{}\t{}\t{}\n",
            row.rank,
            row.name,
            row.department,
            format_value(row.value),
            format_score(row.composite),
            row.level
        ));
    }
    out
}

pub fn render_group_means_tsv(
    groups: &BTreeMap<String, GroupSummary>,
    dimensions: &[String],
) -> String {
    let mut out = String::from("group\tcount");
    for dim in dimensions {
        out.push('\t');
        out.push_str(dim);
    }
    out.push_str("\tcomposite_mean\n");
    for (group, summary) in groups {
        out.push_str(group);
        out.push('\t');
        out.push_str(&summary.count.to_string());
        for mean in &summary.means {
            out.push('\t');
            out.push_str(&format_score(*mean));
        }
        out.push('\t');
        out.push_str(&format_score(summary.composite_mean));
        out.push('\n');
    }
    out
}

/// Undefined pairs are written as `NA`.
pub fn render_correlation_tsv(matrix: &CorrelationMatrix) -> String {
    let mut out = String::from("dimension");
    for dim in &matrix.dimensions {
        out.push('\t');
        out.push_str(dim);
    }
    out.push('\n');
    for (i, dim) in matrix.dimensions.iter().enumerate() {
        out.push_str(dim);
        for j in 0..matrix.dimensions.len() {
            out.push('\t');
            match matrix.get(i, j) {
                Some(r) => out.push_str(&format!("{:.4}", r)),
                None => out.push_str("NA"),
            }
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/tsv.rs"]
mod tests;
