use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{info, warn};

use crate::model::criteria::FilterCriteria;
use crate::model::record::Dataset;
use crate::pipeline::stage1_normalize::NormalizeStats;
use crate::pipeline::stage6_views::{DashboardView, PersonProfile};
use crate::report::csv::render_dataset_csv;
use crate::report::json::{SummaryDocument, render_summary_json};
use crate::report::text::render_profiles_document;
use crate::report::tsv::{render_correlation_tsv, render_group_means_tsv, render_ranking_tsv};

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone)]
pub struct ExportInput<'a> {
    pub filtered: &'a Dataset,
    pub view: &'a DashboardView,
    pub criteria: &'a FilterCriteria,
    pub stats: Option<&'a NormalizeStats>,
    pub profiles: &'a [PersonProfile],
}

/// Writes the export bundle into `out_dir` and returns the files written.
/// `correlation.tsv` is skipped, and any earlier copy removed, when that
/// view failed.
pub fn write_exports(input: &ExportInput<'_>, out_dir: &Path) -> Result<Vec<PathBuf>, ExportError> {
    fs::create_dir_all(out_dir)?;
    let mut written = Vec::new();
    let schema = &input.filtered.schema;

    let csv_path = out_dir.join("filtered.csv");
    write_bytes(&csv_path, &render_dataset_csv(input.filtered)?)?;
    written.push(csv_path);

    let ranking_path = out_dir.join("ranking.tsv");
    let label = input.view.options.sort.label(schema);
    write_bytes(
        &ranking_path,
        render_ranking_tsv(&input.view.ranking, &label).as_bytes(),
    )?;
    written.push(ranking_path);

    let groups_path = out_dir.join("group_means.tsv");
    write_bytes(
        &groups_path,
        render_group_means_tsv(&input.view.group_means, &schema.dimensions).as_bytes(),
    )?;
    written.push(groups_path);

    let corr_path = out_dir.join("correlation.tsv");
    match &input.view.correlation {
        Ok(matrix) => {
            write_bytes(&corr_path, render_correlation_tsv(matrix).as_bytes())?;
            written.push(corr_path);
        }
        Err(err) => {
            warn!(error = %err, "correlation.tsv not written");
            // a matrix from an earlier run would contradict summary.json
            match fs::remove_file(&corr_path) {
                Ok(()) => info!(path = %corr_path.display(), "removed stale output"),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => return Err(e.into()),
            }
        }
    }

    let summary_path = out_dir.join("summary.json");
    let doc = SummaryDocument::new(input.view, &schema.dimensions, input.criteria, input.stats);
    write_bytes(&summary_path, render_summary_json(&doc)?.as_bytes())?;
    written.push(summary_path);

    let profiles_path = out_dir.join("profiles.txt");
    write_bytes(
        &profiles_path,
        render_profiles_document(input.profiles).as_bytes(),
    )?;
    written.push(profiles_path);

    for path in &written {
        info!(path = %path.display(), "wrote");
    }
    Ok(written)
}

fn write_bytes(path: &Path, data: &[u8]) -> std::io::Result<()> {
    let mut w = BufWriter::new(File::create(path)?);
    w.write_all(data)?;
    w.flush()
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage7_export.rs"]
mod tests;
