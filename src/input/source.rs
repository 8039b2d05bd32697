use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::input::fingerprint::{Fingerprint, fingerprint_file};
use crate::input::table::{TableFormat, read_table_as};
use crate::input::{InputError, ensure_exists};
use crate::model::error::PipelineResult;
use crate::model::record::Dataset;
use crate::model::schema::AbilitySchema;
use crate::pipeline::stage1_normalize::{NormalizeOutput, NormalizeStats, normalize};

#[derive(Debug, Clone)]
struct Memo {
    fingerprint: Fingerprint,
    dataset: Arc<Dataset>,
    stats: NormalizeStats,
}

/// Backing table file plus the dataset normalized from it. The dataset is
/// rebuilt from scratch whenever the file's content fingerprint changes.
#[derive(Debug)]
pub struct DataSource {
    path: PathBuf,
    schema: Arc<AbilitySchema>,
    memo: Option<Memo>,
}

impl DataSource {
    pub fn new(path: impl Into<PathBuf>, schema: Arc<AbilitySchema>) -> Self {
        Self {
            path: path.into(),
            schema,
            memo: None,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn schema(&self) -> &Arc<AbilitySchema> {
        &self.schema
    }

    pub fn stats(&self) -> Option<&NormalizeStats> {
        self.memo.as_ref().map(|m| &m.stats)
    }

    pub fn is_cached(&self) -> bool {
        self.memo.is_some()
    }

    pub fn invalidate(&mut self) {
        self.memo = None;
    }

    /// Normalized dataset for the current file content. Unreadable or
    /// structurally invalid sources fail with `DataUnavailable` and leave no
    /// partial dataset behind.
    pub fn load(&mut self) -> PipelineResult<Arc<Dataset>> {
        ensure_exists(&self.path)?;
        let fingerprint = fingerprint_file(&self.path)?;
        if let Some(memo) = &self.memo {
            if memo.fingerprint == fingerprint {
                debug!(path = %self.path.display(), %fingerprint, "dataset cache hit");
                return Ok(Arc::clone(&memo.dataset));
            }
        }

        let out = self.read_and_normalize(&self.path)?;
        info!(
            path = %self.path.display(),
            rows = out.dataset.len(),
            malformed = out.stats.malformed_total(),
            %fingerprint,
            "dataset loaded"
        );
        let dataset = Arc::new(out.dataset);
        self.memo = Some(Memo {
            fingerprint,
            dataset: Arc::clone(&dataset),
            stats: out.stats,
        });
        Ok(dataset)
    }

    /// Swaps in a full replacement table. The replacement must load under the
    /// active schema when read in the target's format; it is then copied next
    /// to the target and renamed over it, so readers see either the old or the
    /// new file. The memoized dataset is dropped.
    pub fn replace(&mut self, replacement: &Path) -> PipelineResult<usize> {
        let out = self.read_and_normalize(replacement)?;
        let rows = out.dataset.len();

        let file_name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| InputError::Missing(self.path.display().to_string()))?;
        let staging = self
            .path
            .with_file_name(format!(".{file_name}.replace-{}", std::process::id()));

        if let Err(err) = stage_and_swap(replacement, &staging, &self.path) {
            if staging.exists() {
                if let Err(cleanup) = fs::remove_file(&staging) {
                    warn!(path = %staging.display(), error = %cleanup, "staging file left behind");
                }
            }
            return Err(err.into());
        }

        self.memo = None;
        info!(
            path = %self.path.display(),
            from = %replacement.display(),
            rows,
            "source table replaced"
        );
        Ok(rows)
    }

    fn read_and_normalize(&self, path: &Path) -> Result<NormalizeOutput, InputError> {
        let table = read_table_as(path, TableFormat::for_path(&self.path))?;
        normalize(&table, &self.schema)
    }
}

fn stage_and_swap(from: &Path, staging: &Path, target: &Path) -> Result<(), InputError> {
    if let Some(parent) = target.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::copy(from, staging)?;
    fs::rename(staging, target)?;
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/src_inline/input/source.rs"]
mod tests;
