use serde::Serialize;

use crate::model::error::{PipelineError, PipelineResult};
use crate::model::record::Dataset;

pub const MIN_RECORDS: usize = 2;
const VARIANCE_EPS: f64 = 1e-12;

/// Symmetric Pearson matrix over the ability dimensions. `None` marks a pair
/// where one column has zero variance; the diagonal is always 1.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelationMatrix {
    pub dimensions: Vec<String>,
    pub values: Vec<Vec<Option<f64>>>,
}

impl CorrelationMatrix {
    pub fn get(&self, a: usize, b: usize) -> Option<f64> {
        self.values.get(a).and_then(|row| row.get(b)).copied().flatten()
    }
}

pub fn correlation_matrix(dataset: &Dataset) -> PipelineResult<CorrelationMatrix> {
    let n = dataset.len();
    if n < MIN_RECORDS {
        return Err(PipelineError::InsufficientData {
            view: "correlation",
            required: MIN_RECORDS,
            actual: n,
        });
    }

    let n_dims = dataset.dimensions().len();
    let columns = (0..n_dims).map(|d| dataset.column(d)).collect::<Vec<_>>();
    let centered = columns
        .iter()
        .map(|col| {
            let mean = col.iter().sum::<f64>() / n as f64;
            col.iter().map(|v| v - mean).collect::<Vec<_>>()
        })
        .collect::<Vec<_>>();
    let norms = centered
        .iter()
        .map(|col| col.iter().map(|v| v * v).sum::<f64>().sqrt())
        .collect::<Vec<_>>();

    let mut values = vec![vec![None; n_dims]; n_dims];
    for a in 0..n_dims {
        values[a][a] = Some(1.0);
        for b in (a + 1)..n_dims {
            let r = if norms[a] <= VARIANCE_EPS || norms[b] <= VARIANCE_EPS {
                None
            } else {
                let dot: f64 = centered[a]
                    .iter()
                    .zip(&centered[b])
                    .map(|(x, y)| x * y)
                    .sum();
                Some((dot / (norms[a] * norms[b])).clamp(-1.0, 1.0))
            };
            values[a][b] = r;
            values[b][a] = r;
        }
    }

    Ok(CorrelationMatrix {
        dimensions: dataset.dimensions().to_vec(),
        values,
    })
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage5_correlation.rs"]
mod tests;
