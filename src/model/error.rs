use thiserror::Error;

use crate::input::InputError;

/// Failures surfaced by the evaluation pipeline.
///
/// Malformed cells and empty filter results are not represented here: the
/// former are repaired to 0 during normalization, the latter are a valid
/// zero-record `Dataset`.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("data unavailable: {0}")]
    DataUnavailable(#[from] InputError),

    #[error("insufficient data for {view}: need at least {required} records, got {actual}")]
    InsufficientData {
        view: &'static str,
        required: usize,
        actual: usize,
    },

    #[error("unknown field: {0}")]
    UnknownField(String),

    #[error("invalid profile: {0}")]
    Config(String),
}

pub type PipelineResult<T> = Result<T, PipelineError>;
