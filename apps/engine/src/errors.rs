use thiserror::Error;

/// Engine-level error type returned by the fallible public operations.
///
/// Provider failures and scoring-backend failures never surface here: the
/// orchestrator converts the former into placeholder entries and the scoring
/// engine downgrades the latter to the local analyzer. What remains is caller
/// misuse.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("No candidate resumes to choose from")]
    NoCandidates,
}
