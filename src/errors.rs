//! Error types for rapid-pagerank

use thiserror::Error;

/// Result type alias using RankError
pub type Result<T> = std::result::Result<T, RankError>;

/// Exit codes for the CLI
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL_ERROR: i32 = 1;
    pub const INVALID_INPUT: i32 = 3;
}

/// Errors surfaced by corpus construction and the ranking estimators.
///
/// None of these are recoverable within a ranking call: any violated
/// precondition aborts the call without a partial result.
#[derive(Debug, Error)]
pub enum RankError {
    /// Corpus violates a structural invariant (empty, unknown link target, self-link).
    #[error("Invalid corpus: {0}")]
    InvalidCorpus(String),

    /// A page id or name that is not part of the corpus.
    #[error("Invalid page: {0}")]
    InvalidPage(String),

    /// Damping outside [0, 1], zero samples, and similar.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("PageRank did not converge after {iterations} iterations (delta {delta:.6})")]
    NonConvergence { iterations: usize, delta: f64 },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Walk directory error: {0}")]
    WalkDir(#[from] walkdir::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl RankError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::InvalidCorpus(_) | Self::InvalidPage(_) | Self::InvalidParameter(_) => {
                exit_codes::INVALID_INPUT
            }
            _ => exit_codes::GENERAL_ERROR,
        }
    }
}
