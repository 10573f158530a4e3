//! Shared configuration and identifier types

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::{RankError, Result};

/// Dense page identifier, an index into a [`Corpus`](crate::graph::csr::Corpus).
pub type PageId = u32;

pub const DEFAULT_DAMPING: f64 = 0.85;
pub const DEFAULT_SAMPLES: usize = 10_000;
pub const DEFAULT_THRESHOLD: f64 = 0.001;
pub const DEFAULT_MAX_ITERATIONS: usize = 10_000;

/// Parameters for a ranking run.
///
/// # JSON shape
///
/// ```json
/// {
///   "damping": 0.85,
///   "samples": 10000,
///   "threshold": 0.001,
///   "max_iterations": 10000,
///   "seed": 42,
///   "walkers": 1
/// }
/// ```
///
/// Every field is optional in the JSON form and falls back to its default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RankConfig {
    /// Probability of following a link instead of teleporting
    pub damping: f64,
    /// Number of transitions drawn by the sampling estimator
    pub samples: usize,
    /// L1 change below which the iterative estimator stops
    pub threshold: f64,
    /// Safety cap on power iterations
    pub max_iterations: usize,
    /// Seed for the sampling estimator; `None` draws from OS entropy
    pub seed: Option<u64>,
    /// Independent random walkers sharing the sample budget
    pub walkers: usize,
}

impl Default for RankConfig {
    fn default() -> Self {
        Self {
            damping: DEFAULT_DAMPING,
            samples: DEFAULT_SAMPLES,
            threshold: DEFAULT_THRESHOLD,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            seed: None,
            walkers: 1,
        }
    }
}

impl RankConfig {
    /// Load a config from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject parameters no estimator can run with.
    pub fn validate(&self) -> Result<()> {
        validate_damping(self.damping)?;
        validate_samples(self.samples)?;
        if self.walkers == 0 {
            return Err(RankError::InvalidParameter(
                "walkers must be at least 1".to_string(),
            ));
        }
        validate_threshold(self.threshold)?;
        validate_max_iterations(self.max_iterations)?;
        Ok(())
    }
}

pub(crate) fn validate_damping(damping: f64) -> Result<()> {
    if (0.0..=1.0).contains(&damping) {
        Ok(())
    } else {
        Err(RankError::InvalidParameter(format!(
            "damping must be within [0, 1], got {damping}"
        )))
    }
}

pub(crate) fn validate_threshold(threshold: f64) -> Result<()> {
    if threshold > 0.0 && threshold.is_finite() {
        Ok(())
    } else {
        Err(RankError::InvalidParameter(format!(
            "threshold must be a positive finite number, got {threshold}"
        )))
    }
}

pub(crate) fn validate_max_iterations(max_iterations: usize) -> Result<()> {
    if max_iterations == 0 {
        Err(RankError::InvalidParameter(
            "max_iterations must be at least 1".to_string(),
        ))
    } else {
        Ok(())
    }
}

pub(crate) fn validate_samples(samples: usize) -> Result<()> {
    if samples == 0 {
        Err(RankError::InvalidParameter(
            "sample count must be at least 1".to_string(),
        ))
    } else {
        Ok(())
    }
}
