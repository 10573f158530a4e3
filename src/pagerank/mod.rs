//! PageRank estimators
//!
//! This module provides the random-surfer transition model and two
//! independent estimators built on the same damped Markov chain: a
//! Monte Carlo sampler and a power-iteration solver.

pub mod iterative;
pub mod sampling;
pub mod transition;

use std::collections::BTreeMap;

use crate::graph::csr::Corpus;
use crate::types::PageId;

/// Rank vector keyed by page name, ordered for deterministic output
pub type RankVector = BTreeMap<String, f64>;

/// Result of a PageRank computation
#[derive(Debug, Clone, PartialEq)]
pub struct PageRankResult {
    /// Scores for each page (indexed by page ID)
    pub scores: Vec<f64>,
    /// Power iterations performed, or transitions drawn when sampling
    pub iterations: usize,
    /// Final convergence delta (L1); zero for sampled results
    pub delta: f64,
    /// Whether the algorithm converged
    pub converged: bool,
}

impl PageRankResult {
    /// Create a new PageRank result
    pub fn new(scores: Vec<f64>, iterations: usize, delta: f64, converged: bool) -> Self {
        Self {
            scores,
            iterations,
            delta,
            converged,
        }
    }

    /// Get the score for a specific page
    pub fn score(&self, page: PageId) -> f64 {
        self.scores.get(page as usize).copied().unwrap_or(0.0)
    }

    /// Total rank mass
    pub fn sum(&self) -> f64 {
        self.scores.iter().sum()
    }

    /// Attach page names to the scores
    pub fn to_rank_vector(&self, corpus: &Corpus) -> RankVector {
        corpus
            .page_ids()
            .map(|p| (corpus.name(p).to_string(), self.score(p)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_out_of_range() {
        let result = PageRankResult::new(vec![1.0], 1, 0.0, true);
        assert_eq!(result.score(0), 1.0);
        assert_eq!(result.score(9), 0.0);
    }

    #[test]
    fn test_to_rank_vector() {
        let corpus = Corpus::from_links([("b", vec!["a"]), ("a", vec!["b"])]).unwrap();
        let result = PageRankResult::new(vec![0.4, 0.6], 3, 0.0001, true);

        let ranks = result.to_rank_vector(&corpus);
        assert_eq!(ranks.len(), 2);
        assert_eq!(ranks["a"], 0.4);
        assert_eq!(ranks["b"], 0.6);
    }
}
