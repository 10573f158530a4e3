//! Iterative PageRank
//!
//! Applies the PageRank recurrence until the total absolute change between
//! successive rank vectors drops below a threshold. Dangling pages spread
//! their rank evenly over every page, matching the transition model.

use rayon::prelude::*;

use super::PageRankResult;
use crate::errors::{RankError, Result};
use crate::graph::csr::Corpus;
use crate::types::{
    validate_damping, validate_max_iterations, validate_threshold, PageId, RankConfig,
};

/// Power-iteration PageRank estimator
#[derive(Debug, Clone)]
pub struct IterativePageRank {
    /// Damping factor (typically 0.85)
    pub damping: f64,
    /// Stop once the L1 change of an iteration is below this
    pub threshold: f64,
    /// Safety cap; exceeding it is reported as [`RankError::NonConvergence`]
    pub max_iterations: usize,
}

impl Default for IterativePageRank {
    fn default() -> Self {
        Self::from_config(&RankConfig::default())
    }
}

impl IterativePageRank {
    /// Create a new IterativePageRank with default settings
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &RankConfig) -> Self {
        Self {
            damping: config.damping,
            threshold: config.threshold,
            max_iterations: config.max_iterations,
        }
    }

    /// Set the damping factor
    pub fn with_damping(mut self, damping: f64) -> Self {
        self.damping = damping;
        self
    }

    /// Set the maximum iterations
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Set the convergence threshold
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Run PageRank on a corpus
    pub fn run(&self, corpus: &Corpus) -> Result<PageRankResult> {
        self.iterate(corpus, false)
    }

    /// Run PageRank computing each page's update on the rayon pool
    ///
    /// Produces the same vector as [`run`](Self::run).
    pub fn run_parallel(&self, corpus: &Corpus) -> Result<PageRankResult> {
        self.iterate(corpus, true)
    }

    fn iterate(&self, corpus: &Corpus, parallel: bool) -> Result<PageRankResult> {
        self.validate()?;

        let _span = tracing::info_span!(
            "iterate_pagerank",
            pages = corpus.len(),
            links = corpus.num_links(),
            parallel
        )
        .entered();

        let n = corpus.len();
        let mut scores = vec![1.0 / n as f64; n];
        let mut new_scores = vec![0.0; n];

        let dangling_pages = corpus.dangling_pages();
        let teleport = (1.0 - self.damping) / n as f64;
        let mut iterations = 0;

        loop {
            iterations += 1;

            // Rank held by dangling pages reaches every page equally
            let dangling_mass: f64 = dangling_pages.iter().map(|&d| scores[d as usize]).sum();
            let base = teleport + self.damping * dangling_mass / n as f64;

            if parallel {
                new_scores
                    .par_iter_mut()
                    .enumerate()
                    .for_each(|(page, slot)| {
                        *slot = base + self.inflow(corpus, &scores, page as PageId);
                    });
            } else {
                for (page, slot) in new_scores.iter_mut().enumerate() {
                    *slot = base + self.inflow(corpus, &scores, page as PageId);
                }
            }

            // Calculate convergence delta (L1 norm)
            let delta: f64 = scores
                .iter()
                .zip(new_scores.iter())
                .map(|(old, new)| (old - new).abs())
                .sum();

            std::mem::swap(&mut scores, &mut new_scores);
            tracing::debug!(iteration = iterations, delta, "pagerank iteration");

            if delta < self.threshold {
                tracing::info!(iterations, delta, "pagerank converged");
                return Ok(PageRankResult::new(scores, iterations, delta, true));
            }

            if iterations >= self.max_iterations {
                tracing::warn!(iterations, delta, "pagerank hit the iteration cap");
                return Err(RankError::NonConvergence { iterations, delta });
            }
        }
    }

    /// Damped rank flowing into `page` along real links
    ///
    /// Dangling sources are accounted for once per iteration in the base term.
    fn inflow(&self, corpus: &Corpus, scores: &[f64], page: PageId) -> f64 {
        let contributions: f64 = corpus
            .inlinks(page)
            .iter()
            .map(|&q| scores[q as usize] / corpus.effective_degree(q) as f64)
            .sum();
        self.damping * contributions
    }

    fn validate(&self) -> Result<()> {
        validate_damping(self.damping)?;
        validate_threshold(self.threshold)?;
        validate_max_iterations(self.max_iterations)
    }
}
