//! Monte Carlo PageRank
//!
//! Simulates a random surfer following the transition model and ranks each
//! page by the fraction of transitions that landed on it. Accuracy is
//! stochastic and improves with the number of samples; there is no
//! convergence check.

use rand::distributions::{Distribution as _, WeightedIndex};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

use super::transition::transition_model;
use super::PageRankResult;
use crate::errors::{RankError, Result};
use crate::graph::csr::Corpus;
use crate::types::{validate_damping, validate_samples, PageId, RankConfig};

/// Random-surfer sampling estimator
#[derive(Debug, Clone)]
pub struct SamplingPageRank {
    /// Damping factor (typically 0.85)
    pub damping: f64,
    /// Number of transitions to draw
    pub samples: usize,
    /// Seed for [`run_seeded`](Self::run_seeded) and [`run_parallel`](Self::run_parallel)
    pub seed: Option<u64>,
    /// Independent walkers used by [`run_parallel`](Self::run_parallel)
    pub walkers: usize,
}

impl Default for SamplingPageRank {
    fn default() -> Self {
        Self::from_config(&RankConfig::default())
    }
}

impl SamplingPageRank {
    /// Create a new SamplingPageRank with default settings
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &RankConfig) -> Self {
        Self {
            damping: config.damping,
            samples: config.samples,
            seed: config.seed,
            walkers: config.walkers,
        }
    }

    /// Set the damping factor
    pub fn with_damping(mut self, damping: f64) -> Self {
        self.damping = damping;
        self
    }

    /// Set the number of samples
    pub fn with_samples(mut self, samples: usize) -> Self {
        self.samples = samples;
        self
    }

    /// Fix the random seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the number of parallel walkers
    pub fn with_walkers(mut self, walkers: usize) -> Self {
        self.walkers = walkers;
        self
    }

    /// Run the sampler with a caller-supplied random source.
    pub fn run<R: Rng + ?Sized>(&self, corpus: &Corpus, rng: &mut R) -> Result<PageRankResult> {
        let _span = tracing::info_span!(
            "sample_pagerank",
            pages = corpus.len(),
            samples = self.samples
        )
        .entered();

        let visits = self.visit_counts(corpus, rng)?;
        let result = self.normalize(visits);
        tracing::info!(samples = self.samples, "sampling finished");
        Ok(result)
    }

    /// Run the sampler with a `StdRng` seeded from `seed`, or from OS
    /// entropy when no seed is set.
    pub fn run_seeded(&self, corpus: &Corpus) -> Result<PageRankResult> {
        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        self.run(corpus, &mut rng)
    }

    /// Split the sample budget across independent walkers and merge their
    /// visit counts.
    ///
    /// Walker `i` draws from its own `StdRng` seeded with `seed + i`, so the
    /// result for a fixed seed and walker count does not depend on thread
    /// scheduling.
    pub fn run_parallel(&self, corpus: &Corpus) -> Result<PageRankResult> {
        self.validate()?;
        if self.walkers == 0 {
            return Err(RankError::InvalidParameter(
                "walkers must be at least 1".to_string(),
            ));
        }

        let _span = tracing::info_span!(
            "sample_pagerank_parallel",
            pages = corpus.len(),
            samples = self.samples,
            walkers = self.walkers
        )
        .entered();

        let base_seed = self.seed.unwrap_or_else(rand::random);
        let walkers = self.walkers.min(self.samples);
        let per_walker = self.samples / walkers;
        let remainder = self.samples % walkers;

        let visits = (0..walkers)
            .into_par_iter()
            .map(|i| {
                let budget = per_walker + usize::from(i < remainder);
                let mut rng = StdRng::seed_from_u64(base_seed.wrapping_add(i as u64));
                self.clone()
                    .with_samples(budget)
                    .visit_counts(corpus, &mut rng)
            })
            .try_reduce(
                || vec![0u64; corpus.len()],
                |mut acc, counts| {
                    for (a, c) in acc.iter_mut().zip(counts) {
                        *a += c;
                    }
                    Ok(acc)
                },
            )?;

        let result = self.normalize(visits);
        tracing::info!(samples = self.samples, walkers, "parallel sampling finished");
        Ok(result)
    }

    /// Walk the chain for `samples` transitions and count visits per page.
    ///
    /// The starting page is chosen uniformly and is not itself counted.
    pub fn visit_counts<R: Rng + ?Sized>(&self, corpus: &Corpus, rng: &mut R) -> Result<Vec<u64>> {
        self.validate()?;

        let n = corpus.len();
        // One sampler per page, built the first time the surfer lands there
        let mut samplers: Vec<Option<WeightedIndex<f64>>> = vec![None; n];
        let mut visits = vec![0u64; n];

        let mut current: PageId = rng.gen_range(0..n) as PageId;
        for _ in 0..self.samples {
            let sampler = match &mut samplers[current as usize] {
                Some(sampler) => sampler,
                slot => slot.insert(transition_model(corpus, current, self.damping)?.sampler()?),
            };
            let next = sampler.sample(rng) as PageId;
            visits[next as usize] += 1;
            current = next;
        }

        Ok(visits)
    }

    fn validate(&self) -> Result<()> {
        validate_damping(self.damping)?;
        validate_samples(self.samples)
    }

    fn normalize(&self, visits: Vec<u64>) -> PageRankResult {
        let total = self.samples as f64;
        let scores = visits.into_iter().map(|v| v as f64 / total).collect();
        PageRankResult::new(scores, self.samples, 0.0, true)
    }
}
