//! Random-surfer transition model
//!
//! With probability `damping` the surfer follows one of the current page's
//! links chosen uniformly; otherwise it jumps to any page in the corpus.
//! A dangling page behaves as if it linked to every page.

use rand::distributions::{Distribution as _, WeightedIndex};
use rand::Rng;

use crate::errors::{RankError, Result};
use crate::graph::csr::Corpus;
use crate::types::{validate_damping, PageId};

/// Probability of visiting each page next, indexed by page ID
#[derive(Debug, Clone, PartialEq)]
pub struct Distribution {
    probs: Vec<f64>,
}

impl Distribution {
    /// Probability of moving to `page`
    pub fn prob(&self, page: PageId) -> f64 {
        self.probs.get(page as usize).copied().unwrap_or(0.0)
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.probs
    }

    pub fn len(&self) -> usize {
        self.probs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.probs.is_empty()
    }

    /// Total probability mass (1.0 up to rounding)
    pub fn total(&self) -> f64 {
        self.probs.iter().sum()
    }

    /// Build a reusable weighted sampler over the page IDs
    pub fn sampler(&self) -> Result<WeightedIndex<f64>> {
        WeightedIndex::new(&self.probs).map_err(|e| {
            RankError::InvalidParameter(format!("cannot sample from distribution: {e}"))
        })
    }

    /// Draw the next page
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<PageId> {
        Ok(self.sampler()?.sample(rng) as PageId)
    }
}

/// Compute the distribution over the page a surfer on `page` visits next.
///
/// Fails with [`RankError::InvalidPage`] if `page` is not in the corpus and
/// [`RankError::InvalidParameter`] if `damping` is outside [0, 1].
pub fn transition_model(corpus: &Corpus, page: PageId, damping: f64) -> Result<Distribution> {
    validate_damping(damping)?;
    if !corpus.contains(page) {
        return Err(RankError::InvalidPage(format!(
            "page id {page} is not in a corpus of {} pages",
            corpus.len()
        )));
    }

    let n = corpus.len() as f64;
    let mut probs = vec![(1.0 - damping) / n; corpus.len()];

    let outlinks = corpus.outlinks(page);
    if outlinks.is_empty() {
        let share = damping / n;
        for p in &mut probs {
            *p += share;
        }
    } else {
        let share = damping / outlinks.len() as f64;
        for &target in outlinks {
            probs[target as usize] += share;
        }
    }

    Ok(Distribution { probs })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn build_corpus() -> Corpus {
        // 1 -> 2, 2 -> {1, 3}, 3 dangling
        Corpus::from_links([
            ("1.html", vec!["2.html"]),
            ("2.html", vec!["1.html", "3.html"]),
            ("3.html", vec![]),
        ])
        .unwrap()
    }

    #[test]
    fn test_single_outlink() {
        let corpus = build_corpus();
        let dist = transition_model(&corpus, 0, 0.85).unwrap();

        assert!((dist.prob(0) - 0.05).abs() < 1e-12);
        assert!((dist.prob(1) - 0.9).abs() < 1e-12);
        assert!((dist.prob(2) - 0.05).abs() < 1e-12);
    }

    #[test]
    fn test_two_outlinks() {
        let corpus = build_corpus();
        let dist = transition_model(&corpus, 1, 0.85).unwrap();

        assert!((dist.prob(0) - 0.475).abs() < 1e-12);
        assert!((dist.prob(1) - 0.05).abs() < 1e-12);
        assert!((dist.prob(2) - 0.475).abs() < 1e-12);
    }

    #[test]
    fn test_dangling_page_is_uniform() {
        let corpus = build_corpus();
        let dist = transition_model(&corpus, 2, 0.85).unwrap();

        for p in corpus.page_ids() {
            assert!((dist.prob(p) - 1.0 / 3.0).abs() < 1e-12);
        }
        assert!((dist.total() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_distribution_sums_to_one() {
        let corpus = build_corpus();
        for damping in [0.0, 0.15, 0.5, 0.85, 1.0] {
            for page in corpus.page_ids() {
                let dist = transition_model(&corpus, page, damping).unwrap();
                assert_eq!(dist.len(), 3);
                assert!((dist.total() - 1.0).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn test_zero_damping_is_uniform() {
        let corpus = build_corpus();
        let dist = transition_model(&corpus, 0, 0.0).unwrap();
        for p in corpus.page_ids() {
            assert!((dist.prob(p) - 1.0 / 3.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_single_page_corpus() {
        let corpus = Corpus::from_links([("only.html", Vec::<&str>::new())]).unwrap();
        let dist = transition_model(&corpus, 0, 0.85).unwrap();
        assert!((dist.prob(0) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_invalid_page() {
        let corpus = build_corpus();
        assert!(matches!(
            transition_model(&corpus, 3, 0.85),
            Err(RankError::InvalidPage(_))
        ));
    }

    #[test]
    fn test_invalid_damping() {
        let corpus = build_corpus();
        assert!(matches!(
            transition_model(&corpus, 0, 1.01),
            Err(RankError::InvalidParameter(_))
        ));
        assert!(matches!(
            transition_model(&corpus, 0, -0.5),
            Err(RankError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_full_damping_never_draws_unlinked_page() {
        let corpus = build_corpus();
        let dist = transition_model(&corpus, 0, 1.0).unwrap();
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..200 {
            assert_eq!(dist.sample(&mut rng).unwrap(), 1);
        }
    }
}
