//! # rapid-pagerank
//!
//! PageRank for small hyperlinked corpora, estimated two independent ways:
//!
//! - [`SamplingPageRank`]: a random surfer walks the damped Markov chain and
//!   pages are ranked by visit frequency.
//! - [`IterativePageRank`]: the PageRank recurrence is applied until the rank
//!   vector stops changing.
//!
//! Both share the dangling-page convention of [`transition_model`]: a page
//! with no outlinks links to every page.
//!
//! ```
//! use rapid_pagerank::{Corpus, IterativePageRank};
//!
//! let corpus = Corpus::from_links([("a", vec!["b"]), ("b", vec!["a"])]).unwrap();
//! let result = IterativePageRank::new().run(&corpus).unwrap();
//! assert!((result.score(0) - 0.5).abs() < 1e-6);
//! ```

pub mod crawl;
pub mod errors;
pub mod graph;
pub mod pagerank;
pub mod report;
pub mod types;

pub use crawl::crawl;
pub use errors::{RankError, Result};
pub use graph::builder::CorpusBuilder;
pub use graph::csr::Corpus;
pub use pagerank::iterative::IterativePageRank;
pub use pagerank::sampling::SamplingPageRank;
pub use pagerank::transition::{transition_model, Distribution};
pub use pagerank::{PageRankResult, RankVector};
pub use types::{PageId, RankConfig};
