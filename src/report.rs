//! Result formatting for the command line

use serde::Serialize;

use crate::errors::Result;
use crate::graph::csr::Corpus;
use crate::pagerank::{PageRankResult, RankVector};

/// Which estimator produced a ranking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Method {
    Sampling,
    Iteration,
}

/// A named rank vector ready for output
#[derive(Debug, Clone, Serialize)]
pub struct RankReport {
    pub method: Method,
    /// Samples drawn or power iterations run
    pub iterations: usize,
    pub converged: bool,
    pub ranks: RankVector,
}

impl RankReport {
    pub fn new(method: Method, result: &PageRankResult, corpus: &Corpus) -> Self {
        Self {
            method,
            iterations: result.iterations,
            converged: result.converged,
            ranks: result.to_rank_vector(corpus),
        }
    }

    fn heading(&self) -> String {
        match self.method {
            Method::Sampling => format!("PageRank Results from Sampling (n = {})", self.iterations),
            Method::Iteration => "PageRank Results from Iteration".to_string(),
        }
    }
}

/// Plain-text report, one `  page: rank` line per page in page-name order
pub fn format_text(reports: &[RankReport]) -> String {
    let mut out = String::new();
    for report in reports {
        out.push_str(&report.heading());
        out.push('\n');
        for (page, rank) in &report.ranks {
            out.push_str(&format!("  {page}: {rank:.4}\n"));
        }
    }
    out
}

/// Pretty-printed JSON array of reports
pub fn format_json(reports: &[RankReport]) -> Result<String> {
    Ok(serde_json::to_string_pretty(reports)? + "\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_reports() -> Vec<RankReport> {
        let corpus = Corpus::from_links([("2.html", vec!["1.html"]), ("1.html", vec!["2.html"])])
            .unwrap();
        vec![
            RankReport::new(
                Method::Sampling,
                &PageRankResult::new(vec![0.4987, 0.5013], 10_000, 0.0, true),
                &corpus,
            ),
            RankReport::new(
                Method::Iteration,
                &PageRankResult::new(vec![0.5, 0.5], 1, 0.0, true),
                &corpus,
            ),
        ]
    }

    #[test]
    fn test_format_text() {
        let text = format_text(&sample_reports());
        let expected = "PageRank Results from Sampling (n = 10000)\n  1.html: 0.4987\n  2.html: 0.5013\n\
                        PageRank Results from Iteration\n  1.html: 0.5000\n  2.html: 0.5000\n";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_format_json() {
        let json = format_json(&sample_reports()).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed[0]["method"], "sampling");
        assert_eq!(parsed[0]["iterations"], 10_000);
        assert_eq!(parsed[1]["method"], "iteration");
        assert_eq!(parsed[1]["ranks"]["2.html"], 0.5);
    }
}
