//! Corpus ingestion from a directory of HTML pages
//!
//! Every `*.html` file directly inside the directory becomes a page. Links are
//! the `href` targets of `<a>` tags; targets that are not pages of the same
//! directory, and links from a page to itself, are dropped. Symlinked pages
//! are read through the link.

use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;
use walkdir::WalkDir;

use crate::errors::{RankError, Result};
use crate::graph::builder::CorpusBuilder;
use crate::graph::csr::Corpus;

fn anchor_regex() -> &'static Regex {
    static ANCHOR: OnceLock<Regex> = OnceLock::new();
    ANCHOR.get_or_init(|| {
        Regex::new(r#"<a\s+(?:[^>]*?)href="([^"]*)""#).expect("anchor pattern is valid")
    })
}

/// Extract raw `href` targets of anchor tags, in document order
pub fn extract_links(content: &str) -> Vec<String> {
    anchor_regex()
        .captures_iter(content)
        .filter_map(|cap| cap.get(1))
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Crawl a directory into a [`Corpus`].
///
/// Fails with [`RankError::WalkDir`] if the directory cannot be listed and
/// [`RankError::InvalidCorpus`] if it holds no HTML pages.
pub fn crawl(directory: impl AsRef<Path>) -> Result<Corpus> {
    let directory = directory.as_ref();
    let _span = tracing::info_span!("crawl", directory = %directory.display()).entered();

    let mut pages: Vec<(String, String)> = Vec::new();
    for entry in WalkDir::new(directory)
        .follow_links(true)
        .min_depth(1)
        .max_depth(1)
    {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().to_string();
        if !name.ends_with(".html") {
            tracing::debug!(file = %name, "skipping non-HTML file");
            continue;
        }
        let contents = std::fs::read_to_string(entry.path())?;
        pages.push((name, contents));
    }

    if pages.is_empty() {
        return Err(RankError::InvalidCorpus(format!(
            "no .html pages found in {}",
            directory.display()
        )));
    }

    let mut builder = CorpusBuilder::with_capacity(pages.len());
    for (name, _) in &pages {
        builder.get_or_create_page(name);
    }

    for (name, contents) in &pages {
        let from = builder.get_or_create_page(name);
        for target in extract_links(contents) {
            match builder.get_page_id(&target) {
                Some(to) => builder.add_link(from, to),
                None => tracing::debug!(page = %name, target = %target, "dropping link outside corpus"),
            }
        }
    }

    let corpus = Corpus::from_builder(&builder)?;
    tracing::info!(pages = corpus.len(), links = corpus.num_links(), "corpus loaded");
    Ok(corpus)
}
