//! Compressed Sparse Row (CSR) corpus representation
//!
//! CSR stores links contiguously, making iteration over a page's outlinks
//! (needed by the transition model) and inlinks (needed by the pull-style
//! power iteration) very fast.

use std::collections::BTreeMap;

use super::builder::CorpusBuilder;
use crate::errors::{RankError, Result};
use crate::types::PageId;

/// An immutable link graph in Compressed Sparse Row format
///
/// Page IDs are assigned in ascending page-name order, so two corpora with
/// the same pages and links are identical regardless of insertion order.
///
/// Invariants upheld by every constructor:
/// - at least one page
/// - every link target is a page of the corpus
/// - no page links to itself
///
/// The storage is private so these hold for the lifetime of the value;
/// a corpus can only be obtained through a checking constructor:
///
/// ```compile_fail
/// use rapid_pagerank::Corpus;
///
/// let corpus = Corpus {
///     num_pages: 0,
///     row_ptr: vec![0],
///     col_idx: vec![],
///     in_ptr: vec![0],
///     in_idx: vec![],
///     out_degree: vec![],
///     names: vec![],
/// };
/// ```
///
/// ```compile_fail
/// use rapid_pagerank::Corpus;
///
/// let mut corpus = Corpus::from_links([("a", vec!["b"]), ("b", vec![])]).unwrap();
/// corpus.names.swap(0, 1);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Corpus {
    /// Number of pages
    num_pages: usize,
    /// Row pointers: page i's outlinks are at indices row_ptr[i]..row_ptr[i+1]
    row_ptr: Vec<usize>,
    /// Target page for each outlink
    col_idx: Vec<PageId>,
    /// Row pointers into `in_idx` for inlinks
    in_ptr: Vec<usize>,
    /// Source page for each inlink
    in_idx: Vec<PageId>,
    /// Out-degree for each page
    out_degree: Vec<u32>,
    /// Name of each page, sorted
    names: Vec<String>,
}

impl Corpus {
    /// Convert a CorpusBuilder into CSR format
    pub fn from_builder(builder: &CorpusBuilder) -> Result<Self> {
        if builder.is_empty() {
            return Err(RankError::InvalidCorpus("corpus has no pages".to_string()));
        }

        let num_pages = builder.page_count();

        // Renumber pages by name for deterministic iteration
        let mut order: Vec<_> = builder.pages().collect();
        order.sort_by(|(_, a), (_, b)| a.name.cmp(&b.name));
        let mut remap = vec![0 as PageId; num_pages];
        for (new_id, (old_id, _)) in order.iter().enumerate() {
            remap[*old_id as usize] = new_id as PageId;
        }

        let mut row_ptr = Vec::with_capacity(num_pages + 1);
        let mut col_idx = Vec::with_capacity(builder.link_count());
        let mut out_degree = Vec::with_capacity(num_pages);
        let mut names = Vec::with_capacity(num_pages);
        let mut in_degree = vec![0usize; num_pages];

        row_ptr.push(0);

        for (new_id, (_, page)) in order.iter().enumerate() {
            names.push(page.name.clone());

            let mut links: Vec<PageId> = page
                .links
                .iter()
                .map(|&t| remap[t as usize])
                .filter(|&t| t as usize != new_id)
                .collect();
            links.sort_unstable();

            out_degree.push(links.len() as u32);
            for target in links {
                in_degree[target as usize] += 1;
                col_idx.push(target);
            }

            row_ptr.push(col_idx.len());
        }

        // Transpose into inlink rows
        let mut in_ptr = Vec::with_capacity(num_pages + 1);
        in_ptr.push(0);
        let mut running = 0;
        for d in &in_degree {
            running += d;
            in_ptr.push(running);
        }
        let mut cursor = in_ptr[..num_pages].to_vec();
        let mut in_idx = vec![0 as PageId; col_idx.len()];
        for source in 0..num_pages {
            for &target in &col_idx[row_ptr[source]..row_ptr[source + 1]] {
                let slot = &mut cursor[target as usize];
                in_idx[*slot] = source as PageId;
                *slot += 1;
            }
        }

        Ok(Self {
            num_pages,
            row_ptr,
            col_idx,
            in_ptr,
            in_idx,
            out_degree,
            names,
        })
    }

    /// Build a corpus from a page name -> outlink names mapping
    ///
    /// Unlike the builder, this checks the mapping strictly: a self-link,
    /// a link to a page that is not a key, a repeated key, or an empty
    /// mapping is rejected as [`RankError::InvalidCorpus`].
    pub fn from_links<I, K, L, T>(links: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, L)>,
        K: Into<String>,
        L: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let mut pages: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for (page, outlinks) in links {
            let page = page.into();
            let outlinks: Vec<String> = outlinks.into_iter().map(Into::into).collect();
            if pages.insert(page.clone(), outlinks).is_some() {
                return Err(RankError::InvalidCorpus(format!(
                    "page '{page}' listed more than once"
                )));
            }
        }

        let mut builder = CorpusBuilder::with_capacity(pages.len());
        for page in pages.keys() {
            builder.get_or_create_page(page);
        }

        for (page, outlinks) in &pages {
            let from = builder.get_or_create_page(page);
            for target in outlinks {
                if target == page {
                    return Err(RankError::InvalidCorpus(format!(
                        "page '{page}' links to itself"
                    )));
                }
                let to = builder.get_page_id(target).ok_or_else(|| {
                    RankError::InvalidCorpus(format!(
                        "page '{page}' links to '{target}', which is not in the corpus"
                    ))
                })?;
                builder.add_link(from, to);
            }
        }

        Self::from_builder(&builder)
    }

    /// Pages a page links to, in ID order
    pub fn outlinks(&self, page: PageId) -> &[PageId] {
        let start = self.row_ptr[page as usize];
        let end = self.row_ptr[page as usize + 1];
        &self.col_idx[start..end]
    }

    /// Pages linking to a page, in ID order
    pub fn inlinks(&self, page: PageId) -> &[PageId] {
        let start = self.in_ptr[page as usize];
        let end = self.in_ptr[page as usize + 1];
        &self.in_idx[start..end]
    }

    /// Get the out-degree of a page
    pub fn degree(&self, page: PageId) -> u32 {
        self.out_degree[page as usize]
    }

    /// Out-degree with dangling pages treated as linking to every page
    pub fn effective_degree(&self, page: PageId) -> usize {
        match self.out_degree[page as usize] {
            0 => self.num_pages,
            d => d as usize,
        }
    }

    /// Get the name of a page
    pub fn name(&self, page: PageId) -> &str {
        &self.names[page as usize]
    }

    /// Page names in ID (ascending name) order
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Check whether an ID refers to a page of this corpus
    pub fn contains(&self, page: PageId) -> bool {
        (page as usize) < self.num_pages
    }

    /// Number of pages
    pub fn len(&self) -> usize {
        self.num_pages
    }

    /// Always false: every constructor rejects an empty corpus
    pub fn is_empty(&self) -> bool {
        self.num_pages == 0
    }

    /// Get the total number of links
    pub fn num_links(&self) -> usize {
        self.col_idx.len()
    }

    /// Iterate over all page IDs
    pub fn page_ids(&self) -> impl Iterator<Item = PageId> {
        0..self.num_pages as PageId
    }

    /// Find dangling pages (pages with no outgoing links)
    pub fn dangling_pages(&self) -> Vec<PageId> {
        self.page_ids()
            .filter(|&p| self.out_degree[p as usize] == 0)
            .collect()
    }

    /// Get page ID by name (binary search over the sorted names)
    pub fn page_id(&self, name: &str) -> Option<PageId> {
        self.names
            .binary_search_by(|n| n.as_str().cmp(name))
            .ok()
            .map(|i| i as PageId)
    }
}
