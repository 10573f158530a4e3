//! Corpus builder with efficient link handling
//!
//! This module provides a mutable link-graph builder that uses FxHashMap
//! for O(1) page lookups during construction.

use crate::types::PageId;
use rustc_hash::{FxHashMap, FxHashSet};

/// A page in the corpus builder
#[derive(Debug, Clone)]
pub struct BuilderPage {
    /// The page name (a filename in a crawled corpus)
    pub name: String,
    /// Outgoing links: set of target page IDs
    pub links: FxHashSet<PageId>,
}

impl BuilderPage {
    /// Create a new page with no links
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            links: FxHashSet::default(),
        }
    }
}

/// A mutable directed link graph optimized for incremental construction
#[derive(Debug)]
pub struct CorpusBuilder {
    /// Maps page name -> page ID
    name_to_id: FxHashMap<String, PageId>,
    /// Page storage
    pages: Vec<BuilderPage>,
}

impl Default for CorpusBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl CorpusBuilder {
    /// Create a new empty builder
    pub fn new() -> Self {
        Self {
            name_to_id: FxHashMap::default(),
            pages: Vec::new(),
        }
    }

    /// Create a builder with pre-allocated capacity
    pub fn with_capacity(page_capacity: usize) -> Self {
        Self {
            name_to_id: FxHashMap::with_capacity_and_hasher(page_capacity, Default::default()),
            pages: Vec::with_capacity(page_capacity),
        }
    }

    /// Get or create a page with the given name, returning its ID
    pub fn get_or_create_page(&mut self, name: &str) -> PageId {
        if let Some(&id) = self.name_to_id.get(name) {
            return id;
        }

        let id = self.pages.len() as PageId;
        self.name_to_id.insert(name.to_string(), id);
        self.pages.push(BuilderPage::new(name));
        id
    }

    /// Add a directed link between two pages
    ///
    /// Self-links and repeated links are ignored.
    pub fn add_link(&mut self, from: PageId, to: PageId) {
        if from == to || to as usize >= self.pages.len() {
            return;
        }

        if let Some(page) = self.pages.get_mut(from as usize) {
            page.links.insert(to);
        }
    }

    /// Get the number of pages
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Get the total number of links
    pub fn link_count(&self) -> usize {
        self.pages.iter().map(|p| p.links.len()).sum()
    }

    /// Get a page by ID
    pub fn get_page(&self, id: PageId) -> Option<&BuilderPage> {
        self.pages.get(id as usize)
    }

    /// Get a page ID by name
    pub fn get_page_id(&self, name: &str) -> Option<PageId> {
        self.name_to_id.get(name).copied()
    }

    /// Iterate over all pages
    pub fn pages(&self) -> impl Iterator<Item = (PageId, &BuilderPage)> {
        self.pages.iter().enumerate().map(|(i, p)| (i as PageId, p))
    }

    /// Check if the builder holds no pages
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}
