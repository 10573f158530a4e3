//! Corpus construction and representation
//!
//! This module provides link-graph building and immutable CSR storage
//! for the hyperlink corpus being ranked.

pub mod builder;
pub mod csr;
