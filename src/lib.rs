//! # Docrank
//!
//! Corpus-wide TF-IDF weighting and cosine-relevance ranking for document
//! search.
//!
//! ## Features
//!
//! - Pure Rust implementation
//! - Cosine-similarity relevance scoring over TF-IDF vectors
//! - Atomic, idempotent corpus-wide TF-IDF recalculation
//! - Structural filters (source, author, category, date range)
//! - Deterministic, stable pagination
//! - Pluggable word-statistics stores and lemmatizers

// Core modules
mod data;
mod error;
pub mod lemma;
mod recalc;
pub mod relevance;
mod search;
pub mod store;

// Re-exports for the public API
pub use data::{DocumentMetadata, FrequencyRank, SearchHit, TfIdfUpdate, WordStatistic};
pub use error::{DocrankError, Result};
pub use lemma::{Lemmatizer, SimpleLemmatizer};
pub use recalc::{RecalcConfig, TfIdfRecalculator};
pub use search::filter::StructuralFilters;
pub use search::request::{SearchRequest, SearchRequestBuilder};
pub use search::{SearchConfig, SearchOrchestrator};
pub use store::WordStatisticsStore;
pub use store::memory::MemoryWordStatisticsStore;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
