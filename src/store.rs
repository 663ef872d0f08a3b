//! Word-statistics store contract.
//!
//! The store owns persistence and concurrency control; the core consumes it
//! as a transactional resource through this narrow read/write trait and
//! never synchronizes around it internally.

pub mod memory;

use ahash::{AHashMap, AHashSet};
use async_trait::async_trait;

use crate::data::{TfIdfUpdate, WordStatistic};
use crate::error::Result;
use crate::search::filter::StructuralFilters;

/// Read/write contract over per-document term statistics.
///
/// Implementations are expected to be safe for concurrent readers. A search
/// running alongside a recalculation may observe a mix of pre- and
/// post-recalculation weights unless the backing transaction offers
/// snapshot isolation; that weak-consistency window is accepted.
#[async_trait]
pub trait WordStatisticsStore: Send + Sync {
    /// All word statistics recorded for one document, every word included.
    ///
    /// An unknown document id yields an empty list, not an error: the
    /// document entity is owned externally and may have been deleted
    /// between candidate retrieval and scoring.
    async fn statistics_for(&self, doc_id: &str) -> Result<Vec<WordStatistic>>;

    /// Distinct ids of documents that contain at least one of `words` and
    /// satisfy every present structural filter.
    ///
    /// This is a coarse keyword match, necessary but not sufficient for
    /// relevance; callers score the candidates precisely afterwards.
    async fn candidate_documents(
        &self,
        words: &AHashSet<String>,
        filters: &StructuralFilters,
    ) -> Result<Vec<String>>;

    /// Total number of documents in the corpus.
    async fn document_count(&self) -> Result<u64>;

    /// For every distinct word, the number of distinct documents containing
    /// it at least once. Never zero for a word that has a stored row.
    async fn document_frequencies(&self) -> Result<AHashMap<String, u64>>;

    /// Every word-statistic row in the corpus, for bulk recomputation.
    async fn all_statistics(&self) -> Result<Vec<WordStatistic>>;

    /// Apply new TF-IDF weights as a single transaction and return the
    /// number of rows updated.
    ///
    /// All-or-nothing: on failure no partial state may be visible to
    /// subsequent reads.
    async fn bulk_update_tf_idf(&self, updates: Vec<TfIdfUpdate>) -> Result<u64>;
}
