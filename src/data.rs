//! Core data types shared across the store, the recalculator, and the
//! search orchestrator.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Frequency tier of a word within a single document.
///
/// Purely descriptive: it classifies how prominent a word is in its
/// document, and nothing in scoring reads it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FrequencyRank {
    Low,
    Medium,
    High,
}

impl FrequencyRank {
    /// Classify a normalized term frequency into a tier.
    pub fn from_term_frequency(term_frequency: f64) -> Self {
        if term_frequency >= 0.1 {
            FrequencyRank::High
        } else if term_frequency >= 0.01 {
            FrequencyRank::Medium
        } else {
            FrequencyRank::Low
        }
    }
}

/// One row per (document, word) pair observed in a document.
///
/// All fields except `tf_idf` are write-once at ingestion. `tf_idf` is
/// owned exclusively by [`TfIdfRecalculator`](crate::TfIdfRecalculator) and
/// stays at zero until the recalculator has run at least once after the
/// word was ingested.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordStatistic {
    /// Opaque identifier of the owning document. The document record itself
    /// lives outside this crate.
    pub doc_id: String,

    /// Normalized token, non-empty, lemma-normalized before storage.
    pub word: String,

    /// Number of times `word` appears in the document.
    pub occurrence_count: u64,

    /// `occurrence_count` normalized by document length, in [0, 1].
    pub term_frequency: f64,

    /// Frequency tier within the document. Descriptive only.
    pub rank: FrequencyRank,

    /// Externally computed semantic clustering signal. Stored for
    /// compatibility with the surrounding pipeline; relevance scoring
    /// intentionally never reads it.
    pub clustering_score: f64,

    /// Corpus-wide TF-IDF weight, recomputed in bulk by the recalculator.
    pub tf_idf: f64,
}

impl WordStatistic {
    /// Build a freshly ingested row. `tf_idf` starts at zero and the
    /// frequency rank is derived from the term frequency.
    pub fn new(
        doc_id: impl Into<String>,
        word: impl Into<String>,
        occurrence_count: u64,
        term_frequency: f64,
    ) -> Self {
        WordStatistic {
            doc_id: doc_id.into(),
            word: word.into(),
            occurrence_count,
            term_frequency,
            rank: FrequencyRank::from_term_frequency(term_frequency),
            clustering_score: 0.0,
            tf_idf: 0.0,
        }
    }

    pub fn with_clustering_score(mut self, clustering_score: f64) -> Self {
        self.clustering_score = clustering_score;
        self
    }
}

/// Structural attributes of a document that filters match against.
///
/// Owned by the external document entity; the store keeps a copy alongside
/// the document's word statistics so candidate retrieval can filter without
/// a second round trip.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentMetadata {
    pub source_id: Option<String>,
    pub author: Option<String>,
    pub category_id: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
}

impl DocumentMetadata {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn source_id(mut self, source_id: impl Into<String>) -> Self {
        self.source_id = Some(source_id.into());
        self
    }

    pub fn author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    pub fn category_id(mut self, category_id: impl Into<String>) -> Self {
        self.category_id = Some(category_id.into());
        self
    }

    pub fn published_at(mut self, published_at: DateTime<Utc>) -> Self {
        self.published_at = Some(published_at);
        self
    }
}

/// New TF-IDF weight for one (document, word) row, produced by the
/// recalculator and applied by the store in a single transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TfIdfUpdate {
    pub doc_id: String,
    pub word: String,
    pub tf_idf: f64,
}

/// One ranked search result: a document id and its relevance score.
///
/// Results are totally ordered by score descending, ties broken by doc id
/// ascending. The tie-break keeps paginated pages reproducible across
/// requests with identical parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    pub doc_id: String,
    pub score: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frequency_rank_tiers() {
        assert_eq!(FrequencyRank::from_term_frequency(0.5), FrequencyRank::High);
        assert_eq!(FrequencyRank::from_term_frequency(0.1), FrequencyRank::High);
        assert_eq!(
            FrequencyRank::from_term_frequency(0.05),
            FrequencyRank::Medium
        );
        assert_eq!(
            FrequencyRank::from_term_frequency(0.001),
            FrequencyRank::Low
        );
        assert_eq!(FrequencyRank::from_term_frequency(0.0), FrequencyRank::Low);
    }

    #[test]
    fn new_statistic_starts_unweighted() {
        let stat = WordStatistic::new("doc1", "rust", 4, 0.02);
        assert_eq!(stat.tf_idf, 0.0);
        assert_eq!(stat.rank, FrequencyRank::Medium);
        assert_eq!(stat.clustering_score, 0.0);
    }
}
