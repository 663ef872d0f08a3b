//! Cosine-similarity relevance scoring over TF-IDF vectors.
//!
//! The query is treated as a binary vector over the vocabulary (duplicate
//! query words count once), the document as a vector whose components are
//! its stored TF-IDF weights. Pure computation: no I/O, deterministic for
//! identical inputs.

use ahash::AHashSet;

use crate::data::WordStatistic;

/// Score a document's TF-IDF vector against a deduplicated query term set.
///
/// Returns `dot / (doc_norm * query_norm)` where the document norm runs
/// over ALL of the document's weights, not just the matched ones, and the
/// query norm is the square root of the distinct query term count.
///
/// A document with no recorded terms (or an all-zero vector) cannot be
/// relevant and scores 0.0, as does an empty query set. With non-negative
/// weights the result lies in [0, 1].
pub fn score(document_terms: &[WordStatistic], query_terms: &AHashSet<String>) -> f64 {
    if document_terms.is_empty() || query_terms.is_empty() {
        return 0.0;
    }

    let mut dot = 0.0f64;
    let mut norm_sq = 0.0f64;
    for stat in document_terms {
        norm_sq += stat.tf_idf * stat.tf_idf;
        if query_terms.contains(&stat.word) {
            dot += stat.tf_idf;
        }
    }

    let doc_norm = norm_sq.sqrt();
    if doc_norm == 0.0 {
        return 0.0;
    }

    let query_norm = (query_terms.len() as f64).sqrt();
    dot / (doc_norm * query_norm)
}
