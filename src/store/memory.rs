//! In-memory word-statistics store.
//!
//! Backs tests and small corpora. The write lock is the transaction scope:
//! `bulk_update_tf_idf` validates every target row before mutating anything,
//! so a failed update leaves the store untouched.

use ahash::{AHashMap, AHashSet};
use async_trait::async_trait;
use parking_lot::RwLock;

use crate::data::{DocumentMetadata, TfIdfUpdate, WordStatistic};
use crate::error::{DocrankError, Result};
use crate::search::filter::StructuralFilters;
use crate::store::WordStatisticsStore;

#[derive(Debug, Default)]
struct DocumentRecord {
    metadata: DocumentMetadata,
    // Keyed by word, which enforces row uniqueness per (document, word).
    statistics: AHashMap<String, WordStatistic>,
}

/// Thread-safe in-memory implementation of [`WordStatisticsStore`].
#[derive(Debug, Default)]
pub struct MemoryWordStatisticsStore {
    documents: RwLock<AHashMap<String, DocumentRecord>>,
}

impl MemoryWordStatisticsStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a document's metadata and ingested word statistics, replacing
    /// any previous state for the same id. Rows whose `doc_id` disagrees
    /// with `doc_id` are rejected.
    ///
    /// Ingestion itself (tokenizing, counting, lemma normalization) happens
    /// upstream; this store only receives the finished rows.
    pub fn put_document(
        &self,
        doc_id: impl Into<String>,
        metadata: DocumentMetadata,
        statistics: Vec<WordStatistic>,
    ) -> Result<()> {
        let doc_id = doc_id.into();
        let mut rows = AHashMap::with_capacity(statistics.len());
        for stat in statistics {
            if stat.doc_id != doc_id {
                return Err(DocrankError::invalid_argument(format!(
                    "statistic for document '{}' cannot be stored under '{}'",
                    stat.doc_id, doc_id
                )));
            }
            if stat.word.is_empty() {
                return Err(DocrankError::invalid_argument(
                    "word statistic with empty word",
                ));
            }
            rows.insert(stat.word.clone(), stat);
        }

        let mut documents = self.documents.write();
        documents.insert(
            doc_id,
            DocumentRecord {
                metadata,
                statistics: rows,
            },
        );
        Ok(())
    }

    /// Remove a document and cascade-delete its word statistics, mirroring
    /// the external document lifecycle. Unknown ids are a no-op.
    pub fn remove_document(&self, doc_id: &str) {
        self.documents.write().remove(doc_id);
    }

    /// Number of documents currently stored.
    pub fn len(&self) -> usize {
        self.documents.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.read().is_empty()
    }
}

#[async_trait]
impl WordStatisticsStore for MemoryWordStatisticsStore {
    async fn statistics_for(&self, doc_id: &str) -> Result<Vec<WordStatistic>> {
        let documents = self.documents.read();
        Ok(documents
            .get(doc_id)
            .map(|record| record.statistics.values().cloned().collect())
            .unwrap_or_default())
    }

    async fn candidate_documents(
        &self,
        words: &AHashSet<String>,
        filters: &StructuralFilters,
    ) -> Result<Vec<String>> {
        let documents = self.documents.read();
        let mut candidates: Vec<String> = documents
            .iter()
            .filter(|(_, record)| {
                filters.matches(&record.metadata)
                    && words.iter().any(|word| record.statistics.contains_key(word))
            })
            .map(|(doc_id, _)| doc_id.clone())
            .collect();
        // Stable retrieval order; the orchestrator re-sorts by score anyway.
        candidates.sort_unstable();
        Ok(candidates)
    }

    async fn document_count(&self) -> Result<u64> {
        Ok(self.documents.read().len() as u64)
    }

    async fn document_frequencies(&self) -> Result<AHashMap<String, u64>> {
        let documents = self.documents.read();
        let mut frequencies = AHashMap::new();
        for record in documents.values() {
            for word in record.statistics.keys() {
                *frequencies.entry(word.clone()).or_insert(0u64) += 1;
            }
        }
        Ok(frequencies)
    }

    async fn all_statistics(&self) -> Result<Vec<WordStatistic>> {
        let documents = self.documents.read();
        Ok(documents
            .values()
            .flat_map(|record| record.statistics.values().cloned())
            .collect())
    }

    async fn bulk_update_tf_idf(&self, updates: Vec<TfIdfUpdate>) -> Result<u64> {
        let mut documents = self.documents.write();

        // Validate the whole batch before touching any row so that a
        // failure leaves no partial state behind.
        for update in &updates {
            let known = documents
                .get(&update.doc_id)
                .map(|record| record.statistics.contains_key(&update.word))
                .unwrap_or(false);
            if !known {
                return Err(DocrankError::data_access(format!(
                    "no statistic row for document '{}' word '{}'",
                    update.doc_id, update.word
                )));
            }
        }

        let mut updated = 0u64;
        for update in updates {
            if let Some(record) = documents.get_mut(&update.doc_id) {
                if let Some(stat) = record.statistics.get_mut(&update.word) {
                    stat.tf_idf = update.tf_idf;
                    updated += 1;
                }
            }
        }
        Ok(updated)
    }
}
