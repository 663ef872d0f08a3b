//! Corpus-wide TF-IDF recomputation.
//!
//! Runs as an explicit maintenance action, not per request: the weights
//! depend on global corpus statistics that only move when documents are
//! added or removed.

use std::sync::Arc;
use std::time::Duration;

use log::{debug, info};
use serde::{Deserialize, Serialize};
use tokio::time::timeout;

use crate::data::TfIdfUpdate;
use crate::error::{DocrankError, Result};
use crate::store::WordStatisticsStore;

/// Configuration for [`TfIdfRecalculator`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecalcConfig {
    /// Deadline for each store call. On expiry the run fails with a
    /// retryable timeout error instead of hanging.
    pub store_timeout_secs: u64,
}

impl Default for RecalcConfig {
    fn default() -> Self {
        RecalcConfig {
            store_timeout_secs: 60,
        }
    }
}

/// Recomputes the TF-IDF weight of every (document, word) row from current
/// corpus statistics and persists the result in one store transaction.
///
/// For a corpus of `N` documents where word `w` occurs in `n(w)` of them,
/// each row gets `term_frequency * log10(N / n(w))`. The operation is
/// idempotent and safe to re-run; on any data-access failure the store
/// transaction rolls back and the error surfaces to the caller, with no
/// automatic retry.
pub struct TfIdfRecalculator {
    store: Arc<dyn WordStatisticsStore>,
    config: RecalcConfig,
}

impl TfIdfRecalculator {
    pub fn new(store: Arc<dyn WordStatisticsStore>) -> Self {
        Self::with_config(store, RecalcConfig::default())
    }

    pub fn with_config(store: Arc<dyn WordStatisticsStore>, config: RecalcConfig) -> Self {
        Self { store, config }
    }

    /// Recompute every row's weight and return the number of rows updated.
    ///
    /// An empty corpus is a successful no-op returning 0.
    pub async fn recalculate_all(&self) -> Result<u64> {
        let deadline = Duration::from_secs(self.config.store_timeout_secs);

        let document_count = self.store_call(deadline, self.store.document_count()).await?;
        if document_count == 0 {
            debug!("tf-idf recalculation skipped: empty corpus");
            return Ok(0);
        }

        let frequencies = self
            .store_call(deadline, self.store.document_frequencies())
            .await?;
        let statistics = self.store_call(deadline, self.store.all_statistics()).await?;

        let corpus_size = document_count as f64;
        let mut updates = Vec::with_capacity(statistics.len());
        for stat in statistics {
            // Every stored word occurs in at least one document, so a miss
            // here means the store's aggregates disagree with its rows.
            let document_frequency = frequencies.get(&stat.word).copied().ok_or_else(|| {
                DocrankError::data_access(format!(
                    "word '{}' has rows but no document frequency",
                    stat.word
                ))
            })?;
            let idf = (corpus_size / document_frequency as f64).log10();
            updates.push(TfIdfUpdate {
                doc_id: stat.doc_id,
                word: stat.word,
                tf_idf: stat.term_frequency * idf,
            });
        }

        let updated = self
            .store_call(deadline, self.store.bulk_update_tf_idf(updates))
            .await?;
        info!("tf-idf recalculation updated {updated} rows across {document_count} documents");
        Ok(updated)
    }

    async fn store_call<T>(
        &self,
        deadline: Duration,
        fut: impl Future<Output = Result<T>>,
    ) -> Result<T> {
        match timeout(deadline, fut).await {
            Ok(result) => result,
            Err(_) => Err(DocrankError::timeout(format!(
                "word-statistics store call exceeded {}s",
                deadline.as_secs()
            ))),
        }
    }
}
