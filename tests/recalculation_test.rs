use std::sync::Arc;

use ahash::{AHashMap, AHashSet};
use async_trait::async_trait;

use docrank::{
    DocrankError, DocumentMetadata, MemoryWordStatisticsStore, Result, StructuralFilters,
    TfIdfRecalculator, TfIdfUpdate, WordStatistic, WordStatisticsStore,
};

fn stat(doc_id: &str, word: &str, term_frequency: f64) -> WordStatistic {
    WordStatistic::new(doc_id, word, 1, term_frequency)
}

/// N = 10 documents; "shared" appears in 2 of them, every document also
/// carries a unique filler word.
fn ten_document_store() -> Arc<MemoryWordStatisticsStore> {
    let store = Arc::new(MemoryWordStatisticsStore::new());
    for i in 0..10 {
        let doc_id = format!("doc{i}");
        let mut stats = vec![stat(&doc_id, &format!("filler{i}"), 0.1)];
        if i == 0 {
            stats.push(stat(&doc_id, "shared", 0.5));
        }
        if i == 1 {
            stats.push(stat(&doc_id, "shared", 0.2));
        }
        store
            .put_document(&doc_id, DocumentMetadata::new(), stats)
            .unwrap();
    }
    store
}

#[tokio::test]
async fn recalculation_matches_hand_computed_weights() -> docrank::Result<()> {
    let store = ten_document_store();
    let recalculator = TfIdfRecalculator::new(store.clone());

    let updated = recalculator.recalculate_all().await?;
    assert_eq!(updated, 12); // 10 filler rows + 2 shared rows

    // shared: tf_idf = 0.5 * log10(10 / 2) ≈ 0.349
    let stats = store.statistics_for("doc0").await?;
    let shared = stats.iter().find(|s| s.word == "shared").unwrap();
    let expected = 0.5 * (10.0f64 / 2.0).log10();
    assert!((shared.tf_idf - expected).abs() < 1e-9);
    assert!((shared.tf_idf - 0.349).abs() < 1e-3);

    // filler words appear in exactly one document: idf = log10(10) = 1
    let filler = stats.iter().find(|s| s.word == "filler0").unwrap();
    assert!((filler.tf_idf - 0.1).abs() < 1e-9);
    Ok(())
}

#[tokio::test]
async fn recalculation_is_idempotent() -> docrank::Result<()> {
    let store = ten_document_store();
    let recalculator = TfIdfRecalculator::new(store.clone());

    recalculator.recalculate_all().await?;
    let mut first = store.all_statistics().await?;
    recalculator.recalculate_all().await?;
    let mut second = store.all_statistics().await?;

    let key = |s: &WordStatistic| (s.doc_id.clone(), s.word.clone());
    first.sort_by_key(key);
    second.sort_by_key(key);
    assert_eq!(first, second);
    Ok(())
}

#[tokio::test]
async fn empty_corpus_is_a_noop() -> docrank::Result<()> {
    let store = Arc::new(MemoryWordStatisticsStore::new());
    let recalculator = TfIdfRecalculator::new(store);
    assert_eq!(recalculator.recalculate_all().await?, 0);
    Ok(())
}

/// Store wrapper whose bulk update always fails, for exercising the
/// all-or-nothing failure path.
struct WriteFailingStore {
    inner: Arc<MemoryWordStatisticsStore>,
}

#[async_trait]
impl WordStatisticsStore for WriteFailingStore {
    async fn statistics_for(&self, doc_id: &str) -> Result<Vec<WordStatistic>> {
        self.inner.statistics_for(doc_id).await
    }

    async fn candidate_documents(
        &self,
        words: &AHashSet<String>,
        filters: &StructuralFilters,
    ) -> Result<Vec<String>> {
        self.inner.candidate_documents(words, filters).await
    }

    async fn document_count(&self) -> Result<u64> {
        self.inner.document_count().await
    }

    async fn document_frequencies(&self) -> Result<AHashMap<String, u64>> {
        self.inner.document_frequencies().await
    }

    async fn all_statistics(&self) -> Result<Vec<WordStatistic>> {
        self.inner.all_statistics().await
    }

    async fn bulk_update_tf_idf(&self, _updates: Vec<TfIdfUpdate>) -> Result<u64> {
        Err(DocrankError::data_access("write channel down"))
    }
}

#[tokio::test]
async fn failed_update_leaves_no_partial_state() {
    let inner = ten_document_store();
    let store = Arc::new(WriteFailingStore {
        inner: inner.clone(),
    });
    let recalculator = TfIdfRecalculator::new(store);

    let result = recalculator.recalculate_all().await;
    assert!(matches!(result, Err(DocrankError::DataAccess(_))));

    // Every weight must still be at its pre-recalculation value.
    for stat in inner.all_statistics().await.unwrap() {
        assert_eq!(stat.tf_idf, 0.0, "row {}:{} was mutated", stat.doc_id, stat.word);
    }
}
