//! Search orchestration: lemmatize, retrieve candidates, score, sort,
//! paginate.

pub mod filter;
pub mod request;

use std::cmp::Ordering as CmpOrdering;
use std::sync::Arc;
use std::time::Duration;

use ahash::AHashSet;
use futures::StreamExt;
use futures::stream;
use log::debug;
use serde::{Deserialize, Serialize};
use tokio::time::timeout;

use crate::data::SearchHit;
use crate::error::{DocrankError, Result};
use crate::lemma::Lemmatizer;
use crate::relevance;
use crate::store::WordStatisticsStore;

use self::filter::StructuralFilters;
use self::request::SearchRequest;

/// Configuration for [`SearchOrchestrator`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Upper bound on candidates scored concurrently. Scoring has no
    /// cross-candidate dependency, so the bound only caps store fan-out.
    pub scoring_concurrency: usize,

    /// Deadline for the lemmatizer call.
    pub lemmatizer_timeout_secs: u64,

    /// Deadline for each store call.
    pub store_timeout_secs: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            scoring_concurrency: num_cpus::get(),
            lemmatizer_timeout_secs: 5,
            store_timeout_secs: 30,
        }
    }
}

/// Turns a raw query plus structural filters into a ranked, paginated list
/// of `(document, relevanceScore)` results.
///
/// Collaborators are passed in explicitly at construction; the orchestrator
/// reads no ambient global configuration.
pub struct SearchOrchestrator {
    store: Arc<dyn WordStatisticsStore>,
    lemmatizer: Arc<dyn Lemmatizer>,
    config: SearchConfig,
}

impl SearchOrchestrator {
    pub fn new(store: Arc<dyn WordStatisticsStore>, lemmatizer: Arc<dyn Lemmatizer>) -> Self {
        Self::with_config(store, lemmatizer, SearchConfig::default())
    }

    pub fn with_config(
        store: Arc<dyn WordStatisticsStore>,
        lemmatizer: Arc<dyn Lemmatizer>,
        config: SearchConfig,
    ) -> Self {
        let config = SearchConfig {
            scoring_concurrency: config.scoring_concurrency.max(1),
            ..config
        };
        Self {
            store,
            lemmatizer,
            config,
        }
    }

    /// Execute a search for a raw query string.
    ///
    /// The query is lemmatized first; if the lemmatizer fails or times out
    /// the search fails rather than scoring unnormalized text. A query that
    /// lemmatizes to nothing returns an empty result set.
    pub async fn search(&self, request: &SearchRequest) -> Result<Vec<SearchHit>> {
        let deadline = Duration::from_secs(self.config.lemmatizer_timeout_secs);
        let terms = match timeout(deadline, self.lemmatizer.lemmatize(&request.query)).await {
            Ok(terms) => terms?,
            Err(_) => {
                return Err(DocrankError::timeout(format!(
                    "lemmatizer call exceeded {}s",
                    deadline.as_secs()
                )));
            }
        };
        self.search_terms(terms, &request.filters, request.limit, request.offset)
            .await
    }

    /// Execute a search for already-lemmatized terms.
    ///
    /// Duplicate terms count once. Results are ordered by score descending
    /// with document id ascending as tie-break, and `offset`/`limit` are
    /// applied after sorting. No candidates is a successful empty result.
    pub async fn search_terms(
        &self,
        terms: Vec<String>,
        filters: &StructuralFilters,
        limit: usize,
        offset: usize,
    ) -> Result<Vec<SearchHit>> {
        let query_terms: AHashSet<String> =
            terms.into_iter().filter(|term| !term.is_empty()).collect();
        if query_terms.is_empty() {
            return Ok(Vec::new());
        }

        let store_deadline = Duration::from_secs(self.config.store_timeout_secs);
        let candidates = self
            .store_call(
                store_deadline,
                self.store.candidate_documents(&query_terms, filters),
            )
            .await?;
        debug!(
            "search retrieved {} candidates for {} query terms",
            candidates.len(),
            query_terms.len()
        );
        if candidates.is_empty() {
            return Ok(Vec::new());
        }

        // Score candidates concurrently under the configured bound. Any
        // failure fails the whole request; a truncated or mis-sorted list
        // must never be returned.
        let query_terms = Arc::new(query_terms);
        let mut hits = stream::iter(candidates)
            .map(|doc_id| {
                let query_terms = query_terms.clone();
                async move {
                    let statistics = self
                        .store_call(store_deadline, self.store.statistics_for(&doc_id))
                        .await?;
                    let score = relevance::score(&statistics, &query_terms);
                    Ok::<SearchHit, DocrankError>(SearchHit { doc_id, score })
                }
            })
            .buffer_unordered(self.config.scoring_concurrency)
            .collect::<Vec<Result<SearchHit>>>()
            .await
            .into_iter()
            .collect::<Result<Vec<SearchHit>>>()?;

        hits.sort_by(compare_hits);
        Ok(hits.into_iter().skip(offset).take(limit).collect())
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

/// Total order over hits: score descending, then document id ascending.
fn compare_hits(a: &SearchHit, b: &SearchHit) -> CmpOrdering {
    b.score
        .total_cmp(&a.score)
        .then_with(|| a.doc_id.cmp(&b.doc_id))
}
