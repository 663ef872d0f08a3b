//! Search request types.

use serde::{Deserialize, Serialize};

use crate::search::filter::StructuralFilters;

/// A search request: raw query text plus structural constraints and
/// pagination.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchRequest {
    /// Raw query text, typically comma-separated words. Lemmatized by the
    /// orchestrator before scoring.
    pub query: String,

    /// Structural filters, AND-combined with the keyword match.
    pub filters: StructuralFilters,

    /// Maximum number of results to return.
    pub limit: usize,

    /// Number of results to skip before returning (for pagination).
    /// Applied after sorting, so pages are stable across requests with
    /// identical parameters.
    pub offset: usize,
}

impl Default for SearchRequest {
    fn default() -> Self {
        SearchRequest {
            query: String::new(),
            filters: StructuralFilters::default(),
            limit: 10,
            offset: 0,
        }
    }
}

impl SearchRequest {
    pub fn builder() -> SearchRequestBuilder {
        SearchRequestBuilder::new()
    }
}

pub struct SearchRequestBuilder {
    request: SearchRequest,
}

impl Default for SearchRequestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchRequestBuilder {
    pub fn new() -> Self {
        Self {
            request: SearchRequest::default(),
        }
    }

    pub fn query(mut self, query: impl Into<String>) -> Self {
        self.request.query = query.into();
        self
    }

    pub fn filters(mut self, filters: StructuralFilters) -> Self {
        self.request.filters = filters;
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.request.limit = limit;
        self
    }

    pub fn offset(mut self, offset: usize) -> Self {
        self.request.offset = offset;
        self
    }

    pub fn build(self) -> SearchRequest {
        self.request
    }
}
