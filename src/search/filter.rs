//! Structural (non-text) search constraints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::data::DocumentMetadata;

/// Structural filters applied during candidate retrieval.
///
/// A closed, typed structure rather than a dynamic predicate bag: every
/// field is independently optional, absent fields impose no restriction,
/// and all present fields are combined with logical AND. There is no
/// invalid combination by construction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StructuralFilters {
    /// Exact match on the document's source id.
    #[serde(default)]
    pub source_id: Option<String>,

    /// Exact match on the document's author.
    #[serde(default)]
    pub author: Option<String>,

    /// Exact match on the document's category id.
    #[serde(default)]
    pub category_id: Option<String>,

    /// Only documents published at or before this instant.
    #[serde(default)]
    pub before: Option<DateTime<Utc>>,

    /// Only documents published at or after this instant.
    #[serde(default)]
    pub after: Option<DateTime<Utc>>,
}

impl StructuralFilters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_source_id(mut self, source_id: impl Into<String>) -> Self {
        self.source_id = Some(source_id.into());
        self
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    pub fn with_category_id(mut self, category_id: impl Into<String>) -> Self {
        self.category_id = Some(category_id.into());
        self
    }

    pub fn with_before(mut self, before: DateTime<Utc>) -> Self {
        self.before = Some(before);
        self
    }

    pub fn with_after(mut self, after: DateTime<Utc>) -> Self {
        self.after = Some(after);
        self
    }

    /// True when no filter is set, i.e. every document passes.
    pub fn is_empty(&self) -> bool {
        self.source_id.is_none()
            && self.author.is_none()
            && self.category_id.is_none()
            && self.before.is_none()
            && self.after.is_none()
    }

    /// Evaluate all present filters against a document's metadata.
    ///
    /// A document missing the attribute a filter targets does not match:
    /// a document with no recorded author cannot satisfy an author filter,
    /// and the date bounds require `published_at` to be present.
    pub fn matches(&self, metadata: &DocumentMetadata) -> bool {
        if let Some(source_id) = &self.source_id {
            if metadata.source_id.as_ref() != Some(source_id) {
                return false;
            }
        }
        if let Some(author) = &self.author {
            if metadata.author.as_ref() != Some(author) {
                return false;
            }
        }
        if let Some(category_id) = &self.category_id {
            if metadata.category_id.as_ref() != Some(category_id) {
                return false;
            }
        }
        if let Some(before) = &self.before {
            match metadata.published_at {
                Some(published_at) if published_at <= *before => {}
                _ => return false,
            }
        }
        if let Some(after) = &self.after {
            match metadata.published_at {
                Some(published_at) if published_at >= *after => {}
                _ => return false,
            }
        }
        true
    }
}
