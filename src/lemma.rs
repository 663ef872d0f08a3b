//! Lemmatizer contract.
//!
//! Lemmatization is delegated to an external service: the orchestrator
//! treats it as a remote call with a deadline and fails the search if it
//! fails, rather than scoring against unnormalized text.

use async_trait::async_trait;
use unicode_normalization::UnicodeNormalization;
use unicode_segmentation::UnicodeSegmentation;

use crate::error::Result;

/// Normalizes raw query text into canonical word forms.
#[async_trait]
pub trait Lemmatizer: Send + Sync {
    /// Turn raw text (typically a comma-separated word list) into a
    /// sequence of normalized terms. An empty sequence is a valid outcome
    /// for blank input.
    async fn lemmatize(&self, raw_text: &str) -> Result<Vec<String>>;
}

/// Language-agnostic fallback lemmatizer.
///
/// Splits on Unicode word boundaries, NFKC-normalizes and lowercases each
/// token. It performs no dictionary lookup, so it only folds case and
/// compatibility forms; corpora needing real lemmatization should wire in
/// a client for the external service instead.
#[derive(Debug, Clone, Default)]
pub struct SimpleLemmatizer;

impl SimpleLemmatizer {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Lemmatizer for SimpleLemmatizer {
    async fn lemmatize(&self, raw_text: &str) -> Result<Vec<String>> {
        Ok(raw_text
            .unicode_words()
            .map(|word| word.nfkc().collect::<String>().to_lowercase())
            .filter(|word| !word.is_empty())
            .collect())
    }
}
