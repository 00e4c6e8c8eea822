//! Core trait definitions for question bank sources.
//!
//! The trait is implemented by the `quizbank-sources` crate for local files
//! and HTTP, and here by [`InMemorySource`] for tests and embedded banks.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::error::LoadError;

/// Something that can hand back the raw text of a question bank.
///
/// A locator is whatever the source understands: a path, a URL, or a key.
/// Fetching is the only step of loading a bank that may suspend.
#[async_trait]
pub trait QuestionSource: Send + Sync {
    /// Human-readable source name (e.g. "file").
    fn name(&self) -> &str;

    /// Retrieve the raw CSV text for `locator`.
    async fn fetch(&self, locator: &str) -> Result<String, LoadError>;
}

/// A source backed by a fixed set of in-memory banks.
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    banks: HashMap<String, String>,
}

impl InMemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_bank(mut self, locator: impl Into<String>, text: impl Into<String>) -> Self {
        self.banks.insert(locator.into(), text.into());
        self
    }
}

#[async_trait]
impl QuestionSource for InMemorySource {
    fn name(&self) -> &str {
        "memory"
    }

    async fn fetch(&self, locator: &str) -> Result<String, LoadError> {
        self.banks
            .get(locator)
            .cloned()
            .ok_or_else(|| LoadError::NotFound(locator.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{FormatError, QuizbankError};
    use crate::parser::load_questions;

    const BANK: &str = "Question,Option 1,Option 2,Option 3,Option 4,Correct Answer\nQ,a,b,c,d,2\n";

    #[tokio::test]
    async fn in_memory_fetch() {
        let source = InMemorySource::new().with_bank("math.csv", BANK);
        assert_eq!(source.fetch("math.csv").await.unwrap(), BANK);
        assert!(matches!(
            source.fetch("other.csv").await,
            Err(LoadError::NotFound(name)) if name == "other.csv"
        ));
    }

    #[tokio::test]
    async fn load_questions_through_source() {
        let source = InMemorySource::new()
            .with_bank("math.csv", BANK)
            .with_bank("broken.csv", "Question\nQ");

        let questions = load_questions(&source, "math.csv").await.unwrap();
        assert_eq!(questions.len(), 1);

        let err = load_questions(&source, "broken.csv").await.unwrap_err();
        assert!(matches!(
            err,
            QuizbankError::Format(FormatError::MissingColumns { .. })
        ));

        let err = load_questions(&source, "missing.csv").await.unwrap_err();
        assert!(matches!(err, QuizbankError::Load(LoadError::NotFound(_))));
    }
}
