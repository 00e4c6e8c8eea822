//! Local file question bank source.

use std::io::ErrorKind;

use async_trait::async_trait;
use tracing::instrument;

use quizbank_core::error::LoadError;
use quizbank_core::traits::QuestionSource;

/// Reads banks from the local filesystem; locators are paths.
#[derive(Debug, Clone, Default)]
pub struct FileSource;

impl FileSource {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl QuestionSource for FileSource {
    fn name(&self) -> &str {
        "file"
    }

    #[instrument(skip(self))]
    async fn fetch(&self, locator: &str) -> Result<String, LoadError> {
        match tokio::fs::read_to_string(locator).await {
            Ok(text) => {
                tracing::debug!(bytes = text.len(), "read question bank");
                Ok(text)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                Err(LoadError::NotFound(locator.to_string()))
            }
            Err(source) => Err(LoadError::Io {
                locator: locator.to_string(),
                source,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn reads_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bank.csv");
        std::fs::write(&path, "Question\n").unwrap();

        let text = FileSource::new()
            .fetch(path.to_str().unwrap())
            .await
            .unwrap();
        assert_eq!(text, "Question\n");
    }

    #[tokio::test]
    async fn missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.csv");
        let err = FileSource::new()
            .fetch(path.to_str().unwrap())
            .await
            .unwrap_err();
        assert!(matches!(err, LoadError::NotFound(_)));
        assert!(err.is_permanent());
    }

    #[tokio::test]
    async fn invalid_utf8_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("binary.csv");
        std::fs::write(&path, [0xff, 0xfe, 0xfd]).unwrap();
        let err = FileSource::new()
            .fetch(path.to_str().unwrap())
            .await
            .unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }
}
