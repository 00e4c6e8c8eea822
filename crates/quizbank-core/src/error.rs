//! Error types for loading and parsing question banks.
//!
//! Defined in `quizbank-core` so that every source implementation and the
//! CLI classify failures the same way without string matching.

use thiserror::Error;

/// A question bank whose text could not be turned into questions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    /// The input had no header row, or a header with no data rows.
    #[error("question bank has no data rows (need a header and at least one question)")]
    NoDataRows,

    /// The header row lacks one or more required columns.
    #[error(
        "missing required CSV headers: {}. found headers: {}",
        missing.join(", "),
        found.join(", ")
    )]
    MissingColumns {
        missing: Vec<String>,
        found: Vec<String>,
    },
}

impl FormatError {
    /// Required column names absent from the header (empty for `NoDataRows`).
    pub fn missing_columns(&self) -> &[String] {
        match self {
            FormatError::MissingColumns { missing, .. } => missing,
            FormatError::NoDataRows => &[],
        }
    }
}

/// Errors raised while retrieving raw question bank text.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The locator does not point at an existing file.
    #[error("question bank not found: {0}")]
    NotFound(String),

    /// The bank name is not part of the configured catalog.
    #[error("unknown question bank: {0}")]
    UnknownBank(String),

    /// Local I/O failed.
    #[error("failed to read {locator}: {source}")]
    Io {
        locator: String,
        #[source]
        source: std::io::Error,
    },

    /// The server answered with a non-success status.
    #[error("failed to load {locator} (HTTP {status})")]
    Http { locator: String, status: u16 },

    /// A transport-level failure occurred.
    #[error("network error: {0}")]
    Network(String),
}

impl LoadError {
    /// Returns `true` if retrying the same locator cannot succeed.
    pub fn is_permanent(&self) -> bool {
        match self {
            LoadError::NotFound(_) | LoadError::UnknownBank(_) => true,
            LoadError::Http { status, .. } => (400..500).contains(status),
            LoadError::Io { .. } | LoadError::Network(_) => false,
        }
    }
}

/// Either half of a fetch-and-parse.
#[derive(Debug, Error)]
pub enum QuizbankError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Format(#[from] FormatError),
}
