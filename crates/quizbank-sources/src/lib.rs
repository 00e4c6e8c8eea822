//! quizbank-sources — Where question banks come from.
//!
//! Implements the `QuestionSource` trait for local files and HTTP, and
//! provides the bank catalog and the `quizbank.toml` configuration layer.

pub mod catalog;
pub mod config;
pub mod file;
pub mod http;

pub use catalog::BankCatalog;
pub use config::{create_source, load_config, load_config_from, QuizbankConfig};
pub use file::FileSource;
pub use http::HttpSource;
