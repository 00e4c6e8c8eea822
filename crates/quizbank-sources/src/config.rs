//! quizbank configuration and source factory.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use quizbank_core::traits::QuestionSource;

use crate::file::FileSource;
use crate::http::HttpSource;

/// Top-level quizbank configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizbankConfig {
    /// Directory holding `.csv` question banks.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// When set, banks are fetched from `<base_url>/data/<name>` instead of disk.
    #[serde(default)]
    pub base_url: Option<String>,
    /// Explicit bank list; empty means scan `data_dir`.
    #[serde(default)]
    pub banks: Vec<String>,
    /// Default question limit per exam (None = whole bank).
    #[serde(default)]
    pub default_max_questions: Option<usize>,
    /// Output directory for exam reports.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// HTTP request timeout in seconds.
    #[serde(default = "default_http_timeout")]
    pub http_timeout_secs: u64,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./data")
}
fn default_output_dir() -> PathBuf {
    PathBuf::from("./quizbank-results")
}
fn default_http_timeout() -> u64 {
    30
}

impl Default for QuizbankConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            base_url: None,
            banks: Vec::new(),
            default_max_questions: None,
            output_dir: default_output_dir(),
            http_timeout_secs: default_http_timeout(),
        }
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
fn resolve_env_vars(s: &str) -> String {
    let mut result = s.to_string();
    while let Some(start) = result.find("${") {
        if let Some(end) = result[start..].find('}') {
            let var_name = &result[start + 2..start + end];
            let value = std::env::var(var_name).unwrap_or_default();
            result = format!(
                "{}{}{}",
                &result[..start],
                value,
                &result[start + end + 1..]
            );
        } else {
            break;
        }
    }
    result
}

fn resolve_path(path: &Path) -> PathBuf {
    PathBuf::from(resolve_env_vars(&path.to_string_lossy()))
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `quizbank.toml` in the current directory
/// 2. `~/.config/quizbank/config.toml`
///
/// Environment variable overrides: `QUIZBANK_DATA_DIR`, `QUIZBANK_BASE_URL`.
pub fn load_config() -> Result<QuizbankConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<QuizbankConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("quizbank.toml");
        if local.exists() {
            Some(local)
        } else if let Some(home) = dirs_path() {
            let global = home.join("config.toml");
            if global.exists() {
                Some(global)
            } else {
                None
            }
        } else {
            None
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            let config = toml::from_str::<QuizbankConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?;
            tracing::debug!(path = %path.display(), "loaded config");
            config
        }
        None => QuizbankConfig::default(),
    };

    if let Ok(dir) = std::env::var("QUIZBANK_DATA_DIR") {
        config.data_dir = PathBuf::from(dir);
    }
    if let Ok(url) = std::env::var("QUIZBANK_BASE_URL") {
        config.base_url = Some(url);
    }

    config.data_dir = resolve_path(&config.data_dir);
    config.output_dir = resolve_path(&config.output_dir);
    config.base_url = config
        .base_url
        .as_deref()
        .map(resolve_env_vars)
        .filter(|u| !u.is_empty());

    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("quizbank"))
}

/// Create the source matching the configuration: HTTP when a base URL is
/// set, the local filesystem otherwise.
pub fn create_source(config: &QuizbankConfig) -> Result<Box<dyn QuestionSource>> {
    match &config.base_url {
        Some(base_url) => {
            let source = HttpSource::with_timeout(
                Some(base_url.clone()),
                Duration::from_secs(config.http_timeout_secs),
            )?;
            Ok(Box::new(source))
        }
        None => Ok(Box::new(FileSource::new())),
    }
}
