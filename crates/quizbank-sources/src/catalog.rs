//! The list of question banks a learner can pick from.

use std::path::Path;

use anyhow::{Context, Result};

use quizbank_core::error::LoadError;

use crate::config::QuizbankConfig;

/// Available bank names and how to turn one into a source locator.
#[derive(Debug, Clone)]
pub struct BankCatalog {
    banks: Vec<String>,
    data_dir: String,
    base_url: Option<String>,
}

impl BankCatalog {
    /// Build the catalog from configuration.
    ///
    /// An explicit `banks` list wins. Otherwise a local data directory is
    /// scanned for `.csv` files; a remote catalog without a list is empty.
    pub fn from_config(config: &QuizbankConfig) -> Result<Self> {
        let banks = if !config.banks.is_empty() {
            config.banks.clone()
        } else if config.base_url.is_none() {
            scan_data_dir(&config.data_dir)?
        } else {
            Vec::new()
        };

        Ok(Self {
            banks,
            data_dir: config.data_dir.to_string_lossy().into_owned(),
            base_url: config
                .base_url
                .as_ref()
                .map(|u| u.trim_end_matches('/').to_string()),
        })
    }

    /// Bank names in display order.
    pub fn banks(&self) -> &[String] {
        &self.banks
    }

    pub fn contains(&self, name: &str) -> bool {
        self.banks.iter().any(|b| b == name)
    }

    /// Locator for a bank: `<base_url>/data/<name>` or `<data_dir>/<name>`.
    pub fn locate(&self, name: &str) -> Result<String, LoadError> {
        if !self.contains(name) {
            return Err(LoadError::UnknownBank(name.to_string()));
        }
        Ok(match &self.base_url {
            Some(base) => format!("{base}/data/{name}"),
            None => Path::new(&self.data_dir)
                .join(name)
                .to_string_lossy()
                .into_owned(),
        })
    }
}

/// `.csv` file names directly inside `dir`, sorted. A missing directory
/// yields an empty list.
fn scan_data_dir(dir: &Path) -> Result<Vec<String>> {
    if !dir.is_dir() {
        tracing::debug!(dir = %dir.display(), "data directory not found");
        return Ok(Vec::new());
    }

    let mut banks = Vec::new();
    for entry in std::fs::read_dir(dir)
        .with_context(|| format!("failed to read data directory: {}", dir.display()))?
    {
        let path = entry?.path();
        let is_csv = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
        if path.is_file() && is_csv {
            if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                banks.push(name.to_string());
            }
        }
    }
    banks.sort();
    Ok(banks)
}
