//! The `quizbank list` command.

use std::path::PathBuf;

use anyhow::Result;

use quizbank_sources::BankCatalog;

pub fn execute(config_path: Option<PathBuf>) -> Result<()> {
    let config = super::load_config(config_path)?;
    let catalog = BankCatalog::from_config(&config)?;

    if catalog.banks().is_empty() {
        match &config.base_url {
            Some(url) => println!("No question banks configured for {url}."),
            None => println!(
                "No question banks found in {}.",
                config.data_dir.display()
            ),
        }
        println!("Run `quizbank init` to create a sample bank.");
        return Ok(());
    }

    println!("Available question banks:");
    for name in catalog.banks() {
        println!("  {name}");
    }

    Ok(())
}
