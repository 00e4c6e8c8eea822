//! The `quizbank validate` command.

use std::path::PathBuf;

use anyhow::Result;

use quizbank_core::parser::validate_questions;

pub async fn execute(bank: String, config_path: Option<PathBuf>) -> Result<()> {
    let config = super::load_config(config_path)?;
    let loaded = super::load_bank(&bank, &config).await?;

    println!(
        "Question bank: {} ({} questions)",
        loaded.name,
        loaded.questions.len()
    );

    let warnings = validate_questions(&loaded.questions);
    for w in &warnings {
        let prefix = w
            .question
            .map(|n| format!("  [question {n}]"))
            .unwrap_or_else(|| "  ".to_string());
        println!("{prefix} WARNING: {}", w.message);
    }

    if warnings.is_empty() {
        println!("Question bank valid.");
    } else {
        println!("\n{} warning(s) found.", warnings.len());
    }

    Ok(())
}
