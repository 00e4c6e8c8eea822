pub mod init;
pub mod list;
pub mod preface;
pub mod score;
pub mod take;
pub mod validate;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use comfy_table::{Cell, Table};

use quizbank_core::model::Question;
use quizbank_core::parser::load_questions;
use quizbank_core::scoring::ExamScore;
use quizbank_core::session::parse_question_limit;
use quizbank_sources::{create_source, load_config_from, BankCatalog, FileSource, QuizbankConfig};

/// A bank loaded from the catalog or straight from disk.
pub struct LoadedBank {
    pub name: String,
    pub questions: Vec<Question>,
}

/// Resolve `bank` as an existing `.csv` path first, then as a catalog name.
pub async fn load_bank(bank: &str, config: &QuizbankConfig) -> Result<LoadedBank> {
    let path = Path::new(bank);
    let questions = if path.is_file() {
        load_questions(&FileSource::new(), bank).await
    } else {
        let catalog = BankCatalog::from_config(config)?;
        let locator = catalog.locate(bank)?;
        let source = create_source(config)?;
        load_questions(source.as_ref(), &locator).await
    }
    .with_context(|| format!("failed to load question bank '{bank}'"))?;

    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(bank)
        .to_string();
    Ok(LoadedBank { name, questions })
}

pub fn load_config(path: Option<PathBuf>) -> Result<QuizbankConfig> {
    load_config_from(path.as_deref())
}

/// The question limit from the flag, falling back to the config default.
pub fn question_limit(flag: Option<&str>, config: &QuizbankConfig) -> Result<Option<usize>> {
    match flag {
        Some(text) => parse_question_limit(text).map_err(|e| anyhow::anyhow!(e)),
        None => Ok(config.default_max_questions),
    }
}

/// Print the overall result and the per-topic table.
pub fn print_summary(score: &ExamScore) {
    let overall = &score.overall;
    println!("Your score: {}%", overall.percentage);
    if overall.passed {
        println!("You have passed the exam.");
    } else {
        println!("You have not passed the exam.");
    }
    println!(
        "Passing score: {}%",
        quizbank_core::scoring::PASSING_PERCENTAGE
    );
    println!("Correct: {}/{}", overall.correct, overall.total);
    println!("Incorrect: {}/{}", overall.incorrect, overall.total);

    if score.categories.is_empty() {
        return;
    }

    let mut table = Table::new();
    table.set_header(vec!["Topic", "Correct", "Incorrect", "Total", "Score"]);
    for category in &score.categories {
        table.add_row(vec![
            Cell::new(&category.topic),
            Cell::new(category.correct),
            Cell::new(category.incorrect),
            Cell::new(category.total),
            Cell::new(format!("{}%", category.percentage)),
        ]);
    }
    println!("\n{table}");
}
