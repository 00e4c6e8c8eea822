//! The `quizbank preface` command.

use std::path::PathBuf;

use anyhow::Result;

use quizbank_core::session::ExamPreface;

pub async fn execute(
    bank: String,
    max_questions: Option<String>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = super::load_config(config_path)?;
    let limit = super::question_limit(max_questions.as_deref(), &config)?;
    let loaded = super::load_bank(&bank, &config).await?;

    let count = match limit {
        Some(max) => max.min(loaded.questions.len()),
        None => loaded.questions.len(),
    };
    let preface = ExamPreface {
        question_count: count,
        ..ExamPreface::for_questions(&loaded.questions)
    };

    print_preface(&loaded.name, &preface);
    Ok(())
}

pub fn print_preface(bank: &str, preface: &ExamPreface) {
    println!("{bank}");
    println!(
        "You can take this Practice Exam as many times as you'd like. \
         We recommend retaking the exam until you score at least {}%.",
        preface.passing_percentage
    );
    println!();
    println!("Number of Questions: {}", preface.question_count);
    println!("Passing Grade: {}%", preface.passing_percentage);
    println!(
        "Time Allowed: {}",
        if preface.timed { "Timed" } else { "Not Timed" }
    );
}
