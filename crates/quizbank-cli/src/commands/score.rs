//! The `quizbank score` command.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use quizbank_core::model::AnswerMap;
use quizbank_core::scoring::score_exam;

pub async fn execute(
    bank: String,
    answers_path: PathBuf,
    format: String,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = super::load_config(config_path)?;
    let loaded = super::load_bank(&bank, &config).await?;
    let answers = read_answers(&answers_path, loaded.questions.len())?;

    let score = score_exam(&loaded.questions, &answers);

    match format.as_str() {
        "json" => {
            println!("{}", serde_json::to_string_pretty(&score)?);
        }
        _ => {
            println!(
                "Question bank: {} ({} questions, {} answered)",
                loaded.name,
                loaded.questions.len(),
                answers.len()
            );
            println!();
            super::print_summary(&score);
        }
    }

    Ok(())
}

/// Read a JSON object of `"position": option` pairs, dropping entries that
/// do not name a real question or a valid option.
fn read_answers(path: &Path, question_count: usize) -> Result<AnswerMap> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read answers from {}", path.display()))?;
    let raw: BTreeMap<String, i64> =
        serde_json::from_str(&content).context("answers must be a JSON object of position: option")?;

    let pairs = raw
        .into_iter()
        .map(|(key, option)| {
            key.trim()
                .parse::<i64>()
                .map(|position| (position, option))
                .with_context(|| format!("answer key is not a question position: '{key}'"))
        })
        .collect::<Result<Vec<_>>>()?;

    let (answers, rejected) = AnswerMap::from_raw(pairs, question_count);
    for (position, option) in rejected {
        tracing::warn!(position, option, "ignoring out-of-range answer");
    }
    Ok(answers)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_and_filters_answers() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("answers.json");
        std::fs::write(&path, r#"{"0": 1, "1": 9, "2": 4, "10": 2}"#).unwrap();

        let answers = read_answers(&path, 3).unwrap();
        assert_eq!(answers.len(), 2);
        assert!(answers.is_answered(0));
        assert!(!answers.is_answered(1));
        assert!(answers.is_answered(2));
    }

    #[test]
    fn rejects_non_numeric_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("answers.json");
        std::fs::write(&path, r#"{"first": 1}"#).unwrap();
        assert!(read_answers(&path, 3).is_err());
    }
}
