//! Exam report types with JSON persistence.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::OptionIndex;
use crate::scoring::{CategoryScoreReport, ScoreReport};
use crate::session::ExamOutcome;

/// A complete record of one finished attempt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExamReport {
    /// Unique report identifier.
    pub id: Uuid,
    /// When the report was created.
    pub created_at: DateTime<Utc>,
    /// Name of the question bank the exam was drawn from.
    pub bank: String,
    /// Overall result.
    pub score: ScoreReport,
    /// Per-topic breakdown.
    pub categories: Vec<CategoryScoreReport>,
    /// Every question with the learner's choice.
    pub questions: Vec<QuestionReview>,
}

/// One question as reviewed after the exam.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionReview {
    pub number: usize,
    pub text: String,
    pub topic: String,
    #[serde(default)]
    pub subtopic: String,
    pub options: Vec<String>,
    pub correct_answer: Option<OptionIndex>,
    pub selected: Option<OptionIndex>,
    pub is_correct: bool,
}

impl ExamReport {
    /// Build a report from a finished session.
    pub fn from_outcome(bank: impl Into<String>, outcome: &ExamOutcome) -> Self {
        let questions = outcome
            .questions
            .iter()
            .enumerate()
            .map(|(i, q)| {
                let selected = outcome.answers.get(i);
                QuestionReview {
                    number: i + 1,
                    text: q.text.clone(),
                    topic: q.category().to_string(),
                    subtopic: q.subtopic.clone(),
                    options: q.options.to_vec(),
                    correct_answer: q.correct_answer,
                    selected,
                    is_correct: selected.is_some_and(|s| q.is_correct(s)),
                }
            })
            .collect();

        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            bank: bank.into(),
            score: outcome.score.overall,
            categories: outcome.score.categories.clone(),
            questions,
        }
    }

    /// Questions answered wrong or left unanswered.
    pub fn missed(&self) -> impl Iterator<Item = &QuestionReview> {
        self.questions.iter().filter(|q| !q.is_correct)
    }

    /// Save the report as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize report")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("failed to create report directory {}", parent.display())
            })?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        Ok(())
    }

    /// Load a report from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read report from {}", path.display()))?;
        let report: ExamReport =
            serde_json::from_str(&content).context("failed to parse report JSON")?;
        Ok(report)
    }
}
