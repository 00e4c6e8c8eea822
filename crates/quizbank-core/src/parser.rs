//! CSV question bank parser.
//!
//! Turns raw CSV text into validated [`Question`] records and checks parsed
//! banks for common authoring mistakes.

use std::collections::{HashMap, HashSet};

use crate::error::{FormatError, QuizbankError};
use crate::model::{OptionIndex, Question, OPTION_COUNT};
use crate::traits::QuestionSource;

pub const COLUMN_QUESTION: &str = "Question";
pub const COLUMN_TOPIC: &str = "Topic";
pub const COLUMN_SUBTOPIC: &str = "Subtopic";
pub const COLUMN_CORRECT_ANSWER: &str = "Correct Answer";
pub const OPTION_COLUMNS: [&str; OPTION_COUNT] = ["Option 1", "Option 2", "Option 3", "Option 4"];

/// Columns every bank header must contain, in the order they are reported.
pub const REQUIRED_COLUMNS: [&str; 6] = [
    COLUMN_QUESTION,
    "Option 1",
    "Option 2",
    "Option 3",
    "Option 4",
    COLUMN_CORRECT_ANSWER,
];

/// Header positions of every column the row mapper reads.
struct ColumnLayout {
    question: usize,
    topic: Option<usize>,
    subtopic: Option<usize>,
    options: [usize; OPTION_COUNT],
    correct_answer: usize,
}

impl ColumnLayout {
    fn resolve(header_line: &str) -> Result<Self, FormatError> {
        let mut positions: HashMap<String, usize> = HashMap::new();
        let mut found: Vec<String> = Vec::new();
        for (index, raw) in split_fields(header_line).into_iter().enumerate() {
            let name = raw.trim().to_string();
            if !positions.contains_key(&name) {
                found.push(name.clone());
            }
            // Last occurrence of a repeated column name wins.
            positions.insert(name, index);
        }

        let missing: Vec<String> = REQUIRED_COLUMNS
            .iter()
            .filter(|&&name| !positions.contains_key(name))
            .map(|name| name.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(FormatError::MissingColumns { missing, found });
        }

        let required = |name: &str| positions[name];
        Ok(Self {
            question: required(COLUMN_QUESTION),
            topic: positions.get(COLUMN_TOPIC).copied(),
            subtopic: positions.get(COLUMN_SUBTOPIC).copied(),
            options: OPTION_COLUMNS.map(|name| required(name)),
            correct_answer: required(COLUMN_CORRECT_ANSWER),
        })
    }

    fn to_question(&self, values: &[String]) -> Question {
        let cell = |position: Option<usize>| -> String {
            position
                .and_then(|p| values.get(p))
                .cloned()
                .unwrap_or_default()
        };

        let text = cell(Some(self.question));
        let raw_answer = cell(Some(self.correct_answer));
        let correct_answer = match parse_leading_integer(&raw_answer) {
            Some(value) => {
                let index = OptionIndex::new(value);
                if index.is_none() {
                    tracing::warn!(
                        question = %text,
                        value,
                        "invalid correct answer, must be 1-4; question will be unscorable"
                    );
                }
                index
            }
            None => None,
        };

        Question {
            topic: cell(self.topic),
            subtopic: cell(self.subtopic),
            options: self.options.map(|p| cell(Some(p))),
            correct_answer,
            text,
        }
    }
}

/// Parse CSV text into questions, preserving row order.
///
/// Fails only when the header lacks a required column or there are no data
/// rows. Malformed cells fall back to empty strings, and an unusable
/// `Correct Answer` leaves the question unscorable.
pub fn parse_questions(text: &str) -> Result<Vec<Question>, FormatError> {
    let text = text.trim_start_matches('\u{feff}').trim();

    // One record per line; quote state never carries across a line break.
    let records: Vec<&str> = text
        .lines()
        .filter(|record| !record.trim().is_empty())
        .collect();

    let Some((header, rows)) = records.split_first() else {
        return Err(FormatError::NoDataRows);
    };
    if rows.is_empty() {
        return Err(FormatError::NoDataRows);
    }

    let layout = ColumnLayout::resolve(header)?;

    Ok(rows
        .iter()
        .map(|row| layout.to_question(&split_fields(row.trim())))
        .collect())
}

/// Fetch a bank through `source` and parse it.
pub async fn load_questions(
    source: &dyn QuestionSource,
    locator: &str,
) -> Result<Vec<Question>, QuizbankError> {
    let text = source.fetch(locator).await?;
    let questions = parse_questions(&text)?;
    tracing::debug!(locator, count = questions.len(), "loaded question bank");
    Ok(questions)
}

/// Split one CSV record into fields.
///
/// A doubled quote inside a quoted field is a literal quote; commas inside
/// quotes are literal. An unterminated quote runs to the end of the record.
pub fn split_fields(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' => {
                if in_quotes && chars.peek() == Some(&'"') {
                    current.push('"');
                    chars.next();
                } else {
                    in_quotes = !in_quotes;
                }
            }
            ',' if !in_quotes => fields.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }

    fields.push(current);
    fields
}

/// Read a leading integer: optional whitespace, optional sign, then digits.
/// Trailing text after the digits is ignored.
fn parse_leading_integer(cell: &str) -> Option<i64> {
    let s = cell.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    // Digit runs too long for i64 are far outside 1..=4 anyway.
    let magnitude: i64 = digits[..end].parse().unwrap_or(i64::MAX);
    Some(if negative { -magnitude } else { magnitude })
}

/// A warning from question bank validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// 1-based question number (if applicable).
    pub question: Option<usize>,
    /// Warning message.
    pub message: String,
}

/// Validate parsed questions for common issues.
pub fn validate_questions(questions: &[Question]) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    let mut seen_text = HashSet::new();
    for (i, q) in questions.iter().enumerate() {
        let number = Some(i + 1);

        if q.text.trim().is_empty() {
            warnings.push(ValidationWarning {
                question: number,
                message: "question text is empty".into(),
            });
        } else if !seen_text.insert(q.text.as_str()) {
            warnings.push(ValidationWarning {
                question: number,
                message: format!("duplicate question: {}", q.text),
            });
        }

        if !q.is_scorable() {
            warnings.push(ValidationWarning {
                question: number,
                message: "no valid correct answer (1-4); question can never be scored correct"
                    .into(),
            });
        }

        let empty: Vec<String> = q
            .options()
            .filter(|(_, text)| text.trim().is_empty())
            .map(|(index, _)| index.to_string())
            .collect();
        if !empty.is_empty() {
            warnings.push(ValidationWarning {
                question: number,
                message: format!("empty option(s): {}", empty.join(", ")),
            });
        }
    }

    warnings
}
