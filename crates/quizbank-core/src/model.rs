//! Core data model types for quizbank.
//!
//! These are the types the parser produces and the session and scoring
//! layers consume: questions, validated option indices, and answer maps.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Label used for questions whose topic is empty.
pub const UNCATEGORIZED: &str = "Uncategorized";

/// Number of answer options every question carries.
pub const OPTION_COUNT: usize = 4;

/// A 1-based answer option position, always in `1..=4`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct OptionIndex(u8);

impl OptionIndex {
    pub const ALL: [OptionIndex; OPTION_COUNT] =
        [OptionIndex(1), OptionIndex(2), OptionIndex(3), OptionIndex(4)];

    /// Build an index from any integer, returning `None` outside `1..=4`.
    pub fn new(value: i64) -> Option<Self> {
        if (1..=OPTION_COUNT as i64).contains(&value) {
            Some(OptionIndex(value as u8))
        } else {
            None
        }
    }

    /// The 1-based value.
    pub fn get(self) -> u8 {
        self.0
    }

    /// The 0-based slot in `Question::options`.
    pub fn slot(self) -> usize {
        usize::from(self.0 - 1)
    }
}

impl TryFrom<u8> for OptionIndex {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        OptionIndex::new(i64::from(value))
            .ok_or_else(|| format!("option index must be between 1 and 4, got {value}"))
    }
}

impl From<OptionIndex> for u8 {
    fn from(index: OptionIndex) -> Self {
        index.0
    }
}

impl fmt::Display for OptionIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for OptionIndex {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: i64 = s
            .trim()
            .parse()
            .map_err(|_| format!("not an option number: {s}"))?;
        OptionIndex::new(value).ok_or_else(|| format!("option must be between 1 and 4, got {value}"))
    }
}

/// One multiple-choice question from a bank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// The prompt shown to the learner.
    pub text: String,
    /// Category label; empty means uncategorized.
    #[serde(default)]
    pub topic: String,
    /// Finer category label, may be empty.
    #[serde(default)]
    pub subtopic: String,
    /// The four answer choices in display order.
    pub options: [String; OPTION_COUNT],
    /// The correct option, or `None` when the bank declared no valid answer.
    pub correct_answer: Option<OptionIndex>,
}

impl Question {
    pub fn option(&self, index: OptionIndex) -> &str {
        &self.options[index.slot()]
    }

    /// Options paired with their 1-based index.
    pub fn options(&self) -> impl Iterator<Item = (OptionIndex, &str)> {
        OptionIndex::ALL
            .into_iter()
            .map(move |index| (index, self.option(index)))
    }

    /// Unscorable questions are never correct.
    pub fn is_correct(&self, answer: OptionIndex) -> bool {
        self.correct_answer == Some(answer)
    }

    pub fn is_scorable(&self) -> bool {
        self.correct_answer.is_some()
    }

    /// Grouping key for the per-topic breakdown.
    pub fn category(&self) -> &str {
        if self.topic.is_empty() {
            UNCATEGORIZED
        } else {
            &self.topic
        }
    }
}

/// The learner's chosen option per 0-based question position.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerMap {
    answers: BTreeMap<usize, OptionIndex>,
}

impl AnswerMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record (or replace) the answer for a position.
    pub fn record(&mut self, position: usize, answer: OptionIndex) {
        self.answers.insert(position, answer);
    }

    pub fn clear_answer(&mut self, position: usize) -> Option<OptionIndex> {
        self.answers.remove(&position)
    }

    pub fn get(&self, position: usize) -> Option<OptionIndex> {
        self.answers.get(&position).copied()
    }

    pub fn is_answered(&self, position: usize) -> bool {
        self.answers.contains_key(&position)
    }

    pub fn len(&self) -> usize {
        self.answers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, OptionIndex)> + '_ {
        self.answers.iter().map(|(&k, &v)| (k, v))
    }

    /// Build an answer map from untrusted `(position, option)` pairs.
    ///
    /// Pairs whose option is outside `1..=4`, whose position is negative, or
    /// whose position is not below `question_count` are returned as rejects
    /// instead of being stored.
    pub fn from_raw<I>(pairs: I, question_count: usize) -> (Self, Vec<(i64, i64)>)
    where
        I: IntoIterator<Item = (i64, i64)>,
    {
        let mut map = AnswerMap::new();
        let mut rejected = Vec::new();
        for (position, option) in pairs {
            let index = usize::try_from(position)
                .ok()
                .filter(|&p| p < question_count);
            match (index, OptionIndex::new(option)) {
                (Some(p), Some(answer)) => map.record(p, answer),
                _ => rejected.push((position, option)),
            }
        }
        (map, rejected)
    }
}

impl FromIterator<(usize, OptionIndex)> for AnswerMap {
    fn from_iter<T: IntoIterator<Item = (usize, OptionIndex)>>(iter: T) -> Self {
        Self {
            answers: iter.into_iter().collect(),
        }
    }
}
