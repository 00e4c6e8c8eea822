//! Exam sessions: question selection, navigation, answers, and stars.
//!
//! An [`ExamSession`] is plain owned state. Nothing here changes how a bank
//! is parsed or how an attempt is scored; [`ExamSession::finish`] hands the
//! final answers to the scoring module.

use std::collections::BTreeSet;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::{AnswerMap, OptionIndex, Question};
use crate::scoring::{score_exam, ExamScore, PASSING_PERCENTAGE};

/// Shuffle the bank and keep at most `max` questions.
///
/// `None`, or a limit at or above the bank size, keeps every question.
pub fn select_questions<R: Rng + ?Sized>(
    questions: &[Question],
    max: Option<usize>,
    rng: &mut R,
) -> Vec<Question> {
    let mut selected = questions.to_vec();
    selected.shuffle(rng);
    if let Some(max) = max {
        selected.truncate(max);
    }
    selected
}

/// Parse a user-typed question limit: blank means no limit.
pub fn parse_question_limit(input: &str) -> Result<Option<usize>, String> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(None);
    }
    if !input.bytes().all(|b| b.is_ascii_digit()) {
        return Err(format!("question limit must be a whole number, got '{input}'"));
    }
    input
        .parse()
        .map(Some)
        .map_err(|_| format!("question limit is too large: {input}"))
}

/// What the learner sees before starting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExamPreface {
    pub question_count: usize,
    pub passing_percentage: u32,
    pub timed: bool,
}

impl ExamPreface {
    pub fn for_questions(questions: &[Question]) -> Self {
        Self {
            question_count: questions.len(),
            passing_percentage: PASSING_PERCENTAGE,
            timed: false,
        }
    }
}

/// Reasons a navigation request was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum NavigationError {
    #[error("already at the first question")]
    AtStart,

    #[error("already at the last question")]
    AtEnd,

    #[error("answer question {0} before moving on")]
    Unanswered(usize),

    #[error("finish is only available on the last question")]
    NotLast,

    #[error("no question {} (exam has {len})", .position + 1)]
    OutOfRange { position: usize, len: usize },

    #[error("exam has no questions")]
    Empty,
}

/// The finished attempt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExamOutcome {
    pub questions: Vec<Question>,
    pub answers: AnswerMap,
    pub score: ExamScore,
}

/// One learner working through one set of questions.
#[derive(Debug, Clone)]
pub struct ExamSession {
    questions: Vec<Question>,
    position: usize,
    answers: AnswerMap,
    starred: BTreeSet<usize>,
}

impl ExamSession {
    pub fn new(questions: Vec<Question>) -> Self {
        Self {
            questions,
            position: 0,
            answers: AnswerMap::new(),
            starred: BTreeSet::new(),
        }
    }

    pub fn preface(&self) -> ExamPreface {
        ExamPreface::for_questions(&self.questions)
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// 0-based position of the current question.
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn current(&self) -> Option<&Question> {
        self.questions.get(self.position)
    }

    pub fn current_answer(&self) -> Option<OptionIndex> {
        self.answers.get(self.position)
    }

    pub fn answers(&self) -> &AnswerMap {
        &self.answers
    }

    pub fn is_last(&self) -> bool {
        !self.questions.is_empty() && self.position == self.questions.len() - 1
    }

    /// Share of the exam reached, counting the current question.
    pub fn progress_percent(&self) -> f64 {
        if self.questions.is_empty() {
            return 0.0;
        }
        (self.position + 1) as f64 / self.questions.len() as f64 * 100.0
    }

    /// Record `option` for the current question, replacing any earlier choice.
    pub fn select_answer(&mut self, option: OptionIndex) -> Result<(), NavigationError> {
        if self.questions.is_empty() {
            return Err(NavigationError::Empty);
        }
        self.answers.record(self.position, option);
        Ok(())
    }

    pub fn previous(&mut self) -> Result<usize, NavigationError> {
        if self.position == 0 {
            return Err(NavigationError::AtStart);
        }
        self.position -= 1;
        Ok(self.position)
    }

    /// Advance one question; the current question must be answered first.
    pub fn next(&mut self) -> Result<usize, NavigationError> {
        if self.questions.is_empty() {
            return Err(NavigationError::Empty);
        }
        if self.is_last() {
            return Err(NavigationError::AtEnd);
        }
        if !self.answers.is_answered(self.position) {
            return Err(NavigationError::Unanswered(self.position + 1));
        }
        self.position += 1;
        Ok(self.position)
    }

    /// Whether the attempt may be finished now: the learner must be on the
    /// last question and have answered it.
    pub fn can_finish(&self) -> Result<(), NavigationError> {
        if self.questions.is_empty() {
            return Err(NavigationError::Empty);
        }
        if !self.is_last() {
            return Err(NavigationError::NotLast);
        }
        if !self.answers.is_answered(self.position) {
            return Err(NavigationError::Unanswered(self.position + 1));
        }
        Ok(())
    }

    /// Jump straight to a 0-based position.
    pub fn jump_to(&mut self, position: usize) -> Result<(), NavigationError> {
        if position >= self.questions.len() {
            return Err(NavigationError::OutOfRange {
                position,
                len: self.questions.len(),
            });
        }
        self.position = position;
        Ok(())
    }

    /// Star or unstar the current question; returns the new state.
    pub fn toggle_star(&mut self) -> bool {
        if self.starred.remove(&self.position) {
            false
        } else {
            self.starred.insert(self.position);
            true
        }
    }

    pub fn is_starred(&self, position: usize) -> bool {
        self.starred.contains(&position)
    }

    /// Starred positions in ascending order.
    pub fn starred(&self) -> Vec<usize> {
        self.starred.iter().copied().collect()
    }

    /// Clear answers and stars and go back to the first question.
    pub fn restart(&mut self) {
        self.position = 0;
        self.answers = AnswerMap::new();
        self.starred.clear();
    }

    /// End the attempt and score it.
    pub fn finish(self) -> ExamOutcome {
        let score = score_exam(&self.questions, &self.answers);
        tracing::info!(
            correct = score.overall.correct,
            total = score.overall.total,
            percentage = score.overall.percentage,
            passed = score.overall.passed,
            "exam finished"
        );
        ExamOutcome {
            questions: self.questions,
            answers: self.answers,
            score,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn bank(n: usize) -> Vec<Question> {
        (0..n)
            .map(|i| Question {
                text: format!("Q{i}"),
                topic: if i % 2 == 0 { "Even".into() } else { String::new() },
                subtopic: String::new(),
                options: ["a", "b", "c", "d"].map(String::from),
                correct_answer: OptionIndex::new(1),
            })
            .collect()
    }

    fn opt(n: i64) -> OptionIndex {
        OptionIndex::new(n).unwrap()
    }

    #[test]
    fn select_limits_and_shuffles() {
        let questions = bank(10);
        let mut rng = StdRng::seed_from_u64(7);
        let selected = select_questions(&questions, Some(4), &mut rng);
        assert_eq!(selected.len(), 4);
        assert!(selected.iter().all(|q| questions.contains(q)));

        let mut rng = StdRng::seed_from_u64(7);
        let all = select_questions(&questions, None, &mut rng);
        assert_eq!(all.len(), 10);
        let mut texts: Vec<&str> = all.iter().map(|q| q.text.as_str()).collect();
        texts.sort_by_key(|t| t[1..].parse::<usize>().unwrap());
        let expected: Vec<String> = (0..10).map(|i| format!("Q{i}")).collect();
        assert_eq!(texts, expected);
    }

    #[test]
    fn select_limit_above_bank_keeps_everything() {
        let questions = bank(3);
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(select_questions(&questions, Some(50), &mut rng).len(), 3);
        assert!(select_questions(&questions, Some(0), &mut rng).is_empty());
    }

    #[test]
    fn select_is_reproducible_with_seed() {
        let questions = bank(20);
        let a = select_questions(&questions, Some(5), &mut StdRng::seed_from_u64(42));
        let b = select_questions(&questions, Some(5), &mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }

    #[test]
    fn question_limit_parsing() {
        assert_eq!(parse_question_limit(""), Ok(None));
        assert_eq!(parse_question_limit("  "), Ok(None));
        assert_eq!(parse_question_limit("25"), Ok(Some(25)));
        assert!(parse_question_limit("-3").is_err());
        assert!(parse_question_limit("ten").is_err());
        assert!(parse_question_limit("2.5").is_err());
    }

    #[test]
    fn preface_reports_fixed_rules() {
        let session = ExamSession::new(bank(12));
        let preface = session.preface();
        assert_eq!(preface.question_count, 12);
        assert_eq!(preface.passing_percentage, 80);
        assert!(!preface.timed);
    }

    #[test]
    fn next_requires_an_answer() {
        let mut session = ExamSession::new(bank(3));
        assert_eq!(session.next(), Err(NavigationError::Unanswered(1)));
        session.select_answer(opt(2)).unwrap();
        assert_eq!(session.next(), Ok(1));
        assert_eq!(session.current().unwrap().text, "Q1");
    }

    #[test]
    fn navigation_bounds() {
        let mut session = ExamSession::new(bank(2));
        assert_eq!(session.previous(), Err(NavigationError::AtStart));
        session.select_answer(opt(1)).unwrap();
        session.next().unwrap();
        assert!(session.is_last());
        session.select_answer(opt(1)).unwrap();
        assert_eq!(session.next(), Err(NavigationError::AtEnd));
        assert_eq!(session.previous(), Ok(0));
        assert_eq!(session.current_answer(), Some(opt(1)));
        assert_eq!(
            session.jump_to(5),
            Err(NavigationError::OutOfRange { position: 5, len: 2 })
        );
        session.jump_to(1).unwrap();
        assert_eq!(session.position(), 1);
    }

    #[test]
    fn progress_counts_current_question() {
        let mut session = ExamSession::new(bank(4));
        assert!((session.progress_percent() - 25.0).abs() < f64::EPSILON);
        session.jump_to(3).unwrap();
        assert!((session.progress_percent() - 100.0).abs() < f64::EPSILON);
        assert_eq!(ExamSession::new(vec![]).progress_percent(), 0.0);
    }

    #[test]
    fn empty_session_rejects_answers() {
        let mut session = ExamSession::new(vec![]);
        assert!(session.current().is_none());
        assert!(!session.is_last());
        assert_eq!(session.select_answer(opt(1)), Err(NavigationError::Empty));
        assert_eq!(session.next(), Err(NavigationError::Empty));
    }

    #[test]
    fn stars_toggle_and_sort() {
        let mut session = ExamSession::new(bank(5));
        session.jump_to(3).unwrap();
        assert!(session.toggle_star());
        session.jump_to(1).unwrap();
        assert!(session.toggle_star());
        assert_eq!(session.starred(), vec![1, 3]);
        assert!(!session.toggle_star());
        assert_eq!(session.starred(), vec![3]);
        assert!(session.is_starred(3));
    }

    #[test]
    fn restart_clears_state() {
        let mut session = ExamSession::new(bank(3));
        session.select_answer(opt(1)).unwrap();
        session.toggle_star();
        session.next().unwrap();
        session.restart();
        assert_eq!(session.position(), 0);
        assert!(session.answers().is_empty());
        assert!(session.starred().is_empty());
    }

    #[test]
    fn finish_needs_an_answered_last_question() {
        let mut session = ExamSession::new(bank(2));
        assert_eq!(session.can_finish(), Err(NavigationError::NotLast));
        session.select_answer(opt(1)).unwrap();
        assert_eq!(session.can_finish(), Err(NavigationError::NotLast));
        session.next().unwrap();
        assert_eq!(session.can_finish(), Err(NavigationError::Unanswered(2)));
        session.select_answer(opt(3)).unwrap();
        assert_eq!(session.can_finish(), Ok(()));
        assert_eq!(
            ExamSession::new(vec![]).can_finish(),
            Err(NavigationError::Empty)
        );
    }

    #[test]
    fn finish_scores_the_attempt() {
        let mut session = ExamSession::new(bank(4));
        session.select_answer(opt(1)).unwrap();
        session.next().unwrap();
        session.select_answer(opt(2)).unwrap();
        session.next().unwrap();
        session.select_answer(opt(1)).unwrap();

        let outcome = session.finish();
        assert_eq!(outcome.score.overall.correct, 2);
        assert_eq!(outcome.score.overall.total, 4);
        assert_eq!(outcome.score.overall.percentage, 50);
        assert!(!outcome.score.overall.passed);
        assert_eq!(outcome.answers.len(), 3);
        let labels: Vec<&str> = outcome
            .score
            .categories
            .iter()
            .map(|c| c.topic.as_str())
            .collect();
        assert_eq!(labels, vec!["Even", "Uncategorized"]);
    }
}
