//! Exam scoring and per-topic aggregation.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::model::{AnswerMap, Question};

/// Minimum percentage that passes an exam.
pub const PASSING_PERCENTAGE: u32 = 80;

/// Overall result of one exam attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreReport {
    pub correct: usize,
    pub incorrect: usize,
    pub total: usize,
    /// Rounded half up; 0 for an empty exam.
    pub percentage: u32,
    pub passed: bool,
}

impl ScoreReport {
    fn from_counts(correct: usize, total: usize) -> Self {
        let percentage = rounded_percentage(correct, total);
        Self {
            correct,
            incorrect: total - correct,
            total,
            percentage,
            passed: percentage >= PASSING_PERCENTAGE,
        }
    }
}

/// Result for one topic of the exam.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryScoreReport {
    /// Topic label, `"Uncategorized"` for questions without one.
    pub topic: String,
    pub correct: usize,
    pub incorrect: usize,
    pub total: usize,
    pub percentage: u32,
}

/// Overall score plus the per-topic breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExamScore {
    pub overall: ScoreReport,
    /// Sorted by topic label, byte-wise ascending.
    pub categories: Vec<CategoryScoreReport>,
}

/// `round(100 * part / whole)` with halves rounded up, in exact integer math.
pub fn rounded_percentage(part: usize, whole: usize) -> u32 {
    if whole == 0 {
        return 0;
    }
    let part = part as u128;
    let whole = whole as u128;
    ((200 * part + whole) / (2 * whole)) as u32
}

/// Whether the question at `position` was answered correctly.
///
/// Unanswered, wrong, and unscorable questions are all incorrect.
pub fn is_answered_correctly(question: &Question, position: usize, answers: &AnswerMap) -> bool {
    answers
        .get(position)
        .is_some_and(|selected| question.is_correct(selected))
}

/// Score every question against the answer map.
///
/// Positions in `answers` refer to the index in `questions`; entries beyond
/// the question list are ignored.
pub fn score(questions: &[Question], answers: &AnswerMap) -> ScoreReport {
    let correct = questions
        .iter()
        .enumerate()
        .filter(|(i, q)| is_answered_correctly(q, *i, answers))
        .count();
    ScoreReport::from_counts(correct, questions.len())
}

/// Group questions by category and score each group.
///
/// Answer lookups use each question's position in the full list, not its
/// position within the group.
pub fn score_by_category(questions: &[Question], answers: &AnswerMap) -> Vec<CategoryScoreReport> {
    // (correct, total) per category; BTreeMap gives the byte-wise label order.
    let mut grouped: BTreeMap<&str, (usize, usize)> = BTreeMap::new();
    for (i, q) in questions.iter().enumerate() {
        let entry = grouped.entry(q.category()).or_default();
        if is_answered_correctly(q, i, answers) {
            entry.0 += 1;
        }
        entry.1 += 1;
    }

    grouped
        .into_iter()
        .map(|(topic, (correct, total))| CategoryScoreReport {
            topic: topic.to_string(),
            correct,
            incorrect: total - correct,
            total,
            percentage: rounded_percentage(correct, total),
        })
        .collect()
}

/// Compute the overall score and the per-topic breakdown.
pub fn score_exam(questions: &[Question], answers: &AnswerMap) -> ExamScore {
    ExamScore {
        overall: score(questions, answers),
        categories: score_by_category(questions, answers),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::OptionIndex;

    fn q(topic: &str, correct: Option<i64>) -> Question {
        Question {
            text: format!("question about {topic}"),
            topic: topic.into(),
            subtopic: String::new(),
            options: ["a", "b", "c", "d"].map(String::from),
            correct_answer: correct.and_then(OptionIndex::new),
        }
    }

    fn answers(pairs: &[(usize, i64)]) -> AnswerMap {
        pairs
            .iter()
            .map(|&(p, o)| (p, OptionIndex::new(o).unwrap()))
            .collect()
    }

    #[test]
    fn mixed_answers_score() {
        let questions: Vec<Question> = [1, 2, 3, 4, 1].iter().map(|&c| q("", Some(c))).collect();
        let report = score(&questions, &answers(&[(0, 1), (1, 2), (2, 1), (4, 1)]));
        assert_eq!(
            report,
            ScoreReport {
                correct: 3,
                incorrect: 2,
                total: 5,
                percentage: 60,
                passed: false,
            }
        );
    }

    #[test]
    fn unscorable_question_counts_incorrect_even_when_answered() {
        let questions = vec![q("Math", None), q("Math", Some(2))];
        for option in 1..=4 {
            let report = score(&questions, &answers(&[(0, option), (1, 2)]));
            assert_eq!(report.correct, 1);
            assert_eq!(report.incorrect, 1);
        }
    }

    #[test]
    fn empty_exam_scores_zero() {
        let report = score(&[], &AnswerMap::new());
        assert_eq!(report.total, 0);
        assert_eq!(report.percentage, 0);
        assert!(!report.passed);
        assert!(score_by_category(&[], &AnswerMap::new()).is_empty());
    }

    #[test]
    fn pass_boundary() {
        let questions: Vec<Question> = (0..100).map(|_| q("", Some(1))).collect();
        let eighty = answers(&(0..80).map(|i| (i, 1)).collect::<Vec<_>>());
        let seventy_nine = answers(&(0..79).map(|i| (i, 1)).collect::<Vec<_>>());

        let passed = score(&questions, &eighty);
        assert_eq!(passed.percentage, 80);
        assert!(passed.passed);

        let failed = score(&questions, &seventy_nine);
        assert_eq!(failed.percentage, 79);
        assert!(!failed.passed);
    }

    #[test]
    fn percentage_rounds_half_up() {
        assert_eq!(rounded_percentage(1, 8), 13); // 12.5
        assert_eq!(rounded_percentage(1, 3), 33);
        assert_eq!(rounded_percentage(2, 3), 67);
        assert_eq!(rounded_percentage(7, 8), 88); // 87.5
        assert_eq!(rounded_percentage(0, 0), 0);
        assert_eq!(rounded_percentage(5, 5), 100);
    }

    #[test]
    fn topics_grouped_with_uncategorized_label() {
        let questions = vec![q("Math", Some(1)), q("", Some(1)), q("Math", Some(2))];
        let categories = score_by_category(&questions, &answers(&[(0, 1), (1, 1)]));
        assert_eq!(categories.len(), 2);
        assert_eq!(categories[0].topic, "Math");
        assert_eq!(categories[0].total, 2);
        assert_eq!(categories[0].correct, 1);
        assert_eq!(categories[0].percentage, 50);
        assert_eq!(categories[1].topic, "Uncategorized");
        assert_eq!(categories[1].total, 1);
        assert_eq!(categories[1].correct, 1);
        assert_eq!(categories[1].percentage, 100);
    }

    #[test]
    fn category_lookup_uses_global_position() {
        // Position 2 is the only "Science" question; its answer lives at key 2.
        let questions = vec![q("Math", Some(1)), q("Math", Some(1)), q("Science", Some(3))];
        let categories = score_by_category(&questions, &answers(&[(2, 3), (0, 3)]));
        let science = categories.iter().find(|c| c.topic == "Science").unwrap();
        assert_eq!(science.correct, 1);
        let math = categories.iter().find(|c| c.topic == "Math").unwrap();
        assert_eq!(math.correct, 0);
        assert_eq!(math.incorrect, 2);
    }

    #[test]
    fn category_order_is_bytewise() {
        let questions = vec![
            q("biology", Some(1)),
            q("Zoology", Some(1)),
            q("", Some(1)),
            q("Algebra", Some(1)),
        ];
        let labels: Vec<String> = score_by_category(&questions, &AnswerMap::new())
            .into_iter()
            .map(|c| c.topic)
            .collect();
        // Uppercase sorts before lowercase in byte order.
        assert_eq!(labels, vec!["Algebra", "Uncategorized", "Zoology", "biology"]);
    }

    #[test]
    fn topics_are_case_sensitive() {
        let questions = vec![q("math", Some(1)), q("Math", Some(1))];
        assert_eq!(score_by_category(&questions, &AnswerMap::new()).len(), 2);
    }

    #[test]
    fn answers_beyond_question_list_are_ignored() {
        let questions = vec![q("", Some(1))];
        let report = score(&questions, &answers(&[(0, 1), (5, 1)]));
        assert_eq!(report.correct, 1);
        assert_eq!(report.total, 1);
    }

    #[test]
    fn score_exam_combines_both_views() {
        let questions = vec![q("A", Some(1)), q("B", Some(2))];
        let exam = score_exam(&questions, &answers(&[(0, 1), (1, 2)]));
        assert_eq!(exam.overall.percentage, 100);
        assert!(exam.overall.passed);
        assert_eq!(exam.categories.len(), 2);
    }
}
