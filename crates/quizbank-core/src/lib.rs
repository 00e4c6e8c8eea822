//! quizbank-core — Question bank parsing, exam sessions, and scoring.
//!
//! This crate defines the question model, the CSV bank parser, the scoring
//! rules, and the session state that the rest of quizbank builds on.

pub mod error;
pub mod model;
pub mod parser;
pub mod report;
pub mod scoring;
pub mod session;
pub mod traits;

pub use error::{FormatError, LoadError, QuizbankError};
pub use model::{AnswerMap, OptionIndex, Question};
pub use parser::{load_questions, parse_questions};
pub use scoring::{score, score_by_category, score_exam, CategoryScoreReport, ScoreReport};
