//! Post-lab quiz
//!
//! Provides:
//! - The answer key model and the standard five-question key
//! - The answer map and the scorer that reduces it against a key
//! - Attempt tracking with question navigation and gated submission

pub mod attempt;
pub mod key;
pub mod scorer;

pub use attempt::QuizAttempt;
pub use key::{standard_key, QuizAnswerKey, QuizQuestion};
pub use scorer::{score, AnswerMap, QuestionOutcome, QuizScore};
