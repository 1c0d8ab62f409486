//! Quiz scoring
//!
//! A pure reduction of an [`AnswerMap`] against a [`QuizAnswerKey`]. Skipped
//! questions score as incorrect but stay distinguishable from wrong answers.

use super::key::QuizAnswerKey;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The student's chosen option per question index
///
/// Answers can be replaced but never removed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerMap {
    answers: BTreeMap<usize, String>,
}

impl AnswerMap {
    /// Create an empty answer map
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the answer for question `index`
    pub fn set(&mut self, index: usize, answer: impl Into<String>) {
        self.answers.insert(index, answer.into());
    }

    /// Answer recorded for question `index`
    pub fn get(&self, index: usize) -> Option<&str> {
        self.answers.get(&index).map(String::as_str)
    }

    /// True if question `index` has a non-blank answer
    pub fn is_answered(&self, index: usize) -> bool {
        self.get(index).is_some_and(|a| !a.trim().is_empty())
    }

    /// Number of non-blank answers
    pub fn answered_count(&self) -> usize {
        self.answers.values().filter(|a| !a.trim().is_empty()).count()
    }

    /// Number of entries, blank ones included
    pub fn len(&self) -> usize {
        self.answers.len()
    }

    /// True if nothing has been recorded
    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }
}

impl FromIterator<(usize, String)> for AnswerMap {
    fn from_iter<I: IntoIterator<Item = (usize, String)>>(iter: I) -> Self {
        Self {
            answers: iter.into_iter().collect(),
        }
    }
}

/// Review entry for one question
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionOutcome {
    /// A non-blank answer was given
    pub answered: bool,
    /// The answer matched the key exactly
    pub correct: bool,
}

/// Scored quiz report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizScore {
    /// Questions answered correctly
    pub correct_count: usize,
    /// Non-blank answers among the key's questions
    pub answered_count: usize,
    /// Questions in the key
    pub total: usize,
    /// `round(100 * correct / total)`
    pub percentage: u8,
    /// One entry per key question, in order
    pub per_question: Vec<QuestionOutcome>,
}

/// Score `answers` against `key`
///
/// Matching is exact, case-sensitive string equality. Entries for indices
/// beyond the key are ignored.
pub fn score(answers: &AnswerMap, key: &QuizAnswerKey) -> QuizScore {
    let per_question: Vec<QuestionOutcome> = key
        .questions()
        .iter()
        .enumerate()
        .map(|(index, question)| QuestionOutcome {
            answered: answers.is_answered(index),
            correct: answers.get(index) == Some(question.correct_answer.as_str()),
        })
        .collect();

    let total = key.len();
    let correct_count = per_question.iter().filter(|o| o.correct).count();
    let answered_count = per_question.iter().filter(|o| o.answered).count();
    let percentage = if total == 0 {
        0
    } else {
        (100.0 * correct_count as f64 / total as f64).round() as u8
    };

    QuizScore {
        correct_count,
        answered_count,
        total,
        percentage,
        per_question,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quiz::key::{standard_key, QuizQuestion};

    fn correct(index: usize) -> String {
        standard_key().questions()[index].correct_answer.clone()
    }

    #[test]
    fn test_three_correct_two_skipped() {
        let mut answers = AnswerMap::new();
        answers.set(0, correct(0));
        answers.set(2, correct(2));
        answers.set(4, correct(4));

        let result = score(&answers, standard_key());
        assert_eq!(result.correct_count, 3);
        assert_eq!(result.total, 5);
        assert_eq!(result.percentage, 60);
        assert_eq!(result.answered_count, 3);
        for skipped in [1, 3] {
            assert_eq!(
                result.per_question[skipped],
                QuestionOutcome {
                    answered: false,
                    correct: false
                }
            );
        }
    }

    #[test]
    fn test_wrong_answer_is_answered_but_incorrect() {
        let mut answers = AnswerMap::new();
        answers.set(1, "Copper");
        let result = score(&answers, standard_key());
        assert_eq!(
            result.per_question[1],
            QuestionOutcome {
                answered: true,
                correct: false
            }
        );
        assert_eq!(result.percentage, 0);
    }

    #[test]
    fn test_matching_is_case_sensitive_and_untrimmed() {
        let mut answers = AnswerMap::new();
        answers.set(1, "diamond");
        answers.set(2, format!(" {}", correct(2)));
        answers.set(3, "   ");
        let result = score(&answers, standard_key());
        assert_eq!(result.correct_count, 0);
        assert!(result.per_question[1].answered);
        assert!(result.per_question[2].answered);
        assert!(!result.per_question[3].answered);
    }

    #[test]
    fn test_percentage_rounds() {
        let key = QuizAnswerKey::new(vec![
            QuizQuestion::new("a", &["x", "y"], "x"),
            QuizQuestion::new("b", &["x", "y"], "x"),
            QuizQuestion::new("c", &["x", "y"], "x"),
        ])
        .unwrap();
        let answers: AnswerMap = [(0, "x".to_string()), (1, "x".to_string())]
            .into_iter()
            .collect();
        assert_eq!(score(&answers, &key).percentage, 67);

        let answers: AnswerMap = [(0, "x".to_string())].into_iter().collect();
        assert_eq!(score(&answers, &key).percentage, 33);
    }

    #[test]
    fn test_scoring_is_repeatable() {
        let mut answers = AnswerMap::new();
        answers.set(0, correct(0));
        let key = standard_key();
        assert_eq!(score(&answers, key), score(&answers, key));
    }

    #[test]
    fn test_answer_map_deserializes_from_string_keys() {
        let answers: AnswerMap = serde_json::from_str(r#"{"0":"Diamond","4":"x"}"#).unwrap();
        assert_eq!(answers.get(0), Some("Diamond"));
        assert_eq!(answers.answered_count(), 2);
    }
}
