//! Answer keys
//!
//! The standard key is process-wide constant data built once on first use.

use crate::error::QuizError;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// One multiple-choice question
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizQuestion {
    /// Question text
    pub question: String,
    /// Offered options, in display order
    pub options: Vec<String>,
    /// The option that scores
    pub correct_answer: String,
}

impl QuizQuestion {
    /// Create a question from string slices
    pub fn new(question: &str, options: &[&str], correct_answer: &str) -> Self {
        Self {
            question: question.to_string(),
            options: options.iter().map(|o| o.to_string()).collect(),
            correct_answer: correct_answer.to_string(),
        }
    }

    /// True if `option` is one of the offered options
    pub fn offers(&self, option: &str) -> bool {
        self.options.iter().any(|o| o == option)
    }
}

/// Ordered list of questions with their correct answers
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct QuizAnswerKey {
    questions: Vec<QuizQuestion>,
}

impl QuizAnswerKey {
    /// Build a key, checking every correct answer is among its options
    pub fn new(questions: Vec<QuizQuestion>) -> Result<Self, QuizError> {
        if questions.is_empty() {
            return Err(QuizError::InvalidKey {
                reason: "key has no questions".to_string(),
            });
        }
        for (index, q) in questions.iter().enumerate() {
            if q.options.is_empty() {
                return Err(QuizError::InvalidKey {
                    reason: format!("question {} has no options", index),
                });
            }
            if !q.offers(&q.correct_answer) {
                return Err(QuizError::InvalidKey {
                    reason: format!(
                        "correct answer of question {} is not among its options",
                        index
                    ),
                });
            }
        }
        Ok(Self { questions })
    }

    /// Parse and validate a key from its JSON array form
    pub fn from_json(json: &str) -> crate::Result<Self> {
        let questions: Vec<QuizQuestion> = serde_json::from_str(json)?;
        Ok(Self::new(questions)?)
    }

    /// Questions in order
    pub fn questions(&self) -> &[QuizQuestion] {
        &self.questions
    }

    /// Question at `index`
    pub fn get(&self, index: usize) -> Option<&QuizQuestion> {
        self.questions.get(index)
    }

    /// Number of questions
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    /// Always false for a validated key
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

/// The five-question key that accompanies the lab
pub fn standard_key() -> &'static QuizAnswerKey {
    static KEY: OnceLock<QuizAnswerKey> = OnceLock::new();
    KEY.get_or_init(|| QuizAnswerKey {
        questions: vec![
            QuizQuestion::new(
                "What is the primary purpose of a profilometer?",
                &[
                    "To measure surface roughness and texture",
                    "To measure temperature variations",
                    "To measure electrical conductivity",
                    "To measure chemical composition",
                ],
                "To measure surface roughness and texture",
            ),
            QuizQuestion::new(
                "What material is typically used for the stylus tip in a contact profilometer?",
                &["Diamond", "Plastic", "Copper", "Aluminum"],
                "Diamond",
            ),
            QuizQuestion::new(
                "What does Ra represent in surface roughness measurement?",
                &[
                    "Arithmetic average of surface roughness",
                    "Maximum peak height",
                    "Total scanning distance",
                    "Surface hardness value",
                ],
                "Arithmetic average of surface roughness",
            ),
            QuizQuestion::new(
                "What does Rz measure in surface profile analysis?",
                &[
                    "Maximum height of the profile",
                    "Average valley depth",
                    "Surface temperature",
                    "Material density",
                ],
                "Maximum height of the profile",
            ),
            QuizQuestion::new(
                "Why is surface roughness measurement important in manufacturing?",
                &[
                    "It affects product quality, performance, and functionality",
                    "It determines the color of the product",
                    "It measures the weight of components",
                    "It calculates production costs",
                ],
                "It affects product quality, performance, and functionality",
            ),
        ],
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_key_is_valid() {
        let key = standard_key();
        assert_eq!(key.len(), 5);
        let rebuilt = QuizAnswerKey::new(key.questions().to_vec()).unwrap();
        assert_eq!(&rebuilt, key);
        assert_eq!(key.get(1).map(|q| q.correct_answer.as_str()), Some("Diamond"));
    }

    #[test]
    fn test_rejects_answer_not_in_options() {
        let q = QuizQuestion::new("Tip?", &["Diamond", "Copper"], "Ruby");
        assert!(matches!(
            QuizAnswerKey::new(vec![q]),
            Err(QuizError::InvalidKey { .. })
        ));
        assert!(QuizAnswerKey::new(Vec::new()).is_err());
    }

    #[test]
    fn test_from_json() {
        let json = r#"[{"question":"Tip?","options":["Diamond","Copper"],"correctAnswer":"Diamond"}]"#;
        let key = QuizAnswerKey::from_json(json).unwrap();
        assert_eq!(key.len(), 1);

        let bad = r#"[{"question":"Tip?","options":[],"correctAnswer":"Diamond"}]"#;
        assert!(QuizAnswerKey::from_json(bad).unwrap_err().is_quiz_error());
    }
}
