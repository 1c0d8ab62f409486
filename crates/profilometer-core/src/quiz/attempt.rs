//! A quiz attempt in progress
//!
//! Tracks the question cursor and the growing answer map, and only hands out a
//! score once every question has a non-blank answer.

use super::key::QuizAnswerKey;
use super::scorer::{score, AnswerMap, QuizScore};
use crate::error::QuizError;

/// One student's pass through an answer key
#[derive(Debug, Clone)]
pub struct QuizAttempt<'k> {
    key: &'k QuizAnswerKey,
    current: usize,
    answers: AnswerMap,
}

impl<'k> QuizAttempt<'k> {
    /// Start an attempt at the first question
    pub fn new(key: &'k QuizAnswerKey) -> Self {
        Self {
            key,
            current: 0,
            answers: AnswerMap::new(),
        }
    }

    /// Index of the question being shown
    pub fn current_index(&self) -> usize {
        self.current
    }

    /// Question being shown
    pub fn current_question(&self) -> Option<&'k super::key::QuizQuestion> {
        self.key.get(self.current)
    }

    /// Advance to the next question; stays on the last one
    pub fn next(&mut self) -> bool {
        if self.current + 1 < self.key.len() {
            self.current += 1;
            true
        } else {
            false
        }
    }

    /// Go back one question; stays on the first one
    pub fn previous(&mut self) -> bool {
        if self.current > 0 {
            self.current -= 1;
            true
        } else {
            false
        }
    }

    /// Jump to question `index`
    pub fn go_to(&mut self, index: usize) -> Result<(), QuizError> {
        if index >= self.key.len() {
            return Err(QuizError::QuestionOutOfRange {
                index,
                total: self.key.len(),
            });
        }
        self.current = index;
        Ok(())
    }

    /// Choose `option` for the current question
    pub fn answer(&mut self, option: &str) -> Result<(), QuizError> {
        self.answer_at(self.current, option)
    }

    /// Choose `option` for question `index`
    pub fn answer_at(&mut self, index: usize, option: &str) -> Result<(), QuizError> {
        let question = self.key.get(index).ok_or(QuizError::QuestionOutOfRange {
            index,
            total: self.key.len(),
        })?;
        if !question.offers(option) {
            return Err(QuizError::UnknownOption {
                index,
                option: option.to_string(),
            });
        }
        self.answers.set(index, option);
        Ok(())
    }

    /// True if the current question has an answer
    pub fn is_current_answered(&self) -> bool {
        self.answers.is_answered(self.current)
    }

    /// True once every question has an answer
    pub fn all_answered(&self) -> bool {
        (0..self.key.len()).all(|i| self.answers.is_answered(i))
    }

    /// Answers recorded so far
    pub fn answers(&self) -> &AnswerMap {
        &self.answers
    }

    /// Score the attempt, or `None` while questions remain unanswered
    pub fn submit(&self) -> Option<QuizScore> {
        if self.all_answered() {
            Some(score(&self.answers, self.key))
        } else {
            tracing::debug!(
                "Submission refused: {}/{} answered",
                self.answers.answered_count(),
                self.key.len()
            );
            None
        }
    }

    /// Discard all answers and return to the first question
    pub fn restart(&mut self) {
        self.current = 0;
        self.answers = AnswerMap::new();
    }
}
