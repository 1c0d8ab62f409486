//! Error handling for the profilometer lab
//!
//! Provides error types for each layer of the measurement engine:
//! - Profile errors (sample construction and statistics)
//! - Quiz errors (answer keys and attempts)
//! - Rig errors (runtime configuration)
//!
//! Out-of-order rig commands are not errors: the state machine ignores them.
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Profile error type
///
/// Represents errors related to building a profile or deriving statistics from it.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProfileError {
    /// Roughness statistics need at least one sample
    #[error("Profile contains no samples")]
    Empty,

    /// A height value was NaN or infinite
    #[error("Non-finite height at position {position}")]
    NonFiniteHeight {
        /// The sample index carrying the bad height.
        position: usize,
    },

    /// A sample was appended out of traverse order
    #[error("Sample out of order: expected position {expected}, found {found}")]
    OutOfOrder {
        /// The position the profile expected next.
        expected: usize,
        /// The position the sample carried.
        found: usize,
    },
}

/// Quiz error type
///
/// Represents errors related to answer keys and quiz attempts.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum QuizError {
    /// Question index beyond the end of the key
    #[error("Question {index} out of range (quiz has {total} questions)")]
    QuestionOutOfRange {
        /// The requested question index.
        index: usize,
        /// The number of questions in the key.
        total: usize,
    },

    /// The chosen option is not offered by the question
    #[error("Option '{option}' is not offered by question {index}")]
    UnknownOption {
        /// The question index.
        index: usize,
        /// The rejected option text.
        option: String,
    },

    /// The answer key itself is malformed
    #[error("Invalid answer key: {reason}")]
    InvalidKey {
        /// Why the key was rejected.
        reason: String,
    },
}

/// Rig error type
///
/// Represents errors raised while building a rig, never while driving one.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RigError {
    /// Runtime configuration rejected
    #[error("Invalid rig configuration: {reason}")]
    InvalidConfig {
        /// The reason the configuration is invalid.
        reason: String,
    },
}

/// Main error type for the profilometer lab
///
/// A unified error type that can represent any error from the core layers.
#[derive(Error, Debug)]
pub enum Error {
    /// Profile error
    #[error(transparent)]
    Profile(#[from] ProfileError),

    /// Quiz error
    #[error(transparent)]
    Quiz(#[from] QuizError),

    /// Rig error
    #[error(transparent)]
    Rig(#[from] RigError),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Check if this is a profile error
    pub fn is_profile_error(&self) -> bool {
        matches!(self, Error::Profile(_))
    }

    /// Check if this is a quiz error
    pub fn is_quiz_error(&self) -> bool {
        matches!(self, Error::Quiz(_))
    }
}

/// Result type alias for profilometer operations
pub type Result<T> = std::result::Result<T, Error>;
