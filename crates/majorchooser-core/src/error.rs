//! Error types for the question store, the quiz session and storage.
//!
//! Kept as a typed enum so front ends can tell a precondition failure
//! (e.g. adding to an empty question set) apart from corrupt data and show
//! an inline message next to the offending control instead of aborting.

use thiserror::Error;

/// Errors raised by a [`KeyValueStore`](crate::storage::KeyValueStore).
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing the backing file failed.
    #[error("storage I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The backing file is not a JSON object of string values.
    #[error("storage file {path} is not a valid key-value document: {source}")]
    Format {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Errors produced by majorchooser's core operations.
#[derive(Debug, Error)]
pub enum ChooserError {
    /// The persisted question record could not be decoded.
    #[error("corrupt question store under key '{key}': {reason}")]
    CorruptStore { key: String, reason: String },

    /// A new question id cannot be derived from an empty set.
    #[error("cannot add a question to an empty question set")]
    EmptyQuestionSet,

    /// No question carries the requested id.
    #[error("question {0} not found")]
    QuestionNotFound(u32),

    /// A weight edit addressed a position outside the weight vector.
    #[error("weight index {index} out of range for question {id} ({len} weights)")]
    WeightIndexOutOfRange { id: u32, index: usize, len: usize },

    /// Weights must be finite numbers.
    #[error("weight must be a finite number, got {0}")]
    NonFiniteWeight(f64),

    /// No major in the catalog carries the requested id.
    #[error("major {0} not found")]
    UnknownMajor(u32),

    /// Every question has been answered; only a reset is accepted.
    #[error("quiz is finished, reset to start again")]
    QuizFinished,

    /// The key-value store failed.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl ChooserError {
    /// Returns `true` if the error stems from bad persisted data rather than
    /// from the caller's request.
    pub fn is_data_error(&self) -> bool {
        matches!(
            self,
            ChooserError::CorruptStore { .. } | ChooserError::Storage(StorageError::Format { .. })
        )
    }
}
