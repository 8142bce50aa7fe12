//! Error kinds reported by the match core

use thiserror::Error;

use crate::controller::Phase;

/// Errors returned by [`MatchController`](crate::MatchController) operations.
///
/// Every variant is recoverable: the controller state is left untouched
/// (or back in `CategorySelect` for retrieval failures).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MatchError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("category `{0}` has already been played in this match")]
    DuplicateCategory(String),

    #[error(
        "not enough questions: {easy} easy, {medium} medium, {hard} hard (need {needed} of each)"
    )]
    InsufficientQuestions {
        easy: usize,
        medium: usize,
        hard: usize,
        needed: usize,
    },

    #[error("question source unavailable: {0}")]
    SourceUnavailable(String),

    #[error("questions for category `{0}` are still being retrieved")]
    OperationInProgress(String),

    #[error("`{operation}` is not valid in phase {phase:?}")]
    InvalidState {
        operation: &'static str,
        phase: Phase,
    },
}

impl MatchError {
    /// Stable machine-readable code for the presentation layer
    pub fn code(&self) -> &'static str {
        match self {
            MatchError::InvalidInput(_) => "invalid_input",
            MatchError::DuplicateCategory(_) => "duplicate_category",
            MatchError::InsufficientQuestions { .. } => "insufficient_questions",
            MatchError::SourceUnavailable(_) => "source_unavailable",
            MatchError::OperationInProgress(_) => "operation_in_progress",
            MatchError::InvalidState { .. } => "invalid_state",
        }
    }

    /// Whether picking the same category again may succeed
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            MatchError::SourceUnavailable(_) | MatchError::OperationInProgress(_)
        )
    }
}

/// Failure of a single question retrieval.
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("unexpected HTTP status {0}")]
    Status(u16),

    #[error("malformed response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl From<SourceError> for MatchError {
    fn from(err: SourceError) -> Self {
        MatchError::SourceUnavailable(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_are_distinct() {
        let errors = [
            MatchError::InvalidInput("x".into()),
            MatchError::DuplicateCategory("music".into()),
            MatchError::InsufficientQuestions { easy: 1, medium: 5, hard: 5, needed: 2 },
            MatchError::SourceUnavailable("down".into()),
            MatchError::OperationInProgress("music".into()),
            MatchError::InvalidState { operation: "submit_answer", phase: Phase::Setup },
        ];
        let mut codes: Vec<_> = errors.iter().map(|e| e.code()).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), errors.len());
    }

    #[test]
    fn test_source_error_becomes_unavailable() {
        let decode = serde_json::from_str::<Vec<u8>>("{").unwrap_err();
        let err: MatchError = SourceError::Decode(decode).into();
        assert_eq!(err.code(), "source_unavailable");
        assert!(err.is_retryable());

        let err: MatchError = SourceError::Status(503).into();
        assert_eq!(err, MatchError::SourceUnavailable("unexpected HTTP status 503".into()));
    }

    #[test]
    fn test_insufficient_message() {
        let err = MatchError::InsufficientQuestions { easy: 1, medium: 5, hard: 5, needed: 2 };
        assert_eq!(
            err.to_string(),
            "not enough questions: 1 easy, 5 medium, 5 hard (need 2 of each)"
        );
        assert!(!err.is_retryable());
    }
}
