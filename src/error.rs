//! Error types for the analysis flow

use crate::api::FetchError;
use thiserror::Error;

/// Errors surfaced by a `!s` run.
///
/// Translation failures never appear here: the scorer recovers from them
/// and reports a [`crate::TranslationOutcome::Fallback`] instead.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    InvalidInput(String),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("No comments were retrieved. Please try a different topic.")]
    NoData,

    #[error("Display failed: {0}")]
    Io(#[from] std::io::Error),
}

impl AppError {
    /// Create an input error
    pub fn invalid_input(message: impl Into<String>) -> Self {
        AppError::InvalidInput(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_data_message() {
        let err = AppError::NoData;
        assert_eq!(
            err.to_string(),
            "No comments were retrieved. Please try a different topic."
        );
    }

    #[test]
    fn test_fetch_error_is_transparent() {
        let err: AppError = FetchError::UnknownTopic("nope".to_string()).into();
        assert_eq!(err.to_string(), "Subreddit 'nope' does not exist");
    }
}
