//! Error types for pattern matching
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

/// Message carried by [`MatchError::InvalidInput`] when an argument is absent.
pub const NULL_INPUT_MESSAGE: &str = "Regex or text cannot be null";

// == Match Error Enum ==
/// Unified error type for match requests.
#[derive(Error, Debug)]
pub enum MatchError {
    /// Pattern text or input text is absent
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Pattern text rejected by the regex engine
    #[error("Invalid pattern syntax: {0}")]
    PatternSyntax(#[from] regex::Error),
}

impl MatchError {
    /// Builds the error returned when either argument of a match is missing.
    pub fn null_input() -> Self {
        MatchError::InvalidInput(NULL_INPUT_MESSAGE.to_string())
    }
}

// == Result Type Alias ==
/// Convenience Result type for match operations.
pub type Result<T> = std::result::Result<T, MatchError>;
