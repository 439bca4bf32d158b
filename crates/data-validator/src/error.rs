//! Validation Error Types

use thiserror::Error;

/// Errors that reject an upload outright.
///
/// Row-ceiling overruns are not here: they clamp with a notice instead of
/// failing (see [`crate::TruncationNotice`]).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// Upload exceeds the size ceiling; rejected before parsing
    #[error("file of {declared} bytes exceeds the {limit} byte demo limit")]
    FileTooLarge { declared: u64, limit: u64 },

    /// The bytes could not be parsed as a delimited table
    #[error("malformed input: {0}")]
    MalformedInput(String),
}
