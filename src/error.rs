// src/error.rs

use thiserror::Error;

/// Errors reported before a shake starts.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ShakeError {
    #[error("invalid argument `{name}`: {reason}")]
    InvalidArgument { name: &'static str, reason: String },
}

pub type Result<T> = std::result::Result<T, ShakeError>;
