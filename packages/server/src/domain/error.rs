//! Domain layer error definitions.

use thiserror::Error;

/// Errors related to Value Objects validation
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueObjectError {
    /// UserId validation error
    #[error("userId cannot be empty")]
    UserIdEmpty,

    /// UserId too long error
    #[error("userId cannot exceed {max} characters (got {actual})")]
    UserIdTooLong { max: usize, actual: usize },

    /// MessageText validation error
    #[error("text cannot be empty")]
    MessageTextEmpty,

    /// MessageText too long error
    #[error("text cannot exceed {max} characters (got {actual})")]
    MessageTextTooLong { max: usize, actual: usize },
}
