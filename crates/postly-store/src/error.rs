use thiserror::Error;

use crate::models::Timestamp;

/// Failure kinds the presentation layer branches on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    AlreadyExists,
    NotFound,
    Empty,
    TooLong,
    InvalidRange,
    Internal,
}

impl ErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::AlreadyExists => "already_exists",
            ErrorKind::NotFound => "not_found",
            ErrorKind::Empty => "empty",
            ErrorKind::TooLong => "too_long",
            ErrorKind::InvalidRange => "invalid_range",
            ErrorKind::Internal => "internal",
        }
    }
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("user '{0}' already exists")]
    AlreadyExists(String),

    #[error("user '{0}' not found")]
    UserNotFound(String),

    #[error("post {0} not found")]
    PostNotFound(Timestamp),

    #[error("post cannot be empty")]
    Empty,

    #[error("post is too long ({len} > {max})")]
    TooLong { len: usize, max: usize },

    #[error("invalid trending window [{from}, {to}]")]
    InvalidRange { from: i64, to: i64 },

    #[error("credential hashing failed: {0}")]
    Credential(String),

    #[error("invalid snapshot: {0}")]
    InvalidSnapshot(String),

    #[error("store lock poisoned")]
    Poisoned,
}

impl StoreError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            StoreError::AlreadyExists(_) => ErrorKind::AlreadyExists,
            StoreError::UserNotFound(_) | StoreError::PostNotFound(_) => ErrorKind::NotFound,
            StoreError::Empty => ErrorKind::Empty,
            StoreError::TooLong { .. } => ErrorKind::TooLong,
            StoreError::InvalidRange { .. } => ErrorKind::InvalidRange,
            StoreError::Credential(_) | StoreError::InvalidSnapshot(_) | StoreError::Poisoned => {
                ErrorKind::Internal
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, StoreError>;
