use thiserror::Error;

use crate::validation::ValidationErrors;

/// Message shown for every failed login. Unknown usernames and bad passwords
/// are deliberately indistinguishable.
pub const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid username or password";

#[derive(Debug, Error)]
pub enum IronfitError {
    #[error("Storage error: {0}")]
    Storage(String),

    /// Stored value under `key` is not valid JSON for its record type.
    /// Collection reads recover from this silently; only single-record
    /// reads return it, so the caller can discard the corrupt value.
    #[error("Corrupt value under '{key}': {reason}")]
    StorageParse { key: String, reason: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),

    #[error("{}", INVALID_CREDENTIALS_MESSAGE)]
    InvalidCredentials,

    #[error("Not logged in")]
    NotAuthenticated,

    #[error("Forbidden: {0}")]
    Forbidden(String),
}

impl IronfitError {
    /// Returns `true` for errors the view layer should show next to form
    /// fields rather than as a banner.
    pub fn is_field_level(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Field → message pairs for validation failures, empty otherwise.
    pub fn field_errors(&self) -> Vec<(&str, &str)> {
        match self {
            Self::Validation(errors) => errors.iter().collect(),
            _ => Vec::new(),
        }
    }
}

impl From<rusqlite::Error> for IronfitError {
    fn from(e: rusqlite::Error) -> Self {
        Self::Storage(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, IronfitError>;
