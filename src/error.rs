use thiserror::Error;

use crate::structs::drink_type::DrinkType;

/// Why a proposed active drink list was rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ActiveListError {
    #[error("active drinks list cannot be empty")]
    Empty,

    #[error("active drinks list cannot have more than 5 items, got {len}")]
    TooMany { len: usize },

    #[error("active drinks list cannot contain duplicates: {0}")]
    Duplicate(DrinkType),
}

/// Error type for everything that touches persisted preferences.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("unable to encode preferences: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("preference file {path} is corrupted: {reason}")]
    Corrupt { path: String, reason: String },

    #[error(transparent)]
    Validation(#[from] ActiveListError),

    #[error("unable to resolve a home directory for the project data")]
    NoProjectDir,

    #[error("background write did not complete: {0}")]
    TaskFailed(String),

    #[error("unable to install log subscriber: {0}")]
    Logging(String),
}

impl From<tokio::task::JoinError> for StoreError {
    fn from(err: tokio::task::JoinError) -> Self {
        StoreError::TaskFailed(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_active_list_error_display() {
        assert_eq!(
            ActiveListError::Empty.to_string(),
            "active drinks list cannot be empty"
        );
        assert_eq!(
            ActiveListError::TooMany { len: 6 }.to_string(),
            "active drinks list cannot have more than 5 items, got 6"
        );
        assert_eq!(
            ActiveListError::Duplicate(DrinkType::Wine).to_string(),
            "active drinks list cannot contain duplicates: WINE"
        );
    }

    #[test]
    fn test_validation_error_is_transparent() {
        let err = StoreError::from(ActiveListError::Empty);
        assert_eq!(err.to_string(), "active drinks list cannot be empty");
    }
}
