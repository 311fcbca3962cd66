use thiserror::Error;

/// Failures reported by the review store gateway.
#[derive(Error, Debug)]
pub enum StoreError {
    /// No store is configured, or its client could not be built.
    #[error("review store unavailable: {0}")]
    Unavailable(String),

    #[error("request to review store failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("review store responded with {status}: {message}")]
    Status { status: u16, message: String },

    #[error("could not decode review store response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

impl StoreError {
    pub fn is_unavailable(&self) -> bool {
        matches!(self, StoreError::Unavailable(_))
    }
}

/// Why a submitted review form was rejected before reaching the store.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubmissionError {
    #[error("missing required field `{0}`")]
    MissingField(&'static str),

    #[error("rating `{0}` is not a whole number")]
    InvalidRating(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {key}: `{value}`")]
    Invalid { key: &'static str, value: String },
}
