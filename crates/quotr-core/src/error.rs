//! Error types for the quotr-core library.

use thiserror::Error;

/// Main error type for the quotr library.
#[derive(Error, Debug)]
pub enum QuotrError {
    /// Extraction response could not be turned into a record.
    #[error("extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// Manual entry failed validation.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Filter input could not be interpreted.
    #[error("filter error: {0}")]
    Filter(#[from] FilterError),

    /// Dataset could not be loaded.
    #[error("dataset error: {0}")]
    Dataset(String),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors raised when a manually entered record is submitted.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// One or more required fields are blank.
    #[error("missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),
}

/// Errors related to parsing a model response into a quotation record.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractionError {
    /// The response was empty after trimming.
    #[error("model response was empty")]
    EmptyResponse,

    /// No JSON object could be parsed out of the response.
    #[error("could not parse quotation JSON: {0}")]
    Format(String),

    /// An enumerated field held a value outside its permitted set.
    #[error("unrecognized value for {field}: {value:?}")]
    UnrecognizedValue { field: &'static str, value: String },
}

/// Errors turning query-style filter parameters into typed criteria.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FilterError {
    /// Unknown status facet value.
    #[error("invalid status filter: {0}")]
    InvalidStatus(String),

    /// Unknown client type facet value.
    #[error("invalid client type filter: {0}")]
    InvalidClientType(String),

    /// Date bound not in YYYY-MM-DD form.
    #[error("invalid date for {field}: {value} (expected YYYY-MM-DD)")]
    InvalidDate { field: &'static str, value: String },
}

/// Illegal transition of an extraction session.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("cannot {action} an extraction session in state {state}")]
pub struct SessionError {
    pub state: &'static str,
    pub action: &'static str,
}

/// Result type for the quotr library.
pub type Result<T> = std::result::Result<T, QuotrError>;
