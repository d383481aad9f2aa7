//! Error types for the API client.

use crate::types::RecordError;

/// Errors that can occur when making API requests.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// No `api_key` is configured; every Scorecard request requires one.
    #[error("No API key configured")]
    MissingApiKey,
    /// The request did not complete within the configured timeout.
    #[error("Request timed out")]
    Timeout,
    /// An HTTP request failed (network error or unreadable response).
    #[error("Request failed")]
    RequestFailed,
    /// The API returned a non-success status with a body snippet.
    #[error("Request failed with status {status}")]
    HttpStatus { status: u16, body: String },
    /// The response body was not valid JSON of the expected shape.
    #[error("Failed to parse response: {0}")]
    Parse(String),
    /// A flattened school record could not be converted into a typed record.
    #[error("Invalid school record: {0}")]
    InvalidRecord(#[from] RecordError),
}
