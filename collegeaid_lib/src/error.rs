//! Error types for the library layer.

use scorecard_api::types::RecordError;

/// Upstream timeouts are reported with this status.
pub const GATEWAY_TIMEOUT: u16 = 504;

/// Classified failures of the aid-estimate layer. Every core operation
/// returns one of these; none is silently replaced by a default value.
#[derive(thiserror::Error, Debug)]
pub enum AidError {
    /// A required parameter is missing or malformed.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    /// The upstream credential is not configured.
    #[error("Configuration error: {0}")]
    Config(String),
    /// The dataset answered with a non-success status, or did not answer in time.
    #[error("Upstream error (status {status})")]
    Upstream { status: u16, detail: String },
    /// A well-formed query matched no records.
    #[error("Not found: {0}")]
    NotFound(String),
    /// Anything else; the message is for logs, not for callers.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AidError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn missing_api_key() -> Self {
        Self::Config("Missing API key. Set DATAGOV_API_KEY in .env".to_string())
    }
}

impl From<scorecard_api::Error> for AidError {
    fn from(e: scorecard_api::Error) -> Self {
        match e {
            scorecard_api::Error::MissingApiKey => Self::missing_api_key(),
            scorecard_api::Error::HttpStatus { status, body } => Self::Upstream {
                status,
                detail: body,
            },
            scorecard_api::Error::Timeout => Self::Upstream {
                status: GATEWAY_TIMEOUT,
                detail: "upstream request timed out".to_string(),
            },
            scorecard_api::Error::RequestFailed => {
                Self::Internal("request to the dataset failed".to_string())
            }
            scorecard_api::Error::Parse(msg) => {
                Self::Internal(format!("malformed upstream response: {}", msg))
            }
            scorecard_api::Error::InvalidRecord(err) => err.into(),
        }
    }
}

impl From<RecordError> for AidError {
    fn from(e: RecordError) -> Self {
        Self::Internal(format!("malformed school record: {}", e))
    }
}
