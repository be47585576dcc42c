use thiserror::Error;

pub type Result<T> = std::result::Result<T, ApiError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    #[error("Invalid vmpooler URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    /// A hostname, template or token that cannot name a single resource.
    #[error("Invalid resource name '{0}'")]
    InvalidName(String),

    #[error("Couldn't connect to address '{address}'. Ensure this is the correct URL for the vmpooler")]
    Unreachable { address: String },

    /// A status code the endpoint has no specific message for.
    #[error("{context}! Status Code: {status} Reason: {reason}")]
    UnexpectedStatus {
        context: &'static str,
        status: u16,
        reason: String,
    },

    /// The service understood the request and refused it.
    #[error("{0}")]
    Rejected(&'static str),

    #[error("Unexpected response from vmpooler: {0}")]
    MalformedResponse(String),
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::MalformedResponse(err.to_string())
    }
}
