//! Response DTOs for the webhook endpoint.

use serde::Serialize;

/// Acknowledgement body returned for every successfully handled delivery.
#[derive(Debug, Clone, Serialize)]
pub struct ReceivedResponse {
    pub received: bool,
}

impl ReceivedResponse {
    pub fn ok() -> Self {
        Self { received: true }
    }
}

/// Error body returned for every failure status.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Short, stable error message.
    pub error: String,

    /// Optional failure detail (store error body, fault description).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: None,
        }
    }

    pub fn with_details(error: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: Some(details.into()),
        }
    }
}
