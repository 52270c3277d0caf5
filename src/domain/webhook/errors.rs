//! Webhook error taxonomy.
//!
//! Every failure mode of webhook processing, with HTTP status code
//! mapping and retryability semantics. Status codes steer the provider's
//! delivery policy: it retries on 5xx and gives up on 4xx.

use axum::http::StatusCode;
use thiserror::Error;

/// Errors that occur during webhook processing.
#[derive(Debug, Error)]
pub enum WebhookError {
    /// Request used a method other than POST or OPTIONS.
    #[error("Method not allowed")]
    MethodNotAllowed,

    /// The stripe-signature header was not sent.
    #[error("Missing stripe-signature header")]
    MissingSignatureHeader,

    /// The signature header lacks its `t` or `v1` component.
    #[error("Bad stripe-signature format")]
    BadSignatureFormat,

    /// Signature verification failed.
    #[error("Invalid signature")]
    InvalidSignature,

    /// A completed checkout session carried no usable user identifier.
    #[error("No user id in session")]
    MissingUserId,

    /// The data store reported that the premium update failed.
    #[error("DB update failed")]
    StoreRejected { detail: String },

    /// Anything the handler did not anticipate: malformed JSON after a
    /// valid signature, a transport fault in the store client.
    #[error("Unhandled error")]
    Unhandled(String),
}

impl WebhookError {
    /// Maps the error to its HTTP status code.
    pub fn status_code(&self) -> StatusCode {
        match self {
            WebhookError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,

            // Client/protocol faults; the sender should not retry unmodified
            WebhookError::MissingSignatureHeader
            | WebhookError::BadSignatureFormat
            | WebhookError::InvalidSignature
            | WebhookError::MissingUserId => StatusCode::BAD_REQUEST,

            // Server faults; the provider will redeliver
            WebhookError::StoreRejected { .. } | WebhookError::Unhandled(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Failure detail carried alongside the error message, if any.
    pub fn detail(&self) -> Option<&str> {
        match self {
            WebhookError::StoreRejected { detail } => Some(detail),
            WebhookError::Unhandled(detail) => Some(detail),
            _ => None,
        }
    }

    /// Returns true if the provider should retry delivering this webhook.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            WebhookError::StoreRejected { .. } | WebhookError::Unhandled(_)
        )
    }
}
