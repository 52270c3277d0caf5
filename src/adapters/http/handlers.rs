//! HTTP handlers for the webhook endpoint.
//!
//! Connects the axum route to the application layer command handler and
//! maps `WebhookError` onto the JSON error envelope.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use crate::application::handlers::{ProcessWebhookCommand, ProcessWebhookHandler};
use crate::domain::webhook::{WebhookError, WebhookVerifier};
use crate::ports::ProfileStore;

use super::dto::{ErrorResponse, ReceivedResponse};

/// Shared application state containing all dependencies.
///
/// Cloned per request; dependencies are Arc-wrapped for cheap sharing.
#[derive(Clone)]
pub struct WebhookAppState {
    pub verifier: Arc<WebhookVerifier>,
    pub profile_store: Arc<dyn ProfileStore>,
}

impl WebhookAppState {
    /// Create the command handler from the shared state.
    pub fn process_webhook_handler(&self) -> ProcessWebhookHandler {
        ProcessWebhookHandler::new(self.verifier.clone(), self.profile_store.clone())
    }
}

/// POST /webhooks/stripe - Handle a Stripe webhook delivery.
pub async fn stripe_webhook(
    State(state): State<WebhookAppState>,
    headers: axum::http::HeaderMap,
    body: axum::body::Bytes,
) -> Result<impl IntoResponse, WebhookApiError> {
    let signature = headers
        .get("stripe-signature")
        .and_then(|v| v.to_str().ok())
        .ok_or(WebhookError::MissingSignatureHeader)?;

    let handler = state.process_webhook_handler();
    let cmd = ProcessWebhookCommand {
        payload: body.to_vec(),
        signature: signature.to_string(),
    };

    handler.handle(cmd).await?;

    Ok(Json(ReceivedResponse::ok()))
}

/// OPTIONS /webhooks/stripe - CORS preflight.
///
/// The CORS layer answers preflights before they reach the router; this
/// handler keeps the route well-defined when the router is used bare.
pub async fn preflight() -> StatusCode {
    StatusCode::OK
}

/// Fallback for unsupported methods on the webhook route.
pub async fn method_not_allowed() -> WebhookApiError {
    WebhookError::MethodNotAllowed.into()
}

/// API error type that converts webhook errors to HTTP responses.
pub struct WebhookApiError(WebhookError);

impl From<WebhookError> for WebhookApiError {
    fn from(err: WebhookError) -> Self {
        Self(err)
    }
}

impl IntoResponse for WebhookApiError {
    fn into_response(self) -> axum::response::Response {
        let status = self.0.status_code();

        if status.is_server_error() {
            tracing::error!(error = %self.0, detail = ?self.0.detail(), "webhook processing failed");
        } else {
            tracing::debug!(error = %self.0, "webhook delivery rejected");
        }

        let body = match self.0.detail() {
            Some(detail) => ErrorResponse::with_details(self.0.to_string(), detail),
            None => ErrorResponse::new(self.0.to_string()),
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::StoreError;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct MockProfileStore {
        granted: Mutex<Vec<String>>,
    }

    impl MockProfileStore {
        fn new() -> Self {
            Self {
                granted: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl ProfileStore for MockProfileStore {
        async fn grant_premium(&self, user_id: &str) -> Result<(), StoreError> {
            self.granted.lock().unwrap().push(user_id.to_string());
            Ok(())
        }
    }

    fn test_state() -> WebhookAppState {
        WebhookAppState {
            verifier: Arc::new(WebhookVerifier::new("whsec_test_secret")),
            profile_store: Arc::new(MockProfileStore::new()),
        }
    }

    #[tokio::test]
    async fn missing_signature_header_maps_to_400() {
        let state = test_state();

        let result = stripe_webhook(
            State(state),
            axum::http::HeaderMap::new(),
            axum::body::Bytes::from_static(b"{}"),
        )
        .await;

        let err = result.err().expect("expected rejection");
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn api_error_maps_method_not_allowed_to_405() {
        let err = WebhookApiError(WebhookError::MethodNotAllowed);
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[test]
    fn api_error_maps_invalid_signature_to_400() {
        let err = WebhookApiError(WebhookError::InvalidSignature);
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn api_error_maps_store_rejection_to_500() {
        let err = WebhookApiError(WebhookError::StoreRejected {
            detail: "boom".to_string(),
        });
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn api_error_maps_unhandled_to_500() {
        let err = WebhookApiError(WebhookError::Unhandled("panic-adjacent".to_string()));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
