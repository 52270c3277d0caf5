//! Axum router configuration for the webhook endpoint.
//!
//! One route, two methods. Webhooks carry no user authentication; the
//! request is authenticated by its signature alone.

use axum::http::header::{HeaderName, AUTHORIZATION, CONTENT_TYPE};
use axum::http::Method;
use axum::routing::post;
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::handlers::{method_not_allowed, preflight, stripe_webhook, WebhookAppState};

/// Create the webhook router.
///
/// # Routes
/// - `POST /webhooks/stripe` - Handle Stripe webhooks (signature verified)
/// - `OPTIONS /webhooks/stripe` - CORS preflight
///
/// Any other method on the route falls through to a JSON 405 so that
/// every response, success or failure, stays machine-readable.
pub fn webhook_routes() -> Router<WebhookAppState> {
    Router::new().route(
        "/webhooks/stripe",
        post(stripe_webhook)
            .options(preflight)
            .fallback(method_not_allowed),
    )
}

/// Build the complete application with middleware and state.
pub fn app(state: WebhookAppState) -> Router {
    webhook_routes()
        .layer(TraceLayer::new_for_http())
        // CORS is outermost so every response carries the headers
        .layer(cors_layer())
        .with_state(state)
}

/// CORS policy for the webhook surface.
///
/// Webhooks are server-to-server, but failure payloads stay readable to
/// browser-based callers by always carrying permissive CORS headers.
fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::POST, Method::OPTIONS])
        .allow_headers([
            AUTHORIZATION,
            HeaderName::from_static("x-client-info"),
            HeaderName::from_static("apikey"),
            CONTENT_TYPE,
            HeaderName::from_static("stripe-signature"),
        ])
}
