//! HTTP adapter - the webhook endpoint surface.

mod dto;
mod handlers;
mod routes;

pub use dto::{ErrorResponse, ReceivedResponse};
pub use handlers::{stripe_webhook, WebhookApiError, WebhookAppState};
pub use routes::{app, webhook_routes};
