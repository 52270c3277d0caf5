//! Webhook domain: signature verification, event envelope, error taxonomy.

mod errors;
mod event;
mod signature;

pub use errors::WebhookError;
pub use event::{CheckoutMetadata, CheckoutSessionObject, StripeEvent, StripeEventType};
pub use signature::{SignatureHeader, WebhookVerifier};

#[cfg(test)]
pub use signature::compute_test_signature;
