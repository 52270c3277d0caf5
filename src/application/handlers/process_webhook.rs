//! ProcessWebhookHandler - verifies a webhook delivery and applies its
//! state change.
//!
//! This is the one routine the service exists for: authenticate the raw
//! payload, decode the event, and on checkout completion grant premium
//! status through the profile store. All other event types are
//! acknowledged without a write.

use std::sync::Arc;

use crate::domain::webhook::{StripeEvent, StripeEventType, WebhookError, WebhookVerifier};
use crate::ports::ProfileStore;

/// Command to process one webhook delivery.
#[derive(Debug, Clone)]
pub struct ProcessWebhookCommand {
    /// Raw request body, exactly as received.
    pub payload: Vec<u8>,
    /// Value of the stripe-signature header.
    pub signature: String,
}

/// Result of webhook processing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessWebhookOutcome {
    /// Checkout completed; the profile was marked premium.
    PremiumGranted { user_id: String },
    /// Event acknowledged without a state change.
    Acknowledged { event_type: String },
}

/// Handler for inbound payment provider webhooks.
pub struct ProcessWebhookHandler {
    verifier: Arc<WebhookVerifier>,
    profile_store: Arc<dyn ProfileStore>,
}

impl ProcessWebhookHandler {
    pub fn new(verifier: Arc<WebhookVerifier>, profile_store: Arc<dyn ProfileStore>) -> Self {
        Self {
            verifier,
            profile_store,
        }
    }

    pub async fn handle(
        &self,
        cmd: ProcessWebhookCommand,
    ) -> Result<ProcessWebhookOutcome, WebhookError> {
        // 1. Verify the signature over the raw body bytes
        self.verifier.verify(&cmd.payload, &cmd.signature)?;

        // 2. Only now is the payload trusted enough to parse. A decode
        //    failure after a valid signature is an unexpected fault, not
        //    a client error.
        let event: StripeEvent = serde_json::from_slice(&cmd.payload)
            .map_err(|e| WebhookError::Unhandled(e.to_string()))?;

        // 3. Dispatch on event type
        match event.parsed_type() {
            StripeEventType::CheckoutSessionCompleted => {
                self.handle_checkout_completed(&event).await
            }
            StripeEventType::Other(event_type) => {
                tracing::debug!(
                    event_type = %event_type,
                    event_id = %event.id,
                    "acknowledging unhandled event type"
                );
                Ok(ProcessWebhookOutcome::Acknowledged { event_type })
            }
        }
    }

    async fn handle_checkout_completed(
        &self,
        event: &StripeEvent,
    ) -> Result<ProcessWebhookOutcome, WebhookError> {
        let session = event
            .checkout_session()
            .map_err(|e| WebhookError::Unhandled(e.to_string()))?;

        let user_id = session
            .user_id()
            .ok_or(WebhookError::MissingUserId)?
            .to_string();

        self.profile_store.grant_premium(&user_id).await?;

        tracing::info!(
            user_id = %user_id,
            event_id = %event.id,
            "premium granted from completed checkout"
        );

        Ok(ProcessWebhookOutcome::PremiumGranted { user_id })
    }
}
