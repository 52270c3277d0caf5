//! Stripe webhook event types.
//!
//! Defines the structures for parsing verified webhook payloads. Only the
//! fields this service acts on are captured; everything else in Stripe's
//! event schema is ignored.

use serde::{Deserialize, Serialize};

/// Stripe webhook event envelope (simplified).
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StripeEvent {
    /// Unique identifier for the event (evt_xxx format).
    #[serde(default)]
    pub id: String,

    /// Type of event (e.g., "checkout.session.completed").
    #[serde(rename = "type")]
    pub event_type: String,

    /// Time at which the event was created (Unix timestamp).
    #[serde(default)]
    pub created: i64,

    /// Object containing event-specific data.
    pub data: StripeEventData,

    /// Whether this is a live mode event (vs test mode).
    #[serde(default)]
    pub livemode: bool,
}

/// Container for event-specific data.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StripeEventData {
    /// The object that triggered the event (polymorphic based on event type).
    pub object: serde_json::Value,
}

impl StripeEvent {
    /// Parse the event type into a known enum variant.
    pub fn parsed_type(&self) -> StripeEventType {
        StripeEventType::from_str(&self.event_type)
    }

    /// Decodes `data.object` as a checkout session.
    pub fn checkout_session(&self) -> Result<CheckoutSessionObject, serde_json::Error> {
        serde_json::from_value(self.data.object.clone())
    }
}

/// Event types this service recognizes.
///
/// Everything other than checkout completion falls into `Other`, which is
/// acknowledged without a state change. Keeping the raw type string lets
/// the fall-through branch log what it skipped instead of swallowing it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StripeEventType {
    /// Checkout session completed successfully.
    CheckoutSessionCompleted,
    /// Any other event type; carried verbatim for logging.
    Other(String),
}

impl StripeEventType {
    /// Parse event type from its wire string.
    pub fn from_str(s: &str) -> Self {
        match s {
            "checkout.session.completed" => Self::CheckoutSessionCompleted,
            other => Self::Other(other.to_string()),
        }
    }
}

/// The subset of a checkout session object this service reads.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CheckoutSessionObject {
    /// Reference supplied by the caller when the session was created.
    #[serde(default)]
    pub client_reference_id: Option<String>,

    /// Free-form metadata attached to the session.
    #[serde(default)]
    pub metadata: Option<CheckoutMetadata>,
}

/// Session metadata fields this service reads.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CheckoutMetadata {
    #[serde(default)]
    pub supabase_user_id: Option<String>,
}

impl CheckoutSessionObject {
    /// Extracts the user identifier for the premium grant.
    ///
    /// `client_reference_id` wins; `metadata.supabase_user_id` is the
    /// fallback. Empty strings count as absent.
    pub fn user_id(&self) -> Option<&str> {
        non_empty(self.client_reference_id.as_deref()).or_else(|| {
            non_empty(
                self.metadata
                    .as_ref()
                    .and_then(|m| m.supabase_user_id.as_deref()),
            )
        })
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.is_empty())
}
