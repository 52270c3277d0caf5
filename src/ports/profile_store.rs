//! Profile store port for the backing data store.
//!
//! The store owns the user account records; this service only ever flips
//! one boolean attribute on them. Implementations must keep the operation
//! idempotent so duplicate webhook deliveries are safe.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::webhook::WebhookError;

/// Port for the profile data store.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Sets the premium flag to true on the profile with the given id.
    ///
    /// This is an idempotent set, not a toggle: applying it to an already
    /// premium profile leaves the record unchanged.
    async fn grant_premium(&self, user_id: &str) -> Result<(), StoreError>;
}

/// Errors reported by a profile store implementation.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The store processed the request and reported a failure
    /// (constraint violation, permission error, unknown row).
    #[error("store rejected update: {detail}")]
    Rejected { detail: String },

    /// The request never completed (connect failure, timeout).
    #[error("store transport fault: {0}")]
    Transport(String),
}

impl From<StoreError> for WebhookError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Rejected { detail } => WebhookError::StoreRejected { detail },
            StoreError::Transport(detail) => WebhookError::Unhandled(detail),
        }
    }
}
