//! Supabase profile store adapter.
//!
//! Implements the `ProfileStore` trait against the Supabase PostgREST
//! API: an authenticated `PATCH` on the `profiles` table filtered by
//! primary-key equality, setting `is_premium` to true.
//!
//! # Security
//!
//! The service role key bypasses row level security, so it is held in a
//! `secrecy::SecretString` and only attached to outbound request headers.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};

use crate::config::SupabaseConfig;
use crate::ports::{ProfileStore, StoreError};

/// Supabase connection configuration.
#[derive(Clone)]
pub struct SupabaseStoreConfig {
    /// Project base URL (https://project.supabase.co).
    base_url: String,

    /// Service role key used as both `apikey` and bearer token.
    service_role_key: SecretString,
}

impl SupabaseStoreConfig {
    /// Create a new store configuration.
    pub fn new(base_url: impl Into<String>, service_role_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            service_role_key: SecretString::new(service_role_key.into()),
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }
}

impl From<&SupabaseConfig> for SupabaseStoreConfig {
    fn from(config: &SupabaseConfig) -> Self {
        Self::new(config.url.clone(), config.service_role_key.clone())
    }
}

/// Profile store backed by Supabase PostgREST.
pub struct SupabaseProfileStore {
    config: SupabaseStoreConfig,
    http_client: reqwest::Client,
}

impl SupabaseProfileStore {
    /// Create a new store with the given configuration.
    pub fn new(config: SupabaseStoreConfig) -> Self {
        Self {
            config,
            http_client: reqwest::Client::new(),
        }
    }

    fn profiles_url(&self) -> String {
        format!(
            "{}/rest/v1/profiles",
            self.config.base_url.trim_end_matches('/')
        )
    }
}

#[async_trait]
impl ProfileStore for SupabaseProfileStore {
    async fn grant_premium(&self, user_id: &str) -> Result<(), StoreError> {
        let key = self.config.service_role_key.expose_secret();

        let response = self
            .http_client
            .patch(self.profiles_url())
            .query(&[("id", format!("eq.{}", user_id))])
            .header("apikey", key.as_str())
            .bearer_auth(key)
            .header("Prefer", "return=minimal")
            .json(&serde_json::json!({ "is_premium": true }))
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "profile update request failed to complete");
                StoreError::Transport(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let detail = if body.is_empty() {
                status.to_string()
            } else {
                format!("{}: {}", status, body)
            };
            tracing::warn!(status = %status, "profile update rejected by store");
            return Err(StoreError::Rejected { detail });
        }

        tracing::debug!(user_id = %user_id, "profile marked premium");
        Ok(())
    }
}
