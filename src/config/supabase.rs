//! Supabase configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Supabase configuration (PostgREST data store)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SupabaseConfig {
    /// Project base URL (e.g. https://project.supabase.co)
    pub url: String,

    /// Service role key used for the admin profile update
    pub service_role_key: String,
}

impl SupabaseConfig {
    /// Validate Supabase configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.url.is_empty() {
            return Err(ValidationError::MissingRequired("SUPABASE_URL"));
        }
        if self.service_role_key.is_empty() {
            return Err(ValidationError::MissingRequired(
                "SUPABASE_SERVICE_ROLE_KEY",
            ));
        }

        if !self.url.starts_with("http://") && !self.url.starts_with("https://") {
            return Err(ValidationError::InvalidSupabaseUrl);
        }

        Ok(())
    }
}
