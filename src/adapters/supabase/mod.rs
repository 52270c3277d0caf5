//! Supabase adapter - `ProfileStore` over the PostgREST API.

mod profile_store;

pub use profile_store::{SupabaseProfileStore, SupabaseStoreConfig};
