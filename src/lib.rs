//! Premium Gate - Stripe checkout webhook gateway
//!
//! Receives payment provider webhook notifications, verifies their
//! HMAC-SHA256 signatures, and grants premium status on the matching
//! Supabase profile when a checkout session completes.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
