//! Shared types for the Ember Office back office
//!
//! Data models and utilities used by the office server and its API clients.
//! DB row types derive `sqlx::FromRow` behind the `db` feature so that
//! frontend-facing consumers never pull in sqlx.

pub mod message;
pub mod models;
pub mod util;

// Re-exports
pub use message::NotifyPayload;
pub use serde::{Deserialize, Serialize};
