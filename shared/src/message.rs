//! Notification payloads
//!
//! Structured events emitted by the office server towards the external
//! messaging collaborator (webhook). The payload shape mirrors the
//! resource/action/version triple used for client sync: consumers order
//! events per resource by `seq` and ignore kinds they do not know.

use serde::{Deserialize, Serialize};

/// One structured notification event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotifyPayload {
    /// Resource type ("count_session", "payment_batch", ...)
    pub resource: String,
    /// Per-resource monotonically increasing sequence number
    pub seq: u64,
    /// Event kind ("finalized", "created", "shortage_total_computed", ...)
    pub action: String,
    /// Resource ID
    pub id: String,
    /// Event data (None for bare state-change signals)
    pub data: Option<serde_json::Value>,
    /// Emission time (Unix millis)
    pub emitted_at: i64,
}
