//! Notification service
//!
//! Emits structured events ("count finalized", "batch finalized", ...) to
//! the external messaging collaborator over a configured webhook. Strictly
//! fire-and-forget: a delivery failure is logged and never rolls back or
//! blocks the computation that produced the event.

use std::sync::Arc;

use dashmap::DashMap;
use serde::Serialize;
use shared::message::NotifyPayload;

/// Per-resource sequence numbers
///
/// Lock-free via DashMap; each resource type gets an independent,
/// atomically incremented counter so consumers can order events per
/// resource.
#[derive(Debug, Default)]
struct EventSequences {
    seqs: DashMap<String, u64>,
}

impl EventSequences {
    fn next(&self, resource: &str) -> u64 {
        let mut entry = self.seqs.entry(resource.to_string()).or_insert(0);
        *entry += 1;
        *entry
    }
}

/// Webhook-backed event emitter
#[derive(Clone, Debug)]
pub struct Notifier {
    client: reqwest::Client,
    webhook_url: Option<String>,
    sequences: Arc<EventSequences>,
}

impl Notifier {
    pub fn new(webhook_url: Option<String>) -> Self {
        if webhook_url.is_none() {
            tracing::info!("No notification webhook configured, events will only be logged");
        }
        Self {
            client: reqwest::Client::new(),
            webhook_url,
            sequences: Arc::new(EventSequences::default()),
        }
    }

    /// Emit one structured event.
    ///
    /// Delivery happens on a detached task; the caller never waits on it
    /// and never sees a failure.
    pub fn emit<T: Serialize>(&self, resource: &str, action: &str, id: &str, data: Option<&T>) {
        let seq = self.sequences.next(resource);
        let payload = NotifyPayload {
            resource: resource.to_string(),
            seq,
            action: action.to_string(),
            id: id.to_string(),
            data: data.and_then(|d| serde_json::to_value(d).ok()),
            emitted_at: shared::util::now_millis(),
        };

        tracing::debug!(
            resource = %payload.resource,
            action = %payload.action,
            id = %payload.id,
            seq = payload.seq,
            "Event emitted"
        );

        let Some(url) = self.webhook_url.clone() else {
            return;
        };
        let client = self.client.clone();
        tokio::spawn(async move {
            let result = client
                .post(&url)
                .json(&payload)
                .send()
                .await
                .and_then(|resp| resp.error_for_status());
            if let Err(e) = result {
                tracing::warn!(
                    resource = %payload.resource,
                    action = %payload.action,
                    error = %e,
                    "Failed to deliver notification, dropping event"
                );
            }
        });
    }
}
