//! Stock sync adapter
//!
//! Periodically pulls authoritative stock numbers from the upstream
//! point-of-sale system and forwards them into open count sessions
//! (system quantity only) and the product catalog side channel.
//!
//! One polling loop runs per DRAFT session. A loop self-terminates the
//! moment its session stops being DRAFT, and a fetch failure is absorbed —
//! logged and retried on the next tick, never surfaced to the user and
//! never blocking entry saves (the two writers touch disjoint fields).

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use dashmap::DashMap;
use shared::models::CountStatus;
use sqlx::SqlitePool;
use tokio_util::sync::CancellationToken;

use crate::db::repository::{count_session, product};
use crate::utils::AppError;

/// Upstream stock boundary: product id → authoritative quantity.
#[async_trait]
pub trait UpstreamStockProvider: Send + Sync {
    async fn fetch_upstream_stock(&self) -> Result<HashMap<i64, i64>, AppError>;
}

/// HTTP client against the POS stock endpoint.
///
/// Expects a JSON object keyed by product id:
/// `{"1021": 14, "1022": 3, ...}`
pub struct PosStockClient {
    client: reqwest::Client,
    endpoint: String,
}

impl PosStockClient {
    pub fn new(endpoint: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint,
        }
    }
}

#[async_trait]
impl UpstreamStockProvider for PosStockClient {
    async fn fetch_upstream_stock(&self) -> Result<HashMap<i64, i64>, AppError> {
        let response = self
            .client
            .get(&self.endpoint)
            .timeout(Duration::from_secs(10))
            .send()
            .await
            .map_err(|e| AppError::internal(format!("Upstream stock fetch failed: {e}")))?
            .error_for_status()
            .map_err(|e| AppError::internal(format!("Upstream stock fetch failed: {e}")))?;

        response
            .json::<HashMap<i64, i64>>()
            .await
            .map_err(|e| AppError::internal(format!("Invalid upstream stock payload: {e}")))
    }
}

/// Manages one polling loop per open count session.
#[derive(Clone)]
pub struct StockSyncService {
    pool: SqlitePool,
    provider: Option<Arc<dyn UpstreamStockProvider>>,
    interval: Duration,
    shutdown: CancellationToken,
    /// Session IDs with a live loop, so create + startup never double-spawn
    active: Arc<DashMap<i64, ()>>,
}

impl StockSyncService {
    pub fn new(
        pool: SqlitePool,
        provider: Option<Arc<dyn UpstreamStockProvider>>,
        interval: Duration,
    ) -> Self {
        if provider.is_none() {
            tracing::info!("No upstream stock endpoint configured, stock sync is disabled");
        }
        Self {
            pool,
            provider,
            interval,
            shutdown: CancellationToken::new(),
            active: Arc::new(DashMap::new()),
        }
    }

    /// Start the polling loop for one DRAFT session. No-op when sync is
    /// disabled or a loop is already running for this session.
    pub fn spawn_for_session(&self, session_id: i64) {
        let Some(provider) = self.provider.clone() else {
            return;
        };
        if self.active.insert(session_id, ()).is_some() {
            return;
        }

        let pool = self.pool.clone();
        let interval = self.interval;
        let shutdown = self.shutdown.clone();
        let active = self.active.clone();
        tokio::spawn(async move {
            tracing::debug!(session_id, "Stock sync loop started");
            run_session_loop(&pool, provider.as_ref(), interval, &shutdown, session_id).await;
            active.remove(&session_id);
            tracing::debug!(session_id, "Stock sync loop stopped");
        });
    }

    /// Re-attach loops for sessions that were still DRAFT when the server
    /// last stopped. Called once at startup.
    pub async fn attach_draft_sessions(&self) {
        if self.provider.is_none() {
            return;
        }
        match count_session::find_draft_ids(&self.pool).await {
            Ok(ids) => {
                for id in ids {
                    self.spawn_for_session(id);
                }
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to list draft count sessions for stock sync");
            }
        }
    }

    /// Stop every polling loop (graceful shutdown).
    pub fn shutdown(&self) {
        self.shutdown.cancel();
    }
}

async fn run_session_loop(
    pool: &SqlitePool,
    provider: &dyn UpstreamStockProvider,
    interval: Duration,
    shutdown: &CancellationToken,
    session_id: i64,
) {
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = shutdown.cancelled() => return,
            _ = ticker.tick() => {}
        }

        // Reload the session: the loop must die the moment it is SAVED or
        // gone, without relying on anyone telling it.
        match count_session::find_by_id(pool, session_id).await {
            Ok(Some(session)) if session.status == CountStatus::Draft => {}
            Ok(_) => return,
            Err(e) => {
                tracing::warn!(session_id, error = %e, "Stock sync could not load session, retrying next tick");
                continue;
            }
        }

        let fresh = match provider.fetch_upstream_stock().await {
            Ok(fresh) => fresh,
            Err(e) => {
                // Non-fatal by contract: log, retry on the next tick
                tracing::warn!(session_id, error = %e, "Upstream stock fetch failed, retrying next tick");
                continue;
            }
        };

        // Catalog side channel first, then the session's system quantities
        if let Err(e) = product::update_system_stock(pool, &fresh).await {
            tracing::warn!(error = %e, "Failed to refresh catalog stock from upstream");
        }
        match count_session::sync_system_quantities(pool, session_id, &fresh).await {
            Ok(touched) if touched > 0 => {
                tracing::debug!(session_id, touched, "Synced system quantities from upstream");
            }
            Ok(_) => {}
            Err(e) => {
                tracing::warn!(session_id, error = %e, "Failed to sync system quantities, retrying next tick");
            }
        }
    }
}
