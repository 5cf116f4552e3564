//! 服务器状态
//!
//! [`ServerState`] 持有所有服务的共享引用，使用 Arc/池内部共享实现
//! 低成本 Clone，可直接作为 axum 的应用状态。

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use sqlx::SqlitePool;

use crate::core::Config;
use crate::db::DbService;
use crate::services::{Notifier, PosStockClient, StockSyncService, UpstreamStockProvider};

/// 服务器状态 - 持有所有服务的单例引用
///
/// | 字段 | 说明 |
/// |------|------|
/// | config | 配置项 (不可变) |
/// | pool | SQLite 连接池 |
/// | notifier | 事件通知服务 |
/// | stock_sync | POS 库存同步服务 |
#[derive(Clone)]
pub struct ServerState {
    pub config: Config,
    pub pool: SqlitePool,
    pub notifier: Notifier,
    pub stock_sync: StockSyncService,
}

impl ServerState {
    /// 初始化服务器状态
    ///
    /// 按顺序初始化：工作目录结构 → 数据库 → 各服务。
    ///
    /// # Panics
    ///
    /// 数据库初始化失败时 panic
    pub async fn initialize(config: &Config) -> Self {
        config
            .ensure_work_dir_structure()
            .expect("Failed to create work directory structure");

        let db_path = config.database_dir().join("office.db");
        let db_service = DbService::new(&db_path.to_string_lossy())
            .await
            .expect("Failed to initialize database");
        let pool = db_service.pool;

        let notifier = Notifier::new(config.notify_webhook_url.clone());

        let provider: Option<Arc<dyn UpstreamStockProvider>> = config
            .pos_stock_url
            .clone()
            .map(|url| Arc::new(PosStockClient::new(url)) as Arc<dyn UpstreamStockProvider>);
        let stock_sync = StockSyncService::new(
            pool.clone(),
            provider,
            Duration::from_secs(config.stock_sync_interval_secs),
        );

        Self {
            config: config.clone(),
            pool,
            notifier,
            stock_sync,
        }
    }

    /// 启动后台任务
    ///
    /// 必须在 `Server::run()` 之前调用。重新挂载所有 DRAFT 盘点会话的
    /// 库存同步轮询。
    pub async fn start_background_tasks(&self) {
        self.stock_sync.attach_draft_sessions().await;
    }

    /// 发出资源变更事件 (fire-and-forget)
    ///
    /// # 参数
    /// - `resource`: 资源类型 (如 "count_session", "payment_batch")
    /// - `action`: 事件类型 ("created", "finalized", ...)
    /// - `id`: 资源 ID
    /// - `data`: 事件数据 (可选)
    pub fn notify<T: Serialize>(&self, resource: &str, action: &str, id: &str, data: Option<&T>) {
        self.notifier.emit(resource, action, id, data);
    }
}
