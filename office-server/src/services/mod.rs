//! 服务模块 - 后台服务与外部协作方
//!
//! - [`Notifier`] - 结构化事件通知 (webhook)
//! - [`StockSyncService`] - POS 库存同步

pub mod notifier;
pub mod stock_sync;

pub use notifier::Notifier;
pub use stock_sync::{PosStockClient, StockSyncService, UpstreamStockProvider};
