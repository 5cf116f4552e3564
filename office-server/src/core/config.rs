//! 服务器配置
//!
//! # 环境变量
//!
//! 所有配置项都可以通过环境变量覆盖：
//!
//! | 环境变量 | 默认值 | 说明 |
//! |----------|--------|------|
//! | WORK_DIR | /var/lib/ember/office | 工作目录 |
//! | HTTP_PORT | 3000 | HTTP 服务端口 |
//! | TIMEZONE | Europe/Madrid | 业务时区 |
//! | POS_STOCK_URL | (unset) | POS 库存接口；未设置时停用库存同步 |
//! | STOCK_SYNC_INTERVAL_SECS | 30 | 库存同步间隔 (秒) |
//! | NOTIFY_WEBHOOK_URL | (unset) | 通知 webhook；未设置时仅记录日志 |
//! | ENVIRONMENT | development | 运行环境 |
//!
//! # 示例
//!
//! ```ignore
//! WORK_DIR=/data/ember HTTP_PORT=8080 cargo run
//! ```

use std::path::PathBuf;

use chrono_tz::Tz;

#[derive(Debug, Clone)]
pub struct Config {
    /// 工作目录，存储数据库、日志等文件
    pub work_dir: String,
    /// HTTP API 服务端口
    pub http_port: u16,
    /// 业务时区 (日期边界、营业日计算)
    pub timezone: Tz,
    /// POS 库存接口地址 (None = 停用库存同步)
    pub pos_stock_url: Option<String>,
    /// 库存同步间隔 (秒)
    pub stock_sync_interval_secs: u64,
    /// 通知 webhook 地址 (None = 仅日志)
    pub notify_webhook_url: Option<String>,
    /// 运行环境: development | staging | production
    pub environment: String,
}

impl Config {
    /// 从环境变量加载配置，未设置时使用默认值
    pub fn from_env() -> Self {
        let timezone = std::env::var("TIMEZONE")
            .ok()
            .and_then(|tz| {
                tz.parse::<Tz>()
                    .map_err(|_| tracing::warn!("Invalid TIMEZONE '{}', falling back to Europe/Madrid", tz))
                    .ok()
            })
            .unwrap_or(chrono_tz::Europe::Madrid);

        Self {
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "/var/lib/ember/office".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            timezone,
            pos_stock_url: std::env::var("POS_STOCK_URL").ok().filter(|s| !s.is_empty()),
            stock_sync_interval_secs: std::env::var("STOCK_SYNC_INTERVAL_SECS")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(30),
            notify_webhook_url: std::env::var("NOTIFY_WEBHOOK_URL")
                .ok()
                .filter(|s| !s.is_empty()),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
        }
    }

    /// 使用自定义值覆盖部分配置，常用于测试场景
    pub fn with_overrides(work_dir: impl Into<String>, http_port: u16) -> Self {
        let mut config = Self::from_env();
        config.work_dir = work_dir.into();
        config.http_port = http_port;
        config
    }

    /// 数据库目录 (work_dir/database)
    pub fn database_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("database")
    }

    /// 日志目录 (work_dir/logs)
    pub fn logs_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("logs")
    }

    /// 确保工作目录结构存在
    pub fn ensure_work_dir_structure(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(self.database_dir())?;
        std::fs::create_dir_all(self.logs_dir())?;
        Ok(())
    }
}
