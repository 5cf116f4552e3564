//! Ember Office Server - 门店员工后台 (盘点 / 工资 / 批次)
//!
//! # 架构概述
//!
//! 本模块是 Office Server 的主入口，提供以下核心功能：
//!
//! - **盘点对账** (`reconciliation`): 差异计算、替代品建议、缺货金额
//! - **工资核算** (`payroll`): 班次/挂账/罚金/奖金/提成汇总
//! - **工资批次** (`api/batches`): DRAFT → FINALIZED 两阶段生命周期
//! - **库存同步** (`services/stock_sync`): POS 库存定时拉取
//! - **HTTP API** (`api`): RESTful API 接口
//!
//! # 模块结构
//!
//! ```text
//! office-server/src/
//! ├── core/            # 配置、状态、服务器
//! ├── api/             # HTTP 路由和处理器
//! ├── db/              # 数据库层 (SQLite + repository)
//! ├── reconciliation/  # 盘点对账引擎 (纯函数)
//! ├── payroll/         # 工资核算引擎 (纯函数) + 输入装配
//! ├── services/        # 库存同步、事件通知
//! └── utils/           # 工具函数
//! ```

pub mod api;
pub mod core;
pub mod db;
pub mod money;
pub mod payroll;
pub mod reconciliation;
pub mod services;
pub mod utils;

// Re-export 公共类型 (crate:: 前缀避免与内建 core crate 歧义)
pub use crate::core::{Config, Server, ServerState};
pub use utils::{AppError, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

pub fn print_banner() {
    println!(
        r#"
    ______          __
   / ____/___ ___  / /_  ___  _____
  / __/ / __ `__ \/ __ \/ _ \/ ___/
 / /___/ / / / / / /_/ /  __/ /
/_____/_/ /_/ /_/_.___/\___/_/
   ____  _____  _
  / __ \/ __/ /(_)________
 / / / / /_/ __/ / ___/ _ \
/ /_/ / __/ /_/ / /__/  __/
\____/_/  \__/_/\___/\___/
    "#
    );
}
