//! Directory Server - 员工目录服务
//!
//! # 架构概述
//!
//! - **存储** (`db`): 嵌入式 redb，带版本号的员工记录
//! - **服务** (`services`): 员工增改查、汇报结构计算、薪酬历史
//! - **HTTP API** (`api`): axum 路由和处理器
//!
//! # 模块结构
//!
//! ```text
//! directory-server/src/
//! ├── core/          # 配置、状态、错误、服务器
//! ├── db/            # 记录存储、种子数据
//! ├── services/      # 业务规则
//! ├── api/           # HTTP 路由和处理器
//! └── utils/         # 日志、校验、错误转换
//! ```

/// Audit log helper - records directory mutations
///
/// Written with target `audit`, which the logger routes to `audit/`
/// files that are never cleaned up.
///
/// # Examples
/// ```ignore
/// audit_log!("create", employee.employee_id);
/// audit_log!("add_compensation", id, compensation.to_string());
/// ```
#[macro_export]
macro_rules! audit_log {
    ($action:expr, $employee_id:expr) => {
        tracing::info!(
            target: "audit",
            action = $action,
            employee_id = %$employee_id,
            timestamp = %chrono::Local::now().to_rfc3339(),
            "AUDIT"
        );
    };
    ($action:expr, $employee_id:expr, $details:expr) => {
        tracing::info!(
            target: "audit",
            action = $action,
            employee_id = %$employee_id,
            details = %$details,
            timestamp = %chrono::Local::now().to_rfc3339(),
            "AUDIT"
        );
    };
}

pub mod api;
pub mod core;
pub mod db;
pub mod services;
pub mod utils;

// Re-export 公共类型
pub use api::build_app;
pub use core::{Config, Server, ServerState};
pub use db::{RecordStore, RedbRecordStore};
pub use services::{
    CompensationHistory, DirectoryError, EmployeeDirectory, ReportingStructureCalculator,
};
pub use utils::{AppError, AppResult};

// Re-export logger functions
pub use utils::logger::{cleanup_old_logs, init_logger_with_file};

/// 设置环境 (日志)
pub fn setup_environment(config: &Config) -> anyhow::Result<()> {
    let log_dir = config.log_dir.as_deref().map(std::path::Path::new);
    init_logger_with_file(&config.log_level, config.log_json, log_dir)
}
