//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`employees`] - 员工增改查
//! - [`reporting_structure`] - 汇报结构
//! - [`compensation`] - 薪酬历史

pub mod compensation;
pub mod employees;
pub mod health;
pub mod reporting_structure;

use axum::Router;
use tower_http::trace::TraceLayer;

use crate::core::ServerState;

// Re-export common types for handlers
pub use crate::utils::{AppError, AppResult};

/// Assemble every router and apply shared middleware
pub fn build_app(state: ServerState) -> Router {
    Router::new()
        .merge(health::router())
        .merge(employees::router())
        .merge(reporting_structure::router())
        .merge(compensation::router())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
