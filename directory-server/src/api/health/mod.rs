//! 健康检查路由
//!
//! | 路径 | 方法 | 说明 |
//! |------|------|------|
//! | /health | GET | 存活检查与员工数量 |
//!
//! ```json
//! { "status": "ok", "version": "0.1.0", "employees": 5 }
//! ```

use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;

use crate::core::ServerState;
use crate::utils::AppResult;

pub fn router() -> Router<ServerState> {
    Router::new().route("/health", get(health))
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    status: &'static str,
    version: &'static str,
    /// 员工记录数量
    employees: usize,
    environment: String,
}

async fn health(State(state): State<ServerState>) -> AppResult<Json<HealthResponse>> {
    let employees = state.directory.count()?;
    Ok(Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        employees,
        environment: state.config.environment.clone(),
    }))
}
