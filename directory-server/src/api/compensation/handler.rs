//! Compensation API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use shared::models::{Compensation, Employee, EmployeeRef};

use crate::core::ServerState;
use crate::utils::AppResult;
use crate::utils::validation::validate_payload;

/// Append a compensation entry
pub async fn add(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<Compensation>,
) -> AppResult<Json<Employee>> {
    validate_payload(&payload)?;
    let employee = state.compensation.add_compensation(&id, payload)?;
    Ok(Json(employee))
}

/// Compensation history of the employee in the body, oldest first
pub async fn find(
    State(state): State<ServerState>,
    Json(employee): Json<EmployeeRef>,
) -> AppResult<Json<Vec<Compensation>>> {
    let history = state.compensation.find_compensation(&employee)?;
    Ok(Json(history))
}
