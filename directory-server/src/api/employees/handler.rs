//! Employee API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use shared::models::Employee;

use crate::core::ServerState;
use crate::utils::AppResult;
use crate::utils::validation::validate_payload;

/// Create a new employee
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<Employee>,
) -> AppResult<Json<Employee>> {
    validate_payload(&payload)?;
    let employee = state.directory.create(payload)?;
    Ok(Json(employee))
}

/// Get employee by id, `null` when unknown
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Option<Employee>>> {
    let employee = state.directory.read(&id)?;
    Ok(Json(employee))
}

/// Update an employee
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<Employee>,
) -> AppResult<Json<Employee>> {
    validate_payload(&payload)?;
    let employee = state.directory.update(&id, payload)?;
    Ok(Json(employee))
}
