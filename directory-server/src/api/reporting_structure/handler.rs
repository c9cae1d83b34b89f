//! Reporting Structure API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use shared::models::ReportingStructure;

use crate::core::ServerState;
use crate::utils::AppResult;

/// Employee plus transitive report count; both `null` for an unknown id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<ReportingStructure>> {
    let structure = state.reporting.find_reporting_structure(&id)?;
    Ok(Json(structure))
}
