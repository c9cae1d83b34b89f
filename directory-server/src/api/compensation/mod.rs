//! Compensation API Module

mod handler;

use axum::{Router, routing::post};

use crate::core::ServerState;

/// Compensation router
///
/// The lookup takes the employee in the request body and answers on both
/// `/compensation` and `/compensation/`.
pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/compensation/add/{id}", post(handler::add))
        .route("/compensation", post(handler::find))
        .route("/compensation/", post(handler::find))
}
