//! Health check endpoint.

use actix_web::{HttpResponse, web};
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub database: &'static str,
    pub storage: &'static str,
    pub timestamp: String,
}

/// GET /api/health - reports which adapters the server is running on.
pub async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        database: state.backends.database,
        storage: state.backends.storage,
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}
