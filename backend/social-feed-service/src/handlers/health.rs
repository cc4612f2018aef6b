/// Health check endpoints
use actix_web::{web, HttpResponse};
use serde_json::json;
use tracing::warn;

use crate::handlers::AppState;

/// Readiness: verifies the database round-trip
pub async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    match state.repo.health_check().await {
        Ok(()) => HttpResponse::Ok().json(json!({
            "status": "healthy",
            "service": "social-feed-service",
            "version": env!("CARGO_PKG_VERSION"),
            "database": "connected",
        })),
        Err(e) => {
            warn!(error = %e, "health check failed");
            HttpResponse::ServiceUnavailable().json(json!({
                "status": "unhealthy",
                "service": "social-feed-service",
                "database": "unreachable",
            }))
        }
    }
}

pub async fn liveness_check() -> HttpResponse {
    HttpResponse::Ok().json(json!({ "status": "alive" }))
}
