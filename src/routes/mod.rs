//! Routers de Axum de cada proceso

pub mod pricing_routes;
pub mod vehicle_routes;

use axum::{response::Json, routing::get, Router};
use serde_json::{json, Value};
use tower_http::{compression::CompressionLayer, trace::TraceLayer};

use crate::middleware::cors_middleware;
use crate::state::{AppState, PricingState};

/// Router completo de vehicles-api
pub fn create_app(state: AppState, cors_origins: &[String]) -> Router {
    Router::new()
        .route("/health", get(vehicles_health))
        .nest("/cars", vehicle_routes::create_vehicle_router())
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors_middleware(cors_origins))
        .with_state(state)
}

/// Router completo del pricing service
pub fn create_pricing_app(state: PricingState) -> Router {
    Router::new()
        .route("/health", get(pricing_health))
        .nest("/services", pricing_routes::create_pricing_router())
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn vehicles_health() -> Json<Value> {
    health("vehicles-api")
}

async fn pricing_health() -> Json<Value> {
    health("pricing-service")
}

fn health(service: &str) -> Json<Value> {
    Json(json!({
        "service": service,
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
