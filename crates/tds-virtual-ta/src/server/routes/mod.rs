//! API routes for the virtual TA server

pub mod ask;

use axum::{extract::DefaultBodyLimit, routing::get, Json, Router};
use serde_json::{json, Value};

use crate::server::state::AppState;

pub const SERVICE_NAME: &str = "TDS Virtual TA";

/// Build all API routes
pub fn api_routes(max_body_size: usize) -> Router<AppState> {
    let ask_route = || {
        get(service_index)
            .post(ask::ask)
            .layer(DefaultBodyLimit::max(max_body_size))
    };

    Router::new()
        // Ask (POST) and service index (GET), with and without trailing slash
        .route("/api", ask_route())
        .route("/api/", ask_route())
        .route("/api/health", get(health))
        .route("/api/health/", get(health))
        .route("/api/info", get(info))
        .route("/api/info/", get(info))
}

/// GET /api - service metadata
async fn service_index() -> Json<Value> {
    Json(json!({
        "message": format!("{} API", SERVICE_NAME),
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "main": "/api/",
            "health": "/api/health/",
            "info": "/api/info/"
        }
    }))
}

/// GET /api/health
async fn health() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "service": SERVICE_NAME
    }))
}

/// GET /api/info
async fn info() -> Json<Value> {
    Json(json!({
        "name": SERVICE_NAME,
        "version": env!("CARGO_PKG_VERSION"),
        "description": "Virtual Teaching Assistant for IIT Madras Tools in Data Science course",
        "endpoints": {
            "POST /api": "Ask a question: {\"question\": string, \"image\"?: base64 string}",
            "GET /api/health": "Health status",
            "GET /api/info": "This document"
        }
    }))
}
