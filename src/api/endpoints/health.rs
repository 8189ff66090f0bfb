//! Health check endpoints.

use axum::Json;
use serde::Serialize;
use serde_json::{json, Value};

use crate::config;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub app: &'static str,
    pub version: &'static str,
}

/// `GET /` — minimal liveness probe.
pub async fn root() -> Json<Value> {
    Json(json!({ "status": "MediScan running" }))
}

/// `GET /health` — status with app name and version.
pub async fn check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        app: config::APP_NAME,
        version: config::APP_VERSION,
    })
}
