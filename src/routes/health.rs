// ABOUTME: Health check route handlers for service monitoring and status endpoints
// ABOUTME: Reports liveness and whether the text generation model is configured
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Health check routes
//!
//! `/health` always answers while the process is up. `/ready` also reports
//! whether meal plans can be generated; recipe search needs no readiness
//! probe because its key is required at startup.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;
use serde_json::{json, Value};

use crate::server::AppState;

/// Health routes implementation
pub struct HealthRoutes;

impl HealthRoutes {
    /// Create all health check routes
    pub fn routes(state: Arc<AppState>) -> Router {
        Router::new()
            .route("/health", get(Self::handle_health))
            .route("/ready", get(Self::handle_ready))
            .with_state(state)
    }

    async fn handle_health() -> Json<Value> {
        Json(json!({
            "status": "healthy",
            "service": env!("CARGO_PKG_NAME"),
            "version": env!("CARGO_PKG_VERSION"),
            "timestamp": Utc::now().to_rfc3339()
        }))
    }

    async fn handle_ready(State(state): State<Arc<AppState>>) -> (StatusCode, Json<Value>) {
        let generation = state.meal_plans.generation_client();
        let (status, label) = if generation.is_ready() {
            (StatusCode::OK, "ready")
        } else {
            (StatusCode::SERVICE_UNAVAILABLE, "degraded")
        };
        (
            status,
            Json(json!({
                "status": label,
                "generation": generation.handle().status(),
                "timestamp": Utc::now().to_rfc3339()
            })),
        )
    }
}
