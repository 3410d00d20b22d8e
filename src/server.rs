// ABOUTME: HTTP server assembly for the diet planner
// ABOUTME: Builds shared state, merges route groups, adds tracing and panic layers, and serves
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Server assembly
//!
//! State is built once at startup and shared read-only behind an `Arc`.

use std::any::Any;
use std::sync::Arc;

use axum::response::{IntoResponse, Response};
use axum::Router;
use tokio::net::TcpListener;
use tokio::signal;
use tower::ServiceBuilder;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::config::ServerConfig;
use crate::errors::{AppError, AppResult};
use crate::routes::{self, ErrorPage, HealthRoutes, MealPlanRoutes};
use crate::services::MealPlanService;

/// State shared by every handler
#[derive(Debug, Clone)]
pub struct AppState {
    /// Meal plan service over both upstream clients
    pub meal_plans: MealPlanService,
}

impl AppState {
    /// Create state from a ready service
    #[must_use]
    pub const fn new(meal_plans: MealPlanService) -> Self {
        Self { meal_plans }
    }

    /// Create state from server configuration
    ///
    /// # Errors
    ///
    /// Returns an error if an upstream client cannot be built
    pub fn from_config(config: &ServerConfig) -> AppResult<Self> {
        Ok(Self::new(MealPlanService::from_config(config)?))
    }
}

/// Build the application router
#[must_use]
pub fn build_router(state: Arc<AppState>) -> Router {
    let router = Router::new()
        .merge(HealthRoutes::routes(Arc::clone(&state)))
        .merge(MealPlanRoutes::routes(state))
        .method_not_allowed_fallback(routes::method_not_allowed)
        .fallback(routes::not_found);
    with_middleware(router)
}

/// Request tracing and panic recovery shared by every route
fn with_middleware(router: Router) -> Router {
    router.layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(CatchPanicLayer::custom(handle_panic)),
    )
}

fn handle_panic(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = match panic.downcast::<String>() {
        Ok(message) => *message,
        Err(payload) => payload
            .downcast_ref::<&str>()
            .map_or_else(|| "non-string panic payload".to_owned(), |s| (*s).to_owned()),
    };
    ErrorPage(AppError::internal(format!("handler panicked: {detail}"))).into_response()
}

/// Bind and serve until Ctrl-C
///
/// # Errors
///
/// Returns an error if state cannot be built, the address cannot be bound,
/// or the server stops with an I/O error
pub async fn serve(config: &ServerConfig) -> AppResult<()> {
    let state = Arc::new(AppState::from_config(config)?);
    let router = build_router(state);

    let addr = format!("{}:{}", config.host, config.http_port);
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("failed to bind {addr}")).with_source(e))?;
    info!("Diet planner listening on http://{addr}");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal("HTTP server stopped with an error").with_source(e))
}

async fn shutdown_signal() {
    if let Err(e) = signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {e}");
        return;
    }
    info!("Shutdown signal received");
}
