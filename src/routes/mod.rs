// ABOUTME: Route module organization for the diet planner HTTP server
// ABOUTME: Exposes health and meal plan routes plus the HTML error responder
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! `HTTP` routes
//!
//! Each domain has its own routes struct with a `routes()` constructor.
//! Handlers return [`ErrorPage`] on failure so every error reaches the
//! browser as a rendered page with a fixed message.

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};

use crate::errors::{AppError, ErrorCode};
use crate::logging::AppLogger;
use crate::views;

/// Liveness and readiness endpoints
pub mod health;

/// Preference form and meal plan submission
pub mod meal_plan;

pub use health::HealthRoutes;
pub use meal_plan::{MealPlanRoutes, PlanForm};

/// HTML error response wrapping an [`AppError`]
///
/// The page shows only [`AppError::public_message`]; the detailed message
/// goes to the log.
#[derive(Debug)]
pub struct ErrorPage(pub AppError);

impl From<AppError> for ErrorPage {
    fn from(error: AppError) -> Self {
        Self(error)
    }
}

impl IntoResponse for ErrorPage {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.http_status())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        AppLogger::log_error_page(status.as_u16(), &self.0);
        let body = views::render_error(status.as_u16(), self.0.public_message());
        (status, Html(body)).into_response()
    }
}

/// Fallback for known paths requested with the wrong method (e.g. `GET /plan`)
pub async fn method_not_allowed() -> ErrorPage {
    ErrorPage(AppError::new(
        ErrorCode::MethodNotAllowed,
        "request method not supported for this path",
    ))
}

/// Fallback for unknown paths
pub async fn not_found() -> ErrorPage {
    ErrorPage(
        AppError::not_found("page").with_user_message("The page you requested does not exist."),
    )
}
