// ABOUTME: Re-exports the unified error types from diet-planner-core
// ABOUTME: Keeps `crate::errors::*` paths stable for the application modules
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub use diet_planner_core::errors::{
    AppError, AppResult, ErrorCode, GenerationError, RecipeSearchError,
};
