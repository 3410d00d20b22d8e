// ABOUTME: Domain service layer for meal plan business logic extracted from route handlers
// ABOUTME: Orchestrates search, prompt composition, generation, and reconciliation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Domain service layer
//!
//! Route handlers stay thin: they parse the form, call
//! [`MealPlanService::plan`], and render what comes back.

/// Meal plan orchestration over the recipe and generation clients
pub mod meal_plan;

/// Reshaping generated text into renderable recipes
pub mod reconciliation;

pub use meal_plan::{MealPlan, MealPlanService};
pub use reconciliation::{reconcile, reconcile_generation};
