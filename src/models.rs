// ABOUTME: Re-exports the domain models from diet-planner-core
// ABOUTME: FilterSet for search criteria, recipe types for results and generated plans
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub use diet_planner_core::models::{Calories, FilterSet, GeneratedRecipe, RecipeSummary};
