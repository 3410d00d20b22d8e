// ABOUTME: Core data models shared by the clients, services, and web layer
// ABOUTME: Search filters, normalized recipe summaries, and generated recipes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Dietary search criteria for one request
pub mod filters;
/// Normalized recipe search results and generated recipes
pub mod recipe;

pub use filters::FilterSet;
pub use recipe::{Calories, GeneratedRecipe, RecipeSummary};
