// ABOUTME: External API clients module for third-party recipe data
// ABOUTME: Spoonacular recipe search and the shared retry policy
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Retry policy shared by outbound HTTP clients
pub mod retry;
/// Spoonacular `complexSearch` client
pub mod spoonacular_client;

pub use retry::RetryConfig;
pub use spoonacular_client::{SearchOutcome, SpoonacularClient};
