// ABOUTME: Core types and constants for the diet planner web application
// ABOUTME: Foundation crate with error handling, filter and recipe models, and constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Diet Planner Core
//!
//! Foundation crate providing shared types and constants for the diet planner.
//! This crate is designed to change infrequently, enabling incremental
//! compilation benefits in the workspace.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError`, `ErrorCode`, and the
//!   recipe search and text generation error types
//! - **constants**: Application-wide constants organized by domain
//! - **models**: Search filters, recipe summaries, and generated recipes

/// Unified error handling system with standard error codes
pub mod errors;

/// Application constants and configuration values organized by domain
pub mod constants;

/// Core data models (`FilterSet`, `RecipeSummary`, `GeneratedRecipe`)
pub mod models;
