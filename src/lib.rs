// ABOUTME: Main library entry point for the diet planner web application
// ABOUTME: Wires the recipe search client, prompt composer, and text generation client
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Diet Planner
//!
//! A small web application that turns dietary preferences into a meal plan.
//!
//! A request flows through four stages:
//!
//! - **Recipe search** (`external::spoonacular_client`): queries the recipe
//!   API with the user's filters, retrying transient network failures and
//!   classifying everything else into a typed error
//! - **Prompt composition** (`llm::prompts`): turns filters and recipes into
//!   a deterministic prompt
//! - **Generation** (`llm::client`): sends the prompt to the text model and
//!   unwraps its response envelope without ever failing on malformed output
//! - **Reconciliation** (`services::reconciliation`): turns the generated text
//!   into recipes the pages can render
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use diet_planner::config::environment::ServerConfig;
//! use diet_planner::errors::AppResult;
//!
//! fn main() -> AppResult<()> {
//!     let config = ServerConfig::from_env()?;
//!     println!("Diet planner configured on port {}", config.http_port);
//!     Ok(())
//! }
//! ```

/// Environment-driven configuration
pub mod config;

/// Constants re-exported from the core crate
pub mod constants;

/// Unified error types
pub mod errors;

/// Clients for third-party `HTTP` APIs
pub mod external;

/// Text generation: model seam, envelope parsing, prompts
pub mod llm;

/// Logging configuration and structured log helpers
pub mod logging;

/// Domain models re-exported from the core crate
pub mod models;

/// `HTTP` route handlers
pub mod routes;

/// Router assembly and server startup
pub mod server;

/// Request orchestration and response reconciliation
pub mod services;

/// `HTML` page rendering
pub mod views;
