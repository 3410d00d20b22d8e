// ABOUTME: Application constants re-exported from diet-planner-core
// ABOUTME: Environment variable names, defaults, retry bounds, and generation settings
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub use diet_planner_core::constants::*;
