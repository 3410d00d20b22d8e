// ABOUTME: Prompt composition for meal plan generation
// ABOUTME: Combines the fixed system instruction with the user's filters and inspiration recipes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Meal Plan Prompts
//!
//! The system instruction is loaded at compile time from a markdown file.
//! The user instruction lists every filter and one line per recipe. The
//! final prompt is the system instruction, a blank line, then the user
//! instruction. Composition is pure: the same input always produces the
//! same bytes.

use std::fmt::Write;

use crate::constants::prompts::MAX_INGREDIENTS_PER_RECIPE;
use crate::models::{Calories, FilterSet, RecipeSummary};

/// Meal planning system instruction
pub const MEAL_PLAN_SYSTEM_PROMPT: &str = include_str!("meal_plan_system.md");

const NO_PREFERENCE: &str = "no preference";
const NONE: &str = "none";

/// Get the meal planning system instruction
#[must_use]
pub fn system_instruction() -> &'static str {
    MEAL_PLAN_SYSTEM_PROMPT.trim_end()
}

/// Build the per-request user instruction
#[must_use]
pub fn user_instruction(filters: &FilterSet, recipes: &[RecipeSummary]) -> String {
    let mut out = String::with_capacity(256 + recipes.len() * 96);
    let calorie_target = filters
        .calorie_target
        .map_or_else(|| NO_PREFERENCE.to_owned(), |c| format!("{c} calories per meal"));
    let meals_per_day = filters
        .meals_per_day
        .map_or_else(|| NO_PREFERENCE.to_owned(), |n| n.to_string());

    // Writing to a String cannot fail
    let _ = writeln!(out, "Meal: {}", filters.query.as_deref().unwrap_or(NO_PREFERENCE));
    let _ = writeln!(out, "Diet: {}", filters.diet.as_deref().unwrap_or(NO_PREFERENCE));
    let _ = writeln!(
        out,
        "Intolerances: {}",
        filters.intolerances.as_deref().unwrap_or(NONE)
    );
    let _ = writeln!(out, "Calorie Target: {calorie_target}");
    let _ = writeln!(
        out,
        "Avoid Ingredients: {}",
        filters.exclude_ingredients.as_deref().unwrap_or(NONE)
    );
    let _ = writeln!(out, "Meals Per Day: {meals_per_day}");

    out.push_str("Recipes:\n");
    if recipes.is_empty() {
        let _ = writeln!(out, "- {NONE}");
    }
    for recipe in recipes {
        let _ = writeln!(out, "- {}", recipe_line(recipe));
    }

    let count = filters.meals_per_day.map_or(1, u32::from);
    if count == 1 {
        out.push_str("Write 1 recipe.");
    } else {
        let _ = write!(out, "Write {count} recipes, one for each meal of the day.");
    }
    out
}

/// Compose the full prompt: system instruction, blank line, user instruction
#[must_use]
pub fn compose(filters: &FilterSet, recipes: &[RecipeSummary]) -> String {
    format!(
        "{}\n\n{}",
        system_instruction(),
        user_instruction(filters, recipes)
    )
}

fn recipe_line(recipe: &RecipeSummary) -> String {
    if recipe.ingredients.is_empty() {
        let calories = match recipe.calories {
            Calories::Known(_) => format!("{} calories", recipe.calories),
            Calories::Unknown => format!("calories {}", recipe.calories),
        };
        format!("{} (id {}, {calories})", recipe.title, recipe.id)
    } else {
        let shown: Vec<&str> = recipe
            .ingredients
            .iter()
            .take(MAX_INGREDIENTS_PER_RECIPE)
            .map(String::as_str)
            .collect();
        format!("{} (ingredients: {})", recipe.title, shown.join(", "))
    }
}
