// ABOUTME: FilterSet model holding the user's dietary search criteria
// ABOUTME: Normalizes blank form values and parses numeric fields without panicking
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};

use crate::constants::limits::{MAX_MEALS_PER_DAY, MIN_MEALS_PER_DAY};
use crate::errors::RecipeSearchError;

/// The user's dietary search criteria for one request
///
/// Every field is optional; an empty set is a valid "surprise me" search.
/// Blank strings are stored as `None` so downstream code never has to tell
/// an empty value from a missing one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSet {
    /// Diet name understood by the recipe API (e.g. "vegan", "ketogenic")
    pub diet: Option<String>,
    /// Comma-separated intolerances (e.g. "gluten, dairy")
    pub intolerances: Option<String>,
    /// Upper bound on calories per recipe
    ///
    /// Kept signed so that non-positive values reach validation and are
    /// rejected there instead of being silently clamped.
    pub calorie_target: Option<i64>,
    /// Free-text meal keyword (e.g. "salad")
    pub query: Option<String>,
    /// Comma-separated ingredients to avoid
    pub exclude_ingredients: Option<String>,
    /// Number of meals the plan should cover
    pub meals_per_day: Option<u8>,
}

impl FilterSet {
    /// Create an empty filter set
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the diet
    #[must_use]
    pub fn with_diet(mut self, diet: impl Into<String>) -> Self {
        self.diet = non_blank(diet.into());
        self
    }

    /// Set the intolerances
    #[must_use]
    pub fn with_intolerances(mut self, intolerances: impl Into<String>) -> Self {
        self.intolerances = non_blank(intolerances.into());
        self
    }

    /// Set the calorie target
    #[must_use]
    pub const fn with_calorie_target(mut self, calories: i64) -> Self {
        self.calorie_target = Some(calories);
        self
    }

    /// Set the meal keyword
    #[must_use]
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = non_blank(query.into());
        self
    }

    /// Set the ingredients to avoid
    #[must_use]
    pub fn with_exclude_ingredients(mut self, ingredients: impl Into<String>) -> Self {
        self.exclude_ingredients = non_blank(ingredients.into());
        self
    }

    /// Set the number of meals per day
    #[must_use]
    pub const fn with_meals_per_day(mut self, meals: u8) -> Self {
        self.meals_per_day = Some(meals);
        self
    }

    /// Whether no search criteria were supplied
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.diet.is_none()
            && self.intolerances.is_none()
            && self.calorie_target.is_none()
            && self.query.is_none()
            && self.exclude_ingredients.is_none()
    }

    /// Keyword sent as the recipe API's `query` parameter
    ///
    /// Falls back to the diet when no meal keyword was given.
    #[must_use]
    pub fn search_keyword(&self) -> Option<&str> {
        self.query.as_deref().or(self.diet.as_deref())
    }

    /// Check the filters before any network call
    ///
    /// # Errors
    ///
    /// Returns `RecipeSearchError::InvalidInput` if the calorie target is not
    /// positive or the meal count is outside the accepted range.
    pub fn validate(&self) -> Result<(), RecipeSearchError> {
        if let Some(calories) = self.calorie_target {
            if calories <= 0 {
                return Err(RecipeSearchError::invalid_input(
                    "Calorie target must be a positive number.",
                ));
            }
        }
        if let Some(meals) = self.meals_per_day {
            if !(MIN_MEALS_PER_DAY..=MAX_MEALS_PER_DAY).contains(&meals) {
                return Err(meals_out_of_range());
            }
        }
        Ok(())
    }

    /// Parse a raw calorie target from a form field
    ///
    /// Blank input means "no target".
    ///
    /// # Errors
    ///
    /// Returns `RecipeSearchError::InvalidInput` if the value is not a whole
    /// number or is not positive.
    pub fn parse_calorie_target(raw: Option<&str>) -> Result<Option<i64>, RecipeSearchError> {
        let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
            return Ok(None);
        };
        let calories: i64 = raw.parse().map_err(|_| {
            RecipeSearchError::invalid_input("Please enter a valid number for the calorie target.")
        })?;
        if calories <= 0 {
            return Err(RecipeSearchError::invalid_input(
                "Calorie target must be a positive number.",
            ));
        }
        Ok(Some(calories))
    }

    /// Parse a raw meals-per-day value from a form field
    ///
    /// # Errors
    ///
    /// Returns `RecipeSearchError::InvalidInput` if the value is not a number
    /// between 2 and 5.
    pub fn parse_meals_per_day(raw: Option<&str>) -> Result<Option<u8>, RecipeSearchError> {
        let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
            return Ok(None);
        };
        let meals: u8 = raw.parse().map_err(|_| {
            RecipeSearchError::invalid_input(format!(
                "Please enter a valid number for meals per day ({MIN_MEALS_PER_DAY}-{MAX_MEALS_PER_DAY})."
            ))
        })?;
        if !(MIN_MEALS_PER_DAY..=MAX_MEALS_PER_DAY).contains(&meals) {
            return Err(meals_out_of_range());
        }
        Ok(Some(meals))
    }
}

fn meals_out_of_range() -> RecipeSearchError {
    RecipeSearchError::invalid_input(format!(
        "Meals per day must be between {MIN_MEALS_PER_DAY} and {MAX_MEALS_PER_DAY}."
    ))
}

fn non_blank(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else if trimmed.len() == value.len() {
        Some(value)
    } else {
        Some(trimmed.to_owned())
    }
}
