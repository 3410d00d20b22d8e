// ABOUTME: Recipe models for normalized search results and generated meal plans
// ABOUTME: Calories are always present, using an explicit Unknown sentinel
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

use crate::constants::reconciliation::FALLBACK_TITLE;
use crate::constants::sentinels::UNKNOWN_CALORIES;

/// Calorie count of a recipe
///
/// Serializes as a number, or as the string `"unknown"` when the recipe API
/// did not report one.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Calories {
    /// Calories reported upstream
    Known(f64),
    /// Not reported upstream
    #[default]
    Unknown,
}

impl Calories {
    /// Calorie amount if known
    #[must_use]
    pub const fn amount(self) -> Option<f64> {
        match self {
            Self::Known(amount) => Some(amount),
            Self::Unknown => None,
        }
    }

    /// Whether the calorie count is known
    #[must_use]
    pub const fn is_known(self) -> bool {
        matches!(self, Self::Known(_))
    }
}

impl From<Option<f64>> for Calories {
    fn from(value: Option<f64>) -> Self {
        value.map_or(Self::Unknown, Self::Known)
    }
}

impl fmt::Display for Calories {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Known(amount) => write!(f, "{}", amount.round()),
            Self::Unknown => f.write_str(UNKNOWN_CALORIES),
        }
    }
}

impl Serialize for Calories {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Known(amount) => serializer.serialize_f64(*amount),
            Self::Unknown => serializer.serialize_str(UNKNOWN_CALORIES),
        }
    }
}

/// One recipe returned by the recipe search, normalized
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecipeSummary {
    /// Recipe title
    pub title: String,
    /// Recipe API identifier
    pub id: i64,
    /// Calories per serving
    pub calories: Calories,
    /// Image URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Ingredient names, when the search result carried them
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub ingredients: Vec<String>,
}

impl RecipeSummary {
    /// Create a summary with unknown calories and no image or ingredients
    #[must_use]
    pub fn new(id: i64, title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            id,
            calories: Calories::Unknown,
            image: None,
            ingredients: Vec::new(),
        }
    }

    /// Set the calories
    #[must_use]
    pub const fn with_calories(mut self, calories: f64) -> Self {
        self.calories = Calories::Known(calories);
        self
    }

    /// Set the ingredient names
    #[must_use]
    pub fn with_ingredients(mut self, ingredients: Vec<String>) -> Self {
        self.ingredients = ingredients;
        self
    }
}

/// A recipe produced by the text generator, in the shape the pages render
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedRecipe {
    /// Recipe title
    pub title: String,
    /// Ingredient lines
    #[serde(default)]
    pub ingredients: Vec<String>,
    /// Preparation steps
    pub instructions: String,
}

impl GeneratedRecipe {
    /// Wrap free text into a single entry with the text as its instructions
    #[must_use]
    pub fn from_unstructured(text: &str) -> Self {
        Self {
            title: FALLBACK_TITLE.to_owned(),
            ingredients: Vec::new(),
            instructions: text.to_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calories_serialization() {
        let known = serde_json::to_value(Calories::Known(480.0)).unwrap();
        assert_eq!(known, serde_json::json!(480.0));

        let unknown = serde_json::to_value(Calories::Unknown).unwrap();
        assert_eq!(unknown, serde_json::json!("unknown"));
    }

    #[test]
    fn test_calories_display() {
        assert_eq!(Calories::Known(480.0).to_string(), "480");
        assert_eq!(Calories::Known(312.6).to_string(), "313");
        assert_eq!(Calories::Unknown.to_string(), "unknown");
    }

    #[test]
    fn test_summary_always_serializes_calories() {
        let summary = RecipeSummary::new(7, "Plain Rice");
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["calories"], "unknown");
        assert!(json.get("image").is_none());
    }

    #[test]
    fn test_unstructured_wrapping() {
        let recipe = GeneratedRecipe::from_unstructured("Eat more greens.");
        assert_eq!(recipe.title, FALLBACK_TITLE);
        assert!(recipe.ingredients.is_empty());
        assert_eq!(recipe.instructions, "Eat more greens.");
    }
}
