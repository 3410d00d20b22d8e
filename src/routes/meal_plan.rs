// ABOUTME: Meal plan route handlers for the preference form and plan submission
// ABOUTME: Parses the url-encoded form into filters and renders the plan or an error page
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::Arc;

use axum::extract::rejection::FormRejection;
use axum::extract::State;
use axum::response::Html;
use axum::routing::{get, post};
use axum::{Form, Router};
use serde::Deserialize;
use tracing::info;

use super::ErrorPage;
use crate::errors::{AppError, AppResult};
use crate::models::FilterSet;
use crate::server::AppState;
use crate::views;

/// Raw preference form as submitted by the browser
///
/// Every field is optional text; parsing happens in [`PlanForm::into_filters`]
/// so bad values become a 400 page instead of an extractor rejection.
#[derive(Debug, Default, Deserialize)]
pub struct PlanForm {
    /// Free-text meal keyword
    pub meal: Option<String>,
    /// Diet label
    pub diet: Option<String>,
    /// Comma-separated intolerances
    pub restrictions: Option<String>,
    /// Maximum calories per recipe
    pub target_calories: Option<String>,
    /// Comma-separated ingredients to avoid
    pub dislikes: Option<String>,
    /// Number of meals to plan
    pub meals_per_day: Option<String>,
}

impl PlanForm {
    /// Convert the form into validated filters
    ///
    /// Blank text fields are treated as absent.
    ///
    /// # Errors
    ///
    /// Returns an `InvalidInput` error for a non-numeric or non-positive
    /// calorie target, or a meal count outside 2 to 5.
    pub fn into_filters(self) -> AppResult<FilterSet> {
        let calorie_target = FilterSet::parse_calorie_target(self.target_calories.as_deref())?;
        let meals_per_day = FilterSet::parse_meals_per_day(self.meals_per_day.as_deref())?;

        let mut filters = FilterSet::new()
            .with_query(self.meal.unwrap_or_default())
            .with_diet(self.diet.unwrap_or_default())
            .with_intolerances(self.restrictions.unwrap_or_default())
            .with_exclude_ingredients(self.dislikes.unwrap_or_default());
        if let Some(calories) = calorie_target {
            filters = filters.with_calorie_target(calories);
        }
        if let Some(meals) = meals_per_day {
            filters = filters.with_meals_per_day(meals);
        }
        Ok(filters)
    }
}

/// Meal plan routes implementation
pub struct MealPlanRoutes;

impl MealPlanRoutes {
    /// Create the form and plan routes
    pub fn routes(state: Arc<AppState>) -> Router {
        Router::new()
            .route("/", get(Self::handle_index))
            .route("/plan", post(Self::handle_plan))
            .with_state(state)
    }

    async fn handle_index() -> Html<String> {
        Html(views::render_index())
    }

    async fn handle_plan(
        State(state): State<Arc<AppState>>,
        form: Result<Form<PlanForm>, FormRejection>,
    ) -> Result<Html<String>, ErrorPage> {
        let Form(form) = form.map_err(|rejection| {
            AppError::invalid_input(format!("unreadable form: {rejection}"))
                .with_user_message("We couldn't read your preferences. Please submit the form again.")
        })?;
        let filters = form.into_filters()?;

        let plan = state.meal_plans.plan(filters).await?;
        info!(
            recipes = plan.recipes.len(),
            degraded = plan.degraded.is_some(),
            "Rendering meal plan"
        );
        Ok(Html(views::render_plan(&plan)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_fields_are_absent() {
        let form = PlanForm {
            diet: Some("  ".to_owned()),
            target_calories: Some(String::new()),
            ..PlanForm::default()
        };
        assert!(form.into_filters().unwrap().is_empty());
    }

    #[test]
    fn test_full_form() {
        let form = PlanForm {
            meal: Some("salad".to_owned()),
            diet: Some("vegan".to_owned()),
            restrictions: Some("gluten".to_owned()),
            target_calories: Some("500".to_owned()),
            dislikes: Some("olives".to_owned()),
            meals_per_day: Some("3".to_owned()),
        };
        let filters = form.into_filters().unwrap();
        assert_eq!(filters.query.as_deref(), Some("salad"));
        assert_eq!(filters.diet.as_deref(), Some("vegan"));
        assert_eq!(filters.intolerances.as_deref(), Some("gluten"));
        assert_eq!(filters.exclude_ingredients.as_deref(), Some("olives"));
        assert_eq!(filters.calorie_target, Some(500));
        assert_eq!(filters.meals_per_day, Some(3));
    }

    #[test]
    fn test_bad_calorie_target_is_bad_request() {
        let form = PlanForm {
            target_calories: Some("lots".to_owned()),
            ..PlanForm::default()
        };
        assert_eq!(form.into_filters().unwrap_err().http_status(), 400);
    }

    #[test]
    fn test_meal_count_out_of_range_is_bad_request() {
        let form = PlanForm {
            meals_per_day: Some("9".to_owned()),
            ..PlanForm::default()
        };
        let error = form.into_filters().unwrap_err();
        assert_eq!(error.http_status(), 400);
        assert_eq!(error.public_message(), "Meals per day must be between 2 and 5.");
    }
}
