// ABOUTME: Server-rendered HTML pages for the form, the meal plan, and errors
// ABOUTME: Templates are embedded at compile time and every dynamic value is escaped
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! HTML rendering
//!
//! Pages share one layout template. Dynamic values go through
//! `html_escape` before insertion; the layout's body slot is filled last so
//! user text can never reach a template placeholder.

use std::fmt::Write;

use html_escape::{encode_double_quoted_attribute, encode_text};

use crate::llm::DegradedCause;
use crate::models::{FilterSet, GeneratedRecipe, RecipeSummary};
use crate::services::MealPlan;

/// Shared page layout embedded at compile time
const LAYOUT_TEMPLATE: &str = include_str!("../../templates/layout.html");

/// Preference form embedded at compile time
const INDEX_TEMPLATE: &str = include_str!("../../templates/index.html");

fn layout(title: &str, body: &str) -> String {
    LAYOUT_TEMPLATE
        .replace("{{TITLE}}", &encode_text(title))
        .replace("{{BODY}}", body)
}

/// Render the preference form
#[must_use]
pub fn render_index() -> String {
    layout("Plan your meals", INDEX_TEMPLATE)
}

/// Render the results page
#[must_use]
pub fn render_plan(plan: &MealPlan) -> String {
    let mut body = String::with_capacity(4096);

    body.push_str("<section>\n<h2>Your preferences</h2>\n");
    body.push_str(&render_filters(&plan.filters));
    body.push_str("</section>\n");

    if let Some(cause) = plan.degraded {
        let _ = writeln!(
            body,
            r#"<p class="notice">{}</p>"#,
            encode_text(degraded_notice(cause))
        );
    }

    body.push_str("<section>\n<h2>Your meal plan</h2>\n");
    for recipe in &plan.recipes {
        body.push_str(&render_generated(recipe));
    }
    body.push_str("</section>\n");

    body.push_str("<section>\n<h2>Inspired by</h2>\n<div class=\"recipe-list\">\n");
    for recipe in &plan.inspiration {
        body.push_str(&render_inspiration(recipe));
    }
    body.push_str("</div>\n</section>\n");
    body.push_str("<p><a href=\"/\">Plan another day</a></p>\n");

    layout("Your meal plan", &body)
}

/// Render an error page with a fixed user-facing message
#[must_use]
pub fn render_error(status: u16, message: &str) -> String {
    let body = format!(
        "<div class=\"error\">\n<h2>{}</h2>\n<p>{}</p>\n</div>\n<p><a href=\"/\">Back to the form</a></p>\n",
        encode_text(error_heading(status)),
        encode_text(message)
    );
    layout(error_heading(status), &body)
}

const fn error_heading(status: u16) -> &'static str {
    match status {
        400 => "Please check your preferences",
        404 => "Nothing found",
        405 => "Start from the form",
        503 => "Service unavailable",
        _ => "Something went wrong",
    }
}

const fn degraded_notice(cause: DegradedCause) -> &'static str {
    match cause {
        DegradedCause::NoCandidates | DegradedCause::UnrecognizedCandidate => {
            "The meal plan generator could not produce a structured plan this time."
        }
        DegradedCause::QuotaExceeded
        | DegradedCause::ServiceError
        | DegradedCause::Transport
        | DegradedCause::MalformedEnvelope => {
            "The meal plan generator is having trouble right now. Showing recipe ideas only."
        }
    }
}

fn render_filters(filters: &FilterSet) -> String {
    let mut out = String::from("<ul>\n");
    let rows = [
        ("Meal", filters.query.clone()),
        ("Diet", filters.diet.clone()),
        ("Intolerances", filters.intolerances.clone()),
        (
            "Calorie target",
            filters.calorie_target.map(|c| format!("{c} calories")),
        ),
        ("Avoid", filters.exclude_ingredients.clone()),
        ("Meals per day", filters.meals_per_day.map(|n| n.to_string())),
    ];
    for (label, value) in rows {
        let value = value.unwrap_or_else(|| "No preference".to_owned());
        let _ = writeln!(
            out,
            "<li><strong>{label}:</strong> {}</li>",
            encode_text(&value)
        );
    }
    out.push_str("</ul>\n");
    out
}

fn render_generated(recipe: &GeneratedRecipe) -> String {
    let mut out = String::from("<article class=\"card\">\n");
    let _ = writeln!(out, "<h3>{}</h3>", encode_text(&recipe.title));
    if !recipe.ingredients.is_empty() {
        out.push_str("<ul>\n");
        for ingredient in &recipe.ingredients {
            let _ = writeln!(out, "<li>{}</li>", encode_text(ingredient));
        }
        out.push_str("</ul>\n");
    }
    let _ = writeln!(out, "<pre>{}</pre>", encode_text(&recipe.instructions));
    out.push_str("</article>\n");
    out
}

fn render_inspiration(recipe: &RecipeSummary) -> String {
    let mut out = String::from("<div class=\"card\">\n");
    if let Some(image) = recipe
        .image
        .as_deref()
        .filter(|url| url.starts_with("https://") || url.starts_with("http://"))
    {
        let _ = writeln!(
            out,
            "<img src=\"{}\" alt=\"{}\">",
            encode_double_quoted_attribute(image),
            encode_double_quoted_attribute(&recipe.title)
        );
    }
    let _ = writeln!(out, "<h4>{}</h4>", encode_text(&recipe.title));
    let _ = writeln!(
        out,
        "<p>Calories: {}</p>",
        encode_text(&recipe.calories.to_string())
    );
    out.push_str("</div>\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plan() -> MealPlan {
        MealPlan {
            filters: FilterSet::new().with_diet("vegan"),
            inspiration: vec![RecipeSummary::new(1, "Vegan Bowl").with_calories(480.0)],
            recipes: vec![GeneratedRecipe {
                title: "Tofu <Scramble>".to_owned(),
                ingredients: vec!["tofu".to_owned()],
                instructions: "Crumble & fry.".to_owned(),
            }],
            degraded: None,
        }
    }

    #[test]
    fn test_index_has_form_fields() {
        let html = render_index();
        for field in [
            "name=\"meal\"",
            "name=\"diet\"",
            "name=\"restrictions\"",
            "name=\"target_calories\"",
            "name=\"dislikes\"",
            "name=\"meals_per_day\"",
        ] {
            assert!(html.contains(field), "missing {field}");
        }
    }

    #[test]
    fn test_plan_escapes_generated_text() {
        let html = render_plan(&plan());
        assert!(html.contains("Tofu &lt;Scramble&gt;"));
        assert!(html.contains("Crumble &amp; fry."));
        assert!(html.contains("Vegan Bowl"));
        assert!(html.contains("Calories: 480"));
        assert!(!html.contains("class=\"notice\""));
    }

    #[test]
    fn test_degraded_plan_shows_notice() {
        let mut plan = plan();
        plan.degraded = Some(DegradedCause::QuotaExceeded);
        assert!(render_plan(&plan).contains("class=\"notice\""));
    }

    #[test]
    fn test_user_text_cannot_reach_placeholders() {
        let mut plan = plan();
        plan.recipes[0].instructions = "{{TITLE}} {{BODY}}".to_owned();
        let html = render_plan(&plan);
        assert!(html.contains("{{TITLE}} {{BODY}}"));
    }

    #[test]
    fn test_error_page() {
        let html = render_error(404, "No recipes matched.");
        assert!(html.contains("Nothing found"));
        assert!(html.contains("No recipes matched."));
    }
}
