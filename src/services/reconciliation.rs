// ABOUTME: Response reconciliation turning generated text into renderable recipes
// ABOUTME: Parses a JSON recipe array when possible and wraps anything else as free text
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::Deserialize;

use crate::llm::Generation;
use crate::models::GeneratedRecipe;

/// Recipe object as the model is asked to write it
#[derive(Debug, Deserialize)]
struct RawGeneratedRecipe {
    title: String,
    #[serde(default)]
    ingredients: Vec<String>,
    instructions: Instructions,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Instructions {
    Text(String),
    Steps(Vec<String>),
}

impl From<RawGeneratedRecipe> for GeneratedRecipe {
    fn from(raw: RawGeneratedRecipe) -> Self {
        let instructions = match raw.instructions {
            Instructions::Text(text) => text,
            Instructions::Steps(steps) => steps.join("\n"),
        };
        Self {
            title: raw.title,
            ingredients: raw.ingredients,
            instructions,
        }
    }
}

/// Turn raw generated text into recipes
///
/// A JSON array of recipe objects (optionally inside a Markdown code fence)
/// becomes one entry per element. Anything else, including an empty array,
/// becomes a single entry whose instructions are the raw text.
#[must_use]
pub fn reconcile(raw: &str) -> Vec<GeneratedRecipe> {
    parse_recipe_array(strip_code_fence(raw))
        .unwrap_or_else(|| vec![GeneratedRecipe::from_unstructured(raw)])
}

/// Reconcile a generation result
///
/// Degraded text is never parsed.
#[must_use]
pub fn reconcile_generation(generation: &Generation) -> Vec<GeneratedRecipe> {
    match generation {
        Generation::Complete(text) => reconcile(text),
        Generation::Degraded { text, .. } => vec![GeneratedRecipe::from_unstructured(text)],
    }
}

fn parse_recipe_array(text: &str) -> Option<Vec<GeneratedRecipe>> {
    let raw: Vec<RawGeneratedRecipe> = serde_json::from_str(text).ok()?;
    if raw.is_empty() {
        return None;
    }
    Some(raw.into_iter().map(GeneratedRecipe::from).collect())
}

fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let Some(body) = rest.strip_suffix("```") else {
        return trimmed;
    };
    // Drop the info string (e.g. "json") on the opening fence line
    body.split_once('\n').map_or(body, |(_, content)| content).trim()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::reconciliation::FALLBACK_TITLE;
    use crate::llm::DegradedCause;

    #[test]
    fn test_structured_array() {
        let raw = r#"[
            {"title": "Chickpea Curry", "ingredients": ["chickpeas", "coconut milk"],
             "instructions": "Simmer everything for 20 minutes."},
            {"title": "Overnight Oats", "instructions": ["Mix oats and milk.", "Chill overnight."]}
        ]"#;
        let recipes = reconcile(raw);
        assert_eq!(recipes.len(), 2);
        assert_eq!(recipes[0].title, "Chickpea Curry");
        assert_eq!(recipes[0].ingredients, vec!["chickpeas", "coconut milk"]);
        assert!(recipes[1].ingredients.is_empty());
        assert_eq!(recipes[1].instructions, "Mix oats and milk.\nChill overnight.");
    }

    #[test]
    fn test_fenced_array() {
        let raw = "```json\n[{\"title\": \"Salad\", \"ingredients\": [], \"instructions\": \"Toss.\"}]\n```";
        let recipes = reconcile(raw);
        assert_eq!(recipes.len(), 1);
        assert_eq!(recipes[0].title, "Salad");
    }

    #[test]
    fn test_single_object_is_wrapped() {
        let raw = r#"{"title": "x"}"#;
        let recipes = reconcile(raw);
        assert_eq!(recipes.len(), 1);
        assert_eq!(recipes[0].title, FALLBACK_TITLE);
        assert_eq!(recipes[0].instructions, raw);
    }

    #[test]
    fn test_prose_is_wrapped() {
        let raw = "Breakfast: oatmeal with berries.\nLunch: lentil soup.";
        assert_eq!(reconcile(raw), vec![GeneratedRecipe::from_unstructured(raw)]);
    }

    #[test]
    fn test_empty_array_is_wrapped() {
        assert_eq!(reconcile("[]")[0].instructions, "[]");
    }

    #[test]
    fn test_element_without_recipe_shape_is_wrapped() {
        let raw = r#"[{"title": "Soup", "instructions": "Boil."}, {"name": "not a recipe"}]"#;
        let recipes = reconcile(raw);
        assert_eq!(recipes.len(), 1);
        assert_eq!(recipes[0].instructions, raw);
    }

    #[test]
    fn test_degraded_generation_is_never_parsed() {
        let text = r#"[{"title": "Looks structured", "instructions": "but degraded"}]"#;
        let generation = Generation::Degraded {
            text: text.to_owned(),
            cause: DegradedCause::UnrecognizedCandidate,
        };
        let recipes = reconcile_generation(&generation);
        assert_eq!(recipes.len(), 1);
        assert_eq!(recipes[0].title, FALLBACK_TITLE);
        assert_eq!(recipes[0].instructions, text);
    }
}
