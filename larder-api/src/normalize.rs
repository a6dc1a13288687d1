//! Upstream meal payload → [`RecipeRecord`]
//!
//! TheMealDB records are flat JSON objects with loosely typed fields: values
//! may be strings, `null`, empty strings, or (rarely) numbers. Ingredients are
//! spread over twenty positional `strIngredientN` / `strMeasureN` pairs and
//! the method is a single free-text `strInstructions` field.

use larder_common::RecipeRecord;
use serde_json::{Map, Value};

/// A single upstream meal object, kept untyped
pub type MealPayload = Map<String, Value>;

/// Number of positional ingredient/measure pairs in an upstream record
pub const INGREDIENT_SLOTS: usize = 20;

/// Text value of a field; numbers are stringified, anything else is absent.
pub fn field_text(meal: &MealPayload, key: &str) -> Option<String> {
    match meal.get(key)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Collect `"<measure> <ingredient>"` lines from positions 1..=20.
///
/// Positions with a blank or missing ingredient are skipped; later positions
/// are still scanned since upstream data can have gaps.
pub fn extract_ingredients(meal: &MealPayload) -> Vec<String> {
    let mut ingredients = Vec::new();

    for i in 1..=INGREDIENT_SLOTS {
        let ingredient = match field_text(meal, &format!("strIngredient{}", i)) {
            Some(text) if !text.trim().is_empty() => text,
            _ => continue,
        };
        let measure = field_text(meal, &format!("strMeasure{}", i)).unwrap_or_default();

        ingredients.push(format!("{} {}", measure, ingredient).trim().to_string());
    }

    ingredients
}

/// Split instructions into steps on `\r\n`, `\r` or `\n`, dropping blank lines.
pub fn split_steps(instructions: &str) -> Vec<String> {
    instructions
        .split("\r\n")
        .flat_map(|chunk| chunk.split(['\r', '\n']))
        .filter(|line| !line.trim().is_empty())
        .map(str::to_string)
        .collect()
}

/// Cooking time guessed from the length of the instructions text.
pub fn estimate_cooking_time(instructions: Option<&str>) -> &'static str {
    let length = match instructions {
        Some(text) if !text.is_empty() => text.chars().count(),
        _ => return "30 mins",
    };

    if length < 200 {
        "15 mins"
    } else if length < 500 {
        "30 mins"
    } else if length < 1000 {
        "45 mins"
    } else {
        "60 mins"
    }
}

/// Servings guessed from the number of ingredients.
pub fn estimate_servings(ingredient_count: usize) -> &'static str {
    if ingredient_count < 3 {
        "1"
    } else if ingredient_count < 6 {
        "2"
    } else if ingredient_count < 10 {
        "4"
    } else {
        "6"
    }
}

/// Map a full upstream record to the canonical model.
///
/// Returns `None` when the record has no id or no title.
pub fn normalize_meal(meal: &MealPayload) -> Option<RecipeRecord> {
    let id = field_text(meal, "idMeal").filter(|s| !s.trim().is_empty())?;
    let title = field_text(meal, "strMeal").filter(|s| !s.trim().is_empty())?;
    let instructions = field_text(meal, "strInstructions");

    let ingredients = extract_ingredients(meal);
    let steps = instructions.as_deref().map(split_steps).unwrap_or_default();
    let time = estimate_cooking_time(instructions.as_deref()).to_string();
    let servings = estimate_servings(ingredients.len()).to_string();

    Some(RecipeRecord {
        id,
        title,
        image: field_text(meal, "strMealThumb").filter(|s| !s.trim().is_empty()),
        ingredients,
        steps,
        time,
        servings,
        favorite: false,
        summary: instructions,
    })
}
