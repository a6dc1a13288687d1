//! Plain-text rendering for terminal output

use larder_common::{FavoriteEntry, RecipeRecord};
use std::fmt::Write;

use crate::RecipeDetail;

/// One line per recipe: id, title, time and servings
pub fn recipe_list(recipes: &[RecipeRecord]) -> String {
    if recipes.is_empty() {
        return "No recipes found.\n".to_string();
    }

    let mut out = String::new();
    for recipe in recipes {
        let _ = writeln!(
            out,
            "{:>14}  {}  ({}, serves {})",
            recipe.id, recipe.title, recipe.time, recipe.servings
        );
    }
    out
}

pub fn recipe_detail(detail: &RecipeDetail) -> String {
    let recipe = &detail.recipe;
    let mut out = String::new();

    let marker = if detail.favorite { " [favorite]" } else { "" };
    let _ = writeln!(out, "{}{}", recipe.title, marker);
    let _ = writeln!(out, "Time: {}    Servings: {}", recipe.time, recipe.servings);
    if let Some(image) = &recipe.image {
        let _ = writeln!(out, "Image: {}", image);
    }

    let _ = writeln!(out, "\nIngredients:");
    for ingredient in &recipe.ingredients {
        let _ = writeln!(out, "  - {}", ingredient);
    }

    let _ = writeln!(out, "\nSteps:");
    for (i, step) in recipe.steps.iter().enumerate() {
        let _ = writeln!(out, "  {}. {}", i + 1, step);
    }
    out
}

pub fn favorite_list(entries: &[FavoriteEntry]) -> String {
    if entries.is_empty() {
        return "No favorites yet.\n".to_string();
    }

    let mut out = String::new();
    for entry in entries {
        let _ = writeln!(
            out,
            "{:>14}  {}  (saved {})",
            entry.recipe_id,
            entry.title,
            entry.saved_at.format("%Y-%m-%d %H:%M")
        );
    }
    out
}
