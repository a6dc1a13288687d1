//! Built-in sample recipes
//!
//! Seeded into a signed-in user's library the first time it loads empty.

use crate::models::RecipeRecord;

fn lines(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// The sample recipes, in display order.
pub fn sample_recipes() -> Vec<RecipeRecord> {
    vec![
        RecipeRecord {
            id: "1".to_string(),
            title: "Paneer Butter Masala".to_string(),
            image: None,
            ingredients: lines(&[
                "250g paneer",
                "2 tomatoes",
                "1 onion",
                "2 tbsp butter",
                "1 tsp garam masala",
                "salt to taste",
            ]),
            steps: lines(&[
                "Blend tomatoes and onion to a smooth paste.",
                "Heat butter, add paste and cook till oil separates.",
                "Add spices and paneer cubes. Simmer 5-7 mins.",
                "Garnish and serve hot with naan or rice.",
            ]),
            time: "30 mins".to_string(),
            servings: "3".to_string(),
            favorite: false,
            summary: None,
        },
        RecipeRecord {
            id: "2".to_string(),
            title: "Masala Omelette".to_string(),
            image: None,
            ingredients: lines(&[
                "2 eggs",
                "1 small onion",
                "1 green chilli",
                "salt and pepper",
                "1 tbsp oil",
            ]),
            steps: lines(&[
                "Beat eggs with salt and pepper.",
                "Add chopped onion, chilli, and mix.",
                "Heat oil, pour mixture, cook both sides.",
                "Serve hot.",
            ]),
            time: "10 mins".to_string(),
            servings: "1".to_string(),
            favorite: false,
            summary: None,
        },
    ]
}
