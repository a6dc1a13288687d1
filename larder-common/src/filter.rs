//! Local search filtering over an in-memory recipe list

use crate::models::RecipeRecord;

/// Filter `recipes` by a free-text query.
///
/// Matching is case-insensitive against the title, or against all
/// ingredients joined by a single space. A blank query keeps everything.
/// Input order is preserved.
pub fn filter_recipes<'a>(recipes: &'a [RecipeRecord], query: &str) -> Vec<&'a RecipeRecord> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return recipes.iter().collect();
    }

    recipes
        .iter()
        .filter(|r| {
            r.title.to_lowercase().contains(&needle)
                || r.ingredients.join(" ").to_lowercase().contains(&needle)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample::sample_recipes;

    #[test]
    fn test_blank_query_keeps_all() {
        let recipes = sample_recipes();
        assert_eq!(filter_recipes(&recipes, "   ").len(), recipes.len());
    }

    #[test]
    fn test_title_match_is_case_insensitive() {
        let recipes = sample_recipes();
        let hits = filter_recipes(&recipes, "  OMELETTE ");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "2");
    }

    #[test]
    fn test_ingredient_match() {
        let recipes = sample_recipes();
        let hits = filter_recipes(&recipes, "paneer");
        assert_eq!(hits.len(), 1);

        // "onion" appears in both ingredient lists
        let hits = filter_recipes(&recipes, "onion");
        let ids: Vec<&str> = hits.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2"]);
    }

    #[test]
    fn test_match_spans_joined_ingredients() {
        let recipes = sample_recipes();
        // Last word of one ingredient and first of the next, joined by a space
        let hits = filter_recipes(&recipes, "onion 2 tbsp");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "1");
    }

    #[test]
    fn test_no_match() {
        let recipes = sample_recipes();
        assert!(filter_recipes(&recipes, "sushi").is_empty());
    }
}
