//! Recipe source seam
//!
//! [`RecipeSource`] is what the rest of Larder depends on; the TheMealDB
//! client is one implementation, test doubles are others.

use async_trait::async_trait;
use larder_common::RecipeRecord;
use std::fmt;
use std::str::FromStr;
use tracing::warn;

use crate::ApiResult;

/// Which upstream query shape a search uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchMode {
    ByName,
    ByCategory,
    ByArea,
}

impl SearchMode {
    /// Endpoint path and query parameter for this mode
    pub fn endpoint(self) -> (&'static str, &'static str) {
        match self {
            SearchMode::ByName => ("search.php", "s"),
            SearchMode::ByCategory => ("filter.php", "c"),
            SearchMode::ByArea => ("filter.php", "a"),
        }
    }
}

impl fmt::Display for SearchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SearchMode::ByName => "name",
            SearchMode::ByCategory => "category",
            SearchMode::ByArea => "area",
        };
        f.write_str(name)
    }
}

impl FromStr for SearchMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "name" | "search" => Ok(SearchMode::ByName),
            "category" => Ok(SearchMode::ByCategory),
            "area" => Ok(SearchMode::ByArea),
            other => Err(format!(
                "unknown search mode '{}' (expected name, category or area)",
                other
            )),
        }
    }
}

/// Source of upstream recipes
///
/// The required methods report failures explicitly. The `_or_empty` /
/// `_or_none` variants absorb them: the cause is logged and the caller gets
/// an empty result, never an error.
#[async_trait]
pub trait RecipeSource: Send + Sync {
    /// Search and resolve matches to full records, in match order.
    ///
    /// Zero matches is `Ok(vec![])`.
    async fn search_recipes(&self, query: &str, mode: SearchMode) -> ApiResult<Vec<RecipeRecord>>;

    /// Look up one record; `Ok(None)` when the id is unknown.
    async fn fetch_recipe_detail(&self, id: &str) -> ApiResult<Option<RecipeRecord>>;

    async fn search_recipes_or_empty(&self, query: &str, mode: SearchMode) -> Vec<RecipeRecord> {
        match self.search_recipes(query, mode).await {
            Ok(recipes) => recipes,
            Err(e) => {
                warn!(query = %query, mode = %mode, error = %e, "Recipe search failed");
                Vec::new()
            }
        }
    }

    async fn fetch_recipe_detail_or_none(&self, id: &str) -> Option<RecipeRecord> {
        match self.fetch_recipe_detail(id).await {
            Ok(recipe) => recipe,
            Err(e) => {
                warn!(recipe_id = %id, error = %e, "Recipe lookup failed");
                None
            }
        }
    }
}
