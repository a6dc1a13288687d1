//! Recipe book: the flows front ends drive
//!
//! Combines the signed-in user's library, the built-in samples and the
//! upstream recipe source the way the app screens use them.

use chrono::Utc;
use larder_api::{BrowseCategory, RecipeSource, SearchMode};
use larder_common::filter::filter_recipes;
use larder_common::models::authored_recipe_id;
use larder_common::sample::sample_recipes;
use larder_common::{Error, RecipeDraft, RecipeRecord, Result};
use larder_store::UserLibrary;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info};

/// A recipe ready for the detail view
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecipeDetail {
    pub recipe: RecipeRecord,
    /// Authoritative status from the favorites collection
    pub favorite: bool,
}

pub struct RecipeBook {
    library: UserLibrary,
    source: Arc<dyn RecipeSource>,
}

impl RecipeBook {
    pub fn new(library: UserLibrary, source: Arc<dyn RecipeSource>) -> Self {
        Self { library, source }
    }

    pub fn library(&self) -> &UserLibrary {
        &self.library
    }

    /// The user's recipes; an absent or empty library is seeded with the samples.
    pub async fn home_feed(&self) -> Result<Vec<RecipeRecord>> {
        match self.library.load_all().await? {
            Some(stored) if !stored.is_empty() => Ok(stored),
            _ => {
                let samples = sample_recipes();
                self.library.save_all(&samples).await?;
                info!(count = samples.len(), "Seeded library with sample recipes");
                Ok(samples)
            }
        }
    }

    /// Search upstream by name, falling back to filtering `local`.
    ///
    /// A blank query returns `local` untouched without calling upstream.
    pub async fn search(&self, local: &[RecipeRecord], query: &str) -> Vec<RecipeRecord> {
        let query = query.trim();
        if query.is_empty() {
            return local.to_vec();
        }

        let remote = self.source.search_recipes_or_empty(query, SearchMode::ByName).await;
        if !remote.is_empty() {
            return remote;
        }

        debug!(query = %query, "No upstream matches; filtering local recipes");
        filter_recipes(local, query).into_iter().cloned().collect()
    }

    pub async fn browse(&self, category: &BrowseCategory) -> Vec<RecipeRecord> {
        self.source
            .search_recipes_or_empty(category.name, category.mode)
            .await
    }

    /// The list the home screen shows: stored recipes, or the samples when
    /// there are none (or nobody is signed in). Nothing is written.
    pub async fn local_recipes(&self) -> Result<Vec<RecipeRecord>> {
        let stored = self.library.load_all().await?.unwrap_or_default();
        Ok(if stored.is_empty() { sample_recipes() } else { stored })
    }

    /// Find a recipe by id for the detail view.
    ///
    /// Looks in [`local_recipes`](Self::local_recipes), then, for numeric ids
    /// only, asks upstream, then falls back to the user's favorite snapshot.
    /// Ids are not namespaced, so a stored recipe whose id equals an upstream
    /// id shadows the upstream record.
    pub async fn resolve_detail(&self, recipe_id: &str) -> Result<Option<RecipeDetail>> {
        let mut found = self
            .local_recipes()
            .await?
            .into_iter()
            .find(|r| r.id == recipe_id);

        if found.is_none() && looks_numeric(recipe_id) {
            debug!(recipe_id = %recipe_id, "Not stored locally; trying upstream");
            found = self.source.fetch_recipe_detail_or_none(recipe_id).await;
        }

        if found.is_none() {
            found = self
                .library
                .list_favorites()
                .await?
                .iter()
                .find(|entry| entry.recipe_id == recipe_id)
                .map(|entry| entry.to_record());
            if found.is_some() {
                debug!(recipe_id = %recipe_id, "Showing favorite snapshot");
            }
        }

        match found {
            Some(recipe) => {
                let favorite = self.library.is_favorite(&recipe.id).await?;
                Ok(Some(RecipeDetail { recipe, favorite }))
            }
            None => Ok(None),
        }
    }

    /// Validate and store an authored recipe.
    ///
    /// Validation runs before the session check; nothing is written on failure.
    pub async fn add_recipe(&self, draft: RecipeDraft) -> Result<RecipeRecord> {
        let recipe = draft.into_record(authored_recipe_id(Utc::now()))?;

        match self.library.add_recipe(&recipe).await? {
            Some(_) => Ok(recipe),
            None => Err(Error::InvalidInput(
                "You must be logged in to add a recipe".to_string(),
            )),
        }
    }

    /// Flip the favorite state of a resolvable recipe; `None` if not found.
    pub async fn toggle_favorite(&self, recipe_id: &str) -> Result<Option<bool>> {
        let detail = match self.resolve_detail(recipe_id).await? {
            Some(detail) => detail,
            None => return Ok(None),
        };

        let state = self
            .library
            .favorites()
            .toggle(&detail.recipe, detail.favorite)
            .await?;
        Ok(Some(state))
    }
}

/// Loose numeric check applied before falling back to upstream lookups
fn looks_numeric(id: &str) -> bool {
    id.trim()
        .parse::<f64>()
        .map(|n| !n.is_nan())
        .unwrap_or(false)
}
