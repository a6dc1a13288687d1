//! Session-scoped view of the document store
//!
//! [`UserLibrary`] resolves the signed-in user through the injected
//! [`IdentityProvider`] and forwards to the per-user stores. Without a session
//! every operation degrades instead of failing: loads report "no data", writes
//! are skipped, membership checks answer `false`.

use larder_common::{FavoriteEntry, RecipeRecord, Result, Session};
use sqlx::SqlitePool;
use std::sync::Arc;
use tracing::debug;

use crate::favorites::FavoriteStore;
use crate::identity::IdentityProvider;
use crate::recipes::RecipeStore;

/// Recipes and favorites of whoever is currently signed in
#[derive(Clone)]
pub struct UserLibrary {
    recipes: RecipeStore,
    favorites: FavoriteStore,
    identity: Arc<dyn IdentityProvider>,
}

impl UserLibrary {
    pub fn new(pool: SqlitePool, identity: Arc<dyn IdentityProvider>) -> Self {
        Self {
            recipes: RecipeStore::new(pool.clone()),
            favorites: FavoriteStore::new(pool),
            identity,
        }
    }

    pub fn session(&self) -> Option<Session> {
        self.identity.current_session()
    }

    fn user_id(&self, operation: &str) -> Option<String> {
        let user_id = self.identity.current_user_id();
        if user_id.is_none() {
            debug!(operation, "No session; skipping store access");
        }
        user_id
    }

    /// The user's recipes, or `None` when nobody is signed in.
    ///
    /// `None` is distinct from `Some(vec![])`: callers seed sample data only
    /// for the latter or when they choose to treat both alike.
    pub async fn load_all(&self) -> Result<Option<Vec<RecipeRecord>>> {
        match self.user_id("load_all") {
            Some(user_id) => Ok(Some(self.recipes.load_all(&user_id).await?)),
            None => Ok(None),
        }
    }

    /// Replace the user's recipe list; no-op without a session.
    pub async fn save_all(&self, recipes: &[RecipeRecord]) -> Result<()> {
        if let Some(user_id) = self.user_id("save_all") {
            self.recipes.save_all(&user_id, recipes).await?;
        }
        Ok(())
    }

    /// Append one recipe; returns its document id, or `None` without a session.
    pub async fn add_recipe(&self, recipe: &RecipeRecord) -> Result<Option<String>> {
        match self.user_id("add_recipe") {
            Some(user_id) => Ok(Some(self.recipes.add_recipe(&user_id, recipe).await?)),
            None => Ok(None),
        }
    }

    pub async fn add_favorite(&self, recipe: &RecipeRecord) -> Result<()> {
        if let Some(user_id) = self.user_id("add_favorite") {
            self.favorites.add_favorite(&user_id, recipe).await?;
        }
        Ok(())
    }

    pub async fn remove_favorite(&self, recipe_id: &str) -> Result<()> {
        if let Some(user_id) = self.user_id("remove_favorite") {
            self.favorites.remove_favorite(&user_id, recipe_id).await?;
        }
        Ok(())
    }

    pub async fn is_favorite(&self, recipe_id: &str) -> Result<bool> {
        match self.user_id("is_favorite") {
            Some(user_id) => self.favorites.is_favorite(&user_id, recipe_id).await,
            None => Ok(false),
        }
    }

    pub async fn list_favorites(&self) -> Result<Vec<FavoriteEntry>> {
        match self.user_id("list_favorites") {
            Some(user_id) => self.favorites.list_favorites(&user_id).await,
            None => Ok(Vec::new()),
        }
    }

    pub fn favorites(&self) -> FavoritesManager {
        FavoritesManager {
            library: self.clone(),
        }
    }
}

/// Toggle semantics over the favorites collection
///
/// Holds no state of its own; the store is the source of truth.
#[derive(Clone)]
pub struct FavoritesManager {
    library: UserLibrary,
}

impl FavoritesManager {
    /// Flip `recipe`'s favorite state and return the new state.
    pub async fn toggle(&self, recipe: &RecipeRecord, currently_favorite: bool) -> Result<bool> {
        if currently_favorite {
            self.library.remove_favorite(&recipe.id).await?;
        } else {
            self.library.add_favorite(recipe).await?;
        }
        Ok(!currently_favorite)
    }

    pub async fn status(&self, recipe_id: &str) -> Result<bool> {
        self.library.is_favorite(recipe_id).await
    }
}
