//! Favorite-entry documents
//!
//! Favorites are denormalized snapshots looked up by `recipe_id`. Nothing
//! prevents the same recipe from being favorited twice; callers check
//! [`FavoriteStore::is_favorite`] first when that matters.

use chrono::{DateTime, Utc};
use larder_common::{Error, FavoriteEntry, RecipeRecord, Result};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use tracing::{debug, info};

use crate::recipes::{from_json, to_json};

/// Per-user `favorites` collection
#[derive(Debug, Clone)]
pub struct FavoriteStore {
    pool: SqlitePool,
}

impl FavoriteStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Append a snapshot of `recipe` to the user's favorites.
    pub async fn add_favorite(&self, user_id: &str, recipe: &RecipeRecord) -> Result<FavoriteEntry> {
        let entry = FavoriteEntry::snapshot(recipe, Utc::now());

        sqlx::query(
            r#"
            INSERT INTO favorites (
                doc_id, user_id, recipe_id, title, image, time, servings,
                ingredients, steps, saved_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&entry.doc_id)
        .bind(user_id)
        .bind(&entry.recipe_id)
        .bind(&entry.title)
        .bind(&entry.image)
        .bind(&entry.time)
        .bind(&entry.servings)
        .bind(to_json(&entry.ingredients)?)
        .bind(to_json(&entry.steps)?)
        .bind(entry.saved_at.to_rfc3339())
        .execute(&self.pool)
        .await?;

        info!(user_id = %user_id, recipe_id = %entry.recipe_id, doc_id = %entry.doc_id, "Added favorite");
        Ok(entry)
    }

    /// Remove the oldest favorite entry for `recipe_id`.
    ///
    /// Returns whether an entry was removed; a missing entry is not an error.
    pub async fn remove_favorite(&self, user_id: &str, recipe_id: &str) -> Result<bool> {
        let removed = sqlx::query(
            r#"
            DELETE FROM favorites
            WHERE doc_id = (
                SELECT doc_id FROM favorites
                WHERE user_id = ? AND recipe_id = ?
                ORDER BY rowid
                LIMIT 1
            )
            "#,
        )
        .bind(user_id)
        .bind(recipe_id)
        .execute(&self.pool)
        .await?
        .rows_affected()
            > 0;

        debug!(user_id = %user_id, recipe_id = %recipe_id, removed, "Remove favorite");
        Ok(removed)
    }

    pub async fn is_favorite(&self, user_id: &str, recipe_id: &str) -> Result<bool> {
        let found: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM favorites WHERE user_id = ? AND recipe_id = ?)",
        )
        .bind(user_id)
        .bind(recipe_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(found)
    }

    /// All of the user's favorites, oldest first
    pub async fn list_favorites(&self, user_id: &str) -> Result<Vec<FavoriteEntry>> {
        let rows = sqlx::query(
            r#"
            SELECT doc_id, recipe_id, title, image, time, servings, ingredients, steps, saved_at
            FROM favorites
            WHERE user_id = ?
            ORDER BY rowid
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(favorite_from_row).collect()
    }
}

fn favorite_from_row(row: &SqliteRow) -> Result<FavoriteEntry> {
    let ingredients: String = row.try_get("ingredients")?;
    let steps: String = row.try_get("steps")?;
    let saved_at: String = row.try_get("saved_at")?;
    let saved_at = DateTime::parse_from_rfc3339(&saved_at)
        .map_err(|e| Error::Internal(format!("Failed to parse saved_at: {}", e)))?
        .with_timezone(&Utc);

    Ok(FavoriteEntry {
        doc_id: row.try_get("doc_id")?,
        recipe_id: row.try_get("recipe_id")?,
        title: row.try_get("title")?,
        image: row.try_get("image")?,
        time: row.try_get("time")?,
        servings: row.try_get("servings")?,
        ingredients: from_json(&ingredients)?,
        steps: from_json(&steps)?,
        saved_at,
    })
}
