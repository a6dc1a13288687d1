//! Owned-recipe documents
//!
//! A user's recipe list is persisted as a full snapshot: [`RecipeStore::save_all`]
//! deletes every document the user owns and inserts the new list. Delete and
//! inserts share one transaction, so readers and concurrent writers only ever
//! observe a complete snapshot.

use larder_common::{Error, RecipeRecord, Result};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use tracing::{debug, info};
use uuid::Uuid;

/// Per-user `recipes` collection
#[derive(Debug, Clone)]
pub struct RecipeStore {
    pool: SqlitePool,
}

impl RecipeStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Replace the user's recipe list with `recipes`, keeping their order.
    pub async fn save_all(&self, user_id: &str, recipes: &[RecipeRecord]) -> Result<()> {
        // Serialize everything before taking the write lock
        let rows = recipes
            .iter()
            .map(EncodedRecipe::encode)
            .collect::<Result<Vec<_>>>()?;

        let mut tx = self.pool.begin().await?;

        let removed = sqlx::query("DELETE FROM recipes WHERE user_id = ?")
            .bind(user_id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        for (position, row) in rows.iter().enumerate() {
            insert_recipe(&mut tx, user_id, position as i64, row).await?;
        }

        tx.commit().await?;

        info!(
            user_id = %user_id,
            removed,
            saved = rows.len(),
            "Replaced recipe snapshot"
        );
        Ok(())
    }

    /// Every recipe the user owns, in saved order
    pub async fn load_all(&self, user_id: &str) -> Result<Vec<RecipeRecord>> {
        let rows = sqlx::query(
            r#"
            SELECT recipe_id, title, image, ingredients, steps, time, servings, favorite, summary
            FROM recipes
            WHERE user_id = ?
            ORDER BY position
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        let recipes = rows.iter().map(recipe_from_row).collect::<Result<Vec<_>>>()?;
        debug!(user_id = %user_id, count = recipes.len(), "Loaded recipes");
        Ok(recipes)
    }

    /// Append one recipe after the user's existing ones; returns its document id.
    pub async fn add_recipe(&self, user_id: &str, recipe: &RecipeRecord) -> Result<String> {
        let row = EncodedRecipe::encode(recipe)?;
        let doc_id = Uuid::new_v4().to_string();

        // Position is computed inside the insert so concurrent appends never share one
        sqlx::query(
            r#"
            INSERT INTO recipes (
                doc_id, user_id, position, recipe_id, title, image,
                ingredients, steps, time, servings, favorite, summary
            )
            SELECT ?, ?, COALESCE(MAX(position) + 1, 0), ?, ?, ?, ?, ?, ?, ?, ?, ?
            FROM recipes WHERE user_id = ?
            "#,
        )
        .bind(&doc_id)
        .bind(user_id)
        .bind(&recipe.id)
        .bind(&recipe.title)
        .bind(&recipe.image)
        .bind(&row.ingredients)
        .bind(&row.steps)
        .bind(&recipe.time)
        .bind(&recipe.servings)
        .bind(recipe.favorite)
        .bind(&recipe.summary)
        .bind(user_id)
        .execute(&self.pool)
        .await?;

        info!(user_id = %user_id, recipe_id = %recipe.id, doc_id = %doc_id, "Added recipe");
        Ok(doc_id)
    }
}

/// Column values of one recipe document
struct EncodedRecipe<'a> {
    recipe: &'a RecipeRecord,
    ingredients: String,
    steps: String,
}

impl<'a> EncodedRecipe<'a> {
    fn encode(recipe: &'a RecipeRecord) -> Result<Self> {
        Ok(Self {
            recipe,
            ingredients: to_json(&recipe.ingredients)?,
            steps: to_json(&recipe.steps)?,
        })
    }
}

async fn insert_recipe(
    tx: &mut sqlx::Transaction<'_, sqlx::Sqlite>,
    user_id: &str,
    position: i64,
    row: &EncodedRecipe<'_>,
) -> Result<()> {
    let recipe = row.recipe;

    sqlx::query(
        r#"
        INSERT INTO recipes (
            doc_id, user_id, position, recipe_id, title, image,
            ingredients, steps, time, servings, favorite, summary
        ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(Uuid::new_v4().to_string())
    .bind(user_id)
    .bind(position)
    .bind(&recipe.id)
    .bind(&recipe.title)
    .bind(&recipe.image)
    .bind(&row.ingredients)
    .bind(&row.steps)
    .bind(&recipe.time)
    .bind(&recipe.servings)
    .bind(recipe.favorite)
    .bind(&recipe.summary)
    .execute(&mut **tx)
    .await?;

    Ok(())
}

fn recipe_from_row(row: &SqliteRow) -> Result<RecipeRecord> {
    let ingredients: String = row.try_get("ingredients")?;
    let steps: String = row.try_get("steps")?;

    Ok(RecipeRecord {
        id: row.try_get("recipe_id")?,
        title: row.try_get("title")?,
        image: row.try_get("image")?,
        ingredients: from_json(&ingredients)?,
        steps: from_json(&steps)?,
        time: row.try_get("time")?,
        servings: row.try_get("servings")?,
        favorite: row.try_get("favorite")?,
        summary: row.try_get("summary")?,
    })
}

pub(crate) fn to_json(lines: &[String]) -> Result<String> {
    serde_json::to_string(lines)
        .map_err(|e| Error::Internal(format!("Failed to serialize list: {}", e)))
}

pub(crate) fn from_json(text: &str) -> Result<Vec<String>> {
    serde_json::from_str(text)
        .map_err(|e| Error::Internal(format!("Failed to deserialize list: {}", e)))
}
