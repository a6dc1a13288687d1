//! Recipe, favorite and session models
//!
//! Every recipe source (built-in samples, user authoring, the upstream recipe
//! API) maps onto [`RecipeRecord`]. Identifiers are NOT namespaced: a sample id
//! ("1"), an authored id (millisecond timestamp) and an upstream id ("52772")
//! all share the same `id` field.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Display value used when an authored recipe leaves time or servings blank
pub const NOT_AVAILABLE: &str = "N/A";

/// Canonical recipe record consumed by every front end
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeRecord {
    pub id: String,
    pub title: String,
    /// Image URI; `None` means the front end shows its placeholder
    #[serde(default)]
    pub image: Option<String>,
    /// Display order
    #[serde(default)]
    pub ingredients: Vec<String>,
    /// Execution order
    #[serde(default)]
    pub steps: Vec<String>,
    #[serde(default)]
    pub time: String,
    #[serde(default)]
    pub servings: String,
    /// Advisory only; the favorites collection is authoritative
    #[serde(default)]
    pub favorite: bool,
    /// Raw instructions text for upstream records
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

impl RecipeRecord {
    /// A record is persistable once its title is non-blank.
    pub fn is_persistable(&self) -> bool {
        !self.title.trim().is_empty()
    }
}

/// Denormalized copy of a recipe taken when it was favorited
///
/// Stays viewable after the original record is edited or deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteEntry {
    /// Store-generated document id
    pub doc_id: String,
    /// Secondary lookup key: id of the favorited recipe
    pub recipe_id: String,
    pub title: String,
    pub image: Option<String>,
    pub time: String,
    pub servings: String,
    pub ingredients: Vec<String>,
    pub steps: Vec<String>,
    pub saved_at: DateTime<Utc>,
}

impl FavoriteEntry {
    /// Snapshot `recipe` under a fresh document id.
    pub fn snapshot(recipe: &RecipeRecord, saved_at: DateTime<Utc>) -> Self {
        Self {
            doc_id: uuid::Uuid::new_v4().to_string(),
            recipe_id: recipe.id.clone(),
            title: recipe.title.clone(),
            image: recipe.image.clone(),
            time: recipe.time.clone(),
            servings: recipe.servings.clone(),
            ingredients: recipe.ingredients.clone(),
            steps: recipe.steps.clone(),
            saved_at,
        }
    }

    /// View the snapshot as a recipe record, for showing a favorite whose
    /// source is no longer available.
    pub fn to_record(&self) -> RecipeRecord {
        RecipeRecord {
            id: self.recipe_id.clone(),
            title: self.title.clone(),
            image: self.image.clone(),
            ingredients: self.ingredients.clone(),
            steps: self.steps.clone(),
            time: self.time.clone(),
            servings: self.servings.clone(),
            favorite: true,
            summary: None,
        }
    }
}

/// Profile fields recorded at sign-up
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub full_name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

/// An authenticated session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub user_id: String,
    pub profile: Option<UserProfile>,
}

impl Session {
    /// Name to greet the user with
    pub fn display_name(&self) -> &str {
        self.profile
            .as_ref()
            .map(|p| p.full_name.as_str())
            .filter(|n| !n.is_empty())
            .unwrap_or("Guest")
    }
}

/// Raw input of the recipe authoring form
///
/// Ingredients and steps are entered one per line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeDraft {
    pub title: String,
    pub ingredients: String,
    pub steps: String,
    pub time: String,
    pub servings: String,
    pub image: Option<String>,
}

impl RecipeDraft {
    /// Validate the draft and turn it into a record with the given id.
    ///
    /// A blank title is rejected before anything is written.
    pub fn into_record(self, id: String) -> Result<RecipeRecord> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(Error::InvalidInput("Please enter a title".to_string()));
        }

        Ok(RecipeRecord {
            id,
            title: title.to_string(),
            image: self.image.filter(|uri| !uri.trim().is_empty()),
            ingredients: split_form_lines(&self.ingredients),
            steps: split_form_lines(&self.steps),
            time: or_not_available(self.time),
            servings: or_not_available(self.servings),
            favorite: false,
            summary: None,
        })
    }
}

/// Id for a freshly authored recipe: milliseconds since the Unix epoch.
pub fn authored_recipe_id(now: DateTime<Utc>) -> String {
    now.timestamp_millis().to_string()
}

fn split_form_lines(text: &str) -> Vec<String> {
    text.split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

fn or_not_available(value: String) -> String {
    if value.is_empty() {
        NOT_AVAILABLE.to_string()
    } else {
        value
    }
}
