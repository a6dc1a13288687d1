//! TheMealDB client
//!
//! Queries the public TheMealDB API (no key required) and maps its meals onto
//! [`RecipeRecord`]s.
//!
//! # API Reference
//! - Search by name:     `{base}/search.php?s={query}`
//! - Filter by category: `{base}/filter.php?c={query}`
//! - Filter by area:     `{base}/filter.php?a={query}`
//! - Lookup by id:       `{base}/lookup.php?i={id}`
//!
//! Every response is `{"meals": [...]}`, with `meals` null or absent when
//! nothing matched. Filter endpoints return only id, name and thumbnail, so
//! each match is resolved through a lookup.

use async_trait::async_trait;
use futures::future::join_all;
use larder_common::config::{ApiConfig, DEFAULT_SEARCH_DETAIL_LIMIT};
use larder_common::RecipeRecord;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

use crate::normalize::{field_text, normalize_meal, MealPayload};
use crate::{ApiError, ApiResult, RecipeSource, SearchMode};

const USER_AGENT: &str = concat!("larder/", env!("CARGO_PKG_VERSION"));

/// TheMealDB client
///
/// Search results are capped at `detail_limit` matches (10 by default); the
/// lookups for those matches are issued concurrently and reassembled in match
/// order.
#[derive(Debug, Clone)]
pub struct MealDbClient {
    /// HTTP client for API requests
    http_client: Client,
    /// Base URL without trailing slash
    base_url: String,
    /// Matches resolved to full detail per search
    detail_limit: usize,
}

impl MealDbClient {
    /// Client without a request timeout
    pub fn new(base_url: impl Into<String>) -> ApiResult<Self> {
        Self::build(base_url.into(), None, DEFAULT_SEARCH_DETAIL_LIMIT)
    }

    /// Client configured from the `[api]` config section
    ///
    /// `base_url` is passed separately so environment overrides apply.
    pub fn from_config(base_url: impl Into<String>, api: &ApiConfig) -> ApiResult<Self> {
        Self::build(
            base_url.into(),
            api.request_timeout_secs.map(Duration::from_secs),
            api.search_detail_limit,
        )
    }

    fn build(base_url: String, timeout: Option<Duration>, detail_limit: usize) -> ApiResult<Self> {
        let mut builder = Client::builder().user_agent(USER_AGENT);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http_client = builder
            .build()
            .map_err(|e| ApiError::Client(e.to_string()))?;

        Ok(Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
            detail_limit,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn detail_limit(&self) -> usize {
        self.detail_limit
    }

    /// GET an endpoint and return its `meals` list (empty when null/absent)
    async fn get_meals(&self, endpoint: &str, key: &str, value: &str) -> ApiResult<Vec<MealPayload>> {
        let url = format!("{}/{}", self.base_url, endpoint);
        debug!(url = %url, key = %key, value = %value, "Querying recipe API");

        let response = self
            .http_client
            .get(&url)
            .query(&[(key, value)])
            .send()
            .await
            .map_err(|e| ApiError::Transport(format!("Recipe API request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                url,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Transport(format!("Failed to read recipe API response: {}", e)))?;

        let parsed: MealList = serde_json::from_str(&body)
            .map_err(|e| ApiError::Decode(format!("{}: {}", url, e)))?;

        Ok(parsed.meals.unwrap_or_default())
    }
}

#[async_trait]
impl RecipeSource for MealDbClient {
    async fn search_recipes(&self, query: &str, mode: SearchMode) -> ApiResult<Vec<RecipeRecord>> {
        let (endpoint, key) = mode.endpoint();
        let matches = self.get_meals(endpoint, key, query).await?;

        // The cap applies to listing slots; a slot without an id is lost, not replaced
        let ids: Vec<String> = matches
            .iter()
            .take(self.detail_limit)
            .filter_map(|meal| field_text(meal, "idMeal"))
            .collect();

        debug!(
            query = %query,
            mode = %mode,
            matches = matches.len(),
            resolving = ids.len(),
            "Resolving search matches"
        );

        let details = join_all(ids.iter().map(|id| self.fetch_recipe_detail(id))).await;

        let recipes: Vec<RecipeRecord> = ids
            .iter()
            .zip(details)
            .filter_map(|(id, detail)| match detail {
                Ok(recipe) => recipe,
                Err(e) => {
                    warn!(recipe_id = %id, error = %e, "Dropping search match: lookup failed");
                    None
                }
            })
            .collect();

        Ok(recipes)
    }

    async fn fetch_recipe_detail(&self, id: &str) -> ApiResult<Option<RecipeRecord>> {
        let meals = self.get_meals("lookup.php", "i", id).await?;
        Ok(meals.first().and_then(normalize_meal))
    }
}

#[derive(Debug, Deserialize)]
struct MealList {
    #[serde(default)]
    meals: Option<Vec<MealPayload>>,
}
