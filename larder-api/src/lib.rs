//! # Larder recipe API adapter
//!
//! Fetches recipes from the public TheMealDB API and normalizes its loosely
//! typed payloads into [`larder_common::RecipeRecord`]s, estimating cooking
//! time and servings where the upstream data has none.

pub mod catalog;
pub mod client;
pub mod error;
pub mod normalize;
pub mod source;

pub use catalog::{browse_categories, find_browse_category, BrowseCategory};
pub use client::MealDbClient;
pub use error::{ApiError, ApiResult};
pub use source::{RecipeSource, SearchMode};
