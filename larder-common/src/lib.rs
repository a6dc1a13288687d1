//! # Larder Common Library
//!
//! Shared code for all Larder crates including:
//! - The canonical recipe record model and favorite entries
//! - Authoring drafts and local search filtering
//! - Built-in sample recipes used to seed an empty library
//! - Configuration loading
//! - Database bootstrap
//! - Session event bus

pub mod config;
pub mod db;
pub mod error;
pub mod events;
pub mod filter;
pub mod models;
pub mod sample;

pub use error::{Error, Result};
pub use models::{FavoriteEntry, RecipeDraft, RecipeRecord, Session, UserProfile};
