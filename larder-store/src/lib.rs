//! # Larder document store
//!
//! Persists each user's recipe list (full-replace snapshots) and favorites in
//! SQLite, plus the local identity provider that scopes them.

pub mod favorites;
pub mod identity;
pub mod library;
pub mod recipes;

pub use favorites::FavoriteStore;
pub use identity::{IdentityProvider, LocalIdentity};
pub use library::{FavoritesManager, UserLibrary};
pub use recipes::RecipeStore;
