//! # Larder
//!
//! Recipe library front end: ties the upstream recipe source, the per-user
//! document store and the local identity provider together into the flows
//! the `larder` command line tool exposes.

pub mod book;
pub mod remember;
pub mod render;

pub use book::{RecipeBook, RecipeDetail};
