//! Favorites collection and the toggle manager

use larder_common::db::init_memory_database;
use larder_common::events::SessionBus;
use larder_common::sample::sample_recipes;
use larder_store::{FavoriteStore, IdentityProvider, LocalIdentity, UserLibrary};
use std::sync::Arc;

#[tokio::test]
async fn test_add_then_remove_membership() {
    let store = FavoriteStore::new(init_memory_database().await.unwrap());
    let recipe = &sample_recipes()[0];

    assert!(!store.is_favorite("user-a", &recipe.id).await.unwrap());

    store.add_favorite("user-a", recipe).await.unwrap();
    assert!(store.is_favorite("user-a", &recipe.id).await.unwrap());
    assert!(!store.is_favorite("user-b", &recipe.id).await.unwrap());

    assert!(store.remove_favorite("user-a", &recipe.id).await.unwrap());
    assert!(!store.is_favorite("user-a", &recipe.id).await.unwrap());
}

#[tokio::test]
async fn test_remove_missing_is_noop() {
    let store = FavoriteStore::new(init_memory_database().await.unwrap());
    assert!(!store.remove_favorite("user-a", "404").await.unwrap());
}

#[tokio::test]
async fn test_duplicates_removed_one_at_a_time_oldest_first() {
    let store = FavoriteStore::new(init_memory_database().await.unwrap());
    let recipe = &sample_recipes()[1];

    let first = store.add_favorite("user-a", recipe).await.unwrap();
    let second = store.add_favorite("user-a", recipe).await.unwrap();
    assert_ne!(first.doc_id, second.doc_id);
    assert_eq!(store.list_favorites("user-a").await.unwrap().len(), 2);

    store.remove_favorite("user-a", &recipe.id).await.unwrap();
    let remaining = store.list_favorites("user-a").await.unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].doc_id, second.doc_id);
    assert!(store.is_favorite("user-a", &recipe.id).await.unwrap());
}

#[tokio::test]
async fn test_entry_is_a_snapshot() {
    let store = FavoriteStore::new(init_memory_database().await.unwrap());
    let recipe = sample_recipes().remove(0);

    let entry = store.add_favorite("user-a", &recipe).await.unwrap();
    let listed = store.list_favorites("user-a").await.unwrap();

    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].doc_id, entry.doc_id);
    assert_eq!(listed[0].recipe_id, "1");
    assert_eq!(listed[0].title, recipe.title);
    assert_eq!(listed[0].ingredients, recipe.ingredients);
    assert_eq!(listed[0].steps, recipe.steps);
    assert_eq!(listed[0].saved_at.timestamp(), entry.saved_at.timestamp());
}

#[tokio::test]
async fn test_toggle_round_trip() {
    let pool = init_memory_database().await.unwrap();
    let identity = Arc::new(LocalIdentity::new(pool.clone(), SessionBus::default()));
    identity
        .sign_up("Asha Rao", "asha@example.com", "secret123")
        .await
        .unwrap();

    let library = UserLibrary::new(pool, identity.clone() as Arc<dyn IdentityProvider>);
    let favorites = library.favorites();
    let recipe = &sample_recipes()[0];

    let state = favorites.toggle(recipe, false).await.unwrap();
    assert!(state);
    assert!(favorites.status(&recipe.id).await.unwrap());

    let state = favorites.toggle(recipe, state).await.unwrap();
    assert!(!state);
    assert!(!favorites.status(&recipe.id).await.unwrap());
}
