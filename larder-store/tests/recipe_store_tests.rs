//! Full-replace persistence of owned recipes

use larder_common::db::{init_database, init_memory_database};
use larder_common::sample::sample_recipes;
use larder_common::RecipeRecord;
use larder_store::RecipeStore;

fn recipe(id: &str, title: &str) -> RecipeRecord {
    RecipeRecord {
        id: id.to_string(),
        title: title.to_string(),
        image: Some(format!("file:///photos/{}.jpg", id)),
        ingredients: vec!["1 cup rice".to_string(), "2 cups water".to_string()],
        steps: vec!["Rinse.".to_string(), "Simmer 15 minutes.".to_string()],
        time: "20 mins".to_string(),
        servings: "2".to_string(),
        favorite: false,
        summary: None,
    }
}

#[tokio::test]
async fn test_save_then_load_round_trip() {
    let store = RecipeStore::new(init_memory_database().await.unwrap());
    let input = vec![recipe("10", "Rice"), recipe("11", "Congee")];

    store.save_all("user-a", &input).await.unwrap();

    assert_eq!(store.load_all("user-a").await.unwrap(), input);
}

#[tokio::test]
async fn test_save_replaces_previous_snapshot() {
    let store = RecipeStore::new(init_memory_database().await.unwrap());

    store.save_all("user-a", &sample_recipes()).await.unwrap();
    store
        .save_all("user-a", &[recipe("3", "Khichdi")])
        .await
        .unwrap();

    let loaded = store.load_all("user-a").await.unwrap();
    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded[0].id, "3");

    // Saving an empty list clears the collection
    store.save_all("user-a", &[]).await.unwrap();
    assert!(store.load_all("user-a").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_users_are_isolated() {
    let store = RecipeStore::new(init_memory_database().await.unwrap());

    store.save_all("user-a", &sample_recipes()).await.unwrap();
    store.save_all("user-b", &[recipe("9", "Pulao")]).await.unwrap();
    store.save_all("user-b", &[]).await.unwrap();

    assert_eq!(store.load_all("user-a").await.unwrap(), sample_recipes());
    assert!(store.load_all("user-b").await.unwrap().is_empty());
    assert!(store.load_all("nobody").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_add_recipe_appends() {
    let store = RecipeStore::new(init_memory_database().await.unwrap());

    store.save_all("user-a", &sample_recipes()).await.unwrap();
    let doc_id = store.add_recipe("user-a", &recipe("77", "Upma")).await.unwrap();
    assert!(!doc_id.is_empty());

    let ids: Vec<String> = store
        .load_all("user-a")
        .await
        .unwrap()
        .into_iter()
        .map(|r| r.id)
        .collect();
    assert_eq!(ids, vec!["1", "2", "77"]);

    // First recipe for a fresh user lands at position zero
    store.add_recipe("user-c", &recipe("5", "Poha")).await.unwrap();
    assert_eq!(store.load_all("user-c").await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_duplicate_recipe_ids_are_kept() {
    // Ids are not unique across sources; the store does not dedupe
    let store = RecipeStore::new(init_memory_database().await.unwrap());
    let input = vec![recipe("1", "Sample One"), recipe("1", "Authored One")];

    store.save_all("user-a", &input).await.unwrap();
    assert_eq!(store.load_all("user-a").await.unwrap(), input);
}

#[tokio::test]
async fn test_concurrent_saves_leave_one_whole_snapshot() {
    let dir = tempfile::tempdir().unwrap();
    let pool = init_database(&dir.path().join("larder.db")).await.unwrap();
    let store = RecipeStore::new(pool);

    let first: Vec<RecipeRecord> = (0..20).map(|i| recipe(&format!("a{}", i), "A")).collect();
    let second: Vec<RecipeRecord> = (0..15).map(|i| recipe(&format!("b{}", i), "B")).collect();

    let (r1, r2) = futures::join!(
        store.save_all("user-a", &first),
        store.save_all("user-a", &second)
    );
    r1.unwrap();
    r2.unwrap();

    let loaded = store.load_all("user-a").await.unwrap();
    assert!(
        loaded == first || loaded == second,
        "snapshot mixes both inputs: {} records",
        loaded.len()
    );
}
