//! Local identity provider and session-scoped degradation

use larder_common::db::init_memory_database;
use larder_common::events::{SessionBus, SessionEvent};
use larder_common::sample::sample_recipes;
use larder_common::Error;
use larder_store::{IdentityProvider, LocalIdentity, UserLibrary};
use std::sync::Arc;

async fn setup() -> (Arc<LocalIdentity>, UserLibrary) {
    let pool = init_memory_database().await.unwrap();
    let identity = Arc::new(LocalIdentity::new(pool.clone(), SessionBus::default()));
    let library = UserLibrary::new(pool, identity.clone());
    (identity, library)
}

#[tokio::test]
async fn test_sign_up_sign_out_sign_in() {
    let (identity, _) = setup().await;
    let mut events = identity.subscribe();

    let created = identity
        .sign_up(" Asha Rao ", "asha@example.com", "secret123")
        .await
        .unwrap();
    let profile = created.profile.clone().unwrap();
    assert_eq!(profile.full_name, "Asha Rao");
    assert_eq!(created.display_name(), "Asha Rao");
    assert_eq!(identity.current_user_id(), Some(created.user_id.clone()));

    assert_eq!(identity.sign_out().map(|s| s.user_id), Some(created.user_id.clone()));
    assert!(identity.current_session().is_none());
    assert!(identity.sign_out().is_none());

    // Email lookup ignores case
    let again = identity.sign_in("ASHA@example.com", "secret123").await.unwrap();
    assert_eq!(again.user_id, created.user_id);
    assert_eq!(again.profile.unwrap().email, "asha@example.com");

    let expected = [
        SessionEvent::SignedIn { user_id: created.user_id.clone() },
        SessionEvent::SignedOut { user_id: created.user_id.clone() },
        SessionEvent::SignedIn { user_id: created.user_id.clone() },
    ];
    for event in expected {
        assert_eq!(events.recv().await.unwrap(), event);
    }
}

#[tokio::test]
async fn test_sign_up_validation() {
    let (identity, _) = setup().await;

    let err = identity.sign_up("A", "a@example.com", "12345").await.unwrap_err();
    assert!(matches!(err, Error::InvalidInput(_)));

    let err = identity.sign_up("A", "nope", "123456").await.unwrap_err();
    assert!(matches!(err, Error::InvalidInput(_)));

    identity.sign_up("A", "a@example.com", "123456").await.unwrap();
    let err = identity.sign_up("B", "A@Example.com", "654321").await.unwrap_err();
    assert!(matches!(err, Error::InvalidInput(ref m) if m == "Email already in use"));
}

#[tokio::test]
async fn test_bad_credentials_rejected() {
    let (identity, _) = setup().await;
    identity.sign_up("A", "a@example.com", "123456").await.unwrap();
    identity.sign_out();

    assert!(identity.sign_in("a@example.com", "wrong-pass").await.is_err());
    assert!(identity.sign_in("b@example.com", "123456").await.is_err());
    assert!(identity.current_session().is_none());
}

#[tokio::test]
async fn test_restore_known_and_unknown_user() {
    let (identity, _) = setup().await;
    let created = identity.sign_up("A", "a@example.com", "123456").await.unwrap();
    identity.sign_out();

    let restored = identity.restore(&created.user_id).await.unwrap().unwrap();
    assert_eq!(restored.user_id, created.user_id);
    assert!(identity.current_session().is_some());

    identity.sign_out();
    assert!(identity.restore("missing-user").await.unwrap().is_none());
    assert!(identity.current_session().is_none());
}

#[tokio::test]
async fn test_library_without_session_degrades() {
    let (_, library) = setup().await;
    let recipe = &sample_recipes()[0];

    assert!(library.session().is_none());
    assert_eq!(library.load_all().await.unwrap(), None);
    library.save_all(&sample_recipes()).await.unwrap();
    assert_eq!(library.add_recipe(recipe).await.unwrap(), None);
    library.add_favorite(recipe).await.unwrap();
    library.remove_favorite(&recipe.id).await.unwrap();
    assert!(!library.is_favorite(&recipe.id).await.unwrap());
    assert!(library.list_favorites().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_library_with_session_distinguishes_empty_from_absent() {
    let (identity, library) = setup().await;
    identity.sign_up("A", "a@example.com", "123456").await.unwrap();

    assert_eq!(library.load_all().await.unwrap(), Some(Vec::new()));

    library.save_all(&sample_recipes()).await.unwrap();
    assert_eq!(library.load_all().await.unwrap(), Some(sample_recipes()));

    // A different user sees nothing of the first user's data
    identity.sign_out();
    identity.sign_up("B", "b@example.com", "123456").await.unwrap();
    assert_eq!(library.load_all().await.unwrap(), Some(Vec::new()));
}
