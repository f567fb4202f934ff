//! Builder save/load flow against real stores

use async_trait::async_trait;
use ienet_document::{ElementTemplate, ElementType, PageData};
use ienet_editor::{
    Builder, BuilderOptions, EditorError, JsonFileStore, MemoryStore, PageStore, SaveOutcome,
    SaveStatus, StoreError,
};

/// A store whose saves always fail
struct BrokenStore;

#[async_trait]
impl PageStore for BrokenStore {
    async fn load_page(&self, id: &str) -> Result<PageData, StoreError> {
        Err(StoreError::NotFound(id.to_string()))
    }

    async fn save_page(&self, _page: &PageData) -> Result<PageData, StoreError> {
        Err(StoreError::Unavailable("backend offline".to_string()))
    }
}

fn heading(content: &str) -> ElementTemplate {
    ElementTemplate::new(ElementType::Text).with_content(content)
}

#[tokio::test]
async fn test_save_marks_clean() {
    let store = MemoryStore::new();
    let mut builder = Builder::new(PageData::new("home", "Home"));
    builder.add_element(heading("Hi"), None, None).unwrap();

    assert!(builder.is_dirty());
    assert_eq!(builder.save(&store).await.unwrap(), SaveStatus::Saved);
    assert!(!builder.is_dirty());
    assert!(builder.last_saved_at().is_some());

    let stored = store.load_page("home").await.unwrap();
    assert_eq!(&stored, builder.page());
}

#[tokio::test]
async fn test_edit_during_save_stays_unsaved() {
    let store = MemoryStore::new();
    let mut builder = Builder::new(PageData::new("home", "Home"));

    let request = builder.begin_save().unwrap();
    assert_eq!(builder.status(), SaveStatus::Saving);

    builder.add_element(heading("late"), None, None).unwrap();
    let response = request.execute(&store).await;

    assert_eq!(builder.finish_save(response).unwrap(), SaveStatus::Unsaved);
    assert!(store.load_page("home").await.unwrap().elements.is_empty());
}

#[tokio::test]
async fn test_superseded_save_is_ignored() {
    let store = MemoryStore::new();
    let mut builder = Builder::new(PageData::new("home", "Home"));

    let first = builder.begin_save().unwrap();
    builder.add_element(heading("newer"), None, None).unwrap();
    let second = builder.begin_save().unwrap();

    assert!(first.is_cancelled());
    let first_response = first.execute(&store).await;
    assert!(matches!(first_response.outcome, SaveOutcome::Cancelled));

    // stale response changes nothing
    assert_eq!(builder.finish_save(first_response).unwrap(), SaveStatus::Saving);

    let second_response = second.execute(&store).await;
    assert_eq!(builder.finish_save(second_response).unwrap(), SaveStatus::Saved);
    assert_eq!(store.load_page("home").await.unwrap().elements.len(), 1);
}

#[tokio::test]
async fn test_failed_save_keeps_edits_unsaved() {
    let mut builder = Builder::new(PageData::new("home", "Home"));
    builder.add_element(heading("Hi"), None, None).unwrap();

    let err = builder.save(&BrokenStore).await.unwrap_err();
    assert!(matches!(
        err,
        EditorError::Persistence(StoreError::Unavailable(_))
    ));
    assert_eq!(builder.status(), SaveStatus::Unsaved);
    assert_eq!(builder.page().elements.len(), 1);
    assert!(builder.can_undo());
}

#[tokio::test]
async fn test_cancel_save() {
    let store = MemoryStore::new();
    let mut builder = Builder::new(PageData::new("home", "Home"));

    let request = builder.begin_save().unwrap();
    builder.cancel_save();
    assert_eq!(builder.status(), SaveStatus::Unsaved);

    let response = request.execute(&store).await;
    assert!(matches!(response.outcome, SaveOutcome::Cancelled));
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn test_save_requires_title() {
    let store = MemoryStore::new();
    let mut builder = Builder::new(PageData::new("home", "   "));

    let err = builder.save(&store).await.unwrap_err();
    assert!(matches!(err, EditorError::Validation(_)));
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn test_slug_conflict_surfaces_as_persistence_error() {
    let store = MemoryStore::with_pages([PageData::new("a", "Services")]);
    let mut builder = Builder::new(PageData::new("b", "Services"));

    let err = builder.save(&store).await.unwrap_err();
    assert!(matches!(
        err,
        EditorError::Persistence(StoreError::SlugConflict { .. })
    ));
}

#[tokio::test]
async fn test_load_missing_page() {
    let store = MemoryStore::new();
    let err = Builder::load(&store, "nope", BuilderOptions::default())
        .await
        .unwrap_err();

    assert!(matches!(err, EditorError::NotFound(ref id) if id == "nope"));
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_round_trip_through_json_files() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileStore::new(dir.path().join("pages"));

    let mut builder = Builder::new(PageData::new("landing", "Landing"));
    let hero = builder.add_from_library("hero-banner", None, None).unwrap();
    builder.set_inline_style(&hero, "minHeight", "80vh").unwrap();
    builder.save(&store).await.unwrap();

    let loaded = Builder::load(&store, "landing", BuilderOptions::default())
        .await
        .unwrap();
    assert_eq!(loaded.status(), SaveStatus::Saved);
    assert!(!loaded.can_undo());
    assert_eq!(loaded.page(), builder.page());
    loaded.page().check_integrity().unwrap();
}

#[tokio::test]
async fn test_loaded_page_gets_fresh_ids() {
    let store = MemoryStore::new();
    let mut first = Builder::new(PageData::new("home", "Home"));
    let existing = first.add_element(heading("a"), None, None).unwrap();
    first.save(&store).await.unwrap();

    let mut second = Builder::load(&store, "home", BuilderOptions::default())
        .await
        .unwrap();
    let added = second.add_element(heading("b"), None, None).unwrap();

    assert_ne!(existing, added);
    second.page().check_integrity().unwrap();
}
