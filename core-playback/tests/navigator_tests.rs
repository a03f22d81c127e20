mod support;

use async_trait::async_trait;
use bridge_traits::{BridgeError, CatalogEntry, CatalogProvider};
use core_playback::{AudioController, PlaybackError, TrackDirection, TrackNavigator};
use core_runtime::config::PlayerConfig;
use futures::StreamExt;
use mockall::mock;
use std::sync::Arc;
use support::FakeMediaEngine;

mock! {
    Catalog {}

    #[async_trait]
    impl CatalogProvider for Catalog {
        async fn get_files(&self) -> bridge_traits::error::Result<Vec<CatalogEntry>>;
    }
}

fn entries() -> Vec<CatalogEntry> {
    vec![
        CatalogEntry::new("First Song", "Ana", "https://cdn.example/first.mp3"),
        CatalogEntry::new("Second Song", "Ben", "https://cdn.example/second.mp3"),
        CatalogEntry::new("Third Song", "Cy", "https://cdn.example/third.mp3"),
    ]
}

fn navigator() -> (Arc<FakeMediaEngine>, TrackNavigator) {
    let engine = FakeMediaEngine::new();
    let controller = Arc::new(AudioController::new(engine.clone()));
    (engine, TrackNavigator::with_files(controller, entries()))
}

#[tokio::test]
async fn test_load_replaces_files() {
    let engine = FakeMediaEngine::new();
    let controller = Arc::new(AudioController::new(engine));
    let mut navigator = TrackNavigator::new(controller);

    let mut catalog = MockCatalog::new();
    catalog
        .expect_get_files()
        .times(1)
        .returning(|| Ok(entries()));

    assert_eq!(navigator.load(&catalog).await.unwrap(), 3);
    assert_eq!(navigator.files().len(), 3);
    assert_eq!(navigator.files()[1].artist, "Ben");
    assert!(navigator.current().is_none());
}

#[tokio::test]
async fn test_load_failure_is_catalog_error() {
    let (_engine, mut navigator) = navigator();

    let mut catalog = MockCatalog::new();
    catalog
        .expect_get_files()
        .returning(|| Err(BridgeError::OperationFailed("HTTP 503".to_string())));

    let err = navigator.load(&catalog).await.unwrap_err();
    assert!(matches!(err, PlaybackError::Catalog(_)));
    // The previous list is kept.
    assert_eq!(navigator.files().len(), 3);
}

#[tokio::test]
async fn test_refresh_uses_configured_catalog() {
    let mut catalog = MockCatalog::new();
    catalog
        .expect_get_files()
        .times(1)
        .returning(|| Ok(entries()[..2].to_vec()));

    let config = PlayerConfig::builder()
        .media_engine(FakeMediaEngine::new())
        .catalog_provider(Arc::new(catalog))
        .build()
        .unwrap();
    let controller = Arc::new(AudioController::from_config(config).unwrap());
    let mut navigator = TrackNavigator::new(controller);

    assert_eq!(navigator.refresh().await.unwrap(), 2);
}

#[tokio::test]
async fn test_refresh_without_catalog_reports_capability() {
    let (_engine, mut navigator) = navigator();

    match navigator.refresh().await {
        Err(PlaybackError::Runtime(core_runtime::Error::CapabilityMissing {
            capability, ..
        })) => assert_eq!(capability, "CatalogProvider"),
        other => panic!("unexpected result: {other:?}"),
    }
}

#[tokio::test]
async fn test_open_file_plays_selected_entry() {
    let (engine, mut navigator) = navigator();

    let mut stream = navigator.open_file(1).unwrap();
    stream.connect();

    assert_eq!(
        engine.source().as_deref(),
        Some("https://cdn.example/second.mp3")
    );
    assert_eq!(navigator.current_index(), Some(1));
    assert_eq!(navigator.current().unwrap().name, "Second Song");
    assert!(!navigator.is_first_playing());
    assert!(!navigator.is_last_playing());
}

#[tokio::test]
async fn test_open_file_stops_current_session() {
    let (engine, mut navigator) = navigator();
    let mut first = navigator.open_file(0).unwrap();
    first.connect();

    let _second = navigator.open_file(1).unwrap();

    assert_eq!(navigator.controller().active_session(), None);
    assert_eq!(engine.listener_count(), 0);
    assert!(first.next().await.is_none());
}

#[tokio::test]
async fn test_open_file_out_of_range() {
    let (_engine, mut navigator) = navigator();

    assert!(matches!(
        navigator.open_file(5),
        Err(PlaybackError::TrackIndexOutOfRange { index: 5, len: 3 })
    ));
    assert_eq!(navigator.current_index(), None);
}

#[tokio::test]
async fn test_navigation_on_empty_catalog() {
    let engine = FakeMediaEngine::new();
    let mut navigator = TrackNavigator::new(Arc::new(AudioController::new(engine)));

    assert!(matches!(navigator.next(), Err(PlaybackError::EmptyCatalog)));
    assert!(matches!(navigator.previous(), Err(PlaybackError::EmptyCatalog)));
    assert!(matches!(navigator.open_file(0), Err(PlaybackError::EmptyCatalog)));
}

#[tokio::test]
async fn test_fresh_navigator_has_no_selection() {
    let (engine, mut navigator) = navigator();

    assert_eq!(navigator.current_index(), None);
    assert!(!navigator.is_first_playing());
    assert!(!navigator.is_last_playing());

    let mut stream = navigator.next().unwrap();
    stream.connect();
    assert_eq!(navigator.current_index(), Some(0));
    assert_eq!(
        engine.source().as_deref(),
        Some("https://cdn.example/first.mp3")
    );
}

#[tokio::test]
async fn test_next_and_previous_walk_the_list() {
    let (_engine, mut navigator) = navigator();

    navigator.next().unwrap();
    assert!(navigator.is_first_playing());
    assert!(matches!(
        navigator.previous(),
        Err(PlaybackError::NoAdjacentTrack(TrackDirection::Previous))
    ));

    navigator.next().unwrap();
    navigator.next().unwrap();
    assert!(navigator.is_last_playing());
    assert!(matches!(
        navigator.next(),
        Err(PlaybackError::NoAdjacentTrack(TrackDirection::Next))
    ));

    navigator.previous().unwrap();
    assert_eq!(navigator.current_index(), Some(1));
}

#[tokio::test]
async fn test_transport_passthrough() {
    let (engine, mut navigator) = navigator();
    let mut stream = navigator.open_file(2).unwrap();
    stream.connect();
    engine.set_duration(Some(200.0));

    navigator.seek_to(50.0);
    assert_eq!(engine.position(), 50.0);

    navigator.stop();
    assert_eq!(engine.position(), 0.0);
    assert!(navigator.controller().current_state().is_idle());
}
