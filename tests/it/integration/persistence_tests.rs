//! Saving and loading whole boards through the JSON store.

use crate::helpers::{TestSessionBuilder, fixed_tab};
use pinboard::Document;
use pinboard::error::BoardError;
use pinboard::input::coords::WorldPoint;
use pinboard::persistence::{JsonStore, Persistence};
use pinboard::types::{Camera, Item};
use tempfile::tempdir;

fn varied_item(id: &str, x: f64, z: i64, locked: bool, flip_h: bool, flip_v: bool) -> Item {
    let mut item = Item::new(format!("/img/{id}.png"), WorldPoint::new(x, -x), (200.0, 150.0), z);
    item.id = id.into();
    item.locked = locked;
    item.flip_h = flip_h;
    item.flip_v = flip_v;
    item.cached_byte_size = 4096;
    item
}

#[tokio::test]
async fn test_two_tab_round_trip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("board.json");

    let mut empty = fixed_tab("t1", "Empty");
    empty.camera = Camera::new(-40.0, 12.5, 0.75);
    let mut full = fixed_tab("t2", "Full");
    full.items = vec![
        varied_item("a", 10.0, 3, true, false, false),
        varied_item("b", 20.0, 1, false, true, false),
        varied_item("c", 30.0, 7, false, false, true),
    ];

    let mut doc = Document::new();
    doc.tabs = vec![empty, full];
    doc.active_tab_id = "t2".into();
    doc.ui.scale = 0.8;

    JsonStore.save(doc.clone(), path.clone()).await.unwrap();
    let loaded = JsonStore.load(path).await.unwrap();

    assert_eq!(loaded, doc);
    assert!(loaded.tabs[1].items.iter().all(|i| i.cached_byte_size == 0));
    assert_eq!(loaded.tabs[1].items[2].z, 7);
}

#[tokio::test]
async fn test_session_snapshot_carries_live_camera() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("board.json");
    let (mut session, _) = TestSessionBuilder::new()
        .with_item("/a.png", (0.0, 0.0), (100.0, 100.0))
        .build();

    session.reset_view();
    JsonStore.save(session.snapshot(), path.clone()).await.unwrap();

    let loaded = JsonStore.load(path).await.unwrap();
    assert_eq!(loaded.active_tab().camera, Camera::new(200.0, 120.0, 1.0));
    assert_eq!(loaded, session.snapshot());
}

#[tokio::test]
async fn test_failed_write_keeps_previous_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("board.json");
    let doc = Document::new();
    JsonStore.save(doc.clone(), path.clone()).await.unwrap();

    // a directory where the file should go
    let blocked = dir.path().join("blocked.json");
    std::fs::create_dir(&blocked).unwrap();
    let result = JsonStore.save(doc.clone(), blocked).await;

    assert!(matches!(result, Err(BoardError::Persistence { .. })));
    assert_eq!(JsonStore.load(path).await.unwrap(), doc);
}

#[tokio::test]
async fn test_loading_legacy_board_fills_defaults() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("old.json");
    std::fs::write(
        &path,
        r#"{
            "Tabs": [{
                "Id": "t1",
                "Name": null,
                "Cam": null,
                "Items": [{ "Id": "x", "Path": "/p.png", "X": 5, "Y": 6 }, { "Id": "x", "Path": "/q.png" }]
            }]
        }"#,
    )
    .unwrap();

    let doc = JsonStore.load(path).await.unwrap();
    let tab = &doc.tabs[0];

    assert_eq!(doc.version, "pinboard-1");
    assert_eq!(doc.active_tab_id.as_str(), "t1");
    assert_eq!(tab.name, "Tab");
    assert_eq!(tab.camera, Camera::new(200.0, 120.0, 1.0));
    assert_eq!((tab.items[0].w, tab.items[0].h, tab.items[0].z), (420.0, 300.0, 1));
    assert_ne!(tab.items[0].id, tab.items[1].id);
}
