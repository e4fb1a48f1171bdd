//! Test helpers and builders for reducing boilerplate in tests.
//!
//! This module provides:
//! - `TestSessionBuilder` - Builder for sessions with items, camera and viewport
//! - `MemoryResources` - In-memory resource probe with fixed sizes
//! - Gesture helpers (`press`, `move_to`, `release`) and assertions

#![allow(dead_code)]

use pinboard::input::coords::{ScreenPoint, Viewport, WorldPoint};
use pinboard::input::{InputEvent, PointerEvent};
use pinboard::resources::ResourceProbe;
use pinboard::session::Session;
use pinboard::types::{Camera, Document, Item, ItemId, Tab};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

// ============================================================================
// TestSessionBuilder
// ============================================================================

/// Builder for sessions on a single-tab document.
///
/// # Example
/// ```ignore
/// let (session, ids) = TestSessionBuilder::new()
///     .with_item("/a.png", (100.0, 100.0), (100.0, 100.0))
///     .with_camera(0.0, 0.0, 2.0)
///     .build();
/// ```
pub struct TestSessionBuilder {
    items: Vec<Item>,
    camera: Camera,
    viewport: Viewport,
}

impl Default for TestSessionBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestSessionBuilder {
    /// Identity camera, 1000x800 viewport at the window origin.
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            camera: Camera::new(0.0, 0.0, 1.0),
            viewport: Viewport::new(ScreenPoint::new(0.0, 0.0), 1000.0, 800.0),
        }
    }

    pub fn with_camera(mut self, tx: f64, ty: f64, scale: f64) -> Self {
        self.camera = Camera::new(tx, ty, scale);
        self
    }

    pub fn with_viewport(mut self, origin: (f64, f64), width: f64, height: f64) -> Self {
        self.viewport = Viewport::new(ScreenPoint::new(origin.0, origin.1), width, height);
        self
    }

    /// Add an item centered at `center`; z increases with each item.
    pub fn with_item(mut self, path: &str, center: (f64, f64), size: (f64, f64)) -> Self {
        let z = self.items.len() as i64 + 1;
        self.items.push(Item::new(
            path,
            WorldPoint::new(center.0, center.1),
            size,
            z,
        ));
        self
    }

    /// Lock the most recently added item.
    pub fn locked(mut self) -> Self {
        if let Some(item) = self.items.last_mut() {
            item.locked = true;
        }
        self
    }

    pub fn build_document(self) -> Document {
        let mut doc = Document::new();
        let tab = &mut doc.tabs[0];
        tab.camera = self.camera;
        tab.items = self.items;
        doc
    }

    /// Build the session, returning the item ids in insertion order.
    pub fn build(self) -> (Session, Vec<ItemId>) {
        let viewport = self.viewport;
        let doc = self.build_document();
        let ids = doc.tabs[0].items.iter().map(|item| item.id.clone()).collect();
        let mut session = Session::new(doc);
        session.set_viewport(viewport);
        (session, ids)
    }
}

// ============================================================================
// Resources
// ============================================================================

/// Probe backed by a map of path -> (bytes, natural size).
#[derive(Default)]
pub struct MemoryResources {
    files: HashMap<PathBuf, (u64, Option<(u32, u32)>)>,
}

impl MemoryResources {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(mut self, path: &str, bytes: u64, dims: Option<(u32, u32)>) -> Self {
        self.files.insert(PathBuf::from(path), (bytes, dims));
        self
    }
}

impl ResourceProbe for MemoryResources {
    fn exists(&self, path: &Path) -> bool {
        self.files.contains_key(path)
    }

    fn byte_size(&self, path: &Path) -> u64 {
        self.files.get(path).map(|(bytes, _)| *bytes).unwrap_or(0)
    }

    fn natural_size(&self, path: &Path) -> Option<(u32, u32)> {
        self.files.get(path).and_then(|(_, dims)| *dims)
    }
}

// ============================================================================
// Gestures
// ============================================================================

pub fn press(session: &mut Session, x: f64, y: f64) {
    session.dispatch(InputEvent::PointerDown(PointerEvent::primary(
        ScreenPoint::new(x, y),
    )));
}

pub fn double_click(session: &mut Session, x: f64, y: f64) {
    session.dispatch(InputEvent::PointerDown(
        PointerEvent::primary(ScreenPoint::new(x, y)).with_clicks(2),
    ));
}

pub fn move_to(session: &mut Session, x: f64, y: f64) {
    session.dispatch(InputEvent::PointerMove(ScreenPoint::new(x, y)));
}

pub fn release(session: &mut Session, x: f64, y: f64) {
    session.dispatch(InputEvent::PointerUp(ScreenPoint::new(x, y)));
}

/// Press at `from`, move through `to`, release at `to`.
pub fn drag(session: &mut Session, from: (f64, f64), to: (f64, f64)) {
    press(session, from.0, from.1);
    move_to(session, to.0, to.1);
    release(session, to.0, to.1);
}

// ============================================================================
// Assertions
// ============================================================================

pub fn item<'a>(session: &'a Session, id: &ItemId) -> &'a Item {
    session
        .document()
        .active_tab()
        .item(id)
        .unwrap_or_else(|| panic!("item {id} not found"))
}

pub fn item_center(session: &Session, id: &ItemId) -> (f64, f64) {
    let item = item(session, id);
    (item.x, item.y)
}

pub fn assert_item_count(session: &Session, expected: usize) {
    assert_eq!(
        session.document().active_tab().items.len(),
        expected,
        "expected {expected} items on the active tab"
    );
}

pub fn assert_close(a: f64, b: f64) {
    assert!((a - b).abs() < 1e-9, "{a} != {b}");
}

/// Tab with fixed ids, for snapshot tests.
pub fn fixed_tab(id: &str, name: &str) -> Tab {
    let mut tab = Tab::new(name);
    tab.id = id.into();
    tab
}
