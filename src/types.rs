//! Core types for the pinboard document.
//!
//! A [`Document`] owns an ordered list of [`Tab`]s; each tab owns its
//! [`Camera`] and an ordered list of [`Item`]s. Ownership is strictly
//! hierarchical, so every type here is plain data with `Clone`.
//!
//! Field names on the wire are PascalCase (`V`, `Ui`, `ActiveTabId`, `Tabs`,
//! `Cam`, `Lock`, ...), which keeps boards written by earlier versions of the
//! app loadable.

use crate::constants::{DEFAULT_CAMERA, DEFAULT_ITEM_SIZE, DEFAULT_TAB_NAME, FORMAT_VERSION};
use crate::input::coords::WorldPoint;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::path::PathBuf;
use uuid::Uuid;

/// Treat an explicit JSON `null` the same as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn new_hex_id() -> String {
    Uuid::new_v4().simple().to_string()
}

// ============================================================================
// Identifiers
// ============================================================================

/// Identifier of a tab, unique within a document and immutable once created.
///
/// `TabId::default()` is the blank (unset) id; normalization replaces a blank
/// active-tab id with the first tab's id.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TabId(String);

impl TabId {
    pub fn new() -> Self {
        Self(new_hex_id())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl From<&str> for TabId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl fmt::Display for TabId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier of an item, unique within its tab.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    pub fn new() -> Self {
        Self(new_hex_id())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for ItemId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<&str> for ItemId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ============================================================================
// Camera
// ============================================================================

/// Per-tab world-to-canvas mapping: `canvas = world * scale + (tx, ty)`.
///
/// Conversions live in [`crate::input::coords`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Camera {
    pub tx: f64,
    pub ty: f64,
    pub scale: f64,
}

impl Camera {
    pub fn new(tx: f64, ty: f64, scale: f64) -> Self {
        Self { tx, ty, scale }
    }
}

impl Default for Camera {
    fn default() -> Self {
        let (tx, ty, scale) = DEFAULT_CAMERA;
        Self { tx, ty, scale }
    }
}

// ============================================================================
// Items
// ============================================================================

/// An image tile placed on a tab.
///
/// `x`/`y` is the world-space center, `w`/`h` the world-space size.
/// `cached_byte_size` is derived from the file on disk; it is never written
/// out and is ignored by equality.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Item {
    #[serde(default)]
    pub id: ItemId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub path: PathBuf,
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
    #[serde(default = "default_item_w")]
    pub w: f64,
    #[serde(default = "default_item_h")]
    pub h: f64,
    #[serde(default = "default_item_z")]
    pub z: i64,
    #[serde(rename = "Lock", default)]
    pub locked: bool,
    #[serde(default)]
    pub flip_h: bool,
    #[serde(default)]
    pub flip_v: bool,
    #[serde(skip)]
    pub cached_byte_size: u64,
}

fn default_item_w() -> f64 {
    DEFAULT_ITEM_SIZE.0
}

fn default_item_h() -> f64 {
    DEFAULT_ITEM_SIZE.1
}

fn default_item_z() -> i64 {
    1
}

impl Item {
    /// Create an unlocked, unflipped item centered on `center`.
    pub fn new(path: impl Into<PathBuf>, center: WorldPoint, size: (f64, f64), z: i64) -> Self {
        Self {
            id: ItemId::new(),
            path: path.into(),
            x: center.x,
            y: center.y,
            w: size.0,
            h: size.1,
            z,
            locked: false,
            flip_h: false,
            flip_v: false,
            cached_byte_size: 0,
        }
    }

    pub fn center(&self) -> WorldPoint {
        WorldPoint::new(self.x, self.y)
    }

    /// World-space bounds as `(min_x, min_y, max_x, max_y)`.
    pub fn bounds(&self) -> (f64, f64, f64, f64) {
        let (hw, hh) = (self.w / 2.0, self.h / 2.0);
        (self.x - hw, self.y - hh, self.x + hw, self.y + hh)
    }

    pub fn contains(&self, p: WorldPoint) -> bool {
        let (min_x, min_y, max_x, max_y) = self.bounds();
        p.x >= min_x && p.x <= max_x && p.y >= min_y && p.y <= max_y
    }

    /// Copy with a fresh id, keeping everything else (used by tab duplication).
    pub fn duplicate(&self) -> Self {
        Self {
            id: ItemId::new(),
            ..self.clone()
        }
    }
}

impl PartialEq for Item {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.path == other.path
            && self.x == other.x
            && self.y == other.y
            && self.w == other.w
            && self.h == other.h
            && self.z == other.z
            && self.locked == other.locked
            && self.flip_h == other.flip_h
            && self.flip_v == other.flip_v
    }
}

// ============================================================================
// Tabs & document
// ============================================================================

/// A named canvas with its own camera and items.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Tab {
    #[serde(default = "TabId::new")]
    pub id: TabId,
    #[serde(default = "default_tab_name", deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(rename = "Cam", default, deserialize_with = "null_as_default")]
    pub camera: Camera,
    /// Insertion order; draw order is this sorted stably by `z`.
    #[serde(default, deserialize_with = "null_as_default")]
    pub items: Vec<Item>,
}

fn default_tab_name() -> String {
    DEFAULT_TAB_NAME.to_string()
}

impl Tab {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: TabId::new(),
            name: name.into(),
            camera: Camera::default(),
            items: Vec::new(),
        }
    }

    pub fn item(&self, id: &ItemId) -> Option<&Item> {
        self.items.iter().find(|item| &item.id == id)
    }

    pub fn item_mut(&mut self, id: &ItemId) -> Option<&mut Item> {
        self.items.iter_mut().find(|item| &item.id == id)
    }

    /// Remove an item, returning it if it existed.
    pub fn remove_item(&mut self, id: &ItemId) -> Option<Item> {
        let idx = self.items.iter().position(|item| &item.id == id)?;
        Some(self.items.remove(idx))
    }
}

/// UI preferences stored with the board
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UiSettings {
    pub scale: f64,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self { scale: 1.0 }
    }
}

/// The persisted board: format tag, UI settings, active tab and tabs.
///
/// `tabs` is never empty and `active_tab_id` always names one of them once
/// the document has gone through [`Document::normalize`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Document {
    #[serde(rename = "V", default = "default_version", deserialize_with = "null_as_default")]
    pub version: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub ui: UiSettings,
    #[serde(default, deserialize_with = "null_as_default")]
    pub active_tab_id: TabId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tabs: Vec<Tab>,
}

fn default_version() -> String {
    FORMAT_VERSION.to_string()
}
