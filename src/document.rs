//! Document and tab operations.
//!
//! Structural invariants maintained here:
//! - `tabs` is never empty; deleting the last tab is refused.
//! - `active_tab_id` names an existing tab.
//! - tab ids are unique in the document, item ids unique within a tab.

use crate::constants::{
    COPY_SUFFIX, DEFAULT_ITEM_SIZE, DEFAULT_TAB_NAME, MAX_ITEM_SIZE, MAX_TAB_NAME_CHARS,
    MAX_UI_SCALE, MIN_ITEM_SIZE, MIN_UI_SCALE,
};
use crate::error::{BoardError, BoardResult};
use crate::resources::ResourceProbe;
use crate::types::{Document, Item, ItemId, Tab, TabId};
use std::collections::HashSet;
use tracing::{debug, warn};

/// Trim, truncate to the tab-name limit and replace blank names.
pub fn sanitize_tab_name(name: &str) -> String {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        DEFAULT_TAB_NAME.to_string()
    } else {
        trimmed.chars().take(MAX_TAB_NAME_CHARS).collect()
    }
}

/// Bring a loaded item's size into the resize range and drop non-finite
/// coordinates.
fn repair_geometry(item: &mut Item) {
    let clamp_size = |v: f64, fallback: f64| {
        if v.is_finite() {
            v.clamp(MIN_ITEM_SIZE, MAX_ITEM_SIZE)
        } else {
            fallback
        }
    };
    let (w, h) = (
        clamp_size(item.w, DEFAULT_ITEM_SIZE.0),
        clamp_size(item.h, DEFAULT_ITEM_SIZE.1),
    );
    if (w, h) != (item.w, item.h) {
        debug!(item = %item.id, w = item.w, h = item.h, "Clamping item size");
        item.w = w;
        item.h = h;
    }
    if !item.x.is_finite() {
        item.x = 0.0;
    }
    if !item.y.is_finite() {
        item.y = 0.0;
    }
}

/// Resource byte totals for the status chip
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ByteUsage {
    /// Bytes referenced by the active tab
    pub tab: u64,
    /// Bytes referenced by the whole document
    pub total: u64,
}

impl ByteUsage {
    pub fn tab_mb(&self) -> f64 {
        self.tab as f64 / (1024.0 * 1024.0)
    }

    pub fn total_mb(&self) -> f64 {
        self.total as f64 / (1024.0 * 1024.0)
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Fresh document with a single empty tab.
    pub fn new() -> Self {
        let tab = Tab::new(format!("{DEFAULT_TAB_NAME} 1"));
        Self {
            version: crate::constants::FORMAT_VERSION.to_string(),
            ui: Default::default(),
            active_tab_id: tab.id.clone(),
            tabs: vec![tab],
        }
    }

    /// Parse a saved board and normalize it.
    pub fn from_json(json: &str) -> BoardResult<Self> {
        let mut doc: Document = serde_json::from_str(json)?;
        doc.normalize()?;
        Ok(doc)
    }

    pub fn to_json(&self) -> BoardResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Repair a freshly loaded document.
    ///
    /// Missing UI settings, cameras and item lists were already defaulted by
    /// deserialization; this fills in what needs the whole document: blank or
    /// duplicate ids, the active tab and value ranges. A document without
    /// tabs cannot be repaired.
    pub fn normalize(&mut self) -> BoardResult<()> {
        if self.tabs.is_empty() {
            return Err(BoardError::Validation("board has no tabs".to_string()));
        }

        self.ui.scale = clamp_ui_scale(self.ui.scale);

        let mut tab_ids = HashSet::new();
        for tab in &mut self.tabs {
            if tab.id.is_blank() || !tab_ids.insert(tab.id.clone()) {
                warn!(tab = %tab.id, "Reassigning blank or duplicate tab id");
                tab.id = TabId::new();
                tab_ids.insert(tab.id.clone());
            }
            if tab.name.trim().is_empty() {
                tab.name = DEFAULT_TAB_NAME.to_string();
            }
            tab.camera = tab.camera.clamped();

            let mut item_ids = HashSet::new();
            for item in &mut tab.items {
                if item.id.as_str().trim().is_empty() || !item_ids.insert(item.id.clone()) {
                    item.id = ItemId::new();
                    item_ids.insert(item.id.clone());
                }
                repair_geometry(item);
                item.cached_byte_size = 0;
            }
        }

        if self.active_tab_id.is_blank() || self.tab(&self.active_tab_id).is_none() {
            debug!(active = %self.active_tab_id, "Active tab unset, falling back to first tab");
            self.active_tab_id = self.tabs[0].id.clone();
        }

        Ok(())
    }

    // ==================== Tab lookup ====================

    pub fn tab(&self, id: &TabId) -> Option<&Tab> {
        self.tabs.iter().find(|tab| &tab.id == id)
    }

    pub fn tab_mut(&mut self, id: &TabId) -> Option<&mut Tab> {
        self.tabs.iter_mut().find(|tab| &tab.id == id)
    }

    fn tab_index(&self, id: &TabId) -> Option<usize> {
        self.tabs.iter().position(|tab| &tab.id == id)
    }

    fn active_index(&self) -> usize {
        self.tab_index(&self.active_tab_id).unwrap_or(0)
    }

    pub fn active_tab(&self) -> &Tab {
        &self.tabs[self.active_index()]
    }

    pub fn active_tab_mut(&mut self) -> &mut Tab {
        let idx = self.active_index();
        &mut self.tabs[idx]
    }

    pub fn set_active_tab(&mut self, id: &TabId) -> BoardResult<()> {
        if self.tab(id).is_none() {
            return Err(BoardError::TabNotFound(id.clone()));
        }
        self.active_tab_id = id.clone();
        Ok(())
    }

    // ==================== Tab CRUD ====================

    /// Append a new empty tab named after its position. Does not activate it.
    pub fn add_tab(&mut self) -> TabId {
        let tab = Tab::new(format!("{DEFAULT_TAB_NAME} {}", self.tabs.len() + 1));
        let id = tab.id.clone();
        self.tabs.push(tab);
        id
    }

    /// Append a copy of `id` with fresh item ids. Does not activate it.
    pub fn duplicate_tab(&mut self, id: &TabId) -> BoardResult<TabId> {
        let src = self.tab(id).ok_or_else(|| BoardError::TabNotFound(id.clone()))?;
        let copy = Tab {
            id: TabId::new(),
            name: sanitize_tab_name(&format!("{}{COPY_SUFFIX}", src.name)),
            camera: src.camera,
            items: src.items.iter().map(|item| item.duplicate()).collect(),
        };
        let new_id = copy.id.clone();
        self.tabs.push(copy);
        Ok(new_id)
    }

    pub fn rename_tab(&mut self, id: &TabId, name: &str) -> BoardResult<()> {
        let tab = self.tab_mut(id).ok_or_else(|| BoardError::TabNotFound(id.clone()))?;
        tab.name = sanitize_tab_name(name);
        Ok(())
    }

    /// Remove a tab. If it was active, its left neighbour (or the new first
    /// tab) becomes active. Returns the active tab id afterwards.
    pub fn delete_tab(&mut self, id: &TabId) -> BoardResult<TabId> {
        if self.tabs.len() <= 1 {
            return Err(BoardError::LastTab);
        }
        let idx = self
            .tab_index(id)
            .ok_or_else(|| BoardError::TabNotFound(id.clone()))?;

        self.tabs.remove(idx);
        if &self.active_tab_id == id {
            self.active_tab_id = self.tabs[idx.saturating_sub(1)].id.clone();
        }
        Ok(self.active_tab_id.clone())
    }

    /// Remove every item from a tab. Returns how many were removed.
    pub fn clear_tab(&mut self, id: &TabId) -> BoardResult<usize> {
        let tab = self.tab_mut(id).ok_or_else(|| BoardError::TabNotFound(id.clone()))?;
        let count = tab.items.len();
        tab.items.clear();
        Ok(count)
    }

    // ==================== Settings & stats ====================

    /// Apply a UI scale, clamped to the supported range. Returns the value used.
    pub fn set_ui_scale(&mut self, scale: f64) -> f64 {
        self.ui.scale = clamp_ui_scale(scale);
        self.ui.scale
    }

    /// Byte totals for the active tab and the whole document.
    ///
    /// Uses each item's cached size when present and fills the cache from
    /// `probe` otherwise. Missing files count as zero.
    pub fn byte_usage(&mut self, probe: &dyn ResourceProbe) -> ByteUsage {
        let active = self.active_tab_id.clone();
        let mut usage = ByteUsage::default();

        for tab in &mut self.tabs {
            let is_active = tab.id == active;
            for item in &mut tab.items {
                if item.cached_byte_size == 0 {
                    item.cached_byte_size = probe.byte_size(&item.path);
                }
                usage.total += item.cached_byte_size;
                if is_active {
                    usage.tab += item.cached_byte_size;
                }
            }
        }
        usage
    }
}

fn clamp_ui_scale(scale: f64) -> f64 {
    if scale.is_finite() {
        scale.clamp(MIN_UI_SCALE, MAX_UI_SCALE)
    } else {
        1.0
    }
}
