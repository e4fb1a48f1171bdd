//! Session state - the explicit context every interaction runs against.
//!
//! A [`Session`] owns the document, the live camera, the selection, the
//! gesture state machine and the derived scene index. Pointer and keyboard
//! handling is implemented on it in [`crate::input`]; this module holds the
//! struct and the non-pointer operations (tabs, item commands, confirmation,
//! undo, import).
//!
//! Every mutation is recorded in a change outbox ([`Session::take_changes`]).
//! The board shell drains it to refresh the status line and feed the
//! autosave scheduler.

use crate::constants::{DRAG_THRESHOLD_PX, ZOOM_SENSITIVITY};
use crate::document::{ByteUsage, sanitize_tab_name};
use crate::error::{BoardError, BoardResult};
use crate::history::History;
use crate::input::InputState;
use crate::input::coords::Viewport;
use crate::input::transform::{centered_view, fit_to_view};
use crate::resources::{ResourceProbe, import_size};
use crate::scene::Scene;
use crate::settings::AppSettings;
use crate::types::{Camera, Document, Item, ItemId, TabId};
use crate::zorder;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// What changed, for status messages and autosave.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangeReason {
    Zoom,
    PanEnd,
    MoveEnd,
    ResizeEnd,
    BringToFront,
    FitToView,
    ItemsAdded(usize),
    ItemDeleted,
    TabCleared,
    LockToggled,
    FlipH,
    FlipV,
    TabSwitched,
    TabAdded,
    TabDuplicated,
    TabRenamed,
    TabDeleted,
    ViewReset,
    ViewCentered,
    UiScale,
    Imported,
    Undo,
    Redo,
}

impl ChangeReason {
    pub fn label(&self) -> String {
        match self {
            Self::Zoom => "Zoom".into(),
            Self::PanEnd => "Panned".into(),
            Self::MoveEnd => "Moved".into(),
            Self::ResizeEnd => "Resized".into(),
            Self::BringToFront => "Brought to front".into(),
            Self::FitToView => "Fit to view".into(),
            Self::ItemsAdded(1) => "Added 1 image".into(),
            Self::ItemsAdded(n) => format!("Added {n} images"),
            Self::ItemDeleted => "Deleted".into(),
            Self::TabCleared => "Cleared tab".into(),
            Self::LockToggled => "Toggled lock".into(),
            Self::FlipH => "Flipped horizontally".into(),
            Self::FlipV => "Flipped vertically".into(),
            Self::TabSwitched => "Switched tab".into(),
            Self::TabAdded => "Added tab".into(),
            Self::TabDuplicated => "Duplicated tab".into(),
            Self::TabRenamed => "Renamed tab".into(),
            Self::TabDeleted => "Deleted tab".into(),
            Self::ViewReset => "View reset".into(),
            Self::ViewCentered => "View centered".into(),
            Self::UiScale => "UI scale changed".into(),
            Self::Imported => "Imported board".into(),
            Self::Undo => "Undo".into(),
            Self::Redo => "Redo".into(),
        }
    }
}

/// One entry in the change outbox.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Change {
    pub reason: ChangeReason,
    /// Schedule a save but leave the status message alone (zoom, selection
    /// raise, tab switch).
    pub autosave_only: bool,
}

/// A destructive action waiting for the user to confirm it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingAction {
    DeleteItem { tab_id: TabId, item_id: ItemId },
    ClearTab(TabId),
    DeleteTab(TabId),
}

/// Data handed to the clipboard collaborator for "copy".
///
/// The core does not encode bitmaps; the collaborator reads `path` and
/// applies the flips.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClipboardImage {
    pub path: PathBuf,
    pub flip_h: bool,
    pub flip_v: bool,
}

/// Everything the renderer needs for one frame.
pub struct RenderFrame<'a> {
    /// Items back to front
    pub items: Vec<&'a Item>,
    pub selected: Option<&'a ItemId>,
    pub camera: Camera,
}

/// Interactive state for one open board.
pub struct Session {
    pub(crate) document: Document,
    /// Live camera; copied into the active tab on every camera change
    pub(crate) camera: Camera,
    pub(crate) viewport: Viewport,
    pub(crate) selected: Option<ItemId>,
    pub(crate) input_state: InputState,
    pub(crate) scene: Scene,
    pub(crate) history: History,
    pub(crate) pending: Option<PendingAction>,
    /// Pan modifier (space) currently held
    pub(crate) pan_modifier: bool,
    pub(crate) changes: Vec<Change>,
    pub(crate) drag_threshold: f64,
    pub(crate) zoom_sensitivity: f64,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(Document::new())
    }
}

impl Session {
    /// Open a session on a (normalized) document.
    pub fn new(document: Document) -> Self {
        let camera = document.active_tab().camera.clamped();
        let scene = Scene::from_tab(document.active_tab());
        let history = History::new(document.clone());
        Self {
            document,
            camera,
            viewport: Viewport::default(),
            selected: None,
            input_state: InputState::Idle,
            scene,
            history,
            pending: None,
            pan_modifier: false,
            changes: Vec::new(),
            drag_threshold: DRAG_THRESHOLD_PX,
            zoom_sensitivity: ZOOM_SENSITIVITY,
        }
    }

    /// Apply gesture tuning from the settings file.
    pub fn with_settings(mut self, settings: &AppSettings) -> Self {
        self.drag_threshold = settings.drag_threshold_px;
        self.zoom_sensitivity = settings.zoom_sensitivity;
        self
    }

    // ==================== Accessors ====================

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn camera(&self) -> Camera {
        self.camera
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    pub fn input_state(&self) -> &InputState {
        &self.input_state
    }

    pub fn selected(&self) -> Option<&ItemId> {
        self.selected.as_ref()
    }

    pub fn selected_item(&self) -> Option<&Item> {
        let id = self.selected.as_ref()?;
        self.document.active_tab().item(id)
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn pending_action(&self) -> Option<&PendingAction> {
        self.pending.as_ref()
    }

    pub fn pointer_captured(&self) -> bool {
        self.input_state.pointer_captured()
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Items in draw order with the selection and camera.
    pub fn render_frame(&self) -> RenderFrame<'_> {
        RenderFrame {
            items: zorder::draw_order(&self.document.active_tab().items),
            selected: self.selected.as_ref(),
            camera: self.camera,
        }
    }

    /// Consistent copy of the document for saving, with the live camera
    /// written into the active tab.
    pub fn snapshot(&self) -> Document {
        let mut doc = self.document.clone();
        doc.active_tab_mut().camera = self.camera;
        doc
    }

    /// Drain the change outbox.
    pub fn take_changes(&mut self) -> Vec<Change> {
        std::mem::take(&mut self.changes)
    }

    pub fn byte_usage(&mut self, probe: &dyn ResourceProbe) -> ByteUsage {
        self.document.byte_usage(probe)
    }

    // ==================== Internal helpers ====================

    pub(crate) fn mark_dirty(&mut self, reason: ChangeReason) {
        self.changes.push(Change {
            reason,
            autosave_only: false,
        });
    }

    pub(crate) fn mark_dirty_quiet(&mut self, reason: ChangeReason) {
        self.changes.push(Change {
            reason,
            autosave_only: true,
        });
    }

    /// Copy the live camera into the active tab.
    pub(crate) fn commit_camera(&mut self) {
        self.document.active_tab_mut().camera = self.camera;
    }

    pub(crate) fn set_camera(&mut self, camera: Camera) {
        self.camera = camera;
        self.commit_camera();
    }

    /// Record the current document as an undo step.
    pub(crate) fn push_history(&mut self) {
        self.commit_camera();
        self.history.push(self.document.clone());
    }

    pub(crate) fn rebuild_scene(&mut self) {
        self.scene.rebuild(self.document.active_tab());
    }

    pub(crate) fn active_item(&self, id: &ItemId) -> Option<&Item> {
        self.document.active_tab().item(id)
    }

    pub(crate) fn active_item_mut(&mut self, id: &ItemId) -> Option<&mut Item> {
        self.document.active_tab_mut().item_mut(id)
    }

    /// Re-index one item after it changed geometry or z.
    pub(crate) fn refresh_item(&mut self, id: &ItemId) {
        if let Some(item) = self.document.active_tab().item(id) {
            self.scene.update(item);
        }
    }

    pub(crate) fn select(&mut self, id: ItemId) {
        self.selected = Some(id);
    }

    pub(crate) fn deselect(&mut self) {
        self.selected = None;
    }

    // ==================== Item commands ====================

    /// Raise an item above its siblings. Returns false if it does not exist.
    pub fn bring_to_front(&mut self, id: &ItemId) -> bool {
        let raised = zorder::bring_to_front(&mut self.document.active_tab_mut().items, id);
        match raised {
            Some(z) => {
                debug!(item = %id, z, "Brought to front");
                self.refresh_item(id);
                self.mark_dirty_quiet(ChangeReason::BringToFront);
                true
            }
            None => false,
        }
    }

    pub fn bring_selected_to_front(&mut self) -> bool {
        match self.selected.clone() {
            Some(id) => self.bring_to_front(&id),
            None => false,
        }
    }

    /// Point the camera at an item so it fills the viewport.
    pub fn fit_item(&mut self, id: &ItemId) -> bool {
        let Some(item) = self.active_item(id) else {
            return false;
        };
        let camera = fit_to_view(item, &self.viewport);
        self.set_camera(camera);
        self.mark_dirty(ChangeReason::FitToView);
        true
    }

    fn toggle_selected(&mut self, reason: ChangeReason, toggle: impl FnOnce(&mut Item)) -> bool {
        let Some(id) = self.selected.clone() else {
            return false;
        };
        let Some(item) = self.active_item_mut(&id) else {
            return false;
        };
        toggle(item);
        self.refresh_item(&id);
        self.push_history();
        self.mark_dirty(reason);
        true
    }

    pub fn toggle_lock(&mut self) -> bool {
        self.toggle_selected(ChangeReason::LockToggled, |item| item.locked = !item.locked)
    }

    pub fn toggle_flip_h(&mut self) -> bool {
        self.toggle_selected(ChangeReason::FlipH, |item| item.flip_h = !item.flip_h)
    }

    pub fn toggle_flip_v(&mut self) -> bool {
        self.toggle_selected(ChangeReason::FlipV, |item| item.flip_v = !item.flip_v)
    }

    /// Clipboard payload for the selected item.
    pub fn copy_selected(&self, probe: &dyn ResourceProbe) -> BoardResult<Option<ClipboardImage>> {
        let Some(item) = self.selected_item() else {
            return Ok(None);
        };
        if !probe.exists(&item.path) {
            return Err(BoardError::ResourceMissing(item.path.clone()));
        }
        Ok(Some(ClipboardImage {
            path: item.path.clone(),
            flip_h: item.flip_h,
            flip_v: item.flip_v,
        }))
    }

    fn new_item_at_center(&self, path: &Path, probe: &dyn ResourceProbe) -> Item {
        let center = self.viewport.world_center(&self.camera);
        let size = import_size(probe.natural_size(path));
        let z = zorder::next_z(&self.document.active_tab().items);
        let mut item = Item::new(path, center, size, z);
        item.cached_byte_size = probe.byte_size(path);
        item
    }

    /// Add images at the viewport center, selecting the last one.
    ///
    /// Unreadable dimensions fall back to the default tile size; a missing
    /// file still produces a (placeholder) tile.
    pub fn add_images(&mut self, paths: &[PathBuf], probe: &dyn ResourceProbe) -> Vec<ItemId> {
        let mut added = Vec::with_capacity(paths.len());
        for path in paths {
            let item = self.new_item_at_center(path, probe);
            added.push(item.id.clone());
            self.scene.update(&item);
            self.document.active_tab_mut().items.push(item);
        }

        if let Some(last) = added.last() {
            self.select(last.clone());
            self.push_history();
            self.mark_dirty(ChangeReason::ItemsAdded(added.len()));
            info!(count = added.len(), "Added images");
        }
        added
    }

    pub fn add_image(&mut self, path: impl Into<PathBuf>, probe: &dyn ResourceProbe) -> ItemId {
        let path = path.into();
        let item = self.new_item_at_center(&path, probe);
        let id = item.id.clone();
        self.scene.update(&item);
        self.document.active_tab_mut().items.push(item);
        self.select(id.clone());
        self.push_history();
        self.mark_dirty(ChangeReason::ItemsAdded(1));
        id
    }

    // ==================== Confirmation ====================

    /// Ask to delete the selected item. Returns the pending action for the
    /// UI to confirm, or `None` if nothing is selected.
    pub fn request_delete_selected(&mut self) -> Option<&PendingAction> {
        let item_id = self.selected.clone()?;
        self.pending = Some(PendingAction::DeleteItem {
            tab_id: self.document.active_tab_id.clone(),
            item_id,
        });
        self.pending.as_ref()
    }

    pub fn request_clear_tab(&mut self) -> Option<&PendingAction> {
        self.pending = Some(PendingAction::ClearTab(self.document.active_tab_id.clone()));
        self.pending.as_ref()
    }

    /// Ask to delete the active tab. Refused outright for the last tab.
    pub fn request_delete_tab(&mut self) -> BoardResult<&PendingAction> {
        if self.document.tabs.len() <= 1 {
            return Err(BoardError::LastTab);
        }
        Ok(self
            .pending
            .insert(PendingAction::DeleteTab(self.document.active_tab_id.clone())))
    }

    /// Decline the pending action; nothing changes.
    pub fn cancel_pending(&mut self) {
        self.pending = None;
    }

    /// Carry out the pending action.
    pub fn confirm_pending(&mut self) -> BoardResult<bool> {
        let Some(action) = self.pending.take() else {
            return Ok(false);
        };

        match action {
            PendingAction::DeleteItem { tab_id, item_id } => {
                let removed = self
                    .document
                    .tab_mut(&tab_id)
                    .and_then(|tab| tab.remove_item(&item_id));
                if removed.is_none() {
                    return Ok(false);
                }
                if self.selected.as_ref() == Some(&item_id) {
                    self.deselect();
                }
                if tab_id == self.document.active_tab_id {
                    self.scene.remove(&item_id);
                }
                self.push_history();
                self.mark_dirty(ChangeReason::ItemDeleted);
            }
            PendingAction::ClearTab(tab_id) => {
                self.document.clear_tab(&tab_id)?;
                if tab_id == self.document.active_tab_id {
                    self.deselect();
                    self.rebuild_scene();
                }
                self.push_history();
                self.mark_dirty(ChangeReason::TabCleared);
            }
            PendingAction::DeleteTab(tab_id) => {
                self.commit_camera();
                let was_active = tab_id == self.document.active_tab_id;
                self.document.delete_tab(&tab_id)?;
                if was_active {
                    self.load_active_tab();
                }
                self.push_history();
                self.mark_dirty(ChangeReason::TabDeleted);
            }
        }
        Ok(true)
    }

    // ==================== Tabs ====================

    /// Pull camera, selection and scene from the document's active tab.
    fn load_active_tab(&mut self) {
        // Gestures belong to the tab they started on
        self.input_state.reset();
        self.camera = self.document.active_tab().camera.clamped();
        self.commit_camera();
        self.deselect();
        self.rebuild_scene();
    }

    /// Make `id` the active tab, saving the live camera into the old one.
    pub fn switch_tab(&mut self, id: &TabId) -> BoardResult<()> {
        if self.document.tab(id).is_none() {
            return Err(BoardError::TabNotFound(id.clone()));
        }
        self.commit_camera();
        self.document.set_active_tab(id)?;
        self.load_active_tab();
        self.mark_dirty_quiet(ChangeReason::TabSwitched);
        Ok(())
    }

    pub fn new_tab(&mut self) -> TabId {
        self.commit_camera();
        let id = self.document.add_tab();
        self.activate_created(&id);
        self.mark_dirty(ChangeReason::TabAdded);
        id
    }

    pub fn duplicate_active_tab(&mut self) -> BoardResult<TabId> {
        self.commit_camera();
        let src = self.document.active_tab_id.clone();
        let id = self.document.duplicate_tab(&src)?;
        self.activate_created(&id);
        self.mark_dirty(ChangeReason::TabDuplicated);
        Ok(id)
    }

    fn activate_created(&mut self, id: &TabId) {
        self.document.active_tab_id = id.clone();
        self.load_active_tab();
        self.push_history();
    }

    pub fn rename_tab(&mut self, id: &TabId, name: &str) -> BoardResult<String> {
        self.document.rename_tab(id, name)?;
        self.push_history();
        self.mark_dirty(ChangeReason::TabRenamed);
        Ok(sanitize_tab_name(name))
    }

    // ==================== View ====================

    pub fn reset_view(&mut self) {
        self.set_camera(Camera::default());
        self.mark_dirty(ChangeReason::ViewReset);
    }

    pub fn center_view(&mut self) {
        let camera = centered_view(&self.camera, &self.viewport);
        self.set_camera(camera);
        self.mark_dirty(ChangeReason::ViewCentered);
    }

    pub fn set_ui_scale(&mut self, scale: f64) -> f64 {
        let applied = self.document.set_ui_scale(scale);
        self.mark_dirty(ChangeReason::UiScale);
        applied
    }

    // ==================== Undo / import ====================

    fn restore(&mut self, state: Document) {
        let active = self.document.active_tab_id.clone();
        let camera = self.camera;
        self.document = state;

        if self.document.tab(&active).is_some() {
            self.document.active_tab_id = active;
            self.camera = camera;
            self.commit_camera();
        } else {
            self.camera = self.document.active_tab().camera.clamped();
        }

        if let Some(id) = self.selected.clone() {
            if self.active_item(&id).is_none() {
                self.deselect();
            }
        }
        self.input_state.reset();
        self.rebuild_scene();
    }

    pub fn undo(&mut self) -> bool {
        let Some(state) = self.history.undo().cloned() else {
            return false;
        };
        self.restore(state);
        self.mark_dirty(ChangeReason::Undo);
        true
    }

    pub fn redo(&mut self) -> bool {
        let Some(state) = self.history.redo().cloned() else {
            return false;
        };
        self.restore(state);
        self.mark_dirty(ChangeReason::Redo);
        true
    }

    /// Replace the document with an imported (normalized) one.
    pub fn replace_document(&mut self, document: Document) {
        self.document = document;
        self.input_state.reset();
        self.pending = None;
        self.load_active_tab();
        self.history.reset(self.document.clone());
        self.mark_dirty(ChangeReason::Imported);
    }
}
