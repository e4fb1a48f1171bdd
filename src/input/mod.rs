//! Pointer, wheel and keyboard input for the canvas.
//!
//! All input funnels through [`Session::dispatch`], which applies the
//! gesture state machine to one event at a time. Nothing attaches handlers
//! per item: the scene index answers "what is under the pointer" and where
//! each item currently sits.
//!
//! ## Modules
//!
//! - `coords` - Screen, canvas and world points and the conversions between them
//! - `state` - Input state machine enum and helper methods
//! - `mouse_down` - Pointer down handling (selection, pan/press/resize start)
//! - `drag` - Pointer move handling (pan, drag threshold, move, resize)
//! - `mouse_up` - Pointer up handling (finalize and commit gestures)
//! - `keyboard` - Keyboard commands
//! - `transform` - Camera math (zoom to cursor, fit to view) and wheel input

pub mod coords;
mod drag;
mod keyboard;
mod mouse_down;
mod mouse_up;
mod state;
pub mod transform;

pub use keyboard::{Key, Modifiers};
pub use state::InputState;

use crate::input::coords::ScreenPoint;
use crate::profile_scope;
use crate::session::Session;
use crate::types::ItemId;

/// Which button went down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Middle,
    Secondary,
}

/// What a pointer position lands on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HitTarget {
    Canvas,
    Item(ItemId),
    /// Resize handle of the selected, unlocked item
    ResizeHandle(ItemId),
}

#[derive(Debug, Clone, PartialEq)]
pub struct PointerEvent {
    pub position: ScreenPoint,
    pub button: PointerButton,
    /// 1 for a single click, 2 for a double click
    pub click_count: u32,
    /// Target resolved by the caller; hit-tested against the scene when `None`
    pub target: Option<HitTarget>,
}

impl PointerEvent {
    pub fn primary(position: ScreenPoint) -> Self {
        Self {
            position,
            button: PointerButton::Primary,
            click_count: 1,
            target: None,
        }
    }

    pub fn with_target(mut self, target: HitTarget) -> Self {
        self.target = Some(target);
        self
    }

    pub fn with_clicks(mut self, click_count: u32) -> Self {
        self.click_count = click_count;
        self
    }

    pub fn with_button(mut self, button: PointerButton) -> Self {
        self.button = button;
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    PointerDown(PointerEvent),
    PointerMove(ScreenPoint),
    PointerUp(ScreenPoint),
    /// Wheel rotation at a screen position; positive zooms in
    Wheel { position: ScreenPoint, delta: f64 },
    KeyDown { key: Key, modifiers: Modifiers },
    KeyUp { key: Key },
}

/// Result of dispatching one event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputOutcome {
    Handled,
    Ignored,
    /// A destructive action is pending; the UI must confirm or cancel it
    NeedsConfirmation,
    /// Copy the selected item to the clipboard
    CopyRequested,
    /// Read an image from the clipboard and add it
    PasteRequested,
}

impl Session {
    /// Apply one input event.
    pub fn dispatch(&mut self, event: InputEvent) -> InputOutcome {
        profile_scope!("dispatch");

        match event {
            InputEvent::PointerDown(event) => self.handle_pointer_down(&event),
            InputEvent::PointerMove(position) => self.handle_pointer_move(position),
            InputEvent::PointerUp(position) => self.handle_pointer_up(position),
            InputEvent::Wheel { position, delta } => self.handle_wheel(position, delta),
            InputEvent::KeyDown { key, modifiers } => self.handle_key_down(key, modifiers),
            InputEvent::KeyUp { key } => self.handle_key_up(key),
        }
    }

    /// Resolve what lies under a screen position.
    ///
    /// The selected item's resize handle wins over anything else, so a
    /// handle partly covered by another item stays grabbable.
    pub fn hit_test(&self, position: ScreenPoint) -> HitTarget {
        let world = self.viewport.screen_to_world(&self.camera, position);

        if let Some(id) = &self.selected {
            if let Some(placement) = self.scene.placement(id) {
                if !placement.locked && placement.handle_contains(world) {
                    return HitTarget::ResizeHandle(id.clone());
                }
            }
        }

        match self.scene.hit_test(world) {
            Some(id) => HitTarget::Item(id.clone()),
            None => HitTarget::Canvas,
        }
    }
}
