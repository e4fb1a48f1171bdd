//! Input state machine - unified state for pointer gestures.
//!
//! A single enum means exactly one gesture can be in flight. Every
//! `try_start_*` method refuses to leave a non-idle state, so a second
//! gesture can never begin on top of the first.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Panning          (press with pan modifier held, or middle button)
//! Idle -> PressingItem     (press on an unlocked item)
//! PressingItem -> DraggingItem  (pointer travelled past the drag threshold)
//! Idle -> ResizingItem     (press on the resize handle of the selected item)
//!
//! Any -> Idle              (pointer up, or the target item disappeared)
//! ```

use crate::input::coords::{ScreenPoint, WorldPoint};
use crate::types::{Camera, ItemId};

/// Current pointer gesture.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum InputState {
    /// No gesture in progress
    #[default]
    Idle,

    /// Camera pan, moves 1:1 with the pointer in screen pixels
    Panning {
        /// Pointer position when the pan started
        start: ScreenPoint,
        /// Camera at the start of the pan
        start_camera: Camera,
    },

    /// Pointer is down on an item but has not yet moved past the threshold
    PressingItem {
        item_id: ItemId,
        /// Pointer position at press
        start: ScreenPoint,
        /// Item center at press
        start_world: WorldPoint,
    },

    /// Item follows the pointer, scaled into world units
    DraggingItem {
        item_id: ItemId,
        start: ScreenPoint,
        start_world: WorldPoint,
    },

    /// Item's bottom-right corner follows the pointer
    ResizingItem {
        item_id: ItemId,
        start: ScreenPoint,
        /// Item size at the start of the resize
        start_size: (f64, f64),
    },
}

impl InputState {
    /// Returns true if the state is Idle
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    pub fn is_panning(&self) -> bool {
        matches!(self, Self::Panning { .. })
    }

    /// Returns true while a press is waiting to become a drag
    pub fn is_pressing(&self) -> bool {
        matches!(self, Self::PressingItem { .. })
    }

    pub fn is_dragging_item(&self) -> bool {
        matches!(self, Self::DraggingItem { .. })
    }

    pub fn is_resizing(&self) -> bool {
        matches!(self, Self::ResizingItem { .. })
    }

    /// The pointer is captured for the whole lifetime of any gesture.
    pub fn pointer_captured(&self) -> bool {
        !self.is_idle()
    }

    /// Item targeted by the current gesture, if any
    pub fn target_item(&self) -> Option<&ItemId> {
        match self {
            Self::PressingItem { item_id, .. }
            | Self::DraggingItem { item_id, .. }
            | Self::ResizingItem { item_id, .. } => Some(item_id),
            _ => None,
        }
    }

    /// Get the item ID being dragged, if any
    pub fn dragged_item_id(&self) -> Option<&ItemId> {
        match self {
            Self::DraggingItem { item_id, .. } => Some(item_id),
            _ => None,
        }
    }

    /// Get the item ID being resized, if any
    pub fn resized_item_id(&self) -> Option<&ItemId> {
        match self {
            Self::ResizingItem { item_id, .. } => Some(item_id),
            _ => None,
        }
    }

    /// Reset to Idle state
    pub fn reset(&mut self) {
        *self = Self::Idle;
    }

    fn try_enter(&mut self, next: InputState) -> bool {
        if !self.is_idle() {
            return false;
        }
        *self = next;
        true
    }

    /// Start panning. Refused unless idle.
    pub fn try_start_panning(&mut self, start: ScreenPoint, start_camera: Camera) -> bool {
        self.try_enter(Self::Panning {
            start,
            start_camera,
        })
    }

    /// Record a press on an item. Refused unless idle.
    pub fn try_start_pressing(
        &mut self,
        item_id: ItemId,
        start: ScreenPoint,
        start_world: WorldPoint,
    ) -> bool {
        self.try_enter(Self::PressingItem {
            item_id,
            start,
            start_world,
        })
    }

    /// Start resizing an item. Refused unless idle.
    pub fn try_start_resizing(
        &mut self,
        item_id: ItemId,
        start: ScreenPoint,
        start_size: (f64, f64),
    ) -> bool {
        self.try_enter(Self::ResizingItem {
            item_id,
            start,
            start_size,
        })
    }

    /// Turn a pending press into a drag. No-op in any other state.
    pub fn promote_to_drag(&mut self) -> bool {
        let next = match self {
            Self::PressingItem {
                item_id,
                start,
                start_world,
            } => Self::DraggingItem {
                item_id: item_id.clone(),
                start: *start,
                start_world: *start_world,
            },
            _ => return false,
        };
        *self = next;
        true
    }
}
