//! Pointer move handling - pan, drag threshold, item move and resize.
//!
//! ## Performance Notes
//!
//! Pointer move fires many times per second during a gesture. Each move
//! touches only the target item and its single scene entry; nothing is
//! rebuilt wholesale.
//!
//! Enable profiling with `cargo build --features profiling` to see timing.

use crate::constants::{MAX_ITEM_SIZE, MIN_ITEM_SIZE};
use crate::input::coords::{ScreenPoint, WorldPoint};
use crate::input::{InputOutcome, InputState};
use crate::profile_scope;
use crate::session::Session;
use tracing::debug;

impl Session {
    pub fn handle_pointer_move(&mut self, position: ScreenPoint) -> InputOutcome {
        profile_scope!("handle_pointer_move");

        match &self.input_state {
            InputState::Idle => return InputOutcome::Ignored,

            InputState::Panning {
                start,
                start_camera,
            } => {
                // Screen-space: pan is not scaled by zoom
                self.camera = start_camera.translated(position - *start);
            }

            InputState::PressingItem { start, .. } => {
                let moved = (position - *start).length();
                if moved < self.drag_threshold {
                    return InputOutcome::Handled;
                }
                self.input_state.promote_to_drag();
                self.drag_item_to(position);
            }

            InputState::DraggingItem { .. } => self.drag_item_to(position),

            InputState::ResizingItem { .. } => self.resize_item_to(position),
        }
        InputOutcome::Handled
    }

    /// Move the dragged item so it follows the pointer in world units.
    fn drag_item_to(&mut self, position: ScreenPoint) {
        let InputState::DraggingItem {
            item_id,
            start,
            start_world,
        } = &self.input_state
        else {
            return;
        };
        let id = item_id.clone();
        let (dx, dy) = self.camera.delta_to_world(position - *start);
        let target = WorldPoint::new(start_world.x + dx, start_world.y + dy);

        let Some(item) = self.active_item_mut(&id) else {
            debug!(item = %id, "Drag target disappeared, cancelling");
            self.input_state.reset();
            return;
        };
        // Lock can be toggled mid-gesture
        if item.locked {
            debug!(item = %id, "Drag target locked, cancelling");
            self.input_state.reset();
            return;
        }
        item.x = target.x;
        item.y = target.y;
        self.refresh_item(&id);
    }

    /// Resize the target item; each axis clamps independently.
    fn resize_item_to(&mut self, position: ScreenPoint) {
        let InputState::ResizingItem {
            item_id,
            start,
            start_size,
        } = &self.input_state
        else {
            return;
        };
        let id = item_id.clone();
        let (dx, dy) = self.camera.delta_to_world(position - *start);
        let w = (start_size.0 + dx).clamp(MIN_ITEM_SIZE, MAX_ITEM_SIZE);
        let h = (start_size.1 + dy).clamp(MIN_ITEM_SIZE, MAX_ITEM_SIZE);

        let Some(item) = self.active_item_mut(&id) else {
            debug!(item = %id, "Resize target disappeared, cancelling");
            self.input_state.reset();
            return;
        };
        if item.locked {
            debug!(item = %id, "Resize target locked, cancelling");
            self.input_state.reset();
            return;
        }
        item.w = w;
        item.h = h;
        self.refresh_item(&id);
    }
}
