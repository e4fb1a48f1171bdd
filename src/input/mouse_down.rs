//! Pointer down handling - selection, pan/press/resize initiation, fit on
//! double click.
//!
//! ## Performance Notes
//!
//! Pointer down is a hot path during interaction. Hit testing goes through
//! the scene's R-tree, so it stays O(log n) in the number of items.
//!
//! Enable profiling with `cargo build --features profiling` to see timing.

use crate::input::coords::ScreenPoint;
use crate::input::{HitTarget, InputOutcome, PointerButton, PointerEvent};
use crate::profile_scope;
use crate::session::Session;
use crate::types::ItemId;
use tracing::debug;

impl Session {
    pub fn handle_pointer_down(&mut self, event: &PointerEvent) -> InputOutcome {
        profile_scope!("handle_pointer_down");

        // One gesture at a time; a second button while captured is ignored
        if !self.input_state.is_idle() {
            debug!(state = ?self.input_state, "Pointer down ignored during gesture");
            return InputOutcome::Ignored;
        }

        let wants_pan = match event.button {
            PointerButton::Middle => true,
            PointerButton::Primary => self.pan_modifier,
            PointerButton::Secondary => false,
        };
        if wants_pan {
            self.input_state.try_start_panning(event.position, self.camera);
            return InputOutcome::Handled;
        }

        if event.button != PointerButton::Primary {
            return InputOutcome::Ignored;
        }

        let target = match &event.target {
            Some(target) => target.clone(),
            None => {
                profile_scope!("hit_test_items");
                self.hit_test(event.position)
            }
        };

        match target {
            HitTarget::Canvas => {
                self.deselect();
            }
            HitTarget::ResizeHandle(id) => {
                if !self.start_resize(&id, event.position) {
                    self.press_item(id, event);
                }
            }
            HitTarget::Item(id) => self.press_item(id, event),
        }
        InputOutcome::Handled
    }

    /// Start resizing the selected, unlocked item.
    fn start_resize(&mut self, id: &ItemId, position: ScreenPoint) -> bool {
        if self.selected.as_ref() != Some(id) {
            return false;
        }
        let Some(item) = self.active_item(id) else {
            return false;
        };
        if item.locked {
            return false;
        }
        let start_size = (item.w, item.h);
        self.input_state
            .try_start_resizing(id.clone(), position, start_size)
    }

    /// Select and raise an item, then either fit it (double click) or wait
    /// to see whether the press turns into a drag.
    fn press_item(&mut self, id: ItemId, event: &PointerEvent) {
        let Some(item) = self.active_item(&id) else {
            debug!(item = %id, "Pointer down on missing item");
            return;
        };
        let locked = item.locked;
        let start_world = item.center();

        self.select(id.clone());
        self.bring_to_front(&id);

        if event.click_count >= 2 {
            self.fit_item(&id);
            return;
        }

        if locked {
            return;
        }

        self.input_state
            .try_start_pressing(id, event.position, start_world);
    }
}
