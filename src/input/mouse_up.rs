//! Pointer up handling - finalize gestures and commit them.

use crate::input::coords::ScreenPoint;
use crate::input::{InputOutcome, InputState};
use crate::session::{ChangeReason, Session};
use tracing::debug;

impl Session {
    pub fn handle_pointer_up(&mut self, position: ScreenPoint) -> InputOutcome {
        let finished = std::mem::take(&mut self.input_state);

        match finished {
            InputState::Idle => return InputOutcome::Ignored,

            InputState::Panning { .. } => {
                self.commit_camera();
                self.mark_dirty(ChangeReason::PanEnd);
            }

            // Released before the threshold: a click, nothing moved
            InputState::PressingItem { .. } => {}

            InputState::DraggingItem { item_id, .. } => {
                if self.active_item(&item_id).is_none() {
                    debug!(item = %item_id, "Drag target disappeared before release");
                    return InputOutcome::Handled;
                }
                debug!(item = %item_id, x = position.x, y = position.y, "Drag finished");
                self.push_history();
                self.mark_dirty(ChangeReason::MoveEnd);
            }

            InputState::ResizingItem { item_id, .. } => {
                if self.active_item(&item_id).is_none() {
                    debug!(item = %item_id, "Resize target disappeared before release");
                    return InputOutcome::Handled;
                }
                self.push_history();
                self.mark_dirty(ChangeReason::ResizeEnd);
            }
        }
        InputOutcome::Handled
    }
}
