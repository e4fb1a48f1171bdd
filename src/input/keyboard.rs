//! Keyboard commands.
//!
//! Commands act on the selection and ignore the pointer state, except that
//! undo/redo wait until no gesture is in flight.

use crate::input::InputOutcome;
use crate::session::Session;

/// Keys the canvas reacts to. Anything else arrives as `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Space,
    Escape,
    Delete,
    Backspace,
    Char(char),
    Other,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    /// Ctrl, or Cmd on macOS
    pub command: bool,
    pub shift: bool,
    pub alt: bool,
}

impl Modifiers {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn command() -> Self {
        Self {
            command: true,
            ..Self::default()
        }
    }
}

impl Session {
    pub fn handle_key_down(&mut self, key: Key, modifiers: Modifiers) -> InputOutcome {
        if modifiers.command {
            return self.handle_command_key(key, modifiers);
        }

        match key {
            Key::Space => {
                self.pan_modifier = true;
                InputOutcome::Handled
            }
            Key::Escape => {
                if self.pending.is_some() {
                    self.cancel_pending();
                    InputOutcome::Handled
                } else {
                    InputOutcome::Ignored
                }
            }
            Key::Delete | Key::Backspace => match self.request_delete_selected() {
                Some(_) => InputOutcome::NeedsConfirmation,
                None => InputOutcome::Ignored,
            },
            Key::Char(c) => match c.to_ascii_lowercase() {
                'f' => self.bring_selected_to_front().into(),
                'l' => self.toggle_lock().into(),
                'h' => self.toggle_flip_h().into(),
                'v' => self.toggle_flip_v().into(),
                _ => InputOutcome::Ignored,
            },
            Key::Other => InputOutcome::Ignored,
        }
    }

    fn handle_command_key(&mut self, key: Key, modifiers: Modifiers) -> InputOutcome {
        let Key::Char(c) = key else {
            return InputOutcome::Ignored;
        };

        match c.to_ascii_lowercase() {
            'c' if self.selected.is_some() => InputOutcome::CopyRequested,
            'v' => InputOutcome::PasteRequested,
            'z' | 'y' if !self.input_state.is_idle() => InputOutcome::Ignored,
            'z' if modifiers.shift => self.redo().into(),
            'z' => self.undo().into(),
            'y' => self.redo().into(),
            _ => InputOutcome::Ignored,
        }
    }

    pub fn handle_key_up(&mut self, key: Key) -> InputOutcome {
        match key {
            Key::Space => {
                self.pan_modifier = false;
                InputOutcome::Handled
            }
            _ => InputOutcome::Ignored,
        }
    }
}

impl From<bool> for InputOutcome {
    fn from(applied: bool) -> Self {
        if applied {
            InputOutcome::Handled
        } else {
            InputOutcome::Ignored
        }
    }
}
