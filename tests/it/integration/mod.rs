//! Integration tests for multi-component workflows.
//!
//! These drive the session (or the whole board) through realistic event
//! sequences and check the combined result.

mod keyboard_tests;
mod persistence_tests;
mod tab_workflow_tests;
mod undo_redo_tests;
