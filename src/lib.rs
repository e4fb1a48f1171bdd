//! Pinboard - an infinite-canvas image board.
//!
//! The crate is the interactive engine behind the board window: the camera
//! and coordinate frames, the pointer gesture state machine, the
//! document/tab/item model, z-ordering, and debounced autosave. Rendering,
//! dialogs and clipboard encoding live in the UI layer, which talks to the
//! engine through [`board::Board`] and [`session::Session`].

pub mod autosave;
pub mod board;
pub mod constants;
pub mod document;
pub mod error;
pub mod history;
pub mod input;
pub mod logging;
pub mod perf;
pub mod persistence;
pub mod resources;
pub mod scene;
pub mod session;
pub mod settings;
pub mod status;
pub mod types;
pub mod zorder;

pub use board::Board;
pub use error::{BoardError, BoardResult};
pub use session::Session;
pub use types::{Camera, Document, Item, ItemId, Tab, TabId};
