//! Application-wide constants.
//!
//! Centralizes magic numbers for camera bounds, gesture thresholds, item
//! sizing and autosave timing.

// ============================================================================
// Camera
// ============================================================================

/// Minimum camera scale
pub const MIN_SCALE: f64 = 0.15;

/// Maximum camera scale
pub const MAX_SCALE: f64 = 6.0;

/// Camera given to new tabs and to tabs loaded without one
pub const DEFAULT_CAMERA: (f64, f64, f64) = (200.0, 120.0, 1.0);

/// Wheel sensitivity: zoom factor is `exp(wheel_delta * ZOOM_SENSITIVITY)`
pub const ZOOM_SENSITIVITY: f64 = 0.0015;

/// Wheel factors closer to 1.0 than this are ignored
pub const ZOOM_EPSILON: f64 = 1e-6;

// ============================================================================
// Fit-to-view chrome
// ============================================================================

/// Margin kept around an item fitted into the viewport
pub const FIT_MARGIN: f64 = 30.0;

/// Height of the top bar the fitted item must stay clear of
pub const FIT_TOP_PAD: f64 = 110.0;

/// Smallest usable viewport extent for fitting
pub const FIT_MIN_VIEW: f64 = 200.0;

// ============================================================================
// Gestures
// ============================================================================

/// Screen distance a press must travel before it becomes a drag
pub const DRAG_THRESHOLD_PX: f64 = 7.0;

/// Minimum item edge during resize (world units)
pub const MIN_ITEM_SIZE: f64 = 80.0;

/// Maximum item edge during resize (world units)
pub const MAX_ITEM_SIZE: f64 = 4000.0;

/// Edge of the square resize handle (world units)
pub const RESIZE_HANDLE_SIZE: f64 = 14.0;

/// Inset of the resize handle from the item's bottom-right corner
pub const RESIZE_HANDLE_INSET: f64 = 6.0;

// ============================================================================
// Item import
// ============================================================================

/// Size given to a new item before its natural dimensions are known
pub const DEFAULT_ITEM_SIZE: (f64, f64) = (420.0, 300.0);

/// Box new items are shrunk into (never enlarged)
pub const IMPORT_FIT_BOX: (f64, f64) = (520.0, 420.0);

/// Floor applied after shrinking
pub const IMPORT_MIN_SIZE: (f64, f64) = (140.0, 120.0);

/// File extensions accepted as image drops
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "webp", "bmp", "gif"];

// ============================================================================
// Tabs & UI
// ============================================================================

/// Maximum tab name length in characters
pub const MAX_TAB_NAME_CHARS: usize = 40;

/// Name used when a tab is renamed to blank
pub const DEFAULT_TAB_NAME: &str = "Tab";

/// Suffix appended to duplicated tab names
pub const COPY_SUFFIX: &str = " (copy)";

/// UI scale range
pub const MIN_UI_SCALE: f64 = 0.6;
pub const MAX_UI_SCALE: f64 = 1.2;

/// Format tag written into saved documents
pub const FORMAT_VERSION: &str = "pinboard-1";

// ============================================================================
// Timing & persistence
// ============================================================================

/// Debounce delay for general edits in milliseconds
pub const SAVE_DEBOUNCE_MS: u64 = 500;

/// Debounce delay used when autosave is switched on
pub const AUTOSAVE_KICK_MS: u64 = 50;

/// Maximum undo history states to keep
pub const MAX_HISTORY_STATES: usize = 50;

/// Default board file name
pub const DEFAULT_FILE_NAME: &str = "board.json";

/// Application directory name under the platform config/data dirs
pub const APP_DIR_NAME: &str = "pinboard";
