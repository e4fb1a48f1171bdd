//! Image resources referenced by items.
//!
//! The core never decodes pixels. It only needs to know whether a file
//! exists, how large it is on disk, and (when adding an item) its natural
//! dimensions so the tile can be sized sensibly.

use crate::constants::{DEFAULT_ITEM_SIZE, IMAGE_EXTENSIONS, IMPORT_FIT_BOX, IMPORT_MIN_SIZE};
use std::path::Path;
use tracing::debug;

/// Read-only access to the files behind items.
///
/// Every method is infallible: a missing or unreadable file is reported as
/// absent / zero bytes / unknown size.
pub trait ResourceProbe: Send + Sync {
    fn exists(&self, path: &Path) -> bool;

    fn byte_size(&self, path: &Path) -> u64;

    /// Pixel dimensions, when the file can be read as an image.
    fn natural_size(&self, path: &Path) -> Option<(u32, u32)>;
}

/// [`ResourceProbe`] backed by the local filesystem.
#[derive(Clone, Copy, Debug, Default)]
pub struct FsResources;

impl ResourceProbe for FsResources {
    fn exists(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn byte_size(&self, path: &Path) -> u64 {
        std::fs::metadata(path).map(|m| m.len()).unwrap_or(0)
    }

    fn natural_size(&self, path: &Path) -> Option<(u32, u32)> {
        match image::image_dimensions(path) {
            Ok(dims) => Some(dims),
            Err(e) => {
                debug!(path = %path.display(), error = %e, "Could not read image dimensions");
                None
            }
        }
    }
}

/// Size of a new tile for an image with the given natural dimensions.
///
/// Starts from the default size; when the dimensions are known the image is
/// shrunk (never enlarged) to fit the import box, keeping its aspect ratio,
/// then floored at the minimum tile size.
pub fn import_size(natural: Option<(u32, u32)>) -> (f64, f64) {
    let Some((w, h)) = natural.filter(|(w, h)| *w > 0 && *h > 0) else {
        return DEFAULT_ITEM_SIZE;
    };
    let (w, h) = (w as f64, h as f64);
    let (max_w, max_h) = IMPORT_FIT_BOX;

    let ratio = (max_w / w).min(max_h / h).min(1.0);
    (
        (w * ratio).round().max(IMPORT_MIN_SIZE.0),
        (h * ratio).round().max(IMPORT_MIN_SIZE.1),
    )
}

/// Whether a dropped path looks like an image we accept.
pub fn is_image_path(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| IMAGE_EXTENSIONS.iter().any(|e| e.eq_ignore_ascii_case(ext)))
        .unwrap_or(false)
}

/// Whether a dropped path is a saved board.
pub fn is_board_path(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("json"))
        .unwrap_or(false)
}
