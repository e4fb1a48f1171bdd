//! Stacking order within a tab.
//!
//! `z` values need not be unique. Draw order is a stable sort by `z`, so ties
//! fall back to insertion order.

use crate::types::{Item, ItemId};

/// Z value strictly above every item in `items` (1 for an empty tab).
pub fn next_z(items: &[Item]) -> i64 {
    items.iter().map(|item| item.z).max().unwrap_or(0) + 1
}

/// Raise `id` above all of its siblings. Returns the new z, or `None` if the
/// item does not exist.
pub fn bring_to_front(items: &mut [Item], id: &ItemId) -> Option<i64> {
    let z = next_z(items);
    let item = items.iter_mut().find(|item| &item.id == id)?;
    item.z = z;
    Some(z)
}

/// Items in back-to-front draw order.
pub fn draw_order(items: &[Item]) -> Vec<&Item> {
    let mut ordered: Vec<&Item> = items.iter().collect();
    ordered.sort_by_key(|item| item.z);
    ordered
}
