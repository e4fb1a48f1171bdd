//! Scene index for the active tab.
//!
//! Keeps an id-indexed map of each item's current placement, so any component
//! can find where an item sits (in world or screen space) in O(1), plus an
//! R-tree over the same bounds for O(log n) hit testing.
//!
//! The index is derived state: the session rebuilds it on structural changes
//! (tab switch, add, delete, undo) and updates single entries while a gesture
//! moves or resizes an item.

use crate::constants::{RESIZE_HANDLE_INSET, RESIZE_HANDLE_SIZE};
use crate::input::coords::{ScreenPoint, Viewport, WorldPoint};
use crate::types::{Camera, Item, ItemId, Tab};
use rstar::{AABB, RTree, RTreeObject};
use std::collections::HashMap;

/// Where an item currently sits and how it stacks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
    pub z: i64,
    /// Position in the tab's item list, used to break z ties
    pub order: usize,
    pub locked: bool,
}

impl Placement {
    fn from_item(item: &Item, order: usize) -> Self {
        let (min_x, min_y, max_x, max_y) = item.bounds();
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
            z: item.z,
            order,
            locked: item.locked,
        }
    }

    #[inline]
    pub fn contains(&self, p: WorldPoint) -> bool {
        p.x >= self.min_x && p.x <= self.max_x && p.y >= self.min_y && p.y <= self.max_y
    }

    /// Whether `p` falls on the bottom-right resize handle.
    pub fn handle_contains(&self, p: WorldPoint) -> bool {
        let right = self.max_x - RESIZE_HANDLE_INSET;
        let bottom = self.max_y - RESIZE_HANDLE_INSET;
        p.x >= right - RESIZE_HANDLE_SIZE
            && p.x <= right
            && p.y >= bottom - RESIZE_HANDLE_SIZE
            && p.y <= bottom
    }
}

/// An item's rectangle in window coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenRect {
    pub origin: ScreenPoint,
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone)]
struct SpatialEntry {
    item_id: ItemId,
    min: [f64; 2],
    max: [f64; 2],
}

impl SpatialEntry {
    fn new(item_id: ItemId, placement: &Placement) -> Self {
        Self {
            item_id,
            min: [placement.min_x, placement.min_y],
            max: [placement.max_x, placement.max_y],
        }
    }
}

impl RTreeObject for SpatialEntry {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_corners(self.min, self.max)
    }
}

impl PartialEq for SpatialEntry {
    fn eq(&self, other: &Self) -> bool {
        self.item_id == other.item_id
    }
}

/// Placement map + R-tree for one tab.
#[derive(Default)]
pub struct Scene {
    tree: RTree<SpatialEntry>,
    placements: HashMap<ItemId, Placement>,
    /// Order handed to the next unknown item; never reused after removals
    next_order: usize,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_tab(tab: &Tab) -> Self {
        let mut scene = Self::new();
        scene.rebuild(tab);
        scene
    }

    /// Replace the whole index with the contents of `tab`.
    pub fn rebuild(&mut self, tab: &Tab) {
        self.placements = tab
            .items
            .iter()
            .enumerate()
            .map(|(order, item)| (item.id.clone(), Placement::from_item(item, order)))
            .collect();
        self.next_order = tab.items.len();

        let entries: Vec<SpatialEntry> = self
            .placements
            .iter()
            .map(|(id, placement)| SpatialEntry::new(id.clone(), placement))
            .collect();
        self.tree = RTree::bulk_load(entries);
    }

    /// Refresh one item's entry after it moved, resized or changed z.
    ///
    /// Keeps the item's tie-break order; unknown items are appended last.
    pub fn update(&mut self, item: &Item) {
        let order = match self.placements.get(&item.id) {
            Some(old) => {
                self.tree.remove(&SpatialEntry::new(item.id.clone(), old));
                old.order
            }
            None => {
                let order = self.next_order;
                self.next_order += 1;
                order
            }
        };

        let placement = Placement::from_item(item, order);
        self.tree.insert(SpatialEntry::new(item.id.clone(), &placement));
        self.placements.insert(item.id.clone(), placement);
    }

    pub fn remove(&mut self, id: &ItemId) -> bool {
        match self.placements.remove(id) {
            Some(placement) => {
                self.tree.remove(&SpatialEntry::new(id.clone(), &placement));
                true
            }
            None => false,
        }
    }

    pub fn placement(&self, id: &ItemId) -> Option<&Placement> {
        self.placements.get(id)
    }

    /// Current on-screen rectangle of an item.
    pub fn screen_rect(&self, id: &ItemId, camera: &Camera, viewport: &Viewport) -> Option<ScreenRect> {
        let placement = self.placements.get(id)?;
        let origin =
            viewport.world_to_screen(camera, WorldPoint::new(placement.min_x, placement.min_y));
        Some(ScreenRect {
            origin,
            width: (placement.max_x - placement.min_x) * camera.scale,
            height: (placement.max_y - placement.min_y) * camera.scale,
        })
    }

    /// Topmost item under `p`: highest z, later insertion wins ties.
    pub fn hit_test(&self, p: WorldPoint) -> Option<&ItemId> {
        let envelope = AABB::from_point([p.x, p.y]);
        self.tree
            .locate_in_envelope_intersecting(&envelope)
            .filter_map(|entry| {
                self.placements
                    .get(&entry.item_id)
                    .filter(|placement| placement.contains(p))
                    .map(|placement| (&entry.item_id, placement))
            })
            .max_by_key(|(_, placement)| (placement.z, placement.order))
            .map(|(id, _)| id)
    }

    /// All items intersecting a world-space rectangle.
    pub fn query_rect(&self, min: WorldPoint, max: WorldPoint) -> Vec<&ItemId> {
        let envelope = AABB::from_corners([min.x, min.y], [max.x, max.y]);
        self.tree
            .locate_in_envelope_intersecting(&envelope)
            .map(|entry| &entry.item_id)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.placements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }

    pub fn clear(&mut self) {
        self.tree = RTree::new();
        self.placements.clear();
        self.next_order = 0;
    }
}
