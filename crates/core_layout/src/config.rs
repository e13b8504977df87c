//! Engine tunables.

use serde::{Deserialize, Serialize};

/// Distance from a workspace edge (pixels) that counts as entering a docking zone.
pub const SNAP_THRESHOLD: f64 = 20.0;

/// Distance (pixels) within which card edges and centers align.
pub const CARD_SNAP_THRESHOLD: f64 = 8.0;

/// Grid cell size in pixels.
pub const SNAP_GRID: f64 = 20.0;

/// Pointer travel (pixels) separating a click from a drag.
pub const DRAG_THRESHOLD: f64 = 5.0;

/// Height of the card title bar that must stay reachable.
pub const HEADER_HEIGHT: f64 = 40.0;

/// How far off-screen a card may be dragged.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Padding {
    pub top: f64,
    pub bottom: f64,
    pub left: f64,
    pub right: f64,
    /// Pixels of the card that always remain inside the workspace horizontally.
    pub min_visible: f64,
}

impl Default for Padding {
    fn default() -> Self {
        Self {
            top: 0.0,
            bottom: 0.0,
            left: 0.0,
            right: 0.0,
            min_visible: 100.0,
        }
    }
}

/// Static configuration for a [`Workspace`](crate::Workspace).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    pub snap_threshold: f64,
    pub card_snap_threshold: f64,
    pub grid_size: f64,
    /// User preference, independent of the layout mode.
    pub grid_enabled: bool,
    pub drag_threshold: f64,
    pub header_height: f64,
    pub padding: Padding,
    /// Offset between a new card and the top-most existing one.
    pub cascade_offset: f64,
    pub min_card_width: f64,
    pub min_card_height: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            snap_threshold: SNAP_THRESHOLD,
            card_snap_threshold: CARD_SNAP_THRESHOLD,
            grid_size: SNAP_GRID,
            grid_enabled: false,
            drag_threshold: DRAG_THRESHOLD,
            header_height: HEADER_HEIGHT,
            padding: Padding::default(),
            cascade_offset: 30.0,
            min_card_width: 200.0,
            min_card_height: 120.0,
        }
    }
}
