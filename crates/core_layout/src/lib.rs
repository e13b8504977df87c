//! Cardspace Core Layout Engine
//!
//! Platform-agnostic snapping and layout engine for a desktop-style workspace
//! of draggable, overlapping cards.
//!
//! This crate implements:
//! - Docking zones: half- and quarter-workspace targets a card locks into on drop
//! - Alignment guides between the dragged card and its neighbours
//! - Grid quantization and bounds clamping so a card can never be lost off-screen
//! - Z-order, focus and maximize bookkeeping
//! - A per-drag state machine sequencing all of the above from press to release
//!
//! Everything here is synchronous and owns no I/O. The view layer feeds pointer
//! events in and receives updates through the [`SnapOverlay`] and [`CardEvents`]
//! traits.

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod align;
pub mod bounds;
pub mod card;
pub mod clamp;
pub mod config;
pub mod drag;
pub mod grid;
pub mod listeners;
pub mod mode;
pub mod workspace;
pub mod zone;
pub mod zorder;

pub use align::{align_to_cards, AlignmentResult, AlignmentRule, Orientation, SnapGuide};
pub use bounds::{BoundsProvider, ObservedBounds, WorkspaceBounds};
pub use card::{Card, CardKind};
pub use clamp::clamp_to_bounds;
pub use config::{EngineConfig, Padding};
pub use drag::{CardEvents, DragOutcome, DragPhase, DragSession, PressTarget, SnapOverlay};
pub use grid::snap_to_grid;
pub use listeners::SubscriptionId;
pub use mode::{LayoutMode, LayoutModeController};
pub use workspace::{CardChange, DropOutcome, Workspace};
pub use zone::{snap_geometry, snap_zone, Zone, ZONE_PRIORITY};

/// Unique identifier for a card within one workspace session.
pub type CardId = u64;

/// Errors that can occur during layout operations.
#[derive(Debug, Error, PartialEq)]
pub enum LayoutError {
    #[error("Card {0} not found in workspace")]
    CardNotFound(CardId),

    #[error("Card {0} has no geometry to restore")]
    NothingToRestore(CardId),
}

/// A rectangle in workspace coordinates (pixels, origin at the top-left).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    /// Create a new rectangle.
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Get the right edge x-coordinate.
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Get the bottom edge y-coordinate.
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn center_x(&self) -> f64 {
        self.x + self.width / 2.0
    }

    pub fn center_y(&self) -> f64 {
        self.y + self.height / 2.0
    }

    /// Same size, moved to a new origin.
    pub fn with_origin(&self, x: f64, y: f64) -> Self {
        Self { x, y, ..*self }
    }
}

/// Replace NaN and infinities with zero so geometry never propagates them.
pub(crate) fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_edges_and_centers() {
        let r = Rect::new(10.0, 20.0, 300.0, 200.0);
        assert_eq!(r.right(), 310.0);
        assert_eq!(r.bottom(), 220.0);
        assert_eq!(r.center_x(), 160.0);
        assert_eq!(r.center_y(), 120.0);
        assert_eq!(r.with_origin(0.0, 0.0), Rect::new(0.0, 0.0, 300.0, 200.0));
    }

    #[test]
    fn test_finite_or_zero() {
        assert_eq!(finite_or_zero(12.5), 12.5);
        assert_eq!(finite_or_zero(f64::NAN), 0.0);
        assert_eq!(finite_or_zero(f64::INFINITY), 0.0);
        assert_eq!(finite_or_zero(f64::NEG_INFINITY), 0.0);
    }

    #[test]
    fn test_layout_error_messages() {
        assert_eq!(
            LayoutError::CardNotFound(7).to_string(),
            "Card 7 not found in workspace"
        );
        assert_eq!(
            LayoutError::NothingToRestore(3).to_string(),
            "Card 3 has no geometry to restore"
        );
    }
}
