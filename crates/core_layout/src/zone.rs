//! Docking zones: which edge or corner a dragged card is entering.

use crate::bounds::WorkspaceBounds;
use crate::Rect;
use serde::{Deserialize, Serialize};

/// A half- or quarter-workspace docking target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Zone {
    Left,
    Right,
    Top,
    Bottom,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

/// Classification order. First zone whose edges are all entered wins.
///
/// Corners come before edges because a corner position also satisfies the
/// test for each of its two edges.
pub const ZONE_PRIORITY: [Zone; 8] = [
    Zone::TopLeft,
    Zone::TopRight,
    Zone::BottomLeft,
    Zone::BottomRight,
    Zone::Left,
    Zone::Right,
    Zone::Top,
    Zone::Bottom,
];

/// Which workspace edges a candidate rectangle is within threshold of.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct EdgeProximity {
    left: bool,
    right: bool,
    top: bool,
    bottom: bool,
}

impl EdgeProximity {
    fn measure(candidate: &Rect, bounds: WorkspaceBounds, threshold: f64) -> Self {
        Self {
            left: candidate.x < threshold,
            right: candidate.right() > bounds.width - threshold,
            top: candidate.y < threshold,
            bottom: candidate.bottom() > bounds.height - threshold,
        }
    }
}

impl Zone {
    /// The edges a candidate must be near for this zone to match.
    fn required_edges(self) -> EdgeProximity {
        let mut edges = EdgeProximity::default();
        match self {
            Zone::Left => edges.left = true,
            Zone::Right => edges.right = true,
            Zone::Top => edges.top = true,
            Zone::Bottom => edges.bottom = true,
            Zone::TopLeft => {
                edges.top = true;
                edges.left = true;
            }
            Zone::TopRight => {
                edges.top = true;
                edges.right = true;
            }
            Zone::BottomLeft => {
                edges.bottom = true;
                edges.left = true;
            }
            Zone::BottomRight => {
                edges.bottom = true;
                edges.right = true;
            }
        }
        edges
    }

    fn is_entered(self, proximity: &EdgeProximity) -> bool {
        let required = self.required_edges();
        (!required.left || proximity.left)
            && (!required.right || proximity.right)
            && (!required.top || proximity.top)
            && (!required.bottom || proximity.bottom)
    }

    /// True for the four quarter-workspace zones.
    pub fn is_corner(self) -> bool {
        matches!(
            self,
            Zone::TopLeft | Zone::TopRight | Zone::BottomLeft | Zone::BottomRight
        )
    }
}

/// Decide which zone, if any, a candidate card position is entering.
///
/// Callers gate this on the layout mode. Degenerate bounds never produce a zone.
pub fn snap_zone(candidate: Rect, bounds: WorkspaceBounds, threshold: f64) -> Option<Zone> {
    if bounds.is_degenerate() || !candidate.x.is_finite() || !candidate.y.is_finite() {
        return None;
    }

    let proximity = EdgeProximity::measure(&candidate, bounds, threshold);
    ZONE_PRIORITY
        .iter()
        .copied()
        .find(|zone| zone.is_entered(&proximity))
}

/// The exact workspace rectangle a card docked in `zone` fills.
pub fn snap_geometry(zone: Zone, bounds: WorkspaceBounds) -> Rect {
    let width = bounds.width.max(0.0);
    let height = bounds.height.max(0.0);
    let half_w = width / 2.0;
    let half_h = height / 2.0;

    match zone {
        Zone::Left => Rect::new(0.0, 0.0, half_w, height),
        Zone::Right => Rect::new(half_w, 0.0, half_w, height),
        Zone::Top => Rect::new(0.0, 0.0, width, half_h),
        Zone::Bottom => Rect::new(0.0, half_h, width, half_h),
        Zone::TopLeft => Rect::new(0.0, 0.0, half_w, half_h),
        Zone::TopRight => Rect::new(half_w, 0.0, half_w, half_h),
        Zone::BottomLeft => Rect::new(0.0, half_h, half_w, half_h),
        Zone::BottomRight => Rect::new(half_w, half_h, half_w, half_h),
    }
}
