//! Card-to-card alignment guides.
//!
//! X and Y are resolved independently so a card can line up horizontally
//! with one neighbour and vertically with another.
//!
//! # Tie-breaking
//!
//! For one neighbour, the first rule in [`ALIGNMENT_RULES`] that falls within
//! threshold decides that axis. Across neighbours, the last neighbour that
//! matched an axis wins. The workspace edges are tested after every
//! neighbour, so an edge match overrides any card match on the same axis.

use crate::bounds::WorkspaceBounds;
use crate::Rect;
use serde::{Deserialize, Serialize};

/// Direction of a guide line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    /// A line of constant x.
    Vertical,
    /// A line of constant y.
    Horizontal,
}

/// A transient alignment line to render while dragging.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SnapGuide {
    pub orientation: Orientation,
    /// x for vertical guides, y for horizontal ones.
    pub position: f64,
    pub start: f64,
    pub end: f64,
}

impl SnapGuide {
    pub fn vertical(x: f64, start: f64, end: f64) -> Self {
        Self {
            orientation: Orientation::Vertical,
            position: x,
            start,
            end,
        }
    }

    pub fn horizontal(y: f64, start: f64, end: f64) -> Self {
        Self {
            orientation: Orientation::Horizontal,
            position: y,
            start,
            end,
        }
    }
}

/// One alignment relation between the dragged card and a neighbour, stated
/// per axis. On the X axis "start" is the left edge, on Y it is the top.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlignmentRule {
    /// Left-to-left (top-to-top).
    StartToStart,
    /// Right-to-right (bottom-to-bottom).
    EndToEnd,
    /// Dragged left edge against the neighbour's right edge, side by side.
    StartToEnd,
    /// Dragged right edge against the neighbour's left edge, side by side.
    EndToStart,
    CenterToCenter,
}

/// Rules tested against each neighbour, in priority order.
pub const ALIGNMENT_RULES: [AlignmentRule; 5] = [
    AlignmentRule::StartToStart,
    AlignmentRule::EndToEnd,
    AlignmentRule::StartToEnd,
    AlignmentRule::EndToStart,
    AlignmentRule::CenterToCenter,
];

/// Rules tested against the workspace itself.
const WORKSPACE_EDGE_RULES: [AlignmentRule; 2] =
    [AlignmentRule::StartToStart, AlignmentRule::EndToEnd];

/// A rectangle projected onto one axis.
#[derive(Debug, Clone, Copy)]
struct Span {
    start: f64,
    size: f64,
}

impl Span {
    fn horizontal(rect: &Rect) -> Self {
        Self {
            start: rect.x,
            size: rect.width,
        }
    }

    fn vertical(rect: &Rect) -> Self {
        Self {
            start: rect.y,
            size: rect.height,
        }
    }

    fn end(&self) -> f64 {
        self.start + self.size
    }

    fn center(&self) -> f64 {
        self.start + self.size / 2.0
    }
}

/// A successful rule match on one axis.
#[derive(Debug, Clone, Copy)]
struct AxisSnap {
    /// New start coordinate of the dragged card.
    start: f64,
    /// Where the guide line is drawn.
    line: f64,
}

impl AlignmentRule {
    fn try_snap(self, dragged: Span, other: Span, threshold: f64) -> Option<AxisSnap> {
        let (edge, target) = match self {
            AlignmentRule::StartToStart => (dragged.start, other.start),
            AlignmentRule::EndToEnd => (dragged.end(), other.end()),
            AlignmentRule::StartToEnd => (dragged.start, other.end()),
            AlignmentRule::EndToStart => (dragged.end(), other.start),
            AlignmentRule::CenterToCenter => (dragged.center(), other.center()),
        };

        ((edge - target).abs() < threshold).then(|| AxisSnap {
            start: dragged.start + (target - edge),
            line: target,
        })
    }
}

fn first_match(
    rules: &[AlignmentRule],
    dragged: Span,
    other: Span,
    threshold: f64,
) -> Option<AxisSnap> {
    rules
        .iter()
        .find_map(|rule| rule.try_snap(dragged, other, threshold))
}

/// Adjusted position plus the guides to render.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AlignmentResult {
    pub x: f64,
    pub y: f64,
    pub guides: Vec<SnapGuide>,
}

impl AlignmentResult {
    /// The input position, untouched, with no guides.
    pub fn unchanged(candidate: &Rect) -> Self {
        Self {
            x: candidate.x,
            y: candidate.y,
            guides: Vec::new(),
        }
    }
}

/// Align `candidate` with `others` and then with the workspace edges.
///
/// `others` must already exclude the dragged card, hidden cards and the
/// maximized card. Degenerate bounds return the candidate unchanged.
/// Duplicate guides across neighbours are kept.
pub fn align_to_cards<'a, I>(
    candidate: Rect,
    others: I,
    bounds: WorkspaceBounds,
    threshold: f64,
) -> AlignmentResult
where
    I: IntoIterator<Item = &'a Rect>,
{
    if bounds.is_degenerate() || !candidate.x.is_finite() || !candidate.y.is_finite() {
        return AlignmentResult::unchanged(&candidate);
    }

    let mut result = AlignmentResult::unchanged(&candidate);
    let dragged_x = Span::horizontal(&candidate);
    let dragged_y = Span::vertical(&candidate);

    for other in others {
        if let Some(snap) =
            first_match(&ALIGNMENT_RULES, dragged_x, Span::horizontal(other), threshold)
        {
            result.x = snap.start;
            result.guides.push(SnapGuide::vertical(
                snap.line,
                candidate.y.min(other.y),
                candidate.bottom().max(other.bottom()),
            ));
        }

        if let Some(snap) =
            first_match(&ALIGNMENT_RULES, dragged_y, Span::vertical(other), threshold)
        {
            result.y = snap.start;
            result.guides.push(SnapGuide::horizontal(
                snap.line,
                candidate.x.min(other.x),
                candidate.right().max(other.right()),
            ));
        }
    }

    let workspace = bounds.as_rect();
    if let Some(snap) = first_match(
        &WORKSPACE_EDGE_RULES,
        dragged_x,
        Span::horizontal(&workspace),
        threshold,
    ) {
        result.x = snap.start;
        result
            .guides
            .push(SnapGuide::vertical(snap.line, 0.0, bounds.height));
    }

    if let Some(snap) = first_match(
        &WORKSPACE_EDGE_RULES,
        dragged_y,
        Span::vertical(&workspace),
        threshold,
    ) {
        result.y = snap.start;
        result
            .guides
            .push(SnapGuide::horizontal(snap.line, 0.0, bounds.width));
    }

    result
}
