//! Workspace container size tracking.

use crate::listeners::{Listener, Listeners, SubscriptionId};
use crate::Rect;
use serde::{Deserialize, Serialize};

/// Live pixel size of the workspace container.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct WorkspaceBounds {
    pub width: f64,
    pub height: f64,
}

impl WorkspaceBounds {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// True while the container has not been laid out (or reports nonsense).
    /// Zone and alignment checks short-circuit on degenerate bounds.
    pub fn is_degenerate(&self) -> bool {
        !(self.width.is_finite()
            && self.height.is_finite()
            && self.width > 0.0
            && self.height > 0.0)
    }

    /// The whole workspace as a rectangle at the origin.
    pub fn as_rect(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.height)
    }
}

/// Source of the current workspace size.
///
/// Decouples the geometry core from whatever observes the real container
/// (a DOM resize observer, a window event loop, a test).
pub trait BoundsProvider {
    /// Most recently observed bounds. May be stale, never fails.
    fn current_bounds(&self) -> WorkspaceBounds;

    /// Be told about every subsequent size change.
    fn subscribe(&mut self, listener: Listener<WorkspaceBounds>) -> SubscriptionId;

    fn unsubscribe(&mut self, id: SubscriptionId) -> bool;
}

/// [`BoundsProvider`] fed by explicit resize observations.
#[derive(Debug, Default)]
pub struct ObservedBounds {
    current: WorkspaceBounds,
    listeners: Listeners<WorkspaceBounds>,
}

impl ObservedBounds {
    pub fn new(bounds: WorkspaceBounds) -> Self {
        Self {
            current: bounds,
            listeners: Listeners::new(),
        }
    }

    /// Record a container resize.
    ///
    /// Non-finite sizes are dropped and the previous value stays current.
    /// Returns true if the bounds changed and listeners were notified.
    pub fn observe_resize(&mut self, width: f64, height: f64) -> bool {
        if !width.is_finite() || !height.is_finite() {
            tracing::warn!("Ignoring non-finite workspace size {}x{}", width, height);
            return false;
        }

        let bounds = WorkspaceBounds::new(width.max(0.0), height.max(0.0));
        if bounds == self.current {
            return false;
        }

        tracing::debug!("Workspace bounds {}x{}", bounds.width, bounds.height);
        self.current = bounds;
        self.listeners.notify(bounds);
        true
    }
}

impl BoundsProvider for ObservedBounds {
    fn current_bounds(&self) -> WorkspaceBounds {
        self.current
    }

    fn subscribe(&mut self, listener: Listener<WorkspaceBounds>) -> SubscriptionId {
        self.listeners.add(listener)
    }

    fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.listeners.remove(id)
    }
}
