//! Global layout mode and the snapping gate derived from it.

use crate::listeners::{Listener, Listeners, SubscriptionId};
use serde::{Deserialize, Serialize};

/// Layout mode of the whole workspace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum LayoutMode {
    /// Cards move freely. No zones, no alignment guides.
    Freeflow,
    /// Docking zones and alignment guides are active.
    #[default]
    Snap,
    /// One card at a time is brought forward; snapping stays active.
    Focus,
}

impl LayoutMode {
    /// Whether zone classification, alignment and workspace-edge snapping apply.
    ///
    /// Grid snapping and clamping are not gated by this.
    pub fn is_snapping_enabled(self) -> bool {
        self != LayoutMode::Freeflow
    }
}

/// Holds the active mode and broadcasts changes.
///
/// In-flight drags need no invalidation: the gate is re-read on every
/// pointer event.
#[derive(Debug, Default)]
pub struct LayoutModeController {
    mode: LayoutMode,
    listeners: Listeners<LayoutMode>,
}

impl LayoutModeController {
    pub fn new(mode: LayoutMode) -> Self {
        Self {
            mode,
            listeners: Listeners::new(),
        }
    }

    pub fn mode(&self) -> LayoutMode {
        self.mode
    }

    pub fn is_snapping_enabled(&self) -> bool {
        self.mode.is_snapping_enabled()
    }

    /// Switch modes. Returns true if the mode changed.
    pub fn set_mode(&mut self, mode: LayoutMode) -> bool {
        if mode == self.mode {
            return false;
        }
        tracing::info!("Layout mode {:?} -> {:?}", self.mode, mode);
        self.mode = mode;
        self.listeners.notify(mode);
        true
    }

    pub fn subscribe(&mut self, listener: Listener<LayoutMode>) -> SubscriptionId {
        self.listeners.add(listener)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.listeners.remove(id)
    }
}
