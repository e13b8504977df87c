//! Cards: the draggable panels living in the workspace.

use crate::zone::Zone;
use crate::{CardId, Rect};
use serde::{Deserialize, Serialize};

/// What a card shows. Only the default size depends on it here.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CardKind {
    Chat,
    Settings,
    Studio,
    Custom { width: f64, height: f64 },
}

impl CardKind {
    /// Size a new card of this kind opens with, as (width, height).
    pub fn default_size(&self) -> (f64, f64) {
        match *self {
            CardKind::Chat => (420.0, 560.0),
            CardKind::Settings => (480.0, 520.0),
            CardKind::Studio => (720.0, 540.0),
            CardKind::Custom { width, height } => (width, height),
        }
    }
}

/// A window-like panel in the workspace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    pub kind: CardKind,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Paint order. Unique, and only ever grows within a session.
    pub z_index: u32,
    pub focused: bool,
    pub maximized: bool,
    /// Hidden cards take no part in alignment or focus cycling.
    pub minimized: bool,
    pub snapped_to: Option<Zone>,
    /// Geometry to return to when un-snapped or restored.
    pub restore_geometry: Option<Rect>,
}

impl Card {
    pub fn new(id: CardId, kind: CardKind, rect: Rect, z_index: u32) -> Self {
        Self {
            id,
            kind,
            x: rect.x,
            y: rect.y,
            width: rect.width,
            height: rect.height,
            z_index,
            focused: false,
            maximized: false,
            minimized: false,
            snapped_to: None,
            restore_geometry: None,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    pub fn set_rect(&mut self, rect: Rect) {
        self.x = rect.x;
        self.y = rect.y;
        self.width = rect.width;
        self.height = rect.height;
    }

    pub fn is_visible(&self) -> bool {
        !self.minimized
    }

    /// Whether other cards may align against this one.
    pub fn is_alignment_target(&self) -> bool {
        self.is_visible() && !self.maximized
    }

    /// Drop any dock/maximize state, keeping the current geometry.
    pub fn detach(&mut self) {
        self.snapped_to = None;
        self.maximized = false;
        self.restore_geometry = None;
    }
}
