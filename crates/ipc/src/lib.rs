//! Cardspace IPC Protocol
//!
//! Shared types for the view layer talking to the cardspace host over
//! line-delimited JSON: one command per line in, one response per line out.

use cardspace_core_layout::{
    AlignmentResult, Card, CardId, CardKind, DropOutcome, LayoutMode, Rect, SnapGuide, Zone,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Largest accepted command line, newline included.
pub const MAX_MESSAGE_SIZE: usize = 64 * 1024;

/// Commands sent from the view layer to the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum HostCommand {
    /// The workspace container was resized.
    ResizeWorkspace { width: f64, height: f64 },
    SetLayoutMode { mode: LayoutMode },
    SetGridSnap { enabled: bool },

    /// Open a new card.
    AddCard { kind: CardKind },
    CloseCard { id: CardId },
    Focus { id: CardId },
    FocusNext,
    FocusPrevious,
    Maximize { id: CardId },
    Restore { id: CardId },
    ToggleMaximize { id: CardId },
    Minimize { id: CardId },
    ResizeCard { id: CardId, width: f64, height: f64 },

    /// Pointer pressed on a card.
    PointerDown {
        id: CardId,
        x: f64,
        y: f64,
        /// True when the press landed on a button, input or link.
        #[serde(default)]
        interactive: bool,
    },
    PointerMove { x: f64, y: f64 },
    PointerUp,
    LostPointerCapture,
    CancelDrag,

    /// Stateless geometry queries against the live workspace.
    ClampToBounds { x: f64, y: f64, width: f64, height: f64 },
    SnapToGrid { x: f64, y: f64 },
    CheckCardSnapping {
        id: CardId,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },
    /// Commit a drop computed by the view itself.
    FinalizeSnap {
        id: CardId,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },

    QueryWorkspace,
    QueryCard { id: CardId },

    /// Reload configuration from file.
    Reload,
    /// Stop the host.
    Stop,
}

/// A single change the view should apply, in order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ViewUpdate {
    PreviewShown { rect: Rect },
    PreviewHidden,
    GuidesUpdated { guides: Vec<SnapGuide> },
    GuidesCleared,
    CardMoved { id: CardId, x: f64, y: f64 },
    CardResized { id: CardId, width: f64, height: f64 },
    CardSnapped { id: CardId, zone: Zone },
    CardFocused { id: CardId },
    CardClosed { id: CardId },
    CardMinimized { id: CardId },
    /// Full geometry after a command that rewrote a card outright.
    CardGeometry { id: CardId, rect: Rect },
}

/// Responses from the host to the view layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum HostResponse {
    /// Command executed; apply `updates` in order.
    Ok {
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        updates: Vec<ViewUpdate>,
    },
    /// Command failed with an error.
    Error {
        /// Error message describing what went wrong.
        message: String,
    },
    CardAdded {
        id: CardId,
        rect: Rect,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        updates: Vec<ViewUpdate>,
    },
    /// Result of `clamp_to_bounds` or `snap_to_grid`.
    Position { x: f64, y: f64 },
    Alignment { result: AlignmentResult },
    Dropped {
        outcome: DropOutcome,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        updates: Vec<ViewUpdate>,
    },
    WorkspaceState {
        width: f64,
        height: f64,
        mode: LayoutMode,
        grid_enabled: bool,
        focused: Option<CardId>,
        maximized: Option<CardId>,
        /// Every card, bottom of the stack first.
        cards: Vec<Card>,
    },
    CardState { card: Card },
}

impl HostResponse {
    /// Create an error response.
    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            message: message.into(),
        }
    }

    /// A successful response carrying view updates.
    pub fn ok(updates: Vec<ViewUpdate>) -> Self {
        Self::Ok { updates }
    }
}

/// Errors decoding or encoding a protocol line.
#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("Message of {size} bytes exceeds the {max} byte limit")]
    MessageTooLarge { size: usize, max: usize },

    #[error("Empty message")]
    Empty,

    #[error("Invalid message: {0}")]
    Json(#[from] serde_json::Error),
}

/// Parse one command line. Surrounding whitespace and the trailing newline
/// are ignored.
pub fn decode_command(line: &str) -> Result<HostCommand, ProtocolError> {
    if line.len() > MAX_MESSAGE_SIZE {
        return Err(ProtocolError::MessageTooLarge {
            size: line.len(),
            max: MAX_MESSAGE_SIZE,
        });
    }
    let line = line.trim();
    if line.is_empty() {
        return Err(ProtocolError::Empty);
    }
    Ok(serde_json::from_str(line)?)
}

/// Serialize a response as one newline-terminated line.
pub fn encode_response(response: &HostResponse) -> Result<String, ProtocolError> {
    Ok(serde_json::to_string(response)? + "\n")
}
