//! Host state: the live workspace, the active drag and command dispatch.

use crate::bridge::UpdateRecorder;
use crate::config::Config;
use cardspace_core_layout::{
    CardChange, CardId, DragSession, DropOutcome, LayoutError, ObservedBounds, PressTarget, Rect,
    Workspace,
};
use cardspace_ipc::{HostCommand, HostResponse, ViewUpdate};
use tracing::{debug, info, warn};

/// Everything the host owns between commands.
#[derive(Debug)]
pub struct HostState {
    workspace: Workspace,
    bounds: ObservedBounds,
    drag: DragSession,
    config: Config,
}

fn geometry_update(change: CardChange) -> ViewUpdate {
    ViewUpdate::CardGeometry {
        id: change.id,
        rect: change.rect,
    }
}

/// Displaced cards first, then the maximized card and its focus.
fn maximize_updates(id: CardId, rect: Rect, displaced: Vec<CardChange>) -> Vec<ViewUpdate> {
    let mut updates: Vec<ViewUpdate> = displaced.into_iter().map(geometry_update).collect();
    updates.push(ViewUpdate::CardGeometry { id, rect });
    updates.push(ViewUpdate::CardFocused { id });
    updates
}

impl HostState {
    pub fn new(config: Config) -> Self {
        Self {
            workspace: Workspace::new(config.to_engine_config(), config.layout.mode),
            bounds: ObservedBounds::default(),
            drag: DragSession::new(),
            config,
        }
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Apply a (validated) configuration to the live workspace.
    ///
    /// Cards re-fit to the new settings. The layout mode from the file
    /// replaces whatever mode the view selected.
    pub fn apply_config(&mut self, config: Config) -> Vec<ViewUpdate> {
        let changes = self.workspace.set_config(config.to_engine_config());
        self.workspace.set_layout_mode(config.layout.mode);
        self.config = config;
        changes.into_iter().map(geometry_update).collect()
    }

    /// Execute one command and build its response.
    pub fn handle_command(&mut self, cmd: HostCommand) -> HostResponse {
        if matches!(cmd, HostCommand::Reload) {
            return self.reload();
        }

        match self.dispatch(cmd) {
            Ok(response) => response,
            Err(e) => {
                warn!("Command failed: {}", e);
                HostResponse::error(e.to_string())
            }
        }
    }

    fn reload(&mut self) -> HostResponse {
        match Config::load() {
            Ok(mut config) => {
                for w in config.validate() {
                    warn!("Config: {} - {}", w.field, w.message);
                }
                let updates = self.apply_config(config);
                info!("Configuration reloaded");
                HostResponse::ok(updates)
            }
            Err(e) => {
                warn!("Failed to reload configuration: {:#}", e);
                HostResponse::error(format!("Failed to reload config: {:#}", e))
            }
        }
    }

    fn dispatch(&mut self, cmd: HostCommand) -> Result<HostResponse, LayoutError> {
        let ws = &mut self.workspace;
        let response = match cmd {
            HostCommand::ResizeWorkspace { width, height } => {
                let mut updates = Vec::new();
                if self.bounds.observe_resize(width, height) {
                    updates = ws
                        .sync_bounds(&self.bounds)
                        .into_iter()
                        .map(geometry_update)
                        .collect();
                }
                HostResponse::ok(updates)
            }
            HostCommand::SetLayoutMode { mode } => {
                ws.set_layout_mode(mode);
                HostResponse::ok(Vec::new())
            }
            HostCommand::SetGridSnap { enabled } => {
                ws.set_grid_enabled(enabled);
                HostResponse::ok(Vec::new())
            }

            HostCommand::AddCard { kind } => {
                let id = ws.add_card(kind);
                let rect = ws.card(id).ok_or(LayoutError::CardNotFound(id))?.rect();
                HostResponse::CardAdded {
                    id,
                    rect,
                    updates: vec![ViewUpdate::CardFocused { id }],
                }
            }
            HostCommand::CloseCard { id } => {
                let mut updates = vec![ViewUpdate::CardClosed { id }];
                if let Some(next) = ws.close_card(id)? {
                    updates.push(ViewUpdate::CardFocused { id: next });
                }
                HostResponse::ok(updates)
            }
            HostCommand::Focus { id } => {
                ws.focus(id)?;
                HostResponse::ok(vec![ViewUpdate::CardFocused { id }])
            }
            HostCommand::FocusNext => HostResponse::ok(
                ws.focus_next()
                    .map(|id| ViewUpdate::CardFocused { id })
                    .into_iter()
                    .collect(),
            ),
            HostCommand::FocusPrevious => HostResponse::ok(
                ws.focus_previous()
                    .map(|id| ViewUpdate::CardFocused { id })
                    .into_iter()
                    .collect(),
            ),
            HostCommand::Maximize { id } => {
                let (rect, displaced) = ws.maximize(id)?;
                HostResponse::ok(maximize_updates(id, rect, displaced))
            }
            HostCommand::Restore { id } => {
                let rect = ws.restore(id)?;
                HostResponse::ok(vec![ViewUpdate::CardGeometry { id, rect }])
            }
            HostCommand::ToggleMaximize { id } => {
                let (rect, displaced) = ws.toggle_maximize(id)?;
                let maximized = ws.card(id).is_some_and(|c| c.maximized);
                if maximized {
                    HostResponse::ok(maximize_updates(id, rect, displaced))
                } else {
                    HostResponse::ok(vec![ViewUpdate::CardGeometry { id, rect }])
                }
            }
            HostCommand::Minimize { id } => {
                let mut updates = vec![ViewUpdate::CardMinimized { id }];
                if let Some(next) = ws.minimize(id)? {
                    updates.push(ViewUpdate::CardFocused { id: next });
                }
                HostResponse::ok(updates)
            }
            HostCommand::ResizeCard { id, width, height } => {
                let rect = ws.resize_card(id, width, height)?;
                HostResponse::ok(vec![
                    ViewUpdate::CardResized {
                        id,
                        width: rect.width,
                        height: rect.height,
                    },
                    ViewUpdate::CardMoved {
                        id,
                        x: rect.x,
                        y: rect.y,
                    },
                ])
            }

            HostCommand::PointerDown {
                id,
                x,
                y,
                interactive,
            } => {
                if ws.card(id).is_none() {
                    return Err(LayoutError::CardNotFound(id));
                }
                let target = if interactive {
                    PressTarget::Interactive
                } else {
                    PressTarget::DragHandle
                };
                let mut view = UpdateRecorder::new();
                self.drag.pointer_down(ws, &mut view, id, x, y, target);
                HostResponse::ok(view.into_updates())
            }
            HostCommand::PointerMove { x, y } => {
                let mut view = UpdateRecorder::new();
                self.drag.pointer_move(ws, &mut view, x, y);
                HostResponse::ok(view.into_updates())
            }
            HostCommand::PointerUp => {
                let mut view = UpdateRecorder::new();
                let outcome = self.drag.pointer_up(ws, &mut view);
                debug!("Pointer up: {:?}", outcome);
                HostResponse::ok(view.into_updates())
            }
            HostCommand::LostPointerCapture => {
                let mut view = UpdateRecorder::new();
                let outcome = self.drag.lost_pointer_capture(ws, &mut view);
                debug!("Pointer capture lost: {:?}", outcome);
                HostResponse::ok(view.into_updates())
            }
            HostCommand::CancelDrag => {
                let mut view = UpdateRecorder::new();
                self.drag.cancel(&mut view);
                HostResponse::ok(view.into_updates())
            }

            HostCommand::ClampToBounds {
                x,
                y,
                width,
                height,
            } => {
                let (x, y) = ws.clamp_to_bounds(x, y, width, height);
                HostResponse::Position { x, y }
            }
            HostCommand::SnapToGrid { x, y } => {
                let (x, y) = ws.snap_to_grid(x, y);
                HostResponse::Position { x, y }
            }
            HostCommand::CheckCardSnapping {
                id,
                x,
                y,
                width,
                height,
            } => HostResponse::Alignment {
                result: ws.check_card_snapping(id, x, y, width, height),
            },
            HostCommand::FinalizeSnap {
                id,
                x,
                y,
                width,
                height,
            } => {
                let outcome = ws.finalize_snap(id, x, y, width, height)?;
                let rect = outcome.rect();
                let mut updates = vec![ViewUpdate::CardGeometry { id, rect }];
                if let DropOutcome::Docked { zone, .. } = outcome {
                    updates.push(ViewUpdate::CardSnapped { id, zone });
                }
                HostResponse::Dropped { outcome, updates }
            }

            HostCommand::QueryWorkspace => {
                let bounds = ws.bounds();
                HostResponse::WorkspaceState {
                    width: bounds.width,
                    height: bounds.height,
                    mode: ws.layout_mode(),
                    grid_enabled: ws.config().grid_enabled,
                    focused: ws.focused_card().map(|c| c.id),
                    maximized: ws.maximized_card().map(|c| c.id),
                    cards: ws.cards_by_z().into_iter().cloned().collect(),
                }
            }
            HostCommand::QueryCard { id } => HostResponse::CardState {
                card: ws.card(id).ok_or(LayoutError::CardNotFound(id))?.clone(),
            },

            // Handled before dispatch.
            HostCommand::Reload => HostResponse::ok(Vec::new()),
            HostCommand::Stop => {
                info!("Stop requested");
                HostResponse::ok(Vec::new())
            }
        };
        Ok(response)
    }
}
