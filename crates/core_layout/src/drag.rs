//! Per-drag state machine.
//!
//! ```text
//! idle --down--> pressed --move > threshold--> dragging --up--> snapped | clamped
//!                   |                              |
//!                   +--up--> (click) idle          +--cancel--> cancelled
//! ```
//!
//! Every terminal state returns the session to idle. Leaving `dragging` by any
//! path clears the guides and hides the preview.
//!
//! During a drag the card model is not written. The view is told where to draw
//! the card through [`CardEvents::on_card_move`] and the model is committed once,
//! on release. Cancelling therefore leaves the card exactly as it was.

use crate::align::SnapGuide;
use crate::workspace::{DropOutcome, Workspace};
use crate::zone::Zone;
use crate::{CardId, Rect};
use tracing::{debug, warn};

/// Overlay toggles driven by a drag.
pub trait SnapOverlay {
    fn show_snap_preview(&mut self, rect: Rect);
    fn hide_snap_preview(&mut self);
    fn update_snap_guides(&mut self, guides: &[SnapGuide]);
    fn clear_snap_guides(&mut self);
}

/// Notifications to the owner of the card collection.
pub trait CardEvents {
    fn on_card_move(&mut self, id: CardId, x: f64, y: f64);
    fn on_card_resize(&mut self, id: CardId, width: f64, height: f64);
    fn on_card_snap(&mut self, id: CardId, zone: Zone);
    fn on_card_focus(&mut self, id: CardId);
}

/// What the pointer went down on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PressTarget {
    /// The card's draggable region (header or body).
    DragHandle,
    /// A button, input or link inside the card. These keep the event.
    Interactive,
}

/// Observable phase of the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragPhase {
    Idle,
    Pressed,
    Dragging,
}

/// How an interaction ended.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragOutcome {
    /// The event did not apply to the current phase.
    Ignored,
    /// Released before the drag threshold: a plain focus click.
    Clicked { card_id: CardId },
    Snapped { card_id: CardId, zone: Zone, rect: Rect },
    Clamped { card_id: CardId, rect: Rect },
    Cancelled { card_id: CardId },
}

#[derive(Debug, Clone, Copy)]
struct Grab {
    card_id: CardId,
    /// Card geometry when the pointer went down.
    origin: Rect,
    pointer_x: f64,
    pointer_y: f64,
}

#[derive(Debug, Clone, Copy)]
struct Drag {
    grab: Grab,
    /// Geometry the deltas apply to. Differs from `origin` when a docked or
    /// maximized card got its free size back at drag start.
    frame: Rect,
    /// Last aligned candidate, before clamping.
    candidate: Rect,
}

#[derive(Debug, Clone, Copy, Default)]
enum State {
    #[default]
    Idle,
    Pressed(Grab),
    Dragging(Drag),
}

/// Drives one pointer interaction at a time.
#[derive(Debug, Default)]
pub struct DragSession {
    state: State,
}

impl DragSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> DragPhase {
        match self.state {
            State::Idle => DragPhase::Idle,
            State::Pressed(_) => DragPhase::Pressed,
            State::Dragging(_) => DragPhase::Dragging,
        }
    }

    /// The card being pressed or dragged.
    pub fn active_card(&self) -> Option<CardId> {
        match self.state {
            State::Idle => None,
            State::Pressed(grab) => Some(grab.card_id),
            State::Dragging(drag) => Some(drag.grab.card_id),
        }
    }

    /// Pointer down on a card. Focuses and raises it.
    ///
    /// Returns false when the press is not taken: interactive children,
    /// unknown cards, or a session that is already busy.
    pub fn pointer_down<V>(
        &mut self,
        workspace: &mut Workspace,
        view: &mut V,
        card_id: CardId,
        x: f64,
        y: f64,
        target: PressTarget,
    ) -> bool
    where
        V: SnapOverlay + CardEvents + ?Sized,
    {
        if !matches!(self.state, State::Idle) {
            warn!("Ignoring press on card {} while another interaction is active", card_id);
            return false;
        }
        if target == PressTarget::Interactive {
            return false;
        }

        let Some(origin) = workspace.card(card_id).map(|c| c.rect()) else {
            warn!("Ignoring press on unknown card {}", card_id);
            return false;
        };

        if workspace.focus(card_id).is_err() {
            return false;
        }
        view.on_card_focus(card_id);

        debug!("Card {} pressed at {},{}", card_id, x, y);
        self.state = State::Pressed(Grab {
            card_id,
            origin,
            pointer_x: x,
            pointer_y: y,
        });
        true
    }

    /// Pointer moved to `(x, y)`. Moves are applied strictly in order.
    pub fn pointer_move<V>(&mut self, workspace: &Workspace, view: &mut V, x: f64, y: f64)
    where
        V: SnapOverlay + CardEvents + ?Sized,
    {
        let drag = match self.state {
            State::Idle => return,
            State::Pressed(grab) => {
                let travel = (x - grab.pointer_x).hypot(y - grab.pointer_y);
                if travel.is_nan() || travel <= workspace.config().drag_threshold {
                    return;
                }
                start_drag(workspace, view, grab)
            }
            State::Dragging(drag) => drag,
        };

        self.state = State::Dragging(track(workspace, view, drag, x, y));
    }

    /// Pointer released. Commits the drop or reports a click.
    pub fn pointer_up<V>(&mut self, workspace: &mut Workspace, view: &mut V) -> DragOutcome
    where
        V: SnapOverlay + CardEvents + ?Sized,
    {
        match std::mem::take(&mut self.state) {
            State::Idle => DragOutcome::Ignored,
            State::Pressed(grab) => {
                debug!("Card {} clicked", grab.card_id);
                DragOutcome::Clicked {
                    card_id: grab.card_id,
                }
            }
            State::Dragging(drag) => {
                clear_overlay(view);
                finish(workspace, view, drag)
            }
        }
    }

    /// The view lost pointer capture. Treated exactly like a release.
    pub fn lost_pointer_capture<V>(
        &mut self,
        workspace: &mut Workspace,
        view: &mut V,
    ) -> DragOutcome
    where
        V: SnapOverlay + CardEvents + ?Sized,
    {
        self.pointer_up(workspace, view)
    }

    /// Abandon the interaction without touching the card model. The view is
    /// told to put the card back where it was.
    pub fn cancel<V>(&mut self, view: &mut V) -> DragOutcome
    where
        V: SnapOverlay + CardEvents + ?Sized,
    {
        match std::mem::take(&mut self.state) {
            State::Idle => DragOutcome::Ignored,
            State::Pressed(grab) => DragOutcome::Cancelled {
                card_id: grab.card_id,
            },
            State::Dragging(drag) => {
                clear_overlay(view);
                let id = drag.grab.card_id;
                let origin = drag.grab.origin;
                if drag.frame.width != origin.width || drag.frame.height != origin.height {
                    view.on_card_resize(id, origin.width, origin.height);
                }
                view.on_card_move(id, origin.x, origin.y);
                debug!("Drag of card {} cancelled", id);
                DragOutcome::Cancelled { card_id: id }
            }
        }
    }
}

/// Enter `dragging`. A docked or maximized card gets its free size back,
/// positioned so the pointer stays at the same relative spot on the header.
fn start_drag<V>(workspace: &Workspace, view: &mut V, grab: Grab) -> Drag
where
    V: SnapOverlay + CardEvents + ?Sized,
{
    let restore = workspace
        .card(grab.card_id)
        .filter(|c| c.snapped_to.is_some() || c.maximized)
        .and_then(|c| c.restore_geometry);

    let frame = match restore {
        Some(free) => {
            let ratio = if grab.origin.width > 0.0 {
                ((grab.pointer_x - grab.origin.x) / grab.origin.width).clamp(0.0, 1.0)
            } else {
                0.5
            };
            view.on_card_resize(grab.card_id, free.width, free.height);
            Rect::new(
                grab.pointer_x - ratio * free.width,
                grab.origin.y,
                free.width,
                free.height,
            )
        }
        None => grab.origin,
    };

    debug!("Card {} drag started", grab.card_id);
    Drag {
        grab,
        frame,
        candidate: frame,
    }
}

/// One pointer-move while dragging: align, classify (preview only), clamp.
fn track<V>(workspace: &Workspace, view: &mut V, drag: Drag, x: f64, y: f64) -> Drag
where
    V: SnapOverlay + CardEvents + ?Sized,
{
    let id = drag.grab.card_id;
    let frame = drag.frame;
    let raw_x = frame.x + (x - drag.grab.pointer_x);
    let raw_y = frame.y + (y - drag.grab.pointer_y);

    let aligned = workspace.check_card_snapping(id, raw_x, raw_y, frame.width, frame.height);
    let zone = workspace.snap_zone(aligned.x, aligned.y, frame.width, frame.height);
    let (shown_x, shown_y) =
        workspace.clamp_to_bounds(aligned.x, aligned.y, frame.width, frame.height);

    if aligned.guides.is_empty() {
        view.clear_snap_guides();
    } else {
        view.update_snap_guides(&aligned.guides);
    }
    match zone {
        Some(zone) => view.show_snap_preview(workspace.snap_geometry(zone)),
        None => view.hide_snap_preview(),
    }
    view.on_card_move(id, shown_x, shown_y);

    Drag {
        candidate: frame.with_origin(aligned.x, aligned.y),
        ..drag
    }
}

fn finish<V>(workspace: &mut Workspace, view: &mut V, drag: Drag) -> DragOutcome
where
    V: SnapOverlay + CardEvents + ?Sized,
{
    let id = drag.grab.card_id;
    let c = drag.candidate;

    match workspace.finalize_snap(id, c.x, c.y, c.width, c.height) {
        Ok(DropOutcome::Docked { zone, rect }) => {
            view.on_card_resize(id, rect.width, rect.height);
            view.on_card_move(id, rect.x, rect.y);
            view.on_card_snap(id, zone);
            debug!("Card {} snapped to {:?}", id, zone);
            DragOutcome::Snapped {
                card_id: id,
                zone,
                rect,
            }
        }
        Ok(DropOutcome::Placed { rect }) => {
            view.on_card_move(id, rect.x, rect.y);
            debug!("Card {} dropped at {},{}", id, rect.x, rect.y);
            DragOutcome::Clamped { card_id: id, rect }
        }
        Err(e) => {
            warn!("Drop of card {} discarded: {}", id, e);
            DragOutcome::Cancelled { card_id: id }
        }
    }
}

fn clear_overlay<V>(view: &mut V)
where
    V: SnapOverlay + ?Sized,
{
    view.clear_snap_guides();
    view.hide_snap_preview();
}
