//! Collects engine callbacks into protocol updates.

use cardspace_core_layout::{CardEvents, CardId, Rect, SnapGuide, SnapOverlay, Zone};
use cardspace_ipc::ViewUpdate;

/// A view that records every callback as a [`ViewUpdate`], in order.
#[derive(Debug, Default)]
pub struct UpdateRecorder {
    updates: Vec<ViewUpdate>,
}

impl UpdateRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, update: ViewUpdate) {
        self.updates.push(update);
    }

    pub fn is_empty(&self) -> bool {
        self.updates.is_empty()
    }

    pub fn into_updates(self) -> Vec<ViewUpdate> {
        self.updates
    }
}

impl SnapOverlay for UpdateRecorder {
    fn show_snap_preview(&mut self, rect: Rect) {
        self.push(ViewUpdate::PreviewShown { rect });
    }

    fn hide_snap_preview(&mut self) {
        self.push(ViewUpdate::PreviewHidden);
    }

    fn update_snap_guides(&mut self, guides: &[SnapGuide]) {
        self.push(ViewUpdate::GuidesUpdated {
            guides: guides.to_vec(),
        });
    }

    fn clear_snap_guides(&mut self) {
        self.push(ViewUpdate::GuidesCleared);
    }
}

impl CardEvents for UpdateRecorder {
    fn on_card_move(&mut self, id: CardId, x: f64, y: f64) {
        self.push(ViewUpdate::CardMoved { id, x, y });
    }

    fn on_card_resize(&mut self, id: CardId, width: f64, height: f64) {
        self.push(ViewUpdate::CardResized { id, width, height });
    }

    fn on_card_snap(&mut self, id: CardId, zone: Zone) {
        self.push(ViewUpdate::CardSnapped { id, zone });
    }

    fn on_card_focus(&mut self, id: CardId) {
        self.push(ViewUpdate::CardFocused { id });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cardspace_core_layout::{DragSession, PressTarget, Workspace, WorkspaceBounds};
    use cardspace_core_layout::{CardKind, EngineConfig, LayoutMode};

    #[test]
    fn test_records_in_call_order() {
        let mut recorder = UpdateRecorder::new();
        recorder.on_card_focus(1);
        recorder.show_snap_preview(Rect::new(0.0, 0.0, 10.0, 10.0));
        recorder.clear_snap_guides();

        assert_eq!(
            recorder.into_updates(),
            vec![
                ViewUpdate::CardFocused { id: 1 },
                ViewUpdate::PreviewShown {
                    rect: Rect::new(0.0, 0.0, 10.0, 10.0)
                },
                ViewUpdate::GuidesCleared,
            ]
        );
    }

    #[test]
    fn test_drives_a_drag_session() {
        let mut ws = Workspace::with_bounds(
            EngineConfig::default(),
            LayoutMode::Snap,
            WorkspaceBounds::new(1600.0, 1000.0),
        );
        let id = ws.add_card(CardKind::Chat);
        let mut session = DragSession::new();

        let mut recorder = UpdateRecorder::new();
        assert!(session.pointer_down(
            &mut ws,
            &mut recorder,
            id,
            700.0,
            300.0,
            PressTarget::DragHandle
        ));
        assert_eq!(recorder.into_updates(), vec![ViewUpdate::CardFocused { id }]);

        let mut recorder = UpdateRecorder::new();
        session.pointer_move(&ws, &mut recorder, 720.0, 300.0);
        assert!(recorder
            .into_updates()
            .iter()
            .any(|u| matches!(u, ViewUpdate::CardMoved { id: moved, .. } if *moved == id)));
    }
}
