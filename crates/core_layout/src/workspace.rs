//! The card workspace: card collection, engine settings and the geometry
//! surface the view layer calls into.
//!
//! Derived views (visible cards, stacking order, focus index) are recomputed
//! on demand from the collection, so there is nothing to keep in sync after
//! a mutation.

use crate::align::{align_to_cards, AlignmentResult};
use crate::bounds::{BoundsProvider, WorkspaceBounds};
use crate::card::{Card, CardKind};
use crate::clamp::clamp_to_bounds;
use crate::config::EngineConfig;
use crate::grid::snap_to_grid;
use crate::mode::{LayoutMode, LayoutModeController};
use crate::zone::{snap_geometry, snap_zone, Zone};
use crate::{zorder, CardId, LayoutError, Rect};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Where a dropped card ended up.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DropOutcome {
    /// Locked into a docking zone.
    Docked { zone: Zone, rect: Rect },
    /// Left free at a grid-snapped, clamped position.
    Placed { rect: Rect },
}

impl DropOutcome {
    pub fn rect(&self) -> Rect {
        match *self {
            DropOutcome::Docked { rect, .. } | DropOutcome::Placed { rect } => rect,
        }
    }
}

/// A card whose geometry changed as a side effect (e.g. of a workspace resize).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CardChange {
    pub id: CardId,
    pub rect: Rect,
}

/// Workspace state container.
#[derive(Debug)]
pub struct Workspace {
    cards: Vec<Card>,
    next_id: CardId,
    bounds: WorkspaceBounds,
    mode: LayoutModeController,
    config: EngineConfig,
}

impl Default for Workspace {
    fn default() -> Self {
        Self::new(EngineConfig::default(), LayoutMode::default())
    }
}

impl Workspace {
    /// Create an empty workspace. Bounds start degenerate until the first resize.
    pub fn new(config: EngineConfig, mode: LayoutMode) -> Self {
        Self {
            cards: Vec::new(),
            next_id: 1,
            bounds: WorkspaceBounds::default(),
            mode: LayoutModeController::new(mode),
            config,
        }
    }

    /// Create an empty workspace with known bounds.
    pub fn with_bounds(config: EngineConfig, mode: LayoutMode, bounds: WorkspaceBounds) -> Self {
        Self {
            bounds,
            ..Self::new(config, mode)
        }
    }

    // ------------------------------------------------------------------
    // Settings
    // ------------------------------------------------------------------

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Swap the engine configuration and re-fit every card to it.
    pub fn set_config(&mut self, config: EngineConfig) -> Vec<CardChange> {
        self.config = config;
        self.refit_cards()
    }

    pub fn set_grid_enabled(&mut self, enabled: bool) {
        self.config.grid_enabled = enabled;
    }

    pub fn layout_mode(&self) -> LayoutMode {
        self.mode.mode()
    }

    pub fn set_layout_mode(&mut self, mode: LayoutMode) -> bool {
        self.mode.set_mode(mode)
    }

    /// Access to the mode controller, e.g. to subscribe to mode changes.
    pub fn mode_controller_mut(&mut self) -> &mut LayoutModeController {
        &mut self.mode
    }

    pub fn is_snapping_enabled(&self) -> bool {
        self.mode.is_snapping_enabled()
    }

    pub fn bounds(&self) -> WorkspaceBounds {
        self.bounds
    }

    /// Pull the latest size from a provider. See [`Workspace::set_bounds`].
    pub fn sync_bounds(&mut self, provider: &dyn BoundsProvider) -> Vec<CardChange> {
        self.set_bounds(provider.current_bounds())
    }

    /// Adopt new workspace bounds.
    ///
    /// Docked cards re-fit their zone, the maximized card re-fits the
    /// workspace and free cards are re-clamped. Returns the cards that moved.
    pub fn set_bounds(&mut self, bounds: WorkspaceBounds) -> Vec<CardChange> {
        if bounds == self.bounds {
            return Vec::new();
        }
        self.bounds = bounds;
        self.refit_cards()
    }

    fn refit_cards(&mut self) -> Vec<CardChange> {
        if self.bounds.is_degenerate() {
            return Vec::new();
        }

        let bounds = self.bounds;
        let config = &self.config;
        let mut changes = Vec::new();

        for card in self.cards.iter_mut() {
            let target = if card.maximized {
                bounds.as_rect()
            } else if let Some(zone) = card.snapped_to {
                snap_geometry(zone, bounds)
            } else {
                let (x, y) = clamp_to_bounds(
                    card.x,
                    card.y,
                    card.width,
                    card.height,
                    bounds,
                    &config.padding,
                    config.header_height,
                );
                card.rect().with_origin(x, y)
            };

            if target != card.rect() {
                card.set_rect(target);
                changes.push(CardChange {
                    id: card.id,
                    rect: target,
                });
            }
        }

        changes
    }

    // ------------------------------------------------------------------
    // Card collection
    // ------------------------------------------------------------------

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn card_count(&self) -> usize {
        self.cards.len()
    }

    /// All cards in creation order.
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn card(&self, id: CardId) -> Option<&Card> {
        self.cards.iter().find(|c| c.id == id)
    }

    fn card_mut(&mut self, id: CardId) -> Result<&mut Card, LayoutError> {
        self.cards
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(LayoutError::CardNotFound(id))
    }

    /// Cards that are not minimized, in creation order.
    pub fn visible_cards(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter().filter(|c| c.is_visible())
    }

    /// All cards from bottom to top of the stack.
    pub fn cards_by_z(&self) -> Vec<&Card> {
        let mut sorted: Vec<&Card> = self.cards.iter().collect();
        sorted.sort_by_key(|c| c.z_index);
        sorted
    }

    pub fn focused_card(&self) -> Option<&Card> {
        self.cards.iter().find(|c| c.focused)
    }

    pub fn maximized_card(&self) -> Option<&Card> {
        zorder::maximized(&self.cards)
    }

    /// Position of the focused card among the visible cards.
    pub fn focus_index(&self) -> Option<usize> {
        self.visible_cards().position(|c| c.focused)
    }

    /// Open a new card of `kind`, focused and on top.
    ///
    /// The first visible card is centered. Later cards cascade from the
    /// top-most visible card and wrap back to the padding origin when the
    /// cascade would run off the workspace.
    pub fn add_card(&mut self, kind: CardKind) -> CardId {
        let (width, height) = kind.default_size();
        let width = sanitize_size(width, self.config.min_card_width);
        let height = sanitize_size(height, self.config.min_card_height);

        let (x, y) = self.initial_position(width, height);
        let id = self.next_id;
        self.next_id += 1;

        let z = zorder::top_z(&self.cards).saturating_add(1);
        let mut card = Card::new(id, kind, Rect::new(x, y, width, height), z);
        card.focused = true;
        for other in self.cards.iter_mut() {
            other.focused = false;
        }
        self.cards.push(card);

        debug!("Added card {} ({:?}) at {},{} {}x{}", id, kind, x, y, width, height);
        id
    }

    fn initial_position(&self, width: f64, height: f64) -> (f64, f64) {
        let padding = &self.config.padding;
        if self.bounds.is_degenerate() {
            return (padding.left, padding.top);
        }

        let bounds = self.bounds;
        let offset = self.config.cascade_offset;
        let top_card = self.visible_cards().max_by_key(|c| c.z_index);

        let (x, y) = match top_card {
            Some(top) => {
                let x = top.x + offset;
                let y = top.y + offset;
                if x + width > bounds.width - padding.right
                    || y + height > bounds.height - padding.bottom
                {
                    (padding.left, padding.top)
                } else {
                    (x, y)
                }
            }
            None => (
                ((bounds.width - width) / 2.0).max(padding.left),
                ((bounds.height - height) / 2.0).max(padding.top),
            ),
        };

        self.clamp_to_bounds(x, y, width, height)
    }

    /// Close a card. Returns the card that inherits focus, if any.
    pub fn close_card(&mut self, id: CardId) -> Result<Option<CardId>, LayoutError> {
        let idx = self
            .cards
            .iter()
            .position(|c| c.id == id)
            .ok_or(LayoutError::CardNotFound(id))?;
        let removed = self.cards.remove(idx);
        debug!("Closed card {}", id);

        if removed.focused {
            Ok(self.focus_topmost_visible())
        } else {
            Ok(self.focused_card().map(|c| c.id))
        }
    }

    fn focus_topmost_visible(&mut self) -> Option<CardId> {
        let next = self
            .visible_cards()
            .max_by_key(|c| c.z_index)
            .map(|c| c.id)?;
        zorder::focus(&mut self.cards, next).ok()?;
        Some(next)
    }

    // ------------------------------------------------------------------
    // Focus, z-order, maximize
    // ------------------------------------------------------------------

    /// Focus and raise a card. Returns its new z-index.
    pub fn focus(&mut self, id: CardId) -> Result<u32, LayoutError> {
        zorder::focus(&mut self.cards, id)
    }

    /// Focus the next visible card in creation order, wrapping around.
    pub fn focus_next(&mut self) -> Option<CardId> {
        self.cycle_focus(true)
    }

    /// Focus the previous visible card in creation order, wrapping around.
    pub fn focus_previous(&mut self) -> Option<CardId> {
        self.cycle_focus(false)
    }

    fn cycle_focus(&mut self, forward: bool) -> Option<CardId> {
        let visible: Vec<CardId> = self.visible_cards().map(|c| c.id).collect();
        if visible.is_empty() {
            return None;
        }

        let len = visible.len();
        let target = match self.focus_index() {
            Some(i) if forward => (i + 1) % len,
            Some(i) => (i + len - 1) % len,
            None if forward => 0,
            None => len - 1,
        };

        let id = visible[target];
        zorder::focus(&mut self.cards, id).ok()?;
        Some(id)
    }

    /// Maximize a card and focus it.
    ///
    /// Returns the maximized rect and the previously maximized card, which
    /// goes back to its remembered geometry.
    pub fn maximize(&mut self, id: CardId) -> Result<(Rect, Vec<CardChange>), LayoutError> {
        let (rect, displaced) = zorder::maximize(&mut self.cards, id, self.bounds)?;
        zorder::focus(&mut self.cards, id)?;
        Ok((rect, displaced))
    }

    /// Return a maximized or docked card to its remembered geometry.
    pub fn restore(&mut self, id: CardId) -> Result<Rect, LayoutError> {
        zorder::restore(&mut self.cards, id)
    }

    /// Maximize a card, or restore it when it already is.
    ///
    /// Other cards displaced by the maximize are returned as changes.
    pub fn toggle_maximize(
        &mut self,
        id: CardId,
    ) -> Result<(Rect, Vec<CardChange>), LayoutError> {
        if self.card_mut(id)?.maximized {
            Ok((self.restore(id)?, Vec::new()))
        } else {
            self.maximize(id)
        }
    }

    /// Hide a card. Returns the card that inherits focus, if any.
    pub fn minimize(&mut self, id: CardId) -> Result<Option<CardId>, LayoutError> {
        let card = self.card_mut(id)?;
        let was_focused = card.focused;
        card.minimized = true;
        card.focused = false;

        if was_focused {
            Ok(self.focus_topmost_visible())
        } else {
            Ok(self.focused_card().map(|c| c.id))
        }
    }

    /// Resize a card, respecting the configured minimum size.
    ///
    /// A docked or maximized card becomes free. The position is re-clamped.
    pub fn resize_card(
        &mut self,
        id: CardId,
        width: f64,
        height: f64,
    ) -> Result<Rect, LayoutError> {
        let width = sanitize_size(width, self.config.min_card_width);
        let height = sanitize_size(height, self.config.min_card_height);
        let (x, y) = {
            let card = self.card(id).ok_or(LayoutError::CardNotFound(id))?;
            self.clamp_to_bounds(card.x, card.y, width, height)
        };

        let card = self.card_mut(id)?;
        card.detach();
        let rect = Rect::new(x, y, width, height);
        card.set_rect(rect);
        Ok(rect)
    }

    // ------------------------------------------------------------------
    // Geometry surface
    // ------------------------------------------------------------------

    /// Constrain a position so the card stays reachable. Mode-independent.
    pub fn clamp_to_bounds(&self, x: f64, y: f64, width: f64, height: f64) -> (f64, f64) {
        clamp_to_bounds(
            x,
            y,
            width,
            height,
            self.bounds,
            &self.config.padding,
            self.config.header_height,
        )
    }

    /// Quantize to the grid when grid snapping is enabled. Mode-independent.
    pub fn snap_to_grid(&self, x: f64, y: f64) -> (f64, f64) {
        snap_to_grid(x, y, self.config.grid_size, self.config.grid_enabled)
    }

    /// Docking zone a candidate is entering. Always `None` in freeflow.
    pub fn snap_zone(&self, x: f64, y: f64, width: f64, height: f64) -> Option<Zone> {
        if !self.is_snapping_enabled() {
            return None;
        }
        snap_zone(
            Rect::new(x, y, width, height),
            self.bounds,
            self.config.snap_threshold,
        )
    }

    pub fn snap_geometry(&self, zone: Zone) -> Rect {
        snap_geometry(zone, self.bounds)
    }

    /// Align a dragged card against every other visible, non-maximized card
    /// and the workspace edges. Unchanged input and no guides in freeflow.
    pub fn check_card_snapping(
        &self,
        card_id: CardId,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    ) -> AlignmentResult {
        let candidate = Rect::new(x, y, width, height);
        if !self.is_snapping_enabled() {
            return AlignmentResult::unchanged(&candidate);
        }

        let others: Vec<Rect> = self
            .cards
            .iter()
            .filter(|c| c.id != card_id && c.is_alignment_target())
            .map(Card::rect)
            .collect();

        align_to_cards(
            candidate,
            &others,
            self.bounds,
            self.config.card_snap_threshold,
        )
    }

    /// Commit a drop: dock into a zone if one is entered and snapping is
    /// enabled, otherwise place at the grid-snapped, clamped position.
    pub fn finalize_snap(
        &mut self,
        card_id: CardId,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    ) -> Result<DropOutcome, LayoutError> {
        let candidate = Rect::new(x, y, width, height);
        match self.snap_zone(x, y, width, height) {
            Some(zone) => {
                let (fx, fy) = self.clamp_to_bounds(x, y, width, height);
                let rect = self.dock_card(card_id, zone, candidate.with_origin(fx, fy))?;
                Ok(DropOutcome::Docked { zone, rect })
            }
            None => {
                let rect = self.place_card(card_id, candidate)?;
                Ok(DropOutcome::Placed { rect })
            }
        }
    }

    /// Dock a card into `zone`, remembering `free` as its restore geometry
    /// unless it already remembers one.
    pub fn dock_card(&mut self, id: CardId, zone: Zone, free: Rect) -> Result<Rect, LayoutError> {
        let rect = snap_geometry(zone, self.bounds);
        let card = self.card_mut(id)?;
        if card.restore_geometry.is_none() {
            card.restore_geometry = Some(free);
        }
        card.maximized = false;
        card.snapped_to = Some(zone);
        card.set_rect(rect);
        debug!("Card {} docked {:?} at {:?}", id, zone, rect);
        Ok(rect)
    }

    /// Place a card freely at a grid-snapped, clamped position.
    pub fn place_card(&mut self, id: CardId, rect: Rect) -> Result<Rect, LayoutError> {
        let (x, y) = self.snap_to_grid(rect.x, rect.y);
        let (x, y) = self.clamp_to_bounds(x, y, rect.width, rect.height);
        let placed = rect.with_origin(x, y);

        let card = self.card_mut(id)?;
        card.detach();
        card.set_rect(placed);
        debug!("Card {} placed at {},{}", id, x, y);
        Ok(placed)
    }
}

fn sanitize_size(value: f64, minimum: f64) -> f64 {
    if value.is_finite() {
        value.max(minimum)
    } else {
        minimum
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::align::{Orientation, SnapGuide};

    fn workspace() -> Workspace {
        Workspace::with_bounds(
            EngineConfig::default(),
            LayoutMode::Snap,
            WorkspaceBounds::new(1600.0, 1000.0),
        )
    }

    fn custom(width: f64, height: f64) -> CardKind {
        CardKind::Custom { width, height }
    }

    #[test]
    fn test_create_empty_workspace() {
        let ws = workspace();
        assert!(ws.is_empty());
        assert_eq!(ws.card_count(), 0);
        assert!(ws.focused_card().is_none());
        assert_eq!(ws.focus_index(), None);
    }

    #[test]
    fn test_first_card_is_centered_and_focused() {
        let mut ws = workspace();
        let id = ws.add_card(custom(400.0, 300.0));

        let card = ws.card(id).unwrap();
        assert_eq!(card.rect(), Rect::new(600.0, 350.0, 400.0, 300.0));
        assert!(card.focused);
        assert_eq!(ws.focused_card().map(|c| c.id), Some(id));
    }

    #[test]
    fn test_cards_cascade_and_wrap() {
        let mut ws = workspace();
        let first = ws.add_card(custom(400.0, 300.0));
        let second = ws.add_card(custom(400.0, 300.0));

        assert_eq!(ws.card(second).unwrap().x, ws.card(first).unwrap().x + 30.0);
        assert_eq!(ws.card(second).unwrap().y, ws.card(first).unwrap().y + 30.0);

        ws.place_card(second, Rect::new(1190.0, 690.0, 400.0, 300.0))
            .unwrap();
        let third = ws.add_card(custom(400.0, 300.0));
        assert_eq!(ws.card(third).unwrap().rect().x, 0.0);
        assert_eq!(ws.card(third).unwrap().rect().y, 0.0);
    }

    #[test]
    fn test_new_card_is_on_top() {
        let mut ws = workspace();
        let a = ws.add_card(CardKind::Chat);
        let b = ws.add_card(CardKind::Settings);

        let order: Vec<CardId> = ws.cards_by_z().iter().map(|c| c.id).collect();
        assert_eq!(order, vec![a, b]);
        assert!(!ws.card(a).unwrap().focused);
    }

    #[test]
    fn test_close_focused_card_passes_focus() {
        let mut ws = workspace();
        let a = ws.add_card(CardKind::Chat);
        let b = ws.add_card(CardKind::Chat);
        let c = ws.add_card(CardKind::Chat);
        ws.focus(b).unwrap();

        assert_eq!(ws.close_card(b), Ok(Some(c)));
        assert_eq!(ws.card_count(), 2);
        assert!(ws.card(b).is_none());

        assert_eq!(ws.close_card(a), Ok(Some(c)));
        assert_eq!(ws.close_card(99), Err(LayoutError::CardNotFound(99)));
    }

    #[test]
    fn test_minimize_hides_and_passes_focus() {
        let mut ws = workspace();
        let a = ws.add_card(CardKind::Chat);
        let b = ws.add_card(CardKind::Chat);

        assert_eq!(ws.minimize(b), Ok(Some(a)));
        assert_eq!(ws.visible_cards().count(), 1);

        // Focusing brings it back.
        ws.focus(b).unwrap();
        assert!(ws.card(b).unwrap().is_visible());
    }

    #[test]
    fn test_focus_cycling() {
        let mut ws = workspace();
        let a = ws.add_card(CardKind::Chat);
        let b = ws.add_card(CardKind::Chat);
        let c = ws.add_card(CardKind::Chat);

        assert_eq!(ws.focus_index(), Some(2));
        assert_eq!(ws.focus_next(), Some(a));
        assert_eq!(ws.focus_next(), Some(b));
        assert_eq!(ws.focus_previous(), Some(a));
        assert_eq!(ws.focus_previous(), Some(c));

        ws.minimize(b).unwrap();
        ws.focus(a).unwrap();
        assert_eq!(ws.focus_next(), Some(c));
    }

    #[test]
    fn test_toggle_maximize() {
        let mut ws = workspace();
        let id = ws.add_card(custom(400.0, 300.0));

        let (max, displaced) = ws.toggle_maximize(id).unwrap();
        assert_eq!(max, Rect::new(0.0, 0.0, 1600.0, 1000.0));
        assert!(displaced.is_empty());
        assert_eq!(ws.maximized_card().map(|c| c.id), Some(id));

        let (restored, _) = ws.toggle_maximize(id).unwrap();
        assert_eq!(restored, Rect::new(600.0, 350.0, 400.0, 300.0));
        assert!(ws.maximized_card().is_none());
    }

    #[test]
    fn test_add_card_takes_focus_and_top_z() {
        let mut ws = workspace();
        let a = ws.add_card(custom(400.0, 300.0));
        assert_eq!(ws.card(a).unwrap().z_index, 1);

        let b = ws.add_card(custom(400.0, 300.0));
        assert_eq!(ws.card(b).unwrap().z_index, 2);
        assert!(ws.card(b).unwrap().focused);
        assert!(!ws.card(a).unwrap().focused);
        assert_eq!(ws.cards().iter().filter(|c| c.focused).count(), 1);
    }

    #[test]
    fn test_second_maximize_reports_displaced_card() {
        let mut ws = workspace();
        let a = ws.add_card(custom(400.0, 300.0));
        let b = ws.add_card(custom(400.0, 300.0));
        let a_rect = ws.card(a).unwrap().rect();

        ws.maximize(a).unwrap();
        let (rect, displaced) = ws.maximize(b).unwrap();

        assert_eq!(rect, Rect::new(0.0, 0.0, 1600.0, 1000.0));
        assert_eq!(displaced, vec![CardChange { id: a, rect: a_rect }]);
        assert_eq!(ws.card(a).unwrap().rect(), a_rect);
        assert_eq!(ws.maximized_card().map(|c| c.id), Some(b));
        assert_eq!(ws.focused_card().map(|c| c.id), Some(b));
    }

    #[test]
    fn test_resize_card_respects_minimum() {
        let mut ws = workspace();
        let id = ws.add_card(custom(400.0, 300.0));

        let rect = ws.resize_card(id, 50.0, f64::NAN).unwrap();
        assert_eq!(rect.width, 200.0);
        assert_eq!(rect.height, 120.0);
    }

    #[test]
    fn test_resize_docked_card_undocks() {
        let mut ws = workspace();
        let id = ws.add_card(custom(400.0, 300.0));
        ws.finalize_snap(id, 2.0, 300.0, 400.0, 300.0).unwrap();
        assert_eq!(ws.card(id).unwrap().snapped_to, Some(Zone::Left));

        ws.resize_card(id, 500.0, 400.0).unwrap();
        let card = ws.card(id).unwrap();
        assert_eq!(card.snapped_to, None);
        assert_eq!(card.restore_geometry, None);
    }

    #[test]
    fn test_finalize_snap_docks_into_zone() {
        let mut ws = workspace();
        let id = ws.add_card(custom(400.0, 300.0));

        let outcome = ws.finalize_snap(id, 3.0, 4.0, 400.0, 300.0).unwrap();
        assert_eq!(
            outcome,
            DropOutcome::Docked {
                zone: Zone::TopLeft,
                rect: Rect::new(0.0, 0.0, 800.0, 500.0)
            }
        );

        let card = ws.card(id).unwrap();
        assert_eq!(card.snapped_to, Some(Zone::TopLeft));
        assert_eq!(
            card.restore_geometry,
            Some(Rect::new(3.0, 4.0, 400.0, 300.0))
        );

        assert_eq!(ws.restore(id), Ok(Rect::new(3.0, 4.0, 400.0, 300.0)));
    }

    #[test]
    fn test_finalize_snap_places_with_grid_and_clamp() {
        let mut ws = workspace();
        ws.set_grid_enabled(true);
        let id = ws.add_card(custom(400.0, 300.0));

        let outcome = ws.finalize_snap(id, 509.0, 311.0, 400.0, 300.0).unwrap();
        assert_eq!(
            outcome,
            DropOutcome::Placed {
                rect: Rect::new(500.0, 320.0, 400.0, 300.0)
            }
        );
        assert_eq!(ws.card(id).unwrap().snapped_to, None);
    }

    #[test]
    fn test_freeflow_never_docks() {
        let mut ws = workspace();
        ws.set_layout_mode(LayoutMode::Freeflow);
        let id = ws.add_card(custom(400.0, 300.0));

        assert_eq!(ws.snap_zone(3.0, 4.0, 400.0, 300.0), None);
        let outcome = ws.finalize_snap(id, 3.0, 4.0, 400.0, 300.0).unwrap();
        assert_eq!(
            outcome,
            DropOutcome::Placed {
                rect: Rect::new(3.0, 4.0, 400.0, 300.0)
            }
        );
    }

    #[test]
    fn test_freeflow_suppresses_alignment() {
        let mut ws = workspace();
        let a = ws.add_card(custom(300.0, 200.0));
        ws.place_card(a, Rect::new(100.0, 100.0, 300.0, 200.0))
            .unwrap();
        let b = ws.add_card(custom(250.0, 150.0));
        ws.set_layout_mode(LayoutMode::Freeflow);

        let result = ws.check_card_snapping(b, 403.0, 150.0, 250.0, 150.0);
        assert_eq!(result, AlignmentResult::unchanged(&Rect::new(403.0, 150.0, 250.0, 150.0)));
    }

    #[test]
    fn test_alignment_ignores_self_hidden_and_maximized() {
        let mut ws = workspace();
        let a = ws.add_card(custom(300.0, 200.0));
        ws.place_card(a, Rect::new(100.0, 100.0, 300.0, 200.0))
            .unwrap();
        let b = ws.add_card(custom(250.0, 150.0));

        let result = ws.check_card_snapping(b, 403.0, 600.0, 250.0, 150.0);
        assert_eq!(result.x, 400.0);
        assert!(result
            .guides
            .contains(&SnapGuide::vertical(400.0, 100.0, 750.0)));

        ws.minimize(a).unwrap();
        let result = ws.check_card_snapping(b, 403.0, 600.0, 250.0, 150.0);
        assert_eq!(result.x, 403.0);

        ws.focus(a).unwrap();
        ws.maximize(a).unwrap();
        let result = ws.check_card_snapping(b, 403.0, 600.0, 250.0, 150.0);
        assert!(result
            .guides
            .iter()
            .all(|g| g.orientation != Orientation::Vertical || g.position != 400.0));

        // A card never aligns with itself.
        let own = ws.card(b).unwrap().rect();
        let result = ws.check_card_snapping(b, own.x + 3.0, own.y, own.width, own.height);
        assert_eq!(result.x, own.x + 3.0);
    }

    #[test]
    fn test_resize_refits_cards() {
        let mut ws = workspace();
        let docked = ws.add_card(custom(400.0, 300.0));
        ws.finalize_snap(docked, 2.0, 300.0, 400.0, 300.0).unwrap();
        let free = ws.add_card(custom(400.0, 300.0));
        ws.place_card(free, Rect::new(1100.0, 500.0, 400.0, 300.0))
            .unwrap();

        let changes = ws.set_bounds(WorkspaceBounds::new(800.0, 600.0));

        assert_eq!(
            ws.card(docked).unwrap().rect(),
            Rect::new(0.0, 0.0, 400.0, 600.0)
        );
        // 800 - 100 = 700, 600 - 40 = 560
        assert_eq!(
            ws.card(free).unwrap().rect(),
            Rect::new(700.0, 500.0, 400.0, 300.0)
        );
        assert_eq!(changes.len(), 2);
        assert!(ws.set_bounds(WorkspaceBounds::new(800.0, 600.0)).is_empty());
    }

    #[test]
    fn test_sync_bounds_from_provider() {
        use crate::bounds::ObservedBounds;

        let mut provider = ObservedBounds::default();
        let mut ws = Workspace::default();
        provider.observe_resize(1024.0, 768.0);

        ws.sync_bounds(&provider);
        assert_eq!(ws.bounds(), WorkspaceBounds::new(1024.0, 768.0));
    }

    #[test]
    fn test_degenerate_bounds_leave_cards_alone() {
        let mut ws = workspace();
        let id = ws.add_card(custom(400.0, 300.0));
        let before = ws.card(id).unwrap().rect();

        assert!(ws.set_bounds(WorkspaceBounds::default()).is_empty());
        assert_eq!(ws.card(id).unwrap().rect(), before);
        assert_eq!(ws.snap_zone(0.0, 0.0, 400.0, 300.0), None);
    }

    #[test]
    fn test_unknown_card_errors() {
        let mut ws = workspace();
        assert_eq!(ws.focus(5), Err(LayoutError::CardNotFound(5)));
        assert_eq!(ws.maximize(5), Err(LayoutError::CardNotFound(5)));
        assert_eq!(
            ws.finalize_snap(5, 0.0, 0.0, 10.0, 10.0),
            Err(LayoutError::CardNotFound(5))
        );
        assert_eq!(
            ws.resize_card(5, 10.0, 10.0),
            Err(LayoutError::CardNotFound(5))
        );
    }
}
