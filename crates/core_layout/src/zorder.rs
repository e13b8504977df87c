//! Z-order, focus and maximize bookkeeping over a card collection.
//!
//! Stacking order only decides painting. Logical focus is the `focused` flag.

use crate::bounds::WorkspaceBounds;
use crate::card::Card;
use crate::workspace::CardChange;
use crate::{CardId, LayoutError, Rect};

/// Highest z-index in use, or 0 for an empty collection.
pub fn top_z(cards: &[Card]) -> u32 {
    cards.iter().map(|c| c.z_index).max().unwrap_or(0)
}

fn index_of(cards: &[Card], id: CardId) -> Result<usize, LayoutError> {
    cards
        .iter()
        .position(|c| c.id == id)
        .ok_or(LayoutError::CardNotFound(id))
}

/// Focus a card and raise it above every other card.
///
/// Clears `focused` everywhere else and un-minimizes the card.
/// Returns the card's new z-index.
pub fn focus(cards: &mut [Card], id: CardId) -> Result<u32, LayoutError> {
    let idx = index_of(cards, id)?;
    let z = top_z(cards).saturating_add(1);

    for card in cards.iter_mut() {
        card.focused = false;
    }

    let card = &mut cards[idx];
    card.focused = true;
    card.minimized = false;
    card.z_index = z;
    Ok(z)
}

/// Maximize a card to fill the workspace.
///
/// Any other maximized card is restored first and reported as a change. A
/// card that is already docked keeps its original restore geometry rather
/// than remembering the zone.
pub fn maximize(
    cards: &mut [Card],
    id: CardId,
    bounds: WorkspaceBounds,
) -> Result<(Rect, Vec<CardChange>), LayoutError> {
    let idx = index_of(cards, id)?;

    let mut displaced = Vec::new();
    for other in cards.iter_mut().filter(|c| c.id != id && c.maximized) {
        tracing::debug!("Card {} loses maximize to card {}", other.id, id);
        restore_card(other);
        displaced.push(CardChange {
            id: other.id,
            rect: other.rect(),
        });
    }

    let card = &mut cards[idx];
    if !card.maximized && card.restore_geometry.is_none() {
        card.restore_geometry = Some(card.rect());
    }
    let rect = bounds.as_rect();
    card.maximized = true;
    card.snapped_to = None;
    card.set_rect(rect);
    Ok((rect, displaced))
}

/// Return a maximized or docked card to its remembered geometry.
pub fn restore(cards: &mut [Card], id: CardId) -> Result<Rect, LayoutError> {
    let idx = index_of(cards, id)?;
    restore_card(&mut cards[idx]).ok_or(LayoutError::NothingToRestore(id))
}

fn restore_card(card: &mut Card) -> Option<Rect> {
    card.maximized = false;
    card.snapped_to = None;
    let geometry = card.restore_geometry.take()?;
    card.set_rect(geometry);
    Some(geometry)
}

/// The single maximized card, if any.
pub fn maximized(cards: &[Card]) -> Option<&Card> {
    cards.iter().find(|c| c.maximized)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::CardKind;
    use crate::zone::Zone;

    fn cards() -> Vec<Card> {
        vec![
            Card::new(1, CardKind::Chat, Rect::new(10.0, 10.0, 300.0, 200.0), 1),
            Card::new(2, CardKind::Chat, Rect::new(50.0, 50.0, 300.0, 200.0), 2),
            Card::new(3, CardKind::Chat, Rect::new(90.0, 90.0, 300.0, 200.0), 3),
        ]
    }

    fn bounds() -> WorkspaceBounds {
        WorkspaceBounds::new(800.0, 600.0)
    }

    #[test]
    fn test_focus_raises_and_is_exclusive() {
        let mut cards = cards();
        cards[2].focused = true;

        assert_eq!(focus(&mut cards, 1), Ok(4));
        assert!(cards[0].focused);
        assert!(!cards[2].focused);
        assert_eq!(cards[0].z_index, 4);

        assert_eq!(focus(&mut cards, 2), Ok(5));
        assert_eq!(cards.iter().filter(|c| c.focused).count(), 1);
    }

    #[test]
    fn test_z_indices_stay_unique() {
        let mut cards = cards();
        for id in [3, 1, 2, 1, 3] {
            focus(&mut cards, id).unwrap();
        }
        let mut zs: Vec<u32> = cards.iter().map(|c| c.z_index).collect();
        zs.sort_unstable();
        zs.dedup();
        assert_eq!(zs.len(), cards.len());
    }

    #[test]
    fn test_focus_unknown_card() {
        let mut cards = cards();
        assert_eq!(focus(&mut cards, 42), Err(LayoutError::CardNotFound(42)));
    }

    #[test]
    fn test_maximize_and_restore() {
        let mut cards = cards();
        let (rect, displaced) = maximize(&mut cards, 1, bounds()).unwrap();

        assert_eq!(rect, Rect::new(0.0, 0.0, 800.0, 600.0));
        assert!(displaced.is_empty());
        assert!(cards[0].maximized);
        assert_eq!(
            cards[0].restore_geometry,
            Some(Rect::new(10.0, 10.0, 300.0, 200.0))
        );

        let restored = restore(&mut cards, 1).unwrap();
        assert_eq!(restored, Rect::new(10.0, 10.0, 300.0, 200.0));
        assert!(!cards[0].maximized);
        assert_eq!(cards[0].restore_geometry, None);
    }

    #[test]
    fn test_only_one_maximized() {
        let mut cards = cards();
        maximize(&mut cards, 1, bounds()).unwrap();
        let (_, displaced) = maximize(&mut cards, 2, bounds()).unwrap();

        assert_eq!(cards.iter().filter(|c| c.maximized).count(), 1);
        assert_eq!(maximized(&cards).map(|c| c.id), Some(2));
        // The displaced card went back to where it was.
        assert_eq!(cards[0].rect(), Rect::new(10.0, 10.0, 300.0, 200.0));
        assert_eq!(
            displaced,
            vec![CardChange {
                id: 1,
                rect: Rect::new(10.0, 10.0, 300.0, 200.0),
            }]
        );
    }

    #[test]
    fn test_maximize_docked_card_keeps_original_geometry() {
        let mut cards = cards();
        cards[0].snapped_to = Some(Zone::Left);
        cards[0].restore_geometry = Some(Rect::new(123.0, 45.0, 300.0, 200.0));
        cards[0].set_rect(Rect::new(0.0, 0.0, 400.0, 600.0));

        maximize(&mut cards, 1, bounds()).unwrap();
        assert_eq!(cards[0].snapped_to, None);

        let restored = restore(&mut cards, 1).unwrap();
        assert_eq!(restored, Rect::new(123.0, 45.0, 300.0, 200.0));
    }

    #[test]
    fn test_restore_without_geometry() {
        let mut cards = cards();
        assert_eq!(restore(&mut cards, 2), Err(LayoutError::NothingToRestore(2)));
        assert_eq!(cards[1].rect(), Rect::new(50.0, 50.0, 300.0, 200.0));
    }
}
