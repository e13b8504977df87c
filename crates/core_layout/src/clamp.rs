//! Bounds clamping so a card always stays reachable.

use crate::bounds::WorkspaceBounds;
use crate::config::Padding;
use crate::finite_or_zero;

/// Constrain a card's origin to the workspace.
///
/// The card may hang mostly off-screen but always keeps `padding.min_visible`
/// pixels horizontally inside the workspace and its whole header vertically.
/// A card shorter than the header only needs its own height visible.
/// When the workspace is too small for both limits the lower limit wins, which
/// keeps the header reachable. Applies in every layout mode.
pub fn clamp_to_bounds(
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    bounds: WorkspaceBounds,
    padding: &Padding,
    header_height: f64,
) -> (f64, f64) {
    let x = finite_or_zero(x);
    let y = finite_or_zero(y);
    let width = finite_or_zero(width);
    let height = finite_or_zero(height);
    let header = if height > 0.0 {
        header_height.min(height)
    } else {
        header_height
    };
    let bounds_width = finite_or_zero(bounds.width);
    let bounds_height = finite_or_zero(bounds.height);

    let min_x = padding.left - width + padding.min_visible;
    let max_x = bounds_width - padding.right - padding.min_visible;
    let min_y = padding.top;
    let max_y = bounds_height - padding.bottom - header;

    (x.min(max_x).max(min_x), y.min(max_y).max(min_y))
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: f64 = 40.0;

    fn bounds() -> WorkspaceBounds {
        WorkspaceBounds::new(800.0, 600.0)
    }

    #[test]
    fn test_inside_position_unchanged() {
        let padding = Padding::default();
        assert_eq!(
            clamp_to_bounds(100.0, 100.0, 300.0, 200.0, bounds(), &padding, HEADER),
            (100.0, 100.0)
        );
    }

    #[test]
    fn test_far_left_keeps_min_visible() {
        let padding = Padding::default();
        // min_x = 0 - 300 + 100 = -200
        let (x, _) = clamp_to_bounds(-1000.0, 100.0, 300.0, 200.0, bounds(), &padding, HEADER);
        assert_eq!(x, -200.0);
    }

    #[test]
    fn test_far_right_keeps_min_visible() {
        let padding = Padding::default();
        // max_x = 800 - 0 - 100 = 700
        let (x, _) = clamp_to_bounds(5000.0, 100.0, 300.0, 200.0, bounds(), &padding, HEADER);
        assert_eq!(x, 700.0);
    }

    #[test]
    fn test_vertical_keeps_header() {
        let padding = Padding {
            top: 10.0,
            bottom: 20.0,
            ..Padding::default()
        };
        let (_, y_top) = clamp_to_bounds(0.0, -500.0, 300.0, 200.0, bounds(), &padding, HEADER);
        let (_, y_bottom) = clamp_to_bounds(0.0, 5000.0, 300.0, 200.0, bounds(), &padding, HEADER);
        assert_eq!(y_top, 10.0);
        // 600 - 20 - 40
        assert_eq!(y_bottom, 540.0);
    }

    #[test]
    fn test_short_card_only_needs_own_height() {
        let padding = Padding::default();
        let (_, y) = clamp_to_bounds(0.0, 5000.0, 300.0, 24.0, bounds(), &padding, HEADER);
        assert_eq!(y, 576.0);
    }

    #[test]
    fn test_card_larger_than_workspace_is_deterministic() {
        let padding = Padding::default();
        let tiny = WorkspaceBounds::new(50.0, 20.0);
        // Vertical interval is empty, so the top padding wins.
        let (x, y) = clamp_to_bounds(300.0, 300.0, 2000.0, 1500.0, tiny, &padding, HEADER);
        assert_eq!((x, y), (-50.0, 0.0));
        assert_eq!(
            clamp_to_bounds(x, y, 2000.0, 1500.0, tiny, &padding, HEADER),
            (x, y)
        );
    }

    #[test]
    fn test_degenerate_input_sanitized() {
        let padding = Padding::default();
        let (x, y) = clamp_to_bounds(
            f64::NAN,
            f64::INFINITY,
            300.0,
            200.0,
            bounds(),
            &padding,
            HEADER,
        );
        assert_eq!((x, y), (0.0, 0.0));

        let (x, y) = clamp_to_bounds(
            100.0,
            100.0,
            300.0,
            200.0,
            WorkspaceBounds::new(f64::NAN, f64::NAN),
            &padding,
            HEADER,
        );
        assert!(x.is_finite() && y.is_finite());
    }
}
