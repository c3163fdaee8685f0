// Copyright 2026 the Trendline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Point, Rect};
use smallvec::SmallVec;

use trendline_layout::{ItemId, ItemPosition};
use trendline_viewport::{Transform, WorldSize};

use crate::highlight::HighlightAnimator;
use crate::plan::{FOCUS_SCALE_BOOST, item_screen};

/// Base forgiveness added around a dot's visual radius when hit-testing.
pub const HIT_BUFFER_PX: f64 = 6.0;

/// Picks the item under a pointer position, if any.
///
/// Candidates are items whose screen distance to `pointer` is at most their
/// visual radius plus a hit buffer. The radius includes the highlight scale
/// boost, so a glowing dot's pick target matches what is drawn. The buffer
/// shrinks with vertical-spread compression (`spread` in `[0, 1]`): tighter
/// clusters get less forgiveness so individual picks stay possible. Among
/// candidates the largest `base_size` wins, with the nearest distance as
/// tiebreak, matching render z-order.
///
/// `None` means empty space, not a failure.
#[must_use]
pub fn hit_test(
    pointer: Point,
    positions: &[ItemPosition],
    world: WorldSize,
    transform: Transform,
    spread: f64,
    highlight: &HighlightAnimator,
) -> Option<ItemId> {
    let buffer = HIT_BUFFER_PX * (0.35 + 0.65 * spread.clamp(0.0, 1.0));
    let mut candidates: SmallVec<[(ItemId, f64, f64); 8]> = SmallVec::new();
    for p in positions {
        let s = item_screen(p, world, transform);
        let radius = p.base_size / 2.0 * (1.0 + FOCUS_SCALE_BOOST * highlight.progress(p.id));
        let reach = radius + buffer;
        let d2 = (s - pointer).hypot2();
        if d2 <= reach * reach {
            candidates.push((p.id, p.base_size, d2));
        }
    }
    candidates
        .iter()
        .max_by(|a, b| a.1.total_cmp(&b.1).then(b.2.total_cmp(&a.2)))
        .map(|&(id, _, _)| id)
}

/// All items whose screen positions fall inside a screen-space rectangle,
/// in input order. Used to resolve a marquee selection.
#[must_use]
pub fn items_in_rect(
    rect: Rect,
    positions: &[ItemPosition],
    world: WorldSize,
    transform: Transform,
) -> Vec<ItemId> {
    positions
        .iter()
        .filter(|p| rect.contains(item_screen(p, world, transform)))
        .map(|p| p.id)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const WORLD: WorldSize = WorldSize::new(1000.0, 500.0);
    const IDENTITY: Transform = Transform::IDENTITY;

    fn pos(id: u64, x_norm: f64, y_norm: f64, base_size: f64) -> ItemPosition {
        ItemPosition {
            id: ItemId(id),
            x_norm,
            y_norm,
            base_size,
        }
    }

    fn idle() -> HighlightAnimator {
        HighlightAnimator::new()
    }

    #[test]
    fn empty_space_returns_none() {
        let positions = [pos(1, 0.5, 0.5, 10.0)]; // screen (500, 250)
        assert_eq!(
            hit_test(
                Point::new(100.0, 100.0),
                &positions,
                WORLD,
                IDENTITY,
                1.0,
                &idle()
            ),
            None
        );
        assert_eq!(hit_test(Point::ZERO, &[], WORLD, IDENTITY, 1.0, &idle()), None);
    }

    #[test]
    fn largest_base_size_wins_over_nearer_smaller_dot() {
        // Small dot exactly at the pointer, big dot 6px away; both in reach.
        let positions = [pos(1, 0.5, 0.5, 6.0), pos(2, 0.506, 0.5, 18.0)];
        let hit = hit_test(
            Point::new(500.0, 250.0),
            &positions,
            WORLD,
            IDENTITY,
            1.0,
            &idle(),
        );
        assert_eq!(hit, Some(ItemId(2)));
    }

    #[test]
    fn nearest_wins_among_equal_sizes() {
        let positions = [pos(1, 0.5, 0.5, 10.0), pos(2, 0.508, 0.5, 10.0)];
        let hit = hit_test(
            Point::new(501.0, 250.0),
            &positions,
            WORLD,
            IDENTITY,
            1.0,
            &idle(),
        );
        assert_eq!(hit, Some(ItemId(1)));
    }

    #[test]
    fn buffer_shrinks_with_spread_compression() {
        // Dot at (500, 250), radius 2. Pointer 7px away.
        let positions = [pos(1, 0.5, 0.5, 4.0)];
        let pointer = Point::new(507.0, 250.0);
        // Full spread: reach = 2 + 6 = 8 >= 7, hit.
        assert_eq!(
            hit_test(pointer, &positions, WORLD, IDENTITY, 1.0, &idle()),
            Some(ItemId(1))
        );
        // Collapsed spread: reach = 2 + 6*0.35 = 4.1 < 7, miss.
        assert_eq!(
            hit_test(pointer, &positions, WORLD, IDENTITY, 0.0, &idle()),
            None
        );
    }

    #[test]
    fn highlighted_dot_grows_its_pick_target_with_its_drawn_radius() {
        // Dot base 8: idle reach = 4 + 6 = 10; fully highlighted the drawn
        // radius grows to 5.2, so the reach grows to 11.2.
        let positions = [pos(1, 0.5, 0.5, 8.0)];
        let pointer = Point::new(510.5, 250.0);
        assert_eq!(
            hit_test(pointer, &positions, WORLD, IDENTITY, 1.0, &idle()),
            None,
            "10.5px is out of reach while unlit"
        );

        let mut highlight = HighlightAnimator::new();
        highlight.set_focused(ItemId(1), true, 0.0);
        highlight.advance(1_000.0);
        assert_eq!(
            hit_test(pointer, &positions, WORLD, IDENTITY, 1.0, &highlight),
            Some(ItemId(1)),
            "the glowing dot is pickable at its boosted edge"
        );
    }

    #[test]
    fn rect_gathers_contained_items_in_order() {
        let positions = [
            pos(1, 0.1, 0.5, 8.0), // (100, 250)
            pos(2, 0.3, 0.5, 8.0), // (300, 250)
            pos(3, 0.9, 0.5, 8.0), // (900, 250)
        ];
        let rect = Rect::new(50.0, 200.0, 400.0, 300.0);
        assert_eq!(
            items_in_rect(rect, &positions, WORLD, IDENTITY),
            vec![ItemId(1), ItemId(2)]
        );
        assert!(items_in_rect(Rect::ZERO, &positions, WORLD, IDENTITY).is_empty());
    }
}
