// Copyright 2026 the Trendline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! End-to-end gesture scenarios: marquee selection feeding zoom-to-rect, and
//! the hotkey surface.

use kurbo::{Point, Rect, Vec2};
use trendline_interact::{
    Hotkey, Modifiers, PointerController, PointerUpOutcome, SelectionPhase, SelectionState,
    apply_hotkey, fit_rect_transform,
};
use trendline_layout::ItemId;
use trendline_viewport::{Padding, ViewRect, ViewportController, ViewportLimits, WorldSize};

fn controller() -> ViewportController {
    ViewportController::new(
        ViewRect::new(1200.0, 700.0),
        Padding::default(),
        WorldSize::new(3000.0, 640.0),
        ViewportLimits::default(),
    )
}

fn settle(vp: &mut ViewportController) {
    let mut guard = 0;
    while vp.advance(16.7) {
        guard += 1;
        assert!(guard < 1000, "animation must settle");
    }
}

#[test]
fn marquee_release_zooms_to_frame_the_covered_items() {
    let mut vp = controller();
    let mut ptr = PointerController::new();

    // Two items in world space; both visible at the fit transform.
    let item_a = Point::new(1000.0, 300.0);
    let item_b = Point::new(1400.0, 360.0);
    let t0 = vp.transform();
    let (sa, sb) = (t0.world_to_screen(item_a), t0.world_to_screen(item_b));

    // Shift-drag a marquee that covers both.
    let down = Point::new(sa.x - 10.0, sa.y - 10.0);
    let up = Point::new(sb.x + 10.0, sb.y + 10.0);
    ptr.on_pointer_down(&mut vp, down, Modifiers::SHIFT);
    ptr.on_pointer_move(&mut vp, up);
    let rect = match ptr.on_pointer_up(&mut vp, up, 0.0) {
        PointerUpOutcome::RectSelected(rect) => rect,
        other => panic!("expected a rect selection, got {other:?}"),
    };

    // Convert to world space and animate to the framing transform.
    let world_rect = Rect::from_points(
        vp.transform().screen_to_world(Point::new(rect.x0, rect.y0)),
        vp.transform().screen_to_world(Point::new(rect.x1, rect.y1)),
    );
    let target = fit_rect_transform(
        world_rect,
        vp.view(),
        vp.padding(),
        vp.min_scale(),
        vp.max_scale(),
    );
    vp.animate_to(target);
    settle(&mut vp);

    let t = vp.transform();
    assert!(t.scale <= vp.max_scale() + 1e-12);
    assert!(t.scale > t0.scale, "framing a sub-rect zooms in");
    for item in [item_a, item_b] {
        let s = t.world_to_screen(item);
        assert!(s.x >= 0.0 && s.x <= 1200.0, "item on-screen in x: {s:?}");
        assert!(s.y >= 0.0 && s.y <= 700.0, "item on-screen in y: {s:?}");
    }
}

#[test]
fn marquee_hit_set_drives_the_selection_machine() {
    let mut vp = controller();
    let mut ptr = PointerController::new();
    let mut sel = SelectionState::new();

    ptr.on_pointer_down(&mut vp, Point::new(200.0, 200.0), Modifiers::SHIFT);
    sel.begin_rect();
    ptr.on_pointer_move(&mut vp, Point::new(500.0, 450.0));
    let PointerUpOutcome::RectSelected(rect) =
        ptr.on_pointer_up(&mut vp, Point::new(500.0, 450.0), 0.0)
    else {
        panic!("expected a rect selection");
    };

    // Hit-testing happens upstream; feed the resulting set back in.
    let confirm = sel
        .finish_rect(vec![ItemId(11), ItemId(12)], Point::new(rect.x1, rect.y1))
        .expect("non-empty hit-set");
    assert_eq!(confirm.anchor_screen, Point::new(500.0, 450.0));
    assert_eq!(sel.phase(), SelectionPhase::Selected);

    // Panning afterwards docks the confirm affordance but keeps the set.
    ptr.on_pointer_down(&mut vp, Point::new(600.0, 300.0), Modifiers::empty());
    ptr.on_pointer_move(&mut vp, Point::new(560.0, 300.0));
    sel.note_view_changed();
    assert!(sel.is_docked());
    assert_eq!(sel.ids(), &[ItemId(11), ItemId(12)]);
}

#[test]
fn hotkeys_fit_and_clear() {
    let mut vp = controller();
    let mut ptr = PointerController::new();
    let mut sel = SelectionState::new();

    ptr.on_wheel(
        &mut vp,
        Point::new(600.0, 350.0),
        Vec2::new(0.0, -400.0),
        Modifiers::META,
    );
    settle(&mut vp);
    sel.select_item(ItemId(1), Point::new(600.0, 350.0));

    apply_hotkey(Hotkey::ClearSelection, &mut vp, &mut sel);
    assert!(sel.is_empty());

    apply_hotkey(Hotkey::FitToView, &mut vp, &mut sel);
    settle(&mut vp);
    assert!((vp.transform().scale - vp.min_scale()).abs() < 1e-12);
}
