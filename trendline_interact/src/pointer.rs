// Copyright 2026 the Trendline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Point, Rect, Vec2};

use trendline_viewport::ViewportController;

/// Travel (in screen pixels) past which a pending pan becomes a real drag.
pub const DRAG_THRESHOLD_PX: f64 = 5.0;

/// Cooldown after a pan ends during which toolkit-synthesized clicks are
/// suppressed.
pub const CLICK_SUPPRESS_MS: f64 = 150.0;

/// Wheel-to-zoom rate; a wheel delta of `d` maps to a factor of
/// `exp(-d * WHEEL_ZOOM_RATE)`.
pub const WHEEL_ZOOM_RATE: f64 = 0.0015;

bitflags::bitflags! {
    /// Keyboard modifiers held during a pointer or wheel event.
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// Shift key.
        const SHIFT = 1 << 0;
        /// Control key.
        const CTRL = 1 << 1;
        /// Alt / Option key.
        const ALT = 1 << 2;
        /// Meta / Command / Windows key.
        const META = 1 << 3;
    }
}

impl Modifiers {
    /// True when a zoom-routing modifier (ctrl or meta) is held.
    #[must_use]
    pub fn zooms(self) -> bool {
        self.intersects(Self::CTRL | Self::META)
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
enum Phase {
    Idle,
    /// Button is down but travel has not crossed the drag threshold.
    PanPending { anchor: Point, last: Point },
    Panning { last: Point },
    RectSelecting { anchor: Point, current: Point },
}

/// What a pointer release amounted to.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum PointerUpOutcome {
    /// Nothing actionable (end of a pan, or a release with no prior down).
    None,
    /// A click at the given screen position; hit-test it upstream.
    Click(Point),
    /// A rectangle selection covering the given screen rect.
    RectSelected(Rect),
}

/// Pointer gesture state machine.
///
/// Feed it raw pointer events; it drives the viewport for pans and zooms and
/// reports clicks and rectangle selections through [`PointerUpOutcome`].
/// Timestamps are caller-supplied milliseconds on any monotonic scale.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PointerController {
    phase: Phase,
    pan_ended_at_ms: Option<f64>,
}

impl PointerController {
    /// Creates an idle controller.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            phase: Phase::Idle,
            pan_ended_at_ms: None,
        }
    }

    /// Handles a primary-button press.
    ///
    /// Shift routes the gesture to rectangle selection; otherwise a pan is
    /// armed but not yet active. Any in-flight viewport animation is cancelled
    /// so the grab starts from the visually-current transform.
    pub fn on_pointer_down(
        &mut self,
        viewport: &mut ViewportController,
        pos: Point,
        modifiers: Modifiers,
    ) {
        viewport.interrupt();
        self.phase = if modifiers.contains(Modifiers::SHIFT) {
            Phase::RectSelecting {
                anchor: pos,
                current: pos,
            }
        } else {
            Phase::PanPending {
                anchor: pos,
                last: pos,
            }
        };
    }

    /// Handles pointer movement while the button is down. Moves with no
    /// gesture in progress are ignored.
    pub fn on_pointer_move(&mut self, viewport: &mut ViewportController, pos: Point) {
        match self.phase {
            Phase::Idle => {}
            Phase::PanPending { anchor, .. } => {
                if (pos - anchor).hypot() > DRAG_THRESHOLD_PX {
                    // Promote, applying the full travel so no motion is lost.
                    viewport.pan_immediate(pos - anchor);
                    self.phase = Phase::Panning { last: pos };
                } else {
                    self.phase = Phase::PanPending { anchor, last: pos };
                }
            }
            Phase::Panning { last } => {
                viewport.pan_immediate(pos - last);
                self.phase = Phase::Panning { last: pos };
            }
            Phase::RectSelecting { anchor, .. } => {
                self.phase = Phase::RectSelecting {
                    anchor,
                    current: pos,
                };
            }
        }
    }

    /// Handles the primary-button release and reports what the gesture was.
    ///
    /// A release inside the drag threshold is a click. A release that ends a
    /// pan records a pan-end timestamp so [`Self::click_suppressed`] can veto
    /// the click event most toolkits deliver right afterwards.
    pub fn on_pointer_up(
        &mut self,
        _viewport: &mut ViewportController,
        pos: Point,
        now_ms: f64,
    ) -> PointerUpOutcome {
        let phase = core::mem::replace(&mut self.phase, Phase::Idle);
        match phase {
            Phase::Idle => PointerUpOutcome::None,
            Phase::PanPending { .. } => PointerUpOutcome::Click(pos),
            Phase::Panning { .. } => {
                self.pan_ended_at_ms = Some(now_ms);
                PointerUpOutcome::None
            }
            Phase::RectSelecting { anchor, .. } => {
                PointerUpOutcome::RectSelected(Rect::from_points(anchor, pos))
            }
        }
    }

    /// Handles a wheel event at `pos`.
    ///
    /// With ctrl or meta held the wheel zooms about the cursor; otherwise it
    /// pans directly by the delta through the easing animator. Callers pass
    /// the delta in the direction they want the content to move.
    pub fn on_wheel(
        &mut self,
        viewport: &mut ViewportController,
        pos: Point,
        delta: Vec2,
        modifiers: Modifiers,
    ) {
        if modifiers.zooms() {
            viewport.zoom_about(pos, (-delta.y * WHEEL_ZOOM_RATE).exp());
        } else {
            viewport.pan_target(delta);
        }
    }

    /// Abandons any in-progress gesture (pointer capture lost, window blur).
    pub fn cancel(&mut self) {
        self.phase = Phase::Idle;
    }

    /// True when a click arriving at `now_ms` should be ignored because a pan
    /// just ended.
    #[must_use]
    pub fn click_suppressed(&self, now_ms: f64) -> bool {
        self.pan_ended_at_ms
            .is_some_and(|ended| now_ms - ended < CLICK_SUPPRESS_MS)
    }

    /// The live marquee rectangle while a rect selection is in progress.
    #[must_use]
    pub fn selection_rect(&self) -> Option<Rect> {
        match self.phase {
            Phase::RectSelecting { anchor, current } => Some(Rect::from_points(anchor, current)),
            _ => None,
        }
    }

    /// True while an active (past-threshold) pan drag is in progress.
    #[must_use]
    pub fn is_panning(&self) -> bool {
        matches!(self.phase, Phase::Panning { .. })
    }
}

impl Default for PointerController {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trendline_viewport::{Padding, ViewRect, ViewportController, ViewportLimits, WorldSize};

    fn viewport() -> ViewportController {
        ViewportController::new(
            ViewRect::new(1200.0, 700.0),
            Padding::default(),
            WorldSize::new(3000.0, 640.0),
            ViewportLimits::default(),
        )
    }

    fn zoomed_viewport() -> ViewportController {
        let mut vp = viewport();
        vp.zoom_about(Point::new(600.0, 350.0), 2.0);
        while vp.advance(16.7) {}
        vp
    }

    #[test]
    fn sub_threshold_release_is_a_click() {
        let mut vp = viewport();
        let mut ptr = PointerController::new();
        let before = vp.transform();

        ptr.on_pointer_down(&mut vp, Point::new(400.0, 300.0), Modifiers::empty());
        ptr.on_pointer_move(&mut vp, Point::new(403.0, 302.0));
        let outcome = ptr.on_pointer_up(&mut vp, Point::new(403.0, 302.0), 100.0);

        assert_eq!(outcome, PointerUpOutcome::Click(Point::new(403.0, 302.0)));
        assert_eq!(vp.transform(), before, "no pan under the threshold");
        assert!(!ptr.click_suppressed(100.0));
    }

    #[test]
    fn crossing_the_threshold_pans_one_to_one() {
        let mut vp = zoomed_viewport();
        let mut ptr = PointerController::new();
        let before = vp.transform();

        ptr.on_pointer_down(&mut vp, Point::new(400.0, 300.0), Modifiers::empty());
        // 6px of travel promotes to panning and applies the whole delta.
        ptr.on_pointer_move(&mut vp, Point::new(394.0, 300.0));
        assert!(ptr.is_panning());
        assert!((vp.transform().offset_x - (before.offset_x - 6.0)).abs() < 1e-9);

        // Further motion is applied incrementally.
        ptr.on_pointer_move(&mut vp, Point::new(390.0, 300.0));
        assert!((vp.transform().offset_x - (before.offset_x - 10.0)).abs() < 1e-9);
    }

    #[test]
    fn pan_end_suppresses_clicks_within_the_cooldown() {
        let mut vp = zoomed_viewport();
        let mut ptr = PointerController::new();

        ptr.on_pointer_down(&mut vp, Point::new(400.0, 300.0), Modifiers::empty());
        ptr.on_pointer_move(&mut vp, Point::new(380.0, 300.0));
        let outcome = ptr.on_pointer_up(&mut vp, Point::new(380.0, 300.0), 1_000.0);

        assert_eq!(outcome, PointerUpOutcome::None);
        assert!(ptr.click_suppressed(1_000.0));
        assert!(ptr.click_suppressed(1_149.0));
        assert!(!ptr.click_suppressed(1_150.0));
    }

    #[test]
    fn shift_drag_produces_a_selection_rect() {
        let mut vp = viewport();
        let mut ptr = PointerController::new();
        let before = vp.transform();

        ptr.on_pointer_down(&mut vp, Point::new(500.0, 200.0), Modifiers::SHIFT);
        ptr.on_pointer_move(&mut vp, Point::new(300.0, 400.0));
        assert_eq!(
            ptr.selection_rect(),
            Some(Rect::new(300.0, 200.0, 500.0, 400.0))
        );
        let outcome = ptr.on_pointer_up(&mut vp, Point::new(300.0, 400.0), 0.0);

        assert_eq!(
            outcome,
            PointerUpOutcome::RectSelected(Rect::new(300.0, 200.0, 500.0, 400.0))
        );
        assert_eq!(vp.transform(), before, "rect selection never pans");
        assert_eq!(ptr.selection_rect(), None);
    }

    #[test]
    fn pointer_down_interrupts_a_running_animation() {
        let mut vp = viewport();
        vp.zoom_about(Point::new(600.0, 350.0), 3.0);
        assert_ne!(vp.transform(), vp.target());

        let mut ptr = PointerController::new();
        ptr.on_pointer_down(&mut vp, Point::new(600.0, 350.0), Modifiers::empty());
        assert_eq!(vp.transform(), vp.target(), "animation halted at grab");
    }

    #[test]
    fn wheel_with_modifier_zooms_about_the_cursor() {
        let mut vp = viewport();
        let mut ptr = PointerController::new();
        let anchor = Point::new(600.0, 350.0);
        let world_anchor = vp.transform().screen_to_world(anchor);

        ptr.on_wheel(&mut vp, anchor, Vec2::new(0.0, -240.0), Modifiers::CTRL);
        let target = vp.target();
        let expected = vp.transform().scale * (240.0 * WHEEL_ZOOM_RATE).exp();
        assert!((target.scale - expected).abs() < 1e-12);

        // The world point under the cursor stays under the cursor in X.
        let after = target.world_to_screen(world_anchor);
        assert!((after.x - anchor.x).abs() < 1e-9);
    }

    #[test]
    fn plain_wheel_pans_by_the_delta() {
        let mut vp = zoomed_viewport();
        let mut ptr = PointerController::new();
        let before = vp.target();

        ptr.on_wheel(
            &mut vp,
            Point::new(600.0, 350.0),
            Vec2::new(-120.0, 0.0),
            Modifiers::empty(),
        );
        assert!((vp.target().offset_x - (before.offset_x - 120.0)).abs() < 1e-9);
        assert_eq!(vp.target().scale, before.scale);
    }

    #[test]
    fn cancel_abandons_the_gesture() {
        let mut vp = viewport();
        let mut ptr = PointerController::new();
        ptr.on_pointer_down(&mut vp, Point::new(100.0, 100.0), Modifiers::SHIFT);
        ptr.cancel();
        assert_eq!(ptr.selection_rect(), None);
        assert_eq!(
            ptr.on_pointer_up(&mut vp, Point::new(100.0, 100.0), 0.0),
            PointerUpOutcome::None
        );
    }
}
