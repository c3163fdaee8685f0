// Copyright 2026 the Trendline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Point, Vec2};

use crate::animator::TransformAnimator;
use crate::bounds::{Padding, ViewRect, WorldSize, auto_fit, clamp_transform, min_scale};
use crate::persist::{ContentHash, PersistGate, ViewportConfig, ViewportStore};
use crate::transform::Transform;

/// Zoom ceiling and fit-maintenance tolerance.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ViewportLimits {
    /// Largest allowed zoom factor.
    pub max_scale: f64,
    /// Relative tolerance within which the view counts as "roughly fitted"
    /// for the fit-maintenance correction.
    pub fit_tolerance: f64,
}

impl Default for ViewportLimits {
    fn default() -> Self {
        Self {
            max_scale: 8.0,
            fit_tolerance: 0.05,
        }
    }
}

/// A request to keep a world X fraction pinned to a screen X across the next
/// world-size change.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct AnchorRequest {
    /// World X as a fraction of world width, `[0, 1]`.
    pub world_x_frac: f64,
    /// Screen X the fraction should stay under.
    pub screen_x: f64,
}

/// Single owner of the viewport transform.
///
/// All transform movement goes through this controller: interaction calls,
/// the animation loop, context switches, and the structural-change
/// reconciliation. Nothing else mutates the transform, so a frame always
/// observes a consistent pairing of structure and transform.
///
/// ## Reconciliation order
///
/// When the world dimensions change under an unchanged content hash (the
/// filter narrowed, so density changed the world width), **at most one**
/// correction applies, in strict priority order:
///
/// 1. an explicit pending [`AnchorRequest`], if present;
/// 2. fit maintenance: if the view was roughly fitted before the change,
///    re-fit to the new dimensions;
/// 3. ratio preservation: keep the same relative time-range visible.
///
/// Immediately after a restore from storage this correction is skipped
/// exactly once, preventing feedback drift between the restore and the
/// ratio-preservation pass.
#[derive(Clone, Debug)]
pub struct ViewportController {
    view: ViewRect,
    padding: Padding,
    world: WorldSize,
    limits: ViewportLimits,
    animator: TransformAnimator,
    persist: PersistGate,
    hash: Option<ContentHash>,
    pending_anchor: Option<AnchorRequest>,
    skip_correction_once: bool,
}

impl ViewportController {
    /// Creates a controller starting at the fit transform.
    #[must_use]
    pub fn new(
        view: ViewRect,
        padding: Padding,
        world: WorldSize,
        limits: ViewportLimits,
    ) -> Self {
        let fit = auto_fit(view, &padding, world);
        Self {
            view,
            padding,
            world,
            limits,
            animator: TransformAnimator::new(fit),
            persist: PersistGate::new(),
            hash: None,
            pending_anchor: None,
            skip_correction_once: false,
        }
    }

    /// The live transform.
    #[must_use]
    pub fn transform(&self) -> Transform {
        self.animator.current()
    }

    /// The animation target.
    #[must_use]
    pub fn target(&self) -> Transform {
        self.animator.target()
    }

    /// The fit-to-width scale for the current view and world.
    #[must_use]
    pub fn min_scale(&self) -> f64 {
        min_scale(self.view, &self.padding, self.world)
    }

    /// The zoom ceiling.
    #[must_use]
    pub fn max_scale(&self) -> f64 {
        self.limits.max_scale
    }

    /// The padding configuration.
    #[must_use]
    pub fn padding(&self) -> &Padding {
        &self.padding
    }

    /// The current world dimensions.
    #[must_use]
    pub fn world(&self) -> WorldSize {
        self.world
    }

    /// The current view rectangle.
    #[must_use]
    pub fn view(&self) -> ViewRect {
        self.view
    }

    /// Resizes the view rectangle, re-clamping the transform.
    pub fn set_view_rect(&mut self, view: ViewRect) {
        if self.view == view {
            return;
        }
        self.view = view;
        let current = self.clamp(self.animator.current());
        let target = self.clamp(self.animator.target());
        self.animator.jump_to(current);
        self.animator.animate_to(target);
    }

    /// Switches the content context: restore the saved transform verbatim if
    /// one exists, else auto-fit. A successful restore arms the one-shot
    /// correction guard.
    pub fn set_content_hash(&mut self, hash: ContentHash, store: &impl ViewportStore) {
        if self.hash == Some(hash) {
            return;
        }
        self.hash = Some(hash);
        self.pending_anchor = None;

        match store.get(hash) {
            Some(config) => {
                let restored = self.clamp(config.into());
                self.animator.jump_to(restored);
                self.persist.reset_baseline(restored);
                self.skip_correction_once = true;
            }
            None => {
                let fit = self.fit_transform();
                self.animator.jump_to(fit);
                self.persist.reset_baseline(fit);
                self.skip_correction_once = false;
            }
        }
    }

    /// The active content hash, if a context was set.
    #[must_use]
    pub fn content_hash(&self) -> Option<ContentHash> {
        self.hash
    }

    /// Queues an anchor to preserve across the next world-size change.
    pub fn request_anchor(&mut self, request: AnchorRequest) {
        self.pending_anchor = Some(request);
    }

    /// Applies new world dimensions under an unchanged content hash,
    /// running the one-correction reconciliation chain.
    pub fn set_world_size(&mut self, world: WorldSize) {
        if self.world == world {
            return;
        }
        let old_world = self.world;
        let old_fit = self.min_scale();
        let before = self.animator.current();
        self.world = world;

        if self.skip_correction_once {
            self.skip_correction_once = false;
            self.pending_anchor = None;
            let clamped = self.clamp(before);
            self.animator.jump_to(clamped);
            return;
        }

        let corrected = if let Some(anchor) = self.pending_anchor.take() {
            // Keep the requested world fraction under its screen point.
            let world_x = anchor.world_x_frac.clamp(0.0, 1.0) * world.width;
            Transform::new(
                before.scale,
                anchor.screen_x - world_x * before.scale,
                before.offset_y,
            )
        } else if (before.scale / old_fit - 1.0).abs() <= self.limits.fit_tolerance {
            // The view was roughly fitted: keep it fitted to the new world.
            self.fit_transform()
        } else {
            // Default: preserve the visible relative time-range.
            ratio_preserved(before, old_world, world, &self.padding)
        };

        let clamped = self.clamp(corrected);
        self.animator.jump_to(clamped);
    }

    /// Immediate 1:1 pan (drag); moves live and target together.
    pub fn pan_immediate(&mut self, delta: Vec2) {
        let t = self.clamp(self.animator.current().translated(delta));
        self.animator.jump_to(t);
    }

    /// Animated pan (wheel scroll); cancels any in-flight animation first.
    pub fn pan_target(&mut self, delta: Vec2) {
        self.animator.interrupt();
        let t = self.clamp(self.animator.target().translated(delta));
        self.animator.animate_to(t);
    }

    /// Cursor-anchored zoom: the world point under `anchor` stays fixed.
    ///
    /// Cancels any in-flight animation, then eases to the new target.
    pub fn zoom_about(&mut self, anchor: Point, factor: f64) {
        if !(factor.is_finite() && factor > 0.0) {
            return;
        }
        self.animator.interrupt();
        let start = self.animator.current();
        let new_scale = (start.scale * factor).clamp(self.min_scale(), self.limits.max_scale);
        let world = start.screen_to_world(anchor);
        let t = Transform::new(
            new_scale,
            anchor.x - world.x * new_scale,
            anchor.y - world.y * new_scale,
        );
        self.animator.animate_to(self.clamp(t));
    }

    /// Centers a world point at `scale`, animated.
    pub fn zoom_to_point(&mut self, world_point: Point, scale: f64) {
        let scale = scale.clamp(self.min_scale(), self.limits.max_scale);
        let center = Point::new(self.view.width * 0.5, self.view.height * 0.5);
        let t = Transform::new(
            scale,
            center.x - world_point.x * scale,
            center.y - world_point.y * scale,
        );
        self.animator.animate_to(self.clamp(t));
    }

    /// Eases to an arbitrary (clamped) transform; used for zoom-to-rect.
    pub fn animate_to(&mut self, target: Transform) {
        let t = self.clamp(target);
        self.animator.animate_to(t);
    }

    /// Animated manual fit-to-view (hotkey surface).
    pub fn fit(&mut self) {
        let fit = self.fit_transform();
        self.animator.animate_to(fit);
    }

    /// Cancels the in-flight animation, syncing target to the live value.
    pub fn interrupt(&mut self) {
        self.animator.interrupt();
    }

    /// Advances the animation; returns `true` while still moving.
    pub fn advance(&mut self, dt_ms: f64) -> bool {
        self.animator.advance(dt_ms)
    }

    /// Observes the live transform for persistence; returns a keyed config
    /// once it has settled and meaningfully changed.
    pub fn poll_persist(&mut self, now_ms: f64) -> Option<(ContentHash, ViewportConfig)> {
        let hash = self.hash?;
        let settled = self.persist.poll(now_ms, self.animator.current())?;
        Some((hash, settled.into()))
    }

    /// Snapshot of the controller state for debugging and inspection.
    #[must_use]
    pub fn debug_info(&self) -> ViewportDebugInfo {
        ViewportDebugInfo {
            view: self.view,
            world: self.world,
            min_scale: self.min_scale(),
            max_scale: self.limits.max_scale,
            current: self.animator.current(),
            target: self.animator.target(),
            content_hash: self.hash,
            pending_anchor: self.pending_anchor,
            correction_guard_armed: self.skip_correction_once,
        }
    }

    fn fit_transform(&self) -> Transform {
        auto_fit(self.view, &self.padding, self.world)
    }

    fn clamp(&self, t: Transform) -> Transform {
        let limited = Transform::new(
            t.scale.min(self.limits.max_scale),
            t.offset_x,
            t.offset_y,
        );
        clamp_transform(limited, self.view, &self.padding, self.world)
    }
}

/// Keeps the same relative time-range visible across a world-width change.
fn ratio_preserved(
    before: Transform,
    old_world: WorldSize,
    new_world: WorldSize,
    padding: &Padding,
) -> Transform {
    if old_world.width <= 0.0 || new_world.width <= 0.0 || before.scale <= 0.0 {
        return before;
    }

    // Same visible fraction of the world: scale inversely with width.
    let new_scale = before.scale * old_world.width / new_world.width;

    // Keep the world fraction at the left content edge in place.
    let left = padding.left;
    let frac_x = ((left - before.offset_x) / before.scale) / old_world.width;
    let offset_x = left - frac_x * new_world.width * new_scale;

    let top = padding.content_top();
    let offset_y = if old_world.height > 0.0 && new_world.height > 0.0 {
        let frac_y = ((top - before.offset_y) / before.scale) / old_world.height;
        top - frac_y * new_world.height * new_scale
    } else {
        before.offset_y
    };

    Transform::new(new_scale, offset_x, offset_y)
}

/// Debug snapshot of a [`ViewportController`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ViewportDebugInfo {
    /// Current view rectangle.
    pub view: ViewRect,
    /// Current world dimensions.
    pub world: WorldSize,
    /// Fit-to-width scale.
    pub min_scale: f64,
    /// Zoom ceiling.
    pub max_scale: f64,
    /// Live transform.
    pub current: Transform,
    /// Animation target.
    pub target: Transform,
    /// Active content hash.
    pub content_hash: Option<ContentHash>,
    /// Pending anchor request, if any.
    pub pending_anchor: Option<AnchorRequest>,
    /// Whether the one-shot post-restore guard is armed.
    pub correction_guard_armed: bool,
}
