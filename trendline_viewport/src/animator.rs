// Copyright 2026 the Trendline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::transform::Transform;

/// Per-reference-frame fraction of the remaining distance covered.
pub const SMOOTH: f64 = 0.15;

/// Scale distance below which the animation snaps to its target.
pub const ANIM_EPS_SCALE: f64 = 1e-4;

/// Offset distance below which the animation snaps to its target.
pub const ANIM_EPS_OFFSET: f64 = 0.1;

/// Reference frame duration the smoothing factor is normalized to.
const REF_FRAME_MS: f64 = 16.667;

/// Smooths the live transform toward a target.
///
/// Each [`TransformAnimator::advance`] moves `current` a fixed fraction of
/// the remaining distance toward `target` (normalized to a 60Hz reference
/// frame, so hosts on any tick rate converge identically). When the distance
/// drops under the epsilons the animator snaps exactly to the target and
/// reports rest, letting the host stop its frame loop; there is no idle work
/// at rest.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TransformAnimator {
    current: Transform,
    target: Transform,
}

impl TransformAnimator {
    /// Creates an animator at rest on `initial`.
    #[must_use]
    pub const fn new(initial: Transform) -> Self {
        Self {
            current: initial,
            target: initial,
        }
    }

    /// The live transform.
    #[must_use]
    pub fn current(&self) -> Transform {
        self.current
    }

    /// The animation target.
    #[must_use]
    pub fn target(&self) -> Transform {
        self.target
    }

    /// `true` when the animator has reached its target.
    #[must_use]
    pub fn is_resting(&self) -> bool {
        self.current == self.target
    }

    /// Sets a new target to ease toward.
    pub fn animate_to(&mut self, target: Transform) {
        self.target = target;
    }

    /// Moves both current and target immediately; no easing.
    pub fn jump_to(&mut self, transform: Transform) {
        self.current = transform;
        self.target = transform;
    }

    /// Cancels the in-flight animation by syncing the target to the live
    /// value, so a grab starts from the visually-current position.
    pub fn interrupt(&mut self) {
        self.target = self.current;
    }

    /// Advances the animation by `dt_ms`; returns `true` while still moving.
    pub fn advance(&mut self, dt_ms: f64) -> bool {
        if self.is_resting() {
            return false;
        }

        let within_eps = (self.current.scale - self.target.scale).abs() < ANIM_EPS_SCALE
            && (self.current.offset_x - self.target.offset_x).abs() < ANIM_EPS_OFFSET
            && (self.current.offset_y - self.target.offset_y).abs() < ANIM_EPS_OFFSET;
        if within_eps {
            self.current = self.target;
            return false;
        }

        let frames = (dt_ms.max(0.0) / REF_FRAME_MS).min(10.0);
        let factor = 1.0 - (1.0 - SMOOTH).powf(frames);
        self.current = self.current.lerp(&self.target, factor);
        true
    }
}
