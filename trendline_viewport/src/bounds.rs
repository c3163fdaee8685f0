// Copyright 2026 the Trendline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::transform::Transform;

/// Floor applied to the fit scale when inputs are degenerate.
const MIN_SCALE_FLOOR: f64 = 1e-4;

/// Overscroll cap as a fraction of the view width.
const OVERSCROLL_MAX_FRAC: f64 = 0.12;

/// Overscroll growth per unit of zoom above the fit scale, as a fraction of
/// the view width.
const OVERSCROLL_GROWTH_FRAC: f64 = 0.1;

/// The on-screen viewport rectangle, in CSS pixels, anchored at the origin.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ViewRect {
    /// Width in pixels.
    pub width: f64,
    /// Height in pixels.
    pub height: f64,
}

impl ViewRect {
    /// Creates a view rect.
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Fixed chrome around the plot area.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Padding {
    /// Left gutter.
    pub left: f64,
    /// Right gutter (wide: hosts park scrollbars/legends here).
    pub right: f64,
    /// Top padding below the header.
    pub top: f64,
    /// Bottom padding above the month labels.
    pub bottom: f64,
    /// Header band height at the top of the view.
    pub header: f64,
}

impl Default for Padding {
    fn default() -> Self {
        Self {
            left: 16.0,
            right: 60.0,
            top: 24.0,
            bottom: 24.0,
            header: 48.0,
        }
    }
}

impl Padding {
    /// Combined horizontal padding.
    #[must_use]
    pub fn horizontal(&self) -> f64 {
        self.left + self.right
    }

    /// Screen Y of the top content edge.
    #[must_use]
    pub fn content_top(&self) -> f64 {
        self.header + self.top
    }
}

/// World-plane dimensions in world pixels.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct WorldSize {
    /// World width (from the time-axis structure).
    pub width: f64,
    /// World height (the vertical span items are laid out over).
    pub height: f64,
}

impl WorldSize {
    /// Creates a world size.
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// The fit-to-width scale: the smallest scale the viewport ever allows.
///
/// `(view.width - horizontal padding) / world.width`, floored at a small
/// positive value so degenerate inputs (zero-size view, placeholder world)
/// can never produce zero, negative, or non-finite scales.
#[must_use]
pub fn min_scale(view: ViewRect, padding: &Padding, world: WorldSize) -> f64 {
    let usable = view.width - padding.horizontal();
    if usable <= 0.0 || world.width <= 0.0 {
        return MIN_SCALE_FLOOR;
    }
    (usable / world.width).max(MIN_SCALE_FLOOR)
}

/// The fit transform: minimum scale, content aligned to the left gutter and
/// the top content edge. Idempotent for unchanged inputs.
#[must_use]
pub fn auto_fit(view: ViewRect, padding: &Padding, world: WorldSize) -> Transform {
    Transform::new(
        min_scale(view, padding, world),
        padding.left,
        padding.content_top(),
    )
}

/// Clamps a transform so the implied visible world rectangle stays within
/// content bounds plus a bounded overscroll.
///
/// - The scale is clamped to at least the fit scale.
/// - X gets a **dynamic overscroll** that grows with zoom above the fit
///   scale, so edge items can be centered when zoomed in while the view is
///   rigid at fit scale.
/// - Y snaps to the top content edge while the scaled world is shorter than
///   the available height, and clamps between top and bottom bounds once it
///   is taller.
#[must_use]
pub fn clamp_transform(
    t: Transform,
    view: ViewRect,
    padding: &Padding,
    world: WorldSize,
) -> Transform {
    let fit = min_scale(view, padding, world);
    let scale = if t.scale.is_finite() { t.scale.max(fit) } else { fit };

    let overscroll = (OVERSCROLL_MAX_FRAC * view.width)
        .min(((scale / fit - 1.0) * OVERSCROLL_GROWTH_FRAC * view.width).max(0.0));
    let x_lo = view.width - world.width * scale - padding.right - overscroll;
    let x_hi = padding.left + overscroll;
    let offset_x = if t.offset_x.is_finite() {
        t.offset_x.clamp(x_lo.min(x_hi), x_hi.max(x_lo))
    } else {
        x_hi.min(x_lo)
    };

    let top = padding.content_top();
    let available_h = view.height - top - padding.bottom;
    let scaled_h = world.height * scale;
    let offset_y = if scaled_h <= available_h || available_h <= 0.0 {
        top
    } else {
        let y_lo = view.height - scaled_h - padding.bottom;
        if t.offset_y.is_finite() {
            t.offset_y.clamp(y_lo.min(top), top.max(y_lo))
        } else {
            top
        }
    };

    Transform::new(scale, offset_x, offset_y)
}
