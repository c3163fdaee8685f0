// Copyright 2026 the Trendline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::Rect;

use trendline_viewport::{Padding, Transform, ViewRect};

/// Breathing room kept around a zoomed-to rectangle, in screen pixels.
pub const RECT_FIT_MARGIN_PX: f64 = 40.0;

/// Computes the transform that frames `world_rect` inside the view.
///
/// The rect is scaled to fill the padded content area minus
/// [`RECT_FIT_MARGIN_PX`] on each side, clamped to `[min_scale, max_scale]`,
/// and centered. Degenerate rects (zero or negative extent, non-finite
/// coordinates) fall back to a max-zoom frame centered on the rect's origin.
#[must_use]
pub fn fit_rect_transform(
    world_rect: Rect,
    view: ViewRect,
    padding: &Padding,
    min_scale: f64,
    max_scale: f64,
) -> Transform {
    let avail_w = (view.width - padding.horizontal() - 2.0 * RECT_FIT_MARGIN_PX).max(1.0);
    let avail_h =
        (view.height - padding.content_top() - padding.bottom - 2.0 * RECT_FIT_MARGIN_PX).max(1.0);

    let (w, h) = (world_rect.width(), world_rect.height());
    let scale = if w.is_finite() && h.is_finite() && (w > 0.0 || h > 0.0) {
        let sx = if w > 0.0 { avail_w / w } else { f64::INFINITY };
        let sy = if h > 0.0 { avail_h / h } else { f64::INFINITY };
        sx.min(sy)
    } else {
        max_scale
    };
    let scale = scale.clamp(min_scale, max_scale);

    let center = world_rect.center();
    let cx = padding.left + (view.width - padding.horizontal()) / 2.0;
    let cy = padding.content_top() + (view.height - padding.content_top() - padding.bottom) / 2.0;
    Transform::new(scale, cx - center.x * scale, cy - center.y * scale)
}
