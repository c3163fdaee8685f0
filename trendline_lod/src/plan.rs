// Copyright 2026 the Trendline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Point, Rect};
use peniko::{Brush, Color, ColorStop, ColorStops, Extend, Gradient, GradientKind,
    RadialGradientPosition};

use trendline_layout::{ItemId, ItemPosition};
use trendline_viewport::{Transform, ViewRect, WorldSize};

use crate::highlight::HighlightAnimator;

/// Scale at which rendering switches from canvas dots to rich nodes.
pub const LOD_THRESHOLD: f64 = 1.2;

/// Extra screen margin kept around the viewport when culling, so items
/// sliding in during a pan are already drawn.
pub const CULL_BUFFER_PX: f64 = 64.0;

/// Stroke width of the focus ring, in CSS pixels.
const RING_WIDTH_PX: f64 = 2.0;

/// Glow radius as a multiple of the dot radius at full highlight.
const GLOW_RADIUS_FACTOR: f64 = 3.0;

/// Additional dot scale at full highlight. Shared with hit-testing so the
/// pick target grows with the drawn dot.
pub(crate) const FOCUS_SCALE_BOOST: f64 = 0.3;

/// Additional brightness at full highlight.
const FOCUS_BRIGHTNESS_BOOST: f64 = 0.25;

/// Which render strategy the current zoom calls for.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LodMode {
    /// Cheap canvas dots; thousands of items stay interactive.
    Dots,
    /// Rich per-item nodes; few enough items are visible at this zoom.
    Nodes,
}

impl LodMode {
    /// Picks the strategy for a zoom factor.
    #[must_use]
    pub fn for_scale(scale: f64) -> Self {
        if scale < LOD_THRESHOLD {
            Self::Dots
        } else {
            Self::Nodes
        }
    }
}

/// Colors used by the dot pass.
#[derive(Clone, Debug, PartialEq)]
pub struct DotStyle {
    /// Fill of non-focused dots.
    pub base: Color,
    /// Fill of focused dots at full highlight.
    pub focused: Color,
    /// Center color of the radial glow behind focused dots.
    pub glow: Color,
}

impl Default for DotStyle {
    fn default() -> Self {
        Self {
            base: Color::from_rgb8(96, 165, 250),
            focused: Color::from_rgb8(251, 191, 36),
            glow: Color::from_rgb8(251, 191, 36),
        }
    }
}

/// One plain dot, in device pixels.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Dot {
    /// Item this dot draws.
    pub id: ItemId,
    /// Center, device pixels.
    pub center: Point,
    /// Radius, device pixels.
    pub radius: f64,
    /// Fill color.
    pub color: Color,
}

/// A focused dot with its highlight decoration, drawn in the second pass.
#[derive(Clone, Debug)]
pub struct FocusDot {
    /// The boosted dot itself.
    pub dot: Dot,
    /// Highlight progress in `[0, 1]` that produced the decoration.
    pub progress: f64,
    /// Radial glow brush centered on the dot.
    pub glow: Brush,
    /// Ring stroke width, device pixels.
    pub ring_width: f64,
    /// Multiplicative brightness boost for the fill.
    pub brightness: f64,
}

/// The canvas draw plan: pass 1 then pass 2, already culled and scaled for
/// the device pixel ratio.
///
/// Focused items live only in [`DotPlan::focus`], which is drawn after
/// [`DotPlan::base`]; the interactively-relevant item is never occluded by
/// its neighbors.
#[derive(Clone, Debug, Default)]
pub struct DotPlan {
    /// Pass 1: every visible non-focused dot.
    pub base: Vec<Dot>,
    /// Pass 2: focused dots with glow, ring, brightness and scale boost.
    pub focus: Vec<FocusDot>,
}

impl DotPlan {
    /// Builds the two-pass dot plan for the current frame.
    ///
    /// Items outside the view plus [`CULL_BUFFER_PX`] are culled. `dpr` is
    /// the device pixel ratio; all output geometry is in device pixels.
    #[must_use]
    pub fn build(
        positions: &[ItemPosition],
        world: WorldSize,
        transform: Transform,
        view: ViewRect,
        dpr: f64,
        style: &DotStyle,
        highlight: &HighlightAnimator,
    ) -> Self {
        let mut plan = Self::default();
        for p in positions {
            let Some(center) = screen_position(p, world, transform, view) else {
                continue;
            };
            let progress = highlight.progress(p.id);
            let radius = p.base_size / 2.0 * (1.0 + FOCUS_SCALE_BOOST * progress);
            let dot = Dot {
                id: p.id,
                center: Point::new(center.x * dpr, center.y * dpr),
                radius: radius * dpr,
                color: if progress > 0.0 {
                    style.focused
                } else {
                    style.base
                },
            };
            if progress > 0.0 {
                plan.focus.push(FocusDot {
                    glow: glow_brush(dot.center, dot.radius * GLOW_RADIUS_FACTOR, style.glow, progress),
                    ring_width: RING_WIDTH_PX * dpr,
                    brightness: 1.0 + FOCUS_BRIGHTNESS_BOOST * progress,
                    progress,
                    dot,
                });
            } else {
                plan.base.push(dot);
            }
        }
        plan
    }
}

/// One rich node, in CSS pixels.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Node {
    /// Item this node draws.
    pub id: ItemId,
    /// Anchor point (the item's mapped position), CSS pixels.
    pub anchor: Point,
    /// Footprint of the node, centered on the anchor and scaled with zoom.
    pub rect: Rect,
}

/// The rich-node plan used when zoomed past [`LOD_THRESHOLD`].
#[derive(Clone, Debug, Default)]
pub struct NodePlan {
    /// Visible nodes in input order.
    pub nodes: Vec<Node>,
}

impl NodePlan {
    /// Builds the node plan, culling with the same buffer as the dot path.
    #[must_use]
    pub fn build(
        positions: &[ItemPosition],
        world: WorldSize,
        transform: Transform,
        view: ViewRect,
    ) -> Self {
        let mut nodes = Vec::new();
        for p in positions {
            let Some(anchor) = screen_position(p, world, transform, view) else {
                continue;
            };
            let half = p.base_size * transform.scale;
            nodes.push(Node {
                id: p.id,
                anchor,
                rect: Rect::new(
                    anchor.x - half,
                    anchor.y - half,
                    anchor.x + half,
                    anchor.y + half,
                ),
            });
        }
        Self { nodes }
    }
}

/// Maps a normalized item position to screen space.
pub(crate) fn item_screen(p: &ItemPosition, world: WorldSize, transform: Transform) -> Point {
    transform.world_to_screen(Point::new(
        p.x_norm * world.width,
        p.y_norm * world.height,
    ))
}

fn screen_position(
    p: &ItemPosition,
    world: WorldSize,
    transform: Transform,
    view: ViewRect,
) -> Option<Point> {
    let s = item_screen(p, world, transform);
    let visible = s.x >= -CULL_BUFFER_PX
        && s.x <= view.width + CULL_BUFFER_PX
        && s.y >= -CULL_BUFFER_PX
        && s.y <= view.height + CULL_BUFFER_PX;
    visible.then_some(s)
}

fn glow_brush(center: Point, radius: f64, color: Color, progress: f64) -> Brush {
    let progress = progress.clamp(0.0, 1.0) as f32;
    let with_alpha = |alpha: f32| color.with_alpha(alpha * progress);
    let stops = ColorStops::from(
        [
            ColorStop::from((0.0, with_alpha(0.55))),
            ColorStop::from((0.6, with_alpha(0.18))),
            ColorStop::from((1.0, with_alpha(0.0))),
        ]
        .as_slice(),
    );
    let kind = GradientKind::Radial(RadialGradientPosition::new_two_point(
        (center.x, center.y),
        0.0,
        (center.x, center.y),
        radius as f32,
    ));
    Brush::Gradient(Gradient {
        kind,
        extend: Extend::Pad,
        stops,
        ..Gradient::default()
    })
}
