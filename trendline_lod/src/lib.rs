// Copyright 2026 the Trendline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trendline LOD: level-of-detail render planning and hit-testing.
//!
//! Given mapped item positions and the live viewport transform, this crate
//! decides *what to draw and where*, never touching a rendering backend:
//!
//! - [`LodMode`] picks cheap canvas dots below a zoom threshold and rich
//!   per-item nodes above it.
//! - [`DotPlan`] is the culled, device-pixel two-pass dot plan; focused items
//!   go in the second pass with a [`peniko`] radial-gradient glow, ring, and
//!   brightness/scale boost, so they are never occluded by neighbors.
//! - [`hit_test`] and [`items_in_rect`] resolve pointer positions and
//!   marquee rectangles to item ids, consistently with render z-order.
//! - [`HighlightAnimator`] and [`HoverTimer`] are the small keyed state
//!   machines behind focus transitions and flicker-free hover.
//!
//! ```rust
//! use kurbo::Point;
//! use trendline_layout::{ItemId, ItemPosition};
//! use trendline_lod::{HighlightAnimator, LodMode, hit_test};
//! use trendline_viewport::{Transform, WorldSize};
//!
//! let positions = [ItemPosition {
//!     id: ItemId(1),
//!     x_norm: 0.5,
//!     y_norm: 0.5,
//!     base_size: 10.0,
//! }];
//! let world = WorldSize::new(1000.0, 500.0);
//! assert_eq!(LodMode::for_scale(0.5), LodMode::Dots);
//! let hit = hit_test(
//!     Point::new(500.0, 250.0),
//!     &positions,
//!     world,
//!     Transform::IDENTITY,
//!     1.0,
//!     &HighlightAnimator::new(),
//! );
//! assert_eq!(hit, Some(ItemId(1)));
//! ```

mod highlight;
mod hit;
mod hover;
mod plan;

pub use highlight::{HIGHLIGHT_MS, HighlightAnimator};
pub use hit::{HIT_BUFFER_PX, hit_test, items_in_rect};
pub use hover::{HOVER_HIDE_MS, HOVER_SHOW_MS, HoverChange, HoverTimer};
pub use plan::{
    CULL_BUFFER_PX, Dot, DotPlan, DotStyle, FocusDot, LOD_THRESHOLD, LodMode, Node, NodePlan,
};
