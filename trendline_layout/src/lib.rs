// Copyright 2026 the Trendline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trendline Layout: time-axis structure and position mapping.
//!
//! This crate computes the world-space layout for a timeline scatter plot:
//! given a set of time-stamped, magnitude-valued samples it produces
//! - a [`TimeAxis`]: normalized calendar-month buckets whose widths blend
//!   linear calendar time with sample density, plus merged year markers and
//!   a total world width, and
//! - a set of [`ItemPosition`]s: normalized `[0, 1]` world coordinates and a
//!   size basis per sample, under a configurable magnitude [`ScalingMode`]
//!   and vertical spread.
//!
//! It is headless: no rendering, no data fetching, no clock. World space here
//! means the logical, zoom-independent plane; converting world coordinates to
//! screen pixels is the job of a viewport transform layer built on top.
//!
//! ## Structure freeze
//!
//! Month buckets and world width are deliberately *not* recomputed on every
//! input change. [`FrozenAxis`] holds the last built axis and rebuilds only
//! when an explicit [`StructureVersion`] token advances or when a dependency
//! that genuinely changes the shape of the axis (the time-linearity knob, or
//! the set becoming empty/non-empty) changes. This keeps innocuous updates
//! such as visibility toggles from jarring the view.
//!
//! ## Minimal example
//!
//! ```rust
//! use trendline_layout::{
//!     ItemId, ItemSample, ScalingMode, SizeRange, Stats, TimeAxis, TimeAxisParams,
//!     map_positions,
//! };
//!
//! const DAY_MS: i64 = 86_400_000;
//! let samples = vec![
//!     ItemSample::new(ItemId(1), 1_700_000_000_000, 1_000.0),
//!     ItemSample::new(ItemId(2), 1_700_000_000_000 + 40 * DAY_MS, 9_000.0),
//! ];
//!
//! let stats = Stats::from_samples(&samples).unwrap();
//! let axis = TimeAxis::build(&samples, &stats, &TimeAxisParams::default());
//!
//! let positions = map_positions(
//!     &samples,
//!     &stats,
//!     &axis,
//!     ScalingMode::Linear,
//!     1.0,
//!     SizeRange::default(),
//! );
//! assert_eq!(positions.len(), 2);
//! // Higher magnitude maps higher on screen (smaller y).
//! assert!(positions.iter().all(|p| (0.0..=1.0).contains(&p.x_norm)));
//! ```

mod axis;
mod frozen;
mod position;
mod stats;

pub use axis::{MonthLayout, TimeAxis, TimeAxisParams, YearMarker};
pub use frozen::{FrozenAxis, StatsScope, StructureVersion};
pub use position::{ItemPosition, MagnitudeRanker, ScalingMode, SizeRange, map_positions};
pub use stats::Stats;

/// Opaque key identifying one item.
///
/// The engine never inspects item payloads; hosts map their own document IDs
/// onto this newtype.
#[repr(transparent)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId(pub u64);

/// One immutable input sample: an item's timestamp and magnitude.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ItemSample {
    /// Key of the item this sample belongs to.
    pub id: ItemId,
    /// Timestamp in Unix milliseconds.
    pub ts_ms: i64,
    /// Magnitude value (views, score, …); any finite `f64`.
    pub magnitude: f64,
}

impl ItemSample {
    /// Creates a new sample.
    #[must_use]
    pub const fn new(id: ItemId, ts_ms: i64, magnitude: f64) -> Self {
        Self { id, ts_ms, magnitude }
    }
}
