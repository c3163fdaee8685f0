// Copyright 2026 the Trendline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trendline Baseline: the smoothed trend curve summarizing magnitude over
//! time.
//!
//! Two modes. [`global_baseline`] reduces the whole item set to one mean
//! magnitude, drawn as a flat guide. [`dynamic_baseline`] samples ~200
//! evenly spaced timestamps, averages items inside a rolling window around
//! each (a [`WindowIntent`] clamped to what the data span supports), and maps
//! the results through the same x/y mapping items use: the axis for x and
//! the item set's [`trendline_layout::MagnitudeRanker`] for y, in whichever
//! [`trendline_layout::ScalingMode`] the items were mapped with.
//!
//! The curve itself comes from [`monotone_segments`]: a Fritsch-Carlson
//! monotone cubic Hermite spline rendered as [`kurbo::CubicBez`] segments,
//! so the smoothed line never invents extrema the samples do not have.
//! [`hover_readback`] pairs the statistically correct interpolated value with
//! the exact vertical position of the rendered curve.
//!
//! ```rust
//! use trendline_baseline::{BaselineDataPoint, hover_readback, monotone_segments};
//!
//! let points = [
//!     BaselineDataPoint { x: 0.0, y: 0.8, value: 120.0 },
//!     BaselineDataPoint { x: 0.5, y: 0.5, value: 400.0 },
//!     BaselineDataPoint { x: 1.0, y: 0.4, value: 520.0 },
//! ];
//! assert_eq!(monotone_segments(&points).len(), 2);
//! let h = hover_readback(&points, 0.25).unwrap();
//! assert_eq!(h.value, 260.0);
//! ```

mod spline;
mod window;

pub use spline::{HoverReadback, hover_readback, monotone_segments, monotone_tangents};
pub use window::{
    BASELINE_SAMPLES, Baseline, BaselineDataPoint, BaselineMode, GlobalBaseline, MAX_WINDOW_DAYS,
    WindowIntent, compute_baseline, dynamic_baseline, effective_window_days, global_baseline,
};
