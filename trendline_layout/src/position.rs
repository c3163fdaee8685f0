// Copyright 2026 the Trendline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::axis::TimeAxis;
use crate::stats::Stats;
use crate::{ItemId, ItemSample};

/// Magnitude spans below this are treated as flat (all ranks centered).
const FLAT_SPAN_EPS: f64 = 1e-9;

/// How magnitudes are mapped to a `[0, 1]` rank.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum ScalingMode {
    /// Normalized distance from min to max.
    #[default]
    Linear,
    /// Normalized distance under `ln(1 + x)`; compresses large outliers.
    Log,
    /// Normalized distance under `sqrt`; a middle ground.
    Sqrt,
    /// Ascending-sort rank fraction; magnitude-distribution independent.
    Percentile,
}

/// Radius basis range shared by drawing and hit-testing.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SizeRange {
    /// Radius basis at rank 0.
    pub min_size: f64,
    /// Radius basis at rank 1.
    pub max_size: f64,
}

impl Default for SizeRange {
    fn default() -> Self {
        Self {
            min_size: 4.0,
            max_size: 18.0,
        }
    }
}

/// One positioned item in normalized world space.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ItemPosition {
    /// Key of the positioned item.
    pub id: ItemId,
    /// Normalized world X, `[0, 1]`.
    pub x_norm: f64,
    /// Normalized world Y, `[0, 1]`; smaller is higher on screen.
    pub y_norm: f64,
    /// Radius basis used for both drawing size and hit-test buffer.
    pub base_size: f64,
}

/// Maps samples to normalized world positions.
///
/// - The magnitude rank is computed per `mode`; a degenerate magnitude range
///   (`max ≈ min`) centers every item at rank `0.5`.
/// - `y_norm = 0.5 + (0.5 - rank) * spread`: rank 1 is at the top, and
///   `spread = 0.0` collapses the layout to a flat center line.
/// - `x_norm` resolves through the owning month bucket of `axis`.
/// - The result is sorted ascending by `base_size`, which fixes the z-order
///   (bigger items drawn later, on top) consistently for rendering and
///   hit-testing.
#[must_use]
pub fn map_positions(
    samples: &[ItemSample],
    stats: &Stats,
    axis: &TimeAxis,
    mode: ScalingMode,
    spread: f64,
    sizes: SizeRange,
) -> Vec<ItemPosition> {
    let ranker = MagnitudeRanker::new(samples, stats, mode);

    let mut out: Vec<ItemPosition> = samples
        .iter()
        .map(|s| {
            let rank = ranker.rank(s.magnitude);
            ItemPosition {
                id: s.id,
                x_norm: axis.x_norm_at(s.ts_ms),
                y_norm: ranker.y_norm(s.magnitude, spread),
                base_size: sizes.min_size + rank * (sizes.max_size - sizes.min_size),
            }
        })
        .collect();

    out.sort_by(|a, b| a.base_size.total_cmp(&b.base_size));
    out
}

/// The magnitude-to-rank mapping of one item set.
///
/// Built once per layout and reusable for values that are not themselves
/// items: overlays that must sit at the same height as an item of equal
/// magnitude (the baseline guide and curve) query the same ranker the
/// position mapper used, in every [`ScalingMode`].
#[derive(Clone, Debug, PartialEq)]
pub struct MagnitudeRanker {
    kind: RankerKind,
}

#[derive(Clone, Debug, PartialEq)]
enum RankerKind {
    Flat,
    Span { min: f64, span: f64, mode: ScalingMode },
    Percentile { sorted: Vec<f64> },
}

impl MagnitudeRanker {
    /// Builds the ranker for an item set; degenerate spans (`max ≈ min`) and
    /// single items rank everything at `0.5`.
    #[must_use]
    pub fn new(samples: &[ItemSample], stats: &Stats, mode: ScalingMode) -> Self {
        if stats.magnitude_span() < FLAT_SPAN_EPS || samples.len() < 2 {
            return Self {
                kind: RankerKind::Flat,
            };
        }
        let kind = match mode {
            ScalingMode::Percentile => {
                let mut sorted: Vec<f64> = samples.iter().map(|s| s.magnitude).collect();
                sorted.sort_by(f64::total_cmp);
                RankerKind::Percentile { sorted }
            }
            _ => RankerKind::Span {
                min: stats.min_magnitude,
                span: stats.magnitude_span(),
                mode,
            },
        };
        Self { kind }
    }

    /// Rank in `[0, 1]` for a magnitude; the value need not be an item.
    #[must_use]
    pub fn rank(&self, magnitude: f64) -> f64 {
        match &self.kind {
            RankerKind::Flat => 0.5,
            RankerKind::Span { min, span, mode } => {
                let t = ((magnitude - min) / span).clamp(0.0, 1.0);
                match mode {
                    ScalingMode::Log => {
                        // Shifted so the transform is defined at t = 0.
                        (t * span + 1.0).ln() / (span + 1.0).ln()
                    }
                    ScalingMode::Sqrt => t.sqrt(),
                    _ => t,
                }
            }
            RankerKind::Percentile { sorted } => {
                // Equal magnitudes share a rank: position of the first
                // occurrence in the ascending sort.
                let below = sorted.partition_point(|&m| m < magnitude);
                below as f64 / (sorted.len() - 1) as f64
            }
        }
    }

    /// Normalized vertical position for a magnitude, identical to the
    /// mapping items get: `0.5 + (0.5 - rank) * spread`.
    #[must_use]
    pub fn y_norm(&self, magnitude: f64, spread: f64) -> f64 {
        0.5 + (0.5 - self.rank(magnitude)) * spread.clamp(0.0, 1.0)
    }
}
