// Copyright 2026 the Trendline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use trendline_layout::{ItemSample, MagnitudeRanker, ScalingMode, Stats, TimeAxis};

/// Number of evenly spaced sample timestamps across the data range.
pub const BASELINE_SAMPLES: usize = 200;

/// Hard cap on the rolling window, in days.
pub const MAX_WINDOW_DAYS: f64 = 90.0;

const DAY_MS: f64 = 86_400_000.0;

/// Coarse choice of how reactive the baseline should be.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum WindowIntent {
    /// 7-day window; follows short-term swings.
    Fast,
    /// 30-day window.
    #[default]
    Mid,
    /// 90-day window; long-term trend only.
    Slow,
}

impl WindowIntent {
    /// Nominal window length in days, before data-driven clamping.
    #[must_use]
    pub fn nominal_days(self) -> f64 {
        match self {
            Self::Fast => 7.0,
            Self::Mid => 30.0,
            Self::Slow => 90.0,
        }
    }
}

/// Which baseline to compute.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BaselineMode {
    /// One flat guide at the mean magnitude of all items.
    Global,
    /// A rolling-window curve with the given reactivity.
    Dynamic(WindowIntent),
}

impl Default for BaselineMode {
    fn default() -> Self {
        Self::Dynamic(WindowIntent::default())
    }
}

/// One smoothed sample of the baseline curve, in normalized layout space.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct BaselineDataPoint {
    /// Horizontal position, same mapping as items (`[0, 1]`).
    pub x: f64,
    /// Vertical position, same mapping as items (`[0, 1]`, top = max).
    pub y: f64,
    /// The underlying averaged magnitude.
    pub value: f64,
}

/// The flat global guide line.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct GlobalBaseline {
    /// Vertical position of the guide, normalized.
    pub y: f64,
    /// Mean magnitude across all items.
    pub value: f64,
}

/// Clamps a window intent to what the data can support: a third of the total
/// span, never more than [`MAX_WINDOW_DAYS`].
#[must_use]
pub fn effective_window_days(intent: WindowIntent, stats: &Stats) -> f64 {
    let span_days = stats.ts_span_ms() as f64 / DAY_MS;
    let safe_max = (span_days / 3.0).min(MAX_WINDOW_DAYS);
    intent.nominal_days().min(safe_max)
}

/// Computes the flat global baseline, or `None` for an empty set.
///
/// The guide's height comes from the same [`MagnitudeRanker`] that maps the
/// items under `scaling`, so it sits exactly where an item of the mean
/// magnitude would.
#[must_use]
pub fn global_baseline(
    samples: &[ItemSample],
    stats: &Stats,
    scaling: ScalingMode,
    spread: f64,
) -> Option<GlobalBaseline> {
    let finite: Vec<f64> = samples
        .iter()
        .map(|s| s.magnitude)
        .filter(|m| m.is_finite())
        .collect();
    if finite.is_empty() {
        return None;
    }
    let value = finite.iter().sum::<f64>() / finite.len() as f64;
    let ranker = MagnitudeRanker::new(samples, stats, scaling);
    Some(GlobalBaseline {
        y: ranker.y_norm(value, spread),
        value,
    })
}

/// Computes the rolling-window baseline samples.
///
/// [`BASELINE_SAMPLES`] timestamps are spaced evenly across the data range;
/// each averages the magnitude of all items within the effective window on
/// either side. Sample timestamps whose window contains no items produce no
/// point, so sparse stretches leave a gap rather than inventing a value.
/// Positions go through the same x/y mapping as individual items: x via the
/// axis, y via the item set's [`MagnitudeRanker`] under `scaling`.
#[must_use]
pub fn dynamic_baseline(
    samples: &[ItemSample],
    stats: &Stats,
    axis: &TimeAxis,
    scaling: ScalingMode,
    intent: WindowIntent,
    spread: f64,
) -> Vec<BaselineDataPoint> {
    if samples.is_empty() {
        return Vec::new();
    }
    let ranker = MagnitudeRanker::new(samples, stats, scaling);
    let window_ms = effective_window_days(intent, stats) * DAY_MS;
    let (start, end) = (stats.min_ts_ms, stats.max_ts_ms);
    let span = (end - start).max(1);

    let mut points = Vec::with_capacity(BASELINE_SAMPLES);
    for i in 0..BASELINE_SAMPLES {
        let frac = i as f64 / (BASELINE_SAMPLES - 1) as f64;
        let ts = start + (span as f64 * frac) as i64;
        let lo = ts as f64 - window_ms;
        let hi = ts as f64 + window_ms;

        let mut sum = 0.0;
        let mut count = 0_u32;
        for s in samples {
            let t = s.ts_ms as f64;
            if t >= lo && t <= hi && s.magnitude.is_finite() {
                sum += s.magnitude;
                count += 1;
            }
        }
        if count == 0 {
            continue;
        }
        let value = sum / f64::from(count);
        points.push(BaselineDataPoint {
            x: axis.x_norm_at(ts),
            y: ranker.y_norm(value, spread),
            value,
        });
    }
    points
}

/// The computed baseline, ready to draw.
#[derive(Clone, Debug, PartialEq)]
pub enum Baseline {
    /// A flat guide line.
    Flat(GlobalBaseline),
    /// Rolling-window sample points; smooth them with
    /// [`crate::monotone_segments`].
    Curve(Vec<BaselineDataPoint>),
}

/// Computes the baseline for a mode, or `None` for an empty item set.
///
/// `scaling` and `spread` must be the values the items were mapped with.
#[must_use]
pub fn compute_baseline(
    samples: &[ItemSample],
    stats: &Stats,
    axis: &TimeAxis,
    scaling: ScalingMode,
    mode: BaselineMode,
    spread: f64,
) -> Option<Baseline> {
    match mode {
        BaselineMode::Global => {
            global_baseline(samples, stats, scaling, spread).map(Baseline::Flat)
        }
        BaselineMode::Dynamic(intent) => {
            let points = dynamic_baseline(samples, stats, axis, scaling, intent, spread);
            (!points.is_empty()).then_some(Baseline::Curve(points))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trendline_layout::{ItemId, TimeAxisParams};

    const DAY: i64 = 86_400_000;
    // 2024-01-15T00:00:00Z.
    const T0: i64 = 1_705_276_800_000;

    fn sample(id: u64, ts_ms: i64, magnitude: f64) -> ItemSample {
        ItemSample::new(ItemId(id), ts_ms, magnitude)
    }

    fn fixture(days: i64, magnitudes: &[f64]) -> (Vec<ItemSample>, Stats, TimeAxis) {
        let samples: Vec<ItemSample> = magnitudes
            .iter()
            .enumerate()
            .map(|(i, &m)| sample(i as u64, T0 + (i as i64 * days * DAY) / magnitudes.len() as i64, m))
            .collect();
        let stats = Stats::from_samples(&samples).expect("non-empty fixture");
        let axis = TimeAxis::build(&samples, &stats, &TimeAxisParams::default());
        (samples, stats, axis)
    }

    #[test]
    fn window_is_clamped_to_a_third_of_the_span() {
        let (_, stats, _) = fixture(30, &[1.0; 10]);
        // Span is 30 days plus the 1-day stats padding; a third is ~10.3.
        let fast = effective_window_days(WindowIntent::Fast, &stats);
        let slow = effective_window_days(WindowIntent::Slow, &stats);
        assert_eq!(fast, 7.0, "fast fits inside the safe maximum");
        assert!(slow < 11.0, "slow is clamped: {slow}");

        let (_, long_stats, _) = fixture(3600, &[1.0; 10]);
        assert_eq!(
            effective_window_days(WindowIntent::Slow, &long_stats),
            MAX_WINDOW_DAYS
        );
    }

    #[test]
    fn global_baseline_is_the_mean_at_its_mapped_height() {
        let (samples, stats, _) = fixture(60, &[1000.0, 9000.0]);
        let g = global_baseline(&samples, &stats, ScalingMode::Linear, 1.0).expect("non-empty");
        assert_eq!(g.value, 5000.0);
        assert!((g.y - 0.5).abs() < 1e-12, "mean of the extremes is centered");
        assert_eq!(global_baseline(&[], &stats, ScalingMode::Linear, 1.0), None);
    }

    #[test]
    fn guide_height_matches_an_item_of_the_mean_magnitude_in_every_mode() {
        let (samples, stats, _) = fixture(60, &[0.0, 5000.0, 10_000.0]);
        for mode in [
            ScalingMode::Linear,
            ScalingMode::Log,
            ScalingMode::Sqrt,
            ScalingMode::Percentile,
        ] {
            let g = global_baseline(&samples, &stats, mode, 1.0).expect("non-empty");
            assert_eq!(g.value, 5000.0);
            let ranker = MagnitudeRanker::new(&samples, &stats, mode);
            assert!(
                (g.y - ranker.y_norm(5000.0, 1.0)).abs() < 1e-12,
                "guide sits where an item of the mean would in {mode:?}"
            );
        }
    }

    #[test]
    fn dynamic_baseline_tracks_local_averages() {
        // First half low, second half high.
        let mags: Vec<f64> = (0..40).map(|i| if i < 20 { 100.0 } else { 900.0 }).collect();
        let (samples, stats, axis) = fixture(120, &mags);
        let points = dynamic_baseline(
            &samples,
            &stats,
            &axis,
            ScalingMode::Linear,
            WindowIntent::Fast,
            1.0,
        );
        assert!(!points.is_empty());

        let first = points.first().expect("points");
        let last = points.last().expect("points");
        assert!(first.value < 300.0, "early average is low: {}", first.value);
        assert!(last.value > 700.0, "late average is high: {}", last.value);
        // Higher magnitude maps to a smaller y (drawn higher).
        assert!(last.y < first.y);
        // x is monotone nondecreasing across samples.
        assert!(points.windows(2).all(|w| w[0].x <= w[1].x));
    }

    #[test]
    fn empty_windows_leave_gaps_instead_of_inventing_values() {
        // Two tight clusters separated by a long silent stretch.
        let mut samples: Vec<ItemSample> = (0..5)
            .map(|i| sample(i, T0 + i as i64 * DAY, 100.0))
            .collect();
        samples.extend((0..5).map(|i| sample(10 + i, T0 + (360 + i as i64) * DAY, 500.0)));
        let stats = Stats::from_samples(&samples).expect("non-empty");
        let axis = TimeAxis::build(&samples, &stats, &TimeAxisParams::default());

        let points = dynamic_baseline(
            &samples,
            &stats,
            &axis,
            ScalingMode::Linear,
            WindowIntent::Fast,
            1.0,
        );
        assert!(
            points.len() < BASELINE_SAMPLES,
            "silent middle produced no points: {}",
            points.len()
        );
        assert!(points.iter().all(|p| p.value.is_finite()));
    }

    #[test]
    fn flat_magnitudes_center_vertically() {
        let (samples, stats, axis) = fixture(30, &[42.0; 8]);
        let g = global_baseline(&samples, &stats, ScalingMode::Linear, 1.0).expect("non-empty");
        assert_eq!(g.y, 0.5);
        let points = dynamic_baseline(
            &samples,
            &stats,
            &axis,
            ScalingMode::Linear,
            WindowIntent::Mid,
            1.0,
        );
        assert!(points.iter().all(|p| p.y == 0.5));
    }
}
