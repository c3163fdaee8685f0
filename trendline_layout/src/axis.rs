// Copyright 2026 the Trendline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use chrono::{DateTime, Datelike, NaiveDate};

use crate::stats::Stats;
use crate::ItemSample;

const MONTH_ABBR: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Parameters controlling how the time axis is built.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TimeAxisParams {
    /// Blend between calendar-linear month widths (`0.0`) and sample-density
    /// month widths (`1.0`).
    pub time_linearity: f64,
    /// Absolute width contributed by one calendar day in linear mode.
    pub px_per_day: f64,
    /// Absolute width contributed by one sample in density mode.
    pub px_per_item: f64,
    /// Floor for a month's density width.
    pub min_month_width: f64,
    /// Floor for the total world width.
    pub min_world_width: f64,
    /// Hard cap on the number of generated months; malformed date ranges are
    /// truncated here instead of looping.
    pub max_months: usize,
}

impl Default for TimeAxisParams {
    fn default() -> Self {
        Self {
            time_linearity: 0.0,
            px_per_day: 8.0,
            px_per_item: 14.0,
            min_month_width: 40.0,
            min_world_width: 600.0,
            max_months: 1000,
        }
    }
}

/// One calendar-month bucket of the time axis.
///
/// `start_x`, `end_x`, and `width` are fractions of the total world width;
/// across all months the widths sum to `1.0`.
#[derive(Clone, Debug, PartialEq)]
pub struct MonthLayout {
    /// Calendar year.
    pub year: i32,
    /// Calendar month, `1..=12`.
    pub month: u32,
    /// Short display label, e.g. `"Mar 2026"`.
    pub label: String,
    /// Number of density samples falling in this bucket.
    pub count: usize,
    /// Bucket start (clipped to the data range for the first month), Unix ms.
    pub start_ts_ms: i64,
    /// Bucket end (clipped to the data range for the last month), Unix ms.
    pub end_ts_ms: i64,
    /// Calendar days in the month.
    pub days_in_month: u32,
    /// Left edge as a fraction of world width.
    pub start_x: f64,
    /// Right edge as a fraction of world width.
    pub end_x: f64,
    /// `end_x - start_x`.
    pub width: f64,
}

/// A merged run of contiguous same-year months, for year guide labels.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct YearMarker {
    /// Calendar year.
    pub year: i32,
    /// Left edge as a fraction of world width.
    pub start_x: f64,
    /// Right edge as a fraction of world width.
    pub end_x: f64,
}

/// The built time axis: normalized month buckets plus total world width.
#[derive(Clone, Debug, PartialEq)]
pub struct TimeAxis {
    /// Month buckets in chronological order.
    pub months: Vec<MonthLayout>,
    /// Merged year regions.
    pub year_markers: Vec<YearMarker>,
    /// Total world width in world pixels, floored at
    /// [`TimeAxisParams::min_world_width`].
    pub world_width: f64,
}

impl TimeAxis {
    /// Builds the axis over the padded date range in `stats`.
    ///
    /// `density_samples` is the set used for per-month counts; it may be a
    /// wider context than the filtered display set. Degenerate inputs (a
    /// zero-width range, timestamps outside calendar bounds) produce a safe
    /// single-bucket placeholder instead of NaN or runaway iteration.
    #[must_use]
    pub fn build(density_samples: &[ItemSample], stats: &Stats, params: &TimeAxisParams) -> Self {
        match Self::try_build(density_samples, stats, params) {
            Some(axis) => axis,
            None => Self::placeholder(stats, params),
        }
    }

    fn try_build(
        density_samples: &[ItemSample],
        stats: &Stats,
        params: &TimeAxisParams,
    ) -> Option<Self> {
        if stats.max_ts_ms <= stats.min_ts_ms {
            return None;
        }

        let linearity = params.time_linearity.clamp(0.0, 1.0);
        let start = DateTime::from_timestamp_millis(stats.min_ts_ms)?;
        let mut first_day = NaiveDate::from_ymd_opt(start.year(), start.month(), 1)?;

        struct RawMonth {
            year: i32,
            month: u32,
            count: usize,
            start_ts_ms: i64,
            end_ts_ms: i64,
            days_in_month: u32,
            width: f64,
        }

        let mut raw: Vec<RawMonth> = Vec::new();
        for _ in 0..params.max_months {
            let month_start_ms = first_day.and_hms_opt(0, 0, 0)?.and_utc().timestamp_millis();
            if month_start_ms >= stats.max_ts_ms {
                break;
            }

            let next_first = next_month(first_day)?;
            let month_end_ms = next_first.and_hms_opt(0, 0, 0)?.and_utc().timestamp_millis();
            let days_in_month = u32::try_from((next_first - first_day).num_days()).ok()?;

            // Clip the first/last month to the span actually covered by data
            // so there is no dead space past the edge items.
            let eff_start = month_start_ms.max(stats.min_ts_ms);
            let eff_end = month_end_ms.min(stats.max_ts_ms);
            if eff_end <= eff_start {
                first_day = next_first;
                continue;
            }
            let coverage = (eff_end - eff_start) as f64 / (month_end_ms - month_start_ms) as f64;

            let count = density_samples
                .iter()
                .filter(|s| s.ts_ms >= eff_start && s.ts_ms < eff_end)
                .count();

            let linear = f64::from(days_in_month) * params.px_per_day;
            let density = (count as f64 * params.px_per_item).max(params.min_month_width);
            let width = lerp(linear, density, linearity) * coverage;

            raw.push(RawMonth {
                year: first_day.year(),
                month: first_day.month(),
                count,
                start_ts_ms: eff_start,
                end_ts_ms: eff_end,
                days_in_month,
                width,
            });
            first_day = next_first;
        }

        let total: f64 = raw.iter().map(|m| m.width).sum();
        if raw.is_empty() || total <= 0.0 || !total.is_finite() {
            return None;
        }

        let mut months = Vec::with_capacity(raw.len());
        let mut cursor = 0.0_f64;
        let last = raw.len() - 1;
        for (i, m) in raw.into_iter().enumerate() {
            let start_x = cursor;
            // Pin the final edge so the fractions sum to exactly 1.0.
            let end_x = if i == last { 1.0 } else { cursor + m.width / total };
            cursor = end_x;
            months.push(MonthLayout {
                year: m.year,
                month: m.month,
                label: format!("{} {}", MONTH_ABBR[(m.month - 1) as usize], m.year),
                count: m.count,
                start_ts_ms: m.start_ts_ms,
                end_ts_ms: m.end_ts_ms,
                days_in_month: m.days_in_month,
                start_x,
                end_x,
                width: end_x - start_x,
            });
        }

        let year_markers = merge_year_markers(&months);
        Some(Self {
            months,
            year_markers,
            world_width: total.max(params.min_world_width),
        })
    }

    /// Single-bucket fallback axis covering the whole (possibly degenerate)
    /// range at the minimum world width.
    fn placeholder(stats: &Stats, params: &TimeAxisParams) -> Self {
        let end = stats.max_ts_ms.max(stats.min_ts_ms + 1);
        let month = MonthLayout {
            year: 0,
            month: 1,
            label: String::new(),
            count: 0,
            start_ts_ms: stats.min_ts_ms,
            end_ts_ms: end,
            days_in_month: 30,
            start_x: 0.0,
            end_x: 1.0,
            width: 1.0,
        };
        Self {
            months: vec![month],
            year_markers: Vec::new(),
            world_width: params.min_world_width,
        }
    }

    /// Returns the bucket containing `ts_ms`, if the timestamp falls within
    /// the axis range.
    #[must_use]
    pub fn month_at(&self, ts_ms: i64) -> Option<&MonthLayout> {
        let idx = self.months.partition_point(|m| m.end_ts_ms <= ts_ms);
        let m = self.months.get(idx)?;
        (ts_ms >= m.start_ts_ms).then_some(m)
    }

    /// Maps a timestamp to a normalized world X, clamped to `[0, 1]`.
    ///
    /// Timestamps before the first bucket map to `0.0`, after the last to
    /// `1.0`. Inside a bucket the position interpolates linearly over the
    /// bucket's covered span.
    #[must_use]
    pub fn x_norm_at(&self, ts_ms: i64) -> f64 {
        let Some(first) = self.months.first() else {
            return 0.0;
        };
        if ts_ms <= first.start_ts_ms {
            return 0.0;
        }
        match self.month_at(ts_ms) {
            Some(m) => {
                let span = (m.end_ts_ms - m.start_ts_ms) as f64;
                let frac = if span > 0.0 {
                    ((ts_ms - m.start_ts_ms) as f64 / span).clamp(0.0, 1.0)
                } else {
                    0.5
                };
                m.start_x + frac * m.width
            }
            None => 1.0,
        }
    }
}

fn next_month(first_day: NaiveDate) -> Option<NaiveDate> {
    let (y, m) = (first_day.year(), first_day.month());
    if m == 12 {
        NaiveDate::from_ymd_opt(y.checked_add(1)?, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(y, m + 1, 1)
    }
}

fn merge_year_markers(months: &[MonthLayout]) -> Vec<YearMarker> {
    let mut markers: Vec<YearMarker> = Vec::new();
    for m in months {
        match markers.last_mut() {
            Some(last) if last.year == m.year => last.end_x = m.end_x,
            _ => markers.push(YearMarker {
                year: m.year,
                start_x: m.start_x,
                end_x: m.end_x,
            }),
        }
    }
    markers
}

fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}
