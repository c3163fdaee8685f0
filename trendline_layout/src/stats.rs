// Copyright 2026 the Trendline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::ItemSample;

/// Padding applied to both ends of the date range so edge items are not
/// clipped against the axis bounds (±12 hours).
pub(crate) const TS_PAD_MS: i64 = 43_200_000;

/// Aggregate magnitude and date bounds over a sample set.
///
/// The date range is padded by [`TS_PAD_MS`] on both sides; magnitude bounds
/// are exact. Non-finite magnitudes are ignored while aggregating.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Stats {
    /// Smallest magnitude in the set.
    pub min_magnitude: f64,
    /// Largest magnitude in the set.
    pub max_magnitude: f64,
    /// Start of the padded date range, Unix milliseconds.
    pub min_ts_ms: i64,
    /// End of the padded date range, Unix milliseconds.
    pub max_ts_ms: i64,
}

impl Stats {
    /// Computes stats over `samples`, or `None` if the set is empty (or
    /// contains no finite magnitudes).
    #[must_use]
    pub fn from_samples(samples: &[ItemSample]) -> Option<Self> {
        let mut min_mag = f64::INFINITY;
        let mut max_mag = f64::NEG_INFINITY;
        let mut min_ts = i64::MAX;
        let mut max_ts = i64::MIN;
        let mut any = false;

        for s in samples {
            if !s.magnitude.is_finite() {
                continue;
            }
            any = true;
            min_mag = min_mag.min(s.magnitude);
            max_mag = max_mag.max(s.magnitude);
            min_ts = min_ts.min(s.ts_ms);
            max_ts = max_ts.max(s.ts_ms);
        }

        any.then(|| Self {
            min_magnitude: min_mag,
            max_magnitude: max_mag,
            min_ts_ms: min_ts.saturating_sub(TS_PAD_MS),
            max_ts_ms: max_ts.saturating_add(TS_PAD_MS),
        })
    }

    /// Magnitude span; zero for a flat set.
    #[must_use]
    pub fn magnitude_span(&self) -> f64 {
        self.max_magnitude - self.min_magnitude
    }

    /// Padded date span in milliseconds.
    #[must_use]
    pub fn ts_span_ms(&self) -> i64 {
        self.max_ts_ms - self.min_ts_ms
    }
}
