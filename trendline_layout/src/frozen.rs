// Copyright 2026 the Trendline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::axis::{TimeAxis, TimeAxisParams};
use crate::stats::Stats;
use crate::ItemSample;

/// Explicit token gating structural recomputation.
///
/// The token is advanced by the host when the *content context* changes (a
/// different scope, a different filter set). Per-render churn such as
/// visibility toggles must leave it untouched.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StructureVersion(pub u64);

impl StructureVersion {
    /// Returns the next version.
    #[must_use]
    pub const fn advanced(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

/// Which sample population the frozen stats describe.
///
/// The freeze policy is asymmetric on purpose: in [`StatsScope::Forced`] the
/// axis describes a fixed global population and item-count changes in the
/// display set are ignored outright; in [`StatsScope::Local`] the axis
/// follows the active dataset and the host advances the [`StructureVersion`]
/// when it narrows to a different one. The flag is carried explicitly so the
/// engine never has to guess intent from count deltas.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum StatsScope {
    /// Stats are pinned to a global/forced population.
    #[default]
    Forced,
    /// Stats follow the locally active dataset.
    Local,
}

/// Holds the last built [`TimeAxis`] and rebuilds only on real structural
/// change.
///
/// A rebuild happens when:
/// - the [`StructureVersion`] token advances,
/// - the `time_linearity` knob changes, or
/// - the sample set flips between empty and non-empty.
///
/// Anything else (display filtering, visibility toggles, hover state) reuses
/// the held axis, which keeps the viewport from jumping on innocuous updates.
#[derive(Clone, Debug, Default)]
pub struct FrozenAxis {
    scope: StatsScope,
    built: Option<Built>,
}

#[derive(Clone, Debug)]
struct Built {
    version: StructureVersion,
    time_linearity: f64,
    has_samples: bool,
    axis: TimeAxis,
    stats: Option<Stats>,
}

impl FrozenAxis {
    /// Creates an empty holder for the given scope.
    #[must_use]
    pub fn new(scope: StatsScope) -> Self {
        Self { scope, built: None }
    }

    /// The scope this axis was created for.
    #[must_use]
    pub fn scope(&self) -> StatsScope {
        self.scope
    }

    /// Returns the held axis, rebuilding it first if a gating dependency
    /// changed. Returns `None` only while the sample set is empty.
    pub fn update(
        &mut self,
        version: StructureVersion,
        density_samples: &[ItemSample],
        params: &TimeAxisParams,
    ) -> Option<(&TimeAxis, &Stats)> {
        let has_samples = !density_samples.is_empty();
        let stale = match &self.built {
            Some(b) => {
                b.version != version
                    || b.time_linearity != params.time_linearity
                    || b.has_samples != has_samples
            }
            None => true,
        };

        if stale {
            let stats = Stats::from_samples(density_samples);
            let axis = match &stats {
                Some(s) => TimeAxis::build(density_samples, s, params),
                None => TimeAxis::build(
                    &[],
                    &Stats {
                        min_magnitude: 0.0,
                        max_magnitude: 0.0,
                        min_ts_ms: 0,
                        max_ts_ms: 0,
                    },
                    params,
                ),
            };
            self.built = Some(Built {
                version,
                time_linearity: params.time_linearity,
                has_samples,
                axis,
                stats,
            });
        }

        let built = self.built.as_ref()?;
        built.stats.as_ref().map(|s| (&built.axis, s))
    }

    /// The currently held axis without any staleness check.
    #[must_use]
    pub fn current(&self) -> Option<&TimeAxis> {
        self.built.as_ref().map(|b| &b.axis)
    }

    /// Drops the held axis; the next [`FrozenAxis::update`] rebuilds.
    pub fn invalidate(&mut self) {
        self.built = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ItemId;

    const DAY_MS: i64 = 86_400_000;
    const BASE_TS: i64 = 1_705_276_800_000;

    fn samples(n: usize) -> Vec<ItemSample> {
        (0..n)
            .map(|i| ItemSample::new(ItemId(i as u64), BASE_TS + (i as i64) * DAY_MS, i as f64))
            .collect()
    }

    #[test]
    fn rebuilds_only_when_version_advances() {
        let mut frozen = FrozenAxis::new(StatsScope::Forced);
        let params = TimeAxisParams::default();
        let v0 = StructureVersion::default();

        let wide = samples(40);
        let (axis_a, _) = frozen.update(v0, &wide, &params).unwrap();
        let held = axis_a.clone();

        // Fewer samples, same version: the held axis must not change even
        // though the density input shrank.
        let narrow = samples(3);
        let (axis_b, _) = frozen.update(v0, &narrow, &params).unwrap();
        assert_eq!(*axis_b, held);

        let (axis_c, _) = frozen.update(v0.advanced(), &narrow, &params).unwrap();
        assert_ne!(*axis_c, held);
    }

    #[test]
    fn linearity_change_forces_rebuild() {
        let mut frozen = FrozenAxis::new(StatsScope::Forced);
        let v0 = StructureVersion::default();
        let s = samples(30);

        let p0 = TimeAxisParams::default();
        let held = frozen.update(v0, &s, &p0).unwrap().0.clone();

        let p1 = TimeAxisParams {
            time_linearity: 1.0,
            ..p0
        };
        let rebuilt = frozen.update(v0, &s, &p1).unwrap().0.clone();
        assert_ne!(rebuilt, held);
    }

    #[test]
    fn empty_flip_forces_rebuild_and_reports_none() {
        let mut frozen = FrozenAxis::new(StatsScope::Local);
        let v0 = StructureVersion::default();
        let params = TimeAxisParams::default();

        assert!(frozen.update(v0, &[], &params).is_none());
        assert!(frozen.current().is_some(), "placeholder axis is still held");

        let s = samples(5);
        assert!(frozen.update(v0, &s, &params).is_some());
    }

    #[test]
    fn invalidate_drops_held_axis() {
        let mut frozen = FrozenAxis::new(StatsScope::Forced);
        let params = TimeAxisParams::default();
        let s = samples(5);
        frozen.update(StructureVersion::default(), &s, &params);
        assert!(frozen.current().is_some());

        frozen.invalidate();
        assert!(frozen.current().is_none());
    }
}
