// Copyright 2026 the Trendline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::hash::{DefaultHasher, Hash, Hasher};

use hashbrown::HashMap;

use crate::transform::Transform;

/// Quiet period before a live transform change is written back.
pub const PERSIST_DEBOUNCE_MS: f64 = 500.0;

/// Minimum scale difference that counts as a meaningful change.
const PERSIST_EPS_SCALE: f64 = 1e-3;

/// Minimum offset difference (pixels) that counts as a meaningful change.
const PERSIST_EPS_OFFSET: f64 = 1.0;

/// Identifier for the active filter/scope context; the persistence key.
///
/// Computed from the scope plus the filter set only. Visibility toggles
/// (which items are drawn) must never participate: toggling visibility is
/// not a context change and must not fork or move viewport state.
#[repr(transparent)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ContentHash(pub u64);

/// Hashes a scope identifier plus an ordered filter set into a
/// [`ContentHash`].
///
/// Callers are expected to pass filters in a stable order; the hash is
/// order-sensitive.
#[must_use]
pub fn content_hash<S: Hash, F: Hash>(scope: &S, filters: &[F]) -> ContentHash {
    let mut hasher = DefaultHasher::new();
    scope.hash(&mut hasher);
    filters.len().hash(&mut hasher);
    for f in filters {
        f.hash(&mut hasher);
    }
    ContentHash(hasher.finish())
}

/// Persisted viewport state for one content context.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ViewportConfig {
    /// Persisted zoom factor.
    pub scale: f64,
    /// Persisted X translation.
    pub offset_x: f64,
    /// Persisted Y translation.
    pub offset_y: f64,
}

impl From<Transform> for ViewportConfig {
    fn from(t: Transform) -> Self {
        Self {
            scale: t.scale,
            offset_x: t.offset_x,
            offset_y: t.offset_y,
        }
    }
}

impl From<ViewportConfig> for Transform {
    fn from(c: ViewportConfig) -> Self {
        Self::new(c.scale, c.offset_x, c.offset_y)
    }
}

/// Storage collaborator for per-context viewport state.
///
/// A missing entry is not an error; the controller falls back to auto-fit.
pub trait ViewportStore {
    /// Returns the saved config for `key`, if any.
    fn get(&self, key: ContentHash) -> Option<ViewportConfig>;
    /// Saves `config` under `key`, replacing any previous value.
    fn set(&mut self, key: ContentHash, config: ViewportConfig);
}

/// In-memory [`ViewportStore`] for tests and session-scoped hosts.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<ContentHash, ViewportConfig>,
}

impl ViewportStore for MemoryStore {
    fn get(&self, key: ContentHash) -> Option<ViewportConfig> {
        self.entries.get(&key).copied()
    }

    fn set(&mut self, key: ContentHash, config: ViewportConfig) {
        self.entries.insert(key, config);
    }
}

/// Debounced, epsilon-gated writeback detector.
///
/// The gate watches the live transform through [`PersistGate::poll`]: any
/// observed movement restarts the quiet period, and once the transform has
/// been still for [`PERSIST_DEBOUNCE_MS`] a write is emitted, but only when
/// the settled value differs from the last saved one beyond the epsilons.
/// Sub-pixel drift never reaches storage.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PersistGate {
    last_saved: Option<Transform>,
    last_seen: Option<Transform>,
    still_since_ms: Option<f64>,
}

impl PersistGate {
    /// Creates a gate with no baseline; the first settle emits a write.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            last_saved: None,
            last_seen: None,
            still_since_ms: None,
        }
    }

    /// Resets the baseline to a value that is already in the store (after a
    /// restore or an initial fit that the host persists itself).
    pub fn reset_baseline(&mut self, t: Transform) {
        self.last_saved = Some(t);
        self.last_seen = None;
        self.still_since_ms = None;
    }

    /// Observes the live transform; returns a value to write once it has
    /// settled and meaningfully differs from the baseline.
    pub fn poll(&mut self, now_ms: f64, live: Transform) -> Option<Transform> {
        let moved = match self.last_seen {
            Some(seen) => seen != live,
            None => true,
        };
        if moved {
            self.last_seen = Some(live);
            self.still_since_ms = Some(now_ms);
            return None;
        }

        let since = self.still_since_ms?;
        if now_ms - since < PERSIST_DEBOUNCE_MS {
            return None;
        }

        let meaningful = match self.last_saved {
            Some(saved) => !saved.approx_eq(&live, PERSIST_EPS_SCALE, PERSIST_EPS_OFFSET),
            None => true,
        };
        // Stop the quiet-period timer either way; the next movement rearms.
        self.still_since_ms = None;
        if meaningful {
            self.last_saved = Some(live);
            Some(live)
        } else {
            None
        }
    }
}

impl Default for PersistGate {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_hash_is_stable_and_scope_sensitive() {
        let a = content_hash(&"scope-a", &["f1", "f2"]);
        let b = content_hash(&"scope-a", &["f1", "f2"]);
        let c = content_hash(&"scope-b", &["f1", "f2"]);
        let d = content_hash(&"scope-a", &["f1"]);
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_ne!(a, d);
    }

    #[test]
    fn memory_store_round_trips() {
        let mut store = MemoryStore::default();
        let key = ContentHash(7);
        assert_eq!(store.get(key), None);
        let cfg = ViewportConfig {
            scale: 1.5,
            offset_x: -10.0,
            offset_y: 72.0,
        };
        store.set(key, cfg);
        assert_eq!(store.get(key), Some(cfg));
    }

    #[test]
    fn write_waits_for_quiet_period() {
        let mut gate = PersistGate::new();
        gate.reset_baseline(Transform::new(1.0, 0.0, 0.0));

        let moved = Transform::new(1.0, -200.0, 0.0);
        assert_eq!(gate.poll(0.0, moved), None);
        // Still moving: each change rearms the debounce.
        let moved2 = Transform::new(1.0, -250.0, 0.0);
        assert_eq!(gate.poll(400.0, moved2), None);
        assert_eq!(gate.poll(700.0, moved2), None);
        // Quiet long enough.
        assert_eq!(gate.poll(950.0, moved2), Some(moved2));
        // Settled value is the new baseline: no repeat write.
        assert_eq!(gate.poll(2000.0, moved2), None);
        assert_eq!(gate.poll(3000.0, moved2), None);
    }

    #[test]
    fn sub_epsilon_drift_is_not_written() {
        let mut gate = PersistGate::new();
        let base = Transform::new(1.0, 0.0, 0.0);
        gate.reset_baseline(base);

        let drifted = Transform::new(1.0 + 5e-4, 0.4, -0.4);
        assert_eq!(gate.poll(0.0, drifted), None);
        assert_eq!(gate.poll(600.0, drifted), None, "drift under epsilon");
        // And the timer is disarmed afterwards.
        assert_eq!(gate.poll(1200.0, drifted), None);
    }

    #[test]
    fn first_settle_with_no_baseline_writes() {
        let mut gate = PersistGate::new();
        let t = Transform::new(0.5, 16.0, 72.0);
        assert_eq!(gate.poll(0.0, t), None);
        assert_eq!(gate.poll(600.0, t), Some(t));
    }
}
