// Copyright 2026 the Trendline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use hashbrown::HashMap;

use trendline_layout::ItemId;

/// Duration of a highlight transition, in milliseconds.
pub const HIGHLIGHT_MS: f64 = 200.0;

/// Cubic ease-out over `t` in `[0, 1]`.
fn ease_out(t: f64) -> f64 {
    let inv = 1.0 - t.clamp(0.0, 1.0);
    1.0 - inv * inv * inv
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Direction {
    In,
    Out,
}

#[derive(Copy, Clone, Debug, PartialEq)]
struct Entry {
    progress: f64,
    from: f64,
    started_at: f64,
    direction: Direction,
}

/// Per-item highlight progress, animated independently per id.
///
/// Each focus or unfocus starts its own eased transition from the item's
/// current progress, so concurrent multi-select add/remove animates each
/// item on its own clock. Entries whose unfocus transition completes are
/// pruned; an animator at rest holds only fully-focused entries and
/// [`HighlightAnimator::advance`] does no work.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct HighlightAnimator {
    entries: HashMap<ItemId, Entry>,
}

impl HighlightAnimator {
    /// Creates an empty animator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts animating `id` toward focused (`true`) or unfocused (`false`).
    ///
    /// Redundant requests (already at or heading to the target) are no-ops;
    /// reversals start from the current progress without a visual jump.
    pub fn set_focused(&mut self, id: ItemId, focused: bool, now_ms: f64) {
        let direction = if focused {
            Direction::In
        } else {
            Direction::Out
        };
        match self.entries.get_mut(&id) {
            Some(entry) => {
                if entry.direction != direction {
                    *entry = Entry {
                        progress: entry.progress,
                        from: entry.progress,
                        started_at: now_ms,
                        direction,
                    };
                }
            }
            None if focused => {
                self.entries.insert(
                    id,
                    Entry {
                        progress: 0.0,
                        from: 0.0,
                        started_at: now_ms,
                        direction,
                    },
                );
            }
            // Unfocusing an absent id: already at rest.
            None => {}
        }
    }

    /// Advances every transition to `now_ms`; returns whether any transition
    /// is still running (callers keep scheduling frames only while true).
    pub fn advance(&mut self, now_ms: f64) -> bool {
        self.entries.retain(|_, entry| {
            let t = (now_ms - entry.started_at) / HIGHLIGHT_MS;
            let target = match entry.direction {
                Direction::In => 1.0,
                Direction::Out => 0.0,
            };
            entry.progress = entry.from + (target - entry.from) * ease_out(t);
            // A completed unfocus is pruned; a completed focus stays at 1.
            !(entry.direction == Direction::Out && entry.progress <= 0.0 && t >= 1.0)
        });
        self.entries.values().any(|e| {
            let t = (now_ms - e.started_at) / HIGHLIGHT_MS;
            t < 1.0
        })
    }

    /// Highlight progress for `id`, `0.0` when untracked.
    #[must_use]
    pub fn progress(&self, id: ItemId) -> f64 {
        self.entries.get(&id).map_or(0.0, |e| e.progress)
    }

    /// True while any transition still needs frames.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        !self.entries.is_empty()
            && self
                .entries
                .values()
                .any(|e| e.direction == Direction::Out || e.progress < 1.0)
    }

    /// Drops all state (view teardown).
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn focus_eases_in_and_settles_at_one() {
        let mut anim = HighlightAnimator::new();
        anim.set_focused(ItemId(1), true, 0.0);
        assert_eq!(anim.progress(ItemId(1)), 0.0);

        assert!(anim.advance(100.0));
        let halfway = anim.progress(ItemId(1));
        // Cubic ease-out at t=0.5 is 0.875.
        assert!((halfway - 0.875).abs() < 1e-12);

        assert!(!anim.advance(250.0));
        assert_eq!(anim.progress(ItemId(1)), 1.0);
        // Settled focus stays tracked at full progress.
        assert!(!anim.advance(10_000.0));
        assert_eq!(anim.progress(ItemId(1)), 1.0);
    }

    #[test]
    fn completed_unfocus_is_pruned() {
        let mut anim = HighlightAnimator::new();
        anim.set_focused(ItemId(1), true, 0.0);
        anim.advance(300.0);
        anim.set_focused(ItemId(1), false, 300.0);
        anim.advance(400.0);
        assert!(anim.progress(ItemId(1)) > 0.0);

        anim.advance(600.0);
        assert_eq!(anim.progress(ItemId(1)), 0.0);
        assert!(!anim.is_animating());
    }

    #[test]
    fn items_animate_independently() {
        let mut anim = HighlightAnimator::new();
        anim.set_focused(ItemId(1), true, 0.0);
        anim.set_focused(ItemId(2), true, 150.0);
        anim.advance(200.0);
        assert_eq!(anim.progress(ItemId(1)), 1.0);
        let p2 = anim.progress(ItemId(2));
        assert!(p2 > 0.0 && p2 < 1.0, "second item still mid-flight: {p2}");
    }

    #[test]
    fn reversal_starts_from_current_progress() {
        let mut anim = HighlightAnimator::new();
        anim.set_focused(ItemId(1), true, 0.0);
        anim.advance(100.0);
        let mid = anim.progress(ItemId(1));
        anim.set_focused(ItemId(1), false, 100.0);
        // Immediately after the reversal nothing has moved yet.
        anim.advance(100.0);
        assert!((anim.progress(ItemId(1)) - mid).abs() < 1e-12);
        // And it decays from there.
        anim.advance(150.0);
        assert!(anim.progress(ItemId(1)) < mid);
    }

    #[test]
    fn unfocusing_an_untracked_id_is_a_no_op() {
        let mut anim = HighlightAnimator::new();
        anim.set_focused(ItemId(9), false, 0.0);
        assert!(!anim.is_animating());
        assert!(!anim.advance(100.0));
    }
}
