// Copyright 2026 the Trendline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use trendline_layout::ItemId;

/// Delay before a hover target is shown, in milliseconds.
pub const HOVER_SHOW_MS: f64 = 150.0;

/// Debounce before a vacated hover target is hidden, in milliseconds.
pub const HOVER_HIDE_MS: f64 = 100.0;

#[derive(Copy, Clone, Debug, PartialEq)]
enum Pending {
    Show { id: ItemId, at_ms: f64 },
    Hide { at_ms: f64 },
}

/// A change the host should apply to its hover affordance.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum HoverChange {
    /// Show (or move) the affordance to this item.
    Show(ItemId),
    /// Hide the affordance.
    Hide,
}

/// Show-delay / hide-debounce state machine for hover affordances.
///
/// Sweeping the pointer across adjacent items restarts the show delay each
/// time, and briefly leaving a shown item does not hide it, so the
/// affordance never flickers. Timestamps are caller-supplied milliseconds;
/// [`HoverTimer::poll`] is idempotent once a deadline has fired.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct HoverTimer {
    shown: Option<ItemId>,
    pending: Option<Pending>,
}

impl HoverTimer {
    /// Creates an idle timer.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            shown: None,
            pending: None,
        }
    }

    /// The pointer is over `id`.
    pub fn hover(&mut self, id: ItemId, now_ms: f64) {
        if self.shown == Some(id) {
            // Re-entering the shown item cancels a pending hide.
            self.pending = None;
            return;
        }
        self.pending = Some(Pending::Show {
            id,
            at_ms: now_ms + HOVER_SHOW_MS,
        });
    }

    /// The pointer left all items.
    pub fn leave(&mut self, now_ms: f64) {
        self.pending = match self.shown {
            Some(_) => Some(Pending::Hide {
                at_ms: now_ms + HOVER_HIDE_MS,
            }),
            None => None,
        };
    }

    /// Fires any due deadline and reports the resulting change.
    pub fn poll(&mut self, now_ms: f64) -> Option<HoverChange> {
        match self.pending {
            Some(Pending::Show { id, at_ms }) if now_ms >= at_ms => {
                self.pending = None;
                self.shown = Some(id);
                Some(HoverChange::Show(id))
            }
            Some(Pending::Hide { at_ms }) if now_ms >= at_ms => {
                self.pending = None;
                self.shown = None;
                Some(HoverChange::Hide)
            }
            _ => None,
        }
    }

    /// The currently shown item, if any.
    #[must_use]
    pub fn shown(&self) -> Option<ItemId> {
        self.shown
    }

    /// Cancels everything (view teardown); no deadline fires afterwards.
    pub fn cancel(&mut self) {
        self.shown = None;
        self.pending = None;
    }
}
