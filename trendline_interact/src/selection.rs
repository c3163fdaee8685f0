// Copyright 2026 the Trendline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::Point;

use trendline_layout::ItemId;

/// Lifecycle of the confirmable selection.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum SelectionPhase {
    /// Nothing selected.
    #[default]
    Idle,
    /// A marquee drag is in progress.
    Selecting,
    /// Items are selected and the confirm affordance is anchored in place.
    Selected,
    /// Items are still selected but the view moved; the confirm affordance
    /// detaches from its anchor and docks to a fixed edge.
    Docked,
}

/// A selection ready to be acted on, with the screen point the confirm
/// affordance should anchor to.
#[derive(Clone, Debug, PartialEq)]
pub struct SelectionConfirm {
    /// Selected item ids, in hit order.
    pub ids: Vec<ItemId>,
    /// Screen-space anchor for the confirm affordance.
    pub anchor_screen: Point,
}

/// Holds the selected item set and where its confirm affordance lives.
///
/// The state machine is deliberately host-agnostic: pointer gestures report
/// hit-sets into it, viewport movement is reported through
/// [`SelectionState::note_view_changed`], and the host renders whatever
/// [`SelectionState::phase`] says.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SelectionState {
    ids: Vec<ItemId>,
    anchor_screen: Option<Point>,
    phase: SelectionPhase,
    revision: u64,
}

impl SelectionState {
    /// Creates an empty, idle selection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current lifecycle phase.
    #[must_use]
    pub fn phase(&self) -> SelectionPhase {
        self.phase
    }

    /// Selected ids, in the order they were hit.
    #[must_use]
    pub fn ids(&self) -> &[ItemId] {
        &self.ids
    }

    /// Number of selected items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// True when nothing is selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// True when `id` is in the selection.
    #[must_use]
    pub fn contains(&self, id: ItemId) -> bool {
        self.ids.contains(&id)
    }

    /// Screen anchor of the confirm affordance, if one is placed.
    #[must_use]
    pub fn anchor_screen(&self) -> Option<Point> {
        self.anchor_screen
    }

    /// Counter that advances on every observable change; cheap dirty check
    /// for hosts that re-render lazily.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// True when the confirm affordance has detached to the docked position.
    #[must_use]
    pub fn is_docked(&self) -> bool {
        self.phase == SelectionPhase::Docked
    }

    /// Enters the marquee phase; the previous selection stays visible until
    /// the drag resolves.
    pub fn begin_rect(&mut self) {
        self.set_phase(SelectionPhase::Selecting);
    }

    /// Resolves a marquee drag with the items it covered.
    ///
    /// An empty hit-set clears the selection; otherwise the set replaces any
    /// previous selection and the confirm affordance anchors at
    /// `anchor_screen` (typically the release corner of the marquee).
    pub fn finish_rect(
        &mut self,
        ids: Vec<ItemId>,
        anchor_screen: Point,
    ) -> Option<SelectionConfirm> {
        if ids.is_empty() {
            self.clear();
            return None;
        }
        self.ids = ids;
        self.anchor_screen = Some(anchor_screen);
        self.phase = SelectionPhase::Selected;
        self.revision += 1;
        self.confirm()
    }

    /// Selects a single clicked item, replacing any previous selection.
    pub fn select_item(&mut self, id: ItemId, anchor_screen: Point) {
        self.ids.clear();
        self.ids.push(id);
        self.anchor_screen = Some(anchor_screen);
        self.phase = SelectionPhase::Selected;
        self.revision += 1;
    }

    /// Toggles a clicked item in or out of the selection (modifier-click).
    ///
    /// Removing the last item clears the selection entirely.
    pub fn toggle_item(&mut self, id: ItemId, anchor_screen: Point) {
        if let Some(pos) = self.ids.iter().position(|&i| i == id) {
            self.ids.remove(pos);
            if self.ids.is_empty() {
                self.clear();
                return;
            }
        } else {
            self.ids.push(id);
        }
        self.anchor_screen = Some(anchor_screen);
        self.phase = SelectionPhase::Selected;
        self.revision += 1;
    }

    /// A click on empty canvas dismisses the selection.
    pub fn click_empty(&mut self) {
        self.clear();
    }

    /// Reports that the viewport moved (pan or zoom). A placed confirm
    /// affordance detaches and docks; the selected set is untouched.
    pub fn note_view_changed(&mut self) {
        if self.phase == SelectionPhase::Selected {
            self.set_phase(SelectionPhase::Docked);
        }
    }

    /// Clears everything and returns to [`SelectionPhase::Idle`].
    pub fn clear(&mut self) {
        if self.ids.is_empty() && self.phase == SelectionPhase::Idle {
            return;
        }
        self.ids.clear();
        self.anchor_screen = None;
        self.phase = SelectionPhase::Idle;
        self.revision += 1;
    }

    /// The confirmable selection, when one is anchored or docked.
    #[must_use]
    pub fn confirm(&self) -> Option<SelectionConfirm> {
        match self.phase {
            SelectionPhase::Selected | SelectionPhase::Docked => Some(SelectionConfirm {
                ids: self.ids.clone(),
                anchor_screen: self.anchor_screen?,
            }),
            _ => None,
        }
    }

    fn set_phase(&mut self, phase: SelectionPhase) {
        if self.phase != phase {
            self.phase = phase;
            self.revision += 1;
        }
    }
}
