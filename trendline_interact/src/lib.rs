// Copyright 2026 the Trendline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trendline Interact: pointer, wheel, and selection state machines.
//!
//! This crate turns raw pointer/wheel input into viewport movement and
//! selection changes. It owns no windowing or event loop; hosts forward
//! their toolkit's events and timestamps and the state machines here drive a
//! [`trendline_viewport::ViewportController`] plus a [`SelectionState`].
//!
//! ## Gesture disambiguation
//!
//! A plain pointer-down does not immediately pan: it *arms* a pending pan,
//! and only movement past a small threshold promotes it to an active drag.
//! This is what makes click vs. drag unambiguous. Symmetrically, a release
//! that ends a drag records a pan-end timestamp so the click event most
//! toolkits deliver right after the release can be suppressed.
//!
//! - plain down → pending pan → (move > 5px) → 1:1 panning
//! - shift down → rectangle selection → release → hit-set or zoom-to-rect
//! - wheel + modifier → cursor-anchored zoom; plain wheel → pan
//!
//! Every pointer-down first cancels any in-flight viewport animation, so a
//! grab always starts from the visually-current position.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::Point;
//! use trendline_interact::{Modifiers, PointerController, PointerUpOutcome};
//! use trendline_viewport::{
//!     Padding, ViewRect, ViewportController, ViewportLimits, WorldSize,
//! };
//!
//! let mut vp = ViewportController::new(
//!     ViewRect::new(1200.0, 700.0),
//!     Padding::default(),
//!     WorldSize::new(3000.0, 640.0),
//!     ViewportLimits::default(),
//! );
//! let mut pointer = PointerController::new();
//!
//! pointer.on_pointer_down(&mut vp, Point::new(100.0, 100.0), Modifiers::empty());
//! pointer.on_pointer_move(&mut vp, Point::new(103.0, 100.0));
//! // 3px of travel is still a click, not a drag.
//! let outcome = pointer.on_pointer_up(&mut vp, Point::new(103.0, 100.0), 0.0);
//! assert!(matches!(outcome, PointerUpOutcome::Click(_)));
//! ```

mod fit;
mod pointer;
mod selection;

pub use fit::{RECT_FIT_MARGIN_PX, fit_rect_transform};
pub use pointer::{
    CLICK_SUPPRESS_MS, DRAG_THRESHOLD_PX, Modifiers, PointerController, PointerUpOutcome,
    WHEEL_ZOOM_RATE,
};
pub use selection::{SelectionConfirm, SelectionPhase, SelectionState};

use trendline_viewport::ViewportController;

/// The hotkey surface the engine consumes.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Hotkey {
    /// Reset the viewport to the fit transform (animated).
    FitToView,
    /// Clear the active selection (Escape / explicit combo).
    ClearSelection,
}

/// Applies a hotkey to the viewport and selection.
pub fn apply_hotkey(
    hotkey: Hotkey,
    viewport: &mut ViewportController,
    selection: &mut SelectionState,
) {
    match hotkey {
        Hotkey::FitToView => viewport.fit(),
        Hotkey::ClearSelection => selection.clear(),
    }
}
