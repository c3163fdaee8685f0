// Copyright 2026 the Trendline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trendline Viewport: pan/zoom transform state for the timeline surface.
//!
//! This crate owns the affine map from world pixels to screen pixels
//! (`screen = world * scale + offset`) and everything that governs how it is
//! allowed to move:
//!
//! - [`Transform`]: the map itself, with exact world/screen conversion.
//! - Fit and clamp math: the fit-to-width minimum scale, a dynamic
//!   overscroll that loosens with zoom so edge items can be centered, and
//!   top-snapping for content shorter than the view.
//! - [`TransformAnimator`]: lerp-to-target smoothing with an epsilon stop,
//!   driven by a framework-agnostic `advance(dt)`.
//! - Persistence: viewport state namespaced by a [`ContentHash`] through the
//!   [`ViewportStore`] contract, with debounced, epsilon-gated writeback.
//! - [`ViewportController`]: the single owner tying it together, including
//!   the strict one-correction priority chain applied when the world size
//!   changes under an unchanged content hash.
//!
//! The crate is headless: no event loop, no clock, no storage backend. Hosts
//! drive animation with `advance(dt_ms)`, persistence with
//! `poll_persist(now_ms)`, and provide their own [`ViewportStore`].
//!
//! ## Minimal example
//!
//! ```rust
//! use trendline_viewport::{
//!     MemoryStore, Padding, ViewRect, ViewportController, ViewportLimits, ViewportStore,
//!     WorldSize, content_hash,
//! };
//!
//! let mut store = MemoryStore::default();
//! let mut vp = ViewportController::new(
//!     ViewRect::new(1200.0, 700.0),
//!     Padding::default(),
//!     WorldSize::new(3000.0, 640.0),
//!     ViewportLimits::default(),
//! );
//!
//! // First load of a context with no saved state: auto-fit.
//! let hash = content_hash(&"channel-42", &["tag:music"]);
//! vp.set_content_hash(hash, &store);
//! assert!((vp.transform().scale - vp.min_scale()).abs() < 1e-9);
//!
//! // Interactions mutate the transform; the host persists on quiet.
//! vp.pan_immediate(kurbo::Vec2::new(-120.0, 0.0));
//! if let Some((key, cfg)) = vp.poll_persist(600.0) {
//!     store.set(key, cfg);
//! }
//! ```

mod animator;
mod bounds;
mod controller;
mod persist;
mod transform;

pub use animator::{ANIM_EPS_OFFSET, ANIM_EPS_SCALE, SMOOTH, TransformAnimator};
pub use bounds::{Padding, ViewRect, WorldSize, auto_fit, clamp_transform, min_scale};
pub use controller::{
    AnchorRequest, ViewportController, ViewportDebugInfo, ViewportLimits,
};
pub use persist::{
    ContentHash, MemoryStore, PERSIST_DEBOUNCE_MS, PersistGate, ViewportConfig, ViewportStore,
    content_hash,
};
pub use transform::Transform;
