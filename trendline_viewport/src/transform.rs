// Copyright 2026 the Trendline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Point, Vec2};

/// Uniform affine map from world pixels to screen pixels.
///
/// `screen = world * scale + offset`. The map is always invertible because
/// `scale` is kept strictly positive by the owning controller.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Transform {
    /// Uniform zoom factor.
    pub scale: f64,
    /// Screen-space X translation.
    pub offset_x: f64,
    /// Screen-space Y translation.
    pub offset_y: f64,
}

impl Transform {
    /// Identity map.
    pub const IDENTITY: Self = Self {
        scale: 1.0,
        offset_x: 0.0,
        offset_y: 0.0,
    };

    /// Creates a transform from its three fields.
    #[must_use]
    pub const fn new(scale: f64, offset_x: f64, offset_y: f64) -> Self {
        Self {
            scale,
            offset_x,
            offset_y,
        }
    }

    /// Screen-space translation as a vector.
    #[must_use]
    pub fn offset(&self) -> Vec2 {
        Vec2::new(self.offset_x, self.offset_y)
    }

    /// Maps a world-space point into screen space.
    #[must_use]
    pub fn world_to_screen(&self, p: Point) -> Point {
        Point::new(
            p.x * self.scale + self.offset_x,
            p.y * self.scale + self.offset_y,
        )
    }

    /// Maps a screen-space point into world space; exact inverse of
    /// [`Transform::world_to_screen`].
    #[must_use]
    pub fn screen_to_world(&self, p: Point) -> Point {
        Point::new(
            (p.x - self.offset_x) / self.scale,
            (p.y - self.offset_y) / self.scale,
        )
    }

    /// Translates the map by a screen-space delta.
    #[must_use]
    pub fn translated(&self, delta: Vec2) -> Self {
        Self {
            scale: self.scale,
            offset_x: self.offset_x + delta.x,
            offset_y: self.offset_y + delta.y,
        }
    }

    /// Component-wise linear interpolation toward `other`.
    #[must_use]
    pub fn lerp(&self, other: &Self, t: f64) -> Self {
        Self {
            scale: self.scale + (other.scale - self.scale) * t,
            offset_x: self.offset_x + (other.offset_x - self.offset_x) * t,
            offset_y: self.offset_y + (other.offset_y - self.offset_y) * t,
        }
    }

    /// Component-wise closeness under separate scale/offset epsilons.
    #[must_use]
    pub fn approx_eq(&self, other: &Self, eps_scale: f64, eps_offset: f64) -> bool {
        (self.scale - other.scale).abs() < eps_scale
            && (self.offset_x - other.offset_x).abs() < eps_offset
            && (self.offset_y - other.offset_y).abs() < eps_offset
    }
}
