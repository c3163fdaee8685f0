// Copyright 2026 the Trendline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{CubicBez, ParamCurve, Point};

use crate::window::BaselineDataPoint;

/// Per-point tangents for a monotone cubic Hermite spline (Fritsch-Carlson).
///
/// Tangents come from averaging neighboring secant slopes, are forced to
/// zero at local extrema (secant sign change), and are limited so no segment
/// can overshoot its endpoints. Input x must be nondecreasing.
#[must_use]
pub fn monotone_tangents(points: &[BaselineDataPoint]) -> Vec<f64> {
    let n = points.len();
    if n < 2 {
        return vec![0.0; n];
    }

    let secant = |i: usize| -> f64 {
        let dx = points[i + 1].x - points[i].x;
        if dx > f64::EPSILON {
            (points[i + 1].y - points[i].y) / dx
        } else {
            0.0
        }
    };

    let mut m = vec![0.0; n];
    m[0] = secant(0);
    m[n - 1] = secant(n - 2);
    for i in 1..n - 1 {
        let (prev, next) = (secant(i - 1), secant(i));
        // A slope sign change marks a local extremum; flatten it.
        m[i] = if prev * next <= 0.0 {
            0.0
        } else {
            (prev + next) / 2.0
        };
    }

    // Limiting pass: keep each segment's tangent vector inside the circle of
    // radius 3 around its secant, which forbids overshoot.
    for i in 0..n - 1 {
        let d = secant(i);
        if d == 0.0 {
            m[i] = 0.0;
            m[i + 1] = 0.0;
            continue;
        }
        let a = m[i] / d;
        let b = m[i + 1] / d;
        let h = a.hypot(b);
        if h > 3.0 {
            let t = 3.0 / h;
            m[i] = t * a * d;
            m[i + 1] = t * b * d;
        }
    }
    m
}

/// Converts the sample points into the cubic Bezier segments that draw the
/// smoothed curve.
///
/// Each Hermite segment becomes a Bezier with control points at 1/3 and 2/3
/// of the horizontal span, offset vertically by the tangent-scaled slope.
/// With the control x fixed at the thirds, `x(t)` is linear in `t`, which is
/// what makes exact hover read-back possible.
#[must_use]
pub fn monotone_segments(points: &[BaselineDataPoint]) -> Vec<CubicBez> {
    if points.len() < 2 {
        return Vec::new();
    }
    let m = monotone_tangents(points);
    points
        .windows(2)
        .zip(m.windows(2))
        .map(|(p, t)| hermite_to_bezier(&p[0], &p[1], t[0], t[1]))
        .collect()
}

/// The hover indicator for a horizontal position on the curve.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct HoverReadback {
    /// The statistically correct value: linear interpolation of the
    /// underlying averages between the bracketing samples.
    pub value: f64,
    /// The vertical position of the *rendered* curve at this x, so the
    /// indicator sits exactly on the drawn line.
    pub y: f64,
}

/// Reads the baseline back at a horizontal position.
///
/// Returns `None` outside the sampled range or with fewer than two points.
#[must_use]
pub fn hover_readback(points: &[BaselineDataPoint], x: f64) -> Option<HoverReadback> {
    if points.len() < 2 {
        return None;
    }
    let first = points.first()?;
    let last = points.last()?;
    if x < first.x || x > last.x {
        return None;
    }

    let idx = points.partition_point(|p| p.x <= x).min(points.len() - 1);
    let (p0, p1) = (&points[idx - 1], &points[idx]);
    let dx = p1.x - p0.x;
    let t = if dx > f64::EPSILON {
        ((x - p0.x) / dx).clamp(0.0, 1.0)
    } else {
        0.0
    };

    let m = monotone_tangents(points);
    let segment = hermite_to_bezier(p0, p1, m[idx - 1], m[idx]);
    Some(HoverReadback {
        value: p0.value + (p1.value - p0.value) * t,
        y: segment.eval(t).y,
    })
}

fn hermite_to_bezier(p0: &BaselineDataPoint, p1: &BaselineDataPoint, m0: f64, m1: f64) -> CubicBez {
    let dx = p1.x - p0.x;
    CubicBez::new(
        Point::new(p0.x, p0.y),
        Point::new(p0.x + dx / 3.0, p0.y + m0 * dx / 3.0),
        Point::new(p1.x - dx / 3.0, p1.y - m1 * dx / 3.0),
        Point::new(p1.x, p1.y),
    )
}
