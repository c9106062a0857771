//! Parametric segment/segment intersection.
//!
//! For `p + t·r` (from `a` to `b`) and `q + u·s` (from `c` to `d`):
//! `t = (q − p) × s / (r × s)`, `u = (q − p) × r / (r × s)`.

use super::types::{cross, Point};

/// Which parameter ranges count as a hit.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Bounds {
    /// `t ∈ [0, ∞)`, `u ∈ [0, 1]`: a ray from `a` through `b` against an edge.
    Ray,
    /// `t, u ∈ (eps, 1 − eps)`: proper crossing, touching at endpoints is not a hit.
    Open(f64),
    /// `t, u ∈ [0, 1]`: any contact, endpoints included.
    Closed,
}

impl Bounds {
    #[inline]
    fn accepts(self, t: f64, u: f64) -> bool {
        match self {
            Bounds::Ray => t >= 0.0 && (0.0..=1.0).contains(&u),
            Bounds::Open(eps) => t > eps && t < 1.0 - eps && u > eps && u < 1.0 - eps,
            Bounds::Closed => (0.0..=1.0).contains(&t) && (0.0..=1.0).contains(&u),
        }
    }
}

/// Parameters `(t, u)` of the crossing of `a→b` and `c→d`, if within `bounds`.
///
/// `None` when `|r × s| < eps_parallel` (parallel or degenerate).
#[inline]
pub(crate) fn segment_params(
    a: Point,
    b: Point,
    c: Point,
    d: Point,
    bounds: Bounds,
    eps_parallel: f64,
) -> Option<(f64, f64)> {
    let r = b - a;
    let s = d - c;
    let rxs = cross(r, s);
    if rxs.abs() < eps_parallel {
        return None;
    }
    let diff = c - a;
    let t = cross(diff, s) / rxs;
    let u = cross(diff, r) / rxs;
    if bounds.accepts(t, u) {
        Some((t, u))
    } else {
        None
    }
}

/// Intersection point of `a→b` and `c→d` under `bounds`.
pub fn segment_intersect(
    a: Point,
    b: Point,
    c: Point,
    d: Point,
    bounds: Bounds,
    eps_parallel: f64,
) -> Option<Point> {
    segment_params(a, b, c, d, bounds, eps_parallel).map(|(t, _)| a + (b - a) * t)
}
