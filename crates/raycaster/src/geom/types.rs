//! Point alias, vertex keys, and small vector helpers.

use nalgebra::Vector2;

/// A point (or direction) in the plane.
pub type Point = Vector2<f64>;

/// 2D cross product `a × b` (signed parallelogram area).
#[inline]
pub fn cross(a: Point, b: Point) -> f64 {
    a.x * b.y - a.y * b.x
}

/// Angle of the direction `from → to`, in `(-π, π]`.
#[inline]
pub fn angle_to(from: Point, to: Point) -> f64 {
    (to.y - from.y).atan2(to.x - from.x)
}

/// Hashable key for a vertex coordinate.
///
/// Equality is on the exact bit pattern, with `-0.0` folded into `0.0`.
/// Vertices come from discrete user input, so coincident vertices of adjacent
/// polygons share bits exactly.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct VertexKey(u64, u64);

impl VertexKey {
    #[inline]
    pub fn new(p: Point) -> Self {
        Self(fold_zero(p.x).to_bits(), fold_zero(p.y).to_bits())
    }
}

impl From<Point> for VertexKey {
    fn from(p: Point) -> Self {
        Self::new(p)
    }
}

#[inline]
fn fold_zero(v: f64) -> f64 {
    if v == 0.0 {
        0.0
    } else {
        v
    }
}
