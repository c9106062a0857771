use super::types::Point;
use nalgebra::Vector2;

/// A finite ray: origin, terminal point and the angle it was cast at.
///
/// The angle is kept separately from `end - begin` so that jittered rays keep
/// their nominal sort key even after being shortened to a hit point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    pub begin: Point,
    pub end: Point,
    pub angle: f64,
}

impl Ray {
    #[inline]
    pub fn new(begin: Point, end: Point, angle: f64) -> Self {
        Self { begin, end, angle }
    }

    /// Ray of `length` from `origin` in direction `angle`.
    #[inline]
    pub fn towards(origin: Point, angle: f64, length: f64) -> Self {
        let end = origin + Vector2::new(angle.cos(), angle.sin()) * length;
        Self::new(origin, end, angle)
    }

    #[inline]
    pub fn length(&self) -> f64 {
        (self.end - self.begin).norm()
    }

    /// Rotate around `begin` by `delta` radians, keeping the length.
    pub fn rotate(&self, delta: f64) -> Self {
        Self::towards(self.begin, self.angle + delta, self.length())
    }
}
