//! Vertex-list polygons (implicitly closed).

use nalgebra::Vector2;

use super::ray::Ray;
use super::segment::{segment_params, Bounds};
use super::types::Point;
use crate::cfg::CastCfg;

/// Ordered vertex chain; the last vertex connects back to the first.
///
/// Degenerate polygons (0..=2 vertices) are valid transient states while a
/// polygon is being drawn. All queries on them degrade to "no containment".
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Polygon {
    vertices: Vec<Point>,
}

impl Polygon {
    #[inline]
    pub fn new(vertices: Vec<Point>) -> Self {
        Self { vertices }
    }

    /// Regular `n`-gon inscribed in the circle of `radius` around `center`,
    /// first vertex at angle 0, counterclockwise.
    pub fn regular(center: Point, radius: f64, n: usize) -> Self {
        Self::new(crate::cfg::ring(center, radius, n).collect())
    }

    /// Axis-aligned rectangle with corners `(0,0)` and `(width,height)`.
    pub fn rect(width: f64, height: f64) -> Self {
        Self::new(vec![
            Vector2::new(0.0, 0.0),
            Vector2::new(width, 0.0),
            Vector2::new(width, height),
            Vector2::new(0.0, height),
        ])
    }

    #[inline]
    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    #[inline]
    pub fn first(&self) -> Option<Point> {
        self.vertices.first().copied()
    }

    #[inline]
    pub fn last(&self) -> Option<Point> {
        self.vertices.last().copied()
    }

    pub fn into_vertices(self) -> Vec<Point> {
        self.vertices
    }

    #[inline]
    pub fn add_vertex(&mut self, v: Point) {
        self.vertices.push(v);
    }

    /// Replace the last vertex; no-op on an empty polygon.
    pub fn update_last_vertex(&mut self, v: Point) {
        if let Some(last) = self.vertices.last_mut() {
            *last = v;
        }
    }

    /// Edges `(v_i, v_{i+1})` including the wrap-around edge. Empty for < 2 vertices.
    pub fn edges(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        let n = if self.vertices.len() < 2 {
            0
        } else {
            self.vertices.len()
        };
        (0..n).map(move |i| (self.vertices[i], self.vertices[(i + 1) % n]))
    }

    /// Edges of the open chain `v_0 → … → v_{n-1}` (no wrap-around edge).
    pub fn chain_edges(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        self.vertices.windows(2).map(|w| (w[0], w[1]))
    }

    /// Vertex mean; `None` for an empty polygon.
    pub fn centroid(&self) -> Option<Point> {
        if self.vertices.is_empty() {
            return None;
        }
        let sum = self
            .vertices
            .iter()
            .fold(Vector2::zeros(), |acc: Point, v| acc + v);
        Some(sum / self.vertices.len() as f64)
    }

    /// Ray parameter and point of the closest edge hit.
    pub(crate) fn ray_hit(&self, ray: &Ray, cfg: &CastCfg) -> Option<(f64, Point)> {
        let dir = ray.end - ray.begin;
        let mut best: Option<(f64, Point)> = None;
        for (a, b) in self.edges() {
            let Some((t, _)) =
                segment_params(ray.begin, ray.end, a, b, Bounds::Ray, cfg.eps_parallel)
            else {
                continue;
            };
            if best.is_none_or(|(bt, _)| t < bt) {
                best = Some((t, ray.begin + dir * t));
            }
        }
        best
    }

    /// Closest intersection of `ray` (extended past its end) with any edge.
    #[inline]
    pub fn intersect_ray(&self, ray: &Ray, cfg: &CastCfg) -> Option<Point> {
        self.ray_hit(ray, cfg).map(|(_, p)| p)
    }

    /// True if `p1–p2` properly crosses an edge. Touching at a vertex does not count.
    pub fn does_edge_intersect(&self, p1: Point, p2: Point, cfg: &CastCfg) -> bool {
        self.edges().any(|(a, b)| {
            segment_params(p1, p2, a, b, Bounds::Open(cfg.eps_edge), cfg.eps_parallel).is_some()
        })
    }

    /// Even-odd containment; see [`point_in_polygon`].
    #[inline]
    pub fn is_point_inside(&self, point: Point) -> bool {
        point_in_polygon(point, &self.vertices)
    }

    /// True if two non-adjacent edges of the closed polygon touch or cross.
    pub fn has_self_intersections(&self, cfg: &CastCfg) -> bool {
        let n = self.vertices.len();
        if n < 4 {
            return false;
        }
        let edges: Vec<(Point, Point)> = self.edges().collect();
        for i in 0..n {
            for j in (i + 2)..n {
                if i == 0 && j == n - 1 {
                    continue;
                }
                let (a, b) = edges[i];
                let (c, d) = edges[j];
                if segment_params(a, b, c, d, Bounds::Closed, cfg.eps_parallel).is_some() {
                    return true;
                }
            }
        }
        false
    }
}

impl From<Vec<Point>> for Polygon {
    fn from(vertices: Vec<Point>) -> Self {
        Self::new(vertices)
    }
}

impl FromIterator<Point> for Polygon {
    fn from_iter<I: IntoIterator<Item = Point>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Even-odd crossing-number test. Fewer than 3 vertices never contain.
///
/// Points exactly on an edge may fall on either side.
pub fn point_in_polygon(point: Point, vertices: &[Point]) -> bool {
    let n = vertices.len();
    if n < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let vi = vertices[i];
        let vj = vertices[j];
        if (vi.y > point.y) != (vj.y > point.y) {
            let x_cross = (vj.x - vi.x) * (point.y - vi.y) / (vj.y - vi.y) + vi.x;
            if point.x < x_cross {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}
