//! Visibility polygons from arbitrary viewpoints.
//!
//! Unlike the light caster this works from any point (not a registered
//! light), casts toward boundary vertices too, and never applies a radius
//! cutoff. `sight_polygons` layers a ring of slightly offset viewpoints
//! around the source; drawn translucently they give a soft penumbra.

use crate::caster::push_jittered;
use crate::cfg::ring;
use crate::geom::{Point, Ray};
use crate::scene::Scene;

/// Visibility polygon of `source`: closest hits of three jittered rays per
/// distinct vertex (boundary included), sorted by angle.
///
/// Rays that hit nothing are dropped, so with no polygons the result is empty.
pub fn ray_intersections(scene: &Scene, source: Point) -> Vec<Point> {
    let cfg = scene.cast_cfg();
    let cache = scene.vertex_cache();
    let mut rays: Vec<Ray> = Vec::with_capacity(cache.len() * 3);
    for v in cache.iter() {
        push_jittered(&mut rays, source, v.point, cfg.far_length, cfg.angle_jitter);
    }
    let mut hits: Vec<(f64, Point)> = rays
        .iter()
        .filter_map(|ray| nearest_hit(scene, ray).map(|p| (ray.angle, p)))
        .collect();
    hits.sort_by(|a, b| a.0.total_cmp(&b.0));
    hits.into_iter().map(|(_, p)| p).collect()
}

fn nearest_hit(scene: &Scene, ray: &Ray) -> Option<Point> {
    let cfg = scene.cast_cfg();
    scene
        .polygons()
        .iter()
        .filter_map(|poly| poly.ray_hit(ray, cfg))
        .min_by(|a, b| a.0.total_cmp(&b.0))
        .map(|(_, p)| p)
}

/// Primary visibility polygon of `source` followed by one polygon per offset
/// viewpoint (`sight_samples` points at `sight_offset` around `source`).
pub fn sight_polygons(scene: &Scene, source: Point) -> Vec<Vec<Point>> {
    let cfg = scene.cast_cfg();
    let mut out = Vec::with_capacity(cfg.sight_samples + 1);
    out.push(ray_intersections(scene, source));
    for p in ring(source, cfg.sight_offset, cfg.sight_samples) {
        out.push(ray_intersections(scene, p));
    }
    out
}

impl Scene {
    /// See [`sight_polygons`].
    #[inline]
    pub fn sight_polygons(&self, source: Point) -> Vec<Vec<Point>> {
        sight_polygons(self, source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cfg::SceneCfg;
    use crate::geom::Polygon;
    use nalgebra::vector;

    #[test]
    fn empty_scene_sees_nothing() {
        let s = Scene::default();
        assert!(ray_intersections(&s, vector![0.0, 0.0]).is_empty());
        let layers = sight_polygons(&s, vector![0.0, 0.0]);
        assert_eq!(layers.len(), 9);
        assert!(layers.iter().all(Vec::is_empty));
    }

    #[test]
    fn open_room_sees_all_four_corners() {
        let s = Scene::with_boundary_rect(SceneCfg::default(), 100.0, 100.0);
        let pts = ray_intersections(&s, vector![30.0, 50.0]);
        assert_eq!(pts.len(), 12);
        for corner in [
            vector![0.0, 0.0],
            vector![100.0, 0.0],
            vector![100.0, 100.0],
            vector![0.0, 100.0],
        ] {
            assert!(
                pts.iter().any(|p| (p - corner).norm() < 1e-6),
                "corner {corner:?} missing"
            );
        }
        // angle order: atan2 from the source is non-decreasing
        let angles: Vec<f64> = pts.iter().map(|p| (p.y - 50.0).atan2(p.x - 30.0)).collect();
        for w in angles.windows(2) {
            assert!(w[0] <= w[1] + 1e-3, "angles out of order: {w:?}");
        }
    }

    #[test]
    fn obstacle_hides_far_wall() {
        let mut s = Scene::with_boundary_rect(SceneCfg::default(), 100.0, 100.0);
        s.add_polygon(Polygon::new(vec![
            vector![40.0, 40.0],
            vector![60.0, 40.0],
            vector![60.0, 60.0],
            vector![40.0, 60.0],
        ]));
        let source = vector![10.0, 50.0];
        let pts = ray_intersections(&s, source);
        assert_eq!(pts.len(), 24);
        // nothing is seen on the right wall between the shadow edges
        for p in &pts {
            let on_right_wall = (p.x - 100.0).abs() < 1e-9;
            assert!(!(on_right_wall && (p.y - 50.0).abs() < 20.0), "saw {p:?} through the box");
        }
    }

    #[test]
    fn sight_layers_are_offset_by_twenty() {
        let s = Scene::with_boundary_rect(SceneCfg::default(), 200.0, 200.0);
        let layers = s.sight_polygons(vector![100.0, 100.0]);
        assert_eq!(layers.len(), 9);
        assert!(layers.iter().all(|l| l.len() == 12));
        assert_eq!(layers[1], ray_intersections(&s, vector![120.0, 100.0]));
    }
}
