//! Light-area construction by shadow casting.
//!
//! Pipeline for one light (recomputed every frame):
//! 1. `cast_rays`: three rays per obstacle vertex, at the vertex angle and
//!    `± angle_jitter`, so one side ray grazes past every corner.
//! 2. `intersect_rays`: shorten each ray to its closest hit.
//! 3. `remove_adjacent_rays`: angle sort plus dedup of coincident terminals.
//! 4. The terminal points, in angle order, form the light area.
//!
//! Static lights skip all of this and get a plain circle of their radius.

use crate::geom::{angle_to, Point, Polygon, Ray};
use crate::scene::{LightSource, Scene};

/// Rays sorted by ascending angle with near-coincident terminals removed.
///
/// Only `remove_adjacent_rays` builds one, so holders can rely on the order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SortedRays(Vec<Ray>);

impl SortedRays {
    #[inline]
    pub fn as_slice(&self) -> &[Ray] {
        &self.0
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Terminal points in angle order.
    pub fn terminals(&self) -> Vec<Point> {
        self.0.iter().map(|r| r.end).collect()
    }

    pub fn into_polygon(self) -> Polygon {
        Polygon::new(self.terminals())
    }
}

/// Jittered rays from `light` toward every obstacle vertex within reach.
///
/// Boundary vertices are skipped. A bounded light ignores vertices farther
/// than its radius. Rays are `radius` long for static lights, else
/// `far_length`.
pub fn cast_rays(scene: &Scene, light: &LightSource) -> Vec<Ray> {
    let cfg = scene.cast_cfg();
    let cache = scene.vertex_cache();
    let length = if light.is_static {
        light.radius
    } else {
        cfg.far_length
    };
    let mut rays = Vec::with_capacity(cache.len() * 3);
    for v in cache.obstacle_vertices() {
        if light.is_bounded() && (v.point - light.position).norm() > light.radius {
            continue;
        }
        push_jittered(&mut rays, light.position, v.point, length, cfg.angle_jitter);
    }
    tracing::trace!(rays = rays.len(), "cast rays");
    rays
}

/// Push rays at `angle - jitter`, `angle`, `angle + jitter` toward `target`.
#[inline]
pub(crate) fn push_jittered(
    rays: &mut Vec<Ray>,
    origin: Point,
    target: Point,
    length: f64,
    jitter: f64,
) {
    let angle = angle_to(origin, target);
    for a in [angle - jitter, angle, angle + jitter] {
        rays.push(Ray::towards(origin, a, length));
    }
}

/// Closest hit of `ray` over `polygons`, if nearer than its current end.
pub(crate) fn closest_hit(scene: &Scene, ray: &Ray) -> Option<Point> {
    let cfg = scene.cast_cfg();
    let mut best: Option<(f64, Point)> = None;
    for poly in scene.polygons() {
        if let Some((t, p)) = poly.ray_hit(ray, cfg) {
            if best.is_none_or(|(bt, _)| t < bt) {
                best = Some((t, p));
            }
        }
    }
    best.filter(|&(t, _)| t < 1.0).map(|(_, p)| p)
}

/// Shorten every ray to its closest hit over all polygons, boundary included.
///
/// Rays that hit nothing closer than their end keep it.
pub fn intersect_rays(rays: &mut [Ray], scene: &Scene) {
    for ray in rays.iter_mut() {
        if let Some(p) = closest_hit(scene, ray) {
            ray.end = p;
        }
    }
}

/// Sort by angle and drop rays whose terminal lies within
/// `adjacent_threshold` of the previously kept terminal.
pub fn remove_adjacent_rays(mut rays: Vec<Ray>, adjacent_threshold: f64) -> SortedRays {
    rays.sort_by(|a, b| a.angle.total_cmp(&b.angle));
    let mut kept: Vec<Ray> = Vec::with_capacity(rays.len());
    for ray in rays {
        if let Some(prev) = kept.last() {
            if (ray.end - prev.end).norm() <= adjacent_threshold {
                continue;
            }
        }
        kept.push(ray);
    }
    SortedRays(kept)
}

/// The lit region of `light` as a polygon.
///
/// Static lights: a regular `circle_segments`-gon of the light's radius.
/// Dynamic lights: the terminal points of the cast, in angle order.
pub fn create_light_area(scene: &Scene, light: &LightSource) -> Polygon {
    let cfg = scene.cast_cfg();
    if light.is_static {
        return Polygon::regular(light.position, light.radius, cfg.circle_segments);
    }
    let mut rays = cast_rays(scene, light);
    intersect_rays(&mut rays, scene);
    remove_adjacent_rays(rays, cfg.adjacent_threshold).into_polygon()
}

/// Light areas of every light in the scene, in light order.
pub fn light_areas(scene: &Scene) -> Vec<Polygon> {
    scene
        .lights()
        .iter()
        .map(|l| create_light_area(scene, l))
        .collect()
}

impl Scene {
    /// See [`create_light_area`].
    #[inline]
    pub fn create_light_area(&self, light: &LightSource) -> Polygon {
        create_light_area(self, light)
    }

    /// See [`cast_rays`].
    #[inline]
    pub fn cast_rays(&self, light: &LightSource) -> Vec<Ray> {
        cast_rays(self, light)
    }
}
