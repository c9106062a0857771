//! Tolerances and scene defaults.
//!
//! - `CastCfg`: epsilons and lengths used by the ray caster and sight sampler.
//! - `CollisionProbe`: ring geometry approximating the player light's body.
//! - `SceneCfg`: per-scene behavior (collisions, defaults for new lights).
//!
//! The numeric defaults are tuned for scenes measured in hundreds of units
//! (a window-sized canvas). Scaled scenes should scale `adjacent_threshold`
//! and `far_length` with them.

use nalgebra::Vector2;

use crate::geom::Point;

/// Ray casting configuration (tolerances and fixed lengths).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CastCfg {
    /// Cross products below this magnitude count as parallel.
    pub eps_parallel: f64,
    /// Margin of the open parameter interval `(eps, 1 - eps)` for edge tests.
    pub eps_edge: f64,
    /// Angular offset (radians) of the two side rays cast past every vertex.
    pub angle_jitter: f64,
    /// Terminal points closer than this to the previous kept one are dropped.
    pub adjacent_threshold: f64,
    /// Ray length standing in for "unbounded".
    pub far_length: f64,
    /// Vertex count of the circle drawn for a static light.
    pub circle_segments: usize,
    /// Number of offset viewpoints around a sight source.
    pub sight_samples: usize,
    /// Distance of the offset viewpoints from the sight source.
    pub sight_offset: f64,
}

impl Default for CastCfg {
    fn default() -> Self {
        Self {
            eps_parallel: 1e-9,
            eps_edge: 1e-9,
            angle_jitter: 1e-4,
            adjacent_threshold: 0.01,
            far_length: 10_000.0,
            circle_segments: 36,
            sight_samples: 8,
            sight_offset: 20.0,
        }
    }
}

/// Probe points sampled around a candidate light position.
///
/// `outer_count` centers on a circle of `outer_radius`, each surrounded by
/// `inner_count` points at `inner_radius`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CollisionProbe {
    pub outer_count: usize,
    pub outer_radius: f64,
    pub inner_count: usize,
    pub inner_radius: f64,
}

impl Default for CollisionProbe {
    fn default() -> Self {
        Self {
            outer_count: 10,
            outer_radius: 15.0,
            inner_count: 4,
            inner_radius: 4.0,
        }
    }
}

impl CollisionProbe {
    /// All probe points around `center`, outer ring major.
    pub fn points(&self, center: Point) -> impl Iterator<Item = Point> + '_ {
        let outer = ring(center, self.outer_radius, self.outer_count);
        outer.flat_map(move |c| ring(c, self.inner_radius, self.inner_count))
    }
}

/// `n` equally spaced points on a circle, starting at angle 0.
pub(crate) fn ring(center: Point, radius: f64, n: usize) -> impl Iterator<Item = Point> {
    (0..n).map(move |i| {
        let angle = std::f64::consts::TAU * (i as f64) / (n as f64);
        center + Vector2::new(angle.cos(), angle.sin()) * radius
    })
}

/// Scene behavior and defaults.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneCfg {
    /// Reject player-light moves that would clip into obstacles.
    pub dynamic_collisions: bool,
    pub probe: CollisionProbe,
    /// Initial position of the player light.
    pub player_start: Point,
    /// Radius given to newly added static lights.
    pub static_radius: f64,
    pub cast: CastCfg,
}

impl Default for SceneCfg {
    fn default() -> Self {
        Self {
            dynamic_collisions: true,
            probe: CollisionProbe::default(),
            player_start: Vector2::new(400.0, 300.0),
            static_radius: 350.0,
            cast: CastCfg::default(),
        }
    }
}
