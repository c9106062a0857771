//! Scene generators: the fixed demo layout and seeded random obstacle fields.
//!
//! Model (random)
//! - Split the boundary rectangle into a `cols × rows` grid. Each occupied cell
//!   gets one convex obstacle: `n` angles around the cell center with bounded
//!   angular jitter, radii jittered below the cell's inradius.
//! - Obstacles never leave their cell, so they never overlap each other or
//!   cross the boundary.
//! - Determinism uses a replay token `(seed, index)` mixed into a single RNG.

use nalgebra::Vector2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::cfg::SceneCfg;
use crate::geom::Polygon;
use crate::scene::Scene;

/// The five demo obstacles of an 800×600 canvas.
pub fn example_obstacles() -> Vec<Polygon> {
    let poly = |pts: &[(f64, f64)]| -> Polygon {
        pts.iter().map(|&(x, y)| Vector2::new(x, y)).collect()
    };
    vec![
        poly(&[(111.0, 104.0), (153.0, 188.0), (221.0, 105.0)]),
        poly(&[(556.0, 98.0), (541.0, 167.0), (602.0, 132.0), (634.0, 60.0)]),
        poly(&[(245.0, 268.0), (263.0, 416.0), (452.0, 481.0), (456.0, 356.0)]),
        poly(&[(544.0, 273.0), (573.0, 402.0), (720.0, 234.0), (608.0, 229.0)]),
        poly(&[(107.0, 270.0), (77.0, 407.0), (160.0, 354.0)]),
    ]
}

/// Replay token to make draws reproducible and indexable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReplayToken {
    pub seed: u64,
    pub index: u64,
}

impl ReplayToken {
    pub fn new(seed: u64, index: u64) -> Self {
        Self { seed, index }
    }

    /// The token of the following draw in the same stream.
    #[inline]
    pub fn advance(self) -> Self {
        Self {
            index: self.index.wrapping_add(1),
            ..self
        }
    }

    /// RNG for this draw; neighbouring indices give unrelated streams.
    pub fn rng(self) -> StdRng {
        let salt = splitmix64(self.index.wrapping_add(GOLDEN_GAMMA));
        StdRng::seed_from_u64(splitmix64(self.seed ^ salt))
    }
}

const GOLDEN_GAMMA: u64 = 0x9e37_79b9_7f4a_7c15;

/// SplitMix64 finalizer.
fn splitmix64(z: u64) -> u64 {
    let z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    let z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^ (z >> 31)
}

/// Random obstacle field configuration.
#[derive(Clone, Copy, Debug)]
pub struct FieldCfg {
    pub width: f64,
    pub height: f64,
    pub cols: usize,
    pub rows: usize,
    /// Probability that a cell holds an obstacle.
    pub fill: f64,
    /// Vertex count range (inclusive), clamped to at least 3.
    pub vertices_min: usize,
    pub vertices_max: usize,
    /// Angular jitter as a fraction of the base spacing. Clamped to [0, 0.49].
    pub angle_jitter_frac: f64,
    /// Radii are drawn from `[radius_min_frac, 0.9]` of the cell inradius.
    pub radius_min_frac: f64,
}

impl Default for FieldCfg {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
            cols: 4,
            rows: 3,
            fill: 0.75,
            vertices_min: 3,
            vertices_max: 7,
            angle_jitter_frac: 0.3,
            radius_min_frac: 0.4,
        }
    }
}

/// Random convex obstacles, one per occupied grid cell.
pub fn draw_obstacles(cfg: FieldCfg, tok: ReplayToken) -> Vec<Polygon> {
    let mut rng = tok.rng();
    let cols = cfg.cols.max(1);
    let rows = cfg.rows.max(1);
    let cw = cfg.width / cols as f64;
    let ch = cfg.height / rows as f64;
    let inradius = 0.5 * cw.min(ch);
    let r_lo = cfg.radius_min_frac.clamp(0.05, 0.9) * inradius;
    let r_hi = 0.9 * inradius;
    let aj = cfg.angle_jitter_frac.clamp(0.0, 0.49);
    let v_lo = cfg.vertices_min.max(3);
    let v_hi = cfg.vertices_max.max(v_lo);

    let mut out = Vec::new();
    for row in 0..rows {
        for col in 0..cols {
            if rng.gen::<f64>() >= cfg.fill {
                continue;
            }
            let center = Vector2::new((col as f64 + 0.5) * cw, (row as f64 + 0.5) * ch);
            let n = rng.gen_range(v_lo..=v_hi);
            let delta = std::f64::consts::TAU / n as f64;
            let phase = rng.gen::<f64>() * std::f64::consts::TAU;
            // one radius per polygon keeps it convex under angular jitter
            let r = if r_hi > r_lo {
                rng.gen_range(r_lo..r_hi)
            } else {
                r_hi
            };
            let poly: Polygon = (0..n)
                .map(|k| {
                    let jitter = (rng.gen::<f64>() * 2.0 - 1.0) * aj * delta;
                    let th = phase + k as f64 * delta + jitter;
                    center + Vector2::new(th.cos(), th.sin()) * r
                })
                .collect();
            out.push(poly);
        }
    }
    out
}

/// A scene with a `width × height` boundary and a random obstacle field.
///
/// The player light starts at the center of the first empty cell (or the
/// canvas center when every cell is filled).
pub fn draw_scene(scene_cfg: SceneCfg, cfg: FieldCfg, tok: ReplayToken) -> Scene {
    let mut scene = Scene::with_boundary_rect(scene_cfg, cfg.width, cfg.height);
    for poly in draw_obstacles(cfg, tok) {
        scene.add_polygon(poly);
    }
    let cols = cfg.cols.max(1);
    let rows = cfg.rows.max(1);
    let cw = cfg.width / cols as f64;
    let ch = cfg.height / rows as f64;
    let start = (0..rows)
        .flat_map(|r| (0..cols).map(move |c| (r, c)))
        .map(|(r, c)| Vector2::new((c as f64 + 0.5) * cw, (r as f64 + 0.5) * ch))
        .find(|&p| !scene.is_point_inside_polygon(p))
        .unwrap_or_else(|| Vector2::new(cfg.width * 0.5, cfg.height * 0.5));
    scene.set_dynamic_light_collisions(false);
    scene.update_light_source_position(0, start);
    scene.set_dynamic_light_collisions(scene_cfg.dynamic_collisions);
    scene
}
