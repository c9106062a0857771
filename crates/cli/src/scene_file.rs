//! JSON scene and result files.
//!
//! Points are `[x, y]` pairs. The boundary is optional, but obstacles need
//! one: the first committed polygon of a scene is always its boundary.

use anyhow::{bail, ensure, Context, Result};
use raycaster::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub type XY = [f64; 2];

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SceneFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub boundary: Option<Vec<XY>>,
    #[serde(default)]
    pub obstacles: Vec<Vec<XY>>,
    /// The first non-static entry places the player light; others are added.
    #[serde(default)]
    pub lights: Vec<LightEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dynamic_collisions: Option<bool>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LightEntry {
    pub position: XY,
    #[serde(rename = "static", default)]
    pub is_static: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radius: Option<f64>,
}

/// One light's lit polygon.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LightArea {
    pub index: usize,
    #[serde(rename = "static")]
    pub is_static: bool,
    pub position: XY,
    pub vertices: Vec<XY>,
}

/// Output of `cli cast`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CastOutput {
    pub lights: Vec<LightArea>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sight: Option<Vec<Vec<XY>>>,
}

#[inline]
pub fn xy(p: Point) -> XY {
    [p.x, p.y]
}

#[inline]
pub fn point(a: XY) -> Point {
    Vec2::new(a[0], a[1])
}

fn polygon(verts: &[XY]) -> Polygon {
    verts.iter().copied().map(point).collect()
}

impl SceneFile {
    pub fn read(path: &Path) -> Result<Self> {
        let bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
        serde_json::from_slice(&bytes).with_context(|| format!("parsing {}", path.display()))
    }

    /// Snapshot of a scene's committed polygons and lights.
    pub fn from_scene(scene: &Scene) -> Self {
        let to_xy = |p: &Polygon| p.vertices().iter().copied().map(xy).collect::<Vec<_>>();
        Self {
            boundary: scene.boundary().map(to_xy),
            obstacles: scene.obstacles().iter().map(to_xy).collect(),
            lights: scene
                .lights()
                .iter()
                .map(|l| LightEntry {
                    position: xy(l.position),
                    is_static: l.is_static,
                    radius: l.is_static.then_some(l.radius),
                })
                .collect(),
            dynamic_collisions: Some(scene.cfg().dynamic_collisions),
        }
    }

    /// Build a validated scene.
    ///
    /// Fails on obstacles without a boundary, degenerate or self-crossing
    /// obstacles, obstacles crossing earlier ones, and lights that cannot be
    /// placed.
    pub fn to_scene(&self) -> Result<Scene> {
        let mut cfg = SceneCfg::default();
        if let Some(c) = self.dynamic_collisions {
            cfg.dynamic_collisions = c;
        }
        let mut scene = Scene::new(cfg);
        match &self.boundary {
            Some(b) => {
                ensure!(b.len() >= 3, "boundary needs at least 3 vertices");
                scene.add_polygon(polygon(b));
            }
            None if !self.obstacles.is_empty() => bail!("obstacles given without a boundary"),
            None => {}
        }
        for (i, verts) in self.obstacles.iter().enumerate() {
            let poly = polygon(verts);
            ensure!(poly.len() >= 3, "obstacle {i}: needs at least 3 vertices");
            ensure!(
                !poly.has_self_intersections(scene.cast_cfg()),
                "obstacle {i}: edges cross each other"
            );
            if poly.edges().any(|(a, b)| scene.would_edge_intersect(a, b)) {
                bail!("obstacle {i}: crosses an earlier obstacle");
            }
            scene.add_polygon(poly);
        }

        // place lights without the player's collision probe; check containment instead
        scene.set_dynamic_light_collisions(false);
        let mut player_placed = false;
        for (i, l) in self.lights.iter().enumerate() {
            let pos = point(l.position);
            if scene.is_point_inside_polygon(pos) {
                bail!("light {i}: inside an obstacle");
            }
            if !l.is_static && !player_placed {
                player_placed = true;
                if !scene.update_light_source_position(0, pos) {
                    bail!("light {i}: outside the boundary");
                }
                continue;
            }
            let index = scene.add_light_source(pos, l.is_static);
            if let Some(r) = l.radius.filter(|_| l.is_static) {
                ensure!(r > 0.0, "light {i}: static radius must be positive");
                scene.update_static_light_radius(index, r);
            }
        }
        scene.set_dynamic_light_collisions(cfg.dynamic_collisions);
        tracing::debug!(
            polygons = scene.polygons().len(),
            lights = scene.lights().len(),
            "scene loaded"
        );
        Ok(scene)
    }
}

/// Light areas of every light, plus the player's sight layers if asked.
pub fn cast(scene: &Scene, with_sight: bool) -> CastOutput {
    let lights = light_areas(scene)
        .into_iter()
        .zip(scene.lights())
        .enumerate()
        .map(|(index, (area, l))| LightArea {
            index,
            is_static: l.is_static,
            position: xy(l.position),
            vertices: area.vertices().iter().copied().map(xy).collect(),
        })
        .collect();
    let sight = with_sight.then(|| {
        sight_polygons(scene, scene.player_light().position)
            .into_iter()
            .map(|layer| layer.into_iter().map(xy).collect())
            .collect()
    });
    CastOutput { lights, sight }
}
