//! Scene model: obstacle polygons, light sources, and edit validation.
//!
//! Purpose
//! - Own the committed polygon list (index 0 is the boundary) and the light
//!   list (index 0 is the dynamic player light).
//! - Apply edits and refuse the ones that would leave the scene invalid
//!   (crossing edges, lights inside solid geometry).
//! - Answer the containment / crossing queries the editor pre-checks with.
//!
//! The polygon being drawn lives in its own `drawing` slot and only joins
//! the committed list when closed. It is not an obstacle until then.
//!
//! The vertex cache sits in a `OnceCell`: mutators reset it, casts rebuild it
//! lazily through `&self`.

mod cache;

pub use cache::{VertexCache, VertexData};

use std::cell::OnceCell;

use crate::cfg::{CastCfg, SceneCfg};
use crate::geom::{segment_intersect, Bounds, Point, Polygon};

/// RGBA8 color.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgba(255, 255, 255, 255);
    /// Default tint of static lights.
    pub const STATIC_BLUE: Color = Color::rgba(100, 150, 255, 150);

    #[inline]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

/// A light. `radius <= 0` means unbounded.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LightSource {
    pub position: Point,
    pub color: Color,
    pub radius: f64,
    pub is_static: bool,
}

impl LightSource {
    /// Radius sentinel for unbounded (dynamic) lights.
    pub const UNBOUNDED: f64 = -1.0;

    /// Occlusion-aware light with unbounded reach.
    pub fn dynamic(position: Point) -> Self {
        Self {
            position,
            color: Color::WHITE,
            radius: Self::UNBOUNDED,
            is_static: false,
        }
    }

    /// Plain area light of fixed `radius`.
    pub fn fixed(position: Point, radius: f64) -> Self {
        Self {
            position,
            color: Color::STATIC_BLUE,
            radius,
            is_static: true,
        }
    }

    #[inline]
    pub fn is_bounded(&self) -> bool {
        self.radius > 0.0
    }
}

/// What pointer input is meant to edit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Mode {
    DrawObstacles,
    #[default]
    DynamicLight,
    StaticLights,
}

impl Mode {
    #[inline]
    pub fn is_light_mode(self) -> bool {
        matches!(self, Mode::DynamicLight | Mode::StaticLights)
    }
}

/// Obstacles, lights and the polygon under construction.
#[derive(Clone, Debug)]
pub struct Scene {
    cfg: SceneCfg,
    mode: Mode,
    polygons: Vec<Polygon>,
    drawing: Option<Polygon>,
    lights: Vec<LightSource>,
    cache: OnceCell<VertexCache>,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new(SceneCfg::default())
    }
}

impl Scene {
    /// Empty scene (no boundary) with the player light at `cfg.player_start`.
    pub fn new(cfg: SceneCfg) -> Self {
        Self {
            cfg,
            mode: Mode::default(),
            polygons: Vec::new(),
            drawing: None,
            lights: vec![LightSource::dynamic(cfg.player_start)],
            cache: OnceCell::new(),
        }
    }

    /// Scene with a `width × height` rectangular boundary.
    pub fn with_boundary_rect(cfg: SceneCfg, width: f64, height: f64) -> Self {
        let mut scene = Self::new(cfg);
        scene.set_boundary_rect(width, height);
        scene
    }

    #[inline]
    pub fn cfg(&self) -> &SceneCfg {
        &self.cfg
    }

    #[inline]
    pub fn cast_cfg(&self) -> &CastCfg {
        &self.cfg.cast
    }

    pub fn set_dynamic_light_collisions(&mut self, enabled: bool) {
        self.cfg.dynamic_collisions = enabled;
    }

    #[inline]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Switch mode; leaving `DrawObstacles` discards an unfinished polygon.
    pub fn set_mode(&mut self, mode: Mode) {
        if self.mode == Mode::DrawObstacles && mode != Mode::DrawObstacles {
            self.cancel_polygon();
        }
        self.mode = mode;
    }

    #[inline]
    pub fn is_light_mode(&self) -> bool {
        self.mode.is_light_mode()
    }

    // ---- polygons ----

    /// Committed polygons; index 0 is the boundary when present.
    #[inline]
    pub fn polygons(&self) -> &[Polygon] {
        &self.polygons
    }

    #[inline]
    pub fn boundary(&self) -> Option<&Polygon> {
        self.polygons.first()
    }

    /// Committed polygons other than the boundary.
    #[inline]
    pub fn obstacles(&self) -> &[Polygon] {
        self.polygons.get(1..).unwrap_or(&[])
    }

    /// The polygon under construction, if any.
    #[inline]
    pub fn drawing(&self) -> Option<&Polygon> {
        self.drawing.as_ref()
    }

    /// Distinct vertices of the committed polygons, rebuilt if stale.
    pub fn vertex_cache(&self) -> &VertexCache {
        self.cache.get_or_init(|| VertexCache::build(&self.polygons))
    }

    #[inline]
    fn invalidate(&mut self) {
        self.cache.take();
    }

    /// Commit a finished polygon. The first committed polygon is the boundary.
    pub fn add_polygon(&mut self, polygon: Polygon) {
        tracing::debug!(
            index = self.polygons.len(),
            vertices = polygon.len(),
            "add polygon"
        );
        self.polygons.push(polygon);
        self.invalidate();
    }

    /// Start drawing a polygon at `first`, replacing any unfinished one.
    pub fn begin_polygon(&mut self, first: Point) {
        self.drawing = Some(Polygon::new(vec![first]));
    }

    /// Append a vertex to the polygon under construction.
    ///
    /// Refused (returns `false`) when there is no such polygon or the new edge
    /// would properly cross an obstacle or the drawn chain itself.
    pub fn add_vertex_to_last_polygon(&mut self, v: Point) -> bool {
        let Some(last) = self.drawing.as_ref().and_then(Polygon::last) else {
            return false;
        };
        if self.edge_blocked(last, v) {
            tracing::debug!(x = v.x, y = v.y, "vertex rejected: edge would intersect");
            return false;
        }
        if let Some(d) = self.drawing.as_mut() {
            d.add_vertex(v);
        }
        true
    }

    /// Move the last vertex of the polygon under construction (live preview).
    pub fn update_last_polygon(&mut self, v: Point) {
        if let Some(d) = self.drawing.as_mut() {
            d.update_last_vertex(v);
        }
    }

    /// Close and commit the polygon under construction.
    ///
    /// Polygons with fewer than 3 vertices, or whose closing edge would
    /// properly cross existing geometry, are discarded and `false` returned.
    pub fn close_polygon(&mut self) -> bool {
        let Some(poly) = self.drawing.take() else {
            return false;
        };
        let (Some(first), Some(last)) = (poly.first(), poly.last()) else {
            return false;
        };
        if poly.len() < 3 {
            tracing::debug!(vertices = poly.len(), "polygon discarded: too few vertices");
            return false;
        }
        if self.would_edge_intersect(last, first)
            || crosses_chain(&poly, last, first, self.cast_cfg())
        {
            tracing::debug!("polygon discarded: closing edge would intersect");
            return false;
        }
        self.add_polygon(poly);
        true
    }

    /// Discard the polygon under construction.
    pub fn cancel_polygon(&mut self) {
        if self.drawing.take().is_some() {
            tracing::debug!("polygon drawing cancelled");
        }
    }

    /// Replace the boundary polygon; no-op while there is none.
    pub fn update_boundary_polygon(&mut self, vertices: Vec<Point>) {
        if let Some(b) = self.polygons.first_mut() {
            *b = Polygon::new(vertices);
            self.invalidate();
        }
    }

    /// Set the boundary to the rectangle `(0,0)–(width,height)`, creating it if absent.
    pub fn set_boundary_rect(&mut self, width: f64, height: f64) {
        let rect = Polygon::rect(width, height);
        if self.polygons.is_empty() {
            self.add_polygon(rect);
        } else {
            self.update_boundary_polygon(rect.into_vertices());
        }
    }

    /// Discard the polygon under construction if there is one, else remove the
    /// last committed obstacle. The boundary is never removed.
    pub fn remove_last_polygon(&mut self) {
        if self.drawing.take().is_some() {
            return;
        }
        if self.polygons.len() > 1 {
            self.polygons.pop();
            self.invalidate();
            tracing::debug!(remaining = self.polygons.len(), "remove polygon");
        }
    }

    /// Remove every obstacle (keeping the boundary) and any unfinished polygon.
    pub fn clear_obstacles(&mut self) {
        self.drawing = None;
        if self.polygons.len() > 1 {
            self.polygons.truncate(1);
            self.invalidate();
        }
    }

    /// Append the built-in demo obstacles.
    pub fn add_example_polygons(&mut self) {
        for poly in crate::gen::example_obstacles() {
            self.add_polygon(poly);
        }
    }

    // ---- queries ----

    /// True if `point` lies inside any obstacle (boundary excluded).
    pub fn is_point_inside_polygon(&self, point: Point) -> bool {
        self.obstacles().iter().any(|p| p.is_point_inside(point))
    }

    /// True if `p1–p2` properly crosses any obstacle edge (boundary excluded).
    pub fn would_edge_intersect(&self, p1: Point, p2: Point) -> bool {
        let cfg = self.cast_cfg();
        self.obstacles()
            .iter()
            .any(|p| p.does_edge_intersect(p1, p2, cfg))
    }

    fn edge_blocked(&self, p1: Point, p2: Point) -> bool {
        if self.would_edge_intersect(p1, p2) {
            return true;
        }
        self.drawing
            .as_ref()
            .is_some_and(|d| crosses_chain(d, p1, p2, self.cast_cfg()))
    }

    // ---- lights ----

    #[inline]
    pub fn lights(&self) -> &[LightSource] {
        &self.lights
    }

    #[inline]
    pub fn light(&self, index: usize) -> Option<&LightSource> {
        self.lights.get(index)
    }

    /// The dynamic player light (index 0).
    #[inline]
    pub fn player_light(&self) -> &LightSource {
        &self.lights[0]
    }

    /// Add a light at `position`; returns its index.
    ///
    /// Static lights get `cfg.static_radius` and the static tint; dynamic
    /// lights are unbounded and white.
    pub fn add_light_source(&mut self, position: Point, is_static: bool) -> usize {
        let light = if is_static {
            LightSource::fixed(position, self.cfg.static_radius)
        } else {
            LightSource::dynamic(position)
        };
        self.lights.push(light);
        tracing::debug!(
            index = self.lights.len() - 1,
            is_static,
            "add light source"
        );
        self.lights.len() - 1
    }

    /// Remove the light at `index`. The player light (index 0) stays.
    pub fn remove_light_source(&mut self, index: usize) {
        if index == 0 || index >= self.lights.len() {
            return;
        }
        self.lights.remove(index);
        tracing::debug!(index, "remove light source");
    }

    /// Remove every static light.
    pub fn clear_static_lights(&mut self) {
        let before = self.lights.len();
        let mut i = 0;
        self.lights.retain(|l| {
            let keep = i == 0 || !l.is_static;
            i += 1;
            keep
        });
        tracing::debug!(removed = before - self.lights.len(), "clear static lights");
    }

    /// Set the radius of a static light; no-op for dynamic or missing lights.
    pub fn update_static_light_radius(&mut self, index: usize, radius: f64) {
        if let Some(l) = self.lights.get_mut(index) {
            if l.is_static {
                l.radius = radius;
            }
        }
    }

    /// Move a light, returning whether the move was committed.
    ///
    /// The target must lie inside the boundary (when there is one). With
    /// dynamic collisions on, the player light additionally refuses to start
    /// from or enter an obstacle, or to bring any probe point of its body
    /// (`cfg.probe`) inside one. A refused move leaves the light where it is.
    pub fn update_light_source_position(&mut self, index: usize, position: Point) -> bool {
        let Some(current) = self.lights.get(index).map(|l| l.position) else {
            return false;
        };
        if index == 0 && self.cfg.dynamic_collisions && self.player_collides(current, position) {
            tracing::trace!(
                x = position.x,
                y = position.y,
                "player move rejected: collision"
            );
            return false;
        }
        if let Some(b) = self.boundary() {
            if !b.is_point_inside(position) {
                tracing::trace!(
                    x = position.x,
                    y = position.y,
                    "light move rejected: outside boundary"
                );
                return false;
            }
        }
        self.lights[index].position = position;
        true
    }

    fn player_collides(&self, current: Point, target: Point) -> bool {
        self.is_point_inside_polygon(current)
            || self.is_point_inside_polygon(target)
            || self
                .cfg
                .probe
                .points(target)
                .any(|p| self.is_point_inside_polygon(p))
    }
}

/// True if `p1–p2` properly crosses an edge of the open chain of `poly`.
fn crosses_chain(poly: &Polygon, p1: Point, p2: Point, cfg: &CastCfg) -> bool {
    poly.chain_edges().any(|(a, b)| {
        segment_intersect(p1, p2, a, b, Bounds::Open(cfg.eps_edge), cfg.eps_parallel).is_some()
    })
}

#[cfg(test)]
mod tests;
