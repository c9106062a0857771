//! 2D light and visibility kernel.
//!
//! Given obstacle polygons (the first one is the scene boundary) and light
//! sources, compute the polygon each light illuminates, plus visibility
//! polygons from arbitrary viewpoints for soft shadows.
//!
//! Layout
//! - `geom`: points, rays, polygons, intersection and containment predicates.
//! - `scene`: owned obstacles and lights, validated edits, collision queries.
//! - `caster`: shadow-casting light areas (cast → intersect → dedup).
//! - `sight`: visibility polygons and offset layers around a point.
//! - `editor`: pointer events mapped onto scene edits per `Mode`.
//! - `gen`: demo layout and seeded random obstacle fields.
//! - `cfg`: tolerances and defaults.
//!
//! Everything is single-threaded and synchronous; a full recompute per frame
//! is the intended usage.

pub mod api;
pub mod caster;
pub mod cfg;
pub mod editor;
pub mod geom;
pub mod gen;
pub mod scene;
pub mod sight;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use cfg::{CastCfg, CollisionProbe, SceneCfg};
pub use geom::{Point, Polygon, Ray};
pub use scene::{LightSource, Mode, Scene};

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::caster::{create_light_area, light_areas, SortedRays};
    pub use crate::cfg::{CastCfg, CollisionProbe, SceneCfg};
    pub use crate::editor::{Button, EditOutcome, Editor};
    pub use crate::geom::{point_in_polygon, segment_intersect, Bounds, Point, Polygon, Ray};
    pub use crate::scene::{Color, LightSource, Mode, Scene};
    pub use crate::sight::{ray_intersections, sight_polygons};
    pub use nalgebra::Vector2 as Vec2;
}
