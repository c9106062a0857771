//! Flat re-export surface of the kernel.
//!
//! One `use raycaster::api::*` gives a frontend every type and operation it
//! needs without learning the module layout.

// geometry
pub use crate::geom::{
    angle_to, cross, point_in_polygon, segment_intersect, Bounds, Point, Polygon, Ray, VertexKey,
};
// configuration
pub use crate::cfg::{CastCfg, CollisionProbe, SceneCfg};
// scene model
pub use crate::scene::{Color, LightSource, Mode, Scene, VertexCache, VertexData};
// casting and sight
pub use crate::caster::{
    cast_rays, create_light_area, intersect_rays, light_areas, remove_adjacent_rays, SortedRays,
};
pub use crate::sight::{ray_intersections, sight_polygons};
// editing
pub use crate::editor::{Button, EditOutcome, Editor, PreviewHits, RADIUS_RANGE, SELECT_RADIUS};
// generators
pub use crate::gen::{draw_obstacles, draw_scene, example_obstacles, FieldCfg, ReplayToken};
