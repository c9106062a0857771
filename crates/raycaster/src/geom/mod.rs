//! 2D geometric primitives for light casting.
//!
//! Purpose
//! - Value types (`Point`, `Ray`, `Polygon`) plus the two predicates everything
//!   else is built on: parametric segment intersection and even-odd containment.
//! - Keep tolerances explicit: every predicate takes its epsilon from the
//!   caller (usually `CastCfg`), defaults live in `cfg`.
//!
//! Conventions
//! - Points are `nalgebra::Vector2<f64>`.
//! - Polygons are implicitly closed; fewer than 2 vertices means no edges,
//!   fewer than 3 means nothing is contained.

mod polygon;
mod ray;
mod segment;
mod types;

pub use polygon::{point_in_polygon, Polygon};
pub use ray::Ray;
pub use segment::{segment_intersect, Bounds};
pub use types::{angle_to, cross, Point, VertexKey};
