//! Coordinate-keyed vertex index over the committed polygons.

use std::collections::HashMap;

use crate::geom::{Point, Polygon, VertexKey};

/// Where a distinct vertex first appears.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VertexData {
    pub point: Point,
    pub polygon_index: usize,
    pub vertex_index: usize,
}

/// Distinct vertices of a polygon list, first owner wins.
///
/// Entries keep insertion order (polygon-major), so iteration is
/// deterministic across rebuilds.
#[derive(Clone, Debug, Default)]
pub struct VertexCache {
    entries: Vec<VertexData>,
    index: HashMap<VertexKey, usize>,
}

impl VertexCache {
    pub fn build(polygons: &[Polygon]) -> Self {
        let mut cache = Self::default();
        for (polygon_index, poly) in polygons.iter().enumerate() {
            for (vertex_index, &point) in poly.vertices().iter().enumerate() {
                let key = VertexKey::new(point);
                if cache.index.contains_key(&key) {
                    continue;
                }
                cache.index.insert(key, cache.entries.len());
                cache.entries.push(VertexData {
                    point,
                    polygon_index,
                    vertex_index,
                });
            }
        }
        tracing::trace!(vertices = cache.entries.len(), "vertex cache rebuilt");
        cache
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    pub fn get(&self, point: Point) -> Option<&VertexData> {
        self.index.get(&VertexKey::new(point)).map(|&i| &self.entries[i])
    }

    /// All distinct vertices, boundary included.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &VertexData> + '_ {
        self.entries.iter()
    }

    /// Distinct vertices whose first owner is not the boundary polygon.
    pub fn obstacle_vertices(&self) -> impl Iterator<Item = &VertexData> + '_ {
        self.entries.iter().filter(|d| d.polygon_index != 0)
    }
}
