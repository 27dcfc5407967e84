//! Mesh tiles.

use super::Poly;
use crate::core::NavPoint;

/// A tile of the navigation mesh: a vertex buffer and the polygons over it.
#[derive(Clone, Debug, Default)]
pub struct MeshTile {
    /// Salt of the slot this tile occupies (set by [`NavMesh`](super::NavMesh))
    pub salt: u32,
    /// Vertices referenced by polygon vertex indices
    pub verts: Vec<NavPoint>,
    /// Polygons in this tile
    pub polys: Vec<Poly>,
}

impl MeshTile {
    /// Create a tile from vertices and polygons
    pub fn new(verts: Vec<NavPoint>, polys: Vec<Poly>) -> Self {
        Self {
            salt: 0,
            verts,
            polys,
        }
    }

    /// Polygon by index
    #[inline]
    pub fn poly(&self, index: usize) -> Option<&Poly> {
        self.polys.get(index)
    }

    /// Mutable polygon by index
    #[inline]
    pub fn poly_mut(&mut self, index: usize) -> Option<&mut Poly> {
        self.polys.get_mut(index)
    }

    /// World-space endpoints of a polygon edge
    pub fn edge_points(&self, poly: &Poly, edge: usize) -> (NavPoint, NavPoint) {
        let (a, b) = poly.edge(edge);
        (self.verts[a as usize], self.verts[b as usize])
    }

    /// Vertex centroid of a polygon
    pub fn poly_center(&self, poly: &Poly) -> NavPoint {
        let sum = poly
            .verts()
            .iter()
            .fold(NavPoint::ZERO, |acc, &v| acc + self.verts[v as usize]);
        sum * (1.0 / poly.vert_count() as f32)
    }
}
