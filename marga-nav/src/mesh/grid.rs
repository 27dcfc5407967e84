//! Quad-grid tile construction.
//!
//! Builds a flat tile of square polygons on the XZ plane with all interior
//! edges linked. Useful for tests, benchmarks and as a minimal stand-in for a
//! real mesh build step.

use super::{MAX_VERTS_PER_TILE, MeshTile, NavMesh, Poly, PolyFlags, PolyRef};
use crate::core::NavPoint;
use crate::error::MeshError;

/// Layout of a grid tile added by [`NavMesh::add_grid_tile`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridLayout {
    /// Tile slot index
    pub tile: u32,
    /// Salt of the tile slot
    pub salt: u32,
    /// Number of columns (X)
    pub cols: usize,
    /// Number of rows (Z)
    pub rows: usize,
    /// Cell size in meters
    pub cell_size: f32,
}

impl GridLayout {
    /// Polygon index of cell `(col, row)`
    #[inline]
    pub fn index(&self, col: usize, row: usize) -> usize {
        row * self.cols + col
    }

    /// Reference to cell `(col, row)`
    #[inline]
    pub fn poly_ref(&self, col: usize, row: usize) -> PolyRef {
        PolyRef::encode(self.salt, self.tile, self.index(col, row) as u32)
    }

    /// Center of cell `(col, row)`
    #[inline]
    pub fn center(&self, col: usize, row: usize) -> NavPoint {
        NavPoint::new(
            (col as f32 + 0.5) * self.cell_size,
            0.0,
            (row as f32 + 0.5) * self.cell_size,
        )
    }
}

impl NavMesh {
    /// Add a `cols × rows` grid of walkable ground quads and link neighbours.
    ///
    /// Polygon `(col, row)` spans `[col, col+1] × [row, row+1]` cells.
    /// Edges are ordered -Z, +X, +Z, -X. Fails with
    /// [`MeshError::TooManyVerts`] when `(cols + 1) * (rows + 1)` exceeds
    /// [`MAX_VERTS_PER_TILE`].
    pub fn add_grid_tile(
        &mut self,
        cols: usize,
        rows: usize,
        cell_size: f32,
    ) -> Result<GridLayout, MeshError> {
        let vcols = cols + 1;
        let vert_count = vcols * (rows + 1);
        if vert_count > MAX_VERTS_PER_TILE {
            return Err(MeshError::TooManyVerts(vert_count));
        }
        let v = |c: usize, r: usize| {
            u16::try_from(r * vcols + c).map_err(|_| MeshError::TooManyVerts(vert_count))
        };

        let mut verts = Vec::with_capacity(vert_count);
        for r in 0..=rows {
            for c in 0..=cols {
                verts.push(NavPoint::new(c as f32 * cell_size, 0.0, r as f32 * cell_size));
            }
        }

        let mut polys = Vec::with_capacity(cols * rows);
        for r in 0..rows {
            for c in 0..cols {
                polys.push(Poly::new(
                    &[v(c, r)?, v(c + 1, r)?, v(c + 1, r + 1)?, v(c, r + 1)?],
                    PolyFlags::WALK,
                    super::areas::GROUND,
                ));
            }
        }

        let tile = self.add_tile(MeshTile::new(verts, polys))?;
        let salt = self.tile(tile).map(|t| t.salt).unwrap_or_default();
        let layout = GridLayout {
            tile,
            salt,
            cols,
            rows,
            cell_size,
        };

        for r in 0..rows {
            for c in 0..cols {
                if c + 1 < cols {
                    self.connect(layout.poly_ref(c, r), 1, layout.poly_ref(c + 1, r), 3)?;
                }
                if r + 1 < rows {
                    self.connect(layout.poly_ref(c, r), 2, layout.poly_ref(c, r + 1), 0)?;
                }
            }
        }

        Ok(layout)
    }
}
