//! Navigation mesh collaborators.
//!
//! The traversal policy only reads three things from the mesh: a polygon
//! reference, the tile owning the polygon, and the polygon record (flags and
//! area id). This module provides those types plus a small tiled container
//! that can resolve references and report portals for the reference search.
//!
//! - [`PolyRef`]: salted tile/polygon reference
//! - [`Poly`], [`PolyFlags`], [`areas`]: polygon record, flag set, area ids
//! - [`MeshTile`]: vertex buffer plus polygons
//! - [`NavMesh`]: tile slots, reference resolution, portals

mod grid;
mod nav_mesh;
mod poly;
mod poly_ref;
mod tile;

pub use grid::GridLayout;
pub use nav_mesh::NavMesh;
pub use poly::{MAX_AREAS, MAX_VERTS_PER_POLY, MAX_VERTS_PER_TILE, Poly, PolyFlags, areas};
pub use poly_ref::{MAX_POLYS_PER_TILE, MAX_TILES, PolyRef};
pub use tile::MeshTile;
