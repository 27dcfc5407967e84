//! Error types for marga-nav
//!
//! The traversal policy itself never fails: `pass_filter` and `cost` return
//! plain values. Errors only exist at the edges of the crate, where
//! configuration is loaded and polygon references are resolved.

use crate::mesh::PolyRef;
use thiserror::Error;

/// Filter configuration error
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Area id {area} out of range (max {max})")]
    InvalidAreaId { area: usize, max: usize },

    #[error("Invalid cost {cost} for area {area}: must be finite and >= 0")]
    InvalidAreaCost { area: usize, cost: f32 },
}

/// Polygon reference resolution error
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MeshError {
    #[error("Invalid polygon reference: {0}")]
    InvalidPolyRef(PolyRef),

    #[error("Tile {tile} not found for {poly_ref}")]
    TileNotFound { poly_ref: PolyRef, tile: u32 },

    #[error("Polygon {poly} not found in tile {tile}")]
    PolyNotFound { tile: u32, poly: u32 },

    #[error("Stale polygon reference {poly_ref}: salt {salt} != tile salt {tile_salt}")]
    StaleRef {
        poly_ref: PolyRef,
        salt: u32,
        tile_salt: u32,
    },

    #[error("Polygons {from} and {to} share no portal")]
    NotConnected { from: PolyRef, to: PolyRef },

    #[error("Tile capacity exceeded ({0} tiles)")]
    TooManyTiles(usize),

    #[error("Tile has too many polygons ({0})")]
    TooManyPolys(usize),

    #[error("Tile has too many vertices ({0}, max 65536)")]
    TooManyVerts(usize),

    #[error("Area id {area} out of range (max {max})")]
    InvalidArea { area: u8, max: usize },

    #[error("Polygon {poly} references vertex {vert} but tile has {vert_count}")]
    VertexOutOfRange {
        poly: usize,
        vert: u16,
        vert_count: usize,
    },

    #[error("Vertex {0} has a non-finite coordinate")]
    NonFiniteVertex(usize),
}
