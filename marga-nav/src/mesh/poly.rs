//! Polygon records, flags and area types.

use super::PolyRef;
use bitflags::bitflags;

/// Maximum number of area types.
///
/// Shared with the mesh build step: every polygon area id and every slot of
/// a filter's area-cost table lies in `[0, MAX_AREAS)`.
pub const MAX_AREAS: usize = 64;

/// Maximum number of vertices per polygon
pub const MAX_VERTS_PER_POLY: usize = 6;

/// Maximum number of vertices per tile (polygons index them with `u16`)
pub const MAX_VERTS_PER_TILE: usize = u16::MAX as usize + 1;

/// Conventional area ids assigned at build time
pub mod areas {
    /// Default walkable ground
    pub const GROUND: u8 = 0;
    /// Shallow water
    pub const WATER: u8 = 1;
    /// Paved road
    pub const ROAD: u8 = 2;
    /// Door threshold
    pub const DOOR: u8 = 3;
    /// Grass
    pub const GRASS: u8 = 4;
    /// Jump link landing
    pub const JUMP: u8 = 5;
}

bitflags! {
    /// Per-polygon flag set used to gate traversal.
    ///
    /// The named flags are conventions; the mesh build step may assign any
    /// of the 16 bits.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct PolyFlags: u16 {
        /// Walkable surface
        const WALK = 1 << 0;
        /// Swimmable surface
        const SWIM = 1 << 1;
        /// Door
        const DOOR = 1 << 2;
        /// Jump link
        const JUMP = 1 << 3;
        /// Disabled polygon
        const DISABLED = 1 << 4;

        const _ = !0;
    }
}

/// Polygon record stored in a tile.
///
/// Edge `i` runs from `verts[i]` to `verts[(i + 1) % vert_count]`;
/// `links[i]` is the polygon on the other side of that edge, if any.
#[derive(Clone, Debug, PartialEq)]
pub struct Poly {
    verts: [u16; MAX_VERTS_PER_POLY],
    links: [Option<PolyRef>; MAX_VERTS_PER_POLY],
    vert_count: u8,
    /// Flag set assigned at build time
    pub flags: PolyFlags,
    /// Area type id, `< MAX_AREAS`
    pub area: u8,
}

impl Poly {
    /// Create a polygon from tile vertex indices.
    ///
    /// # Panics
    /// If `verts` has fewer than 3 or more than [`MAX_VERTS_PER_POLY`] entries,
    /// or if `area >= MAX_AREAS`.
    pub fn new(verts: &[u16], flags: PolyFlags, area: u8) -> Self {
        assert!(
            (3..=MAX_VERTS_PER_POLY).contains(&verts.len()),
            "polygon needs 3..={} vertices, got {}",
            MAX_VERTS_PER_POLY,
            verts.len()
        );
        assert!(
            (area as usize) < MAX_AREAS,
            "area id {} out of range (max {})",
            area,
            MAX_AREAS
        );

        let mut v = [0u16; MAX_VERTS_PER_POLY];
        v[..verts.len()].copy_from_slice(verts);

        Self {
            verts: v,
            links: [None; MAX_VERTS_PER_POLY],
            vert_count: verts.len() as u8,
            flags,
            area,
        }
    }

    /// Number of vertices (and edges)
    #[inline]
    pub fn vert_count(&self) -> usize {
        self.vert_count as usize
    }

    /// Vertex indices into the owning tile
    #[inline]
    pub fn verts(&self) -> &[u16] {
        &self.verts[..self.vert_count()]
    }

    /// Vertex indices of edge `edge`
    #[inline]
    pub fn edge(&self, edge: usize) -> (u16, u16) {
        let n = self.vert_count();
        (self.verts[edge], self.verts[(edge + 1) % n])
    }

    /// Neighbour across edge `edge`
    #[inline]
    pub fn link(&self, edge: usize) -> Option<PolyRef> {
        self.links[..self.vert_count()][edge]
    }

    /// Connect edge `edge` to `neighbour`
    pub fn set_link(&mut self, edge: usize, neighbour: PolyRef) {
        let n = self.vert_count();
        self.links[..n][edge] = Some(neighbour);
    }

    /// Disconnect edge `edge`
    pub fn clear_link(&mut self, edge: usize) {
        let n = self.vert_count();
        self.links[..n][edge] = None;
    }

    /// Iterate over linked neighbours
    pub fn neighbours(&self) -> impl Iterator<Item = PolyRef> + '_ {
        self.links[..self.vert_count()].iter().filter_map(|l| *l)
    }

    /// Edge index shared with `neighbour`, if linked
    pub fn edge_to(&self, neighbour: PolyRef) -> Option<usize> {
        self.links[..self.vert_count()]
            .iter()
            .position(|l| *l == Some(neighbour))
    }
}
