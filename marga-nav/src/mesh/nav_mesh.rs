//! Tiled navigation mesh container.

use super::poly_ref::{MAX_POLYS_PER_TILE, MAX_TILES, next_salt};
use super::{MAX_AREAS, MAX_VERTS_PER_TILE, MeshTile, Poly, PolyFlags, PolyRef};
use crate::core::NavPoint;
use crate::error::MeshError;
use log::debug;

/// Navigation mesh: a set of tile slots addressed by [`PolyRef`].
///
/// Only reference resolution and portal lookup are provided; building,
/// spatial queries and serialization live elsewhere.
#[derive(Clone, Debug, Default)]
pub struct NavMesh {
    tiles: Vec<Option<MeshTile>>,
    salts: Vec<u32>,
}

impl NavMesh {
    /// Create an empty mesh
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a tile to the first free slot, returning its tile index.
    ///
    /// The tile is validated first: vertex and polygon counts, finite
    /// vertices, in-range vertex indices and area ids.
    pub fn add_tile(&mut self, mut tile: MeshTile) -> Result<u32, MeshError> {
        validate_tile(&tile)?;

        let slot = match self.tiles.iter().position(Option::is_none) {
            Some(slot) => slot,
            None if self.tiles.len() < MAX_TILES => {
                self.tiles.push(None);
                self.salts.push(0);
                self.tiles.len() - 1
            }
            None => return Err(MeshError::TooManyTiles(self.tiles.len())),
        };

        tile.salt = self.salts[slot];
        debug!(
            "[NavMesh] add_tile: slot={} salt={} polys={} verts={}",
            slot,
            tile.salt,
            tile.polys.len(),
            tile.verts.len()
        );
        self.tiles[slot] = Some(tile);
        Ok(slot as u32)
    }

    /// Remove a tile, invalidating every reference into it
    pub fn remove_tile(&mut self, index: u32) -> Option<MeshTile> {
        let slot = index as usize;
        let tile = self.tiles.get_mut(slot)?.take()?;
        self.salts[slot] = next_salt(self.salts[slot]);
        debug!(
            "[NavMesh] remove_tile: slot={} new salt={}",
            slot, self.salts[slot]
        );
        Some(tile)
    }

    /// Tile at `index`
    #[inline]
    pub fn tile(&self, index: u32) -> Option<&MeshTile> {
        self.tiles.get(index as usize)?.as_ref()
    }

    /// Number of occupied tile slots
    pub fn tile_count(&self) -> usize {
        self.tiles.iter().filter(|t| t.is_some()).count()
    }

    /// Total number of polygons across all tiles
    pub fn poly_count(&self) -> usize {
        self.tiles.iter().flatten().map(|t| t.polys.len()).sum()
    }

    /// Reference to polygon `poly` of tile `tile`, if both exist
    pub fn poly_ref(&self, tile: u32, poly: u32) -> Option<PolyRef> {
        let t = self.tile(tile)?;
        t.poly(poly as usize)?;
        Some(PolyRef::encode(t.salt, tile, poly))
    }

    /// Resolve a reference into its tile and polygon
    pub fn tile_and_poly(&self, poly_ref: PolyRef) -> Result<(&MeshTile, &Poly), MeshError> {
        let (salt, tile_index, poly_index) = poly_ref.decode();

        let tile = self
            .tile(tile_index)
            .ok_or(MeshError::TileNotFound {
                poly_ref,
                tile: tile_index,
            })?;

        if tile.salt != salt {
            return Err(MeshError::StaleRef {
                poly_ref,
                salt,
                tile_salt: tile.salt,
            });
        }

        let poly = tile
            .poly(poly_index as usize)
            .ok_or(MeshError::PolyNotFound {
                tile: tile_index,
                poly: poly_index,
            })?;

        Ok((tile, poly))
    }

    /// Check whether a reference resolves
    pub fn is_valid_poly_ref(&self, poly_ref: PolyRef) -> bool {
        self.tile_and_poly(poly_ref).is_ok()
    }

    /// Set the flags of a polygon
    pub fn set_poly_flags(&mut self, poly_ref: PolyRef, flags: PolyFlags) -> Result<(), MeshError> {
        self.tile_and_poly(poly_ref)?;
        self.poly_mut(poly_ref)?.flags = flags;
        Ok(())
    }

    /// Flags of a polygon
    pub fn poly_flags(&self, poly_ref: PolyRef) -> Result<PolyFlags, MeshError> {
        Ok(self.tile_and_poly(poly_ref)?.1.flags)
    }

    /// Set the area id of a polygon (must be `< MAX_AREAS`)
    pub fn set_poly_area(&mut self, poly_ref: PolyRef, area: u8) -> Result<(), MeshError> {
        check_area(area)?;
        self.tile_and_poly(poly_ref)?;
        self.poly_mut(poly_ref)?.area = area;
        Ok(())
    }

    /// Area id of a polygon
    pub fn poly_area(&self, poly_ref: PolyRef) -> Result<u8, MeshError> {
        Ok(self.tile_and_poly(poly_ref)?.1.area)
    }

    /// Link edge `edge_a` of `a` and edge `edge_b` of `b` in both directions
    pub fn connect(
        &mut self,
        a: PolyRef,
        edge_a: usize,
        b: PolyRef,
        edge_b: usize,
    ) -> Result<(), MeshError> {
        self.tile_and_poly(a)?;
        self.tile_and_poly(b)?;
        self.poly_mut(a)?.set_link(edge_a, b);
        self.poly_mut(b)?.set_link(edge_b, a);
        Ok(())
    }

    /// World-space portal edge shared by `from` and `to`
    pub fn portal(&self, from: PolyRef, to: PolyRef) -> Result<(NavPoint, NavPoint), MeshError> {
        let (tile, poly) = self.tile_and_poly(from)?;
        let edge = poly
            .edge_to(to)
            .ok_or(MeshError::NotConnected { from, to })?;
        Ok(tile.edge_points(poly, edge))
    }

    /// Midpoint of the portal shared by `from` and `to`
    pub fn portal_midpoint(&self, from: PolyRef, to: PolyRef) -> Result<NavPoint, MeshError> {
        let (a, b) = self.portal(from, to)?;
        Ok(a.midpoint(&b))
    }

    /// Iterate over every polygon with its reference and tile
    pub fn iter_polys(&self) -> impl Iterator<Item = (PolyRef, &MeshTile, &Poly)> + '_ {
        self.tiles
            .iter()
            .enumerate()
            .filter_map(|(i, t)| t.as_ref().map(|t| (i as u32, t)))
            .flat_map(|(i, tile)| {
                tile.polys
                    .iter()
                    .enumerate()
                    .map(move |(p, poly)| (PolyRef::encode(tile.salt, i, p as u32), tile, poly))
            })
    }

    fn poly_mut(&mut self, poly_ref: PolyRef) -> Result<&mut Poly, MeshError> {
        let (_, tile_index, poly_index) = poly_ref.decode();
        self.tiles
            .get_mut(tile_index as usize)
            .and_then(Option::as_mut)
            .and_then(|t| t.poly_mut(poly_index as usize))
            .ok_or(MeshError::InvalidPolyRef(poly_ref))
    }
}

fn check_area(area: u8) -> Result<(), MeshError> {
    if area as usize >= MAX_AREAS {
        return Err(MeshError::InvalidArea {
            area,
            max: MAX_AREAS,
        });
    }
    Ok(())
}

fn validate_tile(tile: &MeshTile) -> Result<(), MeshError> {
    if tile.polys.len() > MAX_POLYS_PER_TILE {
        return Err(MeshError::TooManyPolys(tile.polys.len()));
    }
    if tile.verts.len() > MAX_VERTS_PER_TILE {
        return Err(MeshError::TooManyVerts(tile.verts.len()));
    }
    if let Some(i) = tile.verts.iter().position(|v| !v.is_finite()) {
        return Err(MeshError::NonFiniteVertex(i));
    }

    let vert_count = tile.verts.len();
    for (i, poly) in tile.polys.iter().enumerate() {
        check_area(poly.area)?;
        if let Some(&vert) = poly.verts().iter().find(|&&v| v as usize >= vert_count) {
            return Err(MeshError::VertexOutOfRange {
                poly: i,
                vert,
                vert_count,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::areas;

    fn triangle_tile() -> MeshTile {
        MeshTile::new(
            vec![
                NavPoint::new(0.0, 0.0, 0.0),
                NavPoint::new(1.0, 0.0, 0.0),
                NavPoint::new(0.0, 0.0, 1.0),
                NavPoint::new(1.0, 0.0, 1.0),
            ],
            vec![
                Poly::new(&[0, 1, 2], PolyFlags::WALK, areas::GROUND),
                Poly::new(&[1, 3, 2], PolyFlags::WALK, areas::WATER),
            ],
        )
    }

    #[test]
    fn test_add_and_resolve() {
        let mut mesh = NavMesh::new();
        let t = mesh.add_tile(triangle_tile()).unwrap();
        assert_eq!(t, 0);
        assert_eq!(mesh.tile_count(), 1);
        assert_eq!(mesh.poly_count(), 2);

        let r = mesh.poly_ref(t, 1).unwrap();
        let (_, poly) = mesh.tile_and_poly(r).unwrap();
        assert_eq!(poly.area, areas::WATER);
        assert!(mesh.poly_ref(t, 2).is_none());
    }

    #[test]
    fn test_first_poly_has_zero_ref() {
        let mut mesh = NavMesh::new();
        let t = mesh.add_tile(triangle_tile()).unwrap();
        let r = mesh.poly_ref(t, 0).unwrap();
        assert_eq!(r.raw(), 0);
        assert!(mesh.is_valid_poly_ref(r));
    }

    #[test]
    fn test_unknown_refs() {
        let mut mesh = NavMesh::new();
        mesh.add_tile(triangle_tile()).unwrap();

        assert!(matches!(
            mesh.tile_and_poly(PolyRef::encode(0, 3, 0)),
            Err(MeshError::TileNotFound { tile: 3, .. })
        ));
        assert!(matches!(
            mesh.tile_and_poly(PolyRef::encode(0, 0, 9)),
            Err(MeshError::PolyNotFound { tile: 0, poly: 9 })
        ));
    }

    #[test]
    fn test_removed_tile_refs_are_stale() {
        let mut mesh = NavMesh::new();
        let t = mesh.add_tile(triangle_tile()).unwrap();
        let old = mesh.poly_ref(t, 0).unwrap();

        assert!(mesh.remove_tile(t).is_some());
        assert!(mesh.remove_tile(t).is_none());
        assert!(!mesh.is_valid_poly_ref(old));

        let t2 = mesh.add_tile(triangle_tile()).unwrap();
        assert_eq!(t2, t);
        assert!(matches!(
            mesh.tile_and_poly(old),
            Err(MeshError::StaleRef {
                salt: 0,
                tile_salt: 1,
                ..
            })
        ));
        assert!(mesh.is_valid_poly_ref(mesh.poly_ref(t2, 0).unwrap()));
    }

    #[test]
    fn test_connect_and_portal() {
        let mut mesh = NavMesh::new();
        let t = mesh.add_tile(triangle_tile()).unwrap();
        let a = mesh.poly_ref(t, 0).unwrap();
        let b = mesh.poly_ref(t, 1).unwrap();

        // Shared edge: verts 1-2
        mesh.connect(a, 1, b, 2).unwrap();

        let (p, q) = mesh.portal(a, b).unwrap();
        assert_eq!(p, NavPoint::new(1.0, 0.0, 0.0));
        assert_eq!(q, NavPoint::new(0.0, 0.0, 1.0));
        assert_eq!(
            mesh.portal_midpoint(b, a).unwrap(),
            NavPoint::new(0.5, 0.0, 0.5)
        );
    }

    #[test]
    fn test_portal_requires_link() {
        let mut mesh = NavMesh::new();
        let t = mesh.add_tile(triangle_tile()).unwrap();
        let a = mesh.poly_ref(t, 0).unwrap();
        let b = mesh.poly_ref(t, 1).unwrap();
        assert_eq!(
            mesh.portal(a, b),
            Err(MeshError::NotConnected { from: a, to: b })
        );
    }

    #[test]
    fn test_poly_flags_and_area() {
        let mut mesh = NavMesh::new();
        let t = mesh.add_tile(triangle_tile()).unwrap();
        let r = mesh.poly_ref(t, 1).unwrap();

        mesh.set_poly_flags(r, PolyFlags::DISABLED).unwrap();
        mesh.set_poly_area(r, areas::ROAD).unwrap();
        assert_eq!(mesh.poly_flags(r).unwrap(), PolyFlags::DISABLED);
        assert_eq!(mesh.poly_area(r).unwrap(), areas::ROAD);

        let missing = PolyRef::encode(0, 0, 5);
        assert!(mesh.set_poly_flags(missing, PolyFlags::WALK).is_err());
        assert!(mesh.poly_area(missing).is_err());
    }

    #[test]
    fn test_set_poly_area_rejects_out_of_range() {
        let mut mesh = NavMesh::new();
        let t = mesh.add_tile(triangle_tile()).unwrap();
        let r = mesh.poly_ref(t, 0).unwrap();

        assert_eq!(
            mesh.set_poly_area(r, 200),
            Err(MeshError::InvalidArea { area: 200, max: 64 })
        );
        assert_eq!(
            mesh.set_poly_area(r, MAX_AREAS as u8),
            Err(MeshError::InvalidArea { area: 64, max: 64 })
        );
        // Rejected ids leave the polygon untouched
        assert_eq!(mesh.poly_area(r).unwrap(), areas::GROUND);

        mesh.set_poly_area(r, (MAX_AREAS - 1) as u8).unwrap();
        assert_eq!(mesh.poly_area(r).unwrap(), 63);
    }

    #[test]
    fn test_add_tile_rejects_bad_area() {
        let mut tile = triangle_tile();
        tile.polys[1].area = MAX_AREAS as u8;

        let mut mesh = NavMesh::new();
        assert_eq!(
            mesh.add_tile(tile),
            Err(MeshError::InvalidArea { area: 64, max: 64 })
        );
        assert_eq!(mesh.tile_count(), 0);
    }

    #[test]
    fn test_add_tile_rejects_dangling_vertex_index() {
        let mut tile = triangle_tile();
        tile.polys.push(Poly::new(&[2, 3, 4], PolyFlags::WALK, areas::GROUND));

        let mut mesh = NavMesh::new();
        assert_eq!(
            mesh.add_tile(tile),
            Err(MeshError::VertexOutOfRange {
                poly: 2,
                vert: 4,
                vert_count: 4
            })
        );
    }

    #[test]
    fn test_add_tile_rejects_non_finite_vertex() {
        let mut tile = triangle_tile();
        tile.verts[3] = NavPoint::new(1.0, f32::NAN, 1.0);

        let mut mesh = NavMesh::new();
        assert_eq!(mesh.add_tile(tile), Err(MeshError::NonFiniteVertex(3)));
    }

    #[test]
    fn test_add_tile_rejects_too_many_verts() {
        let mut tile = triangle_tile();
        tile.verts.resize(MAX_VERTS_PER_TILE + 1, NavPoint::ZERO);

        let mut mesh = NavMesh::new();
        assert_eq!(
            mesh.add_tile(tile),
            Err(MeshError::TooManyVerts(MAX_VERTS_PER_TILE + 1))
        );
    }

    #[test]
    fn test_iter_polys() {
        let mut mesh = NavMesh::new();
        mesh.add_tile(triangle_tile()).unwrap();
        mesh.add_tile(triangle_tile()).unwrap();

        let refs: Vec<PolyRef> = mesh.iter_polys().map(|(r, _, _)| r).collect();
        assert_eq!(refs.len(), 4);
        assert!(refs.iter().all(|r| mesh.is_valid_poly_ref(*r)));
        assert_eq!(refs[2].tile(), 1);
    }
}
