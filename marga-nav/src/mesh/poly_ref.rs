//! Polygon references.
//!
//! A [`PolyRef`] packs three ids into 32 bits:
//!
//! ```text
//!  31        26 25             16 15                              0
//! ┌────────────┬─────────────────┬─────────────────────────────────┐
//! │ salt (6)   │ tile index (10) │ polygon index (16)              │
//! └────────────┴─────────────────┴─────────────────────────────────┘
//! ```
//!
//! The salt is bumped every time a tile slot is reused, so references into a
//! removed tile are detected as stale instead of silently resolving to a
//! different polygon.
//!
//! Every bit pattern is a potential reference, including zero (salt 0,
//! tile 0, polygon 0). "No polygon" is expressed with `Option<PolyRef>`,
//! never with a sentinel value.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of bits for the polygon index
pub const POLY_BITS: u32 = 16;
/// Number of bits for the tile index
pub const TILE_BITS: u32 = 10;
/// Number of bits for the salt
pub const SALT_BITS: u32 = 6;

const POLY_MASK: u32 = (1 << POLY_BITS) - 1;
const TILE_MASK: u32 = (1 << TILE_BITS) - 1;
const SALT_MASK: u32 = (1 << SALT_BITS) - 1;

/// Maximum number of tiles addressable by a reference
pub const MAX_TILES: usize = 1 << TILE_BITS;
/// Maximum number of polygons per tile addressable by a reference
pub const MAX_POLYS_PER_TILE: usize = 1 << POLY_BITS;

/// Opaque polygon identifier, resolvable within a [`NavMesh`](super::NavMesh).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PolyRef(u32);

impl PolyRef {
    /// Wrap a raw reference value
    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    /// Raw 32-bit value
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Pack salt, tile index and polygon index (excess bits are masked off)
    #[inline]
    pub const fn encode(salt: u32, tile: u32, poly: u32) -> Self {
        Self(
            ((salt & SALT_MASK) << (POLY_BITS + TILE_BITS))
                | ((tile & TILE_MASK) << POLY_BITS)
                | (poly & POLY_MASK),
        )
    }

    /// Unpack into `(salt, tile, poly)`
    #[inline]
    pub const fn decode(self) -> (u32, u32, u32) {
        (self.salt(), self.tile(), self.poly())
    }

    /// Salt component
    #[inline]
    pub const fn salt(self) -> u32 {
        (self.0 >> (POLY_BITS + TILE_BITS)) & SALT_MASK
    }

    /// Tile index component
    #[inline]
    pub const fn tile(self) -> u32 {
        (self.0 >> POLY_BITS) & TILE_MASK
    }

    /// Polygon index component
    #[inline]
    pub const fn poly(self) -> u32 {
        self.0 & POLY_MASK
    }
}

/// Next salt value for a reused tile slot (wraps within the salt bits)
#[inline]
pub(crate) fn next_salt(salt: u32) -> u32 {
    (salt + 1) & SALT_MASK
}

impl fmt::Display for PolyRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (salt, tile, poly) = self.decode();
        write!(f, "PolyRef({}:{}:{})", salt, tile, poly)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_decode() {
        let r = PolyRef::encode(5, 17, 1234);
        assert_eq!(r.decode(), (5, 17, 1234));
        assert_eq!(r.salt(), 5);
        assert_eq!(r.tile(), 17);
        assert_eq!(r.poly(), 1234);
    }

    #[test]
    fn test_zero_is_a_real_reference() {
        let r = PolyRef::encode(0, 0, 0);
        assert_eq!(r.raw(), 0);
        assert_eq!(r.decode(), (0, 0, 0));
    }

    #[test]
    fn test_encode_masks_excess_bits() {
        let r = PolyRef::encode(SALT_MASK + 1, TILE_MASK + 2, POLY_MASK + 3);
        assert_eq!(r.decode(), (0, 1, 2));
    }

    #[test]
    fn test_salt_wraps() {
        assert_eq!(next_salt(0), 1);
        assert_eq!(next_salt(SALT_MASK), 0);
    }

    #[test]
    fn test_display() {
        assert_eq!(PolyRef::encode(1, 2, 3).to_string(), "PolyRef(1:2:3)");
    }
}
