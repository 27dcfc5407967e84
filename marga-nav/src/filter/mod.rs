//! Traversal policy for polygon search.
//!
//! A [`QueryFilter`] answers two questions for every polygon the search
//! visits:
//!
//! 1. [`pass_filter`](QueryFilter::pass_filter): may this polygon be visited?
//! 2. [`cost`](QueryFilter::cost): what does it cost to cross a segment
//!    inside it, given the polygons before and after?
//!
//! The search folds the returned cost into its g-score. Admissibility decides
//! which polygons are reachable; cost decides which path is cheapest.
//!
//! ## Default policy
//!
//! [`DefaultQueryFilter`] gates on polygon flags and scales Euclidean
//! distance by a per-area multiplier:
//!
//! ```text
//! pass = (flags & include) != 0 && (flags & exclude) == 0
//! cost = |pb - pa| * area_cost[cur.area]
//! ```
//!
//! Exclusion wins over inclusion, a polygon with no flags is never accepted,
//! and an empty include mask rejects everything.
//!
//! ## Custom policies
//!
//! Implement the trait directly. Both methods sit on the search hot path:
//! keep them allocation-free, keep any derived state precomputed in the
//! filter, and do not depend on search-internal state. Custom filters need
//! not look at flags or area costs at all.
//!
//! ```rust
//! use marga_nav::core::NavPoint;
//! use marga_nav::filter::{PolyContext, QueryFilter};
//! use marga_nav::mesh::{MeshTile, Poly, PolyFlags, PolyRef};
//!
//! /// Swimmers may enter water; everyone pays a flat penalty per portal.
//! struct Swimmer;
//!
//! impl QueryFilter for Swimmer {
//!     fn pass_filter(&self, _: PolyRef, _: &MeshTile, poly: &Poly) -> bool {
//!         poly.flags.intersects(PolyFlags::WALK | PolyFlags::SWIM)
//!     }
//!
//!     fn cost(
//!         &self,
//!         pa: &NavPoint,
//!         pb: &NavPoint,
//!         _prev: Option<PolyContext<'_>>,
//!         _cur: PolyContext<'_>,
//!         next: Option<PolyContext<'_>>,
//!     ) -> f32 {
//!         pa.distance(pb) + if next.is_some() { 0.5 } else { 0.0 }
//!     }
//! }
//! ```
//!
//! ## Cost contract
//!
//! Costs must be non-negative and should never fall below the distance
//! travelled. The search's heuristic is straight-line distance; a multiplier
//! under 1.0 makes it over-estimate, and the search may return suboptimal or
//! inconsistent paths. This is a caller precondition and is not checked.
//!
//! ## Sharing
//!
//! Filters hold configuration only. Configure first, then share read-only
//! across any number of searches. For reconfiguration while searches run,
//! use [`SharedQueryFilter`].

mod default;
mod shared;

pub use default::DefaultQueryFilter;
pub use shared::SharedQueryFilter;

use crate::core::NavPoint;
use crate::mesh::{MeshTile, Poly, PolyRef};
use std::sync::Arc;

/// A polygon together with its reference and owning tile.
#[derive(Clone, Copy, Debug)]
pub struct PolyContext<'a> {
    /// Polygon reference
    pub poly_ref: PolyRef,
    /// Tile containing the polygon
    pub tile: &'a MeshTile,
    /// The polygon record
    pub poly: &'a Poly,
}

impl<'a> PolyContext<'a> {
    /// Bundle a resolved polygon
    #[inline]
    pub fn new(poly_ref: PolyRef, tile: &'a MeshTile, poly: &'a Poly) -> Self {
        Self {
            poly_ref,
            tile,
            poly,
        }
    }
}

/// Polygon admissibility and traversal cost, consumed by the search.
pub trait QueryFilter {
    /// Returns true if the polygon may be visited.
    ///
    /// Must be a pure, deterministic predicate: the search may call it any
    /// number of times for the same polygon and cache the answer.
    fn pass_filter(&self, poly_ref: PolyRef, tile: &MeshTile, poly: &Poly) -> bool;

    /// Cost of moving from `pa` to `pb`, a segment fully inside `cur`.
    ///
    /// * `pa` - Start position, on the portal between `prev` and `cur`
    /// * `pb` - End position, on the portal between `cur` and `next`
    /// * `prev` - Polygon visited before `cur` (`None` at the path start)
    /// * `cur` - Polygon containing the segment
    /// * `next` - Polygon visited after `cur` (`None` at the path end)
    ///
    /// Must be non-negative and allocation-free.
    fn cost(
        &self,
        pa: &NavPoint,
        pb: &NavPoint,
        prev: Option<PolyContext<'_>>,
        cur: PolyContext<'_>,
        next: Option<PolyContext<'_>>,
    ) -> f32;
}

impl<F: QueryFilter + ?Sized> QueryFilter for &F {
    #[inline]
    fn pass_filter(&self, poly_ref: PolyRef, tile: &MeshTile, poly: &Poly) -> bool {
        (**self).pass_filter(poly_ref, tile, poly)
    }

    #[inline]
    fn cost(
        &self,
        pa: &NavPoint,
        pb: &NavPoint,
        prev: Option<PolyContext<'_>>,
        cur: PolyContext<'_>,
        next: Option<PolyContext<'_>>,
    ) -> f32 {
        (**self).cost(pa, pb, prev, cur, next)
    }
}

impl<F: QueryFilter + ?Sized> QueryFilter for Box<F> {
    #[inline]
    fn pass_filter(&self, poly_ref: PolyRef, tile: &MeshTile, poly: &Poly) -> bool {
        (**self).pass_filter(poly_ref, tile, poly)
    }

    #[inline]
    fn cost(
        &self,
        pa: &NavPoint,
        pb: &NavPoint,
        prev: Option<PolyContext<'_>>,
        cur: PolyContext<'_>,
        next: Option<PolyContext<'_>>,
    ) -> f32 {
        (**self).cost(pa, pb, prev, cur, next)
    }
}

impl<F: QueryFilter + ?Sized> QueryFilter for Arc<F> {
    #[inline]
    fn pass_filter(&self, poly_ref: PolyRef, tile: &MeshTile, poly: &Poly) -> bool {
        (**self).pass_filter(poly_ref, tile, poly)
    }

    #[inline]
    fn cost(
        &self,
        pa: &NavPoint,
        pb: &NavPoint,
        prev: Option<PolyContext<'_>>,
        cur: PolyContext<'_>,
        next: Option<PolyContext<'_>>,
    ) -> f32 {
        (**self).cost(pa, pb, prev, cur, next)
    }
}
