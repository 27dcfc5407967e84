//! Flag-gated, area-weighted default traversal policy.

use super::{PolyContext, QueryFilter};
use crate::core::NavPoint;
use crate::mesh::{MAX_AREAS, MeshTile, Poly, PolyFlags, PolyRef};

/// Default traversal policy.
///
/// At construction every area costs 1.0, every flag is included and none
/// are excluded.
///
/// # Panics
///
/// Area ids index a fixed `[f32; MAX_AREAS]` table. An id `>= MAX_AREAS`
/// passed to [`area_cost`](Self::area_cost), [`set_area_cost`](Self::set_area_cost)
/// or reaching [`cost`](QueryFilter::cost) through a polygon is a programming
/// error and panics; it is never clamped or wrapped.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DefaultQueryFilter {
    area_cost: [f32; MAX_AREAS],
    include_flags: PolyFlags,
    exclude_flags: PolyFlags,
}

impl Default for DefaultQueryFilter {
    fn default() -> Self {
        Self {
            area_cost: [1.0; MAX_AREAS],
            include_flags: PolyFlags::all(),
            exclude_flags: PolyFlags::empty(),
        }
    }
}

impl DefaultQueryFilter {
    /// Create a filter with default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Traversal cost multiplier of an area
    #[inline]
    pub fn area_cost(&self, area: u8) -> f32 {
        self.area_cost[area as usize]
    }

    /// Set the traversal cost multiplier of an area
    #[inline]
    pub fn set_area_cost(&mut self, area: u8, cost: f32) {
        self.area_cost[area as usize] = cost;
    }

    /// The whole area cost table
    #[inline]
    pub fn area_costs(&self) -> &[f32; MAX_AREAS] {
        &self.area_cost
    }

    /// Flags of polygons that may be visited
    #[inline]
    pub fn include_flags(&self) -> PolyFlags {
        self.include_flags
    }

    /// Set the flags of polygons that may be visited
    #[inline]
    pub fn set_include_flags(&mut self, flags: PolyFlags) {
        self.include_flags = flags;
    }

    /// Flags of polygons that must not be visited
    #[inline]
    pub fn exclude_flags(&self) -> PolyFlags {
        self.exclude_flags
    }

    /// Set the flags of polygons that must not be visited
    #[inline]
    pub fn set_exclude_flags(&mut self, flags: PolyFlags) {
        self.exclude_flags = flags;
    }

    /// Builder form of [`set_area_cost`](Self::set_area_cost)
    pub fn with_area_cost(mut self, area: u8, cost: f32) -> Self {
        self.set_area_cost(area, cost);
        self
    }

    /// Builder form of [`set_include_flags`](Self::set_include_flags)
    pub fn with_include_flags(mut self, flags: PolyFlags) -> Self {
        self.include_flags = flags;
        self
    }

    /// Builder form of [`set_exclude_flags`](Self::set_exclude_flags)
    pub fn with_exclude_flags(mut self, flags: PolyFlags) -> Self {
        self.exclude_flags = flags;
        self
    }
}

impl QueryFilter for DefaultQueryFilter {
    #[inline]
    fn pass_filter(&self, _poly_ref: PolyRef, _tile: &MeshTile, poly: &Poly) -> bool {
        poly.flags.intersects(self.include_flags) && !poly.flags.intersects(self.exclude_flags)
    }

    #[inline]
    fn cost(
        &self,
        pa: &NavPoint,
        pb: &NavPoint,
        _prev: Option<PolyContext<'_>>,
        cur: PolyContext<'_>,
        _next: Option<PolyContext<'_>>,
    ) -> f32 {
        pa.distance(pb) * self.area_cost[cur.poly.area as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::areas;
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    const REF: PolyRef = PolyRef::from_raw(0);

    fn poly(flags: u16, area: u8) -> Poly {
        let mut p = Poly::new(&[0, 1, 2], PolyFlags::from_bits_retain(flags), areas::GROUND);
        // Written directly so out-of-range ids reach the filter
        p.area = area;
        p
    }

    fn passes(filter: &DefaultQueryFilter, flags: u16) -> bool {
        filter.pass_filter(REF, &MeshTile::default(), &poly(flags, areas::GROUND))
    }

    fn masks(include: u16, exclude: u16) -> DefaultQueryFilter {
        DefaultQueryFilter::new()
            .with_include_flags(PolyFlags::from_bits_retain(include))
            .with_exclude_flags(PolyFlags::from_bits_retain(exclude))
    }

    fn segment_cost(filter: &DefaultQueryFilter, a: NavPoint, b: NavPoint, area: u8) -> f32 {
        let tile = MeshTile::default();
        let p = poly(1, area);
        filter.cost(&a, &b, None, PolyContext::new(REF, &tile, &p), None)
    }

    #[test]
    fn test_defaults() {
        let filter = DefaultQueryFilter::default();
        assert_eq!(filter.include_flags().bits(), 0xffff);
        assert!(filter.exclude_flags().is_empty());
        assert!(filter.area_costs().iter().all(|&c| c == 1.0));
        assert_eq!(filter, DefaultQueryFilter::new());
    }

    #[test]
    fn test_default_accepts_any_nonzero_flags() {
        let filter = DefaultQueryFilter::default();
        assert!(!passes(&filter, 0));
        for flags in 1..=u16::MAX {
            assert!(passes(&filter, flags), "flags {:#06x}", flags);
        }
    }

    #[test]
    fn test_include_and_not_excluded() {
        let mut rng = StdRng::seed_from_u64(0x6d61_7267);
        for _ in 0..20_000 {
            let flags: u16 = rng.random();
            let include: u16 = rng.random();
            let exclude: u16 = rng.random();
            let expected = (flags & include) != 0 && (flags & exclude) == 0;
            assert_eq!(
                passes(&masks(include, exclude), flags),
                expected,
                "flags={:#06x} include={:#06x} exclude={:#06x}",
                flags,
                include,
                exclude
            );
        }
    }

    #[test]
    fn test_exclusion_dominates_inclusion() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..5_000 {
            let flags: u16 = rng.random::<u16>() | 1;
            // Both masks share bit 0 with the polygon
            let filter = masks(rng.random::<u16>() | 1, rng.random::<u16>() | 1);
            assert!(!passes(&filter, flags));
        }
    }

    #[test]
    fn test_zero_flags_never_pass() {
        for include in [1u16, 0x00ff, 0x8000, 0xffff] {
            assert!(!passes(&masks(include, 0), 0));
        }
    }

    #[test]
    fn test_empty_include_rejects_everything() {
        for exclude in [0u16, 0x0f0f] {
            let filter = masks(0, exclude);
            for flags in [0u16, 1, 0x0100, 0xffff] {
                assert!(!passes(&filter, flags));
            }
        }
    }

    #[test]
    fn test_mask_examples() {
        // Bit 1 is both included and excluded
        assert!(!passes(&masks(0b0011, 0b0010), 0b0011));
        assert!(passes(&masks(0b0011, 0b0100), 0b0001));
    }

    #[test]
    fn test_pass_filter_is_repeatable() {
        let filter = masks(0b0110, 0b1000);
        let first = passes(&filter, 0b0100);
        for _ in 0..10 {
            assert_eq!(passes(&filter, 0b0100), first);
        }
    }

    #[test]
    fn test_cost_is_distance_times_area_cost() {
        let filter = DefaultQueryFilter::new().with_area_cost(1, 2.0);
        let a = NavPoint::new(0.0, 0.0, 0.0);
        let b = NavPoint::new(3.0, 0.0, 0.0);

        assert_relative_eq!(segment_cost(&filter, a, b, 1), 6.0);
        assert_relative_eq!(segment_cost(&filter, a, b, 0), 3.0);
        assert_relative_eq!(segment_cost(&filter, a, b, 2), 3.0);
    }

    #[test]
    fn test_area_cost_scales_only_its_area() {
        let a = NavPoint::new(-1.0, 0.5, 2.0);
        let b = NavPoint::new(4.0, -0.5, -3.0);
        let base = DefaultQueryFilter::new();
        let doubled = base.with_area_cost(areas::WATER, 2.0);

        for area in 0..MAX_AREAS as u8 {
            let before = segment_cost(&base, a, b, area);
            let after = segment_cost(&doubled, a, b, area);
            if area == areas::WATER {
                assert_relative_eq!(after, before * 2.0);
            } else {
                assert_eq!(after, before);
            }
        }
    }

    #[test]
    fn test_cost_symmetric() {
        let filter = DefaultQueryFilter::new().with_area_cost(areas::GRASS, 1.7);
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..1_000 {
            let a = NavPoint::new(
                rng.random_range(-50.0..50.0),
                rng.random_range(-5.0..5.0),
                rng.random_range(-50.0..50.0),
            );
            let b = NavPoint::new(
                rng.random_range(-50.0..50.0),
                rng.random_range(-5.0..5.0),
                rng.random_range(-50.0..50.0),
            );
            assert_eq!(
                segment_cost(&filter, a, b, areas::GRASS),
                segment_cost(&filter, b, a, areas::GRASS)
            );
        }
    }

    #[test]
    fn test_cost_ignores_context() {
        let filter = DefaultQueryFilter::new();
        let tile = MeshTile::default();
        let cur = poly(1, areas::GROUND);
        let other = poly(1, areas::WATER);
        let cur_ctx = PolyContext::new(PolyRef::from_raw(1), &tile, &cur);
        let other_ctx = PolyContext::new(PolyRef::from_raw(0), &tile, &other);
        let a = NavPoint::ZERO;
        let b = NavPoint::new(0.0, 0.0, 2.5);

        let bare = filter.cost(&a, &b, None, cur_ctx, None);
        assert_eq!(
            filter.cost(&a, &b, Some(other_ctx), cur_ctx, Some(other_ctx)),
            bare
        );
    }

    #[test]
    fn test_setters_and_getters() {
        let mut filter = DefaultQueryFilter::new();
        filter.set_area_cost(63, 4.5);
        filter.set_include_flags(PolyFlags::WALK | PolyFlags::DOOR);
        filter.set_exclude_flags(PolyFlags::DISABLED);

        assert_eq!(filter.area_cost(63), 4.5);
        assert_eq!(filter.include_flags(), PolyFlags::WALK | PolyFlags::DOOR);
        assert_eq!(filter.exclude_flags(), PolyFlags::DISABLED);
    }

    #[test]
    #[should_panic]
    fn test_area_cost_out_of_range_panics() {
        DefaultQueryFilter::new().area_cost(MAX_AREAS as u8);
    }

    #[test]
    #[should_panic]
    fn test_set_area_cost_out_of_range_panics() {
        DefaultQueryFilter::new().set_area_cost(200, 2.0);
    }

    #[test]
    #[should_panic(expected = "index out of bounds")]
    fn test_cost_with_out_of_range_area_panics() {
        segment_cost(
            &DefaultQueryFilter::new(),
            NavPoint::ZERO,
            NavPoint::new(1.0, 0.0, 0.0),
            MAX_AREAS as u8,
        );
    }
}
