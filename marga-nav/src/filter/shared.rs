//! Reconfigurable filter shared across threads.

use super::{DefaultQueryFilter, PolyContext, QueryFilter};
use crate::core::NavPoint;
use crate::mesh::{MeshTile, Poly, PolyRef};
use parking_lot::RwLock;
use std::sync::Arc;

/// A [`DefaultQueryFilter`] that can be reconfigured while searches run.
///
/// Clones share the same configuration. Every evaluation takes a read lock,
/// so each `pass_filter`/`cost` call sees one consistent configuration, but a
/// search running across an [`update`](Self::update) may see the old
/// configuration on some calls and the new one on later calls. Searches that
/// need a stable view for their whole run should use [`snapshot`](Self::snapshot).
#[derive(Clone, Debug, Default)]
pub struct SharedQueryFilter {
    inner: Arc<RwLock<DefaultQueryFilter>>,
}

impl SharedQueryFilter {
    /// Wrap a filter
    pub fn new(filter: DefaultQueryFilter) -> Self {
        Self {
            inner: Arc::new(RwLock::new(filter)),
        }
    }

    /// Modify the configuration under the write lock
    pub fn update<R>(&self, f: impl FnOnce(&mut DefaultQueryFilter) -> R) -> R {
        let mut guard = self.inner.write();
        f(&mut guard)
    }

    /// Copy of the current configuration
    pub fn snapshot(&self) -> DefaultQueryFilter {
        *self.inner.read()
    }
}

impl From<DefaultQueryFilter> for SharedQueryFilter {
    fn from(filter: DefaultQueryFilter) -> Self {
        Self::new(filter)
    }
}

impl QueryFilter for SharedQueryFilter {
    #[inline]
    fn pass_filter(&self, poly_ref: PolyRef, tile: &MeshTile, poly: &Poly) -> bool {
        self.inner.read().pass_filter(poly_ref, tile, poly)
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
        self.inner.read().cost(pa, pb, prev, cur, next)
    }
}
