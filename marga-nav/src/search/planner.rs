//! Polygon A* planner.

use crate::core::NavPoint;
use crate::filter::{PolyContext, QueryFilter};
use crate::mesh::{NavMesh, PolyRef};
use log::{debug, trace};
use std::collections::{BinaryHeap, HashMap};

use super::types::{HEURISTIC_SCALE, NodeRecord, OpenEntry, PathFailure, PathResult, SearchConfig};

/// A* search over navmesh polygons, parameterised by a traversal policy.
///
/// Nodes are polygons; the search enters each polygon at the midpoint of
/// the portal it was first reached through. For every expansion the filter
/// decides admissibility of the neighbour and prices the segment across the
/// current polygon, with the parent as `prev` and the neighbour as `next`.
pub struct PolyPathPlanner<'a, F> {
    mesh: &'a NavMesh,
    filter: F,
    config: SearchConfig,
}

impl<'a, F: QueryFilter> PolyPathPlanner<'a, F> {
    /// Create a new planner
    pub fn new(mesh: &'a NavMesh, filter: F, config: SearchConfig) -> Self {
        Self {
            mesh,
            filter,
            config,
        }
    }

    /// Create with default configuration
    pub fn with_defaults(mesh: &'a NavMesh, filter: F) -> Self {
        Self::new(mesh, filter, SearchConfig::default())
    }

    /// The traversal policy in use
    pub fn filter(&self) -> &F {
        &self.filter
    }

    /// Search configuration
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Find a polygon corridor from `start_ref` to `end_ref`.
    ///
    /// `start_pos` and `end_pos` must lie inside their polygons. If the goal
    /// cannot be reached, the corridor to the polygon closest to `end_pos`
    /// is returned with `partial = true`.
    pub fn find_path(
        &self,
        start_ref: PolyRef,
        end_ref: PolyRef,
        start_pos: NavPoint,
        end_pos: NavPoint,
    ) -> PathResult {
        trace!(
            "[PolyPath] find_path: start={} ({:.2},{:.2},{:.2}) end={} ({:.2},{:.2},{:.2})",
            start_ref, start_pos.x, start_pos.y, start_pos.z, end_ref, end_pos.x, end_pos.y, end_pos.z
        );

        let Ok((start_tile, start_poly)) = self.mesh.tile_and_poly(start_ref) else {
            debug!("[PolyPath] FAILED: InvalidStart {}", start_ref);
            return PathResult::failed(PathFailure::InvalidStart, 0);
        };
        let Ok((end_tile, end_poly)) = self.mesh.tile_and_poly(end_ref) else {
            debug!("[PolyPath] FAILED: InvalidEnd {}", end_ref);
            return PathResult::failed(PathFailure::InvalidEnd, 0);
        };

        if !self.filter.pass_filter(start_ref, start_tile, start_poly) {
            debug!("[PolyPath] FAILED: StartFiltered {}", start_ref);
            return PathResult::failed(PathFailure::StartFiltered, 0);
        }
        if !self.filter.pass_filter(end_ref, end_tile, end_poly) {
            debug!("[PolyPath] FAILED: EndFiltered {}", end_ref);
            return PathResult::failed(PathFailure::EndFiltered, 0);
        }

        if start_ref == end_ref {
            let ctx = PolyContext::new(start_ref, start_tile, start_poly);
            let cost = self.filter.cost(&start_pos, &end_pos, None, ctx, None);
            return PathResult {
                polys: vec![start_ref],
                cost,
                nodes_expanded: 1,
                success: true,
                partial: false,
                failure_reason: None,
            };
        }

        let mut open_set = BinaryHeap::new();
        let mut nodes: HashMap<PolyRef, NodeRecord> = HashMap::new();

        let h_start = start_pos.distance(&end_pos) * HEURISTIC_SCALE;
        nodes.insert(
            start_ref,
            NodeRecord {
                parent: None,
                pos: start_pos,
                g_cost: 0.0,
                f_cost: h_start,
                closed: false,
            },
        );
        open_set.push(OpenEntry {
            poly: start_ref,
            g_cost: 0.0,
            f_cost: h_start,
        });

        let mut best = start_ref;
        let mut best_h = h_start;
        let mut out_of_nodes = false;
        let mut nodes_expanded = 0;

        while let Some(entry) = open_set.pop() {
            // Skip entries superseded by a cheaper visit
            let current = match nodes.get_mut(&entry.poly) {
                Some(rec) if !rec.closed && rec.g_cost == entry.g_cost => {
                    rec.closed = true;
                    *rec
                }
                _ => continue,
            };
            nodes_expanded += 1;

            // Goal reached
            if entry.poly == end_ref {
                return self.reconstruct_path(&nodes, end_ref, current.g_cost, nodes_expanded);
            }

            let Some(cur) = self.context(entry.poly) else {
                continue;
            };
            let prev = current.parent.and_then(|p| self.context(p));

            for neighbour in cur.poly.neighbours() {
                if Some(neighbour) == current.parent {
                    continue;
                }

                let Some(next) = self.context(neighbour) else {
                    continue;
                };
                if !self.filter.pass_filter(neighbour, next.tile, next.poly) {
                    continue;
                }

                let existing = nodes.get(&neighbour).copied();
                if existing.is_none() && nodes.len() >= self.config.max_nodes {
                    out_of_nodes = true;
                    continue;
                }

                let neighbour_pos = match existing {
                    Some(rec) => rec.pos,
                    None => match self.mesh.portal_midpoint(entry.poly, neighbour) {
                        Ok(pos) => pos,
                        Err(_) => continue,
                    },
                };

                let (g, h) = if neighbour == end_ref {
                    let cur_cost = self
                        .filter
                        .cost(&current.pos, &neighbour_pos, prev, cur, Some(next));
                    let end_cost = self
                        .filter
                        .cost(&neighbour_pos, &end_pos, Some(cur), next, None);
                    (current.g_cost + cur_cost + end_cost, 0.0)
                } else {
                    let cost = self
                        .filter
                        .cost(&current.pos, &neighbour_pos, prev, cur, Some(next));
                    (
                        current.g_cost + cost,
                        neighbour_pos.distance(&end_pos) * HEURISTIC_SCALE,
                    )
                };
                let f = g + h;

                if existing.is_some_and(|rec| f >= rec.f_cost) {
                    continue;
                }

                nodes.insert(
                    neighbour,
                    NodeRecord {
                        parent: Some(entry.poly),
                        pos: neighbour_pos,
                        g_cost: g,
                        f_cost: f,
                        closed: false,
                    },
                );
                open_set.push(OpenEntry {
                    poly: neighbour,
                    g_cost: g,
                    f_cost: f,
                });

                if h < best_h {
                    best_h = h;
                    best = neighbour;
                }
            }
        }

        let reason = if out_of_nodes {
            PathFailure::NodeBudgetExceeded
        } else {
            PathFailure::NoPath
        };
        debug!(
            "[PolyPath] FAILED: {:?} after expanding {} nodes, partial to {}",
            reason, nodes_expanded, best
        );

        let best_g = nodes.get(&best).map(|n| n.g_cost).unwrap_or_default();
        let mut result = self.reconstruct_path(&nodes, best, best_g, nodes_expanded);
        result.success = false;
        result.partial = true;
        result.failure_reason = Some(reason);
        result
    }

    fn context(&self, poly_ref: PolyRef) -> Option<PolyContext<'a>> {
        let (tile, poly) = self.mesh.tile_and_poly(poly_ref).ok()?;
        Some(PolyContext::new(poly_ref, tile, poly))
    }

    /// Reconstruct the corridor from parent links
    fn reconstruct_path(
        &self,
        nodes: &HashMap<PolyRef, NodeRecord>,
        last: PolyRef,
        cost: f32,
        nodes_expanded: usize,
    ) -> PathResult {
        let mut polys = vec![last];
        let mut current = last;

        while let Some(parent) = nodes.get(&current).and_then(|n| n.parent) {
            polys.push(parent);
            current = parent;
            if polys.len() > nodes.len() {
                break;
            }
        }
        polys.reverse();

        trace!(
            "[PolyPath] corridor: {} polys, cost={:.2}, nodes_expanded={}",
            polys.len(),
            cost,
            nodes_expanded
        );

        PathResult {
            polys,
            cost,
            nodes_expanded,
            success: true,
            partial: false,
            failure_reason: None,
        }
    }
}
