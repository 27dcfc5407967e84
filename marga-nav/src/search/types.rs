//! Polygon search types.

use crate::core::NavPoint;
use crate::mesh::PolyRef;
use std::cmp::Ordering;

/// Heuristic scale, slightly below 1 so straight-line distance never
/// over-estimates a cost that is exactly distance × 1.0
pub const HEURISTIC_SCALE: f32 = 0.999;

/// Entry in the open list
#[derive(Clone, Copy, Debug)]
pub(super) struct OpenEntry {
    pub poly: PolyRef,
    pub g_cost: f32, // Cost from start
    pub f_cost: f32, // g_cost + heuristic
}

impl Eq for OpenEntry {}

impl PartialEq for OpenEntry {
    fn eq(&self, other: &Self) -> bool {
        self.poly == other.poly && self.f_cost == other.f_cost
    }
}

impl Ord for OpenEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering for min-heap behavior
        other
            .f_cost
            .partial_cmp(&self.f_cost)
            .unwrap_or(Ordering::Equal)
    }
}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Bookkeeping for a visited polygon
#[derive(Clone, Copy, Debug)]
pub(super) struct NodeRecord {
    pub parent: Option<PolyRef>,
    /// Position the search enters this polygon at
    pub pos: NavPoint,
    pub g_cost: f32,
    pub f_cost: f32,
    pub closed: bool,
}

/// Polygon search configuration
#[derive(Clone, Debug)]
pub struct SearchConfig {
    /// Maximum number of polygons the search may track
    pub max_nodes: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self { max_nodes: 4096 }
    }
}

impl SearchConfig {
    /// Create with a custom node budget
    pub fn with_max_nodes(max_nodes: usize) -> Self {
        Self { max_nodes }
    }
}

/// Result of a polygon search
#[derive(Clone, Debug)]
pub struct PathResult {
    /// Polygon corridor from start towards the goal
    pub polys: Vec<PolyRef>,
    /// Accumulated traversal cost of `polys`
    pub cost: f32,
    /// Number of polygons expanded
    pub nodes_expanded: usize,
    /// Whether the corridor reaches the goal polygon
    pub success: bool,
    /// Whether the corridor stops at the polygon closest to the goal
    pub partial: bool,
    /// Reason for failure (if any)
    pub failure_reason: Option<PathFailure>,
}

impl PathResult {
    /// Create a failed result with no corridor
    pub(super) fn failed(reason: PathFailure, nodes_expanded: usize) -> Self {
        Self {
            polys: Vec::new(),
            cost: f32::INFINITY,
            nodes_expanded,
            success: false,
            partial: false,
            failure_reason: Some(reason),
        }
    }

    /// Number of polygons in the corridor
    pub fn len(&self) -> usize {
        self.polys.len()
    }

    /// Check if the corridor is empty
    pub fn is_empty(&self) -> bool {
        self.polys.is_empty()
    }

    /// Last polygon of the corridor
    pub fn last(&self) -> Option<PolyRef> {
        self.polys.last().copied()
    }
}

/// Reason for search failure
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PathFailure {
    /// Start reference does not resolve
    InvalidStart,
    /// End reference does not resolve
    InvalidEnd,
    /// Start polygon rejected by the filter
    StartFiltered,
    /// End polygon rejected by the filter
    EndFiltered,
    /// Goal unreachable through admissible polygons
    NoPath,
    /// Node budget exhausted before reaching the goal
    NodeBudgetExceeded,
}
