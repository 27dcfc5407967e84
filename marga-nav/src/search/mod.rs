//! Polygon path search.
//!
//! A reference A* search over navmesh polygons that consumes any
//! [`QueryFilter`]. The filter is the only extension point: it decides which
//! polygons are reachable and what each step costs.
//!
//! ```rust
//! use marga_nav::NavMesh;
//! use marga_nav::filter::DefaultQueryFilter;
//! use marga_nav::mesh::areas;
//! use marga_nav::search::PolyPathPlanner;
//!
//! // 3 x 3 grid with a pond in the middle
//! let mut mesh = NavMesh::new();
//! let grid = mesh.add_grid_tile(3, 3, 1.0).unwrap();
//! let pond = grid.poly_ref(1, 1);
//! mesh.set_poly_area(pond, areas::WATER).unwrap();
//!
//! let filter = DefaultQueryFilter::new().with_area_cost(areas::WATER, 4.0);
//! let planner = PolyPathPlanner::with_defaults(&mesh, filter);
//!
//! let result = planner.find_path(
//!     grid.poly_ref(0, 1),
//!     grid.poly_ref(2, 1),
//!     grid.center(0, 1),
//!     grid.center(2, 1),
//! );
//! assert!(result.success);
//! assert!(!result.polys.contains(&pond));
//! println!("Corridor of {} polygons, cost {:.2}", result.len(), result.cost);
//! ```

mod planner;
mod types;

pub use planner::PolyPathPlanner;
pub use types::{HEURISTIC_SCALE, PathFailure, PathResult, SearchConfig};

use crate::core::NavPoint;
use crate::filter::QueryFilter;
use crate::mesh::{NavMesh, PolyRef};

/// Quick search with default configuration
pub fn find_path<F: QueryFilter>(
    mesh: &NavMesh,
    filter: F,
    start_ref: PolyRef,
    end_ref: PolyRef,
    start_pos: NavPoint,
    end_pos: NavPoint,
) -> PathResult {
    PolyPathPlanner::with_defaults(mesh, filter).find_path(start_ref, end_ref, start_pos, end_pos)
}

/// Check if the goal polygon is reachable
pub fn path_exists<F: QueryFilter>(
    mesh: &NavMesh,
    filter: F,
    start_ref: PolyRef,
    end_ref: PolyRef,
    start_pos: NavPoint,
    end_pos: NavPoint,
) -> bool {
    find_path(mesh, filter, start_ref, end_ref, start_pos, end_pos).success
}

/// All polygons of the mesh that pass the filter
pub fn passable_polys<F: QueryFilter>(mesh: &NavMesh, filter: &F) -> Vec<PolyRef> {
    mesh.iter_polys()
        .filter(|(poly_ref, tile, poly)| filter.pass_filter(*poly_ref, tile, poly))
        .map(|(poly_ref, _, _)| poly_ref)
        .collect()
}
