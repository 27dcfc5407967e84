//! # Marga-Nav: Navmesh Traversal Policies
//!
//! Pluggable query filters for polygon path search on a tiled navigation
//! mesh. A filter decides which polygons an agent may enter and what it
//! costs to cross them; the search consults it for every expansion.
//!
//! ## Features
//!
//! - **QueryFilter trait**: Admissibility and cost, with the previous and
//!   next polygon available to the cost function
//! - **DefaultQueryFilter**: Include/exclude flag masks plus a per-area
//!   cost multiplier table
//! - **SharedQueryFilter**: Reconfigure a policy while searches read it
//! - **FilterConfig**: YAML-backed filter configuration with validation
//! - **PolyPathPlanner**: Reference polygon A* that consumes any filter
//!
//! ## Quick Start
//!
//! ```rust
//! use marga_nav::{DefaultQueryFilter, NavMesh, PolyFlags, PolyPathPlanner};
//! use marga_nav::mesh::areas;
//!
//! let mut mesh = NavMesh::new();
//! let grid = mesh.add_grid_tile(4, 1, 1.0).unwrap();
//! mesh.set_poly_area(grid.poly_ref(2, 0), areas::WATER).unwrap();
//!
//! let filter = DefaultQueryFilter::new()
//!     .with_exclude_flags(PolyFlags::DISABLED)
//!     .with_area_cost(areas::WATER, 2.0);
//!
//! let planner = PolyPathPlanner::with_defaults(&mesh, filter);
//! let result = planner.find_path(
//!     grid.poly_ref(0, 0),
//!     grid.poly_ref(3, 0),
//!     grid.center(0, 0),
//!     grid.center(3, 0),
//! );
//! assert!(result.success);
//! assert_eq!(result.len(), 4);
//! ```
//!
//! ## Coordinate Frame
//!
//! Positions are 3D world coordinates. The mesh surface lies in the XZ
//! plane with Y up; traversal cost uses full 3D Euclidean distance.
//!
//! ## Architecture
//!
//! - [`core`]: Fundamental types (NavPoint)
//! - [`mesh`]: Polygon references, polygons, tiles and the mesh container
//! - [`filter`]: Traversal policies
//! - [`config`]: Filter configuration
//! - [`search`]: Polygon path search
//! - [`error`]: Error types
//!
//! ## Data Flow
//!
//! ```text
//!   FilterConfig (YAML)
//!          │ build()
//!          ▼
//!   ┌────────────────┐    pass_filter / cost    ┌────────────────┐
//!   │  QueryFilter   │◄─────────────────────────│ PolyPathPlanner│
//!   └────────────────┘                          └───────┬────────┘
//!                                                       │ tile_and_poly
//!                                                       │ portal_midpoint
//!                                                       ▼
//!                                               ┌────────────────┐
//!                                               │    NavMesh     │
//!                                               └────────────────┘
//! ```

pub mod config;
pub mod core;
pub mod error;
pub mod filter;
pub mod mesh;
pub mod search;

// Re-export main types at crate root
pub use config::{AreaCost, FilterConfig};
pub use core::NavPoint;
pub use error::{ConfigError, MeshError};
pub use filter::{DefaultQueryFilter, PolyContext, QueryFilter, SharedQueryFilter};
pub use mesh::{MAX_AREAS, MeshTile, NavMesh, Poly, PolyFlags, PolyRef};
pub use search::{PathFailure, PathResult, PolyPathPlanner, SearchConfig};
