//! Core geometric types.
//!
//! - [`NavPoint`]: 3D position with Euclidean distance, the metric the
//!   default traversal cost is built on

mod point;

pub use point::NavPoint;
