//! **waypath-core** — node arenas and the topologies searched by
//! `waypath-search`.
//!
//! Every topology owns a contiguous arena of [`Node`] records. Neighbor
//! lists hold [`NodeId`] indices into that arena, so graphs with cycles need
//! no shared ownership. Three builders are provided:
//!
//! - [`Graph`] — explicit (optionally weighted) edge list, directed or not
//! - [`Tree`] — rooted, acyclic child lists
//! - [`Grid`] — 2D lattice with 4/8-connectivity and blocked cells
//!
//! Searches only need the [`Topology`] and [`Traversable`] traits, so
//! callers can plug in their own arenas too.

mod distance;
mod error;
pub mod geom;
mod graph;
mod grid;
mod node;
mod topology;
mod tree;

pub use distance::{chebyshev, manhattan};
pub use error::TopologyError;
pub use geom::{Point, Range};
pub use graph::{Edge, Graph};
pub use grid::{CellRef, Grid};
pub use node::{Node, NodeId, ROLE_KEY, Role, Tags};
pub use topology::{Topology, Traversable};
pub use tree::Tree;
