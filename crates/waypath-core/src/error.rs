use std::fmt;

use crate::geom::Point;
use crate::node::NodeId;

/// A topology that cannot be built as requested.
///
/// These are contract violations by the caller and are reported when the
/// topology is constructed, never later during a search.
#[derive(Debug, Clone, PartialEq)]
pub enum TopologyError {
    /// An edge or child list references a node outside the arena.
    UnknownNode { id: NodeId, len: usize },
    /// An edge weight is negative, NaN or infinite.
    InvalidCost { from: NodeId, to: NodeId, cost: f64 },
    /// A tree node is reached a second time (cycle or shared child).
    BackEdge { from: NodeId, to: NodeId },
    /// A tree node is not reachable from the root.
    Detached(NodeId),
    /// Grid coordinates outside the lattice.
    OutOfBounds(Point),
    /// A start or end was placed on a blocked grid cell.
    BlockedCell(Point),
    /// A blocked mask whose length does not match the grid.
    MaskSize { expected: usize, got: usize },
}

impl fmt::Display for TopologyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownNode { id, len } => {
                write!(f, "node {id} is not in the topology ({len} nodes)")
            }
            Self::InvalidCost { from, to, cost } => {
                write!(f, "edge {from} -> {to} has invalid cost {cost}")
            }
            Self::BackEdge { from, to } => {
                write!(f, "tree edge {from} -> {to} revisits an already attached node")
            }
            Self::Detached(id) => write!(f, "tree node {id} is not reachable from the root"),
            Self::OutOfBounds(p) => write!(f, "grid position {p} is out of bounds"),
            Self::BlockedCell(p) => write!(f, "grid position {p} is blocked"),
            Self::MaskSize { expected, got } => {
                write!(f, "blocked mask has {got} cells, grid has {expected}")
            }
        }
    }
}

impl std::error::Error for TopologyError {}
