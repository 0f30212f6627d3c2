use crate::node::{Node, NodeId, Tags};

/// Capabilities a search needs from a single node.
pub trait Traversable {
    /// Outgoing neighbors, in a stable order.
    fn neighbors(&self) -> &[NodeId];
    /// Cost of stepping onto this node. Must be >= 0.
    fn cost(&self) -> f64;
    /// Estimate of the remaining cost to the goal.
    fn heuristic(&self) -> f64;
    /// Structural depth.
    fn depth(&self) -> usize;
    fn tags(&self) -> &Tags;
}

impl Traversable for Node {
    fn neighbors(&self) -> &[NodeId] {
        Node::neighbors(self)
    }

    fn cost(&self) -> f64 {
        Node::cost(self)
    }

    fn heuristic(&self) -> f64 {
        Node::heuristic(self)
    }

    fn depth(&self) -> usize {
        Node::depth(self)
    }

    fn tags(&self) -> &Tags {
        Node::tags(self)
    }
}

/// An arena of nodes addressed by [`NodeId`].
///
/// Ids are dense: every id below [`len`](Self::len) resolves to a node.
pub trait Topology {
    type Node: Traversable;

    /// Number of nodes in the arena.
    fn len(&self) -> usize;

    /// The node behind `id`, or `None` if `id` is out of range.
    fn node(&self, id: NodeId) -> Option<&Self::Node>;

    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline]
    fn contains(&self, id: NodeId) -> bool {
        id.index() < self.len()
    }

    /// Cost of moving along the edge `from -> to`. Defaults to the cost of
    /// the destination node.
    fn edge_cost(&self, from: NodeId, to: NodeId) -> f64 {
        let _ = from;
        self.node(to).map_or(f64::INFINITY, Traversable::cost)
    }

    /// Sum of edge costs along `path`. Empty and single-node paths cost 0.
    fn path_cost(&self, path: &[NodeId]) -> f64 {
        path.windows(2).map(|w| self.edge_cost(w[0], w[1])).sum()
    }
}
