//! Rooted trees whose neighbor lists are child lists.

use crate::error::TopologyError;
use crate::graph::{Edge, Graph};
use crate::node::{Node, NodeId};
use crate::topology::Topology;

/// A rooted tree. Every non-root node has exactly one parent and is
/// reachable from the root, so the structure is acyclic by construction.
#[derive(Clone, Debug)]
pub struct Tree {
    nodes: Vec<Node>,
    root: NodeId,
}

const UNSEEN: usize = usize::MAX;

impl Tree {
    /// Build a tree from an arena whose neighbor lists are child lists,
    /// as seeded with [`Node::with_children`].
    ///
    /// Each node's [`depth`](Node::depth) is set from the root.
    pub fn new(mut nodes: Vec<Node>, root: NodeId) -> Result<Self, TopologyError> {
        let len = nodes.len();
        if root.index() >= len {
            return Err(TopologyError::UnknownNode { id: root, len });
        }

        let mut depth = vec![UNSEEN; len];
        depth[root.index()] = 0;
        let mut stack = vec![root];
        while let Some(ci) = stack.pop() {
            let d = depth[ci.index()];
            for &child in &nodes[ci.index()].neighbors {
                if child.index() >= len {
                    return Err(TopologyError::UnknownNode { id: child, len });
                }
                if depth[child.index()] != UNSEEN {
                    return Err(TopologyError::BackEdge { from: ci, to: child });
                }
                depth[child.index()] = d + 1;
                stack.push(child);
            }
        }

        if let Some(i) = depth.iter().position(|&d| d == UNSEEN) {
            return Err(TopologyError::Detached(NodeId::new(i)));
        }
        for (n, d) in nodes.iter_mut().zip(depth) {
            n.depth = d;
        }
        Ok(Self { nodes, root })
    }

    /// Start a tree holding only `root`.
    pub fn with_root(mut root: Node) -> Self {
        root.neighbors.clear();
        root.depth = 0;
        Self {
            nodes: vec![root],
            root: NodeId::new(0),
        }
    }

    /// Attach `child` as the last child of `parent` and return its id.
    pub fn add_child(&mut self, parent: NodeId, mut child: Node) -> Result<NodeId, TopologyError> {
        let len = self.nodes.len();
        let Some(p) = self.nodes.get_mut(parent.index()) else {
            return Err(TopologyError::UnknownNode { id: parent, len });
        };
        let id = NodeId::new(len);
        p.neighbors.push(id);
        child.neighbors.clear();
        child.depth = p.depth + 1;
        self.nodes.push(child);
        Ok(id)
    }

    #[inline]
    pub fn root(&self) -> NodeId {
        self.root
    }

    #[inline]
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Mutable access to a node's cost, heuristic and tags.
    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.index())
    }

    /// Children of `id`, or an empty slice for unknown ids.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.nodes.get(id.index()).map_or(&[][..], Node::neighbors)
    }

    /// Mean number of children per node.
    pub fn effective_branching_factor(&self) -> f64 {
        let links: usize = self.nodes.iter().map(|n| n.neighbors.len()).sum();
        links as f64 / self.nodes.len() as f64
    }

    /// Depth of the deepest node; a lone root has depth 0.
    pub fn max_depth(&self) -> usize {
        self.nodes.iter().map(|n| n.depth).max().unwrap_or(0)
    }

    /// The same structure as a directed [`Graph`] with one edge per
    /// parent-child link.
    pub fn as_graph(&self) -> Graph {
        let edges = self
            .nodes
            .iter()
            .enumerate()
            .flat_map(|(i, n)| n.neighbors.iter().map(move |&c| Edge::new(NodeId::new(i), c)))
            .collect();
        Graph::wire(self.nodes.clone(), edges, true)
    }
}

impl Topology for Tree {
    type Node = Node;

    #[inline]
    fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }
}
