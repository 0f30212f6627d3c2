//! Explicit edge-list graphs.

use std::collections::{HashMap, HashSet, VecDeque};

use crate::error::TopologyError;
use crate::node::{Node, NodeId};
use crate::topology::Topology;
use crate::tree::Tree;

/// A connection between two nodes of a [`Graph`].
///
/// Without an explicit weight, traversing the edge costs the destination
/// node's [`cost`](Node::cost).
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Edge {
    pub from: NodeId,
    pub to: NodeId,
    pub cost: Option<f64>,
}

impl Edge {
    pub fn new(from: NodeId, to: NodeId) -> Self {
        Self {
            from,
            to,
            cost: None,
        }
    }

    pub fn weighted(from: NodeId, to: NodeId, cost: f64) -> Self {
        Self {
            from,
            to,
            cost: Some(cost),
        }
    }

    /// The same edge pointing the other way.
    pub fn reversed(self) -> Self {
        Self {
            from: self.to,
            to: self.from,
            cost: self.cost,
        }
    }
}

/// A set of nodes wired by an explicit edge list.
#[derive(Clone, Debug)]
pub struct Graph {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    directed: bool,
    weights: HashMap<(NodeId, NodeId), f64>,
}

impl Graph {
    /// Build a graph over `nodes`, where [`NodeId`]s index into `nodes`.
    ///
    /// Any neighbor lists already present on `nodes` are replaced by the
    /// wiring described by `edges`. When `directed` is false every edge is
    /// mirrored; the mirrored edges follow the originals in
    /// [`edges`](Self::edges). Parallel edges collapse into one neighbor
    /// entry with the cheapest explicit weight.
    pub fn new(nodes: Vec<Node>, edges: Vec<Edge>, directed: bool) -> Result<Self, TopologyError> {
        let len = nodes.len();
        for e in &edges {
            for id in [e.from, e.to] {
                if id.index() >= len {
                    return Err(TopologyError::UnknownNode { id, len });
                }
            }
            if let Some(cost) = e.cost {
                if !cost.is_finite() || cost < 0.0 {
                    return Err(TopologyError::InvalidCost {
                        from: e.from,
                        to: e.to,
                        cost,
                    });
                }
            }
        }

        Ok(Self::wire(nodes, edges, directed))
    }

    /// Wire already validated edges into `nodes`.
    pub(crate) fn wire(mut nodes: Vec<Node>, mut edges: Vec<Edge>, directed: bool) -> Self {
        if !directed {
            let mirrored: Vec<Edge> = edges.iter().map(|e| e.reversed()).collect();
            edges.extend(mirrored);
        }

        for n in nodes.iter_mut() {
            n.neighbors.clear();
            n.depth = 0;
        }

        let mut weights: HashMap<(NodeId, NodeId), f64> = HashMap::new();
        for e in &edges {
            let neighbors = &mut nodes[e.from.index()].neighbors;
            if !neighbors.contains(&e.to) {
                neighbors.push(e.to);
            }
            if let Some(cost) = e.cost {
                weights
                    .entry((e.from, e.to))
                    .and_modify(|w| *w = w.min(cost))
                    .or_insert(cost);
            }
        }

        Self {
            nodes,
            edges,
            directed,
            weights,
        }
    }

    #[inline]
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Mutable access to a node's cost, heuristic and tags.
    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.index())
    }

    /// All edges, including the mirrored ones of an undirected graph.
    #[inline]
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    #[inline]
    pub fn is_directed(&self) -> bool {
        self.directed
    }

    /// Whether no node shows up twice as an edge destination in one pass
    /// over [`edges`](Self::edges).
    ///
    /// This is a cheap structural check, not a cycle detector: a diamond
    /// (`a->b`, `a->c`, `b->d`, `c->d`) is reported as not loop-free, and a
    /// cycle whose nodes are each entered once (`a->b`, `b->a`) passes.
    /// Edge sources are not compared against earlier destinations, so a
    /// chain `a->b`, `b->c` is loop-free too.
    pub fn is_loop_free(&self) -> bool {
        let mut seen = HashSet::new();
        self.edges.iter().all(|e| seen.insert(e.to))
    }

    /// Whether every node is reachable from every other when edge direction
    /// is ignored. The empty graph is connected.
    pub fn is_connected(&self) -> bool {
        if self.nodes.is_empty() {
            return true;
        }
        let mut adjacent: Vec<Vec<usize>> = vec![Vec::new(); self.nodes.len()];
        for e in &self.edges {
            adjacent[e.from.index()].push(e.to.index());
            adjacent[e.to.index()].push(e.from.index());
        }

        let mut seen = vec![false; self.nodes.len()];
        let mut queue = VecDeque::from([0usize]);
        seen[0] = true;
        let mut reached = 1;
        while let Some(ci) = queue.pop_front() {
            for &ni in &adjacent[ci] {
                if !seen[ni] {
                    seen[ni] = true;
                    reached += 1;
                    queue.push_back(ni);
                }
            }
        }
        reached == self.nodes.len()
    }

    /// Reinterpret this graph as a tree rooted at `root`.
    ///
    /// Fails with the same errors as [`Tree::new`]; in particular every
    /// mirrored edge of an undirected graph is a back-edge.
    pub fn as_tree(&self, root: NodeId) -> Result<Tree, TopologyError> {
        Tree::new(self.nodes.clone(), root)
    }
}

impl Topology for Graph {
    type Node = Node;

    #[inline]
    fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    fn edge_cost(&self, from: NodeId, to: NodeId) -> f64 {
        match self.weights.get(&(from, to)) {
            Some(&w) => w,
            None => self.node(to).map_or(f64::INFINITY, Node::cost),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids<const N: usize>() -> [NodeId; N] {
        std::array::from_fn(NodeId::new)
    }

    fn nodes(n: usize) -> Vec<Node> {
        vec![Node::new(); n]
    }

    #[test]
    fn directed_wiring_follows_edge_order() {
        let [a, b, c] = ids();
        let g = Graph::new(
            nodes(3),
            vec![Edge::new(a, c), Edge::new(a, b), Edge::new(b, c)],
            true,
        )
        .unwrap();
        assert_eq!(g.node(a).unwrap().neighbors(), &[c, b]);
        assert_eq!(g.node(b).unwrap().neighbors(), &[c]);
        assert!(g.node(c).unwrap().neighbors().is_empty());
        assert_eq!(g.edges().len(), 3);
    }

    #[test]
    fn undirected_mirrors_every_edge() {
        let [a, b, c] = ids();
        let g = Graph::new(nodes(3), vec![Edge::new(a, b), Edge::weighted(b, c, 2.5)], false).unwrap();
        assert_eq!(g.edges().len(), 4);
        assert_eq!(g.edges()[2], Edge::new(b, a));
        assert_eq!(g.node(b).unwrap().neighbors(), &[c, a]);
        assert_eq!(g.edge_cost(c, b), 2.5);
        assert!(!g.is_directed());
    }

    #[test]
    fn unknown_endpoint_is_rejected() {
        let [a, _, c] = ids();
        let err = Graph::new(nodes(2), vec![Edge::new(a, c)], true).unwrap_err();
        assert_eq!(err, TopologyError::UnknownNode { id: c, len: 2 });
    }

    #[test]
    fn negative_or_nan_weights_are_rejected() {
        let [a, b] = ids();
        let err = Graph::new(nodes(2), vec![Edge::weighted(a, b, -1.0)], true).unwrap_err();
        assert!(matches!(err, TopologyError::InvalidCost { .. }));
        let err = Graph::new(nodes(2), vec![Edge::weighted(a, b, f64::NAN)], true).unwrap_err();
        assert!(matches!(err, TopologyError::InvalidCost { .. }));
    }

    #[test]
    fn edge_cost_prefers_explicit_weight() {
        let [a, b, c] = ids();
        let mut ns = nodes(3);
        ns[2] = Node::new().with_cost(7.0);
        let g = Graph::new(ns, vec![Edge::weighted(a, b, 3.0), Edge::new(b, c)], true).unwrap();
        assert_eq!(g.edge_cost(a, b), 3.0);
        assert_eq!(g.edge_cost(b, c), 7.0);
        assert_eq!(g.path_cost(&[a, b, c]), 10.0);
    }

    #[test]
    fn parallel_edges_keep_cheapest_weight() {
        let [a, b] = ids();
        let g = Graph::new(
            nodes(2),
            vec![Edge::weighted(a, b, 4.0), Edge::weighted(a, b, 2.0)],
            true,
        )
        .unwrap();
        assert_eq!(g.node(a).unwrap().neighbors(), &[b]);
        assert_eq!(g.edge_cost(a, b), 2.0);
    }

    #[test]
    fn construction_replaces_existing_neighbors() {
        let [a, b] = ids();
        let mut ns = nodes(2);
        ns[0].neighbors.push(a);
        let g = Graph::new(ns, vec![Edge::new(a, b)], true).unwrap();
        assert_eq!(g.node(a).unwrap().neighbors(), &[b]);
    }

    #[test]
    fn loop_free_is_a_destination_check() {
        let [a, b, c, d] = ids();
        let chain = Graph::new(nodes(3), vec![Edge::new(a, b), Edge::new(b, c)], true).unwrap();
        assert!(chain.is_loop_free());

        let diamond = Graph::new(
            nodes(4),
            vec![Edge::new(a, b), Edge::new(a, c), Edge::new(b, d), Edge::new(c, d)],
            true,
        )
        .unwrap();
        assert!(!diamond.is_loop_free());

        // A two-node cycle enters each node once, so it passes.
        let cycle = Graph::new(nodes(2), vec![Edge::new(a, b), Edge::new(b, a)], true).unwrap();
        assert!(cycle.is_loop_free());
    }

    #[test]
    fn connectivity_ignores_direction() {
        let [a, b, c] = ids();
        let g = Graph::new(nodes(3), vec![Edge::new(b, a), Edge::new(b, c)], true).unwrap();
        assert!(g.is_connected());

        let split = Graph::new(nodes(3), vec![Edge::new(a, b)], true).unwrap();
        assert!(!split.is_connected());

        assert!(Graph::new(Vec::new(), Vec::new(), true).unwrap().is_connected());
    }

    #[test]
    fn directed_tree_shaped_graph_converts() {
        let [r, x, y, z] = ids();
        let g = Graph::new(
            nodes(4),
            vec![Edge::new(r, x), Edge::new(r, y), Edge::new(x, z)],
            true,
        )
        .unwrap();
        let tree = g.as_tree(r).unwrap();
        assert_eq!(tree.root(), r);
        assert_eq!(tree.node(z).unwrap().depth(), 2);
    }

    #[test]
    fn undirected_graph_is_not_a_tree() {
        let [a, b] = ids();
        let g = Graph::new(nodes(2), vec![Edge::new(a, b)], false).unwrap();
        assert_eq!(
            g.as_tree(a).unwrap_err(),
            TopologyError::BackEdge { from: b, to: a }
        );
    }
}
