//! The [`Node`] record stored in every topology arena, and its [`NodeId`]
//! handle.

use std::collections::BTreeMap;
use std::fmt;

/// Open string-keyed metadata attached to a node.
pub type Tags = BTreeMap<String, String>;

/// Tag key under which a node's [`Role`] is stored.
pub const ROLE_KEY: &str = "role";

// ---------------------------------------------------------------------------
// NodeId
// ---------------------------------------------------------------------------

/// Index of a node inside its topology's arena.
///
/// Equality is identity: two nodes with identical contents still have
/// distinct ids.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeId(usize);

impl NodeId {
    /// Wrap a raw arena index.
    #[inline]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// The raw arena index.
    #[inline]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl From<usize> for NodeId {
    fn from(index: usize) -> Self {
        Self(index)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Role
// ---------------------------------------------------------------------------

/// Well-known values of the `role` tag.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Role {
    Start,
    End,
    Blocked,
    Path,
}

impl Role {
    /// The tag value for this role.
    pub const fn as_str(self) -> &'static str {
        match self {
            Role::Start => "start",
            Role::End => "end",
            Role::Blocked => "blocked",
            Role::Path => "path",
        }
    }

    /// Parse a tag value back into a role.
    pub fn parse(s: &str) -> Option<Role> {
        match s {
            "start" => Some(Role::Start),
            "end" => Some(Role::End),
            "blocked" => Some(Role::Blocked),
            "path" => Some(Role::Path),
            _ => None,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Node
// ---------------------------------------------------------------------------

/// A traversable unit owned by a topology.
///
/// The neighbor list is written by the topology builders, or seeded with
/// [`with_children`](Node::with_children) for a [`Tree`](crate::Tree)
/// arena; everything else can be adjusted by the caller before searching.
#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    pub(crate) neighbors: Vec<NodeId>,
    cost: f64,
    heuristic: f64,
    pub(crate) depth: usize,
    tags: Tags,
}

impl Default for Node {
    fn default() -> Self {
        Self::new()
    }
}

impl Node {
    /// A node with no neighbors, cost 1 and heuristic 1.
    pub fn new() -> Self {
        Self {
            neighbors: Vec::new(),
            cost: 1.0,
            heuristic: 1.0,
            depth: 0,
            tags: Tags::new(),
        }
    }

    /// A node whose neighbor list is `children`, for arenas handed to
    /// [`Tree::new`](crate::Tree::new). [`Graph::new`](crate::Graph::new)
    /// and the grid builders replace neighbor lists with their own wiring.
    pub fn with_children(mut self, children: Vec<NodeId>) -> Self {
        self.neighbors = children;
        self
    }

    /// Builder-style setter for [`cost`](Self::cost).
    pub fn with_cost(mut self, cost: f64) -> Self {
        self.cost = cost;
        self
    }

    /// Builder-style setter for [`heuristic`](Self::heuristic).
    pub fn with_heuristic(mut self, heuristic: f64) -> Self {
        self.heuristic = heuristic;
        self
    }

    /// Builder-style tag insertion.
    pub fn with_tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags.insert(key.into(), value.into());
        self
    }

    /// Outgoing neighbors in construction order.
    #[inline]
    pub fn neighbors(&self) -> &[NodeId] {
        &self.neighbors
    }

    /// Cost of stepping onto this node. Must be non-negative.
    #[inline]
    pub fn cost(&self) -> f64 {
        self.cost
    }

    pub fn set_cost(&mut self, cost: f64) {
        self.cost = cost;
    }

    /// Estimated remaining cost from this node to the goal.
    #[inline]
    pub fn heuristic(&self) -> f64 {
        self.heuristic
    }

    pub fn set_heuristic(&mut self, heuristic: f64) {
        self.heuristic = heuristic;
    }

    /// Structural depth. Trees set it from the root; other topologies leave
    /// it at 0.
    #[inline]
    pub fn depth(&self) -> usize {
        self.depth
    }

    #[inline]
    pub fn tags(&self) -> &Tags {
        &self.tags
    }

    /// Look up a single tag.
    pub fn tag(&self, key: &str) -> Option<&str> {
        self.tags.get(key).map(String::as_str)
    }

    /// Insert or replace a tag, returning the previous value.
    pub fn set_tag(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.tags.insert(key.into(), value.into())
    }

    /// Remove a tag, returning its value.
    pub fn remove_tag(&mut self, key: &str) -> Option<String> {
        self.tags.remove(key)
    }

    /// The node's role, if its `role` tag holds a known value.
    pub fn role(&self) -> Option<Role> {
        self.tag(ROLE_KEY).and_then(Role::parse)
    }

    pub fn set_role(&mut self, role: Role) {
        self.tags.insert(ROLE_KEY.to_string(), role.as_str().to_string());
    }

    pub fn clear_role(&mut self) {
        self.tags.remove(ROLE_KEY);
    }
}
