//! The [`Grid`] topology — a 2D lattice of [`Node`]s.
//!
//! Cell `(x, y)` lives at arena index `y * width + x`. Wiring is a pure
//! function of the coordinates, the `diagonal` flag and the blocked mask:
//! cardinal neighbors come first (up, right, down, left), followed by the
//! diagonals (up-right, down-right, down-left, up-left) when enabled.
//! Blocked cells have no edges in either direction.

use crate::distance::{chebyshev, manhattan};
use crate::error::TopologyError;
use crate::geom::{Point, Range};
use crate::node::{Node, NodeId, Role};
use crate::topology::Topology;

/// A grid cell addressed either by coordinates or by node id.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CellRef {
    Point(Point),
    Node(NodeId),
}

impl From<Point> for CellRef {
    fn from(p: Point) -> Self {
        CellRef::Point(p)
    }
}

impl From<(i32, i32)> for CellRef {
    fn from((x, y): (i32, i32)) -> Self {
        CellRef::Point(Point::new(x, y))
    }
}

impl From<NodeId> for CellRef {
    fn from(id: NodeId) -> Self {
        CellRef::Node(id)
    }
}

// ---------------------------------------------------------------------------
// Grid
// ---------------------------------------------------------------------------

/// A rectangular lattice with 4- or 8-connectivity and optional blocked
/// cells.
#[derive(Clone, Debug)]
pub struct Grid {
    nodes: Vec<Node>,
    blocked: Vec<bool>,
    bounds: Range,
    diagonal: bool,
    start: Option<NodeId>,
    end: Option<NodeId>,
}

impl Grid {
    /// Create a `width` x `height` grid with no blocked cells. Negative
    /// dimensions are treated as 0.
    pub fn new(width: i32, height: i32, diagonal: bool) -> Self {
        let bounds = Range::new(0, 0, width.max(0), height.max(0));
        let len = bounds.len();
        let mut grid = Self {
            nodes: vec![Node::new(); len],
            blocked: vec![false; len],
            bounds,
            diagonal,
            start: None,
            end: None,
        };
        grid.rewire();
        grid
    }

    /// Create a grid with a row-major blocked mask of `width * height`
    /// entries.
    pub fn with_blocked(
        width: i32,
        height: i32,
        diagonal: bool,
        mask: &[bool],
    ) -> Result<Self, TopologyError> {
        let mut grid = Self::new(width, height, diagonal);
        if mask.len() != grid.nodes.len() {
            return Err(TopologyError::MaskSize {
                expected: grid.nodes.len(),
                got: mask.len(),
            });
        }
        grid.blocked.copy_from_slice(mask);
        grid.rewire();
        Ok(grid)
    }

    /// The lattice rectangle, anchored at (0, 0).
    #[inline]
    pub fn bounds(&self) -> Range {
        self.bounds
    }

    #[inline]
    pub fn size(&self) -> Point {
        self.bounds.size()
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.bounds.width()
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.bounds.height()
    }

    /// Whether diagonal moves are wired.
    #[inline]
    pub fn is_diagonal(&self) -> bool {
        self.diagonal
    }

    #[inline]
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    // -----------------------------------------------------------------------
    // Coordinate helpers
    // -----------------------------------------------------------------------

    #[inline]
    fn index(&self, p: Point) -> Option<usize> {
        if !self.bounds.contains(p) {
            return None;
        }
        Some(p.y as usize * self.width() as usize + p.x as usize)
    }

    #[inline]
    fn point_at(&self, idx: usize) -> Point {
        let w = self.width() as usize;
        Point::new((idx % w) as i32, (idx / w) as i32)
    }

    /// Node id of the cell at `p`, or `None` if out of bounds.
    pub fn id(&self, p: Point) -> Option<NodeId> {
        self.index(p).map(NodeId::new)
    }

    /// Coordinates of `id`, or `None` if it is not a cell of this grid.
    pub fn point(&self, id: NodeId) -> Option<Point> {
        (id.index() < self.nodes.len()).then(|| self.point_at(id.index()))
    }

    /// The node at `p`.
    pub fn at(&self, p: Point) -> Option<&Node> {
        self.index(p).map(|i| &self.nodes[i])
    }

    /// Mutable access to the node at `p`, e.g. to change its cost or tags.
    /// Call [`set_end`](Self::set_end) again afterwards if costs changed, so
    /// that heuristics stay admissible.
    pub fn at_mut(&mut self, p: Point) -> Option<&mut Node> {
        let i = self.index(p)?;
        Some(&mut self.nodes[i])
    }

    /// Whether `p` is blocked. Out-of-bounds points count as blocked.
    pub fn is_blocked(&self, p: Point) -> bool {
        self.index(p).is_none_or(|i| self.blocked[i])
    }

    // -----------------------------------------------------------------------
    // Mutation
    // -----------------------------------------------------------------------

    /// Block or unblock the cell at `p` and rewire the lattice.
    ///
    /// Blocking the current start or end cell clears that designation.
    pub fn set_blocked(&mut self, p: Point, blocked: bool) -> Result<(), TopologyError> {
        let i = self.index(p).ok_or(TopologyError::OutOfBounds(p))?;
        self.blocked[i] = blocked;
        if blocked {
            let id = NodeId::new(i);
            if self.start == Some(id) {
                self.start = None;
            }
            if self.end == Some(id) {
                self.end = None;
            }
        }
        self.rewire();
        Ok(())
    }

    /// Tag `at` as the start cell, replacing any previous start.
    pub fn set_start(&mut self, at: impl Into<CellRef>) -> Result<NodeId, TopologyError> {
        let id = self.resolve(at.into())?;
        if let Some(prev) = self.start.take() {
            self.clear_role(prev, Role::Start);
        }
        self.nodes[id.index()].set_role(Role::Start);
        self.start = Some(id);
        Ok(id)
    }

    /// Tag `at` as the end cell, replacing any previous end, and write an
    /// admissible heuristic towards it on every cell.
    ///
    /// The heuristic is the Manhattan (4-connected) or Chebyshev
    /// (8-connected) distance, scaled by the cheapest open cell cost.
    pub fn set_end(&mut self, at: impl Into<CellRef>) -> Result<NodeId, TopologyError> {
        let id = self.resolve(at.into())?;
        if let Some(prev) = self.end.take() {
            self.clear_role(prev, Role::End);
        }
        self.nodes[id.index()].set_role(Role::End);
        self.end = Some(id);

        let goal = self.point_at(id.index());
        let cheapest = self
            .nodes
            .iter()
            .zip(&self.blocked)
            .filter(|&(_, &b)| !b)
            .map(|(n, _)| n.cost())
            .fold(f64::INFINITY, f64::min);
        let scale = if cheapest.is_finite() { cheapest.max(0.0) } else { 0.0 };
        let diagonal = self.diagonal;
        for (node, p) in self.nodes.iter_mut().zip(self.bounds.iter()) {
            let steps = if diagonal {
                chebyshev(p, goal)
            } else {
                manhattan(p, goal)
            };
            node.set_heuristic(steps as f64 * scale);
        }
        Ok(id)
    }

    #[inline]
    pub fn start(&self) -> Option<NodeId> {
        self.start
    }

    #[inline]
    pub fn end(&self) -> Option<NodeId> {
        self.end
    }

    /// Tag the intermediate cells of `path` with [`Role::Path`], dropping
    /// the marks of any previous path. Start and end tags are kept.
    pub fn mark_path(&mut self, path: &[NodeId]) {
        for n in self.nodes.iter_mut() {
            if n.role() == Some(Role::Path) {
                n.clear_role();
            }
        }
        for id in path {
            let Some(n) = self.nodes.get_mut(id.index()) else {
                continue;
            };
            if !matches!(n.role(), Some(Role::Start | Role::End)) {
                n.set_role(Role::Path);
            }
        }
    }

    fn resolve(&self, at: CellRef) -> Result<NodeId, TopologyError> {
        let (i, p) = match at {
            CellRef::Point(p) => (self.index(p).ok_or(TopologyError::OutOfBounds(p))?, p),
            CellRef::Node(id) => {
                let p = self.point(id).ok_or(TopologyError::UnknownNode {
                    id,
                    len: self.nodes.len(),
                })?;
                (id.index(), p)
            }
        };
        if self.blocked[i] {
            return Err(TopologyError::BlockedCell(p));
        }
        Ok(NodeId::new(i))
    }

    fn clear_role(&mut self, id: NodeId, role: Role) {
        let n = &mut self.nodes[id.index()];
        if n.role() == Some(role) {
            n.clear_role();
        }
    }

    fn rewire(&mut self) {
        for (i, p) in self.bounds.iter().enumerate() {
            let neighbors: Vec<NodeId> = if self.blocked[i] {
                Vec::new()
            } else {
                let mut candidates = p.neighbors_4().to_vec();
                if self.diagonal {
                    candidates.extend(p.diagonals());
                }
                candidates
                    .into_iter()
                    .filter_map(|q| self.index(q))
                    .filter(|&qi| !self.blocked[qi])
                    .map(NodeId::new)
                    .collect()
            };

            let node = &mut self.nodes[i];
            node.neighbors = neighbors;
            if self.blocked[i] {
                node.set_role(Role::Blocked);
            } else if node.role() == Some(Role::Blocked) {
                node.clear_role();
            }
        }
    }
}

impl Topology for Grid {
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
