use waypath_core::{NodeId, Topology};

use crate::config::SearchConfig;
use crate::expand::Shell;
use crate::strategy::Strategy;

/// How a search call ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SearchStatus {
    /// The goal was reached; the path is non-empty.
    Succeeded,
    /// The frontier ran dry or the budget was spent before reaching the goal.
    Exhausted,
}

/// Lifecycle of a [`Searcher`]'s most recent call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchState {
    /// No search has run yet.
    Ready,
    Expanding,
    Succeeded,
    Exhausted,
}

/// The result of a search call.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchOutcome {
    /// Nodes from start to end inclusive; empty unless `status` is
    /// [`SearchStatus::Succeeded`].
    pub path: Vec<NodeId>,
    /// Frontier pops consumed, summed over all rounds.
    pub iterations: usize,
    pub status: SearchStatus,
}

impl SearchOutcome {
    pub(crate) fn succeeded(path: Vec<NodeId>, iterations: usize) -> Self {
        Self {
            path,
            iterations,
            status: SearchStatus::Succeeded,
        }
    }

    pub(crate) fn exhausted(iterations: usize) -> Self {
        Self {
            path: Vec::new(),
            iterations,
            status: SearchStatus::Exhausted,
        }
    }

    #[inline]
    pub fn is_success(&self) -> bool {
        self.status == SearchStatus::Succeeded
    }
}

/// A node expansion, as reported to [`Searcher::search_observed`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Expansion {
    pub node: NodeId,
    /// Edges from the start along the discovering path.
    pub depth: usize,
    /// Accumulated cost from the start along the discovering path.
    pub cost: f64,
}

// ---------------------------------------------------------------------------
// Per-node search frame
// ---------------------------------------------------------------------------

pub(crate) const NONE: usize = usize::MAX;

#[derive(Clone, Copy, Debug)]
pub(crate) struct Frame {
    pub(crate) parent: usize,
    pub(crate) g: f64,
    pub(crate) depth: usize,
    pub(crate) generation: u32,
    pub(crate) closed: bool,
}

impl Default for Frame {
    fn default() -> Self {
        Self {
            parent: NONE,
            g: 0.0,
            depth: 0,
            generation: 0,
            closed: false,
        }
    }
}

// ---------------------------------------------------------------------------
// Searcher
// ---------------------------------------------------------------------------

/// Runs searches over any [`Topology`] and owns their per-call state.
///
/// The frame arena (visited map, costs, depths) is kept between calls to
/// avoid reallocating, but every call bumps a generation counter first, so
/// frames written by an earlier call are never read as visited. In other
/// words each call starts from an empty visited map and an empty frontier,
/// and after it returns the searcher describes that call only. Nodes of the
/// topology are never written.
pub struct Searcher {
    pub(crate) frames: Vec<Frame>,
    pub(crate) generation: u32,
    state: SearchState,
}

impl Default for Searcher {
    fn default() -> Self {
        Self::new()
    }
}

impl Searcher {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Pre-size the frame arena for topologies of `len` nodes.
    pub fn with_capacity(len: usize) -> Self {
        Self {
            frames: vec![Frame::default(); len],
            generation: 0,
            state: SearchState::Ready,
        }
    }

    #[inline]
    pub fn state(&self) -> SearchState {
        self.state
    }

    /// Find a path from `start` to `end`, or an empty vector if none was
    /// found within `max_iters` expansions.
    pub fn find<T: Topology>(
        &mut self,
        topology: &T,
        strategy: Strategy,
        start: NodeId,
        end: NodeId,
        max_iters: usize,
    ) -> Vec<NodeId> {
        let config = SearchConfig {
            strategy,
            max_iters,
        };
        self.search(topology, &config, start, end).path
    }

    /// Like [`find`](Self::find), also reporting the iterations consumed.
    pub fn search<T: Topology>(
        &mut self,
        topology: &T,
        config: &SearchConfig,
        start: NodeId,
        end: NodeId,
    ) -> SearchOutcome {
        self.search_observed(topology, config, start, end, |_| {})
    }

    /// Like [`search`](Self::search), calling `on_expand` once per expanded
    /// node.
    pub fn search_observed<T, O>(
        &mut self,
        topology: &T,
        config: &SearchConfig,
        start: NodeId,
        end: NodeId,
        mut on_expand: O,
    ) -> SearchOutcome
    where
        T: Topology,
        O: FnMut(&Expansion),
    {
        self.state = SearchState::Expanding;

        let outcome = if !topology.contains(start) || !topology.contains(end) {
            log::warn!(
                "{} search {start} -> {end}: node outside topology of {} nodes",
                config.strategy,
                topology.len()
            );
            self.begin(topology.len());
            SearchOutcome::exhausted(0)
        } else if start == end {
            self.begin(topology.len());
            self.visit(start.index(), NONE, 0.0, 0);
            SearchOutcome::succeeded(vec![start], 0)
        } else {
            match config.strategy {
                Strategy::IterativeDeepening { max_depth } => self.deepen(
                    topology,
                    start,
                    end,
                    config.max_iters,
                    max_depth,
                    &mut on_expand,
                ),
                strategy => {
                    let shell = Shell::new(strategy, start, end, config.max_iters);
                    let round = self.round(topology, strategy, shell, &mut on_expand);
                    self.conclude(start, end, round.found, round.iterations)
                }
            }
        };

        self.state = match outcome.status {
            SearchStatus::Succeeded => SearchState::Succeeded,
            SearchStatus::Exhausted => SearchState::Exhausted,
        };
        log::debug!(
            "{} search {start} -> {end}: {:?} after {} iterations, path of {} nodes",
            config.strategy,
            outcome.status,
            outcome.iterations,
            outcome.path.len()
        );
        outcome
    }

    // -----------------------------------------------------------------------
    // Queries over the last call's visited map
    // -----------------------------------------------------------------------

    /// The discovering parent of `id` in the last search: `None` if `id` was
    /// not visited, `Some(None)` for the start node.
    pub fn parent(&self, id: NodeId) -> Option<Option<NodeId>> {
        let f = self.frame(id)?;
        Some((f.parent != NONE).then(|| NodeId::new(f.parent)))
    }

    /// Accumulated cost at which the last search reached `id`.
    pub fn cost_at(&self, id: NodeId) -> Option<f64> {
        self.frame(id).map(|f| f.g)
    }

    /// Depth at which the last search reached `id`.
    pub fn depth_at(&self, id: NodeId) -> Option<usize> {
        self.frame(id).map(|f| f.depth)
    }

    /// Number of nodes in the last search's visited map.
    pub fn visited_len(&self) -> usize {
        if self.generation == 0 {
            return 0;
        }
        self.frames
            .iter()
            .filter(|f| f.generation == self.generation)
            .count()
    }

    // -----------------------------------------------------------------------
    // Frame bookkeeping
    // -----------------------------------------------------------------------

    /// Start a fresh visited map sized for `len` nodes.
    pub(crate) fn begin(&mut self, len: usize) {
        if self.frames.len() < len {
            self.frames.resize(len, Frame::default());
        }
        self.generation = self.generation.wrapping_add(1);
        if self.generation == 0 {
            // Wrapped: stale frames could alias the new generation.
            self.frames.fill(Frame::default());
            self.generation = 1;
        }
    }

    #[inline]
    pub(crate) fn is_visited(&self, idx: usize) -> bool {
        self.generation != 0 && self.frames[idx].generation == self.generation
    }

    #[inline]
    pub(crate) fn visit(&mut self, idx: usize, parent: usize, g: f64, depth: usize) {
        self.frames[idx] = Frame {
            parent,
            g,
            depth,
            generation: self.generation,
            closed: false,
        };
    }

    fn frame(&self, id: NodeId) -> Option<&Frame> {
        let i = id.index();
        (i < self.frames.len() && self.is_visited(i)).then(|| &self.frames[i])
    }

    /// Turn a finished round into an outcome, backtracking on success.
    pub(crate) fn conclude(&self, start: NodeId, end: NodeId, found: bool, iterations: usize) -> SearchOutcome {
        if !found {
            return SearchOutcome::exhausted(iterations);
        }
        let path = self.backtrack(start, end);
        if path.is_empty() {
            SearchOutcome::exhausted(iterations)
        } else {
            SearchOutcome::succeeded(path, iterations)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::Strategy;
    use waypath_core::{Edge, Graph, Grid, Node, Point, Tree};

    /// R -> {X, Y}, X -> Z
    fn rxyz() -> (Tree, [NodeId; 4]) {
        let mut t = Tree::with_root(Node::new());
        let r = t.root();
        let x = t.add_child(r, Node::new()).unwrap();
        let y = t.add_child(r, Node::new()).unwrap();
        let z = t.add_child(x, Node::new()).unwrap();
        (t, [r, x, y, z])
    }

    /// A->B (1), B->C (1), A->C (5), directed.
    fn abc() -> (Graph, [NodeId; 3]) {
        let [a, b, c] = [0, 1, 2].map(NodeId::new);
        let g = Graph::new(
            vec![Node::new(); 3],
            vec![
                Edge::weighted(a, b, 1.0),
                Edge::weighted(b, c, 1.0),
                Edge::weighted(a, c, 5.0),
            ],
            true,
        )
        .unwrap();
        (g, [a, b, c])
    }

    fn grid3() -> (Grid, NodeId, NodeId) {
        let mut g = Grid::new(3, 3, false);
        let s = g.set_start((0, 0)).unwrap();
        let e = g.set_end((2, 2)).unwrap();
        (g, s, e)
    }

    fn assert_valid_path<T: Topology>(t: &T, path: &[NodeId], start: NodeId, end: NodeId) {
        assert_eq!(path.first(), Some(&start));
        assert_eq!(path.last(), Some(&end));
        for w in path.windows(2) {
            let from = t.node(w[0]).unwrap();
            assert!(
                waypath_core::Traversable::neighbors(from).contains(&w[1]),
                "{} -> {} is not an edge",
                w[0],
                w[1]
            );
        }
    }

    #[test]
    fn start_equals_end_for_every_strategy_and_topology() {
        let (tree, [r, ..]) = rxyz();
        let (graph, [a, ..]) = abc();
        let (grid, s, _) = grid3();
        for strategy in Strategy::ALL {
            assert_eq!(strategy.find(&tree, r, r, 10), vec![r]);
            assert_eq!(strategy.find(&graph, a, a, 10), vec![a]);
            assert_eq!(strategy.find(&grid, s, s, 0), vec![s], "{strategy}");
        }
    }

    #[test]
    fn zero_budget_is_empty_for_every_strategy() {
        let (grid, s, e) = grid3();
        for strategy in Strategy::ALL {
            let mut searcher = Searcher::new();
            let out = searcher.search(&grid, &SearchConfig::new(strategy).with_max_iters(0), s, e);
            assert!(out.path.is_empty(), "{strategy}");
            assert_eq!(out.status, SearchStatus::Exhausted);
            assert_eq!(out.iterations, 0);
            assert_eq!(searcher.state(), SearchState::Exhausted);
        }
    }

    #[test]
    fn unreachable_goal_is_empty_for_every_strategy() {
        let mut mask = vec![false; 9];
        // Wall off the right column.
        mask[1] = true;
        mask[4] = true;
        mask[7] = true;
        let mut grid = Grid::with_blocked(3, 3, false, &mask).unwrap();
        let s = grid.set_start((0, 0)).unwrap();
        let e = grid.set_end((2, 2)).unwrap();
        for strategy in Strategy::ALL {
            let out = Searcher::new().search(&grid, &SearchConfig::new(strategy), s, e);
            assert!(out.path.is_empty(), "{strategy}");
            assert!(!out.is_success());
        }
    }

    #[test]
    fn every_strategy_returns_a_valid_path() {
        let (tree, [r, _, _, z]) = rxyz();
        let (graph, [a, _, c]) = abc();
        let (grid, s, e) = grid3();
        for strategy in Strategy::ALL {
            assert_valid_path(&tree, &strategy.find(&tree, r, z, 100), r, z);
            assert_valid_path(&graph, &strategy.find(&graph, a, c, 100), a, c);
            assert_valid_path(&grid, &strategy.find(&grid, s, e, 100), s, e);
        }
    }

    #[test]
    fn breadth_first_on_3x3_grid() {
        let (grid, s, e) = grid3();
        let path = Strategy::BreadthFirst.find(&grid, s, e, 10_000);
        let points: Vec<Point> = path.iter().map(|&id| grid.point(id).unwrap()).collect();
        assert_eq!(
            points,
            vec![
                Point::new(0, 0),
                Point::new(1, 0),
                Point::new(2, 0),
                Point::new(2, 1),
                Point::new(2, 2),
            ]
        );
        assert!(Strategy::BreadthFirst.find(&grid, s, e, 1).is_empty());
    }

    #[test]
    fn uniform_cost_prefers_cheaper_detour() {
        let (graph, [a, b, c]) = abc();
        let path = Strategy::UniformCost.find(&graph, a, c, 100);
        assert_eq!(path, vec![a, b, c]);
        assert_eq!(graph.path_cost(&path), 2.0);

        // A* with the default unit heuristic agrees; breadth-first takes the
        // direct edge.
        assert_eq!(Strategy::AStar.find(&graph, a, c, 100), vec![a, b, c]);
        assert_eq!(Strategy::BreadthFirst.find(&graph, a, c, 100), vec![a, c]);
    }

    #[test]
    fn tree_from_prebuilt_arena() {
        let [r, x, y, z] = [0, 1, 2, 3].map(NodeId::new);
        let nodes = vec![
            Node::new().with_children(vec![x, y]),
            Node::new().with_children(vec![z]),
            Node::new(),
            Node::new(),
        ];
        let tree = Tree::new(nodes, r).unwrap();
        assert_eq!(tree.children(r), &[x, y]);
        assert_eq!(Strategy::depth_first().find(&tree, r, z, 100), vec![r, x, z]);
    }

    #[test]
    fn depth_first_on_tree() {
        let (tree, [r, x, _, z]) = rxyz();
        assert_eq!(Strategy::depth_first().find(&tree, r, z, 100), vec![r, x, z]);
    }

    #[test]
    fn depth_limit_skips_deep_nodes() {
        let (tree, [r, x, _, z]) = rxyz();
        // Children of the root are discovered while expanding depth 0.
        assert_eq!(Strategy::depth_limited(0).find(&tree, r, x, 100), vec![r, x]);
        // Z needs X (depth 1) expanded.
        let out = Searcher::new().search(
            &tree,
            &SearchConfig::new(Strategy::depth_limited(0)),
            r,
            z,
        );
        assert!(out.path.is_empty());
        // R, then Y and X popped and skipped.
        assert_eq!(out.iterations, 3);
        assert_eq!(Strategy::depth_limited(1).find(&tree, r, z, 100), vec![r, x, z]);
    }

    #[test]
    fn iterative_deepening_shares_one_budget() {
        let (tree, [r, x, _, z]) = rxyz();
        let mut searcher = Searcher::new();
        let config = SearchConfig::new(Strategy::iterative_deepening());
        let out = searcher.search(&tree, &config, r, z);
        assert_eq!(out.path, vec![r, x, z]);
        // Round 0: R, Y, X (cut off). Round 1: R, Y, X (finds Z).
        assert_eq!(out.iterations, 6);

        // Five pops are not enough for both rounds together.
        let out = searcher.search(&tree, &config.with_max_iters(5), r, z);
        assert!(out.path.is_empty());
        assert_eq!(out.iterations, 5);
    }

    #[test]
    fn iterative_deepening_respects_ceiling_and_stops_without_cutoff() {
        let (tree, [r, _, _, z]) = rxyz();
        let capped = Strategy::IterativeDeepening { max_depth: Some(0) };
        assert!(capped.find(&tree, r, z, 100).is_empty());

        // Unreachable target: the first round with no cutoff ends the search.
        let (graph, [a, _, c]) = abc();
        let out = Searcher::new().search(
            &graph,
            &SearchConfig::new(Strategy::iterative_deepening()),
            c,
            a,
        );
        assert!(out.path.is_empty());
        assert_eq!(out.iterations, 1);
    }

    #[test]
    fn iterative_deepening_finds_shallowest_on_grid() {
        let (grid, s, e) = grid3();
        let path = Strategy::iterative_deepening().find(&grid, s, e, 10_000);
        assert_eq!(path.len(), 5);
        assert_valid_path(&grid, &path, s, e);
    }

    #[test]
    fn astar_is_optimal_around_walls() {
        // . . . . .
        // . # . # .
        // S . . # E
        #[rustfmt::skip]
        let mask = [
            false, false, false, false, false,
            false, true,  false, true,  false,
            false, false, false, true,  false,
        ];
        let mut grid = Grid::with_blocked(5, 3, false, &mask).unwrap();
        let s = grid.set_start((0, 2)).unwrap();
        let e = grid.set_end((4, 2)).unwrap();

        let bfs = Strategy::BreadthFirst.find(&grid, s, e, 10_000);
        let ucs = Strategy::UniformCost.find(&grid, s, e, 10_000);
        let astar = Strategy::AStar.find(&grid, s, e, 10_000);
        assert_eq!(bfs.len(), 9);
        assert_eq!(grid.path_cost(&ucs), 8.0);
        assert_eq!(grid.path_cost(&astar), 8.0);
        assert_valid_path(&grid, &astar, s, e);

        let greedy = Strategy::GreedyBestFirst.find(&grid, s, e, 10_000);
        assert_valid_path(&grid, &greedy, s, e);
        assert!(grid.path_cost(&greedy) >= 8.0);
    }

    #[test]
    fn uniform_cost_avoids_expensive_cells() {
        // Middle row is a swamp except at the far right.
        let mut grid = Grid::new(5, 3, false);
        for x in 0..4 {
            grid.at_mut(Point::new(x, 1)).unwrap().set_cost(10.0);
        }
        let s = grid.set_start((0, 0)).unwrap();
        let e = grid.set_end((0, 2)).unwrap();

        let ucs = Strategy::UniformCost.find(&grid, s, e, 10_000);
        let astar = Strategy::AStar.find(&grid, s, e, 10_000);
        // Through the swamp: 10 + 1 = 11. Around: 4 + 2 + 4 = 10.
        assert_eq!(grid.path_cost(&ucs), 10.0);
        assert_eq!(grid.path_cost(&astar), 10.0);
        assert_eq!(Strategy::BreadthFirst.find(&grid, s, e, 10_000).len(), 3);
    }

    #[test]
    fn smaller_budget_never_changes_a_found_path() {
        let (grid, s, e) = grid3();
        for strategy in Strategy::ALL {
            let full = strategy.find(&grid, s, e, 10_000);
            for k in 0..20 {
                let partial = strategy.find(&grid, s, e, k);
                assert!(partial.is_empty() || partial == full, "{strategy} with {k}");
            }
        }
    }

    #[test]
    fn repeated_calls_do_not_share_state() {
        let (grid, s, e) = grid3();
        let mut searcher = Searcher::new();
        for strategy in Strategy::ALL {
            let first = searcher.find(&grid, strategy, s, e, 10_000);
            // A failed call in between must not bias the next one.
            assert!(searcher.find(&grid, strategy, e, s, 1).is_empty());
            let again = searcher.find(&grid, strategy, s, e, 10_000);
            assert_eq!(first, again, "{strategy}");
            assert_eq!(first, strategy.find(&grid, s, e, 10_000));
        }
    }

    #[test]
    fn generation_wrap_clears_frames() {
        let (grid, s, e) = grid3();
        let mut searcher = Searcher::new();
        let expected = searcher.find(&grid, Strategy::BreadthFirst, s, e, 10_000);
        searcher.generation = u32::MAX;
        for f in searcher.frames.iter_mut() {
            f.generation = 1;
        }
        let path = searcher.find(&grid, Strategy::BreadthFirst, s, e, 10_000);
        assert_eq!(searcher.generation, 1);
        assert_eq!(path, expected);
    }

    #[test]
    fn visited_map_queries() {
        let (graph, [a, b, c]) = abc();
        let mut searcher = Searcher::new();
        assert_eq!(searcher.state(), SearchState::Ready);
        assert_eq!(searcher.parent(a), None);
        assert_eq!(searcher.visited_len(), 0);

        searcher.find(&graph, Strategy::UniformCost, a, c, 100);
        assert_eq!(searcher.state(), SearchState::Succeeded);
        assert_eq!(searcher.parent(a), Some(None));
        assert_eq!(searcher.parent(c), Some(Some(b)));
        assert_eq!(searcher.cost_at(c), Some(2.0));
        assert_eq!(searcher.depth_at(c), Some(2));
        assert_eq!(searcher.visited_len(), 3);

        // A later search from C sees only C.
        searcher.find(&graph, Strategy::UniformCost, c, a, 100);
        assert_eq!(searcher.parent(b), None);
        assert_eq!(searcher.visited_len(), 1);
    }

    #[test]
    fn unknown_nodes_are_not_found() {
        let (graph, [a, ..]) = abc();
        let out = Searcher::new().search(&graph, &SearchConfig::default(), a, NodeId::new(99));
        assert!(out.path.is_empty());
        assert_eq!(out.iterations, 0);
        assert!(Strategy::AStar.find(&graph, NodeId::new(99), NodeId::new(99), 10).is_empty());
    }

    #[test]
    fn observer_sees_each_expansion() {
        let (grid, s, e) = grid3();
        let mut seen = Vec::new();
        let out = Searcher::new().search_observed(
            &grid,
            &SearchConfig::new(Strategy::BreadthFirst),
            s,
            e,
            |x| seen.push(*x),
        );
        assert_eq!(seen.len(), out.iterations);
        assert_eq!(seen[0].node, s);
        assert_eq!(seen[0].depth, 0);
        assert!(seen.windows(2).all(|w| w[0].depth <= w[1].depth));
    }

    #[test]
    fn diagonal_grid_shortens_paths() {
        let mut grid = Grid::new(4, 4, true);
        let s = grid.set_start((0, 0)).unwrap();
        let e = grid.set_end((3, 3)).unwrap();
        for strategy in Strategy::ALL {
            let path = strategy.find(&grid, s, e, 10_000);
            assert_valid_path(&grid, &path, s, e);
        }
        assert_eq!(Strategy::BreadthFirst.find(&grid, s, e, 10_000).len(), 4);
        assert_eq!(Strategy::AStar.find(&grid, s, e, 10_000).len(), 4);
    }
}
