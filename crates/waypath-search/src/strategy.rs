use std::fmt;

use waypath_core::{NodeId, Topology};

use crate::searcher::Searcher;

/// Which frontier a strategy expands from.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FrontierKind {
    Fifo,
    Lifo,
    Priority,
}

/// The number a priority frontier orders by.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PriorityKey {
    /// No key; the frontier's own arrival order decides.
    Arrival,
    /// Accumulated cost from the start.
    Cost,
    /// The node's heuristic estimate.
    Heuristic,
    /// Accumulated cost plus heuristic.
    CostPlusHeuristic,
}

impl PriorityKey {
    /// Compute the key from an accumulated cost `g` and a heuristic `h`.
    #[inline]
    pub fn of(self, g: f64, h: f64) -> f64 {
        match self {
            PriorityKey::Arrival => 0.0,
            PriorityKey::Cost => g,
            PriorityKey::Heuristic => h,
            PriorityKey::CostPlusHeuristic => g + h,
        }
    }
}

/// A search strategy. All strategies share one expansion loop and differ
/// only in frontier kind, priority key and goal test.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Strategy {
    #[default]
    BreadthFirst,
    /// Depth-first; popped nodes deeper than `max_depth` are skipped.
    DepthFirst { max_depth: Option<usize> },
    UniformCost,
    GreedyBestFirst,
    AStar,
    /// Depth-limited depth-first rounds with caps 0, 1, 2, ... up to
    /// `max_depth`, sharing one iteration budget.
    IterativeDeepening { max_depth: Option<usize> },
}

impl Strategy {
    /// Every strategy with its default parameters.
    pub const ALL: [Strategy; 6] = [
        Strategy::BreadthFirst,
        Strategy::DepthFirst { max_depth: None },
        Strategy::UniformCost,
        Strategy::GreedyBestFirst,
        Strategy::AStar,
        Strategy::IterativeDeepening { max_depth: None },
    ];

    /// Unbounded depth-first search.
    pub const fn depth_first() -> Self {
        Strategy::DepthFirst { max_depth: None }
    }

    /// Depth-first search that does not expand nodes below `max_depth`.
    pub const fn depth_limited(max_depth: usize) -> Self {
        Strategy::DepthFirst {
            max_depth: Some(max_depth),
        }
    }

    /// Iterative deepening without a depth ceiling.
    pub const fn iterative_deepening() -> Self {
        Strategy::IterativeDeepening { max_depth: None }
    }

    pub fn frontier_kind(self) -> FrontierKind {
        match self {
            Strategy::BreadthFirst => FrontierKind::Fifo,
            Strategy::DepthFirst { .. } | Strategy::IterativeDeepening { .. } => FrontierKind::Lifo,
            Strategy::UniformCost | Strategy::GreedyBestFirst | Strategy::AStar => {
                FrontierKind::Priority
            }
        }
    }

    pub fn priority_key(self) -> PriorityKey {
        match self {
            Strategy::UniformCost => PriorityKey::Cost,
            Strategy::GreedyBestFirst => PriorityKey::Heuristic,
            Strategy::AStar => PriorityKey::CostPlusHeuristic,
            _ => PriorityKey::Arrival,
        }
    }

    /// Whether the goal is tested when popped, with cheaper routes allowed
    /// to re-parent already discovered nodes. The other strategies stop as
    /// soon as the goal is discovered.
    pub fn relaxes(self) -> bool {
        matches!(self, Strategy::UniformCost | Strategy::AStar)
    }

    pub fn name(self) -> &'static str {
        match self {
            Strategy::BreadthFirst => "breadth-first",
            Strategy::DepthFirst { .. } => "depth-first",
            Strategy::UniformCost => "uniform-cost",
            Strategy::GreedyBestFirst => "greedy-best-first",
            Strategy::AStar => "a-star",
            Strategy::IterativeDeepening { .. } => "iterative-deepening",
        }
    }

    /// Find a path from `start` to `end` with a fresh [`Searcher`].
    ///
    /// Returns the path including both endpoints, or an empty vector when
    /// `end` was not reached within `max_iters` expansions.
    pub fn find<T: Topology>(self, topology: &T, start: NodeId, end: NodeId, max_iters: usize) -> Vec<NodeId> {
        Searcher::new().find(topology, self, start, end, max_iters)
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::DepthFirst {
                max_depth: Some(d),
            }
            | Strategy::IterativeDeepening {
                max_depth: Some(d),
            } => write!(f, "{} (max depth {d})", self.name()),
            _ => f.write_str(self.name()),
        }
    }
}
