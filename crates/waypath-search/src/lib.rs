//! Frontier-based path searches over [`waypath_core`] topologies.
//!
//! One expansion loop drives every strategy; a [`Strategy`] only picks the
//! frontier, the priority key and when the goal is tested:
//!
//! | Strategy | Frontier | Key | Goal test |
//! |---|---|---|---|
//! | [`Strategy::BreadthFirst`] | FIFO | | on discovery |
//! | [`Strategy::DepthFirst`] | LIFO | | on discovery |
//! | [`Strategy::UniformCost`] | priority | cost so far | on pop |
//! | [`Strategy::GreedyBestFirst`] | priority | heuristic | on discovery |
//! | [`Strategy::AStar`] | priority | cost + heuristic | on pop |
//! | [`Strategy::IterativeDeepening`] | LIFO, per round | | on discovery |
//!
//! Searches run through a [`Searcher`], which reuses its frame arena between
//! calls but never carries visited state from one call to the next. The
//! topology itself is only read.
//!
//! ```
//! use waypath_core::Grid;
//! use waypath_search::Strategy;
//!
//! let mut grid = Grid::new(3, 3, false);
//! let start = grid.set_start((0, 0)).unwrap();
//! let end = grid.set_end((2, 2)).unwrap();
//! let path = Strategy::AStar.find(&grid, start, end, 10_000);
//! assert_eq!(path.len(), 5);
//! ```

mod backtrack;
mod config;
mod deepening;
mod expand;
mod frontier;
mod searcher;
mod strategy;

pub use config::{DEFAULT_MAX_ITERS, SearchConfig};
pub use frontier::{FifoFrontier, Frontier, LifoFrontier, PriorityFrontier};
pub use searcher::{Expansion, SearchOutcome, SearchState, SearchStatus, Searcher};
pub use strategy::{FrontierKind, PriorityKey, Strategy};

pub use waypath_core::{NodeId, Topology, Traversable};
