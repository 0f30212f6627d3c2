//! Shared model for the demo binaries: a seeded random cave grid, every
//! search strategy run over it, and a plain-text rendering of the result.

use rand::{Rng, RngExt};
use waypath_core::{Grid, NodeId, Point, Range, Role, Topology, TopologyError};
use waypath_search::{SearchConfig, SearchOutcome, Searcher, Strategy};

pub const WIDTH: i32 = 24;
pub const HEIGHT: i32 = 10;

/// A random grid with its endpoints designated.
#[derive(Debug, Clone)]
pub struct Cave {
    pub grid: Grid,
    pub start: NodeId,
    pub end: NodeId,
}

/// Build a `width` x `height` grid where each cell is blocked with
/// probability `wall_pct`. The top-left and bottom-right corners are always
/// open and become the start and end cells.
pub fn cave(
    width: i32,
    height: i32,
    diagonal: bool,
    wall_pct: f64,
    rng: &mut impl Rng,
) -> Result<Cave, TopologyError> {
    let len = Range::new(0, 0, width.max(0), height.max(0)).len();
    let mut mask: Vec<bool> = (0..len).map(|_| rng.random::<f64>() < wall_pct).collect();
    if let Some(first) = mask.first_mut() {
        *first = false;
    }
    if let Some(last) = mask.last_mut() {
        *last = false;
    }

    let mut grid = Grid::with_blocked(width, height, diagonal, &mask)?;
    let start = grid.set_start(Point::new(0, 0))?;
    let end = grid.set_end(Point::new(width - 1, height - 1))?;
    Ok(Cave { grid, start, end })
}

/// One strategy's result on a grid.
#[derive(Debug, Clone)]
pub struct Report {
    pub strategy: Strategy,
    pub outcome: SearchOutcome,
    /// Sum of edge costs along the path; 0 when nothing was found.
    pub cost: f64,
}

/// Run every strategy from `start` to `end` with one reused [`Searcher`].
pub fn compare<T: Topology>(topology: &T, start: NodeId, end: NodeId, max_iters: usize) -> Vec<Report> {
    let mut searcher = Searcher::with_capacity(topology.len());
    Strategy::ALL
        .into_iter()
        .map(|strategy| {
            let config = SearchConfig::new(strategy).with_max_iters(max_iters);
            let outcome = searcher.search(topology, &config, start, end);
            let cost = topology.path_cost(&outcome.path);
            Report {
                strategy,
                outcome,
                cost,
            }
        })
        .collect()
}

/// Render the grid one character per cell: `S`/`E` for the endpoints, `#`
/// for blocked cells, `*` for marked path cells and `.` otherwise.
pub fn render(grid: &Grid) -> String {
    let mut out = String::with_capacity(grid.len() + grid.height().max(0) as usize);
    for y in 0..grid.height() {
        for x in 0..grid.width() {
            let ch = match grid.at(Point::new(x, y)).and_then(|n| n.role()) {
                Some(Role::Start) => 'S',
                Some(Role::End) => 'E',
                Some(Role::Blocked) => '#',
                Some(Role::Path) => '*',
                None => '.',
            };
            out.push(ch);
        }
        out.push('\n');
    }
    out
}
