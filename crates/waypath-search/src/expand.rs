//! The expansion loop shared by every strategy.

use waypath_core::{NodeId, Topology, Traversable};

use crate::frontier::{FifoFrontier, Frontier, LifoFrontier, PriorityFrontier};
use crate::searcher::{Expansion, NONE, Searcher};
use crate::strategy::{FrontierKind, PriorityKey, Strategy};

/// Parameters of one expansion round.
#[derive(Copy, Clone, Debug)]
pub(crate) struct Shell {
    pub(crate) key: PriorityKey,
    /// Goal test on pop, with cheaper routes re-parenting visited nodes.
    pub(crate) relax: bool,
    pub(crate) start: NodeId,
    pub(crate) end: NodeId,
    /// Maximum frontier pops in this round.
    pub(crate) budget: usize,
    /// Popped nodes deeper than this are skipped.
    pub(crate) max_depth: Option<usize>,
}

impl Shell {
    pub(crate) fn new(strategy: Strategy, start: NodeId, end: NodeId, budget: usize) -> Self {
        let max_depth = match strategy {
            Strategy::DepthFirst { max_depth } | Strategy::IterativeDeepening { max_depth } => max_depth,
            _ => None,
        };
        Self {
            key: strategy.priority_key(),
            relax: strategy.relaxes(),
            start,
            end,
            budget,
            max_depth,
        }
    }
}

/// Result of one expansion round.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) struct Round {
    pub(crate) found: bool,
    /// Pops counted against the budget.
    pub(crate) iterations: usize,
    /// Some popped node was skipped for exceeding the depth limit.
    pub(crate) cutoff: bool,
}

#[inline]
fn heuristic<T: Topology>(topology: &T, id: NodeId) -> f64 {
    topology.node(id).map_or(0.0, Traversable::heuristic)
}

impl Searcher {
    /// Run one round with the frontier `strategy` calls for.
    pub(crate) fn round<T, O>(&mut self, topology: &T, strategy: Strategy, shell: Shell, on_expand: &mut O) -> Round
    where
        T: Topology,
        O: FnMut(&Expansion),
    {
        match strategy.frontier_kind() {
            FrontierKind::Fifo => self.expand(topology, &mut FifoFrontier::default(), shell, on_expand),
            FrontierKind::Lifo => self.expand(topology, &mut LifoFrontier::default(), shell, on_expand),
            FrontierKind::Priority => {
                self.expand(topology, &mut PriorityFrontier::default(), shell, on_expand)
            }
        }
    }

    /// Expand from `shell.start` until the goal is found, the frontier is
    /// empty, or `shell.budget` pops were spent.
    ///
    /// Every pop counts against the budget except superseded duplicates in
    /// relaxing rounds, which are dropped for free. The visited map is reset
    /// first.
    pub(crate) fn expand<T, F, O>(&mut self, topology: &T, frontier: &mut F, shell: Shell, on_expand: &mut O) -> Round
    where
        T: Topology,
        F: Frontier,
        O: FnMut(&Expansion),
    {
        self.begin(topology.len());
        frontier.clear();

        let end = shell.end.index();
        self.visit(shell.start.index(), NONE, 0.0, 0);
        frontier.push(shell.start, shell.key.of(0.0, heuristic(topology, shell.start)));

        let mut iterations = 0;
        let mut cutoff = false;
        let found = loop {
            if iterations >= shell.budget {
                break false;
            }
            let Some(current) = frontier.pop() else {
                break false;
            };
            let ci = current.index();
            if shell.relax && self.frames[ci].closed {
                continue;
            }
            iterations += 1;
            if shell.relax && ci == end {
                break true;
            }

            let (g, depth) = (self.frames[ci].g, self.frames[ci].depth);
            if shell.max_depth.is_some_and(|max| depth > max) {
                cutoff = true;
                continue;
            }
            self.frames[ci].closed = true;
            on_expand(&Expansion {
                node: current,
                depth,
                cost: g,
            });

            let Some(node) = topology.node(current) else {
                continue;
            };
            let mut goal = false;
            for &nb in node.neighbors() {
                let ni = nb.index();
                if ni >= self.frames.len() {
                    continue;
                }
                let tentative = g + topology.edge_cost(current, nb);
                if self.is_visited(ni) && (!shell.relax || tentative >= self.frames[ni].g) {
                    continue;
                }
                self.visit(ni, ci, tentative, depth + 1);
                if !shell.relax && ni == end {
                    goal = true;
                    break;
                }
                frontier.push(nb, shell.key.of(tentative, heuristic(topology, nb)));
            }
            if goal {
                break true;
            }
        };

        Round {
            found,
            iterations,
            cutoff,
        }
    }
}
