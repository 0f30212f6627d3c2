use waypath_core::{NodeId, Topology};

use crate::expand::Shell;
use crate::frontier::LifoFrontier;
use crate::searcher::{Expansion, SearchOutcome, Searcher};
use crate::strategy::PriorityKey;

impl Searcher {
    /// Iterative deepening: depth-limited rounds with limits 0, 1, 2, ...
    ///
    /// All rounds draw on one budget of `max_iters` pops. The search stops
    /// on success, when the budget is spent, after a round that skipped no
    /// node for depth (deeper limits cannot reach more), or after the round
    /// whose limit equals `ceiling`.
    pub(crate) fn deepen<T, O>(
        &mut self,
        topology: &T,
        start: NodeId,
        end: NodeId,
        max_iters: usize,
        ceiling: Option<usize>,
        on_expand: &mut O,
    ) -> SearchOutcome
    where
        T: Topology,
        O: FnMut(&Expansion),
    {
        let mut frontier = LifoFrontier::default();
        let mut used = 0;
        let mut limit = 0;
        loop {
            let shell = Shell {
                key: PriorityKey::Arrival,
                relax: false,
                start,
                end,
                budget: max_iters - used,
                max_depth: Some(limit),
            };
            let round = self.expand(topology, &mut frontier, shell, on_expand);
            used += round.iterations;
            log::trace!(
                "deepening {start} -> {end}: limit {limit}, {} iterations ({used}/{max_iters})",
                round.iterations
            );

            if round.found {
                return self.conclude(start, end, true, used);
            }
            if used >= max_iters || !round.cutoff || ceiling.is_some_and(|c| limit >= c) {
                return SearchOutcome::exhausted(used);
            }
            limit += 1;
        }
    }
}
