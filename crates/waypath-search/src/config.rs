use crate::strategy::Strategy;

/// Default expansion budget of a search.
pub const DEFAULT_MAX_ITERS: usize = 10_000;

/// Parameters of a single search call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SearchConfig {
    pub strategy: Strategy,
    /// Maximum number of frontier pops, shared across all rounds of an
    /// iterative-deepening search.
    pub max_iters: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            strategy: Strategy::BreadthFirst,
            max_iters: DEFAULT_MAX_ITERS,
        }
    }
}

impl SearchConfig {
    pub fn new(strategy: Strategy) -> Self {
        Self {
            strategy,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_max_iters(mut self, max_iters: usize) -> Self {
        self.max_iters = max_iters;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let c = SearchConfig::default();
        assert_eq!(c.strategy, Strategy::BreadthFirst);
        assert_eq!(c.max_iters, 10_000);

        let c = SearchConfig::new(Strategy::AStar).with_max_iters(5);
        assert_eq!(c.strategy, Strategy::AStar);
        assert_eq!(c.max_iters, 5);
    }
}
