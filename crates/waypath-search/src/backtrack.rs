use waypath_core::NodeId;

use crate::searcher::{NONE, Searcher};

impl Searcher {
    /// Walk parent links of the last search from `end` back to `start`.
    ///
    /// Returns the nodes in start-to-end order, or an empty vector when `end`
    /// was not visited or its chain does not lead to `start`.
    pub fn backtrack(&self, start: NodeId, end: NodeId) -> Vec<NodeId> {
        let mut path = Vec::new();
        let mut ci = end.index();
        loop {
            if ci >= self.frames.len() || !self.is_visited(ci) {
                if !path.is_empty() {
                    log::warn!("backtrack {start} -> {end}: chain leaves the visited map at #{ci}");
                }
                return Vec::new();
            }
            path.push(NodeId::new(ci));
            if ci == start.index() {
                break;
            }
            // A chain longer than the arena has a cycle.
            if path.len() > self.frames.len() {
                log::warn!("backtrack {start} -> {end}: parent chain has a cycle");
                return Vec::new();
            }
            let parent = self.frames[ci].parent;
            if parent == NONE {
                log::warn!("backtrack {start} -> {end}: chain ends at #{ci}, not at the start");
                return Vec::new();
            }
            ci = parent;
        }
        path.reverse();
        path
    }
}
