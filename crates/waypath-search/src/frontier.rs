//! Pending-expansion containers. The pop order of a frontier is what tells
//! the search strategies apart.

use std::cmp::{Ordering, Reverse};
use std::collections::{BinaryHeap, VecDeque};

use waypath_core::NodeId;

/// Ordering discipline over nodes waiting to be expanded.
pub trait Frontier {
    /// Add `node`. Frontiers that do not order by priority ignore it.
    fn push(&mut self, node: NodeId, priority: f64);
    /// Remove and return the next node to expand.
    fn pop(&mut self) -> Option<NodeId>;
    fn len(&self) -> usize;
    fn clear(&mut self);

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// ---------------------------------------------------------------------------
// FIFO / LIFO
// ---------------------------------------------------------------------------

/// First in, first out: breadth-first order.
#[derive(Debug, Default)]
pub struct FifoFrontier {
    queue: VecDeque<NodeId>,
}

impl Frontier for FifoFrontier {
    fn push(&mut self, node: NodeId, _priority: f64) {
        self.queue.push_back(node);
    }

    fn pop(&mut self) -> Option<NodeId> {
        self.queue.pop_front()
    }

    fn len(&self) -> usize {
        self.queue.len()
    }

    fn clear(&mut self) {
        self.queue.clear();
    }
}

/// Last in, first out: depth-first order.
#[derive(Debug, Default)]
pub struct LifoFrontier {
    stack: Vec<NodeId>,
}

impl Frontier for LifoFrontier {
    fn push(&mut self, node: NodeId, _priority: f64) {
        self.stack.push(node);
    }

    fn pop(&mut self) -> Option<NodeId> {
        self.stack.pop()
    }

    fn len(&self) -> usize {
        self.stack.len()
    }

    fn clear(&mut self) {
        self.stack.clear();
    }
}

// ---------------------------------------------------------------------------
// Priority
// ---------------------------------------------------------------------------

#[derive(Debug)]
struct Entry {
    node: NodeId,
    priority: f64,
    /// Insertion counter; breaks priority ties in FIFO order.
    seq: u64,
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Entry {}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Natural order: smaller priority first, then earlier insertion.
        // The heap stores `Reverse<Entry>` to pop the minimum.
        self.priority
            .total_cmp(&other.priority)
            .then_with(|| self.seq.cmp(&other.seq))
    }
}

/// Smallest priority first; equal priorities pop in insertion order.
#[derive(Debug, Default)]
pub struct PriorityFrontier {
    heap: BinaryHeap<Reverse<Entry>>,
    seq: u64,
}

impl Frontier for PriorityFrontier {
    fn push(&mut self, node: NodeId, priority: f64) {
        let seq = self.seq;
        self.seq += 1;
        self.heap.push(Reverse(Entry {
            node,
            priority,
            seq,
        }));
    }

    fn pop(&mut self) -> Option<NodeId> {
        self.heap.pop().map(|Reverse(e)| e.node)
    }

    fn len(&self) -> usize {
        self.heap.len()
    }

    fn clear(&mut self) {
        self.heap.clear();
        self.seq = 0;
    }
}
