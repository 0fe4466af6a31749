use std::collections::{BinaryHeap, VecDeque};

use crate::node::NodeId;

/// Container of discovered-but-unexpanded nodes.
pub trait Frontier {
    fn push(&mut self, id: NodeId, priority: f32);
    fn pop(&mut self) -> Option<NodeId>;
    fn clear(&mut self);
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// First-in first-out frontier; priorities are ignored.
#[derive(Debug, Default, Clone)]
pub struct FifoFrontier {
    queue: VecDeque<NodeId>,
}

impl Frontier for FifoFrontier {
    #[inline]
    fn push(&mut self, id: NodeId, _priority: f32) {
        self.queue.push_back(id);
    }

    #[inline]
    fn pop(&mut self) -> Option<NodeId> {
        self.queue.pop_front()
    }

    fn clear(&mut self) {
        self.queue.clear();
    }

    #[inline]
    fn len(&self) -> usize {
        self.queue.len()
    }
}

/// Heap entry ordered so that `BinaryHeap` (a max-heap) pops the smallest
/// priority first, and the earliest insertion among equal priorities.
#[derive(Debug, Clone, Copy)]
struct Entry {
    id: NodeId,
    priority: f32,
    seq: u64,
}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        other
            .priority
            .total_cmp(&self.priority)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == std::cmp::Ordering::Equal
    }
}

impl Eq for Entry {}

/// Min-priority frontier with FIFO tie-breaking.
#[derive(Debug, Default, Clone)]
pub struct PriorityFrontier {
    heap: BinaryHeap<Entry>,
    seq: u64,
}

impl Frontier for PriorityFrontier {
    fn push(&mut self, id: NodeId, priority: f32) {
        self.heap.push(Entry {
            id,
            priority,
            seq: self.seq,
        });
        self.seq = self.seq.wrapping_add(1);
    }

    #[inline]
    fn pop(&mut self) -> Option<NodeId> {
        self.heap.pop().map(|e| e.id)
    }

    fn clear(&mut self) {
        self.heap.clear();
        self.seq = 0;
    }

    #[inline]
    fn len(&self) -> usize {
        self.heap.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(f: &mut impl Frontier) -> Vec<NodeId> {
        std::iter::from_fn(|| f.pop()).collect()
    }

    #[test]
    fn fifo_ignores_priority() {
        let mut f = FifoFrontier::default();
        f.push(3, 9.0);
        f.push(1, 0.0);
        f.push(2, 5.0);
        assert_eq!(f.len(), 3);
        assert_eq!(drain(&mut f), vec![3, 1, 2]);
        assert!(f.is_empty());
    }

    #[test]
    fn priority_pops_smallest_first() {
        let mut f = PriorityFrontier::default();
        f.push(10, 3.5);
        f.push(11, 0.5);
        f.push(12, 2.0);
        assert_eq!(drain(&mut f), vec![11, 12, 10]);
    }

    #[test]
    fn priority_ties_keep_insertion_order() {
        let mut f = PriorityFrontier::default();
        for id in [7, 4, 9, 1] {
            f.push(id, 1.0);
        }
        f.push(0, 0.0);
        assert_eq!(drain(&mut f), vec![0, 7, 4, 9, 1]);
    }

    #[test]
    fn clear_empties_both() {
        let mut a = FifoFrontier::default();
        let mut b = PriorityFrontier::default();
        a.push(1, 0.0);
        b.push(1, 0.0);
        a.clear();
        b.clear();
        assert!(a.is_empty());
        assert!(b.is_empty());
        assert_eq!(b.pop(), None);
    }
}
