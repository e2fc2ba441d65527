//! Work queue of literal-only clauses awaiting resolution

use crate::config::QueueOrder;
use crate::fol::ClauseId;
use std::cmp::Reverse;
use std::collections::{BinaryHeap, VecDeque};

#[derive(Debug)]
pub struct WorkQueue {
    order: QueueOrder,
    fifo: VecDeque<ClauseId>,
    /// Keyed by (clause size, insertion sequence)
    heap: BinaryHeap<Reverse<(usize, u64, ClauseId)>>,
    sequence: u64,
}

impl WorkQueue {
    pub fn new(order: QueueOrder) -> Self {
        WorkQueue {
            order,
            fifo: VecDeque::new(),
            heap: BinaryHeap::new(),
            sequence: 0,
        }
    }

    pub fn push(&mut self, id: ClauseId, size: usize) {
        match self.order {
            QueueOrder::Fifo => self.fifo.push_back(id),
            QueueOrder::ShortestFirst => {
                self.heap.push(Reverse((size, self.sequence, id)));
                self.sequence += 1;
            }
        }
    }

    pub fn pop(&mut self) -> Option<ClauseId> {
        match self.order {
            QueueOrder::Fifo => self.fifo.pop_front(),
            QueueOrder::ShortestFirst => self.heap.pop().map(|Reverse((_, _, id))| id),
        }
    }

    pub fn len(&self) -> usize {
        self.fifo.len() + self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
