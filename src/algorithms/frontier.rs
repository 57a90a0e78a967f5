//! A min-priority queue supporting decrease-key via lazy invalidation.
//!
//! Lowering a key's priority pushes a fresh heap entry and leaves the
//! old one in place. A side table remembers each key's current
//! priority, or that the key has been popped for good, and stale heap
//! entries are skipped when they surface.

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::hash::Hash;

use indexmap::map::Entry;
use indexmap::IndexMap;
use ordered_float::OrderedFloat;

/// Current standing of a key in the side table.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Slot {
    Queued(OrderedFloat<f64>),
    Done,
}

/// A heap entry pointing into the side table.
#[derive(Debug)]
struct Pending {
    priority: OrderedFloat<f64>,
    index: usize,
    seq: u64,
}

impl PartialEq for Pending {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Pending {}

impl PartialOrd for Pending {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Pending {
    fn cmp(&self, other: &Self) -> Ordering {
        // Lower priorities, then earlier pushes, are considered
        // "greater" for the binary heap.
        other
            .priority
            .cmp(&self.priority)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// The frontier of a best-first search.
#[derive(Debug)]
pub struct Frontier<K> {
    heap: BinaryHeap<Pending>,
    slots: IndexMap<K, Slot>,
    pushes: u64,
}

impl<K: Hash + Eq + Clone> Default for Frontier<K> {
    fn default() -> Self {
        Frontier {
            heap: BinaryHeap::with_capacity(256),
            slots: IndexMap::with_capacity(64),
            pushes: 0,
        }
    }
}

impl<K: Hash + Eq + Clone> Frontier<K> {
    pub fn new() -> Self {
        Frontier::default()
    }

    /// Insert `key` with `priority` if it has never been seen, or lower
    /// its priority if `priority` beats the current one.
    ///
    /// Keys that were already popped are never re-queued. Returns
    /// whether the frontier changed.
    pub fn update(&mut self, key: K, priority: f64) -> bool {
        let priority = OrderedFloat(priority);
        let index = match self.slots.entry(key) {
            Entry::Vacant(e) => {
                let index = e.index();
                e.insert(Slot::Queued(priority));
                index
            }
            Entry::Occupied(mut e) => {
                let slot = *e.get();
                match slot {
                    Slot::Queued(current) if priority < current => {
                        e.insert(Slot::Queued(priority));
                        e.index()
                    }
                    _ => return false,
                }
            }
        };

        self.heap.push(Pending {
            priority,
            index,
            seq: self.pushes,
        });
        self.pushes += 1;
        true
    }

    /// Pop the key with the lowest priority, marking it done.
    ///
    /// Returns [`None`] once only stale entries remain.
    pub fn remove_min(&mut self) -> Option<(K, f64)> {
        while let Some(Pending { priority, index, .. }) = self.heap.pop() {
            let (key, slot) = match self.slots.get_index_mut(index) {
                Some(entry) => entry,
                None => continue,
            };
            if *slot != Slot::Queued(priority) {
                // Outdated priority, skip
                continue;
            }
            *slot = Slot::Done;
            return Some((key.clone(), priority.into_inner()));
        }
        None
    }

    /// Whether `key` has been popped.
    pub fn is_done(&self, key: &K) -> bool {
        matches!(self.slots.get(key), Some(Slot::Done))
    }

    /// The priority `key` is currently queued at.
    pub fn priority(&self, key: &K) -> Option<f64> {
        match self.slots.get(key) {
            Some(Slot::Queued(priority)) => Some(priority.into_inner()),
            _ => None,
        }
    }

    /// Heap entries, stale ones included.
    pub fn heap_len(&self) -> usize {
        self.heap.len()
    }
}
