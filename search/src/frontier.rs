//! Best-first frontier with in-place re-keying.
//!
//! Entries live in a `BTreeMap<FrontierKey, NodeId>` so the minimum is always
//! the first entry. A second map from node id to its current key makes
//! re-keying and membership checks logarithmic instead of a scan over the
//! entries sharing a cost.

use std::collections::BTreeMap;

use crate::node::{FrontierKey, NodeId};

/// Ordered multiset of node ids keyed by `f`, ties broken FIFO.
#[derive(Debug, Clone, Default)]
pub struct Frontier {
    entries: BTreeMap<FrontierKey, NodeId>,
    positions: BTreeMap<NodeId, FrontierKey>,
    next_seq: u64,
    high_water: u64,
}

impl Frontier {
    /// Create an empty frontier.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn next_key(&mut self, f_cost: i64) -> FrontierKey {
        let key = FrontierKey {
            f_cost,
            seq: self.next_seq,
        };
        self.next_seq += 1;
        key
    }

    /// Add `id` under `f_cost`.
    ///
    /// Returns `false` (and changes nothing) if `id` is already present.
    pub fn insert(&mut self, id: NodeId, f_cost: i64) -> bool {
        if self.positions.contains_key(&id) {
            return false;
        }
        let key = self.next_key(f_cost);
        self.entries.insert(key, id);
        self.positions.insert(id, key);
        self.high_water = self.high_water.max(self.entries.len() as u64);
        true
    }

    /// Remove and return the entry with the lowest `f`, earliest first.
    pub fn pop_min(&mut self) -> Option<NodeId> {
        let (_, id) = self.entries.pop_first()?;
        self.positions.remove(&id);
        Some(id)
    }

    /// The entry `pop_min` would return, with its key.
    #[must_use]
    pub fn peek_min(&self) -> Option<(FrontierKey, NodeId)> {
        self.entries.first_key_value().map(|(k, id)| (*k, *id))
    }

    /// Move `id` from `old_f` to `new_f`.
    ///
    /// A no-op returning `false` when `id` is not present (already expanded)
    /// or is stored under a different cost than `old_f`. A moved entry gets a
    /// fresh sequence number, so it queues behind entries already at `new_f`.
    pub fn re_key(&mut self, id: NodeId, old_f: i64, new_f: i64) -> bool {
        let Some(&current) = self.positions.get(&id) else {
            return false;
        };
        if current.f_cost != old_f {
            return false;
        }
        self.entries.remove(&current);
        let key = self.next_key(new_f);
        self.entries.insert(key, id);
        self.positions.insert(id, key);
        true
    }

    /// Whether `id` is waiting in the frontier.
    #[must_use]
    pub fn contains(&self, id: NodeId) -> bool {
        self.positions.contains_key(&id)
    }

    /// The key `id` is currently stored under.
    #[must_use]
    pub fn key_of(&self, id: NodeId) -> Option<FrontierKey> {
        self.positions.get(&id).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in pop order without removing them.
    pub fn iter(&self) -> impl Iterator<Item = (FrontierKey, NodeId)> + '_ {
        self.entries.iter().map(|(k, id)| (*k, *id))
    }

    /// All entries in pop order.
    #[must_use]
    pub fn snapshot(&self) -> Vec<(FrontierKey, NodeId)> {
        self.iter().collect()
    }

    /// Largest size the frontier has reached.
    #[must_use]
    pub fn high_water(&self) -> u64 {
        self.high_water
    }
}
