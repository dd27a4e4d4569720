//! # History Manager
//!
//! Bounded, indexable sequence of full-state snapshots with a current
//! index. Undo and redo only move the index; the snapshot list itself is
//! mutated only by [`History::record`], which truncates any redo-only
//! branch, pushes the new snapshot at the tail, and evicts the oldest
//! entry once capacity is reached.
//!
//! Capturing the whole block sequence per edit is deliberately simple;
//! a delta/command representation is a known alternative if snapshot
//! memory ever matters.

use crate::store::PlacedBlock;
use chrono::{DateTime, Utc};

/// Fixed snapshot capacity; the oldest entries are evicted silently.
pub const HISTORY_CAPACITY: usize = 20;

/// Immutable capture of the block sequence at one point in time
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub blocks: Vec<PlacedBlock>,
    pub created_at: DateTime<Utc>,
}

impl Snapshot {
    fn capture(blocks: Vec<PlacedBlock>) -> Self {
        Self {
            blocks,
            created_at: Utc::now(),
        }
    }
}

/// Bounded undo/redo history over block-sequence snapshots
#[derive(Debug)]
pub struct History {
    snapshots: Vec<Snapshot>,
    index: usize,
}

impl History {
    /// Create a history seeded with the initial state, so the very first
    /// edit can be undone back to it.
    pub fn new(initial: Vec<PlacedBlock>) -> Self {
        Self {
            snapshots: vec![Snapshot::capture(initial)],
            index: 0,
        }
    }

    /// Record a committed mutation. Discards any redo-only snapshots
    /// first (no branching history), then pushes at the tail.
    pub fn record(&mut self, blocks: Vec<PlacedBlock>) {
        self.snapshots.truncate(self.index + 1);
        self.snapshots.push(Snapshot::capture(blocks));

        if self.snapshots.len() > HISTORY_CAPACITY {
            self.snapshots.remove(0);
        }
        self.index = self.snapshots.len() - 1;
    }

    /// Step back one snapshot. Returns `None` when already at the oldest
    /// reachable state.
    pub fn undo(&mut self) -> Option<&Snapshot> {
        if self.index == 0 {
            return None;
        }
        self.index -= 1;
        Some(&self.snapshots[self.index])
    }

    /// Step forward one snapshot. Returns `None` at the tail.
    pub fn redo(&mut self) -> Option<&Snapshot> {
        if self.index + 1 >= self.snapshots.len() {
            return None;
        }
        self.index += 1;
        Some(&self.snapshots[self.index])
    }

    pub fn can_undo(&self) -> bool {
        self.index > 0
    }

    pub fn can_redo(&self) -> bool {
        self.index + 1 < self.snapshots.len()
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn index(&self) -> usize {
        self.index
    }
}
