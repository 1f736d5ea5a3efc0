//! Position occurrence counts for threefold-repetition detection.

use std::collections::HashMap;

use crate::game_state::chess_rules::REPETITION_LIMIT;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepetitionTracker {
    counts: HashMap<u64, u32>,
}

impl RepetitionTracker {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one more occurrence of `key`; returns the new count.
    pub fn record(&mut self, key: u64) -> u32 {
        let count = self.counts.entry(key).or_insert(0);
        *count += 1;
        *count
    }

    /// Remove one occurrence of `key`, dropping the entry when it reaches zero.
    pub fn forget(&mut self, key: u64) {
        if let Some(count) = self.counts.get_mut(&key) {
            if *count <= 1 {
                self.counts.remove(&key);
            } else {
                *count -= 1;
            }
        }
    }

    #[inline]
    pub fn count(&self, key: u64) -> u32 {
        self.counts.get(&key).copied().unwrap_or(0)
    }

    pub fn is_threefold(&self) -> bool {
        self.counts.values().any(|&c| c >= REPETITION_LIMIT)
    }

    #[inline]
    pub fn clear(&mut self) {
        self.counts.clear();
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}
