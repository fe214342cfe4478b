//! Algorithm Count Map
//!
//! Dense occurrence counts over the fixed vocabulary. Every vocabulary entry
//! is always present (zero-initialized), so merging two maps is plain
//! element-wise addition: commutative, associative, with the all-zero map as
//! identity. That is what makes the corpus-wide fold safe to compute from
//! per-worker partials in any order.

use super::vocabulary::{index_of, VOCABULARY};

/// Occurrence counts for every name in the vocabulary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlgorithmCounts {
    slots: Vec<u64>,
}

impl AlgorithmCounts {
    /// Create an all-zero map covering the full vocabulary
    pub fn new() -> Self {
        Self {
            slots: vec![0; VOCABULARY.len()],
        }
    }

    /// Add `by` occurrences to the vocabulary slot at `index`
    ///
    /// Indices outside the vocabulary are ignored.
    pub fn increment(&mut self, index: usize, by: u64) {
        if let Some(slot) = self.slots.get_mut(index) {
            *slot += by;
        }
    }

    /// Occurrence count for `name`, zero for unknown names
    pub fn get(&self, name: &str) -> u64 {
        index_of(name).map_or(0, |index| self.slots[index])
    }

    /// Element-wise addition of `other` into `self`
    pub fn merge(&mut self, other: &AlgorithmCounts) {
        for (slot, value) in self.slots.iter_mut().zip(&other.slots) {
            *slot += value;
        }
    }

    /// Sum of all counts
    pub fn total(&self) -> u64 {
        self.slots.iter().sum()
    }

    /// True when no pattern was seen at all
    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(|&count| count == 0)
    }

    /// Names with a positive count, sorted by count descending
    ///
    /// The sort is stable, so equal counts keep vocabulary order.
    pub fn ranked(&self) -> Vec<(&'static str, u64)> {
        let mut entries: Vec<(&'static str, u64)> = VOCABULARY
            .iter()
            .zip(&self.slots)
            .filter(|(_, &count)| count > 0)
            .map(|(&name, &count)| (name, count))
            .collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1));
        entries
    }

    /// Render the positive counts as `name:count name:count ...`
    pub fn format_ranked(&self) -> String {
        self.ranked()
            .iter()
            .map(|(name, count)| format!("{}:{}", name, count))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl Default for AlgorithmCounts {
    fn default() -> Self {
        Self::new()
    }
}
