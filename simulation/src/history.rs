//! Run history: one per-species population snapshot per timestep.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub timestep: u64,
    pub counts: BTreeMap<String, u32>,
}

/// Append-only log, entry 0 being the freshly populated world.
#[derive(Debug, Clone, Default)]
pub struct History {
    entries: Vec<HistoryEntry>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, timestep: u64, counts: &BTreeMap<String, u32>) {
        self.entries.push(HistoryEntry {
            timestep,
            counts: counts.clone(),
        });
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn latest(&self) -> Option<&HistoryEntry> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Population of one species over time (0 where it was never counted)
    pub fn series(&self, species: &str) -> Vec<u32> {
        self.entries
            .iter()
            .map(|e| e.counts.get(species).copied().unwrap_or(0))
            .collect()
    }
}
