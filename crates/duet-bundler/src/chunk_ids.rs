//! Chunk-id sanitizing.
//!
//! The engine's chunk-ordering step keys a usage table by chunk id. Ids at or
//! above [`SAFE_CHUNK_ID_MAX`] are placeholders for not-yet-numbered chunks
//! and crash the ordering step, so they are dropped before it runs.

use rustc_hash::FxHashMap;
use serde::Serialize;

use crate::lifecycle::ChunkOrderHook;

/// Exclusive ceiling for chunk ids kept in a [`ChunkIdTable`]
pub const SAFE_CHUNK_ID_MAX: u64 = 100_000;

/// Chunk id to usage count
pub type ChunkIdTable = FxHashMap<u64, usize>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChunkIdSanitizer {
    ceiling: u64,
}

impl Default for ChunkIdSanitizer {
    fn default() -> Self {
        Self::new()
    }
}

impl ChunkIdSanitizer {
    pub fn new() -> Self {
        Self {
            ceiling: SAFE_CHUNK_ID_MAX,
        }
    }

    pub fn with_ceiling(ceiling: u64) -> Self {
        Self { ceiling }
    }

    pub fn ceiling(&self) -> u64 {
        self.ceiling
    }

    /// Remove every entry whose id is at or above the ceiling.
    ///
    /// # Example
    ///
    /// ```
    /// use duet_bundler::{ChunkIdSanitizer, ChunkIdTable};
    ///
    /// let table: ChunkIdTable = [(3, 1), (100_000, 2)].into_iter().collect();
    /// let table = ChunkIdSanitizer::new().sanitize(table);
    /// assert_eq!(table.len(), 1);
    /// ```
    pub fn sanitize(&self, mut table: ChunkIdTable) -> ChunkIdTable {
        let before = table.len();
        table.retain(|id, _| *id < self.ceiling);

        let dropped = before - table.len();
        if dropped > 0 {
            tracing::debug!(dropped, ceiling = self.ceiling, "Dropped out-of-range chunk ids");
        }
        table
    }
}

impl ChunkOrderHook for ChunkIdSanitizer {
    fn optimize_chunk_order(&self, table: ChunkIdTable) -> ChunkIdTable {
        self.sanitize(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drops_ids_at_or_above_ceiling() {
        let table: ChunkIdTable = [(0, 5), (99_999, 1), (100_000, 2), (250_000, 3)]
            .into_iter()
            .collect();

        let sanitized = ChunkIdSanitizer::new().sanitize(table);

        let mut ids: Vec<_> = sanitized.keys().copied().collect();
        ids.sort_unstable();
        assert_eq!(ids, vec![0, 99_999]);
        assert_eq!(sanitized[&0], 5);
    }

    #[test]
    fn keeps_in_range_table_untouched() {
        let table: ChunkIdTable = [(1, 1), (2, 2)].into_iter().collect();
        assert_eq!(ChunkIdSanitizer::new().sanitize(table.clone()), table);
    }

    #[test]
    fn empty_table() {
        assert!(ChunkIdSanitizer::new().sanitize(ChunkIdTable::default()).is_empty());
    }

    #[test]
    fn custom_ceiling() {
        let table: ChunkIdTable = [(9, 1), (10, 1)].into_iter().collect();
        let sanitized = ChunkIdSanitizer::with_ceiling(10).optimize_chunk_order(table);
        assert!(sanitized.contains_key(&9));
        assert!(!sanitized.contains_key(&10));
    }
}
