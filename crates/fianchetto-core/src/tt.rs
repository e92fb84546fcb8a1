//! Transposition cache shared between searches.
//!
//! Keys are EPD fingerprints of the position so that move counters never
//! split otherwise identical cache lines. Entries record the search depth
//! they were computed at; a lookup only hits when the stored entry was
//! computed at the requested depth or nearer the root, where more plies of
//! lookahead sat below it.

use moka::sync::Cache;
use shakmaty::fen::Epd;
use shakmaty::{Chess, EnPassantMode};

use crate::error::EngineError;
use crate::eval::CentiPawns;

/// Rough entry footprint lets a memory budget in MB map onto an entry count.
const ENTRIES_PER_MB: u64 = 1021;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct CacheEntry {
    score: CentiPawns,
    depth: u32,
}

/// EPD fingerprint of a position, the cache key.
pub fn fingerprint(pos: &Chess) -> String {
    Epd::from_position(pos.clone(), EnPassantMode::Legal).to_string()
}

/// Internally synchronized score cache with adaptive recency/frequency
/// eviction. Cheap to share via `Arc`.
pub struct TranspositionCache {
    entries: Cache<String, CacheEntry>,
}

impl TranspositionCache {
    pub fn new(max_entries: u64) -> Result<Self, EngineError> {
        if max_entries == 0 {
            return Err(EngineError::InvalidCacheCapacity);
        }
        Ok(TranspositionCache {
            entries: Cache::new(max_entries),
        })
    }

    /// Capacity derived from a memory budget in megabytes.
    pub fn with_memory_budget(mb: u64) -> Result<Self, EngineError> {
        Self::new(mb.saturating_mul(ENTRIES_PER_MB))
    }

    /// Look up a score computed at `depth` or nearer the root.
    pub fn get(&self, key: &str, depth: u32) -> Option<CentiPawns> {
        self.entries
            .get(key)
            .filter(|entry| entry.depth <= depth)
            .map(|entry| entry.score)
    }

    /// Store a score. An existing entry for the key is overwritten.
    pub fn put(&self, key: &str, score: CentiPawns, depth: u32) {
        self.entries.insert(key.to_owned(), CacheEntry { score, depth });
    }
}
