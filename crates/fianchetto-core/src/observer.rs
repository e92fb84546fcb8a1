//! Search progress notifications.

use shakmaty::{Chess, Move};

use crate::eval::CentiPawns;

/// Listener for search progress. All methods default to no-ops so
/// implementors only override what they report.
///
/// Depth 0 is the root. `current_move` fires for every candidate
/// considered at every depth, on both the maximizing and minimizing
/// side, whether or not it improved the window; implementations that
/// only care about root activity filter on `depth`. `best_move` fires
/// only when a root candidate raises the best score seen so far.
pub trait SearchObserver: Send + Sync {
    fn search_started(&self) {}

    fn current_move(
        &self,
        _mv: &Move,
        _depth: u32,
        _score: CentiPawns,
        _alpha: CentiPawns,
        _beta: CentiPawns,
    ) {
    }

    fn best_move(&self, _mv: &Move, _depth: u32, _score: CentiPawns) {}

    /// The search ran to completion. `best` is the last root move that
    /// improved the score, absent when no candidate did (e.g. the side to
    /// move is already mated).
    fn search_finished(&self, _pos: &Chess, _best: Option<&Move>) {}
}

/// Observer that discards every notification.
pub struct NullObserver;

impl SearchObserver for NullObserver {}
