//! Solver coordinators: position bookkeeping plus the search lifecycle.

mod minimax;
mod random;

pub use minimax::MinimaxSolver;
pub use random::RandomSolver;

use crossbeam_channel::Receiver;
use parking_lot::Mutex;
use shakmaty::fen::Fen;
use shakmaty::{CastlingMode, Chess, Position};

use crate::error::EngineError;
use crate::moves::decode_move;
use crate::options::EngineOption;
use crate::params::SearchParams;

/// Protocol-facing engine surface: position setup, option handling and the
/// search lifecycle. Results arrive on the receiver returned by
/// `start_search`; the stream ends when the search is stopped, resolved by
/// `ponder_hit`, or completes on its own.
pub trait Solver: Send + Sync {
    fn options(&self) -> Vec<EngineOption>;
    fn option(&self, name: &str) -> Option<String>;
    fn set_option(&self, name: &str, value: &str);

    fn set_position(&self, fen: &str, moves: &[String]) -> Result<(), EngineError>;
    fn set_start_position(&self, moves: &[String]) -> Result<(), EngineError>;
    fn do_move(&self, mv: &str) -> Result<(), EngineError>;

    /// Forget state carried across games, e.g. cached scores.
    fn new_game(&self);

    fn start_search(
        &self,
        params: &SearchParams,
        searchmoves: &[String],
    ) -> Result<Receiver<Vec<String>>, EngineError>;
    fn stop_search(&self);
    fn ponder_hit(&self);
}

/// Current game position shared between the protocol thread and workers.
pub(crate) struct GameState {
    pos: Mutex<Chess>,
}

impl GameState {
    pub(crate) fn new() -> Self {
        GameState {
            pos: Mutex::new(Chess::default()),
        }
    }

    pub(crate) fn set_fen(&self, fen: &str, moves: &[String]) -> Result<(), EngineError> {
        let parsed: Fen = fen
            .parse()
            .map_err(|_| EngineError::InvalidFen(fen.to_owned()))?;
        let pos: Chess = parsed
            .into_position(CastlingMode::Standard)
            .map_err(|_| EngineError::InvalidFen(fen.to_owned()))?;
        self.replay(pos, moves)
    }

    pub(crate) fn set_start(&self, moves: &[String]) -> Result<(), EngineError> {
        self.replay(Chess::default(), moves)
    }

    pub(crate) fn push_move(&self, mv: &str) -> Result<(), EngineError> {
        let mut pos = self.pos.lock();
        let decoded = decode_move(&pos, mv)?;
        pos.play_unchecked(&decoded);
        Ok(())
    }

    pub(crate) fn snapshot(&self) -> Chess {
        self.pos.lock().clone()
    }

    fn replay(&self, mut pos: Chess, moves: &[String]) -> Result<(), EngineError> {
        for mv in moves {
            let decoded = decode_move(&pos, mv)?;
            pos.play_unchecked(&decoded);
        }
        *self.pos.lock() = pos;
        Ok(())
    }
}
