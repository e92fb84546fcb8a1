//! Conversions between `shakmaty` moves and the wire move notation.

use shakmaty::uci::UciMove;
use shakmaty::{CastlingMode, Chess, Move};

use crate::error::EngineError;

/// Wire representation of a move, e.g. `e2e4` or `e7e8q`.
pub fn uci_string(mv: &Move) -> String {
    mv.to_uci(CastlingMode::Standard).to_string()
}

/// Parse a wire move and resolve it against the position.
pub fn decode_move(pos: &Chess, text: &str) -> Result<Move, EngineError> {
    let uci: UciMove = text
        .parse()
        .map_err(|_| EngineError::IllegalMove(text.to_owned()))?;
    uci.to_move(pos)
        .map_err(|_| EngineError::IllegalMove(text.to_owned()))
}

/// Resolve a list of wire moves against the position, dropping any that do
/// not parse or are not legal. Used for `searchmoves` restrictions, where
/// the protocol expects bad entries to be ignored.
pub fn decode_moves(pos: &Chess, texts: &[String]) -> Vec<Move> {
    texts
        .iter()
        .filter_map(|text| match decode_move(pos, text) {
            Ok(mv) => Some(mv),
            Err(err) => {
                log::debug!("dropping unusable search move: {err}");
                None
            }
        })
        .collect()
}
