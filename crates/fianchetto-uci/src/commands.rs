//! Parsed UCI commands.

use fianchetto_core::SearchParams;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UciCommand {
    Uci,
    Debug(bool),
    IsReady,
    SetOption {
        name: String,
        value: String,
    },
    NewGame,
    Position {
        /// `None` means the standard starting position.
        fen: Option<String>,
        moves: Vec<String>,
    },
    Go {
        params: SearchParams,
        searchmoves: Vec<String>,
    },
    Stop,
    PonderHit,
    /// `register` with whatever arguments; the engine is free, so the
    /// command is accepted and ignored.
    Register,
    Quit,
}
