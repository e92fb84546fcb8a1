//! Solver that plays a uniformly random legal move. Useful as a protocol
//! smoke-test opponent.

use std::sync::Arc;

use crossbeam_channel::Receiver;
use parking_lot::Mutex;
use rand::seq::IndexedRandom;
use shakmaty::{Move, Position};

use crate::error::EngineError;
use crate::moves::{decode_moves, uci_string};
use crate::options::{EngineOption, Options};
use crate::params::SearchParams;
use crate::session::SearchSession;
use crate::solver::{GameState, Solver};

pub struct RandomSolver {
    options: Options,
    game: GameState,
    session: Mutex<Option<Arc<SearchSession>>>,
}

impl RandomSolver {
    pub fn new() -> Self {
        RandomSolver {
            options: Options::new(vec![EngineOption::text(
                "UCI_EngineAboutOption",
                "fianchetto, playing random moves",
            )]),
            game: GameState::new(),
            session: Mutex::new(None),
        }
    }
}

impl Default for RandomSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl Solver for RandomSolver {
    fn options(&self) -> Vec<EngineOption> {
        self.options.declared().to_vec()
    }

    fn option(&self, name: &str) -> Option<String> {
        self.options.get(name)
    }

    fn set_option(&self, name: &str, value: &str) {
        self.options.set(name, value);
    }

    fn set_position(&self, fen: &str, moves: &[String]) -> Result<(), EngineError> {
        self.game.set_fen(fen, moves)
    }

    fn set_start_position(&self, moves: &[String]) -> Result<(), EngineError> {
        self.game.set_start(moves)
    }

    fn do_move(&self, mv: &str) -> Result<(), EngineError> {
        self.game.push_move(mv)
    }

    fn new_game(&self) {}

    fn start_search(
        &self,
        params: &SearchParams,
        searchmoves: &[String],
    ) -> Result<Receiver<Vec<String>>, EngineError> {
        let pos = self.game.snapshot();
        let mut candidates: Vec<Move> = decode_moves(&pos, searchmoves);
        if candidates.is_empty() {
            candidates = pos.legal_moves().into_iter().collect();
        }

        let (session, rx) = SearchSession::open(1, params.ponder);
        if let Some(previous) = self.session.lock().replace(Arc::clone(&session)) {
            previous.close();
        }

        if let Some(mv) = candidates.choose(&mut rand::rng()) {
            session.submit(vec![uci_string(mv)]);
        }
        // Infinite searches stay open until a stop arrives.
        if !params.infinite {
            session.finish();
        }

        Ok(rx)
    }

    fn stop_search(&self) {
        if let Some(session) = self.session.lock().take() {
            session.close();
        }
    }

    fn ponder_hit(&self) {
        if let Some(session) = self.session.lock().take() {
            session.ponder_hit();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shakmaty::Chess;

    #[test]
    fn submits_one_legal_move_and_closes() {
        let solver = RandomSolver::new();
        let rx = solver
            .start_search(&SearchParams::default(), &[])
            .unwrap();

        let lines: Vec<_> = rx.iter().collect();
        assert_eq!(lines.len(), 1);

        let legal: Vec<String> = Chess::default().legal_moves().iter().map(uci_string).collect();
        assert!(legal.contains(&lines[0][0]));
    }

    #[test]
    fn honors_searchmoves_restriction() {
        let solver = RandomSolver::new();
        let restriction = vec!["e2e4".to_owned(), "d2d4".to_owned()];
        let rx = solver
            .start_search(&SearchParams::default(), &restriction)
            .unwrap();

        let lines: Vec<_> = rx.iter().collect();
        assert!(restriction.contains(&lines[0][0]));
    }

    #[test]
    fn infinite_search_waits_for_stop() {
        let solver = RandomSolver::new();
        let params = SearchParams {
            infinite: true,
            ..Default::default()
        };
        let rx = solver.start_search(&params, &[]).unwrap();

        // The move is buffered but the stream must not end yet.
        assert!(rx.try_recv().is_ok());
        assert!(matches!(
            rx.try_recv(),
            Err(crossbeam_channel::TryRecvError::Empty)
        ));

        solver.stop_search();
        assert!(rx.iter().next().is_none());
    }
}
