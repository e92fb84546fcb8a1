//! Minimax search with alpha-beta pruning.
//!
//! `max_step` and `min_step` recurse into each other; depth counts full
//! move pairs and only increments on the min-to-max edge, so `max_depth`
//! bounds how many of our own moves are looked ahead. Scores are cached
//! keyed by the successor position reached from a maximizing node.

use std::sync::Arc;

use rand::seq::SliceRandom;
use shakmaty::{Chess, Color, Move, Position};

use crate::eval::{score_position, CentiPawns, MAX_SCORE};
use crate::moves::uci_string;
use crate::observer::SearchObserver;
use crate::tt::{fingerprint, TranspositionCache};

/// Lines are published through this callback; a false return means the
/// receiving side has gone away.
pub type SubmitFn = Box<dyn Fn(Vec<String>) -> bool + Send>;

pub struct MinimaxSearch {
    max_depth: u32,
    player: Color,
    root_best: Option<Move>,
    cache: Arc<TranspositionCache>,
    observer: Arc<dyn SearchObserver>,
    submit: SubmitFn,
}

impl MinimaxSearch {
    pub fn new(
        max_depth: u32,
        cache: Arc<TranspositionCache>,
        observer: Arc<dyn SearchObserver>,
        submit: SubmitFn,
    ) -> Self {
        MinimaxSearch {
            max_depth: max_depth.max(1),
            player: Color::White,
            root_best: None,
            cache,
            observer,
            submit,
        }
    }

    /// Search `pos` to the configured depth, submitting each root move
    /// that improves on the best score seen so far. The last submission is
    /// the final answer. `candidates` restricts the root moves considered;
    /// empty means all legal moves.
    pub fn run(&mut self, pos: &Chess, candidates: &[Move]) {
        self.player = pos.turn();
        self.root_best = None;
        self.observer.search_started();
        self.max_step(pos, 0, -MAX_SCORE - 1, MAX_SCORE + 1, candidates);
        self.observer.search_finished(pos, self.root_best.as_ref());
    }

    fn moves_shuffled(&self, pos: &Chess) -> Vec<Move> {
        let mut moves: Vec<Move> = pos.legal_moves().into_iter().collect();
        // Random order breaks ties between equal moves so play varies.
        moves.shuffle(&mut rand::rng());
        moves
    }

    fn max_step(
        &mut self,
        pos: &Chess,
        depth: u32,
        mut alpha: CentiPawns,
        beta: CentiPawns,
        candidates: &[Move],
    ) -> CentiPawns {
        if depth >= self.max_depth || pos.is_game_over() {
            return score_position(pos, self.player);
        }

        let mut moves = self.moves_shuffled(pos);
        if depth == 0 && !candidates.is_empty() {
            moves.retain(|mv| candidates.contains(mv));
        }

        for mv in &moves {
            let mut succ = pos.clone();
            succ.play_unchecked(mv);

            let key = fingerprint(&succ);
            let score = match self.cache.get(&key, depth) {
                Some(score) => score,
                None => {
                    let score = self.min_step(&succ, depth, alpha, beta);
                    self.cache.put(&key, score, depth);
                    score
                }
            };

            self.observer.current_move(mv, depth, score, alpha, beta);
            if score > alpha {
                alpha = score;
                if depth == 0 {
                    self.root_best = Some(mv.clone());
                    self.observer.best_move(mv, depth, score);
                    if !(self.submit)(vec![uci_string(mv)]) {
                        log::debug!("session closed, discarding {}", uci_string(mv));
                    }
                }
            }
            if alpha >= beta {
                break;
            }
        }

        alpha
    }

    fn min_step(
        &mut self,
        pos: &Chess,
        depth: u32,
        alpha: CentiPawns,
        mut beta: CentiPawns,
    ) -> CentiPawns {
        if pos.is_game_over() {
            return score_position(pos, self.player);
        }

        let moves = self.moves_shuffled(pos);
        for mv in &moves {
            let mut succ = pos.clone();
            succ.play_unchecked(mv);

            let score = self.max_step(&succ, depth + 1, alpha, beta, &[]);
            self.observer.current_move(mv, depth, score, alpha, beta);
            if score < beta {
                beta = score;
            }
            if alpha >= beta {
                break;
            }
        }

        beta
    }
}
