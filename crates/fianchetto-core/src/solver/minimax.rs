//! Minimax solver: wires options, cache, session and worker threads
//! together around the search algorithm.

use std::sync::Arc;
use std::thread;

use crossbeam_channel::Receiver;
use parking_lot::Mutex;
use shakmaty::{Move, Position};

use crate::error::EngineError;
use crate::moves::decode_moves;
use crate::observer::{NullObserver, SearchObserver};
use crate::options::{EngineOption, Options};
use crate::params::SearchParams;
use crate::search::MinimaxSearch;
use crate::session::SearchSession;
use crate::solver::{GameState, Solver};
use crate::tt::TranspositionCache;

const HASH_OPTION: &str = "hash";
const DEPTH_OPTION: &str = "search depth";

const DEFAULT_HASH_MB: u64 = 32;
const DEFAULT_DEPTH: u32 = 2;

const ABOUT: &str = "fianchetto, a minimax chess engine";

/// Cache together with the configuration it was built for. Rebuilt lazily
/// when the hash budget or search depth changes, so cached scores never
/// leak across incompatible configurations.
struct EngineSlot {
    cache: Option<Arc<TranspositionCache>>,
    hash_mb: u64,
    max_depth: u32,
}

pub struct MinimaxSolver {
    options: Options,
    game: GameState,
    observer: Arc<dyn SearchObserver>,
    session: Mutex<Option<Arc<SearchSession>>>,
    engine: Mutex<EngineSlot>,
}

impl MinimaxSolver {
    pub fn new() -> Self {
        Self::with_observer(Arc::new(NullObserver))
    }

    pub fn with_observer(observer: Arc<dyn SearchObserver>) -> Self {
        MinimaxSolver {
            options: Options::new(vec![
                EngineOption::spin("Hash", DEFAULT_HASH_MB as i64, 1, 4096),
                EngineOption::spin("Search Depth", DEFAULT_DEPTH as i64, 1, 4),
                EngineOption::text("UCI_EngineAboutOption", ABOUT),
            ]),
            game: GameState::new(),
            observer,
            session: Mutex::new(None),
            engine: Mutex::new(EngineSlot {
                cache: None,
                hash_mb: 0,
                max_depth: 0,
            }),
        }
    }

    /// Numeric value of a spin option. A value that does not parse is a
    /// configuration error the caller must refuse to search with, not
    /// something to paper over with the default.
    fn spin_value(&self, name: &str, fallback: u64) -> Result<u64, EngineError> {
        match self.options.get(name) {
            Some(value) => value.parse::<u64>().map_err(|_| EngineError::InvalidOptionValue {
                name: name.to_owned(),
                value,
            }),
            None => Ok(fallback),
        }
    }

    /// Hand out the cache for a search at `max_depth`, rebuilding when the
    /// configuration moved since the last search.
    fn cache_for(
        &self,
        hash_mb: u64,
        max_depth: u32,
    ) -> Result<Arc<TranspositionCache>, EngineError> {
        let mut slot = self.engine.lock();
        let stale =
            slot.cache.is_none() || slot.hash_mb != hash_mb || slot.max_depth != max_depth;
        if stale {
            log::debug!("building transposition cache: {hash_mb} MB, depth {max_depth}");
            slot.cache = Some(Arc::new(TranspositionCache::with_memory_budget(hash_mb)?));
            slot.hash_mb = hash_mb;
            slot.max_depth = max_depth;
        }
        // The slot always holds a cache after the rebuild above.
        slot.cache
            .clone()
            .ok_or(EngineError::InvalidCacheCapacity)
    }
}

impl Default for MinimaxSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl Solver for MinimaxSolver {
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

    fn new_game(&self) {
        self.engine.lock().cache = None;
    }

    fn start_search(
        &self,
        params: &SearchParams,
        searchmoves: &[String],
    ) -> Result<Receiver<Vec<String>>, EngineError> {
        let hash_mb = self.spin_value(HASH_OPTION, DEFAULT_HASH_MB)?;
        let configured = self.spin_value(DEPTH_OPTION, DEFAULT_DEPTH as u64)? as u32;
        let max_depth = params.depth.unwrap_or(configured).max(1);
        let cache = self.cache_for(hash_mb, max_depth)?;

        let pos = self.game.snapshot();
        let candidates: Vec<Move> = decode_moves(&pos, searchmoves);
        let root_count = if candidates.is_empty() {
            pos.legal_moves().len()
        } else {
            candidates.len()
        };

        // One live session per solver: a new search supersedes the old one.
        let (session, rx) = SearchSession::open(root_count, params.ponder);
        if let Some(previous) = self.session.lock().replace(Arc::clone(&session)) {
            previous.close();
        }

        let worker_session = Arc::clone(&session);
        let observer = Arc::clone(&self.observer);
        let worker_pos = pos.clone();
        thread::spawn(move || {
            let submit_session = Arc::clone(&worker_session);
            let mut search = MinimaxSearch::new(
                max_depth,
                cache,
                observer,
                Box::new(move |line| submit_session.submit(line)),
            );
            search.run(&worker_pos, &candidates);
            worker_session.finish();
            log::debug!("search worker finished");
        });

        if let Some(budget) = params.time_budget(pos.turn()) {
            // The timer holds its own session, so it can never cut short a
            // search started after this one.
            let timer_session = Arc::clone(&session);
            thread::spawn(move || {
                thread::sleep(budget);
                log::debug!("time budget of {budget:?} spent, closing session");
                timer_session.close();
            });
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
