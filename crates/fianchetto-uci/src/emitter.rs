//! Protocol output. Everything the engine says goes through an `Emitter`,
//! so tests can capture it and the search observer can speak the protocol
//! without owning stdout.

use std::io::Write;

use fianchetto_core::eval::CentiPawns;
use fianchetto_core::moves::uci_string;
use fianchetto_core::options::EngineOption;
use fianchetto_core::SearchObserver;
use shakmaty::Move;
use std::sync::Arc;

use crate::info::{Info, ScoreKind};

pub const ENGINE_NAME: &str = concat!("fianchetto ", env!("CARGO_PKG_VERSION"));
pub const ENGINE_AUTHOR: &str = "the fianchetto authors";

pub trait Emitter: Send + Sync {
    fn id(&self);
    fn uci_ok(&self);
    fn ready_ok(&self);
    fn option(&self, option: &EngineOption);
    /// `line` is a principal variation; the first move is the best move and
    /// an optional second becomes the ponder hint. Empty lines emit nothing.
    fn best_move(&self, line: &[String]);
    fn info(&self, info: &Info);
}

/// Writes protocol lines to stdout, flushing each one since GUIs read the
/// engine through a pipe.
pub struct StdoutEmitter;

impl StdoutEmitter {
    fn emit(&self, line: &str) {
        let stdout = std::io::stdout();
        let mut handle = stdout.lock();
        // A broken pipe means the GUI is gone; nothing sensible left to do.
        let _ = writeln!(handle, "{line}");
        let _ = handle.flush();
    }
}

impl Emitter for StdoutEmitter {
    fn id(&self) {
        self.emit(&format!("id name {ENGINE_NAME}"));
        self.emit(&format!("id author {ENGINE_AUTHOR}"));
    }

    fn uci_ok(&self) {
        self.emit("uciok");
    }

    fn ready_ok(&self) {
        self.emit("readyok");
    }

    fn option(&self, option: &EngineOption) {
        self.emit(&option.to_string());
    }

    fn best_move(&self, line: &[String]) {
        match line {
            [] => {}
            [best] => self.emit(&format!("bestmove {best}")),
            [best, ponder, ..] => self.emit(&format!("bestmove {best} ponder {ponder}")),
        }
    }

    fn info(&self, info: &Info) {
        if !info.is_empty() {
            self.emit(&info.to_string());
        }
    }
}

/// Bridges search progress into `info` lines.
///
/// Per-node traffic is kept down by only reporting root activity; deeper
/// nodes fire far too often to be worth a line each.
pub struct InfoObserver {
    emitter: Arc<dyn Emitter>,
}

impl InfoObserver {
    pub fn new(emitter: Arc<dyn Emitter>) -> Self {
        InfoObserver { emitter }
    }
}

impl SearchObserver for InfoObserver {
    fn current_move(
        &self,
        mv: &Move,
        depth: u32,
        score: CentiPawns,
        _alpha: CentiPawns,
        _beta: CentiPawns,
    ) {
        if depth == 0 {
            let info = Info::new()
                .depth(depth + 1)
                .currmove(&uci_string(mv))
                .score(ScoreKind::Cp, score);
            self.emitter.info(&info);
        }
    }

    fn best_move(&self, mv: &Move, depth: u32, score: CentiPawns) {
        let info = Info::new()
            .depth(depth + 1)
            .pv(&uci_string(mv))
            .score(ScoreKind::Cp, score);
        self.emitter.info(&info);
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::RecordingEmitter;
    use super::*;
    use fianchetto_core::moves::decode_move;
    use shakmaty::Chess;

    #[test]
    fn observer_reports_root_best_moves() {
        let emitter = Arc::new(RecordingEmitter::default());
        let observer = InfoObserver::new(emitter.clone());

        let mv = decode_move(&Chess::default(), "e2e4").unwrap();
        observer.best_move(&mv, 0, 25);

        assert_eq!(emitter.take(), vec!["info depth 1 pv e2e4 score cp 25"]);
    }

    #[test]
    fn observer_stays_quiet_below_the_root() {
        let emitter = Arc::new(RecordingEmitter::default());
        let observer = InfoObserver::new(emitter.clone());

        let mv = decode_move(&Chess::default(), "e2e4").unwrap();
        observer.current_move(&mv, 2, 0, -1, 1);

        assert!(emitter.take().is_empty());
    }

    #[test]
    fn bestmove_renders_ponder_hint() {
        let emitter = RecordingEmitter::default();
        emitter.best_move(&["e2e4".to_owned(), "e7e5".to_owned()]);
        emitter.best_move(&["d2d4".to_owned()]);
        emitter.best_move(&[]);

        assert_eq!(
            emitter.take(),
            vec!["bestmove e2e4 ponder e7e5", "bestmove d2d4"]
        );
    }
}
