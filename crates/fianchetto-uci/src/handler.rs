//! Command dispatch.

use std::sync::Arc;
use std::thread;

use fianchetto_core::{SearchParams, Solver};

use crate::commands::UciCommand;
use crate::emitter::Emitter;

/// Whether the server loop keeps reading after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct CommandHandler {
    solver: Arc<dyn Solver>,
    emitter: Arc<dyn Emitter>,
}

impl CommandHandler {
    pub fn new(solver: Arc<dyn Solver>, emitter: Arc<dyn Emitter>) -> Self {
        CommandHandler { solver, emitter }
    }

    pub fn handle(&self, command: UciCommand) -> Flow {
        match command {
            UciCommand::Uci => {
                self.emitter.id();
                for option in self.solver.options() {
                    self.emitter.option(&option);
                }
                self.emitter.uci_ok();
            }
            UciCommand::Debug(on) => {
                log::debug!("debug mode request ignored (on={on})");
            }
            UciCommand::IsReady => self.emitter.ready_ok(),
            UciCommand::SetOption { name, value } => self.solver.set_option(&name, &value),
            UciCommand::NewGame => self.solver.new_game(),
            UciCommand::Position { fen, moves } => {
                let result = match fen {
                    Some(fen) => self.solver.set_position(&fen, &moves),
                    None => self.solver.set_start_position(&moves),
                };
                if let Err(err) = result {
                    log::error!("position rejected: {err}");
                }
            }
            UciCommand::Go { params, searchmoves } => self.go(&params, &searchmoves),
            UciCommand::Stop => self.solver.stop_search(),
            UciCommand::PonderHit => self.solver.ponder_hit(),
            UciCommand::Register => {
                log::debug!("register ignored, no copy protection");
            }
            UciCommand::Quit => {
                self.solver.stop_search();
                return Flow::Quit;
            }
        }
        Flow::Continue
    }

    /// Kick off the search and drain its results in the background. The
    /// last line the search produced before the stream ended is the answer;
    /// an empty stream (stopped early, or a ponder miss) announces nothing.
    fn go(&self, params: &SearchParams, searchmoves: &[String]) {
        let rx = match self.solver.start_search(params, searchmoves) {
            Ok(rx) => rx,
            Err(err) => {
                log::error!("go rejected: {err}");
                return;
            }
        };

        let emitter = Arc::clone(&self.emitter);
        thread::spawn(move || {
            let mut last = None;
            for line in rx.iter() {
                last = Some(line);
            }
            match last {
                Some(line) => emitter.best_move(&line),
                None => log::debug!("search ended without a result"),
            }
        });
    }
}
