use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, ValueEnum};

use fianchetto_core::{MinimaxSolver, RandomSolver, Solver};
use fianchetto_uci::emitter::{Emitter, InfoObserver, StdoutEmitter};
use fianchetto_uci::handler::CommandHandler;
use fianchetto_uci::server;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum SolverKind {
    Minimax,
    Random,
}

/// UCI chess engine.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Move selection strategy.
    #[arg(long, value_enum, default_value_t = SolverKind::Minimax)]
    solver: SolverKind,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let emitter: Arc<dyn Emitter> = Arc::new(StdoutEmitter);
    let solver: Arc<dyn Solver> = match args.solver {
        SolverKind::Minimax => Arc::new(MinimaxSolver::with_observer(Arc::new(
            InfoObserver::new(Arc::clone(&emitter)),
        ))),
        SolverKind::Random => Arc::new(RandomSolver::new()),
    };

    let handler = CommandHandler::new(solver, emitter);
    server::run(&handler)
}
