//! Chess engine core: evaluation, transposition cache, minimax search and
//! the ponder-aware search session lifecycle.

pub mod error;
pub mod eval;
pub mod moves;
pub mod observer;
pub mod options;
pub mod params;
pub mod search;
pub mod session;
pub mod solver;
pub mod tt;

pub use error::EngineError;
pub use observer::{NullObserver, SearchObserver};
pub use params::SearchParams;
pub use solver::{MinimaxSolver, RandomSolver, Solver};
