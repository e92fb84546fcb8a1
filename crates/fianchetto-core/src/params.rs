//! Search parameters carried by a `go` request.

use std::time::Duration;

use shakmaty::Color;

/// Parameters of a single search request. Absent fields were not given by
/// the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchParams {
    pub ponder: bool,
    pub wtime: Option<u64>,
    pub btime: Option<u64>,
    pub winc: Option<u64>,
    pub binc: Option<u64>,
    pub movestogo: Option<u32>,
    pub depth: Option<u32>,
    pub nodes: Option<u64>,
    pub mate: Option<u32>,
    pub movetime: Option<u64>,
    pub infinite: bool,
}

impl SearchParams {
    /// Wall-clock budget for this search, if any.
    ///
    /// An explicit `movetime` wins; otherwise the remaining clock of the
    /// side to move is spent in full. Infinite and ponder searches run
    /// until stopped.
    pub fn time_budget(&self, turn: Color) -> Option<Duration> {
        if self.infinite || self.ponder {
            return None;
        }
        if let Some(ms) = self.movetime.filter(|&ms| ms > 0) {
            return Some(Duration::from_millis(ms));
        }
        let clock = match turn {
            Color::White => self.wtime,
            Color::Black => self.btime,
        };
        clock.filter(|&ms| ms > 0).map(Duration::from_millis)
    }
}
