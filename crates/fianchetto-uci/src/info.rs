//! `info` line builder.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreKind {
    Cp,
    Mate,
    Lowerbound,
    Upperbound,
}

impl fmt::Display for ScoreKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            ScoreKind::Cp => "cp",
            ScoreKind::Mate => "mate",
            ScoreKind::Lowerbound => "lowerbound",
            ScoreKind::Upperbound => "upperbound",
        };
        f.write_str(text)
    }
}

/// Accumulates fields for one `info` line. Field order in the output
/// follows the customary GUI expectations regardless of the order setters
/// were called in.
#[derive(Debug, Clone, Default)]
pub struct Info {
    depth: Option<u32>,
    seldepth: Option<u32>,
    time: Option<u64>,
    nodes: Option<u64>,
    currmovenumber: Option<u32>,
    hashfull: Option<u32>,
    nps: Option<u64>,
    pv: Vec<String>,
    score: Option<(ScoreKind, i64)>,
    currmove: Option<String>,
}

impl Info {
    pub fn new() -> Self {
        Info::default()
    }

    pub fn depth(mut self, depth: u32) -> Self {
        self.depth = Some(depth);
        self
    }

    pub fn seldepth(mut self, seldepth: u32) -> Self {
        self.seldepth = Some(seldepth);
        self
    }

    pub fn time(mut self, millis: u64) -> Self {
        self.time = Some(millis);
        self
    }

    pub fn nodes(mut self, nodes: u64) -> Self {
        self.nodes = Some(nodes);
        self
    }

    pub fn currmovenumber(mut self, number: u32) -> Self {
        self.currmovenumber = Some(number);
        self
    }

    pub fn hashfull(mut self, permille: u32) -> Self {
        self.hashfull = Some(permille);
        self
    }

    pub fn nps(mut self, nps: u64) -> Self {
        self.nps = Some(nps);
        self
    }

    pub fn pv(mut self, mv: &str) -> Self {
        self.pv.push(mv.to_owned());
        self
    }

    pub fn score(mut self, kind: ScoreKind, value: i64) -> Self {
        self.score = Some((kind, value));
        self
    }

    pub fn currmove(mut self, mv: &str) -> Self {
        self.currmove = Some(mv.to_owned());
        self
    }

    /// True when no field was set; a bare `info` must not be emitted.
    pub fn is_empty(&self) -> bool {
        self.depth.is_none()
            && self.seldepth.is_none()
            && self.time.is_none()
            && self.nodes.is_none()
            && self.currmovenumber.is_none()
            && self.hashfull.is_none()
            && self.nps.is_none()
            && self.pv.is_empty()
            && self.score.is_none()
            && self.currmove.is_none()
    }
}

impl fmt::Display for Info {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("info")?;
        if let Some(depth) = self.depth {
            write!(f, " depth {depth}")?;
        }
        if let Some(seldepth) = self.seldepth {
            write!(f, " seldepth {seldepth}")?;
        }
        if let Some(time) = self.time {
            write!(f, " time {time}")?;
        }
        if let Some(nodes) = self.nodes {
            write!(f, " nodes {nodes}")?;
        }
        if let Some(number) = self.currmovenumber {
            write!(f, " currmovenumber {number}")?;
        }
        if let Some(hashfull) = self.hashfull {
            write!(f, " hashfull {hashfull}")?;
        }
        if let Some(nps) = self.nps {
            write!(f, " nps {nps}")?;
        }
        if !self.pv.is_empty() {
            write!(f, " pv {}", self.pv.join(" "))?;
        }
        if let Some((kind, value)) = &self.score {
            write!(f, " score {kind} {value}")?;
        }
        if let Some(currmove) = &self.currmove {
            write!(f, " currmove {currmove}")?;
        }
        Ok(())
    }
}
