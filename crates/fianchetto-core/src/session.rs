//! Search session lifecycle.
//!
//! A session owns the channels a running search submits results on. Normal
//! searches publish straight to the result channel the caller drains.
//! Ponder searches publish to a buffered side channel instead; `ponder_hit`
//! promotes the last buffered line onto the result channel, while a ponder
//! miss simply closes everything and the caller sees an empty stream.
//!
//! Closing drops the senders, so receivers still drain whatever was
//! buffered before seeing the disconnect.

use std::sync::Arc;

use crossbeam_channel::{bounded, Receiver, Sender};
use parking_lot::RwLock;

/// Lifecycle of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Running,
    Stopped,
    /// Ponder search finished or still running, awaiting `ponderhit`/`stop`.
    PonderPending,
    /// `ponderhit` received, buffered result promoted.
    PonderConfirmed,
}

struct SessionInner {
    state: SessionState,
    result_tx: Option<Sender<Vec<String>>>,
    ponder_tx: Option<Sender<Vec<String>>>,
    ponder_rx: Option<Receiver<Vec<String>>>,
}

/// One search session. Created per `go`, torn down by `stop`, `ponderhit`
/// or natural completion.
pub struct SearchSession {
    ponder: bool,
    inner: RwLock<SessionInner>,
}

impl SearchSession {
    /// Open a session and hand back the receiver the caller drains.
    ///
    /// Both channels are bounded at `capacity` (at least one slot), which
    /// callers size to the root candidate count so a live search never
    /// blocks on submit.
    pub fn open(capacity: usize, ponder: bool) -> (Arc<Self>, Receiver<Vec<String>>) {
        let capacity = capacity.max(1);
        let (result_tx, result_rx) = bounded(capacity);
        let (ponder_tx, ponder_rx) = bounded(capacity);
        let session = Arc::new(SearchSession {
            ponder,
            inner: RwLock::new(SessionInner {
                state: SessionState::Running,
                result_tx: Some(result_tx),
                ponder_tx: Some(ponder_tx),
                ponder_rx: Some(ponder_rx),
            }),
        });
        (session, result_rx)
    }

    pub fn state(&self) -> SessionState {
        self.inner.read().state
    }

    pub fn is_ponder(&self) -> bool {
        self.ponder
    }

    /// Publish a candidate line. Returns false once the session is closed;
    /// a refused submission is not an error, the search just keeps going
    /// and its remaining output is discarded.
    pub fn submit(&self, line: Vec<String>) -> bool {
        let inner = self.inner.read();
        let tx = if self.ponder {
            inner.ponder_tx.as_ref()
        } else {
            inner.result_tx.as_ref()
        };
        match tx {
            Some(tx) => tx.try_send(line).is_ok(),
            None => false,
        }
    }

    /// Mark natural completion of the search worker.
    ///
    /// A normal search is done and closes; a ponder search holds its
    /// buffered output for a later `ponderhit` or `stop`.
    pub fn finish(&self) {
        if self.ponder {
            let mut inner = self.inner.write();
            if inner.state == SessionState::Running {
                inner.state = SessionState::PonderPending;
            }
        } else {
            self.close();
        }
    }

    /// Close both channels. Idempotent; buffered values remain readable.
    pub fn close(&self) {
        let mut inner = self.inner.write();
        inner.result_tx.take();
        inner.ponder_tx.take();
        inner.ponder_rx.take();
        inner.state = SessionState::Stopped;
    }

    /// The pondered-on move was played: promote the most recent buffered
    /// ponder line onto the result channel and close. With nothing buffered
    /// (ponder miss) the result stream just ends empty.
    pub fn ponder_hit(&self) {
        if !self.ponder {
            log::debug!("ponderhit on a non-ponder session, ignoring");
            return;
        }
        let mut inner = self.inner.write();
        inner.ponder_tx.take();
        if let Some(rx) = inner.ponder_rx.take() {
            if let Some(line) = rx.try_iter().last() {
                if let Some(tx) = inner.result_tx.as_ref() {
                    let _ = tx.try_send(line);
                }
            }
        }
        inner.result_tx.take();
        inner.state = SessionState::PonderConfirmed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn submit_delivers_on_result_channel() {
        let (session, rx) = SearchSession::open(4, false);
        assert!(session.submit(vec!["e2e4".to_owned()]));
        assert_eq!(rx.try_recv().unwrap(), vec!["e2e4".to_owned()]);
    }

    #[test]
    fn submit_after_close_returns_false() {
        let (session, _rx) = SearchSession::open(4, false);
        session.close();
        assert!(!session.submit(vec!["e2e4".to_owned()]));
        assert_eq!(session.state(), SessionState::Stopped);
    }

    #[test]
    fn close_is_idempotent_and_drains_buffered() {
        let (session, rx) = SearchSession::open(4, false);
        assert!(session.submit(vec!["e2e4".to_owned()]));
        session.close();
        session.close();
        let lines: Vec<_> = rx.iter().collect();
        assert_eq!(lines, vec![vec!["e2e4".to_owned()]]);
    }

    #[test]
    fn ponder_hit_promotes_last_buffered_line() {
        let (session, rx) = SearchSession::open(4, true);
        assert!(session.submit(vec!["e2e4".to_owned()]));
        assert!(session.submit(vec!["d2d4".to_owned()]));
        session.finish();
        assert_eq!(session.state(), SessionState::PonderPending);

        session.ponder_hit();
        assert_eq!(session.state(), SessionState::PonderConfirmed);
        let lines: Vec<_> = rx.iter().collect();
        assert_eq!(lines, vec![vec!["d2d4".to_owned()]]);
    }

    #[test]
    fn ponder_miss_yields_empty_result_stream() {
        let (session, rx) = SearchSession::open(4, true);
        session.ponder_hit();
        assert!(rx.iter().next().is_none());
    }

    #[test]
    fn ponder_hit_on_normal_session_is_ignored() {
        let (session, rx) = SearchSession::open(4, false);
        assert!(session.submit(vec!["e2e4".to_owned()]));
        session.ponder_hit();
        // Still running, the submission is untouched.
        assert_eq!(session.state(), SessionState::Running);
        assert_eq!(rx.try_recv().unwrap(), vec!["e2e4".to_owned()]);
    }

    #[test]
    fn normal_finish_closes_ponder_finish_holds() {
        let (normal, _rx) = SearchSession::open(1, false);
        normal.finish();
        assert_eq!(normal.state(), SessionState::Stopped);

        let (ponder, _rx) = SearchSession::open(1, true);
        ponder.finish();
        assert_eq!(ponder.state(), SessionState::PonderPending);
    }
}
