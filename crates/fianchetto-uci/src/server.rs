//! Blocking stdin server loop.

use std::io::BufRead;

use anyhow::Result;

use crate::handler::{CommandHandler, Flow};
use crate::parser::parse_command;

/// Read protocol lines until EOF or `quit`. Unparseable lines are logged
/// and skipped; a GUI must never be able to kill the engine with a typo.
pub fn run(handler: &CommandHandler) -> Result<()> {
    let stdin = std::io::stdin();
    for line in stdin.lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        match parse_command(&line) {
            Ok(command) => {
                log::debug!("dispatching {command:?}");
                if handler.handle(command) == Flow::Quit {
                    break;
                }
            }
            Err(err) => log::warn!("{err}"),
        }
    }
    Ok(())
}
