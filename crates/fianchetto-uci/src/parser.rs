//! UCI command line parser.
//!
//! The protocol asks engines to skip tokens they do not understand and
//! try the rest of the line, so `position startpos` buried in garbage is
//! still honored. Whole lines with no recognizable command are an error
//! the caller logs and ignores.

use anyhow::{anyhow, bail, Result};
use fianchetto_core::SearchParams;

use crate::commands::UciCommand;

const GO_KEYWORDS: &[&str] = &[
    "searchmoves",
    "ponder",
    "wtime",
    "btime",
    "winc",
    "binc",
    "movestogo",
    "depth",
    "nodes",
    "mate",
    "movetime",
    "infinite",
];

pub fn parse_command(line: &str) -> Result<UciCommand> {
    let tokens: Vec<&str> = line.split_whitespace().collect();

    for (i, token) in tokens.iter().enumerate() {
        let rest = &tokens[i + 1..];
        let command = match *token {
            "uci" => UciCommand::Uci,
            "debug" => UciCommand::Debug(rest.first() == Some(&"on")),
            "isready" => UciCommand::IsReady,
            "setoption" => parse_setoption(rest)?,
            "ucinewgame" => UciCommand::NewGame,
            "position" => parse_position(rest)?,
            "go" => parse_go(rest)?,
            "stop" => UciCommand::Stop,
            "ponderhit" => UciCommand::PonderHit,
            "register" => UciCommand::Register,
            "quit" => UciCommand::Quit,
            _ => continue,
        };
        return Ok(command);
    }

    Err(anyhow!("unrecognized command: {line:?}"))
}

/// `setoption name <id> [value <x>]`. Multi-word names are joined with
/// single spaces and lowercased; the value is joined verbatim.
fn parse_setoption(tokens: &[&str]) -> Result<UciCommand> {
    if tokens.first() != Some(&"name") {
        bail!("setoption without a name");
    }
    let body = &tokens[1..];
    let split = body.iter().position(|&t| t == "value").unwrap_or(body.len());

    let name = body[..split].join(" ").to_lowercase();
    if name.is_empty() {
        bail!("setoption with an empty name");
    }
    let value = body[split..].get(1..).unwrap_or(&[]).join(" ");
    Ok(UciCommand::SetOption { name, value })
}

/// `position (startpos | fen <6 fields>) [moves <m1> ...]`. FEN tokens up
/// to `moves` are joined back into one string.
fn parse_position(tokens: &[&str]) -> Result<UciCommand> {
    let split = tokens.iter().position(|&t| t == "moves").unwrap_or(tokens.len());
    let moves: Vec<String> = tokens[split..]
        .get(1..)
        .unwrap_or(&[])
        .iter()
        .map(|s| s.to_string())
        .collect();

    let fen = match tokens.first() {
        Some(&"startpos") => None,
        Some(&"fen") => {
            let fen = tokens[1..split].join(" ");
            if fen.is_empty() {
                bail!("position fen without a position");
            }
            Some(fen)
        }
        _ => bail!("position without startpos or fen"),
    };

    Ok(UciCommand::Position { fen, moves })
}

fn parse_go(tokens: &[&str]) -> Result<UciCommand> {
    let mut params = SearchParams::default();
    let mut searchmoves = Vec::new();

    let mut iter = tokens.iter().peekable();
    while let Some(&token) = iter.next() {
        match token {
            "ponder" => params.ponder = true,
            "infinite" => params.infinite = true,
            "wtime" => params.wtime = Some(parse_number(token, iter.next())?),
            "btime" => params.btime = Some(parse_number(token, iter.next())?),
            "winc" => params.winc = Some(parse_number(token, iter.next())?),
            "binc" => params.binc = Some(parse_number(token, iter.next())?),
            "movestogo" => params.movestogo = Some(parse_number(token, iter.next())?),
            "depth" => params.depth = Some(parse_number(token, iter.next())?),
            "nodes" => params.nodes = Some(parse_number(token, iter.next())?),
            "mate" => params.mate = Some(parse_number(token, iter.next())?),
            "movetime" => params.movetime = Some(parse_number(token, iter.next())?),
            "searchmoves" => {
                while let Some(&&next) = iter.peek() {
                    if GO_KEYWORDS.contains(&next) {
                        break;
                    }
                    searchmoves.push(next.to_owned());
                    iter.next();
                }
            }
            other => log::debug!("ignoring unknown go token {other:?}"),
        }
    }

    Ok(UciCommand::Go { params, searchmoves })
}

fn parse_number<T: std::str::FromStr>(keyword: &str, token: Option<&&str>) -> Result<T> {
    token
        .ok_or_else(|| anyhow!("go {keyword} is missing its value"))?
        .parse()
        .map_err(|_| anyhow!("go {keyword} has a non-numeric value"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_bare_commands() {
        assert_eq!(parse_command("uci").unwrap(), UciCommand::Uci);
        assert_eq!(parse_command("isready").unwrap(), UciCommand::IsReady);
        assert_eq!(parse_command("ucinewgame").unwrap(), UciCommand::NewGame);
        assert_eq!(parse_command("stop").unwrap(), UciCommand::Stop);
        assert_eq!(parse_command("ponderhit").unwrap(), UciCommand::PonderHit);
        assert_eq!(parse_command("quit").unwrap(), UciCommand::Quit);
    }

    #[test]
    fn register_is_accepted_with_any_arguments() {
        assert_eq!(parse_command("register later").unwrap(), UciCommand::Register);
        assert_eq!(
            parse_command("register name Stefan code 1234").unwrap(),
            UciCommand::Register
        );
    }

    #[test]
    fn skips_unknown_leading_tokens() {
        assert_eq!(parse_command("joho debug on").unwrap(), UciCommand::Debug(true));
        assert!(parse_command("complete nonsense").is_err());
    }

    #[test]
    fn setoption_joins_and_lowercases_the_name() {
        assert_eq!(
            parse_command("setoption name Clear Hash").unwrap(),
            UciCommand::SetOption {
                name: "clear hash".to_owned(),
                value: String::new(),
            }
        );
        assert_eq!(
            parse_command("setoption name NalimovPath value c:\\chess\\tb\\4").unwrap(),
            UciCommand::SetOption {
                name: "nalimovpath".to_owned(),
                value: "c:\\chess\\tb\\4".to_owned(),
            }
        );
    }

    #[test]
    fn position_fen_keeps_all_six_fields() {
        let fen = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";
        let cmd = parse_command(&format!("position fen {fen} moves e2e4 e7e5")).unwrap();
        assert_eq!(
            cmd,
            UciCommand::Position {
                fen: Some(fen.to_owned()),
                moves: vec!["e2e4".to_owned(), "e7e5".to_owned()],
            }
        );
    }

    #[test]
    fn position_startpos_without_moves() {
        assert_eq!(
            parse_command("position startpos").unwrap(),
            UciCommand::Position {
                fen: None,
                moves: vec![],
            }
        );
    }

    #[test]
    fn go_parses_every_parameter() {
        let cmd = parse_command(
            "go ponder wtime 1 btime 2 winc 3 binc 4 movestogo 5 depth 6 mate 7 movetime 8 infinite",
        )
        .unwrap();
        let expected = SearchParams {
            ponder: true,
            wtime: Some(1),
            btime: Some(2),
            winc: Some(3),
            binc: Some(4),
            movestogo: Some(5),
            depth: Some(6),
            nodes: None,
            mate: Some(7),
            movetime: Some(8),
            infinite: true,
        };
        assert_eq!(
            cmd,
            UciCommand::Go {
                params: expected,
                searchmoves: vec![],
            }
        );
    }

    #[test]
    fn go_searchmoves_collects_until_next_keyword() {
        let cmd = parse_command("go searchmoves e2e4 d2d4 movetime 100").unwrap();
        assert_eq!(
            cmd,
            UciCommand::Go {
                params: SearchParams {
                    movetime: Some(100),
                    ..Default::default()
                },
                searchmoves: vec!["e2e4".to_owned(), "d2d4".to_owned()],
            }
        );
    }

    #[test]
    fn go_with_bad_number_is_an_error() {
        assert!(parse_command("go movetime soon").is_err());
    }
}
