use std::io::{BufRead, BufReader, Write};
use std::process::{Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use serial_test::serial;

fn spawn_engine() -> std::process::Child {
    Command::new("cargo")
        .args(["run", "--bin", "fianchetto"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::inherit())
        .spawn()
        .expect("Failed to spawn engine")
}

fn send_command(stdin: &mut std::process::ChildStdin, cmd: &str) {
    println!(">>> {cmd}");
    writeln!(stdin, "{cmd}").expect("Failed to write command");
    stdin.flush().expect("Failed to flush stdin");
}

fn read_until_pattern(
    reader: &mut BufReader<&mut std::process::ChildStdout>,
    pattern: &str,
    timeout: Duration,
) -> Result<String, String> {
    let start = Instant::now();
    let mut buffer = String::new();

    while start.elapsed() < timeout {
        buffer.clear();
        match reader.read_line(&mut buffer) {
            Ok(0) => return Err("EOF reached".to_string()),
            Ok(_) => {
                let line = buffer.trim();
                if !line.is_empty() {
                    println!("<<< {line}");
                    if line.contains(pattern) {
                        return Ok(line.to_string());
                    }
                }
            }
            Err(e) => return Err(format!("Read error: {e}")),
        }
    }

    Err(format!("Timeout waiting for pattern: {pattern}"))
}

#[test]
#[serial]
fn handshake_and_search() {
    let mut engine = spawn_engine();
    let stdin = engine.stdin.as_mut().expect("Failed to get stdin");
    let stdout = engine.stdout.as_mut().expect("Failed to get stdout");
    let mut reader = BufReader::new(stdout);

    send_command(stdin, "uci");
    let result = read_until_pattern(&mut reader, "uciok", Duration::from_secs(60));
    assert!(result.is_ok(), "Failed to get uciok: {result:?}");

    send_command(stdin, "isready");
    let result = read_until_pattern(&mut reader, "readyok", Duration::from_secs(5));
    assert!(result.is_ok(), "Failed to get readyok: {result:?}");

    send_command(stdin, "setoption name Search Depth value 1");
    send_command(stdin, "position startpos");
    send_command(stdin, "go");

    let result = read_until_pattern(&mut reader, "bestmove", Duration::from_secs(30));
    assert!(result.is_ok(), "No bestmove: {result:?}");

    send_command(stdin, "quit");
    let _ = engine.wait();
}

#[test]
#[serial]
fn ponder_resolves_after_ponderhit() {
    let mut engine = spawn_engine();
    let stdin = engine.stdin.as_mut().expect("Failed to get stdin");
    let stdout = engine.stdout.as_mut().expect("Failed to get stdout");
    let mut reader = BufReader::new(stdout);

    send_command(stdin, "uci");
    let result = read_until_pattern(&mut reader, "uciok", Duration::from_secs(60));
    assert!(result.is_ok(), "Failed to get uciok: {result:?}");

    send_command(stdin, "setoption name Search Depth value 1");
    send_command(stdin, "position startpos");
    send_command(stdin, "go ponder");

    // Give the shallow search time to run to completion while pondering.
    thread::sleep(Duration::from_millis(500));

    send_command(stdin, "ponderhit");
    let result = read_until_pattern(&mut reader, "bestmove", Duration::from_secs(10));
    assert!(result.is_ok(), "No bestmove after ponderhit: {result:?}");

    send_command(stdin, "quit");
    let _ = engine.wait();
}
