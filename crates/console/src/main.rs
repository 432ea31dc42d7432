//! Chess console
//!
//! Play a timed game in the terminal, against a friend or the random opponent.

mod command;
mod render;

use chess_core::format_clock;
use command::{Command, HELP};
use game_session::{ClickOutcome, GameMode, GameSession, SessionConfig, SessionEvent};
use std::collections::BTreeSet;
use std::env;
use std::io::{self, BufRead};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

/// Longest wait between wakeups when nothing is scheduled.
const IDLE_POLL: Duration = Duration::from_secs(3600);

fn print_usage() {
    println!("ML-chess console");
    println!();
    println!("Usage:");
    println!("  chess_console [--config <file.toml>] [--seed N] [--mode hvh|hvr]");
    println!();
    println!("{HELP}");
}

struct Args {
    config: Option<PathBuf>,
    seed: Option<u64>,
    mode: Option<GameMode>,
}

fn parse_args(args: &[String]) -> Result<Option<Args>, String> {
    let mut parsed = Args {
        config: None,
        seed: None,
        mode: None,
    };
    let mut i = 0;
    while i < args.len() {
        let value = args.get(i + 1);
        match args[i].as_str() {
            "--config" | "-c" => {
                let path = value.ok_or("--config needs a path")?;
                parsed.config = Some(PathBuf::from(path));
                i += 1;
            }
            "--seed" | "-s" => {
                let seed = value.ok_or("--seed needs a number")?;
                parsed.seed = Some(seed.parse().map_err(|_| format!("bad seed '{seed}'"))?);
                i += 1;
            }
            "--mode" | "-m" => {
                let name = value.ok_or("--mode needs hvh or hvr")?;
                parsed.mode =
                    Some(GameMode::from_name(name).ok_or_else(|| format!("unknown mode '{name}'"))?);
                i += 1;
            }
            "--help" | "-h" => return Ok(None),
            other => return Err(format!("unknown argument '{other}'")),
        }
        i += 1;
    }
    Ok(Some(parsed))
}

fn report(events: &[SessionEvent]) {
    for event in events {
        match event {
            SessionEvent::AutomatedMove(record) => println!("opponent plays {}", record.notation()),
            SessionEvent::NoLegalMoves { color } => println!("{color} has no legal moves"),
            SessionEvent::Timeout { winner } => println!("Game Over - {winner} wins by timeout"),
        }
    }
}

fn show(session: &GameSession, highlights: &BTreeSet<chess_core::Square>) {
    println!("{}", render::screen(&session.snapshot(), highlights));
}

/// Runs one command. Returns false when the user asked to quit.
fn dispatch(session: &mut GameSession, cmd: Command) -> bool {
    let empty = BTreeSet::new();
    match cmd {
        Command::Start(mode) => {
            session.start(mode);
            println!("new game: {mode}");
            show(session, &empty);
        }
        Command::Move(from, to) => {
            if session.submit_move(from, to) {
                show(session, &empty);
            } else {
                println!("move {from}{to} not accepted");
            }
        }
        Command::Click(square) => match session.click(square) {
            ClickOutcome::Ignored => println!("nothing to select on {square}"),
            ClickOutcome::Deselected => show(session, &empty),
            ClickOutcome::Selected { destinations, .. } => show(session, &destinations),
            ClickOutcome::Moved(_) => show(session, &empty),
        },
        Command::Moves(square) => {
            let dests = session.legal_destinations(square);
            if dests.is_empty() {
                println!("no legal moves from {square}");
            } else {
                let list: Vec<String> = dests.iter().map(|s| s.to_string()).collect();
                println!("{square}: {}", list.join(" "));
            }
        }
        Command::Undo => {
            if session.undo() {
                show(session, &empty);
            } else {
                println!("nothing to undo");
            }
        }
        Command::Reset => {
            session.reset();
            show(session, &empty);
        }
        Command::Board => show(session, &empty),
        Command::History => println!("{}", render::history(&session.snapshot())),
        Command::Captured => println!("{}", render::captured(&session.snapshot())),
        Command::Clock => println!("{}", render::clocks(&session.snapshot())),
        Command::Json => match session.snapshot().to_json() {
            Ok(json) => println!("{json}"),
            Err(e) => warn!("snapshot serialization failed: {e}"),
        },
        Command::Wait(secs) => {
            let events = session.advance(Duration::from_secs(secs));
            report(&events);
            println!("{}", render::clocks(&session.snapshot()));
        }
        Command::Help => println!("{HELP}"),
        Command::Quit => return false,
    }
    true
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    let args = match parse_args(&args) {
        Ok(Some(args)) => args,
        Ok(None) => {
            print_usage();
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            eprintln!("Error: {e}");
            print_usage();
            return ExitCode::FAILURE;
        }
    };

    let mut config = match &args.config {
        Some(path) => match SessionConfig::load(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error: {}: {e}", path.display());
                return ExitCode::FAILURE;
            }
        },
        None => SessionConfig::default(),
    };
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    debug!(?config, "session config");

    println!(
        "ML-chess console: {} per side. Type 'help' for commands.",
        format_clock(config.time_allotment_secs)
    );
    let mut session = GameSession::new(config);
    match args.mode {
        Some(mode) => {
            session.start(mode);
            show(&session, &BTreeSet::new());
        }
        None => println!("{}", session.status_message()),
    }

    let (tx, rx) = mpsc::channel::<String>();
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            if tx.send(line).is_err() {
                break;
            }
        }
    });

    let mut last = Instant::now();
    loop {
        let wait = session.next_due().unwrap_or(IDLE_POLL);
        let received = rx.recv_timeout(wait);

        let now = Instant::now();
        let events = session.advance(now - last);
        last = now;
        report(&events);

        match received {
            Ok(line) => match command::parse(&line) {
                Ok(Some(cmd)) => {
                    if !dispatch(&mut session, cmd) {
                        break;
                    }
                }
                Ok(None) => {}
                Err(e) => println!("{e}"),
            },
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => break,
        }
    }
    ExitCode::SUCCESS
}
