//! Console command parsing

use chess_core::Square;
use game_session::GameMode;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Start(GameMode),
    Move(Square, Square),
    Click(Square),
    Moves(Square),
    Undo,
    Reset,
    Board,
    History,
    Captured,
    Clock,
    Json,
    Wait(u64),
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("unknown command '{0}' (try 'help')")]
    Unknown(String),
    #[error("'{0}' needs {1}")]
    MissingArgument(&'static str, &'static str),
    #[error("'{0}' is not a square (expected e.g. e2)")]
    BadSquare(String),
    #[error("unknown mode '{0}' (use hvh or hvr)")]
    BadMode(String),
    #[error("'{0}' is not a number of seconds")]
    BadNumber(String),
}

pub const HELP: &str = "\
Commands:
  start hvh|hvr        start a game (human vs human, or vs the random opponent)
  move e2 e4 | e2e4    play a move
  click e2             select a piece, then click its destination
  moves e2             list legal destinations of a piece
  undo                 take back the last move
  reset                clear the board and stop the clocks
  board | history | captured | clock | json
  wait <secs>          let time pass
  help | quit";

fn square(text: &str) -> Result<Square, CommandError> {
    Square::from_coord(text).ok_or_else(|| CommandError::BadSquare(text.to_string()))
}

/// Splits `e2e4` into its two squares.
fn square_pair(text: &str) -> Option<(Square, Square)> {
    let from = Square::from_coord(text.get(0..2)?)?;
    let to = Square::from_coord(text.get(2..)?)?;
    Some((from, to))
}

/// Parses one input line. Returns `Ok(None)` for blank lines.
pub fn parse(line: &str) -> Result<Option<Command>, CommandError> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    let Some(&head) = parts.first() else {
        return Ok(None);
    };

    let cmd = match head.to_ascii_lowercase().as_str() {
        "start" | "new" => {
            let name = parts
                .get(1)
                .ok_or(CommandError::MissingArgument("start", "a mode"))?;
            let mode =
                GameMode::from_name(name).ok_or_else(|| CommandError::BadMode(name.to_string()))?;
            Command::Start(mode)
        }
        "move" | "m" => match parts.len() {
            2 => {
                let (from, to) =
                    square_pair(parts[1]).ok_or_else(|| CommandError::BadSquare(parts[1].to_string()))?;
                Command::Move(from, to)
            }
            3 => Command::Move(square(parts[1])?, square(parts[2])?),
            _ => return Err(CommandError::MissingArgument("move", "two squares")),
        },
        "click" | "c" => {
            let sq = parts
                .get(1)
                .ok_or(CommandError::MissingArgument("click", "a square"))?;
            Command::Click(square(sq)?)
        }
        "moves" => {
            let sq = parts
                .get(1)
                .ok_or(CommandError::MissingArgument("moves", "a square"))?;
            Command::Moves(square(sq)?)
        }
        "undo" | "u" => Command::Undo,
        "reset" => Command::Reset,
        "board" | "b" => Command::Board,
        "history" => Command::History,
        "captured" => Command::Captured,
        "clock" => Command::Clock,
        "json" => Command::Json,
        "wait" => {
            let secs = parts
                .get(1)
                .ok_or(CommandError::MissingArgument("wait", "a number of seconds"))?;
            let n = secs
                .parse()
                .map_err(|_| CommandError::BadNumber(secs.to_string()))?;
            Command::Wait(n)
        }
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        // Bare coordinate pair, e.g. "e2e4".
        other if parts.len() == 1 => match square_pair(other) {
            Some((from, to)) => Command::Move(from, to),
            None => return Err(CommandError::Unknown(head.to_string())),
        },
        _ => return Err(CommandError::Unknown(head.to_string())),
    };
    Ok(Some(cmd))
}
