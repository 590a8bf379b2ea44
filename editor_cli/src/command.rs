//! Line-oriented commands understood by the driver.

use ember_core::{Boundary, Direction, Movement, Unit};
use thiserror::Error;

/// Errors produced while parsing a command line.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("unknown command '{0}'")]
    Unknown(String),
    #[error("'{command}' expects {expected}")]
    MissingArgument {
        command: &'static str,
        expected: &'static str,
    },
    #[error("invalid {what} '{value}'")]
    Invalid { what: &'static str, value: String },
}

/// A single editing, movement or query command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Move(Movement),
    Goto(usize),
    Find(String),
    Again,
    Insert(String),
    Newline,
    Delete(Movement),
    Erase,
    Mark(Option<usize>),
    Unmark,
    Copy,
    Bookmark,
    Bookmarks,
    Begin(Boundary),
    End(Boundary),
    Status,
    Print,
    Quit,
}

impl Command {
    /// Parses one input line. Blank lines and `#` comments yield `None`.
    pub fn parse(line: &str) -> Result<Option<Self>, CommandError> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(None);
        }

        let (name, rest) = match line.split_once(char::is_whitespace) {
            Some((name, rest)) => (name, rest.trim_start()),
            None => (line, ""),
        };
        let mut args = rest.split_whitespace();

        let command = match name {
            "move" => Command::Move(parse_movement("move", &mut args, true)?),
            "delete" => Command::Delete(parse_movement("delete", &mut args, false)?),
            "goto" => {
                let value = args.next().ok_or(CommandError::MissingArgument {
                    command: "goto",
                    expected: "a byte offset",
                })?;
                Command::Goto(parse_number("offset", value)?)
            }
            "find" => Command::Find(required_text("find", rest)?),
            "again" => Command::Again,
            "insert" => Command::Insert(unescape(&required_text("insert", rest)?)),
            "newline" => Command::Newline,
            "erase" => Command::Erase,
            "mark" => Command::Mark(
                args.next()
                    .map(|value| parse_number("length", value))
                    .transpose()?,
            ),
            "unmark" => Command::Unmark,
            "copy" => Command::Copy,
            "bookmark" => Command::Bookmark,
            "bookmarks" => Command::Bookmarks,
            "begin" => Command::Begin(parse_boundary(args.next())?),
            "end" => Command::End(parse_boundary(args.next())?),
            "status" => Command::Status,
            "print" => Command::Print,
            "quit" | "exit" => Command::Quit,
            other => return Err(CommandError::Unknown(other.to_string())),
        };
        Ok(Some(command))
    }
}

fn parse_movement<'a>(
    command: &'static str,
    args: &mut impl Iterator<Item = &'a str>,
    allow_lines: bool,
) -> Result<Movement, CommandError> {
    let expected = if allow_lines {
        "<char|word|line> <fwd|back> [count]"
    } else {
        "<char|word> <fwd|back> [count]"
    };
    let (Some(unit), Some(direction)) = (args.next(), args.next()) else {
        return Err(CommandError::MissingArgument { command, expected });
    };

    let unit = match unit {
        "char" | "chars" => Unit::Char,
        "word" | "words" => Unit::Word,
        "line" | "lines" if allow_lines => Unit::Line,
        other => {
            return Err(CommandError::Invalid {
                what: "unit",
                value: other.to_string(),
            })
        }
    };
    let direction = match direction {
        "fwd" | "forward" => Direction::Forward,
        "back" | "backward" => Direction::Backward,
        other => {
            return Err(CommandError::Invalid {
                what: "direction",
                value: other.to_string(),
            })
        }
    };
    let count = args
        .next()
        .map(|value| parse_number("count", value))
        .transpose()?
        .unwrap_or(1);

    Ok(Movement::new(unit, direction, count))
}

fn parse_boundary(value: Option<&str>) -> Result<Boundary, CommandError> {
    match value {
        None | Some("inside") => Ok(Boundary::Inside),
        Some("outside") => Ok(Boundary::Outside),
        Some(other) => Err(CommandError::Invalid {
            what: "boundary",
            value: other.to_string(),
        }),
    }
}

fn parse_number(what: &'static str, value: &str) -> Result<usize, CommandError> {
    value.parse().map_err(|_| CommandError::Invalid {
        what,
        value: value.to_string(),
    })
}

fn required_text(command: &'static str, rest: &str) -> Result<String, CommandError> {
    if rest.is_empty() {
        Err(CommandError::MissingArgument {
            command,
            expected: "some text",
        })
    } else {
        Ok(rest.to_string())
    }
}

/// Expands `\n` and `\t` escapes so multi-line text fits on one input line.
fn unescape(text: &str) -> String {
    text.replace("\\n", "\n").replace("\\t", "\t")
}
