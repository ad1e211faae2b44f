//! Commands typed at the prompt (or read from a script file).

use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Proceed,
    Back,
    Next,
    Add { name: String },
    Select { position: usize },
    Delete { position: usize },
    Clear { position: usize },
    Capture,
    Pause,
    Resume,
    Call,
    Mic,
    Camera,
    End,
    Status,
    Wait { duration: Duration },
    Help,
    Quit,
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::Proceed => "proceed",
            Command::Back => "back",
            Command::Next => "next",
            Command::Add { .. } => "add",
            Command::Select { .. } => "select",
            Command::Delete { .. } => "delete",
            Command::Clear { .. } => "clear",
            Command::Capture => "capture",
            Command::Pause => "pause",
            Command::Resume => "resume",
            Command::Call => "call",
            Command::Mic => "mic",
            Command::Camera => "camera",
            Command::End => "end",
            Command::Status => "status",
            Command::Wait { .. } => "wait",
            Command::Help => "help",
            Command::Quit => "quit",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("unknown command '{0}' (try 'help')")]
    Unknown(String),
    #[error("'{command}' needs {what}")]
    MissingArgument {
        command: &'static str,
        what: &'static str,
    },
    #[error("'{0}' is not a list position (positions start at 1)")]
    BadPosition(String),
    #[error("'{0}' is not a duration in milliseconds")]
    BadDuration(String),
}

pub const HELP: &str = "\
commands:
  proceed                 leave the welcome screen
  add <name>              add a sign to train
  select|delete|clear <n> act on the n-th sign in the list
  capture                 capture one sample of the selected sign
  next | back             move forward / back between screens
  pause | resume          stop or restart recognition
  call | mic | camera     start a video call, toggle local media
  end                     end the video call
  wait <ms>               sleep (handy in scripts)
  status | help | quit";

/// Parses one input line. Blank lines and `#` comments yield `Ok(None)`.
pub fn parse_command(line: &str) -> Result<Option<Command>, ParseError> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match word.to_ascii_lowercase().as_str() {
        "proceed" | "start" => Command::Proceed,
        "back" => Command::Back,
        "next" => Command::Next,
        "add" => {
            if rest.is_empty() {
                return Err(ParseError::MissingArgument {
                    command: "add",
                    what: "a sign name",
                });
            }
            Command::Add {
                name: rest.to_string(),
            }
        }
        "select" => Command::Select {
            position: parse_position("select", rest)?,
        },
        "delete" => Command::Delete {
            position: parse_position("delete", rest)?,
        },
        "clear" => Command::Clear {
            position: parse_position("clear", rest)?,
        },
        "capture" => Command::Capture,
        "pause" => Command::Pause,
        "resume" => Command::Resume,
        "call" => Command::Call,
        "mic" => Command::Mic,
        "camera" => Command::Camera,
        "end" => Command::End,
        "status" => Command::Status,
        "wait" => {
            if rest.is_empty() {
                return Err(ParseError::MissingArgument {
                    command: "wait",
                    what: "a duration in milliseconds",
                });
            }
            let millis = rest
                .parse::<u64>()
                .map_err(|_| ParseError::BadDuration(rest.to_string()))?;
            Command::Wait {
                duration: Duration::from_millis(millis),
            }
        }
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => return Err(ParseError::Unknown(other.to_string())),
    };
    Ok(Some(command))
}

fn parse_position(command: &'static str, raw: &str) -> Result<usize, ParseError> {
    if raw.is_empty() {
        return Err(ParseError::MissingArgument {
            command,
            what: "a list position",
        });
    }
    match raw.parse::<usize>() {
        Ok(position) if position >= 1 => Ok(position),
        _ => Err(ParseError::BadPosition(raw.to_string())),
    }
}

#[cfg(test)]
#[path = "tests/commands_tests.rs"]
mod tests;
