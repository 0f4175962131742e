use std::fmt;

use progress_core::model::{PhaseId, TaskId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplCommand {
    Toggle { phase: PhaseId, task: TaskId },
    Dismiss,
    Show,
    Help,
    Quit,
}

#[derive(Debug, PartialEq, Eq)]
pub enum ReplError {
    Empty,
    UnknownCommand(String),
    MissingValue { what: &'static str },
    InvalidId { raw: String },
}

impl fmt::Display for ReplError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReplError::Empty => write!(f, "empty command"),
            ReplError::UnknownCommand(cmd) => write!(f, "unknown command: {cmd}"),
            ReplError::MissingValue { what } => write!(f, "toggle requires a {what} id"),
            ReplError::InvalidId { raw } => write!(f, "invalid id: {raw}"),
        }
    }
}

impl std::error::Error for ReplError {}

pub const HELP: &str = "\
commands:
  toggle <phase> <task>   mark a task done or not done (alias: t)
  dismiss                 close the message (alias: d, close)
  show                    print the roadmap again (alias: s)
  help                    this text
  quit                    leave (alias: q, exit)";

impl ReplCommand {
    pub fn parse(line: &str) -> Result<Self, ReplError> {
        let mut words = line.split_whitespace();
        let Some(first) = words.next() else {
            return Err(ReplError::Empty);
        };
        match first.to_ascii_lowercase().as_str() {
            "toggle" | "t" => {
                let phase = words
                    .next()
                    .ok_or(ReplError::MissingValue { what: "phase" })?;
                let task = words
                    .next()
                    .ok_or(ReplError::MissingValue { what: "task" })?;
                Ok(Self::Toggle {
                    phase: phase.parse().map_err(|_| ReplError::InvalidId {
                        raw: phase.to_string(),
                    })?,
                    task: task.parse().map_err(|_| ReplError::InvalidId {
                        raw: task.to_string(),
                    })?,
                })
            }
            "dismiss" | "d" | "close" => Ok(Self::Dismiss),
            "show" | "s" => Ok(Self::Show),
            "help" | "h" | "?" => Ok(Self::Help),
            "quit" | "q" | "exit" => Ok(Self::Quit),
            _ => Err(ReplError::UnknownCommand(first.to_string())),
        }
    }
}
