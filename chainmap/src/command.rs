//! Line-oriented command front end for integer maps.
//!
//! The input starts with a header line holding the number of commands, followed by that many
//! commands, one per line:
//!
//! ```text
//! put <key> <value>
//! get <key>
//! delete <key>
//! ```
//!
//! `put` produces no output. `get` and `delete` print the value found or `None`.
use chainmap_core::{HashMap, Hasher};
use log::{debug, trace};
use std::fmt::{Display, Formatter};
use std::io::{self, BufRead, Write};
use std::num::ParseIntError;
use std::str::FromStr;
use thiserror::Error;

/// Token printed for a missing key.
pub const NOT_FOUND: &str = "None";

/// Errors of parsing a single command line.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("Empty command.")]
    Empty,
    #[error("Unknown command \"{0}\".")]
    UnknownCommand(String),
    #[error("Command \"{command}\" is missing the {argument} argument.")]
    MissingArgument {
        command: &'static str,
        argument: &'static str,
    },
    #[error("Invalid integer \"{value}\".")]
    InvalidInteger {
        value: String,
        source: ParseIntError,
    },
    #[error("Unexpected argument \"{0}\".")]
    UnexpectedArgument(String),
}

/// Errors of running a whole session.
#[derive(Error, Debug)]
pub enum SessionError {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("Missing header with the number of commands.")]
    MissingHeader,
    #[error("Invalid header \"{header}\", expected the number of commands.")]
    InvalidHeader { header: String },
    #[error("Input ended after {executed} of {expected} commands.")]
    UnexpectedEof { expected: usize, executed: usize },
    #[error("Line {line}: {source}")]
    Command { line: usize, source: CommandError },
}

/// A single parsed command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Put { key: i64, value: i64 },
    Get { key: i64 },
    Delete { key: i64 },
}

fn parse_int(value: &str) -> Result<i64, CommandError> {
    value
        .parse()
        .map_err(|source| CommandError::InvalidInteger {
            value: value.to_owned(),
            source,
        })
}

fn next_int<'a>(
    tokens: &mut impl Iterator<Item = &'a str>,
    command: &'static str,
    argument: &'static str,
) -> Result<i64, CommandError> {
    let token = tokens
        .next()
        .ok_or(CommandError::MissingArgument { command, argument })?;
    parse_int(token)
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut tokens = line.split_whitespace();

        let command = match tokens.next().ok_or(CommandError::Empty)? {
            "put" => Command::Put {
                key: next_int(&mut tokens, "put", "key")?,
                value: next_int(&mut tokens, "put", "value")?,
            },
            "get" => Command::Get {
                key: next_int(&mut tokens, "get", "key")?,
            },
            "delete" => Command::Delete {
                key: next_int(&mut tokens, "delete", "key")?,
            },
            other => return Err(CommandError::UnknownCommand(other.to_owned())),
        };

        match tokens.next() {
            Some(extra) => Err(CommandError::UnexpectedArgument(extra.to_owned())),
            None => Ok(command),
        }
    }
}

/// Result of a command that produces output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Found(i64),
    NotFound,
}

impl From<Option<i64>> for Outcome {
    fn from(value: Option<i64>) -> Self {
        match value {
            Some(value) => Outcome::Found(value),
            None => Outcome::NotFound,
        }
    }
}

impl Display for Outcome {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Found(value) => write!(f, "{}", value),
            Outcome::NotFound => f.write_str(NOT_FOUND),
        }
    }
}

/// Applies `command` to `map`, returns [`None`] for commands without output.
pub fn execute<H, M>(map: &mut M, command: Command) -> Option<Outcome>
where
    H: Hasher<i64>,
    M: HashMap<i64, i64, H>,
{
    match command {
        Command::Put { key, value } => {
            map.put(key, value);
            None
        }
        Command::Get { key } => Some(map.get(&key).into()),
        Command::Delete { key } => Some(map.delete(&key).into()),
    }
}

/// Counters of a finished session.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SessionStats {
    pub commands: usize,
    pub lines_written: usize,
}

/// Reads the header and the commands from `reader`, applies them to `map` and writes the
/// outcomes to `writer`.
///
/// Blank lines between commands are skipped and do not count towards the header total.
pub fn run_session<H, M, R, W>(
    map: &mut M,
    mut reader: R,
    mut writer: W,
) -> Result<SessionStats, SessionError>
where
    H: Hasher<i64>,
    M: HashMap<i64, i64, H>,
    R: BufRead,
    W: Write,
{
    let mut line = String::new();
    let mut line_no = 1;

    if reader.read_line(&mut line)? == 0 {
        return Err(SessionError::MissingHeader);
    }
    let expected: usize = line
        .trim()
        .parse()
        .map_err(|_| SessionError::InvalidHeader {
            header: line.trim().to_owned(),
        })?;
    debug!("Session expects {} commands", expected);

    let mut stats = SessionStats::default();

    while stats.commands < expected {
        line.clear();
        line_no += 1;
        if reader.read_line(&mut line)? == 0 {
            return Err(SessionError::UnexpectedEof {
                expected,
                executed: stats.commands,
            });
        }
        if line.trim().is_empty() {
            continue;
        }

        let command: Command = line
            .parse()
            .map_err(|source| SessionError::Command {
                line: line_no,
                source,
            })?;
        let outcome = execute(map, command);
        trace!("Line {}: {:?} -> {:?}", line_no, command, outcome);

        stats.commands += 1;
        if let Some(outcome) = outcome {
            writeln!(writer, "{}", outcome)?;
            stats.lines_written += 1;
        }
    }

    writer.flush()?;
    debug!(
        "Session finished: {} commands, {} lines written, {} entries left",
        stats.commands,
        stats.lines_written,
        map.len(),
    );

    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chained::ChainedMap;
    use crate::hashing::hashers::MaskHasher;

    fn run(input: &str) -> Result<(String, SessionStats), SessionError> {
        let mut map = ChainedMap::<i64, i64>::new(16).unwrap();
        let mut output = Vec::new();
        let stats = run_session(&mut map, input.as_bytes(), &mut output)?;
        Ok((String::from_utf8(output).unwrap(), stats))
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(
            "put 1 100".parse::<Command>(),
            Ok(Command::Put { key: 1, value: 100 })
        );
        assert_eq!(" get   -5 ".parse::<Command>(), Ok(Command::Get { key: -5 }));
        assert_eq!("delete 7\n".parse::<Command>(), Ok(Command::Delete { key: 7 }));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!("".parse::<Command>(), Err(CommandError::Empty));
        assert_eq!(
            "pop 1".parse::<Command>(),
            Err(CommandError::UnknownCommand("pop".to_owned()))
        );
        assert_eq!(
            "put 1".parse::<Command>(),
            Err(CommandError::MissingArgument {
                command: "put",
                argument: "value"
            })
        );
        assert_eq!(
            "get 1 2".parse::<Command>(),
            Err(CommandError::UnexpectedArgument("2".to_owned()))
        );
        assert!(matches!(
            "delete x".parse::<Command>(),
            Err(CommandError::InvalidInteger { value, .. }) if value == "x"
        ));
        assert!(matches!(
            "get 99999999999999999999".parse::<Command>(),
            Err(CommandError::InvalidInteger { .. })
        ));
    }

    #[test]
    fn test_outcome_rendering() {
        assert_eq!(Outcome::Found(-42).to_string(), "-42");
        assert_eq!(Outcome::NotFound.to_string(), "None");
        assert_eq!(Outcome::from(None), Outcome::NotFound);
    }

    #[test]
    fn test_execute_with_mask_hasher() {
        let mut map = ChainedMap::<i64, i64, MaskHasher<i64>>::new(1 << 16).unwrap();

        assert_eq!(execute(&mut map, Command::Put { key: 1, value: 2 }), None);
        assert_eq!(
            execute(&mut map, Command::Get { key: 1 }),
            Some(Outcome::Found(2))
        );
        assert_eq!(
            execute(&mut map, Command::Delete { key: 1 }),
            Some(Outcome::Found(2))
        );
        assert_eq!(
            execute(&mut map, Command::Delete { key: 1 }),
            Some(Outcome::NotFound)
        );
    }

    #[test]
    fn test_session() {
        let input = "6\nput 1 100\nput 2 200\nget 1\ndelete 1\nget 1\nget 2\n";
        let (output, stats) = run(input).unwrap();

        assert_eq!(output, "100\n100\nNone\n200\n");
        assert_eq!(
            stats,
            SessionStats {
                commands: 6,
                lines_written: 4
            }
        );
    }

    #[test]
    fn test_session_updates_and_missing_keys() {
        let input = "8\nget 1\nput 1 10\nput 1 20\nget 1\ndelete 2\nput -3 -30\nget -3\ndelete -3";
        let (output, _) = run(input).unwrap();

        assert_eq!(output, "None\n20\nNone\n-30\n-30\n");
    }

    #[test]
    fn test_session_skips_blank_lines_and_ignores_trailing_input() {
        let input = "2\n\nput 1 1\n   \nget 1\nget 1\n";
        let (output, stats) = run(input).unwrap();

        assert_eq!(output, "1\n");
        assert_eq!(stats.commands, 2);
    }

    #[test]
    fn test_session_errors() {
        assert!(matches!(run(""), Err(SessionError::MissingHeader)));
        assert!(matches!(
            run("abc\nget 1\n"),
            Err(SessionError::InvalidHeader { header }) if header == "abc"
        ));
        assert!(matches!(
            run("3\nput 1 1\nget 1\n"),
            Err(SessionError::UnexpectedEof {
                expected: 3,
                executed: 2
            })
        ));
        assert!(matches!(
            run("2\nput 1 1\nfetch 1\n"),
            Err(SessionError::Command {
                line: 3,
                source: CommandError::UnknownCommand(_)
            })
        ));
    }

    #[test]
    fn test_session_zero_commands() {
        let (output, stats) = run("0\n").unwrap();

        assert!(output.is_empty());
        assert_eq!(stats, SessionStats::default());
    }
}
