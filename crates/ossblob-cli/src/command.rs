//! Positional command parsing.

use std::path::PathBuf;

use thiserror::Error;

/// Errors in the positional arguments, raised before any backend call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArgumentError {
    /// No `-c` flag was given.
    #[error("missing configuration path, pass -c <path>")]
    MissingConfigPath,

    /// Fewer than two positional arguments.
    #[error("expected at least two arguments got {0}")]
    TooFewArguments(usize),

    /// A known command with the wrong number of arguments.
    #[error("{command} method expected {expected} arguments got {got}")]
    WrongArity {
        command: &'static str,
        expected: usize,
        got: usize,
    },

    /// The first positional argument is not a known command.
    #[error("unknown command: '{0}'")]
    UnknownCommand(String),

    /// The `sign` TTL is not a non-negative number of seconds.
    #[error("invalid expiration '{0}', expected a number of seconds")]
    InvalidExpiration(String),
}

/// A fully validated command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `put <file> <key>`
    Put { source: PathBuf, key: String },
    /// `get <key> <file>`
    Get { key: String, destination: PathBuf },
    /// `delete <key>`
    Delete { key: String },
    /// `exists <key>`
    Exists { key: String },
    /// `sign <key> <get|put> <ttl>`
    Sign {
        key: String,
        action: String,
        expires_in_secs: u64,
    },
}

impl Command {
    /// Parses the positional arguments, command name first.
    ///
    /// The `sign` action is not validated here; unsupported actions are
    /// rejected by the blobstore client.
    pub fn from_args(args: &[String]) -> Result<Self, ArgumentError> {
        if args.len() < 2 {
            return Err(ArgumentError::TooFewArguments(args.len()));
        }

        let (command, expected) = match args[0].as_str() {
            "put" => ("put", 3),
            "get" => ("get", 3),
            "delete" => ("delete", 2),
            "exists" => ("exists", 2),
            "sign" => ("sign", 4),
            other => return Err(ArgumentError::UnknownCommand(other.to_owned())),
        };

        if args.len() != expected {
            return Err(ArgumentError::WrongArity {
                command,
                expected,
                got: args.len(),
            });
        }

        let parsed = match command {
            "put" => Self::Put {
                source: PathBuf::from(&args[1]),
                key: args[2].clone(),
            },
            "get" => Self::Get {
                key: args[1].clone(),
                destination: PathBuf::from(&args[2]),
            },
            "delete" => Self::Delete {
                key: args[1].clone(),
            },
            "exists" => Self::Exists {
                key: args[1].clone(),
            },
            _ => Self::Sign {
                key: args[1].clone(),
                action: args[2].clone(),
                expires_in_secs: parse_expiration(&args[3])?,
            },
        };

        Ok(parsed)
    }

    /// Name of the command as typed on the command line.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Put { .. } => "put",
            Self::Get { .. } => "get",
            Self::Delete { .. } => "delete",
            Self::Exists { .. } => "exists",
            Self::Sign { .. } => "sign",
        }
    }
}

/// Parses a TTL given in seconds, with an optional `s` suffix (`60` or `60s`).
fn parse_expiration(value: &str) -> Result<u64, ArgumentError> {
    value
        .strip_suffix('s')
        .unwrap_or(value)
        .parse()
        .map_err(|_| ArgumentError::InvalidExpiration(value.to_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn parses_every_command() {
        assert_eq!(
            Command::from_args(&args(&["put", "local.txt", "obj1"])).unwrap(),
            Command::Put {
                source: PathBuf::from("local.txt"),
                key: "obj1".into(),
            }
        );
        assert_eq!(
            Command::from_args(&args(&["get", "obj1", "out.txt"])).unwrap(),
            Command::Get {
                key: "obj1".into(),
                destination: PathBuf::from("out.txt"),
            }
        );
        assert_eq!(
            Command::from_args(&args(&["delete", "obj1"])).unwrap(),
            Command::Delete { key: "obj1".into() }
        );
        assert_eq!(
            Command::from_args(&args(&["exists", "obj1"])).unwrap(),
            Command::Exists { key: "obj1".into() }
        );
        assert_eq!(
            Command::from_args(&args(&["sign", "obj1", "get", "60"])).unwrap(),
            Command::Sign {
                key: "obj1".into(),
                action: "get".into(),
                expires_in_secs: 60,
            }
        );
    }

    #[test]
    fn rejects_too_few_arguments() {
        assert_eq!(
            Command::from_args(&args(&["exists"])),
            Err(ArgumentError::TooFewArguments(1))
        );
        assert_eq!(
            Command::from_args(&[]),
            Err(ArgumentError::TooFewArguments(0))
        );
    }

    #[test]
    fn rejects_wrong_arity() {
        let err = Command::from_args(&args(&["put", "onlyonearg"])).unwrap_err();
        assert_eq!(
            err,
            ArgumentError::WrongArity {
                command: "put",
                expected: 3,
                got: 2,
            }
        );
        assert_eq!(err.to_string(), "put method expected 3 arguments got 2");

        assert!(Command::from_args(&args(&["delete", "a", "b"])).is_err());
        assert!(Command::from_args(&args(&["sign", "obj", "get"])).is_err());
    }

    #[test]
    fn rejects_unknown_command() {
        let err = Command::from_args(&args(&["list", "prefix"])).unwrap_err();
        assert_eq!(err, ArgumentError::UnknownCommand("list".into()));
        assert_eq!(err.to_string(), "unknown command: 'list'");
    }

    #[test]
    fn sign_accepts_seconds_suffix() {
        let command = Command::from_args(&args(&["sign", "obj", "put", "60s"])).unwrap();
        assert!(matches!(command, Command::Sign { expires_in_secs: 60, .. }));
    }

    #[test]
    fn sign_rejects_invalid_expiration() {
        for ttl in ["-5", "soon", "1.5", ""] {
            let err = Command::from_args(&args(&["sign", "obj", "get", ttl])).unwrap_err();
            assert_eq!(err, ArgumentError::InvalidExpiration(ttl.into()));
        }
    }

    #[test]
    fn sign_defers_action_validation() {
        let command = Command::from_args(&args(&["sign", "obj", "patch", "60"])).unwrap();
        assert_eq!(command.name(), "sign");
    }
}
