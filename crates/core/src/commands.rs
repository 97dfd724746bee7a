//! Parsing of the raw command line into the fixed set of watched commands.
//!
//! The positional arguments are joined with single spaces and split on the
//! literal `&&` separator. Each segment becomes one [`Command`]; quoting inside
//! a segment is not interpreted, the segment is split on whitespace for
//! execution.

use crate::constants::COMMAND_SEPARATOR;
use crate::errors::{Error, Result};
use std::fmt;

/// A single watched command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    display: String,
    argv: Vec<String>,
}

impl Command {
    fn from_segment(segment: &str) -> Self {
        Self {
            display: segment.to_string(),
            argv: segment.split_whitespace().map(str::to_string).collect(),
        }
    }

    /// The segment exactly as typed, used in the header
    pub fn display(&self) -> &str {
        &self.display
    }

    /// Program name followed by its arguments
    pub fn argv(&self) -> &[String] {
        &self.argv
    }

    pub fn program(&self) -> &str {
        &self.argv[0]
    }

    pub fn args(&self) -> &[String] {
        &self.argv[1..]
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display)
    }
}

/// Ordered, non-empty, immutable list of commands
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSet {
    commands: Vec<Command>,
}

impl CommandSet {
    /// Parse raw positional tokens into a command set.
    ///
    /// Fails with [`Error::MalformedCommand`] when no tokens are given or any
    /// `&&`-separated segment is empty after trimming.
    pub fn parse<S: AsRef<str>>(tokens: &[S]) -> Result<Self> {
        let joined = tokens
            .iter()
            .map(AsRef::as_ref)
            .collect::<Vec<_>>()
            .join(" ");

        if joined.trim().is_empty() {
            return Err(Error::malformed_command(joined, "no command given"));
        }

        let mut commands = Vec::new();
        for (position, segment) in joined.split(COMMAND_SEPARATOR).enumerate() {
            let segment = segment.trim();
            if segment.is_empty() {
                return Err(Error::malformed_command(
                    joined.clone(),
                    format!("command {} is empty", position + 1),
                ));
            }
            commands.push(Command::from_segment(segment));
        }

        tracing::debug!(count = commands.len(), "parsed command set");
        Ok(Self { commands })
    }

    /// Number of commands, always at least one
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Command> {
        self.commands.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Command> {
        self.commands.iter()
    }
}

impl<'a> IntoIterator for &'a CommandSet {
    type Item = &'a Command;
    type IntoIter = std::slice::Iter<'a, Command>;

    fn into_iter(self) -> Self::IntoIter {
        self.commands.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_single_command() {
        let set = CommandSet::parse(&["ls", "-la", "/tmp"]).unwrap();
        assert_eq!(set.len(), 1);
        let cmd = set.get(0).unwrap();
        assert_eq!(cmd.display(), "ls -la /tmp");
        assert_eq!(cmd.program(), "ls");
        assert_eq!(cmd.args(), &["-la".to_string(), "/tmp".to_string()]);
    }

    #[test]
    fn test_split_on_separator() {
        let set = CommandSet::parse(&["echo", "A", "&&", "echo", "B"]).unwrap();
        let displays: Vec<_> = set.iter().map(Command::display).collect();
        assert_eq!(displays, vec!["echo A", "echo B"]);
    }

    #[test]
    fn test_separator_inside_single_token() {
        let set = CommandSet::parse(&["echo A&&echo B"]).unwrap();
        let displays: Vec<_> = set.iter().map(Command::display).collect();
        assert_eq!(displays, vec!["echo A", "echo B"]);
    }

    #[test]
    fn test_segment_whitespace_trimmed_and_split() {
        let set = CommandSet::parse(&["  df   -h  && uptime "]).unwrap();
        assert_eq!(set.get(0).unwrap().display(), "df   -h");
        assert_eq!(set.get(0).unwrap().argv(), &["df".to_string(), "-h".to_string()]);
        assert_eq!(set.get(1).unwrap().display(), "uptime");
    }

    #[test]
    fn test_empty_segments_rejected() {
        for tokens in [
            vec!["echo", "A", "&&", "&&", "echo", "B"],
            vec!["&&&&"],
            vec!["echo", "A", "&&"],
            vec!["&&", "echo", "A"],
        ] {
            let err = CommandSet::parse(&tokens).unwrap_err();
            assert!(matches!(err, Error::MalformedCommand { .. }), "{tokens:?}");
        }
    }

    #[test]
    fn test_no_tokens_rejected() {
        let tokens: Vec<String> = Vec::new();
        assert!(matches!(
            CommandSet::parse(&tokens),
            Err(Error::MalformedCommand { .. })
        ));
        assert!(CommandSet::parse(&["   "]).is_err());
    }

    proptest! {
        #[test]
        fn every_segment_becomes_one_command(count in 1usize..12) {
            let tokens: Vec<String> = (0..count)
                .map(|i| format!("echo {i}"))
                .collect::<Vec<_>>()
                .join(" && ")
                .split(' ')
                .map(str::to_string)
                .collect();
            let set = CommandSet::parse(&tokens).unwrap();
            prop_assert_eq!(set.len(), count);
            for (i, command) in set.iter().enumerate() {
                prop_assert_eq!(command.display(), format!("echo {i}"));
                prop_assert_eq!(command.program(), "echo");
            }
        }
    }
}
