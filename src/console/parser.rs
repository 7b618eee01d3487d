//! Command line tokenizer
//!
//! Splits a finished line at the first space into the command name and the
//! raw remainder. Pure function over an immutable line; the input is never
//! edited in place.

/// A tokenized command line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedCommand<'a> {
    /// The command name (everything before the first space)
    pub command: &'a str,
    /// The raw remainder after the first space; empty if there is none.
    /// Current commands are nullary, but the remainder is part of the
    /// contract so future commands can take arguments.
    pub rest: &'a str,
}

impl<'a> ParsedCommand<'a> {
    /// Create empty command
    pub const fn empty() -> Self {
        Self {
            command: "",
            rest: "",
        }
    }
}

/// Parse a command line into command name and remainder.
///
/// The command and remainder never overlap; the remainder may be empty
/// (no space, or a trailing space). An empty line yields two empty tokens.
pub fn parse_line(line: &str) -> ParsedCommand<'_> {
    match line.find(' ') {
        Some(i) => ParsedCommand {
            command: &line[..i],
            rest: &line[i + 1..],
        },
        None => ParsedCommand {
            command: line,
            rest: "",
        },
    }
}
