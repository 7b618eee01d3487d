//! Serial diagnostic console
//!
//! Polled from the super-loop - no dedicated task.
//! Zero heap allocation - all fixed buffers.

pub mod commands;
pub mod error;
pub mod line_buffer;
pub mod parser;
pub mod reader;

pub use commands::{execute, COMMANDS};
pub use error::ConsoleError;
pub use line_buffer::{CommandLine, LineBuffer, LINE_SIZE};
pub use parser::{parse_line, ParsedCommand};
pub use reader::LineReader;

use crate::hal::ConsoleIo;
use core::fmt::Write;

/// Version string (set by build.rs, includes git hash)
pub const VERSION: &str = env!("VERSION_STRING");

/// Console prompt marker.
pub const PROMPT: &str = "RUNTIME>";

/// Run one iteration of the console service.
///
/// Polls the reader for at most one character. When a line completes it is
/// tokenized and dispatched, and a fresh prompt is printed whether or not
/// the command matched. Dispatch errors are deliberately discarded: the
/// prompt is the only feedback for unknown input.
pub fn service<IO: ConsoleIo>(reader: &mut LineReader, io: &mut IO) {
    if let Some(line) = reader.poll(&mut *io) {
        let cmd = parse_line(line.as_str());
        let _ = execute(&cmd, &mut *io);
        print_prompt(io);
    }
}

/// Print the prompt.
pub fn print_prompt(out: &mut dyn Write) {
    let _ = write!(out, "{}", PROMPT);
}

/// Print the boot banner, the command listing, and the first prompt.
pub fn print_banner(out: &mut dyn Write) {
    let _ = writeln!(out, "\nAvalanche CPU diagnostic console {}\n", VERSION);
    commands::print_help(out);
    print_prompt(out);
}
