//! Non-blocking line reader with destructive backspace
//!
//! Converts one-character-at-a-time UART input into finished lines. Every
//! accepted character is echoed immediately; this is terminal feedback, not
//! logging.

use super::line_buffer::{CommandLine, LineBuffer};
use crate::hal::ConsoleIo;

const BELL: u8 = 0x07;
const BS: u8 = 0x08;
const DEL: u8 = 0x7F;

/// Line reader owning its input buffer.
///
/// One instance lives for the whole console session; the buffer persists
/// across loop iterations and resets only when a finished line is taken.
pub struct LineReader {
    line: LineBuffer,
}

impl LineReader {
    /// Create a reader with an empty buffer
    pub const fn new() -> Self {
        Self {
            line: LineBuffer::new(),
        }
    }

    /// Poll the input source for at most one character.
    ///
    /// Returns immediately with `None` when no character is available; the
    /// surrounding loop stays free to do other work. When a character is
    /// available it is consumed exactly once:
    ///
    /// - DEL/BS: drop the last buffered character and erase it on the
    ///   terminal; ignored on an empty buffer
    /// - BEL: ignored
    /// - CR/LF: echo a newline and yield the finished line (possibly empty)
    /// - anything else: echo the byte back verbatim and append, or drop
    ///   silently when the buffer is at capacity
    pub fn poll<IO: ConsoleIo + ?Sized>(&mut self, io: &mut IO) -> Option<CommandLine> {
        let c = io.poll_char()?;

        match c {
            DEL | BS => {
                if !self.line.is_empty() {
                    self.line.backspace();
                    // Echo: backspace, space, backspace
                    let _ = write!(io, "\x08 \x08");
                }
                None
            }

            BELL => None,

            b'\r' | b'\n' => {
                let _ = io.write_str("\n");
                Some(self.line.take())
            }

            _ => {
                if self.line.push(c) {
                    io.put_char(c);
                }
                None
            }
        }
    }

    /// Current in-progress input (for tests and line redraw)
    pub fn pending(&self) -> &str {
        self.line.as_str()
    }
}

impl Default for LineReader {
    fn default() -> Self {
        Self::new()
    }
}
