//! Line buffer for console input

use static_assertions::const_assert;

/// Line buffer size. One slot is reserved so a finished line always fits a
/// terminator, so at most `LINE_SIZE - 1` content bytes are accepted.
pub const LINE_SIZE: usize = 64;

const_assert!(LINE_SIZE >= 2);

/// Line input buffer
pub struct LineBuffer {
    buf: [u8; LINE_SIZE],
    len: usize,
}

impl LineBuffer {
    /// Create empty buffer
    pub const fn new() -> Self {
        Self {
            buf: [0u8; LINE_SIZE],
            len: 0,
        }
    }

    /// Push a character.
    ///
    /// Returns `false` when the buffer is full; the character is dropped.
    pub fn push(&mut self, c: u8) -> bool {
        if self.len < LINE_SIZE - 1 {
            self.buf[self.len] = c;
            self.len += 1;
            true
        } else {
            false
        }
    }

    /// Remove last character
    pub fn backspace(&mut self) {
        if self.len > 0 {
            self.len -= 1;
        }
    }

    /// Clear buffer
    pub fn clear(&mut self) {
        self.len = 0;
    }

    /// Take the current contents as a finished line and reset to empty.
    pub fn take(&mut self) -> CommandLine {
        let line = CommandLine {
            buf: self.buf,
            len: self.len,
        };
        self.len = 0;
        line
    }

    /// Get buffer as string slice
    pub fn as_str(&self) -> &str {
        core::str::from_utf8(&self.buf[..self.len]).unwrap_or("")
    }

    /// Get buffer length
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl Default for LineBuffer {
    fn default() -> Self {
        Self::new()
    }
}

/// A finished input line, taken out of the [`LineBuffer`] when a terminator
/// arrives. Immutable; owned by the loop until handed to the dispatcher.
#[derive(Clone, Copy)]
pub struct CommandLine {
    buf: [u8; LINE_SIZE],
    len: usize,
}

impl CommandLine {
    /// Line content, terminator excluded.
    ///
    /// A line containing bytes that do not form valid text reads as empty,
    /// so it dispatches as a no-op like any blank line.
    pub fn as_str(&self) -> &str {
        core::str::from_utf8(&self.buf[..self.len]).unwrap_or("")
    }

    /// Content length in bytes
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if the line is empty
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl core::fmt::Debug for CommandLine {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_tuple("CommandLine").field(&self.as_str()).finish()
    }
}
