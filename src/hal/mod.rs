//! Hardware abstraction for the Avalanche SoC peripherals.
//!
//! Thin wrappers around the LiteX-generated CSR registers. Business logic
//! stays in core modules, HAL is just I/O. Everything register-level is
//! gated to the `riscv32` target; the console core only sees [`ConsoleIo`].

#[cfg(target_arch = "riscv32")]
pub mod ctrl;
#[cfg(target_arch = "riscv32")]
pub mod uart;

/// Character I/O as seen by the console core.
///
/// Input is a non-blocking predicate plus a single-character read; text
/// output is the `core::fmt::Write` supertrait, single-byte echo goes
/// through `put_char` so input bytes come back on the wire verbatim, not
/// re-encoded as UTF-8. `read_char` may only be called after `char_ready`
/// returned `true`.
pub trait ConsoleIo: core::fmt::Write {
    /// Is a character available right now? Must not block.
    fn char_ready(&mut self) -> bool;

    /// Read one character. Only valid when `char_ready` returned `true`.
    fn read_char(&mut self) -> u8;

    /// Write one raw byte, bypassing any text encoding.
    fn put_char(&mut self, c: u8);

    /// Consume one character if available.
    fn poll_char(&mut self) -> Option<u8> {
        if self.char_ready() {
            Some(self.read_char())
        } else {
            None
        }
    }
}
