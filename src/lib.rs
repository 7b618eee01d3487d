//! # avalanche-diag
//!
//! Diagnostic console firmware for the Avalanche LiteX SoC.
//!
//! ## Architecture
//!
//! A single cooperative super-loop on the VexRiscv CPU:
//! - [`console::LineReader`] polls the UART one character per iteration,
//!   never blocking the loop
//! - finished lines are tokenized and dispatched through a static command
//!   table (`help`, `reboot`, `sdram_test`)
//! - the SDRAM self-test is the only loop-blocking operation, by design
//!
//! Hardware access lives in [`hal`] and is gated to the `riscv32` target;
//! everything else is plain `core` and runs on the host for tests.

#![cfg_attr(not(test), no_std)]

pub mod console;
pub mod hal;
pub mod logging;
pub mod memtest;

pub use console::{CommandLine, LineBuffer, LineReader, ParsedCommand};
pub use hal::ConsoleIo;
pub use logging::DiagLog;
