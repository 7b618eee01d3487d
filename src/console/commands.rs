//! Command handlers

use core::fmt::Write;

use super::parser::ParsedCommand;
use super::ConsoleError;
use crate::memtest;

/// Command descriptor
pub struct CommandDescriptor {
    pub name: &'static str,
    pub brief: &'static str,
    pub handler: fn(&ParsedCommand<'_>, &mut dyn Write) -> Result<(), ConsoleError>,
}

/// All available commands
pub static COMMANDS: &[CommandDescriptor] = &[
    CommandDescriptor {
        name: "help",
        brief: "this command",
        handler: cmd_help,
    },
    CommandDescriptor {
        name: "reboot",
        brief: "reboot CPU",
        handler: cmd_reboot,
    },
    CommandDescriptor {
        name: "sdram_test",
        brief: "test SDRAM from CPU",
        handler: cmd_sdram_test,
    },
];

/// Execute a parsed command.
///
/// Lookup is an exact, case-sensitive match on the command name. The
/// remainder token is carried in `cmd` but no current command consumes it.
pub fn execute(cmd: &ParsedCommand<'_>, out: &mut dyn Write) -> Result<(), ConsoleError> {
    if cmd.command.is_empty() {
        return Ok(()); // Empty line, do nothing
    }

    let entry = COMMANDS
        .iter()
        .find(|c| c.name == cmd.command)
        .ok_or(ConsoleError::UnknownCommand)?;

    (entry.handler)(cmd, out)
}

/// Print the usage listing (shared by `help` and the boot banner)
pub fn print_help(out: &mut dyn Write) {
    let _ = writeln!(out, "Available commands:");
    for c in COMMANDS {
        let _ = writeln!(out, "{:<14} - {}", c.name, c.brief);
    }
}

// --- Command Implementations ---

fn cmd_help(_cmd: &ParsedCommand<'_>, out: &mut dyn Write) -> Result<(), ConsoleError> {
    print_help(out);
    Ok(())
}

#[allow(unreachable_code)]
fn cmd_reboot(_cmd: &ParsedCommand<'_>, _out: &mut dyn Write) -> Result<(), ConsoleError> {
    // Fire-and-forget hardware reset; does not return on target.
    #[cfg(target_arch = "riscv32")]
    {
        crate::hal::ctrl::reboot();
    }

    Ok(())
}

/// SDRAM self-test.
///
/// Synchronous by design: the console loop is fully blocked until the test
/// finishes, with no progress output and no cancellation. Acceptable for a
/// single-operator diagnostic tool.
fn cmd_sdram_test(_cmd: &ParsedCommand<'_>, out: &mut dyn Write) -> Result<(), ConsoleError> {
    #[cfg(target_arch = "riscv32")]
    let report = {
        let mut window = unsafe { memtest::MmioWindow::main_ram() };
        memtest::run(&mut window)
    };

    #[cfg(not(target_arch = "riscv32"))]
    let report = {
        // Off target the same passes run against a RAM-backed window.
        let mut window = [0u32; 4096];
        memtest::run(&mut window[..])
    };

    let _ = writeln!(out, "bus errors:  {}", report.bus_errors);
    let _ = writeln!(out, "addr errors: {}", report.addr_errors);
    let _ = writeln!(out, "data errors: {}", report.data_errors);

    if report.is_ok() {
        let _ = writeln!(out, "Memtest OK");
        Ok(())
    } else {
        let _ = writeln!(out, "Memtest failed");
        Err(ConsoleError::MemtestFailed)
    }
}
