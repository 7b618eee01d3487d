//! avalanche-diag - diagnostic console entry point
//!
//! On the SoC: interrupt bootstrap, UART init, banner, then the polled
//! super-loop. Off target the same loop runs over stdin/stdout so the
//! console can be driven on a workstation.

#![cfg_attr(target_os = "none", no_std)]
#![cfg_attr(target_os = "none", no_main)]

use avalanche_diag::logging::DiagLog;

static DIAG_LOG: DiagLog = DiagLog::new();

#[cfg(target_os = "none")]
mod firmware {
    use core::fmt::Write;

    use avalanche_diag::console;
    use avalanche_diag::diag_info;
    use avalanche_diag::hal::ctrl;
    use avalanche_diag::hal::uart::{SerialPort, Uart};
    use avalanche_diag::logging;
    use avalanche_diag::LineReader;

    use super::DIAG_LOG;

    #[no_mangle]
    pub extern "C" fn main() -> ! {
        ctrl::irq_set_mask(0);
        ctrl::irq_set_ie(true);

        let mut port = SerialPort::new();
        port.init();

        diag_info!(DIAG_LOG, ctrl::cycles(), "console up, irq enabled");

        drain_log(&mut port);
        console::print_banner(&mut port);

        let mut reader = LineReader::new();
        loop {
            console::service(&mut reader, &mut port);
            drain_log(&mut port);
        }
    }

    fn drain_log(out: &mut dyn Write) {
        while let Some(entry) = DIAG_LOG.drain() {
            logging::write_entry(out, &entry);
        }
    }

    #[panic_handler]
    fn panic(info: &core::panic::PanicInfo) -> ! {
        // The lock holder is gone for good; take the port directly.
        let mut uart = unsafe { Uart::steal() };
        let _ = writeln!(uart, "\npanic: {}", info);
        loop {
            core::hint::spin_loop();
        }
    }
}

#[cfg(not(target_os = "none"))]
mod host {
    use std::io::{self, Read, Write as _};
    use std::sync::mpsc::{self, Receiver, TryRecvError};
    use std::thread;
    use std::time::Duration;

    use avalanche_diag::console;
    use avalanche_diag::diag_info;
    use avalanche_diag::hal::ConsoleIo;
    use avalanche_diag::logging;
    use avalanche_diag::LineReader;

    use super::DIAG_LOG;

    /// Console I/O over stdin/stdout.
    ///
    /// A pump thread feeds stdin bytes through a channel so `char_ready`
    /// keeps the non-blocking contract.
    struct HostIo {
        rx: Receiver<u8>,
        pending: Option<u8>,
        eof: bool,
    }

    impl HostIo {
        fn new() -> Self {
            let (tx, rx) = mpsc::channel();
            thread::spawn(move || {
                for byte in io::stdin().lock().bytes() {
                    match byte {
                        Ok(b) => {
                            if tx.send(b).is_err() {
                                break;
                            }
                        }
                        Err(_) => break,
                    }
                }
            });

            Self {
                rx,
                pending: None,
                eof: false,
            }
        }

        fn idle(&self) -> bool {
            self.pending.is_none()
        }
    }

    impl core::fmt::Write for HostIo {
        fn write_str(&mut self, s: &str) -> core::fmt::Result {
            let mut stdout = io::stdout().lock();
            stdout.write_all(s.as_bytes()).map_err(|_| core::fmt::Error)?;
            stdout.flush().map_err(|_| core::fmt::Error)
        }
    }

    impl ConsoleIo for HostIo {
        fn char_ready(&mut self) -> bool {
            if self.pending.is_some() {
                return true;
            }
            match self.rx.try_recv() {
                Ok(b) => {
                    self.pending = Some(b);
                    true
                }
                Err(TryRecvError::Empty) => false,
                Err(TryRecvError::Disconnected) => {
                    self.eof = true;
                    false
                }
            }
        }

        fn read_char(&mut self) -> u8 {
            self.pending.take().unwrap_or(0)
        }

        fn put_char(&mut self, c: u8) {
            let mut stdout = io::stdout().lock();
            let _ = stdout.write_all(&[c]);
            let _ = stdout.flush();
        }
    }

    pub fn run() {
        let mut io = HostIo::new();

        diag_info!(DIAG_LOG, 0, "console up (host mode)");
        drain_log(&mut io);
        console::print_banner(&mut io);

        let mut reader = LineReader::new();
        loop {
            console::service(&mut reader, &mut io);
            drain_log(&mut io);

            if io.eof {
                let _ = core::fmt::Write::write_str(&mut io, "\n");
                break;
            }
            if io.idle() {
                thread::sleep(Duration::from_millis(1));
            }
        }
    }

    fn drain_log(out: &mut dyn core::fmt::Write) {
        while let Some(entry) = DIAG_LOG.drain() {
            logging::write_entry(out, &entry);
        }
    }
}

#[cfg(not(target_os = "none"))]
fn main() {
    host::run();
}
