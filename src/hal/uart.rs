//! LiteX UART CSR driver, bidirectional.
//!
//! Output: echo, prompts, help text, log drain
//! Input: polled console via `char_ready` / `read_char`
//!
//! Register layout from the generated `csr.h` for this SoC.

use core::fmt;
use core::ptr::{read_volatile, write_volatile};

use bitflags::bitflags;
use spin::Mutex;

use super::ConsoleIo;

const CSR_UART_BASE: usize = 0xe000_1000;

const UART_RXTX: *mut u32 = CSR_UART_BASE as *mut u32;
const UART_TXFULL: *mut u32 = (CSR_UART_BASE + 0x04) as *mut u32;
const UART_RXEMPTY: *mut u32 = (CSR_UART_BASE + 0x08) as *mut u32;
const UART_EV_PENDING: *mut u32 = (CSR_UART_BASE + 0x10) as *mut u32;
const UART_EV_ENABLE: *mut u32 = (CSR_UART_BASE + 0x14) as *mut u32;

bitflags! {
    /// UART event bits (`ev_pending` / `ev_enable`)
    pub struct UartEv: u32 {
        const TX = 1 << 0;
        const RX = 1 << 1;
    }
}

/// The one console UART, shared by the loop and the panic handler.
pub static UART: Mutex<Uart> = Mutex::new(Uart::new());

pub struct Uart {
    _priv: (),
}

impl Uart {
    const fn new() -> Self {
        Self { _priv: () }
    }

    /// Bypass the [`UART`] mutex. Only for the panic handler, where the
    /// lock may never be released again.
    pub unsafe fn steal() -> Self {
        Self { _priv: () }
    }

    /// Initialize the UART: acknowledge stale events, enable RX/TX events.
    pub fn init(&self) {
        unsafe {
            write_volatile(UART_EV_PENDING, UartEv::all().bits());
            write_volatile(UART_EV_ENABLE, UartEv::all().bits());
        }
    }

    // ---- Output ----

    fn is_tx_full(&self) -> bool {
        unsafe { read_volatile(UART_TXFULL) != 0 }
    }

    /// Write a single byte, waiting for FIFO space.
    pub fn write_byte(&self, byte: u8) {
        while self.is_tx_full() {
            core::hint::spin_loop();
        }
        unsafe {
            write_volatile(UART_RXTX, byte as u32);
            write_volatile(UART_EV_PENDING, UartEv::TX.bits());
        }
    }

    /// Write a string, expanding `\n` to `\r\n` for the terminal.
    pub fn write_str_raw(&self, s: &str) {
        for byte in s.bytes() {
            if byte == b'\n' {
                self.write_byte(b'\r');
            }
            self.write_byte(byte);
        }
    }

    // ---- Input ----

    /// Check if a received byte is waiting (non-blocking).
    pub fn has_data(&self) -> bool {
        unsafe { read_volatile(UART_RXEMPTY) == 0 }
    }

    /// Read a received byte and acknowledge the RX event.
    /// Only valid when `has_data` returned `true`.
    pub fn read_byte(&self) -> u8 {
        unsafe {
            let byte = read_volatile(UART_RXTX) as u8;
            write_volatile(UART_EV_PENDING, UartEv::RX.bits());
            byte
        }
    }
}

impl fmt::Write for Uart {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.write_str_raw(s);
        Ok(())
    }
}

/// [`ConsoleIo`] handle over the shared [`UART`].
///
/// Locks per operation so the panic handler is never starved by a handle
/// held across the whole loop.
pub struct SerialPort {
    _priv: (),
}

impl SerialPort {
    pub const fn new() -> Self {
        Self { _priv: () }
    }

    pub fn init(&self) {
        UART.lock().init();
    }
}

impl fmt::Write for SerialPort {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        UART.lock().write_str_raw(s);
        Ok(())
    }
}

impl ConsoleIo for SerialPort {
    fn char_ready(&mut self) -> bool {
        UART.lock().has_data()
    }

    fn read_char(&mut self) -> u8 {
        UART.lock().read_byte()
    }

    fn put_char(&mut self, c: u8) {
        UART.lock().write_byte(c);
    }
}
