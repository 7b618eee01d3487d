//! Deferred diagnostic logging.
//!
//! The console loop must stay responsive, so nothing formats or writes to
//! the UART at the point where an event happens. Events go into a wait-free
//! static ring and the loop drains them to the UART between polls.
//!
//! ```text
//! diag_info!() ────▶ [E0][E1][E2] ────▶ UART TX
//! wait-free           static ring        loop drain
//! ```
//!
//! Messages are dropped (and counted) when the ring is full.

use core::cell::UnsafeCell;
use core::sync::atomic::{AtomicU32, Ordering};

/// Maximum message length.
pub const MAX_MSG_LEN: usize = 96;

/// Default ring size (number of entries).
pub const LOG_RING_SIZE: usize = 32;

/// Log level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum LogLevel {
    Error = 0,
    Warn = 1,
    Info = 2,
    Debug = 3,
}

impl LogLevel {
    /// Convert to string for output.
    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Error => "ERROR",
            LogLevel::Warn => "WARN",
            LogLevel::Info => "INFO",
            LogLevel::Debug => "DEBUG",
        }
    }
}

/// A single log entry.
#[derive(Clone, Copy)]
pub struct LogEntry {
    /// Cycle counter value at push time.
    pub ticks: u64,
    /// Log level.
    pub level: LogLevel,
    /// Message length.
    pub len: u8,
    /// Message bytes (not null-terminated).
    pub msg: [u8; MAX_MSG_LEN],
}

impl LogEntry {
    /// Message as text.
    pub fn text(&self) -> &str {
        core::str::from_utf8(&self.msg[..self.len as usize]).unwrap_or("<invalid utf8>")
    }
}

const EMPTY_ENTRY: LogEntry = LogEntry {
    ticks: 0,
    level: LogLevel::Info,
    len: 0,
    msg: [0; MAX_MSG_LEN],
};

/// Wait-free diagnostic log ring.
///
/// Single producer (the console loop), single consumer (the UART drain).
/// Indices are atomic so the static instance stays sound if a drain ever
/// moves off the producer's thread.
pub struct DiagLog<const N: usize = LOG_RING_SIZE> {
    entries: UnsafeCell<[LogEntry; N]>,
    write_idx: AtomicU32,
    read_idx: AtomicU32,
    dropped: AtomicU32,
}

// SAFETY: the producer publishes a slot only after filling it (release
// store on write_idx); the consumer only touches slots behind write_idx.
unsafe impl<const N: usize> Sync for DiagLog<N> {}
unsafe impl<const N: usize> Send for DiagLog<N> {}

impl<const N: usize> DiagLog<N> {
    const MASK: usize = N - 1;

    /// Create a new empty log ring.
    pub const fn new() -> Self {
        assert!(N.is_power_of_two(), "log ring size must be power of 2");

        Self {
            entries: UnsafeCell::new([EMPTY_ENTRY; N]),
            write_idx: AtomicU32::new(0),
            read_idx: AtomicU32::new(0),
            dropped: AtomicU32::new(0),
        }
    }

    /// Push a log entry. Never blocks.
    ///
    /// Returns `true` if the entry was queued, `false` if dropped.
    #[inline]
    pub fn push(&self, ticks: u64, level: LogLevel, msg: &[u8]) -> bool {
        let write = self.write_idx.load(Ordering::Relaxed);
        let read = self.read_idx.load(Ordering::Acquire);

        if write.wrapping_sub(read) >= N as u32 {
            self.dropped.fetch_add(1, Ordering::Relaxed);
            return false;
        }

        let idx = (write as usize) & Self::MASK;

        // SAFETY: the slot is not yet published; the consumer cannot see it
        // until the store on write_idx below.
        unsafe {
            let entry = &mut (*self.entries.get())[idx];
            entry.ticks = ticks;
            entry.level = level;
            entry.len = msg.len().min(MAX_MSG_LEN) as u8;
            entry.msg[..entry.len as usize].copy_from_slice(&msg[..entry.len as usize]);
        }

        self.write_idx.store(write.wrapping_add(1), Ordering::Release);
        true
    }

    /// Drain the next log entry, if any.
    #[inline]
    pub fn drain(&self) -> Option<LogEntry> {
        let read = self.read_idx.load(Ordering::Relaxed);
        let write = self.write_idx.load(Ordering::Acquire);

        if read == write {
            return None;
        }

        let idx = (read as usize) & Self::MASK;

        // SAFETY: single consumer, slot is behind write_idx.
        let entry = unsafe { (*self.entries.get())[idx] };

        self.read_idx.store(read.wrapping_add(1), Ordering::Release);
        Some(entry)
    }

    /// Number of entries waiting to be drained.
    #[inline]
    pub fn pending(&self) -> u32 {
        let read = self.read_idx.load(Ordering::Relaxed);
        let write = self.write_idx.load(Ordering::Acquire);
        write.wrapping_sub(read)
    }

    /// Count of dropped messages.
    #[inline]
    pub fn dropped(&self) -> u32 {
        self.dropped.load(Ordering::Relaxed)
    }

    /// Reset the dropped counter after reporting it.
    #[inline]
    pub fn reset_dropped(&self) {
        self.dropped.store(0, Ordering::Relaxed);
    }
}

impl<const N: usize> Default for DiagLog<N> {
    fn default() -> Self {
        Self::new()
    }
}

/// Format a message into a buffer.
///
/// Returns the number of bytes written; output is truncated to fit.
#[inline]
pub fn format_to_buffer(buf: &mut [u8], args: core::fmt::Arguments<'_>) -> usize {
    use core::fmt::Write;

    struct BufWriter<'a> {
        buf: &'a mut [u8],
        pos: usize,
    }

    impl<'a> Write for BufWriter<'a> {
        fn write_str(&mut self, s: &str) -> core::fmt::Result {
            let bytes = s.as_bytes();
            let remaining = self.buf.len() - self.pos;
            let to_write = bytes.len().min(remaining);
            self.buf[self.pos..self.pos + to_write].copy_from_slice(&bytes[..to_write]);
            self.pos += to_write;
            Ok(())
        }
    }

    let mut writer = BufWriter { buf, pos: 0 };
    let _ = core::fmt::write(&mut writer, args);
    writer.pos
}

/// Write one drained entry to the output sink.
///
/// Format: `[ticks] LEVEL: message`
pub fn write_entry(out: &mut dyn core::fmt::Write, entry: &LogEntry) {
    let _ = writeln!(
        out,
        "[{:>10}] {}: {}",
        entry.ticks,
        entry.level.as_str(),
        entry.text()
    );
}

/// Push a formatted entry into a [`DiagLog`].
#[macro_export]
macro_rules! diag_log {
    ($level:expr, $log:expr, $ticks:expr, $($arg:tt)*) => {{
        let mut buf = [0u8; $crate::logging::MAX_MSG_LEN];
        let len = $crate::logging::format_to_buffer(&mut buf, format_args!($($arg)*));
        $log.push($ticks, $level, &buf[..len]);
    }};
}

/// Info-level diagnostic log.
#[macro_export]
macro_rules! diag_info {
    ($log:expr, $ticks:expr, $($arg:tt)*) => {
        $crate::diag_log!($crate::logging::LogLevel::Info, $log, $ticks, $($arg)*)
    };
}

/// Warn-level diagnostic log.
#[macro_export]
macro_rules! diag_warn {
    ($log:expr, $ticks:expr, $($arg:tt)*) => {
        $crate::diag_log!($crate::logging::LogLevel::Warn, $log, $ticks, $($arg)*)
    };
}

/// Error-level diagnostic log.
#[macro_export]
macro_rules! diag_error {
    ($log:expr, $ticks:expr, $($arg:tt)*) => {
        $crate::diag_log!($crate::logging::LogLevel::Error, $log, $ticks, $($arg)*)
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_and_drain() {
        let log = DiagLog::<8>::new();

        assert!(log.push(1000, LogLevel::Info, b"uart ready"));
        assert_eq!(log.pending(), 1);

        let entry = log.drain().unwrap();
        assert_eq!(entry.ticks, 1000);
        assert_eq!(entry.level, LogLevel::Info);
        assert_eq!(entry.text(), "uart ready");

        assert_eq!(log.pending(), 0);
        assert!(log.drain().is_none());
    }

    #[test]
    fn test_drops_when_full() {
        let log = DiagLog::<4>::new();

        for i in 0..4 {
            assert!(log.push(i, LogLevel::Info, b"x"));
        }
        assert!(!log.push(4, LogLevel::Info, b"overflow"));
        assert_eq!(log.dropped(), 1);

        log.drain();
        assert!(log.push(5, LogLevel::Info, b"fits again"));

        log.reset_dropped();
        assert_eq!(log.dropped(), 0);
    }

    #[test]
    fn test_macro_formats_message() {
        let log = DiagLog::<8>::new();

        diag_warn!(log, 42, "memtest: {} errors", 3);

        let entry = log.drain().unwrap();
        assert_eq!(entry.level, LogLevel::Warn);
        assert_eq!(entry.text(), "memtest: 3 errors");
    }

    #[test]
    fn test_long_message_truncated() {
        let log = DiagLog::<8>::new();
        let long = [b'a'; 200];

        assert!(log.push(0, LogLevel::Debug, &long));
        let entry = log.drain().unwrap();
        assert_eq!(entry.len as usize, MAX_MSG_LEN);
    }

    #[test]
    fn test_write_entry_format() {
        let entry = LogEntry {
            ticks: 1234567,
            level: LogLevel::Error,
            len: 4,
            msg: {
                let mut msg = [0u8; MAX_MSG_LEN];
                msg[..4].copy_from_slice(b"boom");
                msg
            },
        };

        let mut out = String::new();
        write_entry(&mut out, &entry);

        assert!(out.contains("1234567"));
        assert!(out.contains("ERROR"));
        assert!(out.contains("boom"));
    }
}
