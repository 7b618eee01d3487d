//! SDRAM self-test.
//!
//! Three LiteX-style passes over a memory window:
//! - bus: alternating 0x55555555 / 0xAAAAAAAA patterns, catches shorted or
//!   stuck data lines
//! - addr: each word holds its own index, catches address aliasing
//! - data: pseudo-random fill from a 32-bit LFSR, catches cell faults
//!
//! The test is synchronous and blocks the console loop until it completes.
//! On target it runs against the SDRAM aperture; elsewhere any `[u32]`
//! slice serves as the window.

/// Word-addressed window the test runs over.
pub trait MemoryWindow {
    /// Window size in 32-bit words.
    fn words(&self) -> usize;

    /// Write one word at a word index.
    fn write_word(&mut self, idx: usize, value: u32);

    /// Read one word at a word index.
    fn read_word(&self, idx: usize) -> u32;
}

impl MemoryWindow for [u32] {
    fn words(&self) -> usize {
        self.len()
    }

    fn write_word(&mut self, idx: usize, value: u32) {
        self[idx] = value;
    }

    fn read_word(&self, idx: usize) -> u32 {
        self[idx]
    }
}

/// Per-pass error counts for one full run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MemtestReport {
    /// Window size in words.
    pub words: usize,
    pub bus_errors: usize,
    pub addr_errors: usize,
    pub data_errors: usize,
}

impl MemtestReport {
    pub fn is_ok(&self) -> bool {
        self.bus_errors == 0 && self.addr_errors == 0 && self.data_errors == 0
    }

    pub fn total_errors(&self) -> usize {
        self.bus_errors + self.addr_errors + self.data_errors
    }
}

const BUS_PATTERNS: [u32; 2] = [0x5555_5555, 0xAAAA_AAAA];

/// Words covered by the bus pass; line faults show up within a few words.
const BUS_PASS_WORDS: usize = 64;

const DATA_SEED: u32 = 0x1234_5678;

/// 32-bit Galois LFSR step.
fn lfsr_next(state: u32) -> u32 {
    let lsb = state & 1;
    let mut next = state >> 1;
    if lsb != 0 {
        next ^= 0x8020_0003;
    }
    next
}

/// Bus pattern pass. Returns the error count.
pub fn bus_pass<M: MemoryWindow + ?Sized>(mem: &mut M) -> usize {
    let words = mem.words().min(BUS_PASS_WORDS);
    let mut errors = 0;

    for pattern in BUS_PATTERNS {
        for i in 0..words {
            mem.write_word(i, pattern);
        }
        for i in 0..words {
            if mem.read_word(i) != pattern {
                errors += 1;
            }
        }
    }

    errors
}

/// Address-in-address pass. Returns the error count.
pub fn addr_pass<M: MemoryWindow + ?Sized>(mem: &mut M) -> usize {
    let words = mem.words();
    let mut errors = 0;

    for i in 0..words {
        mem.write_word(i, i as u32);
    }
    for i in 0..words {
        if mem.read_word(i) != i as u32 {
            errors += 1;
        }
    }

    errors
}

/// Pseudo-random data pass. Returns the error count.
pub fn data_pass<M: MemoryWindow + ?Sized>(mem: &mut M) -> usize {
    let words = mem.words();
    let mut errors = 0;

    let mut state = DATA_SEED;
    for i in 0..words {
        state = lfsr_next(state);
        mem.write_word(i, state);
    }

    // Replay the same sequence for the read-back compare
    let mut state = DATA_SEED;
    for i in 0..words {
        state = lfsr_next(state);
        if mem.read_word(i) != state {
            errors += 1;
        }
    }

    errors
}

/// Run all three passes and collect the report.
pub fn run<M: MemoryWindow + ?Sized>(mem: &mut M) -> MemtestReport {
    MemtestReport {
        words: mem.words(),
        bus_errors: bus_pass(&mut *mem),
        addr_errors: addr_pass(&mut *mem),
        data_errors: data_pass(&mut *mem),
    }
}

/// SDRAM aperture on the SoC (volatile MMIO access).
#[cfg(target_arch = "riscv32")]
pub struct MmioWindow {
    base: *mut u32,
    words: usize,
}

#[cfg(target_arch = "riscv32")]
impl MmioWindow {
    const MAIN_RAM_BASE: usize = 0x4000_0000;
    const MEMTEST_WORDS: usize = 0x1_0000; // 256 KiB window

    /// Window over the start of main SDRAM.
    ///
    /// # Safety
    ///
    /// The test overwrites the window; the caller must ensure no live data
    /// (code, stack, heap) resides in it.
    pub unsafe fn main_ram() -> Self {
        Self {
            base: Self::MAIN_RAM_BASE as *mut u32,
            words: Self::MEMTEST_WORDS,
        }
    }
}

#[cfg(target_arch = "riscv32")]
impl MemoryWindow for MmioWindow {
    fn words(&self) -> usize {
        self.words
    }

    fn write_word(&mut self, idx: usize, value: u32) {
        debug_assert!(idx < self.words);
        unsafe { core::ptr::write_volatile(self.base.add(idx), value) }
    }

    fn read_word(&self, idx: usize) -> u32 {
        debug_assert!(idx < self.words);
        unsafe { core::ptr::read_volatile(self.base.add(idx)) }
    }
}
