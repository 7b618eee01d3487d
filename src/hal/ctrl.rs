//! SoC control: reset register, interrupt bootstrap, cycle counter.

use core::arch::asm;
use core::ptr::write_volatile;

const CSR_CTRL_BASE: usize = 0xe000_0000;
const CTRL_RESET: *mut u32 = CSR_CTRL_BASE as *mut u32;

/// Trigger a CPU reset through the SoC control register.
///
/// Does not return; the write takes effect within a few cycles and the spin
/// below only covers the gap.
pub fn reboot() -> ! {
    unsafe {
        write_volatile(CTRL_RESET, 1);
    }
    loop {
        core::hint::spin_loop();
    }
}

/// Set the VexRiscv external interrupt mask CSR.
pub fn irq_set_mask(mask: u32) {
    unsafe {
        asm!("csrw 0xbc0, {0}", in(reg) mask);
    }
}

/// Enable or disable machine interrupts (`mstatus.MIE`).
pub fn irq_set_ie(enable: bool) {
    unsafe {
        if enable {
            asm!("csrsi mstatus, 8");
        } else {
            asm!("csrci mstatus, 8");
        }
    }
}

/// Cycle counter since reset (log timestamps).
pub fn cycles() -> u64 {
    loop {
        let hi: u32;
        let lo: u32;
        let hi2: u32;
        unsafe {
            asm!("csrr {0}, cycleh", out(reg) hi);
            asm!("csrr {0}, cycle", out(reg) lo);
            asm!("csrr {0}, cycleh", out(reg) hi2);
        }
        if hi == hi2 {
            return ((hi as u64) << 32) | lo as u64;
        }
    }
}
