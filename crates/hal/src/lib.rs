#![no_std]

pub mod app;
pub mod gpio;
pub mod regs;
pub mod uart;

/// Trait representing word-granular access to memory-mapped registers.
///
/// Reads take `&mut self`: reading the UART data or flag registers has side
/// effects on real hardware, and the simulated backing store models them.
pub trait RegisterBus {
    fn read32(&mut self, addr: u32) -> u32;
    fn write32(&mut self, addr: u32, value: u32);

    /// Read-modify-write on a single register.
    fn modify32(&mut self, addr: u32, f: impl FnOnce(u32) -> u32)
    where
        Self: Sized,
    {
        let value = self.read32(addr);
        self.write32(addr, f(value));
    }
}

/// Volatile memory-mapped register access for the real part.
///
/// The addresses in [`regs`] are only valid on a TM4C123-class device; this
/// implementation must not be exercised on a host build.
pub struct Mmio;

impl RegisterBus for Mmio {
    fn read32(&mut self, addr: u32) -> u32 {
        unsafe { core::ptr::read_volatile(addr as *const u32) }
    }

    fn write32(&mut self, addr: u32, value: u32) {
        unsafe { core::ptr::write_volatile(addr as *mut u32, value) }
    }
}
