pub mod gpio;
pub mod sysctl;
pub mod uart;

/// Trait representing a simulated memory-mapped peripheral.
///
/// Offsets are relative to the peripheral's base address. Reads take
/// `&mut self` so models can implement read side effects (data-register
/// pops, scheduled status flags).
pub trait Peripheral: std::fmt::Debug {
    fn read32(&mut self, offset: u32) -> u32;
    fn write32(&mut self, offset: u32, value: u32);
    fn snapshot(&self) -> serde_json::Value;
}
