use crate::peripherals::{gpio::PortA, sysctl::SysCtl, uart::Uart0, Peripheral};
use polarled_hal::regs::{GPIOA_BASE, PIN_BUTTON, PIN_LED, SYSCTL_BASE, UART0_BASE};
use polarled_hal::RegisterBus;

// Each peripheral owns a 4 KiB aperture, as on the real part.
const APERTURE: u32 = 0x1000;

/// In-memory register backing store for the firmware's polling loop.
///
/// Implements [`RegisterBus`] by dispatching absolute addresses to the three
/// peripheral models. Unmapped accesses are logged and read as zero.
#[derive(Debug, Default)]
pub struct Board {
    pub sysctl: SysCtl,
    pub uart0: Uart0,
    pub porta: PortA,
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    fn route(&mut self, addr: u32) -> Option<(&mut dyn Peripheral, u32)> {
        if (SYSCTL_BASE..SYSCTL_BASE + APERTURE).contains(&addr) {
            return Some((&mut self.sysctl, addr - SYSCTL_BASE));
        }
        if (UART0_BASE..UART0_BASE + APERTURE).contains(&addr) {
            return Some((&mut self.uart0, addr - UART0_BASE));
        }
        if (GPIOA_BASE..GPIOA_BASE + APERTURE).contains(&addr) {
            return Some((&mut self.porta, addr - GPIOA_BASE));
        }
        None
    }

    /// Queue serial bytes for the UART receive path.
    pub fn push_serial(&mut self, bytes: &[u8]) {
        self.uart0.queue_rx(bytes);
    }

    /// Drive the pushbutton pin to the given level.
    pub fn set_button(&mut self, high: bool) {
        self.porta.drive_input(PIN_BUTTON, high);
    }

    pub fn led_is_on(&self) -> bool {
        self.porta.output_high(PIN_LED)
    }

    pub fn tx_output(&self) -> &[u8] {
        self.uart0.tx_log()
    }

    pub fn snapshot(&self) -> serde_json::Value {
        serde_json::json!({
            "sysctl": self.sysctl.snapshot(),
            "uart0": self.uart0.snapshot(),
            "porta": self.porta.snapshot(),
        })
    }
}

impl RegisterBus for Board {
    fn read32(&mut self, addr: u32) -> u32 {
        match self.route(addr) {
            Some((dev, offset)) => dev.read32(offset),
            None => {
                tracing::warn!("read from unmapped register {:#010x}", addr);
                0
            }
        }
    }

    fn write32(&mut self, addr: u32, value: u32) {
        match self.route(addr) {
            Some((dev, offset)) => dev.write32(offset, value),
            None => {
                tracing::warn!("write to unmapped register {:#010x} (value {:#x})", addr, value);
            }
        }
    }
}
