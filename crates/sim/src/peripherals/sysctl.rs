use super::Peripheral;

// Offsets relative to the SYSCTL base, matching the hal register map.
const RCGCGPIO: u32 = 0x608;
const RCGCUART: u32 = 0x618;

/// Run-mode clock gating registers, reduced to the two this system touches.
#[derive(Debug, Default, serde::Serialize)]
pub struct SysCtl {
    rcgcgpio: u32,
    rcgcuart: u32,
}

impl SysCtl {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn uart0_clock_enabled(&self) -> bool {
        self.rcgcuart & 1 != 0
    }

    pub fn porta_clock_enabled(&self) -> bool {
        self.rcgcgpio & 1 != 0
    }
}

impl Peripheral for SysCtl {
    fn read32(&mut self, offset: u32) -> u32 {
        match offset {
            RCGCGPIO => self.rcgcgpio,
            RCGCUART => self.rcgcuart,
            _ => 0,
        }
    }

    fn write32(&mut self, offset: u32, value: u32) {
        match offset {
            RCGCGPIO => self.rcgcgpio = value,
            RCGCUART => self.rcgcuart = value,
            _ => {}
        }
    }

    fn snapshot(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}
