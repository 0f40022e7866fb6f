use super::Peripheral;

// Offsets relative to the port A base.
const DATA: u32 = 0x3FC;
const DIR: u32 = 0x400;
const AFSEL: u32 = 0x420;
const DEN: u32 = 0x51C;
const PCTL: u32 = 0x52C;

/// GPIO port A model with externally drivable input levels.
///
/// Data reads merge the output latch (for DIR-set pins) with the driven
/// input levels (for DIR-clear pins), so an input pin reads back whatever
/// the test or scenario drives onto it.
#[derive(Debug, Default, serde::Serialize)]
pub struct PortA {
    dir: u32,
    den: u32,
    afsel: u32,
    pctl: u32,
    data: u32,
    inputs: u32,
}

impl PortA {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drive an external level onto the masked pins.
    pub fn drive_input(&mut self, mask: u32, high: bool) {
        if high {
            self.inputs |= mask;
        } else {
            self.inputs &= !mask;
        }
    }

    /// Output latch state for the masked pin.
    pub fn output_high(&self, mask: u32) -> bool {
        self.data & mask != 0
    }

    pub fn dir(&self) -> u32 {
        self.dir
    }

    pub fn den(&self) -> u32 {
        self.den
    }

    pub fn afsel(&self) -> u32 {
        self.afsel
    }

    pub fn pctl(&self) -> u32 {
        self.pctl
    }
}

impl Peripheral for PortA {
    fn read32(&mut self, offset: u32) -> u32 {
        match offset {
            DATA => (self.data & self.dir) | (self.inputs & !self.dir),
            DIR => self.dir,
            AFSEL => self.afsel,
            DEN => self.den,
            PCTL => self.pctl,
            _ => 0,
        }
    }

    fn write32(&mut self, offset: u32, value: u32) {
        match offset {
            // Only the low byte exists; input pins ignore latch writes on
            // read-back via the DIR mask above.
            DATA => self.data = value & 0xFF,
            DIR => self.dir = value,
            AFSEL => self.afsel = value,
            DEN => self.den = value,
            PCTL => self.pctl = value,
            _ => {}
        }
    }

    fn snapshot(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}
