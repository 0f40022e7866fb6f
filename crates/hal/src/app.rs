//! The polling loop: one mode value, one LED, one pushbutton.

use crate::{gpio, uart, RegisterBus};

/// LED drive polarity, selected over the serial link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SystemMode {
    #[default]
    Positive,
    Negative,
}

impl SystemMode {
    /// Interpret a received command byte. Unrecognized bytes select nothing
    /// and are silently dropped.
    pub fn from_command(byte: u8) -> Option<Self> {
        match byte {
            b'p' => Some(Self::Positive),
            b'n' => Some(Self::Negative),
            _ => None,
        }
    }

    /// LED level for the given button reading.
    pub fn led_on(self, button_high: bool) -> bool {
        match self {
            Self::Positive => button_high,
            Self::Negative => !button_high,
        }
    }
}

/// One iteration of the main loop: consume at most one pending command
/// byte, then recompute the LED from the live button level. The LED write
/// happens on every iteration, byte or no byte.
pub fn poll_once<B: RegisterBus>(bus: &mut B, mode: &mut SystemMode) {
    if uart::rx_ready(bus) {
        if let Some(selected) = SystemMode::from_command(uart::read_byte(bus)) {
            *mode = selected;
        }
    }

    let button_high = gpio::button_is_high(bus);
    gpio::set_led(bus, mode.led_on(button_high));
}

/// Firmware entry: bring up the peripherals, then poll forever. There is no
/// terminal state; only reset or power-off ends the loop.
pub fn run<B: RegisterBus>(bus: &mut B) -> ! {
    uart::init(bus);
    gpio::init(bus);

    let mut mode = SystemMode::default();
    loop {
        poll_once(bus, &mut mode);
    }
}
