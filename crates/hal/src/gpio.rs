//! Port A pin configuration for the LED and pushbutton.

use crate::regs::{
    GPIOA_DATA, GPIOA_DEN, GPIOA_DIR, PIN_BUTTON, PIN_LED, RCGC_PORTA, SYSCTL_RCGCGPIO,
};
use crate::RegisterBus;

/// Configure PA2 as the LED output and PA4 as the pushbutton input.
///
/// Every update is a single-bit read-modify-write, so PA0/PA1 keep whatever
/// configuration the UART bring-up gave them. The clock gate write is
/// idempotent when UART init already enabled port A.
pub fn init<B: RegisterBus>(bus: &mut B) {
    bus.modify32(SYSCTL_RCGCGPIO, |v| v | RCGC_PORTA);

    bus.modify32(GPIOA_DIR, |v| v | PIN_LED);
    bus.modify32(GPIOA_DIR, |v| v & !PIN_BUTTON);
    bus.modify32(GPIOA_DEN, |v| v | PIN_LED | PIN_BUTTON);

    // LED starts off.
    bus.modify32(GPIOA_DATA, |v| v & !PIN_LED);
}

/// Live pushbutton level. A nonzero read counts as "pressed"; the board
/// schematic note claims the switch is active low, which contradicts this.
/// Both readings are surfaced in the simulator test suite.
pub fn button_is_high<B: RegisterBus>(bus: &mut B) -> bool {
    bus.read32(GPIOA_DATA) & PIN_BUTTON != 0
}

/// Drive the LED pin without touching any other bit of the data register.
pub fn set_led<B: RegisterBus>(bus: &mut B, on: bool) {
    bus.modify32(GPIOA_DATA, |v| if on { v | PIN_LED } else { v & !PIN_LED });
}
