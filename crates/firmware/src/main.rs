#![no_std]
#![no_main]

use cortex_m_rt::entry;
use panic_halt as _;

use polarled_hal::{app, Mmio};

#[entry]
fn main() -> ! {
    // UART bring-up first, then the LED/button pins; both touch port A but
    // on disjoint pins, so the order only matters by convention.
    app::run(&mut Mmio)
}
