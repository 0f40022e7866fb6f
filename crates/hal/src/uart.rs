//! UART0 bring-up and blocking byte I/O.

use crate::regs::{
    LineControl, UartControl, UartFlags, GPIOA_AFSEL, GPIOA_DEN, GPIOA_PCTL, PCTL_UART_PINS_MASK,
    PCTL_UART_PINS_UART, PIN_UART_RX, PIN_UART_TX, RCGC_PORTA, RCGC_UART0, SYSCTL_RCGCGPIO,
    SYSCTL_RCGCUART, UART0_CTL, UART0_DR, UART0_FBRD, UART0_FR, UART0_IBRD, UART0_LCRH,
};
use crate::RegisterBus;

/// Reference clock feeding the baud generator.
pub const UART_CLOCK_HZ: u32 = 16_000_000;
pub const BAUD_RATE: u32 = 9_600;

/// Integer and fractional baud-rate divisors for the given clock and rate.
///
/// Actual baud = clock / (16 * (ibrd + fbrd / 64)); the fractional part is
/// rounded to the nearest 1/64 step. Integer arithmetic only.
pub fn baud_divisors(clock_hz: u32, baud: u32) -> (u32, u32) {
    let denom = 16 * baud;
    let ibrd = clock_hz / denom;
    let fbrd = ((clock_hz % denom) * 64 + denom / 2) / denom;
    (ibrd, fbrd)
}

/// Bring UART0 up at 9600-8N1 from the 16 MHz reference.
///
/// The UART is held disabled while the divisor and line-control registers
/// are rewritten; the hardware corrupts in-flight traffic otherwise. There
/// is no completion probing: a missing peripheral is undetectable here.
pub fn init<B: RegisterBus>(bus: &mut B) {
    bus.modify32(SYSCTL_RCGCUART, |v| v | RCGC_UART0);
    bus.modify32(SYSCTL_RCGCGPIO, |v| v | RCGC_PORTA);

    bus.modify32(GPIOA_AFSEL, |v| v | PIN_UART_RX | PIN_UART_TX);
    bus.modify32(GPIOA_PCTL, |v| {
        (v & !PCTL_UART_PINS_MASK) | PCTL_UART_PINS_UART
    });
    bus.modify32(GPIOA_DEN, |v| v | PIN_UART_RX | PIN_UART_TX);

    bus.modify32(UART0_CTL, |v| v & !UartControl::UARTEN.bits());

    let (ibrd, fbrd) = baud_divisors(UART_CLOCK_HZ, BAUD_RATE);
    bus.write32(UART0_IBRD, ibrd);
    bus.write32(UART0_FBRD, fbrd);

    // 8 data bits, 1 stop bit, no parity, FIFOs off.
    bus.write32(UART0_LCRH, LineControl::WLEN_8.bits());

    bus.write32(
        UART0_CTL,
        (UartControl::UARTEN | UartControl::TXE | UartControl::RXE).bits(),
    );
}

/// Whether a received byte is waiting in the data register.
pub fn rx_ready<B: RegisterBus>(bus: &mut B) -> bool {
    !UartFlags::from_bits_truncate(bus.read32(UART0_FR)).contains(UartFlags::RXFE)
}

/// Blocking receive: spins until data is available, then reads one byte.
/// No timeout; the main loop gates on [`rx_ready`] before calling this.
pub fn read_byte<B: RegisterBus>(bus: &mut B) -> u8 {
    while !rx_ready(bus) {}
    (bus.read32(UART0_DR) & 0xFF) as u8
}

/// Blocking transmit: spins while the transmit FIFO is full. No timeout.
pub fn write_byte<B: RegisterBus>(bus: &mut B, byte: u8) {
    while UartFlags::from_bits_truncate(bus.read32(UART0_FR)).contains(UartFlags::TXFF) {}
    bus.write32(UART0_DR, byte as u32);
}

#[cfg(test)]
mod tests {
    use super::baud_divisors;

    #[test]
    fn divisors_for_9600_at_16_mhz() {
        assert_eq!(baud_divisors(16_000_000, 9_600), (104, 11));
    }

    #[test]
    fn divisors_follow_the_formula_at_other_rates() {
        // 16 MHz / 115200 = 8.6805..., 0.6805 * 64 = 43.55 -> 44
        assert_eq!(baud_divisors(16_000_000, 115_200), (8, 44));
        // 48 MHz / 9600 = 312.5, 0.5 * 64 = 32 exactly
        assert_eq!(baud_divisors(48_000_000, 9_600), (312, 32));
        // 16 MHz / 38400 = 26.0417, 0.0417 * 64 = 2.67 -> 3
        assert_eq!(baud_divisors(16_000_000, 38_400), (26, 3));
    }

    #[test]
    fn exact_divisions_have_no_fractional_part() {
        assert_eq!(baud_divisors(16_000_000, 125_000), (8, 0));
    }
}
