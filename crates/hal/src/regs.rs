//! TM4C123 register map for the three peripherals this firmware touches.
//!
//! Addresses and bit positions are fixed by the part's datasheet and encoded
//! as compile-time constants; nothing is discovered at runtime.

pub const SYSCTL_BASE: u32 = 0x400F_E000;
pub const SYSCTL_RCGCGPIO: u32 = SYSCTL_BASE + 0x608;
pub const SYSCTL_RCGCUART: u32 = SYSCTL_BASE + 0x618;

/// Run-mode clock gate, UART module 0.
pub const RCGC_UART0: u32 = 1 << 0;
/// Run-mode clock gate, GPIO port A.
pub const RCGC_PORTA: u32 = 1 << 0;

pub const GPIOA_BASE: u32 = 0x4000_4000;
/// Offset 0x3FC aliases all eight data bits.
pub const GPIOA_DATA: u32 = GPIOA_BASE + 0x3FC;
pub const GPIOA_DIR: u32 = GPIOA_BASE + 0x400;
pub const GPIOA_AFSEL: u32 = GPIOA_BASE + 0x420;
pub const GPIOA_DEN: u32 = GPIOA_BASE + 0x51C;
pub const GPIOA_PCTL: u32 = GPIOA_BASE + 0x52C;

pub const PIN_UART_RX: u32 = 1 << 0; // PA0, U0Rx
pub const PIN_UART_TX: u32 = 1 << 1; // PA1, U0Tx
pub const PIN_LED: u32 = 1 << 2; // PA2
pub const PIN_BUTTON: u32 = 1 << 4; // PA4

/// PA0/PA1 port-control nibbles.
pub const PCTL_UART_PINS_MASK: u32 = 0x0000_00FF;
/// Alternate function 1 (UART0) on both pins.
pub const PCTL_UART_PINS_UART: u32 = 0x0000_0011;

pub const UART0_BASE: u32 = 0x4000_C000;
pub const UART0_DR: u32 = UART0_BASE + 0x000;
pub const UART0_FR: u32 = UART0_BASE + 0x018;
pub const UART0_IBRD: u32 = UART0_BASE + 0x024;
pub const UART0_FBRD: u32 = UART0_BASE + 0x028;
pub const UART0_LCRH: u32 = UART0_BASE + 0x02C;
pub const UART0_CTL: u32 = UART0_BASE + 0x030;

bitflags::bitflags! {
    /// UARTFR status bits.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct UartFlags: u32 {
        /// Receive FIFO empty.
        const RXFE = 1 << 4;
        /// Transmit FIFO full.
        const TXFF = 1 << 5;
    }

    /// UARTCTL control bits.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct UartControl: u32 {
        const UARTEN = 1 << 0;
        const TXE = 1 << 8;
        const RXE = 1 << 9;
    }

    /// UARTLCRH line-control bits.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct LineControl: u32 {
        /// 8 data bits.
        const WLEN_8 = 0x3 << 5;
        /// FIFO enable. Left clear: single-byte holding registers.
        const FEN = 1 << 4;
    }
}
