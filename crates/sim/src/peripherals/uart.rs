use super::Peripheral;
use polarled_hal::regs::UartFlags;
use std::collections::VecDeque;

// Offsets relative to the UART0 base.
const DR: u32 = 0x000;
const FR: u32 = 0x018;
const IBRD: u32 = 0x024;
const FBRD: u32 = 0x028;
const LCRH: u32 = 0x02C;
const CTL: u32 = 0x030;

/// UART0 model: real configuration registers, a scripted receive queue and
/// a transmit capture log. The flag register is computed, not stored.
#[derive(Debug, Default, serde::Serialize)]
pub struct Uart0 {
    ctl: u32,
    ibrd: u32,
    fbrd: u32,
    lcrh: u32,
    #[serde(skip)]
    rx_queue: VecDeque<u8>,
    tx_log: Vec<u8>,
    tx_busy_reads: u32,
    rx_delay_reads: u32,
}

impl Uart0 {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append bytes to the receive queue.
    pub fn queue_rx(&mut self, bytes: &[u8]) {
        self.rx_queue.extend(bytes.iter().copied());
    }

    /// Everything written to the data register so far.
    pub fn tx_log(&self) -> &[u8] {
        &self.tx_log
    }

    /// Report the transmit FIFO as full for the next `reads` flag reads.
    /// Lets busy-wait exit be verified on a controlled schedule.
    pub fn set_tx_busy_reads(&mut self, reads: u32) {
        self.tx_busy_reads = reads;
    }

    /// Report the receive FIFO as empty for the next `reads` flag reads,
    /// even when data is queued.
    pub fn set_rx_delay_reads(&mut self, reads: u32) {
        self.rx_delay_reads = reads;
    }

    pub fn ibrd(&self) -> u32 {
        self.ibrd
    }

    pub fn fbrd(&self) -> u32 {
        self.fbrd
    }

    pub fn lcrh(&self) -> u32 {
        self.lcrh
    }

    pub fn ctl(&self) -> u32 {
        self.ctl
    }

    fn flags(&mut self) -> u32 {
        let mut fr = UartFlags::empty();

        if self.tx_busy_reads > 0 {
            self.tx_busy_reads -= 1;
            fr |= UartFlags::TXFF;
        }

        if self.rx_delay_reads > 0 {
            self.rx_delay_reads -= 1;
            fr |= UartFlags::RXFE;
        } else if self.rx_queue.is_empty() {
            fr |= UartFlags::RXFE;
        }

        fr.bits()
    }
}

impl Peripheral for Uart0 {
    fn read32(&mut self, offset: u32) -> u32 {
        match offset {
            DR => self.rx_queue.pop_front().map(u32::from).unwrap_or(0),
            FR => self.flags(),
            IBRD => self.ibrd,
            FBRD => self.fbrd,
            LCRH => self.lcrh,
            CTL => self.ctl,
            _ => 0,
        }
    }

    fn write32(&mut self, offset: u32, value: u32) {
        match offset {
            DR => self.tx_log.push((value & 0xFF) as u8),
            IBRD => self.ibrd = value,
            FBRD => self.fbrd = value,
            LCRH => self.lcrh = value,
            CTL => self.ctl = value,
            _ => {}
        }
    }

    fn snapshot(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_register_pops_in_order() {
        let mut uart = Uart0::new();
        uart.queue_rx(b"pn");
        assert_eq!(uart.read32(DR), u32::from(b'p'));
        assert_eq!(uart.read32(DR), u32::from(b'n'));
        // Empty queue reads as zero, like an undefined DR read.
        assert_eq!(uart.read32(DR), 0);
    }

    #[test]
    fn test_rxfe_tracks_queue() {
        let mut uart = Uart0::new();
        assert_ne!(uart.read32(FR) & UartFlags::RXFE.bits(), 0);

        uart.queue_rx(b"p");
        assert_eq!(uart.read32(FR) & UartFlags::RXFE.bits(), 0);

        uart.read32(DR);
        assert_ne!(uart.read32(FR) & UartFlags::RXFE.bits(), 0);
    }

    #[test]
    fn test_scheduled_tx_busy_clears_after_n_reads() {
        let mut uart = Uart0::new();
        uart.set_tx_busy_reads(2);
        assert_ne!(uart.read32(FR) & UartFlags::TXFF.bits(), 0);
        assert_ne!(uart.read32(FR) & UartFlags::TXFF.bits(), 0);
        assert_eq!(uart.read32(FR) & UartFlags::TXFF.bits(), 0);
    }

    #[test]
    fn test_transmit_captured() {
        let mut uart = Uart0::new();
        uart.write32(DR, u32::from(b'O'));
        uart.write32(DR, u32::from(b'K'));
        assert_eq!(uart.tx_log(), b"OK");
    }
}
