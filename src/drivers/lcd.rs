//! 16x2 HD44780 character LCD behind a PCF8574 I²C backpack.
//!
//! The backpack maps its 8 output bits onto the LCD as
//! `D7 D6 D5 D4 BL EN RW RS`, so every byte goes out as two 4-bit nibbles,
//! each latched by pulsing EN:
//!
//! ```text
//!   byte 0xA5, data (RS=1):  [0xA0|BL|EN|RS] [0xA0|BL|RS] [0x50|BL|EN|RS] [0x50|BL|RS]
//! ```
//!
//! Generic over `embedded-hal` 1.0 `I2c` + `DelayNs`, so the same code runs
//! on the ESP-IDF `I2cDriver` and on a recording mock in tests.

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;
use log::{info, warn};

use crate::app::ports::DisplayPort;

/// Visible characters per row.
pub const COLUMNS: usize = 16;

const BACKLIGHT: u8 = 0x08;
const ENABLE: u8 = 0x04;
const MODE_COMMAND: u8 = 0x00;
const MODE_DATA: u8 = 0x01;

const CMD_CLEAR: u8 = 0x01;
const CMD_ENTRY_INCREMENT: u8 = 0x06;
const CMD_DISPLAY_ON: u8 = 0x0C;
const CMD_FUNCTION_4BIT_2LINE: u8 = 0x28;
const CMD_SET_DDRAM_ROW0: u8 = 0x80;
const CMD_SET_DDRAM_ROW1: u8 = 0xC0;

pub struct Lcd1602<I, D> {
    i2c: I,
    delay: D,
    address: u8,
}

impl<I: I2c, D: DelayNs> Lcd1602<I, D> {
    pub fn new(i2c: I, delay: D, address: u8) -> Self {
        Self {
            i2c,
            delay,
            address,
        }
    }

    /// Power-on sequence: force 8-bit mode twice, drop to 4-bit, then
    /// configure two lines, display on, cursor off, and clear.
    pub fn init(&mut self) -> Result<(), I::Error> {
        info!("LCD: initialising at 0x{:02X}", self.address);
        self.delay.delay_ms(50);

        self.command(0x33)?;
        self.delay.delay_ms(5);
        self.command(0x32)?;
        self.delay.delay_ms(5);

        for cmd in [
            CMD_FUNCTION_4BIT_2LINE,
            CMD_DISPLAY_ON,
            CMD_ENTRY_INCREMENT,
        ] {
            self.command(cmd)?;
            self.delay.delay_ms(1);
        }
        self.command(CMD_CLEAR)?;
        self.delay.delay_ms(2);
        Ok(())
    }

    pub fn try_clear(&mut self) -> Result<(), I::Error> {
        self.command(CMD_CLEAR)?;
        // Clear is the slowest HD44780 instruction.
        self.delay.delay_ms(2);
        Ok(())
    }

    pub fn set_cursor(&mut self, col: u8, row: u8) -> Result<(), I::Error> {
        let base = if row == 0 {
            CMD_SET_DDRAM_ROW0
        } else {
            CMD_SET_DDRAM_ROW1
        };
        self.command(base + col)
    }

    /// Write exactly one row: `text` truncated or space-padded to 16.
    pub fn print_line(&mut self, text: &str) -> Result<(), I::Error> {
        let mut bytes = text.bytes().chain(core::iter::repeat(b' '));
        for _ in 0..COLUMNS {
            let b = bytes.next().unwrap_or(b' ');
            self.send(b, MODE_DATA)?;
        }
        Ok(())
    }

    pub fn release(self) -> (I, D) {
        (self.i2c, self.delay)
    }

    fn command(&mut self, cmd: u8) -> Result<(), I::Error> {
        self.send(cmd, MODE_COMMAND)
    }

    fn send(&mut self, byte: u8, mode: u8) -> Result<(), I::Error> {
        let high = byte & 0xF0;
        let low = (byte << 4) & 0xF0;
        let frame = [
            high | mode | BACKLIGHT | ENABLE,
            high | mode | BACKLIGHT,
            low | mode | BACKLIGHT | ENABLE,
            low | mode | BACKLIGHT,
        ];
        self.i2c.write(self.address, &frame)
    }
}

impl<I: I2c, D: DelayNs> DisplayPort for Lcd1602<I, D> {
    fn clear(&mut self) {
        if let Err(e) = self.try_clear() {
            warn!("LCD clear failed: {:?}", e);
        }
    }

    fn write_line(&mut self, row: u8, text: &str) {
        let result = self
            .set_cursor(0, row)
            .and_then(|()| self.print_line(text));
        if let Err(e) = result {
            warn!("LCD write failed: {:?}", e);
        }
    }
}

/// Probe every 7-bit address with a one-byte write and log who answers.
pub fn scan_bus<I: I2c>(i2c: &mut I) -> heapless::Vec<u8, 16> {
    info!("I2C scanner: scanning bus...");
    let mut found = heapless::Vec::new();
    for addr in 1u8..127 {
        if i2c.write(addr, &[0]).is_ok() {
            info!("I2C device found at address 0x{:02X}", addr);
            if found.push(addr).is_err() {
                break;
            }
        }
    }
    if found.is_empty() {
        warn!("No I2C devices found, check wiring");
    } else {
        info!("Found {} I2C device(s)", found.len());
    }
    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal::i2c::{ErrorKind, ErrorType, Operation};

    /// Records every write; acks only `present`.
    struct MockBus {
        present: u8,
        writes: Vec<(u8, Vec<u8>)>,
    }

    impl MockBus {
        fn new(present: u8) -> Self {
            Self {
                present,
                writes: Vec::new(),
            }
        }

        /// Reassemble the bytes sent to the LCD from the nibble frames.
        fn decoded(&self) -> Vec<(u8, u8)> {
            self.writes
                .iter()
                .map(|(_, f)| ((f[0] & 0xF0) | (f[2] >> 4), f[1] & MODE_DATA))
                .collect()
        }
    }

    impl ErrorType for MockBus {
        type Error = ErrorKind;
    }

    impl I2c for MockBus {
        fn transaction(
            &mut self,
            address: u8,
            operations: &mut [Operation<'_>],
        ) -> Result<(), Self::Error> {
            if address != self.present {
                return Err(ErrorKind::NoAcknowledge(
                    embedded_hal::i2c::NoAcknowledgeSource::Address,
                ));
            }
            for op in operations {
                if let Operation::Write(bytes) = op {
                    self.writes.push((address, bytes.to_vec()));
                }
            }
            Ok(())
        }
    }

    struct NoDelay;

    impl DelayNs for NoDelay {
        fn delay_ns(&mut self, _ns: u32) {}
    }

    fn lcd() -> Lcd1602<MockBus, NoDelay> {
        Lcd1602::new(MockBus::new(0x27), NoDelay, 0x27)
    }

    #[test]
    fn send_splits_nibbles_with_enable_pulse() {
        let mut lcd = lcd();
        lcd.send(0xA5, MODE_DATA).unwrap();
        let (bus, _) = lcd.release();
        assert_eq!(bus.writes, vec![(0x27, vec![0xAD, 0xA9, 0x5D, 0x59])]);
    }

    #[test]
    fn init_sequence() {
        let mut lcd = lcd();
        lcd.init().unwrap();
        let (bus, _) = lcd.release();
        let cmds: Vec<u8> = bus.decoded().into_iter().map(|(b, _)| b).collect();
        assert_eq!(cmds, vec![0x33, 0x32, 0x28, 0x0C, 0x06, 0x01]);
    }

    #[test]
    fn write_line_positions_and_pads() {
        let mut lcd = lcd();
        lcd.write_line(1, "Hi");
        let (bus, _) = lcd.release();
        let sent = bus.decoded();
        assert_eq!(sent.len(), 1 + COLUMNS);
        assert_eq!(sent[0], (0xC0, 0));
        assert_eq!(sent[1], (b'H', 1));
        assert_eq!(sent[2], (b'i', 1));
        assert!(sent[3..].iter().all(|&(b, m)| b == b' ' && m == 1));
    }

    #[test]
    fn long_text_is_truncated() {
        let mut lcd = lcd();
        lcd.write_line(0, "0123456789ABCDEFGHIJ");
        let (bus, _) = lcd.release();
        let sent = bus.decoded();
        assert_eq!(sent[0], (0x80, 0));
        assert_eq!(sent.len(), 1 + COLUMNS);
        assert_eq!(sent[COLUMNS], (b'F', 1));
    }

    #[test]
    fn bus_errors_are_swallowed() {
        let mut lcd = Lcd1602::new(MockBus::new(0x3F), NoDelay, 0x27);
        lcd.clear();
        lcd.write_line(0, "ignored");
        let (bus, _) = lcd.release();
        assert!(bus.writes.is_empty());
    }

    #[test]
    fn scanner_finds_backpack() {
        let mut bus = MockBus::new(0x27);
        let found = scan_bus(&mut bus);
        assert_eq!(found.as_slice(), &[0x27]);
    }
}
