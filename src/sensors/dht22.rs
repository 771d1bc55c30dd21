//! DHT22 / AM2302 single-wire temperature and humidity sensor.
//!
//! The sensor shares one open-drain line for request and response and
//! encodes bits by pulse width, so the driver bit-bangs the transaction:
//!
//! ```text
//!  host start        sensor ack          bit 0 ("0")     bit 1 ("1")
//! ‾‾‾\____/‾‾‾‾‾‾\________/‾‾‾‾‾‾‾‾\_____/‾‾\_____/‾‾‾‾‾‾\ ...
//!     hold  release  ~80us     ~80us   50us 26us 50us  70us
//!                                            ^ sample at +30us after rise
//! ```
//!
//! Every edge wait is capped by [`LineTiming::edge_timeout_us`] iterations
//! of a 1 µs delay, so an absent sensor or stuck line yields
//! [`DecodeError::Timeout`] instead of hanging the sampling loop.
//!
//! ## Dual-target design
//!
//! The driver is generic over `embedded-hal` 1.0 traits. On ESP-IDF it runs
//! on an open-drain `PinDriver` with the ROM `Ets` delay; on host/test it
//! runs on [`sim::SimLine`] + [`sim::SimDelay`], which replay a recorded
//! waveform against a virtual microsecond clock.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};
use serde::{Deserialize, Serialize};

use crate::error::{DecodeError, LinePhase};

/// Bytes per transaction: humidity (2), temperature (2), checksum (1).
pub const FRAME_BYTES: usize = 5;
/// Bits per transaction.
pub const FRAME_BITS: usize = FRAME_BYTES * 8;

/// Microsecond timing of one transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineTiming {
    /// How long the host holds the line low to request a reading.
    pub start_hold_us: u32,
    /// Pause after releasing the line before listening for the ack.
    pub release_us: u32,
    /// Iteration budget (1 µs each) for every single edge wait.
    pub edge_timeout_us: u32,
    /// Offset after a bit's rising edge at which the level is sampled.
    pub bit_sample_offset_us: u32,
}

impl Default for LineTiming {
    fn default() -> Self {
        Self {
            start_hold_us: 1_000,
            release_us: 30,
            edge_timeout_us: 100,
            bit_sample_offset_us: 30,
        }
    }
}

/// One successful measurement.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Reading {
    pub temperature_c: f32,
    pub humidity_pct: f32,
}

/// The five raw bytes of a transaction, MSB first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame(pub [u8; FRAME_BYTES]);

impl Frame {
    /// Validate and convert raw bytes in one step.
    pub fn parse(bytes: [u8; FRAME_BYTES]) -> Result<Reading, DecodeError> {
        Self(bytes).decode()
    }

    /// Low byte of the sum of the four data bytes.
    pub fn checksum(&self) -> u8 {
        self.0[..4].iter().fold(0u8, |acc, b| acc.wrapping_add(*b))
    }

    pub fn decode(&self) -> Result<Reading, DecodeError> {
        let expected = self.checksum();
        let received = self.0[4];
        if expected != received {
            return Err(DecodeError::ChecksumMismatch { expected, received });
        }

        let raw_humidity = u16::from_be_bytes([self.0[0], self.0[1]]);
        // Top bit of the temperature word is a sign flag, not two's complement.
        let raw_temp = u16::from_be_bytes([self.0[2] & 0x7F, self.0[3]]);

        let mut temperature_c = f32::from(raw_temp) / 10.0;
        if self.0[2] & 0x80 != 0 {
            temperature_c = -temperature_c;
        }

        Ok(Reading {
            temperature_c,
            humidity_pct: f32::from(raw_humidity) / 10.0,
        })
    }
}

/// Bit-banged DHT22 driver.
pub struct Dht22<P, D> {
    pin: P,
    delay: D,
    timing: LineTiming,
}

impl<P, D> Dht22<P, D>
where
    P: InputPin + OutputPin,
    D: DelayNs,
{
    /// `pin` must be configured open-drain with a pull-up; driving it high
    /// releases the line.
    pub fn new(pin: P, delay: D, timing: LineTiming) -> Self {
        Self { pin, delay, timing }
    }

    /// Run one transaction and return the decoded reading.
    pub fn read(&mut self) -> Result<Reading, DecodeError> {
        let frame = self.read_frame()?;
        frame.decode()
    }

    /// Run one transaction and return the raw bytes without validating them.
    pub fn read_frame(&mut self) -> Result<Frame, DecodeError> {
        self.send_start()?;

        self.wait_while(true, LinePhase::ResponseLow)?;
        self.wait_while(false, LinePhase::ResponseHigh)?;
        self.wait_while(true, LinePhase::DataPreamble)?;

        let mut bytes = [0u8; FRAME_BYTES];
        for bit in 0..FRAME_BITS {
            let n = bit as u8;
            self.wait_while(false, LinePhase::BitStart(n))?;
            self.delay.delay_us(self.timing.bit_sample_offset_us);
            if self.level()? {
                bytes[bit / 8] |= 1 << (7 - bit % 8);
            }
            self.wait_while(true, LinePhase::BitEnd(n))?;
        }

        Ok(Frame(bytes))
    }

    /// Give back the line and delay (used by tests to inspect the sim).
    pub fn release(self) -> (P, D) {
        (self.pin, self.delay)
    }

    fn send_start(&mut self) -> Result<(), DecodeError> {
        self.pin.set_low().map_err(|_| DecodeError::Line)?;
        self.delay.delay_us(self.timing.start_hold_us);
        self.pin.set_high().map_err(|_| DecodeError::Line)?;
        self.delay.delay_us(self.timing.release_us);
        Ok(())
    }

    fn level(&mut self) -> Result<bool, DecodeError> {
        self.pin.is_high().map_err(|_| DecodeError::Line)
    }

    /// Spin while the line sits at `level`, at most `edge_timeout_us` polls.
    fn wait_while(&mut self, level: bool, phase: LinePhase) -> Result<(), DecodeError> {
        let mut budget = self.timing.edge_timeout_us;
        while self.level()? == level {
            if budget == 0 {
                return Err(DecodeError::Timeout { phase });
            }
            budget -= 1;
            self.delay.delay_us(1);
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Host simulation
// ---------------------------------------------------------------------------

#[cfg(not(target_os = "espidf"))]
pub mod sim {
    //! Virtual single-wire line for host tests.
    //!
    //! [`SimDelay`] advances a shared [`SimClock`] instead of sleeping, and
    //! [`SimLine`] reports the level a real sensor would drive at that
    //! virtual instant, measured from the moment the host released the line.

    use core::cell::{Cell, RefCell};
    use core::convert::Infallible;
    use std::rc::Rc;

    use embedded_hal::delay::DelayNs;
    use embedded_hal::digital::{ErrorType, InputPin, OutputPin};

    use super::{FRAME_BITS, FRAME_BYTES};

    /// Shared virtual time in nanoseconds.
    #[derive(Debug, Clone, Default)]
    pub struct SimClock(Rc<Cell<u64>>);

    impl SimClock {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn now_us(&self) -> u64 {
            self.0.get() / 1_000
        }

        fn now_ns(&self) -> u64 {
            self.0.get()
        }

        fn advance_ns(&self, ns: u64) {
            self.0.set(self.0.get() + ns);
        }
    }

    pub struct SimDelay {
        clock: SimClock,
    }

    impl SimDelay {
        pub fn new(clock: SimClock) -> Self {
            Self { clock }
        }
    }

    impl DelayNs for SimDelay {
        fn delay_ns(&mut self, ns: u32) {
            self.clock.advance_ns(u64::from(ns));
        }
    }

    /// Sensor-side response durations (µs).
    const ACK_WAIT_US: u64 = 40;
    const ACK_LOW_US: u64 = 80;
    const ACK_HIGH_US: u64 = 80;
    const BIT_LOW_US: u64 = 50;
    const BIT_ZERO_HIGH_US: u64 = 26;
    const BIT_ONE_HIGH_US: u64 = 70;

    /// Build the 5 bytes a sensor would send for the given tenths.
    pub fn frame_bytes(humidity_x10: u16, temperature_x10: i16) -> [u8; FRAME_BYTES] {
        let [h_hi, h_lo] = humidity_x10.to_be_bytes();
        let [mut t_hi, t_lo] = (temperature_x10.unsigned_abs() & 0x7FFF).to_be_bytes();
        if temperature_x10 < 0 {
            t_hi |= 0x80;
        }
        let sum = h_hi
            .wrapping_add(h_lo)
            .wrapping_add(t_hi)
            .wrapping_add(t_lo);
        [h_hi, h_lo, t_hi, t_lo, sum]
    }

    /// Scripted line: a list of `(duration_us, level)` segments replayed
    /// from the host's release, then `tail_level` forever.
    pub struct SimLine {
        clock: SimClock,
        segments: Vec<(u64, bool)>,
        tail_level: bool,
        host_driving_low: bool,
        released_at_ns: Option<u64>,
        writes: RefCell<Vec<bool>>,
    }

    impl SimLine {
        /// A healthy sensor answering with `bytes`.
        pub fn responding(clock: SimClock, bytes: [u8; FRAME_BYTES]) -> Self {
            Self::truncated(clock, bytes, FRAME_BITS)
        }

        /// A sensor that stops after `bits` data bits and lets the line
        /// float high.
        pub fn truncated(clock: SimClock, bytes: [u8; FRAME_BYTES], bits: usize) -> Self {
            let mut segments = vec![
                (ACK_WAIT_US, true),
                (ACK_LOW_US, false),
                (ACK_HIGH_US, true),
            ];
            for bit in 0..bits.min(FRAME_BITS) {
                let one = bytes[bit / 8] & (1 << (7 - bit % 8)) != 0;
                segments.push((BIT_LOW_US, false));
                segments.push((if one { BIT_ONE_HIGH_US } else { BIT_ZERO_HIGH_US }, true));
            }
            if bits >= FRAME_BITS {
                segments.push((BIT_LOW_US, false));
            }
            Self::scripted(clock, segments, true)
        }

        /// Nothing attached: the pull-up keeps the line high.
        pub fn absent(clock: SimClock) -> Self {
            Self::scripted(clock, Vec::new(), true)
        }

        /// Line shorted to ground.
        pub fn stuck_low(clock: SimClock) -> Self {
            Self::scripted(clock, Vec::new(), false)
        }

        pub fn scripted(clock: SimClock, segments: Vec<(u64, bool)>, tail_level: bool) -> Self {
            Self {
                clock,
                segments,
                tail_level,
                host_driving_low: false,
                released_at_ns: None,
                writes: RefCell::new(Vec::new()),
            }
        }

        /// Levels the host wrote, in order (`false` = driven low).
        pub fn writes(&self) -> Vec<bool> {
            self.writes.borrow().clone()
        }

        fn level_now(&self) -> bool {
            if self.host_driving_low {
                return false;
            }
            let Some(released) = self.released_at_ns else {
                return true;
            };
            let mut offset_us = (self.clock.now_ns() - released) / 1_000;
            for &(duration, level) in &self.segments {
                if offset_us < duration {
                    return level;
                }
                offset_us -= duration;
            }
            self.tail_level
        }
    }

    impl ErrorType for SimLine {
        type Error = Infallible;
    }

    impl InputPin for SimLine {
        fn is_high(&mut self) -> Result<bool, Self::Error> {
            Ok(self.level_now())
        }

        fn is_low(&mut self) -> Result<bool, Self::Error> {
            Ok(!self.level_now())
        }
    }

    impl OutputPin for SimLine {
        fn set_low(&mut self) -> Result<(), Self::Error> {
            self.host_driving_low = true;
            self.writes.borrow_mut().push(false);
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Self::Error> {
            self.host_driving_low = false;
            self.released_at_ns = Some(self.clock.now_ns());
            self.writes.borrow_mut().push(true);
            Ok(())
        }
    }
}
