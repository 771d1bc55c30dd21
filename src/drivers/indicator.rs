//! On/off GPIO indicator: the active buzzer and the presence LED.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: drives the output pin via hw_init.
//! On host/test: tracks state in-memory only.

use crate::drivers::hw_init;

pub struct Indicator {
    gpio: i32,
    on: bool,
}

impl Indicator {
    pub fn new(gpio: i32) -> Self {
        Self { gpio, on: false }
    }

    pub fn set(&mut self, on: bool) {
        hw_init::gpio_write(self.gpio, on);
        self.on = on;
    }

    pub fn off(&mut self) {
        self.set(false);
    }

    pub fn is_on(&self) -> bool {
        self.on
    }
}
