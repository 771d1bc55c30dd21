//! Fan driver (logic-level MOSFET on an LEDC PWM channel).
//!
//! The duty is already on the 8-bit LEDC scale (0-255); the curve lives in
//! [`crate::control::fan_curve`].  This driver is a dumb actuator.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: writes the LEDC duty register via hw_init helpers.
//! On host/test: tracks state in-memory only.

use crate::drivers::hw_init;

pub struct FanDriver {
    duty: u8,
}

impl FanDriver {
    pub fn new() -> Self {
        Self { duty: 0 }
    }

    pub fn set_duty(&mut self, duty: u8) {
        if duty == self.duty {
            return;
        }
        hw_init::ledc_set(hw_init::LEDC_CH_FAN, duty);
        self.duty = duty;
    }

    pub fn stop(&mut self) {
        hw_init::ledc_set(hw_init::LEDC_CH_FAN, 0);
        self.duty = 0;
    }

    pub fn duty(&self) -> u8 {
        self.duty
    }

    pub fn is_running(&self) -> bool {
        self.duty > 0
    }
}

impl Default for FanDriver {
    fn default() -> Self {
        Self::new()
    }
}
