//! LDR ambient light sensor.
//!
//! The LDR sits on the high side of a voltage divider, so the ADC reading
//! falls as the room gets brighter.  The light level is reported inverted
//! as a 0-100 % figure.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: reads ADC1 channel 6 via the oneshot API (initialised by hw_init).
//! On host/test: reads from a static AtomicU16 for injection.

use core::sync::atomic::AtomicU16;
#[cfg(not(target_os = "espidf"))]
use core::sync::atomic::Ordering;

#[cfg(target_os = "espidf")]
use crate::drivers::hw_init;

static SIM_LDR_ADC: AtomicU16 = AtomicU16::new(0);

#[cfg(not(target_os = "espidf"))]
pub fn sim_set_ldr_adc(raw: u16) {
    SIM_LDR_ADC.store(raw, Ordering::Relaxed);
}

/// Full-scale reading of the 12-bit ADC.
pub const ADC_MAX: u16 = 4095;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightReading {
    pub raw: u16,
    pub percent: f32,
}

pub struct LightSensor {
    _adc_gpio: i32,
}

impl LightSensor {
    pub fn new(adc_gpio: i32) -> Self {
        Self {
            _adc_gpio: adc_gpio,
        }
    }

    pub fn read(&self) -> LightReading {
        let raw = self.read_adc().min(ADC_MAX);
        LightReading {
            raw,
            percent: raw_to_percent(raw),
        }
    }

    #[cfg(target_os = "espidf")]
    fn read_adc(&self) -> u16 {
        hw_init::adc1_read(hw_init::ADC1_CH_LDR)
    }

    #[cfg(not(target_os = "espidf"))]
    fn read_adc(&self) -> u16 {
        SIM_LDR_ADC.load(Ordering::Relaxed)
    }
}

/// Inverted light level: 0 raw is full brightness.
pub fn raw_to_percent(raw: u16) -> f32 {
    let raw = f32::from(raw.min(ADC_MAX));
    (f32::from(ADC_MAX) - raw) / f32::from(ADC_MAX) * 100.0
}
