//! GPIO / peripheral pin assignments for the RoomSense node (ESP32 DevKit).
//!
//! Single source of truth: every driver references this module rather than
//! hard-coding pin numbers.

// ---------------------------------------------------------------------------
// Sensors
// ---------------------------------------------------------------------------

/// DHT22 single-wire data line (open-drain, external 10 kOhm pull-up).
pub const DHT_GPIO: i32 = 4;

/// LDR voltage divider, analog input.
/// ADC1 channel 6 (GPIO 34 on ESP32, input-only pad).
pub const LDR_ADC_GPIO: i32 = 34;

/// HC-SR501 PIR motion sensor, digital output, HIGH = motion.
pub const PIR_GPIO: i32 = 25;

// ---------------------------------------------------------------------------
// Actuators
// ---------------------------------------------------------------------------

/// Active buzzer (HIGH = sounding).
pub const BUZZER_GPIO: i32 = 23;
/// Presence / night LED (HIGH = lit).
pub const LED_GPIO: i32 = 12;
/// Fan MOSFET gate, driven by LEDC PWM.
pub const FAN_PWM_GPIO: i32 = 26;

// ---------------------------------------------------------------------------
// I²C bus (16x2 character LCD on a PCF8574 backpack)
// ---------------------------------------------------------------------------

pub const I2C_SDA_GPIO: i32 = 21;
pub const I2C_SCL_GPIO: i32 = 22;
/// I²C bus clock.
pub const I2C_FREQ_HZ: u32 = 100_000;
/// 7-bit address of the LCD backpack.
pub const LCD_I2C_ADDR: u8 = 0x27;

// ---------------------------------------------------------------------------
// PWM configuration
// ---------------------------------------------------------------------------

/// LEDC timer resolution (bits).  8-bit gives 0-255 duty levels.
pub const PWM_RESOLUTION_BITS: u32 = 8;
/// LEDC base frequency for the fan (25 kHz, above the audible range).
pub const FAN_PWM_FREQ_HZ: u32 = 25_000;
