//! Temperature → fan duty curve
//!
//! Piecewise-linear map from room temperature to an 8-bit LEDC duty.
//! Below the first breakpoint the fan is off; from the last breakpoint
//! upward it runs flat out.
//!
//! ```text
//!  duty
//!  255 ┤                        ●━━━━━
//!  217 ┤                  ●╱╱╱╱
//!  153 ┤            ●╱╱╱╱
//!   76 ┤      ●╱╱╱╱
//!    0 ┼━━━━━━┘
//!      └──────┬─────┬─────┬─────┬──── °C
//!            20    25    30    35
//! ```

/// `(temperature °C, duty)` breakpoints, strictly increasing in both axes.
pub const BREAKPOINTS: [(f32, u8); 4] = [(20.0, 76), (25.0, 153), (30.0, 217), (35.0, 255)];

/// Fan duty (0-255) for a temperature. NaN maps to 0 (fan off).
pub fn duty_for_temperature(temp_c: f32) -> u8 {
    if temp_c.is_nan() || temp_c < BREAKPOINTS[0].0 {
        return 0;
    }

    for pair in BREAKPOINTS.windows(2) {
        let (t0, d0) = pair[0];
        let (t1, d1) = pair[1];
        if temp_c < t1 {
            let span = f32::from(d1 - d0);
            let duty = f32::from(d0) + (temp_c - t0) * span / (t1 - t0);
            // Truncate like the LEDC write path does.
            return duty as u8;
        }
    }

    u8::MAX
}
