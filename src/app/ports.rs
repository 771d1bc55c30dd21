//! Port traits: the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ NodeService (domain)
//! ```
//!
//! Driven adapters (sensors, actuators, event sinks, the character display)
//! implement these traits.  The [`NodeService`](super::service::NodeService)
//! consumes them via generics, so the domain core never touches hardware
//! directly.

use crate::sensors::SensorSnapshot;

use super::events::AppEvent;

// ───────────────────────────────────────────────────────────────
// Sensor port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port: the domain calls this once per tick.
pub trait SensorPort {
    /// Read every sensor and return a unified snapshot.  A failed climate
    /// transaction is carried inside the snapshot, never raised.
    fn read_all(&mut self) -> SensorSnapshot;
}

// ───────────────────────────────────────────────────────────────
// Actuator port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Write-side port: the domain calls this to command actuators.
/// Writes are idempotent and fire-and-forget.
pub trait ActuatorPort {
    /// Presence / night LED.
    fn set_led(&mut self, on: bool);

    /// Absence alert buzzer.
    fn set_buzzer(&mut self, on: bool);

    /// Fan PWM duty (0-255).
    fn set_fan_duty(&mut self, duty: u8);

    /// Kill all actuators (LED, buzzer, fan).
    fn all_off(&mut self);
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging / display)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`]s through this port.
/// Adapters decide where they go (serial log, character display, ...).
pub trait EventSink {
    fn emit(&mut self, event: &AppEvent);
}

impl<T: EventSink + ?Sized> EventSink for &mut T {
    fn emit(&mut self, event: &AppEvent) {
        (**self).emit(event);
    }
}

/// Fan-out: every event goes to both sinks, left first.
impl<A: EventSink, B: EventSink> EventSink for (A, B) {
    fn emit(&mut self, event: &AppEvent) {
        self.0.emit(event);
        self.1.emit(event);
    }
}

// ───────────────────────────────────────────────────────────────
// Display port (driven adapter: domain → 16x2 character display)
// ───────────────────────────────────────────────────────────────

/// Two-line character display.  Implementations swallow bus errors; the
/// node never depends on the display succeeding.
pub trait DisplayPort {
    /// Blank both rows.
    fn clear(&mut self);

    /// Write `text` (at most 16 characters) at the start of `row` (0 or 1),
    /// overwriting the whole row.
    fn write_line(&mut self, row: u8, text: &str);
}
