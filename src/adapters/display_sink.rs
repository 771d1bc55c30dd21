//! Character-display event sink.
//!
//! Renders the occupancy events on the 16x2 LCD:
//!
//! ```text
//!  boot / session restarted      user away             every active tick
//! ┌────────────────┐        ┌────────────────┐       ┌────────────────┐
//! │Session Time:   │        │User Away!      │       │Session Time:   │
//! │    00:00:00    │        │Session Reset   │       │    01:02:03    │
//! └────────────────┘        └────────────────┘       └────────────────┘
//! ```

use core::fmt::Write;

use crate::app::events::AppEvent;
use crate::app::ports::{DisplayPort, EventSink};
use crate::fsm::StateId;

pub struct DisplayEventSink<D> {
    display: D,
}

impl<D: DisplayPort> DisplayEventSink<D> {
    pub fn new(display: D) -> Self {
        Self { display }
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    fn session_screen(&mut self) {
        self.display.clear();
        self.display.write_line(0, "Session Time:");
        self.display.write_line(1, "    00:00:00");
    }

    fn away_screen(&mut self) {
        self.display.clear();
        self.display.write_line(0, "User Away!");
        self.display.write_line(1, "Session Reset");
    }
}

impl<D: DisplayPort> EventSink for DisplayEventSink<D> {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Started(_)
            | AppEvent::StateChanged {
                to: StateId::SessionActive,
                ..
            } => self.session_screen(),
            AppEvent::StateChanged {
                to: StateId::Alarmed,
                ..
            } => self.away_screen(),
            AppEvent::SessionTime(secs) => {
                self.display.write_line(1, &session_clock(*secs));
            }
            _ => {}
        }
    }
}

/// Longest session the clock can show: 99:59:59.
pub const CLOCK_MAX_SECS: u32 = 99 * 3600 + 59 * 60 + 59;

/// `"    HH:MM:SS    "`, exactly one 16-column row.  Sessions longer than
/// [`CLOCK_MAX_SECS`] hold at 99:59:59.
pub fn session_clock(secs: u32) -> heapless::String<16> {
    let secs = secs.min(CLOCK_MAX_SECS);
    let mut out = heapless::String::new();
    let written = write!(
        out,
        "    {:02}:{:02}:{:02}    ",
        secs / 3600,
        (secs % 3600) / 60,
        secs % 60
    );
    debug_assert!(written.is_ok(), "clock overflowed its row");
    out
}
