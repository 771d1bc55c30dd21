//! Application service: the hexagonal core.
//!
//! [`NodeService`] owns the occupancy FSM, its context, and the last good
//! climate reading.  It exposes a clean, hardware-agnostic API.  All I/O
//! flows through port traits injected at call sites, making the entire
//! service testable with mock adapters.
//!
//! ```text
//!  SensorPort ──▶ ┌──────────────────────────┐ ──▶ EventSink
//!                 │       NodeService        │
//! ActuatorPort ◀──│  Light · FSM · Fan curve │
//!                 └──────────────────────────┘
//! ```

use log::{debug, info};

use crate::config::NodeConfig;
use crate::control::fan_curve::duty_for_temperature;
use crate::fsm::context::{FsmContext, OccupancyState, TickInputs};
use crate::fsm::states::build_state_table;
use crate::fsm::{Fsm, StateId};
use crate::history::HistorySample;
use crate::sensors::SensorSnapshot;
use crate::sensors::dht22::Reading;

use super::events::{AppEvent, NodeStatus};
use super::ports::{ActuatorPort, EventSink, SensorPort};

// ───────────────────────────────────────────────────────────────
// NodeService
// ───────────────────────────────────────────────────────────────

/// The application service orchestrates all domain logic.
pub struct NodeService {
    fsm: Fsm,
    ctx: FsmContext,
    /// Last successful climate reading.
    climate: Option<Reading>,
    ldr_raw: u16,
    motion_count: u32,
}

impl NodeService {
    /// Construct the service from configuration.
    ///
    /// Does **not** start the FSM; call [`start`](Self::start) next.
    pub fn new(config: NodeConfig) -> Self {
        let ctx = FsmContext::new(config);
        let fsm = Fsm::new(build_state_table(), StateId::SessionActive);
        Self {
            fsm,
            ctx,
            climate: None,
            ldr_raw: 0,
            motion_count: 0,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Enter the initial state and drive the outputs to match it.
    pub fn start(&mut self, hw: &mut impl ActuatorPort, sink: &mut impl EventSink) {
        hw.all_off();
        self.fsm.start(&mut self.ctx);
        self.apply_actuators(hw);
        sink.emit(&AppEvent::Started(self.fsm.current_state()));
        info!("NodeService started in {}", self.fsm.current_state());
    }

    // ── Per-tick orchestration ────────────────────────────────

    /// Run one full cycle: read sensors → rules → FSM → actuators.
    ///
    /// The `hw` parameter satisfies **both** [`SensorPort`] and
    /// [`ActuatorPort`]; this avoids a double mutable borrow while
    /// keeping the port boundary explicit.
    pub fn tick(
        &mut self,
        hw: &mut (impl SensorPort + ActuatorPort),
        sink: &mut impl EventSink,
    ) -> HistorySample {
        let snapshot = hw.read_all();
        let sample = self.step(&snapshot, sink);
        self.apply_actuators(hw);
        sample
    }

    /// Apply one tick's worth of inputs without touching hardware.
    ///
    /// Returns the sample to record in history for this tick.
    pub fn step(&mut self, snapshot: &SensorSnapshot, sink: &mut impl EventSink) -> HistorySample {
        let before = self.ctx.state;

        // 1. Climate: keep the previous reading on failure
        match snapshot.climate {
            Ok(reading) => self.climate = Some(reading),
            Err(err) => sink.emit(&AppEvent::ClimateReadFailed(err)),
        }

        // 2. Light / LED rule, independent of occupancy
        self.ldr_raw = snapshot.ldr_raw;
        self.ctx.inputs = TickInputs {
            motion_detected: snapshot.motion_detected,
            light_percent: snapshot.light_percent,
        };
        self.apply_light_rule();
        if self.ctx.state.led_on != before.led_on {
            sink.emit(&AppEvent::LedChanged(self.ctx.state.led_on));
        }

        // 3. Motion edge counter
        if snapshot.motion_detected && !before.motion_detected {
            self.motion_count = self.motion_count.wrapping_add(1);
        }
        self.ctx.state.motion_detected = snapshot.motion_detected;

        // 4. Occupancy FSM (absence timer, buzzer, session reset)
        if let Some((from, to)) = self.fsm.tick(&mut self.ctx) {
            sink.emit(&AppEvent::StateChanged { from, to });
        }

        // 5. Session accrual while someone is present
        if self.fsm.current_state() == StateId::SessionActive {
            self.ctx.state.session_secs = self
                .ctx
                .state
                .session_secs
                .saturating_add(self.ctx.tick_secs);
            sink.emit(&AppEvent::SessionTime(self.ctx.state.session_secs));
        }

        // 6. Fan from the last good temperature
        let temperature_c = self.climate.map_or(f32::NAN, |r| r.temperature_c);
        let duty = duty_for_temperature(temperature_c);
        if duty != before.fan_duty {
            self.ctx.state.fan_duty = duty;
            debug!("Fan duty {} -> {}", before.fan_duty, duty);
            sink.emit(&AppEvent::FanDutyChanged {
                duty,
                temperature_c,
            });
        }

        sink.emit(&AppEvent::Telemetry(self.status()));

        let climate = self.climate.unwrap_or_default();
        HistorySample {
            temperature_c: climate.temperature_c,
            humidity_pct: climate.humidity_pct,
            light_percent: snapshot.light_percent,
            motion: snapshot.motion_detected,
        }
    }

    // ── Queries ───────────────────────────────────────────────

    /// Build a status snapshot from the current context.
    pub fn status(&self) -> NodeStatus {
        let s = &self.ctx.state;
        let climate = self.climate.unwrap_or_default();
        NodeStatus {
            state: self.fsm.current_state(),
            temperature_c: climate.temperature_c,
            humidity_pct: climate.humidity_pct,
            climate_valid: self.climate.is_some(),
            ldr_raw: self.ldr_raw,
            light_percent: self.ctx.inputs.light_percent,
            motion_detected: s.motion_detected,
            motion_count: self.motion_count,
            led_on: s.led_on,
            buzzer_on: s.buzzer_on,
            fan_duty: s.fan_duty,
            session_active: s.session_active,
            session_secs: s.session_secs,
        }
    }

    /// Current FSM state.
    pub fn state(&self) -> StateId {
        self.fsm.current_state()
    }

    /// Occupancy outputs and counters.
    pub fn occupancy(&self) -> &OccupancyState {
        &self.ctx.state
    }

    pub fn config(&self) -> &NodeConfig {
        &self.ctx.config
    }

    // ── Internal ──────────────────────────────────────────────

    fn apply_light_rule(&mut self) {
        let cfg = &self.ctx.config;
        let state = &mut self.ctx.state;

        if self.ctx.inputs.light_percent < cfg.low_light_threshold_percent {
            state.low_light_secs = state.low_light_secs.saturating_add(self.ctx.tick_secs);
            if state.low_light_secs >= cfg.low_light_delay_secs && !state.led_on {
                state.led_on = true;
                info!(
                    "LED ON - low light for {}s+",
                    cfg.low_light_delay_secs
                );
            }
        } else {
            state.low_light_secs = 0;
            if state.led_on {
                state.led_on = false;
                info!(
                    "LED OFF - light level above {:.0}%",
                    cfg.low_light_threshold_percent
                );
            }
        }
    }

    /// Translate the occupancy outputs into port calls.
    fn apply_actuators(&self, hw: &mut impl ActuatorPort) {
        let s = &self.ctx.state;
        hw.set_led(s.led_on);
        hw.set_buzzer(s.buzzer_on);
        hw.set_fan_duty(s.fan_duty);
    }
}
