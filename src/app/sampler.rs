//! Periodic sampling loop.
//!
//! Once per tick: read the sensors, run the service, drive the actuators,
//! publish status and the history sample to the [`TelemetryHub`], then
//! sleep for whatever is left of the tick so the period does not drift
//! with decode and I/O time.

use std::time::{Duration, Instant};

use log::{debug, info};

use crate::telemetry::TelemetryHub;

use super::ports::{ActuatorPort, EventSink, SensorPort};
use super::service::NodeService;

pub struct SamplingLoop<'a, H, S> {
    service: NodeService,
    hw: H,
    sink: S,
    hub: &'a TelemetryHub,
    interval: Duration,
}

impl<'a, H, S> SamplingLoop<'a, H, S>
where
    H: SensorPort + ActuatorPort,
    S: EventSink,
{
    pub fn new(service: NodeService, hw: H, sink: S, hub: &'a TelemetryHub) -> Self {
        let interval = Duration::from_millis(u64::from(service.config().tick_interval_ms));
        Self {
            service,
            hw,
            sink,
            hub,
            interval,
        }
    }

    /// Start the service and drive the outputs to their initial state.
    pub fn start(&mut self) {
        self.service.start(&mut self.hw, &mut self.sink);
    }

    /// One sampling period, without the sleep.
    pub fn run_tick(&mut self) {
        let sample = self.service.tick(&mut self.hw, &mut self.sink);
        self.hub.publish(self.service.status(), sample);
    }

    /// Run for the life of the process.
    pub fn run(&mut self) -> ! {
        info!("Sampling every {} ms", self.interval.as_millis());
        loop {
            let started = Instant::now();
            self.run_tick();
            let spent = started.elapsed();
            let pause = remaining(self.interval, spent);
            if pause.is_zero() {
                debug!("Tick overran: {} ms", spent.as_millis());
            }
            std::thread::sleep(pause);
        }
    }

    pub fn service(&self) -> &NodeService {
        &self.service
    }

    pub fn hardware(&mut self) -> &mut H {
        &mut self.hw
    }

    pub fn sink(&mut self) -> &mut S {
        &mut self.sink
    }
}

/// Time left in a tick of length `interval` after `spent`; zero on overrun.
pub fn remaining(interval: Duration, spent: Duration) -> Duration {
    interval.saturating_sub(spent)
}
