//! Cooperative controller loop
//!
//! Owns the phase scheduler and runs its four jobs on their own
//! deadlines:
//! - Sensor sampling (also pulled forward by a demand edge)
//! - Scheduler tick
//! - Lamp and buzzer output
//! - Status display refresh

use defmt::*;

use junction_core::clock::{Millis, PeriodCounter};
use junction_core::config::ControllerConfig;
use junction_core::scheduler::{Cadence, PhaseScheduler};
use junction_core::state::Event;
use junction_core::traits::{Buzzer, LampOutput, SensorBus};
use junction_display::{render_status, DisplayBackend, Screen};

/// Controller state for the control task
pub struct Controller {
    scheduler: PhaseScheduler,
    cadence: Cadence,
    periods: PeriodCounter,
    screen: Screen,
}

impl Controller {
    pub fn new(config: &ControllerConfig, now: Millis) -> Self {
        Self {
            scheduler: PhaseScheduler::new(&config.timing),
            cadence: Cadence::new(&config.tasks, now),
            periods: PeriodCounter::new(now),
            screen: Screen::new(),
        }
    }

    /// Sample the sensors on the next poll
    pub fn request_sample(&mut self, now: Millis) {
        self.cadence.request_sample(now);
    }

    /// Run every job that is due at `now`
    ///
    /// `io` carries both the sensor inputs and the lamp outputs.
    pub fn poll<IO, B, D>(
        &mut self,
        now: Millis,
        period_ms: u32,
        io: &mut IO,
        buzzer: &mut B,
        display: &mut D,
    ) where
        IO: SensorBus + LampOutput,
        <IO as SensorBus>::Error: Format,
        <IO as LampOutput>::Error: Format,
        B: Buzzer,
        D: DisplayBackend,
    {
        self.periods.update(now, period_ms);
        let due = self.cadence.poll(now);

        if due.sample {
            match io.read_levels() {
                Ok(levels) => self.scheduler.sample_inputs(&levels, now),
                Err(e) => warn!("Sensor read failed: {:?}", e),
            }
        }

        if due.tick {
            if let Some(event) = self.scheduler.tick(now, period_ms) {
                log_event(event);
            }
        }

        if due.output {
            if let Err(e) = io.write_lamps(self.scheduler.lamp_state()) {
                warn!("Lamp write failed: {:?}", e);
            }
            let sound = self.scheduler.buzzer_active();
            if buzzer.is_active() != sound {
                buzzer.set_active(sound);
            }
        }

        if due.display {
            render_status(&mut self.screen, &self.scheduler.status(), self.periods.count());
            if let Err(e) = self.screen.render_to(display) {
                warn!("Display update failed: {:?}", e);
            }
        }
    }
}

fn log_event(event: Event) {
    match event {
        Event::PhaseStarted { from, to } => info!("Phase {:?} -> {:?}", from, to),
        Event::HazardEntered { from } => warn!("Hazard mode entered from {:?}", from),
        Event::HazardCleared => info!("Hazard cleared, resuming through service"),
    }
}
