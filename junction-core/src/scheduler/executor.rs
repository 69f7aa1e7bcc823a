//! Phase scheduler
//!
//! Owns the complete controller state: current phase, signal groups,
//! sensor latches and hazard supervision. The firmware feeds it raw
//! sensor samples and calls [`PhaseScheduler::tick`] once per scheduler
//! interval with the live time-period.

use crate::clock::Millis;
use crate::config::{TimingConfig, AMBER_PERIODS};
use crate::safety::{HazardStatus, HazardSupervisor};
use crate::sensor::{SensorLevels, SensorTracker, SENSOR_COUNT};
use crate::signal::{Colour, GroupId, LampState, SignalGroups, GROUP_COUNT};
use crate::state::{Event, Phase};

use super::arbiter::{gate_open, pending_phases, pending_rival, select_candidate};

/// Point-in-time view for the status display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StatusSnapshot {
    pub phase: Phase,
    /// Group colours in `GroupId::ALL` order
    pub colours: [Colour; GROUP_COUNT],
    /// Unserved sensors 0-4, then the hazard flag
    pub indicators: [bool; SENSOR_COUNT],
}

impl StatusSnapshot {
    pub fn colour(&self, id: GroupId) -> Colour {
        self.colours[id.index()]
    }
}

/// Controller state aggregate
#[derive(Debug, Clone)]
pub struct PhaseScheduler {
    phase: Phase,
    groups: SignalGroups,
    sensors: SensorTracker,
    hazard: HazardSupervisor,
}

impl Default for PhaseScheduler {
    fn default() -> Self {
        Self::new(&TimingConfig::default())
    }
}

impl PhaseScheduler {
    /// Create a scheduler in the power-up hazard state
    pub fn new(timing: &TimingConfig) -> Self {
        Self {
            phase: Phase::Hazard,
            groups: SignalGroups::new(timing),
            sensors: SensorTracker::new(),
            hazard: HazardSupervisor::new(timing.hazard_hold_ms),
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn groups(&self) -> &SignalGroups {
        &self.groups
    }

    pub fn sensors(&self) -> &SensorTracker {
        &self.sensors
    }

    pub fn hazard_active(&self) -> bool {
        self.hazard.is_active()
    }

    pub fn buzzer_active(&self) -> bool {
        self.hazard.buzzer_active()
    }

    /// Lamp word for the current group colours
    pub fn lamp_state(&self) -> LampState {
        LampState::from_colours(&self.groups.colours())
    }

    pub fn status(&self) -> StatusSnapshot {
        let mut indicators = [false; SENSOR_COUNT];
        for (i, flag) in indicators.iter_mut().enumerate().take(SENSOR_COUNT - 1) {
            *flag = self.sensors.needs_handling(i);
        }
        indicators[SENSOR_COUNT - 1] = self.hazard.is_active();
        StatusSnapshot {
            phase: self.phase,
            colours: self.groups.colours(),
            indicators,
        }
    }

    /// Run one sampling pass over raw input levels
    pub fn sample_inputs(&mut self, levels: &SensorLevels, now: Millis) {
        self.sensors.update(&levels.sensors, now, &mut self.groups);
        self.hazard.sample(levels.hazard, now);
    }

    /// Advance the controller by one scheduler tick
    ///
    /// `period_ms` is the live time-period; zero is treated as one.
    pub fn tick(&mut self, now: Millis, period_ms: u32) -> Option<Event> {
        let period_ms = period_ms.max(1);

        match self.hazard.update(now) {
            HazardStatus::Entered => {
                let from = self.phase;
                self.enter_hazard(now);
                return Some(Event::HazardEntered { from });
            }
            HazardStatus::Holding => {
                if let Some(lit) = self.hazard.flash(now) {
                    self.groups
                        .set_all(if lit { Colour::Yellow } else { Colour::Off });
                }
                return None;
            }
            HazardStatus::Cleared => {
                self.reset_to_default(now);
                return Some(Event::HazardCleared);
            }
            HazardStatus::Inactive => {}
        }

        self.update_dwell(now, period_ms);
        self.preempt(now, period_ms);
        self.arbitrate(now, period_ms)
    }

    fn enter_hazard(&mut self, now: Millis) {
        self.phase = Phase::Hazard;
        self.groups.set_all(Colour::Yellow);
        self.hazard.start_flash(now);
    }

    /// Leave hazard mode with the through movement green and all latches dropped
    fn reset_to_default(&mut self, now: Millis) {
        for id in GroupId::ALL {
            if Phase::Default.owns(id) {
                self.groups.grant(id, now);
            } else {
                self.groups.force_red(id, now);
            }
        }
        self.sensors.clear_all();
        for &sensor in Phase::Default.sensors() {
            self.sensors.mark_handled(sensor);
        }
        self.phase = Phase::Default;
    }

    /// Apply min/max dwell and amber timing to the current phase's groups
    ///
    /// A Default group rests green while every pending phase would keep it.
    fn update_dwell(&mut self, now: Millis, period_ms: u32) {
        let pending = pending_phases(&self.sensors);

        for &id in self.phase.groups() {
            match self.groups.colour(id) {
                Colour::Green => {
                    let resting =
                        self.phase == Phase::Default && pending.iter().all(|p| p.owns(id));
                    let demand = self.groups.group(id).demand;
                    let timing = self.groups.timing_mut(id);
                    let elapsed = now.elapsed_since(timing.green_start) / period_ms;
                    timing.current_periods = elapsed;

                    if elapsed < u32::from(timing.min_green_periods) || resting {
                        continue;
                    }
                    if elapsed >= u32::from(timing.max_green_periods) || !demand {
                        self.groups.begin_amber(id, now);
                    }
                }
                Colour::Yellow => {
                    let yellow_start = self.groups.timing(id).yellow_start;
                    if now.has_elapsed(yellow_start, AMBER_PERIODS.saturating_mul(period_ms)) {
                        self.groups.begin_red(id, now);
                    }
                }
                Colour::Red | Colour::Off => {}
            }
        }
    }

    /// Yield to a pending higher-priority phase once minimum green is served
    fn preempt(&mut self, now: Millis, period_ms: u32) {
        let Some(rival) = pending_rival(self.phase, &self.sensors) else {
            return;
        };

        for &id in self.phase.groups() {
            if rival.owns(id) || self.groups.colour(id) != Colour::Green {
                continue;
            }
            let timing = self.groups.timing(id);
            let elapsed = now.elapsed_since(timing.green_start) / period_ms;
            if elapsed >= u32::from(timing.min_green_periods) {
                self.groups.begin_amber(id, now);
            }
        }
    }

    /// Grant the winning phase if the transition gate is open
    fn arbitrate(&mut self, now: Millis, period_ms: u32) -> Option<Event> {
        let candidate = select_candidate(&self.sensors);
        if !gate_open(self.phase, candidate, &self.groups, now, period_ms) {
            return None;
        }

        let from = self.phase;
        self.enter_phase(candidate, now);
        (from != candidate).then_some(Event::PhaseStarted {
            from,
            to: candidate,
        })
    }

    fn enter_phase(&mut self, phase: Phase, now: Millis) {
        // The westbound through movement keeps running into the turn phase
        let continuing = self.phase == Phase::Default && phase == Phase::TurnPhase;

        for &id in phase.groups() {
            if continuing && id == GroupId::ThroughWest && self.groups.colour(id) == Colour::Green {
                continue;
            }
            self.groups.grant(id, now);
        }
        for &sensor in phase.sensors() {
            self.sensors.mark_handled(sensor);
        }
        self.phase = phase;
    }
}
