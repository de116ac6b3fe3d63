use std::time::Duration;

use log::{debug, warn};

use super::field::SpatialField;
use super::render::{RenderSurface, SceneBridge};

const STABILITY_THRESHOLD: f32 = 0.5;
const STABILITY_TICKS: u32 = 60;
const INACTIVITY_TIMEOUT_SECS: f64 = 20.0;
const PAUSED_POLL: Duration = Duration::from_millis(500);
const DRAW_FAILURE_LIMIT: u32 = 5;
const DRAW_BACKOFF: Duration = Duration::from_millis(250);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SimulationState {
    Stopped,
    Active,
    Paused,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NextTick {
    NextFrame,
    After(Duration),
    Idle,
}

pub struct SimulationScheduler {
    state: SimulationState,
    calm_ticks: u32,
    forces_enabled_at: f64,
    draw_failures: u32,
}

impl Default for SimulationScheduler {
    fn default() -> Self {
        Self {
            state: SimulationState::Stopped,
            calm_ticks: 0,
            forces_enabled_at: 0.0,
            draw_failures: 0,
        }
    }
}

impl SimulationScheduler {
    pub fn state(&self) -> SimulationState {
        self.state
    }

    pub fn start(&mut self, now_secs: f64) {
        if self.state != SimulationState::Stopped {
            return;
        }
        self.state = SimulationState::Active;
        self.calm_ticks = 0;
        self.forces_enabled_at = now_secs;
    }

    pub fn stop(&mut self) {
        self.state = SimulationState::Stopped;
    }

    pub fn toggle_forces(&mut self, now_secs: f64) {
        match self.state {
            SimulationState::Active => self.state = SimulationState::Paused,
            SimulationState::Paused => {
                self.state = SimulationState::Active;
                self.calm_ticks = 0;
                self.forces_enabled_at = now_secs;
            }
            SimulationState::Stopped => {}
        }
    }

    pub fn report_draw_failure(&mut self) {
        self.draw_failures = self.draw_failures.saturating_add(1);
        if self.draw_failures == DRAW_FAILURE_LIMIT {
            warn!(
                "{DRAW_FAILURE_LIMIT} consecutive draw failures; backing off tick rate"
            );
        }
    }

    pub fn report_draw_success(&mut self) {
        self.draw_failures = 0;
    }

    pub fn tick(
        &mut self,
        now_secs: f64,
        field: &mut SpatialField,
        bridge: &SceneBridge,
        surface: &mut dyn RenderSurface,
    ) -> NextTick {
        // Re-checked on every entry so a stop() between ticks always wins.
        match self.state {
            SimulationState::Stopped => NextTick::Idle,
            SimulationState::Paused => NextTick::After(PAUSED_POLL),
            SimulationState::Active => {
                let movement = field.step();
                field.clamp_to_bounds();
                bridge.sync_positions(field, surface);

                if movement < STABILITY_THRESHOLD {
                    self.calm_ticks += 1;
                } else {
                    self.calm_ticks = 0;
                    self.forces_enabled_at = now_secs;
                }

                if self.calm_ticks >= STABILITY_TICKS {
                    debug!("simulation settled for {STABILITY_TICKS} ticks; pausing forces");
                    self.state = SimulationState::Paused;
                    return NextTick::After(PAUSED_POLL);
                }

                if now_secs - self.forces_enabled_at >= INACTIVITY_TIMEOUT_SECS {
                    debug!("simulation idle for {INACTIVITY_TIMEOUT_SECS}s; pausing forces");
                    self.state = SimulationState::Paused;
                    return NextTick::After(PAUSED_POLL);
                }

                if self.draw_failures >= DRAW_FAILURE_LIMIT {
                    NextTick::After(DRAW_BACKOFF)
                } else {
                    NextTick::NextFrame
                }
            }
        }
    }
}
