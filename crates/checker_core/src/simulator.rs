use std::time::{Duration, Instant};

use crate::{ProgressEvent, ProgressProfile};

/// Simulated progress never goes past this, leaving room for the real result.
pub const SIMULATED_CEILING: u8 = 95;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimulatorPhase {
    Idle,
    Running,
    Stopped,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SimulatorState {
    Idle,
    Running { started_at: Instant },
    Stopped,
}

/// Time-driven stand-in for backend progress when streaming is unavailable.
///
/// Pure state machine: the caller supplies the clock and owns the schedule.
/// It only ever produces progress, never a result.
#[derive(Debug, Clone)]
pub struct ProgressSimulator {
    profile: ProgressProfile,
    state: SimulatorState,
}

impl ProgressSimulator {
    pub fn new(profile: ProgressProfile) -> Self {
        Self {
            profile,
            state: SimulatorState::Idle,
        }
    }

    pub fn phase(&self) -> SimulatorPhase {
        match self.state {
            SimulatorState::Idle => SimulatorPhase::Idle,
            SimulatorState::Running { .. } => SimulatorPhase::Running,
            SimulatorState::Stopped => SimulatorPhase::Stopped,
        }
    }

    pub fn interval(&self) -> Duration {
        self.profile.tick_interval()
    }

    /// Idle -> Running. Returns the first scripted step; `None` if not idle.
    pub fn start(&mut self, now: Instant) -> Option<ProgressEvent> {
        if self.state != SimulatorState::Idle {
            return None;
        }
        self.state = SimulatorState::Running { started_at: now };
        let message = self
            .profile
            .steps
            .first()
            .map(|step| step.message.clone())
            .unwrap_or_default();
        Some(ProgressEvent {
            percentage: 0,
            message,
            step: 1,
            total_steps: self.step_count(),
            elapsed_seconds: 0,
        })
    }

    /// Re-evaluates progress at `now`. `None` unless running.
    pub fn tick(&mut self, now: Instant) -> Option<ProgressEvent> {
        let SimulatorState::Running { started_at } = self.state else {
            return None;
        };
        let elapsed = now.saturating_duration_since(started_at);
        let nominal = self.profile.nominal_duration.as_secs_f64();
        let fraction = if nominal > 0.0 {
            (elapsed.as_secs_f64() / nominal).min(0.95)
        } else {
            0.95
        };

        let steps = &self.profile.steps;
        let index = steps
            .iter()
            .position(|step| f64::from(step.threshold) / 100.0 > fraction)
            .unwrap_or(steps.len().saturating_sub(1));
        let step = steps.get(index)?;

        Some(ProgressEvent {
            percentage: step.threshold.min(SIMULATED_CEILING),
            message: step.message.clone(),
            step: index as u32 + 1,
            total_steps: self.step_count(),
            elapsed_seconds: elapsed.as_secs(),
        })
    }

    /// Running -> Stopped. Any other state is left untouched.
    pub fn stop(&mut self) {
        if matches!(self.state, SimulatorState::Running { .. }) {
            self.state = SimulatorState::Stopped;
        }
    }

    fn step_count(&self) -> u32 {
        self.profile.steps.len().max(1) as u32
    }
}
