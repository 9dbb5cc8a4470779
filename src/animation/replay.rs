use std::sync::Arc;

use crate::animation::schedule::StrokeSchedule;

/// Live animation values of one stroke during a run.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct AnimationState {
    /// Measured length.
    pub path_length: f64,
    /// Current dash offset: `path_length` is undrawn, 0 is drawn.
    pub offset: f64,
    /// Scheduled start.
    pub start_delay: f64,
}

impl AnimationState {
    /// True when no part of the stroke is visible.
    pub fn is_undrawn(&self) -> bool {
        self.path_length > 0.0 && self.offset >= self.path_length
    }

    /// True when the whole stroke is visible.
    pub fn is_drawn(&self) -> bool {
        self.offset <= 0.0
    }
}

/// One run of a schedule. Never reused: a replay builds a new session.
#[derive(Clone, Debug)]
pub struct AnimationSession {
    epoch: u64,
    schedule: Arc<StrokeSchedule>,
    states: Vec<AnimationState>,
    elapsed: f64,
}

impl AnimationSession {
    fn start(schedule: Arc<StrokeSchedule>, epoch: u64) -> Self {
        let states = schedule
            .entries
            .iter()
            .map(|e| AnimationState {
                path_length: e.path_length,
                offset: e.start_offset,
                start_delay: e.delay_secs,
            })
            .collect();
        Self {
            epoch,
            schedule,
            states,
            elapsed: 0.0,
        }
    }

    /// Identity of this run; unique per controller.
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// The schedule being played.
    pub fn schedule(&self) -> &Arc<StrokeSchedule> {
        &self.schedule
    }

    /// Per-stroke state, in global order.
    pub fn states(&self) -> &[AnimationState] {
        &self.states
    }

    /// Seconds since the run started.
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// Move the run to `elapsed` seconds after its start. Time never runs backwards.
    pub fn tick(&mut self, elapsed: f64) {
        self.elapsed = self.elapsed.max(elapsed);
        let ease = self.schedule.ease;
        for (state, entry) in self.states.iter_mut().zip(&self.schedule.entries) {
            state.offset = entry.offset_at(self.elapsed, ease);
        }
    }

    /// True once every stroke is drawn.
    pub fn is_complete(&self) -> bool {
        self.schedule.is_complete(self.elapsed)
    }
}

/// Hands out animation runs and restarts them on demand.
#[derive(Debug, Default)]
pub struct ReplayController {
    next_epoch: u64,
}

impl ReplayController {
    /// Controller whose first run has epoch 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// First run of a freshly built schedule.
    pub fn start(&mut self, schedule: Arc<StrokeSchedule>) -> AnimationSession {
        let epoch = self.next_epoch;
        self.next_epoch += 1;
        AnimationSession::start(schedule, epoch)
    }

    /// Discard `previous` (finished or not) and rebuild every stroke's state from scratch.
    ///
    /// The new run starts fully undrawn with the original delays and a new epoch.
    pub fn replay(&mut self, previous: AnimationSession) -> AnimationSession {
        let schedule = Arc::clone(&previous.schedule);
        tracing::debug!(
            epoch = previous.epoch,
            elapsed = previous.elapsed,
            "abandoning animation run"
        );
        drop(previous);
        self.start(schedule)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/replay.rs"]
mod tests;
