//! Fixed-step tick scheduling
//!
//! The host feeds real frame times in; the scheduler says how many 1/30 s
//! simulation ticks to run for that frame.

use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS, SIM_DT};

#[derive(Debug, Clone)]
pub struct TickScheduler {
    step: f32,
    accumulator: f32,
}

impl Default for TickScheduler {
    fn default() -> Self {
        Self::new(SIM_DT)
    }
}

impl TickScheduler {
    pub fn new(step: f32) -> Self {
        Self {
            step,
            accumulator: 0.0,
        }
    }

    pub fn step(&self) -> f32 {
        self.step
    }

    /// Account for `dt` seconds of real time and return how many ticks are due
    pub fn advance(&mut self, dt: f32) -> u32 {
        // Long stalls (tab hidden, debugger) are not caught up
        self.accumulator += dt.clamp(0.0, MAX_FRAME_DT);

        let mut ticks = 0;
        while self.accumulator >= self.step && ticks < MAX_SUBSTEPS {
            self.accumulator -= self.step;
            ticks += 1;
        }
        if ticks == MAX_SUBSTEPS {
            // Drop the backlog instead of carrying it into later frames
            self.accumulator = self.accumulator.min(self.step);
        }
        ticks
    }

    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}
