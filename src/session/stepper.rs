//! Fixed-step accumulation over animation frames
//!
//! Frames arrive at whatever rate the display refreshes; the simulation always
//! advances in whole fixed steps. Leftover time carries into the next frame.

/// Turns frame timestamps into a number of fixed steps
#[derive(Debug, Clone)]
pub struct FixedStep {
    step_ms: f64,
    max_steps: u32,
    previous: Option<f64>,
    remainder: f64,
}

impl FixedStep {
    pub fn new(step_ms: f64, max_steps: u32) -> Self {
        Self {
            step_ms,
            max_steps: max_steps.max(1),
            previous: None,
            remainder: 0.0,
        }
    }

    pub fn step_ms(&self) -> f64 {
        self.step_ms
    }

    /// Time carried into the next frame (ms)
    pub fn remainder(&self) -> f64 {
        self.remainder
    }

    /// Forget the previous frame; the next frame runs no steps
    pub fn reset(&mut self) {
        self.previous = None;
        self.remainder = 0.0;
    }

    /// Number of fixed steps to run for a frame at `now` (ms)
    ///
    /// At most `max_steps` are returned. After a stall the excess time is
    /// dropped instead of being replayed in later frames.
    pub fn frame(&mut self, now: f64) -> u32 {
        let previous = *self.previous.get_or_insert(now);
        let mut elapsed = (now - previous).max(0.0) + self.remainder;
        self.previous = Some(now);

        let mut steps = 0;
        while elapsed > self.step_ms {
            if steps == self.max_steps {
                log::debug!(
                    "Dropping {:.1}ms of simulation time after {} steps",
                    elapsed,
                    steps
                );
                elapsed = 0.0;
                break;
            }
            elapsed -= self.step_ms;
            steps += 1;
        }
        self.remainder = elapsed;
        steps
    }
}
