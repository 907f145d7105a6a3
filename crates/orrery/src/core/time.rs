/// Fixed timestep accumulator for the frame loop.
/// Wall-clock frame deltas go in, a whole number of ticks comes out.
pub struct FixedTimestep {
    dt: f32,
    accumulator: f32,
    max_steps: u32,
}

impl FixedTimestep {
    pub const DEFAULT_MAX_STEPS: u32 = 10;

    /// `dt` is the tick length in wall-clock seconds.
    pub fn new(dt: f32) -> Self {
        Self {
            dt,
            accumulator: 0.0,
            max_steps: Self::DEFAULT_MAX_STEPS,
        }
    }

    /// Add frame time. Returns the number of ticks to run, at most `max_steps`
    /// so a stalled tab does not fast-forward the orrery on resume.
    pub fn accumulate(&mut self, frame_dt: f32) -> u32 {
        if !frame_dt.is_finite() || frame_dt < 0.0 {
            return 0;
        }
        self.accumulator = (self.accumulator + frame_dt).min(self.dt * self.max_steps as f32);
        let steps = (self.accumulator / self.dt) as u32;
        self.accumulator -= steps as f32 * self.dt;
        steps
    }
}

/// Simulated time in seconds since epoch.
///
/// Only moves forward. Each tick advances it by `rate` simulated seconds
/// unless paused.
#[derive(Debug, Clone, PartialEq)]
pub struct SimClock {
    seconds: f64,
    rate: f64,
    paused: bool,
}

impl SimClock {
    /// Clock at epoch, advancing `rate` seconds per tick.
    pub fn new(rate: f64) -> Self {
        Self {
            seconds: 0.0,
            rate,
            paused: false,
        }
    }

    /// Seconds since epoch.
    pub fn seconds(&self) -> f64 {
        self.seconds
    }

    /// Add `delta` simulated seconds. Returns false (and leaves the clock
    /// alone) for negative or non-finite deltas.
    pub fn advance(&mut self, delta: f64) -> bool {
        if !delta.is_finite() || delta < 0.0 {
            return false;
        }
        self.seconds += delta;
        true
    }

    /// One frame-loop tick.
    pub fn tick(&mut self) {
        if !self.paused {
            self.seconds += self.rate;
        }
    }

    /// Simulated seconds per tick.
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Negative or non-finite rates are ignored.
    pub fn set_rate(&mut self, rate: f64) -> bool {
        if !rate.is_finite() || rate < 0.0 {
            return false;
        }
        self.rate = rate;
        true
    }

    /// Whether ticks are currently ignored.
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Pause or resume ticking. `advance` still works while paused.
    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }
}
