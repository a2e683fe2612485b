use std::time::{Duration, Instant};

use tracing::warn;

/// Monotonic clock read by the frame loop.
pub trait TimeSource {
    /// Time elapsed since some fixed origin.
    fn now(&self) -> Duration;
}

pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeSource for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// Clock that only moves when told to.
#[derive(Debug, Default, Clone, Copy)]
pub struct ManualClock {
    now: Duration,
}

impl ManualClock {
    pub fn advance(&mut self, by: Duration) {
        self.now += by;
    }
}

impl TimeSource for ManualClock {
    fn now(&self) -> Duration {
        self.now
    }
}

/// Measures real time between frames.
pub struct FrameTimer<C: TimeSource = SystemClock> {
    clock: C,
    last: Duration,
    pub dt: f32,
}

impl<C: TimeSource> FrameTimer<C> {
    pub fn new(clock: C) -> Self {
        let last = clock.now();
        Self { clock, last, dt: 0.0 }
    }

    /// Sample the clock; `dt` becomes the time since the previous tick.
    pub fn tick(&mut self) -> f32 {
        let now = self.clock.now();
        self.dt = now.saturating_sub(self.last).as_secs_f32();
        self.last = now;
        self.dt
    }

    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }
}

/// Fixed-step accumulator. Real frame time goes in, a whole number of fixed
/// steps comes out.
#[derive(Debug, Clone)]
pub struct FixedTimestep {
    step: f32,
    accumulator: f32,
    max_steps: u32,
}

impl FixedTimestep {
    pub fn new(step: f32, max_steps: u32) -> Self {
        Self {
            step,
            accumulator: 0.0,
            max_steps: max_steps.max(1),
        }
    }

    pub fn step(&self) -> f32 {
        self.step
    }

    /// Add `frame_dt` and return how many steps to run now. Anything beyond
    /// `max_steps` worth of time is dropped.
    pub fn advance(&mut self, frame_dt: f32) -> u32 {
        self.accumulator += frame_dt.max(0.0);

        let mut steps = 0;
        while self.accumulator >= self.step && steps < self.max_steps {
            self.accumulator -= self.step;
            steps += 1;
        }

        if self.accumulator >= self.step {
            warn!(
                dropped = self.accumulator,
                steps, "frame took too long, dropping simulation time"
            );
            self.accumulator %= self.step;
        }
        steps
    }

    /// Fraction of a step left in the accumulator, in `[0, 1)`.
    pub fn alpha(&self) -> f32 {
        self.accumulator / self.step
    }
}
