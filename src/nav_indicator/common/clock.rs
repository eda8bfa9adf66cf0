use std::time::Instant;

/// Monotonic time source the model samples once per tick.
pub trait Clock {
    /// Seconds elapsed since an arbitrary but fixed origin.
    fn now_secs(&self) -> f64;
}

/// Wall clock backed by [`Instant`], pinned at creation.
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self { Self { origin: Instant::now() } }
}

impl Default for MonotonicClock {
    fn default() -> Self { Self::new() }
}

impl Clock for MonotonicClock {
    fn now_secs(&self) -> f64 { self.origin.elapsed().as_secs_f64() }
}

/// Tracks the previous sample of a [`Clock`] and hands out the elapsed delta.
#[derive(Debug, Clone, Copy)]
pub struct TickTimer {
    last_sample: f64,
}

impl TickTimer {
    pub fn start(clock: &impl Clock) -> Self { Self { last_sample: clock.now_secs() } }

    /// Samples `clock` and returns the seconds since the previous call.
    /// A clock that moved backwards yields a negative delta, which the smoother ignores.
    pub fn lap(&mut self, clock: &impl Clock) -> f64 {
        let now = clock.now_secs();
        let dt = now - self.last_sample;
        self.last_sample = now;
        dt
    }
}
