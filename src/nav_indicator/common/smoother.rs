use super::angle_arithmetics::{angle_delta, wrap_360};

/// Continuous-time exponential approach towards a goal value.
///
/// The remaining error decays to `DECAY_BASE` of itself every `1 / TIME_CONSTANT`
/// seconds, so the needle reaches the same position after the same wall-clock time
/// no matter how often the host ticks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Smoother {
    time_constant: f64,
}

impl Default for Smoother {
    fn default() -> Self { Self::new(Self::TIME_CONSTANT) }
}

impl Smoother {
    /// Fraction of the error left after `1 / time_constant` seconds.
    pub const DECAY_BASE: f64 = 0.01;
    /// Default rate used for the CDI needle and the course pointer.
    pub const TIME_CONSTANT: f64 = 3.0;

    pub fn new(time_constant: f64) -> Self { Self { time_constant } }

    /// Share of the remaining error removed in a step of `dt` seconds.
    ///
    /// # Returns
    /// - `0.0` for `dt <= 0` or a non-finite `dt`, so the step is a no-op.
    /// - Otherwise a value in `[0, 1]`, which rules out overshooting the goal.
    pub fn blend_factor(&self, dt: f64) -> f64 {
        if !dt.is_finite() || dt <= 0.0 {
            return 0.0;
        }
        let factor = 1.0 - Self::DECAY_BASE.powf(dt * self.time_constant);
        if factor.is_finite() { num::clamp(factor, 0.0, 1.0) } else { 0.0 }
    }

    /// Moves `previous` towards `goal` for an elapsed time of `dt` seconds.
    pub fn smooth(&self, previous: f64, goal: f64, dt: f64) -> f64 {
        previous + (goal - previous) * self.blend_factor(dt)
    }

    /// Same as [`Smoother::smooth`] but for compass angles. Takes the short way round
    /// and keeps the result in `[0, 360)`.
    pub fn smooth_angle(&self, previous: f64, goal: f64, dt: f64) -> f64 {
        wrap_360(previous + angle_delta(previous, goal) * self.blend_factor(dt))
    }
}
