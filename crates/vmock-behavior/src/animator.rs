//! `ValueAnimator` — advances an interpolated value over a fixed duration.
//!
//! Leaf component: pure numbers in, pure numbers out.  The executor decides
//! what the samples mean (they are coerced to the owning datapoint's
//! declared type when written to the table).
//!
//! # Interpolation
//!
//! The `n` values are placed on `n` evenly spaced breakpoints over
//! `[0, duration]` and connected piecewise-linearly.  Sampling outside the
//! range clamps to the first/last value — no extrapolation.

use crate::error::{BehaviorError, BehaviorResult};

/// What happens when an animation reaches its duration.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum RepeatMode {
    /// Clamp at the final value and finish.
    Once,
    /// Wrap around, carrying the overshoot into the next cycle.
    Repeat,
}

/// Animates between equally distanced values over time.
#[derive(Clone, Debug)]
pub struct ValueAnimator {
    values: Vec<f64>,
    duration: f64,
    repeat_mode: RepeatMode,
    elapsed: f64,
    done: bool,
}

impl ValueAnimator {
    /// Build an animator over `values` spread evenly across `duration`
    /// seconds.  Requires at least two values and a positive duration.
    pub fn new(values: Vec<f64>, duration: f64, repeat_mode: RepeatMode) -> BehaviorResult<Self> {
        if values.len() < 2 {
            return Err(BehaviorError::TooFewValues(values.len()));
        }
        if duration <= 0.0 {
            return Err(BehaviorError::NonPositiveDuration(duration));
        }
        Ok(Self {
            values,
            duration,
            repeat_mode,
            elapsed: 0.0,
            done: false,
        })
    }

    /// Advance the animation by `delta_time` seconds and return the new
    /// sample.  A finished animator no longer advances; it keeps returning
    /// the final value.
    pub fn tick(&mut self, delta_time: f64) -> f64 {
        if self.done {
            return self.value();
        }
        self.elapsed += delta_time;
        if self.elapsed > self.duration {
            match self.repeat_mode {
                RepeatMode::Once => {
                    self.elapsed = self.duration;
                    self.done = true;
                }
                // Wrap keeps the overshoot so phase is preserved under drift.
                RepeatMode::Repeat => self.elapsed -= self.duration,
            }
        }
        self.value()
    }

    /// The sample at the current elapsed time.
    pub fn value(&self) -> f64 {
        self.sample(self.elapsed)
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    fn sample(&self, t: f64) -> f64 {
        let n = self.values.len();
        if t <= 0.0 {
            return self.values[0];
        }
        if t >= self.duration {
            return self.values[n - 1];
        }
        let span = self.duration / (n - 1) as f64;
        // t < duration guarantees idx <= n - 2; min() guards float edge cases.
        let idx = ((t / span) as usize).min(n - 2);
        let frac = (t - idx as f64 * span) / span;
        self.values[idx] + (self.values[idx + 1] - self.values[idx]) * frac
    }
}
