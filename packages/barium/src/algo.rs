//! Numeric recurrences for smoothing noisy instantaneous measurements,
//! used by rate/ETA widgets.

use std::time::Duration;

/// A recurrence fed one observation at a time.
///
/// `elapsed` is the time since the previous observation. The built-in
/// variants do not use it; it is accepted for uniformity with time-aware
/// algorithms a caller might add.
pub trait SmoothingAlgorithm: Send {
    /// Feed a new observation, get the smoothed value back.
    fn update(&mut self, new_value: f64, elapsed: Duration) -> f64;
}

/// Exponentially weighted moving average.
///
/// Reduces the lag that's typically associated with a simple moving
/// average; more responsive to recent changes in the data.
///
/// ```rust
/// use std::time::Duration;
/// use barium::algo::{ExponentialMovingAverage, SmoothingAlgorithm as _};
///
/// let mut ema = ExponentialMovingAverage::new(0.5);
/// assert_eq!(ema.update(10.0, Duration::ZERO), 5.0);
/// assert_eq!(ema.update(10.0, Duration::ZERO), 7.5);
/// ```
pub struct ExponentialMovingAverage {
    alpha: f64,
    value: f64,
}

impl ExponentialMovingAverage {
    /// Make an EMA with the given smoothing factor. Starts from zero.
    pub fn new(alpha: f64) -> Self {
        Self { alpha, value: 0.0 }
    }
}

impl Default for ExponentialMovingAverage {
    fn default() -> Self {
        Self::new(0.5)
    }
}

impl SmoothingAlgorithm for ExponentialMovingAverage {
    fn update(&mut self, new_value: f64, _elapsed: Duration) -> f64 {
        self.value = self.alpha * new_value + (1.0 - self.alpha) * self.value;
        self.value
    }
}

/// An EMA of an EMA, which reduces the lag of a simple EMA.
///
/// The output is `2 * ema1 - ema2` where `ema1` tracks the observations and
/// `ema2` tracks `ema1`. Both start from zero.
pub struct DoubleExponentialMovingAverage {
    alpha: f64,
    ema1: f64,
    ema2: f64,
}

impl DoubleExponentialMovingAverage {
    /// Make a DEMA with the given smoothing factor. Starts from zero.
    pub fn new(alpha: f64) -> Self {
        Self {
            alpha,
            ema1: 0.0,
            ema2: 0.0,
        }
    }
}

impl Default for DoubleExponentialMovingAverage {
    fn default() -> Self {
        Self::new(0.5)
    }
}

impl SmoothingAlgorithm for DoubleExponentialMovingAverage {
    fn update(&mut self, new_value: f64, _elapsed: Duration) -> f64 {
        self.ema1 = self.alpha * new_value + (1.0 - self.alpha) * self.ema1;
        self.ema2 = self.alpha * self.ema1 + (1.0 - self.alpha) * self.ema2;
        2.0 * self.ema1 - self.ema2
    }
}
