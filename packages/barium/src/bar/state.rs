use std::collections::HashMap;
use std::time::{Duration, Instant};

use crate::term::ColorSupport;

/// The value/timing data owned by a bar, visible to widgets during a
/// redraw.
///
/// Created when the bar is built, mutated on every update, frozen at
/// finish. Widgets should treat it as read only.
#[derive(Debug)]
pub struct ProgressState {
    min_value: f64,
    max_value: Option<f64>,
    value: f64,
    previous_value: Option<f64>,
    start_time: Option<Instant>,
    end_time: Option<Instant>,
    last_update_time: Option<Instant>,
    updates: u64,
    variables: HashMap<String, String>,
    color_support: ColorSupport,
    finished: bool,
}

impl ProgressState {
    pub(crate) fn new(
        min_value: f64,
        max_value: Option<f64>,
        variables: HashMap<String, String>,
        color_support: ColorSupport,
    ) -> Self {
        Self {
            min_value,
            max_value,
            value: min_value,
            previous_value: None,
            start_time: None,
            end_time: None,
            last_update_time: None,
            updates: 0,
            variables,
            color_support,
            finished: false,
        }
    }

    /// The minimum/start value.
    pub fn min_value(&self) -> f64 {
        self.min_value
    }

    /// The maximum/end value, `None` while the length is unknown.
    pub fn max_value(&self) -> Option<f64> {
        self.max_value
    }

    /// The current value.
    pub fn value(&self) -> f64 {
        self.value
    }

    /// The value before the most recent update, if any update happened.
    pub fn previous_value(&self) -> Option<f64> {
        self.previous_value
    }

    /// When the bar started, if it has.
    pub fn start_time(&self) -> Option<Instant> {
        self.start_time
    }

    /// When the bar finished, if it has.
    pub fn end_time(&self) -> Option<Instant> {
        self.end_time
    }

    /// When the last redraw happened.
    pub fn last_update_time(&self) -> Option<Instant> {
        self.last_update_time
    }

    /// How many redraws have happened.
    pub fn updates(&self) -> u64 {
        self.updates
    }

    /// A user variable set through the builder or `set_variable`.
    pub fn variable(&self, name: &str) -> Option<&str> {
        self.variables.get(name).map(|x| x.as_str())
    }

    /// The color support resolved for the output stream.
    pub fn color_support(&self) -> ColorSupport {
        self.color_support
    }

    /// If the bar has reached its finished state.
    pub fn finished(&self) -> bool {
        self.finished
    }

    /// Current percentage, `None` while the length is unknown.
    ///
    /// A zero-width range reports 100 regardless of the value.
    pub fn percentage(&self) -> Option<f64> {
        let max_value = self.max_value?;
        let total_range = max_value - self.min_value;
        if total_range == 0.0 {
            return Some(100.0);
        }
        Some((self.value - self.min_value) / total_range * 100.0)
    }

    /// Wall-clock time since start; frozen once the bar finishes. Zero
    /// before start.
    pub fn elapsed(&self) -> Duration {
        let Some(start) = self.start_time else {
            return Duration::ZERO;
        };
        match self.end_time {
            Some(end) => end.duration_since(start),
            None => start.elapsed(),
        }
    }

    /// [`Self::elapsed`] in seconds.
    pub fn total_seconds_elapsed(&self) -> f64 {
        self.elapsed().as_secs_f64()
    }

    pub(crate) fn reinit(&mut self) {
        self.value = self.min_value;
        self.previous_value = None;
        self.start_time = None;
        self.end_time = None;
        self.last_update_time = None;
        self.updates = 0;
        self.finished = false;
    }

    pub(crate) fn set_start_time(&mut self, now: Instant) {
        self.start_time = Some(now);
    }

    pub(crate) fn record_value(&mut self, value: f64) {
        self.previous_value = Some(self.value);
        self.value = value;
    }

    pub(crate) fn set_max_value(&mut self, max_value: Option<f64>) {
        self.max_value = max_value;
    }

    pub(crate) fn set_variable(&mut self, name: &str, value: String) {
        self.variables.insert(name.to_string(), value);
    }

    pub(crate) fn bump_updates(&mut self, now: Instant) {
        self.updates += 1;
        self.last_update_time = Some(now);
    }

    pub(crate) fn freeze(&mut self, now: Instant) {
        self.end_time = Some(now);
        self.finished = true;
    }
}
