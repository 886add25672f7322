//! Display fragments composed into the progress line.
//!
//! Each widget renders one fragment of the line, once per redraw, in
//! configured order. Widgets may keep local state (a spinner frame, a
//! smoothing state); the bar never inspects it.

use std::time::Instant;

use crate::ProgressState;
use crate::algo::{ExponentialMovingAverage, SmoothingAlgorithm};
use crate::color::{ColorSpec, apply_colors};

/// A fragment of the progress line.
pub trait Widget: Send {
    /// Render this widget against the current progress data.
    fn render(&mut self, state: &ProgressState) -> String;
}

/// The stock widget line for a bar whose length is known:
/// `42% 42 of 100 |####    | Elapsed 0:00:03 ETA 0:00:04`.
pub fn default_widgets() -> Vec<Box<dyn Widget>> {
    vec![
        Box::new(Percentage::new()),
        Box::new(Label::new(" ")),
        Box::new(Counter::with_total()),
        Box::new(Label::new(" ")),
        Box::new(BarGlyph::new()),
        Box::new(Label::new(" ")),
        Box::new(Timer::new()),
        Box::new(Label::new(" ")),
        Box::new(Eta::new()),
    ]
}

/// The stock widget line for a bar whose length is unknown:
/// `⠙ 42 Elapsed 0:00:03`.
pub fn default_widgets_unknown_length() -> Vec<Box<dyn Widget>> {
    vec![
        Box::new(AnimatedMarker::new()),
        Box::new(Label::new(" ")),
        Box::new(Counter::new()),
        Box::new(Label::new(" ")),
        Box::new(Timer::new()),
    ]
}

/// A fixed piece of text.
pub struct Label(String);

impl Label {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }
}

impl Widget for Label {
    fn render(&mut self, _state: &ProgressState) -> String {
        self.0.clone()
    }
}

impl From<&str> for Box<dyn Widget> {
    fn from(text: &str) -> Self {
        Box::new(Label::new(text))
    }
}

/// The progress percentage, `N/A%` while the length is unknown.
#[derive(Default)]
pub struct Percentage;

impl Percentage {
    pub fn new() -> Self {
        Self
    }
}

impl Widget for Percentage {
    fn render(&mut self, state: &ProgressState) -> String {
        match state.percentage() {
            Some(percentage) => format!("{percentage:3.0}%"),
            None => "N/A%".to_string(),
        }
    }
}

/// The current value, optionally `of <max>`, optionally in SI byte units.
#[derive(Default)]
pub struct Counter {
    show_total: bool,
    bytes: bool,
}

impl Counter {
    /// Show the bare value.
    pub fn new() -> Self {
        Self::default()
    }

    /// Show `value of max` when the maximum is known.
    pub fn with_total() -> Self {
        Self {
            show_total: true,
            bytes: false,
        }
    }

    /// Format values as SI byte quantities (kB, MB, ...), for transfer
    /// bars.
    pub fn bytes(mut self) -> Self {
        self.bytes = true;
        self
    }

    fn quantity(&self, value: f64) -> String {
        if self.bytes {
            si_bytes(value)
        } else {
            format!("{value}")
        }
    }
}

impl Widget for Counter {
    fn render(&mut self, state: &ProgressState) -> String {
        match state.max_value() {
            Some(max) if self.show_total => {
                format!("{} of {}", self.quantity(state.value()), self.quantity(max))
            }
            _ => self.quantity(state.value()),
        }
    }
}

/// Format a byte count with SI units, e.g. `1.2 MB`.
pub fn si_bytes(value: f64) -> String {
    const UNITS: &[&str] = &["kB", "MB", "GB", "TB", "PB"];
    if value < 1000.0 {
        return format!("{value:.0} B");
    }
    let mut value = value;
    let mut unit = "B";
    for next in UNITS.iter().copied() {
        if value < 1000.0 {
            break;
        }
        value /= 1000.0;
        unit = next;
    }
    format!("{value:.1} {unit}")
}

/// A fixed-width `|####    |` bar glyph, optionally gradient-filled.
///
/// While the length is unknown the frame renders with no fill.
pub struct BarGlyph {
    width: usize,
    left: char,
    right: char,
    marker: char,
    fill: char,
    fg: Option<ColorSpec>,
}

impl BarGlyph {
    pub fn new() -> Self {
        Self {
            width: 32,
            left: '|',
            right: '|',
            marker: '#',
            fill: ' ',
            fg: None,
        }
    }

    /// Total width of the glyph including the frame characters.
    pub fn width(mut self, width: usize) -> Self {
        self.width = width.max(2);
        self
    }

    /// The frame, marker and fill characters.
    pub fn chars(mut self, left: char, marker: char, fill: char, right: char) -> Self {
        self.left = left;
        self.marker = marker;
        self.fill = fill;
        self.right = right;
        self
    }

    /// Color the filled run with a solid color or a gradient evaluated at
    /// the current percentage.
    pub fn fg(mut self, spec: impl Into<ColorSpec>) -> Self {
        self.fg = Some(spec.into());
        self
    }
}

impl Default for BarGlyph {
    fn default() -> Self {
        Self::new()
    }
}

impl Widget for BarGlyph {
    fn render(&mut self, state: &ProgressState) -> String {
        let inner = self.width - 2;
        let percentage = state.percentage();
        let filled = match percentage {
            Some(p) => ((p / 100.0).clamp(0.0, 1.0) * inner as f64).round() as usize,
            None => 0,
        };
        let mut run: String = std::iter::repeat_n(self.marker, filled).collect();
        if let Some(fg) = &self.fg {
            run = apply_colors(
                &run,
                percentage,
                state.color_support(),
                Some(fg),
                None,
                None,
                None,
            );
        }
        let mut out = String::with_capacity(self.width + run.len());
        out.push(self.left);
        out.push_str(&run);
        for _ in filled..inner {
            out.push(self.fill);
        }
        out.push(self.right);
        out
    }
}

/// Elapsed wall-clock time, `Elapsed H:MM:SS`.
#[derive(Default)]
pub struct Timer;

impl Timer {
    pub fn new() -> Self {
        Self
    }
}

impl Widget for Timer {
    fn render(&mut self, state: &ProgressState) -> String {
        format!("Elapsed {}", hms(state.total_seconds_elapsed()))
    }
}

/// Estimated time to completion, smoothed, `ETA H:MM:SS`.
///
/// Renders `ETA --:--:--` until an estimate is computable (unknown length,
/// no progress yet).
pub struct Eta {
    algorithm: Box<dyn SmoothingAlgorithm>,
    last_render: Option<Instant>,
}

impl Eta {
    /// An ETA smoothed with the default [`ExponentialMovingAverage`].
    pub fn new() -> Self {
        Self::with_algorithm(Box::new(ExponentialMovingAverage::default()))
    }

    /// An ETA smoothed with the given algorithm.
    pub fn with_algorithm(algorithm: Box<dyn SmoothingAlgorithm>) -> Self {
        Self {
            algorithm,
            last_render: None,
        }
    }
}

impl Default for Eta {
    fn default() -> Self {
        Self::new()
    }
}

impl Widget for Eta {
    fn render(&mut self, state: &ProgressState) -> String {
        let now = Instant::now();
        let since_last = match self.last_render.replace(now) {
            Some(last) => now.duration_since(last),
            None => std::time::Duration::ZERO,
        };
        let Some(max) = state.max_value() else {
            return "ETA --:--:--".to_string();
        };
        let done = state.value() - state.min_value();
        let elapsed = state.total_seconds_elapsed();
        if done <= 0.0 || elapsed <= 0.0 {
            return "ETA --:--:--".to_string();
        }
        let secs_per_unit = elapsed / done;
        let remaining = secs_per_unit * (max - state.value()).max(0.0);
        let smoothed = self.algorithm.update(remaining, since_last);
        format!("ETA {}", hms(smoothed))
    }
}

/// An animated spinner character, advancing one frame per redraw.
pub struct AnimatedMarker {
    frames: Vec<char>,
    done: char,
    frame: usize,
}

impl AnimatedMarker {
    /// A braille spinner.
    pub fn new() -> Self {
        Self::with_frames(
            vec![
                '\u{280b}', '\u{2819}', '\u{2838}', '\u{2834}', '\u{2826}', '\u{2807}',
            ],
            '\u{283f}',
        )
    }

    /// A spinner over custom frames, showing `done` once the bar finishes.
    pub fn with_frames(frames: Vec<char>, done: char) -> Self {
        assert!(!frames.is_empty(), "a spinner needs at least one frame");
        Self {
            frames,
            done,
            frame: 0,
        }
    }
}

impl Default for AnimatedMarker {
    fn default() -> Self {
        Self::new()
    }
}

impl Widget for AnimatedMarker {
    fn render(&mut self, state: &ProgressState) -> String {
        if state.finished() {
            return self.done.to_string();
        }
        let c = self.frames[self.frame % self.frames.len()];
        self.frame += 1;
        c.to_string()
    }
}

/// A named user variable, `name: value`, with `-` while unset.
pub struct Variable {
    name: String,
}

impl Variable {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Widget for Variable {
    fn render(&mut self, state: &ProgressState) -> String {
        format!(
            "{}: {}",
            self.name,
            state.variable(&self.name).unwrap_or("-")
        )
    }
}

fn hms(seconds: f64) -> String {
    let total = seconds.max(0.0).round() as u64;
    format!("{}:{:02}:{:02}", total / 3600, (total % 3600) / 60, total % 60)
}
