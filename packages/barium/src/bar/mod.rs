//! The progress bar engine: value/timing bookkeeping, redraw throttling,
//! line formatting, and output.

mod state;
pub use state::ProgressState;

use std::collections::HashMap;
use std::io::Write;
use std::time::{Duration, Instant};

use crate::Error;
use crate::env::env_var;
use crate::term::{self, ColorChoice, ansi};
use crate::widget::{self, Widget};

/// Hard floor for the redraw interval. A configured `min_poll_interval` can
/// only raise it, as can the `BARIUM_MINIMUM_UPDATE_INTERVAL` environment
/// variable.
pub const MINIMUM_UPDATE_INTERVAL: Duration = Duration::from_millis(50);

/// Make a progress bar builder with the following defaults:
///
/// - Bounds: 0 to unknown length
/// - Widgets: the stock line for the configured bounds
/// - Output: stderr, rewriting the line in place when it is a terminal
/// - Colors: auto-detected
/// - Redraws: throttled to at most one per 50ms
///
/// See [`ProgressBarBuilder`] for the builder methods.
///
/// ```rust,no_run
/// # fn main() -> barium::Result<()> {
/// let mut bar = barium::bar().max_value(100.0).build()?;
/// bar.start()?;
/// for i in 0..100 {
///     // do something
///     bar.update((i + 1) as f64)?;
/// }
/// bar.finish()?;
/// # Ok(()) }
/// ```
#[inline(always)]
pub fn bar() -> ProgressBarBuilder {
    ProgressBarBuilder::new()
}

/// Wrap an iterable in a progress bar with default settings.
///
/// The bar starts on the first retrieval, counts each item, and finishes on
/// exhaustion. The length is taken from the iterator when it is exact.
///
/// ```rust,no_run
/// # fn main() -> barium::Result<()> {
/// for _ in barium::wrap_iter(0..100)? {
///     // do something
/// }
/// # Ok(()) }
/// ```
pub fn wrap_iter<I: IntoIterator>(iterable: I) -> crate::Result<BarIter<I::IntoIter>> {
    Ok(bar().build()?.wrap(iterable))
}

enum SinkChoice {
    Stderr,
    Stdout,
    Writer(Box<dyn Write + Send>),
}

enum Sink {
    Stderr(std::io::Stderr),
    Stdout(std::io::Stdout),
    Writer(Box<dyn Write + Send>),
}

impl Write for Sink {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        match self {
            Sink::Stderr(x) => x.write(buf),
            Sink::Stdout(x) => x.write(buf),
            Sink::Writer(x) => x.write(buf),
        }
    }

    fn flush(&mut self) -> std::io::Result<()> {
        match self {
            Sink::Stderr(x) => x.flush(),
            Sink::Stdout(x) => x.flush(),
            Sink::Writer(x) => x.flush(),
        }
    }
}

/// Builder for a [`ProgressBar`]
pub struct ProgressBarBuilder {
    min_value: f64,
    max_value: Option<f64>,
    widgets: Option<Vec<Box<dyn Widget>>>,
    left_justify: bool,
    poll_interval: Option<Duration>,
    min_poll_interval: Option<Duration>,
    max_error: bool,
    prefix: Option<String>,
    suffix: Option<String>,
    variables: HashMap<String, String>,
    term_width: Option<usize>,
    measure: Option<Box<dyn Fn(&str) -> usize + Send>>,
    sink: SinkChoice,
    is_terminal: Option<bool>,
    line_breaks: Option<bool>,
    color: ColorChoice,
}

impl Default for ProgressBarBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressBarBuilder {
    /// Start building a progress bar. Note [`bar`] is the canonical
    /// shorthand.
    pub fn new() -> Self {
        Self {
            min_value: 0.0,
            max_value: None,
            widgets: None,
            left_justify: true,
            poll_interval: None,
            min_poll_interval: None,
            max_error: true,
            prefix: None,
            suffix: None,
            variables: HashMap::new(),
            term_width: None,
            measure: None,
            sink: SinkChoice::Stderr,
            is_terminal: None,
            line_breaks: None,
            color: ColorChoice::Auto,
        }
    }

    /// Set the minimum/start value. Default is 0.
    #[inline(always)]
    pub fn min_value(mut self, min_value: f64) -> Self {
        self.min_value = min_value;
        self
    }

    /// Set the maximum/end value.
    ///
    /// By default the length is unknown: no percentage is reported and the
    /// unknown-length widget set is used.
    #[inline(always)]
    pub fn max_value(mut self, max_value: f64) -> Self {
        self.max_value = Some(max_value);
        self
    }

    /// Replace the widget line. Default is the stock line for the
    /// configured bounds.
    #[inline(always)]
    pub fn widgets(mut self, widgets: Vec<Box<dyn Widget>>) -> Self {
        self.widgets = Some(widgets);
        self
    }

    /// Append one widget to the line.
    pub fn widget(mut self, widget: impl Widget + 'static) -> Self {
        self.widgets.get_or_insert_default().push(Box::new(widget));
        self
    }

    /// Justify the line to the left (`true`, the default) or the right.
    #[inline(always)]
    pub fn left_justify(mut self, left_justify: bool) -> Self {
        self.left_justify = left_justify;
        self
    }

    /// Set the target update interval. Redraws are not attempted more often
    /// than this; they can happen less often when updates are sparse.
    #[inline(always)]
    pub fn poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = Some(interval);
        self
    }

    /// [`Self::poll_interval`] in seconds.
    #[inline(always)]
    pub fn poll_interval_secs(self, seconds: f64) -> Self {
        self.poll_interval(Duration::from_secs_f64(seconds))
    }

    /// Set the minimum update interval. The bar will not redraw faster than
    /// this despite changes in the progress, unless forced. Limited from
    /// below by [`MINIMUM_UPDATE_INTERVAL`] and by the
    /// `BARIUM_MINIMUM_UPDATE_INTERVAL` environment variable.
    #[inline(always)]
    pub fn min_poll_interval(mut self, interval: Duration) -> Self {
        self.min_poll_interval = Some(interval);
        self
    }

    /// [`Self::min_poll_interval`] in seconds.
    #[inline(always)]
    pub fn min_poll_interval_secs(self, seconds: f64) -> Self {
        self.min_poll_interval(Duration::from_secs_f64(seconds))
    }

    /// Set if an update beyond the maximum is an error. Default is `true`;
    /// when disabled the maximum is silently raised instead.
    #[inline(always)]
    pub fn max_error(mut self, max_error: bool) -> Self {
        self.max_error = max_error;
        self
    }

    /// Prefix the line with the given string.
    #[inline(always)]
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    /// Suffix the line with the given string.
    #[inline(always)]
    pub fn suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = Some(suffix.into());
        self
    }

    /// Set the initial value of a user variable, displayed by
    /// [`Variable`](crate::widget::Variable) widgets.
    pub fn variable(mut self, name: impl Into<String>, value: impl std::fmt::Display) -> Self {
        self.variables.insert(name.into(), value.to_string());
        self
    }

    /// Fix the line width instead of polling the terminal before each
    /// redraw.
    #[inline(always)]
    pub fn term_width(mut self, width: usize) -> Self {
        self.term_width = Some(width);
        self
    }

    /// Override how the line width is measured, e.g. for strings whose
    /// display width the default ANSI-aware measurer gets wrong.
    pub fn measure_with(mut self, measure: impl Fn(&str) -> usize + Send + 'static) -> Self {
        self.measure = Some(Box::new(measure));
        self
    }

    /// Write the bar to stdout instead of stderr.
    #[inline(always)]
    pub fn to_stdout(mut self) -> Self {
        self.sink = SinkChoice::Stdout;
        self
    }

    /// Write the bar to an arbitrary sink instead of stderr. The sink is
    /// assumed not to be a terminal unless [`Self::is_terminal`] says
    /// otherwise.
    pub fn writer(mut self, writer: impl Write + Send + 'static) -> Self {
        self.sink = SinkChoice::Writer(Box::new(writer));
        self
    }

    /// Override terminal detection for the output stream.
    #[inline(always)]
    pub fn is_terminal(mut self, is_terminal: bool) -> Self {
        self.is_terminal = Some(is_terminal);
        self
    }

    /// Override whether each redraw goes on its own line (the default for
    /// non-terminal output) or rewrites the current line in place.
    #[inline(always)]
    pub fn line_breaks(mut self, line_breaks: bool) -> Self {
        self.line_breaks = Some(line_breaks);
        self
    }

    /// Set the color behavior. Default is [`ColorChoice::Auto`].
    #[inline(always)]
    pub fn color(mut self, color: ColorChoice) -> Self {
        self.color = color;
        self
    }

    /// Build the bar. Fails fast on inverted bounds.
    pub fn build(self) -> crate::Result<ProgressBar> {
        if let Some(max) = self.max_value
            && max < self.min_value
        {
            return Err(Error::InvalidRange {
                min: self.min_value,
                max,
            }
            .into());
        }

        let (sink, is_term, is_ansi) = match self.sink {
            SinkChoice::Stderr => {
                let stderr = std::io::stderr();
                let is_term = term::is_terminal(&stderr, self.is_terminal);
                let is_ansi = term::is_ansi_terminal(&stderr, self.is_terminal);
                (Sink::Stderr(stderr), is_term, is_ansi)
            }
            SinkChoice::Stdout => {
                let stdout = std::io::stdout();
                let is_term = term::is_terminal(&stdout, self.is_terminal);
                let is_ansi = term::is_ansi_terminal(&stdout, self.is_terminal);
                (Sink::Stdout(stdout), is_term, is_ansi)
            }
            SinkChoice::Writer(writer) => {
                // an opaque writer cannot be queried, the override decides
                let is_term = self.is_terminal.unwrap_or(false);
                let is_ansi = is_term && term::term_is_ansi(&env_var("TERM").unwrap_or_default());
                (Sink::Writer(writer), is_term, is_ansi)
            }
        };

        let widgets = match self.widgets {
            Some(widgets) => widgets,
            None if self.max_value.is_some() => widget::default_widgets(),
            None => widget::default_widgets_unknown_length(),
        };

        let min_poll_interval = self
            .min_poll_interval
            .unwrap_or(MINIMUM_UPDATE_INTERVAL)
            .max(MINIMUM_UPDATE_INTERVAL)
            .max(crate::env::min_update_interval());

        let color_support = self.color.resolve(is_ansi);
        log::debug!(
            "progress bar output: terminal={is_term} ansi={is_ansi} colors={color_support:?}"
        );

        Ok(ProgressBar {
            state: ProgressState::new(self.min_value, self.max_value, self.variables, color_support),
            widgets,
            sink,
            is_ansi,
            line_breaks: self.line_breaks.unwrap_or(!is_term),
            left_justify: self.left_justify,
            prefix: self.prefix,
            suffix: self.suffix,
            fixed_term_width: self.term_width,
            measure: self.measure.unwrap_or_else(|| Box::new(ansi::display_width)),
            poll_interval: self.poll_interval,
            min_poll_interval,
            max_error: self.max_error,
            started: false,
            finished: false,
            paused: false,
        })
    }
}

/// A progress bar that updates and prints itself on the caller's thread.
///
/// All redraw logic runs synchronously inside [`update`](Self::update)/
/// [`start`](Self::start)/[`finish`](Self::finish) — there is no background
/// thread. Redraws are throttled: an update that is not due is still
/// recorded but produces no output.
///
/// Dropping a started bar without finishing it finishes it best-effort;
/// failures on that path are swallowed.
pub struct ProgressBar {
    state: ProgressState,
    // NOTE: fields below include non-Debug types (boxed trait objects and a
    // boxed closure), so `Debug` is implemented by hand (see below) rather
    // than derived.
    widgets: Vec<Box<dyn Widget>>,
    sink: Sink,
    is_ansi: bool,
    line_breaks: bool,
    left_justify: bool,
    prefix: Option<String>,
    suffix: Option<String>,
    fixed_term_width: Option<usize>,
    measure: Box<dyn Fn(&str) -> usize + Send>,
    poll_interval: Option<Duration>,
    min_poll_interval: Duration,
    max_error: bool,
    started: bool,
    finished: bool,
    paused: bool,
}

impl std::fmt::Debug for ProgressBar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProgressBar")
            .field("state", &self.state)
            .field("is_ansi", &self.is_ansi)
            .field("line_breaks", &self.line_breaks)
            .field("left_justify", &self.left_justify)
            .field("prefix", &self.prefix)
            .field("suffix", &self.suffix)
            .field("fixed_term_width", &self.fixed_term_width)
            .field("poll_interval", &self.poll_interval)
            .field("min_poll_interval", &self.min_poll_interval)
            .field("max_error", &self.max_error)
            .field("started", &self.started)
            .field("finished", &self.finished)
            .field("paused", &self.paused)
            .finish_non_exhaustive()
    }
}

impl ProgressBar {
    /// The bar's value/timing data.
    pub fn state(&self) -> &ProgressState {
        &self.state
    }

    /// The current value.
    pub fn value(&self) -> f64 {
        self.state.value()
    }

    /// If the bar has been started.
    pub fn started(&self) -> bool {
        self.started
    }

    /// If the bar has been finished.
    pub fn finished(&self) -> bool {
        self.finished
    }

    /// If redraws are currently suppressed by [`pause`](Self::pause).
    pub fn paused(&self) -> bool {
        self.paused
    }

    /// Start measuring time and print the bar at the minimum value.
    ///
    /// Re-initializes the counters, so a finished bar can be started again.
    pub fn start(&mut self) -> crate::Result<()> {
        self.start_impl(None)
    }

    /// [`Self::start`] with the maximum value replaced first.
    pub fn start_with_max(&mut self, max_value: f64) -> crate::Result<()> {
        self.start_impl(Some(max_value))
    }

    fn start_impl(&mut self, max_value: Option<f64>) -> crate::Result<()> {
        if let Some(max) = max_value {
            if max < self.state.min_value() {
                return Err(Error::InvalidRange {
                    min: self.state.min_value(),
                    max,
                }
                .into());
            }
            self.state.set_max_value(Some(max));
        }
        self.state.reinit();
        self.started = true;
        self.finished = false;
        let now = Instant::now();
        self.state.set_start_time(now);
        self.redraw(now)
    }

    /// Update the bar to a new value, redrawing if a redraw is due.
    ///
    /// `None` keeps the current value, which makes this a "just redraw if
    /// due" call. Starts the clock implicitly if [`start`](Self::start) was
    /// never called (without the initial redraw at the minimum value).
    ///
    /// With `max_error` enabled, a value beyond a concrete maximum is an
    /// [`Error::ValueExceedsMax`]; otherwise the maximum is silently raised
    /// to the value.
    pub fn update(&mut self, value: impl Into<Option<f64>>) -> crate::Result<()> {
        self.update_impl(value.into(), false)
    }

    /// [`Self::update`], bypassing the redraw throttle.
    pub fn force_update(&mut self, value: impl Into<Option<f64>>) -> crate::Result<()> {
        self.update_impl(value.into(), true)
    }

    /// Update the bar by adding `delta` to the current value.
    pub fn increment(&mut self, delta: f64) -> crate::Result<()> {
        self.update_impl(Some(self.state.value() + delta), false)
    }

    /// Set a user variable, displayed by
    /// [`Variable`](crate::widget::Variable) widgets. Takes effect at the
    /// next redraw.
    pub fn set_variable(&mut self, name: &str, value: impl std::fmt::Display) {
        self.state.set_variable(name, value.to_string());
    }

    /// Suppress redraws until [`resume`](Self::resume). Updates keep
    /// recording values while paused.
    pub fn pause(&mut self) {
        self.paused = true;
    }

    /// Lift a [`pause`](Self::pause).
    pub fn resume(&mut self) {
        self.paused = false;
    }

    fn update_impl(&mut self, value: Option<f64>, force: bool) -> crate::Result<()> {
        if !self.started {
            // implicit start: the clock starts but the initial redraw at
            // the minimum value is skipped, this update draws instead
            self.started = true;
            self.finished = false;
            self.state.set_start_time(Instant::now());
        }
        let new_value = value.unwrap_or(self.state.value());
        if let Some(max) = self.state.max_value()
            && new_value > max
        {
            if self.max_error {
                return Err(Error::ValueExceedsMax {
                    value: new_value,
                    max,
                }
                .into());
            }
            self.state.set_max_value(Some(new_value));
        }

        let now = Instant::now();
        let due = self.redraw_due(now, new_value, force);
        self.state.record_value(new_value);
        if due {
            self.redraw(now)?;
        }
        Ok(())
    }

    /// Returns whether the bar should redraw the line.
    fn redraw_due(&self, now: Instant, new_value: f64, force: bool) -> bool {
        if self.paused {
            return false;
        }
        if force || self.state.updates() == 0 {
            return true;
        }
        if let Some(max) = self.state.max_value()
            && new_value >= max
        {
            return true;
        }
        let Some(last) = self.state.last_update_time() else {
            return true;
        };
        // the larger of the two intervals governs
        let mut interval = self.min_poll_interval;
        if let Some(poll) = self.poll_interval
            && poll > interval
        {
            interval = poll;
        }
        now.duration_since(last) >= interval
    }

    /// Put the bar in the finished state, forcing the value to the maximum
    /// and redrawing one final time, then write a newline.
    ///
    /// Calling finish on an already finished bar is a no-op.
    pub fn finish(&mut self) -> crate::Result<()> {
        self.finish_with("\n", false)
    }

    /// Finish without forcing the value to the maximum and without a final
    /// redraw, so the display keeps the last drawn state.
    pub fn finish_dirty(&mut self) -> crate::Result<()> {
        self.finish_with("\n", true)
    }

    /// Finish with an explicit terminating string.
    pub fn finish_with(&mut self, end: &str, dirty: bool) -> crate::Result<()> {
        if self.finished {
            return Ok(());
        }
        if !self.started {
            self.started = true;
            self.state.set_start_time(Instant::now());
        }
        let now = Instant::now();
        self.state.freeze(now);
        self.finished = true;
        if !dirty {
            if let Some(max) = self.state.max_value() {
                self.state.record_value(max);
            }
            self.redraw(now)?;
        }
        write!(self.sink, "{end}")?;
        self.sink.flush()?;
        Ok(())
    }

    /// Print a line of ordinary output without corrupting the bar.
    ///
    /// With in-place rewriting the bar line is erased, the message printed
    /// on its own line, and the bar drawn again below it. With line-broken
    /// output the message simply goes on its own line.
    pub fn println(&mut self, text: &str) -> crate::Result<()> {
        if self.line_breaks {
            writeln!(self.sink, "{text}")?;
            self.sink.flush()?;
            return Ok(());
        }
        if self.is_ansi {
            write!(self.sink, "\r{}", ansi::CLEAR_LINE_RIGHT)?;
        } else {
            write!(self.sink, "\r")?;
        }
        writeln!(self.sink, "{text}")?;
        if self.started && !self.finished {
            self.redraw(Instant::now())?;
        } else {
            self.sink.flush()?;
        }
        Ok(())
    }

    /// Wrap an iterable: the bar starts on the first retrieval, counts each
    /// item, and finishes on exhaustion. Dropping the adapter mid-iteration
    /// finishes dirty so the display is not forced to 100%.
    ///
    /// When the bar's length is unknown and the iterator's length is exact,
    /// the maximum value is taken from it.
    pub fn wrap<I: IntoIterator>(mut self, iterable: I) -> BarIter<I::IntoIter> {
        let iter = iterable.into_iter();
        if self.state.max_value().is_none() {
            let (lower, upper) = iter.size_hint();
            if upper == Some(lower) {
                self.state.set_max_value(Some(lower as f64));
            }
        }
        BarIter {
            bar: self,
            iter,
            done: false,
        }
    }

    fn redraw(&mut self, now: Instant) -> crate::Result<()> {
        self.state.bump_updates(now);
        // re-measure the terminal on every redraw so resizes are picked up
        let width = self
            .fixed_term_width
            .unwrap_or_else(term::term_width_or_default);
        let line = self.format_line(width);
        if self.line_breaks {
            writeln!(self.sink, "{line}")?;
        } else if self.is_ansi {
            write!(self.sink, "\r{}{line}", ansi::CLEAR_LINE_RIGHT)?;
        } else {
            write!(self.sink, "\r{line}")?;
        }
        self.sink.flush()?;
        Ok(())
    }

    /// Joins the widgets and justifies the line.
    fn format_line(&mut self, width: usize) -> String {
        let mut line = String::new();
        if let Some(prefix) = &self.prefix {
            line.push_str(prefix);
        }
        for widget in &mut self.widgets {
            line.push_str(&widget.render(&self.state));
        }
        if let Some(suffix) = &self.suffix {
            line.push_str(suffix);
        }

        let padding = width.saturating_sub((self.measure)(&line));
        if padding == 0 {
            return line;
        }
        if self.left_justify {
            line.push_str(&" ".repeat(padding));
            line
        } else {
            let mut padded = " ".repeat(padding);
            padded.push_str(&line);
            padded
        }
    }
}

impl Drop for ProgressBar {
    fn drop(&mut self) {
        // best-effort finish, errors have nowhere to go here
        if self.started && !self.finished {
            let _ = self.finish();
        }
    }
}

/// Iterator adapter driving a [`ProgressBar`], made with
/// [`ProgressBar::wrap`] or [`wrap_iter`].
pub struct BarIter<I> {
    bar: ProgressBar,
    iter: I,
    done: bool,
}

impl<I> BarIter<I> {
    /// The wrapped bar.
    pub fn bar(&self) -> &ProgressBar {
        &self.bar
    }

    /// The wrapped bar, e.g. for setting user variables mid-iteration.
    pub fn bar_mut(&mut self) -> &mut ProgressBar {
        &mut self.bar
    }
}

impl<I: Iterator> Iterator for BarIter<I> {
    type Item = I::Item;

    fn next(&mut self) -> Option<I::Item> {
        if self.done {
            return None;
        }
        match self.iter.next() {
            Some(item) => {
                if !self.bar.started() {
                    let _ = self.bar.start();
                } else {
                    let _ = self.bar.update(self.bar.value() + 1.0);
                }
                Some(item)
            }
            None => {
                self.done = true;
                let _ = self.bar.finish();
                None
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

impl<I> Drop for BarIter<I> {
    fn drop(&mut self) {
        // abandoned mid-iteration: keep the displayed value honest
        if !self.done && self.bar.started() {
            let _ = self.bar.finish_dirty();
        }
    }
}

/// Update a progress bar
///
/// The macro takes an update expression and optional variable updates:
/// - `progress!(bar = x)`: set the value to `x`
/// - `progress!(bar += x)`: increment the value by `x`
/// - `progress!(bar)`: redraw if due, without changing the value
///
/// , where `bar` is an ident. Any form accepts trailing `name = value`
/// pairs that update user variables first. The macro returns the
/// [`Result`](crate::Result) of the underlying update call.
///
/// # Examples
/// ```rust,no_run
/// # fn main() -> barium::Result<()> {
/// let mut bar = barium::bar().max_value(10.0).build()?;
/// let i = 1;
/// barium::progress!(bar = i as f64)?;
/// barium::progress!(bar += 2.0)?;
/// barium::progress!(bar, step = "cleanup")?;
/// # Ok(()) }
/// ```
#[macro_export]
macro_rules! progress {
    ($bar:ident = $x:expr $(, $name:ident = $value:expr)* $(,)?) => {{
        $($bar.set_variable(stringify!($name), $value);)*
        $bar.update($x)
    }};
    ($bar:ident += $x:expr $(, $name:ident = $value:expr)* $(,)?) => {{
        $($bar.set_variable(stringify!($name), $value);)*
        $bar.increment($x)
    }};
    ($bar:ident $(, $name:ident = $value:expr)* $(,)?) => {{
        $($bar.set_variable(stringify!($name), $value);)*
        $bar.update(None)
    }};
}
