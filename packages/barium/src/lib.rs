//! Throttled, widget-composed, in-place terminal progress bars.
//!
//! # General Principle
//! A [`ProgressBar`] is driven by your own loop: you feed it values through
//! [`update`](ProgressBar::update), and it decides when a redraw is due,
//! derives timing/percentage data, renders the configured widgets into one
//! line, and rewrites that line in place. Everything runs synchronously on
//! the calling thread — there are no timers and no background threads.
//!
//! # Basic usage
//! ```rust,no_run
//! # fn main() -> barium::Result<()> {
//! let mut bar = barium::bar().max_value(100.0).build()?;
//! bar.start()?;
//! for i in 0..100 {
//!     // do something
//!     bar.update((i + 1) as f64)?;
//! }
//! bar.finish()?;
//! # Ok(()) }
//! ```
//!
//! Or wrap an iterable and let the bar drive itself:
//! ```rust,no_run
//! # fn main() -> barium::Result<()> {
//! for _ in barium::wrap_iter(0..100)? {
//!     // do something
//! }
//! # Ok(()) }
//! ```
//!
//! # Redraw throttling
//! An update that is not due is still recorded but produces no output. A
//! redraw is due when it is forced, when it is the first one, when the
//! value reaches the maximum, or when the configured interval has elapsed
//! since the last one. The effective interval is the larger of
//! `poll_interval` (if set) and `min_poll_interval`; the latter is floored
//! at [`MINIMUM_UPDATE_INTERVAL`] and can be
//! raised (only raised) with the `BARIUM_MINIMUM_UPDATE_INTERVAL`
//! environment variable.
//!
//! # Widgets
//! The line is a sequence of [`widget::Widget`]s rendered in order against
//! the bar's [`ProgressState`]. Stock widgets cover percentages, counters,
//! bar glyphs, elapsed timers, smoothed ETAs, spinners and user variables;
//! anything else is one `impl Widget` away.
//!
//! # Colors
//! Color output is resolved once per bar from a [`ColorChoice`] tri-state:
//! `Auto` consults the environment (`BARIUM_ENABLE_COLORS`, `FORCE_COLOR`,
//! then `TERM`/`COLORTERM`/`COLOR` gated on the stream being an ANSI
//! terminal), `Always`/`Never` force it, and a fixed
//! [`ColorSupport`] level skips detection entirely. The [`color`] module
//! has the color/gradient types widgets use for styled output.
//!
//! # Environment variables
//! | variable | effect |
//! |-|-|
//! | `BARIUM_MINIMUM_UPDATE_INTERVAL` | raise the minimum redraw interval (seconds) |
//! | `BARIUM_ENABLE_COLORS` | boolean flag, force 256-color output under `Auto` |
//! | `FORCE_COLOR` | boolean flag, same as above, conventional name |
//! | `TERM`, `COLORTERM`, `COLOR` | color support detection |
//! | `JUPYTER_COLUMNS`, `JUPYTER_LINES`, `JPY_PARENT_PID` | notebook detection, implies true color |

mod error;
pub use error::Error;

pub mod env;

pub mod algo;
pub mod color;
pub mod term;
pub mod widget;

mod bar;
pub use bar::{
    BarIter, MINIMUM_UPDATE_INTERVAL, ProgressBar, ProgressBarBuilder, ProgressState, bar,
    wrap_iter,
};

#[doc(inline)]
pub use term::{ColorChoice, ColorSupport};

// re-exports from libraries
pub use anyhow::{Context, Result};
