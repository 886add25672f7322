//! Terminal plumbing: escape sequence builders, capability detection, and
//! size polling.

pub mod ansi;
mod cap;
pub use cap::*;

/// Get the terminal width, or a conservative default if it cannot be
/// measured (not a terminal, unsupported platform).
pub fn term_width_or_default() -> usize {
    term_width().unwrap_or(DEFAULT_TERM_WIDTH)
}

/// Fallback width used when the terminal cannot be measured.
pub const DEFAULT_TERM_WIDTH: usize = 80;

/// Get the terminal width, capped at an internal maximum.
pub fn term_width() -> Option<usize> {
    term_width_height().map(|x| x.0)
}

/// Get the terminal width and height, capped at an internal maximum.
pub fn term_width_height() -> Option<(usize, usize)> {
    use terminal_size::*;
    terminal_size().map(|(Width(w), Height(h))| ((w as usize).min(400), (h as usize).min(400)))
}
