//! ANSI escape sequence builders.
//!
//! Every builder is a pure string producer; writing the result to a stream
//! is the caller's job. Sequences that take no argument are plain constants,
//! parameterized ones are functions with the conventional defaults noted in
//! their docs.

use std::io::{Read as _, Write};
use std::sync::Mutex;

use anyhow::Context as _;

/// Move the cursor to the top-left corner.
pub const CURSOR_HOME: &str = "\x1b[1;1H";
/// Move the cursor up one row.
pub const UP: &str = "\x1b[1A";
/// Move the cursor down one row.
pub const DOWN: &str = "\x1b[1B";
/// Move the cursor right one column.
pub const RIGHT: &str = "\x1b[1C";
/// Move the cursor left one column.
pub const LEFT: &str = "\x1b[1D";
/// Move the cursor to the start of the next line.
pub const NEXT_LINE: &str = "\x1b[1E";
/// Move the cursor to the start of the previous line.
pub const PREVIOUS_LINE: &str = "\x1b[1F";
/// Move the cursor to the first column of the current line.
pub const COLUMN_START: &str = "\x1b[1G";

/// Clear from the cursor to the end of the screen.
pub const CLEAR_SCREEN_TILL_END: &str = "\x1b[0J";
/// Clear from the cursor to the start of the screen.
pub const CLEAR_SCREEN_TILL_START: &str = "\x1b[1J";
/// Clear the whole screen.
pub const CLEAR_SCREEN: &str = "\x1b[2J";
/// Clear the whole screen and the scrollback buffer.
pub const CLEAR_SCREEN_AND_SCROLLBACK: &str = "\x1b[3J";
/// Clear from the cursor to the end of the line.
pub const CLEAR_LINE_RIGHT: &str = "\x1b[0K";
/// Clear from the cursor to the start of the line.
pub const CLEAR_LINE_LEFT: &str = "\x1b[1K";
/// Clear the whole line.
pub const CLEAR_LINE: &str = "\x1b[2K";

/// Save the cursor position.
pub const SAVE_CURSOR: &str = "\x1b[s";
/// Restore the cursor position saved with [`SAVE_CURSOR`].
pub const RESTORE_CURSOR: &str = "\x1b[u";
/// Hide the cursor.
pub const HIDE_CURSOR: &str = "\x1b[?25l";
/// Show the cursor.
pub const SHOW_CURSOR: &str = "\x1b[?25h";

/// Move the cursor to an absolute 1-based (row, column) position.
pub fn cursor_position(row: u16, column: u16) -> String {
    format!("\x1b[{row};{column}H")
}
/// Move the cursor up `rows` rows (see [`UP`] for the 1-row form).
pub fn up(rows: u16) -> String {
    format!("\x1b[{rows}A")
}
/// Move the cursor down `rows` rows.
pub fn down(rows: u16) -> String {
    format!("\x1b[{rows}B")
}
/// Move the cursor right `columns` columns.
pub fn right(columns: u16) -> String {
    format!("\x1b[{columns}C")
}
/// Move the cursor left `columns` columns.
pub fn left(columns: u16) -> String {
    format!("\x1b[{columns}D")
}
/// Move the cursor to the start of the line `lines` below.
pub fn next_line(lines: u16) -> String {
    format!("\x1b[{lines}E")
}
/// Move the cursor to the start of the line `lines` above.
pub fn previous_line(lines: u16) -> String {
    format!("\x1b[{lines}F")
}
/// Move the cursor to the 1-based `column` of the current line.
pub fn column(column: u16) -> String {
    format!("\x1b[{column}G")
}
/// Scroll the whole page up by `lines`.
pub fn scroll_up(lines: u16) -> String {
    format!("\x1b[{lines}S")
}
/// Scroll the whole page down by `lines`.
pub fn scroll_down(lines: u16) -> String {
    format!("\x1b[{lines}T")
}

#[inline]
fn sgr(start: u8, end: u8, text: &str) -> String {
    format!("\x1b[{start}m{text}\x1b[{end}m")
}

/// Render `text` bold.
pub fn bold(text: &str) -> String {
    sgr(1, 22, text)
}
/// Render `text` faint.
pub fn faint(text: &str) -> String {
    sgr(2, 22, text)
}
/// Render `text` italic.
pub fn italic(text: &str) -> String {
    sgr(3, 23, text)
}
/// Render `text` underlined.
pub fn underline(text: &str) -> String {
    sgr(4, 24, text)
}
/// Render `text` with a slow blink.
pub fn slow_blink(text: &str) -> String {
    sgr(5, 25, text)
}
/// Render `text` with a fast blink.
pub fn fast_blink(text: &str) -> String {
    sgr(6, 25, text)
}
/// Render `text` with foreground/background swapped.
pub fn inverse(text: &str) -> String {
    sgr(7, 27, text)
}
/// Render `text` struck through.
pub fn strike_through(text: &str) -> String {
    sgr(9, 29, text)
}
/// Render `text` in a gothic/fraktur face, where supported.
pub fn gothic(text: &str) -> String {
    sgr(20, 10, text)
}
/// Render `text` doubly underlined.
pub fn double_underline(text: &str) -> String {
    sgr(21, 24, text)
}
/// Render `text` framed.
pub fn framed(text: &str) -> String {
    sgr(51, 54, text)
}
/// Render `text` encircled.
pub fn encircled(text: &str) -> String {
    sgr(52, 54, text)
}
/// Render `text` overlined.
pub fn overline(text: &str) -> String {
    sgr(53, 55, text)
}

/// Iterator of `(char, display width)` over a string, where the bytes of
/// ANSI escape sequences count as zero-width.
pub fn with_width(chars: std::str::Chars<'_>) -> AnsiWidthIter<'_> {
    AnsiWidthIter {
        in_escape: false,
        chars,
    }
}

/// Display width of a string, not counting ANSI escape sequences.
///
/// This is the default line-width measurer of the progress bar. CJK
/// characters count as two columns.
///
/// ```rust
/// use barium::term::ansi;
/// assert_eq!(ansi::display_width("50%"), 3);
/// assert_eq!(ansi::display_width(&ansi::bold("50%")), 3);
/// ```
pub fn display_width(s: &str) -> usize {
    with_width(s.chars()).map(|(_, w)| w).sum()
}

pub struct AnsiWidthIter<'a> {
    in_escape: bool,
    chars: std::str::Chars<'a>,
}

impl Iterator for AnsiWidthIter<'_> {
    type Item = (char, usize);

    fn next(&mut self) -> Option<Self::Item> {
        let c = self.chars.next()?;
        let width = if self.in_escape {
            // a CSI sequence runs until its final byte in @..=~,
            // which the leading '[' is not
            if c != '[' && ('\x40'..='\x7e').contains(&c) {
                self.in_escape = false;
            }
            0
        } else if c == '\x1b' {
            self.in_escape = true;
            0
        } else {
            use unicode_width::UnicodeWidthChar;
            c.width_cjk().unwrap_or(0)
        };

        Some((c, width))
    }
}

static CURSOR_QUERY_LOCK: Mutex<()> = Mutex::new(());

/// Ask the terminal where the cursor is.
///
/// Writes the cursor-position-request sequence to `out`, flushes, then
/// blocks reading stdin byte by byte until the terminating `R` arrives, and
/// parses the `ESC [ row ; col R` reply into 1-based (row, column).
///
/// The write+read round trip holds a process-wide lock, so concurrent
/// callers cannot interleave reads of each other's reply bytes. There is no
/// timeout: if the terminal never replies this blocks forever. Callers that
/// need bounded latency must impose their own timeout or cancellation
/// around the call.
pub fn query_cursor_position(out: &mut impl Write) -> crate::Result<(u16, u16)> {
    let _guard = CURSOR_QUERY_LOCK.lock().ok();
    out.write_all(b"\x1b[6n")?;
    out.flush()?;

    let mut response = Vec::new();
    let mut stdin = std::io::stdin().lock();
    let mut byte = [0u8; 1];
    loop {
        stdin
            .read_exact(&mut byte)
            .context("reading cursor position reply")?;
        response.push(byte[0]);
        if byte[0] == b'R' {
            break;
        }
    }
    parse_cursor_report(&response)
}

/// Parse an `ESC [ row ; col R` cursor position report.
///
/// Exposed so callers that implement their own bounded-latency read loop
/// can still reuse the reply parsing.
pub fn parse_cursor_report(reply: &[u8]) -> crate::Result<(u16, u16)> {
    let text = std::str::from_utf8(reply).context("cursor position reply is not valid utf-8")?;
    // interleaved bytes may precede the report, parse from the last CSI
    let start = text
        .rfind("\x1b[")
        .context("cursor position reply is missing the escape prefix")?;
    let fields = text[start + 2..]
        .strip_suffix('R')
        .context("cursor position reply is missing the terminator")?;
    let (row, col) = fields
        .split_once(';')
        .context("cursor position reply is missing the separator")?;
    Ok((
        row.trim().parse().context("invalid row in cursor reply")?,
        col.trim().parse().context("invalid column in cursor reply")?,
    ))
}
