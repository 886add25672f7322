//! Terminal capability detection.
//!
//! Detection runs once per bar at construction; the resolved
//! [`ColorSupport`] never changes mid-run.

use std::io::IsTerminal;
use std::str::FromStr;

use crate::Error;
use crate::env::{env_flag, env_var};

/// How much color the attached terminal can take.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ColorSupport {
    /// No color output.
    None,
    /// The 16 basic colors.
    Xterm,
    /// The 256-entry palette.
    Xterm256,
    /// Full 24-bit RGB color.
    TrueColor,
}

impl ColorSupport {
    /// Detect color support from the environment.
    ///
    /// If `JUPYTER_COLUMNS`, `JUPYTER_LINES` or `JPY_PARENT_PID` is set, a
    /// notebook is assumed and this returns [`ColorSupport::TrueColor`]
    /// unconditionally. Otherwise `TERM`, `COLORTERM` and `COLOR` are
    /// scanned in that order; the first variable naming `24bit`/`truecolor`,
    /// `256`, or `xterm` decides. No match in any variable means no color.
    pub fn from_env() -> Self {
        if notebook_env() {
            return Self::TrueColor;
        }
        let term = env_var("TERM").unwrap_or_default();
        let colorterm = env_var("COLORTERM").unwrap_or_default();
        let color = env_var("COLOR").unwrap_or_default();
        Self::from_values(&term, &colorterm, &color)
    }

    /// Detection over explicit `TERM`/`COLORTERM`/`COLOR` values, for use
    /// where the environment is not the source of truth.
    pub fn from_values(term: &str, colorterm: &str, color: &str) -> Self {
        for value in [term, colorterm, color] {
            let value = value.to_ascii_lowercase();
            if value.contains("24bit") || value.contains("truecolor") {
                return Self::TrueColor;
            } else if value.contains("256") {
                return Self::Xterm256;
            } else if value.contains("xterm") {
                return Self::Xterm;
            }
        }
        Self::None
    }
}

fn notebook_env() -> bool {
    !env_var("JUPYTER_COLUMNS").unwrap_or_default().is_empty()
        || !env_var("JUPYTER_LINES").unwrap_or_default().is_empty()
        || !env_var("JPY_PARENT_PID").unwrap_or_default().is_empty()
}

/// Requested color behavior, resolved into a concrete [`ColorSupport`] when
/// the bar is built.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorChoice {
    /// Consult `BARIUM_ENABLE_COLORS`, then `FORCE_COLOR`, then environment
    /// detection gated on the stream understanding ANSI.
    #[default]
    Auto,
    /// Force 256-color output.
    Always,
    /// Force colorless output.
    Never,
    /// Use exactly this support level, skipping detection.
    Fixed(ColorSupport),
}

impl ColorChoice {
    /// Resolve the request for a stream whose ANSI capability is
    /// `ansi_capable` (see [`is_ansi_terminal`]).
    pub fn resolve(self, ansi_capable: bool) -> ColorSupport {
        match self {
            Self::Auto => {
                if env_flag("BARIUM_ENABLE_COLORS").unwrap_or(false) {
                    ColorSupport::Xterm256
                } else if env_flag("FORCE_COLOR").unwrap_or(false) {
                    ColorSupport::Xterm256
                } else if ansi_capable {
                    ColorSupport::from_env()
                } else {
                    ColorSupport::None
                }
            }
            Self::Always => ColorSupport::Xterm256,
            Self::Never => ColorSupport::None,
            Self::Fixed(support) => support,
        }
    }
}

impl std::fmt::Display for ColorChoice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ColorChoice::Auto => write!(f, "auto"),
            ColorChoice::Always => write!(f, "always"),
            ColorChoice::Never => write!(f, "never"),
            ColorChoice::Fixed(ColorSupport::None) => write!(f, "none"),
            ColorChoice::Fixed(ColorSupport::Xterm) => write!(f, "16"),
            ColorChoice::Fixed(ColorSupport::Xterm256) => write!(f, "256"),
            ColorChoice::Fixed(ColorSupport::TrueColor) => write!(f, "truecolor"),
        }
    }
}

impl FromStr for ColorChoice {
    type Err = anyhow::Error;

    /// Parse `auto`/`always`/`never` or an explicit level
    /// (`none`/`16`/`256`/`truecolor`/`24bit`). Anything else is an
    /// [`Error::InvalidColorConfig`].
    fn from_str(s: &str) -> crate::Result<Self> {
        match s.to_ascii_lowercase().trim() {
            "auto" => Ok(Self::Auto),
            "always" => Ok(Self::Always),
            "never" => Ok(Self::Never),
            "none" => Ok(Self::Fixed(ColorSupport::None)),
            "16" | "xterm" => Ok(Self::Fixed(ColorSupport::Xterm)),
            "256" | "xterm256" => Ok(Self::Fixed(ColorSupport::Xterm256)),
            "truecolor" | "24bit" => Ok(Self::Fixed(ColorSupport::TrueColor)),
            _ => Err(Error::InvalidColorConfig(s.to_string()).into()),
        }
    }
}

#[cfg(feature = "cli")]
impl clap::ValueEnum for ColorChoice {
    fn value_variants<'a>() -> &'a [Self] {
        &[Self::Auto, Self::Always, Self::Never]
    }

    fn to_possible_value(&self) -> Option<clap::builder::PossibleValue> {
        match self {
            Self::Auto => Some(clap::builder::PossibleValue::new("auto")),
            Self::Always => Some(clap::builder::PossibleValue::new("always")),
            Self::Never => Some(clap::builder::PossibleValue::new("never")),
            Self::Fixed(_) => None,
        }
    }
}

/// `TERM` values (by prefix, case-insensitive) assumed to understand ANSI
/// escape sequences.
const ANSI_TERMS: &[&str] = &[
    "xterm", "eterm", "bvterm", "scoansi", "ansi", "cygwin", "konsole", "linux", "rxvt", "screen",
    "tmux", "vt100", "vt102", "vt220", "vt320",
];

/// Check if a `TERM` value names an ANSI-capable terminal type.
pub fn term_is_ansi(term: &str) -> bool {
    let term = term.to_ascii_lowercase();
    ANSI_TERMS.iter().any(|prefix| term.starts_with(prefix))
}

/// Check if the stream is a terminal, honoring an explicit override.
pub fn is_terminal<S: IsTerminal>(stream: &S, overridden: Option<bool>) -> bool {
    overridden.unwrap_or_else(|| stream.is_terminal())
}

/// Check if the stream is a terminal that understands ANSI escape
/// sequences, judged from `TERM`.
pub fn is_ansi_terminal<S: IsTerminal>(stream: &S, overridden: Option<bool>) -> bool {
    if !is_terminal(stream, overridden) {
        return false;
    }
    term_is_ansi(&env_var("TERM").unwrap_or_default())
}
