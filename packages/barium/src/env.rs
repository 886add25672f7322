use std::ffi::OsStr;
use std::time::Duration;

use anyhow::Context as _;

/// Like [`std::env::var`], but treat not-set as empty string.
/// Tracing is built-in.
///
/// If you need to detect the case where the env var is not set,
/// use `std::env::var` directly.
///
/// ```rust
/// # fn main() -> barium::Result<()> {
/// assert!(barium::env::env_var("SOME_VAR_THAT_IS_NOT_SET")?.is_empty());
/// # Ok(()) }
/// ```
#[inline(always)]
pub fn env_var(var: impl AsRef<OsStr>) -> crate::Result<String> {
    env_var_impl(var.as_ref())
}
fn env_var_impl(var: &OsStr) -> crate::Result<String> {
    log::trace!("reading env var '{}'", var.display());
    match std::env::var(var) {
        Ok(v) => Ok(v),
        Err(std::env::VarError::NotPresent) => Ok(String::new()),
        Err(e) => Err(e).with_context(|| format!("failed to read env var '{}'", var.display())),
    }
}

/// Read an environment variable formatted as y/n, yes/no, 1/0, true/false,
/// on/off, as a boolean.
///
/// Returns `None` if the variable is not defined or has an unknown value.
///
/// ```rust
/// assert_eq!(barium::env::env_flag("SOME_VAR_THAT_IS_NOT_SET"), None);
/// ```
pub fn env_flag(name: impl AsRef<OsStr>) -> Option<bool> {
    let value = env_var(name).unwrap_or_default();
    if value.is_empty() {
        return None;
    }
    match value.to_ascii_lowercase().trim() {
        "y" | "yes" | "1" | "true" | "on" => Some(true),
        "n" | "no" | "0" | "false" | "off" => Some(false),
        _ => None,
    }
}

/// Lower bound on the redraw interval from `BARIUM_MINIMUM_UPDATE_INTERVAL`
/// (seconds, fractions allowed). Zero when unset or unparseable.
pub(crate) fn min_update_interval() -> Duration {
    let value = env_var("BARIUM_MINIMUM_UPDATE_INTERVAL").unwrap_or_default();
    match value.trim().parse::<f64>() {
        Ok(secs) if secs.is_finite() && secs > 0.0 => Duration::from_secs_f64(secs),
        _ => Duration::ZERO,
    }
}
