/// Error conditions a caller is expected to match on.
///
/// Everything else in this crate degrades to a documented default instead of
/// erroring. These are carried inside [`crate::Result`] and can be recovered
/// with [`anyhow::Error::downcast_ref`]:
///
/// ```rust
/// let mut bar = barium::bar().max_value(10.0).build().unwrap();
/// let err = bar.update(11.0).unwrap_err();
/// assert!(matches!(
///     err.downcast_ref::<barium::Error>(),
///     Some(barium::Error::ValueExceedsMax { .. })
/// ));
/// ```
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An update pushed the value past a concrete maximum while the bar has
    /// `max_error` enabled. With `max_error` disabled the maximum is silently
    /// raised instead.
    #[error("value {value} exceeds the maximum of {max}")]
    ValueExceedsMax { value: f64, max: f64 },

    /// The configured bounds are inverted.
    #[error("max value {max} needs to be at least the min value {min}")]
    InvalidRange { min: f64, max: f64 },

    /// A color request that is neither a recognized tri-state nor a concrete
    /// support level.
    #[error("invalid color configuration: '{0}'")]
    InvalidColorConfig(String),
}
