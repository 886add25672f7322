use super::{Color, interpolate};

/// A pure mapping from `[0, 1]` to a color along ordered stops.
///
/// ```rust
/// use barium::color::{Color, ColorGradient, Rgb};
///
/// let gradient = ColorGradient::new(vec![
///     Color::new(Rgb(0, 0, 0), "black", 0),
///     Color::new(Rgb(255, 255, 255), "intense white", 15),
/// ]);
/// assert_eq!(gradient.at(0.0).rgb, Rgb(0, 0, 0));
/// assert_eq!(gradient.at(0.5).rgb, Rgb(127, 127, 127));
/// assert_eq!(gradient.at(1.0).rgb, Rgb(255, 255, 255));
/// ```
#[derive(Debug, Clone)]
pub struct ColorGradient {
    colors: Vec<Color>,
}

impl ColorGradient {
    /// Make a gradient over the given stops.
    ///
    /// # Panics
    /// A gradient needs at least one stop; an empty list is a precondition
    /// violation.
    pub fn new(colors: Vec<Color>) -> Self {
        assert!(!colors.is_empty(), "a gradient needs at least one color");
        Self { colors }
    }

    /// The gradient's stops, in order.
    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    /// Map a value from 0 to 1 to a color.
    ///
    /// Values at or beyond the ends clamp to the first/last stop. In
    /// between, the `N` stops split `[0, 1]` into `N - 1` equal segments
    /// and the value interpolates linearly inside its segment.
    pub fn at(&self, value: f64) -> Color {
        if value <= 0.0 {
            return self.colors[0].clone();
        } else if value >= 1.0 || self.colors.len() == 1 {
            return self.colors[self.colors.len() - 1].clone();
        }

        let segment_size = 1.0 / (self.colors.len() - 1) as f64;
        let segment = (value / segment_size) as usize;
        let segment_value = (value - segment as f64 * segment_size) / segment_size;
        interpolate(
            &self.colors[segment],
            &self.colors[segment + 1],
            segment_value,
        )
    }
}
