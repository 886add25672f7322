use super::{Color, ColorGradient};
use crate::term::ColorSupport;

/// A color slot holding either a solid color or a gradient evaluated at the
/// current progress.
#[derive(Debug, Clone)]
pub enum ColorSpec {
    Solid(Color),
    Gradient(ColorGradient),
}

impl ColorSpec {
    fn pick(&self, value: f64) -> Color {
        match self {
            ColorSpec::Solid(color) => color.clone(),
            ColorSpec::Gradient(gradient) => gradient.at(value),
        }
    }
}

impl From<Color> for ColorSpec {
    fn from(color: Color) -> Self {
        Self::Solid(color)
    }
}

impl From<ColorGradient> for ColorSpec {
    fn from(gradient: ColorGradient) -> Self {
        Self::Gradient(gradient)
    }
}

/// Apply colors/gradients to a string depending on the given percentage.
///
/// When `percentage` is `None`, the `fg_none` and `bg_none` colors are used.
/// Otherwise the `fg` and `bg` slots are used; a gradient slot is evaluated
/// at `percentage / 100`. Foreground is applied first, then background,
/// each only if present — an empty slot is a pass-through, never an error.
pub fn apply_colors(
    text: &str,
    percentage: Option<f64>,
    support: ColorSupport,
    fg: Option<&ColorSpec>,
    bg: Option<&ColorSpec>,
    fg_none: Option<&Color>,
    bg_none: Option<&Color>,
) -> String {
    let (fg_color, bg_color) = match percentage {
        None => (fg_none.cloned(), bg_none.cloned()),
        Some(percentage) => (
            fg.map(|spec| spec.pick(percentage / 100.0)),
            bg.map(|spec| spec.pick(percentage / 100.0)),
        ),
    };

    let mut text = match fg_color {
        Some(color) => color.fg(text, support),
        None => text.to_string(),
    };
    if let Some(color) = bg_color {
        text = color.bg(&text, support);
    }
    text
}
