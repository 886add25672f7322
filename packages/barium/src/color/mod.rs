//! Color representations and arithmetic: RGB/HLS types, the named-color
//! table, interpolation, gradients, and capability-gated application to
//! text.

mod apply;
mod gradient;
mod table;
pub use apply::*;
pub use gradient::*;
pub use table::*;

use crate::term::ColorSupport;

/// An 8-bit RGB triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Euclidean distance to another color in RGB space.
    pub fn distance(self, other: Rgb) -> f64 {
        let dr = self.0 as f64 - other.0 as f64;
        let dg = self.1 as f64 - other.1 as f64;
        let db = self.2 as f64 - other.2 as f64;
        (dr * dr + dg * dg + db * db).sqrt()
    }

    /// Convert to HLS.
    pub fn to_hls(self) -> Hls {
        let r = self.0 as f64 / 255.0;
        let g = self.1 as f64 / 255.0;
        let b = self.2 as f64 / 255.0;
        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let lightness = (max + min) / 2.0;
        if max == min {
            // achromatic
            return Hls {
                hue: 0.0,
                saturation: 0.0,
                lightness: lightness * 100.0,
            };
        }
        let delta = max - min;
        let saturation = if lightness > 0.5 {
            delta / (2.0 - max - min)
        } else {
            delta / (max + min)
        };
        let hue = if max == r {
            ((g - b) / delta).rem_euclid(6.0)
        } else if max == g {
            (b - r) / delta + 2.0
        } else {
            (r - g) / delta + 4.0
        };
        Hls {
            hue: hue * 60.0,
            saturation: saturation * 100.0,
            lightness: lightness * 100.0,
        }
    }
}

impl std::fmt::Display for Rgb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.0, self.1, self.2)
    }
}

/// Hue, saturation, lightness.
///
/// Hue is a value between 0 and 360, saturation and lightness are between
/// 0(%) and 100(%).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hls {
    pub hue: f64,
    pub saturation: f64,
    pub lightness: f64,
}

/// A named color, carried in RGB and HLS simultaneously plus its index in
/// the 256-entry terminal palette.
///
/// The RGB and HLS channels are kept mutually consistent: construct with
/// [`Color::new`] to derive HLS, or [`Color::with_hls`] if you computed it
/// yourself.
#[derive(Debug, Clone, PartialEq)]
pub struct Color {
    pub rgb: Rgb,
    pub hls: Hls,
    pub name: String,
    pub xterm: u8,
}

impl Color {
    /// Make a color, deriving the HLS channels from `rgb`.
    pub fn new(rgb: Rgb, name: impl Into<String>, xterm: u8) -> Self {
        Self {
            rgb,
            hls: rgb.to_hls(),
            name: name.into(),
            xterm,
        }
    }

    /// Make a color with explicit HLS channels. The caller is responsible
    /// for keeping them consistent with `rgb`.
    pub fn with_hls(rgb: Rgb, hls: Hls, name: impl Into<String>, xterm: u8) -> Self {
        Self {
            rgb,
            hls,
            name: name.into(),
            xterm,
        }
    }

    /// Color the foreground of `text`, encoded for `support`.
    ///
    /// True color emits `38;2;r;g;b`, the palette levels emit `38;5;index`,
    /// and no support returns the text unchanged.
    pub fn fg(&self, text: &str, support: ColorSupport) -> String {
        self.sgr_color(38, 39, text, support)
    }

    /// Color the background of `text`, encoded for `support`.
    pub fn bg(&self, text: &str, support: ColorSupport) -> String {
        self.sgr_color(48, 49, text, support)
    }

    fn sgr_color(&self, open: u8, close: u8, text: &str, support: ColorSupport) -> String {
        match support {
            ColorSupport::None => text.to_string(),
            ColorSupport::TrueColor => {
                let Rgb(r, g, b) = self.rgb;
                format!("\x1b[{open};2;{r};{g};{b}m{text}\x1b[{close}m")
            }
            ColorSupport::Xterm | ColorSupport::Xterm256 => {
                format!("\x1b[{open};5;{}m{text}\x1b[{close}m", self.xterm)
            }
        }
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Interpolate between two colors based on a value between 0 and 1.
///
/// `t <= 0` returns `a` and `t >= 1` returns `b`; in between, the RGB
/// channels (truncated to integers) and HLS channels interpolate linearly
/// and independently. The name and palette index are taken from `a` below
/// the midpoint and from `b` at or above it — this tie-break is cosmetic
/// (it affects display only, never the channels) and is kept as documented
/// behavior.
pub fn interpolate(a: &Color, b: &Color, t: f64) -> Color {
    if t <= 0.0 {
        return a.clone();
    } else if t >= 1.0 {
        return b.clone();
    }

    let Rgb(r1, g1, b1) = a.rgb;
    let Rgb(r2, g2, b2) = b.rgb;
    let rgb = Rgb(
        (r1 as f64 + (r2 as f64 - r1 as f64) * t) as u8,
        (g1 as f64 + (g2 as f64 - g1 as f64) * t) as u8,
        (b1 as f64 + (b2 as f64 - b1 as f64) * t) as u8,
    );

    let hls = Hls {
        hue: a.hls.hue + (b.hls.hue - a.hls.hue) * t,
        saturation: a.hls.saturation + (b.hls.saturation - a.hls.saturation) * t,
        lightness: a.hls.lightness + (b.hls.lightness - a.hls.lightness) * t,
    };

    let closer = if t < 0.5 { a } else { b };
    Color::with_hls(rgb, hls, closer.name.clone(), closer.xterm)
}
