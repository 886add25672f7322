use std::collections::HashMap;
use std::sync::LazyLock;

use super::{Color, Hls, Rgb};

/// Registry of named colors with four lookup indices.
///
/// Registering the same name or the same RGB twice appends to the matching
/// entry rather than overwriting it; lookups return the first registration.
/// The process-wide table with the basic palette pre-registered is available
/// through [`table`].
#[derive(Default)]
pub struct ColorTable {
    by_name: HashMap<String, Vec<Color>>,
    by_lowername: HashMap<String, Vec<Color>>,
    by_rgb: HashMap<Rgb, Vec<Color>>,
    by_xterm: HashMap<u8, Color>,
}

impl ColorTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a color. The HLS channels are derived from `rgb` unless
    /// given explicitly.
    pub fn register(&mut self, rgb: Rgb, hls: Option<Hls>, name: &str, xterm: u8) -> Color {
        let color = match hls {
            Some(hls) => Color::with_hls(rgb, hls, name, xterm),
            None => Color::new(rgb, name, xterm),
        };
        self.by_name
            .entry(name.to_string())
            .or_default()
            .push(color.clone());
        self.by_lowername
            .entry(name.to_ascii_lowercase())
            .or_default()
            .push(color.clone());
        self.by_rgb.entry(rgb).or_default().push(color.clone());
        self.by_xterm.insert(xterm, color.clone());
        color
    }

    /// Look up by exact name. First registration wins.
    pub fn by_name(&self, name: &str) -> Option<&Color> {
        self.by_name.get(name).and_then(|x| x.first())
    }

    /// Look up by case-insensitive name. First registration wins.
    pub fn by_lowername(&self, name: &str) -> Option<&Color> {
        self.by_lowername
            .get(&name.to_ascii_lowercase())
            .and_then(|x| x.first())
    }

    /// Look up by RGB value. First registration wins.
    pub fn by_rgb(&self, rgb: Rgb) -> Option<&Color> {
        self.by_rgb.get(&rgb).and_then(|x| x.first())
    }

    /// Look up by palette index.
    pub fn by_xterm(&self, xterm: u8) -> Option<&Color> {
        self.by_xterm.get(&xterm)
    }
}

/// The 16 basic colors, in the enumeration order used for nearest-color
/// ties, with their standard palette indices.
static BASIC_PALETTE: LazyLock<[Color; 16]> = LazyLock::new(|| {
    [
        Color::new(Rgb(0, 0, 0), "black", 0),
        Color::new(Rgb(0, 0, 128), "blue", 4),
        Color::new(Rgb(0, 128, 0), "green", 2),
        Color::new(Rgb(0, 128, 128), "cyan", 6),
        Color::new(Rgb(128, 0, 0), "red", 1),
        Color::new(Rgb(128, 0, 128), "magenta", 5),
        Color::new(Rgb(128, 128, 0), "yellow", 3),
        Color::new(Rgb(192, 192, 192), "grey", 7),
        Color::new(Rgb(128, 128, 128), "intense black", 8),
        Color::new(Rgb(0, 0, 255), "intense blue", 12),
        Color::new(Rgb(0, 255, 0), "intense green", 10),
        Color::new(Rgb(0, 255, 255), "intense cyan", 14),
        Color::new(Rgb(255, 0, 0), "intense red", 9),
        Color::new(Rgb(255, 0, 255), "intense magenta", 13),
        Color::new(Rgb(255, 255, 0), "intense yellow", 11),
        Color::new(Rgb(255, 255, 255), "intense white", 15),
    ]
});

static TABLE: LazyLock<ColorTable> = LazyLock::new(|| {
    let mut table = ColorTable::new();
    for color in BASIC_PALETTE.iter() {
        table.register(color.rgb, Some(color.hls), &color.name, color.xterm);
    }
    table
});

/// The process-wide color table, built once with the basic palette.
pub fn table() -> &'static ColorTable {
    &TABLE
}

/// The basic 16-color palette in enumeration order.
pub fn basic_palette() -> &'static [Color; 16] {
    &BASIC_PALETTE
}

/// Find the closest of the 16 basic colors by Euclidean RGB distance.
///
/// Ties resolve to the first palette entry in enumeration order.
///
/// ```rust
/// use barium::color::{Rgb, nearest_basic};
/// assert_eq!(nearest_basic(Rgb(45, 45, 45)).name, "black");
/// assert_eq!(nearest_basic(Rgb(0, 255, 0)).name, "intense green");
/// ```
pub fn nearest_basic(rgb: Rgb) -> &'static Color {
    let mut closest = &BASIC_PALETTE[0];
    let mut min_distance = f64::INFINITY;
    for color in BASIC_PALETTE.iter() {
        let distance = rgb.distance(color.rgb);
        if distance < min_distance {
            min_distance = distance;
            closest = color;
        }
    }
    closest
}
