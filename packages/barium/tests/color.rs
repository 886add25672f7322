use barium::ColorSupport;
use barium::color::{
    Color, ColorGradient, ColorSpec, ColorTable, Rgb, apply_colors, interpolate, nearest_basic,
    table,
};

fn black() -> Color {
    Color::new(Rgb(0, 0, 0), "black", 0)
}

fn white() -> Color {
    Color::new(Rgb(255, 255, 255), "intense white", 15)
}

fn red() -> Color {
    Color::new(Rgb(255, 0, 0), "intense red", 9)
}

#[test]
fn interpolate_clamps_at_the_ends() {
    let (a, b) = (black(), white());
    assert_eq!(interpolate(&a, &b, 0.0), a);
    assert_eq!(interpolate(&a, &b, -3.0), a);
    assert_eq!(interpolate(&a, &b, 1.0), b);
    assert_eq!(interpolate(&a, &b, 2.0), b);
}

#[test]
fn interpolate_with_itself_is_identity() {
    let a = red();
    for t in [0.0, 0.1, 0.25, 0.5, 0.75, 0.9, 1.0] {
        assert_eq!(interpolate(&a, &a, t), a);
    }
}

#[test]
fn interpolate_truncates_rgb_channels() {
    // 127.5 truncates to 127
    let mid = interpolate(&black(), &white(), 0.5);
    assert_eq!(mid.rgb, Rgb(127, 127, 127));
}

#[test]
fn interpolate_name_tie_break() {
    let (a, b) = (black(), white());
    assert_eq!(interpolate(&a, &b, 0.49).name, "black");
    assert_eq!(interpolate(&a, &b, 0.49).xterm, 0);
    assert_eq!(interpolate(&a, &b, 0.5).name, "intense white");
    assert_eq!(interpolate(&a, &b, 0.5).xterm, 15);
}

#[test]
fn gradient_hits_the_stops() {
    let gradient = ColorGradient::new(vec![black(), red(), white()]);
    assert_eq!(gradient.at(0.0), black());
    assert_eq!(gradient.at(1.0), white());
    // 0.5 is exactly the middle stop of three
    assert_eq!(gradient.at(0.5).rgb, red().rgb);
}

#[test]
fn gradient_is_continuous() {
    let gradient = ColorGradient::new(vec![black(), red(), white()]);
    let mut previous = gradient.at(0.0).rgb;
    for i in 1..=100 {
        let rgb = gradient.at(i as f64 / 100.0).rgb;
        assert!((rgb.0 as i32 - previous.0 as i32).abs() <= 8);
        assert!((rgb.1 as i32 - previous.1 as i32).abs() <= 8);
        assert!((rgb.2 as i32 - previous.2 as i32).abs() <= 8);
        previous = rgb;
    }
}

#[test]
fn gradient_with_one_stop_is_constant() {
    let gradient = ColorGradient::new(vec![red()]);
    for t in [0.0, 0.3, 0.7, 1.0] {
        assert_eq!(gradient.at(t), red());
    }
}

#[test]
#[should_panic(expected = "at least one color")]
fn gradient_with_no_stops_fails_fast() {
    let _ = ColorGradient::new(Vec::new());
}

#[test]
fn rgb_to_hls_known_values() {
    let hls = Rgb(255, 0, 0).to_hls();
    assert!((hls.hue - 0.0).abs() < 1e-9);
    assert!((hls.saturation - 100.0).abs() < 1e-9);
    assert!((hls.lightness - 50.0).abs() < 1e-9);

    let hls = Rgb(0, 255, 0).to_hls();
    assert!((hls.hue - 120.0).abs() < 1e-9);

    let hls = Rgb(0, 0, 255).to_hls();
    assert!((hls.hue - 240.0).abs() < 1e-9);

    // achromatic
    let hls = Rgb(255, 255, 255).to_hls();
    assert_eq!(hls.saturation, 0.0);
    assert!((hls.lightness - 100.0).abs() < 1e-9);
}

#[test]
fn table_appends_duplicates() {
    let mut table = ColorTable::new();
    let first = table.register(Rgb(255, 0, 0), None, "red", 9);
    table.register(Rgb(200, 0, 0), None, "red", 1);
    assert_eq!(table.by_name("red"), Some(&first));
    assert_eq!(table.by_rgb(Rgb(255, 0, 0)), Some(&first));
}

#[test]
fn table_lowername_lookup() {
    let mut table = ColorTable::new();
    let color = table.register(Rgb(0, 128, 0), None, "Forest Green", 28);
    assert_eq!(table.by_lowername("forest green"), Some(&color));
    assert_eq!(table.by_lowername("FOREST GREEN"), Some(&color));
    assert_eq!(table.by_name("forest green"), None);
}

#[test]
fn process_table_has_the_basic_palette() {
    assert_eq!(table().by_name("black").map(|c| c.xterm), Some(0));
    assert_eq!(table().by_xterm(9).map(|c| c.name.as_str()), Some("intense red"));
    assert_eq!(
        table().by_rgb(Rgb(255, 255, 255)).map(|c| c.name.as_str()),
        Some("intense white")
    );
}

#[test]
fn nearest_basic_colors() {
    assert_eq!(nearest_basic(Rgb(0, 0, 0)).name, "black");
    assert_eq!(nearest_basic(Rgb(45, 45, 45)).name, "black");
    assert_eq!(nearest_basic(Rgb(128, 0, 128)).name, "magenta");
    assert_eq!(nearest_basic(Rgb(255, 255, 255)).name, "intense white");
    assert_eq!(nearest_basic(Rgb(0, 255, 0)).name, "intense green");
}

#[test]
fn fg_bg_encoding_per_support_level() {
    let color = red();
    assert_eq!(color.fg("x", ColorSupport::None), "x");
    assert_eq!(
        color.fg("x", ColorSupport::TrueColor),
        "\x1b[38;2;255;0;0mx\x1b[39m"
    );
    assert_eq!(
        color.fg("x", ColorSupport::Xterm256),
        "\x1b[38;5;9mx\x1b[39m"
    );
    assert_eq!(color.fg("x", ColorSupport::Xterm), "\x1b[38;5;9mx\x1b[39m");
    assert_eq!(
        color.bg("x", ColorSupport::TrueColor),
        "\x1b[48;2;255;0;0mx\x1b[49m"
    );
    assert_eq!(color.bg("x", ColorSupport::None), "x");
}

#[test]
fn apply_colors_foreground_then_background() {
    let fg = ColorSpec::from(red());
    let bg = ColorSpec::from(black());
    let styled = apply_colors(
        "x",
        Some(50.0),
        ColorSupport::Xterm256,
        Some(&fg),
        Some(&bg),
        None,
        None,
    );
    // background wraps the foreground-styled text
    assert_eq!(styled, "\x1b[48;5;0m\x1b[38;5;9mx\x1b[39m\x1b[49m");
}

#[test]
fn apply_colors_gradient_follows_percentage() {
    let gradient = ColorSpec::from(ColorGradient::new(vec![black(), white()]));
    let none = apply_colors(
        "x",
        Some(0.0),
        ColorSupport::TrueColor,
        Some(&gradient),
        None,
        None,
        None,
    );
    assert_eq!(none, "\x1b[38;2;0;0;0mx\x1b[39m");
    let full = apply_colors(
        "x",
        Some(100.0),
        ColorSupport::TrueColor,
        Some(&gradient),
        None,
        None,
        None,
    );
    assert_eq!(full, "\x1b[38;2;255;255;255mx\x1b[39m");
}

#[test]
fn apply_colors_none_percentage_uses_none_slots() {
    let fg = ColorSpec::from(red());
    let fallback = black();
    let styled = apply_colors(
        "x",
        None,
        ColorSupport::Xterm256,
        Some(&fg),
        None,
        Some(&fallback),
        None,
    );
    assert_eq!(styled, "\x1b[38;5;0mx\x1b[39m");
}

#[test]
fn apply_colors_without_slots_is_passthrough() {
    assert_eq!(
        apply_colors("plain", Some(42.0), ColorSupport::TrueColor, None, None, None, None),
        "plain"
    );
    assert_eq!(
        apply_colors("plain", None, ColorSupport::TrueColor, None, None, None, None),
        "plain"
    );
}
