mod common;
use common::SharedWriter;

use barium::widget::{
    AnimatedMarker, BarGlyph, Counter, Label, Percentage, Timer, Variable, Widget, default_widgets,
    default_widgets_unknown_length, si_bytes,
};
use barium::{ColorChoice, ColorSupport, ProgressBar};
use barium::color::{Color, ColorGradient, Rgb};

fn bar_at(value: f64, max: Option<f64>) -> ProgressBar {
    let mut builder = barium::bar()
        .term_width(40)
        .color(ColorChoice::Never)
        .writer(SharedWriter::new());
    if let Some(max) = max {
        builder = builder.max_value(max);
    }
    let mut bar = builder.build().unwrap();
    bar.update(value).unwrap();
    bar
}

#[test]
fn percentage_widget() {
    let bar = bar_at(5.0, Some(10.0));
    assert_eq!(Percentage::new().render(bar.state()), " 50%");

    let bar = bar_at(10.0, Some(10.0));
    assert_eq!(Percentage::new().render(bar.state()), "100%");

    let bar = bar_at(5.0, None);
    assert_eq!(Percentage::new().render(bar.state()), "N/A%");
}

#[test]
fn counter_widget() {
    let bar = bar_at(5.0, Some(10.0));
    assert_eq!(Counter::new().render(bar.state()), "5");
    assert_eq!(Counter::with_total().render(bar.state()), "5 of 10");

    let bar = bar_at(5.0, None);
    assert_eq!(Counter::with_total().render(bar.state()), "5");
}

#[test]
fn counter_widget_in_bytes() {
    let bar = bar_at(1_200_000.0, Some(2_000_000.0));
    assert_eq!(
        Counter::with_total().bytes().render(bar.state()),
        "1.2 MB of 2.0 MB"
    );
}

#[test]
fn si_byte_units() {
    assert_eq!(si_bytes(0.0), "0 B");
    assert_eq!(si_bytes(500.0), "500 B");
    assert_eq!(si_bytes(1200.0), "1.2 kB");
    assert_eq!(si_bytes(2_500_000.0), "2.5 MB");
    assert_eq!(si_bytes(3_000_000_000.0), "3.0 GB");
}

#[test]
fn label_widget_and_str_conversion() {
    let bar = bar_at(0.0, None);
    assert_eq!(Label::new(" | ").render(bar.state()), " | ");

    let mut boxed: Box<dyn Widget> = " | ".into();
    assert_eq!(boxed.render(bar.state()), " | ");
}

#[test]
fn bar_glyph_fill() {
    let bar = bar_at(5.0, Some(10.0));
    let glyph = BarGlyph::new().width(12).render(bar.state());
    assert_eq!(glyph, "|#####     |");

    let bar = bar_at(10.0, Some(10.0));
    let glyph = BarGlyph::new().width(12).render(bar.state());
    assert_eq!(glyph, "|##########|");

    // unknown length renders an empty frame
    let bar = bar_at(5.0, None);
    let glyph = BarGlyph::new().width(12).render(bar.state());
    assert_eq!(glyph, "|          |");
}

#[test]
fn bar_glyph_custom_chars() {
    let bar = bar_at(5.0, Some(10.0));
    let glyph = BarGlyph::new()
        .width(12)
        .chars('[', '=', '.', ']')
        .render(bar.state());
    assert_eq!(glyph, "[=====.....]");
}

#[test]
fn bar_glyph_gradient_fill() {
    let mut bar = barium::bar()
        .max_value(10.0)
        .term_width(40)
        .color(ColorChoice::Fixed(ColorSupport::TrueColor))
        .writer(SharedWriter::new())
        .build()
        .unwrap();
    bar.update(5.0).unwrap();

    let gradient = ColorGradient::new(vec![
        Color::new(Rgb(255, 0, 0), "intense red", 9),
        Color::new(Rgb(0, 255, 0), "intense green", 10),
    ]);
    let glyph = BarGlyph::new().width(12).fg(gradient).render(bar.state());
    // gradient evaluated at 50%: (127, 127, 0)
    assert!(glyph.contains("\x1b[38;2;127;127;0m"));
    assert!(glyph.starts_with('|'));
    assert!(glyph.ends_with('|'));
}

#[test]
fn timer_widget() {
    let bar = bar_at(5.0, Some(10.0));
    let text = Timer::new().render(bar.state());
    assert_eq!(text, "Elapsed 0:00:00");
}

#[test]
fn eta_widget_needs_progress() {
    let bar = bar_at(0.0, None);
    assert_eq!(
        barium::widget::Eta::new().render(bar.state()),
        "ETA --:--:--"
    );
}

#[test]
fn spinner_advances_and_settles() {
    let out = SharedWriter::new();
    let mut bar = barium::bar()
        .term_width(40)
        .color(ColorChoice::Never)
        .writer(out.clone())
        .build()
        .unwrap();
    bar.update(1.0).unwrap();

    let mut spinner = AnimatedMarker::with_frames(vec!['a', 'b', 'c'], '*');
    assert_eq!(spinner.render(bar.state()), "a");
    assert_eq!(spinner.render(bar.state()), "b");
    assert_eq!(spinner.render(bar.state()), "c");
    assert_eq!(spinner.render(bar.state()), "a");

    bar.finish().unwrap();
    assert_eq!(spinner.render(bar.state()), "*");
}

#[test]
fn variable_widget() {
    let out = SharedWriter::new();
    let mut bar = barium::bar()
        .variable("step", "init")
        .term_width(40)
        .color(ColorChoice::Never)
        .writer(out.clone())
        .build()
        .unwrap();
    assert_eq!(Variable::new("step").render(bar.state()), "step: init");

    bar.set_variable("step", "load");
    assert_eq!(Variable::new("step").render(bar.state()), "step: load");

    assert_eq!(Variable::new("other").render(bar.state()), "other: -");
}

#[test]
fn stock_widget_lines() {
    let bounded = default_widgets();
    assert!(!bounded.is_empty());
    let unknown = default_widgets_unknown_length();
    assert!(!unknown.is_empty());

    // the bounded line renders percentage, counter, frame, timers
    let mut bar = bar_at(5.0, Some(10.0));
    bar.force_update(5.0).unwrap();
    let mut line = String::new();
    for mut widget in bounded {
        line.push_str(&widget.render(bar.state()));
    }
    assert!(line.contains(" 50%"));
    assert!(line.contains("5 of 10"));
    assert!(line.contains('|'));
    assert!(line.contains("Elapsed"));
    assert!(line.contains("ETA"));
}
