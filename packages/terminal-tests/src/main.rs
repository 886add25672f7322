//! Manual terminal checks for barium.
//!
//! Progress bar behavior (in-place rewrite, throttling, resize handling,
//! colors) can only really be judged against a live terminal, so this
//! binary renders the interesting variants for eyeballing:
//!
//! ```text
//! cargo run -p terminal-tests -- bounded
//! cargo run -p terminal-tests -- gradient --color always
//! ```

use std::time::Duration;

use barium::color::{Color, ColorGradient, Rgb};
use barium::widget::{AnimatedMarker, BarGlyph, Counter, Eta, Percentage, Timer, Variable};
use barium::{ColorChoice, progress};
use clap::Parser;

#[derive(clap::ValueEnum, Clone, Copy)]
enum Demo {
    /// A bounded bar with the stock widget line
    Bounded,
    /// An unbounded spinner/counter line
    Unbounded,
    /// A byte-transfer bar
    Bytes,
    /// A gradient-filled bar glyph
    Gradient,
    /// The iterator adapter, abandoned halfway through
    Abandoned,
    /// User variables updated through the progress! macro
    Variables,
}

#[derive(clap::Parser)]
struct Cli {
    /// Which rendering to show
    #[clap(value_enum)]
    demo: Demo,
    /// Color behavior
    #[clap(long, value_enum, default_value_t = ColorChoice::Auto)]
    color: ColorChoice,
    /// Milliseconds to sleep per step
    #[clap(long, default_value_t = 40)]
    step_ms: u64,
}

fn main() -> barium::Result<()> {
    let args = Cli::parse();
    let step = Duration::from_millis(args.step_ms);
    match args.demo {
        Demo::Bounded => bounded(args.color, step),
        Demo::Unbounded => unbounded(args.color, step),
        Demo::Bytes => bytes(args.color, step),
        Demo::Gradient => gradient(args.color, step),
        Demo::Abandoned => abandoned(args.color, step),
        Demo::Variables => variables(args.color, step),
    }
}

fn bounded(color: ColorChoice, step: Duration) -> barium::Result<()> {
    let mut bar = barium::bar().max_value(100.0).color(color).build()?;
    bar.start()?;
    for i in 0..100 {
        std::thread::sleep(step);
        bar.update((i + 1) as f64)?;
    }
    bar.finish()
}

fn unbounded(color: ColorChoice, step: Duration) -> barium::Result<()> {
    let mut bar = barium::bar().color(color).build()?;
    bar.start()?;
    for _ in 0..100 {
        std::thread::sleep(step);
        bar.increment(1.0)?;
    }
    bar.finish()
}

fn bytes(color: ColorChoice, step: Duration) -> barium::Result<()> {
    let total = 80_000_000.0;
    let mut bar = barium::bar()
        .max_value(total)
        .color(color)
        .widgets(vec![
            Box::new(Percentage::new()),
            " ".into(),
            Box::new(Counter::with_total().bytes()),
            " ".into(),
            Box::new(BarGlyph::new()),
            " ".into(),
            Box::new(Eta::new()),
        ])
        .build()?;
    bar.start()?;
    let mut sent = 0.0;
    while sent < total {
        std::thread::sleep(step);
        sent += 1_000_000.0;
        bar.update(sent.min(total))?;
    }
    bar.finish()
}

fn gradient(color: ColorChoice, step: Duration) -> barium::Result<()> {
    let ramp = ColorGradient::new(vec![
        Color::new(Rgb(255, 0, 0), "intense red", 9),
        Color::new(Rgb(255, 255, 0), "intense yellow", 11),
        Color::new(Rgb(0, 255, 0), "intense green", 10),
    ]);
    let mut bar = barium::bar()
        .max_value(100.0)
        .color(color)
        .widgets(vec![
            Box::new(Percentage::new()),
            " ".into(),
            Box::new(BarGlyph::new().width(50).chars('|', '█', ' ', '|').fg(ramp)),
            " ".into(),
            Box::new(Timer::new()),
        ])
        .build()?;
    bar.start()?;
    for i in 0..100 {
        std::thread::sleep(step);
        bar.update((i + 1) as f64)?;
    }
    bar.finish()
}

fn abandoned(color: ColorChoice, step: Duration) -> barium::Result<()> {
    let bar = barium::bar().color(color).max_value(100.0).build()?;
    for _ in bar.wrap(0..100).take(50) {
        std::thread::sleep(step);
    }
    // the adapter finished dirty, the line should not show 100%
    Ok(())
}

fn variables(color: ColorChoice, step: Duration) -> barium::Result<()> {
    let mut bar = barium::bar()
        .max_value(30.0)
        .color(color)
        .widgets(vec![
            Box::new(AnimatedMarker::new()),
            " ".into(),
            Box::new(Percentage::new()),
            " ".into(),
            Box::new(Variable::new("file")),
        ])
        .build()?;
    bar.start()?;
    for i in 0..30 {
        std::thread::sleep(step);
        progress!(bar = (i + 1) as f64, file = format!("chunk-{i:02}.dat"))?;
    }
    bar.finish()
}
