use std::time::Duration;

use barium::algo::{
    DoubleExponentialMovingAverage, ExponentialMovingAverage, SmoothingAlgorithm as _,
};

#[test]
fn ema_sequence() {
    // alpha 0.5 from zero: 5, 7.5, 8.75, 9.375, ... (exact in binary)
    let mut ema = ExponentialMovingAverage::new(0.5);
    assert_eq!(ema.update(10.0, Duration::ZERO), 5.0);
    assert_eq!(ema.update(10.0, Duration::ZERO), 7.5);
    assert_eq!(ema.update(10.0, Duration::ZERO), 8.75);
    assert_eq!(ema.update(10.0, Duration::ZERO), 9.375);
}

#[test]
fn ema_converges_monotonically() {
    let mut ema = ExponentialMovingAverage::new(0.5);
    let mut previous = 0.0;
    for _ in 0..50 {
        let value = ema.update(10.0, Duration::ZERO);
        assert!(value > previous);
        assert!(value < 10.0);
        previous = value;
    }
    assert!((previous - 10.0).abs() < 1e-9);
}

#[test]
fn ema_ignores_elapsed() {
    let mut a = ExponentialMovingAverage::new(0.3);
    let mut b = ExponentialMovingAverage::new(0.3);
    for value in [3.0, 1.0, 4.0, 1.0, 5.0] {
        let x = a.update(value, Duration::ZERO);
        let y = b.update(value, Duration::from_secs(7));
        assert_eq!(x, y);
    }
}

#[test]
fn dema_sequence() {
    // alpha 0.5 from zero: ema1 = 5, ema2 = 2.5 -> 7.5; then 10.0, 10.625
    let mut dema = DoubleExponentialMovingAverage::new(0.5);
    assert_eq!(dema.update(10.0, Duration::ZERO), 7.5);
    assert_eq!(dema.update(10.0, Duration::ZERO), 10.0);
    assert_eq!(dema.update(10.0, Duration::ZERO), 10.625);
}

#[test]
fn dema_tracks_faster_than_ema() {
    let mut ema = ExponentialMovingAverage::new(0.5);
    let mut dema = DoubleExponentialMovingAverage::new(0.5);
    let mut last_ema = 0.0;
    let mut last_dema = 0.0;
    for _ in 0..3 {
        last_ema = ema.update(100.0, Duration::ZERO);
        last_dema = dema.update(100.0, Duration::ZERO);
    }
    assert!(last_dema > last_ema);
}
