//! End-to-end behavior of the cycle outputs on synthetic series with known
//! structure: a clean 20-bar sine, linear ramps, and degenerate flat lines.

mod common;

use common::{ramp_series, sine_series, unwrap_phase, wobble_series, CYCLE_BARS};
use cycle_ta::indicators::{
    ht_dcperiod, ht_dcphase, ht_phasor, ht_sine, ht_trendline, ht_trendmode,
};

// ==================== Dominant cycle period ====================

/// On a pure 20-bar cycle the measured period must lock close to 20.
#[test]
fn dcperiod_locks_onto_known_cycle() {
    let data = sine_series(200, 10.0);
    let period = ht_dcperiod(&data).unwrap();

    for (i, &value) in period.iter().enumerate().skip(100) {
        assert!(
            (value - CYCLE_BARS as f64).abs() <= 2.0,
            "period at {i} is {value}, expected near {CYCLE_BARS}"
        );
    }
}

/// The adaptive period stays inside its hard [6, 50] band on any input
/// that actually oscillates.
#[test]
fn dcperiod_band_on_oscillating_inputs() {
    for (name, data) in [
        ("sine", sine_series(300, 10.0)),
        ("small sine", sine_series(300, 0.5)),
        ("wobble", wobble_series(300)),
    ] {
        let period = ht_dcperiod(&data).unwrap();
        for (i, &value) in period.iter().enumerate().skip(80) {
            assert!(
                (6.0..=50.0).contains(&value),
                "{name}: period at {i} is {value}"
            );
        }
    }
}

// ==================== Phase ====================

/// Unwrapped phase advances at roughly 360/20 degrees per bar on the
/// 20-bar cycle.
#[test]
fn dcphase_advance_rate_matches_cycle() {
    let data = sine_series(240, 10.0);
    let phase = ht_dcphase(&data).unwrap();
    let unwrapped = unwrap_phase(&phase[100..220]);

    let bars = (unwrapped.len() - 1) as f64;
    let rate = (unwrapped[unwrapped.len() - 1] - unwrapped[0]) / bars;
    let expected = 360.0 / CYCLE_BARS as f64;
    assert!(
        (rate - expected).abs() < 3.0,
        "mean phase rate {rate} deg/bar, expected near {expected}"
    );

    // Never a large jump either direction: wraps removed, steps stay small.
    for pair in unwrapped.windows(2) {
        let step = pair[1] - pair[0];
        assert!(step > -90.0 && step < 90.0, "phase step {step}");
    }
}

// ==================== Sine / LeadSine ====================

/// The lead-sine output leads: on a steady cycle each lead-sine/sine
/// crossing happens before the corresponding sine extremum, an eighth of a
/// cycle ahead on average. Checked indirectly: both stay in [-1, 1] and
/// they cross regularly (twice per cycle).
#[test]
fn sine_pair_crosses_twice_per_cycle() {
    let data = sine_series(240, 10.0);
    let out = ht_sine(&data).unwrap();

    let mut crossings = 0;
    for i in 101..220 {
        let now = out.sine[i] - out.lead_sine[i];
        let before = out.sine[i - 1] - out.lead_sine[i - 1];
        if (now > 0.0 && before <= 0.0) || (now < 0.0 && before >= 0.0) {
            crossings += 1;
        }
    }
    // 119 bars of a 20-bar cycle: expect ~12 crossings, allow slack.
    assert!(
        (8..=16).contains(&crossings),
        "saw {crossings} sine/lead-sine crossings"
    );

    for i in 63..out.sine.len() {
        assert!(out.sine[i].abs() <= 1.0);
        assert!(out.lead_sine[i].abs() <= 1.0);
    }
}

// ==================== Phasor ====================

/// Phasor components on a clean cycle oscillate with amplitude on the
/// order of the price swing, centred on zero.
#[test]
fn phasor_components_detrended_and_bounded() {
    let data = sine_series(300, 10.0);
    let out = ht_phasor(&data).unwrap();

    let tail_i = &out.inphase[100..];
    let tail_q = &out.quadrature[100..];
    let max_i = tail_i.iter().fold(0.0_f64, |m, &x| m.max(x.abs()));
    let max_q = tail_q.iter().fold(0.0_f64, |m, &x| m.max(x.abs()));
    assert!(max_i > 1.0 && max_i < 100.0, "inphase amplitude {max_i}");
    assert!(max_q > 0.5 && max_q < 100.0, "quadrature amplitude {max_q}");
    assert!(tail_i.iter().any(|&x| x > 0.0) && tail_i.iter().any(|&x| x < 0.0));
}

// ==================== Trendline ====================

/// The trendline averages out a full cycle and hugs the cycle mean.
#[test]
fn trendline_sits_at_cycle_mean() {
    let data = sine_series(260, 10.0);
    let trendline = ht_trendline(&data).unwrap();
    for (i, &value) in trendline.iter().enumerate().skip(120) {
        assert!(
            (value - 100.0).abs() < 4.0,
            "trendline at {i} is {value}"
        );
    }
}

// ==================== Trend mode ====================

#[test]
fn trendmode_cycling_on_low_amplitude_cycle() {
    let data = sine_series(260, 1.0);
    let mode = ht_trendmode(&data).unwrap();
    let ones = mode[200..].iter().filter(|&&x| x == 1.0).count();
    assert_eq!(ones, 0, "late bars of a quiet cycle must classify cycling");
}

#[test]
fn trendmode_trending_on_ramp() {
    let data = ramp_series(260, 50.0, 0.5);
    let mode = ht_trendmode(&data).unwrap();
    for (i, &value) in mode.iter().enumerate().skip(230) {
        assert!(value == 1.0, "bar {i} of a ramp classified {value}");
    }
}

// ==================== Degenerate inputs ====================

/// Constant and zero series must flow through every output without
/// producing NaN or infinity past the lookback.
#[test]
fn degenerate_inputs_stay_finite() {
    for data in [vec![100.0_f64; 220], vec![0.0_f64; 220]] {
        let period = ht_dcperiod(&data).unwrap();
        assert!(period[32..].iter().all(|x| x.is_finite()));

        let phase = ht_dcphase(&data).unwrap();
        assert!(phase[63..].iter().all(|x| x.is_finite()));

        let phasor = ht_phasor(&data).unwrap();
        assert!(phasor.inphase[32..].iter().all(|x| x.is_finite()));
        assert!(phasor.quadrature[32..].iter().all(|x| x.is_finite()));

        let sine = ht_sine(&data).unwrap();
        assert!(sine.sine[63..].iter().all(|x| x.abs() <= 1.0));
        assert!(sine.lead_sine[63..].iter().all(|x| x.abs() <= 1.0));

        let trendline = ht_trendline(&data).unwrap();
        assert!(trendline[63..].iter().all(|x| x.is_finite()));

        let mode = ht_trendmode(&data).unwrap();
        assert!(mode[63..].iter().all(|&x| x == 0.0 || x == 1.0));
    }
}

/// A single spike in an otherwise flat series must not destabilize the
/// adaptive period: the rate-of-change clamps bound each bar's move.
#[test]
fn spike_input_keeps_period_bounded() {
    let mut data = vec![100.0_f64; 300];
    data[150] = 500.0;
    let period = ht_dcperiod(&data).unwrap();
    for (i, &value) in period.iter().enumerate().skip(32) {
        assert!(value.is_finite() && value > 0.0 && value <= 50.0, "bar {i}: {value}");
    }
}
