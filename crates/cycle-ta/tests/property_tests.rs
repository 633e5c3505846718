//! Property-based tests using proptest.
//!
//! Invariants that must hold for arbitrary positive price series: output
//! shapes, NaN prefixes, hard value bounds, and determinism.

use proptest::prelude::*;

use cycle_ta::indicators::{
    ht_dcperiod, ht_dcperiod_range, ht_dcphase, ht_phasor, ht_sine, ht_trendline, ht_trendmode,
    wma,
};

/// Generate a random price series (all positive, away from zero).
fn arb_price_series(min_len: usize, max_len: usize) -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(1.0..1000.0_f64, min_len..=max_len)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Output length equals input length for every full-series output.
    #[test]
    fn prop_output_lengths(data in arb_price_series(64, 200)) {
        let n = data.len();
        prop_assert_eq!(ht_dcperiod(&data).unwrap().len(), n);
        prop_assert_eq!(ht_dcphase(&data).unwrap().len(), n);
        prop_assert_eq!(ht_trendline(&data).unwrap().len(), n);
        prop_assert_eq!(ht_trendmode(&data).unwrap().len(), n);
        let phasor = ht_phasor(&data).unwrap();
        prop_assert_eq!(phasor.inphase.len(), n);
        prop_assert_eq!(phasor.quadrature.len(), n);
        let sine = ht_sine(&data).unwrap();
        prop_assert_eq!(sine.sine.len(), n);
        prop_assert_eq!(sine.lead_sine.len(), n);
    }

    /// Exactly the lookback prefix is NaN; everything after is finite.
    #[test]
    fn prop_nan_prefix(data in arb_price_series(64, 200)) {
        let period = ht_dcperiod(&data).unwrap();
        prop_assert_eq!(cycle_ta::count_nan_prefix(&period), 32);
        prop_assert_eq!(cycle_ta::count_nans(&period), 32);
        prop_assert!(period[32..].iter().all(|x| x.is_finite()));

        let phase = ht_dcphase(&data).unwrap();
        prop_assert_eq!(cycle_ta::count_nan_prefix(&phase), 63);
        prop_assert!(phase[63..].iter().all(|x| x.is_finite()));
    }

    /// The reported period never exceeds the 50-bar hard ceiling and is
    /// always positive.
    #[test]
    fn prop_period_hard_bounds(data in arb_price_series(64, 250)) {
        let period = ht_dcperiod(&data).unwrap();
        for &value in &period[32..] {
            prop_assert!(value > 0.0);
            prop_assert!(value <= 50.0);
        }
    }

    /// Sine outputs always stay inside [-1, 1].
    #[test]
    fn prop_sine_bounds(data in arb_price_series(64, 200)) {
        let out = ht_sine(&data).unwrap();
        for i in 63..data.len() {
            prop_assert!(out.sine[i] >= -1.0 && out.sine[i] <= 1.0);
            prop_assert!(out.lead_sine[i] >= -1.0 && out.lead_sine[i] <= 1.0);
        }
    }

    /// Trend mode is strictly binary past the lookback.
    #[test]
    fn prop_trendmode_binary(data in arb_price_series(64, 200)) {
        let mode = ht_trendmode(&data).unwrap();
        for &value in &mode[63..] {
            prop_assert!(value == 0.0 || value == 1.0);
        }
    }

    /// Two identical calls agree bit for bit.
    #[test]
    fn prop_deterministic(data in arb_price_series(64, 150)) {
        let a = ht_dcphase(&data).unwrap();
        let b = ht_dcphase(&data).unwrap();
        for (x, y) in a.iter().zip(&b) {
            prop_assert_eq!(x.to_bits(), y.to_bits());
        }
    }

    /// The range API agrees with the full-series API on shared bars.
    #[test]
    fn prop_range_matches_full(data in arb_price_series(80, 200)) {
        let full = ht_dcperiod(&data).unwrap();
        let mut out = vec![0.0_f64; data.len()];
        let span = ht_dcperiod_range(&data, 0, data.len() - 1, 0, &mut out).unwrap();
        prop_assert_eq!(span.first_valid, 32);
        for k in 0..span.len {
            prop_assert_eq!(out[k].to_bits(), full[32 + k].to_bits());
        }
    }

    /// WMA of a window lies between the window's extremes.
    #[test]
    fn prop_wma_within_window_bounds(
        data in arb_price_series(20, 120),
        period in 1usize..=10,
    ) {
        if data.len() >= period {
            let result = wma(&data, period).unwrap();
            for i in (period - 1)..data.len() {
                let window = &data[i + 1 - period..=i];
                let lo = window.iter().cloned().fold(f64::INFINITY, f64::min);
                let hi = window.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
                prop_assert!(result[i] >= lo - 1e-6 && result[i] <= hi + 1e-6);
            }
        }
    }
}
