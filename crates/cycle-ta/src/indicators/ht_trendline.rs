//! `HT_TRENDLINE` (Hilbert Transform - Instantaneous Trendline)
//!
//! A moving average whose window is the measured dominant-cycle period, so
//! exactly one cycle of price action is averaged out. The per-bar averages
//! are passed through a 4/3/2/1-weighted recursive smoother before being
//! emitted.

use super::ht_core::{effective_start, HtPipeline, PHASE_LOOKBACK, PHASE_SETTLE_BARS};
use super::OutputSpan;
use crate::error::{Error, Result};
use crate::traits::{validate_range, SeriesElement, ValidatedInput};

/// Returns the lookback period for `HT_TRENDLINE`.
#[inline]
#[must_use]
pub const fn ht_trendline_lookback(unstable_period: usize) -> usize {
    PHASE_LOOKBACK + unstable_period
}

/// Returns the minimum input length required for `HT_TRENDLINE`.
#[inline]
#[must_use]
pub const fn ht_trendline_min_len(unstable_period: usize) -> usize {
    ht_trendline_lookback(unstable_period) + 1
}

/// Computes `HT_TRENDLINE` for input bars `[start_idx, end_idx]`.
///
/// Valid values are written contiguously from `output[0]`; the returned
/// [`OutputSpan`] locates them in the input.
///
/// # Errors
///
/// Returns an error if:
/// - The input data is empty (`Error::EmptyInput`)
/// - `start_idx` lies outside the input (`Error::OutOfRangeStartIndex`)
/// - `end_idx` lies outside the input or before `start_idx`
///   (`Error::OutOfRangeEndIndex`)
/// - The output buffer cannot hold the requested range
///   (`Error::BufferTooSmall`)
pub fn ht_trendline_range<T: SeriesElement>(
    data: &[T],
    start_idx: usize,
    end_idx: usize,
    unstable_period: usize,
    output: &mut [T],
) -> Result<OutputSpan> {
    validate_range(data.len(), start_idx, end_idx)?;

    let lookback = ht_trendline_lookback(unstable_period);
    let Some(first_valid) = effective_start(start_idx, end_idx, lookback) else {
        return Ok(OutputSpan::empty());
    };

    let required = end_idx - first_valid + 1;
    if output.len() < required {
        return Err(Error::BufferTooSmall {
            indicator: "ht_trendline",
            required,
            actual: output.len(),
        });
    }

    let mut pipeline = HtPipeline::seeded(data, first_valid - lookback, PHASE_SETTLE_BARS);
    let mut trend1 = T::zero();
    let mut trend2 = T::zero();
    let mut trend3 = T::zero();
    let mut count = 0;
    while pipeline.today() <= end_idx {
        pipeline.step(data);
        let average = pipeline.cycle_average(data);
        let value = (T::constant(4.0) * average
            + T::constant(3.0) * trend1
            + T::two() * trend2
            + trend3)
            / T::constant(10.0);
        trend3 = trend2;
        trend2 = trend1;
        trend1 = average;
        if pipeline.today() >= first_valid {
            output[count] = value;
            count += 1;
        }
        pipeline.advance();
    }

    Ok(OutputSpan { first_valid, len: count })
}

/// Computes `HT_TRENDLINE` over the whole series into a caller buffer, NaN
/// over the lookback prefix.
///
/// # Errors
///
/// Returns an error if:
/// - The input data is empty (`Error::EmptyInput`)
/// - There is insufficient data for the lookback (`Error::InsufficientData`)
/// - The output buffer is shorter than the input (`Error::BufferTooSmall`)
pub fn ht_trendline_into<T: SeriesElement>(data: &[T], output: &mut [T]) -> Result<()> {
    data.validate_not_empty()?;

    let n = data.len();
    let lookback = ht_trendline_lookback(0);
    data.validate_min_length(ht_trendline_min_len(0), "ht_trendline")?;

    if output.len() < n {
        return Err(Error::BufferTooSmall {
            indicator: "ht_trendline",
            required: n,
            actual: output.len(),
        });
    }

    for value in &mut output[..lookback] {
        *value = T::nan();
    }
    ht_trendline_range(data, lookback, n - 1, 0, &mut output[lookback..])?;
    Ok(())
}

/// Computes `HT_TRENDLINE`.
///
/// # Errors
///
/// Returns an error if:
/// - The input data is empty (`Error::EmptyInput`)
/// - There is insufficient data for the lookback (`Error::InsufficientData`)
pub fn ht_trendline<T: SeriesElement>(data: &[T]) -> Result<Vec<T>> {
    let mut output = vec![T::nan(); data.len()];
    ht_trendline_into(data, &mut output)?;
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cycle_series(n: usize) -> Vec<f64> {
        (0..n)
            .map(|i| 100.0 + 10.0 * (2.0 * std::f64::consts::PI * i as f64 / 20.0).sin())
            .collect()
    }

    #[test]
    fn test_ht_trendline_lookback() {
        assert_eq!(ht_trendline_lookback(0), 63);
        assert_eq!(ht_trendline_min_len(0), 64);
    }

    #[test]
    fn test_ht_trendline_empty_input() {
        let data: Vec<f64> = vec![];
        assert!(matches!(ht_trendline(&data), Err(Error::EmptyInput)));
    }

    #[test]
    fn test_ht_trendline_insufficient_data() {
        let data = cycle_series(63);
        assert!(matches!(
            ht_trendline(&data),
            Err(Error::InsufficientData { .. })
        ));
    }

    #[test]
    fn test_ht_trendline_nan_prefix() {
        let data = cycle_series(160);
        let result = ht_trendline(&data).unwrap();
        assert_eq!(result.len(), data.len());
        assert_eq!(crate::utils::count_nan_prefix(&result), 63);
        for &value in &result[63..] {
            assert!(value.is_finite());
        }
    }

    #[test]
    fn test_ht_trendline_averages_out_pure_cycle() {
        // Once the measured window covers the full 20-bar cycle, the
        // trendline must sit near the cycle mean rather than the swings.
        let data = cycle_series(250);
        let result = ht_trendline(&data).unwrap();
        for (i, &value) in result.iter().enumerate().skip(120) {
            assert!(
                (value - 100.0).abs() < 4.0,
                "trendline at {i} is {value}"
            );
        }
    }

    #[test]
    fn test_ht_trendline_follows_linear_ramp() {
        // The measured window can sit anywhere in [6, 50] on a trend-only
        // input, so only the direction and a window-sized lag are asserted.
        let data: Vec<f64> = (0..220).map(|i| 50.0 + 0.5 * i as f64).collect();
        let result = ht_trendline(&data).unwrap();
        for (i, &value) in result.iter().enumerate().skip(100) {
            let price = data[i];
            assert!(
                value < price && value > price - 20.0,
                "trendline at {i} is {value}, price {price}"
            );
        }
    }

    #[test]
    fn test_ht_trendline_constant_input() {
        let data = vec![75.0_f64; 200];
        let result = ht_trendline(&data).unwrap();
        for &value in &result[70..] {
            assert!((value - 75.0).abs() < 1e-6);
        }
    }

    #[test]
    fn test_ht_trendline_range_matches_full_series() {
        let data = cycle_series(170);
        let full = ht_trendline(&data).unwrap();
        let mut out = vec![0.0_f64; data.len()];
        let span = ht_trendline_range(&data, 0, data.len() - 1, 0, &mut out).unwrap();
        assert_eq!(span.first_valid, 63);
        for k in 0..span.len {
            assert_eq!(out[k].to_bits(), full[63 + k].to_bits());
        }
    }

    #[test]
    fn test_ht_trendline_range_buffer_too_small() {
        let data = cycle_series(120);
        let mut out = vec![0.0_f64; 5];
        let result = ht_trendline_range(&data, 0, 119, 0, &mut out);
        assert!(matches!(result, Err(Error::BufferTooSmall { .. })));
    }

    #[test]
    fn test_ht_trendline_f32() {
        let data: Vec<f32> = cycle_series(150).into_iter().map(|x| x as f32).collect();
        let result = ht_trendline(&data).unwrap();
        for &value in &result[63..] {
            assert!(value.is_finite());
        }
    }
}
