//! `HT_DCPERIOD` (Hilbert Transform - Dominant Cycle Period)
//!
//! Estimates the length, in bars, of the dominant price cycle. The estimate
//! is produced by a homodyne discriminator over Hilbert-derived in-phase and
//! quadrature components and is doubly smoothed, so it responds gradually
//! and stays within the [6, 50] bar band the filters are tuned for.
//!
//! # Lookback
//!
//! 32 bars of structural warm-up plus the caller's unstable period.

use super::ht_core::{effective_start, HtPipeline, CYCLE_LOOKBACK, CYCLE_SETTLE_BARS};
use super::OutputSpan;
use crate::error::{Error, Result};
use crate::traits::{validate_range, SeriesElement, ValidatedInput};

/// Returns the lookback period for `HT_DCPERIOD`.
///
/// `unstable_period` adds extra warm-up bars so the recursive filters can
/// settle further before the first emitted value.
#[inline]
#[must_use]
pub const fn ht_dcperiod_lookback(unstable_period: usize) -> usize {
    CYCLE_LOOKBACK + unstable_period
}

/// Returns the minimum input length required for `HT_DCPERIOD`.
#[inline]
#[must_use]
pub const fn ht_dcperiod_min_len(unstable_period: usize) -> usize {
    ht_dcperiod_lookback(unstable_period) + 1
}

/// Computes `HT_DCPERIOD` for input bars `[start_idx, end_idx]`.
///
/// Valid values are written contiguously from `output[0]`; the returned
/// [`OutputSpan`] locates them in the input. A start index inside the
/// warm-up region is raised to the lookback; if that passes `end_idx` the
/// call succeeds with an empty span.
///
/// # Example
///
/// ```
/// use cycle_ta::indicators::{ht_dcperiod_lookback, ht_dcperiod_range};
///
/// let prices: Vec<f64> = (0..128)
///     .map(|i| 100.0 + 10.0 * (2.0 * std::f64::consts::PI * i as f64 / 20.0).sin())
///     .collect();
/// let mut out = vec![0.0_f64; prices.len()];
/// let span = ht_dcperiod_range(&prices, 0, 127, 0, &mut out).unwrap();
/// assert_eq!(span.first_valid, ht_dcperiod_lookback(0));
/// assert_eq!(span.len, 128 - span.first_valid);
/// ```
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
pub fn ht_dcperiod_range<T: SeriesElement>(
    data: &[T],
    start_idx: usize,
    end_idx: usize,
    unstable_period: usize,
    output: &mut [T],
) -> Result<OutputSpan> {
    validate_range(data.len(), start_idx, end_idx)?;

    let lookback = ht_dcperiod_lookback(unstable_period);
    let Some(first_valid) = effective_start(start_idx, end_idx, lookback) else {
        return Ok(OutputSpan::empty());
    };

    let required = end_idx - first_valid + 1;
    if output.len() < required {
        return Err(Error::BufferTooSmall {
            indicator: "ht_dcperiod",
            required,
            actual: output.len(),
        });
    }

    let mut pipeline = HtPipeline::seeded(data, first_valid - lookback, CYCLE_SETTLE_BARS);
    let mut count = 0;
    while pipeline.today() <= end_idx {
        let sample = pipeline.step(data);
        if pipeline.today() >= first_valid {
            output[count] = sample.smooth_period;
            count += 1;
        }
        pipeline.advance();
    }

    Ok(OutputSpan { first_valid, len: count })
}

/// Computes `HT_DCPERIOD` over the whole series into a caller buffer.
///
/// The output is aligned 1:1 with the input; the first
/// [`ht_dcperiod_lookback`]`(0)` values are NaN.
///
/// # Errors
///
/// Returns an error if:
/// - The input data is empty (`Error::EmptyInput`)
/// - There is insufficient data for the lookback (`Error::InsufficientData`)
/// - The output buffer is shorter than the input (`Error::BufferTooSmall`)
pub fn ht_dcperiod_into<T: SeriesElement>(data: &[T], output: &mut [T]) -> Result<()> {
    data.validate_not_empty()?;

    let n = data.len();
    let lookback = ht_dcperiod_lookback(0);
    data.validate_min_length(ht_dcperiod_min_len(0), "ht_dcperiod")?;

    if output.len() < n {
        return Err(Error::BufferTooSmall {
            indicator: "ht_dcperiod",
            required: n,
            actual: output.len(),
        });
    }

    for value in &mut output[..lookback] {
        *value = T::nan();
    }
    ht_dcperiod_range(data, lookback, n - 1, 0, &mut output[lookback..])?;
    Ok(())
}

/// Computes `HT_DCPERIOD`.
///
/// # Example
///
/// ```
/// use cycle_ta::indicators::ht_dcperiod;
///
/// let prices: Vec<f64> = (0..128)
///     .map(|i| 100.0 + 10.0 * (2.0 * std::f64::consts::PI * i as f64 / 20.0).sin())
///     .collect();
/// let period = ht_dcperiod(&prices).unwrap();
/// assert!(period[0].is_nan());
/// assert!(period[32].is_finite());
/// ```
///
/// # Errors
///
/// Returns an error if:
/// - The input data is empty (`Error::EmptyInput`)
/// - There is insufficient data for the lookback (`Error::InsufficientData`)
pub fn ht_dcperiod<T: SeriesElement>(data: &[T]) -> Result<Vec<T>> {
    let mut output = vec![T::nan(); data.len()];
    ht_dcperiod_into(data, &mut output)?;
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
    fn test_ht_dcperiod_lookback() {
        assert_eq!(ht_dcperiod_lookback(0), 32);
        assert_eq!(ht_dcperiod_lookback(10), 42);
    }

    #[test]
    fn test_ht_dcperiod_min_len() {
        assert_eq!(ht_dcperiod_min_len(0), 33);
    }

    #[test]
    fn test_ht_dcperiod_empty_input() {
        let data: Vec<f64> = vec![];
        assert!(matches!(ht_dcperiod(&data), Err(Error::EmptyInput)));
    }

    #[test]
    fn test_ht_dcperiod_insufficient_data() {
        let data: Vec<f64> = vec![1.0; 32];
        assert!(matches!(
            ht_dcperiod(&data),
            Err(Error::InsufficientData { .. })
        ));
    }

    #[test]
    fn test_ht_dcperiod_output_length_and_nan_prefix() {
        let data = cycle_series(150);
        let result = ht_dcperiod(&data).unwrap();
        assert_eq!(result.len(), data.len());
        assert_eq!(crate::utils::count_nan_prefix(&result), 32);
        assert_eq!(crate::utils::count_nans(&result), 32);
    }

    #[test]
    fn test_ht_dcperiod_valid_range_on_cycle_input() {
        let data = cycle_series(250);
        let result = ht_dcperiod(&data).unwrap();
        for (i, &value) in result.iter().enumerate().skip(32) {
            assert!(value.is_finite());
            assert!(
                value >= 6.0 && value <= 50.0,
                "period at {i} is {value}"
            );
        }
    }

    #[test]
    fn test_ht_dcperiod_range_matches_full_series() {
        let data = cycle_series(200);
        let full = ht_dcperiod(&data).unwrap();
        let mut out = vec![0.0_f64; data.len()];
        let span = ht_dcperiod_range(&data, 0, data.len() - 1, 0, &mut out).unwrap();
        assert_eq!(span.first_valid, 32);
        assert_eq!(span.len, data.len() - 32);
        for k in 0..span.len {
            assert_eq!(out[k].to_bits(), full[span.first_valid + k].to_bits());
        }
    }

    #[test]
    fn test_ht_dcperiod_range_empty_span() {
        let data = cycle_series(100);
        let mut out = vec![0.0_f64; 100];
        let span = ht_dcperiod_range(&data, 31, 31, 0, &mut out).unwrap();
        assert!(span.is_empty());
    }

    #[test]
    fn test_ht_dcperiod_range_buffer_too_small() {
        let data = cycle_series(100);
        let mut out = vec![0.0_f64; 10];
        let result = ht_dcperiod_range(&data, 0, 99, 0, &mut out);
        assert!(matches!(result, Err(Error::BufferTooSmall { .. })));
    }

    #[test]
    fn test_ht_dcperiod_range_start_out_of_range() {
        let data = cycle_series(100);
        let mut out = vec![0.0_f64; 100];
        let result = ht_dcperiod_range(&data, 100, 100, 0, &mut out);
        assert!(matches!(result, Err(Error::OutOfRangeStartIndex { .. })));
    }

    #[test]
    fn test_ht_dcperiod_unstable_period_shifts_first_valid() {
        let data = cycle_series(200);
        let mut out = vec![0.0_f64; 200];
        let span = ht_dcperiod_range(&data, 0, 199, 25, &mut out).unwrap();
        assert_eq!(span.first_valid, 57);
        assert_eq!(span.len, 200 - 57);
    }

    #[test]
    fn test_ht_dcperiod_f32() {
        let data: Vec<f32> = cycle_series(120).into_iter().map(|x| x as f32).collect();
        let result = ht_dcperiod(&data).unwrap();
        assert_eq!(result.len(), data.len());
        for &value in &result[32..] {
            assert!(value.is_finite());
        }
    }
}
