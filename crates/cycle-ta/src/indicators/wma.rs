//! Weighted Moving Average (WMA).
//!
//! Linearly decreasing weights over the window, newest bar weighted
//! highest. This is the general form of the fixed 4-tap smoother the cycle
//! pipeline applies to raw price, exposed as a standalone indicator with
//! the same entry-point shapes as the `ht_*` family.
//!
//! The rolling update is O(1) per bar: add the new value at full weight,
//! then peel one weight unit off every bar in the window by subtracting the
//! window's plain sum.

use super::ht_core::effective_start;
use super::OutputSpan;
use crate::error::{Error, Result};
use crate::traits::{validate_period, validate_range, SeriesElement, ValidatedInput};

/// Returns the lookback period for WMA: `period - 1`.
#[inline]
#[must_use]
pub const fn wma_lookback(period: usize) -> usize {
    if period == 0 {
        0
    } else {
        period - 1
    }
}

/// Returns the minimum input length required for WMA.
#[inline]
#[must_use]
pub const fn wma_min_len(period: usize) -> usize {
    period
}

/// Computes the WMA for input bars `[start_idx, end_idx]`.
///
/// Valid values are written contiguously from `output[0]`; the returned
/// [`OutputSpan`] locates them in the input.
///
/// # Errors
///
/// Returns an error if:
/// - The period is zero (`Error::InvalidPeriod`)
/// - The input data is empty (`Error::EmptyInput`)
/// - `start_idx` lies outside the input (`Error::OutOfRangeStartIndex`)
/// - `end_idx` lies outside the input or before `start_idx`
///   (`Error::OutOfRangeEndIndex`)
/// - The output buffer cannot hold the requested range
///   (`Error::BufferTooSmall`)
pub fn wma_range<T: SeriesElement>(
    data: &[T],
    start_idx: usize,
    end_idx: usize,
    period: usize,
    output: &mut [T],
) -> Result<OutputSpan> {
    validate_period(period)?;
    validate_range(data.len(), start_idx, end_idx)?;

    let lookback = wma_lookback(period);
    let Some(first_valid) = effective_start(start_idx, end_idx, lookback) else {
        return Ok(OutputSpan::empty());
    };

    let required = end_idx - first_valid + 1;
    if output.len() < required {
        return Err(Error::BufferTooSmall {
            indicator: "wma",
            required,
            actual: output.len(),
        });
    }

    let weight_sum = T::from_usize(period * (period + 1) / 2)?;
    let period_t = T::from_usize(period)?;

    // Seed both rolling sums over the window ending at the first valid bar.
    let window_start = first_valid + 1 - period;
    let mut weighted = T::zero();
    let mut plain = T::zero();
    for (offset, &value) in data[window_start..=first_valid].iter().enumerate() {
        weighted = weighted + value * T::from_usize(offset + 1)?;
        plain = plain + value;
    }

    output[0] = weighted / weight_sum;
    let mut count = 1;
    for i in (first_valid + 1)..=end_idx {
        weighted = weighted + data[i] * period_t - plain;
        plain = plain + data[i] - data[i - period];
        output[count] = weighted / weight_sum;
        count += 1;
    }

    Ok(OutputSpan { first_valid, len: count })
}

/// Computes the WMA over the whole series into a caller buffer, NaN over
/// the lookback prefix.
///
/// # Errors
///
/// Returns an error if:
/// - The period is zero (`Error::InvalidPeriod`)
/// - The input data is empty (`Error::EmptyInput`)
/// - The input is shorter than the period (`Error::InsufficientData`)
/// - The output buffer is shorter than the input (`Error::BufferTooSmall`)
pub fn wma_into<T: SeriesElement>(data: &[T], period: usize, output: &mut [T]) -> Result<()> {
    validate_period(period)?;
    data.validate_not_empty()?;

    let n = data.len();
    let lookback = wma_lookback(period);
    data.validate_min_length(wma_min_len(period), "wma")?;

    if output.len() < n {
        return Err(Error::BufferTooSmall {
            indicator: "wma",
            required: n,
            actual: output.len(),
        });
    }

    for value in &mut output[..lookback] {
        *value = T::nan();
    }
    wma_range(data, lookback, n - 1, period, &mut output[lookback..])?;
    Ok(())
}

/// Computes the Weighted Moving Average.
///
/// # Example
///
/// ```
/// use cycle_ta::indicators::wma;
///
/// let data = vec![1.0_f64, 2.0, 3.0, 4.0, 5.0];
/// let result = wma(&data, 3).unwrap();
///
/// assert!(result[0].is_nan());
/// assert!(result[1].is_nan());
/// // (1*1 + 2*2 + 3*3) / 6
/// assert!((result[2] - 2.333333).abs() < 1e-5);
/// ```
///
/// # Errors
///
/// Returns an error if:
/// - The period is zero (`Error::InvalidPeriod`)
/// - The input data is empty (`Error::EmptyInput`)
/// - The input is shorter than the period (`Error::InsufficientData`)
pub fn wma<T: SeriesElement>(data: &[T], period: usize) -> Result<Vec<T>> {
    let mut output = vec![T::nan(); data.len()];
    wma_into(data, period, &mut output)?;
    Ok(output)
}
