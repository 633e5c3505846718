//! `HT_DCPHASE` (Hilbert Transform - Dominant Cycle Phase)
//!
//! Position within the dominant cycle, in degrees. The phase comes from a
//! discrete sine/cosine correlation of the smoothed price over the current
//! dominant-cycle window, with continuation healing when the correlation
//! energy collapses, so the signal advances without spurious jumps.
//!
//! # Lookback
//!
//! 63 bars of structural warm-up plus the caller's unstable period.

use super::ht_core::{effective_start, HtPipeline, PHASE_LOOKBACK, PHASE_SETTLE_BARS};
use super::OutputSpan;
use crate::error::{Error, Result};
use crate::traits::{validate_range, SeriesElement, ValidatedInput};

/// Returns the lookback period for `HT_DCPHASE`.
#[inline]
#[must_use]
pub const fn ht_dcphase_lookback(unstable_period: usize) -> usize {
    PHASE_LOOKBACK + unstable_period
}

/// Returns the minimum input length required for `HT_DCPHASE`.
#[inline]
#[must_use]
pub const fn ht_dcphase_min_len(unstable_period: usize) -> usize {
    ht_dcphase_lookback(unstable_period) + 1
}

/// Computes `HT_DCPHASE` for input bars `[start_idx, end_idx]`.
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
pub fn ht_dcphase_range<T: SeriesElement>(
    data: &[T],
    start_idx: usize,
    end_idx: usize,
    unstable_period: usize,
    output: &mut [T],
) -> Result<OutputSpan> {
    validate_range(data.len(), start_idx, end_idx)?;

    let lookback = ht_dcphase_lookback(unstable_period);
    let Some(first_valid) = effective_start(start_idx, end_idx, lookback) else {
        return Ok(OutputSpan::empty());
    };

    let required = end_idx - first_valid + 1;
    if output.len() < required {
        return Err(Error::BufferTooSmall {
            indicator: "ht_dcphase",
            required,
            actual: output.len(),
        });
    }

    let mut pipeline = HtPipeline::seeded(data, first_valid - lookback, PHASE_SETTLE_BARS);
    let mut phase = T::zero();
    let mut count = 0;
    while pipeline.today() <= end_idx {
        pipeline.step(data);
        phase = pipeline.dominant_cycle_phase(phase);
        if pipeline.today() >= first_valid {
            output[count] = phase;
            count += 1;
        }
        pipeline.advance();
    }

    Ok(OutputSpan { first_valid, len: count })
}

/// Computes `HT_DCPHASE` over the whole series into a caller buffer, NaN
/// over the lookback prefix.
///
/// # Errors
///
/// Returns an error if:
/// - The input data is empty (`Error::EmptyInput`)
/// - There is insufficient data for the lookback (`Error::InsufficientData`)
/// - The output buffer is shorter than the input (`Error::BufferTooSmall`)
pub fn ht_dcphase_into<T: SeriesElement>(data: &[T], output: &mut [T]) -> Result<()> {
    data.validate_not_empty()?;

    let n = data.len();
    let lookback = ht_dcphase_lookback(0);
    data.validate_min_length(ht_dcphase_min_len(0), "ht_dcphase")?;

    if output.len() < n {
        return Err(Error::BufferTooSmall {
            indicator: "ht_dcphase",
            required: n,
            actual: output.len(),
        });
    }

    for value in &mut output[..lookback] {
        *value = T::nan();
    }
    ht_dcphase_range(data, lookback, n - 1, 0, &mut output[lookback..])?;
    Ok(())
}

/// Computes `HT_DCPHASE`.
///
/// # Example
///
/// ```
/// use cycle_ta::indicators::ht_dcphase;
///
/// let prices: Vec<f64> = (0..128)
///     .map(|i| 100.0 + 10.0 * (2.0 * std::f64::consts::PI * i as f64 / 20.0).sin())
///     .collect();
/// let phase = ht_dcphase(&prices).unwrap();
/// assert!(phase[62].is_nan());
/// assert!(phase[63].is_finite());
/// ```
///
/// # Errors
///
/// Returns an error if:
/// - The input data is empty (`Error::EmptyInput`)
/// - There is insufficient data for the lookback (`Error::InsufficientData`)
pub fn ht_dcphase<T: SeriesElement>(data: &[T]) -> Result<Vec<T>> {
    let mut output = vec![T::nan(); data.len()];
    ht_dcphase_into(data, &mut output)?;
    Ok(output)
}
