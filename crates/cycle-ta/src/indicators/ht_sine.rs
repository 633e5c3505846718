//! `HT_SINE` (Hilbert Transform - SineWave)
//!
//! Sine of the dominant-cycle phase plus a copy led by 45 degrees. The
//! crossings of the two lines flag cycle turns earlier than a moving-average
//! crossover would, which is the usual way this output is consumed.

use super::ht_core::{effective_start, HtPipeline, PHASE_LOOKBACK, PHASE_SETTLE_BARS};
use super::OutputSpan;
use crate::error::{Error, Result};
use crate::traits::{validate_range, SeriesElement, ValidatedInput};

/// Output structure for `HT_SINE` containing sine and lead sine.
#[derive(Debug, Clone)]
pub struct HtSineOutput<T> {
    /// Sine of the dominant-cycle phase.
    pub sine: Vec<T>,
    /// Sine of the phase led by 45 degrees.
    pub lead_sine: Vec<T>,
}

/// Returns the lookback period for `HT_SINE`.
#[inline]
#[must_use]
pub const fn ht_sine_lookback(unstable_period: usize) -> usize {
    PHASE_LOOKBACK + unstable_period
}

/// Returns the minimum input length required for `HT_SINE`.
#[inline]
#[must_use]
pub const fn ht_sine_min_len(unstable_period: usize) -> usize {
    ht_sine_lookback(unstable_period) + 1
}

/// Computes `HT_SINE` for input bars `[start_idx, end_idx]`.
///
/// Valid values are written contiguously from offset 0 of both buffers; the
/// returned [`OutputSpan`] locates them in the input.
///
/// # Errors
///
/// Returns an error if:
/// - The input data is empty (`Error::EmptyInput`)
/// - `start_idx` lies outside the input (`Error::OutOfRangeStartIndex`)
/// - `end_idx` lies outside the input or before `start_idx`
///   (`Error::OutOfRangeEndIndex`)
/// - Either output buffer cannot hold the requested range
///   (`Error::BufferTooSmall`)
pub fn ht_sine_range<T: SeriesElement>(
    data: &[T],
    start_idx: usize,
    end_idx: usize,
    unstable_period: usize,
    sine_out: &mut [T],
    lead_sine_out: &mut [T],
) -> Result<OutputSpan> {
    validate_range(data.len(), start_idx, end_idx)?;

    let lookback = ht_sine_lookback(unstable_period);
    let Some(first_valid) = effective_start(start_idx, end_idx, lookback) else {
        return Ok(OutputSpan::empty());
    };

    let required = end_idx - first_valid + 1;
    if sine_out.len() < required || lead_sine_out.len() < required {
        return Err(Error::BufferTooSmall {
            indicator: "ht_sine",
            required,
            actual: sine_out.len().min(lead_sine_out.len()),
        });
    }

    let deg_to_rad = T::constant(std::f64::consts::PI / 180.0);
    let lead = T::constant(45.0);

    let mut pipeline = HtPipeline::seeded(data, first_valid - lookback, PHASE_SETTLE_BARS);
    let mut phase = T::zero();
    let mut count = 0;
    while pipeline.today() <= end_idx {
        pipeline.step(data);
        phase = pipeline.dominant_cycle_phase(phase);
        if pipeline.today() >= first_valid {
            sine_out[count] = (phase * deg_to_rad).sin();
            lead_sine_out[count] = ((phase + lead) * deg_to_rad).sin();
            count += 1;
        }
        pipeline.advance();
    }

    Ok(OutputSpan { first_valid, len: count })
}

/// Computes `HT_SINE` over the whole series into caller buffers, NaN over
/// the lookback prefix.
///
/// # Errors
///
/// Returns an error if:
/// - The input data is empty (`Error::EmptyInput`)
/// - There is insufficient data for the lookback (`Error::InsufficientData`)
/// - Either output buffer is shorter than the input (`Error::BufferTooSmall`)
pub fn ht_sine_into<T: SeriesElement>(
    data: &[T],
    sine_out: &mut [T],
    lead_sine_out: &mut [T],
) -> Result<()> {
    data.validate_not_empty()?;

    let n = data.len();
    let lookback = ht_sine_lookback(0);
    data.validate_min_length(ht_sine_min_len(0), "ht_sine")?;

    if sine_out.len() < n || lead_sine_out.len() < n {
        return Err(Error::BufferTooSmall {
            indicator: "ht_sine",
            required: n,
            actual: sine_out.len().min(lead_sine_out.len()),
        });
    }

    for value in &mut sine_out[..lookback] {
        *value = T::nan();
    }
    for value in &mut lead_sine_out[..lookback] {
        *value = T::nan();
    }
    ht_sine_range(
        data,
        lookback,
        n - 1,
        0,
        &mut sine_out[lookback..],
        &mut lead_sine_out[lookback..],
    )?;
    Ok(())
}

/// Computes `HT_SINE`.
///
/// # Example
///
/// ```
/// use cycle_ta::indicators::ht_sine;
///
/// let prices: Vec<f64> = (0..128)
///     .map(|i| 100.0 + 10.0 * (2.0 * std::f64::consts::PI * i as f64 / 20.0).sin())
///     .collect();
/// let result = ht_sine(&prices).unwrap();
/// assert!(result.sine[63].abs() <= 1.0);
/// assert!(result.lead_sine[63].abs() <= 1.0);
/// ```
///
/// # Errors
///
/// Returns an error if:
/// - The input data is empty (`Error::EmptyInput`)
/// - There is insufficient data for the lookback (`Error::InsufficientData`)
pub fn ht_sine<T: SeriesElement>(data: &[T]) -> Result<HtSineOutput<T>> {
    let mut sine = vec![T::nan(); data.len()];
    let mut lead_sine = vec![T::nan(); data.len()];
    ht_sine_into(data, &mut sine, &mut lead_sine)?;
    Ok(HtSineOutput { sine, lead_sine })
}
