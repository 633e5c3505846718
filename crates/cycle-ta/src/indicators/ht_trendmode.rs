//! `HT_TRENDMODE` (Hilbert Transform - Trend vs Cycle Mode)
//!
//! Classifies each bar as trending (1) or cycling (0). A bar defaults to
//! trending and is knocked down to cycling by sine/lead-sine crossings, by a
//! young trend age relative to the cycle length, or by a phase advancing at
//! cycle speed; a price that has pulled at least 1.5% away from the
//! trendline overrides everything back to trending. The override is
//! evaluated last and wins.

use super::ht_core::{effective_start, HtPipeline, PHASE_LOOKBACK, PHASE_SETTLE_BARS};
use super::OutputSpan;
use crate::error::{Error, Result};
use crate::traits::{validate_range, SeriesElement, ValidatedInput};

/// Returns the lookback period for `HT_TRENDMODE`.
#[inline]
#[must_use]
pub const fn ht_trendmode_lookback(unstable_period: usize) -> usize {
    PHASE_LOOKBACK + unstable_period
}

/// Returns the minimum input length required for `HT_TRENDMODE`.
#[inline]
#[must_use]
pub const fn ht_trendmode_min_len(unstable_period: usize) -> usize {
    ht_trendmode_lookback(unstable_period) + 1
}

/// Computes `HT_TRENDMODE` for input bars `[start_idx, end_idx]`.
///
/// Emits 1 for trending bars and 0 for cycling bars, in the series element
/// type. Valid values are written contiguously from `output[0]`; the
/// returned [`OutputSpan`] locates them in the input.
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
pub fn ht_trendmode_range<T: SeriesElement>(
    data: &[T],
    start_idx: usize,
    end_idx: usize,
    unstable_period: usize,
    output: &mut [T],
) -> Result<OutputSpan> {
    validate_range(data.len(), start_idx, end_idx)?;

    let lookback = ht_trendmode_lookback(unstable_period);
    let Some(first_valid) = effective_start(start_idx, end_idx, lookback) else {
        return Ok(OutputSpan::empty());
    };

    let required = end_idx - first_valid + 1;
    if output.len() < required {
        return Err(Error::BufferTooSmall {
            indicator: "ht_trendmode",
            required,
            actual: output.len(),
        });
    }

    let deg_to_rad = T::constant(std::f64::consts::PI / 180.0);
    let lead = T::constant(45.0);
    let half = T::constant(0.5);
    let full_circle = T::constant(360.0);

    let mut pipeline = HtPipeline::seeded(data, first_valid - lookback, PHASE_SETTLE_BARS);
    let mut phase = T::zero();
    let mut sine = T::zero();
    let mut lead_sine = T::zero();
    let mut trend1 = T::zero();
    let mut trend2 = T::zero();
    let mut trend3 = T::zero();
    let mut days_in_trend: usize = 0;
    let mut count = 0;

    while pipeline.today() <= end_idx {
        let sample = pipeline.step(data);
        let new_phase = pipeline.dominant_cycle_phase(phase);

        let prev_sine = sine;
        let prev_lead_sine = lead_sine;
        sine = (new_phase * deg_to_rad).sin();
        lead_sine = ((new_phase + lead) * deg_to_rad).sin();

        let average = pipeline.cycle_average(data);
        let trendline = (T::constant(4.0) * average
            + T::constant(3.0) * trend1
            + T::two() * trend2
            + trend3)
            / T::constant(10.0);
        trend3 = trend2;
        trend2 = trend1;
        trend1 = average;

        let mut trending = true;

        if (sine > lead_sine && prev_sine <= prev_lead_sine)
            || (sine < lead_sine && prev_sine >= prev_lead_sine)
        {
            days_in_trend = 0;
            trending = false;
        }
        days_in_trend += 1;

        let smooth_period = sample.smooth_period;
        if T::constant(days_in_trend as f64) < half * smooth_period {
            trending = false;
        }

        if smooth_period != T::zero() {
            let delta = new_phase - phase;
            let bar_rate = full_circle / smooth_period;
            if delta > T::constant(0.67) * bar_rate && delta < T::constant(1.5) * bar_rate {
                trending = false;
            }
        }

        if trendline != T::zero()
            && ((sample.smoothed - trendline) / trendline).abs() >= T::constant(0.015)
        {
            trending = true;
        }

        if pipeline.today() >= first_valid {
            output[count] = if trending { T::one() } else { T::zero() };
            count += 1;
        }
        phase = new_phase;
        pipeline.advance();
    }

    Ok(OutputSpan { first_valid, len: count })
}

/// Computes `HT_TRENDMODE` over the whole series into a caller buffer, NaN
/// over the lookback prefix.
///
/// # Errors
///
/// Returns an error if:
/// - The input data is empty (`Error::EmptyInput`)
/// - There is insufficient data for the lookback (`Error::InsufficientData`)
/// - The output buffer is shorter than the input (`Error::BufferTooSmall`)
pub fn ht_trendmode_into<T: SeriesElement>(data: &[T], output: &mut [T]) -> Result<()> {
    data.validate_not_empty()?;

    let n = data.len();
    let lookback = ht_trendmode_lookback(0);
    data.validate_min_length(ht_trendmode_min_len(0), "ht_trendmode")?;

    if output.len() < n {
        return Err(Error::BufferTooSmall {
            indicator: "ht_trendmode",
            required: n,
            actual: output.len(),
        });
    }

    for value in &mut output[..lookback] {
        *value = T::nan();
    }
    ht_trendmode_range(data, lookback, n - 1, 0, &mut output[lookback..])?;
    Ok(())
}

/// Computes `HT_TRENDMODE`.
///
/// Returns 1 for trending bars and 0 for cycling bars.
///
/// # Errors
///
/// Returns an error if:
/// - The input data is empty (`Error::EmptyInput`)
/// - There is insufficient data for the lookback (`Error::InsufficientData`)
pub fn ht_trendmode<T: SeriesElement>(data: &[T]) -> Result<Vec<T>> {
    let mut output = vec![T::nan(); data.len()];
    ht_trendmode_into(data, &mut output)?;
    Ok(output)
}
