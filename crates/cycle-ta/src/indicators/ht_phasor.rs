//! `HT_PHASOR` (Hilbert Transform - Phasor Components)
//!
//! The raw in-phase (I1) and quadrature (Q1) components of the price
//! series, before homodyne smoothing. By construction the in-phase value is
//! the detrender delayed three bars, so the pair lags the derived period
//! and phase outputs by one observation.

use super::ht_core::{effective_start, HtPipeline, CYCLE_LOOKBACK, CYCLE_SETTLE_BARS};
use super::OutputSpan;
use crate::error::{Error, Result};
use crate::traits::{validate_range, SeriesElement, ValidatedInput};

/// Output structure for `HT_PHASOR` containing in-phase and quadrature
/// components.
#[derive(Debug, Clone)]
pub struct HtPhasorOutput<T> {
    /// In-phase component.
    pub inphase: Vec<T>,
    /// Quadrature component.
    pub quadrature: Vec<T>,
}

/// Returns the lookback period for `HT_PHASOR`.
#[inline]
#[must_use]
pub const fn ht_phasor_lookback(unstable_period: usize) -> usize {
    CYCLE_LOOKBACK + unstable_period
}

/// Returns the minimum input length required for `HT_PHASOR`.
#[inline]
#[must_use]
pub const fn ht_phasor_min_len(unstable_period: usize) -> usize {
    ht_phasor_lookback(unstable_period) + 1
}

/// Computes `HT_PHASOR` for input bars `[start_idx, end_idx]`.
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
pub fn ht_phasor_range<T: SeriesElement>(
    data: &[T],
    start_idx: usize,
    end_idx: usize,
    unstable_period: usize,
    inphase_out: &mut [T],
    quadrature_out: &mut [T],
) -> Result<OutputSpan> {
    validate_range(data.len(), start_idx, end_idx)?;

    let lookback = ht_phasor_lookback(unstable_period);
    let Some(first_valid) = effective_start(start_idx, end_idx, lookback) else {
        return Ok(OutputSpan::empty());
    };

    let required = end_idx - first_valid + 1;
    if inphase_out.len() < required || quadrature_out.len() < required {
        return Err(Error::BufferTooSmall {
            indicator: "ht_phasor",
            required,
            actual: inphase_out.len().min(quadrature_out.len()),
        });
    }

    let mut pipeline = HtPipeline::seeded(data, first_valid - lookback, CYCLE_SETTLE_BARS);
    let mut count = 0;
    while pipeline.today() <= end_idx {
        let sample = pipeline.step(data);
        if pipeline.today() >= first_valid {
            inphase_out[count] = sample.in_phase;
            quadrature_out[count] = sample.quadrature;
            count += 1;
        }
        pipeline.advance();
    }

    Ok(OutputSpan { first_valid, len: count })
}

/// Computes `HT_PHASOR` over the whole series into caller buffers, NaN over
/// the lookback prefix.
///
/// # Errors
///
/// Returns an error if:
/// - The input data is empty (`Error::EmptyInput`)
/// - There is insufficient data for the lookback (`Error::InsufficientData`)
/// - Either output buffer is shorter than the input (`Error::BufferTooSmall`)
pub fn ht_phasor_into<T: SeriesElement>(
    data: &[T],
    inphase_out: &mut [T],
    quadrature_out: &mut [T],
) -> Result<()> {
    data.validate_not_empty()?;

    let n = data.len();
    let lookback = ht_phasor_lookback(0);
    data.validate_min_length(ht_phasor_min_len(0), "ht_phasor")?;

    if inphase_out.len() < n || quadrature_out.len() < n {
        return Err(Error::BufferTooSmall {
            indicator: "ht_phasor",
            required: n,
            actual: inphase_out.len().min(quadrature_out.len()),
        });
    }

    for value in &mut inphase_out[..lookback] {
        *value = T::nan();
    }
    for value in &mut quadrature_out[..lookback] {
        *value = T::nan();
    }
    ht_phasor_range(
        data,
        lookback,
        n - 1,
        0,
        &mut inphase_out[lookback..],
        &mut quadrature_out[lookback..],
    )?;
    Ok(())
}

/// Computes `HT_PHASOR`.
///
/// # Errors
///
/// Returns an error if:
/// - The input data is empty (`Error::EmptyInput`)
/// - There is insufficient data for the lookback (`Error::InsufficientData`)
pub fn ht_phasor<T: SeriesElement>(data: &[T]) -> Result<HtPhasorOutput<T>> {
    let mut inphase = vec![T::nan(); data.len()];
    let mut quadrature = vec![T::nan(); data.len()];
    ht_phasor_into(data, &mut inphase, &mut quadrature)?;
    Ok(HtPhasorOutput {
        inphase,
        quadrature,
    })
}
