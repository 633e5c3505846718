//! Technical-analysis indicators.
//!
//! The crate centers on the Hilbert Transform dominant-cycle family: six
//! outputs derived from one shared adaptive cycle-measurement pipeline:
//!
//! - [`ht_dcperiod`] - dominant cycle period, in bars
//! - [`ht_dcphase`] - dominant cycle phase, in degrees
//! - [`ht_phasor`] - raw in-phase/quadrature phasor components
//! - [`ht_sine`] - sine of the cycle phase plus a 45°-leading copy
//! - [`ht_trendline`] - instantaneous trendline (cycle-period average)
//! - [`ht_trendmode`] - trend (1) vs cycle (0) market mode
//!
//! [`wma`] is the general linearly-weighted moving average, the sibling of
//! the fixed 4-tap smoother the cycle pipeline uses internally.
//!
//! # Entry-point shapes
//!
//! Every indicator exposes three surfaces:
//!
//! - `*_range(data, start_idx, end_idx, …, out)` computes the inclusive
//!   bar range `[start_idx, end_idx]`, writes valid values contiguously
//!   from `out[0]`, and returns an [`OutputSpan`] locating them in the
//!   input. A start index inside the warm-up region is silently raised to
//!   the lookback; a range that ends before the lookback succeeds with an
//!   empty span.
//! - `*_into(data, out)` fills a full-length buffer, NaN over the lookback
//!   prefix.
//! - `*(data)` allocates and returns the full-length series.
//!
//! Lookbacks are queryable via the `*_lookback`/`*_min_len` const fns; the
//! `ht_*` variants take the extra warm-up ("unstable period") as a
//! parameter, the structural part being fixed per output kind.

pub(crate) mod ht_core;

pub mod ht_dcperiod;
pub mod ht_dcphase;
pub mod ht_phasor;
pub mod ht_sine;
pub mod ht_trendline;
pub mod ht_trendmode;
pub mod wma;

pub use ht_dcperiod::{
    ht_dcperiod, ht_dcperiod_into, ht_dcperiod_lookback, ht_dcperiod_min_len, ht_dcperiod_range,
};
pub use ht_dcphase::{
    ht_dcphase, ht_dcphase_into, ht_dcphase_lookback, ht_dcphase_min_len, ht_dcphase_range,
};
pub use ht_phasor::{
    ht_phasor, ht_phasor_into, ht_phasor_lookback, ht_phasor_min_len, ht_phasor_range,
    HtPhasorOutput,
};
pub use ht_sine::{
    ht_sine, ht_sine_into, ht_sine_lookback, ht_sine_min_len, ht_sine_range, HtSineOutput,
};
pub use ht_trendline::{
    ht_trendline, ht_trendline_into, ht_trendline_lookback, ht_trendline_min_len,
    ht_trendline_range,
};
pub use ht_trendmode::{
    ht_trendmode, ht_trendmode_into, ht_trendmode_lookback, ht_trendmode_min_len,
    ht_trendmode_range,
};
pub use wma::{wma, wma_into, wma_lookback, wma_min_len, wma_range};

/// Location of the valid portion of a range-computed output.
///
/// `first_valid` is an index into the *input* series; the value written at
/// `out[k]` belongs to input bar `first_valid + k`, for `k < len`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OutputSpan {
    /// Index of the first input bar with a valid output value.
    pub first_valid: usize,
    /// Number of valid values written to the output buffer.
    pub len: usize,
}

impl OutputSpan {
    /// A span with no valid output values.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            first_valid: 0,
            len: 0,
        }
    }

    /// Returns true if the request produced no output values.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }
}
