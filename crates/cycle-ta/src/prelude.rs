//! Commonly used types and functions for convenient importing.
//!
//! ```
//! use cycle_ta::prelude::*;
//!
//! let prices: Vec<f64> = (0..128)
//!     .map(|i| 100.0 + 10.0 * (2.0 * std::f64::consts::PI * i as f64 / 20.0).sin())
//!     .collect();
//!
//! let period = ht_dcperiod(&prices).unwrap();
//! let sine = ht_sine(&prices).unwrap();
//! assert_eq!(period.len(), sine.sine.len());
//! ```

// Error types
pub use crate::error::{Error, Result};

// Traits
pub use crate::traits::{SeriesElement, ValidatedInput};

// Indicator functions (full-series API)
pub use crate::indicators::{
    ht_dcperiod, ht_dcphase, ht_phasor, ht_sine, ht_trendline, ht_trendmode, wma,
};

// Indicator functions (_into API for pre-allocated buffers)
pub use crate::indicators::{
    ht_dcperiod_into, ht_dcphase_into, ht_phasor_into, ht_sine_into, ht_trendline_into,
    ht_trendmode_into, wma_into,
};

// Indicator functions (_range API for start/end windows)
pub use crate::indicators::{
    ht_dcperiod_range, ht_dcphase_range, ht_phasor_range, ht_sine_range, ht_trendline_range,
    ht_trendmode_range, wma_range,
};

// Multi-output types and the range-result span
pub use crate::indicators::{HtPhasorOutput, HtSineOutput, OutputSpan};

// Lookback functions
pub use crate::indicators::{
    ht_dcperiod_lookback, ht_dcperiod_min_len, ht_dcphase_lookback, ht_dcphase_min_len,
    ht_phasor_lookback, ht_phasor_min_len, ht_sine_lookback, ht_sine_min_len,
    ht_trendline_lookback, ht_trendline_min_len, ht_trendmode_lookback, ht_trendmode_min_len,
    wma_lookback, wma_min_len,
};
