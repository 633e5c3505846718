//! cycle-ta: Hilbert Transform dominant-cycle analysis for price series.
//!
//! This crate implements the Hilbert-Transform indicator family from John
//! Ehlers' cycle-measurement work, with streaming semantics compatible with
//! the reference TA-Lib implementations: dominant cycle period and phase,
//! raw phasor components, sine/lead-sine, the instantaneous trendline, and
//! the trend-vs-cycle market mode classifier.
//!
//! # Features
//!
//! - **Accuracy**: reproduces the reference warm-up schedule, even/odd
//!   filter-state coupling, and clamp ordering of the TA-Lib cycle family
//! - **Generics**: works with both `f32` and `f64` series
//! - **Zero-allocation paths**: every indicator has `_range` and `_into`
//!   variants that write into caller-provided buffers
//! - **Reentrancy**: all filter state is local to one call; identical
//!   inputs always produce identical outputs
//!
//! # Quick Start
//!
//! ```
//! use cycle_ta::prelude::*;
//!
//! // A clean 20-bar cycle.
//! let prices: Vec<f64> = (0..200)
//!     .map(|i| 100.0 + 10.0 * (2.0 * std::f64::consts::PI * i as f64 / 20.0).sin())
//!     .collect();
//!
//! let period = ht_dcperiod(&prices).unwrap();
//! assert!(period[0].is_nan()); // 32-bar lookback
//! let settled = period[150];
//! assert!(settled > 6.0 && settled < 50.0);
//! ```
//!
//! # Range computation
//!
//! The `_range` entry points compute an inclusive `[start_idx, end_idx]`
//! window of bars into a compact buffer and report where the valid values
//! landed:
//!
//! ```
//! use cycle_ta::indicators::{ht_dcperiod_lookback, ht_dcperiod_range};
//!
//! let prices: Vec<f64> = (0..100)
//!     .map(|i| 100.0 + (i as f64 * 0.3).sin())
//!     .collect();
//! let mut out = vec![0.0_f64; 100];
//! let span = ht_dcperiod_range(&prices, 0, 99, 0, &mut out).unwrap();
//! assert_eq!(span.first_valid, ht_dcperiod_lookback(0));
//! assert_eq!(span.len, 100 - span.first_valid);
//! ```
//!
//! # Error Handling
//!
//! All entry points return [`Result<T, Error>`]; range and buffer problems
//! are rejected before any computation runs:
//!
//! ```
//! use cycle_ta::indicators::ht_sine;
//!
//! let short: Vec<f64> = vec![1.0; 10];
//! assert!(ht_sine(&short).is_err());
//! ```

#![deny(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::perf)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod indicators;
pub mod prelude;
pub mod traits;
pub mod utils;

// Re-export commonly used types at crate root
pub use error::{Error, Result};
pub use indicators::OutputSpan;
pub use traits::{SeriesElement, ValidatedInput};
pub use utils::{approx_eq, approx_eq_relative, count_nan_prefix, count_nans, EPSILON, LOOSE_EPSILON};
