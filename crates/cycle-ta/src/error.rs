//! Error types for cycle-ta.
//!
//! All fallible entry points in the library share one error enum. Range and
//! buffer problems are detected before any computation state is built, so a
//! failed call never leaves partially written output.

use thiserror::Error;

/// The main error type for cycle-ta operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The input data series is empty.
    #[error("empty input: no data provided")]
    EmptyInput,

    /// The requested start index lies outside the input series.
    ///
    /// Returned by the `_range` entry points when `start_idx >= len`.
    #[error("start index {start} out of range for series of length {len}")]
    OutOfRangeStartIndex {
        /// The offending start index.
        start: usize,
        /// The input series length.
        len: usize,
    },

    /// The requested end index lies outside the input series or before the
    /// start index.
    ///
    /// Returned by the `_range` entry points when `end_idx < start_idx` or
    /// `end_idx >= len`.
    #[error("end index {end} out of range (start {start}, series length {len})")]
    OutOfRangeEndIndex {
        /// The offending end index.
        end: usize,
        /// The start index of the same request.
        start: usize,
        /// The input series length.
        len: usize,
    },

    /// The input data series is too short to produce a single output value.
    ///
    /// Returned by the full-series entry points when the input is shorter
    /// than the indicator's minimum length (lookback + 1).
    #[error("insufficient data for {indicator}: required {required} elements, got {actual}")]
    InsufficientData {
        /// Name of the indicator that rejected the input.
        indicator: &'static str,
        /// The number of data points required.
        required: usize,
        /// The number of data points provided.
        actual: usize,
    },

    /// A caller-provided output buffer cannot hold the requested output.
    #[error("output buffer too small for {indicator}: required {required} elements, got {actual}")]
    BufferTooSmall {
        /// Name of the indicator that rejected the buffer.
        indicator: &'static str,
        /// The number of output slots required.
        required: usize,
        /// The number of output slots provided.
        actual: usize,
    },

    /// A period parameter is invalid for the requested operation.
    #[error("invalid period {period}: {reason}")]
    InvalidPeriod {
        /// The invalid period value that was provided.
        period: usize,
        /// Description of why the period is invalid.
        reason: &'static str,
    },

    /// Failed to convert a numeric value to the series element type.
    #[error("numeric conversion failed: {context}")]
    NumericConversion {
        /// Description of the conversion that failed.
        context: &'static str,
    },
}

/// Convenience type alias for Results using the cycle-ta Error type.
pub type Result<T> = std::result::Result<T, Error>;
