//! Core traits for cycle-ta numeric operations.
//!
//! The primary trait is [`SeriesElement`], a common interface for numeric
//! operations on time-series data that abstracts over `f32` and `f64`. The
//! module also provides the input-validation helpers shared by every
//! indicator entry point.

use num_traits::{Float, NumCast};

use crate::error::{Error, Result};

/// A trait for types that can be used as elements in a data series.
///
/// Extends `num_traits::Float` with conversions used by the indicator
/// implementations. Implemented for `f32` and `f64` via a blanket impl.
///
/// # Example
///
/// ```
/// use cycle_ta::traits::SeriesElement;
///
/// fn midpoint<T: SeriesElement>(a: T, b: T) -> T {
///     (a + b) / T::two()
/// }
///
/// assert!((midpoint(2.0_f64, 4.0) - 3.0).abs() < 1e-12);
/// ```
pub trait SeriesElement: Float + NumCast + Copy + Default + Send + Sync + 'static {
    /// Creates a series element from a `usize` value.
    ///
    /// # Errors
    ///
    /// Returns `Error::NumericConversion` if the value cannot be
    /// represented in this type.
    #[inline]
    fn from_usize(value: usize) -> Result<Self> {
        <Self as NumCast>::from(value).ok_or(Error::NumericConversion {
            context: "usize to series element",
        })
    }

    /// Creates a series element from an `f64` value.
    ///
    /// # Errors
    ///
    /// Returns `Error::NumericConversion` if the value cannot be
    /// represented in this type.
    #[inline]
    fn from_f64(value: f64) -> Result<Self> {
        <Self as NumCast>::from(value).ok_or(Error::NumericConversion {
            context: "f64 to series element",
        })
    }

    /// Converts a literal filter coefficient to this type.
    ///
    /// The library only passes compile-time literals through this helper.
    #[inline]
    #[must_use]
    fn constant(value: f64) -> Self {
        // Safe unwrap: the library's literal coefficients are representable
        // in both f32 and f64.
        <Self as NumCast>::from(value).unwrap()
    }

    /// Returns the constant 2 as this type.
    #[inline]
    #[must_use]
    fn two() -> Self {
        // Safe unwrap: 2 is always representable in Float types
        <Self as NumCast>::from(2).unwrap()
    }
}

// Blanket implementation for all types that satisfy the bounds
impl<T: Float + NumCast + Copy + Default + Send + Sync + 'static> SeriesElement for T {}

/// Trait for validating input data before indicator computation.
pub trait ValidatedInput {
    /// The element type of the series.
    type Element: SeriesElement;

    /// Returns the length of the series.
    fn len(&self) -> usize;

    /// Returns true if the series is empty.
    #[inline]
    #[must_use]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Validates that the series has at least `min_length` elements.
    ///
    /// # Errors
    ///
    /// Returns `Error::InsufficientData` if the series is shorter than
    /// `min_length`.
    #[inline]
    fn validate_min_length(&self, min_length: usize, indicator: &'static str) -> Result<()> {
        if self.len() < min_length {
            Err(Error::InsufficientData {
                indicator,
                required: min_length,
                actual: self.len(),
            })
        } else {
            Ok(())
        }
    }

    /// Validates that the series is not empty.
    ///
    /// # Errors
    ///
    /// Returns `Error::EmptyInput` if the series is empty.
    #[inline]
    fn validate_not_empty(&self) -> Result<()> {
        if self.is_empty() {
            Err(Error::EmptyInput)
        } else {
            Ok(())
        }
    }
}

impl<T: SeriesElement> ValidatedInput for [T] {
    type Element = T;

    #[inline]
    fn len(&self) -> usize {
        self.len()
    }
}

impl<T: SeriesElement> ValidatedInput for Vec<T> {
    type Element = T;

    #[inline]
    fn len(&self) -> usize {
        self.len()
    }
}

/// Validates an inclusive `[start_idx, end_idx]` output request against a
/// series of `len` elements.
///
/// # Errors
///
/// - `Error::EmptyInput` if `len` is zero
/// - `Error::OutOfRangeStartIndex` if `start_idx >= len`
/// - `Error::OutOfRangeEndIndex` if `end_idx < start_idx` or `end_idx >= len`
#[inline]
pub const fn validate_range(len: usize, start_idx: usize, end_idx: usize) -> Result<()> {
    if len == 0 {
        return Err(Error::EmptyInput);
    }
    if start_idx >= len {
        return Err(Error::OutOfRangeStartIndex {
            start: start_idx,
            len,
        });
    }
    if end_idx < start_idx || end_idx >= len {
        return Err(Error::OutOfRangeEndIndex {
            end: end_idx,
            start: start_idx,
            len,
        });
    }
    Ok(())
}

/// Validates that a period is usable for indicator computation.
///
/// # Errors
///
/// Returns `Error::InvalidPeriod` if the period is zero.
#[inline]
pub const fn validate_period(period: usize) -> Result<()> {
    if period == 0 {
        Err(Error::InvalidPeriod {
            period,
            reason: "period must be at least 1",
        })
    } else {
        Ok(())
    }
}
