//! Error types for input normalization and calendar conversion.

use thiserror::Error;

/// Errors from birth-input validation or external calendar conversion.
///
/// A degraded solar-term source is deliberately NOT an error: the provider
/// falls back to fixed approximate boundaries instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum CalendarError {
    /// Malformed or out-of-range birth input.
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// The lunar→solar converter returned no result; the civil date cannot
    /// be recovered without it.
    #[error("lunar-to-solar conversion unavailable")]
    ConversionUnavailable,
    /// An overseas city could not be resolved to a timezone offset.
    #[error("unknown city: {0}")]
    UnknownCity(String),
}
