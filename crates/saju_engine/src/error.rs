//! Engine-level error type.

use saju_calendar::CalendarError;
use thiserror::Error;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum EngineError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("lunar to solar conversion unavailable")]
    ConversionUnavailable,

    #[error("computation failed: {0}")]
    Computation(String),
}

impl From<CalendarError> for EngineError {
    fn from(err: CalendarError) -> Self {
        match err {
            CalendarError::InvalidInput(msg) => EngineError::InvalidInput(msg),
            CalendarError::ConversionUnavailable => EngineError::ConversionUnavailable,
            CalendarError::UnknownCity(city) => {
                EngineError::InvalidInput(format!("unknown city: {city}"))
            }
            other => EngineError::Computation(other.to_string()),
        }
    }
}
