//! Parameter validation.

use thiserror::Error;
use types::ParameterSet;

/// Longest instrument id accepted.
const MAX_INSTRUMENT_LEN: usize = 64;

/// A rejected parameter update. The active parameters are left unchanged.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("order quantity must be positive, got {0}")]
    NonPositiveQuantity(f64),

    #[error("volatility must be positive, got {0}")]
    NonPositiveVolatility(f64),

    #[error("instrument must not be empty")]
    EmptyInstrument,

    #[error("invalid instrument id: {0:?}")]
    InvalidInstrument(String),
}

/// Check a candidate parameter set.
///
/// Quantity and volatility must be finite and strictly positive. The
/// instrument goes into a query string, so it is limited to ASCII
/// alphanumerics and `-`; surrounding whitespace is rejected, not trimmed.
pub fn validate_parameters(params: &ParameterSet) -> Result<(), ValidationError> {
    let qty = params.order_quantity_quote;
    if !(qty.is_finite() && qty > 0.0) {
        return Err(ValidationError::NonPositiveQuantity(qty));
    }

    let vol = params.volatility;
    if !(vol.is_finite() && vol > 0.0) {
        return Err(ValidationError::NonPositiveVolatility(vol));
    }

    let instrument = params.instrument.as_str();
    if instrument.trim().is_empty() {
        return Err(ValidationError::EmptyInstrument);
    }
    if instrument.len() > MAX_INSTRUMENT_LEN
        || !instrument
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-')
    {
        return Err(ValidationError::InvalidInstrument(params.instrument.clone()));
    }

    Ok(())
}
