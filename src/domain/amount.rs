use crate::domain::charity::MinorUnits;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq, Clone, Copy)]
pub enum AmountError {
    #[error("amount is empty")]
    Empty,
    #[error("amount is not a decimal number")]
    Unparsable,
    #[error("signed amounts are not accepted")]
    Signed,
    #[error("amount carries more precision than the minor unit supports")]
    ExcessPrecision,
    #[error("amount is out of range")]
    OutOfRange,
}

/// Parses a user-supplied decimal string into an exact count of minor
/// currency units.
///
/// The input is scaled by `minor_unit_factor` (100 for two-decimal
/// currencies) and must land exactly on an integer: `"100.77"` with factor
/// 100 yields 10077 minor units, while `"100.777"` is rejected because it
/// encodes sub-minor-unit precision. Pure function, no side effects.
pub fn normalize(raw: &str, minor_unit_factor: u32) -> Result<MinorUnits, AmountError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(AmountError::Empty);
    }
    // An explicit sign is not a valid donation input, even "+".
    if trimmed.starts_with('+') || trimmed.starts_with('-') {
        return Err(AmountError::Signed);
    }

    let value = Decimal::from_str(trimmed).map_err(|_| AmountError::Unparsable)?;
    let scaled = value * Decimal::from(minor_unit_factor);
    if !scaled.is_integer() {
        return Err(AmountError::ExcessPrecision);
    }

    scaled
        .to_u64()
        .map(MinorUnits::new)
        .ok_or(AmountError::OutOfRange)
}
