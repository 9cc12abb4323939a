//! Discount utilities

use decimal_percentage::Percentage;
use rust_decimal::{
    Decimal, RoundingStrategy,
    prelude::{FromPrimitive, ToPrimitive},
};
use thiserror::Error;

/// Errors specific to discount calculations.
#[derive(Debug, Error, PartialEq)]
pub enum DiscountError {
    /// Percentage calculation could not be safely converted.
    #[error("percentage conversion overflowed or was not finite")]
    PercentConversion,
}

/// Calculate a percentage of a minor-unit amount, rounded half away from zero
/// to a whole minor unit.
///
/// # Errors
///
/// Returns [`DiscountError::PercentConversion`] if the calculation overflows.
pub fn percent_of_minor(percent: &Percentage, minor: i64) -> Result<i64, DiscountError> {
    let minor = Decimal::from_i64(minor).ok_or(DiscountError::PercentConversion)?;

    ((*percent) * Decimal::ONE) // decimal_percentage keeps the underlying Decimal private
        .checked_mul(minor)
        .ok_or(DiscountError::PercentConversion)?
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .ok_or(DiscountError::PercentConversion)
}

/// Build a [`Percentage`] from percentage points, e.g. `10` for 10%.
///
/// # Errors
///
/// Returns [`DiscountError::PercentConversion`] if the value cannot be represented.
pub fn percentage_from_points(points: Decimal) -> Result<Percentage, DiscountError> {
    let fraction = points
        .checked_div(Decimal::ONE_HUNDRED)
        .and_then(|fraction| fraction.to_f64())
        .filter(|fraction| fraction.is_finite())
        .ok_or(DiscountError::PercentConversion)?;

    Ok(Percentage::from(fraction))
}

/// Express a [`Percentage`] in percentage points, e.g. `10` for 10%.
pub fn percentage_points(percent: &Percentage) -> Decimal {
    ((*percent) * Decimal::ONE_HUNDRED).normalize()
}
