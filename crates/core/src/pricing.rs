//! Pricing
//!
//! Minor-unit money helpers shared by the cart and checkout totals.

use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};
use rusty_money::{Findable, Money, iso::Currency};
use thiserror::Error;

/// Money in the store currency.
pub type Price = Money<'static, Currency>;

/// Errors that can occur while converting or totalling prices.
#[derive(Debug, Error, PartialEq)]
pub enum PricingError {
    /// A multiplication or sum left the `i64` minor-unit range.
    #[error("price arithmetic overflowed")]
    Overflow,

    /// A decimal amount could not be represented in minor units.
    #[error("invalid amount: {0}")]
    InvalidAmount(Decimal),

    /// The ISO currency code is not known.
    #[error("unknown currency code: {0}")]
    UnknownCurrency(String),

    /// A price was in a different currency from the one being totalled.
    #[error("price has currency {found}, expected {expected}")]
    CurrencyMismatch {
        /// Currency being totalled.
        expected: &'static str,
        /// Currency of the offending price.
        found: &'static str,
    },
}

/// Look up an ISO currency by its alpha code (e.g. `"NGN"`).
///
/// # Errors
///
/// Returns [`PricingError::UnknownCurrency`] when the code is not recognised.
pub fn find_currency(code: &str) -> Result<&'static Currency, PricingError> {
    Currency::find(code).ok_or_else(|| PricingError::UnknownCurrency(code.to_string()))
}

/// Convert a decimal amount in major units into a [`Price`], rounding half away
/// from zero to the currency's minor unit.
///
/// # Errors
///
/// Returns [`PricingError::InvalidAmount`] when the amount does not fit in minor units.
pub fn price_from_decimal(
    amount: Decimal,
    currency: &'static Currency,
) -> Result<Price, PricingError> {
    let minor = amount
        .checked_mul(minor_unit_scale(currency))
        .map(|scaled| scaled.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero))
        .and_then(|rounded| rounded.to_i64())
        .ok_or(PricingError::InvalidAmount(amount))?;

    Ok(Money::from_minor(minor, currency))
}

/// Express a price in major units, e.g. `2598` kobo as `25.98`.
pub fn major_units(price: &Price) -> Decimal {
    Decimal::new(price.to_minor_units(), price.currency().exponent)
}

/// Price of `quantity` units at `unit_price`.
///
/// # Errors
///
/// Returns [`PricingError::Overflow`] when the result leaves the minor-unit range.
pub fn line_total(unit_price: &Price, quantity: u32) -> Result<Price, PricingError> {
    let minor = unit_price
        .to_minor_units()
        .checked_mul(i64::from(quantity))
        .ok_or(PricingError::Overflow)?;

    Ok(Money::from_minor(minor, unit_price.currency()))
}

/// Sum prices that share `currency`. An empty iterator totals zero.
///
/// # Errors
///
/// - [`PricingError::Overflow`]: the sum left the minor-unit range.
/// - [`PricingError::CurrencyMismatch`]: a price was in a different currency.
pub fn total_price<'p>(
    prices: impl IntoIterator<Item = &'p Price>,
    currency: &'static Currency,
) -> Result<Price, PricingError> {
    let minor = prices.into_iter().try_fold(0_i64, |acc, price| {
        if price.currency() != currency {
            return Err(PricingError::CurrencyMismatch {
                expected: currency.iso_alpha_code,
                found: price.currency().iso_alpha_code,
            });
        }

        acc.checked_add(price.to_minor_units())
            .ok_or(PricingError::Overflow)
    })?;

    Ok(Money::from_minor(minor, currency))
}

fn minor_unit_scale(currency: &Currency) -> Decimal {
    Decimal::from(10_i64.pow(currency.exponent))
}
