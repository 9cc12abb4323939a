//! Promotions
//!
//! A promo authority answers a code with a loosely typed discount value: either
//! a bare number (a fixed amount off) or a string ending in `%` (a percentage of
//! the subtotal). The value is decided into a [`PromoDiscount`] exactly once, when
//! the response is parsed, and never re-inspected afterwards.

use std::fmt;

use decimal_percentage::Percentage;
use rust_decimal::Decimal;
use rusty_money::{Money, iso::Currency};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    discounts::{DiscountError, percent_of_minor, percentage_from_points, percentage_points},
    pricing::{Price, PricingError, price_from_decimal},
};

/// Errors raised while interpreting a promo response.
#[derive(Debug, Error, PartialEq)]
pub enum PromoError {
    /// The discount value could not be interpreted.
    #[error("invalid discount value: {0}")]
    InvalidDiscount(String),

    /// Percentage outside `0..=100`.
    #[error("discount percentage {0} is outside 0-100")]
    PercentageOutOfRange(Decimal),

    /// Fixed amounts must not be negative.
    #[error("fixed discount {0} is negative")]
    NegativeAmount(Decimal),

    /// Wrapped percentage conversion error.
    #[error(transparent)]
    Discount(#[from] DiscountError),

    /// Wrapped amount conversion error.
    #[error(transparent)]
    Pricing(#[from] PricingError),
}

/// Discount value exactly as the promo authority sent it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawDiscount {
    /// Textual value, e.g. `"10%"` or `"500"`.
    Text(String),

    /// Numeric value, always a fixed amount.
    Number(Decimal),
}

impl fmt::Display for RawDiscount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Number(number) => fmt::Display::fmt(number, f),
        }
    }
}

/// A typed discount rule.
#[derive(Debug, Clone, Copy)]
pub enum PromoDiscount {
    /// Percentage of the subtotal (e.g. "10%").
    Percentage(Percentage),

    /// Fixed amount off the subtotal (e.g. "₦500 off").
    Fixed(Price),
}

impl PromoDiscount {
    /// Decide the discount type from the authority's raw value.
    ///
    /// A string with a trailing `%` is a percentage; everything else is a fixed
    /// amount in major units of `currency`.
    ///
    /// # Errors
    ///
    /// Returns a [`PromoError`] when the value is not numeric, a percentage is
    /// outside `0..=100`, or a fixed amount is negative.
    pub fn parse(raw: &RawDiscount, currency: &'static Currency) -> Result<Self, PromoError> {
        let (value, is_percentage) = match raw {
            RawDiscount::Number(number) => (*number, false),
            RawDiscount::Text(text) => {
                let text = text.trim();

                match text.strip_suffix('%') {
                    Some(points) => (parse_decimal(points.trim(), raw)?, true),
                    None => (parse_decimal(text, raw)?, false),
                }
            }
        };

        if is_percentage {
            if value < Decimal::ZERO || value > Decimal::ONE_HUNDRED {
                return Err(PromoError::PercentageOutOfRange(value));
            }

            return Ok(Self::Percentage(percentage_from_points(value)?));
        }

        if value < Decimal::ZERO {
            return Err(PromoError::NegativeAmount(value));
        }

        Ok(Self::Fixed(price_from_decimal(value, currency)?))
    }

    /// Amount taken off `subtotal`.
    ///
    /// Percentages take `subtotal × p / 100`, rounded to a whole minor unit;
    /// fixed amounts take `min(value, subtotal)`. The result never exceeds the
    /// subtotal and is never negative.
    ///
    /// # Errors
    ///
    /// Returns [`PromoError::Discount`] if the percentage calculation overflows.
    pub fn amount_off(&self, subtotal: &Price) -> Result<Price, PromoError> {
        let subtotal_minor = subtotal.to_minor_units().max(0);

        let off = match self {
            Self::Percentage(percent) => percent_of_minor(percent, subtotal_minor)?,
            Self::Fixed(amount) => amount.to_minor_units(),
        };

        Ok(Money::from_minor(
            off.clamp(0, subtotal_minor),
            subtotal.currency(),
        ))
    }

    /// Check if this is a percentage discount.
    pub fn is_percentage(&self) -> bool {
        matches!(self, Self::Percentage(_))
    }
}

impl fmt::Display for PromoDiscount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Percentage(percent) => write!(f, "{}% off", percentage_points(percent)),
            Self::Fixed(amount) => write!(f, "{amount} off"),
        }
    }
}

/// A promo code accepted by the promo authority.
#[derive(Debug, Clone)]
pub struct PromoDescriptor {
    /// Code as echoed by the authority
    pub code: String,

    /// Typed discount rule
    pub discount: PromoDiscount,
}

impl PromoDescriptor {
    /// Build a descriptor from the authority's response fields.
    ///
    /// # Errors
    ///
    /// Returns a [`PromoError`] if the discount cannot be interpreted.
    pub fn from_raw(
        code: impl Into<String>,
        raw: &RawDiscount,
        currency: &'static Currency,
    ) -> Result<Self, PromoError> {
        Ok(Self {
            code: code.into(),
            discount: PromoDiscount::parse(raw, currency)?,
        })
    }
}

fn parse_decimal(text: &str, raw: &RawDiscount) -> Result<Decimal, PromoError> {
    text.parse::<Decimal>()
        .map_err(|error| PromoError::InvalidDiscount(format!("{raw}: {error}")))
}
