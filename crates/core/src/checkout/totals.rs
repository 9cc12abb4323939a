//! Checkout Totals

use rusty_money::Money;

use crate::{
    cart::Cart,
    checkout::details::CustomerDetails,
    pricing::{Price, PricingError},
    promotions::{PromoDescriptor, PromoDiscount, PromoError},
};

/// Amounts payable for one checkout.
///
/// The discount applies to the subtotal only and is rounded to a whole minor
/// unit when it is computed, so `final_amount` is always
/// `max(0, subtotal - discount) + delivery_fee`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CheckoutTotals {
    /// Sum of all cart lines
    pub subtotal: Price,

    /// Flat delivery charge
    pub delivery_fee: Price,

    /// Amount taken off the subtotal, never more than the subtotal
    pub discount: Price,

    /// Amount the customer pays
    pub final_amount: Price,
}

impl CheckoutTotals {
    /// Compute totals for a subtotal, delivery fee and optional discount rule.
    ///
    /// # Errors
    ///
    /// - [`PromoError::Pricing`]: the fee is in another currency or the sum overflows.
    /// - [`PromoError::Discount`]: the percentage calculation overflowed.
    pub fn compute(
        subtotal: Price,
        delivery_fee: Price,
        discount: Option<&PromoDiscount>,
    ) -> Result<Self, PromoError> {
        let currency = subtotal.currency();

        if delivery_fee.currency() != currency {
            return Err(PricingError::CurrencyMismatch {
                expected: currency.iso_alpha_code,
                found: delivery_fee.currency().iso_alpha_code,
            }
            .into());
        }

        let discount = match discount {
            Some(rule) => rule.amount_off(&subtotal)?,
            None => Money::from_minor(0, currency),
        };

        let discounted = subtotal
            .to_minor_units()
            .saturating_sub(discount.to_minor_units())
            .max(0);

        let final_minor = discounted
            .checked_add(delivery_fee.to_minor_units())
            .ok_or(PricingError::Overflow)?;

        Ok(Self {
            subtotal,
            delivery_fee,
            discount,
            final_amount: Money::from_minor(final_minor, currency),
        })
    }

    /// Final amount as an integer count of the currency's smallest unit.
    pub fn final_amount_minor(&self) -> i64 {
        self.final_amount.to_minor_units()
    }
}

/// Everything known about a checkout at the moment it is priced.
#[derive(Debug, Clone)]
pub struct CheckoutContext {
    /// Contact and delivery details
    pub customer: CustomerDetails,

    /// Cart contents at pricing time
    pub cart: Cart,

    /// Promo applied, if any
    pub promo: Option<PromoDescriptor>,

    /// Computed amounts
    pub totals: CheckoutTotals,
}

impl CheckoutContext {
    /// Price `cart` with `delivery_fee` and an optional promo.
    ///
    /// # Errors
    ///
    /// Returns a [`PromoError`] if the totals cannot be computed.
    pub fn new(
        customer: CustomerDetails,
        cart: Cart,
        delivery_fee: Price,
        promo: Option<PromoDescriptor>,
    ) -> Result<Self, PromoError> {
        let subtotal = cart.total_price()?;
        let totals = CheckoutTotals::compute(
            subtotal,
            delivery_fee,
            promo.as_ref().map(|promo| &promo.discount),
        )?;

        Ok(Self {
            customer,
            cart,
            promo,
            totals,
        })
    }
}
