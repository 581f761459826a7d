//! Discounts
//!
//! The discount rule shapes a bundle can carry, plus the minor-unit percentage
//! arithmetic shared by the pricing calculator.

use decimal_percentage::Percentage;
use rust_decimal::{
    Decimal, RoundingStrategy,
    prelude::{FromPrimitive, ToPrimitive},
};
use rusty_money::{Money, MoneyError, iso::Currency};
use thiserror::Error;

/// Errors specific to discount calculations.
#[derive(Debug, Error)]
pub enum DiscountError {
    /// Percentage calculation could not be safely converted.
    #[error("percentage conversion overflowed or was not finite")]
    PercentConversion,

    /// Percentage discount outside the valid `[0, 1]` fractional range.
    #[error("percentage discount {0} is outside the valid range 0..=1")]
    PercentOutOfRange(Decimal),

    /// Fixed discount larger than the price it applies to.
    #[error("fixed discount exceeds the bundle total")]
    ExceedsTotal,

    /// Fixed discount below zero.
    #[error("fixed discount is negative")]
    NegativeAmount,

    /// Wrapped money arithmetic or currency mismatch error.
    #[error(transparent)]
    Money(#[from] MoneyError),
}

/// The discount rule applied to a bundle's total price.
#[derive(Debug, Copy, Clone)]
pub enum BundleDiscount<'a> {
    /// Apply a fractional percentage discount to the total (e.g., `0.20` for 20% off).
    PercentageOff(Percentage),

    /// Subtract a fixed amount from the total (e.g., "$10 off").
    AmountOff(Money<'a, Currency>),
}

impl BundleDiscount<'_> {
    /// Check that this discount is valid against a bundle total.
    ///
    /// A percentage discount must lie in `[0, 1]`; a fixed discount must not
    /// exceed the total it is subtracted from.
    ///
    /// # Errors
    ///
    /// - [`DiscountError::PercentOutOfRange`]: percentage is negative or above 100%.
    /// - [`DiscountError::ExceedsTotal`]: fixed amount is larger than the total.
    /// - [`DiscountError::Money`]: the fixed amount's currency differs from the total's.
    pub fn validate_against(&self, total: &Money<'_, Currency>) -> Result<(), DiscountError> {
        match self {
            BundleDiscount::PercentageOff(percent) => {
                let fraction = (*percent) * Decimal::ONE;

                if fraction < Decimal::ZERO || fraction > Decimal::ONE {
                    return Err(DiscountError::PercentOutOfRange(fraction));
                }

                Ok(())
            }
            BundleDiscount::AmountOff(amount) => {
                if amount.currency() != total.currency() {
                    return Err(DiscountError::Money(MoneyError::CurrencyMismatch {
                        expected: total.currency().iso_alpha_code,
                        actual: amount.currency().iso_alpha_code,
                    }));
                }

                if amount.to_minor_units() < 0 {
                    return Err(DiscountError::NegativeAmount);
                }

                if amount.to_minor_units() > total.to_minor_units() {
                    return Err(DiscountError::ExceedsTotal);
                }

                Ok(())
            }
        }
    }
}

/// Calculate the discount amount in minor units for a percentage of a minor unit amount.
///
/// Rounds midpoints away from zero so that a 10% discount on 15 minor units is
/// 2, not 1.
///
/// # Errors
///
/// Returns [`DiscountError::PercentConversion`] if the multiplication overflows
/// or the result cannot be represented as an `i64`.
pub fn percent_of_minor(percent: &Percentage, minor: i64) -> Result<i64, DiscountError> {
    let minor = Decimal::from_i64(minor).ok_or(DiscountError::PercentConversion)?;

    ((*percent) * Decimal::ONE) // decimal_percentage doesn't expose the underlying Decimal
        .checked_mul(minor)
        .ok_or(DiscountError::PercentConversion)?
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .ok_or(DiscountError::PercentConversion)
}
