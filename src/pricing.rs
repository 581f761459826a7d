//! Pricing
//!
//! The bundle pricing calculator: derives total price, discounted bundle
//! price, savings, and savings percentage from a bundle definition and a
//! catalog snapshot. Pure over its inputs; safe to call repeatedly and cache
//! by `(bundle, price version)`.

use decimal_percentage::Percentage;
use rust_decimal::{Decimal, prelude::FromPrimitive};
use rusty_money::{Money, MoneyError, iso::Currency};
use thiserror::Error;

use crate::{
    bundles::BundleDefinition,
    catalog::{Catalog, CatalogItemKey},
    discounts::{BundleDiscount, DiscountError, percent_of_minor},
};

/// Errors that can occur while pricing a bundle.
#[derive(Debug, Error)]
pub enum PricingError {
    /// The bundle has no constituent items.
    #[error("bundle has no constituent items")]
    EmptyBundle,

    /// A referenced catalog item does not exist in the snapshot.
    #[error("catalog item {0:?} not found in snapshot")]
    ItemNotFound(CatalogItemKey),

    /// Line quantity arithmetic overflowed minor units.
    #[error("bundle total overflowed minor-unit arithmetic")]
    Overflow,

    /// The discount cannot be applied: out of range, or it would produce a
    /// negative bundle price.
    #[error("invalid discount: {0}")]
    InvalidDiscount(#[from] DiscountError),

    /// Wrapped money arithmetic or currency mismatch error.
    #[error(transparent)]
    Money(#[from] MoneyError),
}

/// The derived price breakdown for a bundle. Not persisted anywhere.
#[derive(Debug, Clone, PartialEq)]
pub struct PricingResult<'a> {
    total_price: Money<'a, Currency>,
    bundle_price: Money<'a, Currency>,
    savings: Money<'a, Currency>,
}

impl<'a> PricingResult<'a> {
    /// Sum of constituent unit prices times quantities, before any discount.
    pub fn total_price(&self) -> Money<'a, Currency> {
        self.total_price
    }

    /// Price of the bundle after the discount. Never negative.
    pub fn bundle_price(&self) -> Money<'a, Currency> {
        self.bundle_price
    }

    /// Amount saved against buying the items individually.
    pub fn savings(&self) -> Money<'a, Currency> {
        self.savings
    }

    /// Savings as a fraction of the pre-discount total.
    ///
    /// Recomputed from the actual savings rather than echoing the configured
    /// discount value, so it stays consistent with the money amounts even
    /// after rounding. Zero when the total is zero.
    pub fn savings_percent(&self) -> Percentage {
        let total_minor = self.total_price.to_minor_units();

        if total_minor == 0 {
            return Percentage::from(0.0);
        }

        let savings_dec = Decimal::from_i64(self.savings.to_minor_units()).unwrap_or(Decimal::ZERO);
        let total_dec = Decimal::from_i64(total_minor).unwrap_or(Decimal::ZERO);

        Percentage::from(savings_dec / total_dec)
    }
}

/// Price a bundle against a catalog snapshot.
///
/// Totals the constituent lines in minor units, validates the discount rule
/// against that total, and applies it.
///
/// # Errors
///
/// - [`PricingError::EmptyBundle`]: the bundle has no lines.
/// - [`PricingError::ItemNotFound`]: a line references an item missing from
///   the snapshot.
/// - [`PricingError::InvalidDiscount`]: the percentage is outside `[0, 1]`,
///   or the fixed amount exceeds the total (a negative bundle price).
/// - [`PricingError::Money`]: currency mismatch between constituent items.
pub fn price_bundle<'a>(
    bundle: &BundleDefinition<'a>,
    catalog: &Catalog<'a>,
) -> Result<PricingResult<'a>, PricingError> {
    let lines = bundle.lines();
    let first = lines.first().ok_or(PricingError::EmptyBundle)?;

    let currency = catalog
        .get(first.item)
        .ok_or(PricingError::ItemNotFound(first.item))?
        .price()
        .currency();

    let total_price = lines.iter().try_fold(
        Money::from_minor(0, currency),
        |acc, line| -> Result<Money<'a, Currency>, PricingError> {
            let item = catalog
                .get(line.item)
                .ok_or(PricingError::ItemNotFound(line.item))?;

            let line_minor = item
                .price()
                .to_minor_units()
                .checked_mul(i64::from(line.quantity))
                .ok_or(PricingError::Overflow)?;

            // `add` surfaces any currency mismatch between constituent items.
            Ok(acc.add(Money::from_minor(line_minor, item.price().currency()))?)
        },
    )?;

    bundle.discount().validate_against(&total_price)?;

    let savings = match bundle.discount() {
        BundleDiscount::PercentageOff(percent) => {
            let savings_minor = percent_of_minor(percent, total_price.to_minor_units())?;

            Money::from_minor(savings_minor, currency)
        }
        BundleDiscount::AmountOff(amount) => *amount,
    };

    let bundle_price = total_price.sub(savings)?;

    // Validation puts this out of reach, but the invariant is cheap to state.
    if bundle_price.to_minor_units() < 0 {
        return Err(PricingError::InvalidDiscount(DiscountError::ExceedsTotal));
    }

    Ok(PricingResult {
        total_price,
        bundle_price,
        savings,
    })
}
