//! Integration tests for bundle pricing against a catalog snapshot.
//!
//! Walks the storefront's published pricing scenarios end to end:
//!
//! 1. "Creator Kit" - $899 laptop + $29 mouse + $79 keyboard with $108 off
//!    - Total: $1007.00, bundle: $899.00, savings percent ~10.73%
//! 2. "Studio Set" - $299 + $89 + $149 at 20% off
//!    - Total: $537.00, savings: $107.40, bundle: $429.60
//! 3. Degenerate bundles: empty, over-discounted, out-of-range percentages.

use decimal_percentage::Percentage;
use rust_decimal::Decimal;
use rusty_money::{Money, iso::USD};
use testresult::TestResult;

use mercato::prelude::*;

fn catalog_with_prices(prices: &[i64]) -> (Catalog<'static>, Vec<CatalogItemKey>) {
    let mut catalog = Catalog::new();
    let keys = prices
        .iter()
        .enumerate()
        .map(|(i, minor)| {
            catalog.insert(CatalogItem::new(
                format!("Item {i}"),
                Money::from_minor(*minor, USD),
                10,
            ))
        })
        .collect();

    (catalog, keys)
}

fn bundle_over(
    keys: &[CatalogItemKey],
    discount: BundleDiscount<'static>,
) -> BundleDefinition<'static> {
    let lines: Vec<BundleLine> = keys.iter().map(|key| BundleLine::new(*key, 1)).collect();

    BundleDefinition::new(BundleKey::default(), "Bundle", "", lines, discount, None)
}

#[test]
fn fixed_discount_creator_kit() -> TestResult {
    let (catalog, keys) = catalog_with_prices(&[89_900, 2_900, 7_900]);
    let bundle = bundle_over(
        &keys,
        BundleDiscount::AmountOff(Money::from_minor(10_800, USD)),
    );

    let result = price_bundle(&bundle, &catalog)?;

    assert_eq!(result.total_price(), Money::from_minor(100_700, USD));
    assert_eq!(result.bundle_price(), Money::from_minor(89_900, USD));
    assert_eq!(result.savings(), Money::from_minor(10_800, USD));

    // 10800 / 100700 is roughly 10.73% off.
    let percent = result.savings_percent() * Decimal::ONE;
    let expected = Decimal::new(10_800, 0) / Decimal::new(100_700, 0);

    assert_eq!(percent, expected);

    Ok(())
}

#[test]
fn percentage_discount_studio_set() -> TestResult {
    let (catalog, keys) = catalog_with_prices(&[29_900, 8_900, 14_900]);
    let bundle = bundle_over(&keys, BundleDiscount::PercentageOff(Percentage::from(0.2)));

    let result = price_bundle(&bundle, &catalog)?;

    assert_eq!(result.total_price(), Money::from_minor(53_700, USD));
    assert_eq!(result.savings(), Money::from_minor(10_740, USD));
    assert_eq!(result.bundle_price(), Money::from_minor(42_960, USD));

    Ok(())
}

#[test]
fn percentage_savings_percent_round_trips() -> TestResult {
    // For a clean percentage discount the recomputed savings percent matches
    // the configured discount value.
    let (catalog, keys) = catalog_with_prices(&[10_000, 5_000]);

    for tenths in 0..=10 {
        let fraction = Decimal::new(tenths, 1);
        let bundle = bundle_over(&keys, BundleDiscount::PercentageOff(Percentage::from(fraction)));

        let result = price_bundle(&bundle, &catalog)?;

        assert_eq!(
            result.savings_percent(),
            Percentage::from(fraction),
            "savings percent drifted at {fraction}"
        );
    }

    Ok(())
}

#[test]
fn percentage_bundle_price_stays_within_bounds() -> TestResult {
    // 0 <= bundle price <= total for any in-range percentage.
    let (catalog, keys) = catalog_with_prices(&[89_900, 2_900, 7_900]);

    for hundredths in 0..=100 {
        let fraction = Decimal::new(hundredths, 2);
        let bundle = bundle_over(&keys, BundleDiscount::PercentageOff(Percentage::from(fraction)));

        let result = price_bundle(&bundle, &catalog)?;
        let bundle_minor = result.bundle_price().to_minor_units();

        assert!(bundle_minor >= 0, "negative price at {fraction}");
        assert!(
            bundle_minor <= result.total_price().to_minor_units(),
            "price above total at {fraction}"
        );
    }

    Ok(())
}

#[test]
fn fixed_discount_is_exact() -> TestResult {
    let (catalog, keys) = catalog_with_prices(&[50_000]);

    for off in [0, 1, 25_000, 49_999, 50_000] {
        let bundle = bundle_over(&keys, BundleDiscount::AmountOff(Money::from_minor(off, USD)));

        let result = price_bundle(&bundle, &catalog)?;

        assert_eq!(
            result.bundle_price(),
            Money::from_minor(50_000 - off, USD),
            "inexact fixed discount at {off}"
        );
    }

    Ok(())
}

#[test]
fn empty_bundle_is_rejected() {
    let (catalog, _) = catalog_with_prices(&[1_000]);
    let bundle = bundle_over(&[], BundleDiscount::PercentageOff(Percentage::from(0.1)));

    assert!(matches!(
        price_bundle(&bundle, &catalog),
        Err(PricingError::EmptyBundle)
    ));
}

#[test]
fn over_discounted_bundle_is_rejected() {
    let (catalog, keys) = catalog_with_prices(&[1_000]);
    let bundle = bundle_over(
        &keys,
        BundleDiscount::AmountOff(Money::from_minor(1_500, USD)),
    );

    assert!(matches!(
        price_bundle(&bundle, &catalog),
        Err(PricingError::InvalidDiscount(_))
    ));
}

#[test]
fn percentage_above_one_is_rejected() {
    let (catalog, keys) = catalog_with_prices(&[1_000]);
    let bundle = bundle_over(&keys, BundleDiscount::PercentageOff(Percentage::from(1.01)));

    assert!(matches!(
        price_bundle(&bundle, &catalog),
        Err(PricingError::InvalidDiscount(_))
    ));
}

#[test]
fn pricing_is_deterministic_across_calls() -> TestResult {
    let (catalog, keys) = catalog_with_prices(&[29_900, 8_900, 14_900]);
    let bundle = bundle_over(&keys, BundleDiscount::PercentageOff(Percentage::from(0.2)));

    let first = price_bundle(&bundle, &catalog)?;
    let second = price_bundle(&bundle, &catalog)?;

    assert_eq!(first, second);

    Ok(())
}
