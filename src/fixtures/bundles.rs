//! Bundle Fixtures

use decimal_percentage::Percentage;
use rustc_hash::FxHashMap;
use rusty_money::Money;
use serde::Deserialize;
use smallvec::SmallVec;

use crate::{
    bundles::{BundleDefinition, BundleKey, BundleLine, BundleStatus},
    catalog::CatalogItemKey,
    discounts::BundleDiscount,
    fixtures::{FixtureError, parse_price},
};

/// Wrapper for bundles in YAML.
#[derive(Debug, Deserialize)]
pub struct BundlesFixture {
    /// Map of bundle slug -> bundle fixture.
    pub bundles: FxHashMap<String, BundleFixture>,
}

/// One bundle from YAML.
#[derive(Debug, Deserialize)]
pub struct BundleFixture {
    /// Bundle name.
    pub name: String,

    /// Bundle description.
    #[serde(default)]
    pub description: String,

    /// Lifecycle status; new fixtures default to draft.
    #[serde(default = "default_status")]
    pub status: BundleStatus,

    /// Optional stock limit.
    #[serde(default)]
    pub stock_limit: Option<u32>,

    /// Constituent lines, in definition order.
    pub lines: Vec<BundleLineFixture>,

    /// Discount configuration.
    pub discount: BundleDiscountFixtureConfig,
}

const fn default_status() -> BundleStatus {
    BundleStatus::Draft
}

/// One bundle line from YAML.
#[derive(Debug, Deserialize)]
pub struct BundleLineFixture {
    /// Slug of the referenced catalog item.
    pub item: String,

    /// Quantity of the item; defaults to one.
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

const fn default_quantity() -> u32 {
    1
}

/// Bundle discount configuration from YAML fixtures.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BundleDiscountFixtureConfig {
    /// Percentage discount (fractional, e.g., 0.2 for 20% off).
    Percentage {
        /// Discount fraction.
        value: f64,
    },

    /// Fixed amount off the bundle total (e.g., "108.00 USD").
    AmountOff {
        /// Discount amount string.
        value: String,
    },
}

impl TryFrom<BundleDiscountFixtureConfig> for BundleDiscount<'_> {
    type Error = FixtureError;

    fn try_from(config: BundleDiscountFixtureConfig) -> Result<Self, Self::Error> {
        match config {
            BundleDiscountFixtureConfig::Percentage { value } => {
                Ok(BundleDiscount::PercentageOff(Percentage::from(value)))
            }
            BundleDiscountFixtureConfig::AmountOff { value } => {
                let (minor_units, currency) = parse_price(&value)?;

                Ok(BundleDiscount::AmountOff(Money::from_minor(
                    minor_units,
                    currency,
                )))
            }
        }
    }
}

impl BundleFixture {
    /// Convert to a [`BundleDefinition`], resolving item slugs to keys.
    ///
    /// # Errors
    ///
    /// Returns an error if the discount configuration is invalid or a line
    /// references a slug missing from `item_keys`.
    pub fn try_into_bundle(
        self,
        key: BundleKey,
        item_keys: &FxHashMap<String, CatalogItemKey>,
    ) -> Result<BundleDefinition<'static>, FixtureError> {
        let lines = self
            .lines
            .into_iter()
            .map(|line| {
                let item = item_keys
                    .get(&line.item)
                    .ok_or(FixtureError::ItemNotFound(line.item))?;

                Ok(BundleLine::new(*item, line.quantity))
            })
            .collect::<Result<SmallVec<[BundleLine; 4]>, FixtureError>>()?;

        let discount = BundleDiscount::try_from(self.discount)?;

        let mut bundle = BundleDefinition::new(
            key,
            self.name,
            self.description,
            lines,
            discount,
            self.stock_limit,
        );
        bundle.set_status(self.status);

        Ok(bundle)
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    fn single_item_keys() -> FxHashMap<String, CatalogItemKey> {
        let mut keys = FxHashMap::default();
        keys.insert("camera".to_string(), CatalogItemKey::default());

        keys
    }

    #[test]
    fn bundle_fixture_parses_percentage_discount() -> TestResult {
        let yaml = r"
name: Photo Kit
status: active
lines:
  - item: camera
discount:
  type: percentage
  value: 0.2
";
        let fixture: BundleFixture = serde_norway::from_str(yaml)?;
        let bundle = fixture.try_into_bundle(BundleKey::default(), &single_item_keys())?;

        assert_eq!(bundle.status(), BundleStatus::Active);
        assert_eq!(bundle.lines().len(), 1);
        assert!(matches!(
            bundle.discount(),
            BundleDiscount::PercentageOff(percent) if *percent == Percentage::from(0.2)
        ));

        Ok(())
    }

    #[test]
    fn bundle_fixture_parses_amount_off_discount() -> TestResult {
        let yaml = r#"
name: Photo Kit
lines:
  - item: camera
    quantity: 2
discount:
  type: amount_off
  value: "108.00 USD"
"#;
        let fixture: BundleFixture = serde_norway::from_str(yaml)?;
        let bundle = fixture.try_into_bundle(BundleKey::default(), &single_item_keys())?;

        assert_eq!(bundle.status(), BundleStatus::Draft);
        assert!(matches!(
            bundle.discount(),
            BundleDiscount::AmountOff(money) if money.to_minor_units() == 10_800
        ));

        Ok(())
    }

    #[test]
    fn bundle_fixture_rejects_unknown_item_slug() -> TestResult {
        let yaml = r"
name: Photo Kit
lines:
  - item: missing
discount:
  type: percentage
  value: 0.2
";
        let fixture: BundleFixture = serde_norway::from_str(yaml)?;
        let result = fixture.try_into_bundle(BundleKey::default(), &single_item_keys());

        assert!(matches!(result, Err(FixtureError::ItemNotFound(slug)) if slug == "missing"));

        Ok(())
    }

    #[test]
    fn bundle_fixture_rejects_unknown_discount_type() {
        let yaml = r"
name: Photo Kit
lines:
  - item: camera
discount:
  type: mystery_discount
  value: 0.2
";
        let result: Result<BundleFixture, _> = serde_norway::from_str(yaml);

        assert!(result.is_err());
    }
}
