//! Bundles
//!
//! A bundle is a fixed grouping of catalog items sold together under a single
//! discount rule. Bundles are never hard-deleted; retirement is a status
//! transition to [`BundleStatus::Inactive`].

use serde::{Deserialize, Serialize};
use slotmap::new_key_type;
use smallvec::SmallVec;
use thiserror::Error;

use crate::{
    catalog::{Catalog, CatalogItemKey},
    discounts::BundleDiscount,
};

new_key_type! {
    /// Bundle Key
    pub struct BundleKey;
}

/// Errors related to bundle stock accounting.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BundleError {
    /// The bundle's stock limit has been reached.
    #[error("bundle is sold out ({0} units sold)")]
    SoldOut(u32),
}

/// Lifecycle status of a bundle.
///
/// A plain flag set by admin/vendor action; there is no transition-guard
/// logic beyond the soft-retirement convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BundleStatus {
    /// Being assembled; not yet sellable.
    Draft,

    /// Live and sellable.
    Active,

    /// Soft-retired; kept for reporting, never offered.
    Inactive,
}

impl BundleStatus {
    /// Return the `snake_case` name of the status.
    #[must_use]
    pub const fn to_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Active => "active",
            Self::Inactive => "inactive",
        }
    }
}

/// One constituent line of a bundle: an item reference and a quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BundleLine {
    /// The referenced catalog item.
    pub item: CatalogItemKey,

    /// How many units of the item the bundle includes.
    pub quantity: u32,
}

impl BundleLine {
    /// Create a new bundle line.
    #[must_use]
    pub fn new(item: CatalogItemKey, quantity: u32) -> Self {
        Self { item, quantity }
    }
}

/// A named grouping of catalog items plus a discount rule.
#[derive(Debug, Clone)]
pub struct BundleDefinition<'a> {
    key: BundleKey,
    name: String,
    description: String,
    lines: SmallVec<[BundleLine; 4]>,
    discount: BundleDiscount<'a>,
    stock_limit: Option<u32>,
    units_sold: u32,
    status: BundleStatus,
}

impl<'a> BundleDefinition<'a> {
    /// Create a new draft bundle with no sales recorded.
    pub fn new(
        key: BundleKey,
        name: impl Into<String>,
        description: impl Into<String>,
        lines: impl Into<SmallVec<[BundleLine; 4]>>,
        discount: BundleDiscount<'a>,
        stock_limit: Option<u32>,
    ) -> Self {
        Self {
            key,
            name: name.into(),
            description: description.into(),
            lines: lines.into(),
            discount,
            stock_limit,
            units_sold: 0,
            status: BundleStatus::Draft,
        }
    }

    /// Return the bundle key.
    #[must_use]
    pub fn key(&self) -> BundleKey {
        self.key
    }

    /// Return the bundle name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Return the bundle description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Return the constituent lines, in definition order.
    #[must_use]
    pub fn lines(&self) -> &[BundleLine] {
        &self.lines
    }

    /// Return the discount rule.
    pub const fn discount(&self) -> &BundleDiscount<'a> {
        &self.discount
    }

    /// Return the stock limit, if any.
    #[must_use]
    pub const fn stock_limit(&self) -> Option<u32> {
        self.stock_limit
    }

    /// Return the number of units sold so far.
    #[must_use]
    pub const fn units_sold(&self) -> u32 {
        self.units_sold
    }

    /// Return the lifecycle status.
    #[must_use]
    pub const fn status(&self) -> BundleStatus {
        self.status
    }

    /// Set the lifecycle status.
    pub fn set_status(&mut self, status: BundleStatus) {
        self.status = status;
    }

    /// Soft-retire the bundle.
    pub fn retire(&mut self) {
        self.status = BundleStatus::Inactive;
    }

    /// Record one sold unit of the bundle.
    ///
    /// # Errors
    ///
    /// Returns [`BundleError::SoldOut`] if the stock limit has been reached.
    pub fn record_sale(&mut self) -> Result<(), BundleError> {
        if let Some(limit) = self.stock_limit
            && self.units_sold >= limit
        {
            return Err(BundleError::SoldOut(self.units_sold));
        }

        self.units_sold = self.units_sold.saturating_add(1);

        Ok(())
    }

    /// Return how many units remain under the stock limit, if one is set.
    #[must_use]
    pub fn remaining_stock(&self) -> Option<u32> {
        self.stock_limit
            .map(|limit| limit.saturating_sub(self.units_sold))
    }

    /// Return how many whole bundles the constituent items' stock can cover.
    ///
    /// Lines referencing items missing from the catalog, and zero-quantity
    /// lines, contribute no constraint. An empty bundle can cover no units.
    #[must_use]
    pub fn sellable_units(&self, catalog: &Catalog<'_>) -> u32 {
        if self.lines.is_empty() {
            return 0;
        }

        self.lines
            .iter()
            .filter(|line| line.quantity > 0)
            .filter_map(|line| {
                catalog
                    .get(line.item)
                    .map(|item| item.stock() / line.quantity)
            })
            .min()
            .unwrap_or(0)
    }
}
