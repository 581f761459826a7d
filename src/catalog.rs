//! Catalog
//!
//! An immutable snapshot of sellable items, taken per pricing request. The
//! pricing calculator only reads from it; mutation between requests is the
//! caller's concern.

use rusty_money::{Money, iso::Currency};
use slotmap::{SlotMap, new_key_type};

new_key_type! {
    /// Catalog Item Key
    pub struct CatalogItemKey;
}

/// A sellable unit with a price and stock count.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogItem<'a> {
    name: String,
    price: Money<'a, Currency>,
    stock: u32,
}

impl<'a> CatalogItem<'a> {
    /// Create a new catalog item.
    pub fn new(name: impl Into<String>, price: Money<'a, Currency>, stock: u32) -> Self {
        Self {
            name: name.into(),
            price,
            stock,
        }
    }

    /// Return the display name of the item.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Return the unit price of the item.
    pub fn price(&self) -> &Money<'a, Currency> {
        &self.price
    }

    /// Return the available stock count.
    #[must_use]
    pub fn stock(&self) -> u32 {
        self.stock
    }
}

/// A snapshot of the item catalog, keyed by [`CatalogItemKey`].
#[derive(Debug, Default)]
pub struct Catalog<'a> {
    items: SlotMap<CatalogItemKey, CatalogItem<'a>>,
}

impl<'a> Catalog<'a> {
    /// Create an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self {
            items: SlotMap::with_key(),
        }
    }

    /// Add an item to the catalog, returning its key.
    pub fn insert(&mut self, item: CatalogItem<'a>) -> CatalogItemKey {
        self.items.insert(item)
    }

    /// Look up an item by key.
    #[must_use]
    pub fn get(&self, key: CatalogItemKey) -> Option<&CatalogItem<'a>> {
        self.items.get(key)
    }

    /// Iterate over all items in the catalog.
    pub fn iter(&self) -> slotmap::basic::Iter<'_, CatalogItemKey, CatalogItem<'a>> {
        self.items.iter()
    }

    /// Get the number of items in the catalog.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<'s, 'a> IntoIterator for &'s Catalog<'a> {
    type Item = (CatalogItemKey, &'s CatalogItem<'a>);
    type IntoIter = slotmap::basic::Iter<'s, CatalogItemKey, CatalogItem<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
