//! Catalog Fixtures

use rustc_hash::FxHashMap;
use rusty_money::Money;
use serde::Deserialize;

use crate::{
    catalog::{Catalog, CatalogItem},
    fixtures::{FixtureError, LoadedCatalog, parse_price},
};

/// Wrapper for catalog items in YAML.
#[derive(Debug, Deserialize)]
pub struct CatalogFixture {
    /// Map of item slug -> item fixture.
    pub items: FxHashMap<String, CatalogItemFixture>,
}

/// One catalog item from YAML.
#[derive(Debug, Deserialize)]
pub struct CatalogItemFixture {
    /// Display name.
    pub name: String,

    /// Price string (e.g., "899.00 USD").
    pub price: String,

    /// Available stock count.
    pub stock: u32,
}

impl CatalogFixture {
    /// Build a catalog snapshot, returning the slug -> key mapping alongside it.
    ///
    /// # Errors
    ///
    /// Returns an error if any price string is invalid.
    pub fn try_into_catalog(self) -> Result<LoadedCatalog<'static>, FixtureError> {
        let mut catalog = Catalog::new();
        let mut keys = FxHashMap::default();

        for (slug, item) in self.items {
            let (minor_units, currency) = parse_price(&item.price)?;

            let key = catalog.insert(CatalogItem::new(
                item.name,
                Money::from_minor(minor_units, currency),
                item.stock,
            ));

            keys.insert(slug, key);
        }

        Ok(LoadedCatalog { catalog, keys })
    }
}
