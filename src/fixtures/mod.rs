//! Fixtures
//!
//! YAML definitions for catalog snapshots, bundles, and tier schedules. This
//! is the only module that performs I/O; everything it produces is the same
//! plain data the rest of the crate computes over.

use std::{fs, path::Path};

use rust_decimal::{Decimal, prelude::ToPrimitive};
use rustc_hash::FxHashMap;
use rusty_money::iso::{Currency, EUR, GBP, USD};
use thiserror::Error;

use crate::{
    bundles::{BundleDefinition, BundleKey},
    catalog::{Catalog, CatalogItemKey},
    tiers::{TierError, TierSchedule},
};

pub mod bundles;
pub mod catalog;
pub mod tiers;

/// Fixture parsing errors.
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files.
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error.
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid price format.
    #[error("Invalid price format: {0}")]
    InvalidPrice(String),

    /// Unknown currency code.
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    /// A bundle line referenced an item slug missing from the catalog fixture.
    #[error("Catalog item not found: {0}")]
    ItemNotFound(String),

    /// The tier list did not form a valid schedule.
    #[error(transparent)]
    Tier(#[from] TierError),
}

/// Parse a price string in `"AMOUNT CURRENCY"` format into minor units.
///
/// # Errors
///
/// - [`FixtureError::InvalidPrice`]: not two whitespace-separated parts, or
///   the amount is not a decimal number.
/// - [`FixtureError::UnknownCurrency`]: the currency code is not supported.
pub fn parse_price(s: &str) -> Result<(i64, &'static Currency), FixtureError> {
    let parts: Vec<&str> = s.split_whitespace().collect();

    if parts.len() != 2 {
        return Err(FixtureError::InvalidPrice(format!(
            "Expected format 'AMOUNT CURRENCY', got: {s}"
        )));
    }

    let amount = parts
        .first()
        .ok_or_else(|| FixtureError::InvalidPrice(s.to_string()))?
        .parse::<Decimal>()
        .map_err(|_err| FixtureError::InvalidPrice(s.to_string()))?;

    let minor_units = amount
        .checked_mul(Decimal::new(100, 0))
        .and_then(|value| value.round_dp(0).to_i64())
        .ok_or_else(|| FixtureError::InvalidPrice(s.to_string()))?;

    let currency_code = parts
        .get(1)
        .ok_or_else(|| FixtureError::InvalidPrice(s.to_string()))?;

    let currency = match *currency_code {
        "GBP" => GBP,
        "USD" => USD,
        "EUR" => EUR,
        other => return Err(FixtureError::UnknownCurrency(other.to_string())),
    };

    Ok((minor_units, currency))
}

/// A catalog loaded from a fixture, with slugs resolved to keys.
#[derive(Debug)]
pub struct LoadedCatalog<'a> {
    /// The catalog snapshot.
    pub catalog: Catalog<'a>,

    /// Fixture slug to catalog key, for resolving bundle lines.
    pub keys: FxHashMap<String, CatalogItemKey>,
}

/// Load a catalog fixture from a YAML file.
///
/// # Errors
///
/// Returns a [`FixtureError`] if the file cannot be read or parsed.
pub fn load_catalog(path: impl AsRef<Path>) -> Result<LoadedCatalog<'static>, FixtureError> {
    let contents = fs::read_to_string(path)?;

    catalog_from_str(&contents)
}

/// Load a catalog fixture from a YAML string.
///
/// # Errors
///
/// Returns a [`FixtureError`] if the YAML or any price string is invalid.
pub fn catalog_from_str(yaml: &str) -> Result<LoadedCatalog<'static>, FixtureError> {
    let fixture: catalog::CatalogFixture = serde_norway::from_str(yaml)?;

    fixture.try_into_catalog()
}

/// Load a bundles fixture from a YAML file, resolving lines against a catalog.
///
/// # Errors
///
/// Returns a [`FixtureError`] if the file cannot be read or parsed, or a line
/// references a slug missing from `loaded`.
pub fn load_bundles(
    path: impl AsRef<Path>,
    loaded: &LoadedCatalog<'static>,
) -> Result<Vec<BundleDefinition<'static>>, FixtureError> {
    let contents = fs::read_to_string(path)?;

    bundles_from_str(&contents, loaded)
}

/// Load a bundles fixture from a YAML string, resolving lines against a catalog.
///
/// # Errors
///
/// Returns a [`FixtureError`] if the YAML is invalid or a line references a
/// slug missing from `loaded`.
pub fn bundles_from_str(
    yaml: &str,
    loaded: &LoadedCatalog<'static>,
) -> Result<Vec<BundleDefinition<'static>>, FixtureError> {
    let fixture: bundles::BundlesFixture = serde_norway::from_str(yaml)?;
    let mut keys = slotmap::SlotMap::<BundleKey, ()>::with_key();

    fixture
        .bundles
        .into_values()
        .map(|bundle| bundle.try_into_bundle(keys.insert(()), &loaded.keys))
        .collect()
}

/// Load a tier schedule fixture from a YAML file.
///
/// # Errors
///
/// Returns a [`FixtureError`] if the file cannot be read or parsed, or the
/// tiers do not form a valid schedule.
pub fn load_tiers(path: impl AsRef<Path>) -> Result<TierSchedule, FixtureError> {
    let contents = fs::read_to_string(path)?;

    tiers_from_str(&contents)
}

/// Load a tier schedule fixture from a YAML string.
///
/// # Errors
///
/// Returns a [`FixtureError`] if the YAML is invalid or the tiers do not form
/// a valid schedule.
pub fn tiers_from_str(yaml: &str) -> Result<TierSchedule, FixtureError> {
    let fixture: tiers::TiersFixture = serde_norway::from_str(yaml)?;

    fixture.try_into_schedule()
}
