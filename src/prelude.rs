//! Mercato prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    bundles::{BundleDefinition, BundleError, BundleKey, BundleLine, BundleStatus},
    catalog::{Catalog, CatalogItem, CatalogItemKey},
    discounts::{BundleDiscount, DiscountError, percent_of_minor},
    fixtures::{FixtureError, LoadedCatalog},
    pricing::{PricingError, PricingResult, price_bundle},
    recents::{InMemoryStore, RecentSearches, SearchStore},
    referrals::{Referral, ReferralStatus, successful_referrals, total_rewards},
    tiers::{Tier, TierError, TierSchedule, TierStatus},
};
