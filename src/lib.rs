//! Mercato
//!
//! Mercato is a pure computation engine for marketplace storefronts: promotional
//! bundle pricing, discount validation, and loyalty/referral tier evaluation.
//!
//! All operations take plain data structures and return plain data structures;
//! there is no I/O outside the [`fixtures`] module and no shared mutable state,
//! so every computation is safe to call repeatedly and cache by its inputs.

pub mod bundles;
pub mod catalog;
pub mod discounts;
pub mod fixtures;
pub mod prelude;
pub mod pricing;
pub mod recents;
pub mod referrals;
pub mod tiers;
