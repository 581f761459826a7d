//! Tier Schedule Fixtures

use decimal_percentage::Percentage;
use serde::Deserialize;

use crate::{
    fixtures::FixtureError,
    tiers::{Tier, TierSchedule},
};

/// Wrapper for a tier schedule in YAML.
#[derive(Debug, Deserialize)]
pub struct TiersFixture {
    /// Tiers, ascending by threshold.
    pub tiers: Vec<TierFixture>,
}

/// One tier from YAML.
#[derive(Debug, Deserialize)]
pub struct TierFixture {
    /// Tier name.
    pub name: String,

    /// Minimum cumulative count that unlocks the tier.
    pub threshold: u64,

    /// Reward rate as a fraction (e.g., 0.1 for a 10% bonus).
    #[serde(default)]
    pub reward_rate: f64,

    /// Perks unlocked at the tier.
    #[serde(default)]
    pub perks: Vec<String>,
}

impl TiersFixture {
    /// Convert to a validated [`TierSchedule`].
    ///
    /// # Errors
    ///
    /// Returns an error if the tiers do not form a valid schedule (empty, or
    /// thresholds out of order).
    pub fn try_into_schedule(self) -> Result<TierSchedule, FixtureError> {
        let tiers: Vec<Tier> = self
            .tiers
            .into_iter()
            .map(|tier| {
                Tier::new(
                    tier.name,
                    tier.threshold,
                    Percentage::from(tier.reward_rate),
                    tier.perks,
                )
            })
            .collect();

        Ok(TierSchedule::new(tiers)?)
    }
}
