//! Tiers
//!
//! Loyalty and referral programs rank their members by cumulative count
//! (referrals, points, spend). A [`TierSchedule`] is the statically configured,
//! ascending list of tiers; [`TierSchedule::evaluate`] maps a count to the
//! member's current tier and progress toward the next one.

use decimal_percentage::Percentage;
use rust_decimal::{Decimal, prelude::FromPrimitive};
use thiserror::Error;

/// Errors related to tier schedules and evaluation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TierError {
    /// A schedule must define at least one tier.
    #[error("tier schedule is empty")]
    EmptySchedule,

    /// Tier thresholds must be strictly ascending.
    #[error("tier {0} threshold is not above the previous tier's")]
    UnorderedThresholds(String),

    /// Cumulative counts cannot be negative.
    #[error("cumulative count {0} is negative")]
    NegativeCount(i64),
}

/// A named rank in a loyalty/referral program.
#[derive(Debug, Clone, PartialEq)]
pub struct Tier {
    name: String,
    threshold: u64,
    reward_rate: Percentage,
    perks: Vec<String>,
}

impl Tier {
    /// Create a new tier.
    pub fn new(
        name: impl Into<String>,
        threshold: u64,
        reward_rate: Percentage,
        perks: impl Into<Vec<String>>,
    ) -> Self {
        Self {
            name: name.into(),
            threshold,
            reward_rate,
            perks: perks.into(),
        }
    }

    /// Return the tier name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Return the minimum cumulative count that unlocks this tier.
    #[must_use]
    pub const fn threshold(&self) -> u64 {
        self.threshold
    }

    /// Return the reward rate granted at this tier.
    #[must_use]
    pub const fn reward_rate(&self) -> Percentage {
        self.reward_rate
    }

    /// Return the perks unlocked at this tier, in display order.
    #[must_use]
    pub fn perks(&self) -> &[String] {
        &self.perks
    }
}

/// The evaluated standing of one member against a schedule.
#[derive(Debug, Clone, PartialEq)]
pub struct TierStatus<'a> {
    current: &'a Tier,
    next: Option<&'a Tier>,
    units_to_next: u64,
    count: u64,
}

impl<'a> TierStatus<'a> {
    /// The tier the member currently holds.
    #[must_use]
    pub const fn current(&self) -> &'a Tier {
        self.current
    }

    /// The tier immediately above the current one, if any.
    #[must_use]
    pub const fn next(&self) -> Option<&'a Tier> {
        self.next
    }

    /// How many more units unlock the next tier. Zero at the top tier.
    #[must_use]
    pub const fn units_to_next(&self) -> u64 {
        self.units_to_next
    }

    /// The cumulative count this status was evaluated for.
    #[must_use]
    pub const fn count(&self) -> u64 {
        self.count
    }

    /// Progress through the current tier toward the next threshold.
    ///
    /// Measured from the current tier's threshold, as the loyalty progress
    /// bars display it. Full (`1.0`) at the top tier.
    pub fn progress(&self) -> Percentage {
        let Some(next) = self.next else {
            return Percentage::from(1.0);
        };

        let span = next.threshold().saturating_sub(self.current.threshold());
        if span == 0 {
            return Percentage::from(1.0);
        }

        let into = self.count.saturating_sub(self.current.threshold());
        let into_dec = Decimal::from_u64(into).unwrap_or(Decimal::ZERO);
        let span_dec = Decimal::from_u64(span).unwrap_or(Decimal::ONE);

        Percentage::from(into_dec / span_dec)
    }
}

/// A validated, ascending list of tiers.
///
/// The base tier's threshold is the schedule's floor; a count below it still
/// resolves to the base tier, so evaluation is total for non-negative counts.
#[derive(Debug, Clone, PartialEq)]
pub struct TierSchedule {
    tiers: Vec<Tier>,
}

impl TierSchedule {
    /// Create a schedule from tiers ordered ascending by threshold.
    ///
    /// # Errors
    ///
    /// - [`TierError::EmptySchedule`]: no tiers were provided.
    /// - [`TierError::UnorderedThresholds`]: a tier's threshold does not
    ///   strictly exceed its predecessor's.
    pub fn new(tiers: impl Into<Vec<Tier>>) -> Result<Self, TierError> {
        let tiers = tiers.into();

        if tiers.is_empty() {
            return Err(TierError::EmptySchedule);
        }

        for pair in tiers.windows(2) {
            if let [prev, next] = pair
                && next.threshold() <= prev.threshold()
            {
                return Err(TierError::UnorderedThresholds(next.name().to_string()));
            }
        }

        Ok(Self { tiers })
    }

    /// Return the tiers, ascending by threshold.
    #[must_use]
    pub fn tiers(&self) -> &[Tier] {
        &self.tiers
    }

    /// Evaluate a member's cumulative count against the schedule.
    ///
    /// Scans from the highest threshold down and returns the first tier the
    /// count meets or exceeds, falling back to the base tier.
    ///
    /// # Errors
    ///
    /// Returns [`TierError::NegativeCount`] if `count` is negative.
    pub fn evaluate(&self, count: i64) -> Result<TierStatus<'_>, TierError> {
        let count = u64::try_from(count).map_err(|_err| TierError::NegativeCount(count))?;

        let position = self
            .tiers
            .iter()
            .rposition(|tier| count >= tier.threshold())
            .unwrap_or(0);

        // `new` guarantees at least one tier, so both lookups stay in range.
        let current = self.tiers.get(position).ok_or(TierError::EmptySchedule)?;
        let next = self.tiers.get(position + 1);

        let units_to_next = next.map_or(0, |tier| tier.threshold().saturating_sub(count));

        Ok(TierStatus {
            current,
            next,
            units_to_next,
            count,
        })
    }
}
