//! Referrals
//!
//! Referral records feed the tier evaluator: a member's cumulative count of
//! successful referrals decides their program tier. Statuses are plain flags
//! set by the surrounding system; there is no transition-guard logic.

use rusty_money::{Money, MoneyError, iso::Currency};
use serde::{Deserialize, Serialize};

/// Progress of a single referred customer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferralStatus {
    /// Invitation sent, nothing happened yet.
    Pending,

    /// The referee created an account.
    SignedUp,

    /// The referee made a qualifying purchase.
    Purchased,

    /// The referrer's reward has been paid out.
    Rewarded,
}

impl ReferralStatus {
    /// Return the `snake_case` name of the status.
    #[must_use]
    pub const fn to_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::SignedUp => "signed_up",
            Self::Purchased => "purchased",
            Self::Rewarded => "rewarded",
        }
    }

    /// Whether this referral counts toward tier progression.
    ///
    /// A referral is successful once the referee has purchased, whether or
    /// not the reward has been paid out yet.
    #[must_use]
    pub const fn is_successful(&self) -> bool {
        matches!(self, Self::Purchased | Self::Rewarded)
    }
}

/// One referred customer and the reward attached to them.
#[derive(Debug, Clone, PartialEq)]
pub struct Referral<'a> {
    referee: String,
    status: ReferralStatus,
    reward: Money<'a, Currency>,
}

impl<'a> Referral<'a> {
    /// Create a new referral record.
    pub fn new(
        referee: impl Into<String>,
        status: ReferralStatus,
        reward: Money<'a, Currency>,
    ) -> Self {
        Self {
            referee: referee.into(),
            status,
            reward,
        }
    }

    /// Return the referee's display name.
    #[must_use]
    pub fn referee(&self) -> &str {
        &self.referee
    }

    /// Return the referral status.
    #[must_use]
    pub const fn status(&self) -> ReferralStatus {
        self.status
    }

    /// Return the reward attached to this referral.
    pub fn reward(&self) -> &Money<'a, Currency> {
        &self.reward
    }
}

/// Count the referrals that have progressed to a successful state.
///
/// This is the cumulative count fed to
/// [`TierSchedule::evaluate`](crate::tiers::TierSchedule::evaluate).
#[must_use]
pub fn successful_referrals(referrals: &[Referral<'_>]) -> u64 {
    referrals
        .iter()
        .filter(|referral| referral.status().is_successful())
        .count() as u64
}

/// Sum the rewards already paid out, in the given currency.
///
/// # Errors
///
/// Returns a [`MoneyError`] if a rewarded referral's currency differs from
/// `currency`.
pub fn total_rewards<'a>(
    referrals: &[Referral<'a>],
    currency: &'static Currency,
) -> Result<Money<'a, Currency>, MoneyError> {
    referrals
        .iter()
        .filter(|referral| referral.status() == ReferralStatus::Rewarded)
        .try_fold(Money::from_minor(0, currency), |acc, referral| {
            acc.add(*referral.reward())
        })
}
