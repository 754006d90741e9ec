//! Fractional-Kelly stake sizing
//!
//! The edge engine reports full Kelly; discounting and capping it is the
//! host's policy and lives here.

use rust_decimal::prelude::*;
use rust_decimal_macros::dec;

use super::edge::{EdgeAssessment, Recommendation};
use crate::config::StakingConfig;

#[derive(Debug, Clone, PartialEq)]
pub struct StakePolicy {
    pub bankroll: Decimal,
    /// Fraction of full Kelly actually staked (0.25 = quarter Kelly)
    pub kelly_multiplier: Decimal,
    /// Hard cap per bet as a fraction of bankroll
    pub max_stake_pct: Decimal,
    /// Minimum edge in percentage points before anything is staked
    pub min_edge_pct: f64,
}

impl Default for StakePolicy {
    fn default() -> Self {
        Self {
            bankroll: dec!(1000),
            kelly_multiplier: dec!(0.25),
            max_stake_pct: dec!(0.05),
            min_edge_pct: 0.0,
        }
    }
}

impl From<&StakingConfig> for StakePolicy {
    fn from(config: &StakingConfig) -> Self {
        Self {
            bankroll: config.bankroll,
            kelly_multiplier: config.kelly_multiplier,
            max_stake_pct: config.max_stake_pct,
            min_edge_pct: config.min_edge_pct,
        }
    }
}

impl StakePolicy {
    /// Stake for an assessment, in bankroll currency rounded down to cents.
    ///
    /// Zero unless the recommendation is `Bet` and the edge clears
    /// `min_edge_pct`.
    pub fn stake(&self, assessment: &EdgeAssessment) -> Decimal {
        if assessment.recommendation != Recommendation::Bet || assessment.edge_percentage < self.min_edge_pct {
            return Decimal::ZERO;
        }

        let kelly = Decimal::from_f64_retain(assessment.kelly_fraction).unwrap_or(Decimal::ZERO);
        let sized = self.bankroll * kelly * self.kelly_multiplier;
        let cap = self.bankroll * self.max_stake_pct;
        sized
            .min(cap)
            .max(Decimal::ZERO)
            .round_dp_with_strategy(2, RoundingStrategy::ToZero)
    }
}
