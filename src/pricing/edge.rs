//! Edge and Kelly sizing
//!
//! Pure functions over a price and an externally estimated win
//! probability. The engine never estimates that probability itself.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::Odds;
use crate::error::{Result, SlipError};

/// Edge (percentage points) above which a bet is recommended
pub const BET_EDGE_THRESHOLD: f64 = 2.0;
/// Edge (percentage points) below which a bet is passed
pub const PASS_EDGE_THRESHOLD: f64 = -2.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Recommendation {
    Bet,
    Pass,
    Consider,
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Recommendation::Bet => write!(f, "BET"),
            Recommendation::Pass => write!(f, "PASS"),
            Recommendation::Consider => write!(f, "CONSIDER"),
        }
    }
}

/// `(true_p - implied_p) * 100`
pub fn edge_percentage(true_p: f64, implied_p: f64) -> f64 {
    (true_p - implied_p) * 100.0
}

pub fn recommendation(edge_pct: f64) -> Recommendation {
    if edge_pct > BET_EDGE_THRESHOLD {
        Recommendation::Bet
    } else if edge_pct < PASS_EDGE_THRESHOLD {
        Recommendation::Pass
    } else {
        Recommendation::Consider
    }
}

/// Full Kelly fraction for decimal odds, clamped at zero.
///
/// Returns 0.0 when `decimal_odds <= 1` (no payout structure) or when
/// either input is not finite. Fractional Kelly is the caller's policy.
pub fn kelly_fraction(true_p: f64, decimal_odds: f64) -> f64 {
    if !true_p.is_finite() || !decimal_odds.is_finite() || decimal_odds <= 1.0 {
        return 0.0;
    }
    let b = decimal_odds - 1.0;
    let fraction = (true_p * b - (1.0 - true_p)) / b;
    fraction.max(0.0)
}

/// Edge of one price against an estimated win probability
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EdgeAssessment {
    pub implied_probability: f64,
    pub true_probability: f64,
    pub edge_percentage: f64,
    pub recommendation: Recommendation,
    pub kelly_fraction: f64,
}

/// Produces `EdgeAssessment`s from a price and a probability
#[derive(Debug, Clone, Copy, Default)]
pub struct EdgeEngine;

impl EdgeEngine {
    pub fn new() -> Self {
        Self
    }

    /// Assess `odds` against `true_p`.
    ///
    /// Errors on the unknown-odds sentinel and on a probability outside
    /// `[0, 1]`; callers decide whether that degrades to "no assessment".
    pub fn assess(&self, odds: Odds, true_p: f64) -> Result<EdgeAssessment> {
        if !(0.0..=1.0).contains(&true_p) {
            return Err(SlipError::InvalidProbability(true_p));
        }
        let (Some(implied), Some(decimal)) = (odds.implied_probability(), odds.to_decimal()) else {
            return Err(SlipError::UnknownOdds);
        };

        let edge = edge_percentage(true_p, implied);
        Ok(EdgeAssessment {
            implied_probability: implied,
            true_probability: true_p,
            edge_percentage: edge,
            recommendation: recommendation(edge),
            kelly_fraction: kelly_fraction(true_p, decimal),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_recommendation_tiers() {
        assert_eq!(recommendation(5.0), Recommendation::Bet);
        assert_eq!(recommendation(2.0), Recommendation::Consider);
        assert_eq!(recommendation(0.0), Recommendation::Consider);
        assert_eq!(recommendation(-2.0), Recommendation::Consider);
        assert_eq!(recommendation(-2.01), Recommendation::Pass);
    }

    #[test]
    fn test_kelly_known_value() {
        // even money, 55% => 0.10
        assert!((kelly_fraction(0.55, 2.0) - 0.10).abs() < 1e-9);
        // +150 at 50% => (0.5*1.5 - 0.5) / 1.5
        assert!((kelly_fraction(0.5, 2.5) - (0.25 / 1.5)).abs() < 1e-9);
    }

    #[test]
    fn test_kelly_degenerate_odds() {
        assert_eq!(kelly_fraction(0.9, 1.0), 0.0);
        assert_eq!(kelly_fraction(0.9, 0.5), 0.0);
        assert_eq!(kelly_fraction(0.9, f64::NAN), 0.0);
        assert_eq!(kelly_fraction(0.1, 2.0), 0.0);
    }

    #[test]
    fn test_assess_plus_150() {
        let engine = EdgeEngine::new();
        let a = engine.assess(Odds::new(150).unwrap(), 0.45).unwrap();
        assert!((a.implied_probability - 0.40).abs() < 1e-9);
        assert!((a.edge_percentage - 5.0).abs() < 1e-9);
        assert_eq!(a.recommendation, Recommendation::Bet);
        assert!(a.kelly_fraction > 0.0);
    }

    #[test]
    fn test_assess_rejects_sentinel_and_bad_probability() {
        let engine = EdgeEngine::new();
        assert!(matches!(engine.assess(Odds::UNKNOWN, 0.5), Err(SlipError::UnknownOdds)));
        assert!(matches!(
            engine.assess(Odds::new(-110).unwrap(), 1.2),
            Err(SlipError::InvalidProbability(_))
        ));
        assert!(engine.assess(Odds::new(-110).unwrap(), f64::NAN).is_err());
    }

    proptest! {
        #[test]
        fn prop_zero_edge_at_equal_probability(p in 0.0f64..=1.0) {
            prop_assert_eq!(edge_percentage(p, p), 0.0);
        }

        #[test]
        fn prop_kelly_non_negative(p in 0.0f64..=1.0, d in 1.0001f64..200.0) {
            prop_assert!(kelly_fraction(p, d) >= 0.0);
        }

        #[test]
        fn prop_kelly_at_most_true_probability(p in 0.0f64..=1.0, d in 1.0001f64..200.0) {
            prop_assert!(kelly_fraction(p, d) <= p + 1e-12);
        }
    }
}
