//! American odds
//!
//! Sportsbook screenshots are dense with signed numbers that are not prices:
//! jersey numbers, run lines, scores, spreads. A token only counts as odds
//! when it carries an explicit sign, is 3-5 characters long and its
//! magnitude is a real price (`100..=9999`).

use serde::{Deserialize, Serialize};
use std::fmt;

/// Smallest magnitude a sportsbook quotes.
pub const MIN_ODDS_MAGNITUDE: i32 = 100;
/// Largest magnitude accepted by the `Odds` invariant.
pub const MAX_ODDS_MAGNITUDE: i32 = 10_000;
/// Largest magnitude a 5-character token (`+9999`) can carry.
pub const MAX_TOKEN_MAGNITUDE: i32 = 9_999;

/// American odds price, or the unknown-odds sentinel.
///
/// Invariant: a known value satisfies `-10000 <= v <= -100` or
/// `100 <= v <= 10000`. The sentinel is stored as `0`, which no real price
/// can take.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Option<i32>", into = "Option<i32>")]
pub struct Odds(i32);

impl Odds {
    /// Sentinel for a price that was present on the slip but unreadable.
    pub const UNKNOWN: Odds = Odds(0);

    /// Build a known price, rejecting anything outside the invariant.
    pub fn new(american: i32) -> Option<Self> {
        let magnitude = american.checked_abs()?;
        if (MIN_ODDS_MAGNITUDE..=MAX_ODDS_MAGNITUDE).contains(&magnitude) {
            Some(Odds(american))
        } else {
            None
        }
    }

    /// Parse a raw token, falling back to the sentinel when it is not a price.
    pub fn from_token(token: &str) -> Self {
        normalize(token).unwrap_or(Odds::UNKNOWN)
    }

    pub fn is_known(&self) -> bool {
        self.0 != 0
    }

    /// Signed American value, `None` for the sentinel.
    pub fn american(&self) -> Option<i32> {
        self.is_known().then_some(self.0)
    }

    pub fn implied_probability(&self) -> Option<f64> {
        self.american().map(implied_probability)
    }

    /// Decimal (European) odds: total return per unit staked.
    pub fn to_decimal(&self) -> Option<f64> {
        self.american().map(american_to_decimal)
    }
}

impl fmt::Display for Odds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.american() {
            Some(v) if v > 0 => write!(f, "+{v}"),
            Some(v) => write!(f, "{v}"),
            None => write!(f, "N/A"),
        }
    }
}

impl TryFrom<Option<i32>> for Odds {
    type Error = String;

    fn try_from(value: Option<i32>) -> Result<Self, Self::Error> {
        match value {
            None => Ok(Odds::UNKNOWN),
            Some(v) => Odds::new(v).ok_or_else(|| format!("{v} is not a valid American price")),
        }
    }
}

impl From<Odds> for Option<i32> {
    fn from(odds: Odds) -> Self {
        odds.american()
    }
}

/// Check whether a raw token is a plausible American odds price.
///
/// The token must start with `+` or `-`, be 3-5 characters long, carry only
/// digits after the sign and have a magnitude within `[100, 9999]`.
pub fn validate(token: &str) -> bool {
    parse_magnitude(token).is_some()
}

/// Parse a validated token into an `Odds` value.
pub fn normalize(token: &str) -> Option<Odds> {
    let (negative, magnitude) = parse_magnitude(token)?;
    let value = if negative { -magnitude } else { magnitude };
    Odds::new(value)
}

fn parse_magnitude(token: &str) -> Option<(bool, i32)> {
    let token = token.trim();
    if !(3..=5).contains(&token.len()) {
        return None;
    }

    let (negative, digits) = match token.as_bytes().first()? {
        b'+' => (false, &token[1..]),
        b'-' => (true, &token[1..]),
        _ => return None,
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let magnitude: i32 = digits.parse().ok()?;
    if (MIN_ODDS_MAGNITUDE..=MAX_TOKEN_MAGNITUDE).contains(&magnitude) {
        Some((negative, magnitude))
    } else {
        None
    }
}

/// Break-even probability embedded in an American price, ignoring vig.
///
/// `+A -> 100 / (A + 100)`, `-A -> A / (A + 100)`.
pub fn implied_probability(american: i32) -> f64 {
    let odds = american as f64;
    if odds > 0.0 {
        100.0 / (odds + 100.0)
    } else {
        let magnitude = odds.abs();
        magnitude / (magnitude + 100.0)
    }
}

/// Convert American odds to decimal odds.
pub fn american_to_decimal(american: i32) -> f64 {
    let odds = american as f64;
    if odds > 0.0 {
        1.0 + odds / 100.0
    } else {
        1.0 + 100.0 / odds.abs()
    }
}

/// Convert decimal odds back to an American price.
///
/// Returns `None` for `decimal <= 1` or when the rounded price falls
/// outside the `Odds` invariant.
pub fn decimal_to_american(decimal: f64) -> Option<Odds> {
    if !decimal.is_finite() || decimal <= 1.0 {
        return None;
    }
    let american = if decimal >= 2.0 {
        (decimal - 1.0) * 100.0
    } else {
        -100.0 / (decimal - 1.0)
    };
    if american.abs() > MAX_ODDS_MAGNITUDE as f64 {
        return None;
    }
    Odds::new(american.round() as i32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_accepts_real_prices() {
        for token in ["+150", "-120", "+100", "-100", "+9999", "-1100", " +450 "] {
            assert!(validate(token), "{token} should be valid");
        }
    }

    #[test]
    fn test_validate_rejects_non_prices() {
        // jersey numbers, scores, spreads, unsigned numbers
        for token in ["7", "+7", "-12", "+99", "150", "-1.5", "+15a", "+", "", "+10000", "--150"] {
            assert!(!validate(token), "{token} should be rejected");
        }
    }

    #[test]
    fn test_normalize_signs() {
        assert_eq!(normalize("+150").and_then(|o| o.american()), Some(150));
        assert_eq!(normalize("-120").and_then(|o| o.american()), Some(-120));
        assert_eq!(normalize("7"), None);
    }

    #[test]
    fn test_from_token_falls_back_to_sentinel() {
        let odds = Odds::from_token("7");
        assert_eq!(odds, Odds::UNKNOWN);
        assert!(!odds.is_known());
        assert_eq!(odds.implied_probability(), None);
        assert_eq!(odds.to_string(), "N/A");
    }

    #[test]
    fn test_new_enforces_invariant() {
        assert!(Odds::new(99).is_none());
        assert!(Odds::new(-99).is_none());
        assert!(Odds::new(0).is_none());
        assert!(Odds::new(10_001).is_none());
        assert!(Odds::new(i32::MIN).is_none());
        assert!(Odds::new(10_000).is_some());
        assert!(Odds::new(-10_000).is_some());
    }

    #[test]
    fn test_implied_probability_values() {
        assert!((implied_probability(150) - 0.40).abs() < 1e-9);
        assert!((implied_probability(-120) - 120.0 / 220.0).abs() < 1e-9);
        assert!((implied_probability(100) - 0.5).abs() < 1e-9);
        assert!((implied_probability(-100) - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_decimal_conversion() {
        assert!((american_to_decimal(150) - 2.5).abs() < 1e-9);
        assert!((american_to_decimal(-200) - 1.5).abs() < 1e-9);
        assert_eq!(decimal_to_american(2.5).and_then(|o| o.american()), Some(150));
        assert_eq!(decimal_to_american(1.5).and_then(|o| o.american()), Some(-200));
        assert_eq!(decimal_to_american(1.0), None);
        assert_eq!(decimal_to_american(f64::NAN), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(Odds::new(150).map(|o| o.to_string()), Some("+150".to_string()));
        assert_eq!(Odds::new(-120).map(|o| o.to_string()), Some("-120".to_string()));
    }

    #[test]
    fn test_serde_sentinel_is_null() {
        let json = serde_json::to_string(&Odds::UNKNOWN).unwrap();
        assert_eq!(json, "null");
        let back: Odds = serde_json::from_str("-110").unwrap();
        assert_eq!(back.american(), Some(-110));
        assert!(serde_json::from_str::<Odds>("7").is_err());
    }
}
