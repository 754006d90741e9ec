//! Typed representation of a parsed betting slip

use serde::{Deserialize, Serialize};
use std::fmt;

use super::odds::{decimal_to_american, Odds};

/// Canonical team name produced by the team resolver
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TeamName(String);

impl TeamName {
    pub fn new(name: impl Into<String>) -> Self {
        TeamName(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TeamName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl PartialEq<&str> for TeamName {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Side of an over/under line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Over,
    Under,
}

impl Direction {
    /// Case-insensitive parse of `over`/`under` (and the `o`/`u` shorthand).
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "over" | "o" => Some(Direction::Over),
            "under" | "u" => Some(Direction::Under),
            _ => None,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Over => write!(f, "Over"),
            Direction::Under => write!(f, "Under"),
        }
    }
}

/// One component wager of a parlay or teaser
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Leg {
    pub subject: String,
    pub description: String,
    /// `None` when the slip shows no price for this leg
    pub odds: Option<Odds>,
}

impl Leg {
    pub fn new(subject: impl Into<String>, description: impl Into<String>, odds: Option<Odds>) -> Self {
        Self {
            subject: subject.into(),
            description: description.into(),
            odds,
        }
    }

    /// Key used to collapse OCR double-reads of the same leg.
    pub fn dedup_key(&self) -> (String, String) {
        (fold(&self.subject), fold(&self.description))
    }
}

fn fold(s: &str) -> String {
    s.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// A classified wager. `Unclassified` is a placeholder, not an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Bet {
    Moneyline {
        away: TeamName,
        home: TeamName,
        odds: Odds,
    },
    PlayerProp {
        player: String,
        direction: Direction,
        threshold: f64,
        stat: String,
        odds: Odds,
    },
    Total {
        direction: Direction,
        threshold: f64,
        odds: Odds,
    },
    Parlay {
        legs: Vec<Leg>,
        combined_odds: Option<Odds>,
    },
    Teaser {
        legs: Vec<Leg>,
        points_adjustment: Option<f64>,
        odds: Option<Odds>,
    },
    Unclassified {
        raw_text: String,
    },
}

impl Bet {
    pub fn kind(&self) -> &'static str {
        match self {
            Bet::Moneyline { .. } => "moneyline",
            Bet::PlayerProp { .. } => "player_prop",
            Bet::Total { .. } => "total",
            Bet::Parlay { .. } => "parlay",
            Bet::Teaser { .. } => "teaser",
            Bet::Unclassified { .. } => "unclassified",
        }
    }

    pub fn is_classified(&self) -> bool {
        !matches!(self, Bet::Unclassified { .. })
    }

    pub fn legs(&self) -> &[Leg] {
        match self {
            Bet::Parlay { legs, .. } | Bet::Teaser { legs, .. } => legs,
            _ => &[],
        }
    }

    /// The single price used for edge and stake computations.
    ///
    /// A parlay's `combined_odds` is authoritative over its legs; without it
    /// the price is the product of the leg prices, when every leg has one.
    pub fn pricing_odds(&self) -> Option<Odds> {
        match self {
            Bet::Moneyline { odds, .. } | Bet::PlayerProp { odds, .. } | Bet::Total { odds, .. } => {
                Some(*odds)
            }
            Bet::Parlay {
                legs,
                combined_odds,
            } => combined_odds.or_else(|| parlay_decimal_odds(legs).and_then(decimal_to_american)),
            Bet::Teaser { odds, .. } => *odds,
            Bet::Unclassified { .. } => None,
        }
    }
}

/// Decimal odds of a parlay priced from its legs.
///
/// `None` when the list is empty or any leg lacks a known price.
pub fn parlay_decimal_odds(legs: &[Leg]) -> Option<f64> {
    if legs.is_empty() {
        return None;
    }
    legs.iter()
        .map(|leg| leg.odds.and_then(|o| o.to_decimal()))
        .try_fold(1.0, |acc, d| d.map(|d| acc * d))
}

impl fmt::Display for Bet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Bet::Moneyline { away, home, odds } => write!(f, "{away} at {home} ML {odds}"),
            Bet::PlayerProp {
                player,
                direction,
                threshold,
                stat,
                odds,
            } => write!(f, "{player} {direction} {threshold} {stat} {odds}"),
            Bet::Total {
                direction,
                threshold,
                odds,
            } => write!(f, "{direction} {threshold} {odds}"),
            Bet::Parlay {
                legs,
                combined_odds,
            } => {
                write!(f, "{}-leg parlay", legs.len())?;
                if let Some(odds) = combined_odds {
                    write!(f, " {odds}")?;
                }
                Ok(())
            }
            Bet::Teaser {
                legs,
                points_adjustment,
                odds,
            } => {
                write!(f, "{}-leg teaser", legs.len())?;
                if let Some(points) = points_adjustment {
                    write!(f, " ({points} pts)")?;
                }
                if let Some(odds) = odds {
                    write!(f, " {odds}")?;
                }
                Ok(())
            }
            Bet::Unclassified { .. } => write!(f, "unclassified"),
        }
    }
}
