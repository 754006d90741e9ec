//! Leg extraction for multi-leg slips
//!
//! Three strategies are tried in order and the first one that yields any
//! leg wins:
//! 1. `Player N+ stat` props, each paired with parenthesised odds or a
//!    matchup later in the slip
//! 2. `Team @ Team - Description (odds)` legs, or else matchups that each
//!    carry their own trailing price, read as moneyline legs
//! 3. Line heuristic: split each line on `" - "` and pull a trailing odds
//!    token from the remainder
//!
//! Legs are then deduplicated on their normalized `(subject, description)`
//! so an OCR double-read of the same line counts once.

use std::collections::HashMap;
use std::fmt;
use tracing::debug;

use super::normalizer::{normalize, normalize_lines};
use super::patterns::{
    find_matchups, odds_if_valid, price_after, strip_leading_noise, RE_MATCHUP_LEG, RE_MULTI_LEG_KEYWORD, RE_PLUS_PROP,
    RE_TRAILING_ODDS,
};
use super::teams::{Anchor, TeamResolver};
use crate::domain::{odds, Leg};

/// Which extraction strategy produced the legs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegStrategy {
    PlayerProps,
    Matchups,
    Lines,
}

impl fmt::Display for LegStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LegStrategy::PlayerProps => write!(f, "player_props"),
            LegStrategy::Matchups => write!(f, "matchups"),
            LegStrategy::Lines => write!(f, "lines"),
        }
    }
}

/// Legs pulled from a slip, with the strategy that found them
#[derive(Debug, Clone, PartialEq)]
pub struct Extraction {
    pub legs: Vec<Leg>,
    pub strategy: Option<LegStrategy>,
}

/// Splits aggregated multi-leg slip text into individual legs
#[derive(Debug, Clone, Copy)]
pub struct LegExtractor<'a> {
    resolver: &'a TeamResolver,
}

impl<'a> LegExtractor<'a> {
    pub fn new(resolver: &'a TeamResolver) -> Self {
        Self { resolver }
    }

    /// Extract legs from raw slip text.
    pub fn extract(&self, raw: &str) -> Vec<Leg> {
        self.extract_detailed(&normalize(raw), &normalize_lines(raw)).legs
    }

    /// Extract legs from already-normalized text.
    ///
    /// `flat` is the single-line form, `lines` the per-line form of the
    /// same slip.
    pub fn extract_detailed(&self, flat: &str, lines: &[String]) -> Extraction {
        let order = [LegStrategy::PlayerProps, LegStrategy::Matchups, LegStrategy::Lines];

        for strategy in order {
            let legs = dedup_legs(match strategy {
                LegStrategy::PlayerProps => self.player_props(flat),
                LegStrategy::Matchups => self.matchup_legs(flat),
                LegStrategy::Lines => line_legs(lines),
            });
            if !legs.is_empty() {
                debug!(%strategy, count = legs.len(), "legs extracted");
                return Extraction {
                    legs,
                    strategy: Some(strategy),
                };
            }
        }

        debug!("no legs extracted");
        Extraction {
            legs: Vec::new(),
            strategy: None,
        }
    }

    fn player_props(&self, flat: &str) -> Vec<Leg> {
        let matchups = find_matchups(flat, self.resolver);
        RE_PLUS_PROP
            .captures_iter(flat)
            .filter_map(|caps| {
                let whole = caps.get(0)?;
                let odds = odds_if_valid(caps.name("odds"));
                let has_trailing_matchup = matchups.iter().any(|m| m.end > whole.end());
                if odds.is_none() && !has_trailing_matchup {
                    return None;
                }

                let player = strip_leading_noise(caps.name("player")?.as_str());
                if self.resolver.is_known(&player) {
                    return None;
                }
                let count = caps.name("count")?.as_str();
                let description = match caps.name("stat") {
                    Some(stat) => format!("{count}+ {}", stat.as_str()),
                    None => format!("{count}+"),
                };
                Some(Leg::new(player, description, odds))
            })
            .collect()
    }

    fn matchup_legs(&self, flat: &str) -> Vec<Leg> {
        let described = self.described_matchups(flat);
        if described.is_empty() {
            self.priced_matchups(flat)
        } else {
            described
        }
    }

    fn described_matchups(&self, flat: &str) -> Vec<Leg> {
        RE_MATCHUP_LEG
            .captures_iter(flat)
            .filter_map(|caps| {
                let away = self.resolver.resolve_phrase(caps.name("away")?.as_str(), Anchor::Trailing);
                let home = self.resolver.resolve_phrase(caps.name("home")?.as_str(), Anchor::Leading);
                let description = caps.name("desc")?.as_str().trim();
                Some(Leg::new(
                    format!("{away} @ {home}"),
                    description,
                    odds_if_valid(caps.name("odds")),
                ))
            })
            .collect()
    }

    /// `Team at Team +150 Team at Team -120`: all or nothing, so a lone
    /// trailing price is never mistaken for one leg's.
    fn priced_matchups(&self, flat: &str) -> Vec<Leg> {
        let mut legs = Vec::new();
        for matchup in find_matchups(flat, self.resolver) {
            let Some(price) = price_after(flat, matchup.end) else {
                return Vec::new();
            };
            legs.push(Leg::new(
                format!("{} @ {}", matchup.away, matchup.home),
                "Moneyline",
                Some(price),
            ));
        }
        legs
    }
}

/// Line heuristic: `subject - description [odds]`.
fn line_legs(lines: &[String]) -> Vec<Leg> {
    lines.iter().filter_map(|line| line_leg(line)).collect()
}

fn line_leg(line: &str) -> Option<Leg> {
    let (subject, remainder) = line.split_once(" - ")?;
    let subject = subject.trim();
    // header lines such as "3-Leg Parlay - +600" carry the slip price, not a leg
    if subject.is_empty() || RE_MULTI_LEG_KEYWORD.is_match(subject) {
        return None;
    }

    let remainder = remainder.trim();
    let (description, odds) = match RE_TRAILING_ODDS.captures(remainder) {
        Some(caps) => match caps.name("odds").and_then(|m| odds::normalize(m.as_str())) {
            Some(price) => (caps.name("desc").map_or("", |m| m.as_str()).trim(), Some(price)),
            // spreads and run lines ("-1.5", "+7") stay in the description
            None => (remainder, None),
        },
        None => (remainder, None),
    };
    Some(Leg::new(subject, description, odds))
}

/// Collapse duplicate legs, keeping the first read and filling in a price a
/// later read recovered.
pub fn dedup_legs(legs: Vec<Leg>) -> Vec<Leg> {
    let mut index: HashMap<(String, String), usize> = HashMap::new();
    let mut unique: Vec<Leg> = Vec::with_capacity(legs.len());
    for leg in legs {
        let key = leg.dedup_key();
        if let Some(&i) = index.get(&key) {
            if unique[i].odds.is_none() {
                unique[i].odds = leg.odds;
            }
            continue;
        }
        index.insert(key, unique.len());
        unique.push(leg);
    }
    unique
}

/// Convenience wrapper over `LegExtractor::extract`.
pub fn extract_legs(text: &str, resolver: &TeamResolver) -> Vec<Leg> {
    LegExtractor::new(resolver).extract(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Odds;

    fn extract(text: &str) -> Extraction {
        let resolver = TeamResolver::seeded();
        LegExtractor::new(&resolver).extract_detailed(&normalize(text), &normalize_lines(text))
    }

    #[test]
    fn test_player_props_paired_with_matchup() {
        let out = extract(
            "Ketel Marte 3+ Total Bases\nShohei Ohtani 2+ Hits\nArizona Diamondbacks at Colorado Rockies +450",
        );
        assert_eq!(out.strategy, Some(LegStrategy::PlayerProps));
        assert_eq!(out.legs.len(), 2);
        assert_eq!(out.legs[0].subject, "Ketel Marte");
        assert_eq!(out.legs[0].description, "3+ Total Bases");
        assert_eq!(out.legs[1].subject, "Shohei Ohtani");
        assert_eq!(out.legs[1].description, "2+ Hits");
        assert!(out.legs.iter().all(|l| l.odds.is_none()));
    }

    #[test]
    fn test_player_props_with_parenthesized_odds() {
        let out = extract("Aaron Judge 2+ Hits (+180) Juan Soto 1+ Home Runs (+320)");
        assert_eq!(out.strategy, Some(LegStrategy::PlayerProps));
        assert_eq!(out.legs.len(), 2);
        assert_eq!(out.legs[0].odds, Odds::new(180));
        assert_eq!(out.legs[1].subject, "Juan Soto");
        assert_eq!(out.legs[1].odds, Odds::new(320));
    }

    #[test]
    fn test_unpaired_props_are_skipped() {
        // no odds and no matchup: not a structured prop leg
        let out = extract("Aaron Judge 2+ Hits");
        assert!(out.legs.is_empty());
        assert_eq!(out.strategy, None);
    }

    #[test]
    fn test_matchup_legs() {
        let out = extract("NYY @ BOS - Yankees ML (-150) NYM @ ATL - Over 8.5 (-110)");
        assert_eq!(out.strategy, Some(LegStrategy::Matchups));
        assert_eq!(out.legs.len(), 2);
        assert_eq!(out.legs[0].subject, "New York Yankees @ Boston Red Sox");
        assert_eq!(out.legs[0].description, "Yankees ML");
        assert_eq!(out.legs[0].odds, Odds::new(-150));
        assert_eq!(out.legs[1].subject, "New York Mets @ Atlanta Braves");
        assert_eq!(out.legs[1].description, "Over 8.5");
    }

    #[test]
    fn test_priced_matchups_become_moneyline_legs() {
        let out = extract("Yankees at Red Sox +150 Mets at Braves -120");
        assert_eq!(out.strategy, Some(LegStrategy::Matchups));
        assert_eq!(
            out.legs,
            vec![
                Leg::new("New York Yankees @ Boston Red Sox", "Moneyline", Odds::new(150)),
                Leg::new("New York Mets @ Atlanta Braves", "Moneyline", Odds::new(-120)),
            ]
        );
    }

    #[test]
    fn test_one_unpriced_matchup_yields_no_priced_legs() {
        let out = extract("Lakers vs Celtics\nHeat vs Knicks +260");
        assert!(out.legs.is_empty());
    }

    #[test]
    fn test_line_heuristic() {
        let out = extract("3-Leg Parlay - +600\nYankees - Moneyline -150\nDodgers - Run Line -1.5\nMets - ML");
        assert_eq!(out.strategy, Some(LegStrategy::Lines));
        assert_eq!(out.legs.len(), 3);
        assert_eq!(out.legs[0], Leg::new("Yankees", "Moneyline", Odds::new(-150)));
        assert_eq!(out.legs[1], Leg::new("Dodgers", "Run Line -1.5", None));
        assert_eq!(out.legs[2], Leg::new("Mets", "ML", None));
    }

    #[test]
    fn test_double_reads_collapse() {
        let out = extract("Yankees - Moneyline\nYankees  -  Moneyline -150\nyankees - moneyline -150");
        assert_eq!(out.legs.len(), 1);
        assert_eq!(out.legs[0].odds, Odds::new(-150));
    }

    #[test]
    fn test_nothing_to_extract() {
        let resolver = TeamResolver::seeded();
        assert!(extract_legs("random screenshot text", &resolver).is_empty());
        assert!(extract_legs("", &resolver).is_empty());
    }
}
