//! Bet classification
//!
//! An ordered cascade of matchers, each recognising one slip shape. The
//! first matcher that returns a bet ends the cascade; `Unclassified` is the
//! fallback when none does. Order matters:
//!
//! 1. multi-leg: runs first so a single-leg matcher cannot truncate a
//!    parlay to its first leg
//! 2. player prop: runs before moneyline because the team-pair pattern also
//!    matches inside many prop lines
//! 3. moneyline
//! 4. total

use std::collections::HashSet;
use std::sync::LazyLock;
use tracing::{debug, warn};

use super::legs::LegExtractor;
use super::normalizer::{normalize, normalize_lines};
use super::patterns::{
    distinct_matchups, is_chrome_word, is_stat_word, odds_or_unknown, parse_threshold, preceding_words,
    strip_leading_noise, RE_LABELLED_ODDS, RE_MONEYLINE, RE_MULTI_LEG_KEYWORD, RE_PLAYER_PROP, RE_PLUS_PROP,
    RE_TEASER, RE_TEASER_POINTS, RE_TOTAL,
};
use super::teams::{title_case, Anchor, TeamResolver};
use crate::domain::{odds, Bet, Direction, Leg, Odds};

/// Slip text in the forms matchers work on
#[derive(Debug, Clone)]
pub struct SlipText<'a> {
    /// Text exactly as received from OCR
    pub raw: &'a str,
    /// Single-line normalized text
    pub flat: String,
    /// Per-line normalized text, empty lines dropped
    pub lines: Vec<String>,
}

impl<'a> SlipText<'a> {
    pub fn new(raw: &'a str) -> Self {
        Self {
            raw,
            flat: normalize(raw),
            lines: normalize_lines(raw),
        }
    }

    pub fn unclassified(&self) -> Bet {
        Bet::Unclassified {
            raw_text: self.raw.to_string(),
        }
    }
}

/// One slip shape the classifier can recognise
pub trait BetMatcher: Send + Sync {
    /// Matcher identifier, used for logging and precedence checks
    fn name(&self) -> &'static str;

    /// Try to recognise the slip. `None` passes to the next matcher;
    /// `Some` ends the cascade (including `Some(Bet::Unclassified)`).
    fn attempt(&self, slip: &SlipText<'_>, resolver: &TeamResolver) -> Option<Bet>;
}

/// Parlays and teasers
///
/// Fires on two or more distinct matchups, two or more `Player N+` props,
/// or an explicit multi-leg keyword.
#[derive(Debug, Default, Clone, Copy)]
pub struct MultiLegMatcher;

impl MultiLegMatcher {
    fn is_multi_leg(flat: &str, resolver: &TeamResolver) -> bool {
        RE_MULTI_LEG_KEYWORD.is_match(flat)
            || RE_PLUS_PROP.find_iter(flat).take(2).count() >= 2
            || distinct_matchups(flat, resolver) >= 2
    }
}

impl BetMatcher for MultiLegMatcher {
    fn name(&self) -> &'static str {
        "multi_leg"
    }

    fn attempt(&self, slip: &SlipText<'_>, resolver: &TeamResolver) -> Option<Bet> {
        if !Self::is_multi_leg(&slip.flat, resolver) {
            return None;
        }

        let extraction = LegExtractor::new(resolver).extract_detailed(&slip.flat, &slip.lines);
        if extraction.legs.is_empty() {
            // an empty parlay is never a valid representation
            warn!("multi-leg slip detected but no legs extracted, leaving unclassified");
            return Some(slip.unclassified());
        }

        let price = slip_price(&slip.flat, &extraction.legs);
        if RE_TEASER.is_match(&slip.flat) {
            Some(Bet::Teaser {
                points_adjustment: teaser_points(&slip.flat),
                legs: extraction.legs,
                odds: price,
            })
        } else {
            Some(Bet::Parlay {
                legs: extraction.legs,
                combined_odds: price,
            })
        }
    }
}

/// `<Name> Over|Under <number> <stat> <odds>`
///
/// Capitalised names are tried first. Lower-case OCR output
/// ("aaron judge over 1.5 hits") falls back to the plain words in front of
/// the direction.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlayerPropMatcher;

impl PlayerPropMatcher {
    fn capitalised(flat: &str, resolver: &TeamResolver) -> Option<Bet> {
        RE_PLAYER_PROP.captures_iter(flat).find_map(|caps| {
            let player = strip_team_prefix(&strip_leading_noise(caps.name("player")?.as_str()), resolver)?;
            Some(Bet::PlayerProp {
                player,
                direction: Direction::parse(caps.name("dir")?.as_str())?,
                threshold: parse_threshold(caps.name("threshold")?.as_str())?,
                stat: caps.name("stat")?.as_str().trim().to_string(),
                odds: odds_or_unknown(caps.name("odds")),
            })
        })
    }

    fn case_folded(flat: &str, resolver: &TeamResolver) -> Option<Bet> {
        RE_TOTAL.captures_iter(flat).find_map(|caps| {
            let dir = caps.name("dir")?;
            let player = player_context(flat, dir.start(), resolver)?;
            Some(Bet::PlayerProp {
                player: title_case(&player),
                direction: Direction::parse(dir.as_str())?,
                threshold: parse_threshold(caps.name("threshold")?.as_str())?,
                stat: caps.name("stat")?.as_str().trim().to_string(),
                odds: odds_or_unknown(caps.name("odds")),
            })
        })
    }
}

impl BetMatcher for PlayerPropMatcher {
    fn name(&self) -> &'static str {
        "player_prop"
    }

    fn attempt(&self, slip: &SlipText<'_>, resolver: &TeamResolver) -> Option<Bet> {
        Self::capitalised(&slip.flat, resolver).or_else(|| Self::case_folded(&slip.flat, resolver))
    }
}

/// `<Team> at|@|vs <Team> <odds>`
#[derive(Debug, Default, Clone, Copy)]
pub struct MoneylineMatcher;

impl BetMatcher for MoneylineMatcher {
    fn name(&self) -> &'static str {
        "moneyline"
    }

    fn attempt(&self, slip: &SlipText<'_>, resolver: &TeamResolver) -> Option<Bet> {
        let caps = RE_MONEYLINE.captures(&slip.flat)?;
        Some(Bet::Moneyline {
            away: resolver.resolve_phrase(caps.name("away")?.as_str(), Anchor::Trailing),
            home: resolver.resolve_phrase(caps.name("home")?.as_str(), Anchor::Leading),
            odds: odds_or_unknown(caps.name("odds")),
        })
    }
}

/// `Over|Under <number> <odds>` without team or player context
#[derive(Debug, Default, Clone, Copy)]
pub struct TotalMatcher;

impl BetMatcher for TotalMatcher {
    fn name(&self) -> &'static str {
        "total"
    }

    fn attempt(&self, slip: &SlipText<'_>, resolver: &TeamResolver) -> Option<Bet> {
        RE_TOTAL.captures_iter(&slip.flat).find_map(|caps| {
            let dir = caps.name("dir")?;
            if player_context(&slip.flat, dir.start(), resolver).is_some() {
                debug!("over/under follows a player name, not a game total");
                return None;
            }
            Some(Bet::Total {
                direction: Direction::parse(dir.as_str())?,
                threshold: parse_threshold(caps.name("threshold")?.as_str())?,
                odds: odds_or_unknown(caps.name("odds")),
            })
        })
    }
}

/// Ordered matcher cascade producing a `Bet` for any input
pub struct Classifier {
    resolver: TeamResolver,
    matchers: Vec<Box<dyn BetMatcher>>,
}

impl Classifier {
    /// Classifier with the standard cascade.
    pub fn new(resolver: TeamResolver) -> Self {
        Self::with_matchers(resolver, Self::default_matchers())
    }

    /// Classifier with a caller-supplied cascade, tried in the given order.
    pub fn with_matchers(resolver: TeamResolver, matchers: Vec<Box<dyn BetMatcher>>) -> Self {
        Self { resolver, matchers }
    }

    pub fn default_matchers() -> Vec<Box<dyn BetMatcher>> {
        vec![
            Box::new(MultiLegMatcher),
            Box::new(PlayerPropMatcher),
            Box::new(MoneylineMatcher),
            Box::new(TotalMatcher),
        ]
    }

    /// Matcher names in the order they are tried.
    pub fn precedence(&self) -> Vec<&'static str> {
        self.matchers.iter().map(|m| m.name()).collect()
    }

    /// Classify raw slip text. Never fails.
    pub fn classify(&self, raw: &str) -> Bet {
        self.classify_slip(&SlipText::new(raw))
    }

    pub fn classify_slip(&self, slip: &SlipText<'_>) -> Bet {
        if slip.flat.is_empty() {
            return slip.unclassified();
        }

        for matcher in &self.matchers {
            if let Some(bet) = matcher.attempt(slip, &self.resolver) {
                debug!(matcher = matcher.name(), kind = bet.kind(), "slip classified");
                return bet;
            }
        }

        warn!(chars = slip.flat.len(), "no matcher recognised slip");
        slip.unclassified()
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new(TeamResolver::seeded())
    }
}

impl std::fmt::Debug for Classifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Classifier")
            .field("aliases", &self.resolver.len())
            .field("matchers", &self.precedence())
            .finish()
    }
}

static SEEDED: LazyLock<Classifier> = LazyLock::new(Classifier::default);

/// Classify with the seeded MLB alias table.
pub fn classify(text: &str) -> Bet {
    SEEDED.classify(text)
}

/// Overall price of a multi-leg slip.
///
/// A price labelled `parlay`/`teaser`/`odds` wins. Otherwise the last
/// unparenthesised odds token that is not already a leg's price.
fn slip_price(flat: &str, legs: &[Leg]) -> Option<Odds> {
    let labelled = RE_LABELLED_ODDS
        .captures_iter(flat)
        .find_map(|caps| caps.name("odds").and_then(|m| odds::normalize(m.as_str())));
    if labelled.is_some() {
        return labelled;
    }

    let leg_prices: HashSet<Odds> = legs.iter().filter_map(|leg| leg.odds).collect();
    flat.split_whitespace()
        .rev()
        .map(|token| token.trim_end_matches([',', ';']))
        .filter_map(odds::normalize)
        .find(|price| !leg_prices.contains(price))
}

/// Drop a team name the capture picked up in front of the player.
///
/// `None` when the whole capture is a team: "Red Sox Over 8.5 Runs" is a
/// game total, not a prop.
fn strip_team_prefix(name: &str, resolver: &TeamResolver) -> Option<String> {
    let words: Vec<&str> = name.split_whitespace().collect();
    match resolver.match_phrase(name, Anchor::Leading) {
        Some((_, n)) if n >= words.len() => None,
        Some((_, n)) => Some(words[n..].join(" ")),
        None => Some(name.to_string()),
    }
}

/// Player named directly in front of byte offset `at`.
///
/// `None` when nothing but teams, stat words or slip headers precede it.
fn player_context(flat: &str, at: usize, resolver: &TeamResolver) -> Option<String> {
    let phrase = strip_leading_noise(&preceding_words(flat, at).join(" "));
    let name = strip_leading_noise(&strip_team_prefix(&phrase, resolver)?);
    if name.split_whitespace().all(|w| is_stat_word(w) || is_chrome_word(w)) {
        return None;
    }
    Some(name)
}

fn teaser_points(flat: &str) -> Option<f64> {
    let caps = RE_TEASER_POINTS.captures(flat)?;
    caps.name("points")
        .or_else(|| caps.name("points2"))
        .and_then(|m| parse_threshold(m.as_str()))
}
