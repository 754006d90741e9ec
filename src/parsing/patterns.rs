//! Slip text patterns
//!
//! Regexes are compiled once and shared by the classifier and leg extractor.
//! Odds captures are deliberately loose (`[+-]?\d{1,5}`); whether a capture
//! is a real price is decided by `odds::validate`, never by the regex.

use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

use super::teams::{Anchor, TeamResolver};
use crate::domain::odds::{self, Odds};
use crate::domain::TeamName;

/// Team or player: one to four capitalised words.
macro_rules! name_words {
    () => {
        r"[A-Z][\w.'&-]*(?:\s[A-Z0-9][\w.'&-]*){0,3}"
    };
}

/// Matchup separator: `@`, `at`, `vs`, `vs.`
macro_rules! matchup_sep {
    () => {
        r"(?:\s*@\s*|\s+(?i:at|vs\.?)\s+)"
    };
}

/// Stat vocabulary, longest alternatives first.
macro_rules! stat_words {
    () => {
        r"(?i:hits\s*\+\s*runs\s*\+\s*rbis?|total\s+bases|home\s+runs?|stolen\s+bases?|strikeouts?|earned\s+runs?|hits\s+allowed|receiving\s+yards|rushing\s+yards|passing\s+yards|shots\s+on\s+goal|3-pointers?|rebounds?|receptions?|touchdowns?|assists?|singles?|doubles?|triples?|threes?|points?|walks?|yards?|saves?|goals?|hits?|runs?|rbis?|hrs?|tds?|pts|reb|ast|ks|tb)"
    };
}

pub(crate) static RE_MATCHUP: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(r"(?P<away>", name_words!(), ")", matchup_sep!(), r"(?P<home>", name_words!(), ")"))
        .expect("matchup pattern")
});

/// A matchup starting exactly at the beginning of the haystack.
static RE_MATCHUP_HEAD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!("^", name_words!(), matchup_sep!(), "[A-Z]")).expect("matchup head pattern")
});

/// Price printed straight after a matchup.
static RE_PRICE_AFTER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*\(?(?P<odds>[+-]\d{1,5})\)?(?:[\s,;]|$)").expect("price after pattern"));

pub(crate) static RE_MONEYLINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"(?P<away>",
        name_words!(),
        ")",
        matchup_sep!(),
        r"(?P<home>",
        name_words!(),
        r")\s+\(?(?P<odds>[+-]?\d{1,5})\)?(?:[\s,;]|$)"
    ))
    .expect("moneyline pattern")
});

pub(crate) static RE_PLAYER_PROP: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"(?P<player>",
        name_words!(),
        r")\s+(?P<dir>(?i:over|under))\s+(?P<threshold>\d+(?:\.\d+)?)\s+(?P<stat>[A-Za-z][A-Za-z+ ]*?)\s*\(?(?P<odds>[+-]?\d{1,5})\)?(?:[\s,;]|$)"
    ))
    .expect("player prop pattern")
});

pub(crate) static RE_TOTAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\b(?P<dir>(?i:over|under))\s+(?P<threshold>\d+(?:\.\d+)?)\s+(?:(?P<stat>[A-Za-z][A-Za-z+ ]*?)\s+)?\(?(?P<odds>[+-]?\d{1,5})\)?(?:[\s,;]|$)",
    )
    .expect("total pattern")
});

/// `Player N+ [stat] [(odds)]`
pub(crate) static RE_PLUS_PROP: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"(?P<player>",
        name_words!(),
        r")\s+(?P<count>\d+)\s?\+(?:\s*(?P<stat>",
        stat_words!(),
        r")\b)?(?:\s*\((?P<odds>[+-]?\d{1,5})\))?"
    ))
    .expect("plus prop pattern")
});

/// `Team @ Team - Description (odds)`
pub(crate) static RE_MATCHUP_LEG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"(?P<away>",
        name_words!(),
        ")",
        matchup_sep!(),
        r"(?P<home>",
        name_words!(),
        r")\s+-\s+(?P<desc>[^()]+?)\s*\((?P<odds>[+-]?\d{1,5})\)"
    ))
    .expect("matchup leg pattern")
});

/// Trailing signed token at the end of a leg line.
pub(crate) static RE_TRAILING_ODDS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<desc>.*?)\s*\(?(?P<odds>[+-]\d{1,5})\)?$").expect("trailing odds pattern")
});

pub(crate) static RE_MULTI_LEG_KEYWORD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:parlay|teaser|same\s+game|sgp|\d+\s*-?\s*legs?)\b").expect("multi-leg keyword pattern")
});

pub(crate) static RE_TEASER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\bteaser\b").expect("teaser pattern"));

/// `6 pt`, `6-Point`, `Teaser +6`. One or two digits so a `+600` price
/// is never read as points.
pub(crate) static RE_TEASER_POINTS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?P<points>\d{1,2}(?:\.\d)?)\s*-?\s*(?:pts?|points?)\b|\bteaser\s*[:(]?\s*\+(?P<points2>\d{1,2}(?:\.\d)?)\b",
    )
    .expect("teaser points pattern")
});

/// Price labelled as the overall slip price.
pub(crate) static RE_LABELLED_ODDS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:parlay|teaser|total\s+odds|odds)\b[\s:-]*\(?(?P<odds>[+-]\d{1,5})\)?(?:[\s,;]|$)")
        .expect("labelled odds pattern")
});

static RE_STAT_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(concat!("^", stat_words!(), "$")).expect("stat word pattern"));

/// Sportsbook headers and labels that sit in front of a name.
static RE_CHROME_WORD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:player|props?|picks?|bets?|slip|single|straight|wager|live|boost(?:ed)?|featured|popular|my|the|game|totals?)$")
        .expect("chrome word pattern")
});

/// A `Team at Team` occurrence with both sides resolved.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) struct Matchup {
    pub away: TeamName,
    pub home: TeamName,
    pub start: usize,
    pub end: usize,
}

/// All matchups in scan order.
///
/// The home capture is greedy and can swallow the next matchup's away
/// team, so scanning resumes right after the known part of the home name.
/// An unknown home name ends where the next matchup begins.
pub(crate) fn find_matchups(text: &str, resolver: &TeamResolver) -> Vec<Matchup> {
    let mut found = Vec::new();
    let mut pos = 0;
    while pos < text.len() {
        let Some(caps) = RE_MATCHUP.captures_at(text, pos) else {
            break;
        };
        let (Some(whole), Some(away), Some(home)) = (caps.get(0), caps.name("away"), caps.name("home")) else {
            break;
        };

        let (home_name, end) = match resolver.match_phrase(home.as_str(), Anchor::Leading) {
            Some((name, words)) => (name, home.start() + word_prefix_end(home.as_str(), words)),
            None => {
                let cut = next_matchup_within(text, home.start(), home.end()).unwrap_or(home.end());
                let home_text = text[home.start()..cut].trim_end();
                (resolver.resolve(home_text), home.start() + home_text.len())
            }
        };
        found.push(Matchup {
            away: resolver.resolve_phrase(away.as_str(), Anchor::Trailing),
            home: home_name,
            start: whole.start(),
            end,
        });
        pos = end;
    }
    found
}

/// Start of a word in `text[start..end]`, after the first, that opens
/// another matchup.
fn next_matchup_within(text: &str, start: usize, end: usize) -> Option<usize> {
    text[start..end]
        .match_indices(char::is_whitespace)
        .map(|(i, ws)| start + i + ws.len())
        .find(|&word| RE_MATCHUP_HEAD.is_match(&text[word..]))
}

/// Valid price printed directly after a byte offset, such as a matchup's end.
pub(crate) fn price_after(text: &str, at: usize) -> Option<Odds> {
    let caps = RE_PRICE_AFTER.captures(text.get(at..)?)?;
    odds::normalize(caps.name("odds")?.as_str())
}

/// Byte offset just past the first `words` whitespace-separated words.
fn word_prefix_end(s: &str, words: usize) -> usize {
    let mut seen = 0;
    let mut in_word = false;
    for (i, c) in s.char_indices() {
        if c.is_whitespace() {
            if in_word {
                seen += 1;
                in_word = false;
                if seen == words {
                    return i;
                }
            }
        } else {
            in_word = true;
        }
    }
    s.len()
}

/// Number of distinct `(away, home)` pairs; OCR double-reads count once.
pub(crate) fn distinct_matchups(text: &str, resolver: &TeamResolver) -> usize {
    find_matchups(text, resolver)
        .into_iter()
        .map(|m| (m.away, m.home))
        .collect::<HashSet<_>>()
        .len()
}

pub(crate) fn is_stat_word(word: &str) -> bool {
    RE_STAT_WORD.is_match(word)
}

pub(crate) fn is_chrome_word(word: &str) -> bool {
    RE_CHROME_WORD.is_match(word)
}

/// Drop stat words an adjacent prop left in front of a player name, and
/// slip headers such as "Player Props".
pub(crate) fn strip_leading_noise(name: &str) -> String {
    let words: Vec<&str> = name.split_whitespace().collect();
    let skip = words.iter().take_while(|w| is_stat_word(w) || is_chrome_word(w)).count();
    if skip == words.len() {
        return name.trim().to_string();
    }
    words[skip..].join(" ")
}

/// Up to four plain words directly before byte offset `at`, stopping at
/// matchup separators, numbers and punctuation.
pub(crate) fn preceding_words(text: &str, at: usize) -> Vec<&str> {
    let mut words: Vec<&str> = text[..at]
        .split_whitespace()
        .rev()
        .take_while(|w| is_plain_word(w))
        .take(4)
        .collect();
    words.reverse();
    words
}

fn is_plain_word(word: &str) -> bool {
    word.chars().next().is_some_and(char::is_alphabetic)
        && word.chars().all(|c| c.is_alphabetic() || matches!(c, '.' | '\'' | '-'))
        && !matches!(word.to_ascii_lowercase().as_str(), "at" | "vs" | "vs.")
}

/// Parse a captured odds token; present-but-invalid becomes the sentinel.
pub(crate) fn odds_or_unknown(token: Option<regex::Match<'_>>) -> Odds {
    token.map(|m| Odds::from_token(m.as_str())).unwrap_or(Odds::UNKNOWN)
}

/// Parse a captured odds token; anything that is not a real price is `None`.
pub(crate) fn odds_if_valid(token: Option<regex::Match<'_>>) -> Option<Odds> {
    token.and_then(|m| odds::normalize(m.as_str()))
}

pub(crate) fn parse_threshold(raw: &str) -> Option<f64> {
    raw.parse::<f64>().ok().filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matchup_separators() {
        let resolver = TeamResolver::seeded();
        for text in ["Yankees at Red Sox", "NYY @ BOS", "NYY@BOS", "Yankees vs Red Sox", "YANKEES AT RED SOX"] {
            let found = find_matchups(text, &resolver);
            assert_eq!(found.len(), 1, "{text}");
            assert_eq!(found[0].away, "New York Yankees", "{text}");
            assert_eq!(found[0].home, "Boston Red Sox", "{text}");
        }
    }

    #[test]
    fn test_distinct_matchups_collapse_double_reads() {
        let resolver = TeamResolver::seeded();
        let text = "Yankees at Red Sox ML NYY @ BOS ML Mets at Braves ML";
        assert_eq!(distinct_matchups(text, &resolver), 2);
    }

    #[test]
    fn test_greedy_home_does_not_swallow_next_matchup() {
        let resolver = TeamResolver::seeded();
        let found = find_matchups("Yankees at Red Sox Mets at Braves", &resolver);
        assert_eq!(found.len(), 2);
        assert_eq!(found[1].away, "New York Mets");
        assert_eq!(found[1].home, "Atlanta Braves");
    }

    #[test]
    fn test_stat_words() {
        assert!(is_stat_word("Hits"));
        assert!(is_stat_word("total bases"));
        assert!(!is_stat_word("Shohei"));
        assert_eq!(strip_leading_noise("Hits Shohei Ohtani"), "Shohei Ohtani");
        assert_eq!(strip_leading_noise("Hits"), "Hits");
    }

    #[test]
    fn test_slip_headers_are_stripped() {
        assert_eq!(strip_leading_noise("Player Props Aaron Judge"), "Aaron Judge");
        assert_eq!(strip_leading_noise("My Picks Juan Soto"), "Juan Soto");
        assert!(is_chrome_word("PROPS"));
        assert!(!is_chrome_word("Judge"));
    }

    #[test]
    fn test_unknown_home_ends_at_next_matchup() {
        let resolver = TeamResolver::seeded();
        let found = find_matchups("Lakers vs Celtics Heat vs Knicks +260", &resolver);
        assert_eq!(found.len(), 2);
        assert_eq!((found[0].away.as_str(), found[0].home.as_str()), ("Lakers", "Celtics"));
        assert_eq!((found[1].away.as_str(), found[1].home.as_str()), ("Heat", "Knicks"));

        let misread = find_matchups("Yankes at Red Sx Mets at Braves -120", &resolver);
        assert_eq!(misread.len(), 2);
        assert_eq!(misread[0].home, "Red Sx");
        assert_eq!(misread[1].away, "New York Mets");
    }

    #[test]
    fn test_unknown_multi_word_home_kept_whole() {
        let resolver = TeamResolver::seeded();
        let found = find_matchups("Lakers vs Golden State Warriors +120", &resolver);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].home, "Golden State Warriors");
    }

    #[test]
    fn test_preceding_words_stop_at_separators() {
        let text = "Yankees at Red Sox Over 8.5";
        let at = text.find("Over").unwrap();
        assert_eq!(preceding_words(text, at), vec!["Red", "Sox"]);
        let text = "aaron judge over 1.5 hits -120";
        assert_eq!(preceding_words(text, text.find("over").unwrap()), vec!["aaron", "judge"]);
        assert!(preceding_words("UNDER 9.5", 0).is_empty());
    }

    #[test]
    fn test_price_after_matchup() {
        let text = "Yankees at Red Sox +150 Mets";
        let end = text.find(" +150").unwrap();
        assert_eq!(price_after(text, end), Odds::new(150));
        assert_eq!(price_after(text, text.len()), None);
        assert_eq!(price_after("Red Sox 7", 7), None);
    }

    #[test]
    fn test_multi_leg_keywords() {
        for text in ["3-Leg Parlay", "6 pt Teaser", "Same Game Parlay", "SGP +600", "4 legs"] {
            assert!(RE_MULTI_LEG_KEYWORD.is_match(text), "{text}");
        }
        assert!(!RE_MULTI_LEG_KEYWORD.is_match("Yankees at Red Sox +150"));
    }
}
