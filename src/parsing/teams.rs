//! Team name resolution
//!
//! Static alias lookup, no network. Resolution is total: an unknown name is
//! returned title-cased instead of failing.

use std::collections::HashMap;

use crate::domain::TeamName;

/// MLB clubs with their canonical name and common slip aliases.
const MLB_TEAMS: &[(&str, &[&str])] = &[
    ("Arizona Diamondbacks", &["ARI", "AZ", "D-BACKS", "DBACKS", "DIAMONDBACKS", "ARIZONA", "ARI DIAMONDBACKS"]),
    ("Atlanta Braves", &["ATL", "BRAVES", "ATLANTA", "ATL BRAVES"]),
    ("Baltimore Orioles", &["BAL", "ORIOLES", "O'S", "BALTIMORE", "BAL ORIOLES"]),
    ("Boston Red Sox", &["BOS", "RED SOX", "REDSOX", "BOSTON", "BOS RED SOX"]),
    ("Chicago Cubs", &["CHC", "CUBS", "CHI CUBS"]),
    ("Chicago White Sox", &["CWS", "CHW", "WHITE SOX", "WHITESOX", "CHI WHITE SOX"]),
    ("Cincinnati Reds", &["CIN", "REDS", "CINCINNATI", "CIN REDS"]),
    ("Cleveland Guardians", &["CLE", "GUARDIANS", "CLEVELAND", "CLE GUARDIANS"]),
    ("Colorado Rockies", &["COL", "ROCKIES", "COLORADO", "COL ROCKIES"]),
    ("Detroit Tigers", &["DET", "TIGERS", "DETROIT", "DET TIGERS"]),
    ("Houston Astros", &["HOU", "ASTROS", "HOUSTON", "HOU ASTROS"]),
    ("Kansas City Royals", &["KC", "KCR", "ROYALS", "KANSAS CITY", "KC ROYALS"]),
    ("Los Angeles Angels", &["LAA", "ANA", "ANGELS", "LA ANGELS", "ANAHEIM ANGELS"]),
    ("Los Angeles Dodgers", &["LAD", "DODGERS", "LA DODGERS"]),
    ("Miami Marlins", &["MIA", "MARLINS", "MIAMI", "MIA MARLINS"]),
    ("Milwaukee Brewers", &["MIL", "BREWERS", "MILWAUKEE", "MIL BREWERS"]),
    ("Minnesota Twins", &["MIN", "TWINS", "MINNESOTA", "MIN TWINS"]),
    ("New York Mets", &["NYM", "METS", "NY METS"]),
    ("New York Yankees", &["NYY", "YANKEES", "YANKS", "NY YANKEES"]),
    ("Oakland Athletics", &["OAK", "ATH", "A'S", "ATHLETICS", "OAKLAND", "OAK ATHLETICS"]),
    ("Philadelphia Phillies", &["PHI", "PHILLIES", "PHILADELPHIA", "PHI PHILLIES"]),
    ("Pittsburgh Pirates", &["PIT", "PIRATES", "PITTSBURGH", "PIT PIRATES"]),
    ("San Diego Padres", &["SD", "SDP", "PADRES", "SAN DIEGO", "SD PADRES"]),
    ("San Francisco Giants", &["SF", "SFG", "GIANTS", "SAN FRANCISCO", "SF GIANTS"]),
    ("Seattle Mariners", &["SEA", "MARINERS", "SEATTLE", "SEA MARINERS"]),
    ("St. Louis Cardinals", &["STL", "CARDINALS", "CARDS", "ST LOUIS", "STL CARDINALS"]),
    ("Tampa Bay Rays", &["TB", "TBR", "RAYS", "TAMPA BAY", "TB RAYS"]),
    ("Texas Rangers", &["TEX", "RANGERS", "TEXAS", "TEX RANGERS"]),
    ("Toronto Blue Jays", &["TOR", "BLUE JAYS", "JAYS", "TORONTO", "TOR BLUE JAYS"]),
    ("Washington Nationals", &["WSH", "WAS", "NATIONALS", "NATS", "WASHINGTON", "WSH NATIONALS"]),
];

/// Which end of a captured phrase holds the team name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    /// Team name ends the phrase (away side, preceded by slip context)
    Trailing,
    /// Team name starts the phrase (home side, followed by slip context)
    Leading,
}

/// Case-insensitive alias table mapping to canonical team names
#[derive(Debug, Clone, Default)]
pub struct TeamResolver {
    aliases: HashMap<String, String>,
}

impl TeamResolver {
    /// Build a resolver from an injected alias table.
    ///
    /// Every canonical name is also registered as its own alias so that
    /// resolution is idempotent.
    pub fn new<I, A, C>(aliases: I) -> Self
    where
        I: IntoIterator<Item = (A, C)>,
        A: AsRef<str>,
        C: Into<String>,
    {
        let mut resolver = Self::default();
        resolver.extend(aliases);
        resolver
    }

    /// Resolver seeded with the MLB table.
    pub fn seeded() -> Self {
        Self::new(
            MLB_TEAMS
                .iter()
                .flat_map(|(canonical, aliases)| aliases.iter().map(move |alias| (*alias, *canonical))),
        )
    }

    /// Merge extra aliases over the existing table.
    pub fn extend<I, A, C>(&mut self, aliases: I)
    where
        I: IntoIterator<Item = (A, C)>,
        A: AsRef<str>,
        C: Into<String>,
    {
        for (alias, canonical) in aliases {
            let canonical = canonical.into();
            let key = fold_key(alias.as_ref());
            if key.is_empty() || canonical.trim().is_empty() {
                continue;
            }
            self.aliases.insert(fold_key(&canonical), canonical.clone());
            self.aliases.insert(key, canonical);
        }
    }

    pub fn len(&self) -> usize {
        self.aliases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }

    /// Exact (case-insensitive) alias lookup.
    pub fn lookup(&self, raw: &str) -> Option<TeamName> {
        self.aliases.get(&fold_key(raw)).map(TeamName::new)
    }

    pub fn is_known(&self, raw: &str) -> bool {
        self.aliases.contains_key(&fold_key(raw))
    }

    /// Resolve a raw name; unknown names come back title-cased.
    pub fn resolve(&self, raw: &str) -> TeamName {
        if let Some(name) = self.lookup(raw) {
            return name;
        }
        let titled = title_case(raw);
        if titled.is_empty() {
            TeamName::new(raw)
        } else {
            TeamName::new(titled)
        }
    }

    /// Resolve a multi-word capture that may carry extra slip words.
    ///
    /// Finds the longest known word span anchored at the given end of the
    /// phrase, and falls back to `resolve` on the whole phrase.
    pub fn resolve_phrase(&self, raw: &str, anchor: Anchor) -> TeamName {
        self.match_phrase(raw, anchor)
            .map(|(name, _)| name)
            .unwrap_or_else(|| self.resolve(raw))
    }

    /// Longest known word span at the anchored end, with its word count.
    pub fn match_phrase(&self, raw: &str, anchor: Anchor) -> Option<(TeamName, usize)> {
        let words: Vec<&str> = raw.split_whitespace().collect();
        let n = words.len();
        let spans: Vec<&[&str]> = match anchor {
            Anchor::Trailing => (0..n).map(|start| &words[start..]).collect(),
            Anchor::Leading => (1..=n).rev().map(|end| &words[..end]).collect(),
        };
        spans
            .into_iter()
            .find_map(|span| self.lookup(&span.join(" ")).map(|name| (name, span.len())))
    }
}

/// Lookup key: uppercase, periods dropped, whitespace collapsed, outer
/// punctuation trimmed.
fn fold_key(raw: &str) -> String {
    let upper = raw.replace('.', "").to_uppercase();
    upper
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .trim_matches(|c: char| !c.is_alphanumeric() && c != '\'')
        .to_string()
}

pub(crate) fn title_case(raw: &str) -> String {
    raw.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}
