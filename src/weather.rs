//! Weather impact model
//!
//! Five independent factors (temperature, wind, humidity, pressure and
//! ballpark) are each looked up in a band table and multiplied into an
//! overall scoring factor. A missing reading contributes exactly 1.0, so
//! partial data drifts toward neutral instead of being dropped from the
//! product.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use tracing::debug;

/// Weather as supplied by the weather collaborator
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeatherReading {
    pub temperature_f: Option<f64>,
    pub wind_speed_mph: Option<f64>,
    pub humidity_pct: Option<f64>,
    pub pressure_hpa: Option<f64>,
    pub conditions: Option<String>,
}

impl WeatherReading {
    /// Roofed venue or closed roof: the atmosphere does not reach the field.
    pub fn is_enclosed(&self) -> bool {
        self.conditions.as_deref().is_some_and(|c| {
            let c = c.to_lowercase();
            c.contains("dome") || c.contains("roof closed") || c.contains("indoor")
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FactorKind {
    Temperature,
    Wind,
    Humidity,
    Pressure,
    Ballpark,
}

impl FactorKind {
    pub const ALL: [FactorKind; 5] = [
        FactorKind::Temperature,
        FactorKind::Wind,
        FactorKind::Humidity,
        FactorKind::Pressure,
        FactorKind::Ballpark,
    ];
}

impl fmt::Display for FactorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FactorKind::Temperature => write!(f, "temperature"),
            FactorKind::Wind => write!(f, "wind"),
            FactorKind::Humidity => write!(f, "humidity"),
            FactorKind::Pressure => write!(f, "pressure"),
            FactorKind::Ballpark => write!(f, "ballpark"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WeatherCategory {
    HeavyHitterFavor,
    ModerateHitterFavor,
    Neutral,
    ModeratePitcherFavor,
    HeavyPitcherFavor,
}

impl WeatherCategory {
    pub fn from_factor(overall: f64) -> Self {
        if overall > 1.05 {
            WeatherCategory::HeavyHitterFavor
        } else if overall > 1.02 {
            WeatherCategory::ModerateHitterFavor
        } else if overall > 0.98 {
            WeatherCategory::Neutral
        } else if overall > 0.95 {
            WeatherCategory::ModeratePitcherFavor
        } else {
            WeatherCategory::HeavyPitcherFavor
        }
    }
}

impl fmt::Display for WeatherCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WeatherCategory::HeavyHitterFavor => write!(f, "Heavy-Hitter-Favor"),
            WeatherCategory::ModerateHitterFavor => write!(f, "Moderate-Hitter-Favor"),
            WeatherCategory::Neutral => write!(f, "Neutral"),
            WeatherCategory::ModeratePitcherFavor => write!(f, "Moderate-Pitcher-Favor"),
            WeatherCategory::HeavyPitcherFavor => write!(f, "Heavy-Pitcher-Favor"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn from_factor(overall: f64) -> Self {
        let deviation = (overall - 1.0).abs();
        if deviation > 0.08 {
            RiskLevel::High
        } else if deviation > 0.04 {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RiskLevel::Low => write!(f, "Low"),
            RiskLevel::Medium => write!(f, "Medium"),
            RiskLevel::High => write!(f, "High"),
        }
    }
}

/// Combined outcome impact of one game's weather
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherImpact {
    /// Every factor kind is present; absent readings hold 1.0
    pub factors: BTreeMap<FactorKind, f64>,
    pub overall_factor: f64,
    pub category: WeatherCategory,
    pub risk_level: RiskLevel,
    pub rationale: Vec<String>,
}

/// One row of a band table; applies to readings below `upper`
struct Band {
    upper: f64,
    factor: f64,
    rationale: &'static str,
}

const TEMPERATURE_BANDS: &[Band] = &[
    Band { upper: 50.0, factor: 0.95, rationale: "cold air suppresses carry" },
    Band { upper: 65.0, factor: 0.98, rationale: "cool temperatures slightly suppress carry" },
    Band { upper: 75.0, factor: 1.00, rationale: "mild temperatures" },
    Band { upper: 85.0, factor: 1.02, rationale: "warm air helps carry" },
    Band { upper: f64::INFINITY, factor: 1.05, rationale: "hot air boosts carry" },
];

const WIND_BANDS: &[Band] = &[
    Band { upper: 5.0, factor: 1.00, rationale: "calm wind" },
    Band { upper: 10.0, factor: 1.02, rationale: "light wind" },
    Band { upper: 15.0, factor: 1.04, rationale: "moderate wind" },
    Band { upper: 25.0, factor: 1.06, rationale: "strong wind" },
    Band { upper: f64::INFINITY, factor: 1.08, rationale: "very strong wind" },
];

const HUMIDITY_BANDS: &[Band] = &[
    Band { upper: 40.0, factor: 0.98, rationale: "dry air" },
    Band { upper: 60.0, factor: 1.00, rationale: "moderate humidity" },
    Band { upper: 80.0, factor: 1.01, rationale: "humid air" },
    Band { upper: f64::INFINITY, factor: 1.03, rationale: "very humid air" },
];

const PRESSURE_BANDS: &[Band] = &[
    Band { upper: 1000.0, factor: 1.02, rationale: "low pressure, thinner air" },
    Band { upper: 1010.0, factor: 1.01, rationale: "slightly low pressure" },
    Band { upper: 1020.0, factor: 1.00, rationale: "normal pressure" },
    Band { upper: f64::INFINITY, factor: 0.98, rationale: "high pressure, denser air" },
];

fn lookup(bands: &'static [Band], reading: f64) -> Option<&'static Band> {
    bands.iter().find(|band| reading < band.upper)
}

const SEEDED_BALLPARKS: &[(&str, f64)] = &[
    ("Coors Field", 1.15),
    ("Great American Ball Park", 1.08),
    ("Fenway Park", 1.06),
    ("Yankee Stadium", 1.05),
    ("Citizens Bank Park", 1.05),
    ("Globe Life Field", 1.03),
    ("Wrigley Field", 1.03),
    ("Chase Field", 1.03),
    ("Truist Park", 1.02),
    ("Rogers Centre", 1.01),
    ("Kauffman Stadium", 1.00),
    ("Target Field", 1.00),
    ("Daikin Park", 1.00),
    ("Guaranteed Rate Field", 1.00),
    ("Camden Yards", 0.99),
    ("Dodger Stadium", 0.99),
    ("American Family Field", 0.99),
    ("Nationals Park", 0.99),
    ("PNC Park", 0.98),
    ("Progressive Field", 0.98),
    ("Angel Stadium", 0.98),
    ("Busch Stadium", 0.97),
    ("Comerica Park", 0.97),
    ("Citi Field", 0.96),
    ("Tropicana Field", 0.95),
    ("Sutter Health Park", 0.97),
    ("loanDepot park", 0.94),
    ("T-Mobile Park", 0.93),
    ("Petco Park", 0.92),
    ("Oracle Park", 0.90),
];

/// Per-venue scoring multipliers, matched case-insensitively
#[derive(Debug, Clone, Default)]
pub struct BallparkFactors {
    venues: HashMap<String, f64>,
}

impl BallparkFactors {
    pub const DEFAULT_FACTOR: f64 = 1.00;

    pub fn new<I, S>(venues: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: AsRef<str>,
    {
        let mut table = Self::default();
        table.extend(venues);
        table
    }

    pub fn seeded() -> Self {
        Self::new(SEEDED_BALLPARKS.iter().copied())
    }

    pub fn extend<I, S>(&mut self, venues: I)
    where
        I: IntoIterator<Item = (S, f64)>,
        S: AsRef<str>,
    {
        for (venue, factor) in venues {
            self.venues.insert(venue_key(venue.as_ref()), factor);
        }
    }

    pub fn len(&self) -> usize {
        self.venues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.venues.is_empty()
    }

    pub fn get(&self, venue: &str) -> Option<f64> {
        self.venues.get(&venue_key(venue)).copied()
    }

    /// Factor for a venue, 1.00 when unlisted.
    pub fn factor(&self, venue: &str) -> f64 {
        self.get(venue).unwrap_or(Self::DEFAULT_FACTOR)
    }
}

fn venue_key(venue: &str) -> String {
    venue.split_whitespace().collect::<Vec<_>>().join(" ").to_lowercase()
}

#[derive(Debug, Clone)]
pub struct WeatherModel {
    ballparks: BallparkFactors,
}

impl Default for WeatherModel {
    fn default() -> Self {
        Self::new(BallparkFactors::seeded())
    }
}

impl WeatherModel {
    pub fn new(ballparks: BallparkFactors) -> Self {
        Self { ballparks }
    }

    pub fn assess(&self, reading: &WeatherReading, ballpark: Option<&str>) -> WeatherImpact {
        let mut factors = BTreeMap::new();
        let mut rationale = Vec::new();
        let enclosed = reading.is_enclosed();

        let atmospheric = [
            (FactorKind::Temperature, reading.temperature_f, TEMPERATURE_BANDS, "°F"),
            (FactorKind::Wind, reading.wind_speed_mph, WIND_BANDS, " mph"),
            (FactorKind::Humidity, reading.humidity_pct, HUMIDITY_BANDS, "%"),
            (FactorKind::Pressure, reading.pressure_hpa, PRESSURE_BANDS, " hPa"),
        ];
        if enclosed {
            rationale.push("roof closed or dome: atmospheric factors neutral".to_string());
        }
        for (kind, value, bands, unit) in atmospheric {
            let band = value
                .filter(|v| v.is_finite() && !enclosed)
                .and_then(|v| lookup(bands, v).map(|band| (v, band)));
            let factor = match band {
                Some((v, band)) => {
                    rationale.push(format!("{kind} {v}{unit}: {} ({:.2})", band.rationale, band.factor));
                    band.factor
                }
                None => 1.0,
            };
            factors.insert(kind, factor);
        }

        let park_factor = match ballpark.map(str::trim).filter(|name| !name.is_empty()) {
            Some(name) => {
                let factor = self.ballparks.factor(name);
                rationale.push(format!("ballpark {name}: {factor:.2}"));
                factor
            }
            None => BallparkFactors::DEFAULT_FACTOR,
        };
        factors.insert(FactorKind::Ballpark, park_factor);

        let overall_factor: f64 = factors.values().product();
        let category = WeatherCategory::from_factor(overall_factor);
        let risk_level = RiskLevel::from_factor(overall_factor);
        debug!(overall_factor, %category, %risk_level, "weather assessed");

        WeatherImpact {
            factors,
            overall_factor,
            category,
            risk_level,
            rationale,
        }
    }
}
