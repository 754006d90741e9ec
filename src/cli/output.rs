//! Output formatting for `slipcheck` commands.
//!
//! Supports two modes: human-readable tables (default) and JSON (--json).

use serde::Serialize;
use tabled::{Table, Tabled};

use crate::domain::{Bet, Leg};
use crate::weather::WeatherImpact;

/// Output mode for command results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Table,
    Json,
}

impl OutputMode {
    pub fn from_json_flag(json: bool) -> Self {
        if json {
            OutputMode::Json
        } else {
            OutputMode::Table
        }
    }
}

/// One labelled value in a vertical table
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct FieldRow {
    #[tabled(rename = "Field")]
    pub field: String,
    #[tabled(rename = "Value")]
    pub value: String,
}

impl FieldRow {
    pub fn new(field: impl Into<String>, value: impl ToString) -> Self {
        Self {
            field: field.into(),
            value: value.to_string(),
        }
    }
}

#[derive(Debug, Clone, Tabled, Serialize)]
pub struct LegRow {
    #[tabled(rename = "#")]
    pub index: usize,
    #[tabled(rename = "Subject")]
    pub subject: String,
    #[tabled(rename = "Description")]
    pub description: String,
    #[tabled(rename = "Odds")]
    pub odds: String,
}

impl LegRow {
    pub fn from_legs(legs: &[Leg]) -> Vec<LegRow> {
        legs.iter()
            .enumerate()
            .map(|(i, leg)| LegRow {
                index: i + 1,
                subject: leg.subject.clone(),
                description: leg.description.clone(),
                odds: leg.odds.map_or_else(|| "-".to_string(), |o| o.to_string()),
            })
            .collect()
    }
}

/// Field rows describing a bet (legs are printed separately).
pub fn bet_rows(bet: &Bet) -> Vec<FieldRow> {
    let mut rows = vec![FieldRow::new("Kind", bet.kind())];
    match bet {
        Bet::Moneyline { away, home, odds } => {
            rows.push(FieldRow::new("Away", away));
            rows.push(FieldRow::new("Home", home));
            rows.push(FieldRow::new("Odds", odds));
        }
        Bet::PlayerProp {
            player,
            direction,
            threshold,
            stat,
            odds,
        } => {
            rows.push(FieldRow::new("Player", player));
            rows.push(FieldRow::new("Line", format!("{direction} {threshold} {stat}")));
            rows.push(FieldRow::new("Odds", odds));
        }
        Bet::Total {
            direction,
            threshold,
            odds,
        } => {
            rows.push(FieldRow::new("Line", format!("{direction} {threshold}")));
            rows.push(FieldRow::new("Odds", odds));
        }
        Bet::Parlay { legs, combined_odds } => {
            rows.push(FieldRow::new("Legs", legs.len()));
            rows.push(FieldRow::new("Combined odds", display_or_dash(combined_odds)));
        }
        Bet::Teaser {
            legs,
            points_adjustment,
            odds,
        } => {
            rows.push(FieldRow::new("Legs", legs.len()));
            rows.push(FieldRow::new("Points", display_or_dash(points_adjustment)));
            rows.push(FieldRow::new("Odds", display_or_dash(odds)));
        }
        Bet::Unclassified { raw_text } => {
            rows.push(FieldRow::new("Raw text", raw_text.trim()));
        }
    }
    rows
}

pub fn weather_rows(impact: &WeatherImpact) -> Vec<FieldRow> {
    let mut rows: Vec<FieldRow> = impact
        .factors
        .iter()
        .map(|(kind, factor)| FieldRow::new(kind.to_string(), format!("{factor:.2}")))
        .collect();
    rows.push(FieldRow::new("overall", format!("{:.4}", impact.overall_factor)));
    rows.push(FieldRow::new("category", impact.category));
    rows.push(FieldRow::new("risk", impact.risk_level));
    rows
}

pub fn display_or_dash<T: std::fmt::Display>(value: &Option<T>) -> String {
    value.as_ref().map_or_else(|| "-".to_string(), |v| v.to_string())
}

/// Print a vec of Tabled + Serialize items in the chosen mode.
pub fn print_items<T: Tabled + Serialize>(items: &[T], mode: OutputMode) -> anyhow::Result<()> {
    match mode {
        OutputMode::Table => {
            if items.is_empty() {
                println!("(no results)");
            } else {
                let table = Table::new(items).to_string();
                println!("{table}");
            }
        }
        OutputMode::Json => {
            let json = serde_json::to_string_pretty(items)?;
            println!("{json}");
        }
    }
    Ok(())
}

/// Print a single Serialize item as pretty JSON.
pub fn print_json<T: Serialize>(item: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(item)?);
    Ok(())
}

/// Print a warning message.
pub fn print_warn(msg: &str) {
    println!("\x1b[33m{msg}\x1b[0m");
}
