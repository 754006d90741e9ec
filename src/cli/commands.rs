//! Command handlers for the `slipcheck` binary.

use anyhow::{Context, Result};
use std::io::Read;
use std::path::Path;
use tracing::info;

use super::output::{self, bet_rows, display_or_dash, weather_rows, FieldRow, LegRow, OutputMode};
use super::WeatherArgs;
use crate::analysis::{SlipAnalyzer, SlipRequest};
use crate::config::AppConfig;
use crate::data::StaticData;
use crate::domain::odds;
use crate::parsing::Classifier;
use crate::pricing::StakePolicy;
use crate::weather::WeatherModel;

/// Load and validate configuration, then the static tables it points at.
pub fn load_environment(config_dir: &Path) -> Result<(AppConfig, StaticData)> {
    let config = AppConfig::load_validated(config_dir)
        .with_context(|| format!("loading configuration from {}", config_dir.display()))?;
    let data = StaticData::load(&config.data)?;
    info!(aliases = data.teams.len(), ballparks = data.ballparks.len(), "static data ready");
    Ok((config, data))
}

/// Read slip text from a file path, or stdin for `-`.
pub fn read_input(input: &str) -> Result<String> {
    if input == "-" {
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text).context("reading slip from stdin")?;
        return Ok(text);
    }
    std::fs::read_to_string(input).with_context(|| format!("reading slip from {input}"))
}

pub fn run_classify(config_dir: &Path, input: &str, mode: OutputMode) -> Result<()> {
    let (_, data) = load_environment(config_dir)?;
    let text = read_input(input)?;
    let bet = Classifier::new(data.teams).classify(&text);

    match mode {
        OutputMode::Json => output::print_json(&bet)?,
        OutputMode::Table => {
            output::print_items(&bet_rows(&bet), mode)?;
            if !bet.legs().is_empty() {
                output::print_items(&LegRow::from_legs(bet.legs()), mode)?;
            }
            if !bet.is_classified() {
                output::print_warn("Slip could not be classified; try a clearer screenshot.");
            }
        }
    }
    Ok(())
}

pub fn run_odds(token: &str, mode: OutputMode) -> Result<()> {
    let parsed = odds::normalize(token);
    let rows = vec![
        FieldRow::new("Token", token),
        FieldRow::new("Valid", odds::validate(token)),
        FieldRow::new("American", display_or_dash(&parsed)),
        FieldRow::new(
            "Implied probability",
            display_or_dash(&parsed.and_then(|o| o.implied_probability()).map(|p| format!("{p:.4}"))),
        ),
        FieldRow::new(
            "Decimal",
            display_or_dash(&parsed.and_then(|o| o.to_decimal()).map(|d| format!("{d:.3}"))),
        ),
    ];
    output::print_items(&rows, mode)
}

pub fn run_analyze(
    config_dir: &Path,
    slip: &str,
    true_prob: Option<f64>,
    weather: &WeatherArgs,
    mode: OutputMode,
) -> Result<()> {
    let (config, data) = load_environment(config_dir)?;
    let analyzer = SlipAnalyzer::from_data(data, StakePolicy::from(&config.staking));

    let mut request = SlipRequest::new(read_input(slip)?);
    request.true_probability = true_prob;
    if weather.is_supplied() {
        request = request.with_weather(weather.reading(), weather.ballpark.clone());
    }

    let report = analyzer.analyze(&request)?;
    if mode == OutputMode::Json {
        println!("{}", report.to_json()?);
        return Ok(());
    }

    let mut rows = vec![FieldRow::new("Pick", format!("#{}", report.pick_number))];
    rows.extend(bet_rows(&report.bet));
    rows.push(FieldRow::new(
        "Implied probability",
        display_or_dash(&report.implied_probability.map(|p| format!("{p:.4}"))),
    ));
    if let Some(edge) = &report.edge {
        rows.push(FieldRow::new("True probability", format!("{:.4}", edge.true_probability)));
        rows.push(FieldRow::new("Edge", format!("{:+.2}%", edge.edge_percentage)));
        rows.push(FieldRow::new("Recommendation", edge.recommendation));
        rows.push(FieldRow::new("Kelly (full)", format!("{:.4}", edge.kelly_fraction)));
    }
    rows.push(FieldRow::new("Stake", display_or_dash(&report.stake)));
    output::print_items(&rows, mode)?;

    if !report.bet.legs().is_empty() {
        output::print_items(&LegRow::from_legs(report.bet.legs()), mode)?;
    }
    if let Some(impact) = &report.weather {
        output::print_items(&weather_rows(impact), mode)?;
    }
    Ok(())
}

pub fn run_weather(config_dir: &Path, weather: &WeatherArgs, mode: OutputMode) -> Result<()> {
    let (_, data) = load_environment(config_dir)?;
    let impact = WeatherModel::new(data.ballparks).assess(&weather.reading(), weather.ballpark.as_deref());

    match mode {
        OutputMode::Json => output::print_json(&impact),
        OutputMode::Table => {
            output::print_items(&weather_rows(&impact), mode)?;
            for line in &impact.rationale {
                println!("  - {line}");
            }
            Ok(())
        }
    }
}
