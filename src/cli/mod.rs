//! slipcheck CLI
//!
//! Commands:
//! - `slipcheck classify` - Parse slip text into a structured bet
//! - `slipcheck odds` - Validate an American odds token
//! - `slipcheck analyze` - Full pipeline: bet, edge, stake, weather
//! - `slipcheck weather` - Weather impact only

pub mod commands;
pub mod output;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::weather::WeatherReading;

pub use output::OutputMode;

/// Betting slip parser and edge/weather analytics
#[derive(Parser, Debug)]
#[command(name = "slipcheck")]
#[command(author, version, about = "Parse OCR'd betting slips and score them")]
pub struct Cli {
    /// Print JSON instead of tables
    #[arg(long, global = true)]
    pub json: bool,

    /// Directory holding default.toml and environment overrides
    #[arg(long, global = true, env = "SLIPCHECK_CONFIG_DIR", default_value = "config")]
    pub config_dir: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Classify slip text read from a file, or stdin with `-`
    Classify {
        #[arg(default_value = "-")]
        input: String,
    },

    /// Validate and price a single odds token (e.g. +150, -120)
    Odds {
        #[arg(allow_hyphen_values = true)]
        token: String,
    },

    /// Classify a slip and compute edge, stake and weather impact
    Analyze {
        /// Slip text file, or `-` for stdin
        #[arg(long, default_value = "-")]
        slip: String,

        /// Externally estimated win probability in [0, 1]
        #[arg(long)]
        true_prob: Option<f64>,

        #[command(flatten)]
        weather: WeatherArgs,
    },

    /// Weather impact for a game
    Weather {
        #[command(flatten)]
        weather: WeatherArgs,
    },
}

#[derive(Args, Debug, Clone, Default)]
pub struct WeatherArgs {
    /// Temperature in °F
    #[arg(long, allow_hyphen_values = true)]
    pub temp: Option<f64>,

    /// Wind speed in mph
    #[arg(long)]
    pub wind: Option<f64>,

    /// Relative humidity in percent
    #[arg(long)]
    pub humidity: Option<f64>,

    /// Barometric pressure in hPa
    #[arg(long)]
    pub pressure: Option<f64>,

    /// Free-text conditions (e.g. "dome", "roof closed")
    #[arg(long)]
    pub conditions: Option<String>,

    /// Venue name for the ballpark factor
    #[arg(long)]
    pub ballpark: Option<String>,
}

impl WeatherArgs {
    pub fn reading(&self) -> WeatherReading {
        WeatherReading {
            temperature_f: self.temp,
            wind_speed_mph: self.wind,
            humidity_pct: self.humidity,
            pressure_hpa: self.pressure,
            conditions: self.conditions.clone(),
        }
    }

    /// True when any weather input or a ballpark was given.
    pub fn is_supplied(&self) -> bool {
        self.temp.is_some()
            || self.wind.is_some()
            || self.humidity.is_some()
            || self.pressure.is_some()
            || self.conditions.is_some()
            || self.ballpark.is_some()
    }
}
