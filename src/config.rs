use config::{Config, ConfigError, Environment, File};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::SlipError;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub staking: StakingConfig,
    #[serde(default)]
    pub data: DataConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Enable JSON formatted logs
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct StakingConfig {
    /// Bankroll the stake is sized against
    #[serde(default = "default_bankroll")]
    pub bankroll: Decimal,
    /// Fraction of full Kelly to stake (e.g., 0.25 = quarter Kelly)
    #[serde(default = "default_kelly_multiplier")]
    pub kelly_multiplier: Decimal,
    /// Per-bet cap as a fraction of bankroll (e.g., 0.05 = 5%)
    #[serde(default = "default_max_stake_pct")]
    pub max_stake_pct: Decimal,
    /// Minimum edge in percentage points before staking anything
    #[serde(default)]
    pub min_edge_pct: f64,
}

fn default_bankroll() -> Decimal {
    dec!(1000)
}

fn default_kelly_multiplier() -> Decimal {
    dec!(0.25)
}

fn default_max_stake_pct() -> Decimal {
    dec!(0.05)
}

impl Default for StakingConfig {
    fn default() -> Self {
        Self {
            bankroll: default_bankroll(),
            kelly_multiplier: default_kelly_multiplier(),
            max_stake_pct: default_max_stake_pct(),
            min_edge_pct: 0.0,
        }
    }
}

/// Optional static data overrides, merged over the seeded tables
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DataConfig {
    /// TOML file with an `[aliases]` table
    #[serde(default)]
    pub team_aliases: Option<PathBuf>,
    /// TOML file with a `[ballparks]` table
    #[serde(default)]
    pub ballparks: Option<PathBuf>,
}

impl AppConfig {
    /// Load configuration from a specific directory
    pub fn load_from<P: AsRef<Path>>(config_dir: P) -> Result<Self, ConfigError> {
        let config_dir = config_dir.as_ref();

        let builder = Config::builder()
            // Start with default values
            .set_default("logging.level", "info")?
            .set_default("logging.json", false)?
            .set_default("staking.bankroll", "1000")?
            .set_default("staking.kelly_multiplier", "0.25")?
            .set_default("staking.max_stake_pct", "0.05")?
            .set_default("staking.min_edge_pct", 0.0)?
            // Load default config file
            .add_source(File::from(config_dir.join("default.toml")).required(false))
            // Load environment-specific config (e.g., config/production.toml)
            .add_source(
                File::from(config_dir.join(
                    std::env::var("SLIPCHECK_ENV").unwrap_or_else(|_| "development".to_string()),
                ))
                .required(false),
            )
            // Override with environment variables (SLIPCHECK__STAKING__BANKROLL, etc.)
            .add_source(
                Environment::with_prefix("SLIPCHECK")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            );

        builder.build()?.try_deserialize()
    }

    /// Load, then reject configurations that fail `validate`.
    pub fn load_validated<P: AsRef<Path>>(config_dir: P) -> crate::error::Result<Self> {
        let config = Self::load_from(config_dir)?;
        config
            .validate()
            .map_err(|errors| SlipError::InvalidConfig(errors.join("; ")))?;
        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();
        let staking = &self.staking;

        if staking.bankroll < Decimal::ZERO {
            errors.push("bankroll must not be negative".to_string());
        }

        if staking.kelly_multiplier <= Decimal::ZERO || staking.kelly_multiplier > Decimal::ONE {
            errors.push("kelly_multiplier must be in (0, 1]".to_string());
        }

        if staking.max_stake_pct <= Decimal::ZERO || staking.max_stake_pct > Decimal::ONE {
            errors.push("max_stake_pct must be in (0, 1]".to_string());
        }

        if !staking.min_edge_pct.is_finite() {
            errors.push(format!("min_edge_pct must be finite, got {}", staking.min_edge_pct));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
