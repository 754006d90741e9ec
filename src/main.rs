use anyhow::Result;
use clap::Parser;
use slipcheck::cli::{commands, Cli, Commands, OutputMode};
use slipcheck::config::AppConfig;

mod main_runtime;

use main_runtime::{init_logging, init_logging_simple};

fn main() -> Result<()> {
    let cli = Cli::parse();
    let mode = OutputMode::from_json_flag(cli.json);

    match &cli.command {
        Commands::Classify { input } => {
            init_logging_simple();
            commands::run_classify(&cli.config_dir, input, mode)?;
        }
        Commands::Odds { token } => {
            init_logging_simple();
            commands::run_odds(token, mode)?;
        }
        Commands::Analyze {
            slip,
            true_prob,
            weather,
        } => {
            // Logging settings come from config; a broken config is reported
            // by the command itself.
            let logging = AppConfig::load_from(&cli.config_dir)
                .map(|config| config.logging)
                .unwrap_or_default();
            init_logging(&logging);
            commands::run_analyze(&cli.config_dir, slip, *true_prob, weather, mode)?;
        }
        Commands::Weather { weather } => {
            init_logging_simple();
            commands::run_weather(&cli.config_dir, weather, mode)?;
        }
    }

    Ok(())
}
