//! Static data tables
//!
//! The host loads the team-alias and ballpark tables once and hands them to
//! the classifier and weather model. Optional TOML files are merged over
//! the seeded tables:
//!
//! ```toml
//! [aliases]
//! "BRONX BOMBERS" = "New York Yankees"
//!
//! [ballparks]
//! "Sahlen Field" = 1.02
//! ```

use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::info;

use crate::config::DataConfig;
use crate::error::{Result, SlipError};
use crate::parsing::TeamResolver;
use crate::weather::BallparkFactors;

#[derive(Debug, Default, Deserialize)]
struct DataFile {
    #[serde(default)]
    aliases: BTreeMap<String, String>,
    #[serde(default)]
    ballparks: BTreeMap<String, f64>,
}

/// Alias and ballpark tables ready to inject
#[derive(Debug, Clone)]
pub struct StaticData {
    pub teams: TeamResolver,
    pub ballparks: BallparkFactors,
}

impl Default for StaticData {
    fn default() -> Self {
        Self {
            teams: TeamResolver::seeded(),
            ballparks: BallparkFactors::seeded(),
        }
    }
}

impl StaticData {
    /// Seeded tables plus whatever the configured files add.
    pub fn load(config: &DataConfig) -> Result<Self> {
        let mut data = Self::default();

        if let Some(path) = &config.team_aliases {
            let file = read_data_file(path)?;
            info!(path = %path.display(), count = file.aliases.len(), "team aliases loaded");
            data.teams.extend(file.aliases);
        }

        if let Some(path) = &config.ballparks {
            let file = read_data_file(path)?;
            if let Some((venue, factor)) = file.ballparks.iter().find(|(_, f)| !f.is_finite() || **f <= 0.0) {
                return Err(SlipError::data_file(
                    path,
                    format!("ballpark factor for {venue:?} must be positive, got {factor}"),
                ));
            }
            info!(path = %path.display(), count = file.ballparks.len(), "ballpark factors loaded");
            data.ballparks.extend(file.ballparks);
        }

        Ok(data)
    }
}

fn read_data_file(path: &Path) -> Result<DataFile> {
    let text = fs::read_to_string(path).map_err(|e| SlipError::data_file(path, e.to_string()))?;
    toml::from_str(&text).map_err(|e| SlipError::data_file(path, e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn write(dir: &tempfile::TempDir, name: &str, body: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn test_no_files_gives_seeded_tables() {
        let data = StaticData::load(&DataConfig::default()).unwrap();
        assert_eq!(data.teams.resolve("NYY"), "New York Yankees");
        assert_eq!(data.ballparks.factor("Coors Field"), 1.15);
    }

    #[test]
    fn test_files_merge_over_seeded() {
        let dir = tempfile::tempdir().unwrap();
        let aliases = write(&dir, "aliases.toml", "[aliases]\n\"BRONX BOMBERS\" = \"New York Yankees\"\n");
        let parks = write(&dir, "parks.toml", "[ballparks]\n\"Sahlen Field\" = 1.02\n\"Coors Field\" = 1.2\n");

        let data = StaticData::load(&DataConfig {
            team_aliases: Some(aliases),
            ballparks: Some(parks),
        })
        .unwrap();

        assert_eq!(data.teams.resolve("bronx bombers"), "New York Yankees");
        assert_eq!(data.teams.resolve("BOS"), "Boston Red Sox");
        assert_eq!(data.ballparks.factor("Sahlen Field"), 1.02);
        assert_eq!(data.ballparks.factor("Coors Field"), 1.2);
    }

    #[test]
    fn test_non_positive_factor_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let parks = write(&dir, "parks.toml", "[ballparks]\n\"Nowhere\" = 0.0\n");
        let err = StaticData::load(&DataConfig {
            team_aliases: None,
            ballparks: Some(parks),
        })
        .unwrap_err();
        assert!(matches!(err, SlipError::DataFile { .. }));
    }

    #[test]
    fn test_missing_and_malformed_files_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let missing = DataConfig {
            team_aliases: Some(dir.path().join("absent.toml")),
            ballparks: None,
        };
        assert!(matches!(StaticData::load(&missing), Err(SlipError::DataFile { .. })));

        let broken = write(&dir, "broken.toml", "[aliases\nNYY = ");
        let malformed = DataConfig {
            team_aliases: Some(broken),
            ballparks: None,
        };
        assert!(matches!(StaticData::load(&malformed), Err(SlipError::DataFile { .. })));
    }
}
