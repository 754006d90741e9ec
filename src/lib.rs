pub mod analysis;
pub mod cli;
pub mod config;
pub mod data;
pub mod domain;
pub mod error;
pub mod parsing;
pub mod pick;
pub mod pricing;
pub mod weather;

pub use analysis::{SlipAnalyzer, SlipReport, SlipRequest};
pub use config::AppConfig;
pub use data::StaticData;
pub use domain::{Bet, Direction, Leg, Odds, TeamName};
pub use error::{Result, SlipError};
pub use parsing::{classify, extract_legs, normalize, Classifier, TeamResolver};
pub use pick::{InMemoryPickSequence, PickSequence};
pub use pricing::{EdgeAssessment, EdgeEngine, Recommendation, StakePolicy};
pub use weather::{BallparkFactors, WeatherCategory, WeatherImpact, WeatherModel, WeatherReading};
