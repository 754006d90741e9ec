//! Slip analysis pipeline
//!
//! normalize -> classify -> edge -> stake -> weather, producing one
//! `SlipReport` per slip. Unreadable parts of a slip degrade to `None`
//! fields; only a caller-supplied probability outside `[0, 1]` fails.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};

use crate::data::StaticData;
use crate::domain::Bet;
use crate::error::{Result, SlipError};
use crate::parsing::{Classifier, SlipText};
use crate::pick::{InMemoryPickSequence, PickSequence};
use crate::pricing::{EdgeAssessment, EdgeEngine, StakePolicy};
use crate::weather::{WeatherImpact, WeatherModel, WeatherReading};

/// One slip plus whatever the collaborators supplied for it
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SlipRequest {
    pub text: String,
    /// Externally estimated win probability for the bet
    #[serde(default)]
    pub true_probability: Option<f64>,
    #[serde(default)]
    pub weather: Option<WeatherReading>,
    #[serde(default)]
    pub ballpark: Option<String>,
}

impl SlipRequest {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    pub fn with_true_probability(mut self, p: f64) -> Self {
        self.true_probability = Some(p);
        self
    }

    pub fn with_weather(mut self, reading: WeatherReading, ballpark: Option<String>) -> Self {
        self.weather = Some(reading);
        self.ballpark = ballpark;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlipReport {
    pub pick_number: u64,
    pub normalized_text: String,
    pub bet: Bet,
    /// Implied probability of the bet's pricing odds, when known
    pub implied_probability: Option<f64>,
    pub edge: Option<EdgeAssessment>,
    /// Recommended stake, present whenever `edge` is
    pub stake: Option<Decimal>,
    pub weather: Option<WeatherImpact>,
}

impl SlipReport {
    /// Pretty JSON for the formatting collaborator.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

pub struct SlipAnalyzer {
    classifier: Classifier,
    weather: WeatherModel,
    edge: EdgeEngine,
    stake_policy: StakePolicy,
    picks: Arc<dyn PickSequence>,
}

impl SlipAnalyzer {
    pub fn new(
        classifier: Classifier,
        weather: WeatherModel,
        stake_policy: StakePolicy,
        picks: Arc<dyn PickSequence>,
    ) -> Self {
        Self {
            classifier,
            weather,
            edge: EdgeEngine::new(),
            stake_policy,
            picks,
        }
    }

    /// Analyzer over loaded static data with an in-memory pick counter.
    pub fn from_data(data: StaticData, stake_policy: StakePolicy) -> Self {
        Self::new(
            Classifier::new(data.teams),
            WeatherModel::new(data.ballparks),
            stake_policy,
            Arc::new(InMemoryPickSequence::new()),
        )
    }

    pub fn analyze(&self, request: &SlipRequest) -> Result<SlipReport> {
        if let Some(p) = request.true_probability {
            if !(0.0..=1.0).contains(&p) {
                return Err(SlipError::InvalidProbability(p));
            }
        }

        let slip = SlipText::new(&request.text);
        let bet = self.classifier.classify_slip(&slip);
        let price = bet.pricing_odds();
        let implied_probability = price.and_then(|odds| odds.implied_probability());

        let edge = match (request.true_probability, price) {
            (Some(p), Some(odds)) => match self.edge.assess(odds, p) {
                Ok(assessment) => Some(assessment),
                Err(SlipError::UnknownOdds) => {
                    warn!(kind = bet.kind(), "odds unreadable, skipping edge assessment");
                    None
                }
                Err(e) => return Err(e),
            },
            (Some(_), None) => {
                warn!(kind = bet.kind(), "no price on slip, skipping edge assessment");
                None
            }
            (None, _) => None,
        };
        let stake = edge.as_ref().map(|assessment| self.stake_policy.stake(assessment));

        let weather = request
            .weather
            .as_ref()
            .map(|reading| self.weather.assess(reading, request.ballpark.as_deref()));

        let pick_number = self.picks.next_pick();
        info!(
            pick_number,
            kind = bet.kind(),
            edge = edge.as_ref().map(|e| e.edge_percentage),
            "slip analyzed"
        );

        Ok(SlipReport {
            pick_number,
            normalized_text: slip.flat,
            bet,
            implied_probability,
            edge,
            stake,
            weather,
        })
    }
}

impl Default for SlipAnalyzer {
    fn default() -> Self {
        Self::from_data(StaticData::default(), StakePolicy::default())
    }
}
