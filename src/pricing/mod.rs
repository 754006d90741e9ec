//! Pricing: edge assessment and stake sizing

pub mod edge;
pub mod staking;

pub use edge::{
    edge_percentage, kelly_fraction, recommendation, EdgeAssessment, EdgeEngine, Recommendation, BET_EDGE_THRESHOLD,
    PASS_EDGE_THRESHOLD,
};
pub use staking::StakePolicy;
