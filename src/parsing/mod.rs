//! Slip text parsing
//!
//! This module turns raw OCR output into structured bets:
//! - Normalizer: OCR encoding repair and whitespace cleanup
//! - Teams: alias table resolving abbreviations to canonical names
//! - Legs: splitting multi-leg slips into individual legs
//! - Classifier: ordered matcher cascade producing a `Bet`

pub mod classifier;
pub mod legs;
pub mod normalizer;
mod patterns;
pub mod teams;

pub use classifier::{
    classify, BetMatcher, Classifier, MoneylineMatcher, MultiLegMatcher, PlayerPropMatcher, SlipText, TotalMatcher,
};
pub use legs::{dedup_legs, extract_legs, Extraction, LegExtractor, LegStrategy};
pub use normalizer::{normalize, normalize_lines};
pub use teams::{Anchor, TeamResolver};
