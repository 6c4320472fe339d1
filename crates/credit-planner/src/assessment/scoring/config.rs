use serde::{Deserialize, Serialize};

/// Which credit-score formula to apply.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreModel {
    /// Base, income, debt, utilization and payment-history factors.
    #[default]
    Standard,
    /// Standard factors plus an age factor and a job-stability bonus.
    Extended,
}

impl ScoreModel {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "standard" => Some(Self::Standard),
            "extended" => Some(Self::Extended),
            _ => None,
        }
    }
}

/// Scoring switches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub model: ScoreModel,
    /// Nudge the credit score by up to 50 points against the direction of the debt trend.
    pub debt_trend_adjustment: bool,
}
