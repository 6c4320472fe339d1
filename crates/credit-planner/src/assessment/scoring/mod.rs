mod config;
mod factors;

pub use config::{ScoreModel, ScoringConfig};

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::domain::{FinancialInput, HistoryRecord};
use super::profile::RiskTier;
use super::trend::prior_record;

/// Stateless calculator producing the credit score, health score and risk profile.
#[derive(Debug, Clone, Default)]
pub struct ScoreCalculator {
    config: ScoringConfig,
}

impl ScoreCalculator {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Score a sanitized submission. `history` is most-recent-first and is only consulted
    /// when the debt-trend adjustment is enabled.
    pub fn score(&self, input: &FinancialInput, history: &[HistoryRecord]) -> ScoreResult {
        let prior_debt = prior_record(history).map(|record| record.snapshot.sanitized().debt);
        let components = factors::credit_components(input, &self.config, prior_debt);
        let credit_score = factors::credit_score(&components);
        let health_score = factors::health_score(input);
        let debt_to_income = input.debt / input.income_divisor();

        ScoreResult {
            credit_score,
            health_score,
            risk_profile: risk_profile(health_score),
            debt_to_income,
            credit_band: CreditBand::for_score(credit_score),
            risk_factors: RiskFactors {
                high_utilization: input.credit_utilization > dec!(70),
                repeated_missed_payments: input.missed_payments > 2,
                high_debt_ratio: debt_to_income > dec!(0.5),
            },
            components,
        }
    }
}

/// Risk profile derived solely from the health score.
pub fn risk_profile(health_score: u8) -> RiskTier {
    if health_score < 50 {
        RiskTier::Conservative
    } else if health_score < 75 {
        RiskTier::Moderate
    } else {
        RiskTier::Aggressive
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CreditFactor {
    Base,
    Income,
    Debt,
    Utilization,
    PaymentHistory,
    Age,
    JobStability,
    DebtTrend,
}

/// Discrete contribution to the credit score so reports can explain the total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreComponent {
    pub factor: CreditFactor,
    pub points: Decimal,
    pub notes: String,
}

/// Coarse credit standing used for the health checkup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CreditBand {
    Excellent,
    Good,
    Average,
    Poor,
}

impl CreditBand {
    pub fn for_score(credit_score: u16) -> Self {
        match credit_score {
            750.. => CreditBand::Excellent,
            650..=749 => CreditBand::Good,
            550..=649 => CreditBand::Average,
            _ => CreditBand::Poor,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            CreditBand::Excellent => "Excellent",
            CreditBand::Good => "Good",
            CreditBand::Average => "Average",
            CreditBand::Poor => "Poor",
        }
    }

    pub const fn suggestion(self) -> &'static str {
        match self {
            CreditBand::Excellent => {
                "You're managing your credit exceptionally well. Consider long-term investments or prepaying loans."
            }
            CreditBand::Good => {
                "You're on the right path. Lowering your debt can help push you into excellent range."
            }
            CreditBand::Average => {
                "Focus on reducing existing debts and avoid new credit lines to improve your financial health."
            }
            CreditBand::Poor => {
                "Immediate action needed. Limit unnecessary spending, build emergency funds, and consult a financial advisor."
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskFactors {
    pub high_utilization: bool,
    pub repeated_missed_payments: bool,
    pub high_debt_ratio: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub credit_score: u16,
    pub health_score: u8,
    pub risk_profile: RiskTier,
    pub debt_to_income: Decimal,
    pub credit_band: CreditBand,
    pub risk_factors: RiskFactors,
    pub components: Vec<ScoreComponent>,
}

impl ScoreResult {
    pub fn debt_ratio_comment(&self) -> &'static str {
        if self.debt_to_income > dec!(0.5) {
            "Your debt-to-income ratio is high. Aim to reduce debts."
        } else {
            "Your debt-to-income ratio is manageable. Keep tracking it monthly."
        }
    }
}
