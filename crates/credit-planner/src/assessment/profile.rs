use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::domain::{FinancialInput, RiskAppetite};

const INVESTABLE_SHARE_OF_SURPLUS: Decimal = dec!(0.7);
const EMERGENCY_FUND_MONTHS: Decimal = dec!(6);

/// Conservative / Moderate / Aggressive label.
///
/// Used for both the profile's risk category and the score's risk profile; the two are
/// derived by different rules and are kept as separate fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskTier {
    Conservative,
    Moderate,
    Aggressive,
}

impl RiskTier {
    pub const fn label(self) -> &'static str {
        match self {
            RiskTier::Conservative => "Conservative",
            RiskTier::Moderate => "Moderate",
            RiskTier::Aggressive => "Aggressive",
        }
    }
}

/// Most urgent financial action area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    CreditRepair,
    DebtReduction,
    DebtManagement,
    WealthBuilding,
}

impl Priority {
    pub const fn key(self) -> &'static str {
        match self {
            Priority::CreditRepair => "credit_repair",
            Priority::DebtReduction => "debt_reduction",
            Priority::DebtManagement => "debt_management",
            Priority::WealthBuilding => "wealth_building",
        }
    }

    pub const fn title(self) -> &'static str {
        match self {
            Priority::CreditRepair => "Credit Repair",
            Priority::DebtReduction => "Debt Reduction",
            Priority::DebtManagement => "Debt Management",
            Priority::WealthBuilding => "Wealth Building",
        }
    }
}

/// Metrics derived from a single submission. Recomputed on every evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    /// Income minus expenses; negative when the subject runs a deficit.
    pub surplus: Decimal,
    pub debt_to_income: Decimal,
    pub risk_category: RiskTier,
    pub investment_capacity: Decimal,
    pub emergency_fund_target: Decimal,
    pub priority: Priority,
}

pub fn analyze_profile(input: &FinancialInput) -> Profile {
    let surplus = input.income - input.expenses;
    let debt_to_income = input.debt / input.income_divisor();

    Profile {
        surplus,
        debt_to_income,
        risk_category: risk_category(input, surplus, debt_to_income),
        investment_capacity: (surplus * INVESTABLE_SHARE_OF_SURPLUS).max(Decimal::ZERO),
        emergency_fund_target: input.expenses * EMERGENCY_FUND_MONTHS,
        priority: priority(input, debt_to_income),
    }
}

fn risk_category(input: &FinancialInput, surplus: Decimal, debt_to_income: Decimal) -> RiskTier {
    if input.risk_appetite == RiskAppetite::High && input.age < 35 && surplus > dec!(15000) {
        RiskTier::Aggressive
    } else if input.risk_appetite == RiskAppetite::Low
        || debt_to_income > dec!(0.5)
        || input.missed_payments > 2
    {
        RiskTier::Conservative
    } else {
        RiskTier::Moderate
    }
}

fn priority(input: &FinancialInput, debt_to_income: Decimal) -> Priority {
    if input.missed_payments > 3 || input.credit_utilization > dec!(80) {
        Priority::CreditRepair
    } else if debt_to_income > dec!(0.6) {
        Priority::DebtReduction
    } else if debt_to_income > dec!(0.3) {
        Priority::DebtManagement
    } else {
        Priority::WealthBuilding
    }
}
