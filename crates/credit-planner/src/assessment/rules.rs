use std::collections::BTreeMap;

use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::domain::FinancialInput;

/// Fixed eligibility rules, serialized under their human-readable names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CreditRule {
    #[serde(rename = "Credit score above 700")]
    CreditScoreAbove700,
    #[serde(rename = "Has stable income")]
    HasStableIncome,
    #[serde(rename = "Low expenses ratio")]
    LowExpensesRatio,
    #[serde(rename = "Low debt")]
    LowDebt,
}

impl CreditRule {
    pub const ALL: [CreditRule; 4] = [
        CreditRule::CreditScoreAbove700,
        CreditRule::HasStableIncome,
        CreditRule::LowExpensesRatio,
        CreditRule::LowDebt,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            CreditRule::CreditScoreAbove700 => "Credit score above 700",
            CreditRule::HasStableIncome => "Has stable income",
            CreditRule::LowExpensesRatio => "Low expenses ratio",
            CreditRule::LowDebt => "Low debt",
        }
    }

    fn holds(self, input: &FinancialInput, credit_score: u16) -> bool {
        match self {
            CreditRule::CreditScoreAbove700 => credit_score > 700,
            CreditRule::HasStableIncome => input.income > dec!(25000),
            CreditRule::LowExpensesRatio => input.expenses < dec!(0.5) * input.income,
            CreditRule::LowDebt => input.debt < dec!(0.3) * input.income,
        }
    }
}

/// Rule name to outcome, always holding all four rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleReport(BTreeMap<CreditRule, bool>);

impl RuleReport {
    pub fn passed(&self, rule: CreditRule) -> bool {
        self.0.get(&rule).copied().unwrap_or(false)
    }

    pub fn passed_count(&self) -> usize {
        self.0.values().filter(|passed| **passed).count()
    }

    pub fn iter(&self) -> impl Iterator<Item = (CreditRule, bool)> + '_ {
        self.0.iter().map(|(rule, passed)| (*rule, *passed))
    }

    /// Owned `name -> outcome` map for renderers that do not know the rule enum.
    pub fn to_labels(&self) -> BTreeMap<&'static str, bool> {
        self.iter().map(|(rule, passed)| (rule.label(), passed)).collect()
    }
}

pub fn evaluate_rules(input: &FinancialInput, credit_score: u16) -> RuleReport {
    RuleReport(
        CreditRule::ALL
            .into_iter()
            .map(|rule| (rule, rule.holds(input, credit_score)))
            .collect(),
    )
}
